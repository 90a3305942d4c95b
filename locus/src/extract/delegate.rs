use crate::diagnostics::{Error, ErrorKind};
use crate::host::{AttributeData, Member, TypeId, TypeOracle, TypedConstant};
use crate::model::{DelegateAccess, Delegation};

/// Resolve a delegate attribute `(member, containingType?)`
///
/// The member is looked up on `containingType` when given, otherwise on the
/// accessor's own type. Members on another type must be static.
pub(crate) fn delegation<O>(oracle: &O, owner: TypeId, attribute: &AttributeData) -> Result<Delegation, Error>
where
    O: TypeOracle + ?Sized,
{
    let invalid = |member: &str| {
        Error::new(
            ErrorKind::InvalidDelegate,
            attribute.location.clone(),
            vec![member.to_string()],
        )
    };

    let (member, target) = match attribute.arguments.as_slice() {
        [TypedConstant::String(member)] | [TypedConstant::String(member), TypedConstant::Null] => {
            (member, owner)
        }
        [TypedConstant::String(member), TypedConstant::Type(other)] => match oracle.resolve(other) {
            Some(id) => (member, id),
            None => return Err(invalid(member)),
        },
        _ => return Err(invalid("")),
    };

    let external = target != owner;
    let members = oracle.members(target, member);
    let (access, ty, is_static) = match members.as_slice() {
        [Member::Method(m)] if m.parameters.is_empty() && m.type_parameters.is_empty() && !m.returns_void() => {
            (DelegateAccess::Method, &m.return_type, m.is_static)
        }
        [Member::Property(p)] => (DelegateAccess::Property, &p.ty, p.is_static),
        [Member::Field(f)] => (DelegateAccess::Field, &f.ty, f.is_static),
        _ => return Err(invalid(member)),
    };

    if external && !is_static {
        return Err(invalid(member));
    }

    Ok(Delegation {
        member: member.clone(),
        access,
        owner: external.then(|| oracle.descriptor(target)),
        value_type: oracle.descriptor_for_name(ty),
    })
}
