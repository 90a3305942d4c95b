use crate::diagnostics::{Error, ErrorKind};
use crate::host::{is_boolean, AttributeData, Member, TypeId, TypeOracle, TypeRef, TypedConstant};
use crate::model::{ContainerOptions, SetMethodInfo, Visible};

const IS_THREAD_SAFE: &str = "IsThreadSafe";
const SET_METHOD: &str = "SetMethod";

/// Fold one options attribute's named arguments over `options`
///
/// Later values override earlier ones. Unknown names and values of the
/// wrong constant type are ignored.
pub(crate) fn fold_options<O>(
    oracle: &O,
    owner: TypeId,
    mut options: ContainerOptions,
    attribute: &AttributeData,
    errors: &mut Vec<Error>,
) -> ContainerOptions
where
    O: TypeOracle + ?Sized,
{
    for arg in &attribute.named_arguments {
        match (arg.name.as_str(), &arg.value) {
            (IS_THREAD_SAFE, TypedConstant::Bool(value)) => options.is_thread_safe = *value,
            (SET_METHOD, TypedConstant::String(name)) => match set_method(oracle, owner, name) {
                Some(info) => options.set_method = Some(info),
                None => errors.push(Error::new(
                    ErrorKind::InvalidSetMethod,
                    attribute.location.clone(),
                    vec![name.clone()],
                )),
            },
            (name, _) => tracing::debug!(argument = name, "ignoring named argument"),
        }
    }

    options
}

/// The named setter must be the only member with that name, return void or
/// bool, and take one parameter typed as its single type parameter
fn set_method<O>(oracle: &O, owner: TypeId, name: &str) -> Option<Visible<SetMethodInfo>>
where
    O: TypeOracle + ?Sized,
{
    let members = oracle.members(owner, name);
    let [Member::Method(method)] = members.as_slice() else {
        return None;
    };

    let is_returnable = if method.returns_void() {
        false
    } else if is_boolean(&method.return_type) {
        true
    } else {
        return None;
    };

    let [generic] = method.type_parameters.as_slice() else {
        return None;
    };
    let [parameter] = method.parameters.as_slice() else {
        return None;
    };
    if oracle.resolve_in(method, &parameter.ty) != TypeRef::TypeParameter(0) {
        return None;
    }

    Some(Visible::new(
        SetMethodInfo {
            name: method.name.clone(),
            is_returnable,
            generic_param: generic.clone(),
        },
        method.accessibility,
    ))
}
