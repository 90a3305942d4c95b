use std::collections::{HashMap, HashSet};

use crate::diagnostics::{Error, ErrorKind};
use crate::host::{AttributeData, Member, TypeId, TypeOracle, TypeRef, TypedConstant};
use crate::model::{FactoryRegistration, MethodReference, Registration, TypeRegistration};

/// Why a register attribute produced no registration
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SkippedRegister {
    /// Arguments match none of the accepted shapes
    Shape(usize),
    /// A `typeof` argument names a type the compilation does not declare
    Unresolved(String),
}

impl std::fmt::Display for SkippedRegister {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Shape(count) => write!(f, "unexpected argument shape ({} argument(s))", count),
            Self::Unresolved(name) => write!(f, "type '{}' is not declared", name),
        }
    }
}

/// Resolve a register attribute
///
/// Accepted argument shapes:
/// - `(contract, implementation)`
/// - `(contract, null)`, a self-registration
/// - `(type)`, a self-registration
pub(crate) fn type_registration<O>(
    oracle: &O,
    attribute: &AttributeData,
) -> Result<TypeRegistration, SkippedRegister>
where
    O: TypeOracle + ?Sized,
{
    let descriptor = |name: &str| {
        oracle
            .resolve(name)
            .map(|id| oracle.descriptor(id))
            .ok_or_else(|| SkippedRegister::Unresolved(name.to_string()))
    };

    match attribute.arguments.as_slice() {
        [TypedConstant::Type(service), TypedConstant::Type(implementation)] => Ok(
            TypeRegistration::new(descriptor(service)?, descriptor(implementation)?),
        ),
        [TypedConstant::Type(contract), TypedConstant::Null] | [TypedConstant::Type(contract)] => {
            Ok(TypeRegistration::concrete(descriptor(contract)?))
        }
        other => Err(SkippedRegister::Shape(other.len())),
    }
}

/// Resolve a factory attribute `(service, methodName)` against the
/// parameterless methods of the containing type
///
/// Exactly one parameterless, non-generic method of that name must exist,
/// and its return type must be the service type itself.
pub(crate) fn factory_registration<O>(
    oracle: &O,
    owner: TypeId,
    attribute: &AttributeData,
) -> Result<FactoryRegistration, Error>
where
    O: TypeOracle + ?Sized,
{
    let invalid = |service: &str, method: &str| {
        Error::new(
            ErrorKind::InvalidFactory,
            attribute.location.clone(),
            vec![service.to_string(), method.to_string()],
        )
    };

    let (service, name) = match attribute.arguments.as_slice() {
        [TypedConstant::Type(service), TypedConstant::String(name)] => (service, name),
        [TypedConstant::Type(service), ..] => return Err(invalid(service, "")),
        _ => return Err(invalid("", "")),
    };

    let Some(service_id) = oracle.resolve(service) else {
        return Err(invalid(service, name));
    };
    let service_type = oracle.descriptor(service_id);

    let candidates: Vec<_> = oracle
        .members(owner, name)
        .into_iter()
        .filter_map(|member| match member {
            Member::Method(m) if m.parameters.is_empty() && m.type_parameters.is_empty() => Some(m),
            _ => None,
        })
        .collect();

    match candidates.as_slice() {
        [method] if oracle.resolve_in(method, &method.return_type) == TypeRef::Named(service_id) => {
            Ok(FactoryRegistration::new(service_type, MethodReference::new(&method.name)))
        }
        _ => Err(invalid(service_type.full_name(), name)),
    }
}

/// Ordered registrations with first-wins uniqueness on the service type
#[derive(Debug, Default)]
pub(crate) struct RegistrationSet {
    items: Vec<Registration>,
    /// service full name -> provider label of the retained registration
    claimed: HashMap<String, String>,
}

impl RegistrationSet {
    /// Keep the registration, or report it as a duplicate
    pub(crate) fn add(&mut self, registration: Registration, attribute: &AttributeData) -> Result<(), Error> {
        let service = registration.service_type().full_name().to_string();

        if let Some(existing) = self.claimed.get(&service) {
            return Err(Error::new(
                ErrorKind::DuplicateService,
                attribute.location.clone(),
                vec![service, registration.provider_label(), existing.clone()],
            ));
        }

        tracing::debug!(
            service = %service,
            provider = %registration.provider_label(),
            "registered service"
        );
        self.claimed.insert(service, registration.provider_label());
        self.items.push(registration);
        Ok(())
    }

    /// Hand out the registrations with unique backing field names
    ///
    /// The first registration keeps the derived name; later collisions get
    /// `_2`, `_3`… appended in registration order.
    pub(crate) fn finish(self) -> Vec<Registration> {
        let mut used = HashSet::new();
        let mut items = self.items;

        for registration in &mut items {
            let base = registration.variable_name().to_string();
            let mut candidate = base.clone();
            let mut n = 2;
            while !used.insert(candidate.clone()) {
                candidate = format!("{}_{}", base, n);
                n += 1;
            }
            if candidate != base {
                registration.set_variable_name(candidate);
            }
        }

        items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{MethodSymbol, ParameterSymbol, SymbolTable};
    use crate::model::{Accessibility, TypeDescriptor, TypeKind};
    use crate::testing::CompilationBuilder;

    fn attribute(args: Vec<TypedConstant>) -> AttributeData {
        let mut attribute = AttributeData::new("Swick.Features.RegisterAttribute");
        attribute.arguments = args;
        attribute
    }

    fn ty(name: &str) -> TypedConstant {
        TypedConstant::Type(name.to_string())
    }

    fn compilation() -> crate::host::Compilation {
        let mut with_params = MethodSymbol::new("CreateWithArgs", "Test.ITest");
        with_params.parameters.push(ParameterSymbol {
            name: "x".to_string(),
            ty: "int".to_string(),
        });

        CompilationBuilder::new()
            .interface("Test", "ITest")
            .class("Test", "TestImpl", Accessibility::Public)
            .class("Test", "Factory", Accessibility::Public)
            .method("Test.Factory", MethodSymbol::new("CreateTest", "Test.ITest"))
            .method("Test.Factory", MethodSymbol::new("CreateImpl", "Test.TestImpl"))
            .method("Test.Factory", with_params)
            .method("Test.Factory", MethodSymbol::new("Twice", "Test.ITest"))
            .method("Test.Factory", MethodSymbol::new("Twice", "Test.ITest"))
            .build()
    }

    #[test]
    fn test_type_registration_shapes() {
        let c = compilation();
        let table = SymbolTable::new(&c).unwrap();

        let pair = type_registration(&table, &attribute(vec![ty("Test.ITest"), ty("Test.TestImpl")])).unwrap();
        assert_eq!(pair.service_type.full_name(), "global::Test.ITest");
        assert_eq!(pair.implementation_type.full_name(), "global::Test.TestImpl");
        assert_eq!(pair.variable_name, "_TestImpl");

        let with_null = type_registration(&table, &attribute(vec![ty("Test.TestImpl"), TypedConstant::Null])).unwrap();
        assert_eq!(with_null.service_type, with_null.implementation_type);

        let single = type_registration(&table, &attribute(vec![ty("Test.TestImpl")])).unwrap();
        assert_eq!(single.service_type.kind(), TypeKind::Class);

        assert_eq!(
            type_registration(&table, &attribute(vec![TypedConstant::String("x".into())])).unwrap_err(),
            SkippedRegister::Shape(1)
        );
        assert_eq!(
            type_registration(&table, &attribute(vec![])).unwrap_err(),
            SkippedRegister::Shape(0)
        );
        let unresolved = type_registration(&table, &attribute(vec![ty("Test.ITest"), ty("Test.Nope")]))
            .unwrap_err();
        assert_eq!(unresolved, SkippedRegister::Unresolved("Test.Nope".to_string()));
        assert_eq!(unresolved.to_string(), "type 'Test.Nope' is not declared");
    }

    #[test]
    fn test_factory_registration_resolves_exact_return_type() {
        let c = compilation();
        let table = SymbolTable::new(&c).unwrap();
        let owner = table.resolve("Test.Factory").unwrap();

        let ok = factory_registration(
            &table,
            owner,
            &attribute(vec![ty("Test.ITest"), TypedConstant::String("CreateTest".into())]),
        )
        .unwrap();
        assert_eq!(ok.method.name, "CreateTest");
        assert_eq!(ok.variable_name, "_ITest");
    }

    #[test]
    fn test_factory_registration_rejections() {
        let c = compilation();
        let table = SymbolTable::new(&c).unwrap();
        let owner = table.resolve("Test.Factory").unwrap();

        for method in ["Missing", "CreateWithArgs", "CreateImpl", "Twice"] {
            let err = factory_registration(
                &table,
                owner,
                &attribute(vec![ty("Test.ITest"), TypedConstant::String(method.into())]),
            )
            .unwrap_err();
            assert_eq!(err.kind, ErrorKind::InvalidFactory, "{}", method);
            assert_eq!(
                err.message_args,
                vec!["global::Test.ITest".to_string(), method.to_string()]
            );
        }
    }

    #[test]
    fn test_registration_set_first_wins() {
        let iface = TypeDescriptor::new("global::Test.ITest", TypeKind::Interface);
        let first = TypeRegistration::new(iface.clone(), TypeDescriptor::new("global::Test.TestImpl", TypeKind::Class));
        let second = TypeRegistration::new(iface, TypeDescriptor::new("global::Test.TestImpl2", TypeKind::Class));

        let mut set = RegistrationSet::default();
        assert!(set.add(first.into(), &attribute(vec![])).is_ok());
        let err = set.add(second.into(), &attribute(vec![])).unwrap_err();

        assert_eq!(err.kind, ErrorKind::DuplicateService);
        assert_eq!(
            err.message_args,
            vec![
                "global::Test.ITest".to_string(),
                "global::Test.TestImpl2".to_string(),
                "global::Test.TestImpl".to_string(),
            ]
        );

        let items = set.finish();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].variable_name(), "_TestImpl");
    }

    #[test]
    fn test_registration_set_disambiguates_field_names() {
        let a = TypeRegistration::new(
            TypeDescriptor::new("global::A.IService", TypeKind::Interface),
            TypeDescriptor::new("global::A.Impl", TypeKind::Class),
        );
        let b = TypeRegistration::new(
            TypeDescriptor::new("global::B.IService", TypeKind::Interface),
            TypeDescriptor::new("global::B.Impl", TypeKind::Class),
        );
        let c = TypeRegistration::new(
            TypeDescriptor::new("global::C.IService", TypeKind::Interface),
            TypeDescriptor::new("global::C.Impl", TypeKind::Class),
        );

        let mut set = RegistrationSet::default();
        for reg in [a, b, c] {
            set.add(reg.into(), &attribute(vec![])).unwrap();
        }
        let names: Vec<_> = set.finish().iter().map(|r| r.variable_name().to_string()).collect();
        assert_eq!(names, vec!["_Impl", "_Impl_2", "_Impl_3"]);
    }
}
