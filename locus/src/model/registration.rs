use serde::{Deserialize, Serialize};

use super::types::{MethodReference, TypeDescriptor};

/// A service instantiated with `new Implementation()`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeRegistration {
    pub service_type: TypeDescriptor,
    pub implementation_type: TypeDescriptor,
    pub variable_name: String,
}

impl TypeRegistration {
    /// The backing field is named after the implementation type
    pub fn new(service_type: TypeDescriptor, implementation_type: TypeDescriptor) -> Self {
        let variable_name = field_name_for(&implementation_type);
        Self {
            service_type,
            implementation_type,
            variable_name,
        }
    }

    /// Self-registration: the contract is also the concrete type
    pub fn concrete(ty: TypeDescriptor) -> Self {
        Self::new(ty.clone(), ty)
    }
}

/// A service produced by a parameterless method on the containing type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactoryRegistration {
    pub service_type: TypeDescriptor,
    pub method: MethodReference,
    pub variable_name: String,
}

impl FactoryRegistration {
    /// The backing field is named after the service type
    pub fn new(service_type: TypeDescriptor, method: MethodReference) -> Self {
        let variable_name = field_name_for(&service_type);
        Self {
            service_type,
            method,
            variable_name,
        }
    }
}

/// One resolved entry of the dispatch chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Registration {
    Type(TypeRegistration),
    Factory(FactoryRegistration),
}

impl Registration {
    /// The contract used as dispatch key
    pub fn service_type(&self) -> &TypeDescriptor {
        match self {
            Self::Type(t) => &t.service_type,
            Self::Factory(f) => &f.service_type,
        }
    }

    /// Identifier of the backing field
    pub fn variable_name(&self) -> &str {
        match self {
            Self::Type(t) => &t.variable_name,
            Self::Factory(f) => &f.variable_name,
        }
    }

    pub(crate) fn set_variable_name(&mut self, name: String) {
        match self {
            Self::Type(t) => t.variable_name = name,
            Self::Factory(f) => f.variable_name = name,
        }
    }

    /// Human-readable provider, used in diagnostics
    pub fn provider_label(&self) -> String {
        match self {
            Self::Type(t) => t.implementation_type.full_name().to_string(),
            Self::Factory(f) => format!("{}()", f.method.name),
        }
    }
}

impl From<TypeRegistration> for Registration {
    fn from(value: TypeRegistration) -> Self {
        Self::Type(value)
    }
}

impl From<FactoryRegistration> for Registration {
    fn from(value: FactoryRegistration) -> Self {
        Self::Factory(value)
    }
}

/// `_` + simple name, with anything that is not an identifier character
/// (generic argument lists, nested separators) replaced by `_`
pub(crate) fn field_name_for(ty: &TypeDescriptor) -> String {
    let mut name = String::with_capacity(ty.simple_name().len() + 1);
    name.push('_');
    for c in ty.simple_name().chars() {
        if c.is_alphanumeric() || c == '_' {
            name.push(c);
        } else {
            name.push('_');
        }
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TypeKind;

    fn iface(name: &str) -> TypeDescriptor {
        TypeDescriptor::new(format!("global::Test.{}", name), TypeKind::Interface)
    }

    fn class(name: &str) -> TypeDescriptor {
        TypeDescriptor::new(format!("global::Test.{}", name), TypeKind::Class)
    }

    #[test]
    fn test_type_registration_named_after_implementation() {
        let reg = TypeRegistration::new(iface("ITest"), class("TestImpl"));
        assert_eq!(reg.variable_name, "_TestImpl");

        let reg = Registration::from(reg);
        assert_eq!(reg.service_type().full_name(), "global::Test.ITest");
        assert_eq!(reg.provider_label(), "global::Test.TestImpl");
    }

    #[test]
    fn test_factory_registration_named_after_service() {
        let reg = FactoryRegistration::new(iface("ITest2"), MethodReference::new("CreateTest2"));
        assert_eq!(reg.variable_name, "_ITest2");
        assert_eq!(Registration::from(reg).provider_label(), "CreateTest2()");
    }

    #[test]
    fn test_field_name_sanitizes_generic_arguments() {
        let ty = TypeDescriptor::new("global::Test.Cache<global::Test.Key>", TypeKind::Class);
        // simple name is taken after the last separator, inside the argument list
        assert_eq!(field_name_for(&ty), "_Key_");
    }
}
