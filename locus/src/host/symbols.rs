use serde::{Deserialize, Serialize};

use crate::diagnostics::SourceLocation;
use crate::model::{Accessibility, TypeKind};

/// The host's view of a program: every declared type and its members
///
/// Loaded from a JSON or TOML manifest (see [`Compilation::from_path`]) or
/// assembled in code through [`crate::testing::CompilationBuilder`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Compilation {
    #[serde(default)]
    pub types: Vec<TypeSymbol>,
}

impl Compilation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add types unless a type with the same metadata name already exists
    pub fn with_types(mut self, types: impl IntoIterator<Item = TypeSymbol>) -> Self {
        for ty in types {
            let name = ty.metadata_name();
            if !self.types.iter().any(|t| t.metadata_name() == name) {
                self.types.push(ty);
            }
        }
        self
    }
}

/// A declared named type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeSymbol {
    /// Simple name, e.g. `Factory`
    pub name: String,
    /// Dotted namespace, empty for the global namespace
    #[serde(default)]
    pub namespace: String,
    /// Metadata name of the enclosing type for nested types
    #[serde(default)]
    pub containing_type: Option<String>,
    #[serde(default)]
    pub kind: TypeKind,
    #[serde(default = "Accessibility::internal")]
    pub accessibility: Accessibility,
    /// Parameter type names of each accessible constructor
    #[serde(default)]
    pub constructors: Vec<Vec<String>>,
    #[serde(default)]
    pub methods: Vec<MethodSymbol>,
    #[serde(default)]
    pub properties: Vec<ValueMemberSymbol>,
    #[serde(default)]
    pub fields: Vec<ValueMemberSymbol>,
    #[serde(default)]
    pub location: Option<SourceLocation>,
}

impl TypeSymbol {
    pub fn new(name: impl Into<String>, namespace: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            containing_type: None,
            kind,
            accessibility: Accessibility::Internal,
            constructors: Vec::new(),
            methods: Vec::new(),
            properties: Vec::new(),
            fields: Vec::new(),
            location: None,
        }
    }

    /// `Namespace.Outer+Inner`
    pub fn metadata_name(&self) -> String {
        match &self.containing_type {
            Some(outer) => format!("{}+{}", outer, self.name),
            None if self.namespace.is_empty() => self.name.clone(),
            None => format!("{}.{}", self.namespace, self.name),
        }
    }
}

/// A declared method
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodSymbol {
    pub name: String,
    #[serde(default = "Accessibility::private")]
    pub accessibility: Accessibility,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub type_parameters: Vec<String>,
    #[serde(default)]
    pub parameters: Vec<ParameterSymbol>,
    /// A type name, one of `type_parameters`, or `void`
    #[serde(default = "void_type")]
    pub return_type: String,
    #[serde(default)]
    pub attributes: Vec<AttributeData>,
    #[serde(default)]
    pub location: Option<SourceLocation>,
}

fn void_type() -> String {
    "void".to_string()
}

impl MethodSymbol {
    pub fn new(name: impl Into<String>, return_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            accessibility: Accessibility::Private,
            is_static: false,
            type_parameters: Vec::new(),
            parameters: Vec::new(),
            return_type: return_type.into(),
            attributes: Vec::new(),
            location: None,
        }
    }

    pub fn returns_void(&self) -> bool {
        self.return_type == "void"
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSymbol {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
}

/// A property or field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueMemberSymbol {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default)]
    pub is_static: bool,
}

/// One attribute application, with arguments as the host evaluated them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeData {
    /// Metadata or fully-qualified name of the attribute class
    pub class: String,
    #[serde(default)]
    pub arguments: Vec<TypedConstant>,
    #[serde(default)]
    pub named_arguments: Vec<NamedArgument>,
    #[serde(default)]
    pub location: Option<SourceLocation>,
}

impl AttributeData {
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            arguments: Vec::new(),
            named_arguments: Vec::new(),
            location: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedArgument {
    pub name: String,
    pub value: TypedConstant,
}

/// A compile-time constant attribute argument
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypedConstant {
    /// `typeof(...)`
    Type(String),
    String(String),
    Bool(bool),
    Null,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_names() {
        let outer = TypeSymbol::new("Factory", "Test", TypeKind::Class);
        assert_eq!(outer.metadata_name(), "Test.Factory");

        let mut inner = TypeSymbol::new("Other", "Test", TypeKind::Class);
        inner.containing_type = Some("Test.Factory".to_string());
        assert_eq!(inner.metadata_name(), "Test.Factory+Other");

        let global = TypeSymbol::new("Root", "", TypeKind::Struct);
        assert_eq!(global.metadata_name(), "Root");
    }

    #[test]
    fn test_with_types_skips_existing() {
        let compilation = Compilation::new()
            .with_types([TypeSymbol::new("A", "N", TypeKind::Class)])
            .with_types([
                TypeSymbol::new("A", "N", TypeKind::Interface),
                TypeSymbol::new("B", "N", TypeKind::Class),
            ]);
        assert_eq!(compilation.types.len(), 2);
        assert_eq!(compilation.types[0].kind, TypeKind::Class);
    }

    #[test]
    fn test_deserialize_typed_constants() {
        let json = r#"{
            "class": "Swick.Features.RegisterAttribute",
            "arguments": [{ "type": "Test.ITest" }, "null"],
            "named_arguments": [{ "name": "IsThreadSafe", "value": { "bool": true } }]
        }"#;
        let attribute: AttributeData = serde_json::from_str(json).unwrap();
        assert_eq!(
            attribute.arguments,
            vec![TypedConstant::Type("Test.ITest".to_string()), TypedConstant::Null]
        );
        assert_eq!(attribute.named_arguments[0].value, TypedConstant::Bool(true));
    }

    #[test]
    fn test_method_defaults() {
        let method: MethodSymbol = serde_json::from_str(r#"{ "name": "Get" }"#).unwrap();
        assert!(method.returns_void());
        assert_eq!(method.accessibility, Accessibility::Private);
        assert!(method.type_parameters.is_empty());
    }
}
