use serde::{Deserialize, Serialize};

/// Category of a named type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    #[default]
    Class,
    Interface,
    Struct,
    Other,
}

impl TypeKind {
    /// Keyword used when re-declaring a partial type of this kind
    pub fn partial_keyword(&self) -> &'static str {
        match self {
            Self::Struct => "struct",
            Self::Interface => "interface",
            Self::Class | Self::Other => "class",
        }
    }

    /// Interfaces are cast directly; everything else is boxed through `object`
    pub fn needs_boxing(&self) -> bool {
        !matches!(self, Self::Interface)
    }
}

/// Declared accessibility of a symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Accessibility {
    Private,
    /// `private protected`
    ProtectedAndInternal,
    Protected,
    Internal,
    /// `protected internal`
    ProtectedOrInternal,
    Public,
}

impl Accessibility {
    /// The keyword(s) reproduced verbatim in generated code
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Private => "private",
            Self::ProtectedAndInternal => "private protected",
            Self::Protected => "protected",
            Self::Internal => "internal",
            Self::ProtectedOrInternal => "protected internal",
            Self::Public => "public",
        }
    }

    pub(crate) fn private() -> Self {
        Self::Private
    }

    pub(crate) fn internal() -> Self {
        Self::Internal
    }
}

impl std::fmt::Display for Accessibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Canonical reference to a named type
///
/// Equality and hashing only consider the fully-qualified name.
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
pub struct TypeDescriptor {
    full_name: String,
    constructor_params: Vec<TypeDescriptor>,
    kind: TypeKind,
}

impl TypeDescriptor {
    pub fn new(full_name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            full_name: full_name.into(),
            constructor_params: Vec::new(),
            kind,
        }
    }

    pub fn with_constructor_params(mut self, params: Vec<TypeDescriptor>) -> Self {
        self.constructor_params = params;
        self
    }

    /// Fully-qualified display name, e.g. `global::Test.ITest`
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Everything after the last `.` or `:` of the full name
    pub fn simple_name(&self) -> &str {
        match self.full_name.rfind(['.', ':']) {
            Some(idx) => &self.full_name[idx + 1..],
            None => &self.full_name,
        }
    }

    pub fn constructor_params(&self) -> &[TypeDescriptor] {
        &self.constructor_params
    }

    pub fn kind(&self) -> TypeKind {
        self.kind
    }
}

impl PartialEq for TypeDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.full_name == other.full_name
    }
}

impl std::hash::Hash for TypeDescriptor {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.full_name.hash(state);
    }
}

impl std::fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.full_name)
    }
}

/// Name of a method referenced from generated code
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MethodReference {
    pub name: String,
}

impl MethodReference {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// An item paired with the accessibility it was declared with
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Visible<T> {
    pub item: T,
    pub visibility: Accessibility,
}

impl<T> Visible<T> {
    pub fn new(item: T, visibility: Accessibility) -> Self {
        Self { item, visibility }
    }
}
