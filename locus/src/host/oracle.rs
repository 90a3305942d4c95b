use std::collections::HashMap;

use super::symbols::{Compilation, MethodSymbol, TypeSymbol, ValueMemberSymbol};
use crate::error::{LocusError, Result};
use crate::model::TypeDescriptor;

/// Canonical identity of a declared type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(usize);

/// A member found by name on a type
#[derive(Debug, Clone, Copy)]
pub enum Member<'a> {
    Method(&'a MethodSymbol),
    Property(&'a ValueMemberSymbol),
    Field(&'a ValueMemberSymbol),
}

/// What a type name means in the context of one method signature
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    Void,
    /// Index into the method's own type parameter list
    TypeParameter(usize),
    Named(TypeId),
    /// Not declared in the compilation (framework types such as `bool`)
    External(String),
}

/// Read-only questions the generator asks the host type system
///
/// Answers are assumed correct; the generator never second-guesses them.
pub trait TypeOracle {
    /// Resolve a metadata (`Ns.Outer+Inner`), dotted or `global::` name
    fn resolve(&self, name: &str) -> Option<TypeId>;

    fn symbol(&self, id: TypeId) -> &TypeSymbol;

    fn containing_type(&self, id: TypeId) -> Option<TypeId>;

    /// `global::Ns.Outer.Inner`
    fn fully_qualified_name(&self, id: TypeId) -> String;

    /// Methods, properties and fields named `name`, in declaration order
    fn members(&self, id: TypeId, name: &str) -> Vec<Member<'_>> {
        let symbol = self.symbol(id);
        let methods = symbol
            .methods
            .iter()
            .filter(|m| m.name == name)
            .map(Member::Method);
        let properties = symbol
            .properties
            .iter()
            .filter(|p| p.name == name)
            .map(Member::Property);
        let fields = symbol
            .fields
            .iter()
            .filter(|f| f.name == name)
            .map(Member::Field);
        methods.chain(properties).chain(fields).collect()
    }

    /// Descriptor with the parameters of the constructor taking the fewest
    fn descriptor(&self, id: TypeId) -> TypeDescriptor {
        let symbol = self.symbol(id);
        let params = symbol
            .constructors
            .iter()
            .min_by_key(|c| c.len())
            .map(|ctor| ctor.iter().map(|p| self.descriptor_for_name(p)).collect())
            .unwrap_or_default();

        TypeDescriptor::new(self.fully_qualified_name(id), symbol.kind).with_constructor_params(params)
    }

    /// Descriptor for any name, falling back to an external type
    fn descriptor_for_name(&self, name: &str) -> TypeDescriptor {
        match self.resolve(name) {
            Some(id) => TypeDescriptor::new(self.fully_qualified_name(id), self.symbol(id).kind),
            None => TypeDescriptor::new(external_display_name(name), crate::model::TypeKind::Other),
        }
    }

    /// Interpret a type name appearing in `method`'s signature
    fn resolve_in(&self, method: &MethodSymbol, name: &str) -> TypeRef {
        if name == "void" {
            return TypeRef::Void;
        }
        if let Some(idx) = method.type_parameters.iter().position(|p| p == name) {
            return TypeRef::TypeParameter(idx);
        }
        match self.resolve(name) {
            Some(id) => TypeRef::Named(id),
            None => TypeRef::External(name.to_string()),
        }
    }
}

/// Names the host may use for `System.Boolean`
pub fn is_boolean(name: &str) -> bool {
    matches!(canonical_external(name).as_str(), "System.Boolean")
}

fn canonical_external(name: &str) -> String {
    let stripped = name.strip_prefix("global::").unwrap_or(name);
    match stripped {
        "bool" => "System.Boolean".to_string(),
        "int" => "System.Int32".to_string(),
        "string" => "System.String".to_string(),
        "object" => "System.Object".to_string(),
        other => other.to_string(),
    }
}

fn external_display_name(name: &str) -> String {
    let canonical = canonical_external(name);
    if canonical.contains('.') {
        format!("global::{}", canonical)
    } else {
        canonical
    }
}

/// [`TypeOracle`] backed by an in-memory [`Compilation`]
#[derive(Debug)]
pub struct SymbolTable<'a> {
    compilation: &'a Compilation,
    by_name: HashMap<String, TypeId>,
    containing: Vec<Option<TypeId>>,
}

impl<'a> SymbolTable<'a> {
    /// Index every type, failing when a containing type is not declared
    ///
    /// `typeof` arguments are resolved during extraction, and only for the
    /// generator's own attributes.
    pub fn new(compilation: &'a Compilation) -> Result<Self> {
        let mut by_name = HashMap::new();
        for (idx, ty) in compilation.types.iter().enumerate() {
            let metadata = ty.metadata_name();
            by_name.insert(dotted(&metadata), TypeId(idx));
            by_name.insert(metadata, TypeId(idx));
        }

        let mut containing = Vec::with_capacity(compilation.types.len());
        for ty in &compilation.types {
            match &ty.containing_type {
                Some(outer) => {
                    let id = lookup(&by_name, outer).ok_or_else(|| LocusError::unknown_type(outer))?;
                    containing.push(Some(id));
                }
                None => containing.push(None),
            }
        }

        Ok(Self {
            compilation,
            by_name,
            containing,
        })
    }

    pub fn compilation(&self) -> &'a Compilation {
        self.compilation
    }

    /// Every type id in declaration order
    pub fn type_ids(&self) -> impl Iterator<Item = TypeId> {
        (0..self.compilation.types.len()).map(TypeId)
    }
}

impl TypeOracle for SymbolTable<'_> {
    fn resolve(&self, name: &str) -> Option<TypeId> {
        lookup(&self.by_name, name)
    }

    fn symbol(&self, id: TypeId) -> &TypeSymbol {
        &self.compilation.types[id.0]
    }

    fn containing_type(&self, id: TypeId) -> Option<TypeId> {
        self.containing[id.0]
    }

    fn fully_qualified_name(&self, id: TypeId) -> String {
        let mut segments = vec![self.symbol(id).name.as_str()];
        let mut current = id;
        while let Some(outer) = self.containing_type(current) {
            segments.push(self.symbol(outer).name.as_str());
            current = outer;
        }

        let namespace = &self.symbol(current).namespace;
        segments.reverse();
        if namespace.is_empty() {
            format!("global::{}", segments.join("."))
        } else {
            format!("global::{}.{}", namespace, segments.join("."))
        }
    }
}

fn lookup(by_name: &HashMap<String, TypeId>, name: &str) -> Option<TypeId> {
    let stripped = name.strip_prefix("global::").unwrap_or(name);
    by_name.get(stripped).copied()
}

fn dotted(metadata_name: &str) -> String {
    metadata_name.replace('+', ".")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::symbols::{AttributeData, TypedConstant};
    use crate::model::TypeKind;

    fn compilation() -> Compilation {
        let mut factory = TypeSymbol::new("Factory", "Test", TypeKind::Class);
        factory.methods.push(MethodSymbol::new("Create", "Test.ITest"));
        factory.methods.push(MethodSymbol::new("Create", "void"));

        let mut other = TypeSymbol::new("Other", "Test", TypeKind::Class);
        other.containing_type = Some("Test.Factory".to_string());

        let mut impl_ty = TypeSymbol::new("TestImpl", "Test", TypeKind::Class);
        impl_ty.constructors = vec![vec!["Test.ITest".to_string(), "int".to_string()], vec![]];

        Compilation::new().with_types([
            TypeSymbol::new("ITest", "Test", TypeKind::Interface),
            impl_ty,
            factory,
            other,
        ])
    }

    #[test]
    fn test_resolves_every_spelling() {
        let c = compilation();
        let table = SymbolTable::new(&c).unwrap();

        let id = table.resolve("Test.Factory+Other").unwrap();
        assert_eq!(table.resolve("Test.Factory.Other"), Some(id));
        assert_eq!(table.resolve("global::Test.Factory.Other"), Some(id));
        assert_eq!(table.fully_qualified_name(id), "global::Test.Factory.Other");
        assert_eq!(table.resolve("Test.Missing"), None);
    }

    #[test]
    fn test_descriptor_uses_smallest_constructor() {
        let c = compilation();
        let table = SymbolTable::new(&c).unwrap();
        let id = table.resolve("Test.TestImpl").unwrap();
        let descriptor = table.descriptor(id);
        assert_eq!(descriptor.full_name(), "global::Test.TestImpl");
        assert!(descriptor.constructor_params().is_empty());
    }

    #[test]
    fn test_members_by_name() {
        let c = compilation();
        let table = SymbolTable::new(&c).unwrap();
        let id = table.resolve("Test.Factory").unwrap();
        assert_eq!(table.members(id, "Create").len(), 2);
        assert!(table.members(id, "Nothing").is_empty());
    }

    #[test]
    fn test_resolve_in_method_context() {
        let c = compilation();
        let table = SymbolTable::new(&c).unwrap();
        let mut get = MethodSymbol::new("Get", "T");
        get.type_parameters = vec!["T".to_string()];

        assert_eq!(table.resolve_in(&get, "T"), TypeRef::TypeParameter(0));
        assert_eq!(table.resolve_in(&get, "void"), TypeRef::Void);
        assert!(matches!(table.resolve_in(&get, "Test.ITest"), TypeRef::Named(_)));
        assert_eq!(
            table.resolve_in(&get, "bool"),
            TypeRef::External("bool".to_string())
        );
    }

    #[test]
    fn test_boolean_spellings() {
        assert!(is_boolean("bool"));
        assert!(is_boolean("System.Boolean"));
        assert!(is_boolean("global::System.Boolean"));
        assert!(!is_boolean("int"));
    }

    #[test]
    fn test_unknown_typeof_argument_is_indexed() {
        let mut factory = TypeSymbol::new("Factory", "Test", TypeKind::Class);
        let mut helper = MethodSymbol::new("Helper", "void");
        let mut attribute = AttributeData::new("System.Diagnostics.DebuggerTypeProxyAttribute");
        attribute.arguments.push(TypedConstant::Type("System.String".to_string()));
        helper.attributes.push(attribute);
        factory.methods.push(helper);
        let c = Compilation::new().with_types([factory]);

        let table = SymbolTable::new(&c).unwrap();
        assert_eq!(table.resolve("System.String"), None);
    }

    #[test]
    fn test_unknown_containing_type_is_rejected() {
        let mut inner = TypeSymbol::new("Inner", "Test", TypeKind::Class);
        inner.containing_type = Some("Test.Outer".to_string());
        let c = Compilation::new().with_types([inner]);
        let err = SymbolTable::new(&c).unwrap_err();
        assert!(matches!(err, LocusError::UnknownType { name } if name == "Test.Outer"));
    }
}
