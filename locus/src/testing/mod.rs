//! Fixtures for building compilations in tests
//!
//! Writing manifests by hand is noisy, so tests describe programs with a
//! fluent builder instead:
//!
//! ```rust
//! use locus::model::Accessibility;
//! use locus::testing::{Accessor, CompilationBuilder};
//!
//! let compilation = CompilationBuilder::new()
//!     .interface("Test", "ITest")
//!     .class("Test", "TestImpl", Accessibility::Public)
//!     .class("Test", "Factory", Accessibility::Public)
//!     .method(
//!         "Test.Factory",
//!         Accessor::new("Get").register("Test.ITest", Some("Test.TestImpl")).build(),
//!     )
//!     .build();
//!
//! assert_eq!(compilation.types.len(), 3);
//! ```

use crate::diagnostics::SourceLocation;
use crate::host::{
    AttributeData, Compilation, MethodSymbol, NamedArgument, ParameterSymbol, TypeSymbol,
    TypedConstant, ValueMemberSymbol,
};
use crate::model::{Accessibility, TypeKind};

/// File name stamped on fixture locations
pub const FIXTURE_FILE: &str = "Factory.cs";

/// Fluent builder for a [`Compilation`]
#[derive(Debug, Clone, Default)]
pub struct CompilationBuilder {
    types: Vec<TypeSymbol>,
}

impl CompilationBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A class with a parameterless constructor
    pub fn class(self, namespace: &str, name: &str, accessibility: Accessibility) -> Self {
        self.declare(namespace, name, TypeKind::Class, accessibility)
    }

    /// A struct with a parameterless constructor
    pub fn struct_type(self, namespace: &str, name: &str, accessibility: Accessibility) -> Self {
        self.declare(namespace, name, TypeKind::Struct, accessibility)
    }

    /// A public interface
    pub fn interface(mut self, namespace: &str, name: &str) -> Self {
        let mut ty = TypeSymbol::new(name, namespace, TypeKind::Interface);
        ty.accessibility = Accessibility::Public;
        self.types.push(ty);
        self
    }

    /// A class nested in `outer` (a metadata name such as `Test.Factory`)
    pub fn nested_class(mut self, outer: &str, name: &str, accessibility: Accessibility) -> Self {
        let namespace = self.type_mut(outer).namespace.clone();
        let mut ty = TypeSymbol::new(name, namespace, TypeKind::Class);
        ty.containing_type = Some(outer.to_string());
        ty.accessibility = accessibility;
        ty.constructors.push(Vec::new());
        self.types.push(ty);
        self
    }

    /// Replace the constructors of `owner` with a single one
    pub fn constructor(mut self, owner: &str, params: &[&str]) -> Self {
        self.type_mut(owner).constructors = vec![params.iter().map(|p| p.to_string()).collect()];
        self
    }

    pub fn method(mut self, owner: &str, method: MethodSymbol) -> Self {
        self.type_mut(owner).methods.push(method);
        self
    }

    pub fn property(mut self, owner: &str, name: &str, ty: &str, is_static: bool) -> Self {
        self.type_mut(owner).properties.push(ValueMemberSymbol {
            name: name.to_string(),
            ty: ty.to_string(),
            is_static,
        });
        self
    }

    pub fn field(mut self, owner: &str, name: &str, ty: &str, is_static: bool) -> Self {
        self.type_mut(owner).fields.push(ValueMemberSymbol {
            name: name.to_string(),
            ty: ty.to_string(),
            is_static,
        });
        self
    }

    pub fn build(self) -> Compilation {
        Compilation::new().with_types(self.types)
    }

    fn declare(mut self, namespace: &str, name: &str, kind: TypeKind, accessibility: Accessibility) -> Self {
        let mut ty = TypeSymbol::new(name, namespace, kind);
        ty.accessibility = accessibility;
        ty.constructors.push(Vec::new());
        self.types.push(ty);
        self
    }

    fn type_mut(&mut self, metadata_name: &str) -> &mut TypeSymbol {
        match self
            .types
            .iter_mut()
            .find(|t| t.metadata_name() == metadata_name)
        {
            Some(ty) => ty,
            None => panic!("fixture type {} has not been declared", metadata_name),
        }
    }
}

/// Fluent builder for an annotated accessor `T? Name<T>()`
///
/// Each attribute gets its own fixture line so diagnostics can be told
/// apart: the first attribute sits on line 10, the next on line 11 and so on.
#[derive(Debug, Clone)]
pub struct Accessor {
    method: MethodSymbol,
    attribute_namespace: String,
}

impl Accessor {
    pub fn new(name: &str) -> Self {
        let mut method = MethodSymbol::new(name, "T");
        method.type_parameters = vec!["T".to_string()];
        method.location = Some(SourceLocation::new(FIXTURE_FILE, 9, 5));
        Self {
            method,
            attribute_namespace: "Swick.Features".to_string(),
        }
    }

    /// Namespace used for the attribute classes applied after this call
    pub fn attribute_namespace(mut self, namespace: &str) -> Self {
        self.attribute_namespace = namespace.to_string();
        self
    }

    pub fn accessibility(mut self, accessibility: Accessibility) -> Self {
        self.method.accessibility = accessibility;
        self
    }

    /// Override the accessor's type parameters, return type and parameters
    pub fn shape(mut self, type_params: &[&str], return_type: &str, params: &[&str]) -> Self {
        self.method.type_parameters = type_params.iter().map(|s| s.to_string()).collect();
        self.method.return_type = return_type.to_string();
        self.method.parameters = params
            .iter()
            .enumerate()
            .map(|(i, ty)| ParameterSymbol {
                name: format!("arg{}", i),
                ty: ty.to_string(),
            })
            .collect();
        self
    }

    /// `[Register(typeof(contract), typeof(service))]`
    pub fn register(self, contract: &str, service: Option<&str>) -> Self {
        let mut args = vec![TypedConstant::Type(contract.to_string())];
        if let Some(service) = service {
            args.push(TypedConstant::Type(service.to_string()));
        }
        self.attribute("RegisterAttribute", args, Vec::new())
    }

    /// `[RegisterFactory(typeof(service), "method")]`
    pub fn register_factory(self, service: &str, method: &str) -> Self {
        self.attribute(
            "RegisterFactoryAttribute",
            vec![
                TypedConstant::Type(service.to_string()),
                TypedConstant::String(method.to_string()),
            ],
            Vec::new(),
        )
    }

    /// `[ContainerOptions(IsThreadSafe = value)]`
    pub fn thread_safe(self, value: bool) -> Self {
        self.options(vec![("IsThreadSafe", TypedConstant::Bool(value))])
    }

    /// `[ContainerOptions(SetMethod = "name")]`
    pub fn set_method(self, name: &str) -> Self {
        self.options(vec![("SetMethod", TypedConstant::String(name.to_string()))])
    }

    /// `[ContainerOptions(...)]` with arbitrary named arguments
    pub fn options(self, named: Vec<(&str, TypedConstant)>) -> Self {
        let named = named
            .into_iter()
            .map(|(name, value)| NamedArgument {
                name: name.to_string(),
                value,
            })
            .collect();
        self.attribute("ContainerOptionsAttribute", Vec::new(), named)
    }

    /// `[Delegate("member", typeof(owner))]`
    pub fn delegate(self, member: &str, owner: Option<&str>) -> Self {
        let mut args = vec![TypedConstant::String(member.to_string())];
        if let Some(owner) = owner {
            args.push(TypedConstant::Type(owner.to_string()));
        }
        self.attribute("DelegateAttribute", args, Vec::new())
    }

    /// An attribute the generator does not know
    pub fn foreign(mut self, class: &str) -> Self {
        self.method.attributes.push(AttributeData::new(class));
        self
    }

    pub fn build(self) -> MethodSymbol {
        self.method
    }

    fn attribute(mut self, simple_name: &str, arguments: Vec<TypedConstant>, named: Vec<NamedArgument>) -> Self {
        let class = if self.attribute_namespace.is_empty() {
            simple_name.to_string()
        } else {
            format!("{}.{}", self.attribute_namespace, simple_name)
        };
        let line = 10 + self.method.attributes.len() as u32;

        let mut attribute = AttributeData::new(class);
        attribute.arguments = arguments;
        attribute.named_arguments = named;
        attribute.location = Some(SourceLocation::new(FIXTURE_FILE, line, 6));
        self.method.attributes.push(attribute);
        self
    }
}

/// Location of the `index`-th attribute applied through [`Accessor`]
pub fn attribute_location(index: u32) -> SourceLocation {
    SourceLocation::new(FIXTURE_FILE, 10 + index, 6)
}

/// Setter fixture `void|bool Name<G>(G? feature)`
pub fn setter(name: &str, returns_bool: bool) -> MethodSymbol {
    let mut method = MethodSymbol::new(name, if returns_bool { "bool" } else { "void" });
    method.type_parameters = vec!["TFeature".to_string()];
    method.parameters = vec![ParameterSymbol {
        name: "feature".to_string(),
        ty: "TFeature".to_string(),
    }];
    method
}
