//! The host's symbol model
//!
//! The generator never parses source text. It sees the program through a
//! [`Compilation`] (types, members, evaluated attribute arguments) and asks
//! questions about it through the [`TypeOracle`] trait.

mod manifest;
mod oracle;
mod symbols;

pub use manifest::is_manifest;
pub use oracle::{is_boolean, Member, SymbolTable, TypeId, TypeOracle, TypeRef};
pub use symbols::{
    AttributeData, Compilation, MethodSymbol, NamedArgument, ParameterSymbol, TypeSymbol,
    TypedConstant, ValueMemberSymbol,
};
