use serde::{Deserialize, Serialize};

use super::registration::Registration;
use super::types::{MethodReference, TypeDescriptor, Visible};
use crate::diagnostics::{Error, ErrorKind};

/// Where the accessor lives and what it looks like
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerDetails {
    /// Empty for the global namespace
    pub namespace: String,
    /// Enclosing types, outermost first
    pub type_chain: Vec<Visible<TypeDescriptor>>,
    pub method: Visible<MethodReference>,
    /// Empty when the accessor does not have exactly one type parameter
    pub type_param_name: String,
}

impl ContainerDetails {
    /// `{namespace}.{Outer.Inner}.{accessor}`, namespace omitted when global
    pub fn hint_name(&self) -> String {
        let mut parts: Vec<&str> = Vec::with_capacity(self.type_chain.len() + 2);
        if !self.namespace.is_empty() {
            parts.push(&self.namespace);
        }
        parts.extend(self.type_chain.iter().map(|t| t.item.simple_name()));
        parts.push(&self.method.item.name);
        parts.join(".")
    }
}

/// Companion setter discovered through the options attribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetMethodInfo {
    pub name: String,
    /// `bool` return (reports a match) vs `void` (throws on no match)
    pub is_returnable: bool,
    pub generic_param: String,
}

/// Folded named arguments of every options attribute
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerOptions {
    pub is_thread_safe: bool,
    pub set_method: Option<Visible<SetMethodInfo>>,
}

/// How a delegate member is read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DelegateAccess {
    Method,
    Property,
    Field,
}

/// Secondary locator consulted when no registration matches
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delegation {
    pub member: String,
    pub access: DelegateAccess,
    /// Set when the member lives on another type and is read statically
    pub owner: Option<TypeDescriptor>,
    pub value_type: TypeDescriptor,
}

impl Delegation {
    /// The C# expression that yields the delegate value
    pub fn access_expression(&self) -> String {
        let mut expr = String::new();
        if let Some(owner) = &self.owner {
            expr.push_str(owner.full_name());
            expr.push('.');
        }
        expr.push_str(&self.member);
        if self.access == DelegateAccess::Method {
            expr.push_str("()");
        }
        expr
    }
}

/// Root aggregate: everything known about one annotated accessor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerRegistration {
    pub details: ContainerDetails,
    pub options: ContainerOptions,
    pub registrations: Vec<Registration>,
    pub delegations: Vec<Delegation>,
    pub errors: Vec<Error>,
}

impl ContainerRegistration {
    pub fn new(details: ContainerDetails) -> Self {
        Self {
            details,
            options: ContainerOptions::default(),
            registrations: Vec::new(),
            delegations: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// No collected error forces a stub
    pub fn is_valid(&self) -> bool {
        self.errors.iter().all(|e| !e.kind.blocks_emission())
    }

    /// The accessor itself is malformed, so not even a stub can be emitted
    pub fn has_invalid_accessor(&self) -> bool {
        self.errors
            .iter()
            .any(|e| e.kind == ErrorKind::InvalidGenericGetMethod)
    }

    pub fn hint_name(&self) -> String {
        self.details.hint_name()
    }
}
