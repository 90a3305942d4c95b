//! Turn one annotated accessor into a [`ContainerRegistration`]
//!
//! Attributes are visited in declaration order and classified by the
//! identity of their class, never by simple name. Problems are collected
//! as [`Error`](crate::diagnostics::Error) records on the aggregate; extraction
//! itself cannot fail.

mod delegate;
mod details;
mod options;
mod registration;

use crate::config::GeneratorConfig;
use crate::host::{AttributeData, MethodSymbol, TypeId, TypeOracle};
use crate::model::{ContainerOptions, ContainerRegistration};

use registration::RegistrationSet;

pub const REGISTER_ATTRIBUTE: &str = "RegisterAttribute";
pub const REGISTER_FACTORY_ATTRIBUTE: &str = "RegisterFactoryAttribute";
pub const CONTAINER_OPTIONS_ATTRIBUTE: &str = "ContainerOptionsAttribute";
pub const DELEGATE_ATTRIBUTE: &str = "DelegateAttribute";

/// What a recognized attribute asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKind {
    Register,
    RegisterFactory,
    ContainerOptions,
    Delegate,
}

/// Identities of the generator's own attribute classes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnownAttributes {
    register: TypeId,
    register_factory: TypeId,
    container_options: TypeId,
    delegate: TypeId,
}

impl KnownAttributes {
    /// Look the attribute classes up in the compilation
    ///
    /// Returns `None` when any of them is missing, in which case no method
    /// can be a candidate.
    pub fn resolve<O>(oracle: &O, config: &GeneratorConfig) -> Option<Self>
    where
        O: TypeOracle + ?Sized,
    {
        let id = |simple: &str| oracle.resolve(&config.attribute_class(simple));
        Some(Self {
            register: id(REGISTER_ATTRIBUTE)?,
            register_factory: id(REGISTER_FACTORY_ATTRIBUTE)?,
            container_options: id(CONTAINER_OPTIONS_ATTRIBUTE)?,
            delegate: id(DELEGATE_ATTRIBUTE)?,
        })
    }

    pub fn classify<O>(&self, oracle: &O, attribute: &AttributeData) -> Option<AttributeKind>
    where
        O: TypeOracle + ?Sized,
    {
        let id = oracle.resolve(&attribute.class)?;
        if id == self.register {
            Some(AttributeKind::Register)
        } else if id == self.register_factory {
            Some(AttributeKind::RegisterFactory)
        } else if id == self.container_options {
            Some(AttributeKind::ContainerOptions)
        } else if id == self.delegate {
            Some(AttributeKind::Delegate)
        } else {
            None
        }
    }

    /// A method is a candidate when it carries at least one known attribute
    pub fn is_candidate<O>(&self, oracle: &O, method: &MethodSymbol) -> bool
    where
        O: TypeOracle + ?Sized,
    {
        method
            .attributes
            .iter()
            .any(|a| self.classify(oracle, a).is_some())
    }
}

/// Build the aggregate for `method` declared on `owner`
///
/// Returns `None` for methods without any known attribute.
pub fn extract_container<O>(
    oracle: &O,
    known: &KnownAttributes,
    owner: TypeId,
    method: &MethodSymbol,
) -> Option<ContainerRegistration>
where
    O: TypeOracle + ?Sized,
{
    let attributes: Vec<_> = method
        .attributes
        .iter()
        .filter_map(|a| known.classify(oracle, a).map(|kind| (kind, a)))
        .collect();
    if attributes.is_empty() {
        return None;
    }

    let (details, mut errors) = details::build_details(oracle, owner, method);
    let mut registrations = RegistrationSet::default();
    let mut options = ContainerOptions::default();
    let mut delegations = Vec::new();

    for (kind, attribute) in attributes {
        match kind {
            AttributeKind::Register => match registration::type_registration(oracle, attribute) {
                Ok(reg) => {
                    if let Err(e) = registrations.add(reg.into(), attribute) {
                        errors.push(e);
                    }
                }
                Err(reason) => tracing::warn!(
                    method = %method.name,
                    %reason,
                    "skipping register attribute"
                ),
            },
            AttributeKind::RegisterFactory => {
                let added = registration::factory_registration(oracle, owner, attribute)
                    .and_then(|reg| registrations.add(reg.into(), attribute));
                if let Err(e) = added {
                    errors.push(e);
                }
            }
            AttributeKind::ContainerOptions => {
                options = options::fold_options(oracle, owner, options, attribute, &mut errors);
            }
            AttributeKind::Delegate => match delegate::delegation(oracle, owner, attribute) {
                Ok(delegation) => delegations.push(delegation),
                Err(e) => errors.push(e),
            },
        }
    }

    let mut container = ContainerRegistration::new(details);
    container.options = options;
    container.registrations = registrations.finish();
    container.delegations = delegations;
    container.errors = errors;

    tracing::debug!(
        accessor = %container.hint_name(),
        registrations = container.registrations.len(),
        errors = container.errors.len(),
        "extracted container"
    );
    Some(container)
}
