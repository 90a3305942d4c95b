//! Typed intermediate representation
//!
//! Extraction is the only producer of these values and emission the only
//! consumer. Nothing here is mutated once a [`ContainerRegistration`] has
//! been handed to the emitter.

mod container;
mod registration;
mod types;

pub use container::{
    ContainerDetails, ContainerOptions, ContainerRegistration, DelegateAccess, Delegation,
    SetMethodInfo,
};
pub use registration::{FactoryRegistration, Registration, TypeRegistration};
pub use types::{Accessibility, MethodReference, TypeDescriptor, TypeKind, Visible};
