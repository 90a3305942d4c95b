pub mod cache;
pub mod config;
pub mod diagnostics;
pub mod emit;
pub mod error;
pub mod extract;
pub mod generator;
pub mod host;
pub mod model;
pub mod testing;

pub use cache::GenerationCache;
pub use config::{Config, GeneratorConfig};
pub use diagnostics::{Diagnostic, ErrorKind, SourceLocation};
pub use error::{LocusError, Result};
pub use generator::{GeneratedSource, Generator, GeneratorOutput};
pub use host::{is_manifest, Compilation, SymbolTable, TypeOracle};
pub use model::ContainerRegistration;
