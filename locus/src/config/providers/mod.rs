mod generator;

pub use generator::{GeneratorConfig, GeneratorConfigBuilder};
