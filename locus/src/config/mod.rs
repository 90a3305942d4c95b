//! Configuration for generation runs
//!
//! Settings come from three layers, later layers overriding earlier ones:
//! - Built-in defaults
//! - `LOCUS_*` environment variables (after `.env.local` and `.env` are loaded)
//! - An optional `locus.toml` in the project root
//!
//! # Example
//!
//! ```rust,no_run
//! use locus::Config;
//!
//! let config = Config::init(std::path::Path::new(".")).unwrap();
//! println!("Attributes live in {}", config.attribute_namespace);
//! ```

pub mod env;
pub mod providers;

pub use env::{env, env_optional, load_dotenv};
pub use providers::{GeneratorConfig, GeneratorConfigBuilder};

use std::path::Path;

use crate::error::Result;

/// Name of the optional per-project config file
pub const CONFIG_FILE: &str = "locus.toml";

/// Main Config facade
pub struct Config;

impl Config {
    /// Load env files and `locus.toml` from `project_root`
    ///
    /// A missing `locus.toml` is not an error; a malformed one is.
    pub fn init(project_root: &Path) -> Result<GeneratorConfig> {
        env::load_dotenv(project_root);

        let config = GeneratorConfig::from_env();
        let file = project_root.join(CONFIG_FILE);
        if file.exists() {
            tracing::debug!(path = %file.display(), "merging config file");
            config.merge_file(&file)
        } else {
            Ok(config)
        }
    }
}
