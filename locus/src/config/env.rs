use std::path::Path;

/// Load `.env` files from the project root
///
/// Precedence (earlier wins, because dotenvy never overwrites a variable
/// that is already set):
/// 1. Actual process environment
/// 2. `.env.local` (machine-specific, not committed)
/// 3. `.env` (shared defaults)
///
/// Returns the files that were actually loaded.
pub fn load_dotenv(project_root: &Path) -> Vec<std::path::PathBuf> {
    let mut loaded = Vec::new();

    for name in [".env.local", ".env"] {
        let path = project_root.join(name);
        if dotenvy::from_path(&path).is_ok() {
            tracing::debug!(path = %path.display(), "loaded env file");
            loaded.push(path);
        }
    }

    loaded
}

/// Get an environment variable with a default value
///
/// # Example
/// ```
/// use locus::config::env;
///
/// let thread_safe: bool = env("LOCUS_EXAMPLE_UNSET_FLAG", false);
/// assert!(!thread_safe);
/// ```
pub fn env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Get an optional environment variable
///
/// # Example
/// ```
/// use locus::config::env_optional;
///
/// let ns: Option<String> = env_optional("LOCUS_EXAMPLE_UNSET_NAMESPACE");
/// assert!(ns.is_none());
/// ```
pub fn env_optional<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}
