use std::fs;
use std::path::{Path, PathBuf};

use console::style;
use locus::{emit::attribute_source, Config, LocusError, Result};

/// Write the attribute definitions to `output`, or return them for stdout
pub fn attributes(root: &Path, output: Option<&Path>) -> Result<Option<String>> {
    let config = Config::init(root)?;
    let source = attribute_source(&config);

    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).map_err(|e| LocusError::write(parent, e))?;
            }
            fs::write(path, source).map_err(|e| LocusError::write(path, e))?;
            Ok(None)
        }
        None => Ok(Some(source)),
    }
}

/// Main entry point for the attributes command
pub fn run(root: PathBuf, output: Option<PathBuf>) {
    match attributes(&root, output.as_deref()) {
        Ok(Some(source)) => print!("{}", source),
        Ok(None) => {
            if let Some(path) = output {
                println!("{} Generated {}", style("✓").green(), path.display());
            }
        }
        Err(e) => super::fail(&e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attributes_to_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("locus.toml"),
            "[generator]\nconditional_symbol = \"MY_DI\"\n",
        )
        .unwrap();
        let target = dir.path().join("gen/Attributes.g.cs");

        assert_eq!(attributes(dir.path(), Some(&target)).unwrap(), None);
        let text = fs::read_to_string(&target).unwrap();
        assert!(text.contains("Conditional(\"MY_DI\")"));
    }

    #[test]
    fn test_attributes_to_stdout() {
        let dir = tempfile::tempdir().unwrap();
        let source = attributes(dir.path(), None).unwrap().unwrap();
        assert!(source.starts_with("// <auto-generated />"));
    }
}
