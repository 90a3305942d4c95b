use console::style;
use locus::{Generator, Result};

use super::{fail, report};
use crate::project::Project;

/// Totals from one generation pass
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub manifests: usize,
    pub written: usize,
    pub removed: usize,
    pub diagnostics: usize,
}

/// Generate and write sources for every manifest in `project`
pub fn generate(project: &Project) -> Result<Summary> {
    let config = project.config()?;
    let generator = Generator::new(config.clone());

    let mut summary = Summary::default();
    let mut produced = Vec::new();
    for rendered in project.render(&generator)? {
        println!(
            "{} {}",
            style("->").green(),
            rendered.manifest.display()
        );
        report(&rendered.output);
        summary.manifests += 1;
        summary.diagnostics += rendered.output.diagnostics.len();
        produced.extend(project.write(&config, &rendered.output)?);
    }

    summary.written = produced.len();
    if summary.manifests > 0 {
        summary.removed = project.prune(&config, &produced)?.len();
    }
    Ok(summary)
}

/// Main entry point for the generate command
pub fn run(project: Project) {
    println!("{}", style("Scanning for compilation manifests...").cyan());

    match generate(&project) {
        Ok(summary) if summary.manifests == 0 => {
            println!("{}", style("No manifests found.").yellow());
        }
        Ok(summary) => {
            println!(
                "{} Generated {} source(s) in {}",
                style("✓").green(),
                summary.written,
                project.output.display()
            );
            if summary.removed > 0 {
                println!(
                    "{} Removed {} orphaned source(s)",
                    style("->").green(),
                    summary.removed
                );
            }
            if summary.diagnostics > 0 {
                eprintln!(
                    "{} {} diagnostic(s) reported",
                    style("Error:").red().bold(),
                    summary.diagnostics
                );
                std::process::exit(1);
            }
        }
        Err(e) => fail(&e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const MANIFEST: &str = r#"
[[types]]
name = "TestImpl"
namespace = "Test"
accessibility = "public"

[[types]]
name = "Factory"
namespace = "Test"
accessibility = "public"

[[types.methods]]
name = "Get"
type_parameters = ["T"]
return_type = "T"

[[types.methods.attributes]]
class = "Swick.Features.RegisterAttribute"
arguments = [{ type = "Test.TestImpl" }]
"#;

    #[test]
    fn test_generate_writes_sources_and_attributes() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("app.locus.toml"), MANIFEST).unwrap();
        fs::write(
            dir.path().join("locus.toml"),
            "[generator]\nattribute_namespace = \"Swick.Features\"\nemit_attributes = true\n",
        )
        .unwrap();
        let project = Project::new(dir.path(), dir.path().join("out"));

        let summary = generate(&project).unwrap();
        assert_eq!(
            summary,
            Summary {
                manifests: 1,
                written: 2,
                removed: 0,
                diagnostics: 0,
            }
        );

        let text = fs::read_to_string(dir.path().join("out/Test.Factory.Get.g.cs")).unwrap();
        assert!(text.contains("_TestImpl = new global::Test.TestImpl();"));
        assert!(dir
            .path()
            .join("out/LocusRegistrationAttributes.g.cs")
            .exists());
    }

    #[test]
    fn test_generate_removes_sources_of_deleted_accessors() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("app.locus.toml"), MANIFEST).unwrap();
        fs::write(
            dir.path().join("locus.toml"),
            "[generator]\nattribute_namespace = \"Swick.Features\"\nemit_attributes = false\n",
        )
        .unwrap();
        let project = Project::new(dir.path(), dir.path().join("out"));
        fs::create_dir_all(&project.output).unwrap();
        fs::write(project.output.join("Test.Factory.Removed.g.cs"), "// old").unwrap();

        let summary = generate(&project).unwrap();
        assert_eq!(summary.written, 1);
        assert_eq!(summary.removed, 1);
        assert!(!project.output.join("Test.Factory.Removed.g.cs").exists());
        assert!(project.output.join("Test.Factory.Get.g.cs").exists());
    }

    #[test]
    fn test_generate_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        let project = Project::new(dir.path(), dir.path().join("out"));
        assert_eq!(generate(&project).unwrap(), Summary::default());
    }
}
