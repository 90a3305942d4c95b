use std::path::PathBuf;

use console::style;
use locus::{Generator, LocusError, Result};

use super::{fail, report};
use crate::project::Project;

/// Paths whose content on disk differs from a fresh generation, followed
/// by generated files no accessor produces any more
pub fn check(project: &Project) -> Result<Vec<PathBuf>> {
    let config = project.config()?;
    let generator = Generator::new(config.clone());

    let mut stale = Vec::new();
    let mut produced = Vec::new();
    for rendered in project.render(&generator)? {
        report(&rendered.output);
        stale.extend(project.stale(&config, &rendered.output));
        produced.extend(
            rendered
                .output
                .sources
                .iter()
                .map(|s| project.target(&config, &s.hint_name)),
        );
    }
    stale.extend(project.orphans(&config, &produced));
    Ok(stale)
}

/// Main entry point for the check command
pub fn run(project: Project) {
    match check(&project) {
        Ok(stale) if stale.is_empty() => {
            println!("{} Generated sources are up to date", style("✓").green());
        }
        Ok(stale) => {
            for path in &stale {
                eprintln!("{} {}", style("stale").yellow(), path.display());
            }
            fail(&LocusError::Stale { count: stale.len() });
        }
        Err(e) => fail(&e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::generate::generate;
    use std::fs;

    const MANIFEST: &str = r#"{
  "types": [
    {
      "name": "Factory",
      "namespace": "Test",
      "accessibility": "public",
      "methods": [
        {
          "name": "Get",
          "type_parameters": ["T"],
          "return_type": "T",
          "attributes": [
            { "class": "Swick.Features.RegisterAttribute", "arguments": [{ "type": "Test.Factory" }] }
          ]
        }
      ]
    }
  ]
}"#;

    fn project() -> (tempfile::TempDir, Project) {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("app.locus.json"), MANIFEST).unwrap();
        fs::write(
            dir.path().join("locus.toml"),
            "[generator]\nattribute_namespace = \"Swick.Features\"\n",
        )
        .unwrap();
        let project = Project::new(dir.path(), dir.path().join("out"));
        (dir, project)
    }

    #[test]
    fn test_check_before_and_after_generate() {
        let (_dir, project) = project();
        assert!(!check(&project).unwrap().is_empty());

        generate(&project).unwrap();
        assert!(check(&project).unwrap().is_empty());
    }

    #[test]
    fn test_check_detects_edits() {
        let (dir, project) = project();
        generate(&project).unwrap();

        let target = dir.path().join("out/Test.Factory.Get.g.cs");
        fs::write(&target, "// hand edited\n").unwrap();
        assert_eq!(check(&project).unwrap(), vec![target]);
    }

    #[test]
    fn test_check_reports_orphaned_sources() {
        let (dir, project) = project();
        generate(&project).unwrap();

        let orphan = dir.path().join("out/Test.Factory.Removed.g.cs");
        fs::write(&orphan, "// old\n").unwrap();
        assert_eq!(check(&project).unwrap(), vec![orphan]);
    }
}
