//! Manifest discovery and on-disk output shared by the commands

use std::fs;
use std::path::{Path, PathBuf};

use locus::{
    is_manifest, Compilation, Config, Generator, GeneratorConfig, GeneratorOutput, LocusError, Result,
};
use walkdir::WalkDir;

/// A manifest path or a directory of manifests, plus where output goes
#[derive(Debug, Clone)]
pub struct Project {
    pub input: PathBuf,
    pub output: PathBuf,
}

/// Generated sources for one manifest
#[derive(Debug)]
pub struct Rendered {
    pub manifest: PathBuf,
    pub output: GeneratorOutput,
}

impl Project {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
        }
    }

    /// Directory `locus.toml` and `.env` files are read from
    pub fn root(&self) -> &Path {
        if self.input.is_dir() {
            &self.input
        } else {
            self.input.parent().unwrap_or_else(|| Path::new("."))
        }
    }

    pub fn config(&self) -> Result<GeneratorConfig> {
        Config::init(self.root())
    }

    /// Whether `path` lies inside the output directory
    pub fn is_output(&self, path: &Path) -> bool {
        absolute(path).starts_with(absolute(&self.output))
    }

    /// Whether `path` is the input itself, however either is spelled
    pub fn is_input(&self, path: &Path) -> bool {
        absolute(path) == absolute(&self.input)
    }

    /// Every manifest under the input, sorted by path
    ///
    /// A file given explicitly is used even if its name does not follow the
    /// `*.locus.json` / `*.locus.toml` convention.
    pub fn manifests(&self) -> Vec<PathBuf> {
        if self.input.is_file() {
            return vec![self.input.clone()];
        }

        let mut found: Vec<PathBuf> = WalkDir::new(&self.input)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file() && is_manifest(e.path()))
            .filter(|e| !self.is_output(e.path()))
            .map(|e| e.into_path())
            .collect();
        found.sort();
        found
    }

    /// Run the generator over every manifest
    pub fn render(&self, generator: &Generator) -> Result<Vec<Rendered>> {
        self.manifests()
            .into_iter()
            .map(|manifest| {
                let compilation = Compilation::from_path(&manifest)?;
                let output = generator.run(&compilation)?;
                Ok(Rendered { manifest, output })
            })
            .collect()
    }

    /// Path a generated unit is written to
    pub fn target(&self, config: &GeneratorConfig, hint_name: &str) -> PathBuf {
        self.output.join(format!("{}{}", hint_name, config.file_extension))
    }

    /// Write every source, returning the paths written
    pub fn write(&self, config: &GeneratorConfig, output: &GeneratorOutput) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(&self.output).map_err(|e| LocusError::write(&self.output, e))?;

        let mut written = Vec::with_capacity(output.sources.len());
        for source in &output.sources {
            let path = self.target(config, &source.hint_name);
            fs::write(&path, &source.text).map_err(|e| LocusError::write(&path, e))?;
            tracing::debug!(path = %path.display(), "wrote source");
            written.push(path);
        }
        Ok(written)
    }

    /// Generated-looking files in the output directory that no source maps to
    ///
    /// Only direct children ending in the configured extension are
    /// considered; anything else in the directory is left alone.
    pub fn orphans(&self, config: &GeneratorConfig, produced: &[PathBuf]) -> Vec<PathBuf> {
        let Ok(entries) = fs::read_dir(&self.output) else {
            return Vec::new();
        };

        let mut orphans: Vec<PathBuf> = entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.is_file())
            .filter(|p| {
                p.file_name()
                    .and_then(|n| n.to_str())
                    .map(|n| n.ends_with(&config.file_extension))
                    .unwrap_or(false)
            })
            .filter(|p| !produced.contains(p))
            .collect();
        orphans.sort();
        orphans
    }

    /// Delete every orphan, returning the paths removed
    pub fn prune(&self, config: &GeneratorConfig, produced: &[PathBuf]) -> Result<Vec<PathBuf>> {
        let orphans = self.orphans(config, produced);
        for path in &orphans {
            fs::remove_file(path).map_err(|e| LocusError::write(path, e))?;
            tracing::debug!(path = %path.display(), "removed orphaned source");
        }
        Ok(orphans)
    }

    /// Sources whose file is missing or differs from the generated text
    pub fn stale(&self, config: &GeneratorConfig, output: &GeneratorOutput) -> Vec<PathBuf> {
        output
            .sources
            .iter()
            .filter_map(|source| {
                let path = self.target(config, &source.hint_name);
                match fs::read_to_string(&path) {
                    Ok(existing) if existing == source.text => None,
                    _ => Some(path),
                }
            })
            .collect()
    }
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = r#"{
  "types": [
    { "name": "ITest", "namespace": "Test", "kind": "interface", "accessibility": "public" },
    { "name": "TestImpl", "namespace": "Test", "accessibility": "public" },
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
            {
              "class": "Swick.Features.RegisterAttribute",
              "arguments": [{ "type": "Test.ITest" }, { "type": "Test.TestImpl" }]
            }
          ]
        }
      ]
    }
  ]
}"#;

    fn setup() -> (tempfile::TempDir, Project) {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested/app.locus.json"), MANIFEST).unwrap();
        fs::write(dir.path().join("readme.json"), "{}").unwrap();
        let project = Project::new(dir.path(), dir.path().join("generated"));
        (dir, project)
    }

    fn config() -> GeneratorConfig {
        GeneratorConfig::builder()
            .attribute_namespace("Swick.Features")
            .emit_attributes(false)
            .build()
    }

    #[test]
    fn test_discovers_only_manifests() {
        let (dir, project) = setup();
        assert_eq!(project.manifests(), vec![dir.path().join("nested/app.locus.json")]);

        let single = Project::new(dir.path().join("readme.json"), dir.path());
        assert_eq!(single.manifests().len(), 1);
        assert_eq!(single.root(), dir.path());
    }

    #[test]
    fn test_output_directory_is_skipped() {
        let (_dir, project) = setup();
        fs::create_dir_all(&project.output).unwrap();
        fs::write(project.output.join("copy.locus.json"), MANIFEST).unwrap();
        assert_eq!(project.manifests().len(), 1);

        let relative = Project::new(".", "generated");
        assert!(relative.is_output(Path::new("./generated/a.g.cs")));
        assert!(!relative.is_output(Path::new("./src/app.locus.json")));
    }

    #[test]
    fn test_write_then_check() {
        let (_dir, project) = setup();
        let generator = Generator::new(config());
        let rendered = project.render(&generator).unwrap();
        assert_eq!(rendered.len(), 1);

        let output = &rendered[0].output;
        assert_eq!(project.stale(&config(), output).len(), 1);

        let written = project.write(&config(), output).unwrap();
        assert_eq!(written, vec![project.output.join("Test.Factory.Get.g.cs")]);
        assert!(project.stale(&config(), output).is_empty());

        fs::write(&written[0], "// edited").unwrap();
        assert_eq!(project.stale(&config(), output), written);
    }

    #[test]
    fn test_prune_removes_only_orphaned_sources() {
        let (_dir, project) = setup();
        let rendered = project.render(&Generator::new(config())).unwrap();
        let written = project.write(&config(), &rendered[0].output).unwrap();

        let removed_accessor = project.output.join("Test.Factory.Old.g.cs");
        fs::write(&removed_accessor, "// gone").unwrap();
        fs::write(project.output.join("notes.txt"), "keep").unwrap();

        assert_eq!(project.orphans(&config(), &written), vec![removed_accessor.clone()]);
        assert_eq!(project.prune(&config(), &written).unwrap(), vec![removed_accessor.clone()]);
        assert!(!removed_accessor.exists());
        assert!(written[0].exists());
        assert!(project.output.join("notes.txt").exists());
        assert!(project.orphans(&config(), &written).is_empty());
    }

    #[test]
    fn test_render_reports_broken_manifest() {
        let (dir, project) = setup();
        fs::write(dir.path().join("broken.locus.json"), "{").unwrap();
        let err = project.render(&Generator::new(config())).unwrap_err();
        assert!(matches!(err, LocusError::Json { .. }));
    }
}
