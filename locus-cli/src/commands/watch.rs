use std::collections::HashMap;
use std::path::{Path, PathBuf};

use console::style;
use locus::{config::CONFIG_FILE, is_manifest, Compilation, GenerationCache, Generator, Result};

use super::{fail, report};
use crate::project::Project;

/// Regenerates manifests, keeping one cache per manifest between passes
#[derive(Debug, Default)]
pub struct Session {
    caches: HashMap<PathBuf, GenerationCache>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// One full pass; returns the number of sources written
    pub fn regenerate(&mut self, project: &Project) -> Result<usize> {
        let config = project.config()?;
        let generator = Generator::new(config.clone());
        let manifests = project.manifests();
        self.caches.retain(|path, _| manifests.contains(path));

        let mut produced = Vec::new();
        for manifest in &manifests {
            let compilation = Compilation::from_path(manifest)?;
            let cache = self.caches.entry(manifest.clone()).or_default();
            let output = generator.run_cached(&compilation, cache)?;
            report(&output);
            produced.extend(project.write(&config, &output)?);
        }
        if !manifests.is_empty() {
            project.prune(&config, &produced)?;
        }
        Ok(produced.len())
    }

    pub fn cache(&self, manifest: &Path) -> Option<&GenerationCache> {
        self.caches.get(manifest)
    }
}

/// Whether a changed path should trigger regeneration
pub fn is_relevant(project: &Project, path: &Path) -> bool {
    if project.is_output(path) {
        return false;
    }
    let is_config = path.file_name().map(|n| n == CONFIG_FILE).unwrap_or(false);
    is_config || is_manifest(path) || project.is_input(path)
}

/// Main entry point for the watch command
pub fn run(project: Project) {
    let mut session = Session::new();
    match session.regenerate(&project) {
        Ok(count) => println!("{} Generated {} source(s)", style("✓").green(), count),
        Err(e) => fail(&e),
    }

    println!("{}", style("Watching for changes...").dim());
    if let Err(e) = start_watcher(&project, &mut session) {
        eprintln!(
            "{} Failed to start watcher: {}",
            style("Error:").red().bold(),
            e
        );
        std::process::exit(1);
    }
}

fn start_watcher(project: &Project, session: &mut Session) -> std::result::Result<(), String> {
    use notify::{Config, RecommendedWatcher, RecursiveMode, Watcher};
    use std::sync::mpsc::channel;
    use std::time::Duration;

    let (tx, rx) = channel();
    let root = project.root().to_path_buf();

    let mut watcher = RecommendedWatcher::new(
        move |res| {
            if let Ok(event) = res {
                let _ = tx.send(event);
            }
        },
        Config::default().with_poll_interval(Duration::from_secs(1)),
    )
    .map_err(|e| format!("Failed to create watcher: {}", e))?;

    watcher
        .watch(&root, RecursiveMode::Recursive)
        .map_err(|e| format!("Failed to watch directory: {}", e))?;

    println!(
        "{} Watching {} for changes",
        style("->").cyan(),
        root.display()
    );

    loop {
        let event: notify::Event = rx.recv().map_err(|e| format!("Watch error: {}", e))?;
        if !event.paths.iter().any(|p| is_relevant(project, p)) {
            continue;
        }

        println!("{}", style("Detected changes, regenerating...").dim());
        match session.regenerate(project) {
            Ok(count) => println!("{} Regenerated {} source(s)", style("✓").green(), count),
            Err(e) => eprintln!("{} Failed to regenerate: {}", style("Error:").red(), e),
        }
    }
}
