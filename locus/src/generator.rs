//! Generation driver
//!
//! Walks every method of every type in declaration order, extracts the
//! annotated accessors and emits one source unit for each.

use crate::cache::GenerationCache;
use crate::config::GeneratorConfig;
use crate::diagnostics::Diagnostic;
use crate::emit::{self, attribute_source, attribute_symbols, ATTRIBUTES_HINT_NAME};
use crate::error::Result;
use crate::extract::{extract_container, KnownAttributes};
use crate::host::{Compilation, SymbolTable, TypeId, TypeOracle};
use crate::model::ContainerRegistration;

/// One generated file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedSource {
    /// `{namespace}.{Outer.Inner}.{accessor}`, without extension
    pub hint_name: String,
    pub text: String,
}

impl GeneratedSource {
    /// File name for this unit with the configured extension
    pub fn file_name(&self, config: &GeneratorConfig) -> String {
        format!("{}{}", self.hint_name, config.file_extension)
    }
}

/// Everything one run produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratorOutput {
    pub sources: Vec<GeneratedSource>,
    pub diagnostics: Vec<Diagnostic>,
}

impl GeneratorOutput {
    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

/// Runs extraction and emission over a compilation
#[derive(Debug, Clone)]
pub struct Generator {
    config: GeneratorConfig,
}

impl Generator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// The compilation as extraction sees it, with the attribute classes
    /// declared unless the program already declares them
    pub fn prepare(&self, compilation: &Compilation) -> Compilation {
        compilation.clone().with_types(attribute_symbols(&self.config))
    }

    /// Extract every annotated accessor without emitting anything
    pub fn containers(&self, compilation: &Compilation) -> Result<Vec<ContainerRegistration>> {
        let prepared = self.prepare(compilation);
        let table = SymbolTable::new(&prepared)?;
        let Some(known) = KnownAttributes::resolve(&table, &self.config) else {
            return Ok(Vec::new());
        };

        Ok(candidates(&table)
            .filter_map(|(owner, index)| {
                let method = &table.symbol(owner).methods[index];
                extract_container(&table, &known, owner, method)
            })
            .collect())
    }

    /// Generate every source unit and diagnostic for `compilation`
    pub fn run(&self, compilation: &Compilation) -> Result<GeneratorOutput> {
        let mut output = self.start();
        for container in self.containers(compilation)? {
            Self::collect(&mut output, &container, emit::build(&container));
        }
        self.finish(output)
    }

    /// Like [`Generator::run`], reusing text for accessors whose inputs did
    /// not change since the last run
    pub fn run_cached(&self, compilation: &Compilation, cache: &mut GenerationCache) -> Result<GeneratorOutput> {
        let prepared = self.prepare(compilation);
        let table = SymbolTable::new(&prepared)?;
        let mut output = self.start();
        let Some(known) = KnownAttributes::resolve(&table, &self.config) else {
            return self.finish(output);
        };

        for (owner, index) in candidates(&table) {
            let method = &table.symbol(owner).methods[index];
            if !known.is_candidate(&table, method) {
                continue;
            }

            let compute = || {
                extract_container(&table, &known, owner, method).map(|container| {
                    let text = emit::build(&container);
                    (container, text)
                })
            };
            match cache.key(&self.config, &table, owner, method) {
                Some(key) => {
                    if let Some((container, text)) = cache.get_or_insert_with(key, compute) {
                        Self::collect(&mut output, container, text.clone());
                    }
                }
                None => {
                    if let Some((container, text)) = compute() {
                        Self::collect(&mut output, &container, text);
                    }
                }
            }
        }

        cache.finish_run();
        self.finish(output)
    }

    fn start(&self) -> GeneratorOutput {
        let mut output = GeneratorOutput::default();
        if self.config.emit_attributes {
            output.sources.push(GeneratedSource {
                hint_name: ATTRIBUTES_HINT_NAME.to_string(),
                text: attribute_source(&self.config),
            });
        }
        output
    }

    fn collect(output: &mut GeneratorOutput, container: &ContainerRegistration, text: String) {
        output.sources.push(GeneratedSource {
            hint_name: container.hint_name(),
            text,
        });
        output
            .diagnostics
            .extend(container.errors.iter().map(|e| e.to_diagnostic()));
    }

    fn finish(&self, output: GeneratorOutput) -> Result<GeneratorOutput> {
        tracing::info!(
            sources = output.sources.len(),
            diagnostics = output.diagnostics.len(),
            "generation finished"
        );
        Ok(output)
    }
}

/// Every (type, method index) pair in declaration order
fn candidates<'t>(table: &'t SymbolTable<'_>) -> impl Iterator<Item = (TypeId, usize)> + 't {
    table
        .type_ids()
        .flat_map(move |id| (0..table.symbol(id).methods.len()).map(move |index| (id, index)))
}
