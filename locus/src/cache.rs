//! Memoized emission for repeated runs
//!
//! `watch` regenerates on every manifest change. Most accessors do not
//! change between two saves, so their extracted aggregate and emitted text
//! are kept, keyed by a hash of everything that can influence them: the
//! config, the accessor, its containing types, every type its attributes
//! name, and the set of declared type names.

use serde::Serialize;
use std::collections::hash_map::{DefaultHasher, Entry};
use std::collections::{HashMap, HashSet};
use std::hash::{Hash, Hasher};

use crate::config::GeneratorConfig;
use crate::host::{MethodSymbol, SymbolTable, TypeId, TypeOracle, TypeSymbol, TypedConstant};
use crate::model::ContainerRegistration;

/// Cached result for one accessor; `None` when it was not a candidate
pub type CachedUnit = Option<(ContainerRegistration, String)>;

#[derive(Serialize)]
struct CacheInput<'a> {
    config: &'a GeneratorConfig,
    method: &'a MethodSymbol,
    containing: Vec<&'a TypeSymbol>,
    referenced: Vec<&'a TypeSymbol>,
    declared: Vec<String>,
}

/// Emission results from earlier runs
#[derive(Debug, Default)]
pub struct GenerationCache {
    entries: HashMap<u64, CachedUnit>,
    touched: HashSet<u64>,
    hits: usize,
    misses: usize,
}

impl GenerationCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hash of every input that can change the output for `method`
    ///
    /// Returns `None` if the input cannot be serialized; such accessors are
    /// simply not cached.
    pub fn key<'a>(
        &self,
        config: &'a GeneratorConfig,
        table: &'a SymbolTable<'_>,
        owner: TypeId,
        method: &'a MethodSymbol,
    ) -> Option<u64> {
        let mut containing = Vec::new();
        let mut current = Some(owner);
        while let Some(id) = current {
            containing.push(table.symbol(id));
            current = table.containing_type(id);
        }

        let referenced = method
            .attributes
            .iter()
            .flat_map(|a| a.arguments.iter().chain(a.named_arguments.iter().map(|n| &n.value)))
            .filter_map(|arg| match arg {
                TypedConstant::Type(name) => table.resolve(name).map(|id| table.symbol(id)),
                _ => None,
            })
            .collect();

        let input = CacheInput {
            config,
            method,
            containing,
            referenced,
            declared: table
                .compilation()
                .types
                .iter()
                .map(|t| t.metadata_name())
                .collect(),
        };

        let bytes = serde_json::to_vec(&input)
            .map_err(|e| tracing::debug!(error = %e, "accessor input is not cacheable"))
            .ok()?;
        let mut hasher = DefaultHasher::new();
        bytes.hash(&mut hasher);
        Some(hasher.finish())
    }

    /// Return the cached unit for `key`, computing it on a miss
    pub fn get_or_insert_with<F>(&mut self, key: u64, compute: F) -> Option<&(ContainerRegistration, String)>
    where
        F: FnOnce() -> CachedUnit,
    {
        self.touched.insert(key);
        match self.entries.entry(key) {
            Entry::Occupied(entry) => {
                self.hits += 1;
                entry.into_mut().as_ref()
            }
            Entry::Vacant(entry) => {
                self.misses += 1;
                entry.insert(compute()).as_ref()
            }
        }
    }

    /// Drop entries the last run did not ask for and log hit/miss counts
    pub fn finish_run(&mut self) {
        let before = self.entries.len();
        let touched = std::mem::take(&mut self.touched);
        self.entries.retain(|key, _| touched.contains(key));

        tracing::debug!(
            hits = self.hits,
            misses = self.misses,
            evicted = before - self.entries.len(),
            "generation cache"
        );
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn misses(&self) -> usize {
        self.misses
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::Compilation;
    use crate::model::Accessibility;
    use crate::testing::{Accessor, CompilationBuilder};

    fn compilation(implementation: &str) -> Compilation {
        CompilationBuilder::new()
            .interface("Test", "ITest")
            .class("Test", "TestImpl", Accessibility::Public)
            .class("Test", "TestImpl2", Accessibility::Public)
            .class("Test", "Factory", Accessibility::Public)
            .method(
                "Test.Factory",
                Accessor::new("Get")
                    .register("Test.ITest", Some(implementation))
                    .build(),
            )
            .build()
    }

    fn key_for(compilation: &Compilation, config: &GeneratorConfig) -> u64 {
        let table = SymbolTable::new(compilation).unwrap();
        let owner = table.resolve("Test.Factory").unwrap();
        let method = &table.symbol(owner).methods[0];
        GenerationCache::new().key(config, &table, owner, method).unwrap()
    }

    #[test]
    fn test_key_is_stable() {
        let config = GeneratorConfig::builder().build();
        let c = compilation("Test.TestImpl");
        assert_eq!(key_for(&c, &config), key_for(&c, &config));
    }

    #[test]
    fn test_key_tracks_inputs() {
        let config = GeneratorConfig::builder().build();
        let a = key_for(&compilation("Test.TestImpl"), &config);
        let b = key_for(&compilation("Test.TestImpl2"), &config);
        assert_ne!(a, b);

        let other = GeneratorConfig::builder().conditional_symbol("OTHER").build();
        assert_ne!(a, key_for(&compilation("Test.TestImpl"), &other));
    }

    #[test]
    fn test_hits_misses_and_eviction() {
        let mut cache = GenerationCache::new();
        let mut computed = 0;

        for _ in 0..2 {
            cache.get_or_insert_with(1, || {
                computed += 1;
                None
            });
        }
        cache.get_or_insert_with(2, || None);
        cache.finish_run();

        assert_eq!(computed, 1);
        assert_eq!(cache.hits(), 1);
        assert_eq!(cache.misses(), 2);
        assert_eq!(cache.len(), 2);

        cache.get_or_insert_with(2, || None);
        cache.finish_run();
        assert_eq!(cache.len(), 1);
    }
}
