//! Import collection.

use std::collections::BTreeSet;

use indexmap::IndexMap;

/// Tracks imports and deduplicates them.
///
/// Maintains insertion order of modules for deterministic output. What a
/// "symbol" is depends on the backend: an alias for Go imports, a binding
/// name for JavaScript `require`s.
///
/// # Example
///
/// ```
/// use thriftgen_codegen::generation::ImportCollector;
///
/// let mut imports = ImportCollector::new();
/// imports.add_module("context");
/// imports.add("github.com/apache/thrift/lib/go/thrift", "thrift");
///
/// let lines: Vec<String> = imports
///     .iter()
///     .map(|(module, aliases)| match aliases.first() {
///         Some(alias) => format!("{} {:?}", alias, module),
///         None => format!("{:?}", module),
///     })
///     .collect();
/// assert_eq!(lines[0], "\"context\"");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ImportCollector {
    /// Module path -> set of symbols (sorted for deterministic output)
    imports: IndexMap<String, BTreeSet<String>>,
}

impl ImportCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a symbol imported from a module.
    pub fn add(&mut self, module: &str, symbol: &str) {
        self.imports
            .entry(module.to_string())
            .or_default()
            .insert(symbol.to_string());
    }

    /// Add a module import without specific symbols.
    pub fn add_module(&mut self, module: &str) {
        self.imports.entry(module.to_string()).or_default();
    }

    /// Merge another collector into this one.
    pub fn merge(&mut self, other: &ImportCollector) {
        for (module, symbols) in &other.imports {
            let entry = self.imports.entry(module.clone()).or_default();
            entry.extend(symbols.iter().cloned());
        }
    }

    pub fn has_module(&self, module: &str) -> bool {
        self.imports.contains_key(module)
    }

    pub fn has_symbol(&self, module: &str, symbol: &str) -> bool {
        self.imports
            .get(module)
            .is_some_and(|symbols| symbols.contains(symbol))
    }

    /// Iterate over all imports in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.imports.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn is_empty(&self) -> bool {
        self.imports.is_empty()
    }

    pub fn len(&self) -> usize {
        self.imports.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_collector_basic() {
        let mut imports = ImportCollector::new();
        imports.add("./shared_types", "shared");
        imports.add("./shared_types", "shared");
        imports.add_module("fmt");

        assert!(imports.has_module("fmt"));
        assert!(imports.has_symbol("./shared_types", "shared"));
        assert!(!imports.has_symbol("fmt", "shared"));
        assert_eq!(imports.len(), 2);
    }

    #[test]
    fn test_insertion_order_kept() {
        let mut imports = ImportCollector::new();
        imports.add_module("fmt");
        imports.add_module("context");
        imports.add_module("fmt");

        let modules: Vec<&str> = imports.iter().map(|(m, _)| m).collect();
        assert_eq!(modules, vec!["fmt", "context"]);
    }

    #[test]
    fn test_import_collector_merge() {
        let mut a = ImportCollector::new();
        a.add("errors", "errors");

        let mut b = ImportCollector::new();
        b.add("errors", "errs");
        b.add_module("context");

        a.merge(&b);

        assert!(a.has_symbol("errors", "errors"));
        assert!(a.has_symbol("errors", "errs"));
        assert!(a.has_module("context"));
    }
}
