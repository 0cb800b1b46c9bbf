//! Adapter-specific symbol overrides.
//!
//! Some upstream sources name an asset differently from its canonical symbol.
//! The override table maps `adapter -> symbol -> override`, loaded once at
//! startup and injected wherever symbols are resolved. Lookups are
//! case-insensitive on both keys.

use std::collections::HashMap;
use std::path::Path;

use serde_json::Value;

use crate::errors::{AdapterError, Result};

/// Immutable `adapter -> symbol -> override` mapping.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SymbolOverrides {
    tables: HashMap<String, HashMap<String, String>>,
}

impl SymbolOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse overrides from a JSON value.
    ///
    /// Expected format:
    /// ```json
    /// { "finage": { "XAUT": "XAU" } }
    /// ```
    ///
    /// Returns `None` when the value does not have that shape.
    pub fn parse(value: &Value) -> Option<Self> {
        let adapters = value.as_object()?;
        let mut overrides = Self::new();

        for (adapter, table) in adapters {
            for (symbol, replacement) in table.as_object()? {
                overrides.insert(adapter, symbol, replacement.as_str()?);
            }
        }

        Some(overrides)
    }

    /// Parse overrides from a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| AdapterError::config(format!("Invalid symbol overrides: {}", e)))?;
        Self::parse(&value).ok_or_else(|| {
            AdapterError::config("Symbol overrides must map adapter names to symbol tables")
        })
    }

    /// Load overrides from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            AdapterError::config(format!(
                "Failed to read symbol overrides {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json_str(&json)
    }

    pub fn insert(&mut self, adapter: &str, symbol: &str, replacement: &str) {
        self.tables
            .entry(adapter.to_lowercase())
            .or_default()
            .insert(symbol.to_lowercase(), replacement.to_string());
    }

    /// Look up the override for `symbol` in the `adapter` namespace.
    pub fn get(&self, adapter: &str, symbol: &str) -> Option<&str> {
        self.tables
            .get(&adapter.to_lowercase())?
            .get(&symbol.to_lowercase())
            .map(String::as_str)
    }

    /// Return the override for `symbol`, or `symbol` itself when none exists.
    pub fn resolve<'a>(&'a self, adapter: &str, symbol: &'a str) -> &'a str {
        self.get(adapter, symbol).unwrap_or(symbol)
    }

    /// Layer `other` on top of `self`; entries in `other` win.
    pub fn merged_with(&self, other: &SymbolOverrides) -> SymbolOverrides {
        let mut merged = self.clone();
        for (adapter, table) in &other.tables {
            let target = merged.tables.entry(adapter.clone()).or_default();
            for (symbol, replacement) in table {
                target.insert(symbol.clone(), replacement.clone());
            }
        }
        merged
    }

    pub fn is_empty(&self) -> bool {
        self.tables.values().all(HashMap::is_empty)
    }
}
