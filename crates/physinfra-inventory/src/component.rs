//! Generic field extraction for vendor inventory objects.
//!
//! Evaluates a [`FieldDictionary`] against any type implementing
//! [`AttributeSource`], producing a JSON mapping keyed by the dictionary's
//! output keys.
//!
//! ## Path syntax
//!
//! - Top-level attribute: `"uuid"`
//! - Nested objects: `"attributes.slot"`
//! - Array indices: `"ipInterfaces[0].name"`
//!
//! The first path segment is resolved through [`AttributeSource::attribute`];
//! the remaining segments walk the returned JSON value. A path that does not
//! resolve is not an error: the output key is present with a `null` value.

use crate::dictionary::{FieldDictionary, FieldEntry, FieldMapping};
use serde_json::{Map, Value};
use tracing::{trace, warn};

/// Named-attribute access over a vendor object.
pub trait AttributeSource {
    /// Value of a top-level attribute, or `None` when the object lacks it.
    fn attribute(&self, name: &str) -> Option<Value>;
}

impl AttributeSource for Value {
    fn attribute(&self, name: &str) -> Option<Value> {
        self.get(name).cloned()
    }
}

impl AttributeSource for Map<String, Value> {
    fn attribute(&self, name: &str) -> Option<Value> {
        self.get(name).cloned()
    }
}

/// Configuration for the extraction process.
#[derive(Debug, Clone)]
pub struct ExtractionConfig {
    /// Maximum number of segments in a source path
    pub max_depth: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self { max_depth: 10 }
    }
}

/// Evaluates field dictionaries against vendor objects.
#[derive(Debug, Clone, Default)]
pub struct ComponentParser {
    config: ExtractionConfig,
}

impl ComponentParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ExtractionConfig) -> Self {
        Self { config }
    }

    /// Run every entry of `dictionary` against `source`.
    ///
    /// Every output key is present in the result. Unresolved paths map to
    /// `null`; nested tables always yield a mapping.
    pub fn parse<S>(&self, source: &S, dictionary: &FieldDictionary) -> Map<String, Value>
    where
        S: AttributeSource + ?Sized,
    {
        trace!("Extracting '{}' fields", dictionary.name);
        self.parse_entries(source, dictionary.entries)
    }

    fn parse_entries<S>(&self, source: &S, entries: &[FieldEntry]) -> Map<String, Value>
    where
        S: AttributeSource + ?Sized,
    {
        let mut result = Map::with_capacity(entries.len());
        for entry in entries {
            let value = match entry.mapping {
                FieldMapping::Path(path) => match self.extract(source, path) {
                    Ok(Some(value)) => value,
                    Ok(None) => {
                        trace!("Field '{}' not found at '{}'", entry.key, path);
                        Value::Null
                    }
                    Err(e) => {
                        warn!("Failed to extract field '{}' from '{}': {}", entry.key, path, e);
                        Value::Null
                    }
                },
                FieldMapping::Nested(nested) => Value::Object(self.parse_entries(source, nested)),
            };
            result.insert(entry.key.to_string(), value);
        }
        result
    }

    /// Resolve a dotted path against `source`.
    ///
    /// # Returns
    /// - `Ok(Some(value))` - Value found and not `null`
    /// - `Ok(None)` - Path not found (not an error)
    /// - `Err(e)` - Malformed path (too deep, bad array index)
    pub fn extract<S>(&self, source: &S, path: &str) -> Result<Option<Value>, String>
    where
        S: AttributeSource + ?Sized,
    {
        let trimmed = path.trim();
        if trimmed.is_empty() || trimmed.ends_with('.') {
            return Ok(None);
        }

        let (head, rest) = match trimmed.split_once('.') {
            Some((head, rest)) => (head, Some(rest)),
            None => (trimmed, None),
        };

        // Array notation on the first segment: "ports[0]"
        let (attribute, head_index) = match head.find('[') {
            Some(bracket) => (&head[..bracket], Some(&head[bracket..])),
            None => (head, None),
        };

        let Some(root) = source.attribute(attribute) else {
            return Ok(None);
        };

        let mut remaining = String::new();
        if let Some(index) = head_index {
            remaining.push_str(index);
        }
        if let Some(rest) = rest {
            if !remaining.is_empty() {
                remaining.push('.');
            }
            remaining.push_str(rest);
        }

        let found = if remaining.is_empty() {
            Some(root)
        } else {
            self.extract_by_path(&root, &remaining)?
        };
        Ok(found.filter(|v| !v.is_null()))
    }

    /// Walk a JSON value with a dotted path.
    ///
    /// Supports:
    /// - Nested objects: "health.summary"
    /// - Array indices: "assignments[0]" or a bare "[0]"
    /// - Combined: "interfaces[0].address"
    pub fn extract_by_path(&self, data: &Value, path: &str) -> Result<Option<Value>, String> {
        let parts: Vec<&str> = path
            .split('.')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect();
        if parts.is_empty() {
            return Ok(None);
        }
        if parts.len() > self.config.max_depth {
            return Err(format!(
                "Max depth {} exceeded: path has {} levels",
                self.config.max_depth,
                parts.len()
            ));
        }

        let mut current = data;
        for part in parts {
            let (key, indices) = match part.find('[') {
                Some(bracket) => (&part[..bracket], &part[bracket..]),
                None => (part, ""),
            };

            if !key.is_empty() {
                match current {
                    Value::Object(map) => match map.get(key) {
                        Some(v) => current = v,
                        None => return Ok(None),
                    },
                    _ => return Ok(None),
                }
            }

            for index_str in indices
                .split('[')
                .filter(|s| !s.is_empty())
                .map(|s| s.trim_end_matches(']'))
            {
                let index: usize = index_str
                    .parse()
                    .map_err(|_| format!("Invalid array index: {}", index_str))?;
                match current {
                    Value::Array(arr) => match arr.get(index) {
                        Some(v) => current = v,
                        None => return Ok(None),
                    },
                    _ => return Ok(None),
                }
            }
        }

        Ok(Some(current.clone()))
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }
}
