//! Health-state classification.
//!
//! Vendor health strings are mapped case-insensitively onto [`HealthState`].
//! A switch that reports no health state at all is resolved through a
//! dedicated entry rather than a string key, so "not reported" and "reported
//! but unmapped" stay distinguishable.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Normalized health classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HealthState {
    Valid,
    Warning,
    Critical,
    /// The device explicitly reported an unknown health
    None,
    /// No health state was reported
    Unknown,
}

impl std::fmt::Display for HealthState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Valid => write!(f, "Valid"),
            Self::Warning => write!(f, "Warning"),
            Self::Critical => write!(f, "Critical"),
            Self::None => write!(f, "None"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Lookup table from vendor health strings to [`HealthState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthStateMap {
    entries: BTreeMap<String, HealthState>,
    when_unreported: Option<HealthState>,
}

impl HealthStateMap {
    /// Create an empty table.
    pub fn new(when_unreported: Option<HealthState>) -> Self {
        Self {
            entries: BTreeMap::new(),
            when_unreported,
        }
    }

    /// Add a mapping. Keys are stored lower-cased.
    pub fn with_entry(mut self, vendor_state: impl AsRef<str>, state: HealthState) -> Self {
        self.entries
            .insert(vendor_state.as_ref().to_lowercase(), state);
        self
    }

    /// Resolve a raw vendor health value.
    ///
    /// `None` resolves through the unreported entry. Strings are lower-cased
    /// before lookup; unmapped strings resolve to `None`.
    pub fn lookup(&self, raw: Option<&str>) -> Option<HealthState> {
        let Some(raw) = raw else {
            return self.when_unreported;
        };
        let state = self.entries.get(&raw.to_lowercase()).copied();
        if state.is_none() {
            debug!("Unmapped health state '{}'", raw);
        }
        state
    }

    /// State used when no health is reported.
    pub fn when_unreported(&self) -> Option<HealthState> {
        self.when_unreported
    }

    /// Mapped vendor strings in sorted order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, HealthState)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for HealthStateMap {
    fn default() -> Self {
        Self::new(Some(HealthState::Unknown))
            .with_entry("normal", HealthState::Valid)
            .with_entry("non-critical", HealthState::Valid)
            .with_entry("warning", HealthState::Warning)
            .with_entry("critical", HealthState::Critical)
            .with_entry("unknown", HealthState::None)
            .with_entry("minor-failure", HealthState::Critical)
            .with_entry("major-failure", HealthState::Critical)
            .with_entry("non-recoverable", HealthState::Critical)
            .with_entry("fatal", HealthState::Critical)
    }
}
