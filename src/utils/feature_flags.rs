//! Runtime feature flags registry.
//!
//! Provides a simple global registry of feature switches that can be toggled at runtime.
//! These are independent of Cargo compile-time features.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::LazyLock;

use crate::query::{IS_STAR, STAR_FLAG, TRACE_FLAG};

#[derive(Clone, Debug)]
pub struct FeatureFlag {
    pub name: String,
    pub enabled: bool,
    pub description: String,
}

static FLAGS: LazyLock<RwLock<HashMap<String, FeatureFlag>>> = LazyLock::new(|| {
    let mut map = HashMap::new();
    // Register default flags here.
    map.insert(
        STAR_FLAG.to_string(),
        FeatureFlag {
            name: STAR_FLAG.to_string(),
            enabled: IS_STAR,
            description: "Extended union/intersection operators (or, and).".to_string(),
        },
    );
    map.insert(
        TRACE_FLAG.to_string(),
        FeatureFlag {
            name: TRACE_FLAG.to_string(),
            enabled: true,
            description: "Per-stage developer trace lines from the pipeline engine.".to_string(),
        },
    );
    RwLock::new(map)
});

/// Enable or disable a feature flag. Returns true if the flag existed.
pub fn set(name: &str, enabled: bool) -> bool {
    let mut g = FLAGS.write();
    if let Some(f) = g.get_mut(name) {
        f.enabled = enabled;
        true
    } else {
        false
    }
}

/// Ensure a feature exists (register if missing) with provided default and description.
pub fn ensure(name: &str, default_enabled: bool, description: &str) {
    let mut g = FLAGS.write();
    g.entry(name.to_string()).or_insert_with(|| FeatureFlag {
        name: name.to_string(),
        enabled: default_enabled,
        description: description.to_string(),
    });
}

/// Returns whether a feature is enabled (false if unknown).
pub fn is_enabled(name: &str) -> bool {
    FLAGS.read().get(name).is_some_and(|f| f.enabled)
}

/// Get a feature by name.
pub fn get(name: &str) -> Option<FeatureFlag> {
    FLAGS.read().get(name).cloned()
}

/// List all known feature flags.
pub fn list() -> Vec<FeatureFlag> {
    FLAGS.read().values().cloned().collect()
}

/// Initialize runtime feature flags from environment variables:
/// - RECQUERY_DISABLE_FEATURES: comma-separated flags to switch off
/// - RECQUERY_ENABLE_FEATURES: comma-separated flags to switch on
///
/// Unknown names are ignored. Returns the names that were applied.
pub fn init_from_env() -> Vec<String> {
    let mut applied = Vec::new();
    for (var, enabled) in [("RECQUERY_DISABLE_FEATURES", false), ("RECQUERY_ENABLE_FEATURES", true)] {
        if let Ok(list) = std::env::var(var) {
            applied.extend(apply_list(&list, enabled));
        }
    }
    applied
}

fn apply_list(list: &str, enabled: bool) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .filter(|name| set(name, enabled))
        .map(str::to_string)
        .collect()
}
