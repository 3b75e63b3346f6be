//! Utility modules: feature flags, logger, developer trace sink, JSON conversion.
pub mod devlog;
pub mod feature_flags;
pub mod json;
pub mod logger;
