//! Functional query pipelines over in-memory collections of flat records.
//!
//! Build operation descriptors with the factory functions in [`query`]
//! (`select`, `filter_in`, `sort_by`, `format`, `limit`, and the extended
//! `or`/`and`), then hand them to [`query::query`] or a [`query::Pipeline`].
//! The engine copies the input, runs filters and sorts before projection,
//! formatting and truncation, and returns a new collection.

pub mod errors;
pub mod query;
pub mod record;
pub mod types;
pub mod utils;

pub use errors::QueryError;
pub use query::{
    IS_STAR, Operation, OperatorKind, Order, Pipeline, and, filter_in, format, is_star, limit,
    or, query, select, sort_by,
};
pub use types::{Collection, Record};

// Re-exported for callers building records with `doc!`.
pub use bson;

/// Initializes process-wide configuration.
///
/// Applies feature flags from the environment, then sets up logging: from
/// `RECQUERY_LOG_*` variables when `RECQUERY_LOG_DIR` is set, otherwise from
/// `log4rs.yaml` in the working directory if present.
///
/// # Errors
/// Returns an error if the environment-driven logger cannot be configured.
pub fn init() -> Result<(), QueryError> {
    let applied = utils::feature_flags::init_from_env();
    if std::env::var_os("RECQUERY_LOG_DIR").is_some() {
        utils::logger::configure_from_env()?;
    } else {
        utils::logger::init();
    }
    if !applied.is_empty() {
        log::info!("feature flags from environment: {}", applied.join(","));
    }
    Ok(())
}
