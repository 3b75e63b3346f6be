// Submodules for separation of concerns
mod eval;
mod exec;
mod ops;
mod parse;
mod sort;
mod types;

// Public API re-exports
pub use eval::{is_greater, values_equal};
pub use exec::{Pipeline, order_by_priority, query};
pub use ops::{and, filter_in, format, limit, or, select, sort_by};
pub use parse::{StageSerde, parse_pipeline_json};
pub use sort::two_way_sort;
pub use types::{IS_STAR, Operation, OperatorKind, Order, Priority};

pub(crate) use exec::TRACE_FLAG;

pub(crate) const STAR_FLAG: &str = "star-operators";

/// Whether `or`/`and` may be relied on: compiled in and not switched off at
/// runtime through the `star-operators` feature flag.
#[must_use]
pub fn is_star() -> bool {
    IS_STAR && crate::utils::feature_flags::is_enabled(STAR_FLAG)
}
