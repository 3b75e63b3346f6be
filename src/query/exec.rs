use crate::errors::QueryError;
use crate::record::{copy_rows, into_collection};
use crate::types::{Collection, Record};
use crate::utils::feature_flags;

use super::parse::parse_pipeline_json;
use super::types::{Operation, OperatorKind};

pub(crate) const TRACE_FLAG: &str = "pipeline-trace";

/// Run `operations` over a copy of `collection`.
///
/// Operations are reordered by priority class (filters and sorts before
/// projection, formatting and truncation); within a class the caller's order
/// is kept. `collection` itself is never modified.
pub fn query<I>(collection: &[Record], operations: I) -> Collection
where
    I: IntoIterator<Item = Operation>,
{
    let mut ops: Vec<Operation> = operations.into_iter().collect();
    order_by_priority(&mut ops);
    let trace = feature_flags::is_enabled(TRACE_FLAG);
    let rows = copy_rows(collection);
    let input_len = rows.len();
    let out = ops.iter().enumerate().fold(rows, |acc, (i, op)| {
        let before = acc.len();
        let next = op.apply(acc);
        if trace {
            crate::dev6!("stage={} kind={} in={} out={}", i, op.kind(), before, next.len());
        }
        next
    });
    log::debug!("query: {} stage(s), {} -> {} record(s)", ops.len(), input_len, out.len());
    into_collection(out)
}

/// Stable reorder by priority class.
pub fn order_by_priority(ops: &mut [Operation]) {
    ops.sort_by_key(Operation::priority);
}

/// Reusable, ordered list of operation descriptors.
#[derive(Clone, Debug, Default)]
pub struct Pipeline {
    ops: Vec<Operation>,
}

impl Pipeline {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_operations<I>(operations: I) -> Self
    where
        I: IntoIterator<Item = Operation>,
    {
        Self { ops: operations.into_iter().collect() }
    }

    /// # Errors
    /// Returns an error if the JSON is not a valid pipeline description, or
    /// asks for `$or`/`$and` while extended operators are disabled.
    pub fn from_json(json: &str) -> Result<Self, QueryError> {
        Ok(Self { ops: parse_pipeline_json(json)? })
    }

    #[must_use]
    pub fn with(mut self, op: Operation) -> Self {
        self.ops.push(op);
        self
    }

    pub fn push(&mut self, op: Operation) {
        self.ops.push(op);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Kinds in the order the caller supplied them.
    #[must_use]
    pub fn kinds(&self) -> Vec<OperatorKind> {
        self.ops.iter().map(Operation::kind).collect()
    }

    /// Kinds in the order they will execute.
    #[must_use]
    pub fn execution_order(&self) -> Vec<OperatorKind> {
        let mut ops = self.ops.clone();
        order_by_priority(&mut ops);
        ops.iter().map(Operation::kind).collect()
    }

    #[must_use]
    pub fn run(&self, collection: &[Record]) -> Collection {
        query(collection, self.ops.iter().cloned())
    }
}
