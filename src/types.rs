use bson::Document;
use std::sync::Arc;

/// One item of a collection: a flat field-name-to-value mapping.
pub type Record = Document;

/// Ordered sequence of records, as handed to and returned from `query`.
pub type Collection = Vec<Record>;

/// Shared handle to a record inside a running pipeline.
///
/// Two rows are the same record instance when `Arc::ptr_eq` holds.
pub type Row = Arc<Record>;

/// Working collection threaded through operation descriptors.
pub type Rows = Vec<Row>;
