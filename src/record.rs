//! Record copy helpers shared by the engine and the projection operator.

use crate::types::{Collection, Record, Row, Rows};
use std::sync::Arc;

/// Copy only the named fields that are present on `record`.
///
/// Missing fields are omitted, never null-filled. Output keys follow the
/// order of `fields`.
#[must_use]
pub fn copy_fields(record: &Record, fields: &[String]) -> Record {
    let mut out = Record::new();
    for f in fields {
        if let Some(v) = record.get(f) {
            out.insert(f.clone(), v.clone());
        }
    }
    out
}

/// Copy every own field of `record` into a fresh record.
#[must_use]
pub fn copy_record(record: &Record) -> Record {
    let mut out = Record::new();
    for (k, v) in record {
        out.insert(k.clone(), v.clone());
    }
    out
}

/// Build the working collection for a pipeline run. Each row is a new
/// record instance, so nothing reachable from `collection` is shared with it.
#[must_use]
pub fn copy_rows(collection: &[Record]) -> Rows {
    collection.iter().map(|r| Arc::new(copy_record(r))).collect()
}

/// Unwrap working rows back into owned records, cloning only rows that are
/// still shared.
#[must_use]
pub fn into_collection(rows: Rows) -> Collection {
    rows.into_iter().map(unwrap_row).collect()
}

fn unwrap_row(row: Row) -> Record {
    Arc::try_unwrap(row).unwrap_or_else(|shared| (*shared).clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;

    #[test]
    fn copy_fields_omits_missing() {
        let r = doc! {"a": 1, "b": "x"};
        let out = copy_fields(&r, &["b".to_string(), "zzz".to_string()]);
        assert_eq!(out, doc! {"b": "x"});
    }

    #[test]
    fn copy_fields_empty_list_gives_empty_record() {
        let r = doc! {"a": 1};
        assert!(copy_fields(&r, &[]).is_empty());
    }

    #[test]
    fn copy_rows_are_fresh_instances() {
        let c = vec![doc! {"a": 1}, doc! {"a": 2}];
        let rows = copy_rows(&c);
        assert_eq!(rows.len(), 2);
        assert_eq!(*rows[0], c[0]);
        assert!(!std::ptr::eq(Arc::as_ptr(&rows[0]), &c[0]));
    }

    #[test]
    fn into_collection_clones_shared_rows() {
        let row = Arc::new(doc! {"k": "v"});
        let keep = Arc::clone(&row);
        let out = into_collection(vec![row]);
        assert_eq!(out, vec![doc! {"k": "v"}]);
        assert_eq!(Arc::strong_count(&keep), 1);
    }
}
