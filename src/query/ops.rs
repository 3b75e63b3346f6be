//! Operator factory. Each constructor returns an [`Operation`] descriptor;
//! nothing runs until the descriptor is applied by the pipeline engine.

use bson::Bson;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::Arc;

use super::eval::{is_greater, is_in_set};
use super::sort::two_way_sort;
use super::types::{Operation, OperatorKind, Order};
use crate::record::copy_fields;
use crate::types::{Record, Rows};

/// Keep only the named fields on every record. Fields absent from a record
/// are skipped; an empty field list yields empty records.
pub fn select<I, S>(fields: I) -> Operation
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let fields: Vec<String> = fields.into_iter().map(Into::into).collect();
    Operation::new(OperatorKind::Select, move |mut rows: Rows| {
        for row in &mut rows {
            *row = Arc::new(copy_fields(&**row, &fields));
        }
        rows
    })
}

/// Keep records whose `field` holds one of `values`. Records without the
/// field are dropped.
pub fn filter_in<I, V>(field: impl Into<String>, values: I) -> Operation
where
    I: IntoIterator<Item = V>,
    V: Into<Bson>,
{
    let field = field.into();
    let values: Vec<Bson> = values.into_iter().map(Into::into).collect();
    Operation::new(OperatorKind::FilterIn, move |rows: Rows| {
        rows.into_iter()
            .filter(|r| r.get(&field).is_some_and(|v| is_in_set(v, &values)))
            .collect()
    })
}

/// Sort by `field`. The comparator only asks "greater or not", so records
/// with equal keys may change relative order.
pub fn sort_by(field: impl Into<String>, order: Order) -> Operation {
    let field = field.into();
    Operation::new(OperatorKind::SortBy, move |mut rows: Rows| {
        two_way_sort(&mut rows, |a, b| {
            let sign = if is_greater(a.get(&field), b.get(&field)) {
                Ordering::Greater
            } else {
                Ordering::Less
            };
            match order {
                Order::Asc => sign,
                Order::Desc => sign.reverse(),
            }
        });
        rows
    })
}

/// Replace `field` with `formatter(value)` on every record. A missing field
/// is created from `formatter(Bson::Undefined)`.
pub fn format<F>(field: impl Into<String>, formatter: F) -> Operation
where
    F: Fn(Bson) -> Bson + Send + Sync + 'static,
{
    let field = field.into();
    Operation::new(OperatorKind::Format, move |mut rows: Rows| {
        for row in &mut rows {
            format_field(Arc::make_mut(row), &field, &formatter);
        }
        rows
    })
}

fn format_field<F>(record: &mut Record, field: &str, formatter: &F)
where
    F: Fn(Bson) -> Bson,
{
    if let Some(slot) = record.get_mut(field) {
        let old = std::mem::replace(slot, Bson::Undefined);
        *slot = formatter(old);
    } else {
        record.insert(field.to_string(), formatter(Bson::Undefined));
    }
}

/// Keep the first `count` records.
#[must_use]
pub fn limit(count: usize) -> Operation {
    Operation::new(OperatorKind::Limit, move |mut rows: Rows| {
        rows.truncate(count);
        rows
    })
}

/// Union of several filters, each run on the same input.
///
/// Results keep first-seen order: the first filter's matches, then records
/// from later filters that were not already taken. Duplicates are detected
/// by record instance, not by value.
pub fn or<I>(operations: I) -> Operation
where
    I: IntoIterator<Item = Operation>,
{
    let operations: Vec<Operation> = operations.into_iter().collect();
    Operation::new(OperatorKind::Or, move |rows: Rows| {
        // Every pointer in `seen` belongs to a row kept alive by `rows` or `out`.
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for op in &operations {
            for row in op.apply(rows.clone()) {
                if seen.insert(Arc::as_ptr(&row)) {
                    out.push(row);
                }
            }
        }
        out
    })
}

/// Intersection by sequential narrowing: each filter runs on the previous
/// filter's output.
pub fn and<I>(operations: I) -> Operation
where
    I: IntoIterator<Item = Operation>,
{
    let operations: Vec<Operation> = operations.into_iter().collect();
    Operation::new(OperatorKind::And, move |rows: Rows| {
        operations.iter().fold(rows, |acc, op| op.apply(acc))
    })
}
