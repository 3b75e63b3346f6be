use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::types::Rows;

/// Compile-time capability flag: the extended `or`/`and` operators exist.
pub const IS_STAR: bool = true;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorKind {
    Select,
    FilterIn,
    SortBy,
    Format,
    Limit,
    Or,
    And,
}

/// Execution tier. Every `Narrowing` operation runs before any `Shaping` one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Priority {
    Narrowing = 0,
    Shaping = 1,
}

impl OperatorKind {
    #[must_use]
    pub const fn priority(self) -> Priority {
        match self {
            Self::Or | Self::And | Self::FilterIn | Self::SortBy => Priority::Narrowing,
            Self::Select | Self::Format | Self::Limit => Priority::Shaping,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Select => "select",
            Self::FilterIn => "filterIn",
            Self::SortBy => "sortBy",
            Self::Format => "format",
            Self::Limit => "limit",
            Self::Or => "or",
            Self::And => "and",
        }
    }
}

impl fmt::Display for OperatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Asc,
    Desc,
}

impl FromStr for Order {
    type Err = std::convert::Infallible;

    /// Anything other than `"asc"` sorts descending.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(if s == "asc" { Self::Asc } else { Self::Desc })
    }
}

pub(crate) type ApplyFn = dyn Fn(Rows) -> Rows + Send + Sync;

/// Operation descriptor: a kind tag plus the transform over a working
/// collection. The kind only decides execution priority.
#[derive(Clone)]
pub struct Operation {
    kind: OperatorKind,
    apply: Arc<ApplyFn>,
}

impl Operation {
    pub(crate) fn new<F>(kind: OperatorKind, apply: F) -> Self
    where
        F: Fn(Rows) -> Rows + Send + Sync + 'static,
    {
        Self { kind, apply: Arc::new(apply) }
    }

    #[must_use]
    pub const fn kind(&self) -> OperatorKind {
        self.kind
    }

    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.kind.priority()
    }

    /// Run this descriptor over a working collection.
    #[must_use]
    pub fn apply(&self, rows: Rows) -> Rows {
        (self.apply)(rows)
    }
}

impl fmt::Debug for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Operation").field("kind", &self.kind).finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_classes() {
        for k in [OperatorKind::Or, OperatorKind::And, OperatorKind::FilterIn, OperatorKind::SortBy] {
            assert_eq!(k.priority(), Priority::Narrowing);
        }
        for k in [OperatorKind::Select, OperatorKind::Format, OperatorKind::Limit] {
            assert_eq!(k.priority(), Priority::Shaping);
        }
        assert!(Priority::Narrowing < Priority::Shaping);
    }

    #[test]
    fn order_parses_like_asc_or_else_desc() {
        assert_eq!("asc".parse::<Order>(), Ok(Order::Asc));
        assert_eq!("desc".parse::<Order>(), Ok(Order::Desc));
        assert_eq!("ASC".parse::<Order>(), Ok(Order::Desc));
    }
}
