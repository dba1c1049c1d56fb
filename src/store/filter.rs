//! Filter operators for document queries

use std::cmp::Ordering;
use std::fmt;

use serde_json::Value;

/// Operator for filter expressions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOperator {
    /// Equal to
    Eq,

    /// Not equal to
    Neq,

    /// Greater than
    Gt,

    /// Greater than or equal to
    Gte,

    /// Less than
    Lt,

    /// Less than or equal to
    Lte,
}

impl FilterOperator {
    /// Convert the operator to its string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOperator::Eq => "eq",
            FilterOperator::Neq => "neq",
            FilterOperator::Gt => "gt",
            FilterOperator::Gte => "gte",
            FilterOperator::Lt => "lt",
            FilterOperator::Lte => "lte",
        }
    }

    /// Whether `lhs <op> rhs` holds.
    ///
    /// Numbers compare numerically and strings lexically. Mixed or
    /// non-scalar operands only satisfy `Neq`.
    pub fn evaluate(&self, lhs: &Value, rhs: &Value) -> bool {
        let ordering = match (lhs, rhs) {
            (Value::Number(a), Value::Number(b)) => match (a.as_f64(), b.as_f64()) {
                (Some(a), Some(b)) => a.partial_cmp(&b),
                _ => None,
            },
            (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
            (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
            _ => None,
        };

        match (self, ordering) {
            (FilterOperator::Eq, Some(o)) => o == Ordering::Equal,
            (FilterOperator::Neq, Some(o)) => o != Ordering::Equal,
            (FilterOperator::Neq, None) => true,
            (FilterOperator::Gt, Some(o)) => o == Ordering::Greater,
            (FilterOperator::Gte, Some(o)) => o != Ordering::Less,
            (FilterOperator::Lt, Some(o)) => o == Ordering::Less,
            (FilterOperator::Lte, Some(o)) => o != Ordering::Greater,
            (_, None) => false,
        }
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
