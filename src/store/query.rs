//! Query descriptors for the document store

use serde_json::Value;

use crate::store::filter::FilterOperator;
use crate::store::Record;

/// One `field <op> value` condition
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub field: String,
    pub operator: FilterOperator,
    pub value: Value,
}

impl Filter {
    /// Whether `record` satisfies this condition; an absent field never does
    pub fn matches(&self, record: &Record) -> bool {
        record
            .get(&self.field)
            .map(|lhs| self.operator.evaluate(lhs, &self.value))
            .unwrap_or(false)
    }

    /// PostgREST query pair, e.g. `("age", "gt.25")`
    pub fn to_param(&self) -> (String, String) {
        let value = match &self.value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        (
            self.field.clone(),
            format!("{}.{}", self.operator.as_str(), value),
        )
    }
}

/// A selection over one collection; all filters must hold
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentQuery {
    collection: String,
    filters: Vec<Filter>,
}

impl DocumentQuery {
    /// Select every document in `collection`
    pub fn new(collection: &str) -> Self {
        Self {
            collection: collection.to_string(),
            filters: Vec::new(),
        }
    }

    /// Add a condition on `field`
    pub fn filter(mut self, field: &str, operator: FilterOperator, value: impl Into<Value>) -> Self {
        self.filters.push(Filter {
            field: field.to_string(),
            operator,
            value: value.into(),
        });
        self
    }

    // --- Filter convenience methods ---

    /// `field = value`
    pub fn eq(self, field: &str, value: impl Into<Value>) -> Self {
        self.filter(field, FilterOperator::Eq, value)
    }

    /// `field != value`
    pub fn neq(self, field: &str, value: impl Into<Value>) -> Self {
        self.filter(field, FilterOperator::Neq, value)
    }

    /// `field > value`
    pub fn gt(self, field: &str, value: impl Into<Value>) -> Self {
        self.filter(field, FilterOperator::Gt, value)
    }

    /// `field >= value`
    pub fn gte(self, field: &str, value: impl Into<Value>) -> Self {
        self.filter(field, FilterOperator::Gte, value)
    }

    /// `field < value`
    pub fn lt(self, field: &str, value: impl Into<Value>) -> Self {
        self.filter(field, FilterOperator::Lt, value)
    }

    /// `field <= value`
    pub fn lte(self, field: &str, value: impl Into<Value>) -> Self {
        self.filter(field, FilterOperator::Lte, value)
    }

    /// Collection the query runs over
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Conditions in the order they were added
    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    /// Evaluate the query against a record held in memory
    pub fn matches(&self, record: &Record) -> bool {
        self.filters.iter().all(|f| f.matches(record))
    }

    /// Query pairs in filter order
    pub fn to_params(&self) -> Vec<(String, String)> {
        self.filters.iter().map(Filter::to_param).collect()
    }
}
