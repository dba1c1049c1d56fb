//! Document store access
//!
//! Profiles live in an external document database. [`DocumentStore`] is the
//! seam the pipeline talks to; [`RestDocumentStore`] implements it over the
//! PostgREST API.

mod filter;
mod query;
mod rest;

use async_trait::async_trait;

use crate::error::Result;

pub use filter::*;
pub use query::*;
pub use rest::*;

/// A raw key-value document, prior to validation
pub type Record = serde_json::Map<String, serde_json::Value>;

/// The external document database
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch one document by identity; `Error::NotFound` when absent
    async fn get_document(&self, collection: &str, id: &str) -> Result<Record>;

    /// All documents matching `query`, in backend order
    async fn query(&self, query: &DocumentQuery) -> Result<Vec<Record>>;

    /// Create or replace the document with identity `id`
    async fn set_document(&self, collection: &str, id: &str, record: &Record) -> Result<()>;
}
