//! PostgREST-backed document store

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::Value;
use std::sync::Arc;

use crate::auth::IdentityProvider;
use crate::config::ClientOptions;
use crate::error::{Error, Result};
use crate::fetch::{Fetch, FetchBuilder};
use crate::store::{DocumentQuery, DocumentStore, Record};

/// Document store over the PostgREST API
pub struct RestDocumentStore {
    /// The base URL for the backend
    url: String,

    /// The anonymous API key
    key: String,

    /// HTTP client
    client: Client,

    /// Source of the session bearer token
    identity: Option<Arc<dyn IdentityProvider>>,

    options: ClientOptions,
}

impl RestDocumentStore {
    /// Create a store authorized with the anonymous key
    pub fn new(url: &str, key: &str, client: Client, options: ClientOptions) -> Self {
        Self {
            url: url.trim_end_matches('/').to_string(),
            key: key.to_string(),
            client,
            identity: None,
            options,
        }
    }

    /// Authorize requests with the session token of `identity` when there is one
    pub fn with_identity(mut self, identity: Arc<dyn IdentityProvider>) -> Self {
        self.identity = Some(identity);
        self
    }

    fn get_url(&self, collection: &str) -> String {
        format!("{}/rest/v1/{}", self.url, collection)
    }

    fn authorize<'a>(&self, fetch: FetchBuilder<'a>) -> FetchBuilder<'a> {
        let token = self
            .identity
            .as_ref()
            .and_then(|identity| identity.access_token())
            .unwrap_or_else(|| self.key.clone());

        fetch
            .header("apikey", &self.key)
            .header("X-Client-Info", &self.options.client_info)
            .bearer_auth(&token)
    }
}

/// Object rows only; anything else is dropped on its own
fn into_records(rows: Vec<Value>) -> Vec<Record> {
    rows.into_iter()
        .filter_map(|row| match row {
            Value::Object(map) => Some(map),
            other => {
                debug!("Skipping non-object row: {}", other);
                None
            }
        })
        .collect()
}

#[async_trait]
impl DocumentStore for RestDocumentStore {
    async fn get_document(&self, collection: &str, id: &str) -> Result<Record> {
        let url = self.get_url(collection);
        let rows = self
            .authorize(Fetch::get(&self.client, &url))
            .query_param("select", "*")
            .query_param(&self.options.id_field, &format!("eq.{}", id))
            .query_param("limit", "1")
            .execute::<Vec<Value>>()
            .await?;

        into_records(rows)
            .into_iter()
            .next()
            .ok_or_else(|| Error::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            })
    }

    async fn query(&self, query: &DocumentQuery) -> Result<Vec<Record>> {
        let url = self.get_url(query.collection());
        let rows = self
            .authorize(Fetch::get(&self.client, &url))
            .query_param("select", "*")
            .query(query.to_params())
            .execute::<Vec<Value>>()
            .await?;

        debug!("{} rows from {}", rows.len(), query.collection());
        Ok(into_records(rows))
    }

    async fn set_document(&self, collection: &str, id: &str, record: &Record) -> Result<()> {
        let mut body = record.clone();
        body.insert(self.options.id_field.clone(), Value::String(id.to_string()));

        let url = self.get_url(collection);
        self.authorize(Fetch::post(&self.client, &url))
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .query_param("on_conflict", &self.options.id_field)
            .json(&body)?
            .execute_checked()
            .await?;

        Ok(())
    }
}
