// Shared fakes for the integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use swipedeck::auth::{IdentityProvider, Session};
use swipedeck::config::ClientOptions;
use swipedeck::context::SessionContext;
use swipedeck::error::{Error, Result};
use swipedeck::store::{DocumentQuery, DocumentStore, Record};

pub fn record(value: Value) -> Record {
    match value {
        Value::Object(map) => map,
        _ => panic!("test record must be an object"),
    }
}

/// A complete profile document
pub fn profile(uid: &str, age: u32, min: u32, max: u32) -> Record {
    record(json!({
        "uid": uid,
        "fullName": format!("User {}", uid),
        "age": age,
        "profession": "Tester",
        "minSeekingAge": min,
        "maxSeekingAge": max,
        "imageUrl1": format!("https://img.example.com/{}.jpg", uid)
    }))
}

/// Identity provider with a fixed set of accounts
#[derive(Default)]
pub struct FakeIdentity {
    session: Mutex<Option<String>>,
    accounts: Mutex<Vec<(String, String, String)>>,
    pub auth_calls: AtomicUsize,
}

impl FakeIdentity {
    pub fn signed_out() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn signed_in(uid: &str) -> Arc<Self> {
        let identity = Self::default();
        *identity.session.lock().unwrap() = Some(uid.to_string());
        Arc::new(identity)
    }

    pub fn with_account(self: Arc<Self>, email: &str, password: &str, uid: &str) -> Arc<Self> {
        self.accounts.lock().unwrap().push((
            email.to_string(),
            password.to_string(),
            uid.to_string(),
        ));
        self
    }

    pub fn clear_session(&self) {
        *self.session.lock().unwrap() = None;
    }
}

#[async_trait]
impl IdentityProvider for FakeIdentity {
    fn current_session_user_id(&self) -> Option<String> {
        self.session.lock().unwrap().clone()
    }

    async fn authenticate(&self, email: &str, password: &str) -> Result<Session> {
        self.auth_calls.fetch_add(1, Ordering::SeqCst);
        let uid = self
            .accounts
            .lock()
            .unwrap()
            .iter()
            .find(|(e, p, _)| e == email && p == password)
            .map(|(_, _, uid)| uid.clone());

        match uid {
            Some(uid) => {
                *self.session.lock().unwrap() = Some(uid.clone());
                Ok(Session::new("token".into(), "refresh".into(), uid, 3600))
            }
            None => Err(Error::auth("Invalid login credentials")),
        }
    }

    async fn sign_up(&self, _email: &str, _password: &str) -> Result<Option<Session>> {
        Ok(None)
    }

    async fn sign_out(&self) -> Result<()> {
        self.clear_session();
        Ok(())
    }
}

/// Document store held in memory, with injectable failures
#[derive(Default)]
pub struct MemoryStore {
    collections: Mutex<HashMap<String, Vec<Record>>>,
    fail_get: Mutex<Option<Error>>,
    fail_query: Mutex<Option<Error>>,
    pub get_calls: AtomicUsize,
    pub query_calls: AtomicUsize,
    pub set_calls: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn insert(&self, collection: &str, record: Record) {
        self.collections
            .lock()
            .unwrap()
            .entry(collection.to_string())
            .or_default()
            .push(record);
    }

    pub fn fail_next_get(&self, err: Error) {
        *self.fail_get.lock().unwrap() = Some(err);
    }

    pub fn fail_next_query(&self, err: Error) {
        *self.fail_query.lock().unwrap() = Some(err);
    }

    pub fn document(&self, collection: &str, uid: &str) -> Option<Record> {
        self.collections
            .lock()
            .unwrap()
            .get(collection)
            .and_then(|docs| docs.iter().find(|d| d.get("uid") == Some(&json!(uid))).cloned())
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get_document(&self, collection: &str, id: &str) -> Result<Record> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.fail_get.lock().unwrap().take() {
            return Err(err);
        }
        self.document(collection, id).ok_or_else(|| Error::NotFound {
            collection: collection.to_string(),
            id: id.to_string(),
        })
    }

    async fn query(&self, query: &DocumentQuery) -> Result<Vec<Record>> {
        self.query_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.fail_query.lock().unwrap().take() {
            return Err(err);
        }
        Ok(self
            .collections
            .lock()
            .unwrap()
            .get(query.collection())
            .map(|docs| docs.iter().filter(|d| query.matches(d)).cloned().collect())
            .unwrap_or_default())
    }

    async fn set_document(&self, collection: &str, id: &str, record: &Record) -> Result<()> {
        self.set_calls.fetch_add(1, Ordering::SeqCst);
        let mut body = record.clone();
        body.insert("uid".to_string(), json!(id));

        let mut collections = self.collections.lock().unwrap();
        let docs = collections.entry(collection.to_string()).or_default();
        match docs.iter_mut().find(|d| d.get("uid") == Some(&json!(id))) {
            Some(existing) => *existing = body,
            None => docs.push(body),
        }
        Ok(())
    }
}

pub fn context(identity: Arc<FakeIdentity>, store: Arc<MemoryStore>) -> SessionContext {
    SessionContext::new(identity, store, ClientOptions::default())
}
