//! Candidate query construction
//!
//! The age window is exclusive on both ends: a candidate whose age equals
//! either seeking bound is never selected.

use crate::error::{Error, Result};
use crate::models::User;
use crate::store::DocumentQuery;

/// Record field the age window applies to
pub const AGE_FIELD: &str = "age";

/// Builds the candidate selection for a signed-in user
#[derive(Debug, Clone)]
pub struct CandidateQueryBuilder {
    collection: String,
}

impl CandidateQueryBuilder {
    /// Queries over `collection`
    pub fn new(collection: &str) -> Self {
        Self {
            collection: collection.to_string(),
        }
    }

    /// `min < age < max` over the users collection
    pub fn build(&self, min_seeking_age: Option<u32>, max_seeking_age: Option<u32>) -> Result<DocumentQuery> {
        match (min_seeking_age, max_seeking_age) {
            (Some(min), Some(max)) => Ok(DocumentQuery::new(&self.collection)
                .gt(AGE_FIELD, min)
                .lt(AGE_FIELD, max)),
            _ => Err(Error::MissingPreference),
        }
    }

    /// Query from the preferences stored on `user`
    pub fn for_user(&self, user: &User) -> Result<DocumentQuery> {
        self.build(user.min_seeking_age, user.max_seeking_age)
    }
}
