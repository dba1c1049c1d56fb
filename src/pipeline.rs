//! Candidate retrieval
//!
//! One cycle loads the signed-in user's own profile, builds the age-window
//! query from it, runs the query and turns every well-formed result into a
//! card, in the order the store returned them.
//!
//! ```text
//! Idle -> FetchingSelf -> FetchingCandidates -> Populated
//!              |                 |
//!              +-----> Failed <--+
//! ```
//!
//! Every run starts by clearing the previous cycle, so repeated runs never
//! accumulate duplicates. Nothing is retried.

use log::{debug, info, warn};

use crate::binding::Binding;
use crate::config::ClientOptions;
use crate::context::SessionContext;
use crate::error::{Error, Result};
use crate::matching::CandidateQueryBuilder;
use crate::models::{CardViewModel, User};
use crate::store::Record;

/// Where a pipeline cycle currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    FetchingSelf,
    FetchingCandidates,
    Populated,
    Failed,
}

impl PipelineState {
    /// A network call is outstanding
    pub fn is_fetching(&self) -> bool {
        matches!(self, PipelineState::FetchingSelf | PipelineState::FetchingCandidates)
    }
}

/// Retrieves and holds the candidate deck for one screen
pub struct CandidatePipeline {
    users_collection: String,
    queries: CandidateQueryBuilder,
    state: Binding<PipelineState>,
    current_user: Option<User>,
    last_fetched_user: Option<User>,
    candidates: Vec<CardViewModel>,
}

impl CandidatePipeline {
    /// An idle pipeline reading from the configured users collection
    pub fn new(options: &ClientOptions) -> Self {
        Self {
            users_collection: options.users_collection.clone(),
            queries: CandidateQueryBuilder::new(&options.users_collection),
            state: Binding::with_value(PipelineState::Idle),
            current_user: None,
            last_fetched_user: None,
            candidates: Vec::new(),
        }
    }

    /// Current state of the cycle
    pub fn state(&self) -> PipelineState {
        self.state.value().unwrap_or(PipelineState::Idle)
    }

    /// Observe state transitions, e.g. to drive a progress indicator
    pub fn on_state_change<F>(&mut self, observer: F)
    where
        F: FnMut(&PipelineState) + 'static,
    {
        self.state.on_change(observer);
    }

    /// Cards in retrieval order; the first is the top of the deck
    pub fn candidates(&self) -> &[CardViewModel] {
        &self.candidates
    }

    /// The signed-in user's profile from the latest cycle.
    ///
    /// Also set when the cycle failed with `MissingPreference`.
    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    /// Last candidate of the latest batch, the cursor for a next page
    pub fn last_fetched_user(&self) -> Option<&User> {
        self.last_fetched_user.as_ref()
    }

    /// Drop everything from the previous cycle and return to `Idle`
    pub fn reset(&mut self) {
        self.candidates.clear();
        self.current_user = None;
        self.last_fetched_user = None;
        if self.state() != PipelineState::Idle {
            self.transition(PipelineState::Idle);
        }
    }

    /// Run a full cycle from `Idle`.
    ///
    /// Without an active session the pipeline stays `Idle` and
    /// `Error::NotAuthenticated` is returned.
    pub async fn run(&mut self, ctx: &SessionContext) -> Result<&[CardViewModel]> {
        self.reset();

        let uid = ctx.current_user_id().ok_or(Error::NotAuthenticated)?;

        self.transition(PipelineState::FetchingSelf);
        let fetched = self.fetch_self(ctx, &uid).await;
        let me = match fetched {
            Ok(me) => me,
            Err(err) => return Err(self.fail(err)),
        };

        // Recorded before the bounds check so it survives MissingPreference
        let query = self.queries.for_user(&me);
        self.current_user = Some(me);
        let query = match query {
            Ok(query) => query,
            Err(err) => return Err(self.fail(err)),
        };

        self.transition(PipelineState::FetchingCandidates);
        let records = match ctx.store.query(&query).await {
            Ok(records) => records,
            Err(err) => return Err(self.fail(err)),
        };

        let (cards, last) = admit(records);
        info!("Fetched {} candidates", cards.len());
        self.candidates = cards;
        self.last_fetched_user = last;
        self.transition(PipelineState::Populated);

        Ok(&self.candidates)
    }

    async fn fetch_self(&self, ctx: &SessionContext, uid: &str) -> Result<User> {
        let record = ctx.store.get_document(&self.users_collection, uid).await?;
        User::from_record(&record)
    }

    fn fail(&mut self, err: Error) -> Error {
        warn!("Candidate retrieval failed in {:?}: {}", self.state(), err);
        self.candidates.clear();
        self.last_fetched_user = None;
        self.transition(PipelineState::Failed);
        err
    }

    fn transition(&mut self, next: PipelineState) {
        debug!("Pipeline {:?} -> {:?}", self.state(), next);
        self.state.set(next);
    }
}

/// Cards for every complete user in `records`, plus the last one admitted
fn admit(records: Vec<Record>) -> (Vec<CardViewModel>, Option<User>) {
    let mut cards = Vec::with_capacity(records.len());
    let mut last = None;

    for record in &records {
        match User::from_record(record) {
            Ok(user) if user.is_complete() => {
                cards.push(user.to_card_view_model());
                last = Some(user);
            }
            Ok(user) => debug!("Skipping {}: no seeking range", user.uid),
            Err(err) => debug!("Skipping record: {}", err),
        }
    }

    (cards, last)
}
