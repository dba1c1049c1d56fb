//! Session gating for the home screen

use log::info;

use crate::binding::Binding;
use crate::context::SessionContext;
use crate::error::Result;
use crate::pipeline::CandidatePipeline;

/// Outcome of a gate check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// A session is active; the deck may load
    Authenticated { user_id: String },
    /// No session; present registration, which links to login
    RequiresAuthentication,
}

/// Decides on every screen entry whether the deck may be shown
#[derive(Debug, Default)]
pub struct SessionGate {
    /// Published on every check
    pub decision: Binding<GateDecision>,
}

impl SessionGate {
    /// A gate that has not decided yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the identity provider, without caching the answer
    pub fn check(&mut self, ctx: &SessionContext) -> GateDecision {
        let decision = match ctx.current_user_id() {
            Some(user_id) => GateDecision::Authenticated { user_id },
            None => GateDecision::RequiresAuthentication,
        };
        self.decision.set(decision.clone());
        decision
    }

    /// Screen entry: load the deck when signed in, otherwise keep it empty
    pub async fn enter(
        &mut self,
        ctx: &SessionContext,
        pipeline: &mut CandidatePipeline,
    ) -> Result<GateDecision> {
        let decision = self.check(ctx);
        match &decision {
            GateDecision::Authenticated { .. } => {
                pipeline.run(ctx).await?;
            }
            GateDecision::RequiresAuthentication => {
                info!("No active session; routing to registration");
                pipeline.reset();
            }
        }
        Ok(decision)
    }

    /// Called once login or registration succeeds; restarts the deck from `Idle`
    pub async fn on_authenticated(
        &mut self,
        ctx: &SessionContext,
        pipeline: &mut CandidatePipeline,
    ) -> Result<GateDecision> {
        info!("Authentication reported; refreshing deck");
        self.enter(ctx, pipeline).await
    }
}
