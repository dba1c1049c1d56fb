mod common;

use common::{context, profile, FakeIdentity, MemoryStore};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::Ordering;

use swipedeck::auth::IdentityProvider;
use swipedeck::config::ClientOptions;
use swipedeck::gate::{GateDecision, SessionGate};
use swipedeck::pipeline::{CandidatePipeline, PipelineState};

#[tokio::test]
async fn test_signed_out_blocks_pipeline() {
    let store = MemoryStore::new();
    store.insert("users", profile("me", 50, 20, 40));
    let ctx = context(FakeIdentity::signed_out(), store.clone());

    let mut gate = SessionGate::new();
    let mut pipeline = CandidatePipeline::new(&ClientOptions::default());

    let decision = gate.enter(&ctx, &mut pipeline).await.unwrap();
    assert_eq!(decision, GateDecision::RequiresAuthentication);
    assert_eq!(pipeline.state(), PipelineState::Idle);
    assert_eq!(store.get_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_signed_in_loads_deck() {
    let store = MemoryStore::new();
    store.insert("users", profile("me", 50, 20, 40));
    store.insert("users", profile("a", 30, 18, 99));
    let ctx = context(FakeIdentity::signed_in("me"), store);

    let mut gate = SessionGate::new();
    let mut pipeline = CandidatePipeline::new(&ClientOptions::default());

    let decision = gate.enter(&ctx, &mut pipeline).await.unwrap();
    assert_eq!(
        decision,
        GateDecision::Authenticated {
            user_id: "me".to_string()
        }
    );
    assert_eq!(pipeline.state(), PipelineState::Populated);
    assert_eq!(pipeline.candidates().len(), 1);
}

#[tokio::test]
async fn test_rechecks_on_every_entry() {
    let store = MemoryStore::new();
    store.insert("users", profile("me", 50, 20, 40));
    store.insert("users", profile("a", 30, 18, 99));
    let identity = FakeIdentity::signed_out().with_account("me@example.com", "secret1", "me");
    let ctx = context(identity.clone(), store);

    let decisions = Rc::new(RefCell::new(Vec::new()));
    let mut gate = SessionGate::new();
    let sink = Rc::clone(&decisions);
    gate.decision.on_change(move |d| sink.borrow_mut().push(d.clone()));
    let mut pipeline = CandidatePipeline::new(&ClientOptions::default());

    gate.enter(&ctx, &mut pipeline).await.unwrap();

    identity.authenticate("me@example.com", "secret1").await.unwrap();
    gate.on_authenticated(&ctx, &mut pipeline).await.unwrap();
    assert_eq!(pipeline.candidates().len(), 1);

    identity.sign_out().await.unwrap();
    gate.enter(&ctx, &mut pipeline).await.unwrap();
    assert!(pipeline.candidates().is_empty());
    assert_eq!(pipeline.state(), PipelineState::Idle);

    assert_eq!(
        *decisions.borrow(),
        vec![
            GateDecision::RequiresAuthentication,
            GateDecision::Authenticated {
                user_id: "me".to_string()
            },
            GateDecision::RequiresAuthentication,
        ]
    );
}

#[tokio::test]
async fn test_pipeline_errors_surface_through_gate() {
    let store = MemoryStore::new();
    let ctx = context(FakeIdentity::signed_in("ghost"), store);

    let mut gate = SessionGate::new();
    let mut pipeline = CandidatePipeline::new(&ClientOptions::default());

    assert!(gate.enter(&ctx, &mut pipeline).await.is_err());
    assert_eq!(pipeline.state(), PipelineState::Failed);
}
