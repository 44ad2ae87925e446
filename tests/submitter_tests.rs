mod common;

use std::sync::Arc;

use common::{memo_instruction, message_for, MockChain};
use serde_json::json;
use solana_sdk::signature::{Keypair, Signer};
use swap_executor::{
    signer::sign, SignedTransaction, SubmissionMode, Submitter, SwapConfig, SwapError,
};

fn signed() -> SignedTransaction {
    let keypair = Keypair::new();
    let payer = keypair.pubkey();
    sign(
        message_for(&payer, &[memo_instruction(payer, b"swap")]),
        &keypair,
    )
    .unwrap()
}

fn submitter(chain: Arc<MockChain>, simulate_before_send: bool) -> Submitter<MockChain> {
    Submitter::new(
        chain,
        SwapConfig {
            simulate_before_send,
            ..SwapConfig::default()
        },
    )
}

#[tokio::test]
async fn broadcasts_and_reports_signature() {
    let chain = Arc::new(MockChain::new());
    let tx = signed();

    let result = submitter(chain.clone(), false)
        .submit(&tx, true, SubmissionMode::Direct)
        .await
        .unwrap();

    assert_eq!(result.signature, *tx.signature());
    assert_eq!(chain.simulate_count(), 1);
    assert_eq!(chain.sent_count(), 1);
    let simulation = result.simulation.unwrap();
    assert_eq!(simulation.units_consumed, Some(42_000));
}

#[tokio::test]
async fn skips_simulation_when_not_requested() {
    let chain = Arc::new(MockChain::new());

    let result = submitter(chain.clone(), true)
        .submit(&signed(), false, SubmissionMode::Direct)
        .await
        .unwrap();

    assert!(result.simulation.is_none());
    assert_eq!(chain.simulate_count(), 0);
    assert_eq!(chain.sent_count(), 1);
}

#[tokio::test]
async fn rejected_simulation_prevents_broadcast() {
    let payload = json!({"InstructionError": [2, {"Custom": 6001}]});
    let chain = Arc::new(MockChain::rejecting_simulation(payload.clone()));

    let err = submitter(chain.clone(), false)
        .submit(&signed(), true, SubmissionMode::Direct)
        .await
        .unwrap_err();

    match err {
        SwapError::SimulationRejected { err, logs } => {
            assert_eq!(err, payload);
            assert_eq!(logs, vec!["Program log: simulated".to_string()]);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(chain.sent_count(), 0);
}

#[tokio::test]
async fn bundle_mode_is_unimplemented_without_side_effects() {
    let chain = Arc::new(MockChain::new());
    let submitter = submitter(chain.clone(), true);

    for simulate in [true, false] {
        let err = submitter
            .submit(&signed(), simulate, SubmissionMode::Bundle)
            .await
            .unwrap_err();
        assert!(matches!(err, SwapError::Unimplemented(_)));
    }

    assert_eq!(chain.simulate_count(), 0);
    assert_eq!(chain.sent_count(), 0);
}

#[tokio::test]
async fn transport_failure_is_submission_failed() {
    let chain = Arc::new(MockChain {
        fail_send: true,
        ..MockChain::new()
    });

    let err = submitter(chain, false)
        .submit(&signed(), false, SubmissionMode::Direct)
        .await
        .unwrap_err();

    assert!(matches!(err, SwapError::SubmissionFailed(_)));
}

#[tokio::test]
async fn configured_toggle_controls_simulation() {
    let chain = Arc::new(MockChain::new());
    submitter(chain.clone(), true)
        .submit_with_config(&signed(), SubmissionMode::Direct)
        .await
        .unwrap();
    assert_eq!(chain.simulate_count(), 1);

    let chain = Arc::new(MockChain::new());
    submitter(chain.clone(), false)
        .submit_with_config(&signed(), SubmissionMode::Direct)
        .await
        .unwrap();
    assert_eq!(chain.simulate_count(), 0);
    assert_eq!(chain.sent_count(), 1);
}
