use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use solana_sdk::signature::Signature;
use tracing::{debug, info, warn};

use crate::{
    config::SwapConfig,
    error::SwapError,
    rpc::{ChainRpc, SimulationOutcome},
    signer::SignedTransaction,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmissionMode {
    /// Send straight to the RPC node.
    #[default]
    Direct,
    /// Hand off to a priority bundle relay.
    Bundle,
}

impl SubmissionMode {
    pub fn from_priority_bundle(priority_bundle: bool) -> Self {
        if priority_bundle {
            Self::Bundle
        } else {
            Self::Direct
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionResult {
    pub signature: Signature,
    /// Time from just before the send call until the node answered.
    pub elapsed: Duration,
    /// Present when a simulation ran and accepted the transaction.
    pub simulation: Option<SimulationOutcome>,
}

pub struct Submitter<R: ?Sized> {
    rpc: Arc<R>,
    config: SwapConfig,
}

impl<R: ChainRpc + ?Sized> Submitter<R> {
    pub fn new(rpc: Arc<R>, config: SwapConfig) -> Self {
        Self { rpc, config }
    }

    /// Submits using the configured simulate-before-send toggle.
    pub async fn submit_with_config(
        &self,
        transaction: &SignedTransaction,
        mode: SubmissionMode,
    ) -> Result<SubmissionResult, SwapError> {
        self.submit(transaction, self.config.simulate_before_send, mode)
            .await
    }

    /// Optionally simulates, then broadcasts. A rejected simulation returns
    /// before anything is sent.
    pub async fn submit(
        &self,
        transaction: &SignedTransaction,
        simulate_first: bool,
        mode: SubmissionMode,
    ) -> Result<SubmissionResult, SwapError> {
        if mode == SubmissionMode::Bundle {
            warn!(
                "Bundle submission requested for {}, refusing",
                transaction.signature()
            );
            return Err(SwapError::Unimplemented("bundle submission"));
        }

        let simulation = if simulate_first {
            let outcome = self
                .rpc
                .simulate(transaction.transaction())
                .await
                .map_err(SwapError::SubmissionFailed)?;
            if let Some(err) = outcome.err {
                warn!("Simulation rejected {}: {}", transaction.signature(), err);
                return Err(SwapError::SimulationRejected {
                    err,
                    logs: outcome.logs,
                });
            }
            debug!(
                "Simulation passed, {:?} compute units consumed",
                outcome.units_consumed
            );
            Some(outcome)
        } else {
            None
        };

        let start = Instant::now();
        let signature = self
            .rpc
            .send(transaction.transaction())
            .await
            .map_err(SwapError::SubmissionFailed)?;
        let elapsed = start.elapsed();

        info!("Transaction sent: {}", signature);
        info!("Transaction elapsed: {:?}", elapsed);

        Ok(SubmissionResult {
            signature,
            elapsed,
            simulation,
        })
    }
}
