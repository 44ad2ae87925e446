use std::sync::Arc;

use solana_sdk::{instruction::Instruction, signature::Keypair, signer::Signer};
use tracing::info;

use crate::{
    amount::AmountResolver,
    assembler::{decode_quoted_message, TransactionAssembler},
    cache::{TokenMetadataCache, WalletBalanceCache},
    config::SwapConfig,
    error::SwapError,
    intent::SwapIntent,
    rpc::ChainRpc,
    signer::{self, SignedTransaction},
    submit::{SubmissionMode, SubmissionResult, Submitter},
    swap::{SwapTransactionProvider, SwapTransactionRequest},
};

/// Runs a swap from intent to broadcast. Holds no per-flow state, so one
/// executor can serve concurrent flows.
pub struct SwapExecutor {
    resolver: AmountResolver,
    provider: Arc<dyn SwapTransactionProvider>,
    assembler: TransactionAssembler<dyn ChainRpc>,
    submitter: Submitter<dyn ChainRpc>,
}

impl SwapExecutor {
    pub fn new(
        rpc: Arc<dyn ChainRpc>,
        provider: Arc<dyn SwapTransactionProvider>,
        token_metadata: Arc<dyn TokenMetadataCache>,
        wallet_balances: Arc<dyn WalletBalanceCache>,
        config: SwapConfig,
    ) -> Self {
        Self {
            resolver: AmountResolver::new(token_metadata, wallet_balances),
            provider,
            assembler: TransactionAssembler::new(rpc.clone(), config.clone()),
            submitter: Submitter::new(rpc, config),
        }
    }

    /// Resolves the intent, asks the aggregator for a transaction and signs
    /// its message locally.
    pub async fn build_swap_transaction(
        &self,
        intent: &SwapIntent,
        keypair: &Keypair,
    ) -> Result<SignedTransaction, SwapError> {
        let wallet = keypair.pubkey();
        let resolved = self.resolver.resolve(intent, &wallet).await?;

        let response = self
            .provider
            .swap_transaction(&SwapTransactionRequest {
                input_mint: resolved.input_mint,
                output_mint: resolved.output_mint,
                user_pubkey: wallet,
                amount: resolved.amount.amount,
                slippage_bps: intent.slippage_bps(),
                priority_submission: intent.priority_bundle(),
                compute_unit_price: intent.compute_unit_price(),
            })
            .await?;

        let message = decode_quoted_message(&response.swap_transaction)?;
        Ok(signer::sign(message, keypair)?)
    }

    pub async fn execute(
        &self,
        intent: &SwapIntent,
        keypair: &Keypair,
    ) -> Result<SubmissionResult, SwapError> {
        let mode = SubmissionMode::from_priority_bundle(intent.priority_bundle());
        if mode == SubmissionMode::Bundle {
            return Err(SwapError::Unimplemented("bundle submission"));
        }

        info!(
            "Executing {:?} of {} ({} ui, {} bps)",
            intent.direction(),
            intent.token(),
            intent.ui_amount(),
            intent.slippage_bps()
        );
        let transaction = self.build_swap_transaction(intent, keypair).await?;
        self.submitter.submit_with_config(&transaction, mode).await
    }

    /// Generic path: budgets, compiles, signs and submits caller-built
    /// instructions.
    pub async fn execute_instructions(
        &self,
        keypair: &Keypair,
        instructions: Vec<Instruction>,
        compute_unit_price: Option<u64>,
        mode: SubmissionMode,
    ) -> Result<SubmissionResult, SwapError> {
        if mode == SubmissionMode::Bundle {
            return Err(SwapError::Unimplemented("bundle submission"));
        }

        let message = self
            .assembler
            .assemble(&keypair.pubkey(), instructions, compute_unit_price)
            .await?;
        let transaction = signer::sign(message, keypair)?;
        self.submitter.submit_with_config(&transaction, mode).await
    }
}
