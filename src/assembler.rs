use std::sync::Arc;

use base64::{prelude::BASE64_STANDARD, Engine};
use solana_compute_budget_interface::ComputeBudgetInstruction;
use solana_sdk::{
    hash::Hash,
    instruction::Instruction,
    message::{v0, VersionedMessage},
    pubkey::Pubkey,
    transaction::VersionedTransaction,
};
use tracing::{debug, info};

use crate::{
    config::SwapConfig,
    error::{CompileError, SwapError},
    rpc::ChainRpc,
    ClientError,
};

/// Largest serialized transaction the network accepts in one packet.
pub const MAX_TRANSACTION_SIZE: usize = 1232;

/// Builds transaction messages from caller-supplied instructions.
pub struct TransactionAssembler<R: ?Sized> {
    rpc: Arc<R>,
    config: SwapConfig,
}

impl<R: ChainRpc + ?Sized> TransactionAssembler<R> {
    pub fn new(rpc: Arc<R>, config: SwapConfig) -> Self {
        Self { rpc, config }
    }

    pub fn config(&self) -> &SwapConfig {
        &self.config
    }

    /// Prepends the compute budget to `instructions` and compiles them into a
    /// v0 message paid by `payer`.
    ///
    /// The blockhash is fetched here, right before compilation, and never
    /// reused across calls: it is only valid for roughly 150 slots.
    pub async fn assemble(
        &self,
        payer: &Pubkey,
        instructions: Vec<Instruction>,
        compute_unit_price: Option<u64>,
    ) -> Result<VersionedMessage, SwapError> {
        let unit_price = match compute_unit_price {
            Some(price) => {
                info!("Using custom compute unit price: {}", price);
                price
            }
            None => {
                info!(
                    "Using default compute unit price: {}",
                    self.config.compute_unit_price
                );
                self.config.compute_unit_price
            }
        };
        let instructions =
            with_compute_budget(instructions, self.config.compute_unit_limit, unit_price);

        let blockhash = self
            .rpc
            .latest_blockhash()
            .await
            .map_err(CompileError::Blockhash)?;
        debug!("Compiling {} instructions against {}", instructions.len(), blockhash);

        Ok(compile_message(payer, &instructions, blockhash)?)
    }
}

/// Compute-unit limit then compute-unit price, followed by `instructions`.
/// The network requires this order.
pub fn with_compute_budget(
    instructions: Vec<Instruction>,
    unit_limit: u32,
    unit_price: u64,
) -> Vec<Instruction> {
    let mut budgeted = Vec::with_capacity(instructions.len() + 2);
    budgeted.push(ComputeBudgetInstruction::set_compute_unit_limit(unit_limit));
    budgeted.push(ComputeBudgetInstruction::set_compute_unit_price(unit_price));
    budgeted.extend(instructions);
    budgeted
}

pub fn compile_message(
    payer: &Pubkey,
    instructions: &[Instruction],
    blockhash: Hash,
) -> Result<VersionedMessage, CompileError> {
    let message = VersionedMessage::V0(v0::Message::try_compile(
        payer,
        instructions,
        &[],
        blockhash,
    )?);

    let size = signed_size(&message);
    if size > MAX_TRANSACTION_SIZE {
        return Err(CompileError::TooLarge {
            size,
            max: MAX_TRANSACTION_SIZE,
        });
    }

    Ok(message)
}

/// Size of `message` once signed: compact signature count, the signatures,
/// then the message bytes.
fn signed_size(message: &VersionedMessage) -> usize {
    let signatures = message.header().num_required_signatures as usize;
    let count_len = if signatures < 0x80 { 1 } else { 2 };
    count_len + signatures * 64 + message.serialize().len()
}

/// Extracts the message from a base64 transaction built by the aggregator.
/// Whatever signatures the blob carries are dropped.
pub fn decode_quoted_message(encoded: &str) -> Result<VersionedMessage, ClientError> {
    if encoded.trim().is_empty() {
        return Err(ClientError::MissingTransaction);
    }
    let bytes = BASE64_STANDARD.decode(encoded.trim())?;
    let transaction: VersionedTransaction = bincode::deserialize(&bytes)?;
    Ok(transaction.message)
}
