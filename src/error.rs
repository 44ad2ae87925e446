use solana_sdk::{pubkey::Pubkey, signer::SignerError};
use thiserror::Error;

use crate::ClientError;

/// Failure of a single swap flow. Every variant is terminal for the flow and
/// is handed back to the caller as-is.
#[derive(Debug, Error)]
pub enum SwapError {
    #[error("invalid swap intent: {0}")]
    Validation(String),
    #[error("lookup failed: {0}")]
    Lookup(#[from] LookupError),
    #[error("quote failed: {0}")]
    Quote(#[from] ClientError),
    #[error("failed to compile transaction: {0}")]
    Compile(#[from] CompileError),
    #[error("failed to sign transaction: {0}")]
    Signing(#[from] SignerError),
    #[error("simulation rejected transaction: {err}")]
    SimulationRejected {
        err: serde_json::Value,
        logs: Vec<String>,
    },
    #[error("failed to submit transaction: {0}")]
    SubmissionFailed(#[source] RpcError),
    #[error("{0} is not implemented")]
    Unimplemented(&'static str),
}

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("token metadata not found for {0}")]
    TokenMetadata(Pubkey),
    #[error("balance of {mint} not found for wallet {wallet}")]
    WalletBalance { wallet: Pubkey, mint: Pubkey },
}

#[derive(Debug, Error)]
pub enum CompileError {
    #[error(transparent)]
    Message(#[from] solana_sdk::message::CompileError),
    #[error("transaction is {size} bytes, limit is {max}")]
    TooLarge { size: usize, max: usize },
    #[error("failed to fetch recent blockhash: {0}")]
    Blockhash(#[source] RpcError),
}

#[derive(Debug, Error)]
pub enum RpcError {
    #[error(transparent)]
    Client(#[from] solana_client::client_error::ClientError),
    #[error("{0}")]
    Custom(String),
}
