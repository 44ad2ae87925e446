use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;

use crate::{quote::QuoteResponse, serde_helpers::field_as_string, ClientError};

/// Everything the aggregator needs to build a swap transaction for one
/// resolved intent.
#[derive(Debug, Clone, PartialEq)]
pub struct SwapTransactionRequest {
    pub input_mint: Pubkey,
    pub output_mint: Pubkey,
    pub user_pubkey: Pubkey,
    pub amount: u64,
    pub slippage_bps: u16,
    pub priority_submission: bool,
    /// Explicit compute-unit price in micro-lamports.
    pub compute_unit_price: Option<u64>,
}

/// Source of pre-built, unsigned swap transactions.
#[async_trait]
pub trait SwapTransactionProvider: Send + Sync {
    async fn swap_transaction(
        &self,
        request: &SwapTransactionRequest,
    ) -> Result<SwapResponse, ClientError>;
}

/// Priority directive sent when no explicit unit price is set.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PrioritizationFee {
    Auto,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SwapOptions {
    pub compute_unit_price: Option<u64>,
    pub priority_submission: bool,
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SwapRequest<'a> {
    #[serde(with = "field_as_string")]
    pub user_public_key: Pubkey,
    pub quote_response: &'a QuoteResponse,
    pub wrap_and_unwrap_sol: bool,
    pub dynamic_compute_unit_limit: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compute_unit_price_micro_lamports: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prioritization_fee_lamports: Option<PrioritizationFee>,
}

impl<'a> SwapRequest<'a> {
    /// The aggregator accepts either an explicit unit price or a
    /// prioritization directive, never both. The explicit price wins.
    pub fn new(user_public_key: Pubkey, quote: &'a QuoteResponse, options: &SwapOptions) -> Self {
        let prioritization_fee_lamports = match options.compute_unit_price {
            None if options.priority_submission => Some(PrioritizationFee::Auto),
            _ => None,
        };

        Self {
            user_public_key,
            quote_response: quote,
            wrap_and_unwrap_sol: true,
            dynamic_compute_unit_limit: true,
            compute_unit_price_micro_lamports: options.compute_unit_price,
            prioritization_fee_lamports,
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SwapResponse {
    /// Base64 encoded, unsigned `VersionedTransaction`.
    #[serde(alias = "transaction", default)]
    pub swap_transaction: String,
    #[serde(default)]
    pub last_valid_block_height: Option<u64>,
    #[serde(default)]
    pub prioritization_fee_lamports: Option<u64>,
}
