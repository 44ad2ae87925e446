use std::str::FromStr;

use crate::serde_helpers::{field_as_string, option_field_as_string};
use anyhow::{anyhow, Error};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use solana_sdk::pubkey::Pubkey;

#[derive(Serialize, Deserialize, Default, PartialEq, Clone, Debug)]
pub enum SwapMode {
    #[default]
    ExactIn,
    ExactOut,
}

impl FromStr for SwapMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ExactIn" => Ok(Self::ExactIn),
            "ExactOut" => Ok(Self::ExactOut),
            _ => Err(anyhow!("{} is not a valid SwapMode", s)),
        }
    }
}

impl SwapMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SwapMode::ExactIn => "ExactIn",
            SwapMode::ExactOut => "ExactOut",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RoutePlanStep {
    pub swap_info: SwapInfo,
    pub percent: u8,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SwapInfo {
    #[serde(with = "field_as_string")]
    pub amm_key: Pubkey,
    #[serde(default)]
    pub label: String,
    #[serde(with = "field_as_string")]
    pub input_mint: Pubkey,
    #[serde(with = "field_as_string")]
    pub output_mint: Pubkey,
    #[serde(with = "field_as_string")]
    pub in_amount: u64,
    #[serde(with = "field_as_string")]
    pub out_amount: u64,
    #[serde(
        with = "option_field_as_string",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub fee_mint: Option<Pubkey>,
    #[serde(
        with = "option_field_as_string",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub fee_amount: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlatformFee {
    #[serde(with = "field_as_string")]
    pub amount: u64,
    pub fee_bps: u16,
}

/// Quote as returned by the aggregator. Fields this crate does not model are
/// kept in `extra` so the quote can be sent back verbatim when requesting the
/// swap transaction.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    #[serde(with = "field_as_string")]
    pub input_mint: Pubkey,
    #[serde(with = "field_as_string")]
    pub in_amount: u64,
    #[serde(with = "field_as_string")]
    pub output_mint: Pubkey,
    #[serde(with = "field_as_string")]
    pub out_amount: u64,
    #[serde(with = "field_as_string")]
    pub other_amount_threshold: u64,
    pub swap_mode: SwapMode,
    pub slippage_bps: u16,
    #[serde(default)]
    pub platform_fee: Option<PlatformFee>,
    #[serde(default)]
    pub price_impact_pct: Option<String>,
    pub route_plan: Vec<RoutePlanStep>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_slot: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_taken: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

type Dexes = String;

#[derive(Debug, Default, Clone)]
pub struct QuoteRequest {
    pub input_mint: Pubkey,
    pub output_mint: Pubkey,
    pub amount: u64,
    pub swap_mode: Option<SwapMode>,
    pub slippage_bps: u16,
    pub only_direct_routes: Option<bool>,
    pub max_accounts: Option<usize>,
    pub excluded_dexes: Option<Dexes>,
}

pub(crate) fn build_query_params(request: &QuoteRequest) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("inputMint", request.input_mint.to_string()),
        ("outputMint", request.output_mint.to_string()),
        ("amount", request.amount.to_string()),
        ("slippageBps", request.slippage_bps.to_string()),
    ];

    if let Some(swap_mode) = &request.swap_mode {
        params.push(("swapMode", swap_mode.as_str().to_string()));
    }
    if let Some(only_direct_routes) = request.only_direct_routes {
        params.push(("onlyDirectRoutes", only_direct_routes.to_string()));
    }
    if let Some(max_accounts) = request.max_accounts {
        params.push(("maxAccounts", max_accounts.to_string()));
    }
    if let Some(ref excluded_dexes) = request.excluded_dexes {
        params.push(("excludeDexes", excluded_dexes.clone()));
    }

    params
}
