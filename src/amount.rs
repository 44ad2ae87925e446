use std::sync::Arc;

use solana_sdk::{pubkey, pubkey::Pubkey};
use tracing::debug;

use crate::{
    cache::{TokenMetadataCache, WalletBalanceCache},
    error::{LookupError, SwapError},
    intent::{AmountMode, SwapDirection, SwapIntent},
};

pub const WSOL_MINT: Pubkey = pubkey!("So11111111111111111111111111111111111111112");
pub const SOL_DECIMALS: u8 = 9;

/// Integer amount in the smallest unit of a token, plus the precision used
/// to derive it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedAmount {
    pub amount: u64,
    pub decimals: u8,
}

/// A resolved intent: which mint goes in, which comes out, and how much.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedSwap {
    pub input_mint: Pubkey,
    pub output_mint: Pubkey,
    pub amount: ResolvedAmount,
}

#[derive(Clone, Copy)]
enum Rounding {
    Nearest,
    Floor,
}

pub struct AmountResolver {
    token_metadata: Arc<dyn TokenMetadataCache>,
    wallet_balances: Arc<dyn WalletBalanceCache>,
}

impl AmountResolver {
    pub fn new(
        token_metadata: Arc<dyn TokenMetadataCache>,
        wallet_balances: Arc<dyn WalletBalanceCache>,
    ) -> Self {
        Self {
            token_metadata,
            wallet_balances,
        }
    }

    pub async fn resolve(
        &self,
        intent: &SwapIntent,
        wallet: &Pubkey,
    ) -> Result<ResolvedSwap, SwapError> {
        let token = *intent.token();
        let resolved = match intent.direction() {
            SwapDirection::Buy => ResolvedSwap {
                input_mint: WSOL_MINT,
                output_mint: token,
                amount: ResolvedAmount {
                    amount: to_raw(intent.ui_amount(), SOL_DECIMALS, Rounding::Nearest)?,
                    decimals: SOL_DECIMALS,
                },
            },
            SwapDirection::Sell => {
                let mode = intent.amount_mode().ok_or_else(|| {
                    SwapError::Validation("amount mode must be specified when selling".into())
                })?;
                let amount = match mode {
                    AmountMode::Quantity => {
                        let decimals = self
                            .token_metadata
                            .decimals(&token)
                            .await
                            .ok_or(LookupError::TokenMetadata(token))?;
                        ResolvedAmount {
                            amount: to_raw(intent.ui_amount(), decimals, Rounding::Floor)?,
                            decimals,
                        }
                    }
                    AmountMode::Percentage => {
                        let balance = self
                            .wallet_balances
                            .token_balance(wallet, &token)
                            .await
                            .ok_or(LookupError::WalletBalance {
                                wallet: *wallet,
                                mint: token,
                            })?;
                        ResolvedAmount {
                            amount: percentage_of(balance.amount, intent.ui_amount())?,
                            decimals: balance.decimals,
                        }
                    }
                };
                ResolvedSwap {
                    input_mint: token,
                    output_mint: WSOL_MINT,
                    amount,
                }
            }
        };

        debug!(
            "Resolved {:?} of {}: {} raw units ({} decimals)",
            intent.direction(),
            token,
            resolved.amount.amount,
            resolved.amount.decimals
        );

        Ok(resolved)
    }
}

/// Scales a human amount to raw units. The result must be at least one raw
/// unit.
fn to_raw(ui_amount: f64, decimals: u8, rounding: Rounding) -> Result<u64, SwapError> {
    if !ui_amount.is_finite() {
        return Err(SwapError::Validation(format!(
            "amount {ui_amount} is not a finite number"
        )));
    }
    if ui_amount <= 0.0 {
        return Err(SwapError::Validation(format!(
            "amount {ui_amount} must be positive"
        )));
    }

    let scaled = ui_amount * 10f64.powi(decimals as i32);
    let scaled = match rounding {
        Rounding::Nearest => scaled.round(),
        Rounding::Floor => scaled.floor(),
    };

    if scaled >= u64::MAX as f64 {
        return Err(SwapError::Validation(format!(
            "amount {ui_amount} with {decimals} decimals overflows a raw amount"
        )));
    }
    if scaled < 1.0 {
        return Err(SwapError::Validation(format!(
            "amount {ui_amount} is below one raw unit at {decimals} decimals"
        )));
    }

    Ok(scaled as u64)
}

/// 100% expressed in the fixed-point scale used for percentage sells.
const PERCENT_SCALE: u128 = 1_000_000_000;

/// Floors `percentage` of a raw balance using integer arithmetic, so a
/// percentage of at most 100 never exceeds the balance. Percentages above 100
/// scale proportionally; negative ones give zero.
fn percentage_of(balance: u64, percentage: f64) -> Result<u64, SwapError> {
    if !percentage.is_finite() {
        return Err(SwapError::Validation(format!(
            "percentage {percentage} is not a finite number"
        )));
    }

    let parts = (percentage.max(0.0) * (PERCENT_SCALE / 100) as f64).floor() as u128;
    (balance as u128)
        .checked_mul(parts)
        .map(|scaled| scaled / PERCENT_SCALE)
        .and_then(|raw| u64::try_from(raw).ok())
        .ok_or_else(|| {
            SwapError::Validation(format!(
                "{percentage}% of {balance} overflows a raw amount"
            ))
        })
}
