use anyhow::Context;
use serde::Deserialize;

pub const DEFAULT_COMPUTE_UNIT_PRICE: u64 = 100_000;
pub const DEFAULT_COMPUTE_UNIT_LIMIT: u32 = 200_000;

const MICRO_LAMPORTS_PER_LAMPORT: u128 = 1_000_000;

/// Settings shared by the assembler and submitter. Built once by the caller
/// and handed to each component; nothing here is read from global state.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct SwapConfig {
    /// Compute-unit price in micro-lamports, used when a swap has no override.
    pub compute_unit_price: u64,
    pub compute_unit_limit: u32,
    pub simulate_before_send: bool,
}

impl Default for SwapConfig {
    fn default() -> Self {
        Self {
            compute_unit_price: DEFAULT_COMPUTE_UNIT_PRICE,
            compute_unit_limit: DEFAULT_COMPUTE_UNIT_LIMIT,
            simulate_before_send: true,
        }
    }
}

impl SwapConfig {
    /// Reads `SWAP_COMPUTE_UNIT_PRICE`, `SWAP_COMPUTE_UNIT_LIMIT` and
    /// `SWAP_SIMULATE`, keeping the default for any that is unset or empty.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let value = |key: &str| lookup(key).filter(|s| !s.trim().is_empty());

        if let Some(price) = value("SWAP_COMPUTE_UNIT_PRICE") {
            config.compute_unit_price = price
                .trim()
                .parse()
                .with_context(|| format!("invalid SWAP_COMPUTE_UNIT_PRICE: {price}"))?;
        }
        if let Some(limit) = value("SWAP_COMPUTE_UNIT_LIMIT") {
            config.compute_unit_limit = limit
                .trim()
                .parse()
                .with_context(|| format!("invalid SWAP_COMPUTE_UNIT_LIMIT: {limit}"))?;
        }
        if let Some(simulate) = value("SWAP_SIMULATE") {
            config.simulate_before_send = simulate
                .trim()
                .parse()
                .with_context(|| format!("invalid SWAP_SIMULATE: {simulate}"))?;
        }

        Ok(config)
    }
}

/// Per-unit price (micro-lamports) that spends roughly `fee_lamports` when
/// the transaction consumes its whole `unit_limit`.
pub fn compute_unit_price_for_fee(fee_lamports: u64, unit_limit: u32) -> u64 {
    if unit_limit == 0 {
        return 0;
    }
    let price = fee_lamports as u128 * MICRO_LAMPORTS_PER_LAMPORT / unit_limit as u128;
    u64::try_from(price).unwrap_or(u64::MAX)
}
