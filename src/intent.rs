use std::str::FromStr;

use anyhow::{anyhow, Error};
use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;

use crate::serde_helpers::field_as_string;

#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Debug)]
#[serde(rename_all = "lowercase")]
pub enum SwapDirection {
    Buy,
    Sell,
}

impl FromStr for SwapDirection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "buy" | "Buy" => Ok(Self::Buy),
            "sell" | "Sell" => Ok(Self::Sell),
            _ => Err(anyhow!("{} is not a valid SwapDirection", s)),
        }
    }
}

/// How the human amount of a sell is read.
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Debug)]
pub enum AmountMode {
    /// Token quantity in UI units.
    #[serde(rename = "qty")]
    Quantity,
    /// Percentage of the wallet's current balance.
    #[serde(rename = "pct")]
    Percentage,
}

impl FromStr for AmountMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "qty" => Ok(Self::Quantity),
            "pct" => Ok(Self::Percentage),
            _ => Err(anyhow!("{} is not a valid AmountMode", s)),
        }
    }
}

/// A requested trade. Fixed once built; the `with_*` builders consume and
/// return a new intent.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SwapIntent {
    direction: SwapDirection,
    #[serde(with = "field_as_string")]
    token: Pubkey,
    ui_amount: f64,
    /// Required when selling.
    #[serde(default)]
    amount_mode: Option<AmountMode>,
    slippage_bps: u16,
    /// Explicit compute-unit price in micro-lamports.
    #[serde(default)]
    compute_unit_price: Option<u64>,
    #[serde(default)]
    priority_bundle: bool,
}

impl SwapIntent {
    pub fn new(
        direction: SwapDirection,
        token: Pubkey,
        ui_amount: f64,
        amount_mode: Option<AmountMode>,
        slippage_bps: u16,
    ) -> Self {
        Self {
            direction,
            token,
            ui_amount,
            amount_mode,
            slippage_bps,
            compute_unit_price: None,
            priority_bundle: false,
        }
    }

    pub fn buy(token: Pubkey, ui_amount: f64, slippage_bps: u16) -> Self {
        Self::new(SwapDirection::Buy, token, ui_amount, None, slippage_bps)
    }

    pub fn sell(token: Pubkey, ui_amount: f64, mode: AmountMode, slippage_bps: u16) -> Self {
        Self::new(SwapDirection::Sell, token, ui_amount, Some(mode), slippage_bps)
    }

    pub fn with_compute_unit_price(mut self, micro_lamports: u64) -> Self {
        self.compute_unit_price = Some(micro_lamports);
        self
    }

    pub fn with_priority_bundle(mut self, priority_bundle: bool) -> Self {
        self.priority_bundle = priority_bundle;
        self
    }

    pub fn direction(&self) -> SwapDirection {
        self.direction
    }

    pub fn token(&self) -> &Pubkey {
        &self.token
    }

    pub fn ui_amount(&self) -> f64 {
        self.ui_amount
    }

    pub fn amount_mode(&self) -> Option<AmountMode> {
        self.amount_mode
    }

    pub fn slippage_bps(&self) -> u16 {
        self.slippage_bps
    }

    pub fn compute_unit_price(&self) -> Option<u64> {
        self.compute_unit_price
    }

    pub fn priority_bundle(&self) -> bool {
        self.priority_bundle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_direction_and_mode() {
        assert_eq!("buy".parse::<SwapDirection>().unwrap(), SwapDirection::Buy);
        assert_eq!("Sell".parse::<SwapDirection>().unwrap(), SwapDirection::Sell);
        assert!("hold".parse::<SwapDirection>().is_err());
        assert_eq!("pct".parse::<AmountMode>().unwrap(), AmountMode::Percentage);
        assert!("percent".parse::<AmountMode>().is_err());
    }

    #[test]
    fn deserializes_trade_event_shape() {
        let json = r#"{
            "direction": "sell",
            "token": "8qAbzjWBxD2kxnNwE9voR9Xkr2zT8mg1aM6ri34Jpump",
            "uiAmount": 50.0,
            "amountMode": "pct",
            "slippageBps": 250
        }"#;
        let intent: SwapIntent = serde_json::from_str(json).unwrap();

        assert_eq!(intent.direction(), SwapDirection::Sell);
        assert_eq!(intent.amount_mode(), Some(AmountMode::Percentage));
        assert_eq!(intent.compute_unit_price(), None);
        assert!(!intent.priority_bundle());
    }

    #[test]
    fn builders_return_new_intents() {
        let token = Pubkey::new_unique();
        let base = SwapIntent::buy(token, 0.5, 100);
        let priced = base.clone().with_compute_unit_price(9_000);

        assert_eq!(base.compute_unit_price(), None);
        assert_eq!(priced.compute_unit_price(), Some(9_000));
        assert_eq!(priced.token(), &token);
        assert_eq!(priced.amount_mode(), None);
        assert_eq!(
            SwapIntent::new(SwapDirection::Sell, token, 1.0, None, 50).amount_mode(),
            None
        );
    }
}
