use async_trait::async_trait;
use dashmap::DashMap;
use solana_sdk::pubkey::Pubkey;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenBalance {
    /// Balance in the token's smallest unit.
    pub amount: u64,
    pub decimals: u8,
}

#[async_trait]
pub trait TokenMetadataCache: Send + Sync {
    async fn decimals(&self, mint: &Pubkey) -> Option<u8>;
}

#[async_trait]
pub trait WalletBalanceCache: Send + Sync {
    async fn token_balance(&self, wallet: &Pubkey, mint: &Pubkey) -> Option<TokenBalance>;
}

/// Process-local cache backing both lookups.
#[derive(Debug, Default)]
pub struct InMemoryCache {
    decimals: DashMap<Pubkey, u8>,
    balances: DashMap<(Pubkey, Pubkey), TokenBalance>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_token(&self, mint: Pubkey, decimals: u8) {
        self.decimals.insert(mint, decimals);
    }

    pub fn insert_balance(&self, wallet: Pubkey, mint: Pubkey, amount: u64, decimals: u8) {
        self.balances
            .insert((wallet, mint), TokenBalance { amount, decimals });
    }
}

#[async_trait]
impl TokenMetadataCache for InMemoryCache {
    async fn decimals(&self, mint: &Pubkey) -> Option<u8> {
        self.decimals.get(mint).map(|entry| *entry)
    }
}

#[async_trait]
impl WalletBalanceCache for InMemoryCache {
    async fn token_balance(&self, wallet: &Pubkey, mint: &Pubkey) -> Option<TokenBalance> {
        self.balances.get(&(*wallet, *mint)).map(|entry| *entry)
    }
}
