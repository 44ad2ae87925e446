use async_trait::async_trait;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{hash::Hash, signature::Signature, transaction::VersionedTransaction};

use crate::error::RpcError;

/// Outcome of a non-committing simulation. `err` is `None` when the network
/// would accept the transaction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimulationOutcome {
    pub err: Option<serde_json::Value>,
    pub logs: Vec<String>,
    pub units_consumed: Option<u64>,
}

/// The slice of the chain RPC surface a swap flow needs.
#[async_trait]
pub trait ChainRpc: Send + Sync {
    async fn latest_blockhash(&self) -> Result<Hash, RpcError>;

    async fn simulate(&self, transaction: &VersionedTransaction)
        -> Result<SimulationOutcome, RpcError>;

    async fn send(&self, transaction: &VersionedTransaction) -> Result<Signature, RpcError>;
}

#[async_trait]
impl ChainRpc for RpcClient {
    async fn latest_blockhash(&self) -> Result<Hash, RpcError> {
        Ok(self.get_latest_blockhash().await?)
    }

    async fn simulate(
        &self,
        transaction: &VersionedTransaction,
    ) -> Result<SimulationOutcome, RpcError> {
        let result = self.simulate_transaction(transaction).await?.value;

        Ok(SimulationOutcome {
            err: result.err.map(|err| {
                serde_json::to_value(&err)
                    .unwrap_or_else(|_| serde_json::Value::String(format!("{err:?}")))
            }),
            logs: result.logs.unwrap_or_default(),
            units_consumed: result.units_consumed,
        })
    }

    async fn send(&self, transaction: &VersionedTransaction) -> Result<Signature, RpcError> {
        Ok(self.send_transaction(transaction).await?)
    }
}
