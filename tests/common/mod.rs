#![allow(dead_code)]

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Mutex,
};

use async_trait::async_trait;
use base64::{prelude::BASE64_STANDARD, Engine};
use solana_sdk::{
    hash::Hash,
    instruction::{AccountMeta, Instruction},
    message::{v0, VersionedMessage},
    pubkey::Pubkey,
    signature::Signature,
    transaction::VersionedTransaction,
};
use swap_executor::{
    rpc::{ChainRpc, SimulationOutcome},
    swap::{SwapResponse, SwapTransactionProvider, SwapTransactionRequest},
    ClientError, RpcError,
};

pub fn memo_instruction(signer: Pubkey, data: &[u8]) -> Instruction {
    Instruction::new_with_bytes(
        Pubkey::new_unique(),
        data,
        vec![AccountMeta::new(signer, true)],
    )
}

pub fn message_for(payer: &Pubkey, instructions: &[Instruction]) -> VersionedMessage {
    VersionedMessage::V0(
        v0::Message::try_compile(payer, instructions, &[], Hash::new_unique()).unwrap(),
    )
}

/// What an aggregator hands back: a base64 bincode transaction carrying a
/// placeholder signature.
pub fn encoded_unsigned_transaction(payer: &Pubkey) -> String {
    let transaction = VersionedTransaction {
        signatures: vec![Signature::default()],
        message: message_for(payer, &[memo_instruction(*payer, b"swap")]),
    };
    BASE64_STANDARD.encode(bincode::serialize(&transaction).unwrap())
}

#[derive(Default)]
pub struct MockChain {
    pub blockhash_calls: AtomicUsize,
    pub simulate_calls: AtomicUsize,
    pub blockhashes: Mutex<Vec<Hash>>,
    pub sent: Mutex<Vec<VersionedTransaction>>,
    pub simulation_err: Option<serde_json::Value>,
    pub fail_blockhash: bool,
    pub fail_send: bool,
}

impl MockChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rejecting_simulation(err: serde_json::Value) -> Self {
        Self {
            simulation_err: Some(err),
            ..Self::default()
        }
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    pub fn simulate_count(&self) -> usize {
        self.simulate_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChainRpc for MockChain {
    async fn latest_blockhash(&self) -> Result<Hash, RpcError> {
        self.blockhash_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_blockhash {
            return Err(RpcError::Custom("node unavailable".into()));
        }
        let hash = Hash::new_unique();
        self.blockhashes.lock().unwrap().push(hash);
        Ok(hash)
    }

    async fn simulate(
        &self,
        _transaction: &VersionedTransaction,
    ) -> Result<SimulationOutcome, RpcError> {
        self.simulate_calls.fetch_add(1, Ordering::SeqCst);
        Ok(SimulationOutcome {
            err: self.simulation_err.clone(),
            logs: vec!["Program log: simulated".into()],
            units_consumed: Some(42_000),
        })
    }

    async fn send(&self, transaction: &VersionedTransaction) -> Result<Signature, RpcError> {
        if self.fail_send {
            return Err(RpcError::Custom("connection reset".into()));
        }
        self.sent.lock().unwrap().push(transaction.clone());
        Ok(transaction.signatures[0])
    }
}

/// Aggregator stand-in. Records requests and, unless given a canned
/// response, returns an unsigned transaction paid by the requesting wallet.
#[derive(Default)]
pub struct MockProvider {
    pub requests: Mutex<Vec<SwapTransactionRequest>>,
    pub canned: Option<SwapResponse>,
    pub fail: bool,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn responding(response: SwapResponse) -> Self {
        Self {
            canned: Some(response),
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn requests(&self) -> Vec<SwapTransactionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl SwapTransactionProvider for MockProvider {
    async fn swap_transaction(
        &self,
        request: &SwapTransactionRequest,
    ) -> Result<SwapResponse, ClientError> {
        self.requests.lock().unwrap().push(request.clone());
        if self.fail {
            return Err(ClientError::NoRoutesAvailable);
        }
        if let Some(canned) = &self.canned {
            return Ok(canned.clone());
        }
        Ok(SwapResponse {
            swap_transaction: encoded_unsigned_transaction(&request.user_pubkey),
            last_valid_block_height: Some(1_000),
            prioritization_fee_lamports: None,
        })
    }
}
