use crate::quote::{QuoteRequest, QuoteResponse, SwapMode};
use crate::swap::{
    SwapOptions, SwapRequest, SwapResponse, SwapTransactionProvider, SwapTransactionRequest,
};
use async_trait::async_trait;
use reqwest::Response;
use solana_sdk::pubkey::Pubkey;
use thiserror::Error;
use tracing::debug;

pub mod amount;
pub mod assembler;
pub mod cache;
pub mod config;
pub mod error;
pub mod executor;
pub mod intent;
pub mod quote;
pub mod rpc;
pub mod serde_helpers;
pub mod signer;
pub mod submit;
pub mod swap;

pub use amount::{AmountResolver, ResolvedAmount, ResolvedSwap, WSOL_MINT};
pub use assembler::TransactionAssembler;
pub use config::SwapConfig;
pub use error::{CompileError, LookupError, RpcError, SwapError};
pub use executor::SwapExecutor;
pub use intent::{AmountMode, SwapDirection, SwapIntent};
pub use signer::SignedTransaction;
pub use submit::{SubmissionMode, SubmissionResult, Submitter};

const JUPITER_API_URL: &str = "https://lite-api.jup.ag/swap/v1";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Request failed with status {status}: {body}")]
    RequestFailed {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("No routes available")]
    NoRoutesAvailable,
    #[error("Swap response is missing the transaction")]
    MissingTransaction,
    #[error("Transaction is not valid base64: {0}")]
    InvalidBase64(#[from] base64::DecodeError),
    #[error("Failed to decode transaction: {0}")]
    InvalidTransaction(#[from] bincode::Error),
}

pub struct JupiterClient {
    client: reqwest::Client,
    base_path: String,
    api_key: Option<String>,
}

impl JupiterClient {
    pub fn new(api_key: Option<String>, base_path: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_path: base_path.unwrap_or_else(|| JUPITER_API_URL.to_string()),
            api_key,
        }
    }

    fn request(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => builder.header("x-api-key", key),
            None => builder,
        }
    }

    pub async fn quote(&self, request: &QuoteRequest) -> Result<QuoteResponse, ClientError> {
        let params = quote::build_query_params(request);
        let response = self
            .request(self.client.get(format!("{}/quote", self.base_path)))
            .query(&params)
            .header("Accept", "application/json")
            .send()
            .await?;

        let response = check_response(response).await?;
        let quote: QuoteResponse = response.json().await?;

        if quote.route_plan.is_empty() {
            return Err(ClientError::NoRoutesAvailable);
        }

        debug!(
            "Quote {} -> {}: {} in, {} out over {} step(s)",
            quote.input_mint,
            quote.output_mint,
            quote.in_amount,
            quote.out_amount,
            quote.route_plan.len()
        );

        Ok(quote)
    }

    pub async fn swap(
        &self,
        user_pubkey: Pubkey,
        quote: &QuoteResponse,
        options: &SwapOptions,
    ) -> Result<SwapResponse, ClientError> {
        let body = SwapRequest::new(user_pubkey, quote, options);
        let response = self
            .request(self.client.post(format!("{}/swap", self.base_path)))
            .json(&body)
            .send()
            .await?;

        let response = check_response(response).await?;
        let swap: SwapResponse = response.json().await?;

        if swap.swap_transaction.is_empty() {
            return Err(ClientError::MissingTransaction);
        }

        Ok(swap)
    }
}

#[async_trait]
impl SwapTransactionProvider for JupiterClient {
    async fn swap_transaction(
        &self,
        request: &SwapTransactionRequest,
    ) -> Result<SwapResponse, ClientError> {
        let quote = self
            .quote(&QuoteRequest {
                input_mint: request.input_mint,
                output_mint: request.output_mint,
                amount: request.amount,
                swap_mode: Some(SwapMode::ExactIn),
                slippage_bps: request.slippage_bps,
                ..Default::default()
            })
            .await?;

        let options = SwapOptions {
            compute_unit_price: request.compute_unit_price,
            priority_submission: request.priority_submission,
        };
        self.swap(request.user_pubkey, &quote, &options).await
    }
}

async fn check_response(response: Response) -> Result<Response, ClientError> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    if is_no_route(status, &body) {
        return Err(ClientError::NoRoutesAvailable);
    }

    Err(ClientError::RequestFailed { status, body })
}

fn is_no_route(status: reqwest::StatusCode, body: &str) -> bool {
    match status {
        reqwest::StatusCode::NOT_FOUND => true,
        reqwest::StatusCode::BAD_REQUEST => {
            body.contains("COULD_NOT_FIND_ANY_ROUTE") || body.contains("No routes")
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn no_route_detection() {
        assert!(is_no_route(StatusCode::NOT_FOUND, ""));
        assert!(is_no_route(
            StatusCode::BAD_REQUEST,
            r#"{"error":"Could not find any route","errorCode":"COULD_NOT_FIND_ANY_ROUTE"}"#
        ));
        assert!(!is_no_route(StatusCode::BAD_REQUEST, r#"{"error":"bad mint"}"#));
        assert!(!is_no_route(StatusCode::INTERNAL_SERVER_ERROR, "No routes"));
    }

    #[test]
    fn default_base_path() {
        let client = JupiterClient::new(None, None);
        assert_eq!(client.base_path, JUPITER_API_URL);

        let client = JupiterClient::new(Some("k".into()), Some("http://localhost:8080".into()));
        assert_eq!(client.base_path, "http://localhost:8080");
    }
}
