use std::{str::FromStr, sync::Arc};

use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{
    pubkey::Pubkey,
    signature::{Keypair, Signer},
};
use swap_executor::{
    cache::InMemoryCache, config::compute_unit_price_for_fee, AmountMode, JupiterClient,
    SwapConfig, SwapDirection, SwapExecutor, SwapIntent,
};
use tracing_subscriber::EnvFilter;

const BONK_MINT: &str = "DezXAZ8z7PnrnRJjz3wXBoRgixCa6xjnB7YaB1pPB263";
const BONK_DECIMALS: u8 = 5;
const SLIPPAGE_BPS: u16 = 250;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::from_path("demos/.env").ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let private_key = std::env::var("PRIVATE_KEY")
        .expect("PRIVATE_KEY environment variable must be set (base58 encoded)");
    let rpc_url = std::env::var("RPC_URL")
        .unwrap_or_else(|_| "https://api.mainnet-beta.solana.com".to_string());
    let api_key = std::env::var("JUPITER_API_KEY").ok().filter(|s| !s.is_empty());
    let base_url = std::env::var("JUPITER_BASE_URL")
        .ok()
        .filter(|s| !s.is_empty());
    let direction = std::env::var("SWAP_DIRECTION")
        .unwrap_or_else(|_| "buy".to_string())
        .parse::<SwapDirection>()?;
    let ui_amount = std::env::var("SWAP_AMOUNT")
        .unwrap_or_else(|_| "0.01".to_string())
        .parse::<f64>()?;
    let priority_fee_lamports = std::env::var("PRIORITY_FEE_LAMPORTS")
        .ok()
        .map(|fee| fee.parse::<u64>())
        .transpose()?;
    let send_tx = std::env::var("SWAP_SEND_TX")
        .unwrap_or_else(|_| "false".to_string())
        .parse::<bool>()
        .unwrap_or(false);

    let keypair = Keypair::from_base58_string(&private_key);
    let token = Pubkey::from_str(BONK_MINT)?;
    let config = SwapConfig::from_env()?;

    let cache = Arc::new(InMemoryCache::new());
    cache.insert_token(token, BONK_DECIMALS);

    let mut intent = match direction {
        SwapDirection::Buy => SwapIntent::buy(token, ui_amount, SLIPPAGE_BPS),
        SwapDirection::Sell => {
            SwapIntent::sell(token, ui_amount, AmountMode::Quantity, SLIPPAGE_BPS)
        }
    };
    if let Some(fee) = priority_fee_lamports {
        intent = intent
            .with_compute_unit_price(compute_unit_price_for_fee(fee, config.compute_unit_limit));
    }

    let executor = SwapExecutor::new(
        Arc::new(RpcClient::new(rpc_url)),
        Arc::new(JupiterClient::new(api_key, base_url)),
        cache.clone(),
        cache,
        config,
    );

    let signed = executor.build_swap_transaction(&intent, &keypair).await?;
    println!(
        "Built {:?} of {} for {}: {} instruction(s), signature {}",
        intent.direction(),
        token,
        keypair.pubkey(),
        signed.transaction().message.instructions().len(),
        signed.signature()
    );

    if !send_tx {
        println!("\nSet SWAP_SEND_TX=true to actually send the transaction");
        return Ok(());
    }

    println!("\nSending transaction...");
    let result = executor.execute(&intent, &keypair).await?;

    println!(
        "\nTransaction sent: {} ({:?})",
        result.signature, result.elapsed
    );
    println!("Explorer: https://solscan.io/tx/{}", result.signature);

    Ok(())
}
