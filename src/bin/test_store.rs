use lqdt_dashboard::config::AppConfig;
use lqdt_dashboard::services::store::DataStore;
use log::{info, warn};
use env_logger;
use dotenv::dotenv;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init();

    info!("Testing hosted data store connectivity and table reads...");

    let config = AppConfig::from_env()?;
    if config.hosted_store.is_none() {
        warn!("SUPABASE_URL / SUPABASE_ANON_KEY not set, reading the static tables instead");
    }
    let store = DataStore::from_config(config.hosted_store.as_ref());

    let quotes = store.fetch_bank_quotes().await;
    info!("✓ bank_quotes: {} rows", quotes.len());
    for quote in &quotes {
        info!("  {} {} {:.3}% ({} days)", quote.bank_name, quote.quote_type, quote.rate, quote.duration_days);
    }

    let deposits = store.fetch_deposit_quotes().await;
    info!("✓ deposit_quotes: {} rows", deposits.len());

    let history = store.fetch_transaction_history().await;
    info!("✓ transaction_history: {} rows", history.len());
    for entry in history.iter().take(5) {
        info!("  {} {} {} ({})", entry.execution_date, entry.transaction_type, entry.amount, entry.status.label());
    }

    if quotes.is_empty() && deposits.is_empty() && history.is_empty() {
        warn!("⚠ Every table came back empty, check the store URL and key");
    }

    Ok(())
}
