// src/services/store.rs
use log::{error, info, warn};
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::config::HostedStoreConfig;
use crate::models::{BankQuote, DepositQuote, TransactionHistory};
use crate::BoxError;
use super::reference_data;

pub const BANK_QUOTES_TABLE: &str = "bank_quotes";
pub const DEPOSIT_QUOTES_TABLE: &str = "deposit_quotes";
pub const TRANSACTION_HISTORY_TABLE: &str = "transaction_history";

/// REST client for the hosted quote tables.
pub struct HostedStore {
    config: HostedStoreConfig,
    client: Client,
}

impl HostedStore {
    pub fn new(config: HostedStoreConfig) -> Self {
        HostedStore {
            config,
            client: Client::new(),
        }
    }

    pub fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.config.url, table)
    }

    pub async fn fetch_table<T: DeserializeOwned>(&self, table: &str) -> Result<Vec<T>, BoxError> {
        let url = self.table_url(table);
        info!("Fetching hosted table from URL: {}", url);

        let rows = self.client
            .get(&url)
            .query(&[("select", "*")])
            .header("apikey", &self.config.anon_key)
            .bearer_auth(&self.config.anon_key)
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<T>>()
            .await?;

        info!("Fetched {} rows from {}", rows.len(), table);
        Ok(rows)
    }

    // Failures are logged and read as an empty table.
    async fn fetch_or_empty<T: DeserializeOwned>(&self, table: &str) -> Vec<T> {
        match self.fetch_table(table).await {
            Ok(rows) => rows,
            Err(e) => {
                error!("Failed to fetch {}: {}", table, e);
                Vec::new()
            }
        }
    }
}

/// Source of the quote and transaction tables.
pub enum DataStore {
    Static,
    Hosted(HostedStore),
}

impl DataStore {
    pub fn from_config(config: Option<&HostedStoreConfig>) -> Self {
        match config {
            Some(config) => {
                info!("Using hosted data store at {}", config.url);
                DataStore::Hosted(HostedStore::new(config.clone()))
            }
            None => {
                warn!("Hosted data store not configured, serving static reference data");
                DataStore::Static
            }
        }
    }

    pub async fn fetch_bank_quotes(&self) -> Vec<BankQuote> {
        match self {
            DataStore::Static => reference_data::bank_quotes(),
            DataStore::Hosted(store) => store.fetch_or_empty(BANK_QUOTES_TABLE).await,
        }
    }

    pub async fn fetch_deposit_quotes(&self) -> Vec<DepositQuote> {
        match self {
            DataStore::Static => reference_data::deposit_quotes(),
            DataStore::Hosted(store) => store.fetch_or_empty(DEPOSIT_QUOTES_TABLE).await,
        }
    }

    pub async fn fetch_transaction_history(&self) -> Vec<TransactionHistory> {
        match self {
            DataStore::Static => reference_data::transaction_history(),
            DataStore::Hosted(store) => store.fetch_or_empty(TRANSACTION_HISTORY_TABLE).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unreachable_store() -> DataStore {
        // Port 9 (discard) on localhost refuses connections on any normal host.
        DataStore::from_config(Some(&HostedStoreConfig {
            url: "http://127.0.0.1:9".to_string(),
            anon_key: "anon".to_string(),
        }))
    }

    #[test]
    fn table_urls() {
        let store = HostedStore::new(HostedStoreConfig {
            url: "https://example.supabase.co".to_string(),
            anon_key: "anon".to_string(),
        });
        assert_eq!(store.table_url(BANK_QUOTES_TABLE), "https://example.supabase.co/rest/v1/bank_quotes");
    }

    #[tokio::test]
    async fn static_store_serves_reference_data() {
        let store = DataStore::from_config(None);
        assert_eq!(store.fetch_bank_quotes().await.len(), reference_data::bank_quotes().len());
        assert!(!store.fetch_deposit_quotes().await.is_empty());
        assert!(!store.fetch_transaction_history().await.is_empty());
    }

    #[tokio::test]
    async fn unreachable_store_reads_as_empty() {
        let store = unreachable_store();
        assert!(store.fetch_bank_quotes().await.is_empty());
        assert!(store.fetch_deposit_quotes().await.is_empty());
        assert!(store.fetch_transaction_history().await.is_empty());
    }
}
