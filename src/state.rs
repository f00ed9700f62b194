// src/state.rs
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::AppConfig;
use crate::services::quote_feed::QuoteFeed;
use crate::services::store::DataStore;

/// Shared by every handler. Owns the running quote feed, so dropping the
/// state tears the feed down.
pub struct AppState {
    pub feed: QuoteFeed,
    pub store: DataStore,
}

impl AppState {
    /// Seeds the feed from the configured store. Must run inside a tokio runtime.
    pub async fn start(config: &AppConfig) -> Self {
        let store = DataStore::from_config(config.hosted_store.as_ref());
        let seeds = store.fetch_bank_quotes().await;
        info!("Loaded {} bank quotes to seed the feed", seeds.len());

        let rng = match config.feed_seed {
            Some(seed) => {
                info!("Quote feed seeded with {}", seed);
                StdRng::seed_from_u64(seed)
            }
            None => StdRng::from_entropy(),
        };

        AppState {
            feed: QuoteFeed::spawn(&seeds, rng, config.feed_live),
            store,
        }
    }
}
