// src/handlers/quotes.rs
use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};
use warp::reply::Json;
use warp::Rejection;

use crate::models::QuoteRecord;
use crate::services::format::{format_clock, format_currency, format_rate, format_signed, format_volume};
use crate::services::quote_feed::{summarize, MarketSummary};
use crate::state::AppState;

/// A record plus the strings the quotes board shows for it.
#[derive(Debug, Serialize)]
pub struct QuoteView<'a> {
    #[serde(flatten)]
    pub record: &'a QuoteRecord,
    pub category_label: &'static str,
    pub rate_display: String,
    pub change_display: String,
    pub change_percent_display: String,
    pub volume_display: String,
    pub amount_range_display: String,
    pub last_update_display: String,
}

impl<'a> From<&'a QuoteRecord> for QuoteView<'a> {
    fn from(record: &'a QuoteRecord) -> Self {
        QuoteView {
            record,
            category_label: record.category.label(),
            rate_display: format_rate(record.current_rate),
            change_display: format_signed(record.change, 3),
            change_percent_display: format!("{}%", format_signed(record.change_percent, 2)),
            volume_display: format_volume(record.volume),
            amount_range_display: format!(
                "{} - {}",
                format_currency(record.amount_min),
                format_currency(record.amount_max)
            ),
            last_update_display: format_clock(record.last_update),
        }
    }
}

#[derive(Debug, Serialize)]
struct QuotesResponse<'a> {
    live: bool,
    ticks: u64,
    last_update: Option<DateTime<Utc>>,
    summary: MarketSummary,
    quotes: Vec<QuoteView<'a>>,
}

#[derive(Debug, Deserialize)]
pub struct LiveToggle {
    pub live: bool,
}

pub async fn get_quotes(state: Arc<AppState>) -> Result<Json, Rejection> {
    info!("Handling request to get live quotes");
    let snapshot = state.feed.snapshot();

    Ok(warp::reply::json(&QuotesResponse {
        live: snapshot.live,
        ticks: snapshot.ticks,
        last_update: snapshot.last_update,
        summary: summarize(&snapshot.records),
        quotes: snapshot.records.iter().map(QuoteView::from).collect(),
    }))
}

pub async fn get_live(state: Arc<AppState>) -> Result<Json, Rejection> {
    Ok(warp::reply::json(&serde_json::json!({
        "live": state.feed.is_live(),
    })))
}

pub async fn set_live(toggle: LiveToggle, state: Arc<AppState>) -> Result<Json, Rejection> {
    info!("Handling request to set quote feed live = {}", toggle.live);
    state.feed.set_live(toggle.live);

    // The feed task applies the command asynchronously; report what was asked for.
    Ok(warp::reply::json(&serde_json::json!({
        "live": toggle.live,
    })))
}
