// src/handlers/transactions.rs
use std::sync::Arc;

use log::info;
use warp::reply::Json;
use warp::Rejection;

use crate::services::reference_data::{daily_transactions, projected_transactions};
use crate::state::AppState;

pub async fn get_deposits(state: Arc<AppState>) -> Result<Json, Rejection> {
    info!("Handling request to get deposit quotes");
    let deposits = state.store.fetch_deposit_quotes().await;
    Ok(warp::reply::json(&deposits))
}

pub async fn get_transaction_history(state: Arc<AppState>) -> Result<Json, Rejection> {
    info!("Handling request to get transaction history");
    let history = state.store.fetch_transaction_history().await;
    Ok(warp::reply::json(&history))
}

pub async fn get_daily_transactions() -> Result<Json, Rejection> {
    Ok(warp::reply::json(&daily_transactions()))
}

pub async fn get_projected_transactions() -> Result<Json, Rejection> {
    Ok(warp::reply::json(&projected_transactions()))
}
