// src/handlers/strategies.rs
use chrono::Utc;
use log::{info, warn};
use serde::Deserialize;
use warp::reply::Json;
use warp::Rejection;

use crate::models::DailyTransaction;
use crate::services::calculations::{strategy_projections, strategy_timeline};
use crate::services::reference_data::daily_transactions;
use super::error::ApiError;
use super::history::{DEFAULT_PROJECTION_DAYS, MAX_PROJECTION_DAYS};

#[derive(Debug, Default, Deserialize)]
pub struct TimelineQuery {
    pub strategy: Option<u32>,
    pub days: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct ProjectionQuery {
    pub amount: f64,
    pub days: u32,
}

pub async fn get_strategies(query: ProjectionQuery) -> Result<Json, Rejection> {
    info!("Handling request for strategies on {} over {} days", query.amount, query.days);

    if !query.amount.is_finite() {
        return Err(warp::reject::custom(ApiError::bad_request("amount must be a finite number")));
    }
    Ok(warp::reply::json(&strategy_projections(query.amount, f64::from(query.days))))
}

fn find_incoming(id: u32) -> Result<DailyTransaction, Rejection> {
    daily_transactions()
        .into_iter()
        .find(|t| t.id == id)
        .ok_or_else(|| {
            warn!("Incoming transaction {} not found", id);
            warp::reject::custom(ApiError::not_found(format!("No incoming transaction with id {}", id)))
        })
}

/// Strategies for an incoming payment, held until it is due.
pub async fn get_transaction_strategies(id: u32) -> Result<Json, Rejection> {
    info!("Handling request for strategies on incoming transaction {}", id);

    let transaction = find_incoming(id)?;

    Ok(warp::reply::json(&serde_json::json!({
        "transaction": transaction,
        "strategies": strategy_projections(transaction.amount, f64::from(transaction.days_to_payment)),
    })))
}

/// Day-by-day value of an incoming payment placed in one strategy. Without a
/// strategy the payment earns nothing.
pub async fn get_transaction_timeline(id: u32, query: TimelineQuery) -> Result<Json, Rejection> {
    let days = query.days.unwrap_or(DEFAULT_PROJECTION_DAYS);
    info!("Handling timeline request for incoming transaction {} over {} days", id, days);

    if days > MAX_PROJECTION_DAYS {
        return Err(warp::reject::custom(ApiError::bad_request(format!(
            "days must be at most {}",
            MAX_PROJECTION_DAYS
        ))));
    }
    let transaction = find_incoming(id)?;

    let daily_return = match query.strategy {
        Some(strategy_id) => {
            let projection = strategy_projections(transaction.amount, f64::from(days))
                .into_iter()
                .find(|p| p.strategy.id == strategy_id)
                .ok_or_else(|| {
                    warp::reject::custom(ApiError::not_found(format!("No strategy with id {}", strategy_id)))
                })?;
            projection.daily_return
        }
        None => 0.0,
    };

    let timeline = strategy_timeline(transaction.amount, daily_return, days, Utc::now().date_naive());
    Ok(warp::reply::json(&serde_json::json!({
        "transaction": transaction,
        "strategy": query.strategy,
        "timeline": timeline,
    })))
}
