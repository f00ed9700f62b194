// src/handlers/history.rs
use chrono::Utc;
use log::info;
use serde::Deserialize;
use warp::reply::Json;
use warp::Rejection;

use crate::services::history::{performance_comparison, projected_returns, year_to_date};
use crate::services::reference_data::historical_monthly_data;
use super::error::ApiError;

pub const DEFAULT_PROJECTION_DAYS: u32 = 30;
pub const MAX_PROJECTION_DAYS: u32 = 365;

#[derive(Debug, Default, Deserialize)]
pub struct ProjectionQuery {
    pub days: Option<u32>,
}

pub async fn get_monthly_history() -> Result<Json, Rejection> {
    Ok(warp::reply::json(&historical_monthly_data()))
}

pub async fn get_year_to_date() -> Result<Json, Rejection> {
    info!("Handling request for year-to-date averages");
    Ok(warp::reply::json(&year_to_date(&historical_monthly_data())))
}

pub async fn get_projection(query: ProjectionQuery) -> Result<Json, Rejection> {
    let days = query.days.unwrap_or(DEFAULT_PROJECTION_DAYS);
    info!("Handling request for a {} day projection", days);

    if days > MAX_PROJECTION_DAYS {
        return Err(warp::reject::custom(ApiError::bad_request(format!(
            "days must be at most {}",
            MAX_PROJECTION_DAYS
        ))));
    }

    let points = projected_returns(&historical_monthly_data(), days, Utc::now().date_naive());
    Ok(warp::reply::json(&points))
}

pub async fn get_performance() -> Result<Json, Rejection> {
    Ok(warp::reply::json(&performance_comparison(&historical_monthly_data())))
}
