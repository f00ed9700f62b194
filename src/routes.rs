// src/routes.rs
use std::sync::Arc;
use warp::reject::Rejection;
use crate::handlers::{
    calculator::{get_calculation, get_calculator_strategies, CalculatorQuery},
    history::{get_monthly_history, get_performance, get_projection, get_year_to_date, ProjectionQuery},
    quotes::{get_live, get_quotes, set_live},
    strategies::{get_strategies, get_transaction_strategies, get_transaction_timeline},
    transactions::{get_daily_transactions, get_deposits, get_projected_transactions, get_transaction_history},
};
use crate::state::AppState;
use log::{debug, info};

use std::convert::Infallible;
use warp::http::StatusCode;
use warp::{Filter, Reply};
use crate::handlers::error::ApiError;

async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let code;
    let message;

    if err.is_not_found() {
        code = StatusCode::NOT_FOUND;
        message = "Not Found".to_string();
    } else if let Some(api_error) = err.find::<ApiError>() {
        code = api_error.status();
        message = api_error.message.clone();
    } else if let Some(e) = err.find::<warp::reject::InvalidQuery>() {
        code = StatusCode::BAD_REQUEST;
        message = e.to_string();
    } else if let Some(e) = err.find::<warp::filters::body::BodyDeserializeError>() {
        code = StatusCode::BAD_REQUEST;
        message = e.to_string();
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        code = StatusCode::METHOD_NOT_ALLOWED;
        message = "Method Not Allowed".to_string();
    } else {
        code = StatusCode::INTERNAL_SERVER_ERROR;
        message = "Internal Server Error".to_string();
    }
    debug!("Rejected request with {}: {}", code, message);

    Ok(warp::reply::with_status(
        warp::reply::json(&serde_json::json!({
            "error": message,
        })),
        code,
    ))
}

pub fn routes(state: Arc<AppState>) -> impl Filter<Extract = impl Reply, Error = Infallible> + Clone {
    info!("Configuring routes...");

    let state_filter = warp::any().map(move || state.clone());

    let quotes_route = warp::path!("api" / "v1" / "quotes")
        .and(warp::get())
        .and(state_filter.clone())
        .and_then(get_quotes);

    let live_get_route = warp::path!("api" / "v1" / "quotes" / "live")
        .and(warp::get())
        .and(state_filter.clone())
        .and_then(get_live);

    let live_set_route = warp::path!("api" / "v1" / "quotes" / "live")
        .and(warp::post())
        .and(warp::body::content_length_limit(1024))
        .and(warp::body::json())
        .and(state_filter.clone())
        .and_then(set_live);

    let calculator_route = warp::path!("api" / "v1" / "calculator")
        .and(warp::get())
        .and(warp::query::<CalculatorQuery>())
        .and_then(get_calculation);

    let calculator_strategies_route = warp::path!("api" / "v1" / "calculator" / "strategies")
        .and(warp::get())
        .and_then(get_calculator_strategies);

    let strategies_route = warp::path!("api" / "v1" / "strategies")
        .and(warp::get())
        .and(warp::query())
        .and_then(get_strategies);

    let deposits_route = warp::path!("api" / "v1" / "deposits")
        .and(warp::get())
        .and(state_filter.clone())
        .and_then(get_deposits);

    let history_route = warp::path!("api" / "v1" / "transactions" / "history")
        .and(warp::get())
        .and(state_filter.clone())
        .and_then(get_transaction_history);

    let daily_route = warp::path!("api" / "v1" / "transactions" / "daily")
        .and(warp::get())
        .and_then(get_daily_transactions);

    let daily_strategies_route = warp::path!("api" / "v1" / "transactions" / "daily" / u32 / "strategies")
        .and(warp::get())
        .and_then(get_transaction_strategies);

    let daily_timeline_route = warp::path!("api" / "v1" / "transactions" / "daily" / u32 / "timeline")
        .and(warp::get())
        .and(warp::query())
        .and_then(get_transaction_timeline);

    let projected_route = warp::path!("api" / "v1" / "transactions" / "projected")
        .and(warp::get())
        .and_then(get_projected_transactions);

    let monthly_route = warp::path!("api" / "v1" / "history" / "monthly")
        .and(warp::get())
        .and_then(get_monthly_history);

    let ytd_route = warp::path!("api" / "v1" / "history" / "ytd")
        .and(warp::get())
        .and_then(get_year_to_date);

    let projection_route = warp::path!("api" / "v1" / "history" / "projection")
        .and(warp::get())
        .and(warp::query::<ProjectionQuery>())
        .and_then(get_projection);

    let performance_route = warp::path!("api" / "v1" / "history" / "performance")
        .and(warp::get())
        .and_then(get_performance);

    info!("All routes configured successfully.");

    quotes_route
        .or(live_get_route)
        .or(live_set_route)
        .or(calculator_route)
        .or(calculator_strategies_route)
        .or(strategies_route)
        .or(deposits_route)
        .or(history_route)
        .or(daily_route)
        .or(daily_strategies_route)
        .or(daily_timeline_route)
        .or(projected_route)
        .or(monthly_route)
        .or(ytd_route)
        .or(projection_route)
        .or(performance_route)
        .recover(handle_rejection)
}
