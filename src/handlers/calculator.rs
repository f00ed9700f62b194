// src/handlers/calculator.rs
use log::{debug, info};
use serde::{Deserialize, Serialize};
use warp::reply::Json;
use warp::Rejection;

use crate::models::{CalculationResult, RateSource, RateSourceKind, ReturnBreakdown};
use crate::services::calculations::{compute_with_source, parse_amount, parse_days, resolve_rate};
use crate::services::format::{format_currency, format_rate};
use crate::services::reference_data::CALCULATOR_STRATEGIES;

/// Raw form values; parsed leniently so the widget's text boxes map 1:1.
#[derive(Debug, Default, Deserialize)]
pub struct CalculatorQuery {
    pub amount: Option<String>,
    pub days: Option<String>,
    pub rate: Option<String>,
    pub source: Option<RateSourceKind>,
    pub strategy: Option<String>,
}

impl CalculatorQuery {
    pub fn rate_source(&self) -> RateSource {
        match self.source.unwrap_or(RateSourceKind::Manual) {
            RateSourceKind::Manual => RateSource::Manual(parse_amount(self.rate.as_deref().unwrap_or(""))),
            RateSourceKind::Strategy => RateSource::Strategy(self.strategy.clone().unwrap_or_default()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CalculationView {
    pub principal: f64,
    pub duration_days: f64,
    pub annual_rate: f64,
    #[serde(flatten)]
    pub result: CalculationResult,
    pub breakdown: ReturnBreakdown,
    pub final_amount_display: String,
    pub total_return_display: String,
    pub effective_annual_rate_display: String,
}

pub fn calculate(query: &CalculatorQuery) -> Option<CalculationView> {
    let principal = parse_amount(query.amount.as_deref().unwrap_or(""));
    let duration_days = parse_days(query.days.as_deref().unwrap_or(""));
    let source = query.rate_source();
    let result = compute_with_source(principal, duration_days, &source)?;
    let annual_rate = resolve_rate(&source);

    Some(CalculationView {
        principal,
        duration_days,
        annual_rate,
        result,
        breakdown: result.breakdown(principal),
        final_amount_display: format_currency(result.final_amount),
        total_return_display: format_currency(result.total_return),
        effective_annual_rate_display: format_rate(result.effective_annual_rate),
    })
}

pub async fn get_calculation(query: CalculatorQuery) -> Result<Json, Rejection> {
    info!("Handling calculator request: {:?}", query);
    let view = calculate(&query);
    if view.is_none() {
        debug!("Calculator inputs not numeric, returning no result");
    }
    Ok(warp::reply::json(&serde_json::json!({ "result": view })))
}

pub async fn get_calculator_strategies() -> Result<Json, Rejection> {
    Ok(warp::reply::json(&CALCULATOR_STRATEGIES))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(amount: &str, days: &str, rate: &str) -> CalculatorQuery {
        CalculatorQuery {
            amount: Some(amount.to_string()),
            days: Some(days.to_string()),
            rate: Some(rate.to_string()),
            ..CalculatorQuery::default()
        }
    }

    #[test]
    fn manual_rate_is_default_source() {
        let view = calculate(&query("1000000", "30", "4.2")).expect("numeric inputs");
        assert_eq!(view.annual_rate, 4.2);
        assert_eq!(view.final_amount_display, "₪1,003,452");
        assert_eq!(view.total_return_display, "₪3,452");
    }

    #[test]
    fn missing_or_garbage_inputs_give_nothing() {
        assert!(calculate(&CalculatorQuery::default()).is_none());
        assert!(calculate(&query("abc", "30", "4.2")).is_none());
        assert!(calculate(&query("1000", "", "4.2")).is_none());
    }

    #[test]
    fn strategy_source_ignores_typed_rate() {
        let mut q = query("1000000", "30", "99");
        q.source = Some(RateSourceKind::Strategy);
        q.strategy = Some("government_bonds".to_string());
        let view = calculate(&q).expect("numeric inputs");
        assert_eq!(view.annual_rate, 3.9);
    }
}
