// src/services/calculations.rs
use chrono::{Duration, NaiveDate};
use serde::Serialize;
use log::warn;
use crate::models::{CalculationResult, RateSource, ReturnBreakdown, StrategyOption};
use crate::services::reference_data::{
    find_calculator_strategy, ALLOCATION_STRATEGIES, FALLBACK_STRATEGY_RATE,
};

pub const DAYS_PER_YEAR: f64 = 365.0;

/// Simple-interest return for `duration_days` plus the compounded
/// effective annual rate. `None` when any input is not finite.
pub fn compute(principal: f64, duration_days: f64, annual_rate_percent: f64) -> Option<CalculationResult> {
    if !principal.is_finite() || !duration_days.is_finite() || !annual_rate_percent.is_finite() {
        return None;
    }

    let daily_rate = annual_rate_percent / 100.0 / DAYS_PER_YEAR;
    let daily_return = principal * daily_rate;
    let total_return = daily_return * duration_days;
    let final_amount = principal + total_return;
    let effective_annual_rate = ((1.0 + daily_rate).powf(DAYS_PER_YEAR) - 1.0) * 100.0;

    Some(CalculationResult {
        daily_return,
        total_return,
        final_amount,
        effective_annual_rate,
    })
}

impl CalculationResult {
    pub fn breakdown(&self, principal: f64) -> ReturnBreakdown {
        ReturnBreakdown {
            weekly_return: self.daily_return * 7.0,
            monthly_return: self.daily_return * 30.0,
            daily_roi_percent: self.daily_return / principal * 100.0,
            period_roi_percent: self.total_return / principal * 100.0,
            profit: self.final_amount - principal,
        }
    }
}

/// Annual rate feeding [`compute`] for the selected source.
pub fn resolve_rate(source: &RateSource) -> f64 {
    match source {
        RateSource::Manual(rate) => *rate,
        RateSource::Strategy(id) => match find_calculator_strategy(id) {
            Some(strategy) => strategy.annual_rate,
            None => {
                warn!("Unknown calculator strategy '{}', using {}%", id, FALLBACK_STRATEGY_RATE);
                FALLBACK_STRATEGY_RATE
            }
        },
    }
}

pub fn compute_with_source(principal: f64, duration_days: f64, source: &RateSource) -> Option<CalculationResult> {
    compute(principal, duration_days, resolve_rate(source))
}

// Length of the longest leading run of `text` that reads as a decimal number.
fn numeric_prefix_len(text: &str, allow_fraction: bool) -> usize {
    let bytes = text.as_bytes();
    let mut idx = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        idx += 1;
    }
    let digits_start = idx;
    while idx < bytes.len() && bytes[idx].is_ascii_digit() {
        idx += 1;
    }
    let mut digits = idx - digits_start;
    if !allow_fraction {
        return if digits > 0 { idx } else { 0 };
    }

    if idx < bytes.len() && bytes[idx] == b'.' {
        let frac_start = idx + 1;
        let mut end = frac_start;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        if digits > 0 || end > frac_start {
            digits += end - frac_start;
            idx = end;
        }
    }
    if digits == 0 {
        return 0;
    }

    if idx < bytes.len() && (bytes[idx] == b'e' || bytes[idx] == b'E') {
        let mut end = idx + 1;
        if end < bytes.len() && (bytes[end] == b'+' || bytes[end] == b'-') {
            end += 1;
        }
        let exp_start = end;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        if end > exp_start {
            idx = end;
        }
    }
    idx
}

/// Reads a form value the way the calculator's text inputs do: leading
/// whitespace is skipped and trailing garbage ignored. Unparsable text is NaN.
pub fn parse_amount(text: &str) -> f64 {
    let trimmed = text.trim_start();
    let len = numeric_prefix_len(trimmed, true);
    trimmed[..len].parse().unwrap_or(f64::NAN)
}

/// Integer counterpart of [`parse_amount`]; `"30.9"` reads as 30.
pub fn parse_days(text: &str) -> f64 {
    let trimmed = text.trim_start();
    let len = numeric_prefix_len(trimmed, false);
    trimmed[..len].parse::<i64>().map(|d| d as f64).unwrap_or(f64::NAN)
}

#[derive(Debug, Clone, Serialize)]
pub struct StrategyProjection {
    #[serde(flatten)]
    pub strategy: &'static StrategyOption,
    pub expected_return: f64,
    pub daily_return: f64,
}

/// Expected return of each allocation strategy for funds held `days` days.
pub fn strategy_projections(amount: f64, days: f64) -> Vec<StrategyProjection> {
    ALLOCATION_STRATEGIES
        .iter()
        .map(|strategy| StrategyProjection {
            strategy,
            expected_return: amount * (strategy.annual_rate / 100.0) * (days / DAYS_PER_YEAR),
            daily_return: amount * (strategy.annual_rate / 100.0) / DAYS_PER_YEAR,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelinePoint {
    pub date: NaiveDate,
    pub day: u32,
    pub principal: f64,
    #[serde(rename = "return")]
    pub accrued_return: f64,
    pub total: f64,
}

/// `amount` accruing `daily_return` per day, one point for each day from
/// `start` through `start + days`.
pub fn strategy_timeline(amount: f64, daily_return: f64, days: u32, start: NaiveDate) -> Vec<TimelinePoint> {
    (0..=days)
        .map(|day| {
            let accrued_return = daily_return * f64::from(day);
            TimelinePoint {
                date: start + Duration::days(i64::from(day)),
                day,
                principal: amount,
                accrued_return,
                total: amount + accrued_return,
            }
        })
        .collect()
}
