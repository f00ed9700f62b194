// src/services/history.rs
use chrono::{Duration, NaiveDate};
use serde::Serialize;
use crate::models::MonthlyData;
use super::calculations::DAYS_PER_YEAR;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ChannelFigures {
    pub current_account: f64,
    pub bank_deposits: f64,
    pub lqdt_system: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct YearToDate {
    pub averages: ChannelFigures,
    pub total_returns: ChannelFigures,
    pub annual_rates: ChannelFigures,
    pub months_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectedPoint {
    pub date: NaiveDate,
    pub day: u32,
    pub current_account: f64,
    pub bank_deposits: f64,
    pub lqdt_system: f64,
    pub total_funds: f64,
    pub current_account_return: f64,
    pub bank_deposits_return: f64,
    pub lqdt_system_return: f64,
    pub total_return: f64,
    pub cumulative_total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChannelPerformance {
    pub name: &'static str,
    pub avg_amount: f64,
    pub annual_rate: f64,
    pub total_return: f64,
    pub color: &'static str,
    pub efficiency: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceComparison {
    pub current_account: ChannelPerformance,
    pub bank_deposits: ChannelPerformance,
    pub lqdt_system: ChannelPerformance,
    pub overall: ChannelPerformance,
}

fn average(values: impl Iterator<Item = f64>, count: f64) -> f64 {
    values.sum::<f64>() / count
}

// Total return over the window scaled to a twelve-month rate, in percent.
fn annualize(total_return: f64, average_balance: f64, months: f64) -> f64 {
    if average_balance == 0.0 {
        0.0
    } else {
        (total_return / average_balance) * (12.0 / months) * 100.0
    }
}

pub fn year_to_date(data: &[MonthlyData]) -> YearToDate {
    if data.is_empty() {
        return YearToDate::default();
    }
    let months = data.len() as f64;

    let averages = ChannelFigures {
        current_account: average(data.iter().map(|m| m.current_account), months),
        bank_deposits: average(data.iter().map(|m| m.bank_deposits), months),
        lqdt_system: average(data.iter().map(|m| m.lqdt_system), months),
        total: average(data.iter().map(|m| m.total_funds), months),
    };
    let total_returns = ChannelFigures {
        current_account: data.iter().map(|m| m.current_account_return).sum(),
        bank_deposits: data.iter().map(|m| m.bank_deposits_return).sum(),
        lqdt_system: data.iter().map(|m| m.lqdt_system_return).sum(),
        total: data.iter().map(|m| m.total_return).sum(),
    };
    // The current account pays no interest.
    let annual_rates = ChannelFigures {
        current_account: 0.0,
        bank_deposits: annualize(total_returns.bank_deposits, averages.bank_deposits, months),
        lqdt_system: annualize(total_returns.lqdt_system, averages.lqdt_system, months),
        total: annualize(total_returns.total, averages.total, months),
    };

    YearToDate {
        averages,
        total_returns,
        annual_rates,
        months_count: data.len(),
    }
}

/// One point per day from `start` through `start + days`, holding the YTD
/// average balances flat and accruing each channel's daily return.
pub fn projected_returns(data: &[MonthlyData], days: u32, start: NaiveDate) -> Vec<ProjectedPoint> {
    let ytd = year_to_date(data);
    let daily_bank = ytd.averages.bank_deposits * ytd.annual_rates.bank_deposits / 100.0 / DAYS_PER_YEAR;
    let daily_lqdt = ytd.averages.lqdt_system * ytd.annual_rates.lqdt_system / 100.0 / DAYS_PER_YEAR;
    let daily_total = daily_bank + daily_lqdt;

    (0..=days)
        .map(|day| {
            let elapsed = f64::from(day);
            ProjectedPoint {
                date: start + Duration::days(i64::from(day)),
                day,
                current_account: ytd.averages.current_account,
                bank_deposits: ytd.averages.bank_deposits,
                lqdt_system: ytd.averages.lqdt_system,
                total_funds: ytd.averages.total,
                current_account_return: 0.0,
                bank_deposits_return: daily_bank * elapsed,
                lqdt_system_return: daily_lqdt * elapsed,
                total_return: daily_total * elapsed,
                cumulative_total: ytd.averages.total + daily_total * elapsed,
            }
        })
        .collect()
}

pub fn performance_comparison(data: &[MonthlyData]) -> PerformanceComparison {
    let ytd = year_to_date(data);
    let channel = |name, avg_amount, annual_rate, total_return, color, efficiency| ChannelPerformance {
        name,
        avg_amount,
        annual_rate,
        total_return,
        color,
        efficiency,
    };

    PerformanceComparison {
        current_account: channel(
            "עו\"ש (ללא ריבית)",
            ytd.averages.current_account,
            ytd.annual_rates.current_account,
            ytd.total_returns.current_account,
            "#ef4444",
            0,
        ),
        bank_deposits: channel(
            "פקדונות בנקים",
            ytd.averages.bank_deposits,
            ytd.annual_rates.bank_deposits,
            ytd.total_returns.bank_deposits,
            "#f59e0b",
            65,
        ),
        lqdt_system: channel(
            "מערכת LQDT",
            ytd.averages.lqdt_system,
            ytd.annual_rates.lqdt_system,
            ytd.total_returns.lqdt_system,
            "#22c55e",
            100,
        ),
        overall: channel(
            "ביצועים כוללים",
            ytd.averages.total,
            ytd.annual_rates.total,
            ytd.total_returns.total,
            "#3b82f6",
            80,
        ),
    }
}
