// src/services/format.rs
//
// he-IL / ILS display strings, as the dashboard shows them.
use chrono::{DateTime, Utc};
use chrono_tz::Asia::Jerusalem;

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Whole shekels with thousands separators, e.g. `₪1,003,452`.
pub fn format_currency(amount: f64) -> String {
    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{}₪{}", sign, group_thousands(rounded.abs() as u64))
}

pub fn format_rate(rate: f64) -> String {
    format!("{:.3}%", rate)
}

pub fn format_signed(value: f64, decimals: usize) -> String {
    let sign = if value >= 0.0 { "+" } else { "" };
    format!("{}{:.*}", sign, decimals, value)
}

pub fn format_volume(volume: f64) -> String {
    if volume >= 1_000_000_000.0 {
        format!("{:.1}B", volume / 1_000_000_000.0)
    } else if volume >= 1_000_000.0 {
        format!("{:.0}M", volume / 1_000_000.0)
    } else {
        format!("{}", volume.round() as i64)
    }
}

pub fn format_clock(at: DateTime<Utc>) -> String {
    at.with_timezone(&Jerusalem).format("%H:%M:%S").to_string()
}
