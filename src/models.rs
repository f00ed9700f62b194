// src/models.rs
use serde::{Serialize, Deserialize};
use chrono::{DateTime, NaiveDate, Utc};

/// Money-market instrument bucket, parsed from the hosted `quote_type` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteCategory {
    Short,
    Medium,
    Long,
    Standard,
}

impl QuoteCategory {
    pub fn from_quote_type(quote_type: &str) -> Self {
        match quote_type {
            "makam_short" => QuoteCategory::Short,
            "makam_medium" => QuoteCategory::Medium,
            "makam_long" => QuoteCategory::Long,
            _ => QuoteCategory::Standard,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            QuoteCategory::Short => "קצר",
            QuoteCategory::Medium => "בינוני",
            QuoteCategory::Long => "ארוך",
            QuoteCategory::Standard => "רגיל",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Up,
    Down,
    Neutral,
}

/// A bank quote as stored in the `bank_quotes` table. Seeds the live feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankQuote {
    pub id: String,
    pub bank_name: String,
    pub quote_type: String,
    pub rate: f64,
    pub amount_min: f64,
    pub amount_max: f64,
    pub duration_days: u32,
    pub valid_until: DateTime<Utc>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// One row of the live quotes board.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuoteRecord {
    pub id: String,
    pub bank_name: String,
    pub category: QuoteCategory,
    pub base_rate: f64,
    pub current_rate: f64,
    pub previous_rate: f64,
    pub change: f64,
    pub change_percent: f64,
    pub trend: Trend,
    pub flashing: bool,
    pub volume: f64,
    pub amount_min: f64,
    pub amount_max: f64,
    pub duration_days: u32,
    pub valid_until: DateTime<Utc>,
    pub notes: Option<String>,
    pub last_update: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepositQuote {
    pub id: String,
    pub institution_name: String,
    pub deposit_type: String,
    pub rate: f64,
    pub amount_min: f64,
    pub amount_max: f64,
    pub duration_days: u32,
    pub early_withdrawal_penalty: f64,
    pub currency: String,
    pub risk_rating: String,
    pub valid_until: DateTime<Utc>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    Completed,
    Executed,
    Pending,
    Cancelled,
    Failed,
    #[serde(other)]
    Unknown,
}

impl TransactionStatus {
    pub fn label(&self) -> &'static str {
        match self {
            TransactionStatus::Completed => "הושלם",
            TransactionStatus::Executed => "בוצע",
            TransactionStatus::Pending => "ממתין",
            TransactionStatus::Cancelled => "בוטל",
            TransactionStatus::Failed => "נכשל",
            TransactionStatus::Unknown => "לא ידוע",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionHistory {
    pub id: String,
    pub transaction_type: String,
    pub amount: f64,
    pub source_institution: String,
    #[serde(default)]
    pub target_institution: Option<String>,
    #[serde(default)]
    pub rate: Option<f64>,
    #[serde(default)]
    pub duration_days: Option<u32>,
    pub status: TransactionStatus,
    #[serde(default)]
    pub executed_by: Option<String>,
    pub execution_date: DateTime<Utc>,
    #[serde(default)]
    pub maturity_date: Option<DateTime<Utc>>,
    pub actual_return: f64,
    pub expected_return: f64,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectedTransaction {
    pub id: String,
    pub transaction_date: NaiveDate,
    pub amount: f64,
    pub source_institution: String,
    pub transaction_type: String,
    pub probability: f64,
    pub expected_return: f64,
    pub duration_days: u32,
    #[serde(default)]
    pub notes: Option<String>,
}

/// State of an incoming payment waiting to be placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FundsStatus {
    Pending,
    Invested,
    Matured,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyTransaction {
    pub id: u32,
    pub date: NaiveDate,
    pub amount: f64,
    pub source: String,
    pub time: String,
    pub status: FundsStatus,
    pub days_to_payment: u32,
}

/// Month-end balances and returns per funds channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyData {
    pub month: String,
    pub date: NaiveDate,
    pub current_account: f64,
    pub bank_deposits: f64,
    pub lqdt_system: f64,
    pub total_funds: f64,
    pub current_account_return: f64,
    pub bank_deposits_return: f64,
    pub lqdt_system_return: f64,
    pub total_return: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RiskTier {
    Low,
    Medium,
    MediumHigh,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Allocation {
    pub instrument: &'static str,
    pub percentage: f64,
    pub rate: f64,
}

/// A fixed allocation across instruments with its blended annual rate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrategyOption {
    pub id: u32,
    pub name: &'static str,
    pub description: &'static str,
    pub annual_rate: f64,
    pub risk: RiskTier,
    pub allocation: &'static [Allocation],
    pub color: &'static str,
}

/// Rate table of the standalone calculator widget.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculatorStrategy {
    pub id: &'static str,
    pub name: &'static str,
    pub annual_rate: f64,
    pub description: &'static str,
    pub risk: RiskTier,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CalculationResult {
    pub daily_return: f64,
    pub total_return: f64,
    pub final_amount: f64,
    pub effective_annual_rate: f64,
}

/// Per-period figures shown next to a [`CalculationResult`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReturnBreakdown {
    pub weekly_return: f64,
    pub monthly_return: f64,
    pub daily_roi_percent: f64,
    pub period_roi_percent: f64,
    pub profit: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateSourceKind {
    Manual,
    Strategy,
}

/// Where the calculator takes its annual rate from.
#[derive(Debug, Clone, PartialEq)]
pub enum RateSource {
    Manual(f64),
    Strategy(String),
}
