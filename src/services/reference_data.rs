// src/services/reference_data.rs
//
// Mock datasets behind the dashboard tables. Everything here is fixed and
// illustrative.
use chrono::{DateTime, NaiveDate, Utc};
use crate::models::{
    Allocation, BankQuote, CalculatorStrategy, DailyTransaction, DepositQuote, FundsStatus,
    MonthlyData, ProjectedTransaction, RiskTier, StrategyOption, TransactionHistory,
    TransactionStatus,
};

/// Rate used by the calculator when a strategy id is not in the table.
pub const FALLBACK_STRATEGY_RATE: f64 = 4.0;

const HAPOALIM_DEPOSIT: &str = "פיקדון בנק הפועלים";
const GOVERNMENT_MAKAM: &str = "מק\"מ ממשלתי";
const CORPORATE_AAA: &str = "אג\"ח קונצרני AAA";
const CORPORATE_AA: &str = "אג\"ח קונצרני AA";

pub const ALLOCATION_STRATEGIES: &[StrategyOption] = &[
    StrategyOption {
        id: 1,
        name: "אסטרטגיה שמרנית",
        description: "פיזור בין פיקדונות ומק\"מ ממשלתי",
        annual_rate: 3.8,
        risk: RiskTier::Low,
        allocation: &[
            Allocation { instrument: HAPOALIM_DEPOSIT, percentage: 60.0, rate: 4.2 },
            Allocation { instrument: GOVERNMENT_MAKAM, percentage: 40.0, rate: 3.8 },
        ],
        color: "#22c55e",
    },
    StrategyOption {
        id: 2,
        name: "אסטרטגיה מאוזנת",
        description: "תמהיל של כלים שונים לתשואה טובה יותר",
        annual_rate: 4.5,
        risk: RiskTier::Medium,
        allocation: &[
            Allocation { instrument: HAPOALIM_DEPOSIT, percentage: 40.0, rate: 4.2 },
            Allocation { instrument: CORPORATE_AAA, percentage: 35.0, rate: 5.1 },
            Allocation { instrument: GOVERNMENT_MAKAM, percentage: 25.0, rate: 3.8 },
        ],
        color: "#f59e0b",
    },
    StrategyOption {
        id: 3,
        name: "אסטרטגיה אגרסיבית",
        description: "מקסימיזציה של תשואה עם סיכון מבוקר",
        annual_rate: 5.2,
        risk: RiskTier::MediumHigh,
        allocation: &[
            Allocation { instrument: CORPORATE_AAA, percentage: 50.0, rate: 5.1 },
            Allocation { instrument: CORPORATE_AA, percentage: 30.0, rate: 5.8 },
            Allocation { instrument: HAPOALIM_DEPOSIT, percentage: 20.0, rate: 4.2 },
        ],
        color: "#ef4444",
    },
];

pub const CALCULATOR_STRATEGIES: &[CalculatorStrategy] = &[
    CalculatorStrategy {
        id: "conservative",
        name: "אסטרטגיה שמרנית",
        annual_rate: 3.8,
        description: "פיזור בין פיקדונות ומק\"מ ממשלתי",
        risk: RiskTier::Low,
    },
    CalculatorStrategy {
        id: "balanced",
        name: "אסטרטגיה מאוזנת",
        annual_rate: 4.5,
        description: "תמהיל של כלים שונים לתשואה טובה יותר",
        risk: RiskTier::Medium,
    },
    CalculatorStrategy {
        id: "aggressive",
        name: "אסטרטגיה אגרסיבית",
        annual_rate: 5.2,
        description: "מקסימיזציה של תשואה עם סיכון מבוקר",
        risk: RiskTier::High,
    },
    CalculatorStrategy {
        id: "bank_deposit",
        name: "פיקדון בנקאי",
        annual_rate: 4.2,
        description: "פיקדון קבוע בבנק מוביל",
        risk: RiskTier::Low,
    },
    CalculatorStrategy {
        id: "government_bonds",
        name: "אג\"ח ממשלתי",
        annual_rate: 3.9,
        description: "השקעה באג\"ח ממשלת ישראל",
        risk: RiskTier::Low,
    },
    CalculatorStrategy {
        id: "corporate_bonds",
        name: "אג\"ח קונצרני",
        annual_rate: 5.1,
        description: "אג\"ח של חברות בדירוג גבוה",
        risk: RiskTier::Medium,
    },
];

pub fn find_calculator_strategy(id: &str) -> Option<&'static CalculatorStrategy> {
    CALCULATOR_STRATEGIES.iter().find(|s| s.id == id)
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    date(year, month, day)
        .and_hms_opt(hour, minute, 0)
        .map(|naive| naive.and_utc())
        .unwrap_or_default()
}

fn bank_quote(
    id: &str,
    bank_name: &str,
    quote_type: &str,
    rate: f64,
    (amount_min, amount_max): (f64, f64),
    duration_days: u32,
    notes: Option<&str>,
) -> BankQuote {
    BankQuote {
        id: id.to_string(),
        bank_name: bank_name.to_string(),
        quote_type: quote_type.to_string(),
        rate,
        amount_min,
        amount_max,
        duration_days,
        valid_until: at(2025, 7, 12, 14, 0),
        notes: notes.map(str::to_string),
    }
}

pub fn bank_quotes() -> Vec<BankQuote> {
    vec![
        bank_quote("bq-1", "בנק הפועלים", "makam_short", 4.15, (1_000_000.0, 500_000_000.0), 30, Some("מחיר מיוחד לסכומים מעל 100M")),
        bank_quote("bq-2", "בנק לאומי", "makam_short", 4.10, (5_000_000.0, 300_000_000.0), 30, None),
        bank_quote("bq-3", "בנק דיסקונט", "makam_medium", 4.32, (10_000_000.0, 250_000_000.0), 90, None),
        bank_quote("bq-4", "בנק מזרחי טפחות", "makam_medium", 4.28, (2_000_000.0, 400_000_000.0), 90, Some("בתוקף עד סוף יום המסחר")),
        bank_quote("bq-5", "הבנק הבינלאומי", "makam_long", 4.55, (20_000_000.0, 200_000_000.0), 180, None),
        bank_quote("bq-6", "בנק ירושלים", "standard", 3.95, (1_000_000.0, 50_000_000.0), 14, None),
    ]
}

pub fn deposit_quotes() -> Vec<DepositQuote> {
    let deposit = |id: &str, institution: &str, kind: &str, rate: f64, range: (f64, f64), days: u32, penalty: f64, risk: &str| DepositQuote {
        id: id.to_string(),
        institution_name: institution.to_string(),
        deposit_type: kind.to_string(),
        rate,
        amount_min: range.0,
        amount_max: range.1,
        duration_days: days,
        early_withdrawal_penalty: penalty,
        currency: "ILS".to_string(),
        risk_rating: risk.to_string(),
        valid_until: at(2025, 7, 15, 14, 0),
        notes: None,
    };
    vec![
        deposit("dq-1", "בנק הפועלים", "fixed", 4.20, (1_000_000.0, 500_000_000.0), 30, 0.5, "AAA"),
        deposit("dq-2", "בנק לאומי", "fixed", 4.35, (5_000_000.0, 300_000_000.0), 90, 0.75, "AAA"),
        deposit("dq-3", "בנק דיסקונט", "variable", 4.10, (1_000_000.0, 200_000_000.0), 60, 0.25, "AA+"),
        deposit("dq-4", "בנק מזרחי טפחות", "fixed", 4.60, (10_000_000.0, 250_000_000.0), 180, 1.0, "AA+"),
    ]
}

pub fn transaction_history() -> Vec<TransactionHistory> {
    let entry = |id: &str, kind: &str, amount: f64, source: &str, target: Option<&str>, rate: Option<f64>, days: Option<u32>, status: TransactionStatus, executed: DateTime<Utc>, returns: (f64, f64)| TransactionHistory {
        id: id.to_string(),
        transaction_type: kind.to_string(),
        amount,
        source_institution: source.to_string(),
        target_institution: target.map(str::to_string),
        rate,
        duration_days: days,
        status,
        executed_by: Some("מחלקת גזברות".to_string()),
        execution_date: executed,
        maturity_date: days.map(|d| executed + chrono::Duration::days(i64::from(d))),
        actual_return: returns.0,
        expected_return: returns.1,
        notes: None,
    };
    vec![
        entry("th-1", "deposit", 50_000_000.0, "עו\"ש", Some("בנק הפועלים"), Some(4.2), Some(30), TransactionStatus::Completed, at(2025, 6, 1, 9, 30), (172_602.0, 172_602.0)),
        entry("th-2", "makam", 80_000_000.0, "עו\"ש", Some("מק\"מ ממשלתי"), Some(4.1), Some(90), TransactionStatus::Executed, at(2025, 6, 15, 11, 0), (0.0, 808_767.0)),
        entry("th-3", "bond", 35_000_000.0, "מערכת LQDT", Some("אג\"ח קונצרני AAA"), Some(5.1), Some(180), TransactionStatus::Pending, at(2025, 7, 10, 10, 15), (0.0, 880_274.0)),
        entry("th-4", "deposit", 20_000_000.0, "עו\"ש", Some("בנק לאומי"), Some(4.35), Some(60), TransactionStatus::Cancelled, at(2025, 5, 20, 14, 45), (0.0, 0.0)),
        entry("th-5", "withdrawal", 15_000_000.0, "בנק דיסקונט", None, None, None, TransactionStatus::Failed, at(2025, 7, 2, 8, 50), (0.0, 0.0)),
    ]
}

pub fn projected_transactions() -> Vec<ProjectedTransaction> {
    let projected = |id: &str, day: u32, amount: f64, source: &str, kind: &str, probability: f64, days: u32, rate: f64| ProjectedTransaction {
        id: id.to_string(),
        transaction_date: date(2025, 7, day),
        amount,
        source_institution: source.to_string(),
        transaction_type: kind.to_string(),
        probability,
        expected_return: (amount * rate / 100.0 * f64::from(days) / 365.0).round(),
        duration_days: days,
        notes: None,
    };
    vec![
        projected("pt-1", 14, 48_000_000.0, "עיריית תל אביב", "incoming", 0.95, 28, 4.2),
        projected("pt-2", 15, 31_000_000.0, "משרד החינוך", "incoming", 0.9, 25, 4.2),
        projected("pt-3", 17, 62_000_000.0, "רשות מקומית חיפה", "incoming", 0.85, 30, 4.5),
        projected("pt-4", 20, 25_000_000.0, "משרד הבריאות", "incoming", 0.8, 21, 3.8),
        projected("pt-5", 24, 40_000_000.0, "עיריית ירושלים", "incoming", 0.7, 30, 4.5),
    ]
}

pub fn daily_transactions() -> Vec<DailyTransaction> {
    let incoming = |id: u32, day: u32, amount: f64, source: &str, time: &str, status: FundsStatus, days_to_payment: u32| DailyTransaction {
        id,
        date: date(2025, 7, day),
        amount,
        source: source.to_string(),
        time: time.to_string(),
        status,
        days_to_payment,
    };
    vec![
        incoming(1, 12, 52_000_000.0, "עיריית תל אביב", "09:15", FundsStatus::Pending, 28),
        incoming(2, 12, 34_000_000.0, "משרד החינוך", "11:30", FundsStatus::Invested, 25),
        incoming(3, 11, 67_000_000.0, "רשות מקומית חיפה", "08:45", FundsStatus::Pending, 29),
        incoming(4, 11, 28_000_000.0, "משרד הבריאות", "14:20", FundsStatus::Invested, 26),
        incoming(5, 10, 45_000_000.0, "עיריית ירושלים", "10:10", FundsStatus::Pending, 30),
    ]
}

/// Year-to-date fund balances, January 2025 through mid July 2025.
pub fn historical_monthly_data() -> Vec<MonthlyData> {
    let month = |label: &str, d: NaiveDate, balances: (f64, f64, f64), returns: (f64, f64)| MonthlyData {
        month: label.to_string(),
        date: d,
        current_account: balances.0,
        bank_deposits: balances.1,
        lqdt_system: balances.2,
        total_funds: balances.0 + balances.1 + balances.2,
        current_account_return: 0.0,
        bank_deposits_return: returns.0,
        lqdt_system_return: returns.1,
        total_return: returns.0 + returns.1,
    };
    vec![
        month("ינואר 2025", date(2025, 1, 31), (45_000_000.0, 120_000_000.0, 85_000_000.0), (420_000.0, 425_000.0)),
        month("פברואר 2025", date(2025, 2, 28), (38_000_000.0, 135_000_000.0, 102_000_000.0), (472_500.0, 510_000.0)),
        month("מרץ 2025", date(2025, 3, 31), (42_000_000.0, 128_000_000.0, 115_000_000.0), (448_000.0, 575_000.0)),
        month("אפריל 2025", date(2025, 4, 30), (35_000_000.0, 145_000_000.0, 125_000_000.0), (507_500.0, 625_000.0)),
        month("מאי 2025", date(2025, 5, 31), (40_000_000.0, 138_000_000.0, 142_000_000.0), (483_000.0, 710_000.0)),
        month("יוני 2025", date(2025, 6, 30), (33_000_000.0, 152_000_000.0, 155_000_000.0), (532_000.0, 775_000.0)),
        month("יולי 2025", date(2025, 7, 12), (28_000_000.0, 162_000_000.0, 175_000_000.0), (567_000.0, 875_000.0)),
    ]
}
