//! Credit card records and billing-cycle arithmetic

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// A tracked credit card (`credit_cards` collection)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreditCard {
    pub id: String,
    pub bank_name: String,
    pub card_name: String,
    /// Billing day of month (1-31)
    pub billing_date: u32,
    pub current_bill: f64,
    pub status: CardStatus,
    pub limit_type: LimitType,
    pub limit_amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: String,
}

/// Card lifecycle status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CardStatus {
    Active,
    Blocked,
    Inactive,
}

/// How the spending limit applies
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum LimitType {
    Monthly,
    PerTransaction,
    FullCard,
}

impl CreditCard {
    /// Days until the billing date, relative to `today`
    ///
    /// Negative when the billing day has already passed this month. Simple
    /// day-of-month subtraction, matching the reminder behaviour of the app:
    /// zero means the bill is due today.
    pub fn days_until_bill(&self, today: NaiveDate) -> i32 {
        self.billing_date as i32 - today.day() as i32
    }

    /// Whether a due-today reminder should fire
    pub fn bill_due_today(&self, today: NaiveDate) -> bool {
        self.days_until_bill(today) == 0 && self.current_bill > 0.0
    }
}

/// Banks the card picker knows about
pub const BANK_NAMES: &[&str] = &[
    "ICICI Bank",
    "HDFC Bank",
    "Axis Bank",
    "BharatPe",
    "SBI",
    "Kotak",
    "Kotak Bank",
    "American Express",
    "Yes Bank",
    "IndusInd Bank",
    "RBL Bank",
    "IDFC First Bank",
    "Federal Bank",
    "AU Small Finance Bank",
    "OneCard",
];

#[cfg(test)]
mod tests {
    use super::*;

    fn card(billing_date: u32, current_bill: f64) -> CreditCard {
        CreditCard {
            id: "c1".to_string(),
            bank_name: "HDFC Bank".to_string(),
            card_name: "Millennia".to_string(),
            billing_date,
            current_bill,
            status: CardStatus::Active,
            limit_type: LimitType::Monthly,
            limit_amount: 50_000.0,
            notes: None,
            created_at: "2024-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_days_until_bill() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
        assert_eq!(card(15, 100.0).days_until_bill(today), 5);
        assert_eq!(card(10, 100.0).days_until_bill(today), 0);
        assert_eq!(card(5, 100.0).days_until_bill(today), -5);
    }

    #[test]
    fn test_bill_due_today_requires_balance() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
        assert!(card(10, 100.0).bill_due_today(today));
        assert!(!card(10, 0.0).bill_due_today(today));
    }

    #[test]
    fn test_limit_type_wire_format() {
        let json = serde_json::to_string(&LimitType::PerTransaction).unwrap();
        assert_eq!(json, "\"per-transaction\"");
    }
}
