//! Bank accounts, categorized expenses, and money lent out

use serde::{Deserialize, Serialize};

/// A bank account balance (`bank_accounts` collection)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BankAccount {
    pub id: String,
    pub bank_name: String,
    pub balance: f64,
    #[serde(rename = "type")]
    pub account_type: AccountType,
}

/// Account flavour
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    Savings,
    Current,
}

/// A categorized expense (`expenses` collection)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Expense {
    pub id: String,
    pub amount: f64,
    pub date: String,
    pub category: ExpenseCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_name: Option<String>,
    pub payment_method: PaymentMethod,
    /// Bank account id or credit card id the expense was paid from
    pub payment_source_id: String,
    pub payment_source_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub created_at: String,
}

/// Expense category
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseCategory {
    Food,
    Shopping,
    Bills,
    Transport,
    Entertainment,
    Other,
}

impl ExpenseCategory {
    /// Display label for the category
    pub fn label(&self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Shopping => "Shopping",
            Self::Bills => "Bills",
            Self::Transport => "Transport",
            Self::Entertainment => "Entertainment",
            Self::Other => "Other",
        }
    }
}

/// How an expense was paid
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Bank,
    CreditCard,
}

/// Money lent to another person (`lendings` collection)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Lending {
    pub id: String,
    pub person_name: String,
    pub amount: f64,
    pub given_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder_date: Option<String>,
    #[serde(default)]
    pub is_returned: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub created_at: String,
}

impl Lending {
    /// Whether a reminder should fire on `today` (ISO date string)
    pub fn reminder_due(&self, today: &str) -> bool {
        !self.is_returned && self.reminder_date.as_deref() == Some(today)
    }
}

/// All expense categories in picker order
pub const EXPENSE_CATEGORIES: &[ExpenseCategory] = &[
    ExpenseCategory::Food,
    ExpenseCategory::Shopping,
    ExpenseCategory::Bills,
    ExpenseCategory::Transport,
    ExpenseCategory::Entertainment,
    ExpenseCategory::Other,
];

/// Frequent store names offered for quick entry
pub const POPULAR_STORES: &[&str] = &[
    "Flipkart",
    "Amazon",
    "BigBasket",
    "Swiggy",
    "Zomato",
    "DMart",
    "Reliance Fresh",
    "More",
    "Blinkit",
    "Zepto",
];
