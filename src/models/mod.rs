//! Domain models
//!
//! Typed records mirroring the backend collections. Field names follow the
//! store's snake_case column names so the records serialize directly into
//! mutation payloads and deserialize directly from select responses.

pub mod credit_card;
pub mod finance;
pub mod todo;

pub use credit_card::{CardStatus, CreditCard, LimitType, BANK_NAMES};
pub use finance::{
    AccountType, BankAccount, Expense, ExpenseCategory, Lending, PaymentMethod,
    EXPENSE_CATEGORIES, POPULAR_STORES,
};
pub use todo::{sort_by_priority, Priority, Todo, TODO_CATEGORIES};
