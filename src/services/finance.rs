//! Finance tracking orchestration
//!
//! Credit cards, bank balances, expenses, and lendings. Recording an expense
//! queues two mutations in submission order: the expense row itself, then
//! the balance delta against its payment source (bank balance down, card
//! bill up). Removing an expense queues the reverse pair.

use std::sync::Arc;

use serde_json::json;

use crate::backend::{SessionStore, TableClient};
use crate::error::Error;
use crate::models::{
    AccountType, BankAccount, CreditCard, Expense, ExpenseCategory, Lending, LimitType,
    PaymentMethod,
};
use crate::offline::{MutationPayload, QueueOutcome, SyncCoordinator};
use crate::services::columns;

/// Form data for a new or edited credit card
#[derive(Debug, Clone)]
pub struct CardDraft {
    pub bank_name: String,
    pub card_name: String,
    pub billing_date: u32,
    pub limit_type: LimitType,
    pub limit_amount: f64,
    pub notes: Option<String>,
}

impl CardDraft {
    pub fn validate(&self) -> Result<(), Error> {
        if self.bank_name.trim().is_empty() {
            return Err(Error::validation("bank_name", "Bank name cannot be empty"));
        }
        if self.card_name.trim().is_empty() {
            return Err(Error::validation("card_name", "Card name cannot be empty"));
        }
        if !(1..=31).contains(&self.billing_date) {
            return Err(Error::validation(
                "billing_date",
                "Billing date must be a day of month (1-31)",
            ));
        }
        if self.limit_amount < 0.0 {
            return Err(Error::validation("limit_amount", "Limit cannot be negative"));
        }
        Ok(())
    }

    fn column_data(&self) -> serde_json::Value {
        json!({
            "bank_name": self.bank_name.trim(),
            "card_name": self.card_name.trim(),
            "billing_date": self.billing_date,
            "limit_type": self.limit_type,
            "limit_amount": self.limit_amount,
            "notes": self.notes,
        })
    }
}

/// Form data for a bank account
#[derive(Debug, Clone)]
pub struct BankDraft {
    pub bank_name: String,
    pub balance: f64,
    pub account_type: AccountType,
}

impl BankDraft {
    pub fn validate(&self) -> Result<(), Error> {
        if self.bank_name.trim().is_empty() {
            return Err(Error::validation("bank_name", "Bank name cannot be empty"));
        }
        Ok(())
    }

    fn column_data(&self) -> serde_json::Value {
        json!({
            "bank_name": self.bank_name.trim(),
            "balance": self.balance,
            "type": self.account_type,
        })
    }
}

/// Form data for a new expense
#[derive(Debug, Clone)]
pub struct ExpenseDraft {
    pub amount: f64,
    pub date: String,
    pub category: ExpenseCategory,
    pub store_name: Option<String>,
    pub payment_method: PaymentMethod,
    pub payment_source_id: String,
    pub payment_source_name: String,
    pub note: Option<String>,
}

impl ExpenseDraft {
    pub fn validate(&self) -> Result<(), Error> {
        if self.amount <= 0.0 {
            return Err(Error::validation("amount", "Amount must be positive"));
        }
        if self.payment_source_id.trim().is_empty() {
            return Err(Error::validation(
                "payment_source_id",
                "Expense needs a payment source",
            ));
        }
        Ok(())
    }

    fn column_data(&self) -> serde_json::Value {
        json!({
            "amount": self.amount,
            "date": self.date,
            "category": self.category,
            "store_name": self.store_name,
            "payment_method": self.payment_method,
            "payment_source_id": self.payment_source_id,
            "payment_source_name": self.payment_source_name,
            "note": self.note,
        })
    }

    /// The balance-delta mutation applied to the payment source
    ///
    /// `source_current` is the source's value before this expense: the bank
    /// balance, or the card's current bill.
    pub fn source_delta_payload(&self, source_current: f64) -> MutationPayload {
        match self.payment_method {
            PaymentMethod::Bank => MutationPayload::update(
                "bank_accounts",
                &self.payment_source_id,
                columns(json!({ "balance": source_current - self.amount })),
            ),
            PaymentMethod::CreditCard => MutationPayload::update(
                "credit_cards",
                &self.payment_source_id,
                columns(json!({ "current_bill": source_current + self.amount })),
            ),
        }
    }
}

/// Form data for money lent out
#[derive(Debug, Clone)]
pub struct LendingDraft {
    pub person_name: String,
    pub amount: f64,
    pub given_date: String,
    pub reminder_date: Option<String>,
    pub note: Option<String>,
}

impl LendingDraft {
    pub fn validate(&self) -> Result<(), Error> {
        if self.person_name.trim().is_empty() {
            return Err(Error::validation(
                "person_name",
                "Person name cannot be empty",
            ));
        }
        if self.amount <= 0.0 {
            return Err(Error::validation("amount", "Amount must be positive"));
        }
        Ok(())
    }

    fn column_data(&self) -> serde_json::Value {
        json!({
            "person_name": self.person_name.trim(),
            "amount": self.amount,
            "given_date": self.given_date,
            "reminder_date": self.reminder_date,
            "note": self.note,
        })
    }
}

/// Finance CRUD over the offline coordinator
pub struct FinanceService {
    coordinator: Arc<SyncCoordinator>,
    client: TableClient,
    session: Arc<SessionStore>,
}

impl FinanceService {
    pub fn new(
        coordinator: Arc<SyncCoordinator>,
        client: TableClient,
        session: Arc<SessionStore>,
    ) -> Self {
        Self {
            coordinator,
            client,
            session,
        }
    }

    fn user_id(&self) -> Option<String> {
        self.session.current_session().map(|s| s.user_id)
    }

    fn owned_insert(&self, table: &str, data: serde_json::Value) -> MutationPayload {
        let mut data = columns(data);
        if let Some(user_id) = self.user_id() {
            data.insert("user_id".to_string(), json!(user_id));
        }
        MutationPayload::insert(table, data)
    }

    // Credit cards

    pub async fn list_cards(&self) -> Result<Vec<CreditCard>, Error> {
        Ok(self.client.select("credit_cards", "created_at.desc").await?)
    }

    pub async fn add_card(&self, draft: &CardDraft) -> Result<QueueOutcome, Error> {
        draft.validate()?;
        let payload = self.owned_insert("credit_cards", draft.column_data());
        Ok(self.coordinator.queue_mutation(payload).await)
    }

    pub async fn edit_card(&self, id: &str, draft: &CardDraft) -> Result<QueueOutcome, Error> {
        draft.validate()?;
        let payload = MutationPayload::update("credit_cards", id, columns(draft.column_data()));
        Ok(self.coordinator.queue_mutation(payload).await)
    }

    /// Record a bill payment or manual bill adjustment
    pub async fn update_card_bill(&self, id: &str, current_bill: f64) -> QueueOutcome {
        let payload = MutationPayload::update(
            "credit_cards",
            id,
            columns(json!({ "current_bill": current_bill })),
        );
        self.coordinator.queue_mutation(payload).await
    }

    pub async fn delete_card(&self, id: &str) -> QueueOutcome {
        self.coordinator
            .queue_mutation(MutationPayload::delete("credit_cards", id))
            .await
    }

    // Bank accounts

    pub async fn list_banks(&self) -> Result<Vec<BankAccount>, Error> {
        Ok(self.client.select("bank_accounts", "created_at.desc").await?)
    }

    pub async fn add_bank(&self, draft: &BankDraft) -> Result<QueueOutcome, Error> {
        draft.validate()?;
        let payload = self.owned_insert("bank_accounts", draft.column_data());
        Ok(self.coordinator.queue_mutation(payload).await)
    }

    pub async fn edit_bank(&self, id: &str, draft: &BankDraft) -> Result<QueueOutcome, Error> {
        draft.validate()?;
        let payload = MutationPayload::update("bank_accounts", id, columns(draft.column_data()));
        Ok(self.coordinator.queue_mutation(payload).await)
    }

    pub async fn update_bank_balance(&self, id: &str, balance: f64) -> QueueOutcome {
        let payload =
            MutationPayload::update("bank_accounts", id, columns(json!({ "balance": balance })));
        self.coordinator.queue_mutation(payload).await
    }

    // Expenses

    pub async fn list_expenses(&self) -> Result<Vec<Expense>, Error> {
        Ok(self.client.select("expenses", "created_at.desc").await?)
    }

    /// Record an expense and apply its delta to the payment source
    ///
    /// Two mutations are queued in order; with the FIFO queue an offline
    /// replay applies them in the same order they were submitted.
    pub async fn record_expense(
        &self,
        draft: &ExpenseDraft,
        source_current: f64,
    ) -> Result<(QueueOutcome, QueueOutcome), Error> {
        draft.validate()?;
        let expense = self
            .coordinator
            .queue_mutation(self.owned_insert("expenses", draft.column_data()))
            .await;
        let delta = self
            .coordinator
            .queue_mutation(draft.source_delta_payload(source_current))
            .await;
        Ok((expense, delta))
    }

    /// Delete an expense and roll its delta back off the payment source
    pub async fn remove_expense(
        &self,
        expense: &Expense,
        source_current: f64,
    ) -> (QueueOutcome, QueueOutcome) {
        let deleted = self
            .coordinator
            .queue_mutation(MutationPayload::delete("expenses", &expense.id))
            .await;
        let reversal = match expense.payment_method {
            PaymentMethod::Bank => MutationPayload::update(
                "bank_accounts",
                &expense.payment_source_id,
                columns(json!({ "balance": source_current + expense.amount })),
            ),
            PaymentMethod::CreditCard => MutationPayload::update(
                "credit_cards",
                &expense.payment_source_id,
                columns(json!({ "current_bill": source_current - expense.amount })),
            ),
        };
        let rolled_back = self.coordinator.queue_mutation(reversal).await;
        (deleted, rolled_back)
    }

    // Lendings

    pub async fn list_lendings(&self) -> Result<Vec<Lending>, Error> {
        Ok(self.client.select("lendings", "created_at.desc").await?)
    }

    pub async fn add_lending(&self, draft: &LendingDraft) -> Result<QueueOutcome, Error> {
        draft.validate()?;
        let payload = self.owned_insert("lendings", draft.column_data());
        Ok(self.coordinator.queue_mutation(payload).await)
    }

    pub async fn mark_lending_returned(&self, id: &str, returned: bool) -> QueueOutcome {
        let payload =
            MutationPayload::update("lendings", id, columns(json!({ "is_returned": returned })));
        self.coordinator.queue_mutation(payload).await
    }

    pub async fn delete_lending(&self, id: &str) -> QueueOutcome {
        self.coordinator
            .queue_mutation(MutationPayload::delete("lendings", id))
            .await
    }
}
