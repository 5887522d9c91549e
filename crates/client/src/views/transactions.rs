//! # Transaction desk
//!
//! The coach picks a client, sees their history and balance, and records a
//! credit or a charge. Balances live on the backend; after every transaction
//! the client list is fetched again to pick up the new figures.

use std::sync::Arc;

use courtside_core::{
    directory,
    errors::BookingResult,
    ledger::BalancePreview,
    models::{transaction::Transaction, user::User},
    validation::TransactionFields,
};
use tracing::{error, info, warn};

use crate::{api::BookingApi, forms::FormStatus};

const USERS_FAILED: &str = "Failed to load users. Please try again.";
const TRANSACTION_FAILED: &str = "Transaction failed. Please try again.";

pub struct TransactionDesk<A> {
    api: Arc<A>,
    users: Vec<User>,
    selected: Option<i64>,
    history: Vec<Transaction>,
    pub fields: TransactionFields,
    pub status: FormStatus,
    last_error: Option<String>,
}

impl<A: BookingApi> TransactionDesk<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self {
            api,
            users: Vec::new(),
            selected: None,
            history: Vec::new(),
            fields: TransactionFields::default(),
            status: FormStatus::default(),
            last_error: None,
        }
    }

    /// Loads the clients the coach can bill, sorted by name.
    pub async fn load_users(&mut self) -> BookingResult<()> {
        match self.api.all_users().await {
            Ok(users) => {
                self.users = directory::clients_by_name(&users);
                self.last_error = None;
                Ok(())
            }
            Err(err) => {
                error!("Failed to load users: {}", err);
                self.last_error = Some(USERS_FAILED.to_string());
                Err(err)
            }
        }
    }

    /// Makes `user_id` the subject of the form and loads their history.
    ///
    /// A history that fails to load shows as empty.
    pub async fn select_user(&mut self, user_id: i64) {
        self.fields.user_id = Some(user_id);
        self.selected = Some(user_id);
        self.history = self.history_of(user_id).await;
    }

    async fn history_of(&self, user_id: i64) -> Vec<Transaction> {
        self.api
            .user_transactions(user_id)
            .await
            .unwrap_or_else(|err| {
                warn!(user_id, "Failed to load transactions: {}", err);
                Vec::new()
            })
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn history(&self) -> &[Transaction] {
        &self.history
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn selected_user(&self) -> Option<&User> {
        let id = self.selected?;
        self.users.iter().find(|user| user.id == id)
    }

    /// The balance after the transaction being typed, once the amount parses.
    pub fn preview(&self) -> Option<BalancePreview> {
        let user = self.selected_user()?;
        let amount = self.fields.parsed_amount()?;
        Some(BalancePreview::for_user(
            user,
            self.fields.transaction_type,
            amount,
        ))
    }

    /// Records the transaction, then resets the form and refreshes balances
    /// and the selected client's history.
    pub async fn submit(&mut self) -> BookingResult<()> {
        let api = Arc::clone(&self.api);
        let previous = self.selected;

        let transaction = self
            .status
            .run(
                || self.fields.to_request(),
                TRANSACTION_FAILED,
                |transaction| async move {
                    api.create_transaction(transaction.clone()).await?;
                    Ok(transaction)
                },
            )
            .await?;
        info!(
            user_id = transaction.user_id,
            kind = %transaction.transaction_type,
            amount = transaction.amount,
            "Transaction recorded"
        );

        self.fields = TransactionFields::default();
        if let Err(err) = self.load_users().await {
            warn!("Balances not refreshed: {}", err);
        }
        if let Some(user_id) = previous {
            self.history = self.history_of(user_id).await;
        }
        Ok(())
    }

    /// Every transaction on record, in the order the backend returns them.
    pub async fn all_transactions(&self) -> BookingResult<Vec<Transaction>> {
        self.api.all_transactions().await
    }
}
