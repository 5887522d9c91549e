use std::sync::Arc;

use courtside_core::{
    directory::{UserFilter, UserStats},
    errors::BookingResult,
    models::user::User,
    validation::AdminPasswordFields,
};
use tracing::{error, info};

use crate::{api::BookingApi, forms::FormStatus};

const USERS_FAILED: &str = "Failed to load users. Please try again.";
const PASSWORD_FAILED: &str = "Failed to reset password. Please try again.";

/// The coach's list of everyone with an account.
pub struct DirectoryView<A> {
    api: Arc<A>,
    users: Vec<User>,
    pub filter: UserFilter,
    pub password: FormStatus,
    last_error: Option<String>,
}

impl<A: BookingApi> DirectoryView<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self {
            api,
            users: Vec::new(),
            filter: UserFilter::default(),
            password: FormStatus::default(),
            last_error: None,
        }
    }

    pub async fn load(&mut self) -> BookingResult<()> {
        match self.api.all_users().await {
            Ok(users) => {
                self.users = users;
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

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn visible(&self) -> Vec<&User> {
        self.filter.apply(&self.users)
    }

    /// Counts over the whole list, regardless of the filter.
    pub fn stats(&self) -> UserStats {
        UserStats::of(&self.users)
    }

    pub fn showing(&self) -> String {
        format!(
            "Showing {} of {} users",
            self.visible().len(),
            self.users.len()
        )
    }

    pub fn clear_filter(&mut self) {
        self.filter = UserFilter::default();
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Sets a new password for someone else's account.
    pub async fn reset_password(&mut self, fields: AdminPasswordFields) -> BookingResult<()> {
        let api = Arc::clone(&self.api);
        self.password
            .run(
                || fields.to_request(),
                PASSWORD_FAILED,
                |request| async move { api.reset_user_password(request).await },
            )
            .await?;
        info!(user_id = fields.user_id, "Password reset by admin");
        Ok(())
    }
}
