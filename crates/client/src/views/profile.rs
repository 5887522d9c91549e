//! # Profile
//!
//! A client's own details plus every lesson they have booked, split into what
//! is coming up and what already happened.

use std::sync::Arc;

use chrono::NaiveDate;
use courtside_core::{
    availability::BookingHistory,
    errors::{BookingError, BookingResult},
    models::user::User,
    validation::ProfileFields,
};
use tracing::{error, info};

use crate::{api::BookingApi, forms::FormStatus};

const PROFILE_FAILED: &str = "Failed to load profile. Please try again.";
const UPDATE_FAILED: &str = "Failed to update profile. Please try again.";

pub struct ProfileView<A> {
    api: Arc<A>,
    today: NaiveDate,
    user: Option<User>,
    history: BookingHistory,
    editing: Option<ProfileFields>,
    pub status: FormStatus,
    last_error: Option<String>,
}

impl<A: BookingApi> ProfileView<A> {
    pub fn new(api: Arc<A>, today: NaiveDate) -> Self {
        Self {
            api,
            today,
            user: None,
            history: BookingHistory::default(),
            editing: None,
            status: FormStatus::default(),
            last_error: None,
        }
    }

    /// Fetches the profile and the caller's bookings together.
    pub async fn load(&mut self) -> BookingResult<()> {
        match tokio::try_join!(self.api.profile(), self.api.my_time_slots()) {
            Ok((user, bookings)) => {
                self.history = BookingHistory::split(&bookings, self.today);
                self.user = Some(user);
                self.last_error = None;
                Ok(())
            }
            Err(err) => {
                error!("Failed to load profile: {}", err);
                self.last_error = Some(PROFILE_FAILED.to_string());
                Err(err)
            }
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn history(&self) -> &BookingHistory {
        &self.history
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    /// Opens the edit form pre-filled with the loaded profile.
    pub fn start_edit(&mut self) -> Option<&mut ProfileFields> {
        let fields = ProfileFields::from_user(self.user.as_ref()?);
        self.status.reset();
        Some(self.editing.insert(fields))
    }

    pub fn fields_mut(&mut self) -> Option<&mut ProfileFields> {
        self.editing.as_mut()
    }

    /// Throws away unsaved edits.
    pub fn cancel_edit(&mut self) {
        self.editing = None;
        self.status.reset();
    }

    /// Sends the edited fields and reloads the profile on success.
    pub async fn save(&mut self) -> BookingResult<()> {
        let Some(fields) = self.editing.as_ref() else {
            return Err(BookingError::validation("Nothing to save"));
        };
        let api = Arc::clone(&self.api);

        self.status
            .run(
                || fields.to_update(),
                UPDATE_FAILED,
                |update| async move { api.update_profile(update).await },
            )
            .await?;
        info!("Profile updated");

        self.editing = None;
        self.load().await
    }
}
