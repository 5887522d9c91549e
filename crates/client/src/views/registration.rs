use std::sync::Arc;

use courtside_core::{errors::BookingResult, validation::RegistrationFields};
use tracing::info;

use crate::{api::BookingApi, forms::FormStatus};

const REGISTRATION_FAILED: &str = "Registration failed. Please try again.";

/// The coach's "register a new user" form.
pub struct RegistrationView<A> {
    api: Arc<A>,
    pub fields: RegistrationFields,
    pub status: FormStatus,
}

impl<A: BookingApi> RegistrationView<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self {
            api,
            fields: RegistrationFields::default(),
            status: FormStatus::default(),
        }
    }

    /// Validates and sends the form. On success the fields are cleared.
    pub async fn submit(&mut self) -> BookingResult<()> {
        let api = Arc::clone(&self.api);
        let email = self.fields.email.trim().to_lowercase();

        self.status
            .run(
                || self.fields.to_request(),
                REGISTRATION_FAILED,
                |request| async move { api.register_user(request).await },
            )
            .await?;

        info!(%email, "User registered");
        self.fields = RegistrationFields::default();
        Ok(())
    }
}
