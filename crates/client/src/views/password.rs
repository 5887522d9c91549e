//! # Login and password recovery
//!
//! The three public forms that deal with credentials. None of them need a
//! session; a successful login is what creates one.

use std::sync::Arc;

use chrono::Utc;
use courtside_core::{
    errors::BookingResult,
    token,
    validation::{ForgotPasswordFields, LoginFields, ResetPasswordFields},
};
use tracing::info;

use crate::{
    api::BookingApi,
    forms::FormStatus,
    routes::{self, Route},
};

const LOGIN_FAILED: &str = "Login failed. Please check your credentials.";
const FORGOT_FAILED: &str = "Failed to send reset email. Please try again.";
const RESET_FAILED: &str = "Failed to reset password. The token may have expired.";

pub struct LoginView<A> {
    api: Arc<A>,
    pub fields: LoginFields,
    pub status: FormStatus,
}

impl<A: BookingApi> LoginView<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self {
            api,
            fields: LoginFields::default(),
            status: FormStatus::default(),
        }
    }

    /// Logs in and returns the page the new role lands on.
    pub async fn submit(&mut self) -> BookingResult<Route> {
        let api = Arc::clone(&self.api);
        let token = self
            .status
            .run(
                || self.fields.to_request(),
                LOGIN_FAILED,
                |credentials| async move { api.login(credentials).await },
            )
            .await?;

        let role = token::role_from_token(Some(&token), Utc::now());
        info!(?role, "Logged in");
        self.fields.password.clear();
        Ok(Route::home_for(role))
    }
}

pub struct ForgotPasswordView<A> {
    api: Arc<A>,
    pub fields: ForgotPasswordFields,
    pub status: FormStatus,
    message: Option<String>,
}

impl<A: BookingApi> ForgotPasswordView<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self {
            api,
            fields: ForgotPasswordFields::default(),
            status: FormStatus::default(),
            message: None,
        }
    }

    /// Asks the backend to email a reset link and returns its reply.
    pub async fn submit(&mut self) -> BookingResult<String> {
        let api = Arc::clone(&self.api);
        let message = self
            .status
            .run(
                || self.fields.to_request(),
                FORGOT_FAILED,
                |request| async move { api.forgot_password(request).await },
            )
            .await?;

        self.message = Some(message.clone());
        Ok(message)
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

/// Opened from the emailed link; the token travels in the query string.
pub struct ResetPasswordView<A> {
    api: Arc<A>,
    pub fields: ResetPasswordFields,
    pub status: FormStatus,
}

impl<A: BookingApi> ResetPasswordView<A> {
    pub fn new(api: Arc<A>, token: Option<String>) -> Self {
        Self {
            api,
            fields: ResetPasswordFields {
                token,
                ..ResetPasswordFields::default()
            },
            status: FormStatus::default(),
        }
    }

    /// Reads the token from a `/reset-password?token=...` link.
    pub fn from_link(api: Arc<A>, link: &str) -> Self {
        Self::new(api, routes::query_param(link, "token"))
    }

    /// Where to send someone who opened the page without a token.
    pub fn redirect(&self) -> Option<Route> {
        self.fields
            .token
            .as_deref()
            .is_none_or(|token| token.trim().is_empty())
            .then_some(Route::Login)
    }

    /// Sets the new password and returns the backend's reply.
    pub async fn submit(&mut self) -> BookingResult<String> {
        let api = Arc::clone(&self.api);
        let message = self
            .status
            .run(
                || self.fields.to_request(),
                RESET_FAILED,
                |request| async move { api.reset_password(request).await },
            )
            .await?;

        info!("Password reset");
        self.fields.new_password.clear();
        self.fields.confirm_password.clear();
        Ok(message)
    }
}
