//! HTTP implementation of [`BookingApi`] on top of `reqwest`.

use std::time::Duration;

use async_trait::async_trait;
use courtside_core::{
    errors::{BookingError, BookingResult},
    models::{
        auth::{ForgotPasswordRequest, LoginRequest, ResetPasswordRequest, TokenResponse},
        time_slot::{NewTimeSlot, TimeSlot},
        transaction::{NewTransaction, Transaction},
        user::{PasswordResetByAdmin, ProfileUpdate, RegisterUserRequest, User},
    },
};
use reqwest::{Method, RequestBuilder, Response};
use serde::{Serialize, de::DeserializeOwned};
use tracing::debug;

use crate::{
    api::BookingApi,
    config::ClientConfig,
    middleware::{
        auth::authorize,
        error_handling::{check_response, readable_text, transport_error},
    },
    session::SharedSession,
};

const AUTH: &str = "/api/auth";
const TIME_SLOTS: &str = "/api/time-slots";
const USERS: &str = "/api/users";

/// Talks to the booking backend, decorating each request with the session's token.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ClientConfig,
    session: SharedSession,
}

impl ApiClient {
    pub fn new(config: &ClientConfig, session: SharedSession) -> BookingResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout))
            .build()
            .map_err(transport_error)?;

        Ok(Self {
            http,
            config: config.clone(),
            session,
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.config.endpoint(path);
        debug!(%method, %url, "Sending request");
        self.http.request(method, url)
    }

    async fn send(&self, request: RequestBuilder) -> BookingResult<Response> {
        let response = authorize(request, &self.session)
            .await
            .send()
            .await
            .map_err(transport_error)?;
        check_response(response).await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> BookingResult<T> {
        self.send(self.request(Method::GET, path))
            .await?
            .json()
            .await
            .map_err(transport_error)
    }

    async fn get_window<T: DeserializeOwned>(&self, path: &str, days: u32) -> BookingResult<T> {
        self.send(self.request(Method::GET, path).query(&[("days", days)]))
            .await?
            .json()
            .await
            .map_err(transport_error)
    }

    async fn send_json<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> BookingResult<Response> {
        self.send(self.request(method, path).json(body)).await
    }

    async fn text_of(response: Response) -> BookingResult<String> {
        let body = response.text().await.map_err(transport_error)?;
        Ok(readable_text(&body))
    }
}

#[async_trait]
impl BookingApi for ApiClient {
    async fn login(&self, credentials: LoginRequest) -> BookingResult<String> {
        let response = self
            .send_json(Method::POST, &format!("{AUTH}/login"), &credentials)
            .await?;
        let TokenResponse { token } = response.json().await.map_err(transport_error)?;
        if token.trim().is_empty() {
            return Err(BookingError::Authentication(
                "Server returned an empty token".to_string(),
            ));
        }
        self.session.write().await.sign_in(token.clone())?;
        Ok(token)
    }

    async fn forgot_password(&self, request: ForgotPasswordRequest) -> BookingResult<String> {
        let response = self
            .send_json(Method::POST, &format!("{AUTH}/forgot-password"), &request)
            .await?;
        Self::text_of(response).await
    }

    async fn reset_password(&self, request: ResetPasswordRequest) -> BookingResult<String> {
        let response = self
            .send_json(Method::POST, &format!("{AUTH}/reset-password"), &request)
            .await?;
        Self::text_of(response).await
    }

    async fn my_time_slots(&self) -> BookingResult<Vec<TimeSlot>> {
        self.get_json(&format!("{TIME_SLOTS}/my")).await
    }

    async fn free_time_slots(&self, days: u32) -> BookingResult<Vec<TimeSlot>> {
        self.get_window(&format!("{TIME_SLOTS}/free"), days).await
    }

    async fn all_time_slots(&self, days: u32) -> BookingResult<Vec<TimeSlot>> {
        self.get_window(&format!("{TIME_SLOTS}/all"), days).await
    }

    async fn add_time_slot(&self, slot: NewTimeSlot) -> BookingResult<()> {
        self.send_json(Method::POST, TIME_SLOTS, &slot).await?;
        Ok(())
    }

    async fn book_time_slot(&self, slot_id: i64) -> BookingResult<()> {
        self.send(self.request(Method::POST, &format!("{TIME_SLOTS}/book/{slot_id}")))
            .await?;
        Ok(())
    }

    async fn unbook_time_slot(&self, slot_id: i64) -> BookingResult<()> {
        self.send(self.request(Method::POST, &format!("{TIME_SLOTS}/unbook/{slot_id}")))
            .await?;
        Ok(())
    }

    async fn delete_time_slot(&self, slot_id: i64) -> BookingResult<()> {
        self.send(self.request(Method::DELETE, &format!("{TIME_SLOTS}/{slot_id}")))
            .await?;
        Ok(())
    }

    async fn profile(&self) -> BookingResult<User> {
        self.get_json(&format!("{USERS}/profile")).await
    }

    async fn update_profile(&self, update: ProfileUpdate) -> BookingResult<()> {
        self.send_json(Method::PUT, &format!("{USERS}/profile"), &update)
            .await?;
        Ok(())
    }

    async fn all_users(&self) -> BookingResult<Vec<User>> {
        self.get_json(&format!("{USERS}/all")).await
    }

    async fn register_user(&self, request: RegisterUserRequest) -> BookingResult<()> {
        self.send_json(Method::POST, &format!("{USERS}/admin/register"), &request)
            .await?;
        Ok(())
    }

    async fn reset_user_password(&self, request: PasswordResetByAdmin) -> BookingResult<()> {
        self.send_json(Method::PUT, &format!("{USERS}/admin/reset-password"), &request)
            .await?;
        Ok(())
    }

    async fn create_transaction(&self, transaction: NewTransaction) -> BookingResult<()> {
        self.send_json(Method::POST, &format!("{AUTH}/create"), &transaction)
            .await?;
        Ok(())
    }

    async fn all_transactions(&self) -> BookingResult<Vec<Transaction>> {
        self.get_json(&format!("{AUTH}/all")).await
    }

    async fn user_transactions(&self, user_id: i64) -> BookingResult<Vec<Transaction>> {
        self.get_json(&format!("{AUTH}/user/{user_id}")).await
    }
}
