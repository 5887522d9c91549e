//! The backend as the views see it: one method per REST endpoint.

use async_trait::async_trait;
use courtside_core::{
    errors::BookingResult,
    models::{
        auth::{ForgotPasswordRequest, LoginRequest, ResetPasswordRequest},
        time_slot::{NewTimeSlot, TimeSlot},
        transaction::{NewTransaction, Transaction},
        user::{PasswordResetByAdmin, ProfileUpdate, RegisterUserRequest, User},
    },
};

#[async_trait]
pub trait BookingApi: Send + Sync {
    /// `POST /api/auth/login`. Implementations keep the returned token as the
    /// current credential.
    async fn login(&self, credentials: LoginRequest) -> BookingResult<String>;

    /// `POST /api/auth/forgot-password`, returning the backend's message.
    async fn forgot_password(&self, request: ForgotPasswordRequest) -> BookingResult<String>;

    /// `POST /api/auth/reset-password`, returning the backend's message.
    async fn reset_password(&self, request: ResetPasswordRequest) -> BookingResult<String>;

    /// `GET /api/time-slots/my`
    async fn my_time_slots(&self) -> BookingResult<Vec<TimeSlot>>;

    /// `GET /api/time-slots/free?days=N`
    async fn free_time_slots(&self, days: u32) -> BookingResult<Vec<TimeSlot>>;

    /// `GET /api/time-slots/all?days=N`
    async fn all_time_slots(&self, days: u32) -> BookingResult<Vec<TimeSlot>>;

    /// `POST /api/time-slots`
    async fn add_time_slot(&self, slot: NewTimeSlot) -> BookingResult<()>;

    /// `POST /api/time-slots/book/:id`
    async fn book_time_slot(&self, slot_id: i64) -> BookingResult<()>;

    /// `POST /api/time-slots/unbook/:id`
    async fn unbook_time_slot(&self, slot_id: i64) -> BookingResult<()>;

    /// `DELETE /api/time-slots/:id`
    async fn delete_time_slot(&self, slot_id: i64) -> BookingResult<()>;

    /// `GET /api/users/profile`
    async fn profile(&self) -> BookingResult<User>;

    /// `PUT /api/users/profile`
    async fn update_profile(&self, update: ProfileUpdate) -> BookingResult<()>;

    /// `GET /api/users/all`
    async fn all_users(&self) -> BookingResult<Vec<User>>;

    /// `POST /api/users/admin/register`
    async fn register_user(&self, request: RegisterUserRequest) -> BookingResult<()>;

    /// `PUT /api/users/admin/reset-password`
    async fn reset_user_password(&self, request: PasswordResetByAdmin) -> BookingResult<()>;

    /// `POST /api/auth/create`
    async fn create_transaction(&self, transaction: NewTransaction) -> BookingResult<()>;

    /// `GET /api/auth/all`
    async fn all_transactions(&self) -> BookingResult<Vec<Transaction>>;

    /// `GET /api/auth/user/:id`
    async fn user_transactions(&self, user_id: i64) -> BookingResult<Vec<Transaction>>;
}
