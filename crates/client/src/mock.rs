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
use mockall::mock;

use crate::api::BookingApi;

// Mock backend for testing views
mock! {
    pub BookingApi {}

    #[async_trait]
    impl BookingApi for BookingApi {
        async fn login(&self, credentials: LoginRequest) -> BookingResult<String>;
        async fn forgot_password(&self, request: ForgotPasswordRequest) -> BookingResult<String>;
        async fn reset_password(&self, request: ResetPasswordRequest) -> BookingResult<String>;
        async fn my_time_slots(&self) -> BookingResult<Vec<TimeSlot>>;
        async fn free_time_slots(&self, days: u32) -> BookingResult<Vec<TimeSlot>>;
        async fn all_time_slots(&self, days: u32) -> BookingResult<Vec<TimeSlot>>;
        async fn add_time_slot(&self, slot: NewTimeSlot) -> BookingResult<()>;
        async fn book_time_slot(&self, slot_id: i64) -> BookingResult<()>;
        async fn unbook_time_slot(&self, slot_id: i64) -> BookingResult<()>;
        async fn delete_time_slot(&self, slot_id: i64) -> BookingResult<()>;
        async fn profile(&self) -> BookingResult<User>;
        async fn update_profile(&self, update: ProfileUpdate) -> BookingResult<()>;
        async fn all_users(&self) -> BookingResult<Vec<User>>;
        async fn register_user(&self, request: RegisterUserRequest) -> BookingResult<()>;
        async fn reset_user_password(&self, request: PasswordResetByAdmin) -> BookingResult<()>;
        async fn create_transaction(&self, transaction: NewTransaction) -> BookingResult<()>;
        async fn all_transactions(&self) -> BookingResult<Vec<Transaction>>;
        async fn user_transactions(&self, user_id: i64) -> BookingResult<Vec<Transaction>>;
    }
}
