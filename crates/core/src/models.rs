pub mod auth;
pub mod serde_helpers;
pub mod time_slot;
pub mod transaction;
pub mod user;
