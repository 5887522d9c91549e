//! # Courtside Client
//!
//! Everything between the booking backend and whatever front end drives it.
//!
//! ## Architecture
//!
//! - **Session**: the bearer token, where it is kept and the role it claims
//! - **Api**: the [`BookingApi`](api::BookingApi) trait, its HTTP implementation
//!   and a mock for tests
//! - **Middleware**: request authorization and response error mapping
//! - **Views**: page state, loading and the actions each page offers
//! - **Forms**: the shared submit lifecycle of every form
//! - **Routes**: the page table and role gating
//! - **Config**: environment driven settings

/// The backend contract
pub mod api;
/// Configuration module for client settings
pub mod config;
/// Form submission lifecycle
pub mod forms;
/// `reqwest` implementation of the backend contract
pub mod http;
/// Middleware for authorization and error handling
pub mod middleware;
/// Mock implementation of the backend contract for testing
pub mod mock;
/// Page table and role gating
pub mod routes;
/// Token persistence and the signed-in state
pub mod session;
/// Page state holders
pub mod views;

use std::sync::Arc;

use courtside_core::errors::BookingResult;

use crate::{
    config::ClientConfig,
    http::ApiClient,
    session::{FileTokenStore, Session, SharedSession},
};

/// Restores the persisted session and builds an HTTP client around it.
///
/// The returned session is the same one the client signs in and out of.
pub fn connect(config: &ClientConfig) -> BookingResult<(Arc<ApiClient>, SharedSession)> {
    let session = Session::restore(FileTokenStore::new(&config.token_path))?.into_shared();
    let client = ApiClient::new(config, Arc::clone(&session))?;
    Ok((Arc::new(client), session))
}
