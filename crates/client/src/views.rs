//! # Views
//!
//! State holders behind each page. A view owns the data it displays, talks to
//! the backend through a [`BookingApi`](crate::api::BookingApi) and records the
//! last failure as a message ready to show. Views never retry: a failed load
//! leaves stale or empty data until the user asks again.

/// Coach slots for the week: listing, booking, adding, deleting
pub mod availability;
/// User directory with search, role filter and password resets
pub mod directory;
/// Login and password recovery
pub mod password;
/// Own profile and booking history
pub mod profile;
/// Admin registration of new users
pub mod registration;
/// Balance transactions for a selected user
pub mod transactions;

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Locks view state, carrying on with the data if a previous holder panicked.
pub(crate) fn lock<T>(state: &Mutex<T>) -> MutexGuard<'_, T> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}
