//! # Courtside Core
//!
//! Domain types and pure logic for the Courtside booking client: the shapes the
//! backend sends and accepts, the availability window, form validation, ledger
//! arithmetic and local token decoding. Nothing in this crate performs I/O.

pub mod availability;
pub mod directory;
pub mod errors;
pub mod ledger;
pub mod models;
pub mod token;
pub mod validation;
