/// Bearer token decoration for outgoing requests
pub mod auth;
/// Mapping of failed responses and transport errors to `BookingError`
pub mod error_handling;
