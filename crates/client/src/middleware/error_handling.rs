//! # Response Error Handling
//!
//! Turns unsuccessful HTTP responses and transport failures into
//! [`BookingError`]s. The backend's own message is preserved so views can show
//! it verbatim.
//!
//! Backends answer errors in a few shapes; all of these yield `Email already exists`:
//!
//! ```text
//! Email already exists
//! "Email already exists"
//! {"error": "Email already exists"}
//! {"message": "Email already exists"}
//! ```

use courtside_core::errors::{BookingError, BookingResult};
use reqwest::Response;
use serde_json::Value;
use tracing::warn;

/// Fields checked, in order, when an error body is a JSON object.
const MESSAGE_FIELDS: [&str; 3] = ["error", "message", "detail"];

/// Passes successful responses through; reads the body of failed ones into an error.
pub async fn check_response(response: Response) -> BookingResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let url = response.url().path().to_string();
    let body = response.text().await.unwrap_or_default();
    let message = readable_text(&body);
    warn!(status = status.as_u16(), path = %url, %message, "Backend rejected request");

    Err(BookingError::Api {
        status: status.as_u16(),
        message,
    })
}

/// Extracts the human-readable part of a response body.
pub fn readable_text(body: &str) -> String {
    let trimmed = body.trim();
    match serde_json::from_str::<Value>(trimmed) {
        Ok(Value::String(text)) => text,
        Ok(Value::Object(map)) => MESSAGE_FIELDS
            .iter()
            .find_map(|field| map.get(*field).and_then(Value::as_str))
            .map(str::to_string)
            .unwrap_or_else(|| trimmed.to_string()),
        _ => trimmed.to_string(),
    }
}

pub fn transport_error(err: reqwest::Error) -> BookingError {
    if err.is_timeout() {
        warn!("Request timed out: {}", err);
        return BookingError::Transport("the server did not answer in time".to_string());
    }
    if err.is_decode() {
        warn!("Unexpected response body: {}", err);
        return BookingError::Transport(format!("unexpected response from server: {err}"));
    }
    warn!("Request failed: {}", err);
    BookingError::Transport(err.to_string())
}
