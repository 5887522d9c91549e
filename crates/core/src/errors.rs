use thiserror::Error;

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Validation error: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Authorization error: {0}")]
    Authorization(String),

    #[error("Request failed with status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Token storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Another action is still pending: {0}")]
    Busy(String),

    #[error("Internal error: {0}")]
    Internal(#[from] eyre::Report),
}

impl BookingError {
    pub fn validation(message: impl Into<String>) -> Self {
        BookingError::Validation(vec![message.into()])
    }

    /// The text a view shows for this failure.
    ///
    /// Backend messages are surfaced verbatim, validation messages are joined,
    /// everything else collapses to `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            BookingError::Api { message, .. } if !message.trim().is_empty() => message.clone(),
            BookingError::Validation(messages) if !messages.is_empty() => messages.join("\n"),
            BookingError::Authentication(message) | BookingError::Authorization(message) => {
                message.clone()
            }
            _ => fallback.to_string(),
        }
    }

    /// Messages to list in a form's error box.
    pub fn messages(&self, fallback: &str) -> Vec<String> {
        match self {
            BookingError::Validation(messages) if !messages.is_empty() => messages.clone(),
            other => vec![other.user_message(fallback)],
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, BookingError::Api { status: 401, .. } | BookingError::Authentication(_))
    }
}

pub type BookingResult<T> = Result<T, BookingError>;
