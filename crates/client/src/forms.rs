//! # Form lifecycle
//!
//! Every form moves through the same states:
//!
//! ```text
//! idle -> validating -> submitting -> succeeded | failed -> idle
//! ```
//!
//! A failed submission is never retried; the user edits and submits again. A
//! success shows a banner for [`SUCCESS_BANNER_SECONDS`] and then settles back
//! to idle.

use std::future::Future;

use chrono::{DateTime, Duration, Utc};
use courtside_core::errors::{BookingError, BookingResult};
use tracing::error;

pub const SUCCESS_BANNER_SECONDS: i64 = 5;

#[derive(Debug, Clone, Default, PartialEq)]
pub enum FormPhase {
    #[default]
    Idle,
    Validating,
    Submitting,
    Succeeded {
        at: DateTime<Utc>,
    },
    Failed(Vec<String>),
}

#[derive(Debug, Clone, Default)]
pub struct FormStatus {
    phase: FormPhase,
}

impl FormStatus {
    pub fn phase(&self) -> &FormPhase {
        &self.phase
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.phase, FormPhase::Validating | FormPhase::Submitting)
    }

    /// Messages to show in the error box; empty unless the last attempt failed.
    pub fn errors(&self) -> &[String] {
        match &self.phase {
            FormPhase::Failed(errors) => errors,
            _ => &[],
        }
    }

    pub fn banner_visible(&self, now: DateTime<Utc>) -> bool {
        match self.phase {
            FormPhase::Succeeded { at } => now - at < Duration::seconds(SUCCESS_BANNER_SECONDS),
            _ => false,
        }
    }

    /// Drops an expired success banner.
    pub fn settle(&mut self, now: DateTime<Utc>) {
        if matches!(self.phase, FormPhase::Succeeded { .. }) && !self.banner_visible(now) {
            self.phase = FormPhase::Idle;
        }
    }

    /// The user touched a field: stale errors go away.
    pub fn edit(&mut self) {
        if matches!(self.phase, FormPhase::Failed(_)) {
            self.phase = FormPhase::Idle;
        }
    }

    pub fn reset(&mut self) {
        self.phase = FormPhase::Idle;
    }

    pub fn fail(&mut self, err: &BookingError, fallback: &str) {
        self.phase = FormPhase::Failed(err.messages(fallback));
    }

    /// Runs one submission: `validate` builds the request, `send` delivers it.
    ///
    /// Refuses to start while another submission of the same form is in flight.
    /// Failures are logged and recorded as the form's error messages, using
    /// `fallback` when the backend gave no usable text.
    pub async fn run<R, T, V, S, Fut>(
        &mut self,
        validate: V,
        fallback: &str,
        send: S,
    ) -> BookingResult<T>
    where
        V: FnOnce() -> BookingResult<R>,
        S: FnOnce(R) -> Fut,
        Fut: Future<Output = BookingResult<T>>,
    {
        if self.is_submitting() {
            return Err(BookingError::Busy("form is already being submitted".to_string()));
        }

        self.phase = FormPhase::Validating;
        let request = match validate() {
            Ok(request) => request,
            Err(err) => {
                self.fail(&err, fallback);
                return Err(err);
            }
        };

        self.phase = FormPhase::Submitting;
        match send(request).await {
            Ok(value) => {
                self.phase = FormPhase::Succeeded { at: Utc::now() };
                Ok(value)
            }
            Err(err) => {
                error!("Form submission failed: {}", err);
                self.fail(&err, fallback);
                Err(err)
            }
        }
    }
}
