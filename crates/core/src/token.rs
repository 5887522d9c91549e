//! # Bearer token inspection
//!
//! Reads the payload of the JWT issued by the backend without verifying its
//! signature. The result only drives what the client offers to show; every
//! request is still authorized by the backend.

use base64::{
    Engine as _, alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, general_purpose},
};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::models::user::Role;

const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    general_purpose::NO_PAD.with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// The claims the client cares about.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Claims {
    #[serde(default)]
    pub sub: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    /// Expiry as seconds since the Unix epoch
    #[serde(default)]
    pub exp: Option<i64>,
}

impl Claims {
    /// The role claim, if present and recognised.
    pub fn role(&self) -> Option<Role> {
        self.role.as_deref()?.parse().ok()
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp?, 0)
    }

    /// Tokens without an `exp` claim never expire locally.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at().is_some_and(|expiry| expiry <= now)
    }
}

/// Decodes the payload segment. Anything that is not `header.payload[.signature]`
/// with a base64url JSON payload yields `None`.
pub fn decode_claims(token: &str) -> Option<Claims> {
    let mut segments = token.trim().split('.');
    let (_header, payload) = (segments.next()?, segments.next()?);
    if payload.is_empty() {
        return None;
    }
    let bytes = URL_SAFE_LENIENT.decode(payload).ok()?;
    serde_json::from_slice(&bytes).ok()
}

/// Role hint for routing: `None` for absent, malformed, role-less or expired tokens.
pub fn role_from_token(token: Option<&str>, now: DateTime<Utc>) -> Option<Role> {
    let claims = decode_claims(token?)?;
    if claims.is_expired_at(now) {
        return None;
    }
    claims.role()
}
