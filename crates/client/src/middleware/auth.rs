//! # Request Authorization
//!
//! Every outgoing request passes through [`authorize`], which attaches the
//! session's bearer token when there is one. Requests made while signed out go
//! out bare and the backend decides what to do with them.

use reqwest::RequestBuilder;

use crate::session::SharedSession;

/// Adds `Authorization: Bearer <token>` if the session holds a token.
pub async fn authorize(request: RequestBuilder, session: &SharedSession) -> RequestBuilder {
    let session = session.read().await;
    match session.token() {
        Some(token) => request.bearer_auth(token),
        None => request,
    }
}
