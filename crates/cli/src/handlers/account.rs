use std::sync::Arc;

use chrono::Utc;
use courtside_client::{
    api::BookingApi,
    forms::FormStatus,
    routes::Route,
    views::password::{ForgotPasswordView, LoginView, ResetPasswordView},
};
use courtside_core::errors::BookingError;
use eyre::Result;

use crate::{
    handlers::{HandlerContext, shown, shown_as_is},
    render,
};

/// The form's own error box, one message per line.
fn form_message(status: &FormStatus, err: &BookingError) -> String {
    match status.errors() {
        [] => err.user_message(&err.to_string()),
        errors => errors.join("\n"),
    }
}

pub(crate) fn form_failed(status: &FormStatus, err: BookingError) -> eyre::Report {
    let message = form_message(status, &err);
    shown(err, message)
}

/// Failures of forms sent without a session: a 401 there is about the
/// credentials or reset token, not the stored login.
fn credentials_failed(status: &FormStatus, err: BookingError) -> eyre::Report {
    let message = form_message(status, &err);
    shown_as_is(err, message)
}

pub async fn login<A: BookingApi>(
    ctx: &HandlerContext<A>,
    email: String,
    password: String,
) -> Result<String> {
    let mut view = LoginView::new(Arc::clone(&ctx.api));
    view.fields.email = email;
    view.fields.password = password;

    let landing = view
        .submit()
        .await
        .map_err(|err| credentials_failed(&view.status, err))?;
    Ok(format!(
        "Logged in. Your start page is {}: courtside open {}",
        landing.title(),
        landing.path()
    ))
}

pub async fn logout<A: BookingApi>(ctx: &HandlerContext<A>) -> Result<String> {
    ctx.session.write().await.sign_out()?;
    Ok("Logged out.".to_string())
}

pub async fn whoami<A: BookingApi>(ctx: &HandlerContext<A>) -> Result<String> {
    let session = ctx.session.read().await;
    Ok(render::whoami(
        session.token(),
        session.claims().as_ref(),
        Utc::now(),
    ))
}

pub async fn forgot_password<A: BookingApi>(
    ctx: &HandlerContext<A>,
    email: String,
) -> Result<String> {
    let mut view = ForgotPasswordView::new(Arc::clone(&ctx.api));
    view.fields.email = email;

    view.submit()
        .await
        .map_err(|err| credentials_failed(&view.status, err))
}

pub async fn reset_password<A: BookingApi>(
    ctx: &HandlerContext<A>,
    token: Option<String>,
    password: String,
    confirm: String,
) -> Result<String> {
    let mut view = ResetPasswordView::new(Arc::clone(&ctx.api), token);
    if let Some(route) = view.redirect() {
        return Ok(format!(
            "Reset token is missing; use the link from your email.\n\n{}",
            render::page(route)
        ));
    }
    view.fields.new_password = password;
    view.fields.confirm_password = confirm;

    let message = view
        .submit()
        .await
        .map_err(|err| credentials_failed(&view.status, err))?;
    Ok(format!("{message}\n\n{}", render::page(Route::Login)))
}
