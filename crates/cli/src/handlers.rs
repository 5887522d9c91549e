use std::sync::Arc;

use chrono::NaiveDate;
use courtside_client::{
    api::BookingApi,
    routes::{self, Route},
    session::SharedSession,
};
use courtside_core::{errors::BookingError, models::user::Role};
use eyre::{Result, eyre};
use tracing::{info, warn};

use crate::commands::{Command, ProfileAction};

pub mod account;
pub mod admin;
pub mod pages;
pub mod profile;
pub mod slots;

/// Shared context for command handlers.
pub struct HandlerContext<A> {
    pub api: Arc<A>,
    pub session: SharedSession,
    /// Local calendar date the views treat as today
    pub today: NaiveDate,
    pub lookahead_days: u32,
}

impl<A: BookingApi> HandlerContext<A> {
    pub async fn role(&self) -> Option<Role> {
        self.session.read().await.role()
    }
}

/// Refuses a command whose page the current role may not open.
pub fn gate(route: Route, role: Option<Role>) -> Result<()> {
    let resolution = routes::resolve(route.path(), role);
    if !resolution.redirected {
        return Ok(());
    }
    match role {
        None => Err(eyre!(
            "{} requires you to log in first: courtside login --email <email>",
            route.title()
        )),
        Some(role) => Err(eyre!(
            "{} is not available to {} accounts",
            route.title(),
            role
        )),
    }
}

/// Turns a failed view action into the message the view would show.
///
/// A 401 here means the stored token was refused, so the message gains a hint
/// to log in again.
pub(crate) fn shown(err: BookingError, message: impl Into<String>) -> eyre::Report {
    let message = message.into();
    if err.is_unauthorized() {
        warn!("Backend rejected the session: {}", err);
        return eyre::Report::new(err).wrap_err(format!(
            "{message}\nYour session is no longer valid; log in again."
        ));
    }
    eyre::Report::new(err).wrap_err(message)
}

/// Like [`shown`], for requests that carry no session, such as logging in.
pub(crate) fn shown_as_is(err: BookingError, message: impl Into<String>) -> eyre::Report {
    eyre::Report::new(err).wrap_err(message.into())
}

/// Runs one command after checking it against the session's role.
pub async fn dispatch<A: BookingApi>(ctx: &HandlerContext<A>, command: Command) -> Result<String> {
    let role = ctx.role().await;
    let route = command.route(role);
    if let Some(route) = route {
        gate(route, role)?;
    }
    info!(?route, ?role, "Running command");

    match command {
        Command::Login { email, password } => account::login(ctx, email, password).await,
        Command::Logout => account::logout(ctx).await,
        Command::Whoami => account::whoami(ctx).await,
        Command::Open { path } => pages::open(ctx, &path).await,
        Command::Week => slots::week(ctx).await,
        Command::Day { date } => slots::day(ctx, date).await,
        Command::Book { slot_id } => slots::book(ctx, slot_id).await,
        Command::Unbook { slot_id } => slots::unbook(ctx, slot_id).await,
        Command::AddSlot { date, start, end } => slots::add(ctx, date, start, end).await,
        Command::DeleteSlot { slot_id } => slots::delete(ctx, slot_id).await,
        Command::Profile { action } => match action.unwrap_or(ProfileAction::Show) {
            ProfileAction::Show => profile::show(ctx).await,
            ProfileAction::Update {
                first_name,
                last_name,
                email,
                phone,
            } => profile::update(ctx, first_name, last_name, email, phone).await,
        },
        Command::Users { search, role } => admin::users(ctx, search, role).await,
        Command::RegisterUser {
            first_name,
            last_name,
            email,
            password,
            confirm,
            phone,
            role,
            balance,
        } => {
            admin::register(
                ctx,
                admin::Registration {
                    first_name,
                    last_name,
                    email,
                    password,
                    confirm,
                    phone,
                    role,
                    balance,
                },
            )
            .await
        }
        Command::SetPassword { user_id, password } => {
            admin::set_password(ctx, user_id, password).await
        }
        Command::Transactions { user_id } => admin::transactions(ctx, user_id).await,
        Command::Charge {
            user_id,
            kind,
            amount,
            description,
        } => admin::charge(ctx, user_id, kind, amount, description).await,
        Command::ForgotPassword { email } => account::forgot_password(ctx, email).await,
        Command::ResetPassword {
            token,
            password,
            confirm,
        } => account::reset_password(ctx, token, password, confirm).await,
    }
}
