use std::sync::Arc;

use courtside_client::{
    api::BookingApi,
    views::{directory::DirectoryView, registration::RegistrationView, transactions::TransactionDesk},
};
use courtside_core::{
    directory::RoleFilter,
    ledger,
    models::{transaction::TransactionType, user::Role},
    validation::AdminPasswordFields,
};
use eyre::{Result, eyre};

use crate::{
    handlers::{HandlerContext, account::form_failed, shown},
    render,
};

/// Input of `register-user`.
#[derive(Debug, Clone)]
pub struct Registration {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub confirm: String,
    pub phone: Option<String>,
    pub role: Role,
    pub balance: Option<String>,
}

pub async fn users<A: BookingApi>(
    ctx: &HandlerContext<A>,
    search: Option<String>,
    role: RoleFilter,
) -> Result<String> {
    let mut view = DirectoryView::new(Arc::clone(&ctx.api));
    if let Err(err) = view.load().await {
        let message = view.last_error().unwrap_or_default().to_string();
        return Err(shown(err, message));
    }
    view.filter.search = search.unwrap_or_default();
    view.filter.role = role;

    let mut notice = String::new();
    if view.filter.is_active() && view.visible().is_empty() {
        notice = format!(
            "No users match role {} and search \"{}\"; showing everyone.\n",
            view.filter.role,
            view.filter.search.trim()
        );
        view.clear_filter();
    }
    Ok(format!(
        "{notice}{}",
        render::users(&view.visible(), &view.showing(), view.stats())
    ))
}

pub async fn register<A: BookingApi>(
    ctx: &HandlerContext<A>,
    registration: Registration,
) -> Result<String> {
    let mut view = RegistrationView::new(Arc::clone(&ctx.api));
    view.fields.first_name = registration.first_name;
    view.fields.last_name = registration.last_name;
    view.fields.email = registration.email;
    view.fields.password = registration.password;
    view.fields.confirm_password = registration.confirm;
    view.fields.phone = registration.phone.unwrap_or_default();
    view.fields.role = registration.role;
    if let Some(balance) = registration.balance {
        view.fields.balance = balance;
    }
    let email = view.fields.email.trim().to_lowercase();

    if let Err(err) = view.submit().await {
        return Err(form_failed(&view.status, err));
    }
    Ok(format!("Registered {email} as {}.", registration.role))
}

pub async fn set_password<A: BookingApi>(
    ctx: &HandlerContext<A>,
    user_id: i64,
    password: String,
) -> Result<String> {
    let mut view = DirectoryView::new(Arc::clone(&ctx.api));
    let fields = AdminPasswordFields {
        user_id,
        new_password: password,
    };
    if let Err(err) = view.reset_password(fields).await {
        return Err(form_failed(&view.password, err));
    }
    Ok(format!("Password changed for user #{user_id}."))
}

pub async fn transactions<A: BookingApi>(
    ctx: &HandlerContext<A>,
    user_id: Option<i64>,
) -> Result<String> {
    let mut desk = TransactionDesk::new(Arc::clone(&ctx.api));

    let Some(user_id) = user_id else {
        let all = desk
            .all_transactions()
            .await
            .map_err(|err| {
                let message = err.user_message("Failed to load transactions. Please try again.");
                shown(err, message)
            })?;
        return Ok(render::transactions(&all));
    };

    if let Err(err) = desk.load_users().await {
        let message = desk.last_error().unwrap_or_default().to_string();
        return Err(shown(err, message));
    }
    desk.select_user(user_id).await;
    let user = desk
        .selected_user()
        .ok_or_else(|| eyre!("No client with id #{user_id}"))?;

    Ok(format!(
        "{} (balance {})\n{}",
        user.full_name(),
        ledger::format_money(user.balance_or_zero()),
        render::transactions(desk.history())
    ))
}

pub async fn charge<A: BookingApi>(
    ctx: &HandlerContext<A>,
    user_id: i64,
    kind: TransactionType,
    amount: String,
    description: String,
) -> Result<String> {
    let mut desk = TransactionDesk::new(Arc::clone(&ctx.api));
    if let Err(err) = desk.load_users().await {
        let message = desk.last_error().unwrap_or_default().to_string();
        return Err(shown(err, message));
    }
    if !desk.users().iter().any(|user| user.id == user_id) {
        return Err(eyre!("No client with id #{user_id}"));
    }
    desk.select_user(user_id).await;
    desk.fields.transaction_type = kind;
    desk.fields.amount = amount;
    desk.fields.description = description;

    let before = desk
        .selected_user()
        .zip(desk.preview())
        .map(|(user, preview)| render::preview(user, &preview));

    if let Err(err) = desk.submit().await {
        return Err(form_failed(&desk.status, err));
    }

    let mut out = String::from("Transaction recorded.");
    if let Some(before) = before {
        out = format!("{out}\n{before}");
    }
    if let Some(user) = desk.selected_user() {
        out = format!(
            "{out}\nNew balance: {}",
            ledger::format_money(user.balance_or_zero())
        );
    }
    Ok(out)
}
