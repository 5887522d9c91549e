//! Plain-text rendering of view state. Everything here is pure so the output
//! can be checked without a terminal.

use std::fmt::Write;

use chrono::{DateTime, Utc};
use courtside_client::{routes::Route, views::availability::SlotRow};
use courtside_core::{
    availability::{BookingHistory, DaySummary},
    directory::UserStats,
    ledger::{self, BalancePreview},
    models::{
        time_slot::TimeSlot,
        transaction::Transaction,
        user::{Role, User},
    },
    token::Claims,
};

/// One line per day of the window.
pub fn week(days: &[DaySummary], role: Role) -> String {
    let mut out = String::new();
    for summary in days {
        let marker = if summary.day.is_today { " (today)" } else { "" };
        let counts = match role {
            Role::Admin => format!(
                "{} slots, {} booked",
                summary.listed, summary.booked
            ),
            Role::User => format!("{} open, {} mine", summary.listed, summary.mine),
        };
        let _ = writeln!(
            out,
            "{}  {:<20}{counts}",
            summary.day.date_string,
            format!("{}{marker}", summary.day.label()),
        );
    }
    out.trim_end().to_string()
}

fn slot_state(slot: &TimeSlot, owned: bool) -> String {
    if owned {
        "yours".to_string()
    } else if slot.is_free() {
        "free".to_string()
    } else {
        match slot.holder_name() {
            Some(name) => format!("booked by {name}"),
            None => "booked".to_string(),
        }
    }
}

/// The slots of one day with the actions each offers.
pub fn day(label: &str, rows: &[SlotRow]) -> String {
    if rows.is_empty() {
        return format!("{label}\n  No time slots.");
    }

    let mut out = format!("{label}\n");
    for row in rows {
        let actions = match row.pending {
            Some(pending) => pending.to_string(),
            None => row
                .actions
                .iter()
                .map(|action| format!("[{}]", action.label()))
                .collect::<Vec<_>>()
                .join(" "),
        };
        let _ = writeln!(
            out,
            "  #{:<5} {}  {:<24} {actions}",
            row.slot.id,
            row.slot.time_range(),
            slot_state(&row.slot, row.owned),
        );
    }
    out.trim_end().to_string()
}

fn booking_lines(out: &mut String, title: &str, slots: &[TimeSlot]) {
    let _ = writeln!(out, "{title} ({})", slots.len());
    if slots.is_empty() {
        let _ = writeln!(out, "  none");
    }
    for slot in slots {
        let _ = writeln!(out, "  {}  {}", slot.date, slot.time_range());
    }
}

pub fn profile(user: &User, history: &BookingHistory) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} [{}]", user.full_name(), user.initials());
    let _ = writeln!(out, "  Email:   {}", user.email);
    let _ = writeln!(out, "  Phone:   {}", user.phone.as_deref().unwrap_or("-"));
    let _ = writeln!(
        out,
        "  Balance: {}",
        ledger::format_money(user.balance_or_zero())
    );
    if let Some(since) = user.created_at {
        let _ = writeln!(out, "  Member since {}", since.format("%Y-%m-%d"));
    }
    let _ = writeln!(out);
    booking_lines(&mut out, "Upcoming lessons", &history.upcoming);
    booking_lines(&mut out, "Past lessons", &history.past);
    out.trim_end().to_string()
}

pub fn users(visible: &[&User], showing: &str, stats: UserStats) -> String {
    let mut out = format!(
        "{} users: {} admins, {} clients\n",
        stats.total, stats.admins, stats.users
    );
    for user in visible {
        let _ = writeln!(
            out,
            "  #{:<5} {:<24} {:<30} {:<6} {}",
            user.id,
            user.full_name(),
            user.email,
            user.role,
            ledger::format_money(user.balance_or_zero()),
        );
    }
    out.push_str(showing);
    out
}

pub fn transactions(history: &[Transaction]) -> String {
    if history.is_empty() {
        return "No transactions.".to_string();
    }

    let mut out = String::new();
    for tx in history {
        let when = tx
            .created_at
            .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string());
        let who = tx.user_name.as_deref().unwrap_or_default();
        let _ = writeln!(
            out,
            "  {when:<16}  {:>12}  {}{}",
            ledger::describe(tx),
            tx.description,
            if who.is_empty() { String::new() } else { format!(" ({who})") },
        );
    }
    let _ = write!(
        out,
        "Net change: {}",
        ledger::format_money(ledger::net_change(history))
    );
    out
}

pub fn preview(user: &User, preview: &BalancePreview) -> String {
    let mut out = format!(
        "{}: {} {} = {}",
        user.full_name(),
        ledger::format_money(preview.current),
        ledger::signed_amount(preview.kind, preview.amount),
        ledger::format_money(preview.resulting),
    );
    if preview.goes_negative() {
        out.push_str(" (balance goes negative)");
    }
    out
}

pub fn whoami(token: Option<&str>, claims: Option<&Claims>, now: DateTime<Utc>) -> String {
    if token.is_none() {
        return "Not logged in.".to_string();
    }
    let Some(claims) = claims else {
        return "Stored session is unreadable; log in again.".to_string();
    };
    if claims.is_expired_at(now) {
        return "Session expired; log in again.".to_string();
    }

    let who = claims.sub.as_deref().unwrap_or("unknown user");
    let role = claims
        .role()
        .map(|role| role.to_string())
        .unwrap_or_else(|| "no role".to_string());
    match claims.expires_at() {
        Some(expiry) => format!(
            "Logged in as {who} ({role}) until {}",
            expiry.format("%Y-%m-%d %H:%M UTC")
        ),
        None => format!("Logged in as {who} ({role})"),
    }
}

/// Text for pages that have nothing to fetch.
pub fn page(route: Route) -> String {
    let body = match route {
        Route::Home => {
            "Private tennis lessons, booked by the hour.\n\
             Run `courtside login` to see open slots."
        }
        Route::About => "One coach, one court, lessons for every level.",
        Route::Contact => "Questions about lessons or your balance? Ask your coach.",
        Route::Login => "Log in with `courtside login --email <email>`.",
        Route::ForgotPassword => {
            "Request a reset link with `courtside forgot-password --email <email>`."
        }
        Route::ResetPassword => {
            "Set a new password with `courtside reset-password --token <token> \
             --password <new> --confirm <new>`."
        }
        Route::AdminRegisterUser => {
            "Create an account with `courtside register-user --first-name ... \
             --last-name ... --email ... --password ... --confirm ...`."
        }
        _ => "",
    };
    format!("{}\n{body}", route.title()).trim_end().to_string()
}
