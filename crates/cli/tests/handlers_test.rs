mod common;

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use common::{LOOKAHEAD_DAYS, context, date, slot, today, token_for, transaction, user};
use courtside_cli::{
    commands::{Command, ProfileAction},
    handlers::dispatch,
};
use courtside_client::mock::MockBookingApi;
use courtside_core::{
    directory::RoleFilter,
    errors::BookingError,
    models::{transaction::TransactionType, user::Role},
};
use mockall::predicate::eq;
use pretty_assertions::assert_eq;

fn ana(balance: f64) -> courtside_core::models::user::User {
    user(2, "Ana", "Silva", Role::User, Some(balance))
}

#[tokio::test]
async fn test_signed_out_week_asks_to_log_in() {
    let ctx = context(MockBookingApi::new(), None);

    let err = dispatch(&ctx, Command::Week).await.unwrap_err();

    assert_eq!(
        err.to_string(),
        "Book a lesson requires you to log in first: courtside login --email <email>"
    );
}

#[tokio::test]
async fn test_client_cannot_run_coach_commands() {
    let mut api = MockBookingApi::new();
    api.expect_all_users().never();
    let ctx = context(api, Some("USER"));

    let err = dispatch(
        &ctx,
        Command::Users {
            search: None,
            role: RoleFilter::All,
        },
    )
    .await
    .unwrap_err();

    assert_eq!(err.to_string(), "All users is not available to USER accounts");
}

#[tokio::test]
async fn test_users_filter_narrows_the_list() {
    let mut api = MockBookingApi::new();
    api.expect_all_users().returning(|| {
        Ok(vec![ana(40.0), user(1, "Coach", "Lee", Role::Admin, None)])
    });
    let ctx = context(api, Some("ADMIN"));

    let out = dispatch(
        &ctx,
        Command::Users {
            search: Some("SILVA".to_string()),
            role: RoleFilter::All,
        },
    )
    .await
    .unwrap();

    assert!(out.starts_with("2 users: 1 admins, 1 clients\n"));
    assert!(out.contains("ana@example.com"));
    assert!(!out.contains("coach@example.com"));
    assert!(out.ends_with("Showing 1 of 2 users"));
}

#[tokio::test]
async fn test_users_filter_without_matches_shows_everyone() {
    let mut api = MockBookingApi::new();
    api.expect_all_users().returning(|| {
        Ok(vec![ana(40.0), user(1, "Coach", "Lee", Role::Admin, None)])
    });
    let ctx = context(api, Some("ADMIN"));

    let out = dispatch(
        &ctx,
        Command::Users {
            search: Some("zed".to_string()),
            role: RoleFilter::Only(Role::User),
        },
    )
    .await
    .unwrap();

    assert!(out.starts_with("No users match role USER and search \"zed\"; showing everyone.\n"));
    assert!(out.contains("coach@example.com"));
    assert!(out.ends_with("Showing 2 of 2 users"));
}

#[tokio::test]
async fn test_coach_week_overview() {
    let mut api = MockBookingApi::new();
    api.expect_my_time_slots().returning(|| Ok(Vec::new()));
    api.expect_all_time_slots()
        .with(eq(LOOKAHEAD_DAYS))
        .returning(|_| Ok(vec![slot(1, today(), 9, None), slot(2, today(), 10, Some(3))]));
    api.expect_free_time_slots().never();
    let ctx = context(api, Some("ADMIN"));

    let out = dispatch(&ctx, Command::Week).await.unwrap();

    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[0], "Your coaching week");
    assert!(lines[1].contains("(today)"));
    assert!(lines[1].ends_with("2 slots, 1 booked"));
    assert_eq!(lines.len(), 1 + LOOKAHEAD_DAYS as usize);
}

#[tokio::test]
async fn test_book_shows_the_day_afterwards() {
    let tomorrow = date(2024, 1, 11);
    let booked = Arc::new(AtomicUsize::new(0));
    let mut api = MockBookingApi::new();
    let seen = Arc::clone(&booked);
    api.expect_book_time_slot()
        .with(eq(5))
        .times(1)
        .returning(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });
    let seen = Arc::clone(&booked);
    api.expect_my_time_slots().returning(move || {
        if seen.load(Ordering::SeqCst) > 0 {
            Ok(vec![slot(5, tomorrow, 9, Some(2))])
        } else {
            Ok(Vec::new())
        }
    });
    api.expect_free_time_slots().returning(|_| Ok(Vec::new()));
    let ctx = context(api, Some("USER"));

    let out = dispatch(&ctx, Command::Book { slot_id: 5 }).await.unwrap();

    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[0], "Booked slot #5.");
    assert_eq!(lines[2], "Thu 11 Jan");
    assert!(lines[3].contains("yours"));
    assert!(lines[3].ends_with("[Cancel booking]"));
}

#[tokio::test]
async fn test_rejected_session_suggests_logging_in_again() {
    let mut api = MockBookingApi::new();
    api.expect_unbook_time_slot().returning(|_| {
        Err(BookingError::Api {
            status: 401,
            message: "Unauthorized".to_string(),
        })
    });
    api.expect_my_time_slots().returning(|| Ok(Vec::new()));
    api.expect_free_time_slots().returning(|_| Ok(Vec::new()));
    let ctx = context(api, Some("USER"));

    let err = dispatch(&ctx, Command::Unbook { slot_id: 5 }).await.unwrap_err();

    assert_eq!(
        err.to_string(),
        "Unauthorized\nYour session is no longer valid; log in again."
    );
}

#[tokio::test]
async fn test_invalid_slot_is_not_sent() {
    let mut api = MockBookingApi::new();
    api.expect_add_time_slot().never();
    let ctx = context(api, Some("ADMIN"));

    let result = dispatch(
        &ctx,
        Command::AddSlot {
            date: "2024-01-12".to_string(),
            start: "11:00".to_string(),
            end: "10:00".to_string(),
        },
    )
    .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_charge_previews_and_reports_new_balance() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut api = MockBookingApi::new();
    let seen = Arc::clone(&calls);
    api.expect_all_users().returning(move || {
        let balance = if seen.fetch_add(1, Ordering::SeqCst) == 0 {
            40.0
        } else {
            24.5
        };
        Ok(vec![ana(balance), user(1, "Coach", "Lee", Role::Admin, None)])
    });
    api.expect_user_transactions()
        .with(eq(2))
        .returning(|_| Ok(Vec::new()));
    api.expect_create_transaction()
        .withf(|tx| {
            tx.user_id == 2
                && tx.transaction_type == TransactionType::Subtract
                && tx.amount == 15.5
                && tx.description == "Lesson"
        })
        .times(1)
        .returning(|_| Ok(()));
    let ctx = context(api, Some("ADMIN"));

    let out = dispatch(
        &ctx,
        Command::Charge {
            user_id: 2,
            kind: TransactionType::Subtract,
            amount: "15.50".to_string(),
            description: "Lesson".to_string(),
        },
    )
    .await
    .unwrap();

    assert_eq!(
        out,
        "Transaction recorded.\nAna Silva: $40.00 -$15.50 = $24.50\nNew balance: $24.50"
    );
}

#[tokio::test]
async fn test_charge_unknown_client() {
    let mut api = MockBookingApi::new();
    api.expect_all_users()
        .returning(|| Ok(vec![user(1, "Coach", "Lee", Role::Admin, None)]));
    api.expect_create_transaction().never();
    let ctx = context(api, Some("ADMIN"));

    let err = dispatch(
        &ctx,
        Command::Charge {
            user_id: 1,
            kind: TransactionType::Add,
            amount: "10".to_string(),
            description: "Top up".to_string(),
        },
    )
    .await
    .unwrap_err();

    assert_eq!(err.to_string(), "No client with id #1");
}

#[tokio::test]
async fn test_charge_validation_lists_every_problem() {
    let mut api = MockBookingApi::new();
    api.expect_all_users().returning(|| Ok(vec![ana(40.0)]));
    api.expect_user_transactions().returning(|_| Ok(Vec::new()));
    api.expect_create_transaction().never();
    let ctx = context(api, Some("ADMIN"));

    let err = dispatch(
        &ctx,
        Command::Charge {
            user_id: 2,
            kind: TransactionType::Add,
            amount: "-3".to_string(),
            description: "x".to_string(),
        },
    )
    .await
    .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Amount must be a positive number\nDescription must be at least 3 characters long"
    );
}

#[tokio::test]
async fn test_transactions_for_one_client() {
    let mut api = MockBookingApi::new();
    api.expect_all_users().returning(|| Ok(vec![ana(40.0)]));
    api.expect_user_transactions()
        .with(eq(2))
        .returning(|_| Ok(vec![transaction(1, 2, TransactionType::Add, 20.0)]));
    let ctx = context(api, Some("ADMIN"));

    let out = dispatch(&ctx, Command::Transactions { user_id: Some(2) })
        .await
        .unwrap();

    assert!(out.starts_with("Ana Silva (balance $40.00)\n"));
    assert!(out.ends_with("Net change: $20.00"));
}

#[tokio::test]
async fn test_register_user_normalizes_and_defaults_balance() {
    let mut api = MockBookingApi::new();
    api.expect_register_user()
        .withf(|request| {
            request.email == "ana@example.com"
                && request.balance == 0.0
                && request.role == Role::User
                && request.phone.is_none()
        })
        .times(1)
        .returning(|_| Ok(()));
    let ctx = context(api, Some("ADMIN"));

    let out = dispatch(
        &ctx,
        Command::RegisterUser {
            first_name: "Ana".to_string(),
            last_name: "Silva".to_string(),
            email: "  Ana@Example.com ".to_string(),
            password: "secret1".to_string(),
            confirm: "secret1".to_string(),
            phone: None,
            role: Role::User,
            balance: None,
        },
    )
    .await
    .unwrap();

    assert_eq!(out, "Registered ana@example.com as USER.");
}

#[tokio::test]
async fn test_short_admin_password_is_not_sent() {
    let mut api = MockBookingApi::new();
    api.expect_reset_user_password().never();
    let ctx = context(api, Some("ADMIN"));

    let err = dispatch(
        &ctx,
        Command::SetPassword {
            user_id: 2,
            password: "abc".to_string(),
        },
    )
    .await
    .unwrap_err();

    assert_eq!(err.to_string(), "Password must be at least 6 characters long");
}

#[tokio::test]
async fn test_profile_update_keeps_unchanged_fields() {
    let mut api = MockBookingApi::new();
    api.expect_profile()
        .returning(|| Ok(user(2, "Ana", "Silva", Role::User, Some(5.0))));
    api.expect_my_time_slots().returning(|| Ok(Vec::new()));
    api.expect_update_profile()
        .withf(|update| {
            update.first_name == "Ana"
                && update.last_name == "Silva"
                && update.email == "ana@example.com"
                && update.phone.as_deref() == Some("555-0100")
        })
        .times(1)
        .returning(|_| Ok(()));
    let ctx = context(api, Some("USER"));

    let out = dispatch(
        &ctx,
        Command::Profile {
            action: Some(ProfileAction::Update {
                first_name: None,
                last_name: None,
                email: None,
                phone: Some("555-0100".to_string()),
            }),
        },
    )
    .await
    .unwrap();

    assert!(out.starts_with("Profile updated.\n\nAna Silva [AS]"));
}

#[tokio::test]
async fn test_login_points_to_role_home() {
    let mut api = MockBookingApi::new();
    api.expect_login()
        .times(1)
        .returning(|_| Ok(token_for("ADMIN", None)));
    let ctx = context(api, None);

    let out = dispatch(
        &ctx,
        Command::Login {
            email: "coach@example.com".to_string(),
            password: "secret1".to_string(),
        },
    )
    .await
    .unwrap();

    assert_eq!(
        out,
        "Logged in. Your start page is Coach dashboard: courtside open /admin-dash"
    );
}

#[tokio::test]
async fn test_rejected_login_shows_backend_message_only() {
    let mut api = MockBookingApi::new();
    api.expect_login().times(1).returning(|_| {
        Err(BookingError::Api {
            status: 401,
            message: "Invalid email or password".to_string(),
        })
    });
    let ctx = context(api, None);

    let err = dispatch(
        &ctx,
        Command::Login {
            email: "coach@example.com".to_string(),
            password: "wrong-pass".to_string(),
        },
    )
    .await
    .unwrap_err();

    assert_eq!(err.to_string(), "Invalid email or password");
}

#[tokio::test]
async fn test_expired_reset_token_shows_backend_message_only() {
    let mut api = MockBookingApi::new();
    api.expect_reset_password().times(1).returning(|_| {
        Err(BookingError::Api {
            status: 401,
            message: "Token expired".to_string(),
        })
    });
    let ctx = context(api, None);

    let err = dispatch(
        &ctx,
        Command::ResetPassword {
            token: Some("abc123".to_string()),
            password: "newpass1".to_string(),
            confirm: "newpass1".to_string(),
        },
    )
    .await
    .unwrap_err();

    assert_eq!(err.to_string(), "Token expired");
}

#[tokio::test]
async fn test_logout_and_whoami() {
    let ctx = context(MockBookingApi::new(), Some("USER"));

    let before = dispatch(&ctx, Command::Whoami).await.unwrap();
    let out = dispatch(&ctx, Command::Logout).await.unwrap();
    let after = dispatch(&ctx, Command::Whoami).await.unwrap();

    assert_eq!(before, "Logged in as someone@example.com (USER)");
    assert_eq!(out, "Logged out.");
    assert!(!ctx.session.read().await.is_authenticated());
    assert_eq!(after, "Not logged in.");
}

#[tokio::test]
async fn test_reset_password_needs_a_token() {
    let mut api = MockBookingApi::new();
    api.expect_reset_password().never();
    let ctx = context(api, None);

    let out = dispatch(
        &ctx,
        Command::ResetPassword {
            token: None,
            password: "newpass1".to_string(),
            confirm: "newpass1".to_string(),
        },
    )
    .await
    .unwrap();

    assert!(out.starts_with("Reset token is missing; use the link from your email.\n\nLog in"));
}

#[tokio::test]
async fn test_reset_password_relays_backend_reply() {
    let mut api = MockBookingApi::new();
    api.expect_reset_password()
        .withf(|request| request.token == "abc123" && request.new_password == "newpass1")
        .times(1)
        .returning(|_| Ok("Password has been reset".to_string()));
    let ctx = context(api, None);

    let out = dispatch(
        &ctx,
        Command::ResetPassword {
            token: Some("abc123".to_string()),
            password: "newpass1".to_string(),
            confirm: "newpass1".to_string(),
        },
    )
    .await
    .unwrap();

    assert!(out.starts_with("Password has been reset\n\nLog in"));
}

#[tokio::test]
async fn test_open_unknown_path_lands_home() {
    let ctx = context(MockBookingApi::new(), None);

    let out = dispatch(
        &ctx,
        Command::Open {
            path: "/nowhere".to_string(),
        },
    )
    .await
    .unwrap();

    assert!(out.starts_with("/nowhere is not available; showing /.\n\nHome\n"));
}

#[tokio::test]
async fn test_open_forbidden_page_lands_on_own_dashboard() {
    let mut api = MockBookingApi::new();
    api.expect_all_users().never();
    api.expect_my_time_slots().returning(|| Ok(Vec::new()));
    api.expect_free_time_slots().returning(|_| Ok(Vec::new()));
    let ctx = context(api, Some("USER"));

    let out = dispatch(
        &ctx,
        Command::Open {
            path: "/admin/users".to_string(),
        },
    )
    .await
    .unwrap();

    assert!(out.starts_with("/admin/users is not available; showing /user-dash.\n\nOpen lessons\n"));
}

#[tokio::test]
async fn test_open_reset_link() {
    let ctx = context(MockBookingApi::new(), None);

    let with_token = dispatch(
        &ctx,
        Command::Open {
            path: "/reset-password?token=abc123".to_string(),
        },
    )
    .await
    .unwrap();
    let without = dispatch(
        &ctx,
        Command::Open {
            path: "/reset-password".to_string(),
        },
    )
    .await
    .unwrap();

    assert!(with_token.starts_with("Reset password\n"));
    assert!(with_token.contains("--token abc123"));
    assert!(without.starts_with("Reset token is missing; use the link from your email.\n\nLog in"));
}
