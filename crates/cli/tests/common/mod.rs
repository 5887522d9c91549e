#![allow(dead_code)]

use std::sync::Arc;

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{NaiveDate, NaiveTime};
use courtside_cli::handlers::HandlerContext;
use courtside_client::{
    mock::MockBookingApi,
    session::{MemoryTokenStore, Session},
};
use courtside_core::models::{
    time_slot::TimeSlot,
    transaction::{Transaction, TransactionType},
    user::{Role, User},
};
use serde_json::json;

pub const LOOKAHEAD_DAYS: u32 = 7;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn today() -> NaiveDate {
    date(2024, 1, 10)
}

pub fn slot(id: i64, on: NaiveDate, hour: u32, booked_by: Option<i64>) -> TimeSlot {
    TimeSlot {
        id,
        date: on,
        start_time: NaiveTime::from_hms_opt(hour, 0, 0).unwrap(),
        end_time: NaiveTime::from_hms_opt(hour + 1, 0, 0).unwrap(),
        is_booked: booked_by.is_some(),
        booked_by,
        booked_by_user: None,
    }
}

pub fn user(id: i64, first: &str, last: &str, role: Role, balance: Option<f64>) -> User {
    User {
        id,
        first_name: first.to_string(),
        last_name: last.to_string(),
        email: format!("{}@example.com", first.to_lowercase()),
        phone: None,
        balance,
        role,
        created_at: None,
    }
}

pub fn transaction(id: i64, user_id: i64, kind: TransactionType, amount: f64) -> Transaction {
    Transaction {
        id,
        user_id,
        amount,
        transaction_type: kind,
        description: "Lesson".to_string(),
        created_at: None,
        user_name: None,
    }
}

/// An unsigned JWT carrying `role` and, optionally, an `exp` timestamp.
pub fn token_for(role: &str, exp: Option<i64>) -> String {
    let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#);
    let mut claims = json!({ "sub": "someone@example.com", "role": role });
    if let Some(exp) = exp {
        claims["exp"] = json!(exp);
    }
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
    format!("{header}.{payload}.signature")
}

/// Handler context over `api`, signed in as `role` when given.
pub fn context(api: MockBookingApi, role: Option<&str>) -> HandlerContext<MockBookingApi> {
    let store = match role {
        Some(role) => MemoryTokenStore::with_token(token_for(role, None)),
        None => MemoryTokenStore::default(),
    };
    HandlerContext {
        api: Arc::new(api),
        session: Session::restore(store).unwrap().into_shared(),
        today: today(),
        lookahead_days: LOOKAHEAD_DAYS,
    }
}
