//! # Form validation
//!
//! Field-level checks run before anything is sent to the backend. Each form's
//! raw input is kept as typed text so the checks can report exactly what a user
//! typed wrong; `into_*`/`to_*` helpers produce the normalized request body once
//! the fields pass.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::{
    errors::{BookingError, BookingResult},
    models::{
        auth::{ForgotPasswordRequest, LoginRequest, ResetPasswordRequest},
        serde_helpers::clock,
        time_slot::NewTimeSlot,
        transaction::{NewTransaction, TransactionType},
        user::{PasswordResetByAdmin, ProfileUpdate, RegisterUserRequest, Role, User},
    },
};

pub const MIN_PASSWORD_LEN: usize = 6;
pub const MAX_TRANSACTION_AMOUNT: f64 = 999_999.99;
pub const MIN_DESCRIPTION_LEN: usize = 3;

static EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern is valid"));

/// Loose `something@domain.tld` check; the backend does the real validation.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_SHAPE.is_match(email.trim())
}

/// A set of form fields that can report its own problems.
pub trait Validate {
    /// Every problem with the current input, in display order. Empty means valid.
    fn validate(&self) -> Vec<String>;

    fn check(&self) -> BookingResult<()> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(BookingError::Validation(errors))
        }
    }
}

fn check_password(password: &str, confirmation: Option<&str>, errors: &mut Vec<String>) {
    if password.is_empty() {
        errors.push("Password is required".to_string());
    } else if password.chars().count() < MIN_PASSWORD_LEN {
        errors.push(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters long"
        ));
    }
    if let Some(confirmation) = confirmation {
        if password != confirmation {
            errors.push("Passwords do not match".to_string());
        }
    }
}

fn check_email(email: &str, errors: &mut Vec<String>) {
    if email.trim().is_empty() {
        errors.push("Email is required".to_string());
    } else if !is_valid_email(email) {
        errors.push("Please enter a valid email address".to_string());
    }
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Parses a money amount. Blank input is `Some(0.0)`; garbage or non-finite is `None`.
pub fn parse_balance(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Some(0.0);
    }
    raw.parse::<f64>().ok().filter(|value| value.is_finite())
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegistrationFields {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub phone: String,
    pub role: Role,
    pub balance: String,
}

impl Default for RegistrationFields {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            password: String::new(),
            confirm_password: String::new(),
            phone: String::new(),
            role: Role::User,
            balance: "0".to_string(),
        }
    }
}

impl Validate for RegistrationFields {
    fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.first_name.trim().is_empty() {
            errors.push("First name is required".to_string());
        }
        if self.last_name.trim().is_empty() {
            errors.push("Last name is required".to_string());
        }
        check_email(&self.email, &mut errors);
        check_password(&self.password, Some(&self.confirm_password), &mut errors);
        if parse_balance(&self.balance).is_none() {
            errors.push("Balance must be a valid number".to_string());
        }
        errors
    }
}

impl RegistrationFields {
    pub fn to_request(&self) -> BookingResult<RegisterUserRequest> {
        self.check()?;
        Ok(RegisterUserRequest {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_lowercase(),
            password: self.password.clone(),
            phone: optional(&self.phone),
            role: self.role,
            balance: parse_balance(&self.balance).unwrap_or(0.0),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransactionFields {
    pub user_id: Option<i64>,
    pub transaction_type: TransactionType,
    pub amount: String,
    pub description: String,
}

impl Default for TransactionFields {
    fn default() -> Self {
        Self {
            user_id: None,
            transaction_type: TransactionType::Add,
            amount: String::new(),
            description: String::new(),
        }
    }
}

impl TransactionFields {
    /// The amount, if it is a finite number.
    pub fn parsed_amount(&self) -> Option<f64> {
        self.amount
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
    }

    pub fn to_request(&self) -> BookingResult<NewTransaction> {
        self.check()?;
        let (Some(user_id), Some(amount)) = (self.user_id, self.parsed_amount()) else {
            return Err(BookingError::validation("Transaction form is incomplete"));
        };
        Ok(NewTransaction {
            user_id,
            transaction_type: self.transaction_type,
            amount,
            description: self.description.trim().to_string(),
        })
    }
}

impl Validate for TransactionFields {
    fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.user_id.is_none() {
            errors.push("Please select a user".to_string());
        }
        if self.amount.trim().is_empty() {
            errors.push("Amount is required".to_string());
        } else {
            match self.parsed_amount() {
                Some(amount) if amount > MAX_TRANSACTION_AMOUNT => {
                    errors.push("Amount cannot exceed $999,999.99".to_string())
                }
                Some(amount) if amount > 0.0 => {}
                _ => errors.push("Amount must be a positive number".to_string()),
            }
        }
        let description = self.description.trim();
        if description.is_empty() {
            errors.push("Description is required".to_string());
        } else if description.chars().count() < MIN_DESCRIPTION_LEN {
            errors.push(format!(
                "Description must be at least {MIN_DESCRIPTION_LEN} characters long"
            ));
        }
        errors
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileFields {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
}

impl ProfileFields {
    pub fn from_user(user: &User) -> Self {
        Self {
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            phone: user.phone.clone().unwrap_or_default(),
        }
    }

    pub fn to_update(&self) -> BookingResult<ProfileUpdate> {
        self.check()?;
        Ok(ProfileUpdate {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: optional(&self.phone),
        })
    }
}

impl Validate for ProfileFields {
    fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.first_name.trim().is_empty()
            || self.last_name.trim().is_empty()
            || self.email.trim().is_empty()
        {
            errors.push("Please fill in required fields (name and email)".to_string());
        }
        errors
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginFields {
    pub email: String,
    pub password: String,
}

impl Validate for LoginFields {
    fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.email.trim().is_empty() {
            errors.push("Email is required".to_string());
        }
        if self.password.is_empty() {
            errors.push("Password is required".to_string());
        }
        errors
    }
}

impl LoginFields {
    pub fn to_request(&self) -> BookingResult<LoginRequest> {
        self.check()?;
        Ok(LoginRequest {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ForgotPasswordFields {
    pub email: String,
}

impl Validate for ForgotPasswordFields {
    fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        check_email(&self.email, &mut errors);
        errors
    }
}

impl ForgotPasswordFields {
    pub fn to_request(&self) -> BookingResult<ForgotPasswordRequest> {
        self.check()?;
        Ok(ForgotPasswordRequest {
            email: self.email.trim().to_string(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResetPasswordFields {
    /// Token from the reset link; absent when the link was opened without one
    pub token: Option<String>,
    pub new_password: String,
    pub confirm_password: String,
}

impl Validate for ResetPasswordFields {
    fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.token.as_deref().is_none_or(|token| token.trim().is_empty()) {
            errors.push("Reset token is missing".to_string());
        }
        check_password(&self.new_password, Some(&self.confirm_password), &mut errors);
        errors
    }
}

impl ResetPasswordFields {
    pub fn to_request(&self) -> BookingResult<ResetPasswordRequest> {
        self.check()?;
        Ok(ResetPasswordRequest {
            token: self.token.clone().unwrap_or_default().trim().to_string(),
            new_password: self.new_password.clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AdminPasswordFields {
    pub user_id: i64,
    pub new_password: String,
}

impl Validate for AdminPasswordFields {
    fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        check_password(&self.new_password, None, &mut errors);
        errors
    }
}

impl AdminPasswordFields {
    pub fn to_request(&self) -> BookingResult<PasswordResetByAdmin> {
        self.check()?;
        Ok(PasswordResetByAdmin {
            user_id: self.user_id,
            new_password: self.new_password.clone(),
        })
    }
}

/// Raw input for a new coaching slot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewSlotFields {
    pub date: String,
    pub start_time: String,
    pub end_time: String,
}

impl NewSlotFields {
    /// Validates against `today` and builds the request body.
    pub fn to_request(&self, today: NaiveDate) -> BookingResult<NewTimeSlot> {
        let mut errors = Vec::new();

        let date = if self.date.trim().is_empty() {
            errors.push("Date is required".to_string());
            None
        } else {
            match NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d") {
                Ok(date) if date < today => {
                    errors.push("Date cannot be in the past".to_string());
                    None
                }
                Ok(date) => Some(date),
                Err(_) => {
                    errors.push("Date must be in YYYY-MM-DD format".to_string());
                    None
                }
            }
        };

        let mut time = |raw: &str, which: &str| {
            if raw.trim().is_empty() {
                errors.push(format!("{which} time is required"));
                None
            } else {
                let parsed = clock::parse(raw);
                if parsed.is_none() {
                    errors.push(format!("{which} time must be in HH:MM format"));
                }
                parsed
            }
        };
        let start = time(&self.start_time, "Start");
        let end = time(&self.end_time, "End");

        if let (Some(start), Some(end)) = (start, end) {
            if start >= end {
                errors.push("Start time must be before end time".to_string());
            }
        }

        match (date, start, end) {
            (Some(date), Some(start_time), Some(end_time)) if errors.is_empty() => Ok(NewTimeSlot {
                date,
                start_time,
                end_time,
            }),
            _ => Err(BookingError::Validation(errors)),
        }
    }
}
