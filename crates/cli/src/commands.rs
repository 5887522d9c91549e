use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use courtside_client::routes::Route;
use courtside_core::{
    directory::RoleFilter,
    models::{transaction::TransactionType, user::Role},
};

#[derive(Debug, Parser)]
#[command(name = "courtside", version, about = "Book tennis lessons from the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Command {
    /// Log in and remember the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "COURTSIDE_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Show who the stored session belongs to
    Whoami,
    /// Open a page by path, e.g. `/admin/users`
    Open { path: String },
    /// Overview of the booking window
    Week,
    /// Slots on one day
    Day { date: NaiveDate },
    /// Book a free slot
    Book { slot_id: i64 },
    /// Cancel one of your bookings
    Unbook { slot_id: i64 },
    /// Offer a new slot (coach)
    AddSlot {
        /// YYYY-MM-DD
        #[arg(long)]
        date: String,
        /// HH:MM
        #[arg(long)]
        start: String,
        /// HH:MM
        #[arg(long)]
        end: String,
    },
    /// Remove a slot (coach)
    DeleteSlot { slot_id: i64 },
    /// Your profile and bookings
    Profile {
        #[command(subcommand)]
        action: Option<ProfileAction>,
    },
    /// List accounts (coach)
    Users {
        #[arg(long)]
        search: Option<String>,
        /// ALL, USER or ADMIN
        #[arg(long, default_value = "all")]
        role: RoleFilter,
    },
    /// Create an account (coach)
    RegisterUser {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm: String,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long, default_value = "user")]
        role: Role,
        /// Opening balance
        #[arg(long)]
        balance: Option<String>,
    },
    /// Set someone's password (coach)
    SetPassword {
        #[arg(long)]
        user_id: i64,
        #[arg(long)]
        password: String,
    },
    /// Transaction history, for one client or everyone (coach)
    Transactions {
        #[arg(long)]
        user_id: Option<i64>,
    },
    /// Credit or charge a client's balance (coach)
    Charge {
        #[arg(long)]
        user_id: i64,
        /// ADD or SUBTRACT
        #[arg(long = "type")]
        kind: TransactionType,
        #[arg(long)]
        amount: String,
        #[arg(long)]
        description: String,
    },
    /// Ask for a password reset email
    ForgotPassword {
        #[arg(long)]
        email: String,
    },
    /// Set a new password using the token from the reset email
    ResetPassword {
        #[arg(long)]
        token: Option<String>,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm: String,
    },
}

#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum ProfileAction {
    Show,
    /// Change any of your details; the rest stay as they are
    Update {
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },
}

impl Command {
    /// The page a command belongs to, for gating. `None` for `open`, which
    /// resolves its own path.
    ///
    /// The week and day views are the role's own dashboard; signed out they
    /// count as the client dashboard so the visitor is sent to log in.
    pub fn route(&self, role: Option<Role>) -> Option<Route> {
        let route = match self {
            Command::Open { .. } => return None,
            Command::Login { .. } => Route::Login,
            Command::Logout | Command::Whoami => Route::Home,
            Command::Week | Command::Day { .. } => match role {
                Some(Role::Admin) => Route::AdminDashboard,
                _ => Route::UserDashboard,
            },
            Command::Book { .. } | Command::Unbook { .. } => Route::UserDashboard,
            Command::AddSlot { .. } | Command::DeleteSlot { .. } => Route::AdminDashboard,
            Command::Profile { .. } => Route::UserProfile,
            Command::Users { .. } | Command::SetPassword { .. } => Route::AdminUsers,
            Command::RegisterUser { .. } => Route::AdminRegisterUser,
            Command::Transactions { .. } | Command::Charge { .. } => Route::AdminTransaction,
            Command::ForgotPassword { .. } => Route::ForgotPassword,
            Command::ResetPassword { .. } => Route::ResetPassword,
        };
        Some(route)
    }
}
