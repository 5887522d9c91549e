//! # Routes
//!
//! The static table of pages and who may open them. Gating here is cosmetic:
//! it keeps people away from pages whose requests the backend would refuse.

use courtside_core::models::user::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    About,
    Contact,
    Login,
    ForgotPassword,
    ResetPassword,
    UserDashboard,
    UserProfile,
    AdminDashboard,
    AdminUsers,
    AdminRegisterUser,
    AdminTransaction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    Only(Role),
}

pub const ROUTES: [Route; 12] = [
    Route::Home,
    Route::About,
    Route::Contact,
    Route::Login,
    Route::ForgotPassword,
    Route::ResetPassword,
    Route::UserDashboard,
    Route::UserProfile,
    Route::AdminDashboard,
    Route::AdminUsers,
    Route::AdminRegisterUser,
    Route::AdminTransaction,
];

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::About => "/about",
            Route::Contact => "/contact",
            Route::Login => "/login",
            Route::ForgotPassword => "/forgot-password",
            Route::ResetPassword => "/reset-password",
            Route::UserDashboard => "/user-dash",
            Route::UserProfile => "/user-profile",
            Route::AdminDashboard => "/admin-dash",
            Route::AdminUsers => "/admin/users",
            Route::AdminRegisterUser => "/admin/register-user",
            Route::AdminTransaction => "/admin/transaction",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::About => "About",
            Route::Contact => "Contact",
            Route::Login => "Log in",
            Route::ForgotPassword => "Forgot password",
            Route::ResetPassword => "Reset password",
            Route::UserDashboard => "Book a lesson",
            Route::UserProfile => "My profile",
            Route::AdminDashboard => "Coach dashboard",
            Route::AdminUsers => "All users",
            Route::AdminRegisterUser => "Register user",
            Route::AdminTransaction => "Balance transactions",
        }
    }

    pub fn access(&self) -> Access {
        match self {
            Route::UserDashboard | Route::UserProfile => Access::Only(Role::User),
            Route::AdminDashboard
            | Route::AdminUsers
            | Route::AdminRegisterUser
            | Route::AdminTransaction => Access::Only(Role::Admin),
            _ => Access::Public,
        }
    }

    /// Exact lookup on the path, ignoring any query string and trailing slash.
    pub fn from_path(path: &str) -> Option<Route> {
        let path = path.split(['?', '#']).next().unwrap_or_default().trim();
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };
        ROUTES.into_iter().find(|route| route.path() == path)
    }

    pub fn permits(&self, role: Option<Role>) -> bool {
        match self.access() {
            Access::Public => true,
            Access::Only(required) => role == Some(required),
        }
    }

    /// Landing page for a role.
    pub fn home_for(role: Option<Role>) -> Route {
        match role {
            Some(Role::Admin) => Route::AdminDashboard,
            Some(Role::User) => Route::UserDashboard,
            None => Route::Home,
        }
    }
}

/// Where a navigation actually ends up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub route: Route,
    /// `true` when the requested page was unknown or not permitted
    pub redirected: bool,
}

/// Resolves `path` for `role`. Unknown pages go to the role's landing page;
/// protected pages send signed-out visitors to the login page and everyone
/// else to their own landing page.
pub fn resolve(path: &str, role: Option<Role>) -> Resolution {
    match Route::from_path(path) {
        Some(route) if route.permits(role) => Resolution {
            route,
            redirected: false,
        },
        Some(_) if role.is_none() => Resolution {
            route: Route::Login,
            redirected: true,
        },
        _ => Resolution {
            route: Route::home_for(role),
            redirected: true,
        },
    }
}

/// Decoded value of `name` in the query string of `path`, e.g. the token of a
/// `/reset-password?token=...` link.
pub fn query_param(path: &str, name: &str) -> Option<String> {
    let (_, query) = path.split_once('?')?;
    let query = query.split('#').next().unwrap_or_default();
    query
        .split('&')
        .filter_map(|pair| pair.split_once('=').or(Some((pair, ""))))
        .find(|(key, _)| *key == name)
        .and_then(|(_, value)| {
            urlencoding::decode(&value.replace('+', " "))
                .ok()
                .map(|decoded| decoded.into_owned())
        })
        .filter(|value| !value.is_empty())
}
