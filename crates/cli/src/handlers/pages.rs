use std::sync::Arc;

use courtside_client::{
    api::BookingApi,
    routes::{self, Route},
    views::password::ResetPasswordView,
};
use courtside_core::directory::RoleFilter;
use eyre::Result;

use crate::{
    handlers::{HandlerContext, admin, profile, slots},
    render,
};

/// Opens a page the way a browser would: unknown or forbidden paths land on
/// the role's default page instead.
pub async fn open<A: BookingApi>(ctx: &HandlerContext<A>, path: &str) -> Result<String> {
    let role = ctx.role().await;
    let resolution = routes::resolve(path, role);
    let mut route = resolution.route;
    let mut notice = String::new();
    if resolution.redirected {
        notice = format!("{path} is not available; showing {}.\n\n", route.path());
    }

    if route == Route::ResetPassword {
        let view = ResetPasswordView::from_link(Arc::clone(&ctx.api), path);
        if let Some(redirect) = view.redirect() {
            notice = "Reset token is missing; use the link from your email.\n\n".to_string();
            route = redirect;
        } else if let Some(token) = view.fields.token.as_deref() {
            return Ok(format!(
                "{}\n\ncourtside reset-password --token {token} --password <new> --confirm <new>",
                route.title()
            ));
        }
    }

    let body = match route {
        Route::UserDashboard | Route::AdminDashboard => slots::week(ctx).await?,
        Route::UserProfile => profile::show(ctx).await?,
        Route::AdminUsers => admin::users(ctx, None, RoleFilter::All).await?,
        Route::AdminTransaction => admin::transactions(ctx, None).await?,
        _ => render::page(route),
    };
    Ok(format!("{notice}{body}"))
}
