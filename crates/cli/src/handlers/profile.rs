use std::sync::Arc;

use courtside_client::{api::BookingApi, views::profile::ProfileView};
use eyre::{Result, eyre};

use crate::{
    handlers::{HandlerContext, account::form_failed, shown},
    render,
};

async fn loaded<A: BookingApi>(ctx: &HandlerContext<A>) -> Result<ProfileView<A>> {
    let mut view = ProfileView::new(Arc::clone(&ctx.api), ctx.today);
    if let Err(err) = view.load().await {
        let message = view.last_error().unwrap_or_default().to_string();
        return Err(shown(err, message));
    }
    Ok(view)
}

fn rendered<A: BookingApi>(view: &ProfileView<A>) -> Result<String> {
    let user = view.user().ok_or_else(|| eyre!("Profile is not loaded"))?;
    Ok(render::profile(user, view.history()))
}

pub async fn show<A: BookingApi>(ctx: &HandlerContext<A>) -> Result<String> {
    let view = loaded(ctx).await?;
    rendered(&view)
}

/// Changes only the fields that were given.
pub async fn update<A: BookingApi>(
    ctx: &HandlerContext<A>,
    first_name: Option<String>,
    last_name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
) -> Result<String> {
    let mut view = loaded(ctx).await?;
    let fields = view
        .start_edit()
        .ok_or_else(|| eyre!("Profile is not loaded"))?;
    if let Some(first_name) = first_name {
        fields.first_name = first_name;
    }
    if let Some(last_name) = last_name {
        fields.last_name = last_name;
    }
    if let Some(email) = email {
        fields.email = email;
    }
    if let Some(phone) = phone {
        fields.phone = phone;
    }

    if let Err(err) = view.save().await {
        return Err(form_failed(&view.status, err));
    }
    Ok(format!("Profile updated.\n\n{}", rendered(&view)?))
}
