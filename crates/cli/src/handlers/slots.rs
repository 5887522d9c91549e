use std::sync::Arc;

use chrono::NaiveDate;
use courtside_client::{api::BookingApi, views::availability::AvailabilityView};
use courtside_core::{
    availability::DayEntry, errors::BookingError, models::user::Role, validation::NewSlotFields,
};
use eyre::{Result, eyre};

use crate::{
    handlers::{HandlerContext, shown},
    render,
};

async fn view_for<A: BookingApi>(ctx: &HandlerContext<A>) -> Result<AvailabilityView<A>> {
    let role = ctx
        .role()
        .await
        .ok_or_else(|| eyre!("Log in to see time slots"))?;
    Ok(AvailabilityView::new(
        Arc::clone(&ctx.api),
        role,
        ctx.today,
        ctx.lookahead_days,
    ))
}

fn failed<A: BookingApi>(view: &AvailabilityView<A>, err: BookingError) -> eyre::Report {
    let message = view
        .last_error()
        .unwrap_or_else(|| err.user_message(&err.to_string()));
    shown(err, message)
}

async fn loaded<A: BookingApi>(ctx: &HandlerContext<A>) -> Result<AvailabilityView<A>> {
    let view = view_for(ctx).await?;
    if let Err(err) = view.load().await {
        return Err(failed(&view, err));
    }
    Ok(view)
}

/// Shows the rows of `date` after a change, so the new state is visible.
fn after_change<A: BookingApi>(view: &AvailabilityView<A>, headline: String, date: NaiveDate) -> String {
    let label = DayEntry::new(date, view.today()).label();
    format!("{headline}\n\n{}", render::day(&label, &view.rows_for(date)))
}

fn date_of<A: BookingApi>(view: &AvailabilityView<A>, slot_id: i64) -> Option<NaiveDate> {
    view.mine()
        .into_iter()
        .chain(view.listed())
        .find(|slot| slot.id == slot_id)
        .map(|slot| slot.date)
}

pub async fn week<A: BookingApi>(ctx: &HandlerContext<A>) -> Result<String> {
    let view = loaded(ctx).await?;
    let heading = match view.role() {
        Role::Admin => "Your coaching week",
        Role::User => "Open lessons",
    };
    Ok(format!(
        "{heading}\n{}",
        render::week(&view.overview(), view.role())
    ))
}

pub async fn day<A: BookingApi>(ctx: &HandlerContext<A>, date: NaiveDate) -> Result<String> {
    let view = loaded(ctx).await?;
    view.select(date);
    let label = DayEntry::new(date, ctx.today).label();
    Ok(render::day(&label, &view.selected_rows()))
}

pub async fn book<A: BookingApi>(ctx: &HandlerContext<A>, slot_id: i64) -> Result<String> {
    let view = view_for(ctx).await?;
    view.book(slot_id).await.map_err(|err| failed(&view, err))?;

    let headline = format!("Booked slot #{slot_id}.");
    Ok(match date_of(&view, slot_id) {
        Some(date) => after_change(&view, headline, date),
        None => headline,
    })
}

pub async fn unbook<A: BookingApi>(ctx: &HandlerContext<A>, slot_id: i64) -> Result<String> {
    let view = view_for(ctx).await?;
    view.unbook(slot_id).await.map_err(|err| failed(&view, err))?;

    let headline = format!("Cancelled booking for slot #{slot_id}.");
    Ok(match date_of(&view, slot_id) {
        Some(date) => after_change(&view, headline, date),
        None => headline,
    })
}

pub async fn add<A: BookingApi>(
    ctx: &HandlerContext<A>,
    date: String,
    start: String,
    end: String,
) -> Result<String> {
    let view = view_for(ctx).await?;
    let fields = NewSlotFields {
        date,
        start_time: start,
        end_time: end,
    };
    view.add_slot(&fields)
        .await
        .map_err(|err| failed(&view, err))?;

    let headline = format!(
        "Added a slot on {} from {} to {}.",
        fields.date.trim(),
        fields.start_time.trim(),
        fields.end_time.trim()
    );
    Ok(match NaiveDate::parse_from_str(fields.date.trim(), "%Y-%m-%d") {
        Ok(date) => after_change(&view, headline, date),
        Err(_) => headline,
    })
}

pub async fn delete<A: BookingApi>(ctx: &HandlerContext<A>, slot_id: i64) -> Result<String> {
    let view = view_for(ctx).await?;
    view.delete(slot_id)
        .await
        .map_err(|err| failed(&view, err))?;
    Ok(format!("Deleted slot #{slot_id}."))
}
