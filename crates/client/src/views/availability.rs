//! # Availability
//!
//! The dashboard both roles land on. It shows the next few days, lets the
//! user pick one, and lists the slots on that day with what can be done to
//! each.
//!
//! Two lists back the view: the caller's own slots and the listing (free
//! slots for a user, every slot for the coach). Both are fetched again after
//! every successful change so the view never patches its own copy.
//!
//! Only one slot action runs at a time. While it is in flight the slot shows
//! its pending label and any further action is refused without a request.

use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use courtside_core::{
    availability::{self, DayEntry, DaySummary, SlotAction},
    errors::{BookingError, BookingResult},
    models::{time_slot::TimeSlot, user::Role},
    validation::NewSlotFields,
};
use tracing::{debug, error, info};

use crate::{api::BookingApi, views::lock};

const LOAD_FAILED: &str = "Failed to load time slots. Please try again.";
const BOOK_FAILED: &str = "Failed to book time slot. Please try again.";
const UNBOOK_FAILED: &str = "Failed to cancel booking. Please try again.";
const DELETE_FAILED: &str = "Failed to delete time slot. Please try again.";
const ADD_FAILED: &str = "Failed to add time slot. Please try again.";

/// The change currently in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pending {
    Slot { id: i64, action: SlotAction },
    AddSlot,
}

impl Pending {
    pub fn label(&self) -> &'static str {
        match self {
            Pending::Slot { action, .. } => action.pending_label(),
            Pending::AddSlot => "Adding…",
        }
    }
}

/// One line of the selected day.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotRow {
    pub slot: TimeSlot,
    /// The slot is in the caller's own list
    pub owned: bool,
    pub actions: Vec<SlotAction>,
    /// Set while an action on this slot is in flight
    pub pending: Option<&'static str>,
}

#[derive(Debug, Default)]
struct State {
    mine: Vec<TimeSlot>,
    listed: Vec<TimeSlot>,
    selected: Option<NaiveDate>,
    pending: Option<Pending>,
    loading: bool,
    last_error: Option<String>,
}

pub struct AvailabilityView<A> {
    api: Arc<A>,
    role: Role,
    today: NaiveDate,
    days: u32,
    state: Mutex<State>,
}

/// Clears the loading flag when a load finishes or is dropped.
struct LoadingGuard<'a>(&'a Mutex<State>);

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        lock(self.0).loading = false;
    }
}

/// Clears the pending action when it finishes or is dropped.
struct PendingGuard<'a>(&'a Mutex<State>);

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        lock(self.0).pending = None;
    }
}

impl<A: BookingApi> AvailabilityView<A> {
    /// A view for `role` covering `days` days from `today`. Nothing is fetched
    /// until [`load`](Self::load).
    pub fn new(api: Arc<A>, role: Role, today: NaiveDate, days: u32) -> Self {
        Self {
            api,
            role,
            today,
            days,
            state: Mutex::new(State {
                selected: Some(today),
                ..State::default()
            }),
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Fetches the caller's slots and the listing together.
    ///
    /// On failure the previous lists stay in place and the view records a
    /// generic message.
    pub async fn load(&self) -> BookingResult<()> {
        {
            let mut state = lock(&self.state);
            if state.loading {
                return Err(BookingError::Busy("time slots are already loading".to_string()));
            }
            state.loading = true;
        }
        let _loading = LoadingGuard(&self.state);

        let listing = async {
            match self.role {
                Role::Admin => self.api.all_time_slots(self.days).await,
                Role::User => self.api.free_time_slots(self.days).await,
            }
        };

        match tokio::try_join!(self.api.my_time_slots(), listing) {
            Ok((mut mine, mut listed)) => {
                availability::sort_chronologically(&mut mine);
                availability::sort_chronologically(&mut listed);
                debug!(mine = mine.len(), listed = listed.len(), "Time slots loaded");

                let mut state = lock(&self.state);
                state.mine = mine;
                state.listed = listed;
                state.last_error = None;
                Ok(())
            }
            Err(err) => {
                error!("Failed to load time slots: {}", err);
                lock(&self.state).last_error = Some(LOAD_FAILED.to_string());
                Err(err)
            }
        }
    }

    pub fn week(&self) -> Vec<DayEntry> {
        availability::window_from(self.today, self.days as usize)
    }

    /// Per-day counts for the whole window.
    pub fn overview(&self) -> Vec<DaySummary> {
        let state = lock(&self.state);
        availability::summarize(&self.week(), &state.mine, &state.listed)
    }

    pub fn select(&self, date: NaiveDate) {
        lock(&self.state).selected = Some(date);
    }

    pub fn selected(&self) -> Option<NaiveDate> {
        lock(&self.state).selected
    }

    pub fn mine(&self) -> Vec<TimeSlot> {
        lock(&self.state).mine.clone()
    }

    pub fn listed(&self) -> Vec<TimeSlot> {
        lock(&self.state).listed.clone()
    }

    pub fn pending(&self) -> Option<Pending> {
        lock(&self.state).pending
    }

    pub fn is_loading(&self) -> bool {
        lock(&self.state).loading
    }

    pub fn last_error(&self) -> Option<String> {
        lock(&self.state).last_error.clone()
    }

    /// Rows for `date`, earliest first.
    ///
    /// A user sees their own slots together with the free ones; the coach sees
    /// the full listing.
    pub fn rows_for(&self, date: NaiveDate) -> Vec<SlotRow> {
        let state = lock(&self.state);
        let owned = |slot: &TimeSlot| state.mine.iter().any(|mine| mine.id == slot.id);

        let mut slots: Vec<TimeSlot> = match self.role {
            Role::Admin => availability::slots_on(&state.listed, date)
                .into_iter()
                .cloned()
                .collect(),
            Role::User => {
                let mut slots: Vec<TimeSlot> = availability::slots_on(&state.mine, date)
                    .into_iter()
                    .cloned()
                    .collect();
                slots.extend(
                    availability::slots_on(&state.listed, date)
                        .into_iter()
                        .filter(|slot| !owned(slot))
                        .cloned(),
                );
                slots
            }
        };
        availability::sort_chronologically(&mut slots);

        slots
            .into_iter()
            .map(|slot| {
                let owned = owned(&slot);
                let pending = match state.pending {
                    Some(pending @ Pending::Slot { id, .. }) if id == slot.id => {
                        Some(pending.label())
                    }
                    _ => None,
                };
                SlotRow {
                    actions: availability::actions_for(&slot, self.role, owned),
                    owned,
                    pending,
                    slot,
                }
            })
            .collect()
    }

    /// Rows for the selected day, or nothing when no day is selected.
    pub fn selected_rows(&self) -> Vec<SlotRow> {
        self.selected()
            .map(|date| self.rows_for(date))
            .unwrap_or_default()
    }

    pub async fn book(&self, slot_id: i64) -> BookingResult<()> {
        self.require(Role::User, "Only clients can book lessons")?;
        self.mutate(
            Pending::Slot {
                id: slot_id,
                action: SlotAction::Book,
            },
            BOOK_FAILED,
            || self.api.book_time_slot(slot_id),
        )
        .await?;
        info!(slot_id, "Time slot booked");
        Ok(())
    }

    pub async fn unbook(&self, slot_id: i64) -> BookingResult<()> {
        self.require(Role::User, "Only clients can cancel bookings")?;
        self.mutate(
            Pending::Slot {
                id: slot_id,
                action: SlotAction::Unbook,
            },
            UNBOOK_FAILED,
            || self.api.unbook_time_slot(slot_id),
        )
        .await?;
        info!(slot_id, "Booking cancelled");
        Ok(())
    }

    pub async fn delete(&self, slot_id: i64) -> BookingResult<()> {
        self.require(Role::Admin, "Only the coach can delete time slots")?;
        self.mutate(
            Pending::Slot {
                id: slot_id,
                action: SlotAction::Delete,
            },
            DELETE_FAILED,
            || self.api.delete_time_slot(slot_id),
        )
        .await?;
        info!(slot_id, "Time slot deleted");
        Ok(())
    }

    /// Validates `fields` against today and creates the slot.
    pub async fn add_slot(&self, fields: &NewSlotFields) -> BookingResult<()> {
        self.require(Role::Admin, "Only the coach can add time slots")?;
        let slot = fields.to_request(self.today).inspect_err(|err| {
            lock(&self.state).last_error = Some(err.user_message(ADD_FAILED));
        })?;
        let date = slot.date;
        self.mutate(Pending::AddSlot, ADD_FAILED, || self.api.add_time_slot(slot))
            .await?;
        info!(%date, "Time slot added");
        Ok(())
    }

    fn require(&self, role: Role, message: &str) -> BookingResult<()> {
        if self.role == role {
            Ok(())
        } else {
            Err(BookingError::Authorization(message.to_string()))
        }
    }

    /// Runs one change under the pending marker, then reloads both lists.
    ///
    /// A reload failure after a successful change is recorded on the view but
    /// does not fail the change itself.
    async fn mutate<R, F>(&self, pending: Pending, fallback: &str, request: R) -> BookingResult<()>
    where
        R: FnOnce() -> F,
        F: Future<Output = BookingResult<()>>,
    {
        {
            let mut state = lock(&self.state);
            if let Some(current) = state.pending {
                return Err(BookingError::Busy(current.label().to_string()));
            }
            state.pending = Some(pending);
        }
        let guard = PendingGuard(&self.state);

        if let Err(err) = request().await {
            error!("Time slot change failed: {}", err);
            lock(&self.state).last_error = Some(err.user_message(fallback));
            return Err(err);
        }
        drop(guard);

        if let Err(err) = self.load().await {
            debug!("Reload after change failed: {}", err);
        }
        Ok(())
    }
}
