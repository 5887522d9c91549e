//! # Availability
//!
//! The rolling booking window and the slot bookkeeping behind the dashboard:
//!
//! 1. Build the window of days starting today
//! 2. Count the caller's slots and the listed (free or all) slots per day
//! 3. Filter both lists down to a selected day
//! 4. Decide which per-slot actions the current role may attempt
//!
//! Dates are compared exactly; the backend already restricts the listing to the
//! requested number of days.

use chrono::{Datelike, NaiveDate};

use crate::models::{time_slot::TimeSlot, user::Role};

/// Number of days shown on the dashboard and requested from the backend.
pub const WINDOW_DAYS: usize = 7;

/// One day of the booking window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayEntry {
    pub date: NaiveDate,
    /// `YYYY-MM-DD`, the same format the backend uses for `TimeSlot::date`
    pub date_string: String,
    /// `Mon` .. `Sun`
    pub weekday: String,
    pub day_of_month: u32,
    /// `Jan` .. `Dec`
    pub month: String,
    pub is_today: bool,
}

impl DayEntry {
    pub fn new(date: NaiveDate, today: NaiveDate) -> Self {
        Self {
            date,
            date_string: date.format("%Y-%m-%d").to_string(),
            weekday: date.format("%a").to_string(),
            day_of_month: date.day(),
            month: date.format("%b").to_string(),
            is_today: date == today,
        }
    }

    /// `Wed 10 Jan`
    pub fn label(&self) -> String {
        format!("{} {} {}", self.weekday, self.day_of_month, self.month)
    }
}

/// The standard seven day window starting at `today`.
pub fn week_from(today: NaiveDate) -> Vec<DayEntry> {
    window_from(today, WINDOW_DAYS)
}

/// `days` consecutive dates starting at `today`, ascending.
pub fn window_from(today: NaiveDate, days: usize) -> Vec<DayEntry> {
    today
        .iter_days()
        .take(days)
        .map(|date| DayEntry::new(date, today))
        .collect()
}

/// Slots whose date is exactly `date`, in list order.
pub fn slots_on(slots: &[TimeSlot], date: NaiveDate) -> Vec<&TimeSlot> {
    slots.iter().filter(|slot| slot.is_on(date)).collect()
}

/// Orders slots by date, then start time.
pub fn sort_chronologically(slots: &mut [TimeSlot]) {
    slots.sort_by(|a, b| (a.date, a.start_time).cmp(&(b.date, b.start_time)));
}

/// Per-day counts for the dashboard overview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaySummary {
    pub day: DayEntry,
    /// Slots held by the caller on this day
    pub mine: usize,
    /// Slots in the listing (free for users, all for admins)
    pub listed: usize,
    /// How many of the listed slots are already booked
    pub booked: usize,
}

pub fn summarize(days: &[DayEntry], mine: &[TimeSlot], listed: &[TimeSlot]) -> Vec<DaySummary> {
    days.iter()
        .map(|day| {
            let listed_today = slots_on(listed, day.date);
            DaySummary {
                day: day.clone(),
                mine: slots_on(mine, day.date).len(),
                booked: listed_today.iter().filter(|slot| slot.is_booked).count(),
                listed: listed_today.len(),
            }
        })
        .collect()
}

/// Something the user can do to a single slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotAction {
    Book,
    Unbook,
    Delete,
}

impl SlotAction {
    pub fn label(&self) -> &'static str {
        match self {
            SlotAction::Book => "Book",
            SlotAction::Unbook => "Cancel booking",
            SlotAction::Delete => "Delete",
        }
    }

    /// Shown on the slot while the request is in flight.
    pub fn pending_label(&self) -> &'static str {
        match self {
            SlotAction::Book => "Booking…",
            SlotAction::Unbook => "Cancelling…",
            SlotAction::Delete => "Deleting…",
        }
    }
}

/// Actions offered for `slot`. `owned` means the slot appears in the caller's own list.
pub fn actions_for(slot: &TimeSlot, role: Role, owned: bool) -> Vec<SlotAction> {
    match role {
        Role::Admin => vec![SlotAction::Delete],
        Role::User if owned => vec![SlotAction::Unbook],
        Role::User if slot.is_free() => vec![SlotAction::Book],
        Role::User => Vec::new(),
    }
}

/// A user's bookings split around `today`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingHistory {
    /// `date >= today`, soonest first
    pub upcoming: Vec<TimeSlot>,
    /// `date < today`, most recent first
    pub past: Vec<TimeSlot>,
}

impl BookingHistory {
    pub fn split(bookings: &[TimeSlot], today: NaiveDate) -> Self {
        let (mut upcoming, mut past): (Vec<_>, Vec<_>) = bookings
            .iter()
            .cloned()
            .partition(|slot| slot.date >= today);
        sort_chronologically(&mut upcoming);
        sort_chronologically(&mut past);
        past.reverse();
        Self { upcoming, past }
    }

    pub fn total(&self) -> usize {
        self.upcoming.len() + self.past.len()
    }
}
