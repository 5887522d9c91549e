use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::serde_helpers::clock;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub id: i64,
    pub date: NaiveDate,
    #[serde(with = "clock")]
    pub start_time: NaiveTime,
    #[serde(with = "clock")]
    pub end_time: NaiveTime,
    #[serde(default)]
    pub is_booked: bool,
    #[serde(default)]
    pub booked_by: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booked_by_user: Option<SlotHolder>,
}

impl TimeSlot {
    pub fn is_free(&self) -> bool {
        !self.is_booked
    }

    pub fn is_on(&self, date: NaiveDate) -> bool {
        self.date == date
    }

    /// `10:00 - 11:00`
    pub fn time_range(&self) -> String {
        format!("{} - {}", clock::format(&self.start_time), clock::format(&self.end_time))
    }

    pub fn holder_name(&self) -> Option<String> {
        self.booked_by_user
            .as_ref()
            .map(|holder| format!("{} {}", holder.first_name, holder.last_name))
    }
}

/// Display fields of the user holding a booked slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotHolder {
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Body of `POST /api/time-slots`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTimeSlot {
    pub date: NaiveDate,
    #[serde(with = "clock")]
    pub start_time: NaiveTime,
    #[serde(with = "clock")]
    pub end_time: NaiveTime,
}
