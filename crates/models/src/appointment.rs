use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A booked appointment. `appointment_id` is supplied by the caller and is
/// the identity key; nothing checks it for uniqueness on insert.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub appointment_id: i32,
    #[serde(alias = "dateTime")]
    pub start: DateTime<Utc>,
    #[serde(alias = "duration", default)]
    pub duration_minutes: i32,
    pub person_id: i32,
}

impl Appointment {
    pub fn new(appointment_id: i32, start: DateTime<Utc>, duration_minutes: i32, person_id: i32) -> Self {
        Self { appointment_id, start, duration_minutes, person_id }
    }
}
