use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A window in which a person can be booked. Duplicates are allowed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableTime {
    pub person_id: i32,
    #[serde(alias = "dateTime")]
    pub start: DateTime<Utc>,
    #[serde(alias = "duration", default)]
    pub duration_minutes: i32,
}

impl AvailableTime {
    pub fn new(person_id: i32, start: DateTime<Utc>, duration_minutes: i32) -> Self {
        Self { person_id, start, duration_minutes }
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.start + chrono::Duration::minutes(i64::from(self.duration_minutes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn end_adds_duration() {
        let start = Utc.with_ymd_and_hms(2026, 10, 19, 9, 0, 0).unwrap();
        let w = AvailableTime::new(1, start, 90);
        assert_eq!(w.end(), Utc.with_ymd_and_hms(2026, 10, 19, 10, 30, 0).unwrap());
    }

    #[test]
    fn accepts_legacy_field_names() {
        let w: AvailableTime = serde_json::from_str(
            r#"{"personId":2,"dateTime":"2026-10-19T09:00:00Z","duration":60}"#,
        )
        .expect("deserialize");
        assert_eq!(w.person_id, 2);
        assert_eq!(w.duration_minutes, 60);
    }
}
