//! The fixed roster the service starts with.

use chrono::{DateTime, Days, NaiveDate, Utc};

use crate::errors::ModelError;
use crate::{Appointment, AvailableTime, Person};

/// Initial contents of the three collections.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Seed {
    pub persons: Vec<Person>,
    pub available_times: Vec<AvailableTime>,
    pub appointments: Vec<Appointment>,
}

const ROSTER: [(i32, &str, &str); 6] = [
    (1, "Ross", "Geller"),
    (2, "Rachel", "Green"),
    (3, "Monica", "Geller"),
    (4, "Chandler", "Bing"),
    (5, "Joey", "Tribbiani"),
    (6, "Phoebe", "Buffay"),
];

impl Seed {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Roster anchored on `today`: availability windows open today at
    /// 09:00 UTC and the single appointment is tomorrow at 09:00 UTC.
    pub fn roster(today: NaiveDate) -> Result<Self, ModelError> {
        let persons = ROSTER
            .iter()
            .map(|(id, first, last)| {
                let email = format!("{}@friends.com", first.to_ascii_lowercase());
                Person::new(*id, first, last, &email)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let nine_today = at_hour(today, 9)?;
        let tomorrow = today
            .checked_add_days(Days::new(1))
            .ok_or_else(|| ModelError::Validation("seed date out of range".into()))?;

        // person 1 intentionally has the same window twice
        let available_times = vec![
            AvailableTime::new(1, nine_today, 60),
            AvailableTime::new(1, nine_today, 60),
            AvailableTime::new(2, nine_today, 60),
        ];
        let appointments = vec![Appointment::new(1, at_hour(tomorrow, 9)?, 60, 1)];

        Ok(Self { persons, available_times, appointments })
    }

    /// Roster anchored on the current UTC date.
    pub fn roster_for_today() -> Result<Self, ModelError> {
        Self::roster(Utc::now().date_naive())
    }
}

fn at_hour(day: NaiveDate, hour: u32) -> Result<DateTime<Utc>, ModelError> {
    day.and_hms_opt(hour, 0, 0)
        .map(|naive| naive.and_utc())
        .ok_or_else(|| ModelError::Validation(format!("invalid seed hour {hour}")))
}
