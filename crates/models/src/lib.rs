//! Scheduling data model: the people on the roster, the windows in which
//! they can be booked, and the appointments booked against them.
//!
//! Wire names are camelCase. `personId` references are never checked
//! against the roster.

pub mod errors;
pub mod person;
pub mod availability;
pub mod appointment;
pub mod seed;

pub use appointment::Appointment;
pub use availability::AvailableTime;
pub use person::Person;
pub use seed::Seed;
