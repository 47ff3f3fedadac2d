use async_trait::async_trait;
use models::{Appointment, AvailableTime, Person};

/// What `update_appointment` did with the existing entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// An appointment with the requested id was removed before appending.
    Replaced,
    /// Nothing matched; the appointment was appended as a fresh insert.
    Inserted,
}

/// Storage contract for the scheduling collections.
///
/// Reads never fail: a miss is `None` or an empty `Vec`. Every list is in
/// insertion order and filters keep the relative order of what survives.
#[async_trait]
pub trait SchedulingRepository: Send + Sync {
    async fn list_persons(&self) -> Vec<Person>;
    async fn get_person(&self, person_id: i32) -> Option<Person>;

    async fn list_availability(&self) -> Vec<AvailableTime>;
    async fn list_availability_for_person(&self, person_id: i32) -> Vec<AvailableTime>;

    async fn list_appointments(&self) -> Vec<Appointment>;
    async fn get_appointment(&self, appointment_id: i32) -> Option<Appointment>;
    /// Append unconditionally, duplicate ids included.
    async fn create_appointment(&self, appointment: Appointment);
    /// Remove the first appointment whose id equals `appointment_id`, then
    /// append `appointment` at the end whatever its own id is.
    async fn update_appointment(&self, appointment_id: i32, appointment: Appointment) -> UpdateOutcome;
}
