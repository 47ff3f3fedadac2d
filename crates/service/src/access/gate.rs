use std::sync::Arc;

use tracing::{instrument, warn};

use models::{Appointment, AvailableTime, Person};

use crate::errors::ServiceError;
use crate::scheduling::{SchedulingRepository, UpdateOutcome};

use super::capability::{CapabilitySet, Operation};

/// Check `granted` against the capability `operation` needs.
pub fn authorize(granted: &CapabilitySet, operation: Operation) -> Result<(), ServiceError> {
    let required = operation.required_capability();
    if granted.contains(required) {
        return Ok(());
    }
    warn!(%operation, %required, ?granted, "capability_check_failed");
    Err(ServiceError::Forbidden { operation, required })
}

/// Capability-checked front for a `SchedulingRepository`.
///
/// Holds no state besides the store handle; each call is check then delegate.
#[derive(Clone)]
pub struct AccessGate {
    store: Arc<dyn SchedulingRepository>,
}

impl AccessGate {
    pub fn new(store: Arc<dyn SchedulingRepository>) -> Self {
        Self { store }
    }

    pub async fn list_persons(&self, granted: &CapabilitySet) -> Result<Vec<Person>, ServiceError> {
        authorize(granted, Operation::ListPersons)?;
        Ok(self.store.list_persons().await)
    }

    pub async fn get_person(&self, granted: &CapabilitySet, person_id: i32) -> Result<Option<Person>, ServiceError> {
        authorize(granted, Operation::GetPerson)?;
        Ok(self.store.get_person(person_id).await)
    }

    pub async fn list_availability(&self, granted: &CapabilitySet) -> Result<Vec<AvailableTime>, ServiceError> {
        authorize(granted, Operation::ListAvailability)?;
        Ok(self.store.list_availability().await)
    }

    pub async fn list_availability_for_person(
        &self,
        granted: &CapabilitySet,
        person_id: i32,
    ) -> Result<Vec<AvailableTime>, ServiceError> {
        authorize(granted, Operation::ListAvailabilityForPerson)?;
        Ok(self.store.list_availability_for_person(person_id).await)
    }

    pub async fn list_appointments(&self, granted: &CapabilitySet) -> Result<Vec<Appointment>, ServiceError> {
        authorize(granted, Operation::ListAppointments)?;
        Ok(self.store.list_appointments().await)
    }

    pub async fn get_appointment(
        &self,
        granted: &CapabilitySet,
        appointment_id: i32,
    ) -> Result<Option<Appointment>, ServiceError> {
        authorize(granted, Operation::GetAppointment)?;
        Ok(self.store.get_appointment(appointment_id).await)
    }

    #[instrument(skip(self, appointment), fields(appointment_id = appointment.appointment_id))]
    pub async fn create_appointment(&self, granted: &CapabilitySet, appointment: Appointment) -> Result<(), ServiceError> {
        authorize(granted, Operation::CreateAppointment)?;
        self.store.create_appointment(appointment).await;
        Ok(())
    }

    #[instrument(skip(self, appointment), fields(appointment_id = appointment.appointment_id))]
    pub async fn update_appointment(
        &self,
        granted: &CapabilitySet,
        appointment_id: i32,
        appointment: Appointment,
    ) -> Result<UpdateOutcome, ServiceError> {
        authorize(granted, Operation::UpdateAppointment)?;
        Ok(self.store.update_appointment(appointment_id, appointment).await)
    }
}
