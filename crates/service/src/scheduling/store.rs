use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

use models::{Appointment, AvailableTime, Person, Seed};

use super::repository::{SchedulingRepository, UpdateOutcome};

#[derive(Default)]
struct Collections {
    persons: Vec<Person>,
    available_times: Vec<AvailableTime>,
    appointments: Vec<Appointment>,
}

/// In-memory scheduling store.
///
/// One lock guards all three collections. Writers take it exclusively, so a
/// replace (remove then append) is never observed half done; readers share
/// it and clone out a snapshot.
pub struct InMemorySchedulingStore {
    inner: RwLock<Collections>,
}

impl InMemorySchedulingStore {
    /// Build a store holding `seed`.
    ///
    /// # Examples
    /// ```
    /// use service::{InMemorySchedulingStore, SchedulingRepository};
    /// use models::Seed;
    /// let today = chrono::NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
    /// let store = InMemorySchedulingStore::new(Seed::roster(today).unwrap());
    /// let ross = tokio_test::block_on(store.get_person(1)).unwrap();
    /// assert_eq!(ross.first_name, "Ross");
    /// ```
    pub fn new(seed: Seed) -> Arc<Self> {
        let Seed { persons, available_times, appointments } = seed;
        Arc::new(Self {
            inner: RwLock::new(Collections { persons, available_times, appointments }),
        })
    }

    pub fn empty() -> Arc<Self> {
        Self::new(Seed::empty())
    }

    /// Number of appointments currently held.
    pub async fn appointment_count(&self) -> usize {
        self.inner.read().await.appointments.len()
    }
}

#[async_trait]
impl SchedulingRepository for InMemorySchedulingStore {
    async fn list_persons(&self) -> Vec<Person> {
        self.inner.read().await.persons.clone()
    }

    async fn get_person(&self, person_id: i32) -> Option<Person> {
        let guard = self.inner.read().await;
        guard.persons.iter().find(|p| p.person_id == person_id).cloned()
    }

    async fn list_availability(&self) -> Vec<AvailableTime> {
        self.inner.read().await.available_times.clone()
    }

    async fn list_availability_for_person(&self, person_id: i32) -> Vec<AvailableTime> {
        let guard = self.inner.read().await;
        guard
            .available_times
            .iter()
            .filter(|w| w.person_id == person_id)
            .cloned()
            .collect()
    }

    async fn list_appointments(&self) -> Vec<Appointment> {
        self.inner.read().await.appointments.clone()
    }

    async fn get_appointment(&self, appointment_id: i32) -> Option<Appointment> {
        let guard = self.inner.read().await;
        guard.appointments.iter().find(|a| a.appointment_id == appointment_id).cloned()
    }

    #[instrument(skip(self, appointment), fields(appointment_id = appointment.appointment_id, person_id = appointment.person_id))]
    async fn create_appointment(&self, appointment: Appointment) {
        let mut guard = self.inner.write().await;
        let duplicate = guard.appointments.iter().any(|a| a.appointment_id == appointment.appointment_id);
        if duplicate {
            debug!("appointment id already present; appending duplicate");
        }
        guard.appointments.push(appointment);
        info!(total = guard.appointments.len(), duplicate, "appointment_created");
    }

    #[instrument(skip(self, appointment), fields(path_id = appointment_id, appointment_id = appointment.appointment_id))]
    async fn update_appointment(&self, appointment_id: i32, appointment: Appointment) -> UpdateOutcome {
        let mut guard = self.inner.write().await;
        let outcome = match guard.appointments.iter().position(|a| a.appointment_id == appointment_id) {
            Some(idx) => {
                guard.appointments.remove(idx);
                UpdateOutcome::Replaced
            }
            None => UpdateOutcome::Inserted,
        };
        guard.appointments.push(appointment);
        info!(?outcome, total = guard.appointments.len(), "appointment_updated");
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn seeded() -> Arc<InMemorySchedulingStore> {
        InMemorySchedulingStore::new(Seed::roster(today()).unwrap())
    }

    fn appt(id: i32, hour: u32, duration: i32, person: i32) -> Appointment {
        Appointment::new(id, Utc.with_ymd_and_hms(2026, 10, 20, hour, 0, 0).unwrap(), duration, person)
    }

    #[tokio::test]
    async fn persons_match_seed_in_order() {
        let seed = Seed::roster(today()).unwrap();
        let store = InMemorySchedulingStore::new(seed.clone());
        assert_eq!(store.list_persons().await, seed.persons);
        for p in &seed.persons {
            assert_eq!(store.get_person(p.person_id).await.as_ref(), Some(p));
        }
        assert!(store.get_person(42).await.is_none());
    }

    #[tokio::test]
    async fn availability_filter_is_order_preserving_subset() {
        let store = seeded();
        let all = store.list_availability().await;
        for id in [1, 2, 3, 99] {
            let expected: Vec<_> = all.iter().filter(|w| w.person_id == id).cloned().collect();
            assert_eq!(store.list_availability_for_person(id).await, expected);
        }
        assert_eq!(store.list_availability_for_person(1).await.len(), 2);
        assert!(store.list_availability_for_person(99).await.is_empty());
    }

    #[tokio::test]
    async fn unknown_appointment_is_absent() {
        let store = seeded();
        assert!(store.get_appointment(1).await.is_some());
        assert!(store.get_appointment(2).await.is_none());
        assert!(store.get_appointment(-1).await.is_none());
    }

    #[tokio::test]
    async fn create_appends_even_with_duplicate_id() {
        let store = seeded();
        let before = store.list_appointments().await.len();

        let dup = appt(1, 14, 15, 2);
        store.create_appointment(dup.clone()).await;

        let after = store.list_appointments().await;
        assert_eq!(after.len(), before + 1);
        assert_eq!(after.last(), Some(&dup));
        assert_eq!(after.iter().filter(|a| a.appointment_id == 1).count(), 2);
        // lookup returns the first match, i.e. the older entry
        assert_ne!(store.get_appointment(1).await, Some(dup));
    }

    #[tokio::test]
    async fn update_replaces_and_moves_to_end() {
        let store = seeded();
        store.create_appointment(appt(2, 11, 30, 3)).await;
        store.create_appointment(appt(3, 12, 30, 4)).await;

        let replacement = appt(2, 16, 45, 3);
        let outcome = store.update_appointment(2, replacement.clone()).await;
        assert_eq!(outcome, UpdateOutcome::Replaced);

        let ids: Vec<i32> = store.list_appointments().await.iter().map(|a| a.appointment_id).collect();
        assert_eq!(ids, vec![1, 3, 2]);
        assert_eq!(store.get_appointment(2).await, Some(replacement));
    }

    #[tokio::test]
    async fn update_only_removes_first_duplicate() {
        let store = InMemorySchedulingStore::empty();
        store.create_appointment(appt(5, 9, 10, 1)).await;
        store.create_appointment(appt(5, 10, 10, 1)).await;

        store.update_appointment(5, appt(5, 11, 10, 1)).await;
        let hours: Vec<u32> = store
            .list_appointments()
            .await
            .iter()
            .map(|a| chrono::Timelike::hour(&a.start))
            .collect();
        assert_eq!(hours, vec![10, 11]);
    }

    #[tokio::test]
    async fn update_without_match_behaves_like_create() {
        let store = seeded();
        let before = store.appointment_count().await;
        let fresh = appt(77, 13, 20, 5);
        let outcome = store.update_appointment(77, fresh.clone()).await;
        assert_eq!(outcome, UpdateOutcome::Inserted);
        let after = store.list_appointments().await;
        assert_eq!(after.len(), before + 1);
        assert_eq!(after.last(), Some(&fresh));
    }

    #[tokio::test]
    async fn update_tolerates_identity_drift() {
        let store = seeded();
        let drifted = appt(9, 10, 30, 1);
        store.update_appointment(1, drifted.clone()).await;
        assert!(store.get_appointment(1).await.is_none());
        assert_eq!(store.list_appointments().await, vec![drifted]);
    }

    #[tokio::test]
    async fn reschedule_example_from_seed() {
        let store = seeded();
        let moved = appt(1, 10, 30, 1);
        store.update_appointment(1, moved.clone()).await;
        assert_eq!(store.list_appointments().await, vec![moved]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_creates_lose_nothing() {
        let store = seeded();
        let initial = store.appointment_count().await;
        let writers = 64;

        let handles: Vec<_> = (0..writers)
            .map(|i| {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.create_appointment(appt(100 + i, 9, 5, 1)).await })
            })
            .collect();
        for h in handles {
            h.await.unwrap();
        }

        let all = store.list_appointments().await;
        assert_eq!(all.len(), initial + writers as usize);
        for i in 0..writers {
            assert_eq!(all.iter().filter(|a| a.appointment_id == 100 + i).count(), 1);
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_updates_keep_count_stable() {
        let store = InMemorySchedulingStore::empty();
        for id in 0..16 {
            store.create_appointment(appt(id, 9, 5, 1)).await;
        }

        let handles: Vec<_> = (0..16)
            .map(|id| {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.update_appointment(id, appt(id, 17, 5, 2)).await })
            })
            .collect();
        for h in handles {
            assert_eq!(h.await.unwrap(), UpdateOutcome::Replaced);
        }

        let all = store.list_appointments().await;
        assert_eq!(all.len(), 16);
        assert!(all.iter().all(|a| a.person_id == 2));
    }
}
