use std::fmt;

use serde::{Deserialize, Serialize};

/// A permission granted to a caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Capability {
    Read,
    Write,
}

impl Capability {
    pub const ALL: [Capability; 2] = [Capability::Read, Capability::Write];

    fn bit(self) -> u8 {
        match self {
            Capability::Read => 0b01,
            Capability::Write => 0b10,
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capability::Read => f.write_str("Read"),
            Capability::Write => f.write_str("Write"),
        }
    }
}

/// Subset of `{Read, Write}` held by a caller.
#[derive(Clone, Copy, Default, PartialEq, Eq)]
pub struct CapabilitySet(u8);

impl CapabilitySet {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub fn all() -> Self {
        Capability::ALL.into_iter().collect()
    }

    pub fn insert(&mut self, capability: Capability) {
        self.0 |= capability.bit();
    }

    pub fn with(mut self, capability: Capability) -> Self {
        self.insert(capability);
        self
    }

    pub fn contains(&self, capability: Capability) -> bool {
        self.0 & capability.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Capability> + '_ {
        Capability::ALL.into_iter().filter(move |c| self.contains(*c))
    }
}

impl FromIterator<Capability> for CapabilitySet {
    fn from_iter<I: IntoIterator<Item = Capability>>(iter: I) -> Self {
        let mut set = Self::empty();
        for c in iter {
            set.insert(c);
        }
        set
    }
}

impl fmt::Debug for CapabilitySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Every operation the gate fronts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    ListPersons,
    GetPerson,
    ListAvailability,
    ListAvailabilityForPerson,
    ListAppointments,
    GetAppointment,
    CreateAppointment,
    UpdateAppointment,
}

impl Operation {
    pub const ALL: [Operation; 8] = [
        Operation::ListPersons,
        Operation::GetPerson,
        Operation::ListAvailability,
        Operation::ListAvailabilityForPerson,
        Operation::ListAppointments,
        Operation::GetAppointment,
        Operation::CreateAppointment,
        Operation::UpdateAppointment,
    ];

    /// The operation to capability table.
    pub fn required_capability(self) -> Capability {
        match self {
            Operation::ListPersons
            | Operation::GetPerson
            | Operation::ListAvailability
            | Operation::ListAvailabilityForPerson
            | Operation::ListAppointments
            | Operation::GetAppointment => Capability::Read,
            Operation::CreateAppointment | Operation::UpdateAppointment => Capability::Write,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Operation::ListPersons => "listPersons",
            Operation::GetPerson => "getPerson",
            Operation::ListAvailability => "listAvailability",
            Operation::ListAvailabilityForPerson => "listAvailabilityForPerson",
            Operation::ListAppointments => "listAppointments",
            Operation::GetAppointment => "getAppointment",
            Operation::CreateAppointment => "createAppointment",
            Operation::UpdateAppointment => "updateAppointment",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
