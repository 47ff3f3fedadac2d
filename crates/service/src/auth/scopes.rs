use crate::access::{Capability, CapabilitySet};

use super::domain::Claims;

/// Scope names that grant each capability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeMapping {
    pub read: String,
    pub write: String,
}

impl Default for ScopeMapping {
    fn default() -> Self {
        Self { read: "Scheduler.Read".into(), write: "Scheduler.Write".into() }
    }
}

impl ScopeMapping {
    pub fn new(read: impl Into<String>, write: impl Into<String>) -> Self {
        Self { read: read.into(), write: write.into() }
    }

    pub fn scope_for(&self, capability: Capability) -> &str {
        match capability {
            Capability::Read => &self.read,
            Capability::Write => &self.write,
        }
    }

    /// Map one granted value; `api://app/Scheduler.Read` matches `Scheduler.Read`.
    pub fn resolve(&self, granted: &str) -> Option<Capability> {
        Capability::ALL
            .into_iter()
            .find(|c| matches_scope(granted, self.scope_for(*c)))
    }

    pub fn capabilities(&self, claims: &Claims) -> CapabilitySet {
        claims.granted().filter_map(|g| self.resolve(g)).collect()
    }

    /// Space-delimited `scp` value for a capability set.
    pub fn to_scp(&self, capabilities: CapabilitySet) -> String {
        capabilities.iter().map(|c| self.scope_for(c)).collect::<Vec<_>>().join(" ")
    }
}

fn matches_scope(granted: &str, scope: &str) -> bool {
    granted
        .strip_suffix(scope)
        .is_some_and(|prefix| prefix.is_empty() || prefix.ends_with('/'))
}
