use serde::{Deserialize, Serialize};

use crate::access::CapabilitySet;

/// `aud` may be a single string or a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Audience {
    One(String),
    Many(Vec<String>),
}

/// JWT claims the service reads.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    pub exp: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<Audience>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
    /// Space-delimited delegated scopes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scp: Option<String>,
    /// Application roles.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<String>,
}

impl Claims {
    /// Every scope and role value carried by the token.
    pub fn granted(&self) -> impl Iterator<Item = &str> {
        self.scp
            .as_deref()
            .unwrap_or_default()
            .split_whitespace()
            .chain(self.roles.iter().map(String::as_str))
    }
}

/// A verified caller, handed to request handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub subject: Option<String>,
    pub capabilities: CapabilitySet,
}

impl Caller {
    pub fn new(subject: Option<String>, capabilities: CapabilitySet) -> Self {
        Self { subject, capabilities }
    }
}
