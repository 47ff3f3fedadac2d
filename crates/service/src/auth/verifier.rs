use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header as JwtHeader, Validation};
use tracing::{debug, instrument};

use crate::access::CapabilitySet;

use super::domain::{Audience, Caller, Claims};
use super::errors::AuthError;
use super::scopes::ScopeMapping;

/// Validates HS256 bearer tokens and maps their grants to capabilities.
pub struct TokenVerifier {
    decoding: DecodingKey,
    encoding: EncodingKey,
    scopes: ScopeMapping,
    audience: Option<String>,
    issuer: Option<String>,
}

impl TokenVerifier {
    pub fn new(secret: &str, scopes: ScopeMapping) -> Self {
        Self {
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            scopes,
            audience: None,
            issuer: None,
        }
    }

    /// Require `aud` to contain this value.
    pub fn with_audience(mut self, audience: Option<String>) -> Self {
        self.audience = audience;
        self
    }

    /// Require `iss` to equal this value.
    pub fn with_issuer(mut self, issuer: Option<String>) -> Self {
        self.issuer = issuer;
        self
    }

    pub fn scopes(&self) -> &ScopeMapping {
        &self.scopes
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        match &self.audience {
            Some(aud) => validation.set_audience(&[aud]),
            None => validation.validate_aud = false,
        }
        if let Some(iss) = &self.issuer {
            validation.set_issuer(&[iss]);
        }
        validation
    }

    /// Verify `token` and resolve the caller's capabilities.
    ///
    /// A valid token with no recognised scope yields an empty capability set;
    /// the gate rejects such callers per operation.
    pub fn verify(&self, token: &str) -> Result<Caller, AuthError> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation())
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?;
        let capabilities = self.scopes.capabilities(&data.claims);
        debug!(sub = ?data.claims.sub, ?capabilities, "token_verified");
        Ok(Caller::new(data.claims.sub, capabilities))
    }

    /// Sign a token for `subject` granting `capabilities` as `scp` scopes.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{ScopeMapping, TokenVerifier};
    /// use service::{Capability, CapabilitySet};
    /// let verifier = TokenVerifier::new("secret", ScopeMapping::default());
    /// let caps = CapabilitySet::empty().with(Capability::Read);
    /// let token = verifier.issue("ross", caps, chrono::Duration::minutes(5)).unwrap();
    /// let caller = verifier.verify(&token).unwrap();
    /// assert_eq!(caller.capabilities, caps);
    /// assert_eq!(caller.subject.as_deref(), Some("ross"));
    /// ```
    #[instrument(skip(self))]
    pub fn issue(&self, subject: &str, capabilities: CapabilitySet, ttl: Duration) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            sub: Some(subject.to_string()),
            exp: (now + ttl).timestamp().max(0) as usize,
            iat: Some(now.timestamp().max(0) as usize),
            aud: self.audience.clone().map(Audience::One),
            iss: self.issuer.clone(),
            scp: Some(self.scopes.to_scp(capabilities)),
            roles: Vec::new(),
        };
        encode(&JwtHeader::default(), &claims, &self.encoding).map_err(|e| AuthError::TokenError(e.to_string()))
    }
}
