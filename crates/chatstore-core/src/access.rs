//! Credential verification and capability grants.
//!
//! A presented credential is turned into an [`AccessGrant`] by a
//! [`CredentialVerifier`]. Handlers then ask the grant for the [`Scope`] they
//! need instead of re-checking the credential, so per-key scoping only needs a
//! new verifier.

use std::collections::HashSet;
use std::fmt;

use thiserror::Error;

/// A capability a request may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    SessionsRead,
    SessionsWrite,
    MessagesRead,
    MessagesWrite,
}

impl Scope {
    pub const ALL: [Scope; 4] = [
        Scope::SessionsRead,
        Scope::SessionsWrite,
        Scope::MessagesRead,
        Scope::MessagesWrite,
    ];
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::SessionsRead => write!(f, "sessions:read"),
            Scope::SessionsWrite => write!(f, "sessions:write"),
            Scope::MessagesRead => write!(f, "messages:read"),
            Scope::MessagesWrite => write!(f, "messages:write"),
        }
    }
}

/// Errors produced while authorizing a request.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccessError {
    #[error("missing API key")]
    MissingCredential,

    #[error("invalid API key")]
    InvalidCredential,

    #[error("API key lacks scope '{0}'")]
    MissingScope(Scope),
}

/// What a verified credential is allowed to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessGrant {
    /// Stable, non-secret label for the credential (used in logs).
    pub principal: String,
    scopes: HashSet<Scope>,
}

impl AccessGrant {
    pub fn new(principal: impl Into<String>, scopes: impl IntoIterator<Item = Scope>) -> Self {
        Self {
            principal: principal.into(),
            scopes: scopes.into_iter().collect(),
        }
    }

    /// Grant holding every scope.
    pub fn full(principal: impl Into<String>) -> Self {
        Self::new(principal, Scope::ALL)
    }

    pub fn allows(&self, scope: Scope) -> bool {
        self.scopes.contains(&scope)
    }

    /// Fail with [`AccessError::MissingScope`] unless `scope` is held.
    pub fn require(&self, scope: Scope) -> Result<(), AccessError> {
        if self.allows(scope) {
            Ok(())
        } else {
            Err(AccessError::MissingScope(scope))
        }
    }
}

/// Turns a presented credential into a grant.
///
/// Implementations must not log or retain the presented value.
pub trait CredentialVerifier: Send + Sync {
    /// Return the grant for `presented`, or `None` if it is not a valid key.
    fn verify(&self, presented: &str) -> Option<AccessGrant>;
}

/// Authorize a raw header value: missing, unknown and valid keys each map to
/// a distinct outcome.
pub fn authorize(
    verifier: &dyn CredentialVerifier,
    presented: Option<&str>,
) -> Result<AccessGrant, AccessError> {
    let presented = presented.ok_or(AccessError::MissingCredential)?;
    verifier
        .verify(presented)
        .ok_or(AccessError::InvalidCredential)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedVerifier;

    impl CredentialVerifier for FixedVerifier {
        fn verify(&self, presented: &str) -> Option<AccessGrant> {
            match presented {
                "full" => Some(AccessGrant::full("full-key")),
                "reader" => Some(AccessGrant::new(
                    "reader-key",
                    [Scope::SessionsRead, Scope::MessagesRead],
                )),
                _ => None,
            }
        }
    }

    #[test]
    fn test_scope_display() {
        let names: Vec<String> = Scope::ALL.iter().map(Scope::to_string).collect();
        assert_eq!(
            names,
            ["sessions:read", "sessions:write", "messages:read", "messages:write"]
        );
    }

    #[test]
    fn test_authorize_outcomes() {
        assert_eq!(
            authorize(&FixedVerifier, None).unwrap_err(),
            AccessError::MissingCredential
        );
        assert_eq!(
            authorize(&FixedVerifier, Some("nope")).unwrap_err(),
            AccessError::InvalidCredential
        );
        let grant = authorize(&FixedVerifier, Some("full")).unwrap();
        assert_eq!(grant.principal, "full-key");
        assert!(Scope::ALL.iter().all(|s| grant.allows(*s)));
    }

    #[test]
    fn test_require_missing_scope() {
        let grant = authorize(&FixedVerifier, Some("reader")).unwrap();
        assert!(grant.require(Scope::SessionsRead).is_ok());
        assert_eq!(
            grant.require(Scope::MessagesWrite).unwrap_err(),
            AccessError::MissingScope(Scope::MessagesWrite)
        );
        assert_eq!(
            AccessError::MissingScope(Scope::MessagesWrite).to_string(),
            "API key lacks scope 'messages:write'"
        );
    }
}
