//! Shared-key credential verification.
//!
//! The configured key is reduced to its SHA-256 digest at startup. Presented
//! keys are hashed and compared digest-to-digest without early exit, so the
//! comparison time does not depend on how many leading bytes match.

use chatstore_core::access::{AccessGrant, CredentialVerifier};
use secrecy::{ExposeSecret, SecretString};
use sha2::{Digest, Sha256};

/// Principal label attached to grants issued for the shared key.
pub const STATIC_KEY_PRINCIPAL: &str = "static-key";

/// Verifies the single API key configured for the deployment.
pub struct StaticKeyVerifier {
    digest: [u8; 32],
}

impl StaticKeyVerifier {
    pub fn new(key: &SecretString) -> Self {
        Self {
            digest: sha256(key.expose_secret()),
        }
    }
}

impl CredentialVerifier for StaticKeyVerifier {
    fn verify(&self, presented: &str) -> Option<AccessGrant> {
        let candidate = sha256(presented);
        let diff = candidate
            .iter()
            .zip(self.digest.iter())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b));

        (diff == 0).then(|| AccessGrant::full(STATIC_KEY_PRINCIPAL))
    }
}

fn sha256(value: &str) -> [u8; 32] {
    Sha256::digest(value.as_bytes()).into()
}
