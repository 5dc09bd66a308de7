use thiserror::Error;

use crate::models::User;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("{0} is not implemented yet")]
    NotImplemented(&'static str),
}

/// Decides whether a password matches a roster member.
///
/// Callers only see this trait, so the plaintext mock can be swapped for a
/// hashing verifier without touching the session store.
pub trait CredentialVerifier {
    fn verify(&self, user: &User, password: &str) -> bool;
}

/// Compares the stored password verbatim. Only suitable for the demo roster.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaintextVerifier;

impl CredentialVerifier for PlaintextVerifier {
    fn verify(&self, user: &User, password: &str) -> bool {
        user.password == password
    }
}
