use std::rc::Rc;

use tracing::{info, warn};

use crate::auth::{AuthError, CredentialVerifier, PlaintextVerifier};
use crate::models::User;
use crate::roster::Roster;

/// Holds the logged-in family member, if any.
pub struct SessionStore {
    roster: Rc<Roster>,
    verifier: Box<dyn CredentialVerifier>,
    current: Option<User>,
}

impl SessionStore {
    pub fn new(roster: Rc<Roster>) -> Self {
        Self::with_verifier(roster, Box::new(PlaintextVerifier))
    }

    pub fn with_verifier(roster: Rc<Roster>, verifier: Box<dyn CredentialVerifier>) -> Self {
        Self {
            roster,
            verifier,
            current: None,
        }
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn current(&self) -> Option<&User> {
        self.current.as_ref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.current.is_some()
    }

    pub fn login(&mut self, email: &str, password: &str) -> Result<User, AuthError> {
        let member = self
            .roster
            .find_by_email(email)
            .filter(|m| self.verifier.verify(m, password))
            .cloned();

        match member {
            Some(user) => {
                info!(user_id = %user.id, "Login succeeded");
                self.current = Some(user.clone());
                Ok(user)
            }
            None => {
                warn!(email = %email, "Login rejected");
                Err(AuthError::InvalidCredentials)
            }
        }
    }

    pub fn logout(&mut self) {
        if let Some(user) = self.current.take() {
            info!(user_id = %user.id, "Logged out");
        }
    }

    pub fn register(&mut self, email: &str, _password: &str, _name: &str) -> Result<User, AuthError> {
        info!(email = %email, "Registration requested");
        Err(AuthError::NotImplemented("Registration"))
    }

    pub fn request_password_reset(&mut self, email: &str) -> Result<(), AuthError> {
        info!(email = %email, "Password reset requested");
        Err(AuthError::NotImplemented("Password reset"))
    }
}
