//! Context passed to command handlers.
//!
//! Carries the parsed input, the request session, and a reference to the
//! store. Handlers access everything they need through the context.

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::HandlerError;
use super::session::Session;
use crate::domain::Role;

/// The context passed to every command handler.
///
/// Generic over `S` (the store type) so handlers can run against whatever
/// store implementation the service is configured with.
pub struct Context<'a, S> {
    /// The command name being handled.
    command_name: String,
    /// Raw JSON input from the request.
    input: Value,
    /// The caller's identity and role.
    session: Session,
    /// Reference to the store.
    store: &'a S,
}

impl<'a, S> Context<'a, S> {
    pub(crate) fn new(command_name: String, input: Value, session: Session, store: &'a S) -> Self {
        Self {
            command_name,
            input,
            session,
            store,
        }
    }

    /// Deserialize the input payload into a typed struct.
    pub fn input<T: DeserializeOwned>(&self) -> Result<T, HandlerError> {
        serde_json::from_value(self.input.clone())
            .map_err(|e| HandlerError::DecodeFailed(e.to_string()))
    }

    /// Get the raw JSON input.
    pub fn raw_input(&self) -> &Value {
        &self.input
    }

    /// Get the command name.
    pub fn command_name(&self) -> &str {
        &self.command_name
    }

    /// Get the session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Get the caller's user ID. Returns `Unauthorized` if not signed in.
    pub fn require_user(&self) -> Result<&str, HandlerError> {
        self.session
            .user_id()
            .ok_or_else(|| HandlerError::Unauthorized("sign in required".into()))
    }

    /// Get the caller's user ID, requiring the customer role.
    pub fn require_customer(&self) -> Result<&str, HandlerError> {
        let user_id = self.require_user()?;
        match self.session.role() {
            Some(Role::Customer) => Ok(user_id),
            _ => Err(HandlerError::Forbidden("customer role required".into())),
        }
    }

    /// Get the caller's user ID, requiring the admin role.
    pub fn require_admin(&self) -> Result<&str, HandlerError> {
        let user_id = self.require_user()?;
        if self.session.is_admin() {
            Ok(user_id)
        } else {
            Err(HandlerError::Forbidden("admin role required".into()))
        }
    }

    /// Get the caller's role.
    pub fn role(&self) -> Option<Role> {
        self.session.role()
    }

    /// Get a reference to the store.
    pub fn store(&self) -> &S {
        self.store
    }

    /// Check if the raw input contains a field.
    pub fn has_field(&self, field: &str) -> bool {
        self.input.get(field).is_some()
    }

    /// Check if the raw input contains all specified fields.
    pub fn has_fields(&self, fields: &[&str]) -> bool {
        fields.iter().all(|f| self.has_field(f))
    }
}
