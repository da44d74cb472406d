//! Service — command handler registry and dispatch.
//!
//! `Service<S>` holds a store and a set of named command handlers. Each
//! handler receives a `Context<S>` and returns `Result<Value, HandlerError>`.

use std::collections::HashMap;

use log::debug;
use serde_json::Value;

use super::context::Context;
use super::error::HandlerError;
use super::session::Session;

/// A registered command handler with optional guard.
struct CommandHandler<S> {
    guard: Option<Box<dyn Fn(&Context<S>) -> bool + Send + Sync>>,
    handle: Box<dyn Fn(&Context<S>) -> Result<Value, HandlerError> + Send + Sync>,
}

/// A service that routes commands to handler functions.
///
/// Generic over `S`, the store type. Handlers receive a `Context<S>` and can
/// access the store via `ctx.store()`.
pub struct Service<S> {
    store: S,
    handlers: HashMap<String, CommandHandler<S>>,
}

impl<S: Send + Sync + 'static> Service<S> {
    /// Create a new service with the given store.
    pub fn new(store: S) -> Self {
        Self {
            store,
            handlers: HashMap::new(),
        }
    }

    /// Register a command handler.
    ///
    /// Uses builder pattern — returns `self` for chaining.
    pub fn command<F>(mut self, name: &str, handler: F) -> Self
    where
        F: Fn(&Context<S>) -> Result<Value, HandlerError> + Send + Sync + 'static,
    {
        self.handlers.insert(
            name.to_string(),
            CommandHandler {
                guard: None,
                handle: Box::new(handler),
            },
        );
        self
    }

    /// Register a command handler with a guard function.
    ///
    /// The guard is called before the handler. If it returns `false`,
    /// the command is rejected with `HandlerError::GuardRejected`.
    pub fn command_guarded<G, F>(mut self, name: &str, guard: G, handler: F) -> Self
    where
        G: Fn(&Context<S>) -> bool + Send + Sync + 'static,
        F: Fn(&Context<S>) -> Result<Value, HandlerError> + Send + Sync + 'static,
    {
        self.handlers.insert(
            name.to_string(),
            CommandHandler {
                guard: Some(Box::new(guard)),
                handle: Box::new(handler),
            },
        );
        self
    }

    /// Dispatch a command by name.
    ///
    /// Builds a `Context` from the input and session, looks up the handler,
    /// runs the guard (if any), then calls the handler.
    pub fn dispatch(
        &self,
        command: &str,
        input: Value,
        session: Session,
    ) -> Result<Value, HandlerError> {
        let handler = self
            .handlers
            .get(command)
            .ok_or_else(|| HandlerError::UnknownCommand(command.to_string()))?;

        debug!(
            "dispatching {} for {}",
            command,
            session.user_id().unwrap_or("<anonymous>")
        );
        let ctx = Context::new(command.to_string(), input, session, &self.store);

        if let Some(guard) = &handler.guard {
            if !guard(&ctx) {
                return Err(HandlerError::GuardRejected(command.to_string()));
            }
        }

        (handler.handle)(&ctx)
    }

    /// List registered command names.
    pub fn commands(&self) -> Vec<&str> {
        self.handlers.keys().map(|s| s.as_str()).collect()
    }

    /// Get a reference to the store.
    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryStore;
    use serde_json::json;

    fn test_service() -> Service<InMemoryStore> {
        Service::new(InMemoryStore::new())
            .command("ping", |_ctx| Ok(json!({ "pong": true })))
            .command_guarded(
                "echo",
                |ctx| ctx.has_field("message"),
                |ctx| Ok(ctx.raw_input().clone()),
            )
            .command("whoami", |ctx| {
                let user_id = ctx.require_user()?;
                Ok(json!({ "user_id": user_id }))
            })
    }

    #[test]
    fn dispatches_registered_command() {
        let service = test_service();
        let result = service
            .dispatch("ping", json!({}), Session::anonymous())
            .unwrap();
        assert_eq!(result, json!({ "pong": true }));
    }

    #[test]
    fn unknown_command_is_rejected() {
        let service = test_service();
        let err = service
            .dispatch("nope", json!({}), Session::anonymous())
            .unwrap_err();
        assert!(matches!(err, HandlerError::UnknownCommand(_)));
    }

    #[test]
    fn guard_rejects_missing_fields() {
        let service = test_service();
        let err = service
            .dispatch("echo", json!({}), Session::anonymous())
            .unwrap_err();
        assert!(matches!(err, HandlerError::GuardRejected(_)));

        let ok = service
            .dispatch("echo", json!({ "message": "hi" }), Session::anonymous())
            .unwrap();
        assert_eq!(ok, json!({ "message": "hi" }));
    }

    #[test]
    fn session_identity_reaches_handlers() {
        let service = test_service();

        let err = service
            .dispatch("whoami", json!({}), Session::anonymous())
            .unwrap_err();
        assert_eq!(err.status_code(), 401);

        let ok = service
            .dispatch("whoami", json!({}), Session::customer("cust-7"))
            .unwrap();
        assert_eq!(ok, json!({ "user_id": "cust-7" }));
    }
}
