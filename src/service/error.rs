//! Error types for command handlers.

use std::error::Error;
use std::fmt;

use crate::checkout::CheckoutError;
use crate::orders::OrderStatusError;
use crate::store::StoreError;

/// Error type for command handler operations.
#[derive(Debug)]
pub enum HandlerError {
    /// No handler registered for this command name.
    UnknownCommand(String),
    /// Payload decode / deserialization failed.
    DecodeFailed(String),
    /// Business logic rejected the command (validation, invariant violation).
    Rejected(String),
    /// Resource not found.
    NotFound(String),
    /// Missing authentication.
    Unauthorized(String),
    /// Authenticated, but the caller's role does not allow this command.
    Forbidden(String),
    /// Store error.
    Store(StoreError),
    /// Guard rejected the command (input validation failed).
    GuardRejected(String),
    /// Other error.
    Other(Box<dyn Error + Send + Sync>),
}

impl fmt::Display for HandlerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandlerError::UnknownCommand(name) => write!(f, "unknown command: {}", name),
            HandlerError::DecodeFailed(msg) => write!(f, "decode failed: {}", msg),
            HandlerError::Rejected(msg) => write!(f, "rejected: {}", msg),
            HandlerError::NotFound(id) => write!(f, "not found: {}", id),
            HandlerError::Unauthorized(msg) => write!(f, "unauthorized: {}", msg),
            HandlerError::Forbidden(msg) => write!(f, "forbidden: {}", msg),
            HandlerError::Store(e) => write!(f, "store error: {}", e),
            HandlerError::GuardRejected(name) => {
                write!(f, "guard rejected command: {}", name)
            }
            HandlerError::Other(e) => write!(f, "handler error: {}", e),
        }
    }
}

impl Error for HandlerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            HandlerError::Store(e) => Some(e),
            HandlerError::Other(e) => Some(e.as_ref()),
            _ => None,
        }
    }
}

impl From<StoreError> for HandlerError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound {
                ref collection,
                ref id,
            } => HandlerError::NotFound(format!("{}:{}", collection, id)),
            other => HandlerError::Store(other),
        }
    }
}

impl From<serde_json::Error> for HandlerError {
    fn from(err: serde_json::Error) -> Self {
        HandlerError::DecodeFailed(err.to_string())
    }
}

impl From<CheckoutError> for HandlerError {
    fn from(err: CheckoutError) -> Self {
        match err {
            CheckoutError::ProductMissing { .. } => HandlerError::NotFound(err.to_string()),
            CheckoutError::Store(e) => HandlerError::Store(e),
            other => HandlerError::Rejected(other.to_string()),
        }
    }
}

impl From<OrderStatusError> for HandlerError {
    fn from(err: OrderStatusError) -> Self {
        match err {
            OrderStatusError::NotFound(_) => HandlerError::NotFound(err.to_string()),
            OrderStatusError::Store(e) => HandlerError::Store(e),
            other => HandlerError::Rejected(other.to_string()),
        }
    }
}

impl HandlerError {
    /// Map this error to an HTTP-style status code.
    pub fn status_code(&self) -> u16 {
        match self {
            HandlerError::UnknownCommand(_) => 404,
            HandlerError::DecodeFailed(_) => 400,
            HandlerError::Rejected(_) => 422,
            HandlerError::NotFound(_) => 404,
            HandlerError::Unauthorized(_) => 401,
            HandlerError::Forbidden(_) => 403,
            HandlerError::Store(_) => 500,
            HandlerError::GuardRejected(_) => 400,
            HandlerError::Other(_) => 500,
        }
    }
}
