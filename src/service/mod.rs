//! Service layer - command dispatch with explicit request identity.
//!
//! Commands are dispatched by name with a JSON payload and a [`Session`]
//! carrying the caller's identity and role. There is no ambient session
//! state: whoever fronts this service (an authenticating proxy verifying the
//! session cookie) forwards the identity, and handlers read it from the
//! [`Context`].
//!
//! ## Example
//!
//! ```ignore
//! use storefront::service::{Service, Session};
//! use serde_json::json;
//!
//! let service = Service::new(store)
//!     .command("products.list", |ctx| { /* ... */ });
//!
//! let result = service.dispatch("products.list", json!({}), Session::anonymous());
//! ```

mod context;
mod error;
mod service;
mod session;

#[cfg(feature = "http")]
mod http;

pub use context::Context;
pub use error::HandlerError;
pub use service::Service;
pub use session::Session;

#[cfg(feature = "http")]
pub use http::{router, serve};
