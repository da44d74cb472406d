//! Handler: users.register
//!
//! Creates the storefront account record. Credentials are the
//! authenticating proxy's concern; this only records identity and role.

use serde::Deserialize;
use serde_json::{json, Value};

use crate::domain::{Role, User};
use crate::service::{Context, HandlerError};
use crate::store::Store;

pub const COMMAND: &str = "users.register";

#[derive(Deserialize)]
pub struct Input {
    pub email: String,
    #[serde(default)]
    pub name: String,
}

pub fn guard<S>(ctx: &Context<S>) -> bool {
    ctx.has_field("email")
}

pub fn handle<S: Store>(ctx: &Context<S>) -> Result<Value, HandlerError> {
    let input = ctx.input::<Input>()?;

    let email = input.email.trim().to_string();
    if email.is_empty() {
        return Err(HandlerError::Rejected("email is required".into()));
    }

    let taken = ctx.store().find::<User>(&|u| u.email == email)?;
    if !taken.is_empty() {
        return Err(HandlerError::Rejected("email already registered".into()));
    }

    let user = User::new(email, input.name.trim(), Role::Customer);
    ctx.store().insert(&user)?;

    Ok(json!({ "user": serde_json::to_value(user)? }))
}
