//! Handler: profile.update
//!
//! Display-name change for the signed-in account.

use serde::Deserialize;
use serde_json::{json, Value};

use crate::domain::User;
use crate::service::{Context, HandlerError};
use crate::store::Store;

pub const COMMAND: &str = "profile.update";

#[derive(Deserialize)]
pub struct Input {
    pub name: String,
}

pub fn guard<S>(ctx: &Context<S>) -> bool {
    ctx.has_field("name")
}

pub fn handle<S: Store>(ctx: &Context<S>) -> Result<Value, HandlerError> {
    let user_id = ctx.require_user()?;
    let input = ctx.input::<Input>()?;

    let existing = ctx
        .store()
        .get::<User>(user_id)?
        .ok_or_else(|| HandlerError::NotFound(user_id.to_string()))?;

    let mut user = existing.data;
    user.name = input.name.trim().to_string();

    let updated = ctx.store().update(&user, existing.version)?;

    Ok(json!({ "user": serde_json::to_value(updated.data)? }))
}
