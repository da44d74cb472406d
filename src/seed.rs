//! Bootstrap data for a fresh store.

use log::info;

use crate::domain::{Role, User};
use crate::store::{Store, StoreError};

/// Create the administrator account if no user with `email` exists yet.
/// Idempotent; returns the existing account on repeat runs.
pub fn ensure_admin<S: Store>(store: &S, email: &str, name: &str) -> Result<User, StoreError> {
    if let Some(existing) = store
        .find::<User>(&|u| u.email == email)?
        .into_iter()
        .next()
    {
        return Ok(existing.data);
    }

    let admin = User::new(email, name, Role::Admin);
    store.insert(&admin)?;
    info!("admin account created: {}", email);
    Ok(admin)
}
