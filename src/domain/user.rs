use std::time::SystemTime;

use serde::{Deserialize, Serialize};

use crate::store::Record;

/// A user's role, deciding which commands they may dispatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "ADMIN")]
    Admin,
    #[serde(rename = "USER")]
    Customer,
}

impl Role {
    /// Parse the wire form. Returns None for anything unrecognized.
    pub fn parse(s: &str) -> Option<Role> {
        match s {
            "ADMIN" => Some(Role::Admin),
            "USER" => Some(Role::Customer),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Customer => "USER",
        }
    }
}

/// A storefront account. Credentials live with the authenticating proxy,
/// not here; this record is identity and role only.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub created_at: SystemTime,
}

impl User {
    pub fn new(email: impl Into<String>, name: impl Into<String>, role: Role) -> Self {
        User {
            id: uuid::Uuid::now_v7().to_string(),
            email: email.into(),
            name: name.into(),
            role,
            created_at: SystemTime::now(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

impl Record for User {
    const COLLECTION: &'static str = "users";

    fn id(&self) -> &str {
        &self.id
    }
}
