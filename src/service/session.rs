//! Session - the authenticated identity forwarded with each request.

use crate::domain::Role;

/// The caller's identity for one request. Built by the transport from
/// forwarded headers; handlers never look identity up anywhere else.
#[derive(Debug, Clone, Default)]
pub struct Session {
    user_id: Option<String>,
    role: Option<Role>,
}

impl Session {
    /// A session with no identity (a visitor browsing the shop).
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// A customer session.
    pub fn customer(user_id: impl Into<String>) -> Self {
        Self::with_role(user_id, Role::Customer)
    }

    /// An administrator session.
    pub fn admin(user_id: impl Into<String>) -> Self {
        Self::with_role(user_id, Role::Admin)
    }

    pub fn with_role(user_id: impl Into<String>, role: Role) -> Self {
        Session {
            user_id: Some(user_id.into()),
            role: Some(role),
        }
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    pub fn role(&self) -> Option<Role> {
        self.role
    }

    pub fn is_admin(&self) -> bool {
        self.role == Some(Role::Admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anonymous_session() {
        let session = Session::anonymous();
        assert_eq!(session.user_id(), None);
        assert_eq!(session.role(), None);
        assert!(!session.is_admin());
    }

    #[test]
    fn customer_session() {
        let session = Session::customer("cust-42");
        assert_eq!(session.user_id(), Some("cust-42"));
        assert_eq!(session.role(), Some(Role::Customer));
        assert!(!session.is_admin());
    }

    #[test]
    fn admin_session() {
        let session = Session::admin("admin-1");
        assert_eq!(session.user_id(), Some("admin-1"));
        assert!(session.is_admin());
    }
}
