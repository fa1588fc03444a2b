//! Role-based authorization in one place.
//!
//! Every mutating admin-management path goes through [`authorize`] so the rule
//! table below is the single source of truth. Reads and content management
//! are open to every authenticated role and need no entry here.

use models::admin::Role;
use tracing::warn;

use crate::errors::ServiceError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ManageAdmins,
}

pub fn is_allowed(role: Role, action: Action) -> bool {
    match action {
        Action::ManageAdmins => role == Role::Superadmin,
    }
}

pub fn authorize(role: Role, action: Action) -> Result<(), ServiceError> {
    if is_allowed(role, action) {
        return Ok(());
    }
    warn!(requester_role = %role, action = ?action, "forbidden");
    Err(ServiceError::Forbidden(format!("role '{}' may not perform {:?}", role, action)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_superadmin_manages_admins() {
        assert!(is_allowed(Role::Superadmin, Action::ManageAdmins));
        assert!(authorize(Role::Superadmin, Action::ManageAdmins).is_ok());
        assert!(!is_allowed(Role::Admin, Action::ManageAdmins));
        assert!(matches!(authorize(Role::Admin, Action::ManageAdmins), Err(ServiceError::Forbidden(_))));
    }
}
