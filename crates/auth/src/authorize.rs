use thiserror::Error;

use musicshop_core::DomainError;

use crate::{Permission, User};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("account is disabled")]
    Inactive,

    #[error("forbidden: missing permission '{0}'")]
    Forbidden(String),
}

impl From<AuthzError> for DomainError {
    fn from(err: AuthzError) -> Self {
        DomainError::Unauthorized(err.to_string())
    }
}

/// Check that `user` may perform an action guarded by `required`.
///
/// - No IO
/// - Disabled accounts are refused before permissions are consulted
pub fn authorize(user: &User, required: &Permission) -> Result<(), AuthzError> {
    if !user.active {
        return Err(AuthzError::Inactive);
    }

    let granted = user
        .role
        .permissions()
        .iter()
        .any(|p| p.is_wildcard() || p == required);

    if granted {
        Ok(())
    } else {
        tracing::debug!(user = %user.username, permission = %required, "authorization denied");
        Err(AuthzError::Forbidden(required.as_str().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Role;

    fn user(role: Role) -> User {
        User::new("someone", "hash", role)
    }

    #[test]
    fn admin_wildcard_allows_everything() {
        let admin = user(Role::Admin);
        assert!(authorize(&admin, &Permission::USERS_MANAGE).is_ok());
        assert!(authorize(&admin, &Permission::new("anything.at.all")).is_ok());
    }

    #[test]
    fn employee_can_process_orders_but_not_view_reports() {
        let employee = user(Role::ShopEmployee);
        assert!(authorize(&employee, &Permission::ORDERS_PROCESS).is_ok());
        assert_eq!(
            authorize(&employee, &Permission::REPORTS_VIEW),
            Err(AuthzError::Forbidden("reports.view".to_string()))
        );
    }

    #[test]
    fn accountant_views_reports_but_cannot_edit_inventory() {
        let accountant = user(Role::Accountant);
        assert!(authorize(&accountant, &Permission::REPORTS_VIEW).is_ok());
        assert!(authorize(&accountant, &Permission::INVENTORY_WRITE).is_err());
    }

    #[test]
    fn denial_converts_into_a_domain_error() {
        fn guarded(user: &User) -> Result<(), DomainError> {
            authorize(user, &Permission::USERS_MANAGE)?;
            Ok(())
        }

        assert!(guarded(&user(Role::Admin)).is_ok());
        assert_eq!(
            guarded(&user(Role::Accountant)),
            Err(DomainError::Unauthorized(
                "forbidden: missing permission 'users.manage'".to_string()
            ))
        );
    }

    #[test]
    fn disabled_account_is_refused() {
        let mut admin = user(Role::Admin);
        admin.active = false;
        assert_eq!(authorize(&admin, &Permission::INVENTORY_READ), Err(AuthzError::Inactive));
    }
}
