//! Role predicates evaluated against token claims.
//!
//! | Gate  | Passes when                                         |
//! |-------|-----------------------------------------------------|
//! | admin | `is_admin && is_active`                             |
//! | staff | `is_active`                                         |
//! | user  | `is_active && (is_admin \|\| sub == path user_id)`  |
//!
//! The `is_*`/`can_*` functions are the pure predicates; the `check_*`
//! variants turn a failed predicate into a 403.

use rolodex_core::AppError;
use uuid::Uuid;

use crate::claims::Claims;

pub fn is_authorized_admin(claims: &Claims) -> bool {
    claims.is_admin && claims.is_active
}

pub fn is_authorized_staff(claims: &Claims) -> bool {
    claims.is_active
}

pub fn can_access_user(claims: &Claims, user_id: Uuid) -> bool {
    claims.is_active && (claims.is_admin || claims.sub == user_id)
}

pub fn check_admin(claims: &Claims) -> Result<(), AppError> {
    if is_authorized_admin(claims) {
        Ok(())
    } else {
        Err(AppError::forbidden(
            "Access denied. Active administrator privileges required.",
        ))
    }
}

pub fn check_staff(claims: &Claims) -> Result<(), AppError> {
    if is_authorized_staff(claims) {
        Ok(())
    } else {
        Err(AppError::forbidden("Access denied. Account is inactive."))
    }
}

pub fn check_user_access(claims: &Claims, user_id: Uuid) -> Result<(), AppError> {
    if !claims.is_active {
        return Err(AppError::forbidden("Access denied. Account is inactive."));
    }
    if !can_access_user(claims, user_id) {
        return Err(AppError::forbidden(
            "Access denied. You can only access your own resources.",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(is_admin: bool, is_active: bool) -> Claims {
        Claims {
            sub: Uuid::new_v4(),
            is_admin,
            is_active,
            iss: "contact-app".to_string(),
            iat: 1,
            exp: 9999999999,
        }
    }

    #[test]
    fn test_admin_gate_truth_table() {
        assert!(is_authorized_admin(&claims(true, true)));
        assert!(!is_authorized_admin(&claims(true, false)));
        assert!(!is_authorized_admin(&claims(false, true)));
        assert!(!is_authorized_admin(&claims(false, false)));
    }

    #[test]
    fn test_staff_gate_only_needs_active() {
        assert!(is_authorized_staff(&claims(false, true)));
        assert!(is_authorized_staff(&claims(true, true)));
        assert!(!is_authorized_staff(&claims(true, false)));
    }

    #[test]
    fn test_user_gate_own_resources() {
        let me = claims(false, true);
        assert!(can_access_user(&me, me.sub));
        assert!(!can_access_user(&me, Uuid::new_v4()));
    }

    #[test]
    fn test_user_gate_admin_reaches_anyone() {
        let admin = claims(true, true);
        assert!(can_access_user(&admin, Uuid::new_v4()));
    }

    #[test]
    fn test_user_gate_inactive_blocked_even_for_self() {
        let inactive = claims(false, false);
        assert!(!can_access_user(&inactive, inactive.sub));

        let inactive_admin = claims(true, false);
        assert!(!can_access_user(&inactive_admin, Uuid::new_v4()));
    }

    #[test]
    fn test_checks_return_forbidden() {
        let user = claims(false, true);
        let err = check_admin(&user).unwrap_err();
        assert_eq!(err.status.as_u16(), 403);

        let err = check_user_access(&user, Uuid::new_v4()).unwrap_err();
        assert_eq!(err.status.as_u16(), 403);

        assert!(check_staff(&user).is_ok());
        assert!(check_user_access(&user, user.sub).is_ok());
    }
}
