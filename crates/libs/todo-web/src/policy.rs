//! Access policy.
//!
//! Pure checks over the caller's context; no I/O.

use todo_sdk::role::UserRole;
use tracing::warn;

use crate::{ctx::Ctx, prelude::*};

/// Fails with [`Error::ApiForbidden`] unless the caller holds `role`.
pub fn require_role(ctx: &Ctx, role: UserRole) -> Result<()> {
    if ctx.role != role {
        warn!("User {} lacks role {role}", ctx.user_id);
        return Err(Error::ApiForbidden);
    }
    Ok(())
}

/// Lets the caller act on `user_id` if it is that user or holds `role`.
pub fn require_self_or_role(ctx: &Ctx, user_id: &str, role: UserRole) -> Result<()> {
    if ctx.user_id == user_id {
        return Ok(());
    }
    require_role(ctx, role)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(user_id: &str, role: UserRole) -> Ctx {
        Ctx::new(user_id, "a@x.com", role)
    }

    #[test]
    fn test_require_role() {
        assert!(require_role(&ctx("a", UserRole::Admin), UserRole::Admin).is_ok());
        assert!(matches!(
            require_role(&ctx("a", UserRole::User), UserRole::Admin),
            Err(Error::ApiForbidden)
        ));
    }

    #[test]
    fn test_require_self_or_role() {
        let cases = [
            ("a", UserRole::User, "a", true),
            ("a", UserRole::User, "b", false),
            ("a", UserRole::Admin, "b", true),
            ("a", UserRole::Admin, "a", true),
        ];
        for (caller, role, target, allowed) in cases {
            let result = require_self_or_role(&ctx(caller, role), target, UserRole::Admin);
            assert_eq!(result.is_ok(), allowed, "{caller} {role} -> {target}");
        }
    }
}
