//! The composite authorization check used by route guards.

use core::fmt;

use opi_core::{Principal, UserRole};

use crate::controller::AccessController;
use crate::role::RoleState;

/// Which authority granted access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrantSource {
    /// A locally-issued PIN session.
    PinSession,
    /// The remote identity service's role lookup.
    RemoteRole,
}

/// Why access was denied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DenialReason {
    /// No PIN session and no remote identity.
    Unauthenticated,
    /// The remote service answered with a role below the requirement.
    InsufficientRole(UserRole),
    /// The role lookup failed; the caller's access could not be
    /// verified. Deliberately distinct from `InsufficientRole` so the
    /// caller can be told to re-authenticate instead of "access denied".
    VerificationFailed,
}

impl fmt::Display for DenialReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unauthenticated => write!(f, "you must be logged in to access this page"),
            Self::InsufficientRole(role) => {
                write!(f, "your role ({role}) does not permit access to this page")
            }
            Self::VerificationFailed => {
                write!(f, "could not verify your access, please log in again")
            }
        }
    }
}

/// Outcome of an authorization check. Never an error - every input
/// combination maps to a definite decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    /// Access allowed.
    Granted(GrantSource),
    /// A remote identity is present but its role is still being fetched.
    Pending,
    /// Access refused, with a user-presentable reason.
    Denied(DenialReason),
}

impl AccessDecision {
    /// Whether this decision allows access.
    #[must_use]
    pub const fn is_granted(&self) -> bool {
        matches!(self, Self::Granted(_))
    }
}

/// Decide whether the current caller may enter a `required`-role area.
///
/// Pure with respect to its inputs: in-memory session state, a fresh
/// storage snapshot (taken inside the controller accessor), the identity
/// presence, and the role state. Recomputed on every call, never cached.
///
/// The PIN check runs first and short-circuits everything remote. The
/// role fetch is asynchronous; checking it first would flash a denial or
/// a loading state at an admin whose PIN session is already valid. This
/// precedence is the observed product behavior - if it ever changes,
/// this function is the only place to change it.
#[must_use]
pub fn resolve_access(
    required: UserRole,
    controller: &AccessController,
    identity: Option<&Principal>,
    role: &RoleState,
) -> AccessDecision {
    if required == UserRole::Admin && controller.is_admin_session() {
        return AccessDecision::Granted(GrantSource::PinSession);
    }

    if identity.is_none() {
        return AccessDecision::Denied(DenialReason::Unauthenticated);
    }

    match role {
        RoleState::NotFetched | RoleState::Fetching => AccessDecision::Pending,
        RoleState::Failed(_) => AccessDecision::Denied(DenialReason::VerificationFailed),
        RoleState::Fetched(actual) => {
            if *actual == required {
                AccessDecision::Granted(GrantSource::RemoteRole)
            } else {
                AccessDecision::Denied(DenialReason::InsufficientRole(*actual))
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use opi_core::Email;

    use crate::store::{MemoryScope, SessionStore};

    use super::*;

    fn controller() -> AccessController {
        AccessController::new(SessionStore::new(
            Box::new(MemoryScope::new()),
            Box::new(MemoryScope::new()),
        ))
    }

    fn principal() -> Principal {
        Principal::parse("w7x7r-cok77-xa").unwrap()
    }

    #[test]
    fn test_pin_session_short_circuits_remote() {
        let ctrl = controller();
        ctrl.login(Email::parse("owner@example.com").unwrap());

        // Whatever the remote side says - pending, failed, or an
        // explicit guest answer - the PIN session wins.
        for role in [
            RoleState::NotFetched,
            RoleState::Fetching,
            RoleState::Failed("boom".to_owned()),
            RoleState::Fetched(UserRole::Guest),
        ] {
            assert_eq!(
                resolve_access(UserRole::Admin, &ctrl, None, &role),
                AccessDecision::Granted(GrantSource::PinSession)
            );
            assert_eq!(
                resolve_access(UserRole::Admin, &ctrl, Some(&principal()), &role),
                AccessDecision::Granted(GrantSource::PinSession)
            );
        }
    }

    #[test]
    fn test_no_session_no_identity_denies_unauthenticated() {
        let ctrl = controller();
        assert_eq!(
            resolve_access(UserRole::Admin, &ctrl, None, &RoleState::NotFetched),
            AccessDecision::Denied(DenialReason::Unauthenticated)
        );
    }

    #[test]
    fn test_identity_with_unfetched_role_is_pending() {
        let ctrl = controller();
        let p = principal();
        assert_eq!(
            resolve_access(UserRole::Admin, &ctrl, Some(&p), &RoleState::NotFetched),
            AccessDecision::Pending
        );
        assert_eq!(
            resolve_access(UserRole::Admin, &ctrl, Some(&p), &RoleState::Fetching),
            AccessDecision::Pending
        );
    }

    #[test]
    fn test_fetched_role_grants_or_denies() {
        let ctrl = controller();
        let p = principal();

        assert_eq!(
            resolve_access(
                UserRole::Admin,
                &ctrl,
                Some(&p),
                &RoleState::Fetched(UserRole::Admin)
            ),
            AccessDecision::Granted(GrantSource::RemoteRole)
        );
        assert_eq!(
            resolve_access(
                UserRole::Admin,
                &ctrl,
                Some(&p),
                &RoleState::Fetched(UserRole::Guest)
            ),
            AccessDecision::Denied(DenialReason::InsufficientRole(UserRole::Guest))
        );
    }

    #[test]
    fn test_failed_fetch_is_distinguishable_denial() {
        let ctrl = controller();
        let p = principal();

        let decision = resolve_access(
            UserRole::Admin,
            &ctrl,
            Some(&p),
            &RoleState::Failed("unauthorized".to_owned()),
        );
        assert_eq!(
            decision,
            AccessDecision::Denied(DenialReason::VerificationFailed)
        );
        // The user-facing message asks for re-authentication rather than
        // stating insufficient permissions.
        if let AccessDecision::Denied(reason) = decision {
            assert!(reason.to_string().contains("log in again"));
        }
    }

    #[test]
    fn test_pin_session_does_not_satisfy_non_admin_requirement() {
        let ctrl = controller();
        ctrl.login(Email::parse("owner@example.com").unwrap());

        // The PIN short-circuit applies to admin areas only; a
        // user-level requirement still goes through the remote check.
        assert_eq!(
            resolve_access(UserRole::User, &ctrl, None, &RoleState::NotFetched),
            AccessDecision::Denied(DenialReason::Unauthenticated)
        );
    }

    #[test]
    fn test_decision_is_recomputed_after_logout() {
        let ctrl = controller();
        ctrl.login(Email::parse("owner@example.com").unwrap());
        assert!(resolve_access(UserRole::Admin, &ctrl, None, &RoleState::NotFetched).is_granted());

        ctrl.logout();
        assert_eq!(
            resolve_access(UserRole::Admin, &ctrl, None, &RoleState::NotFetched),
            AccessDecision::Denied(DenialReason::Unauthenticated)
        );
    }
}
