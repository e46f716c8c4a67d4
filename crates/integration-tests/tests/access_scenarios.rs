//! End-to-end authorization walks through the guard.

use opi_access::{
    AccessController, AccessDecision, DenialReason, FileScope, GrantSource, MemoryScope,
    RoleState, RoleTracker, SessionScope, SessionStore, resolve_access,
};
use opi_core::{Email, Principal, UserRole};
use opi_integration_tests::{StubRoleSource, memory_controller, temp_session_path};

fn email(s: &str) -> Email {
    Email::parse(s).expect("valid test email")
}

fn principal() -> Principal {
    Principal::parse("w7x7r-cok77-xa").expect("valid principal")
}

// =============================================================================
// Scenario A: PIN login grants admin access
// =============================================================================

#[test]
fn test_scenario_a_pin_login_grants() {
    let controller = memory_controller();
    controller.login(email("owner@example.com"));

    assert_eq!(
        resolve_access(UserRole::Admin, &controller, None, &RoleState::NotFetched),
        AccessDecision::Granted(GrantSource::PinSession)
    );
}

// =============================================================================
// Scenario B: nothing at all denies as unauthenticated
// =============================================================================

#[test]
fn test_scenario_b_no_session_no_identity() {
    let controller = memory_controller();

    assert_eq!(
        resolve_access(UserRole::Admin, &controller, None, &RoleState::NotFetched),
        AccessDecision::Denied(DenialReason::Unauthenticated)
    );
}

// =============================================================================
// Scenario C: remote identity path - pending, then guest, then admin
// =============================================================================

#[tokio::test]
async fn test_scenario_c_identity_role_progression() {
    let controller = memory_controller();
    let identity = principal();
    let tracker = RoleTracker::new();

    // Role fetch not yet resolved: the guard reports Pending.
    assert_eq!(
        resolve_access(
            UserRole::Admin,
            &controller,
            Some(&identity),
            &tracker.state()
        ),
        AccessDecision::Pending
    );

    // Fetch resolves to guest: insufficient role, not unauthenticated.
    tracker
        .refresh(&StubRoleSource(Ok(UserRole::Guest)))
        .await;
    assert_eq!(
        resolve_access(
            UserRole::Admin,
            &controller,
            Some(&identity),
            &tracker.state()
        ),
        AccessDecision::Denied(DenialReason::InsufficientRole(UserRole::Guest))
    );

    // Fetch resolves to admin: granted via the remote role.
    tracker
        .refresh(&StubRoleSource(Ok(UserRole::Admin)))
        .await;
    assert_eq!(
        resolve_access(
            UserRole::Admin,
            &controller,
            Some(&identity),
            &tracker.state()
        ),
        AccessDecision::Granted(GrantSource::RemoteRole)
    );
}

#[tokio::test]
async fn test_scenario_c_failed_fetch_is_could_not_verify() {
    let controller = memory_controller();
    let identity = principal();
    let tracker = RoleTracker::new();

    tracker
        .refresh(&StubRoleSource(Err("unauthorized".to_owned())))
        .await;

    assert_eq!(
        resolve_access(
            UserRole::Admin,
            &controller,
            Some(&identity),
            &tracker.state()
        ),
        AccessDecision::Denied(DenialReason::VerificationFailed)
    );
}

// =============================================================================
// Scenario D: login then logout returns to unauthenticated
// =============================================================================

#[test]
fn test_scenario_d_login_logout_round_trip() {
    let controller = memory_controller();

    controller.login(email("owner@example.com"));
    assert!(
        resolve_access(UserRole::Admin, &controller, None, &RoleState::NotFetched).is_granted()
    );

    controller.logout();
    assert_eq!(
        resolve_access(UserRole::Admin, &controller, None, &RoleState::NotFetched),
        AccessDecision::Denied(DenialReason::Unauthenticated)
    );
}

// =============================================================================
// Scenario E: corrupt durable record reads as no session
// =============================================================================

#[test]
fn test_scenario_e_corrupt_durable_record() {
    let path = temp_session_path();

    // Garbage written directly into the durable scope, as an interrupted
    // write or hand-edited file would leave behind.
    let durable = FileScope::new(path);
    durable
        .write_raw("{not valid json")
        .expect("raw write succeeds");

    let controller = AccessController::new(SessionStore::new(
        Box::new(MemoryScope::new()),
        Box::new(durable),
    ));

    assert!(!controller.is_admin_session());
    assert!(controller.admin_email().is_none());
}
