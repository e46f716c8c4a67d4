//! Admin flows: PIN login, the admin claim, and gated management
//! operations.
//!
//! Every management operation re-runs the access guard before touching
//! the backend. The guard is a pure function of current state, so this
//! is cheap and never stale.

use std::sync::Arc;

use secrecy::SecretString;
use tokio::sync::OnceCell;
use tracing::{info, instrument, warn};

use opi_access::{AccessDecision, RefreshHandle, resolve_access};
use opi_backend::models::{
    AdminCaseResult, Case, CaseStatusChange, Investigation, TeamMember, Testimonial,
};
use opi_backend::BackendClient;
use opi_core::{
    CaseId, Email, InvestigationId, Principal, TeamMemberId, TestimonialId, UserRole,
};

use crate::services::ServiceError;
use crate::state::AppState;

/// Admin-facing service: authentication plus role-gated management.
///
/// Construct one per caller session. The identity, if any, is fixed at
/// construction - a new remote login means a new service, which also
/// resets the once-per-session admin claim.
pub struct AdminService {
    state: AppState,
    backend: BackendClient,
    identity: Option<Principal>,
    admin_claimed: OnceCell<bool>,
}

impl AdminService {
    /// Create a service for the given caller identity (or none).
    #[must_use]
    pub fn new(state: AppState, identity: Option<Principal>) -> Self {
        let backend = identity.as_ref().map_or_else(
            || state.backend().clone(),
            |principal| state.backend().with_principal(principal.clone()),
        );

        Self {
            state,
            backend,
            identity,
            admin_claimed: OnceCell::new(),
        }
    }

    // =========================================================================
    // Authentication
    // =========================================================================

    /// Verify an email + PIN pair remotely and, on success, establish
    /// the local PIN session.
    ///
    /// The session record is written to storage before the in-memory
    /// flag flips (inside the controller), so a guard evaluated by the
    /// very next navigation already sees it.
    ///
    /// # Errors
    ///
    /// - [`ServiceError::InvalidEmail`] for a malformed email
    /// - [`ServiceError::InvalidCredentials`] when the service rejects
    ///   the pair
    /// - [`ServiceError::Backend`] when the verification call itself
    ///   fails - no session is written in any error case
    #[instrument(skip(self, pin), fields(email = %email))]
    pub async fn login_with_pin(&self, email: &str, pin: SecretString) -> Result<(), ServiceError> {
        let email = Email::parse(email)?;

        let verified = self.backend.verify_admin_credentials(&email, &pin).await?;
        if !verified {
            warn!("admin credential verification rejected");
            return Err(ServiceError::InvalidCredentials);
        }

        self.state.access().login(email);
        Ok(())
    }

    /// Clear the PIN session and forget the fetched role.
    pub fn logout(&self) {
        self.state.access().logout();
        self.state.roles().reset();
    }

    // =========================================================================
    // Authorization
    // =========================================================================

    /// Run the composite access check for admin-only areas.
    #[must_use]
    pub fn resolve_admin_access(&self) -> AccessDecision {
        resolve_access(
            UserRole::Admin,
            self.state.access(),
            self.identity.as_ref(),
            &self.state.roles().state(),
        )
    }

    /// Fetch the remote role now and record the outcome.
    pub async fn refresh_role(&self) {
        self.state.roles().refresh(&self.backend).await;
    }

    /// Fetch the remote role on a background task.
    ///
    /// Drop the handle to cancel (e.g. the caller navigated away).
    #[must_use]
    pub fn spawn_role_refresh(&self) -> RefreshHandle {
        self.state
            .roles()
            .spawn_refresh(Arc::new(self.backend.clone()))
    }

    /// Claim the admin slot for this identity if nobody holds it yet.
    ///
    /// Runs at most once per service (= per identity session); later
    /// calls return the recorded answer. Without an identity there is
    /// nothing to claim.
    ///
    /// # Errors
    ///
    /// Returns an error if the claim call fails; the claim stays
    /// unrecorded so a later call retries.
    pub async fn ensure_admin_claimed(&self) -> Result<bool, ServiceError> {
        if self.identity.is_none() {
            return Ok(false);
        }

        let claimed = self
            .admin_claimed
            .get_or_try_init(|| async {
                let claimed = self.backend.init_admin().await?;
                info!(claimed, "admin claim checked");
                Ok::<bool, ServiceError>(claimed)
            })
            .await?;

        Ok(*claimed)
    }

    fn require_admin(&self) -> Result<(), ServiceError> {
        match self.resolve_admin_access() {
            AccessDecision::Granted(_) => Ok(()),
            AccessDecision::Pending => Err(ServiceError::AccessPending),
            AccessDecision::Denied(reason) => Err(ServiceError::AccessDenied(reason)),
        }
    }

    /// Email to attribute admin actions to: the PIN session's email, or
    /// the identity's saved profile email.
    async fn acting_admin_email(&self) -> Result<Email, ServiceError> {
        if let Some(email) = self.state.access().admin_email() {
            return Ok(email);
        }

        let profile = self.backend.get_caller_user_profile().await?;
        profile
            .map(|p| p.email)
            .ok_or(ServiceError::MissingAdminEmail)
    }

    // =========================================================================
    // Case management (admin dashboard)
    // =========================================================================

    /// All cases for the dashboard.
    ///
    /// # Errors
    ///
    /// Returns an error if access is not granted or the call fails.
    pub async fn list_cases(&self) -> Result<Vec<Case>, ServiceError> {
        self.require_admin()?;
        Ok(self.backend.get_all_cases().await?)
    }

    /// A single case with its status history.
    ///
    /// # Errors
    ///
    /// Returns an error if access is not granted, the case does not
    /// exist, or a call fails.
    pub async fn case_detail(
        &self,
        case_id: &CaseId,
    ) -> Result<(Case, Vec<CaseStatusChange>), ServiceError> {
        self.require_admin()?;

        let case = self
            .backend
            .get_case_by_id(case_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("case {case_id}")))?;
        let history = self.backend.get_case_status_changes(case_id).await?;

        Ok((case, history))
    }

    /// Mark a case resolved, attributed to the acting admin.
    ///
    /// # Errors
    ///
    /// Returns an error if access is not granted, no acting email can
    /// be determined, or the call fails.
    pub async fn resolve_case(&self, case_id: &CaseId) -> Result<AdminCaseResult, ServiceError> {
        self.require_admin()?;
        let admin_email = self.acting_admin_email().await?;
        Ok(self
            .backend
            .mark_case_resolved(case_id, &admin_email)
            .await?)
    }

    /// Delete a case outright.
    ///
    /// # Errors
    ///
    /// Returns an error if access is not granted or the call fails.
    pub async fn delete_case(&self, case_id: &CaseId) -> Result<bool, ServiceError> {
        self.require_admin()?;
        Ok(self.backend.delete_case(case_id).await?)
    }

    // =========================================================================
    // Content management (admin managers)
    // =========================================================================

    /// Create or replace an investigation entry.
    ///
    /// # Errors
    ///
    /// Returns an error if access is not granted or the call fails.
    pub async fn upsert_investigation(
        &self,
        id: &InvestigationId,
        investigation: &Investigation,
        create: bool,
    ) -> Result<(), ServiceError> {
        self.require_admin()?;
        if create {
            self.backend.create_investigation(id, investigation).await?;
        } else {
            self.backend.update_investigation(id, investigation).await?;
        }
        Ok(())
    }

    /// Delete an investigation entry.
    ///
    /// # Errors
    ///
    /// Returns an error if access is not granted or the call fails.
    pub async fn delete_investigation(&self, id: &InvestigationId) -> Result<(), ServiceError> {
        self.require_admin()?;
        Ok(self.backend.delete_investigation(id).await?)
    }

    /// Create or replace a testimonial.
    ///
    /// # Errors
    ///
    /// Returns an error if access is not granted or the call fails.
    pub async fn upsert_testimonial(
        &self,
        id: &TestimonialId,
        testimonial: &Testimonial,
        create: bool,
    ) -> Result<(), ServiceError> {
        self.require_admin()?;
        if create {
            self.backend.create_testimonial(id, testimonial).await?;
        } else {
            self.backend.update_testimonial(id, testimonial).await?;
        }
        Ok(())
    }

    /// Delete a testimonial.
    ///
    /// # Errors
    ///
    /// Returns an error if access is not granted or the call fails.
    pub async fn delete_testimonial(&self, id: &TestimonialId) -> Result<(), ServiceError> {
        self.require_admin()?;
        Ok(self.backend.delete_testimonial(id).await?)
    }

    /// Create or replace a team member profile.
    ///
    /// # Errors
    ///
    /// Returns an error if access is not granted or the call fails.
    pub async fn upsert_team_member(
        &self,
        id: &TeamMemberId,
        member: &TeamMember,
        create: bool,
    ) -> Result<(), ServiceError> {
        self.require_admin()?;
        if create {
            self.backend.create_team_member(id, member).await?;
        } else {
            self.backend.update_team_member(id, member).await?;
        }
        Ok(())
    }

    /// Delete a team member profile.
    ///
    /// # Errors
    ///
    /// Returns an error if access is not granted or the call fails.
    pub async fn delete_team_member(&self, id: &TeamMemberId) -> Result<(), ServiceError> {
        self.require_admin()?;
        Ok(self.backend.delete_team_member(id).await?)
    }
}

impl std::fmt::Debug for AdminService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminService")
            .field("identity", &self.identity)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use opi_access::{AccessController, DenialReason, MemoryScope, SessionStore};
    use opi_backend::{BackendClient, BackendConfig};

    use crate::config::AppConfig;

    use super::*;

    fn app_state() -> AppState {
        let config = AppConfig {
            backend_url: url::Url::parse("http://127.0.0.1:9/").unwrap(),
            api_version: "v1".to_owned(),
            data_dir: std::env::temp_dir().join("opi-app-tests"),
        };
        let backend = BackendClient::new(&BackendConfig {
            base_url: config.backend_url.clone(),
            api_version: config.api_version.clone(),
        });
        let access = AccessController::new(SessionStore::new(
            Box::new(MemoryScope::new()),
            Box::new(MemoryScope::new()),
        ));
        AppState::with_parts(config, backend, access)
    }

    #[tokio::test]
    async fn test_gated_op_denied_without_any_authority() {
        let service = AdminService::new(app_state(), None);

        let err = service.list_cases().await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::AccessDenied(DenialReason::Unauthenticated)
        ));
    }

    #[tokio::test]
    async fn test_gated_op_pending_while_role_unfetched() {
        let service = AdminService::new(
            app_state(),
            Some(Principal::parse("w7x7r-cok77-xa").unwrap()),
        );

        let err = service.list_cases().await.unwrap_err();
        assert!(matches!(err, ServiceError::AccessPending));
    }

    #[tokio::test]
    async fn test_pin_session_unlocks_guard_without_network() {
        let state = app_state();
        // Simulate a completed PIN verification: the controller records
        // the decision, exactly what login_with_pin does on success.
        state
            .access()
            .login(Email::parse("owner@example.com").unwrap());

        let service = AdminService::new(state, None);
        assert!(service.resolve_admin_access().is_granted());
    }

    #[tokio::test]
    async fn test_acting_email_prefers_pin_session() {
        let state = app_state();
        state
            .access()
            .login(Email::parse("owner@example.com").unwrap());

        let service = AdminService::new(state, None);
        // Resolves from the session without touching the (unreachable)
        // backend.
        let email = service.acting_admin_email().await.unwrap();
        assert_eq!(email.as_str(), "owner@example.com");
    }

    #[tokio::test]
    async fn test_logout_resets_session_and_role() {
        let state = app_state();
        state
            .access()
            .login(Email::parse("owner@example.com").unwrap());

        let service = AdminService::new(state.clone(), None);
        service.logout();

        assert!(!state.access().is_admin_session());
        assert!(matches!(
            service.resolve_admin_access(),
            AccessDecision::Denied(DenialReason::Unauthenticated)
        ));
    }

    #[tokio::test]
    async fn test_claim_without_identity_is_noop() {
        let service = AdminService::new(app_state(), None);
        assert!(!service.ensure_admin_claimed().await.unwrap());
    }
}
