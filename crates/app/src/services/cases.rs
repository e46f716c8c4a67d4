//! Public-site operations: case submission, "my case" lookup, and the
//! published content collections. No access gating here.

use tracing::instrument;

use opi_backend::models::{CaseLookupResult, Investigation, NewCase, TeamMember, Testimonial};
use opi_core::{CaseId, Email};

use crate::services::ServiceError;
use crate::state::AppState;

/// Public-facing service backing the marketing site pages.
#[derive(Debug, Clone)]
pub struct CaseService {
    state: AppState,
}

impl CaseService {
    /// Create the service over the shared application state.
    #[must_use]
    pub const fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Submit a new case; returns the assigned case ID for the
    /// confirmation page.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    #[instrument(skip(self, case), fields(location = %case.location))]
    pub async fn submit_case(&self, case: &NewCase) -> Result<CaseId, ServiceError> {
        Ok(self.state.backend().submit_case(case).await?)
    }

    /// Look up the caller's cases by the email they submitted with.
    ///
    /// # Errors
    ///
    /// Returns an error for a malformed email or a failed call.
    pub async fn my_cases(&self, email: &str) -> Result<CaseLookupResult, ServiceError> {
        let email = Email::parse(email)?;
        Ok(self.state.backend().get_cases_for_user(&email).await?)
    }

    /// Published investigations for the case gallery.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn investigations(&self) -> Result<Vec<Investigation>, ServiceError> {
        Ok(self.state.backend().get_all_investigations().await?)
    }

    /// Published testimonials for the home page.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn testimonials(&self) -> Result<Vec<Testimonial>, ServiceError> {
        Ok(self.state.backend().get_all_testimonials().await?)
    }

    /// Team member profiles for the team page.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn team_members(&self) -> Result<Vec<TeamMember>, ServiceError> {
        Ok(self.state.backend().get_all_team_members().await?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use opi_access::{AccessController, MemoryScope, SessionStore};
    use opi_backend::{BackendClient, BackendConfig};

    use crate::config::AppConfig;

    use super::*;

    fn service() -> CaseService {
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
        CaseService::new(AppState::with_parts(config, backend, access))
    }

    #[tokio::test]
    async fn test_my_cases_rejects_malformed_email() {
        let err = service().my_cases("not-an-email").await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidEmail(_)));
    }
}
