//! Caller user profiles (remote-identity users only).

use tracing::instrument;

use crate::client::BackendClient;
use crate::models::UserProfile;
use crate::BackendError;

impl BackendClient {
    /// Profile stored for the current caller, if they saved one.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    #[instrument(skip(self))]
    pub async fn get_caller_user_profile(&self) -> Result<Option<UserProfile>, BackendError> {
        self.call("getCallerUserProfile", &serde_json::json!({}))
            .await
    }

    /// Save (or replace) the current caller's profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    #[instrument(skip(self, profile), fields(email = %profile.email))]
    pub async fn save_caller_user_profile(&self, profile: &UserProfile) -> Result<(), BackendError> {
        self.call_unit("saveCallerUserProfile", profile).await
    }
}
