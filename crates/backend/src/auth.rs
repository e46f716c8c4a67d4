//! Credential verification, caller role lookup, and the admin claim.

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tracing::instrument;

use opi_access::RoleSource;
use opi_core::{Email, UserRole};

use crate::client::BackendClient;
use crate::BackendError;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CredentialArgs<'a> {
    email: &'a str,
    pin: &'a str,
}

impl BackendClient {
    /// Verify an email + PIN pair against the service.
    ///
    /// Returns `Ok(false)` for a rejected pair. The PIN is only ever
    /// read out of its [`SecretString`] at the serialization boundary.
    ///
    /// # Errors
    ///
    /// Returns an error if the call itself fails; callers deciding
    /// access must treat that the same as a rejection (fail closed).
    #[instrument(skip(self, pin), fields(email = %email))]
    pub async fn verify_admin_credentials(
        &self,
        email: &Email,
        pin: &SecretString,
    ) -> Result<bool, BackendError> {
        self.call(
            "verifyAdminCredentials",
            &CredentialArgs {
                email: email.as_str(),
                pin: pin.expose_secret(),
            },
        )
        .await
    }

    /// Role the service holds for the current caller principal.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails; a caller with no recorded
    /// role gets an explicit `guest` answer, not an error.
    #[instrument(skip(self))]
    pub async fn get_caller_user_role(&self) -> Result<UserRole, BackendError> {
        self.call("getCallerUserRole", &serde_json::json!({})).await
    }

    /// Claim the admin slot if nobody has yet. Idempotent on the
    /// service side; returns whether the caller is the admin now.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    #[instrument(skip(self))]
    pub async fn init_admin(&self) -> Result<bool, BackendError> {
        self.call("initAdmin", &serde_json::json!({})).await
    }

    /// Whether the service considers the current caller an admin.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    #[instrument(skip(self))]
    pub async fn is_caller_admin(&self) -> Result<bool, BackendError> {
        self.call("isCallerAdmin", &serde_json::json!({})).await
    }
}

/// The backend is the role authority the access guard reconciles with.
impl RoleSource for BackendClient {
    type Error = BackendError;

    async fn caller_role(&self) -> Result<UserRole, BackendError> {
        self.get_caller_user_role().await
    }
}
