//! Case submission, lookup, and admin CRUD.

use serde::Serialize;
use tracing::{debug, instrument};

use opi_core::{CaseId, Email};

use crate::cache::{CacheKey, CacheValue};
use crate::client::BackendClient;
use crate::models::{AdminCaseResult, Case, CaseLookupResult, CaseStatusChange, NewCase};
use crate::BackendError;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CaseIdArgs<'a> {
    case_id: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ResolveArgs<'a> {
    case_id: &'a str,
    admin_email: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UserCasesArgs<'a> {
    email: &'a str,
}

impl BackendClient {
    /// Submit a new case; returns the service-assigned ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    #[instrument(skip(self, case), fields(location = %case.location))]
    pub async fn submit_case(&self, case: &NewCase) -> Result<CaseId, BackendError> {
        let id: CaseId = self.call("submitCase", case).await?;
        self.invalidate(&[CacheKey::AllCases]).await;
        Ok(id)
    }

    /// All cases, for the admin dashboard. Cached.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    #[instrument(skip(self))]
    pub async fn get_all_cases(&self) -> Result<Vec<Case>, BackendError> {
        if let Some(CacheValue::Cases(cases)) = self.cache().get(&CacheKey::AllCases).await {
            debug!("cache hit for all cases");
            return Ok(cases);
        }

        let cases: Vec<Case> = self.call("getAllCases", &serde_json::json!({})).await?;

        self.cache()
            .insert(CacheKey::AllCases, CacheValue::Cases(cases.clone()))
            .await;

        Ok(cases)
    }

    /// A single case by ID, or `None` if the service has no such case.
    /// Never cached - detail views must be fresh.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    #[instrument(skip(self), fields(case_id = %case_id))]
    pub async fn get_case_by_id(&self, case_id: &CaseId) -> Result<Option<Case>, BackendError> {
        self.call(
            "getCaseById",
            &CaseIdArgs {
                case_id: case_id.as_str(),
            },
        )
        .await
    }

    /// Mark a case resolved, recording which admin did it.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails. A service-side refusal comes
    /// back as `Ok` with `success == false` and a message.
    #[instrument(skip(self), fields(case_id = %case_id, admin = %admin_email))]
    pub async fn mark_case_resolved(
        &self,
        case_id: &CaseId,
        admin_email: &Email,
    ) -> Result<AdminCaseResult, BackendError> {
        let result: AdminCaseResult = self
            .call(
                "markCaseResolved",
                &ResolveArgs {
                    case_id: case_id.as_str(),
                    admin_email: admin_email.as_str(),
                },
            )
            .await?;

        self.invalidate(&[CacheKey::AllCases]).await;
        Ok(result)
    }

    /// Delete a case; returns whether the service removed anything.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    #[instrument(skip(self), fields(case_id = %case_id))]
    pub async fn delete_case(&self, case_id: &CaseId) -> Result<bool, BackendError> {
        let deleted: bool = self
            .call(
                "deleteCase",
                &CaseIdArgs {
                    case_id: case_id.as_str(),
                },
            )
            .await?;

        self.invalidate(&[CacheKey::AllCases]).await;
        Ok(deleted)
    }

    /// Case summaries for a submitter email ("my case" lookup).
    /// Never cached - submitters poll this for status updates.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    #[instrument(skip(self), fields(email = %email))]
    pub async fn get_cases_for_user(&self, email: &Email) -> Result<CaseLookupResult, BackendError> {
        self.call(
            "getCasesForUser",
            &UserCasesArgs {
                email: email.as_str(),
            },
        )
        .await
    }

    /// The status audit trail of a case.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    #[instrument(skip(self), fields(case_id = %case_id))]
    pub async fn get_case_status_changes(
        &self,
        case_id: &CaseId,
    ) -> Result<Vec<CaseStatusChange>, BackendError> {
        self.call(
            "getCaseStatusChanges",
            &CaseIdArgs {
                case_id: case_id.as_str(),
            },
        )
        .await
    }
}
