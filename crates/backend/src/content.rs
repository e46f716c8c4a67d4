//! Public-site content collections managed from the admin screens:
//! investigations, testimonials, and team members.

use serde::Serialize;
use tracing::{debug, instrument};

use opi_core::{InvestigationId, TeamMemberId, TestimonialId};

use crate::cache::{CacheKey, CacheValue};
use crate::client::BackendClient;
use crate::models::{Investigation, TeamMember, Testimonial};
use crate::BackendError;

#[derive(Serialize)]
struct IdArgs<'a> {
    id: &'a str,
}

#[derive(Serialize)]
struct UpsertArgs<'a, T> {
    id: &'a str,
    #[serde(flatten)]
    item: &'a T,
}

impl BackendClient {
    // =========================================================================
    // Investigations
    // =========================================================================

    /// All investigation entries. Cached.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    #[instrument(skip(self))]
    pub async fn get_all_investigations(&self) -> Result<Vec<Investigation>, BackendError> {
        if let Some(CacheValue::Investigations(items)) =
            self.cache().get(&CacheKey::Investigations).await
        {
            debug!("cache hit for investigations");
            return Ok(items);
        }

        let items: Vec<Investigation> = self
            .call("getAllInvestigationCases", &serde_json::json!({}))
            .await?;

        self.cache()
            .insert(
                CacheKey::Investigations,
                CacheValue::Investigations(items.clone()),
            )
            .await;

        Ok(items)
    }

    /// Create an investigation entry under the given ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    #[instrument(skip(self, investigation), fields(id = %id))]
    pub async fn create_investigation(
        &self,
        id: &InvestigationId,
        investigation: &Investigation,
    ) -> Result<(), BackendError> {
        self.call_unit(
            "createInvestigation",
            &UpsertArgs {
                id: id.as_str(),
                item: investigation,
            },
        )
        .await?;
        self.invalidate(&[CacheKey::Investigations]).await;
        Ok(())
    }

    /// Replace an investigation entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    #[instrument(skip(self, investigation), fields(id = %id))]
    pub async fn update_investigation(
        &self,
        id: &InvestigationId,
        investigation: &Investigation,
    ) -> Result<(), BackendError> {
        self.call_unit(
            "updateInvestigation",
            &UpsertArgs {
                id: id.as_str(),
                item: investigation,
            },
        )
        .await?;
        self.invalidate(&[CacheKey::Investigations]).await;
        Ok(())
    }

    /// Delete an investigation entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn delete_investigation(&self, id: &InvestigationId) -> Result<(), BackendError> {
        self.call_unit("deleteInvestigation", &IdArgs { id: id.as_str() })
            .await?;
        self.invalidate(&[CacheKey::Investigations]).await;
        Ok(())
    }

    // =========================================================================
    // Testimonials
    // =========================================================================

    /// All testimonials. Cached.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    #[instrument(skip(self))]
    pub async fn get_all_testimonials(&self) -> Result<Vec<Testimonial>, BackendError> {
        if let Some(CacheValue::Testimonials(items)) =
            self.cache().get(&CacheKey::Testimonials).await
        {
            debug!("cache hit for testimonials");
            return Ok(items);
        }

        let items: Vec<Testimonial> = self
            .call("getAllTestimonials", &serde_json::json!({}))
            .await?;

        self.cache()
            .insert(
                CacheKey::Testimonials,
                CacheValue::Testimonials(items.clone()),
            )
            .await;

        Ok(items)
    }

    /// Create a testimonial under the given ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    #[instrument(skip(self, testimonial), fields(id = %id))]
    pub async fn create_testimonial(
        &self,
        id: &TestimonialId,
        testimonial: &Testimonial,
    ) -> Result<(), BackendError> {
        self.call_unit(
            "createTestimonial",
            &UpsertArgs {
                id: id.as_str(),
                item: testimonial,
            },
        )
        .await?;
        self.invalidate(&[CacheKey::Testimonials]).await;
        Ok(())
    }

    /// Replace a testimonial.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    #[instrument(skip(self, testimonial), fields(id = %id))]
    pub async fn update_testimonial(
        &self,
        id: &TestimonialId,
        testimonial: &Testimonial,
    ) -> Result<(), BackendError> {
        self.call_unit(
            "updateTestimonial",
            &UpsertArgs {
                id: id.as_str(),
                item: testimonial,
            },
        )
        .await?;
        self.invalidate(&[CacheKey::Testimonials]).await;
        Ok(())
    }

    /// Delete a testimonial.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn delete_testimonial(&self, id: &TestimonialId) -> Result<(), BackendError> {
        self.call_unit("deleteTestimonial", &IdArgs { id: id.as_str() })
            .await?;
        self.invalidate(&[CacheKey::Testimonials]).await;
        Ok(())
    }

    // =========================================================================
    // Team Members
    // =========================================================================

    /// All team member profiles. Cached.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    #[instrument(skip(self))]
    pub async fn get_all_team_members(&self) -> Result<Vec<TeamMember>, BackendError> {
        if let Some(CacheValue::TeamMembers(items)) =
            self.cache().get(&CacheKey::TeamMembers).await
        {
            debug!("cache hit for team members");
            return Ok(items);
        }

        let items: Vec<TeamMember> = self
            .call("getAllTeamMembers", &serde_json::json!({}))
            .await?;

        self.cache()
            .insert(
                CacheKey::TeamMembers,
                CacheValue::TeamMembers(items.clone()),
            )
            .await;

        Ok(items)
    }

    /// Create a team member profile under the given ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    #[instrument(skip(self, member), fields(id = %id))]
    pub async fn create_team_member(
        &self,
        id: &TeamMemberId,
        member: &TeamMember,
    ) -> Result<(), BackendError> {
        self.call_unit(
            "createTeamMember",
            &UpsertArgs {
                id: id.as_str(),
                item: member,
            },
        )
        .await?;
        self.invalidate(&[CacheKey::TeamMembers]).await;
        Ok(())
    }

    /// Replace a team member profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    #[instrument(skip(self, member), fields(id = %id))]
    pub async fn update_team_member(
        &self,
        id: &TeamMemberId,
        member: &TeamMember,
    ) -> Result<(), BackendError> {
        self.call_unit(
            "updateTeamMember",
            &UpsertArgs {
                id: id.as_str(),
                item: member,
            },
        )
        .await?;
        self.invalidate(&[CacheKey::TeamMembers]).await;
        Ok(())
    }

    /// Delete a team member profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn delete_team_member(&self, id: &TeamMemberId) -> Result<(), BackendError> {
        self.call_unit("deleteTeamMember", &IdArgs { id: id.as_str() })
            .await?;
        self.invalidate(&[CacheKey::TeamMembers]).await;
        Ok(())
    }
}
