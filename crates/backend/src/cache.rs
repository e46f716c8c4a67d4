//! Cache types for remote service responses.
//!
//! Only list reads are cached; per-entity reads and anything feeding an
//! authorization decision always hit the service.

use crate::models::{Case, Investigation, TeamMember, Testimonial};

/// Cache key for list endpoints.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum CacheKey {
    AllCases,
    Investigations,
    Testimonials,
    TeamMembers,
}

/// Cached value types.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Cases(Vec<Case>),
    Investigations(Vec<Investigation>),
    Testimonials(Vec<Testimonial>),
    TeamMembers(Vec<TeamMember>),
}
