use crate::models::{AddNeededSkillRequest, AddOfferedSkillRequest, UpdateProfileRequest, UserProfile};
use crate::services::postgres::PostgresError;
use std::future::Future;

/// Read access to hydrated user profiles
///
/// Implemented by [`PostgresClient`](crate::services::PostgresClient); request
/// handling is generic over it so it can run against an in-memory store.
pub trait ProfileStore {
    /// A user with their available offered skills and their needed skills
    fn user_with_skills(
        &self,
        user_id: i64,
    ) -> impl Future<Output = Result<Option<UserProfile>, PostgresError>> + Send;

    /// Every verified user except `user_id`, hydrated, ordered by id
    fn match_candidates(
        &self,
        user_id: i64,
    ) -> impl Future<Output = Result<Vec<UserProfile>, PostgresError>> + Send;
}

/// Writes a user makes to their own profile and skill links
pub trait ProfileEditor {
    /// Overwrite the editable profile fields and return the hydrated result
    ///
    /// `None` when the user does not exist.
    fn update_profile(
        &self,
        user_id: i64,
        update: &UpdateProfileRequest,
    ) -> impl Future<Output = Result<Option<UserProfile>, PostgresError>> + Send;

    /// Add an offered skill, or replace the existing link to the same skill
    ///
    /// Returns the link id, or `None` when the skill is not in the catalog.
    fn upsert_offered_skill(
        &self,
        user_id: i64,
        skill: &AddOfferedSkillRequest,
    ) -> impl Future<Output = Result<Option<i64>, PostgresError>> + Send;

    /// Add a needed skill, or replace the existing need for the same skill
    ///
    /// Returns the link id, or `None` when the skill is not in the catalog.
    fn upsert_needed_skill(
        &self,
        user_id: i64,
        need: &AddNeededSkillRequest,
    ) -> impl Future<Output = Result<Option<i64>, PostgresError>> + Send;
}
