// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{SkillTag, UserProfile, ScoredMatch, Skill, ScoringWeights};
pub use requests::{AddNeededSkillRequest, AddOfferedSkillRequest, BrowseUsersQuery, SkillsQuery, UpdateProfileRequest};
pub use responses::{
    MatchesResponse, UserResponse, UsersResponse, ProfileUpdatedResponse, OfferedSkillResponse,
    NeededSkillResponse, SkillsResponse, CategoriesResponse, HealthResponse, ErrorResponse,
};
