use actix_web::{web, HttpResponse, Responder};
use thiserror::Error;
use validator::{Validate, ValidationErrors};
use crate::models::{
    AddNeededSkillRequest, AddOfferedSkillRequest, BrowseUsersQuery, ErrorResponse, NeededSkillResponse,
    OfferedSkillResponse, ProfileUpdatedResponse, UpdateProfileRequest, UserProfile, UserResponse,
    UsersResponse,
};
use crate::routes::matches::AppState;
use crate::services::{AuthenticatedUser, PostgresError, ProfileEditor, ProfileStore};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/users/me", web::get().to(get_me))
        .route("/users/me", web::put().to(update_me))
        .route("/users/skills", web::post().to(add_offered_skill))
        .route("/users/needs", web::post().to(add_needed_skill))
        .route("/users", web::get().to(browse_users));
}

/// Failures of the profile write endpoints
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("User {0} not found")]
    UserNotFound(i64),

    #[error("Skill {0} not found")]
    SkillNotFound(i64),

    #[error("Storage error: {0}")]
    Storage(#[from] PostgresError),
}

impl ProfileError {
    fn to_response(&self) -> HttpResponse {
        match self {
            ProfileError::Validation(_) => HttpResponse::BadRequest().json(ErrorResponse::new(
                400,
                "Validation failed",
                self.to_string(),
            )),
            ProfileError::UserNotFound(_) => HttpResponse::NotFound().json(ErrorResponse::new(
                404,
                "User not found",
                self.to_string(),
            )),
            ProfileError::SkillNotFound(_) => HttpResponse::NotFound().json(ErrorResponse::new(
                404,
                "Skill not found",
                self.to_string(),
            )),
            ProfileError::Storage(_) => HttpResponse::InternalServerError().json(ErrorResponse::new(
                500,
                "Failed to update profile",
                self.to_string(),
            )),
        }
    }

    fn log(&self, user_id: i64) {
        match self {
            ProfileError::Storage(_) => tracing::error!("Profile write failed for {}: {}", user_id, self),
            _ => tracing::info!("Rejected profile write for {}: {}", user_id, self),
        }
    }
}

/// Validate and apply the caller's profile update
pub async fn apply_profile_update<S: ProfileEditor>(
    store: &S,
    user: &AuthenticatedUser,
    update: &UpdateProfileRequest,
) -> Result<UserProfile, ProfileError> {
    update.validate()?;

    store
        .update_profile(user.id, update)
        .await?
        .ok_or(ProfileError::UserNotFound(user.id))
}

/// Validate and record a skill the caller offers
pub async fn record_offered_skill<S: ProfileEditor>(
    store: &S,
    user: &AuthenticatedUser,
    skill: &AddOfferedSkillRequest,
) -> Result<i64, ProfileError> {
    skill.validate()?;

    store
        .upsert_offered_skill(user.id, skill)
        .await?
        .ok_or(ProfileError::SkillNotFound(skill.skill_id))
}

/// Validate and record a skill the caller wants to learn
pub async fn record_needed_skill<S: ProfileEditor>(
    store: &S,
    user: &AuthenticatedUser,
    need: &AddNeededSkillRequest,
) -> Result<i64, ProfileError> {
    need.validate()?;

    store
        .upsert_needed_skill(user.id, need)
        .await?
        .ok_or(ProfileError::SkillNotFound(need.skill_id))
}

/// Caller's own profile
///
/// GET /api/users/me
async fn get_me(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> impl Responder {
    match state.postgres.user_with_skills(user.id).await {
        Ok(Some(profile)) => HttpResponse::Ok().json(UserResponse { user: profile }),
        Ok(None) => HttpResponse::NotFound().json(ErrorResponse::new(
            404,
            "User not found",
            format!("No profile for user {}", user.id),
        )),
        Err(e) => {
            tracing::error!("Failed to fetch profile for {}: {}", user.id, e);
            HttpResponse::InternalServerError().json(ErrorResponse::new(
                500,
                "Failed to fetch user profile",
                e.to_string(),
            ))
        }
    }
}

/// Update the caller's profile
///
/// PUT /api/users/me
async fn update_me(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    body: web::Json<UpdateProfileRequest>,
) -> impl Responder {
    match apply_profile_update(state.postgres.as_ref(), &user, &body).await {
        Ok(profile) => {
            tracing::info!("Updated profile of user {}", user.id);
            HttpResponse::Ok().json(ProfileUpdatedResponse {
                message: "Profile updated".to_string(),
                user: profile,
            })
        }
        Err(e) => {
            e.log(user.id);
            e.to_response()
        }
    }
}

/// Add or replace a skill the caller offers
///
/// POST /api/users/skills
async fn add_offered_skill(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    body: web::Json<AddOfferedSkillRequest>,
) -> impl Responder {
    match record_offered_skill(state.postgres.as_ref(), &user, &body).await {
        Ok(user_skill_id) => HttpResponse::Created().json(OfferedSkillResponse {
            message: "Skill added".to_string(),
            user_skill_id,
        }),
        Err(e) => {
            e.log(user.id);
            e.to_response()
        }
    }
}

/// Add or replace a skill the caller wants to learn
///
/// POST /api/users/needs
async fn add_needed_skill(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    body: web::Json<AddNeededSkillRequest>,
) -> impl Responder {
    match record_needed_skill(state.postgres.as_ref(), &user, &body).await {
        Ok(user_need_id) => HttpResponse::Created().json(NeededSkillResponse {
            message: "Need added".to_string(),
            user_need_id,
        }),
        Err(e) => {
            e.log(user.id);
            e.to_response()
        }
    }
}

/// Browse other users
///
/// GET /api/users?category={category}&search={text}&limit={1..100}
async fn browse_users(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    query: web::Query<BrowseUsersQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        tracing::info!("Validation failed for browse_users request: field_errors={:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse::new(
            400,
            "Validation failed",
            errors.to_string(),
        ));
    }

    let result = state
        .postgres
        .browse_users(
            user.id,
            query.category.as_deref(),
            query.search.as_deref(),
            i64::from(query.limit),
        )
        .await;

    match result {
        Ok(users) => HttpResponse::Ok().json(UsersResponse { users }),
        Err(e) => {
            tracing::error!("Failed to browse users for {}: {}", user.id, e);
            HttpResponse::InternalServerError().json(ErrorResponse::new(
                500,
                "Failed to fetch users",
                e.to_string(),
            ))
        }
    }
}
