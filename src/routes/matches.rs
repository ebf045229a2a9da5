use actix_web::{web, HttpResponse, Responder};
use crate::models::{ErrorResponse, HealthResponse, MatchesResponse, ScoredMatch};
use crate::services::{AuthenticatedUser, CacheManager, PostgresClient, PostgresError, ProfileStore};
use crate::core::Matcher;
use std::sync::Arc;
use thiserror::Error;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<CacheManager>,
    pub postgres: Arc<PostgresClient>,
    pub matcher: Matcher,
}

/// Failures of the match endpoint outside the engine itself
#[derive(Debug, Error)]
pub enum MatchesError {
    #[error("User {0} not found")]
    ProfileNotFound(i64),

    #[error("Storage error: {0}")]
    Storage(#[from] PostgresError),
}

impl MatchesError {
    fn to_response(&self) -> HttpResponse {
        match self {
            MatchesError::ProfileNotFound(_) => HttpResponse::NotFound().json(ErrorResponse::new(
                404,
                "User not found",
                self.to_string(),
            )),
            MatchesError::Storage(_) => HttpResponse::InternalServerError().json(ErrorResponse::new(
                500,
                "Failed to compute matches",
                self.to_string(),
            )),
        }
    }
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/matches", web::get().to(find_matches));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let pg_healthy = state.postgres.health_check().await.unwrap_or(false);

    let status = if pg_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Load the caller and the verified pool, then rank the pool
pub async fn collect_matches<S: ProfileStore>(
    store: &S,
    matcher: &Matcher,
    user: &AuthenticatedUser,
) -> Result<Vec<ScoredMatch>, MatchesError> {
    let requester = store
        .user_with_skills(user.id)
        .await?
        .ok_or(MatchesError::ProfileNotFound(user.id))?;

    let candidates = store.match_candidates(user.id).await?;

    tracing::debug!("Found {} candidates for user {}", candidates.len(), user.id);

    Ok(matcher.compute_matches(&requester, &candidates))
}

/// Find matches endpoint
///
/// GET /api/matches
///
/// Response body:
/// ```json
/// {
///   "matches": [
///     { "user": { "id": 2, "name": "string", ... }, "score": 8.45, "interests": ["string"] }
///   ]
/// }
/// ```
async fn find_matches(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> impl Responder {
    tracing::info!("Finding matches for user: {}", user.id);

    match collect_matches(state.postgres.as_ref(), &state.matcher, &user).await {
        Ok(matches) => {
            tracing::info!("Returning {} matches for user {}", matches.len(), user.id);
            HttpResponse::Ok().json(MatchesResponse { matches })
        }
        Err(e) => {
            match &e {
                MatchesError::ProfileNotFound(_) => tracing::info!("{}", e),
                MatchesError::Storage(_) => tracing::error!("Failed to compute matches for {}: {}", user.id, e),
            }
            e.to_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SkillTag, UserProfile};
    use std::collections::HashMap;

    /// In-memory store; `failing` simulates an unreachable database
    struct MemoryStore {
        users: HashMap<i64, UserProfile>,
        failing: bool,
    }

    impl MemoryStore {
        fn new(users: Vec<UserProfile>) -> Self {
            Self {
                users: users.into_iter().map(|u| (u.id, u)).collect(),
                failing: false,
            }
        }
    }

    impl ProfileStore for MemoryStore {
        async fn user_with_skills(&self, user_id: i64) -> Result<Option<UserProfile>, PostgresError> {
            if self.failing {
                return Err(sqlx::Error::PoolTimedOut.into());
            }
            Ok(self.users.get(&user_id).cloned())
        }

        async fn match_candidates(&self, user_id: i64) -> Result<Vec<UserProfile>, PostgresError> {
            if self.failing {
                return Err(sqlx::Error::PoolTimedOut.into());
            }
            let mut pool: Vec<UserProfile> = self
                .users
                .values()
                .filter(|u| u.verified && u.id != user_id)
                .cloned()
                .collect();
            pool.sort_by_key(|u| u.id);
            Ok(pool)
        }
    }

    fn create_user(id: i64, offered: &[&str], needed: &[&str], rating: f64) -> UserProfile {
        UserProfile {
            id,
            name: format!("User {}", id),
            avatar: "👤".to_string(),
            location: Some("Paris, France".to_string()),
            bio: None,
            rating,
            credits: 5,
            verified: true,
            availability: "Flexible".to_string(),
            skills_offered: offered.iter().map(|s| SkillTag::offered(*s, "Divers", "Intermédiaire")).collect(),
            skills_needed: needed.iter().map(|s| SkillTag::needed(*s, "Divers")).collect(),
            created_at: None,
        }
    }

    fn caller(id: i64) -> AuthenticatedUser {
        AuthenticatedUser {
            id,
            email: format!("user{}@skillswap.test", id),
        }
    }

    #[tokio::test]
    async fn test_collect_matches_ranks_pool() {
        let store = MemoryStore::new(vec![
            create_user(1, &["Python"], &["Piano"], 4.0),
            create_user(2, &["Piano"], &["Python"], 3.0),
            create_user(3, &[], &[], 4.0),
        ]);

        let matches = collect_matches(&store, &Matcher::default(), &caller(1)).await.unwrap();

        let ids: Vec<i64> = matches.iter().map(|m| m.candidate.id).collect();
        assert_eq!(ids, vec![2, 3]);
        assert_eq!(matches[0].reasons.len(), 2);
        // 3 + 3 + 1 (France) + 1.5
        assert!((matches[0].score - 8.5).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_collect_matches_unknown_caller() {
        let store = MemoryStore::new(vec![create_user(2, &[], &[], 4.0)]);

        let result = collect_matches(&store, &Matcher::default(), &caller(99)).await;

        assert!(matches!(result, Err(MatchesError::ProfileNotFound(99))));
    }

    #[tokio::test]
    async fn test_collect_matches_storage_failure() {
        let mut store = MemoryStore::new(vec![create_user(1, &[], &[], 4.0)]);
        store.failing = true;

        let err = collect_matches(&store, &Matcher::default(), &caller(1)).await.unwrap_err();

        assert!(matches!(err, MatchesError::Storage(_)));
        assert_eq!(err.to_response().status(), actix_web::http::StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let response = MatchesError::ProfileNotFound(5).to_response();
        assert_eq!(response.status(), actix_web::http::StatusCode::NOT_FOUND);
    }
}
