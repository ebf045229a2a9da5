use actix_web::{web, HttpResponse, Responder};
use crate::models::{CategoriesResponse, ErrorResponse, Skill, SkillsQuery, SkillsResponse};
use crate::routes::matches::AppState;
use crate::services::{postgres::category_filter, CacheKey};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/skills", web::get().to(list_skills))
        .route("/skills/categories", web::get().to(list_categories));
}

/// Skill catalog
///
/// GET /api/skills?category={category}
///
/// Served from cache when possible; cache failures fall through to the
/// database.
async fn list_skills(
    state: web::Data<AppState>,
    query: web::Query<SkillsQuery>,
) -> impl Responder {
    let category = category_filter(query.category.as_deref());
    let key = CacheKey::skills(category);

    if let Ok(skills) = state.cache.get::<Vec<Skill>>(&key).await {
        return HttpResponse::Ok().json(SkillsResponse { skills });
    }

    match state.postgres.list_skills(category).await {
        Ok(skills) => {
            if let Err(e) = state.cache.set(&key, &skills).await {
                tracing::warn!("Failed to cache {}: {}", key, e);
            }
            HttpResponse::Ok().json(SkillsResponse { skills })
        }
        Err(e) => {
            tracing::error!("Failed to list skills: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse::new(
                500,
                "Failed to fetch skills",
                e.to_string(),
            ))
        }
    }
}

/// Skill categories, "Toutes" first
///
/// GET /api/skills/categories
async fn list_categories(state: web::Data<AppState>) -> impl Responder {
    let key = CacheKey::categories();

    if let Ok(categories) = state.cache.get::<Vec<String>>(&key).await {
        return HttpResponse::Ok().json(CategoriesResponse { categories });
    }

    match state.postgres.list_categories().await {
        Ok(categories) => {
            if let Err(e) = state.cache.set(&key, &categories).await {
                tracing::warn!("Failed to cache {}: {}", key, e);
            }
            HttpResponse::Ok().json(CategoriesResponse { categories })
        }
        Err(e) => {
            tracing::error!("Failed to list categories: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse::new(
                500,
                "Failed to fetch categories",
                e.to_string(),
            ))
        }
    }
}
