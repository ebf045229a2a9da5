use crate::models::{
    AddNeededSkillRequest, AddOfferedSkillRequest, Skill, SkillTag, UpdateProfileRequest, UserProfile,
};
use crate::services::store::{ProfileEditor, ProfileStore};
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgConnection, PgPool};
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;

/// Pseudo-category meaning "no category filter"
pub const ALL_CATEGORIES: &str = "Toutes";

/// Errors that can occur when interacting with PostgreSQL
#[derive(Debug, Error)]
pub enum PostgresError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),
}

/// User row without skills
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: i64,
    name: String,
    avatar: Option<String>,
    location: Option<String>,
    bio: Option<String>,
    rating: Option<f64>,
    credits: Option<i64>,
    verified: Option<bool>,
    availability: Option<String>,
    created_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Offered or needed skill row, keyed by owner
#[derive(Debug, sqlx::FromRow)]
struct SkillTagRow {
    user_id: i64,
    name: String,
    category: String,
    level: Option<String>,
    priority: Option<String>,
}

const USER_COLUMNS: &str = r#"
    u.id::BIGINT AS id,
    u.name,
    u.avatar,
    u.location,
    u.bio,
    u.rating::DOUBLE PRECISION AS rating,
    u.credits::BIGINT AS credits,
    u.verified,
    u.availability,
    u.created_at::TIMESTAMPTZ AS created_at
"#;

const SQL_OFFERED_SKILLS: &str = r#"
    SELECT us.user_id::BIGINT AS user_id, s.name, s.category, us.level, NULL::TEXT AS priority
    FROM user_skills us
    JOIN skills s ON us.skill_id = s.id
    WHERE us.user_id = ANY($1::INT[]) AND us.available = TRUE
    ORDER BY us.user_id, us.id
"#;

const SQL_NEEDED_SKILLS: &str = r#"
    SELECT un.user_id::BIGINT AS user_id, s.name, s.category, NULL::TEXT AS level, un.priority
    FROM user_needs un
    JOIN skills s ON un.skill_id = s.id
    WHERE un.user_id = ANY($1::INT[])
    ORDER BY un.user_id, un.id
"#;

const SQL_UPDATE_PROFILE: &str = r#"
    UPDATE users
    SET name = $2,
        bio = $3,
        location = $4,
        availability = COALESCE($5, availability),
        avatar = COALESCE($6, avatar),
        updated_at = CURRENT_TIMESTAMP
    WHERE id = $1::INT
"#;

const SQL_SKILL_EXISTS: &str = "SELECT EXISTS (SELECT 1 FROM skills WHERE id = $1::INT)";

const SQL_UPDATE_USER_SKILL: &str = r#"
    UPDATE user_skills
    SET level = $3, experience_years = $4, description = $5, available = TRUE
    WHERE user_id = $1::INT AND skill_id = $2::INT
    RETURNING id::BIGINT
"#;

const SQL_INSERT_USER_SKILL: &str = r#"
    INSERT INTO user_skills (user_id, skill_id, level, experience_years, description, available)
    VALUES ($1::INT, $2::INT, $3, $4, $5, TRUE)
    RETURNING id::BIGINT
"#;

const SQL_UPDATE_USER_NEED: &str = r#"
    UPDATE user_needs
    SET priority = $3, max_credits_per_hour = $4, preferred_level = $5, notes = $6
    WHERE user_id = $1::INT AND skill_id = $2::INT
    RETURNING id::BIGINT
"#;

const SQL_INSERT_USER_NEED: &str = r#"
    INSERT INTO user_needs (user_id, skill_id, priority, max_credits_per_hour, preferred_level, notes)
    VALUES ($1::INT, $2::INT, $3, $4, $5, $6)
    RETURNING id::BIGINT
"#;

/// Map the "all" pseudo-category and blank values to no filter
pub fn category_filter(category: Option<&str>) -> Option<&str> {
    category
        .map(str::trim)
        .filter(|c| !c.is_empty() && *c != ALL_CATEGORIES)
}

/// PostgreSQL client for users, skills and their links
///
/// The schema is owned by the rest of the SkillSwap backend. This client
/// only touches a user's own profile fields and skill links.
pub struct PostgresClient {
    pool: PgPool,
}

impl PostgresClient {
    /// Create a new PostgreSQL client from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout: Duration,
        idle_timeout: Duration,
    ) -> Result<Self, PostgresError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(acquire_timeout)
            .idle_timeout(idle_timeout)
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Create a new PostgreSQL client from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
        acquire_timeout_secs: Option<u64>,
        idle_timeout_secs: Option<u64>,
    ) -> Result<Self, PostgresError> {
        tracing::info!("Connecting to PostgreSQL");

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
            Duration::from_secs(acquire_timeout_secs.unwrap_or(5)),
            Duration::from_secs(idle_timeout_secs.unwrap_or(600)),
        )
        .await
    }

    /// Attach offered and needed skills to user rows, preserving row order
    async fn hydrate(&self, rows: Vec<UserRow>) -> Result<Vec<UserProfile>, PostgresError> {
        if rows.is_empty() {
            return Ok(vec![]);
        }

        let ids: Vec<i64> = rows.iter().map(|row| row.id).collect();

        let offered = sqlx::query_as::<_, SkillTagRow>(SQL_OFFERED_SKILLS)
            .bind(&ids)
            .fetch_all(&self.pool)
            .await?;
        let needed = sqlx::query_as::<_, SkillTagRow>(SQL_NEEDED_SKILLS)
            .bind(&ids)
            .fetch_all(&self.pool)
            .await?;

        let mut offered = group_by_user(offered);
        let mut needed = group_by_user(needed);

        Ok(rows
            .into_iter()
            .map(|row| {
                let id = row.id;
                into_profile(
                    row,
                    offered.remove(&id).unwrap_or_default(),
                    needed.remove(&id).unwrap_or_default(),
                )
            })
            .collect())
    }

    /// Browse other users, optionally by skill category and free-text search
    ///
    /// Search matches user names and offered skill names, case-insensitively.
    pub async fn browse_users(
        &self,
        viewer_id: i64,
        category: Option<&str>,
        search: Option<&str>,
        limit: i64,
    ) -> Result<Vec<UserProfile>, PostgresError> {
        let query = format!(
            r#"
            SELECT {USER_COLUMNS}
            FROM users u
            WHERE u.id <> $1::INT
              AND ($2::TEXT IS NULL OR EXISTS (
                    SELECT 1 FROM user_skills us JOIN skills s ON us.skill_id = s.id
                    WHERE us.user_id = u.id AND us.available = TRUE AND s.category = $2))
              AND ($3::TEXT IS NULL OR u.name ILIKE $3 OR EXISTS (
                    SELECT 1 FROM user_skills us JOIN skills s ON us.skill_id = s.id
                    WHERE us.user_id = u.id AND us.available = TRUE AND s.name ILIKE $3))
            ORDER BY u.rating DESC, u.created_at DESC
            LIMIT $4
            "#
        );

        let pattern = search
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| format!("%{}%", s));

        let rows = sqlx::query_as::<_, UserRow>(&query)
            .bind(viewer_id)
            .bind(category_filter(category))
            .bind(pattern)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        tracing::debug!("Browse for user {} returned {} users", viewer_id, rows.len());

        self.hydrate(rows).await
    }

    /// List catalog skills, most popular first
    pub async fn list_skills(&self, category: Option<&str>) -> Result<Vec<Skill>, PostgresError> {
        let query = r#"
            SELECT id::BIGINT AS id, name, category, description, icon,
                   COALESCE(popularity, 0)::INT AS popularity
            FROM skills
            WHERE ($1::TEXT IS NULL OR category = $1)
            ORDER BY popularity DESC, name ASC
        "#;

        let skills = sqlx::query_as::<_, Skill>(query)
            .bind(category_filter(category))
            .fetch_all(&self.pool)
            .await?;

        Ok(skills)
    }

    /// List skill categories, prefixed with the "all" pseudo-category
    pub async fn list_categories(&self) -> Result<Vec<String>, PostgresError> {
        let query = r#"
            SELECT DISTINCT category
            FROM skills
            ORDER BY category
        "#;

        let rows: Vec<(String,)> = sqlx::query_as(query).fetch_all(&self.pool).await?;

        let mut categories = Vec::with_capacity(rows.len() + 1);
        categories.push(ALL_CATEGORIES.to_string());
        categories.extend(rows.into_iter().map(|(category,)| category));

        Ok(categories)
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, PostgresError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}

impl ProfileStore for PostgresClient {
    async fn user_with_skills(&self, user_id: i64) -> Result<Option<UserProfile>, PostgresError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users u WHERE u.id = $1::INT");

        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(self.hydrate(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn match_candidates(&self, user_id: i64) -> Result<Vec<UserProfile>, PostgresError> {
        let query = format!(
            "SELECT {USER_COLUMNS} FROM users u WHERE u.id <> $1::INT AND u.verified = TRUE ORDER BY u.id"
        );

        let rows = sqlx::query_as::<_, UserRow>(&query)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        tracing::debug!("Loaded {} verified candidates for user {}", rows.len(), user_id);

        self.hydrate(rows).await
    }
}

impl ProfileEditor for PostgresClient {
    async fn update_profile(
        &self,
        user_id: i64,
        update: &UpdateProfileRequest,
    ) -> Result<Option<UserProfile>, PostgresError> {
        let result = sqlx::query(SQL_UPDATE_PROFILE)
            .bind(user_id)
            .bind(&update.name)
            .bind(update.bio.as_deref())
            .bind(update.location.as_deref())
            .bind(update.availability.as_deref())
            .bind(update.avatar.as_deref())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        tracing::debug!("Updated profile fields of user {}", user_id);

        self.user_with_skills(user_id).await
    }

    /// Update-then-insert inside one transaction; `user_skills` has no
    /// unique key on (user_id, skill_id) to upsert against
    async fn upsert_offered_skill(
        &self,
        user_id: i64,
        skill: &AddOfferedSkillRequest,
    ) -> Result<Option<i64>, PostgresError> {
        let mut tx = self.pool.begin().await?;

        if !skill_exists(&mut tx, skill.skill_id).await? {
            return Ok(None);
        }

        let updated: Option<(i64,)> = sqlx::query_as(SQL_UPDATE_USER_SKILL)
            .bind(user_id)
            .bind(skill.skill_id)
            .bind(&skill.level)
            .bind(skill.experience_years)
            .bind(skill.description.as_deref())
            .fetch_optional(&mut *tx)
            .await?;

        let id = match updated {
            Some((id,)) => id,
            None => {
                let (id,): (i64,) = sqlx::query_as(SQL_INSERT_USER_SKILL)
                    .bind(user_id)
                    .bind(skill.skill_id)
                    .bind(&skill.level)
                    .bind(skill.experience_years)
                    .bind(skill.description.as_deref())
                    .fetch_one(&mut *tx)
                    .await?;
                id
            }
        };

        tx.commit().await?;

        tracing::debug!("User {} offers skill {} (link {})", user_id, skill.skill_id, id);
        Ok(Some(id))
    }

    async fn upsert_needed_skill(
        &self,
        user_id: i64,
        need: &AddNeededSkillRequest,
    ) -> Result<Option<i64>, PostgresError> {
        let mut tx = self.pool.begin().await?;

        if !skill_exists(&mut tx, need.skill_id).await? {
            return Ok(None);
        }

        let updated: Option<(i64,)> = sqlx::query_as(SQL_UPDATE_USER_NEED)
            .bind(user_id)
            .bind(need.skill_id)
            .bind(&need.priority)
            .bind(need.max_credits_per_hour)
            .bind(&need.preferred_level)
            .bind(need.notes.as_deref())
            .fetch_optional(&mut *tx)
            .await?;

        let id = match updated {
            Some((id,)) => id,
            None => {
                let (id,): (i64,) = sqlx::query_as(SQL_INSERT_USER_NEED)
                    .bind(user_id)
                    .bind(need.skill_id)
                    .bind(&need.priority)
                    .bind(need.max_credits_per_hour)
                    .bind(&need.preferred_level)
                    .bind(need.notes.as_deref())
                    .fetch_one(&mut *tx)
                    .await?;
                id
            }
        };

        tx.commit().await?;

        tracing::debug!("User {} needs skill {} (link {})", user_id, need.skill_id, id);
        Ok(Some(id))
    }
}

async fn skill_exists(conn: &mut PgConnection, skill_id: i64) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>(SQL_SKILL_EXISTS)
        .bind(skill_id)
        .fetch_one(conn)
        .await
}

fn group_by_user(rows: Vec<SkillTagRow>) -> HashMap<i64, Vec<SkillTag>> {
    let mut grouped: HashMap<i64, Vec<SkillTag>> = HashMap::new();
    for row in rows {
        grouped.entry(row.user_id).or_default().push(SkillTag {
            name: row.name,
            category: row.category,
            level: row.level,
            priority: row.priority,
        });
    }
    grouped
}

fn into_profile(row: UserRow, skills_offered: Vec<SkillTag>, skills_needed: Vec<SkillTag>) -> UserProfile {
    UserProfile {
        id: row.id,
        name: row.name,
        avatar: row.avatar.unwrap_or_else(|| "👤".to_string()),
        location: row.location,
        bio: row.bio,
        rating: row.rating.unwrap_or(0.0),
        credits: row.credits.unwrap_or(0),
        verified: row.verified.unwrap_or(false),
        availability: row.availability.unwrap_or_else(|| "Flexible".to_string()),
        skills_offered,
        skills_needed,
        created_at: row.created_at,
    }
}
