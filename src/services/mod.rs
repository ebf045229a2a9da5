// Service exports
pub mod auth;
pub mod cache;
pub mod postgres;
pub mod store;

pub use auth::{AuthError, AuthenticatedUser, Claims, TokenVerifier};
pub use cache::{CacheManager, CacheKey, CacheError, CacheStats};
pub use postgres::{PostgresClient, PostgresError, ALL_CATEGORIES};
pub use store::{ProfileEditor, ProfileStore};
