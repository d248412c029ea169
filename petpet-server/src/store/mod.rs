//! Storage ports for the directory and identity services.
//!
//! Handlers only ever see these traits; PostgreSQL and the in-memory test
//! backend plug in behind them.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use petpet_model::{OwnerId, Pet, PetId, UserProfile};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("resource not found")]
    NotFound,
    #[error("{0}")]
    Conflict(String),
    #[error("backend error: {0}")]
    Backend(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            other => StoreError::Backend(other.to_string()),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// A registered owner identity, including credentials.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: OwnerId,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl UserRecord {
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            username: self.username.clone(),
            created_at: self.created_at,
        }
    }
}

/// A bearer-token session. Only the HMAC digest of the token is stored.
#[derive(Debug, Clone)]
pub struct SessionRecord {
    pub token_hash: String,
    pub user_id: OwnerId,
    pub expires_at: DateTime<Utc>,
    pub revoked: bool,
}

impl SessionRecord {
    pub fn is_valid(&self, now: DateTime<Utc>) -> bool {
        !self.revoked && self.expires_at > now
    }
}

/// Persistence port for owner identities and their sessions.
#[async_trait]
pub trait IdentityStore: Send + Sync {
    /// Insert a new user. Fails with [`StoreError::Conflict`] when the
    /// username is already taken.
    async fn create_user(&self, user: &UserRecord) -> StoreResult<()>;

    async fn find_user_by_username(
        &self,
        username: &str,
    ) -> StoreResult<Option<UserRecord>>;

    async fn find_user_by_id(
        &self,
        id: OwnerId,
    ) -> StoreResult<Option<UserRecord>>;

    async fn create_session(&self, session: &SessionRecord) -> StoreResult<()>;

    async fn find_session(
        &self,
        token_hash: &str,
    ) -> StoreResult<Option<SessionRecord>>;

    /// Mark a session revoked. Revoking an unknown token is a no-op.
    async fn revoke_session(&self, token_hash: &str) -> StoreResult<()>;
}

/// Persistence port for the pet directory.
#[async_trait]
pub trait PetStore: Send + Sync {
    /// All pets belonging to `owner`, oldest first.
    async fn list_for_owner(&self, owner: OwnerId) -> StoreResult<Vec<Pet>>;

    async fn get(&self, id: PetId) -> StoreResult<Option<Pet>>;

    async fn insert(&self, pet: &Pet) -> StoreResult<()>;

    /// Replace the stored pet with `pet`. Fails with
    /// [`StoreError::NotFound`] when no pet with that id exists.
    async fn update(&self, pet: &Pet) -> StoreResult<()>;

    async fn delete(&self, id: PetId) -> StoreResult<()>;
}
