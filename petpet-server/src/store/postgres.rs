//! PostgreSQL store backend.
//!
//! Queries are bound at runtime so no live database is needed at compile
//! time. The schema is bootstrapped on startup; statements are idempotent.

use async_trait::async_trait;
use petpet_model::{OwnerId, Pet, PetId};
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::Row;
use tracing::info;

use super::{
    IdentityStore, PetStore, SessionRecord, StoreError, StoreResult, UserRecord,
};

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id UUID PRIMARY KEY,
        username TEXT NOT NULL UNIQUE,
        password_hash TEXT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS sessions (
        token_hash TEXT PRIMARY KEY,
        user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        expires_at TIMESTAMPTZ NOT NULL,
        revoked BOOLEAN NOT NULL DEFAULT FALSE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS pets (
        id UUID PRIMARY KEY,
        owner_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        name TEXT NOT NULL,
        species TEXT NOT NULL,
        age BIGINT,
        weight BIGINT,
        pet_url TEXT,
        pet_url2 TEXT,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_pets_owner ON pets(owner_id)",
    "CREATE INDEX IF NOT EXISTS idx_sessions_user ON sessions(user_id)",
];

/// Connect to PostgreSQL and make sure the schema exists.
pub async fn connect(database_url: &str) -> StoreResult<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    for statement in SCHEMA {
        sqlx::query(statement).execute(&pool).await?;
    }
    info!("database schema verified");

    Ok(pool)
}

#[derive(Debug, Clone)]
pub struct PostgresIdentityStore {
    pool: PgPool,
}

impl PostgresIdentityStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn user_from_row(row: &PgRow) -> Result<UserRecord, sqlx::Error> {
    Ok(UserRecord {
        id: OwnerId(row.try_get("id")?),
        username: row.try_get("username")?,
        password_hash: row.try_get("password_hash")?,
        created_at: row.try_get("created_at")?,
    })
}

#[async_trait]
impl IdentityStore for PostgresIdentityStore {
    async fn create_user(&self, user: &UserRecord) -> StoreResult<()> {
        let result = sqlx::query(
            "INSERT INTO users (id, username, password_hash, created_at) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(user.id.to_uuid())
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(user.created_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db_err))
                if db_err.is_unique_violation() =>
            {
                Err(StoreError::Conflict(format!(
                    "username '{}' is already taken",
                    user.username
                )))
            }
            Err(other) => Err(other.into()),
        }
    }

    async fn find_user_by_username(
        &self,
        username: &str,
    ) -> StoreResult<Option<UserRecord>> {
        let row = sqlx::query(
            "SELECT id, username, password_hash, created_at \
             FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(user_from_row).transpose().map_err(Into::into)
    }

    async fn find_user_by_id(
        &self,
        id: OwnerId,
    ) -> StoreResult<Option<UserRecord>> {
        let row = sqlx::query(
            "SELECT id, username, password_hash, created_at \
             FROM users WHERE id = $1",
        )
        .bind(id.to_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(user_from_row).transpose().map_err(Into::into)
    }

    async fn create_session(&self, session: &SessionRecord) -> StoreResult<()> {
        sqlx::query(
            "INSERT INTO sessions (token_hash, user_id, expires_at, revoked) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(&session.token_hash)
        .bind(session.user_id.to_uuid())
        .bind(session.expires_at)
        .bind(session.revoked)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_session(
        &self,
        token_hash: &str,
    ) -> StoreResult<Option<SessionRecord>> {
        let row = sqlx::query(
            "SELECT token_hash, user_id, expires_at, revoked \
             FROM sessions WHERE token_hash = $1",
        )
        .bind(token_hash)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|row| {
            Ok(SessionRecord {
                token_hash: row.try_get("token_hash")?,
                user_id: OwnerId(row.try_get("user_id")?),
                expires_at: row.try_get("expires_at")?,
                revoked: row.try_get("revoked")?,
            })
        })
        .transpose()
        .map_err(|e: sqlx::Error| e.into())
    }

    async fn revoke_session(&self, token_hash: &str) -> StoreResult<()> {
        sqlx::query("UPDATE sessions SET revoked = TRUE WHERE token_hash = $1")
            .bind(token_hash)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct PostgresPetStore {
    pool: PgPool,
}

impl PostgresPetStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn pet_from_row(row: &PgRow) -> Result<Pet, sqlx::Error> {
    Ok(Pet {
        id: PetId(row.try_get("id")?),
        owner_id: OwnerId(row.try_get("owner_id")?),
        name: row.try_get("name")?,
        species: row.try_get("species")?,
        age: row.try_get("age")?,
        weight: row.try_get("weight")?,
        default_image_url: row.try_get("pet_url")?,
        alternate_image_url: row.try_get("pet_url2")?,
        created_at: row.try_get("created_at")?,
    })
}

#[async_trait]
impl PetStore for PostgresPetStore {
    async fn list_for_owner(&self, owner: OwnerId) -> StoreResult<Vec<Pet>> {
        let rows = sqlx::query(
            "SELECT id, owner_id, name, species, age, weight, pet_url, \
             pet_url2, created_at \
             FROM pets WHERE owner_id = $1 ORDER BY id",
        )
        .bind(owner.to_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(pet_from_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(Into::into)
    }

    async fn get(&self, id: PetId) -> StoreResult<Option<Pet>> {
        let row = sqlx::query(
            "SELECT id, owner_id, name, species, age, weight, pet_url, \
             pet_url2, created_at \
             FROM pets WHERE id = $1",
        )
        .bind(id.to_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(pet_from_row).transpose().map_err(Into::into)
    }

    async fn insert(&self, pet: &Pet) -> StoreResult<()> {
        sqlx::query(
            "INSERT INTO pets (id, owner_id, name, species, age, weight, \
             pet_url, pet_url2, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(pet.id.to_uuid())
        .bind(pet.owner_id.to_uuid())
        .bind(&pet.name)
        .bind(&pet.species)
        .bind(pet.age)
        .bind(pet.weight)
        .bind(&pet.default_image_url)
        .bind(&pet.alternate_image_url)
        .bind(pet.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn update(&self, pet: &Pet) -> StoreResult<()> {
        let result = sqlx::query(
            "UPDATE pets SET name = $2, species = $3, age = $4, weight = $5, \
             pet_url = $6, pet_url2 = $7 \
             WHERE id = $1",
        )
        .bind(pet.id.to_uuid())
        .bind(&pet.name)
        .bind(&pet.species)
        .bind(pet.age)
        .bind(pet.weight)
        .bind(&pet.default_image_url)
        .bind(&pet.alternate_image_url)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn delete(&self, id: PetId) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM pets WHERE id = $1")
            .bind(id.to_uuid())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    async fn test_pool() -> Option<PgPool> {
        let url = std::env::var("PETPET_TEST_DATABASE_URL").ok()?;
        Some(connect(&url).await.expect("connect to test database"))
    }

    #[tokio::test]
    #[ignore = "requires PETPET_TEST_DATABASE_URL"]
    async fn stores_round_trip_against_live_database() {
        let Some(pool) = test_pool().await else {
            return;
        };
        let identity = PostgresIdentityStore::new(pool.clone());
        let pets = PostgresPetStore::new(pool);

        let owner = OwnerId::new();
        let user = UserRecord {
            id: owner,
            username: format!("itest-{owner}"),
            password_hash: "placeholder".into(),
            created_at: Utc::now(),
        };
        identity.create_user(&user).await.expect("create user");
        let found = identity
            .find_user_by_username(&user.username)
            .await
            .expect("lookup user")
            .expect("user present");
        assert_eq!(found.id, owner);

        let pet = Pet {
            id: PetId::new(),
            owner_id: owner,
            name: "Milo".into(),
            species: "cat".into(),
            age: Some(3),
            weight: Some(12),
            default_image_url: None,
            alternate_image_url: None,
            created_at: Utc::now(),
        };
        pets.insert(&pet).await.expect("insert pet");
        let listed = pets.list_for_owner(owner).await.expect("list pets");
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "Milo");

        pets.delete(pet.id).await.expect("delete pet");
        assert!(matches!(
            pets.delete(pet.id).await,
            Err(StoreError::NotFound)
        ));
    }
}
