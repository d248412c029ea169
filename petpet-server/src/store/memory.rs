//! In-memory store backend.
//!
//! Backs the test suite and the `--in-memory` development mode. State lives
//! in plain mutex-guarded maps; nothing survives a restart.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use petpet_model::{OwnerId, Pet, PetId};

use super::{
    IdentityStore, PetStore, SessionRecord, StoreError, StoreResult, UserRecord,
};

#[derive(Debug, Default)]
pub struct MemoryIdentityStore {
    users: Mutex<HashMap<OwnerId, UserRecord>>,
    sessions: Mutex<HashMap<String, SessionRecord>>,
}

impl MemoryIdentityStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl IdentityStore for MemoryIdentityStore {
    async fn create_user(&self, user: &UserRecord) -> StoreResult<()> {
        let mut users = self.users.lock().expect("identity store poisoned");
        if users.values().any(|u| u.username == user.username) {
            return Err(StoreError::Conflict(format!(
                "username '{}' is already taken",
                user.username
            )));
        }
        users.insert(user.id, user.clone());
        Ok(())
    }

    async fn find_user_by_username(
        &self,
        username: &str,
    ) -> StoreResult<Option<UserRecord>> {
        let users = self.users.lock().expect("identity store poisoned");
        Ok(users.values().find(|u| u.username == username).cloned())
    }

    async fn find_user_by_id(
        &self,
        id: OwnerId,
    ) -> StoreResult<Option<UserRecord>> {
        let users = self.users.lock().expect("identity store poisoned");
        Ok(users.get(&id).cloned())
    }

    async fn create_session(&self, session: &SessionRecord) -> StoreResult<()> {
        let mut sessions = self.sessions.lock().expect("identity store poisoned");
        sessions.insert(session.token_hash.clone(), session.clone());
        Ok(())
    }

    async fn find_session(
        &self,
        token_hash: &str,
    ) -> StoreResult<Option<SessionRecord>> {
        let sessions = self.sessions.lock().expect("identity store poisoned");
        Ok(sessions.get(token_hash).cloned())
    }

    async fn revoke_session(&self, token_hash: &str) -> StoreResult<()> {
        let mut sessions = self.sessions.lock().expect("identity store poisoned");
        if let Some(session) = sessions.get_mut(token_hash) {
            session.revoked = true;
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MemoryPetStore {
    pets: Mutex<HashMap<PetId, Pet>>,
}

impl MemoryPetStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PetStore for MemoryPetStore {
    async fn list_for_owner(&self, owner: OwnerId) -> StoreResult<Vec<Pet>> {
        let pets = self.pets.lock().expect("pet store poisoned");
        let mut owned: Vec<Pet> = pets
            .values()
            .filter(|p| p.owner_id == owner)
            .cloned()
            .collect();
        // UUIDv7 ids are time-ordered, so this matches insertion order.
        owned.sort_by_key(|p| p.id);
        Ok(owned)
    }

    async fn get(&self, id: PetId) -> StoreResult<Option<Pet>> {
        let pets = self.pets.lock().expect("pet store poisoned");
        Ok(pets.get(&id).cloned())
    }

    async fn insert(&self, pet: &Pet) -> StoreResult<()> {
        let mut pets = self.pets.lock().expect("pet store poisoned");
        pets.insert(pet.id, pet.clone());
        Ok(())
    }

    async fn update(&self, pet: &Pet) -> StoreResult<()> {
        let mut pets = self.pets.lock().expect("pet store poisoned");
        match pets.get_mut(&pet.id) {
            Some(existing) => {
                *existing = pet.clone();
                Ok(())
            }
            None => Err(StoreError::NotFound),
        }
    }

    async fn delete(&self, id: PetId) -> StoreResult<()> {
        let mut pets = self.pets.lock().expect("pet store poisoned");
        match pets.remove(&id) {
            Some(_) => Ok(()),
            None => Err(StoreError::NotFound),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use petpet_model::PetAttributes;

    fn sample_pet(owner: OwnerId) -> Pet {
        PetAttributes {
            name: "Mochi".to_string(),
            species: "cat".to_string(),
            ..Default::default()
        }
        .into_pet(owner)
    }

    #[tokio::test]
    async fn list_is_scoped_to_owner() {
        let store = MemoryPetStore::new();
        let alice = OwnerId::new();
        let bob = OwnerId::new();
        store.insert(&sample_pet(alice)).await.unwrap();
        store.insert(&sample_pet(alice)).await.unwrap();
        store.insert(&sample_pet(bob)).await.unwrap();

        assert_eq!(store.list_for_owner(alice).await.unwrap().len(), 2);
        assert_eq!(store.list_for_owner(bob).await.unwrap().len(), 1);
        assert!(store.list_for_owner(OwnerId::new()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_and_delete_require_existing_pet() {
        let store = MemoryPetStore::new();
        let pet = sample_pet(OwnerId::new());
        assert!(matches!(
            store.update(&pet).await,
            Err(StoreError::NotFound)
        ));
        assert!(matches!(
            store.delete(pet.id).await,
            Err(StoreError::NotFound)
        ));

        store.insert(&pet).await.unwrap();
        let mut renamed = pet.clone();
        renamed.name = "Tofu".to_string();
        store.update(&renamed).await.unwrap();
        assert_eq!(store.get(pet.id).await.unwrap().unwrap().name, "Tofu");
        store.delete(pet.id).await.unwrap();
        assert!(store.get(pet.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_usernames_conflict() {
        let store = MemoryIdentityStore::new();
        let user = UserRecord {
            id: OwnerId::new(),
            username: "ada".to_string(),
            password_hash: "$argon2id$stub".to_string(),
            created_at: Utc::now(),
        };
        store.create_user(&user).await.unwrap();

        let duplicate = UserRecord {
            id: OwnerId::new(),
            ..user.clone()
        };
        assert!(matches!(
            store.create_user(&duplicate).await,
            Err(StoreError::Conflict(_))
        ));
    }
}
