use crate::error::ModelError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Strongly typed ID for pets.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Copy, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PetId(pub Uuid);

impl Default for PetId {
    fn default() -> Self {
        Self::new()
    }
}

impl PetId {
    pub fn new() -> Self {
        PetId(Uuid::now_v7())
    }

    pub fn parse(id: &str) -> Result<Self, ModelError> {
        Uuid::parse_str(id)
            .map(PetId)
            .map_err(|e| ModelError::InvalidId(e.to_string()))
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    pub fn to_uuid(&self) -> Uuid {
        self.0
    }
}

impl AsRef<Uuid> for PetId {
    fn as_ref(&self) -> &Uuid {
        &self.0
    }
}

impl std::fmt::Display for PetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Strongly typed ID for pet owners (user identities).
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Copy, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct OwnerId(pub Uuid);

impl Default for OwnerId {
    fn default() -> Self {
        Self::new()
    }
}

impl OwnerId {
    pub fn new() -> Self {
        OwnerId(Uuid::now_v7())
    }

    pub fn parse(id: &str) -> Result<Self, ModelError> {
        Uuid::parse_str(id)
            .map(OwnerId)
            .map_err(|e| ModelError::InvalidId(e.to_string()))
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    pub fn to_uuid(&self) -> Uuid {
        self.0
    }
}

impl AsRef<Uuid> for OwnerId {
    fn as_ref(&self) -> &Uuid {
        &self.0
    }
}

impl std::fmt::Display for OwnerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pet_id_round_trips_through_string() {
        let id = PetId::new();
        let parsed = PetId::parse(&id.to_string()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn rejects_malformed_ids() {
        assert!(PetId::parse("not-a-uuid").is_err());
        assert!(OwnerId::parse("").is_err());
    }
}
