use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::ids::{OwnerId, PetId};

/// A pet as stored and served by the directory service.
///
/// The two image URL fields keep their legacy wire names (`pet_url`,
/// `pet_url2`) so payloads from older clients still parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pet {
    pub id: PetId,
    pub owner_id: OwnerId,
    pub name: String,
    pub species: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<i64>,
    #[serde(rename = "pet_url", skip_serializing_if = "Option::is_none")]
    pub default_image_url: Option<String>,
    #[serde(rename = "pet_url2", skip_serializing_if = "Option::is_none")]
    pub alternate_image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Attributes supplied when creating a pet. Name and species are required.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PetAttributes {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub species: String,
    #[serde(default)]
    pub age: Option<i64>,
    #[serde(default)]
    pub weight: Option<i64>,
    #[serde(rename = "pet_url", default)]
    pub default_image_url: Option<String>,
    #[serde(rename = "pet_url2", default)]
    pub alternate_image_url: Option<String>,
}

impl PetAttributes {
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.name.trim().is_empty() {
            return Err(ModelError::MissingField("name"));
        }
        if self.species.trim().is_empty() {
            return Err(ModelError::MissingField("species"));
        }
        if let Some(age) = self.age
            && age < 0
        {
            return Err(ModelError::InvalidField {
                field: "age",
                reason: "must not be negative".to_string(),
            });
        }
        if let Some(weight) = self.weight
            && weight < 0
        {
            return Err(ModelError::InvalidField {
                field: "weight",
                reason: "must not be negative".to_string(),
            });
        }
        Ok(())
    }

    /// Materialize a new pet owned by `owner_id`.
    pub fn into_pet(self, owner_id: OwnerId) -> Pet {
        Pet {
            id: PetId::new(),
            owner_id,
            name: self.name,
            species: self.species,
            age: self.age,
            weight: self.weight,
            default_image_url: self.default_image_url,
            alternate_image_url: self.alternate_image_url,
            created_at: Utc::now(),
        }
    }
}

/// Partial update payload. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PetUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub species: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<i64>,
    #[serde(rename = "pet_url", default, skip_serializing_if = "Option::is_none")]
    pub default_image_url: Option<String>,
    #[serde(
        rename = "pet_url2",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub alternate_image_url: Option<String>,
}

impl PetUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.species.is_none()
            && self.age.is_none()
            && self.weight.is_none()
            && self.default_image_url.is_none()
            && self.alternate_image_url.is_none()
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        if let Some(name) = &self.name
            && name.trim().is_empty()
        {
            return Err(ModelError::MissingField("name"));
        }
        if let Some(species) = &self.species
            && species.trim().is_empty()
        {
            return Err(ModelError::MissingField("species"));
        }
        Ok(())
    }

    /// Fold this update into an existing pet.
    pub fn apply_to(&self, pet: &mut Pet) {
        if let Some(name) = &self.name {
            pet.name = name.clone();
        }
        if let Some(species) = &self.species {
            pet.species = species.clone();
        }
        if let Some(age) = self.age {
            pet.age = Some(age);
        }
        if let Some(weight) = self.weight {
            pet.weight = Some(weight);
        }
        if let Some(url) = &self.default_image_url {
            pet.default_image_url = Some(url.clone());
        }
        if let Some(url) = &self.alternate_image_url {
            pet.alternate_image_url = Some(url.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_attributes() -> PetAttributes {
        PetAttributes {
            name: "灰灰".to_string(),
            species: "cat".to_string(),
            age: Some(3),
            weight: Some(4),
            default_image_url: Some("https://example.com/cat.jpeg".to_string()),
            alternate_image_url: Some("https://example.com/cat2.jpeg".to_string()),
        }
    }

    #[test]
    fn validates_required_fields() {
        assert!(valid_attributes().validate().is_ok());

        let mut missing_name = valid_attributes();
        missing_name.name = "  ".to_string();
        assert!(matches!(
            missing_name.validate(),
            Err(ModelError::MissingField("name"))
        ));

        let mut missing_species = valid_attributes();
        missing_species.species = String::new();
        assert!(matches!(
            missing_species.validate(),
            Err(ModelError::MissingField("species"))
        ));
    }

    #[test]
    fn rejects_negative_age_and_weight() {
        let mut attrs = valid_attributes();
        attrs.age = Some(-1);
        assert!(attrs.validate().is_err());

        let mut attrs = valid_attributes();
        attrs.weight = Some(-10);
        assert!(attrs.validate().is_err());
    }

    #[test]
    fn image_urls_use_legacy_wire_names() {
        let pet = valid_attributes().into_pet(OwnerId::new());
        let json = serde_json::to_value(&pet).unwrap();
        assert_eq!(json["pet_url"], "https://example.com/cat.jpeg");
        assert_eq!(json["pet_url2"], "https://example.com/cat2.jpeg");
        assert!(json.get("default_image_url").is_none());
    }

    #[test]
    fn update_applies_only_present_fields() {
        let mut pet = valid_attributes().into_pet(OwnerId::new());
        let update = PetUpdate {
            weight: Some(5),
            ..Default::default()
        };
        update.apply_to(&mut pet);
        assert_eq!(pet.weight, Some(5));
        assert_eq!(pet.name, "灰灰");
        assert_eq!(pet.age, Some(3));
    }

    #[test]
    fn empty_update_is_detected() {
        assert!(PetUpdate::default().is_empty());
        let update = PetUpdate {
            name: Some("Mochi".to_string()),
            ..Default::default()
        };
        assert!(!update.is_empty());
    }
}
