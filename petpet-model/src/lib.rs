//! Core data model definitions shared across Pet Your Pet crates.
#![allow(missing_docs)]

pub mod api;
pub mod auth;
pub mod error;
pub mod ids;
pub mod pet;

// Intentionally curated re-exports for downstream consumers.
pub use api::ApiResponse;
pub use auth::{AuthToken, SignInRequest, SignUpRequest, UserProfile};
pub use error::{ModelError, Result as ModelResult};
pub use ids::{OwnerId, PetId};
pub use pet::{Pet, PetAttributes, PetUpdate};
