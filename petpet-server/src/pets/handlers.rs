//! Pet directory handlers.
//!
//! Semantics follow the original backend: listing without a signed-in user
//! succeeds with an empty result, mutations require authentication, and
//! update/delete report 404 before the ownership check so foreign pets and
//! absent pets are distinguishable.

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use petpet_model::{ApiResponse, Pet, PetAttributes, PetId, PetUpdate};
use tracing::debug;

use crate::auth::middleware::{CurrentUser, MaybeUser};
use crate::errors::{AppError, AppResult};
use crate::infra::app_state::AppState;

/// `GET /pets` — all pets owned by the current user. Anonymous callers get
/// an empty list rather than an error.
pub async fn list_pets(
    State(state): State<AppState>,
    Extension(MaybeUser(user)): Extension<MaybeUser>,
) -> AppResult<Json<ApiResponse<Vec<Pet>>>> {
    let Some(user) = user else {
        return Ok(Json(ApiResponse::list(Vec::new())));
    };

    let pets = state.pets.list_for_owner(user.profile.id).await?;
    debug!(owner = %user.profile.id, count = pets.len(), "listed pets");
    Ok(Json(ApiResponse::list(pets)))
}

/// `POST /pets` — create a pet owned by the current user.
pub async fn create_pet(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(attributes): Json<PetAttributes>,
) -> AppResult<(StatusCode, Json<ApiResponse<Pet>>)> {
    attributes.validate()?;

    let pet = attributes.into_pet(user.profile.id);
    state.pets.insert(&pet).await?;
    debug!(owner = %user.profile.id, pet = %pet.id, "pet created");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(pet).with_message("Pet created successfully")),
    ))
}

/// `PUT /pets/{id}` — partial update of an owned pet.
pub async fn update_pet(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(update): Json<PetUpdate>,
) -> AppResult<Json<ApiResponse<Pet>>> {
    let id = parse_pet_id(&id)?;
    update.validate()?;

    let mut pet = fetch_owned_pet(&state, id, &user, "update").await?;
    update.apply_to(&mut pet);
    state.pets.update(&pet).await?;

    Ok(Json(
        ApiResponse::success(pet).with_message("Pet updated successfully"),
    ))
}

/// `DELETE /pets/{id}` — remove an owned pet.
pub async fn delete_pet(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Pet>>> {
    let id = parse_pet_id(&id)?;

    let pet = fetch_owned_pet(&state, id, &user, "delete").await?;
    state.pets.delete(id).await?;
    debug!(owner = %user.profile.id, pet = %id, "pet deleted");

    Ok(Json(
        ApiResponse::success(pet).with_message("Pet deleted successfully"),
    ))
}

fn parse_pet_id(raw: &str) -> Result<PetId, AppError> {
    PetId::parse(raw).map_err(|_| AppError::bad_request("Invalid pet ID"))
}

/// Load a pet, reporting not-found before the ownership check.
async fn fetch_owned_pet(
    state: &AppState,
    id: PetId,
    user: &CurrentUser,
    action: &str,
) -> Result<Pet, AppError> {
    let pet = state
        .pets
        .get(id)
        .await?
        .ok_or_else(|| AppError::not_found("Pet not found"))?;

    if pet.owner_id != user.profile.id {
        return Err(AppError::forbidden(format!(
            "You do not have permission to {action} this pet"
        )));
    }
    Ok(pet)
}
