//! Lamina (sticker) API handlers

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use laminas_common::{ApiPath, Result, ValidatedJson};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::api::middleware::CollectionState;
use crate::domain::entities::{DuplicateLamina, Lamina, LaminaDraft, LaminaPatch};

/// Request for creating a single lamina
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLaminaRequest {
    #[validate(range(min = 1))]
    pub numero: i32,

    #[validate(length(max = 200))]
    pub name: Option<String>,

    #[validate(length(max = 500))]
    pub image: Option<String>,

    pub adquirida: Option<bool>,

    #[validate(range(min = 0))]
    pub cantidad_repetidas: Option<i32>,
}

impl From<CreateLaminaRequest> for LaminaDraft {
    fn from(req: CreateLaminaRequest) -> Self {
        Self {
            numero: req.numero,
            name: req.name,
            image: req.image,
            adquirida: req.adquirida,
            cantidad_repetidas: req.cantidad_repetidas,
        }
    }
}

/// Request for creating many placeholder laminas at once
#[derive(Debug, Deserialize, Validate)]
pub struct BulkCreateLaminasRequest {
    /// At most 1000 numbers per request
    #[validate(length(max = 1000))]
    pub numeros: Vec<i32>,
}

/// Partial update; omitted fields keep their stored value
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateLaminaRequest {
    #[validate(range(min = 1))]
    pub numero: Option<i32>,

    #[validate(length(max = 200))]
    pub name: Option<String>,

    #[validate(length(max = 500))]
    pub image: Option<String>,

    pub adquirida: Option<bool>,

    #[validate(range(min = 0))]
    pub cantidad_repetidas: Option<i32>,
}

impl From<UpdateLaminaRequest> for LaminaPatch {
    fn from(req: UpdateLaminaRequest) -> Self {
        Self {
            numero: req.numero,
            name: req.name,
            image: req.image,
            adquirida: req.adquirida,
            cantidad_repetidas: req.cantidad_repetidas,
        }
    }
}

/// Lamina response DTO
#[derive(Debug, Serialize)]
pub struct LaminaResponse {
    pub id: i64,
    pub album_id: i64,
    pub numero: i32,
    pub name: Option<String>,
    pub image: Option<String>,
    pub adquirida: bool,
    pub cantidad_repetidas: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Lamina> for LaminaResponse {
    fn from(l: Lamina) -> Self {
        Self {
            id: l.id,
            album_id: l.album_id,
            numero: l.numero,
            name: l.name,
            image: l.image,
            adquirida: l.adquirida,
            cantidad_repetidas: l.cantidad_repetidas,
            created_at: l.created_at,
            updated_at: l.updated_at,
        }
    }
}

/// Duplicate projection DTO
#[derive(Debug, Serialize)]
pub struct DuplicateLaminaResponse {
    pub id: i64,
    pub numero: i32,
    pub name: Option<String>,
    pub cantidad_repetidas: i32,
}

impl From<DuplicateLamina> for DuplicateLaminaResponse {
    fn from(d: DuplicateLamina) -> Self {
        Self {
            id: d.id,
            numero: d.numero,
            name: d.name,
            cantidad_repetidas: d.cantidad_repetidas,
        }
    }
}

fn to_responses(laminas: Vec<Lamina>) -> Vec<LaminaResponse> {
    laminas.into_iter().map(Into::into).collect()
}

/// List the laminas of an album ordered by number
pub async fn list_laminas(
    State(state): State<CollectionState>,
    ApiPath(album_id): ApiPath<i64>,
) -> Result<Json<Vec<LaminaResponse>>> {
    let laminas = state.laminas.list_by_album(album_id).await?;
    Ok(Json(to_responses(laminas)))
}

/// Create one lamina in an album
pub async fn create_lamina(
    State(state): State<CollectionState>,
    ApiPath(album_id): ApiPath<i64>,
    ValidatedJson(req): ValidatedJson<CreateLaminaRequest>,
) -> Result<(StatusCode, Json<LaminaResponse>)> {
    let created = state.laminas.create(album_id, req.into()).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

/// Create placeholder laminas for the numbers not yet in the album
pub async fn create_laminas_bulk(
    State(state): State<CollectionState>,
    ApiPath(album_id): ApiPath<i64>,
    ValidatedJson(req): ValidatedJson<BulkCreateLaminasRequest>,
) -> Result<(StatusCode, Json<Vec<LaminaResponse>>)> {
    let created = state.laminas.create_bulk(album_id, &req.numeros).await?;
    Ok((StatusCode::CREATED, Json(to_responses(created))))
}

/// Laminas of the album not yet acquired
pub async fn list_missing(
    State(state): State<CollectionState>,
    ApiPath(album_id): ApiPath<i64>,
) -> Result<Json<Vec<LaminaResponse>>> {
    let laminas = state.laminas.missing(album_id).await?;
    Ok(Json(to_responses(laminas)))
}

/// Laminas of the album with duplicate copies
pub async fn list_duplicates(
    State(state): State<CollectionState>,
    ApiPath(album_id): ApiPath<i64>,
) -> Result<Json<Vec<DuplicateLaminaResponse>>> {
    let duplicates = state.laminas.duplicates(album_id).await?;
    Ok(Json(duplicates.into_iter().map(Into::into).collect()))
}

/// Mark a lamina as acquired by its number
pub async fn acquire_lamina(
    State(state): State<CollectionState>,
    ApiPath((album_id, numero)): ApiPath<(i64, i32)>,
) -> Result<Json<LaminaResponse>> {
    let lamina = state.laminas.mark_acquired(album_id, numero).await?;
    Ok(Json(lamina.into()))
}

/// Record one duplicate copy of a lamina
pub async fn add_duplicate(
    State(state): State<CollectionState>,
    ApiPath((album_id, numero)): ApiPath<(i64, i32)>,
) -> Result<Json<LaminaResponse>> {
    let lamina = state.laminas.add_duplicate(album_id, numero).await?;
    Ok(Json(lamina.into()))
}

/// Get a single lamina by ID
pub async fn get_lamina(
    State(state): State<CollectionState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<LaminaResponse>> {
    let lamina = state.laminas.get(id).await?;
    Ok(Json(lamina.into()))
}

/// Partially update a lamina
pub async fn update_lamina(
    State(state): State<CollectionState>,
    ApiPath(id): ApiPath<i64>,
    ValidatedJson(req): ValidatedJson<UpdateLaminaRequest>,
) -> Result<Json<LaminaResponse>> {
    let updated = state.laminas.update(id, req.into()).await?;
    Ok(Json(updated.into()))
}

/// Reset a lamina to not acquired; the lamina itself is kept
pub async fn remove_lamina(
    State(state): State<CollectionState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<LaminaResponse>> {
    let lamina = state.laminas.remove(id).await?;
    Ok(Json(lamina.into()))
}
