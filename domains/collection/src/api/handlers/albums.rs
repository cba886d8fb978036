//! Album management API handlers

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use chrono::{DateTime, NaiveDate, Utc};
use laminas_common::{ApiPath, ApiQuery, Result, ValidatedJson};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::api::middleware::CollectionState;
use crate::domain::entities::AlbumDraft;
use crate::domain::statistics::{AlbumOverview, AlbumStatistics};

/// Request for creating or replacing an album
#[derive(Debug, Deserialize, Validate)]
pub struct AlbumRequest {
    #[validate(length(max = 200))]
    pub name: Option<String>,

    #[validate(length(max = 500))]
    pub image: Option<String>,

    pub release_date: Option<NaiveDate>,

    #[validate(length(max = 100))]
    pub category: Option<String>,

    /// Declared number of laminas in the album
    pub total_laminas: Option<i32>,

    #[validate(length(max = 1000))]
    pub description: Option<String>,
}

impl From<AlbumRequest> for AlbumDraft {
    fn from(req: AlbumRequest) -> Self {
        Self {
            name: req.name,
            image: req.image,
            release_date: req.release_date,
            category: req.category,
            total_laminas: req.total_laminas,
            description: req.description,
        }
    }
}

/// Query params for name search
#[derive(Debug, Deserialize)]
pub struct SearchAlbumsQuery {
    pub name: String,
}

/// Completion statistics DTO
#[derive(Debug, Serialize)]
pub struct StatisticsResponse {
    pub laminas_adquiridas: i64,
    pub laminas_faltantes: i64,
    pub porcentaje_completado: f64,
}

impl From<AlbumStatistics> for StatisticsResponse {
    fn from(s: AlbumStatistics) -> Self {
        Self {
            laminas_adquiridas: s.laminas_adquiridas,
            laminas_faltantes: s.laminas_faltantes,
            porcentaje_completado: s.porcentaje_completado,
        }
    }
}

/// Album response DTO, statistics inlined
#[derive(Debug, Serialize)]
pub struct AlbumResponse {
    pub id: i64,
    pub name: String,
    pub image: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub category: Option<String>,
    pub total_laminas: i32,
    pub description: Option<String>,
    #[serde(flatten)]
    pub statistics: StatisticsResponse,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<AlbumOverview> for AlbumResponse {
    fn from(o: AlbumOverview) -> Self {
        let a = o.album;
        Self {
            id: a.id,
            name: a.name,
            image: a.image,
            release_date: a.release_date,
            category: a.category,
            total_laminas: a.total_laminas,
            description: a.description,
            statistics: o.statistics.into(),
            created_at: a.created_at,
            updated_at: a.updated_at,
        }
    }
}

fn to_responses(overviews: Vec<AlbumOverview>) -> Vec<AlbumResponse> {
    overviews.into_iter().map(Into::into).collect()
}

/// List every album with its statistics
pub async fn list_albums(State(state): State<CollectionState>) -> Result<Json<Vec<AlbumResponse>>> {
    let albums = state.albums.list().await?;
    Ok(Json(to_responses(albums)))
}

/// Create a new album
pub async fn create_album(
    State(state): State<CollectionState>,
    ValidatedJson(req): ValidatedJson<AlbumRequest>,
) -> Result<(StatusCode, Json<AlbumResponse>)> {
    let created = state.albums.create(req.into()).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

/// Get a single album by ID
pub async fn get_album(
    State(state): State<CollectionState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<AlbumResponse>> {
    let album = state.albums.get(id).await?;
    Ok(Json(album.into()))
}

/// Replace all attributes of an album
pub async fn update_album(
    State(state): State<CollectionState>,
    ApiPath(id): ApiPath<i64>,
    ValidatedJson(req): ValidatedJson<AlbumRequest>,
) -> Result<Json<AlbumResponse>> {
    let updated = state.albums.update(id, req.into()).await?;
    Ok(Json(updated.into()))
}

/// Delete an album and its laminas
pub async fn delete_album(
    State(state): State<CollectionState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<StatusCode> {
    state.albums.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Case-insensitive search on album names
pub async fn search_albums(
    State(state): State<CollectionState>,
    ApiQuery(query): ApiQuery<SearchAlbumsQuery>,
) -> Result<Json<Vec<AlbumResponse>>> {
    let albums = state.albums.search_by_name(&query.name).await?;
    Ok(Json(to_responses(albums)))
}

/// Albums filed under a category
pub async fn list_albums_by_category(
    State(state): State<CollectionState>,
    ApiPath(category): ApiPath<String>,
) -> Result<Json<Vec<AlbumResponse>>> {
    let albums = state.albums.list_by_category(&category).await?;
    Ok(Json(to_responses(albums)))
}

/// Completion statistics for one album
pub async fn get_album_statistics(
    State(state): State<CollectionState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<StatisticsResponse>> {
    let stats = state.albums.statistics_for(id).await?;
    Ok(Json(stats.into()))
}
