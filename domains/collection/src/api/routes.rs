//! Route definitions for Collection domain API

use axum::{
    routing::{get, patch, post},
    Router,
};

use super::handlers::{albums, laminas};
use super::middleware::CollectionState;

/// Create album routes
fn album_routes() -> Router<CollectionState> {
    Router::new()
        .route(
            "/v1/albums",
            get(albums::list_albums).post(albums::create_album),
        )
        .route("/v1/albums/search", get(albums::search_albums))
        .route(
            "/v1/albums/category/{category}",
            get(albums::list_albums_by_category),
        )
        .route(
            "/v1/albums/{id}",
            get(albums::get_album)
                .put(albums::update_album)
                .delete(albums::delete_album),
        )
        .route(
            "/v1/albums/{id}/statistics",
            get(albums::get_album_statistics),
        )
}

/// Create lamina routes scoped to an album
fn album_lamina_routes() -> Router<CollectionState> {
    Router::new()
        .route(
            "/v1/albums/{id}/laminas",
            get(laminas::list_laminas).post(laminas::create_lamina),
        )
        .route(
            "/v1/albums/{id}/laminas/bulk",
            post(laminas::create_laminas_bulk),
        )
        .route("/v1/albums/{id}/laminas/missing", get(laminas::list_missing))
        .route(
            "/v1/albums/{id}/laminas/duplicates",
            get(laminas::list_duplicates),
        )
        .route(
            "/v1/albums/{id}/laminas/{numero}/acquire",
            patch(laminas::acquire_lamina),
        )
        .route(
            "/v1/albums/{id}/laminas/{numero}/duplicate",
            patch(laminas::add_duplicate),
        )
}

/// Create lamina routes addressed by lamina ID
fn lamina_routes() -> Router<CollectionState> {
    Router::new().route(
        "/v1/laminas/{id}",
        get(laminas::get_lamina)
            .patch(laminas::update_lamina)
            .delete(laminas::remove_lamina),
    )
}

/// Create all Collection domain API routes
pub fn routes() -> Router<CollectionState> {
    Router::new()
        .merge(album_routes())
        .merge(album_lamina_routes())
        .merge(lamina_routes())
}
