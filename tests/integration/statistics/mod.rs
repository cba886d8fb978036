//! Completion statistics integration tests

use axum::http::StatusCode;

use crate::common::TestApp;

#[tokio::test]
async fn test_statistics_through_an_album_lifecycle() {
    let app = TestApp::new().await.unwrap();
    let album_id = app.create_album("Mundial", 3).await;
    let uri = format!("/v1/albums/{album_id}/statistics");

    let (status, stats) = app.get(&uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["laminas_adquiridas"], 0);
    assert_eq!(stats["laminas_faltantes"], 3);
    assert_eq!(stats["porcentaje_completado"], 0.0);

    app.bulk_laminas(album_id, &[1, 2, 3]).await;
    app.acquire(album_id, 1).await;
    app.acquire(album_id, 2).await;

    let (_, stats) = app.get(&uri).await;
    assert_eq!(stats["laminas_adquiridas"], 2);
    assert_eq!(stats["laminas_faltantes"], 1);
    assert_eq!(stats["porcentaje_completado"], 66.67);

    app.acquire(album_id, 3).await;
    let (_, stats) = app.get(&uri).await;
    assert_eq!(stats["laminas_faltantes"], 0);
    assert_eq!(stats["porcentaje_completado"], 100.0);
}

#[tokio::test]
async fn test_every_view_uses_the_declared_total() {
    let app = TestApp::new().await.unwrap();
    let album_id = app.create_album("Mundial", 8).await;
    app.bulk_laminas(album_id, &[1, 2]).await;
    app.acquire(album_id, 1).await;

    let (_, single) = app.get(&format!("/v1/albums/{album_id}")).await;
    let (_, listed) = app.get("/v1/albums").await;
    let (_, found) = app.get("/v1/albums/search?name=mundial").await;
    let (_, stats) = app
        .get(&format!("/v1/albums/{album_id}/statistics"))
        .await;

    for view in [&single, &listed[0], &found[0], &stats] {
        assert_eq!(view["laminas_adquiridas"], 1);
        assert_eq!(view["laminas_faltantes"], 7);
        assert_eq!(view["porcentaje_completado"], 12.5);
    }
}

#[tokio::test]
async fn test_statistics_for_missing_album_returns_404() {
    let app = TestApp::new().await.unwrap();

    let (status, _) = app.get("/v1/albums/12/statistics").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_acquired_plus_missing_equals_declared_total() {
    let app = TestApp::new().await.unwrap();
    let small = app.create_album("Pequeno", 2).await;
    let large = app.create_album("Grande", 50).await;
    app.bulk_laminas(small, &[1, 2, 3]).await;
    app.bulk_laminas(large, &[1, 2, 3]).await;
    for numero in 1..=3 {
        app.acquire(small, numero).await;
    }
    app.acquire(large, 2).await;

    let (_, albums) = app.get("/v1/albums").await;
    for album in albums.as_array().unwrap() {
        let acquired = album["laminas_adquiridas"].as_i64().unwrap();
        let missing = album["laminas_faltantes"].as_i64().unwrap();
        assert_eq!(acquired + missing, album["total_laminas"].as_i64().unwrap());
    }
}
