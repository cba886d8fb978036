//! Album handler integration tests

use axum::http::{Method, StatusCode};
use serde_json::json;

use crate::common::{assert_error, TestApp};

mod test_create_album {
    use super::*;

    #[tokio::test]
    async fn test_create_album_returns_201_with_empty_statistics() {
        let app = TestApp::new().await.unwrap();

        let (status, body) = app
            .request(
                Method::POST,
                "/v1/albums",
                Some(json!({
                    "name": "Mundial 2022",
                    "image": "mundial.png",
                    "release_date": "2022-08-20",
                    "category": "deportes",
                    "total_laminas": 670,
                    "description": "Qatar"
                })),
            )
            .await;

        assert_eq!(status, StatusCode::CREATED);
        assert!(body["id"].as_i64().is_some());
        assert_eq!(body["name"], "Mundial 2022");
        assert_eq!(body["release_date"], "2022-08-20");
        assert_eq!(body["total_laminas"], 670);
        assert_eq!(body["laminas_adquiridas"], 0);
        assert_eq!(body["laminas_faltantes"], 670);
        assert_eq!(body["porcentaje_completado"], 0.0);
    }

    #[tokio::test]
    async fn test_create_album_does_not_create_laminas() {
        let app = TestApp::new().await.unwrap();
        let id = app.create_album("Mundial", 10).await;

        let (status, body) = app.get(&format!("/v1/albums/{id}/laminas")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_album_missing_name_returns_400() {
        let app = TestApp::new().await.unwrap();

        let (status, body) = app
            .request(Method::POST, "/v1/albums", Some(json!({"total_laminas": 5})))
            .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_error(&body, "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_create_album_non_positive_total_returns_400() {
        let app = TestApp::new().await.unwrap();

        for total in [0, -3] {
            let (status, body) = app
                .request(
                    Method::POST,
                    "/v1/albums",
                    Some(json!({"name": "Mundial", "total_laminas": total})),
                )
                .await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_error(&body, "VALIDATION_ERROR");
        }

        let (_, list) = app.get("/v1/albums").await;
        assert!(list.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_album_malformed_json_returns_400() {
        let app = TestApp::new().await.unwrap();

        let (status, body) = app
            .request(
                Method::POST,
                "/v1/albums",
                Some(json!({"name": "Mundial", "total_laminas": "many"})),
            )
            .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_error(&body, "VALIDATION_ERROR");
    }
}

mod test_read_albums {
    use super::*;

    #[tokio::test]
    async fn test_get_album_not_found() {
        let app = TestApp::new().await.unwrap();

        let (status, body) = app.get("/v1/albums/999").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_error(&body, "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_non_numeric_album_id_returns_json_400() {
        let app = TestApp::new().await.unwrap();

        for uri in ["/v1/albums/abc", "/v1/albums/abc/statistics", "/v1/laminas/x1"] {
            let (status, body) = app.get(uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "GET {uri}");
            assert_error(&body, "VALIDATION_ERROR");
        }
    }

    #[tokio::test]
    async fn test_search_without_name_returns_json_400() {
        let app = TestApp::new().await.unwrap();
        app.create_album("Mundial", 3).await;

        let (status, body) = app.get("/v1/albums/search").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_error(&body, "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_list_albums_in_creation_order() {
        let app = TestApp::new().await.unwrap();
        let first = app.create_album("Primero", 3).await;
        let second = app.create_album("Segundo", 4).await;

        let (status, body) = app.get("/v1/albums").await;
        assert_eq!(status, StatusCode::OK);

        let albums = body.as_array().unwrap();
        assert_eq!(albums.len(), 2);
        assert_eq!(albums[0]["id"], first);
        assert_eq!(albums[1]["id"], second);
        assert_eq!(albums[1]["laminas_faltantes"], 4);
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_substring() {
        let app = TestApp::new().await.unwrap();
        app.create_album("Copa Mundial", 3).await;
        app.create_album("Animales del Mundo", 3).await;
        app.create_album("Dinosaurios", 3).await;

        let (status, body) = app.get("/v1/albums/search?name=MUND").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 2);

        let (status, body) = app.get("/v1/albums/search?name=dragon").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_by_category() {
        let app = TestApp::new().await.unwrap();
        app.request(
            Method::POST,
            "/v1/albums",
            Some(json!({"name": "Mundial", "total_laminas": 3, "category": "deportes"})),
        )
        .await;
        app.create_album("Sin categoria", 3).await;

        let (status, body) = app.get("/v1/albums/category/deportes").await;
        assert_eq!(status, StatusCode::OK);
        let albums = body.as_array().unwrap();
        assert_eq!(albums.len(), 1);
        assert_eq!(albums[0]["name"], "Mundial");

        let (_, body) = app.get("/v1/albums/category/musica").await;
        assert!(body.as_array().unwrap().is_empty());
    }
}

mod test_update_album {
    use super::*;

    #[tokio::test]
    async fn test_update_replaces_all_fields() {
        let app = TestApp::new().await.unwrap();
        let (_, created) = app
            .request(
                Method::POST,
                "/v1/albums",
                Some(json!({"name": "Mundial", "total_laminas": 3, "category": "deportes"})),
            )
            .await;
        let id = created["id"].as_i64().unwrap();

        let (status, body) = app
            .request(
                Method::PUT,
                &format!("/v1/albums/{id}"),
                Some(json!({"name": "Mundial 2026", "total_laminas": 980})),
            )
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], id);
        assert_eq!(body["name"], "Mundial 2026");
        assert_eq!(body["total_laminas"], 980);
        assert!(body["category"].is_null());
        assert_eq!(body["laminas_faltantes"], 980);
    }

    #[tokio::test]
    async fn test_update_validates_like_create() {
        let app = TestApp::new().await.unwrap();
        let id = app.create_album("Mundial", 3).await;

        let (status, body) = app
            .request(
                Method::PUT,
                &format!("/v1/albums/{id}"),
                Some(json!({"name": "  ", "total_laminas": 3})),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_error(&body, "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_update_missing_album_returns_404() {
        let app = TestApp::new().await.unwrap();

        let (status, body) = app
            .request(
                Method::PUT,
                "/v1/albums/77",
                Some(json!({"name": "Mundial", "total_laminas": 3})),
            )
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_error(&body, "NOT_FOUND");
    }
}

mod test_delete_album {
    use super::*;

    #[tokio::test]
    async fn test_delete_album_cascades_to_laminas() {
        let app = TestApp::new().await.unwrap();
        let id = app.create_album("Mundial", 3).await;
        app.bulk_laminas(id, &[1, 2, 3]).await;
        let (_, laminas) = app.get(&format!("/v1/albums/{id}/laminas")).await;
        let lamina_id = laminas[0]["id"].as_i64().unwrap();

        let (status, body) = app
            .request(Method::DELETE, &format!("/v1/albums/{id}"), None)
            .await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(body.is_null());

        let (status, _) = app.get(&format!("/v1/albums/{id}")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = app.get(&format!("/v1/laminas/{lamina_id}")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_missing_album_returns_404() {
        let app = TestApp::new().await.unwrap();

        let (status, body) = app.request(Method::DELETE, "/v1/albums/5", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_error(&body, "NOT_FOUND");
    }
}
