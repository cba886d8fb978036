//! Postgres repository integration tests
//!
//! Run against the database named by `TEST_DATABASE_URL`; every test
//! returns early when it is unset. Each test works inside its own album
//! and deletes it afterwards.

use laminas_collection::{
    AlbumDraft, AlbumRepository, CollectionRepositories, Lamina, LaminaDraft, LaminaRepository,
    NewLamina,
};
use laminas_common::Error;
use serial_test::serial;
use sqlx::PgPool;

struct PgTestContext {
    pool: PgPool,
    repos: CollectionRepositories,
    album_id: i64,
}

impl PgTestContext {
    /// Connect, migrate and create a scratch album, or `None` without a database
    async fn new(album_name: &str) -> Option<Self> {
        let url = std::env::var("TEST_DATABASE_URL").ok()?;
        let pool = PgPool::connect(&url).await.unwrap();
        sqlx::migrate!("../../migrations").run(&pool).await.unwrap();

        let repos = CollectionRepositories::postgres(pool.clone());
        let fields = AlbumDraft {
            name: Some(album_name.to_string()),
            total_laminas: Some(10),
            ..Default::default()
        }
        .validate()
        .unwrap();
        let album = repos.albums.create(&fields).await.unwrap();

        Some(Self {
            pool,
            repos,
            album_id: album.id,
        })
    }

    async fn create(&self, numero: i32) -> Lamina {
        let draft = LaminaDraft {
            numero,
            ..Default::default()
        };
        self.repos
            .laminas
            .create(&NewLamina::new(self.album_id, draft).unwrap())
            .await
            .unwrap()
    }

    async fn lamina_rows(&self) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM laminas WHERE album_id = $1")
            .bind(self.album_id)
            .fetch_one(&self.pool)
            .await
            .unwrap()
    }

    async fn cleanup(self) {
        self.repos.albums.delete(self.album_id).await.unwrap();
    }
}

#[tokio::test]
#[serial]
async fn test_null_duplicate_count_reads_as_zero_and_increments_to_one() {
    let Some(ctx) = PgTestContext::new("Legado").await else {
        return;
    };
    sqlx::query(
        "INSERT INTO laminas (album_id, numero, cantidad_repetidas) VALUES ($1, 4, NULL)",
    )
    .bind(ctx.album_id)
    .execute(&ctx.pool)
    .await
    .unwrap();

    let stored = ctx
        .repos
        .laminas
        .find_by_number(ctx.album_id, 4)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.cantidad_repetidas, 0);
    assert!(!stored.adquirida);

    let bumped = ctx
        .repos
        .laminas
        .increment_duplicates(ctx.album_id, 4)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(bumped.cantidad_repetidas, 1);

    ctx.cleanup().await;
}

#[tokio::test]
#[serial]
async fn test_create_many_skips_existing_and_repeated_numbers() {
    let Some(ctx) = PgTestContext::new("Bulk").await else {
        return;
    };
    ctx.create(2).await;

    let batch: Vec<NewLamina> = [1, 2, 2, 3]
        .into_iter()
        .map(|numero| NewLamina::placeholder(ctx.album_id, numero))
        .collect::<Result<_, _>>()
        .unwrap();
    let created = ctx.repos.laminas.create_many(&batch).await.unwrap();

    let numbers: Vec<i32> = created.iter().map(|l| l.numero).collect();
    assert_eq!(numbers, vec![1, 3]);
    assert_eq!(ctx.lamina_rows().await, 3);

    ctx.cleanup().await;
}

#[tokio::test]
#[serial]
async fn test_duplicate_create_is_duplicate_number() {
    let Some(ctx) = PgTestContext::new("Unicas").await else {
        return;
    };
    ctx.create(5).await;

    let draft = LaminaDraft {
        numero: 5,
        ..Default::default()
    };
    let err = ctx
        .repos
        .laminas
        .create(&NewLamina::new(ctx.album_id, draft).unwrap())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::DuplicateNumber(_)), "got {err:?}");
    assert_eq!(ctx.lamina_rows().await, 1);

    ctx.cleanup().await;
}

#[tokio::test]
#[serial]
async fn test_renumbering_onto_taken_number_is_duplicate_number() {
    let Some(ctx) = PgTestContext::new("Renumerar").await else {
        return;
    };
    let mut first = ctx.create(1).await;
    ctx.create(2).await;

    first.numero = 2;
    let err = ctx.repos.laminas.update(&first).await.unwrap_err();
    assert!(matches!(err, Error::DuplicateNumber(_)), "got {err:?}");

    first.numero = 7;
    let moved = ctx.repos.laminas.update(&first).await.unwrap().unwrap();
    assert_eq!(moved.numero, 7);

    ctx.cleanup().await;
}

#[tokio::test]
#[serial]
async fn test_increment_at_limit_is_a_validation_error() {
    let Some(ctx) = PgTestContext::new("Limite").await else {
        return;
    };
    let lamina = ctx.create(9).await;
    sqlx::query("UPDATE laminas SET cantidad_repetidas = $2 WHERE id = $1")
        .bind(lamina.id)
        .bind(i32::MAX)
        .execute(&ctx.pool)
        .await
        .unwrap();

    let err = ctx
        .repos
        .laminas
        .increment_duplicates(ctx.album_id, 9)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)), "got {err:?}");

    let stored = ctx.repos.laminas.find(lamina.id).await.unwrap().unwrap();
    assert_eq!(stored.cantidad_repetidas, i32::MAX);

    ctx.cleanup().await;
}

#[tokio::test]
#[serial]
async fn test_delete_album_removes_its_laminas() {
    let Some(ctx) = PgTestContext::new("Borrar").await else {
        return;
    };
    let lamina = ctx.create(1).await;
    ctx.create(2).await;
    assert_eq!(ctx.lamina_rows().await, 2);

    assert!(ctx.repos.albums.delete(ctx.album_id).await.unwrap());

    assert_eq!(ctx.lamina_rows().await, 0);
    assert!(ctx.repos.laminas.find(lamina.id).await.unwrap().is_none());
    assert!(ctx.repos.albums.find(ctx.album_id).await.unwrap().is_none());
    assert!(!ctx.repos.albums.delete(ctx.album_id).await.unwrap());
}
