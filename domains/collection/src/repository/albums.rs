//! Album repository

use super::transactions::{delete_album_tx, delete_laminas_for_album_tx};
use super::AlbumRepository;
use crate::domain::entities::{Album, AlbumFields};
use laminas_common::Result;
use sqlx::PgPool;

/// All columns in the albums table, used for SELECT and RETURNING clauses.
const ALBUM_COLUMNS: &str = "\
    id, name, image, release_date, category, \
    total_laminas, description, created_at, updated_at";

#[derive(Clone)]
pub struct PgAlbumRepository {
    pool: PgPool,
}

impl PgAlbumRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl AlbumRepository for PgAlbumRepository {
    async fn find_all(&self) -> Result<Vec<Album>> {
        let query = format!("SELECT {ALBUM_COLUMNS} FROM albums ORDER BY id");
        let albums = sqlx::query_as::<_, Album>(&query)
            .fetch_all(&self.pool)
            .await?;

        Ok(albums)
    }

    async fn find(&self, id: i64) -> Result<Option<Album>> {
        let query = format!("SELECT {ALBUM_COLUMNS} FROM albums WHERE id = $1");
        let album = sqlx::query_as::<_, Album>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(album)
    }

    async fn exists(&self, id: i64) -> Result<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM albums WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn create(&self, fields: &AlbumFields) -> Result<Album> {
        let query = format!(
            "INSERT INTO albums (name, image, release_date, category, total_laminas, description) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {ALBUM_COLUMNS}"
        );
        let created = sqlx::query_as::<_, Album>(&query)
            .bind(&fields.name)
            .bind(&fields.image)
            .bind(fields.release_date)
            .bind(&fields.category)
            .bind(fields.total_laminas)
            .bind(&fields.description)
            .fetch_one(&self.pool)
            .await?;

        Ok(created)
    }

    async fn update(&self, id: i64, fields: &AlbumFields) -> Result<Option<Album>> {
        let query = format!(
            "UPDATE albums SET \
                name = $2, image = $3, release_date = $4, category = $5, \
                total_laminas = $6, description = $7, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {ALBUM_COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Album>(&query)
            .bind(id)
            .bind(&fields.name)
            .bind(&fields.image)
            .bind(fields.release_date)
            .bind(&fields.category)
            .bind(fields.total_laminas)
            .bind(&fields.description)
            .fetch_optional(&self.pool)
            .await?;

        Ok(updated)
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        let removed_laminas = delete_laminas_for_album_tx(&mut tx, id).await?;
        let deleted = delete_album_tx(&mut tx, id).await?;
        if !deleted {
            tx.rollback().await?;
            return Ok(false);
        }

        tx.commit().await?;
        tracing::debug!(album_id = id, removed_laminas, "Deleted album with its laminas");
        Ok(true)
    }

    async fn search_by_name(&self, fragment: &str) -> Result<Vec<Album>> {
        // strpos keeps `%` and `_` in the fragment literal, unlike ILIKE
        let query = format!(
            "SELECT {ALBUM_COLUMNS} FROM albums \
             WHERE strpos(lower(name), lower($1)) > 0 \
             ORDER BY id"
        );
        let albums = sqlx::query_as::<_, Album>(&query)
            .bind(fragment)
            .fetch_all(&self.pool)
            .await?;

        Ok(albums)
    }

    async fn find_by_category(&self, category: &str) -> Result<Vec<Album>> {
        let query = format!("SELECT {ALBUM_COLUMNS} FROM albums WHERE category = $1 ORDER BY id");
        let albums = sqlx::query_as::<_, Album>(&query)
            .bind(category)
            .fetch_all(&self.pool)
            .await?;

        Ok(albums)
    }
}
