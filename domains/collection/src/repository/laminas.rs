//! Lamina repository

use std::collections::HashMap;

use super::transactions::insert_lamina_if_absent_tx;
use super::LaminaRepository;
use crate::domain::entities::{duplicate_count_overflow, Lamina, NewLamina};
use crate::domain::statistics::LaminaTally;
use laminas_common::db::{is_numeric_overflow, map_write_error};
use laminas_common::Result;
use sqlx::PgPool;

/// Columns for SELECT and RETURNING clauses. Legacy rows may hold a NULL
/// duplicate count, which reads as 0.
pub(crate) const LAMINA_COLUMNS: &str = "\
    id, album_id, numero, name, image, adquirida, \
    COALESCE(cantidad_repetidas, 0) AS cantidad_repetidas, \
    created_at, updated_at";

#[derive(Clone)]
pub struct PgLaminaRepository {
    pool: PgPool,
}

impl PgLaminaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct AlbumTallyRow {
    album_id: i64,
    total: i64,
    adquiridas: i64,
}

#[async_trait::async_trait]
impl LaminaRepository for PgLaminaRepository {
    async fn list_by_album(&self, album_id: i64) -> Result<Vec<Lamina>> {
        let query = format!(
            "SELECT {LAMINA_COLUMNS} FROM laminas WHERE album_id = $1 ORDER BY numero, id"
        );
        let laminas = sqlx::query_as::<_, Lamina>(&query)
            .bind(album_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(laminas)
    }

    async fn tally(&self, album_id: i64) -> Result<LaminaTally> {
        let tally = sqlx::query_as::<_, LaminaTally>(
            r#"
            SELECT COUNT(*) AS total,
                   COUNT(*) FILTER (WHERE adquirida) AS adquiridas
            FROM laminas
            WHERE album_id = $1
            "#,
        )
        .bind(album_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(tally)
    }

    async fn tally_many(&self, album_ids: &[i64]) -> Result<HashMap<i64, LaminaTally>> {
        if album_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = sqlx::query_as::<_, AlbumTallyRow>(
            r#"
            SELECT album_id,
                   COUNT(*) AS total,
                   COUNT(*) FILTER (WHERE adquirida) AS adquiridas
            FROM laminas
            WHERE album_id = ANY($1)
            GROUP BY album_id
            "#,
        )
        .bind(album_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| {
                (
                    r.album_id,
                    LaminaTally {
                        total: r.total,
                        adquiridas: r.adquiridas,
                    },
                )
            })
            .collect())
    }

    async fn find(&self, id: i64) -> Result<Option<Lamina>> {
        let query = format!("SELECT {LAMINA_COLUMNS} FROM laminas WHERE id = $1");
        let lamina = sqlx::query_as::<_, Lamina>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(lamina)
    }

    async fn find_by_number(&self, album_id: i64, numero: i32) -> Result<Option<Lamina>> {
        let query =
            format!("SELECT {LAMINA_COLUMNS} FROM laminas WHERE album_id = $1 AND numero = $2");
        let lamina = sqlx::query_as::<_, Lamina>(&query)
            .bind(album_id)
            .bind(numero)
            .fetch_optional(&self.pool)
            .await?;

        Ok(lamina)
    }

    async fn create(&self, lamina: &NewLamina) -> Result<Lamina> {
        let query = format!(
            "INSERT INTO laminas (album_id, numero, name, image, adquirida, cantidad_repetidas) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {LAMINA_COLUMNS}"
        );
        let created = sqlx::query_as::<_, Lamina>(&query)
            .bind(lamina.album_id)
            .bind(lamina.numero)
            .bind(&lamina.name)
            .bind(&lamina.image)
            .bind(lamina.adquirida)
            .bind(lamina.cantidad_repetidas)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                map_write_error(
                    e,
                    || duplicate_message(lamina.album_id, lamina.numero),
                    || album_missing_message(lamina.album_id),
                )
            })?;

        Ok(created)
    }

    async fn create_many(&self, laminas: &[NewLamina]) -> Result<Vec<Lamina>> {
        let mut tx = self.pool.begin().await?;
        let mut created = Vec::with_capacity(laminas.len());

        for lamina in laminas {
            let inserted = insert_lamina_if_absent_tx(&mut tx, lamina)
                .await
                .map_err(|e| {
                    map_write_error(
                        e,
                        || duplicate_message(lamina.album_id, lamina.numero),
                        || album_missing_message(lamina.album_id),
                    )
                })?;
            match inserted {
                Some(row) => created.push(row),
                None => tracing::debug!(
                    album_id = lamina.album_id,
                    numero = lamina.numero,
                    "Skipping existing lamina in bulk insert"
                ),
            }
        }

        tx.commit().await?;
        Ok(created)
    }

    async fn update(&self, lamina: &Lamina) -> Result<Option<Lamina>> {
        let query = format!(
            "UPDATE laminas SET \
                numero = $2, name = $3, image = $4, adquirida = $5, \
                cantidad_repetidas = $6, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {LAMINA_COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Lamina>(&query)
            .bind(lamina.id)
            .bind(lamina.numero)
            .bind(&lamina.name)
            .bind(&lamina.image)
            .bind(lamina.adquirida)
            .bind(lamina.cantidad_repetidas)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                map_write_error(
                    e,
                    || duplicate_message(lamina.album_id, lamina.numero),
                    || album_missing_message(lamina.album_id),
                )
            })?;

        Ok(updated)
    }

    async fn mark_acquired(&self, album_id: i64, numero: i32) -> Result<Option<Lamina>> {
        let query = format!(
            "UPDATE laminas SET adquirida = TRUE, updated_at = NOW() \
             WHERE album_id = $1 AND numero = $2 \
             RETURNING {LAMINA_COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Lamina>(&query)
            .bind(album_id)
            .bind(numero)
            .fetch_optional(&self.pool)
            .await?;

        Ok(updated)
    }

    async fn increment_duplicates(&self, album_id: i64, numero: i32) -> Result<Option<Lamina>> {
        let query = format!(
            "UPDATE laminas SET \
                cantidad_repetidas = COALESCE(cantidad_repetidas, 0) + 1, \
                updated_at = NOW() \
             WHERE album_id = $1 AND numero = $2 \
             RETURNING {LAMINA_COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Lamina>(&query)
            .bind(album_id)
            .bind(numero)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                if is_numeric_overflow(&e) {
                    duplicate_count_overflow()
                } else {
                    e.into()
                }
            })?;

        Ok(updated)
    }

    async fn reset_acquisition(&self, id: i64) -> Result<Option<Lamina>> {
        let query = format!(
            "UPDATE laminas SET adquirida = FALSE, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {LAMINA_COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Lamina>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(updated)
    }

    async fn list_missing(&self, album_id: i64) -> Result<Vec<Lamina>> {
        let query = format!(
            "SELECT {LAMINA_COLUMNS} FROM laminas \
             WHERE album_id = $1 AND adquirida = FALSE \
             ORDER BY numero, id"
        );
        let laminas = sqlx::query_as::<_, Lamina>(&query)
            .bind(album_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(laminas)
    }

    async fn list_duplicates(&self, album_id: i64, greater_than: i32) -> Result<Vec<Lamina>> {
        let query = format!(
            "SELECT {LAMINA_COLUMNS} FROM laminas \
             WHERE album_id = $1 AND COALESCE(cantidad_repetidas, 0) > $2 \
             ORDER BY numero, id"
        );
        let laminas = sqlx::query_as::<_, Lamina>(&query)
            .bind(album_id)
            .bind(greater_than)
            .fetch_all(&self.pool)
            .await?;

        Ok(laminas)
    }
}

fn duplicate_message(album_id: i64, numero: i32) -> String {
    format!("Lamina {} already exists in album {}", numero, album_id)
}

fn album_missing_message(album_id: i64) -> String {
    format!("Album {} not found", album_id)
}
