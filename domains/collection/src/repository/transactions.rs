//! Transaction helpers for the Collection domain

use super::laminas::LAMINA_COLUMNS;
use crate::domain::entities::{Lamina, NewLamina};
use sqlx::{Postgres, Transaction};

/// Insert a lamina unless its `(album_id, numero)` is already taken.
/// `ON CONFLICT DO NOTHING` re-checks uniqueness at insert time, so a
/// concurrent insert of the same number is skipped instead of failing.
pub async fn insert_lamina_if_absent_tx(
    tx: &mut Transaction<'_, Postgres>,
    lamina: &NewLamina,
) -> Result<Option<Lamina>, sqlx::Error> {
    let query = format!(
        "INSERT INTO laminas (album_id, numero, name, image, adquirida, cantidad_repetidas) \
         VALUES ($1, $2, $3, $4, $5, $6) \
         ON CONFLICT (album_id, numero) DO NOTHING \
         RETURNING {LAMINA_COLUMNS}"
    );
    let row = sqlx::query_as::<_, Lamina>(&query)
        .bind(lamina.album_id)
        .bind(lamina.numero)
        .bind(&lamina.name)
        .bind(&lamina.image)
        .bind(lamina.adquirida)
        .bind(lamina.cantidad_repetidas)
        .fetch_optional(&mut **tx)
        .await?;
    Ok(row)
}

/// Delete every lamina owned by an album within a transaction
pub async fn delete_laminas_for_album_tx(
    tx: &mut Transaction<'_, Postgres>,
    album_id: i64,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM laminas WHERE album_id = $1")
        .bind(album_id)
        .execute(&mut **tx)
        .await?;
    Ok(result.rows_affected())
}

/// Delete an album row within a transaction
pub async fn delete_album_tx(
    tx: &mut Transaction<'_, Postgres>,
    album_id: i64,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM albums WHERE id = $1")
        .bind(album_id)
        .execute(&mut **tx)
        .await?;
    Ok(result.rows_affected() > 0)
}
