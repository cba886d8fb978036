//! Sticker Ledger: laminas scoped to an album

use std::sync::Arc;

use laminas_common::{Error, Result};

use crate::domain::entities::{DuplicateLamina, Lamina, LaminaDraft, LaminaPatch, NewLamina};
use crate::repository::{AlbumRepository, CollectionRepositories, LaminaRepository};

/// Owns lamina entities and the per-album numbering invariant
#[derive(Clone)]
pub struct StickerLedger {
    albums: Arc<dyn AlbumRepository>,
    laminas: Arc<dyn LaminaRepository>,
}

impl StickerLedger {
    pub fn new(repos: &CollectionRepositories) -> Self {
        Self {
            albums: repos.albums.clone(),
            laminas: repos.laminas.clone(),
        }
    }

    pub async fn list_by_album(&self, album_id: i64) -> Result<Vec<Lamina>> {
        self.ensure_album_exists(album_id).await?;
        self.laminas.list_by_album(album_id).await
    }

    pub async fn get(&self, id: i64) -> Result<Lamina> {
        self.laminas
            .find(id)
            .await?
            .ok_or_else(|| lamina_not_found(id))
    }

    /// Create one lamina; its number must be free within the album
    pub async fn create(&self, album_id: i64, draft: LaminaDraft) -> Result<Lamina> {
        self.ensure_album_exists(album_id).await?;
        let new = NewLamina::new(album_id, draft)?;

        if self
            .laminas
            .find_by_number(album_id, new.numero)
            .await?
            .is_some()
        {
            tracing::warn!(album_id, numero = new.numero, "Rejected duplicate lamina number");
            return Err(duplicate_number(album_id, new.numero));
        }

        // The storage layer re-checks uniqueness on insert
        let created = self.laminas.create(&new).await?;
        tracing::info!(album_id, lamina_id = created.id, numero = created.numero, "Created lamina");
        Ok(created)
    }

    /// Create laminas for every number not yet in the album, in input order.
    /// Existing and repeated numbers are skipped; only new laminas are returned.
    pub async fn create_bulk(&self, album_id: i64, numeros: &[i32]) -> Result<Vec<Lamina>> {
        self.ensure_album_exists(album_id).await?;
        let batch = numeros
            .iter()
            .map(|numero| NewLamina::placeholder(album_id, *numero))
            .collect::<Result<Vec<_>>>()?;

        let created = self.laminas.create_many(&batch).await?;
        tracing::info!(
            album_id,
            requested = numeros.len(),
            created = created.len(),
            "Bulk-created laminas"
        );
        Ok(created)
    }

    /// Apply a partial update. A new numero must not belong to another lamina
    /// of the same album; keeping the current numero is always allowed.
    pub async fn update(&self, id: i64, patch: LaminaPatch) -> Result<Lamina> {
        let mut lamina = self.get(id).await?;
        if patch.is_empty() {
            tracing::debug!(lamina_id = id, "Empty lamina patch, nothing to write");
            return Ok(lamina);
        }

        if let Some(numero) = patch.numero.filter(|n| *n != lamina.numero) {
            if let Some(holder) = self.laminas.find_by_number(lamina.album_id, numero).await? {
                if holder.id != id {
                    tracing::warn!(
                        album_id = lamina.album_id,
                        lamina_id = id,
                        numero,
                        "Rejected renumbering onto a taken number"
                    );
                    return Err(duplicate_number(lamina.album_id, numero));
                }
            }
        }

        lamina.apply(patch)?;
        let saved = self
            .laminas
            .update(&lamina)
            .await?
            .ok_or_else(|| lamina_not_found(id))?;

        tracing::info!(lamina_id = id, "Updated lamina");
        Ok(saved)
    }

    /// Mark a lamina as owned. Marking an owned lamina again succeeds.
    pub async fn mark_acquired(&self, album_id: i64, numero: i32) -> Result<Lamina> {
        let lamina = self
            .laminas
            .mark_acquired(album_id, numero)
            .await?
            .ok_or_else(|| lamina_number_not_found(album_id, numero))?;

        tracing::info!(album_id, numero, "Marked lamina as acquired");
        Ok(lamina)
    }

    /// Record one duplicate copy; ownership is not required
    pub async fn add_duplicate(&self, album_id: i64, numero: i32) -> Result<Lamina> {
        let lamina = self
            .laminas
            .increment_duplicates(album_id, numero)
            .await?
            .ok_or_else(|| lamina_number_not_found(album_id, numero))?;

        tracing::info!(
            album_id,
            numero,
            cantidad_repetidas = lamina.cantidad_repetidas,
            "Added duplicate lamina"
        );
        Ok(lamina)
    }

    /// Soft removal: the lamina stays stored with `adquirida = false`
    pub async fn remove(&self, id: i64) -> Result<Lamina> {
        let lamina = self
            .laminas
            .reset_acquisition(id)
            .await?
            .ok_or_else(|| lamina_not_found(id))?;

        tracing::info!(lamina_id = id, "Reset lamina acquisition");
        Ok(lamina)
    }

    /// Laminas of the album that are not owned yet
    pub async fn missing(&self, album_id: i64) -> Result<Vec<Lamina>> {
        self.ensure_album_exists(album_id).await?;
        self.laminas.list_missing(album_id).await
    }

    /// Laminas of the album with at least one duplicate copy
    pub async fn duplicates(&self, album_id: i64) -> Result<Vec<DuplicateLamina>> {
        self.ensure_album_exists(album_id).await?;
        let laminas = self.laminas.list_duplicates(album_id, 0).await?;
        Ok(laminas.into_iter().map(DuplicateLamina::from).collect())
    }

    async fn ensure_album_exists(&self, album_id: i64) -> Result<()> {
        if !self.albums.exists(album_id).await? {
            return Err(Error::NotFound(format!("Album {} not found", album_id)));
        }
        Ok(())
    }
}

fn lamina_not_found(id: i64) -> Error {
    Error::NotFound(format!("Lamina {} not found", id))
}

fn lamina_number_not_found(album_id: i64, numero: i32) -> Error {
    Error::NotFound(format!(
        "Lamina {} not found in album {}",
        numero, album_id
    ))
}

fn duplicate_number(album_id: i64, numero: i32) -> Error {
    Error::DuplicateNumber(format!(
        "Lamina {} already exists in album {}",
        numero, album_id
    ))
}
