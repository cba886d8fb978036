//! Album Manager: album lifecycle and completion statistics

use std::sync::Arc;

use laminas_common::{Error, Result};

use crate::domain::entities::{Album, AlbumDraft};
use crate::domain::statistics::{AlbumOverview, AlbumStatistics};
use crate::repository::{AlbumRepository, CollectionRepositories, LaminaRepository};

/// Owns album entities. Reads lamina tallies for statistics, never mutates laminas.
#[derive(Clone)]
pub struct AlbumManager {
    albums: Arc<dyn AlbumRepository>,
    laminas: Arc<dyn LaminaRepository>,
}

impl AlbumManager {
    pub fn new(repos: &CollectionRepositories) -> Self {
        Self {
            albums: repos.albums.clone(),
            laminas: repos.laminas.clone(),
        }
    }

    /// All albums with statistics
    pub async fn list(&self) -> Result<Vec<AlbumOverview>> {
        let albums = self.albums.find_all().await?;
        self.with_statistics(albums).await
    }

    pub async fn get(&self, id: i64) -> Result<AlbumOverview> {
        let album = self.find_album(id).await?;
        let tally = self.laminas.tally(album.id).await?;
        Ok(AlbumOverview::new(album, &tally))
    }

    /// Create an album with no laminas; laminas are added through the ledger
    pub async fn create(&self, draft: AlbumDraft) -> Result<AlbumOverview> {
        let fields = draft.validate()?;
        let album = self.albums.create(&fields).await?;

        tracing::info!(
            album_id = album.id,
            total_laminas = album.total_laminas,
            "Created album"
        );
        Ok(AlbumOverview::new(album, &Default::default()))
    }

    /// Replace every mutable attribute of an album; its laminas are untouched
    pub async fn update(&self, id: i64, draft: AlbumDraft) -> Result<AlbumOverview> {
        let fields = draft.validate()?;
        let album = self
            .albums
            .update(id, &fields)
            .await?
            .ok_or_else(|| album_not_found(id))?;

        tracing::info!(album_id = id, "Updated album");
        let tally = self.laminas.tally(album.id).await?;
        Ok(AlbumOverview::new(album, &tally))
    }

    /// Delete an album together with all its laminas
    pub async fn delete(&self, id: i64) -> Result<()> {
        if !self.albums.delete(id).await? {
            return Err(album_not_found(id));
        }

        tracing::info!(album_id = id, "Deleted album");
        Ok(())
    }

    /// Case-insensitive substring search on album names. No match is an empty list.
    pub async fn search_by_name(&self, fragment: &str) -> Result<Vec<AlbumOverview>> {
        let albums = self.albums.search_by_name(fragment).await?;
        tracing::debug!(fragment, matches = albums.len(), "Searched albums by name");
        self.with_statistics(albums).await
    }

    /// Albums filed under a category label
    pub async fn list_by_category(&self, category: &str) -> Result<Vec<AlbumOverview>> {
        let albums = self.albums.find_by_category(category).await?;
        self.with_statistics(albums).await
    }

    pub async fn statistics_for(&self, id: i64) -> Result<AlbumStatistics> {
        Ok(self.get(id).await?.statistics)
    }

    async fn find_album(&self, id: i64) -> Result<Album> {
        self.albums
            .find(id)
            .await?
            .ok_or_else(|| album_not_found(id))
    }

    async fn with_statistics(&self, albums: Vec<Album>) -> Result<Vec<AlbumOverview>> {
        let ids: Vec<i64> = albums.iter().map(|a| a.id).collect();
        let tallies = self.laminas.tally_many(&ids).await?;

        Ok(albums
            .into_iter()
            .map(|album| {
                let tally = tallies.get(&album.id).copied().unwrap_or_default();
                AlbumOverview::new(album, &tally)
            })
            .collect())
    }
}

fn album_not_found(id: i64) -> Error {
    Error::NotFound(format!("Album {} not found", id))
}
