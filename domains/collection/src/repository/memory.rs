//! In-memory collection store
//!
//! Implements both repository traits over one mutex-guarded state, so every
//! check-then-write sequence (uniqueness checks, cascading deletes, bulk
//! inserts) is serialized the same way a database transaction would be.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use laminas_common::{Error, Result};

use super::{AlbumRepository, LaminaRepository};
use crate::domain::entities::{Album, AlbumFields, Lamina, NewLamina};
use crate::domain::statistics::LaminaTally;

#[derive(Debug, Default)]
struct StoreState {
    last_album_id: i64,
    last_lamina_id: i64,
    albums: BTreeMap<i64, Album>,
    laminas: BTreeMap<i64, Lamina>,
}

impl StoreState {
    fn number_taken(&self, album_id: i64, numero: i32, except: Option<i64>) -> bool {
        self.laminas
            .values()
            .any(|l| l.album_id == album_id && l.numero == numero && Some(l.id) != except)
    }

    fn find_by_number_mut(&mut self, album_id: i64, numero: i32) -> Option<&mut Lamina> {
        self.laminas
            .values_mut()
            .find(|l| l.album_id == album_id && l.numero == numero)
    }

    fn album_laminas(&self, album_id: i64, filter: impl Fn(&Lamina) -> bool) -> Vec<Lamina> {
        let mut laminas: Vec<Lamina> = self
            .laminas
            .values()
            .filter(|l| l.album_id == album_id && filter(l))
            .cloned()
            .collect();
        laminas.sort_by_key(|l| (l.numero, l.id));
        laminas
    }

    fn insert_lamina(&mut self, lamina: &NewLamina) -> Lamina {
        self.last_lamina_id += 1;
        let row = lamina.clone().into_lamina(self.last_lamina_id, Utc::now());
        self.laminas.insert(row.id, row.clone());
        row
    }

    fn tally(&self, album_id: i64) -> LaminaTally {
        self.laminas
            .values()
            .filter(|l| l.album_id == album_id)
            .fold(LaminaTally::default(), |mut t, l| {
                t.total += 1;
                if l.adquirida {
                    t.adquiridas += 1;
                }
                t
            })
    }
}

/// Thread-safe in-memory store backing both album and lamina repositories
#[derive(Debug, Clone, Default)]
pub struct InMemoryCollectionStore {
    state: Arc<Mutex<StoreState>>,
}

impl InMemoryCollectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, StoreState>> {
        self.state
            .lock()
            .map_err(|_| Error::Internal("In-memory collection store lock poisoned".to_string()))
    }
}

#[async_trait::async_trait]
impl AlbumRepository for InMemoryCollectionStore {
    async fn find_all(&self) -> Result<Vec<Album>> {
        Ok(self.lock()?.albums.values().cloned().collect())
    }

    async fn find(&self, id: i64) -> Result<Option<Album>> {
        Ok(self.lock()?.albums.get(&id).cloned())
    }

    async fn exists(&self, id: i64) -> Result<bool> {
        Ok(self.lock()?.albums.contains_key(&id))
    }

    async fn create(&self, fields: &AlbumFields) -> Result<Album> {
        let mut state = self.lock()?;
        state.last_album_id += 1;
        let album = Album::from_fields(state.last_album_id, fields.clone(), Utc::now());
        state.albums.insert(album.id, album.clone());
        Ok(album)
    }

    async fn update(&self, id: i64, fields: &AlbumFields) -> Result<Option<Album>> {
        let mut state = self.lock()?;
        Ok(state.albums.get_mut(&id).map(|album| {
            album.replace(fields.clone(), Utc::now());
            album.clone()
        }))
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let mut state = self.lock()?;
        if state.albums.remove(&id).is_none() {
            return Ok(false);
        }
        state.laminas.retain(|_, l| l.album_id != id);
        Ok(true)
    }

    async fn search_by_name(&self, fragment: &str) -> Result<Vec<Album>> {
        let needle = fragment.to_lowercase();
        Ok(self
            .lock()?
            .albums
            .values()
            .filter(|a| a.name.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn find_by_category(&self, category: &str) -> Result<Vec<Album>> {
        Ok(self
            .lock()?
            .albums
            .values()
            .filter(|a| a.category.as_deref() == Some(category))
            .cloned()
            .collect())
    }
}

#[async_trait::async_trait]
impl LaminaRepository for InMemoryCollectionStore {
    async fn list_by_album(&self, album_id: i64) -> Result<Vec<Lamina>> {
        Ok(self.lock()?.album_laminas(album_id, |_| true))
    }

    async fn tally(&self, album_id: i64) -> Result<LaminaTally> {
        Ok(self.lock()?.tally(album_id))
    }

    async fn tally_many(&self, album_ids: &[i64]) -> Result<HashMap<i64, LaminaTally>> {
        let state = self.lock()?;
        Ok(album_ids
            .iter()
            .map(|id| (*id, state.tally(*id)))
            .filter(|(_, t)| t.total > 0)
            .collect())
    }

    async fn find(&self, id: i64) -> Result<Option<Lamina>> {
        Ok(self.lock()?.laminas.get(&id).cloned())
    }

    async fn find_by_number(&self, album_id: i64, numero: i32) -> Result<Option<Lamina>> {
        Ok(self
            .lock()?
            .laminas
            .values()
            .find(|l| l.album_id == album_id && l.numero == numero)
            .cloned())
    }

    async fn create(&self, lamina: &NewLamina) -> Result<Lamina> {
        let mut state = self.lock()?;
        if !state.albums.contains_key(&lamina.album_id) {
            return Err(Error::NotFound(format!(
                "Album {} not found",
                lamina.album_id
            )));
        }
        if state.number_taken(lamina.album_id, lamina.numero, None) {
            return Err(Error::DuplicateNumber(format!(
                "Lamina {} already exists in album {}",
                lamina.numero, lamina.album_id
            )));
        }
        Ok(state.insert_lamina(lamina))
    }

    async fn create_many(&self, laminas: &[NewLamina]) -> Result<Vec<Lamina>> {
        let mut state = self.lock()?;
        if let Some(missing) = laminas
            .iter()
            .find(|l| !state.albums.contains_key(&l.album_id))
        {
            return Err(Error::NotFound(format!(
                "Album {} not found",
                missing.album_id
            )));
        }

        let mut created = Vec::with_capacity(laminas.len());
        for lamina in laminas {
            if state.number_taken(lamina.album_id, lamina.numero, None) {
                continue;
            }
            created.push(state.insert_lamina(lamina));
        }
        Ok(created)
    }

    async fn update(&self, lamina: &Lamina) -> Result<Option<Lamina>> {
        let mut state = self.lock()?;
        if !state.laminas.contains_key(&lamina.id) {
            return Ok(None);
        }
        if state.number_taken(lamina.album_id, lamina.numero, Some(lamina.id)) {
            return Err(Error::DuplicateNumber(format!(
                "Lamina {} already exists in album {}",
                lamina.numero, lamina.album_id
            )));
        }

        let mut saved = lamina.clone();
        saved.updated_at = Utc::now();
        state.laminas.insert(saved.id, saved.clone());
        Ok(Some(saved))
    }

    async fn mark_acquired(&self, album_id: i64, numero: i32) -> Result<Option<Lamina>> {
        let mut state = self.lock()?;
        Ok(state.find_by_number_mut(album_id, numero).map(|l| {
            if l.acquire().is_noop() {
                tracing::debug!(album_id, numero, "Lamina already acquired");
            }
            l.updated_at = Utc::now();
            l.clone()
        }))
    }

    async fn increment_duplicates(&self, album_id: i64, numero: i32) -> Result<Option<Lamina>> {
        let mut state = self.lock()?;
        match state.find_by_number_mut(album_id, numero) {
            Some(l) => {
                l.add_duplicate()?;
                l.updated_at = Utc::now();
                Ok(Some(l.clone()))
            }
            None => Ok(None),
        }
    }

    async fn reset_acquisition(&self, id: i64) -> Result<Option<Lamina>> {
        let mut state = self.lock()?;
        Ok(state.laminas.get_mut(&id).map(|l| {
            if l.reset_acquisition().is_noop() {
                tracing::debug!(lamina_id = id, "Lamina was not acquired");
            }
            l.updated_at = Utc::now();
            l.clone()
        }))
    }

    async fn list_missing(&self, album_id: i64) -> Result<Vec<Lamina>> {
        Ok(self.lock()?.album_laminas(album_id, |l| !l.adquirida))
    }

    async fn list_duplicates(&self, album_id: i64, greater_than: i32) -> Result<Vec<Lamina>> {
        Ok(self
            .lock()?
            .album_laminas(album_id, |l| l.cantidad_repetidas > greater_than))
    }
}
