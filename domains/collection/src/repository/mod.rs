//! Repository implementations for the Collection domain
//!
//! The domain services only see the `AlbumRepository` and `LaminaRepository`
//! traits. Postgres is the production backend; the in-memory store backs tests
//! and database-less local runs.

pub mod albums;
pub mod laminas;
pub mod memory;
pub mod transactions;

use std::collections::HashMap;
use std::sync::Arc;

use laminas_common::Result;
use sqlx::PgPool;

use crate::domain::entities::{Album, AlbumFields, Lamina, NewLamina};
use crate::domain::statistics::LaminaTally;

pub use albums::PgAlbumRepository;
pub use laminas::PgLaminaRepository;
pub use memory::InMemoryCollectionStore;

/// Persistence contract for albums
#[async_trait::async_trait]
pub trait AlbumRepository: Send + Sync {
    /// All albums ordered by id
    async fn find_all(&self) -> Result<Vec<Album>>;

    async fn find(&self, id: i64) -> Result<Option<Album>>;

    async fn exists(&self, id: i64) -> Result<bool>;

    async fn create(&self, fields: &AlbumFields) -> Result<Album>;

    /// Replace all mutable attributes; `None` when the album does not exist
    async fn update(&self, id: i64, fields: &AlbumFields) -> Result<Option<Album>>;

    /// Delete the album and every lamina it owns atomically.
    /// Returns false when the album does not exist.
    async fn delete(&self, id: i64) -> Result<bool>;

    /// Case-insensitive substring match on the album name
    async fn search_by_name(&self, fragment: &str) -> Result<Vec<Album>>;

    async fn find_by_category(&self, category: &str) -> Result<Vec<Album>>;
}

/// Persistence contract for laminas
#[async_trait::async_trait]
pub trait LaminaRepository: Send + Sync {
    /// Laminas of an album ordered by numero
    async fn list_by_album(&self, album_id: i64) -> Result<Vec<Lamina>>;

    async fn tally(&self, album_id: i64) -> Result<LaminaTally>;

    /// Tallies for several albums; albums without laminas are absent from the map
    async fn tally_many(&self, album_ids: &[i64]) -> Result<HashMap<i64, LaminaTally>>;

    async fn find(&self, id: i64) -> Result<Option<Lamina>>;

    async fn find_by_number(&self, album_id: i64, numero: i32) -> Result<Option<Lamina>>;

    /// Insert one lamina. Fails with `DuplicateNumber` if `(album_id, numero)` is taken.
    async fn create(&self, lamina: &NewLamina) -> Result<Lamina>;

    /// Insert laminas in order within one transaction, skipping any whose
    /// `(album_id, numero)` already exists (including earlier items of the batch).
    /// Returns only the rows actually inserted.
    async fn create_many(&self, laminas: &[NewLamina]) -> Result<Vec<Lamina>>;

    /// Save every mutable field of an existing lamina.
    /// Fails with `DuplicateNumber` if the new numero is taken by another lamina.
    async fn update(&self, lamina: &Lamina) -> Result<Option<Lamina>>;

    async fn mark_acquired(&self, album_id: i64, numero: i32) -> Result<Option<Lamina>>;

    /// Increment the duplicate counter, treating a missing value as 0
    async fn increment_duplicates(&self, album_id: i64, numero: i32) -> Result<Option<Lamina>>;

    async fn reset_acquisition(&self, id: i64) -> Result<Option<Lamina>>;

    async fn list_missing(&self, album_id: i64) -> Result<Vec<Lamina>>;

    async fn list_duplicates(&self, album_id: i64, greater_than: i32) -> Result<Vec<Lamina>>;
}

/// Combined repository access for the Collection domain
#[derive(Clone)]
pub struct CollectionRepositories {
    pub albums: Arc<dyn AlbumRepository>,
    pub laminas: Arc<dyn LaminaRepository>,
}

impl CollectionRepositories {
    /// Postgres-backed repositories sharing one pool
    #[mutants::skip] // Wiring only; needs a live database to observe
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            albums: Arc::new(PgAlbumRepository::new(pool.clone())),
            laminas: Arc::new(PgLaminaRepository::new(pool)),
        }
    }

    /// Repositories over a fresh in-memory store
    pub fn in_memory() -> Self {
        let store = InMemoryCollectionStore::new();
        Self {
            albums: Arc::new(store.clone()),
            laminas: Arc::new(store),
        }
    }
}
