//! Collection domain state

use crate::repository::CollectionRepositories;
use crate::service::{AlbumManager, StickerLedger};

/// Application state for the Collection domain
#[derive(Clone)]
pub struct CollectionState {
    pub albums: AlbumManager,
    pub laminas: StickerLedger,
}

impl CollectionState {
    pub fn new(repos: &CollectionRepositories) -> Self {
        Self {
            albums: AlbumManager::new(repos),
            laminas: StickerLedger::new(repos),
        }
    }
}
