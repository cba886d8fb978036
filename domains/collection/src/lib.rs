//! Collection domain: sticker albums, laminas, completion statistics

pub mod api;
pub mod domain;
pub mod repository;
pub mod service;

// Re-export domain types at the crate root for convenience
pub use domain::entities::{
    Album, AlbumDraft, AlbumFields, DuplicateLamina, Lamina, LaminaDraft, LaminaPatch, NewLamina,
};
pub use domain::state::{
    AcquisitionEvent, AcquisitionState, AcquisitionStateMachine, Transition,
};
pub use domain::statistics::{AlbumOverview, AlbumStatistics, LaminaTally};

// Re-export repository types
pub use repository::{
    AlbumRepository, CollectionRepositories, InMemoryCollectionStore, LaminaRepository,
};

// Re-export service types
pub use service::{AlbumManager, StickerLedger};

// Re-export API types
pub use api::routes;
pub use api::CollectionState;
