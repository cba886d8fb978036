//! Application services for the Collection domain

pub mod albums;
pub mod laminas;

pub use albums::AlbumManager;
pub use laminas::StickerLedger;
