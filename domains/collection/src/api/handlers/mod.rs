//! HTTP handlers for albums and laminas

pub mod albums;
pub mod laminas;
