//! Domain layer for the Collection domain

pub mod entities;
pub mod state;
pub mod statistics;
