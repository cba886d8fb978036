//! Completion statistics
//!
//! Every album view reports acquired, missing and completion percentage over
//! the album's declared `total_laminas`. The declared total is the only basis:
//! `laminas_faltantes + laminas_adquiridas == total_laminas` always holds.

use serde::{Deserialize, Serialize};

use super::entities::Album;

/// Row counts for one album's laminas
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct LaminaTally {
    /// Lamina rows that exist for the album
    pub total: i64,
    /// Rows with `adquirida = true`
    pub adquiridas: i64,
}

/// Completion statistics for one album
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlbumStatistics {
    pub laminas_adquiridas: i64,
    pub laminas_faltantes: i64,
    pub porcentaje_completado: f64,
}

impl AlbumStatistics {
    /// Compute statistics over the declared total.
    ///
    /// `laminas_faltantes` goes negative and the percentage above 100 only
    /// when more laminas are owned than the album declares.
    pub fn compute(total_laminas: i32, tally: &LaminaTally) -> Self {
        let basis = i64::from(total_laminas);
        let adquiridas = tally.adquiridas;

        let porcentaje_completado = if basis <= 0 {
            0.0
        } else {
            round_two_decimals(adquiridas as f64 * 100.0 / basis as f64)
        };

        Self {
            laminas_adquiridas: adquiridas,
            laminas_faltantes: basis - adquiridas,
            porcentaje_completado,
        }
    }
}

/// Album together with its computed statistics
#[derive(Debug, Clone, PartialEq)]
pub struct AlbumOverview {
    pub album: Album,
    pub statistics: AlbumStatistics,
}

impl AlbumOverview {
    pub fn new(album: Album, tally: &LaminaTally) -> Self {
        let statistics = AlbumStatistics::compute(album.total_laminas, tally);
        Self { album, statistics }
    }
}

/// Round half-up to two decimal places
fn round_two_decimals(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
