//! Domain entities for the Collection domain
//!
//! Albums declare a target set of numbered laminas; laminas track whether the
//! collector owns them and how many duplicate copies they hold.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use laminas_common::{Error, Result};

use super::state::{AcquisitionEvent, AcquisitionState, AcquisitionStateMachine, Transition};

/// Maximum album/lamina name length (varchar(200))
const MAX_NAME_LENGTH: usize = 200;

/// Maximum image reference length (varchar(500))
const MAX_IMAGE_LENGTH: usize = 500;

/// Maximum category label length (varchar(100))
const MAX_CATEGORY_LENGTH: usize = 100;

/// Maximum description length (varchar(1000))
const MAX_DESCRIPTION_LENGTH: usize = 1000;

/// Album entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Album {
    pub id: i64,
    pub name: String,
    pub image: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub category: Option<String>,
    /// Declared size of the collection, independent of how many rows exist
    pub total_laminas: i32,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Album attributes as received from a caller, before validation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlbumDraft {
    pub name: Option<String>,
    pub image: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub category: Option<String>,
    pub total_laminas: Option<i32>,
    pub description: Option<String>,
}

/// Validated mutable attributes of an album, used for both insert and replace
#[derive(Debug, Clone, PartialEq)]
pub struct AlbumFields {
    pub name: String,
    pub image: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub category: Option<String>,
    pub total_laminas: i32,
    pub description: Option<String>,
}

impl AlbumDraft {
    /// Check required fields and limits, producing the fields to persist
    pub fn validate(self) -> Result<AlbumFields> {
        let name = match self.name {
            Some(n) if !n.trim().is_empty() => n,
            _ => return Err(Error::Validation("Album name is required".to_string())),
        };
        check_length("Album name", Some(&name), MAX_NAME_LENGTH)?;

        let total_laminas = self.total_laminas.ok_or_else(|| {
            Error::Validation("Album total_laminas is required".to_string())
        })?;
        if total_laminas < 1 {
            return Err(Error::Validation(
                "Album total_laminas must be a positive integer".to_string(),
            ));
        }

        check_length("Album image", self.image.as_deref(), MAX_IMAGE_LENGTH)?;
        check_length("Album category", self.category.as_deref(), MAX_CATEGORY_LENGTH)?;
        check_length(
            "Album description",
            self.description.as_deref(),
            MAX_DESCRIPTION_LENGTH,
        )?;

        Ok(AlbumFields {
            name,
            image: self.image,
            release_date: self.release_date,
            category: self.category,
            total_laminas,
            description: self.description,
        })
    }
}

impl Album {
    /// Build an album row from validated fields (ids are assigned by storage)
    pub fn from_fields(id: i64, fields: AlbumFields, now: DateTime<Utc>) -> Self {
        Album {
            id,
            name: fields.name,
            image: fields.image,
            release_date: fields.release_date,
            category: fields.category,
            total_laminas: fields.total_laminas,
            description: fields.description,
            created_at: now,
            updated_at: now,
        }
    }

    /// Full replace of every mutable attribute
    pub fn replace(&mut self, fields: AlbumFields, now: DateTime<Utc>) {
        self.name = fields.name;
        self.image = fields.image;
        self.release_date = fields.release_date;
        self.category = fields.category;
        self.total_laminas = fields.total_laminas;
        self.description = fields.description;
        self.updated_at = now;
    }
}

/// Lamina (sticker) entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Lamina {
    pub id: i64,
    pub album_id: i64,
    pub numero: i32,
    pub name: Option<String>,
    pub image: Option<String>,
    pub adquirida: bool,
    pub cantidad_repetidas: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Lamina creation input, before validation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LaminaDraft {
    pub numero: i32,
    pub name: Option<String>,
    pub image: Option<String>,
    pub adquirida: Option<bool>,
    pub cantidad_repetidas: Option<i32>,
}

/// Validated lamina ready to be inserted
#[derive(Debug, Clone, PartialEq)]
pub struct NewLamina {
    pub album_id: i64,
    pub numero: i32,
    pub name: Option<String>,
    pub image: Option<String>,
    pub adquirida: bool,
    pub cantidad_repetidas: i32,
}

impl NewLamina {
    /// Create a new lamina for an album, applying defaults for unset flags
    pub fn new(album_id: i64, draft: LaminaDraft) -> Result<Self> {
        validate_numero(draft.numero)?;
        check_length("Lamina name", draft.name.as_deref(), MAX_NAME_LENGTH)?;
        check_length("Lamina image", draft.image.as_deref(), MAX_IMAGE_LENGTH)?;

        let cantidad_repetidas = draft.cantidad_repetidas.unwrap_or(0);
        validate_cantidad_repetidas(cantidad_repetidas)?;

        Ok(NewLamina {
            album_id,
            numero: draft.numero,
            name: draft.name,
            image: draft.image,
            adquirida: draft.adquirida.unwrap_or(false),
            cantidad_repetidas,
        })
    }

    /// Lamina created by bulk insertion: named after its number, not owned
    pub fn placeholder(album_id: i64, numero: i32) -> Result<Self> {
        Self::new(
            album_id,
            LaminaDraft {
                numero,
                name: Some(format!("Lámina {}", numero)),
                ..Default::default()
            },
        )
    }

    pub fn into_lamina(self, id: i64, now: DateTime<Utc>) -> Lamina {
        Lamina {
            id,
            album_id: self.album_id,
            numero: self.numero,
            name: self.name,
            image: self.image,
            adquirida: self.adquirida,
            cantidad_repetidas: self.cantidad_repetidas,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update: only fields that are `Some` overwrite the stored value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LaminaPatch {
    pub numero: Option<i32>,
    pub name: Option<String>,
    pub image: Option<String>,
    pub adquirida: Option<bool>,
    pub cantidad_repetidas: Option<i32>,
}

impl LaminaPatch {
    pub fn is_empty(&self) -> bool {
        self.numero.is_none()
            && self.name.is_none()
            && self.image.is_none()
            && self.adquirida.is_none()
            && self.cantidad_repetidas.is_none()
    }
}

impl Lamina {
    pub fn acquisition_state(&self) -> AcquisitionState {
        AcquisitionState::from_flag(self.adquirida)
    }

    fn apply_event(&mut self, event: AcquisitionEvent) -> Transition {
        let transition = AcquisitionStateMachine::transition(self.acquisition_state(), event);
        self.adquirida = transition.to.is_owned();
        transition
    }

    /// Mark the lamina as owned; a no-op if it already is
    pub fn acquire(&mut self) -> Transition {
        self.apply_event(AcquisitionEvent::Acquire)
    }

    /// Soft removal: clear ownership, keep the row and its duplicate count
    pub fn reset_acquisition(&mut self) -> Transition {
        self.apply_event(AcquisitionEvent::Reset)
    }

    /// Record one more duplicate copy
    pub fn add_duplicate(&mut self) -> Result<()> {
        self.cantidad_repetidas = self
            .cantidad_repetidas
            .checked_add(1)
            .ok_or_else(duplicate_count_overflow)?;
        Ok(())
    }

    /// Apply a partial update, validating only the fields present
    pub fn apply(&mut self, patch: LaminaPatch) -> Result<()> {
        if let Some(numero) = patch.numero {
            validate_numero(numero)?;
        }
        if let Some(cantidad) = patch.cantidad_repetidas {
            validate_cantidad_repetidas(cantidad)?;
        }
        check_length("Lamina name", patch.name.as_deref(), MAX_NAME_LENGTH)?;
        check_length("Lamina image", patch.image.as_deref(), MAX_IMAGE_LENGTH)?;

        if let Some(numero) = patch.numero {
            self.numero = numero;
        }
        if patch.name.is_some() {
            self.name = patch.name;
        }
        if patch.image.is_some() {
            self.image = patch.image;
        }
        match patch.adquirida {
            Some(true) => {
                self.acquire();
            }
            Some(false) => {
                self.reset_acquisition();
            }
            None => {}
        }
        if let Some(cantidad) = patch.cantidad_repetidas {
            self.cantidad_repetidas = cantidad;
        }
        Ok(())
    }
}

/// Projection of a lamina that has duplicate copies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuplicateLamina {
    pub id: i64,
    pub numero: i32,
    pub name: Option<String>,
    pub cantidad_repetidas: i32,
}

impl From<Lamina> for DuplicateLamina {
    fn from(l: Lamina) -> Self {
        Self {
            id: l.id,
            numero: l.numero,
            name: l.name,
            cantidad_repetidas: l.cantidad_repetidas,
        }
    }
}

/// Error for a duplicate counter that would exceed the INTEGER column
pub fn duplicate_count_overflow() -> Error {
    Error::Validation("Duplicate count overflow".to_string())
}

/// Lamina numbers are positions within an album (CHECK (numero >= 1))
pub fn validate_numero(numero: i32) -> Result<()> {
    if numero < 1 {
        return Err(Error::Validation(format!(
            "Lamina numero must be a positive integer, got {}",
            numero
        )));
    }
    Ok(())
}

fn validate_cantidad_repetidas(cantidad: i32) -> Result<()> {
    if cantidad < 0 {
        return Err(Error::Validation(
            "Lamina cantidad_repetidas cannot be negative".to_string(),
        ));
    }
    Ok(())
}

fn check_length(field: &str, value: Option<&str>, max: usize) -> Result<()> {
    if let Some(v) = value {
        if v.chars().count() > max {
            return Err(Error::Validation(format!(
                "{} must be at most {} characters",
                field, max
            )));
        }
    }
    Ok(())
}
