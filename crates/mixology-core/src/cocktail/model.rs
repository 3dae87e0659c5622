//! Cocktail data models.

use chrono::{DateTime, Local, Utc};
use mixology_api::CocktailDto;

/// Day format used to label and group cached cocktails (`dd/MM/yyyy`).
pub const INSERTION_DAY_FORMAT: &str = "%d/%m/%Y";

/// A cocktail as stored in the local cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CocktailRecord {
    /// Upstream identifier (primary key).
    pub id: String,
    /// Drink name.
    pub name: String,
    /// Category, empty when unknown.
    pub category: String,
    /// Alcohol content label, empty when unknown.
    pub alcoholic: String,
    /// Serving glass, empty when unknown.
    pub glass: String,
    /// Preparation instructions, empty when unknown.
    pub instructions: String,
    /// Thumbnail URL, empty when unknown.
    pub thumbnail: String,
    /// When the record was committed to the cache.
    pub inserted_at: DateTime<Utc>,
}

impl CocktailRecord {
    /// Builds a record from an API cocktail, stamped with the insertion time.
    ///
    /// Missing optional fields become empty strings.
    #[must_use]
    pub fn from_dto(dto: CocktailDto, inserted_at: DateTime<Utc>) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
            category: dto.category.unwrap_or_default(),
            alcoholic: dto.alcoholic.unwrap_or_default(),
            glass: dto.glass.unwrap_or_default(),
            instructions: dto.instructions.unwrap_or_default(),
            thumbnail: dto.thumbnail.unwrap_or_default(),
            inserted_at,
        }
    }

    /// Projects the record for display.
    #[must_use]
    pub fn to_display(&self) -> CocktailDisplay {
        CocktailDisplay {
            id: self.id.clone(),
            name: self.name.clone(),
            category: self.category.clone(),
            alcoholic: self.alcoholic.clone(),
            glass: self.glass.clone(),
            instructions: self.instructions.clone(),
            thumbnail: self.thumbnail.clone(),
            insertion_day: format_insertion_day(self.inserted_at),
        }
    }
}

/// Read-only projection of a cached cocktail, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CocktailDisplay {
    /// Upstream identifier.
    pub id: String,
    /// Drink name.
    pub name: String,
    /// Category.
    pub category: String,
    /// Alcohol content label.
    pub alcoholic: String,
    /// Serving glass.
    pub glass: String,
    /// Preparation instructions.
    pub instructions: String,
    /// Thumbnail URL.
    pub thumbnail: String,
    /// Local day the cocktail was added, formatted with [`INSERTION_DAY_FORMAT`].
    pub insertion_day: String,
}

/// Formats an insertion time as a local calendar day.
#[must_use]
pub fn format_insertion_day(inserted_at: DateTime<Utc>) -> String {
    inserted_at
        .with_timezone(&Local)
        .format(INSERTION_DAY_FORMAT)
        .to_string()
}
