//! Population domain model.
//!
//! # Responsibility
//! - Represent one named group of individuals with its classification fields.
//! - Normalize every textual field to lowercase before it reaches storage.
//!
//! # Invariants
//! - `original_name` is unique across the dataset and always lowercase.
//! - Missing classification fields hold the literal `"undef"`.

use serde::{Deserialize, Serialize};

/// Placeholder value for classification fields that were never provided.
pub const UNDEF: &str = "undef";

/// Mutable Population fields addressable through [`Population::set`].
///
/// Closed enumeration so that field updates stay checked at compile time
/// instead of going through reflection-style string lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PopulationField {
    OriginalName,
    Region,
    WorkingUnit,
    ContinentMacroarea,
}

impl PopulationField {
    /// Column name of this field in the `populations` table.
    pub fn column(self) -> &'static str {
        match self {
            Self::OriginalName => "original_name",
            Self::Region => "region",
            Self::WorkingUnit => "working_unit",
            Self::ContinentMacroarea => "continent_macroarea",
        }
    }
}

/// One named population of individuals.
///
/// `id` is `None` until the record has been persisted; repositories fill it
/// from the generated row id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Population {
    pub id: Option<i64>,
    /// Unique lowercase name the population is looked up by.
    pub original_name: String,
    pub region: String,
    pub working_unit: String,
    pub continent_macroarea: String,
    /// Epoch milliseconds, maintained by the storage layer.
    pub last_modified: Option<i64>,
}

impl Population {
    /// Creates a population with all classification fields set to `"undef"`.
    ///
    /// The name is lowercased regardless of input casing.
    pub fn new(original_name: impl AsRef<str>) -> Self {
        Self::with_classification(original_name, UNDEF, UNDEF, UNDEF)
    }

    /// Creates a population with explicit classification fields.
    ///
    /// Every string field is lowercased before storing, matching the
    /// lowercase uniqueness key on `original_name`.
    pub fn with_classification(
        original_name: impl AsRef<str>,
        region: impl AsRef<str>,
        working_unit: impl AsRef<str>,
        continent_macroarea: impl AsRef<str>,
    ) -> Self {
        Self {
            id: None,
            original_name: original_name.as_ref().to_lowercase(),
            region: region.as_ref().to_lowercase(),
            working_unit: working_unit.as_ref().to_lowercase(),
            continent_macroarea: continent_macroarea.as_ref().to_lowercase(),
            last_modified: None,
        }
    }

    /// Overwrites one field with the lowercase form of `value`.
    ///
    /// All addressable fields are textual; numeric-looking values are stored
    /// as text like any other.
    pub fn set(&mut self, field: PopulationField, value: impl AsRef<str>) {
        let value = value.as_ref().to_lowercase();
        match field {
            PopulationField::OriginalName => self.original_name = value,
            PopulationField::Region => self.region = value,
            PopulationField::WorkingUnit => self.working_unit = value,
            PopulationField::ContinentMacroarea => self.continent_macroarea = value,
        }
    }

    /// Returns whether `other` names this population, ignoring case.
    pub fn matches_name(&self, other: &str) -> bool {
        self.original_name == other.to_lowercase()
    }
}

impl std::fmt::Display for Population {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.original_name)
    }
}
