//! Individual domain model.
//!
//! # Responsibility
//! - Represent one sampled subject with its genotype/haplotype payload.
//! - Normalize identity casing and biological-sex codes at construction.
//!
//! # Invariants
//! - `name` is unique across the dataset and always uppercase.
//! - `sex` is one of exactly three codes regardless of input spelling.
//! - `haplotypes` never exceeds [`MAX_HAPLOTYPES_CHARS`] characters.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Maximum stored haplotypes payload, inherited from the column length of
/// the existing dataset.
pub const MAX_HAPLOTYPES_CHARS: usize = 650_000;

/// Biological-sex code of an individual.
///
/// Unrecognized input never fails; it falls back to [`Sex::Unknown`], which
/// is the historical behavior of the dataset importers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sex {
    #[serde(rename = "m")]
    Male,
    #[serde(rename = "f")]
    Female,
    #[default]
    #[serde(rename = "u")]
    Unknown,
}

impl Sex {
    /// Normalizes one of the accepted input spellings into a sex code.
    ///
    /// Exact table: `1`/`m`/`male` (any casing) map to `Male`,
    /// `2`/`f`/`female` map to `Female`, anything else to `Unknown`.
    /// No partial matches.
    pub fn parse(input: &str) -> Self {
        match input.trim().to_lowercase().as_str() {
            "1" | "m" | "male" => Self::Male,
            "2" | "f" | "female" => Self::Female,
            _ => Self::Unknown,
        }
    }

    /// Normalizes an optional input; absent input is `Unknown`.
    pub fn parse_opt(input: Option<&str>) -> Self {
        input.map_or(Self::Unknown, Self::parse)
    }

    /// Single-character storage code (`m`, `f`, `u`).
    pub fn as_code(self) -> &'static str {
        match self {
            Self::Male => "m",
            Self::Female => "f",
            Self::Unknown => "u",
        }
    }

    /// Decodes a storage code; anything unexpected is `None`.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "m" => Some(Self::Male),
            "f" => Some(Self::Female),
            "u" => Some(Self::Unknown),
            _ => None,
        }
    }
}

/// Validation failures for individual state ahead of persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndividualValidationError {
    EmptyName,
    HaplotypesTooLong { len: usize },
}

impl Display for IndividualValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "individual name must not be empty"),
            Self::HaplotypesTooLong { len } => write!(
                f,
                "haplotypes payload is {len} chars, maximum is {MAX_HAPLOTYPES_CHARS}"
            ),
        }
    }
}

impl Error for IndividualValidationError {}

/// One sampled individual.
///
/// The population link is held as a row id; resolving a population *name*
/// into that id is a repository/service concern (lookup-or-create), kept out
/// of the constructor so the side effect stays visible to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Individual {
    pub id: Option<i64>,
    /// Unique uppercase identity string.
    pub name: String,
    pub population_id: Option<i64>,
    pub sex: Sex,
    /// Large haplotypes payload, capped at [`MAX_HAPLOTYPES_CHARS`].
    pub haplotypes: Option<String>,
    /// Unique index into the external genotypes matrix.
    pub genotypes_index: Option<i64>,
    /// Epoch milliseconds, maintained by the storage layer.
    pub last_modified: Option<i64>,
}

impl Individual {
    /// Creates an individual with an uppercased identity and normalized sex.
    ///
    /// Does not touch the population link; see
    /// `DatasetService::register_individual` for name-based resolution.
    pub fn new(name: impl AsRef<str>, sex: Option<&str>) -> Self {
        Self {
            id: None,
            name: name.as_ref().to_uppercase(),
            population_id: None,
            sex: Sex::parse_opt(sex),
            haplotypes: None,
            genotypes_index: None,
            last_modified: None,
        }
    }

    /// Checks invariants that storage cannot express.
    pub fn validate(&self) -> Result<(), IndividualValidationError> {
        if self.name.is_empty() {
            return Err(IndividualValidationError::EmptyName);
        }
        if let Some(haplotypes) = &self.haplotypes {
            let len = haplotypes.chars().count();
            if len > MAX_HAPLOTYPES_CHARS {
                return Err(IndividualValidationError::HaplotypesTooLong { len });
            }
        }
        Ok(())
    }

    /// Renders the honorific display form, e.g. `Mr. ARCHIMEDE (greeks)`.
    ///
    /// `Mr.` is used for `m` and `u`, `Mrs.` for `f`. An individual without
    /// a resolved population renders as `(none)`. Presentation only; nothing
    /// here is persisted.
    pub fn display_label(&self, population_name: Option<&str>) -> String {
        let honorific = match self.sex {
            Sex::Female => "Mrs.",
            Sex::Male | Sex::Unknown => "Mr.",
        };
        format!(
            "{honorific} {} ({})",
            self.name,
            population_name.unwrap_or("none")
        )
    }

    /// Identity string with a trailing suffix, used for display composition.
    pub fn display_concatenated(&self, suffix: &str) -> String {
        format!("{}{suffix}", self.name)
    }

    /// Returns whether `other` matches this identity after normalization.
    pub fn identity_equals(&self, other: &str) -> bool {
        self.name == other.to_uppercase()
    }
}

impl std::fmt::Display for Individual {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
