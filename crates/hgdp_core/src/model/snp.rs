//! SNP domain model.
//!
//! # Responsibility
//! - Represent one genetic marker with its allele codes and genotype
//!   payloads.
//!
//! # Invariants
//! - `id` is the primary identity, supplied at construction, never empty.
//! - Chromosome and genotype payload fields default to the empty string.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Validation failures for SNP state ahead of persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnpValidationError {
    EmptyId,
}

impl Display for SnpValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "snp id must not be empty"),
        }
    }
}

impl Error for SnpValidationError {}

/// One genetic marker.
///
/// Allele and strand codes are free-form single-character strings; the
/// dataset never constrained them to a nucleotide alphabet and neither do
/// we.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snp {
    /// Marker identity, e.g. `rs1333`. Primary key in storage.
    pub id: String,
    pub chromosome: String,
    pub physical_position: Option<i64>,
    /// Index into the external haplotypes matrix.
    pub haplotypes_index: Option<i64>,
    pub reference_allele: Option<String>,
    pub derived_allele: Option<String>,
    pub original_strand: Option<String>,
    #[serde(rename = "dbSNP_ref")]
    pub dbsnp_ref: Option<String>,
    pub genotypes1: String,
    pub genotypes2: String,
    /// Optional link to the reference-gene grouping.
    pub refseqgene_id: Option<i64>,
    /// Epoch milliseconds, maintained by the storage layer.
    pub last_modified: Option<i64>,
}

impl Snp {
    /// Creates a marker with the mandatory id; every other field starts
    /// empty and is set post-construction.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            chromosome: String::new(),
            physical_position: None,
            haplotypes_index: None,
            reference_allele: None,
            derived_allele: None,
            original_strand: None,
            dbsnp_ref: None,
            genotypes1: String::new(),
            genotypes2: String::new(),
            refseqgene_id: None,
            last_modified: None,
        }
    }

    /// Checks invariants that storage cannot express.
    pub fn validate(&self) -> Result<(), SnpValidationError> {
        if self.id.trim().is_empty() {
            return Err(SnpValidationError::EmptyId);
        }
        Ok(())
    }

    /// Renders the display form, e.g. `SNP rs1333`.
    pub fn display_label(&self) -> String {
        format!("SNP {}", self.id)
    }
}
