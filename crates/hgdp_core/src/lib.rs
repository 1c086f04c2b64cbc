//! Core domain logic for the HGDP genetics dataset.
//! This crate is the single source of truth for entity normalization rules.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::individual::{Individual, IndividualValidationError, Sex, MAX_HAPLOTYPES_CHARS};
pub use model::population::{Population, PopulationField, UNDEF};
pub use model::refseq_gene::RefSeqGene;
pub use model::snp::{Snp, SnpValidationError};
pub use repo::individual_repo::{IndividualRepository, SqliteIndividualRepository};
pub use repo::population_repo::{
    PopulationDefaults, PopulationRepository, SqlitePopulationRepository,
};
pub use repo::refseq_gene_repo::{RefSeqGeneRepository, SqliteRefSeqGeneRepository};
pub use repo::snp_repo::{SnpRepository, SqliteSnpRepository};
pub use repo::{LookupOrCreate, RepoError, RepoResult};
pub use service::dataset_service::{DatasetService, RegisterIndividual};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
