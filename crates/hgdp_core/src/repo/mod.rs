//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define per-entity data access contracts over the HGDP tables.
//! - Isolate SQLite query details from service orchestration.
//! - Provide the generic lookup-or-create operation shared by entity kinds.
//!
//! # Invariants
//! - Repository writes enforce model `validate()` before persistence.
//! - Uniqueness is enforced by storage constraints; violations surface as
//!   `RepoError::UniqueViolation`, never as silent overwrites.
//! - No repository exposes a delete operation; records are never destroyed
//!   by application logic.

use crate::db::DbError;
use crate::model::individual::IndividualValidationError;
use crate::model::snp::SnpValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod individual_repo;
pub mod population_repo;
pub mod refseq_gene_repo;
pub mod snp_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for entity persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    IndividualValidation(IndividualValidationError),
    SnpValidation(SnpValidationError),
    Db(DbError),
    /// The referenced record does not exist.
    NotFound(String),
    /// A create would duplicate a unique field; raised by the storage layer.
    UniqueViolation {
        entity: &'static str,
        detail: String,
    },
    /// A lookup filter matched more than one record. Uniqueness constraints
    /// make this unreachable in a healthy database; we fail loudly rather
    /// than pick an arbitrary row.
    AmbiguousLookup {
        entity: &'static str,
        detail: String,
    },
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IndividualValidation(err) => write!(f, "{err}"),
            Self::SnpValidation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(what) => write!(f, "not found: {what}"),
            Self::UniqueViolation { entity, detail } => {
                write!(f, "unique constraint violated for {entity}: {detail}")
            }
            Self::AmbiguousLookup { entity, detail } => {
                write!(f, "ambiguous lookup for {entity}: {detail}")
            }
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::IndividualValidation(err) => Some(err),
            Self::SnpValidation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_)
            | Self::UniqueViolation { .. }
            | Self::AmbiguousLookup { .. }
            | Self::InvalidData(_) => None,
        }
    }
}

impl From<IndividualValidationError> for RepoError {
    fn from(value: IndividualValidationError) -> Self {
        Self::IndividualValidation(value)
    }
}

impl From<SnpValidationError> for RepoError {
    fn from(value: SnpValidationError) -> Self {
        Self::SnpValidation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Maps a failed INSERT to `UniqueViolation` when SQLite reports a unique or
/// primary-key constraint failure, otherwise passes the error through.
pub(crate) fn map_insert_error(entity: &'static str, err: rusqlite::Error) -> RepoError {
    if let rusqlite::Error::SqliteFailure(ref code, ref message) = err {
        if code.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
            || code.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
        {
            return RepoError::UniqueViolation {
                entity,
                detail: message
                    .clone()
                    .unwrap_or_else(|| "unique constraint failed".to_string()),
            };
        }
    }
    RepoError::Db(DbError::Sqlite(err))
}

/// Fetch-or-create contract attachable to any entity repository.
///
/// `get_or_create` returns the unique record matching `filter` when one
/// exists; otherwise it creates a new record from `filter`, applies
/// `if_new_set` to the newly created record only, and returns it.
///
/// Known limitation: there is no transaction around lookup and create, so a
/// second writer can slip a matching insert in between. Single-writer use is
/// assumed; the unique constraint still rejects the duplicate.
pub trait LookupOrCreate {
    type Entity;
    type Filter: ?Sized;
    type Defaults;

    /// Returns the unique record matching `filter`, `None` when absent, or
    /// `AmbiguousLookup` when more than one record matches.
    fn lookup(&self, filter: &Self::Filter) -> RepoResult<Option<Self::Entity>>;

    /// Creates a new record from `filter` plus the creation-only `defaults`.
    fn create_from(
        &self,
        filter: &Self::Filter,
        defaults: &Self::Defaults,
    ) -> RepoResult<Self::Entity>;

    /// Never creates a duplicate; `if_new_set` is never applied to a record
    /// that already existed.
    fn get_or_create(
        &self,
        filter: &Self::Filter,
        if_new_set: &Self::Defaults,
    ) -> RepoResult<Self::Entity> {
        if let Some(existing) = self.lookup(filter)? {
            return Ok(existing);
        }
        self.create_from(filter, if_new_set)
    }
}
