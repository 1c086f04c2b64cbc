//! RefSeqGene repository contract and SQLite implementation.
//!
//! The entity is identity-only; grouping SNPs under a gene happens through
//! `SnpRepository::link_refseq_gene`.

use crate::model::refseq_gene::RefSeqGene;
use crate::repo::RepoResult;
use rusqlite::Connection;

/// Repository interface for reference-gene groupings.
pub trait RefSeqGeneRepository {
    /// Creates a grouping record and returns its generated row id.
    fn create(&self) -> RepoResult<i64>;
    /// Gets one grouping by row id.
    fn get(&self, id: i64) -> RepoResult<Option<RefSeqGene>>;
}

/// SQLite-backed reference-gene repository.
pub struct SqliteRefSeqGeneRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteRefSeqGeneRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl RefSeqGeneRepository for SqliteRefSeqGeneRepository<'_> {
    fn create(&self) -> RepoResult<i64> {
        self.conn
            .execute("INSERT INTO refseqgenes DEFAULT VALUES;", [])?;
        Ok(self.conn.last_insert_rowid())
    }

    fn get(&self, id: i64) -> RepoResult<Option<RefSeqGene>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id FROM refseqgenes WHERE id = ?1;")?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(RefSeqGene {
                id: Some(row.get(0)?),
            }));
        }
        Ok(None)
    }
}
