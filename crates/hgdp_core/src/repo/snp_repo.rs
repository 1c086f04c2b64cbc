//! SNP repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide persistence APIs over the `snps` table.
//! - Maintain the optional link to reference-gene groupings.
//!
//! # Invariants
//! - Write paths call `Snp::validate()` before SQL mutations.
//! - `id` is the primary identity; duplicates are rejected by storage.

use crate::model::snp::Snp;
use crate::repo::{map_insert_error, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

const SNP_SELECT_SQL: &str = "SELECT
    id,
    chromosome,
    physical_position,
    haplotypes_index,
    reference_allele,
    derived_allele,
    original_strand,
    dbsnp_ref,
    genotypes1,
    genotypes2,
    refseqgene_id,
    last_modified
FROM snps";

/// Repository interface for SNP persistence.
pub trait SnpRepository {
    /// Persists a marker keyed by its supplied string id.
    fn create(&self, snp: &Snp) -> RepoResult<()>;
    /// Gets one marker by id.
    fn get(&self, id: &str) -> RepoResult<Option<Snp>>;
    /// Lists markers on one chromosome ordered by physical position.
    fn list_by_chromosome(&self, chromosome: &str) -> RepoResult<Vec<Snp>>;
    /// Lists markers grouped under one reference gene.
    fn list_by_refseq_gene(&self, gene_id: i64) -> RepoResult<Vec<Snp>>;
    /// Replaces all mutable fields of an existing marker.
    fn update(&self, snp: &Snp) -> RepoResult<()>;
    /// Links a marker to a reference-gene grouping.
    fn link_refseq_gene(&self, snp_id: &str, gene_id: i64) -> RepoResult<()>;
}

/// SQLite-backed SNP repository.
pub struct SqliteSnpRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSnpRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl SnpRepository for SqliteSnpRepository<'_> {
    fn create(&self, snp: &Snp) -> RepoResult<()> {
        snp.validate()?;

        self.conn
            .execute(
                "INSERT INTO snps (
                    id,
                    chromosome,
                    physical_position,
                    haplotypes_index,
                    reference_allele,
                    derived_allele,
                    original_strand,
                    dbsnp_ref,
                    genotypes1,
                    genotypes2,
                    refseqgene_id
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11);",
                params![
                    snp.id.as_str(),
                    snp.chromosome.as_str(),
                    snp.physical_position,
                    snp.haplotypes_index,
                    snp.reference_allele.as_deref(),
                    snp.derived_allele.as_deref(),
                    snp.original_strand.as_deref(),
                    snp.dbsnp_ref.as_deref(),
                    snp.genotypes1.as_str(),
                    snp.genotypes2.as_str(),
                    snp.refseqgene_id,
                ],
            )
            .map_err(|err| map_insert_error("snp", err))?;

        Ok(())
    }

    fn get(&self, id: &str) -> RepoResult<Option<Snp>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SNP_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_snp_row(row)?));
        }
        Ok(None)
    }

    fn list_by_chromosome(&self, chromosome: &str) -> RepoResult<Vec<Snp>> {
        let mut stmt = self.conn.prepare(&format!(
            "{SNP_SELECT_SQL} WHERE chromosome = ?1 ORDER BY physical_position;"
        ))?;
        let mut rows = stmt.query([chromosome])?;
        let mut snps = Vec::new();
        while let Some(row) = rows.next()? {
            snps.push(parse_snp_row(row)?);
        }
        Ok(snps)
    }

    fn list_by_refseq_gene(&self, gene_id: i64) -> RepoResult<Vec<Snp>> {
        let mut stmt = self.conn.prepare(&format!(
            "{SNP_SELECT_SQL} WHERE refseqgene_id = ?1 ORDER BY id;"
        ))?;
        let mut rows = stmt.query([gene_id])?;
        let mut snps = Vec::new();
        while let Some(row) = rows.next()? {
            snps.push(parse_snp_row(row)?);
        }
        Ok(snps)
    }

    fn update(&self, snp: &Snp) -> RepoResult<()> {
        snp.validate()?;

        let changed = self.conn.execute(
            "UPDATE snps
             SET
                chromosome = ?1,
                physical_position = ?2,
                haplotypes_index = ?3,
                reference_allele = ?4,
                derived_allele = ?5,
                original_strand = ?6,
                dbsnp_ref = ?7,
                genotypes1 = ?8,
                genotypes2 = ?9,
                refseqgene_id = ?10,
                last_modified = (strftime('%s', 'now') * 1000)
             WHERE id = ?11;",
            params![
                snp.chromosome.as_str(),
                snp.physical_position,
                snp.haplotypes_index,
                snp.reference_allele.as_deref(),
                snp.derived_allele.as_deref(),
                snp.original_strand.as_deref(),
                snp.dbsnp_ref.as_deref(),
                snp.genotypes1.as_str(),
                snp.genotypes2.as_str(),
                snp.refseqgene_id,
                snp.id.as_str(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(format!("snp id {}", snp.id)));
        }
        Ok(())
    }

    fn link_refseq_gene(&self, snp_id: &str, gene_id: i64) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE snps
             SET
                refseqgene_id = ?1,
                last_modified = (strftime('%s', 'now') * 1000)
             WHERE id = ?2;",
            params![gene_id, snp_id],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(format!("snp id {snp_id}")));
        }
        Ok(())
    }
}

fn parse_snp_row(row: &Row<'_>) -> RepoResult<Snp> {
    Ok(Snp {
        id: row.get("id")?,
        chromosome: row.get("chromosome")?,
        physical_position: row.get("physical_position")?,
        haplotypes_index: row.get("haplotypes_index")?,
        reference_allele: row.get("reference_allele")?,
        derived_allele: row.get("derived_allele")?,
        original_strand: row.get("original_strand")?,
        dbsnp_ref: row.get("dbsnp_ref")?,
        genotypes1: row.get("genotypes1")?,
        genotypes2: row.get("genotypes2")?,
        refseqgene_id: row.get("refseqgene_id")?,
        last_modified: Some(row.get("last_modified")?),
    })
}
