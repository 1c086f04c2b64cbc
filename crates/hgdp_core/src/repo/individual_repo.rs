//! Individual repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide persistence APIs over the `individuals` table.
//! - Keep the population link consistent with the `populations` table.
//!
//! # Invariants
//! - Write paths call `Individual::validate()` before SQL mutations.
//! - Name probes are uppercased before querying, matching the stored form.
//! - Uniqueness of `name` and `genotypes_index` is enforced by storage.

use crate::model::individual::{
    Individual, IndividualValidationError, Sex, MAX_HAPLOTYPES_CHARS,
};
use crate::repo::{map_insert_error, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

const INDIVIDUAL_SELECT_SQL: &str = "SELECT
    id,
    name,
    population_id,
    sex,
    haplotypes,
    genotypes_index,
    last_modified
FROM individuals";

/// Repository interface for individual persistence.
pub trait IndividualRepository {
    /// Persists an individual and returns its generated row id.
    fn create(&self, individual: &Individual) -> RepoResult<i64>;
    /// Gets one individual by row id.
    fn get(&self, id: i64) -> RepoResult<Option<Individual>>;
    /// Gets one individual by identity; the probe is uppercased first.
    fn get_by_name(&self, name: &str) -> RepoResult<Option<Individual>>;
    /// Lists all individuals ordered by identity.
    fn list(&self) -> RepoResult<Vec<Individual>>;
    /// Links an individual to a population.
    fn assign_population(&self, individual_id: i64, population_id: i64) -> RepoResult<()>;
    /// Replaces the genotype/haplotype payload fields.
    fn set_genotype_data(
        &self,
        individual_id: i64,
        haplotypes: Option<&str>,
        genotypes_index: Option<i64>,
    ) -> RepoResult<()>;
}

/// SQLite-backed individual repository.
pub struct SqliteIndividualRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteIndividualRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl IndividualRepository for SqliteIndividualRepository<'_> {
    fn create(&self, individual: &Individual) -> RepoResult<i64> {
        individual.validate()?;

        self.conn
            .execute(
                "INSERT INTO individuals (
                    name,
                    population_id,
                    sex,
                    haplotypes,
                    genotypes_index
                ) VALUES (?1, ?2, ?3, ?4, ?5);",
                params![
                    individual.name.as_str(),
                    individual.population_id,
                    individual.sex.as_code(),
                    individual.haplotypes.as_deref(),
                    individual.genotypes_index,
                ],
            )
            .map_err(|err| map_insert_error("individual", err))?;

        Ok(self.conn.last_insert_rowid())
    }

    fn get(&self, id: i64) -> RepoResult<Option<Individual>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{INDIVIDUAL_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_individual_row(row)?));
        }
        Ok(None)
    }

    fn get_by_name(&self, name: &str) -> RepoResult<Option<Individual>> {
        let probe = name.to_uppercase();
        let mut stmt = self
            .conn
            .prepare(&format!("{INDIVIDUAL_SELECT_SQL} WHERE name = ?1;"))?;
        let mut rows = stmt.query([probe.as_str()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_individual_row(row)?));
        }
        Ok(None)
    }

    fn list(&self) -> RepoResult<Vec<Individual>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{INDIVIDUAL_SELECT_SQL} ORDER BY name;"))?;
        let mut rows = stmt.query([])?;
        let mut individuals = Vec::new();
        while let Some(row) = rows.next()? {
            individuals.push(parse_individual_row(row)?);
        }
        Ok(individuals)
    }

    fn assign_population(&self, individual_id: i64, population_id: i64) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE individuals
             SET
                population_id = ?1,
                last_modified = (strftime('%s', 'now') * 1000)
             WHERE id = ?2;",
            params![population_id, individual_id],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(format!("individual id {individual_id}")));
        }
        Ok(())
    }

    fn set_genotype_data(
        &self,
        individual_id: i64,
        haplotypes: Option<&str>,
        genotypes_index: Option<i64>,
    ) -> RepoResult<()> {
        if let Some(payload) = haplotypes {
            let len = payload.chars().count();
            if len > MAX_HAPLOTYPES_CHARS {
                return Err(IndividualValidationError::HaplotypesTooLong { len }.into());
            }
        }

        let changed = self
            .conn
            .execute(
                "UPDATE individuals
                 SET
                    haplotypes = ?1,
                    genotypes_index = ?2,
                    last_modified = (strftime('%s', 'now') * 1000)
                 WHERE id = ?3;",
                params![haplotypes, genotypes_index, individual_id],
            )
            .map_err(|err| map_insert_error("individual", err))?;

        if changed == 0 {
            return Err(RepoError::NotFound(format!("individual id {individual_id}")));
        }
        Ok(())
    }
}

pub(crate) fn parse_individual_row(row: &Row<'_>) -> RepoResult<Individual> {
    let sex_code: String = row.get("sex")?;
    let sex = Sex::from_code(&sex_code).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid sex code `{sex_code}` in individuals.sex"))
    })?;

    Ok(Individual {
        id: Some(row.get("id")?),
        name: row.get("name")?,
        population_id: row.get("population_id")?,
        sex,
        haplotypes: row.get("haplotypes")?,
        genotypes_index: row.get("genotypes_index")?,
        last_modified: Some(row.get("last_modified")?),
    })
}
