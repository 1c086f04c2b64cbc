//! Population repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide persistence APIs over the `populations` table.
//! - Implement name-keyed lookup-or-create, the backbone of implicit
//!   population creation during individual registration.
//!
//! # Invariants
//! - Name probes are lowercased before querying, matching the stored form.
//! - `set_field` lowercases values and refreshes `last_modified`.

use crate::model::individual::Individual;
use crate::model::population::{Population, PopulationField, UNDEF};
use crate::repo::individual_repo::parse_individual_row;
use crate::repo::{map_insert_error, LookupOrCreate, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

const POPULATION_SELECT_SQL: &str = "SELECT
    id,
    original_name,
    region,
    working_unit,
    continent_macroarea,
    last_modified
FROM populations";

/// Classification fields applied only when lookup-or-create actually
/// creates a new population.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopulationDefaults {
    pub region: String,
    pub working_unit: String,
    pub continent_macroarea: String,
}

impl Default for PopulationDefaults {
    fn default() -> Self {
        Self {
            region: UNDEF.to_string(),
            working_unit: UNDEF.to_string(),
            continent_macroarea: UNDEF.to_string(),
        }
    }
}

/// Repository interface for population persistence.
pub trait PopulationRepository {
    /// Persists a population and returns its generated row id.
    fn create(&self, population: &Population) -> RepoResult<i64>;
    /// Gets one population by row id.
    fn get(&self, id: i64) -> RepoResult<Option<Population>>;
    /// Gets one population by name; the probe is lowercased first.
    fn get_by_name(&self, name: &str) -> RepoResult<Option<Population>>;
    /// Lists all populations ordered by name.
    fn list(&self) -> RepoResult<Vec<Population>>;
    /// Overwrites one field with the lowercase form of `value`.
    fn set_field(&self, id: i64, field: PopulationField, value: &str) -> RepoResult<()>;
    /// Lists the individuals belonging to this population.
    fn members(&self, id: i64) -> RepoResult<Vec<Individual>>;
}

/// SQLite-backed population repository.
pub struct SqlitePopulationRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePopulationRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl PopulationRepository for SqlitePopulationRepository<'_> {
    fn create(&self, population: &Population) -> RepoResult<i64> {
        self.conn
            .execute(
                "INSERT INTO populations (
                    original_name,
                    region,
                    working_unit,
                    continent_macroarea
                ) VALUES (?1, ?2, ?3, ?4);",
                params![
                    population.original_name.as_str(),
                    population.region.as_str(),
                    population.working_unit.as_str(),
                    population.continent_macroarea.as_str(),
                ],
            )
            .map_err(|err| map_insert_error("population", err))?;

        Ok(self.conn.last_insert_rowid())
    }

    fn get(&self, id: i64) -> RepoResult<Option<Population>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{POPULATION_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_population_row(row)?));
        }
        Ok(None)
    }

    fn get_by_name(&self, name: &str) -> RepoResult<Option<Population>> {
        let probe = name.to_lowercase();
        let mut stmt = self.conn.prepare(&format!(
            "{POPULATION_SELECT_SQL} WHERE original_name = ?1 LIMIT 2;"
        ))?;
        let mut rows = stmt.query([probe.as_str()])?;

        let first = match rows.next()? {
            Some(row) => parse_population_row(row)?,
            None => return Ok(None),
        };
        if rows.next()?.is_some() {
            return Err(RepoError::AmbiguousLookup {
                entity: "population",
                detail: format!("original_name = `{probe}` matched more than one record"),
            });
        }
        Ok(Some(first))
    }

    fn list(&self) -> RepoResult<Vec<Population>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{POPULATION_SELECT_SQL} ORDER BY original_name;"))?;
        let mut rows = stmt.query([])?;
        let mut populations = Vec::new();
        while let Some(row) = rows.next()? {
            populations.push(parse_population_row(row)?);
        }
        Ok(populations)
    }

    fn set_field(&self, id: i64, field: PopulationField, value: &str) -> RepoResult<()> {
        // Column name comes from the closed enum, never from caller input.
        let changed = self
            .conn
            .execute(
                &format!(
                    "UPDATE populations
                     SET
                        {} = ?1,
                        last_modified = (strftime('%s', 'now') * 1000)
                     WHERE id = ?2;",
                    field.column()
                ),
                params![value.to_lowercase(), id],
            )
            .map_err(|err| map_insert_error("population", err))?;

        if changed == 0 {
            return Err(RepoError::NotFound(format!("population id {id}")));
        }
        Ok(())
    }

    fn members(&self, id: i64) -> RepoResult<Vec<Individual>> {
        let mut stmt = self.conn.prepare(
            "SELECT
                id,
                name,
                population_id,
                sex,
                haplotypes,
                genotypes_index,
                last_modified
             FROM individuals
             WHERE population_id = ?1
             ORDER BY id;",
        )?;
        let mut rows = stmt.query([id])?;
        let mut individuals = Vec::new();
        while let Some(row) = rows.next()? {
            individuals.push(parse_individual_row(row)?);
        }
        Ok(individuals)
    }
}

impl LookupOrCreate for SqlitePopulationRepository<'_> {
    type Entity = Population;
    type Filter = str;
    type Defaults = PopulationDefaults;

    fn lookup(&self, filter: &str) -> RepoResult<Option<Population>> {
        self.get_by_name(filter)
    }

    fn create_from(&self, filter: &str, defaults: &PopulationDefaults) -> RepoResult<Population> {
        let population = Population::with_classification(
            filter,
            &defaults.region,
            &defaults.working_unit,
            &defaults.continent_macroarea,
        );
        let id = self.create(&population)?;
        self.get(id)?
            .ok_or_else(|| RepoError::NotFound(format!("population id {id}")))
    }
}

pub(crate) fn parse_population_row(row: &Row<'_>) -> RepoResult<Population> {
    Ok(Population {
        id: Some(row.get("id")?),
        original_name: row.get("original_name")?,
        region: row.get("region")?,
        working_unit: row.get("working_unit")?,
        continent_macroarea: row.get("continent_macroarea")?,
        last_modified: Some(row.get("last_modified")?),
    })
}
