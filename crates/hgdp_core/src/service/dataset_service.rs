//! Dataset use-case service.
//!
//! # Responsibility
//! - Register individuals, resolving population names through the explicit
//!   lookup-or-create operation.
//! - Provide population membership and display rendering entry points.
//!
//! # Invariants
//! - Population names are lowercased before resolution.
//! - Classification hints are applied only when registration actually
//!   creates a new population.
//! - Service APIs never bypass repository validation/persistence contracts.

use crate::model::individual::Individual;
use crate::model::population::{Population, UNDEF};
use crate::repo::individual_repo::IndividualRepository;
use crate::repo::population_repo::{PopulationDefaults, PopulationRepository};
use crate::repo::{LookupOrCreate, RepoError, RepoResult};
use log::info;

/// Request model for registering one individual.
///
/// The optional population is a *name*; resolution into a record (creating
/// it when absent) happens inside the service, visibly, instead of as a
/// hidden constructor side effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterIndividual {
    pub name: String,
    pub population: Option<String>,
    pub sex: Option<String>,
    /// Classification hints, used only if a brand-new population is created.
    pub region: String,
    pub working_unit: String,
    pub continent_macroarea: String,
}

impl RegisterIndividual {
    /// Builds a request with no population link and `"undef"` hints.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            population: None,
            sex: None,
            region: UNDEF.to_string(),
            working_unit: UNDEF.to_string(),
            continent_macroarea: UNDEF.to_string(),
        }
    }

    pub fn with_population(mut self, population: impl Into<String>) -> Self {
        self.population = Some(population.into());
        self
    }

    pub fn with_sex(mut self, sex: impl Into<String>) -> Self {
        self.sex = Some(sex.into());
        self
    }
}

/// Use-case service over population and individual repositories.
pub struct DatasetService<P, I> {
    populations: P,
    individuals: I,
}

impl<P, I> DatasetService<P, I>
where
    P: PopulationRepository
        + LookupOrCreate<Entity = Population, Filter = str, Defaults = PopulationDefaults>,
    I: IndividualRepository,
{
    /// Creates a service using the provided repository implementations.
    pub fn new(populations: P, individuals: I) -> Self {
        Self {
            populations,
            individuals,
        }
    }

    /// Registers one individual, resolving its population by name.
    ///
    /// # Contract
    /// - The population name is lowercased, then looked up or created; the
    ///   request's classification hints apply only to a newly created
    ///   population record.
    /// - Returns the persisted individual with its generated row id.
    pub fn register_individual(&self, request: &RegisterIndividual) -> RepoResult<Individual> {
        let mut individual = Individual::new(&request.name, request.sex.as_deref());

        if let Some(population_name) = request.population.as_deref() {
            let defaults = PopulationDefaults {
                region: request.region.clone(),
                working_unit: request.working_unit.clone(),
                continent_macroarea: request.continent_macroarea.clone(),
            };
            let population = self
                .populations
                .get_or_create(population_name.to_lowercase().as_str(), &defaults)?;
            individual.population_id = population.id;
        }

        let id = self.individuals.create(&individual)?;
        let persisted = self
            .individuals
            .get(id)?
            .ok_or_else(|| RepoError::NotFound(format!("individual id {id}")))?;

        info!(
            "event=register_individual module=service status=ok name={} population={} sex={}",
            persisted.name,
            request.population.as_deref().unwrap_or("-"),
            persisted.sex.as_code()
        );
        Ok(persisted)
    }

    /// Returns the named population, creating it with `"undef"`
    /// classification when absent.
    pub fn ensure_population(&self, name: &str) -> RepoResult<Population> {
        self.populations
            .get_or_create(name.to_lowercase().as_str(), &PopulationDefaults::default())
    }

    /// Lists the individuals belonging to the named population.
    pub fn population_members(&self, name: &str) -> RepoResult<Vec<Individual>> {
        let population = self
            .populations
            .get_by_name(name)?
            .ok_or_else(|| RepoError::NotFound(format!("population `{name}`")))?;
        let id = population
            .id
            .ok_or_else(|| RepoError::InvalidData("population record without id".to_string()))?;
        self.populations.members(id)
    }

    /// Renders the honorific display form of an individual, resolving its
    /// linked population's name.
    pub fn display_label(&self, individual: &Individual) -> RepoResult<String> {
        let population_name = match individual.population_id {
            Some(id) => self.populations.get(id)?.map(|p| p.original_name),
            None => None,
        };
        Ok(individual.display_label(population_name.as_deref()))
    }
}
