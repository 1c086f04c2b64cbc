use hgdp_core::db::open_db_in_memory;
use hgdp_core::{
    LookupOrCreate, Population, PopulationDefaults, PopulationField, PopulationRepository,
    RepoError, SqlitePopulationRepository, UNDEF,
};

#[test]
fn create_and_get_roundtrip_stores_lowercase_name() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePopulationRepository::new(&conn);

    let id = repo.create(&Population::new("Greeks")).unwrap();
    let loaded = repo.get(id).unwrap().unwrap();

    assert_eq!(loaded.original_name, "greeks");
    assert_eq!(loaded.region, UNDEF);
    assert_eq!(loaded.working_unit, UNDEF);
    assert_eq!(loaded.continent_macroarea, UNDEF);
    assert!(loaded.last_modified.is_some());
}

#[test]
fn constructor_lowercases_every_classification_field() {
    let population = Population::with_classification("Martians", "Olympus Mons", "Crew A", "MARS");

    assert_eq!(population.original_name, "martians");
    assert_eq!(population.region, "olympus mons");
    assert_eq!(population.working_unit, "crew a");
    assert_eq!(population.continent_macroarea, "mars");
}

#[test]
fn duplicate_name_differing_only_in_case_is_a_unique_violation() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePopulationRepository::new(&conn);

    repo.create(&Population::new("greeks")).unwrap();
    let err = repo.create(&Population::new("GREEKS")).unwrap_err();

    assert!(matches!(
        err,
        RepoError::UniqueViolation {
            entity: "population",
            ..
        }
    ));
}

#[test]
fn get_by_name_lowercases_the_probe() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePopulationRepository::new(&conn);

    repo.create(&Population::new("vesuvians")).unwrap();

    let found = repo.get_by_name("Vesuvians").unwrap().unwrap();
    assert_eq!(found.original_name, "vesuvians");
    assert!(repo.get_by_name("atlanteans").unwrap().is_none());
}

#[test]
fn get_or_create_is_idempotent_and_creates_at_most_one_record() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePopulationRepository::new(&conn);

    let defaults = PopulationDefaults {
        region: "mediterranean".to_string(),
        working_unit: "unit-1".to_string(),
        continent_macroarea: "europe".to_string(),
    };

    let first = repo.get_or_create("greeks", &defaults).unwrap();
    let second = repo.get_or_create("greeks", &defaults).unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(first.region, "mediterranean");
    assert_eq!(repo.list().unwrap().len(), 1);
}

#[test]
fn creation_only_defaults_are_never_applied_to_an_existing_record() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePopulationRepository::new(&conn);

    repo.create(&Population::new("greeks")).unwrap();

    let other_defaults = PopulationDefaults {
        region: "aegean".to_string(),
        ..PopulationDefaults::default()
    };
    let found = repo.get_or_create("greeks", &other_defaults).unwrap();

    assert_eq!(found.region, UNDEF);
}

#[test]
fn set_field_lowercases_and_persists() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePopulationRepository::new(&conn);

    let id = repo.create(&Population::new("martians")).unwrap();
    repo.set_field(id, PopulationField::ContinentMacroarea, "Mars")
        .unwrap();

    let loaded = repo.get(id).unwrap().unwrap();
    assert_eq!(loaded.continent_macroarea, "mars");
}

#[test]
fn set_field_on_missing_population_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePopulationRepository::new(&conn);

    let err = repo
        .set_field(999, PopulationField::Region, "nowhere")
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound(_)));
}

#[test]
fn in_memory_set_helper_lowercases_values() {
    let mut population = Population::new("martians");
    population.set(PopulationField::ContinentMacroarea, "Mars");
    assert_eq!(population.continent_macroarea, "mars");

    population.set(PopulationField::Region, "42");
    assert_eq!(population.region, "42");
}

#[test]
fn matches_name_ignores_case() {
    let population = Population::new("Greeks");
    assert!(population.matches_name("GREEKS"));
    assert!(population.matches_name("greeks"));
    assert!(!population.matches_name("romans"));
}

#[test]
fn list_orders_populations_by_name() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePopulationRepository::new(&conn);

    repo.create(&Population::new("vesuvians")).unwrap();
    repo.create(&Population::new("aliens")).unwrap();
    repo.create(&Population::new("greeks")).unwrap();

    let names: Vec<String> = repo
        .list()
        .unwrap()
        .into_iter()
        .map(|p| p.original_name)
        .collect();
    assert_eq!(names, ["aliens", "greeks", "vesuvians"]);
}
