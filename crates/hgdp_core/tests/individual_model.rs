use hgdp_core::{Individual, IndividualValidationError, Sex, MAX_HAPLOTYPES_CHARS};

#[test]
fn sex_normalization_maps_exact_spellings() {
    for input in ["1", "m", "M", "male", "Male", "MALE"] {
        assert_eq!(Sex::parse(input), Sex::Male, "input `{input}`");
    }
    for input in ["2", "f", "F", "female", "Female", "FEMALE"] {
        assert_eq!(Sex::parse(input), Sex::Female, "input `{input}`");
    }
    for input in ["", "x", "3", "man", "fem", "males", "unknown"] {
        assert_eq!(Sex::parse(input), Sex::Unknown, "input `{input}`");
    }
    assert_eq!(Sex::parse_opt(None), Sex::Unknown);
}

#[test]
fn sex_codes_roundtrip() {
    assert_eq!(Sex::Male.as_code(), "m");
    assert_eq!(Sex::Female.as_code(), "f");
    assert_eq!(Sex::Unknown.as_code(), "u");
    assert_eq!(Sex::from_code("m"), Some(Sex::Male));
    assert_eq!(Sex::from_code("f"), Some(Sex::Female));
    assert_eq!(Sex::from_code("u"), Some(Sex::Unknown));
    assert_eq!(Sex::from_code("x"), None);
}

#[test]
fn new_uppercases_name_and_defaults() {
    let individual = Individual::new("Einstein", None);

    assert_eq!(individual.name, "EINSTEIN");
    assert_eq!(individual.sex, Sex::Unknown);
    assert_eq!(individual.id, None);
    assert_eq!(individual.population_id, None);
    assert_eq!(individual.haplotypes, None);
    assert_eq!(individual.genotypes_index, None);
}

#[test]
fn display_label_uses_honorific_and_population() {
    let mut individual = Individual::new("Einstein", None);
    assert_eq!(individual.display_label(None), "Mr. EINSTEIN (none)");
    assert_eq!(
        individual.display_label(Some("greeks")),
        "Mr. EINSTEIN (greeks)"
    );

    individual.sex = Sex::Female;
    assert_eq!(
        individual.display_label(Some("aliens")),
        "Mrs. EINSTEIN (aliens)"
    );

    individual.sex = Sex::Male;
    assert_eq!(
        individual.display_label(Some("greeks")),
        "Mr. EINSTEIN (greeks)"
    );
}

#[test]
fn display_concatenated_appends_suffix() {
    let individual = Individual::new("Einstein", None);
    assert_eq!(individual.display_concatenated(" Albert"), "EINSTEIN Albert");
}

#[test]
fn identity_equals_normalizes_the_probe() {
    let individual = Individual::new("Einstein", None);
    assert!(individual.identity_equals("Einstein"));
    assert!(individual.identity_equals("einstein"));
    assert!(individual.identity_equals("EINSTEIN"));
    assert!(!individual.identity_equals("Bohr"));
}

#[test]
fn validate_rejects_oversized_haplotypes() {
    let mut individual = Individual::new("Einstein", None);
    individual.haplotypes = Some("a".repeat(MAX_HAPLOTYPES_CHARS));
    assert!(individual.validate().is_ok());

    individual.haplotypes = Some("a".repeat(MAX_HAPLOTYPES_CHARS + 1));
    assert_eq!(
        individual.validate(),
        Err(IndividualValidationError::HaplotypesTooLong {
            len: MAX_HAPLOTYPES_CHARS + 1
        })
    );
}

#[test]
fn validate_rejects_empty_name() {
    let individual = Individual::new("", None);
    assert_eq!(
        individual.validate(),
        Err(IndividualValidationError::EmptyName)
    );
}

#[test]
fn serialization_uses_single_character_sex_codes() {
    let individual = Individual::new("ET", Some("f"));
    let json = serde_json::to_value(&individual).unwrap();
    assert_eq!(json["name"], "ET");
    assert_eq!(json["sex"], "f");

    let decoded: Individual = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, individual);
}
