use hgdp_core::db::open_db_in_memory;
use hgdp_core::{
    RefSeqGeneRepository, RepoError, Snp, SnpRepository, SqliteRefSeqGeneRepository,
    SqliteSnpRepository,
};

#[test]
fn create_and_get_roundtrip_with_empty_defaults() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSnpRepository::new(&conn);

    repo.create(&Snp::new("rs1333")).unwrap();
    let loaded = repo.get("rs1333").unwrap().unwrap();

    assert_eq!(loaded.id, "rs1333");
    assert_eq!(loaded.chromosome, "");
    assert_eq!(loaded.genotypes1, "");
    assert_eq!(loaded.genotypes2, "");
    assert_eq!(loaded.physical_position, None);
    assert_eq!(loaded.refseqgene_id, None);
    assert!(loaded.last_modified.is_some());
    assert_eq!(loaded.display_label(), "SNP rs1333");
}

#[test]
fn duplicate_id_is_a_unique_violation() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSnpRepository::new(&conn);

    repo.create(&Snp::new("rs1333")).unwrap();
    let err = repo.create(&Snp::new("rs1333")).unwrap_err();

    assert!(matches!(
        err,
        RepoError::UniqueViolation { entity: "snp", .. }
    ));
}

#[test]
fn empty_id_is_rejected_before_persistence() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSnpRepository::new(&conn);

    let err = repo.create(&Snp::new("")).unwrap_err();
    assert!(matches!(err, RepoError::SnpValidation(_)));
}

#[test]
fn update_replaces_marker_fields() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSnpRepository::new(&conn);

    let mut snp = Snp::new("rs1333");
    repo.create(&snp).unwrap();

    snp.chromosome = "22".to_string();
    snp.physical_position = Some(1_234_567);
    snp.reference_allele = Some("A".to_string());
    snp.derived_allele = Some("G".to_string());
    snp.original_strand = Some("+".to_string());
    snp.dbsnp_ref = Some("rs1333".to_string());
    snp.genotypes1 = "0120".to_string();
    snp.genotypes2 = "2101".to_string();
    repo.update(&snp).unwrap();

    let loaded = repo.get("rs1333").unwrap().unwrap();
    assert_eq!(loaded.chromosome, "22");
    assert_eq!(loaded.physical_position, Some(1_234_567));
    assert_eq!(loaded.reference_allele.as_deref(), Some("A"));
    assert_eq!(loaded.derived_allele.as_deref(), Some("G"));
    assert_eq!(loaded.genotypes1, "0120");
    assert_eq!(loaded.genotypes2, "2101");
}

#[test]
fn update_missing_marker_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSnpRepository::new(&conn);

    let err = repo.update(&Snp::new("rs404")).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(_)));
}

#[test]
fn link_refseq_gene_groups_markers() {
    let conn = open_db_in_memory().unwrap();
    let snps = SqliteSnpRepository::new(&conn);
    let genes = SqliteRefSeqGeneRepository::new(&conn);

    let gene_id = genes.create().unwrap();
    assert!(genes.get(gene_id).unwrap().is_some());

    snps.create(&Snp::new("rs1")).unwrap();
    snps.create(&Snp::new("rs2")).unwrap();
    snps.create(&Snp::new("rs3")).unwrap();
    snps.link_refseq_gene("rs1", gene_id).unwrap();
    snps.link_refseq_gene("rs3", gene_id).unwrap();

    let grouped = snps.list_by_refseq_gene(gene_id).unwrap();
    let ids: Vec<&str> = grouped.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, ["rs1", "rs3"]);
}

#[test]
fn list_by_chromosome_orders_by_physical_position() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSnpRepository::new(&conn);

    for (id, position) in [("rs_b", 200), ("rs_a", 100), ("rs_c", 300)] {
        let mut snp = Snp::new(id);
        snp.chromosome = "1".to_string();
        snp.physical_position = Some(position);
        repo.create(&snp).unwrap();
    }

    let on_chr1 = repo.list_by_chromosome("1").unwrap();
    let ids: Vec<&str> = on_chr1.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, ["rs_a", "rs_b", "rs_c"]);
}
