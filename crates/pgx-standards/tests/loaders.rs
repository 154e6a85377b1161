use pgx_model::{Gene, Phenotype};
use pgx_standards::{ReferenceRegistry, load_default_reference, reference_root};

#[test]
fn loads_bundled_reference() {
    let registry = load_default_reference().expect("load bundled reference");
    let data = &registry.data;

    assert_eq!(data.markers(Gene::Dpyd).len(), 4);
    assert_eq!(data.markers(Gene::Ugt1a1).len(), 1);
    assert_eq!(data.markers(Gene::Cyp2d6).len(), 5);
    assert!(data.marker_by_rsid(Gene::Ugt1a1, "RS887829").is_some());
    assert!(data.cyp2d6_stars().iter().any(|s| s == "*4"));
}

#[test]
fn bundled_tables_classify_cleanly() {
    let (registry, summary) =
        ReferenceRegistry::verify_and_load(&reference_root()).expect("verify bundled reference");

    assert_eq!(summary.file_count, 4);
    // Only the copy-number marker lacks a star allele.
    assert_eq!(registry.issues.len(), 1);
    assert_eq!(registry.issues[0].kind, "marker_without_star");

    for gene in [Gene::Dpyd, Gene::Ugt1a1, Gene::Cyp2d6] {
        for phenotype in [Phenotype::Normal, Phenotype::Intermediate, Phenotype::Poor] {
            assert!(
                registry.data.long_recommendation(gene, phenotype).is_some(),
                "missing recommendation for {gene} {phenotype}"
            );
        }
    }
    assert_eq!(
        registry.data.cyp2d6_summary("*4/*4"),
        Some("Poor Metabolizer")
    );
}
