//! Tests for pgx-model types.

use pgx_model::{
    ClassificationRequest, CypPhenotypeRow, Gene, GeneInput, MarkerDefinition, ModelError,
    Phenotype, RecommendationRow, ReferenceData,
};

fn marker(gene: Gene, column: &str, rsid: &str) -> MarkerDefinition {
    MarkerDefinition {
        gene,
        column: column.to_string(),
        rsid: rsid.to_string(),
        ref_allele: "C".to_string(),
        var_allele: "T".to_string(),
        star_allele: "*2A".to_string(),
        options: vec!["-/-".to_string(), "C/C".to_string(), "C/T".to_string()],
    }
}

fn cyp_row(diplotype: &str, summary: &str) -> CypPhenotypeRow {
    CypPhenotypeRow {
        diplotype: diplotype.to_string(),
        summary: summary.to_string(),
    }
}

fn rec_row(gene: Gene, phenotype: &str, text: &str) -> RecommendationRow {
    RecommendationRow {
        gene,
        phenotype: phenotype.to_string(),
        rec_text: text.to_string(),
    }
}

#[test]
fn reference_groups_markers_in_table_order() {
    let data = ReferenceData::new(
        vec![
            marker(Gene::Dpyd, "DPYD_2A", "rs3918290"),
            marker(Gene::Ugt1a1, "UGT1A1_80", "rs887829"),
            marker(Gene::Dpyd, "DPYD_13", "rs55886062"),
        ],
        vec![],
        vec![],
        vec![],
    )
    .expect("reference data");

    let columns: Vec<&str> = data
        .markers(Gene::Dpyd)
        .iter()
        .map(|m| m.column.as_str())
        .collect();
    assert_eq!(columns, vec!["DPYD_2A", "DPYD_13"]);
    assert!(data.markers(Gene::Cyp2d6).is_empty());
    assert_eq!(data.marker_count(), 3);
    assert_eq!(
        data.marker_by_rsid(Gene::Ugt1a1, "RS887829")
            .map(|m| m.column.as_str()),
        Some("UGT1A1_80")
    );
}

#[test]
fn reference_rejects_duplicate_columns_within_gene() {
    let err = ReferenceData::new(
        vec![
            marker(Gene::Dpyd, "DPYD_2A", "rs3918290"),
            marker(Gene::Dpyd, "DPYD_2A", "rs55886062"),
        ],
        vec![],
        vec![],
        vec![],
    )
    .unwrap_err();
    assert!(matches!(err, ModelError::DuplicateColumn { gene: Gene::Dpyd, .. }));
}

#[test]
fn reference_allows_same_column_in_different_genes() {
    let data = ReferenceData::new(
        vec![
            marker(Gene::Dpyd, "SNP1", "rs1"),
            marker(Gene::Cyp2d6, "SNP1", "rs2"),
        ],
        vec![],
        vec![],
        vec![],
    );
    assert!(data.is_ok());
}

#[test]
fn cyp2d6_lookup_is_exact_and_first_row_wins() {
    let data = ReferenceData::new(
        vec![],
        vec![],
        vec![
            cyp_row("*1/*4", "Intermediate Metabolizer"),
            cyp_row("*1/*4", "Normal Metabolizer"),
        ],
        vec![],
    )
    .expect("reference data");
    assert_eq!(data.cyp2d6_summary("*1/*4"), Some("Intermediate Metabolizer"));
    assert_eq!(data.cyp2d6_summary("*4/*1"), None);
}

#[test]
fn long_recommendation_matches_by_category_in_table_order() {
    let data = ReferenceData::new(
        vec![],
        vec![],
        vec![],
        vec![
            rec_row(Gene::Cyp2d6, "Metabolizador intermedio", "first"),
            rec_row(Gene::Dpyd, "Metabolizador intermedio", "dpyd"),
            rec_row(Gene::Cyp2d6, "Intermediate Metabolizer", "second"),
        ],
    )
    .expect("reference data");
    assert_eq!(
        data.long_recommendation(Gene::Cyp2d6, Phenotype::Intermediate),
        Some("first")
    );
    assert_eq!(
        data.long_recommendation(Gene::Dpyd, Phenotype::Intermediate),
        Some("dpyd")
    );
    assert_eq!(data.long_recommendation(Gene::Ugt1a1, Phenotype::Poor), None);
}

#[test]
fn request_defaults_follow_gene_modes() {
    let request: ClassificationRequest = serde_json::from_str("{}").expect("empty request");
    assert_eq!(request.dpyd, GeneInput::empty_markers());
    assert_eq!(request.ugt1a1, GeneInput::empty_markers());
    assert_eq!(request.cyp2d6, GeneInput::diplotype("*1", "*1"));
    assert_eq!(request.patient.sex, "-");
    assert_eq!(request.patient.full_name(), "");
}

#[test]
fn request_parses_tagged_inputs() {
    let json = r#"{
        "patient": {"first_name": "Ana", "last_name": "Ruiz", "record_number": "H-1"},
        "dpyd": {"mode": "markers", "genotypes": {"DPYD_2A": "C/T"}},
        "ugt1a1": {"mode": "diplotype", "allele1": "*28"},
        "cyp2d6": {"mode": "diplotype", "allele1": "*4", "allele2": "*10"}
    }"#;
    let request: ClassificationRequest = serde_json::from_str(json).expect("request");
    assert_eq!(request.patient.full_name(), "Ana Ruiz");
    match request.input(Gene::Dpyd) {
        GeneInput::Markers { genotypes } => {
            assert_eq!(genotypes.get("DPYD_2A").map(String::as_str), Some("C/T"));
        }
        other => panic!("unexpected input: {other:?}"),
    }
    assert_eq!(request.ugt1a1, GeneInput::diplotype("*28", "*1"));
    assert_eq!(request.input(Gene::Cyp2d6).mode(), "diplotype");
}
