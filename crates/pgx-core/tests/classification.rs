use std::collections::BTreeMap;
use std::sync::Arc;

use pgx_core::{PhenotypeEngine, SAFE_FALLBACK};
use pgx_model::{
    ClassificationRequest, CypPhenotypeRow, Gene, GeneInput, MarkerDefinition, Phenotype,
    RecommendationRow, ReferenceData,
};

fn marker(
    gene: Gene,
    column: &str,
    rsid: &str,
    reference: &str,
    var: &str,
    star: &str,
) -> MarkerDefinition {
    MarkerDefinition {
        gene,
        column: column.to_string(),
        rsid: rsid.to_string(),
        ref_allele: reference.to_string(),
        var_allele: var.to_string(),
        star_allele: star.to_string(),
        options: vec![
            "-/-".to_string(),
            format!("{reference}/{reference}"),
            format!("{reference}/{var}"),
            format!("{var}/{var}"),
        ],
    }
}

fn reference() -> ReferenceData {
    let markers = vec![
        marker(Gene::Dpyd, "DPYD_2A", "rs3918290", "C", "T", "*2A (c.1905+1G>A)"),
        marker(Gene::Dpyd, "DPYD_13", "rs55886062", "A", "C", "*13 (c.1679T>G)"),
        marker(Gene::Dpyd, "DPYD_HapB3", "rs56038477", "C", "T", "HapB3 (c.1236G>A)"),
        marker(Gene::Ugt1a1, "UGT1A1_80", "rs887829", "C", "T", "*80 (tag *28)"),
        marker(Gene::Cyp2d6, "CYP2D6_4", "rs3892097", "C", "T", "*4"),
        marker(Gene::Cyp2d6, "CYP2D6_10", "rs1065852", "G", "A", "*10"),
        marker(Gene::Cyp2d6, "CYP2D6_CNV", "CNV", "-", "-", "-"),
    ];
    let stars = ["*4", "*1", "*10", "*41", "*2"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let phenotypes = vec![
        CypPhenotypeRow {
            diplotype: "*1/*4".to_string(),
            summary: "Intermediate Metabolizer".to_string(),
        },
        CypPhenotypeRow {
            diplotype: "*1/*10".to_string(),
            summary: "Normal Metabolizer".to_string(),
        },
        CypPhenotypeRow {
            diplotype: "*1/*9".to_string(),
            summary: "Indeterminate".to_string(),
        },
    ];
    let recommendations = vec![
        RecommendationRow {
            gene: Gene::Dpyd,
            phenotype: "Metabolizador lento".to_string(),
            rec_text: "Evitar [CPIC].".to_string(),
        },
        RecommendationRow {
            gene: Gene::Ugt1a1,
            phenotype: "Indeterminado".to_string(),
            rec_text: "Repetir genotipado [DPWG]. https://example.org/ugt".to_string(),
        },
    ];
    ReferenceData::new(markers, stars, phenotypes, recommendations).expect("valid reference")
}

fn engine() -> PhenotypeEngine {
    PhenotypeEngine::new(Arc::new(reference()))
}

fn genotypes(pairs: &[(&str, &str)]) -> GeneInput {
    GeneInput::Markers {
        genotypes: pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<BTreeMap<_, _>>(),
    }
}

#[test]
fn dpyd_without_variants_is_normal() {
    let result = engine().classify(Gene::Dpyd, &GeneInput::empty_markers());
    assert_eq!(result.diplotype, "*1/*1");
    assert_eq!(result.phenotype_label(), "Metabolizador normal");
    assert_eq!(result.recommendation, "Dosis estándar según ficha técnica.");
    assert_eq!(
        result.polymorphism_notes,
        [
            "DPYD_2A (rs3918290): -/-",
            "DPYD_13 (rs55886062): -/-",
            "DPYD_HapB3 (rs56038477): -/-",
        ]
    );
}

#[test]
fn dpyd_single_heterozygous_marker_is_intermediate() {
    let result = engine().classify(Gene::Dpyd, &genotypes(&[("DPYD_13", "C/A")]));
    assert_eq!(result.diplotype, "*1/*13");
    assert_eq!(result.phenotype, Phenotype::Intermediate);
    assert_eq!(result.phenotype_label(), "Metabolizador intermedio");
}

#[test]
fn dpyd_homozygous_marker_is_poor() {
    let result = engine().classify(Gene::Dpyd, &genotypes(&[("DPYD_2A", "T/T")]));
    assert_eq!(result.diplotype, "*2A/*2A");
    assert_eq!(result.phenotype_label(), "Metabolizador lento");
    assert_eq!(result.dropped_occurrences, 0);
}

#[test]
fn dpyd_extra_occurrences_are_counted() {
    let result = engine().classify(
        Gene::Dpyd,
        &genotypes(&[("DPYD_2A", "C/T"), ("DPYD_13", "C/C"), ("DPYD_HapB3", "C/T")]),
    );
    assert_eq!(result.diplotype, "*2A/*13");
    assert_eq!(result.phenotype, Phenotype::Poor);
    assert_eq!(result.dropped_occurrences, 2);
}

#[test]
fn dpyd_unknown_genotype_is_wild_type() {
    let result = engine().classify(Gene::Dpyd, &genotypes(&[("DPYD_2A", "G/G")]));
    assert_eq!(result.diplotype, "*1/*1");
    assert_eq!(result.polymorphism_notes[0], "DPYD_2A (rs3918290): G/G");
}

#[test]
fn dpyd_diplotype_mode_counts_non_wild_type() {
    let engine = engine();
    let normal = engine.classify(Gene::Dpyd, &GeneInput::diplotype("*1", "*1"));
    let intermediate = engine.classify(Gene::Dpyd, &GeneInput::diplotype("HapB3", "*1"));
    let poor = engine.classify(Gene::Dpyd, &GeneInput::diplotype("*2A", "*13"));
    assert_eq!(normal.phenotype, Phenotype::Normal);
    assert_eq!(intermediate.diplotype, "HapB3/*1");
    assert_eq!(intermediate.phenotype, Phenotype::Intermediate);
    assert_eq!(poor.phenotype, Phenotype::Poor);
    assert_eq!(poor.polymorphism_notes, ["DPYD diplotipo manual: *2A/*13"]);
}

#[test]
fn ugt1a1_tag_snp_genotypes() {
    let engine = engine();
    let cases = [
        ("C/C", "*1/*1", "Metabolizador normal"),
        ("C/T", "*1/*28", "Metabolizador intermedio"),
        ("T/C", "*1/*28", "Metabolizador intermedio"),
        ("T/T", "*28/*28", "Metabolizador lento"),
        ("-/-", "-/-", "Indeterminado"),
    ];
    for (genotype, diplotype, label) in cases {
        let result = engine.classify(Gene::Ugt1a1, &genotypes(&[("UGT1A1_80", genotype)]));
        assert_eq!(result.diplotype, diplotype, "{genotype}");
        assert_eq!(result.phenotype_label(), label, "{genotype}");
        assert_eq!(
            result.polymorphism_notes,
            [format!("UGT1A1_80 (rs887829): {genotype}")]
        );
    }
}

#[test]
fn ugt1a1_indeterminate_uses_cleaned_guideline_text() {
    let result = engine().classify(Gene::Ugt1a1, &GeneInput::empty_markers());
    assert_eq!(result.phenotype, Phenotype::Indeterminate);
    assert_eq!(result.recommendation, "Repetir genotipado .");
}

#[test]
fn ugt1a1_without_markers_reads_tag_rsid() {
    let reference = ReferenceData::new(vec![], vec![], vec![], vec![]).expect("empty reference");
    let engine = PhenotypeEngine::new(Arc::new(reference));
    let result = engine.classify(Gene::Ugt1a1, &genotypes(&[("rs887829", "T/T")]));
    assert_eq!(result.diplotype, "*28/*28");
    assert_eq!(result.polymorphism_notes, ["UGT1A1 (rs887829): T/T"]);
}

#[test]
fn ugt1a1_diplotype_mode_sorts_alleles() {
    let result = engine().classify(Gene::Ugt1a1, &GeneInput::diplotype("*6", "*1"));
    assert_eq!(result.diplotype, "*1/*6");
    assert_eq!(result.phenotype, Phenotype::Intermediate);
    assert_eq!(result.polymorphism_notes, ["UGT1A1 diplotipo manual: *1/*6"]);

    let poor = engine().classify(Gene::Ugt1a1, &GeneInput::diplotype("*37", "*80"));
    assert_eq!(poor.phenotype_label(), "Metabolizador lento");
}

#[test]
fn cyp2d6_table_hit_wins_over_activity_score() {
    let result = engine().classify(Gene::Cyp2d6, &GeneInput::diplotype("*1", "*4"));
    assert_eq!(result.phenotype_label(), "Metabolizador intermedio");
    assert_eq!(result.recommendation, "Considerar terapia hormonal alternativa.");
}

#[test]
fn cyp2d6_activity_score_fallback() {
    let engine = engine();
    let poor = engine.classify(Gene::Cyp2d6, &GeneInput::diplotype("*4", "*4"));
    assert_eq!(poor.phenotype_label(), "Metabolizador pobre");
    assert_eq!(poor.recommendation, "Evitar tamoxifeno; alternativa terapéutica.");

    let normal = engine.classify(Gene::Cyp2d6, &GeneInput::diplotype("*1", "*1"));
    assert_eq!(normal.phenotype, Phenotype::Normal);

    let intermediate = engine.classify(Gene::Cyp2d6, &GeneInput::diplotype("*10", "*41"));
    assert_eq!(intermediate.phenotype, Phenotype::Intermediate);
}

#[test]
fn cyp2d6_lookup_is_order_sensitive() {
    // Only "*1/*9" is listed; the swapped pair falls back to scoring.
    let engine = engine();
    let swapped = engine.classify(Gene::Cyp2d6, &GeneInput::diplotype("*9", "*1"));
    assert_eq!(swapped.phenotype, Phenotype::Normal);
    let listed = engine.classify(Gene::Cyp2d6, &GeneInput::diplotype("*1", "*9"));
    assert_eq!(listed.phenotype, Phenotype::Indeterminate);
    assert_eq!(listed.phenotype_label(), "Indeterminado");
    assert_eq!(listed.recommendation, SAFE_FALLBACK);
}

#[test]
fn cyp2d6_markers_skip_copy_number_row() {
    let result = engine().classify(
        Gene::Cyp2d6,
        &genotypes(&[("CYP2D6_4", "C/T"), ("CYP2D6_CNV", "duplicación")]),
    );
    assert_eq!(result.diplotype, "*1/*4");
    assert_eq!(result.phenotype, Phenotype::Intermediate);
    assert_eq!(
        result.polymorphism_notes,
        [
            "CYP2D6_4 (rs3892097): C/T",
            "CYP2D6_10 (rs1065852): -/-",
            "CYP2D6_CNV (CNV): duplicación",
        ]
    );
}

#[test]
fn request_produces_three_rows_in_report_order() {
    let request = ClassificationRequest {
        dpyd: genotypes(&[("DPYD_2A", "C/T")]),
        cyp2d6: GeneInput::diplotype("*4", "*4"),
        ugt1a1: genotypes(&[("UGT1A1_80", "T/T")]),
        ..ClassificationRequest::default()
    };

    let outcome = engine().classify_request(&request);
    let genes: Vec<Gene> = outcome.summary.iter().map(|row| row.gene).collect();
    assert_eq!(genes, [Gene::Dpyd, Gene::Cyp2d6, Gene::Ugt1a1]);
    assert!(outcome.has_actionable());

    insta::assert_snapshot!(outcome.polymorphisms, @"DPYD_2A (rs3918290): C/T; DPYD_13 (rs55886062): -/-; DPYD_HapB3 (rs56038477): -/-; CYP2D6 diplotipo manual: *4/*4; UGT1A1_80 (rs887829): T/T");

    let rows: Vec<(String, String, String)> = outcome
        .summary
        .iter()
        .map(|row| {
            (
                row.diplotype.clone(),
                row.phenotype.clone(),
                row.drug_of_interest.clone(),
            )
        })
        .collect();
    assert_eq!(
        rows,
        [
            (
                "*1/*2A".to_string(),
                "Metabolizador intermedio".to_string(),
                "Fluorouracilo, capecitabina, tegafur".to_string()
            ),
            (
                "*4/*4".to_string(),
                "Metabolizador pobre".to_string(),
                "Tamoxifeno".to_string()
            ),
            (
                "*28/*28".to_string(),
                "Metabolizador lento".to_string(),
                "Irinotecán".to_string()
            ),
        ]
    );
}

#[test]
fn default_request_classifies_wild_type() {
    let outcome = engine().classify_request(&ClassificationRequest::default());
    assert!(outcome
        .results
        .iter()
        .filter(|result| result.gene != Gene::Ugt1a1)
        .all(|result| result.phenotype == Phenotype::Normal));
    // No UGT1A1 genotype entered: the tag SNP reads as no-call.
    assert_eq!(
        outcome.result(Gene::Ugt1a1).map(|r| r.phenotype),
        Some(Phenotype::Indeterminate)
    );
}

#[test]
fn selectable_stars_per_gene() {
    let engine = engine();
    assert_eq!(
        engine.selectable_stars(Gene::Dpyd),
        ["*1", "*13", "*2A", "HapB3"]
    );
    assert_eq!(engine.selectable_stars(Gene::Ugt1a1), ["*1", "*28", "*80"]);
    assert_eq!(
        engine.selectable_stars(Gene::Cyp2d6),
        ["*1", "*10", "*2", "*4", "*41"]
    );
}

#[test]
fn marker_inputs_follow_table_order() {
    let engine = engine();
    let inputs = engine.marker_inputs(Gene::Cyp2d6);
    let columns: Vec<&str> = inputs.iter().map(|input| input.column).collect();
    assert_eq!(columns, ["CYP2D6_4", "CYP2D6_10", "CYP2D6_CNV"]);
    assert_eq!(inputs[0].options[0], "-/-");
}

#[test]
fn blank_diplotype_alleles_read_as_wild_type() {
    let result = engine().classify(Gene::Dpyd, &GeneInput::diplotype(" ", "*2A"));
    assert_eq!(result.diplotype, "*1/*2A");
    assert_eq!(result.phenotype, Phenotype::Intermediate);
}
