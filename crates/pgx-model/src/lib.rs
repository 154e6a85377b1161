//! Data model for the pharmacogenomic phenotype engine.

pub mod error;
pub mod gene;
pub mod marker;
pub mod phenotype;
pub mod reference;
pub mod request;
pub mod result;

pub use error::{ModelError, Result};
pub use gene::Gene;
pub use marker::{CypPhenotypeRow, MarkerDefinition, NO_CALL, RecommendationRow, WILD_TYPE};
pub use phenotype::Phenotype;
pub use reference::ReferenceData;
pub use request::{ClassificationRequest, ClinicalInfo, GeneInput, PatientInfo};
pub use result::{ClassificationOutcome, GeneResult, SummaryRow};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_row_uses_gene_specific_label() {
        let result = GeneResult {
            gene: Gene::Cyp2d6,
            diplotype: "*4/*4".to_string(),
            phenotype: Phenotype::Poor,
            recommendation: "Evitar tamoxifeno; alternativa terapéutica.".to_string(),
            polymorphism_notes: vec![],
            dropped_occurrences: 0,
        };
        let row = SummaryRow::from(&result);
        assert_eq!(row.phenotype, "Metabolizador pobre");
        assert_eq!(row.drug_of_interest, "Tamoxifeno");
        assert_eq!(row.category, Phenotype::Poor);
    }

    #[test]
    fn result_serializes_without_zero_dropped() {
        let result = GeneResult {
            gene: Gene::Dpyd,
            diplotype: "*1/*1".to_string(),
            phenotype: Phenotype::Normal,
            recommendation: "Dosis estándar según ficha técnica.".to_string(),
            polymorphism_notes: vec!["DPYD_2A (rs3918290): C/C".to_string()],
            dropped_occurrences: 0,
        };
        let json = serde_json::to_string(&result).expect("serialize result");
        assert!(!json.contains("dropped_occurrences"));
        assert!(json.contains("\"gene\":\"DPYD\""));
        let round: GeneResult = serde_json::from_str(&json).expect("deserialize result");
        assert_eq!(round, result);
    }
}
