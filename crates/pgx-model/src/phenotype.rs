//! Metabolizer phenotype categories.
//!
//! Phenotypes are kept as a closed enum inside the engine. Display text is
//! produced only at the boundary, and depends on the gene: the poor
//! category reads "lento" for DPYD and UGT1A1 but "pobre" for CYP2D6.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::Gene;

/// Predicted drug-metabolizer category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phenotype {
    /// Normal enzyme activity.
    Normal,
    /// Reduced enzyme activity.
    Intermediate,
    /// Little or no enzyme activity.
    Poor,
    /// Increased enzyme activity (CYP2D6 only).
    Ultrarapid,
    /// The input did not allow a call.
    Indeterminate,
}

impl Phenotype {
    /// Returns the English category name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Phenotype::Normal => "Normal Metabolizer",
            Phenotype::Intermediate => "Intermediate Metabolizer",
            Phenotype::Poor => "Poor Metabolizer",
            Phenotype::Ultrarapid => "Ultrarapid Metabolizer",
            Phenotype::Indeterminate => "Indeterminate",
        }
    }

    /// Returns the Spanish display label used in the report for `gene`.
    pub fn label(&self, gene: Gene) -> &'static str {
        match (self, gene) {
            (Phenotype::Normal, _) => "Metabolizador normal",
            (Phenotype::Intermediate, _) => "Metabolizador intermedio",
            (Phenotype::Poor, Gene::Cyp2d6) => "Metabolizador pobre",
            (Phenotype::Poor, _) => "Metabolizador lento",
            (Phenotype::Ultrarapid, _) => "Metabolizador ultrarrápido",
            (Phenotype::Indeterminate, _) => "Indeterminado",
        }
    }

    /// Returns true for categories that call for a dosing change.
    pub fn is_actionable(&self) -> bool {
        matches!(
            self,
            Phenotype::Intermediate | Phenotype::Poor | Phenotype::Ultrarapid
        )
    }

    /// Classify a free-text phenotype label.
    ///
    /// Accepts the English summary labels of the CYP2D6 table as well as the
    /// Spanish labels used by the recommendation table. Matching is
    /// case-insensitive and keyword based.
    pub fn from_label(label: &str) -> Option<Self> {
        let lower = label.trim().to_lowercase();
        if lower.is_empty() {
            return None;
        }
        if lower.contains("ultra") {
            Some(Phenotype::Ultrarapid)
        } else if lower.contains("intermedi") {
            Some(Phenotype::Intermediate)
        } else if lower.contains("poor") || lower.contains("pobre") || lower.contains("lento") {
            Some(Phenotype::Poor)
        } else if lower.contains("normal") {
            Some(Phenotype::Normal)
        } else if lower.contains("indetermin") {
            Some(Phenotype::Indeterminate)
        } else {
            None
        }
    }

    /// Translate a CYP2D6 summary label by its leading word.
    ///
    /// Labels that start with none of the known categories are
    /// [`Phenotype::Indeterminate`].
    pub fn from_cyp_summary(summary: &str) -> Self {
        let summary = summary.trim();
        if summary.starts_with("Normal") {
            Phenotype::Normal
        } else if summary.starts_with("Intermediate") {
            Phenotype::Intermediate
        } else if summary.starts_with("Poor") {
            Phenotype::Poor
        } else if summary.starts_with("Ultrarapid") {
            Phenotype::Ultrarapid
        } else {
            Phenotype::Indeterminate
        }
    }
}

impl fmt::Display for Phenotype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poor_label_depends_on_gene() {
        assert_eq!(Phenotype::Poor.label(Gene::Dpyd), "Metabolizador lento");
        assert_eq!(Phenotype::Poor.label(Gene::Ugt1a1), "Metabolizador lento");
        assert_eq!(Phenotype::Poor.label(Gene::Cyp2d6), "Metabolizador pobre");
    }

    #[test]
    fn test_from_label() {
        assert_eq!(
            Phenotype::from_label("Metabolizador lento"),
            Some(Phenotype::Poor)
        );
        assert_eq!(
            Phenotype::from_label("Intermediate Metabolizer"),
            Some(Phenotype::Intermediate)
        );
        assert_eq!(
            Phenotype::from_label("metabolizador ULTRARRÁPIDO"),
            Some(Phenotype::Ultrarapid)
        );
        assert_eq!(Phenotype::from_label("Indeterminado"), Some(Phenotype::Indeterminate));
        assert_eq!(Phenotype::from_label(""), None);
        assert_eq!(Phenotype::from_label("unknown"), None);
    }

    #[test]
    fn test_from_cyp_summary_uses_prefix() {
        assert_eq!(
            Phenotype::from_cyp_summary("Normal Metabolizer"),
            Phenotype::Normal
        );
        assert_eq!(
            Phenotype::from_cyp_summary("Ultrarapid Metabolizer"),
            Phenotype::Ultrarapid
        );
        assert_eq!(
            Phenotype::from_cyp_summary("Likely Intermediate Metabolizer"),
            Phenotype::Indeterminate
        );
    }
}
