//! Genes covered by the phenotype engine.
//!
//! The set is closed: every classifier, drug label and recommendation entry
//! is keyed by one of these three pharmacogenes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Pharmacogene with a dedicated classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Gene {
    /// Dihydropyrimidine dehydrogenase (fluoropyrimidine toxicity).
    #[serde(rename = "DPYD")]
    Dpyd,
    /// UDP glucuronosyltransferase 1A1 (irinotecan toxicity).
    #[serde(rename = "UGT1A1")]
    Ugt1a1,
    /// Cytochrome P450 2D6 (tamoxifen activation).
    #[serde(rename = "CYP2D6")]
    Cyp2d6,
}

impl Gene {
    /// Genes in the order they appear in the report summary.
    pub const REPORT_ORDER: [Gene; 3] = [Gene::Dpyd, Gene::Cyp2d6, Gene::Ugt1a1];

    /// Returns the HGNC symbol.
    pub fn as_str(&self) -> &'static str {
        match self {
            Gene::Dpyd => "DPYD",
            Gene::Ugt1a1 => "UGT1A1",
            Gene::Cyp2d6 => "CYP2D6",
        }
    }

    /// Drug(s) of interest printed next to the gene in the report.
    pub fn drug_of_interest(&self) -> &'static str {
        match self {
            Gene::Dpyd => "Fluorouracilo, capecitabina, tegafur",
            Gene::Cyp2d6 => "Tamoxifeno",
            Gene::Ugt1a1 => "Irinotecán",
        }
    }
}

impl fmt::Display for Gene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Gene {
    type Err = String;

    /// Parse a gene symbol (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "DPYD" => Ok(Gene::Dpyd),
            "UGT1A1" => Ok(Gene::Ugt1a1),
            "CYP2D6" => Ok(Gene::Cyp2d6),
            _ => Err(format!("Unknown gene: {s}")),
        }
    }
}
