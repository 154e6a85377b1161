//! Reference table rows.

use serde::{Deserialize, Serialize};

use crate::{Gene, Phenotype};

/// Genotype used when a marker was not tested or the value is missing.
pub const NO_CALL: &str = "-/-";

/// Wild-type star allele.
pub const WILD_TYPE: &str = "*1";

/// One genetic marker test for a gene.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerDefinition {
    pub gene: Gene,
    /// Key used to read the observed genotype (unique within a gene).
    pub column: String,
    /// Reference SNP identifier (e.g., "rs3918290").
    pub rsid: String,
    pub ref_allele: String,
    /// Variant allele; only the first token of a compound value such as
    /// "A/T" is the functional variant.
    pub var_allele: String,
    /// Star allele defined by the variant, possibly followed by descriptive
    /// text (e.g., "*2A (c.1905+1G>A)").
    pub star_allele: String,
    /// Valid genotype strings offered for selection.
    pub options: Vec<String>,
}

impl MarkerDefinition {
    /// Returns the significant star token, or `None` for empty and "-" values.
    pub fn star_token(&self) -> Option<&str> {
        self.star_allele
            .split_whitespace()
            .next()
            .filter(|token| *token != "-")
    }

    /// Returns the functional variant allele, or `None` for empty and "-" values.
    pub fn variant_token(&self) -> Option<&str> {
        self.var_allele
            .split(|c: char| c == '/' || c == ',' || c.is_whitespace())
            .find(|token| !token.is_empty())
            .filter(|token| *token != "-")
    }

    /// Returns true if `genotype` is one of the declared options.
    pub fn accepts(&self, genotype: &str) -> bool {
        self.options.iter().any(|option| option == genotype)
    }
}

/// CYP2D6 diplotype to phenotype summary, as published in the lookup table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CypPhenotypeRow {
    /// Diplotype in "*X/*Y" form; lookup is order sensitive.
    pub diplotype: String,
    /// English summary label (e.g., "Intermediate Metabolizer").
    pub summary: String,
}

/// Long-form guideline text for a gene and phenotype.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationRow {
    pub gene: Gene,
    /// Phenotype label as written in the source table.
    pub phenotype: String,
    pub rec_text: String,
}

impl RecommendationRow {
    /// Returns the phenotype category this row applies to, if recognizable.
    pub fn category(&self) -> Option<Phenotype> {
        Phenotype::from_label(&self.phenotype)
    }
}
