//! Engine facade over the immutable reference data.

use std::sync::Arc;

use pgx_model::{
    ClassificationOutcome, ClassificationRequest, Gene, GeneInput, GeneResult, MarkerDefinition,
    ReferenceData, WILD_TYPE,
};
use tracing::debug;

use crate::cyp2d6::{classify_cyp2d6_diplotype, classify_cyp2d6_markers};
use crate::dpyd::{classify_dpyd_diplotype, classify_dpyd_markers};
use crate::stars::{collect_stars, sort_stars};
use crate::summary::{join_polymorphisms, summarize};
use crate::ugt1a1::{classify_ugt1a1_diplotype, classify_ugt1a1_markers};

/// UGT1A1 labels offered even when no marker names them.
const UGT1A1_EXTRA_STARS: [&str; 1] = ["*28"];

/// One marker as presented to a user entering genotypes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerInput<'a> {
    pub column: &'a str,
    pub rsid: &'a str,
    pub options: &'a [String],
}

/// Classifies requests against shared reference data.
///
/// Cloning is cheap; all clones share the same tables.
#[derive(Debug, Clone)]
pub struct PhenotypeEngine {
    reference: Arc<ReferenceData>,
}

impl PhenotypeEngine {
    pub fn new(reference: Arc<ReferenceData>) -> Self {
        Self { reference }
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    /// Classifies one gene from its input.
    pub fn classify(&self, gene: Gene, input: &GeneInput) -> GeneResult {
        let reference = self.reference.as_ref();
        match input {
            GeneInput::Markers { genotypes } => match gene {
                Gene::Dpyd => classify_dpyd_markers(reference, genotypes),
                Gene::Ugt1a1 => classify_ugt1a1_markers(reference, genotypes),
                Gene::Cyp2d6 => classify_cyp2d6_markers(reference, genotypes),
            },
            GeneInput::Diplotype { allele1, allele2 } => {
                let allele1 = normalize_allele(allele1);
                let allele2 = normalize_allele(allele2);
                match gene {
                    Gene::Dpyd => classify_dpyd_diplotype(reference, allele1, allele2),
                    Gene::Ugt1a1 => classify_ugt1a1_diplotype(reference, allele1, allele2),
                    Gene::Cyp2d6 => classify_cyp2d6_diplotype(reference, allele1, allele2),
                }
            }
        }
    }

    /// Classifies all three genes of a request.
    pub fn classify_request(&self, request: &ClassificationRequest) -> ClassificationOutcome {
        let dpyd = self.classify(Gene::Dpyd, request.input(Gene::Dpyd));
        let cyp2d6 = self.classify(Gene::Cyp2d6, request.input(Gene::Cyp2d6));
        let ugt1a1 = self.classify(Gene::Ugt1a1, request.input(Gene::Ugt1a1));

        let summary = summarize(&dpyd, &cyp2d6, &ugt1a1);
        let polymorphisms = join_polymorphisms([&dpyd, &cyp2d6, &ugt1a1]);
        debug!(
            dpyd = %dpyd.phenotype,
            cyp2d6 = %cyp2d6.phenotype,
            ugt1a1 = %ugt1a1.phenotype,
            "request classified"
        );

        ClassificationOutcome {
            results: vec![dpyd, cyp2d6, ugt1a1],
            summary,
            polymorphisms,
        }
    }

    /// Star labels selectable in diplotype mode for `gene`.
    pub fn selectable_stars(&self, gene: Gene) -> Vec<String> {
        let markers = self.reference.markers(gene);
        match gene {
            Gene::Dpyd => collect_stars(markers, []),
            Gene::Ugt1a1 => collect_stars(markers, UGT1A1_EXTRA_STARS),
            Gene::Cyp2d6 => {
                let mut stars = self.reference.cyp2d6_stars().to_vec();
                if !stars.iter().any(|star| star == WILD_TYPE) {
                    stars.push(WILD_TYPE.to_string());
                }
                sort_stars(stars)
            }
        }
    }

    /// Marker columns to prompt for in marker mode, in table order.
    pub fn marker_inputs(&self, gene: Gene) -> Vec<MarkerInput<'_>> {
        self.reference
            .markers(gene)
            .iter()
            .map(|marker: &MarkerDefinition| MarkerInput {
                column: &marker.column,
                rsid: &marker.rsid,
                options: &marker.options,
            })
            .collect()
    }
}

/// Blank alleles read as the wild type.
fn normalize_allele(allele: &str) -> &str {
    let allele = allele.trim();
    if allele.is_empty() { WILD_TYPE } else { allele }
}
