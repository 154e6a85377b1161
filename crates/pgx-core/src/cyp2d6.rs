//! CYP2D6 classification for tamoxifen.
//!
//! Phenotypes come from the diplotype table when it has the exact pair.
//! Otherwise an activity score is summed over the two alleles.

use std::collections::BTreeMap;

use pgx_model::{Gene, GeneResult, Phenotype, ReferenceData};
use tracing::{debug, warn};

use crate::genotype::{pair_occurrences, scan_markers};
use crate::recommendation::resolve_recommendation;

/// Alleles without enzyme function (activity 0).
pub const NO_FUNCTION: [&str; 9] = ["*3", "*4", "*5", "*6", "*7", "*14", "*15", "*19", "*59"];

/// Alleles with reduced function (activity 0.5).
pub const REDUCED_FUNCTION: [&str; 5] = ["*10", "*17", "*29", "*41", "*56B"];

/// Activity value of a single allele; unlisted alleles count as fully functional.
pub fn allele_activity(allele: &str) -> f64 {
    if NO_FUNCTION.contains(&allele) {
        0.0
    } else if REDUCED_FUNCTION.contains(&allele) {
        0.5
    } else {
        1.0
    }
}

/// Maps a summed activity score to a phenotype.
pub fn phenotype_from_score(score: f64) -> Phenotype {
    if score == 0.0 {
        Phenotype::Poor
    } else if score <= 1.0 {
        Phenotype::Intermediate
    } else if score <= 2.25 {
        Phenotype::Normal
    } else {
        Phenotype::Ultrarapid
    }
}

/// Resolves the phenotype of "allele1/allele2".
///
/// An exact row of the diplotype table wins; a row whose summary has no
/// known category yields [`Phenotype::Indeterminate`].
pub fn resolve_phenotype(reference: &ReferenceData, allele1: &str, allele2: &str) -> Phenotype {
    let diplotype = format!("{allele1}/{allele2}");
    if let Some(summary) = reference.cyp2d6_summary(&diplotype) {
        let phenotype = Phenotype::from_cyp_summary(summary);
        debug!(%diplotype, summary, %phenotype, "diplotype found in table");
        return phenotype;
    }
    let score = allele_activity(allele1) + allele_activity(allele2);
    let phenotype = phenotype_from_score(score);
    debug!(%diplotype, score, %phenotype, "diplotype scored by activity");
    phenotype
}

fn result(
    reference: &ReferenceData,
    allele1: &str,
    allele2: &str,
    notes: Vec<String>,
    dropped_occurrences: usize,
) -> GeneResult {
    let phenotype = resolve_phenotype(reference, allele1, allele2);
    GeneResult {
        gene: Gene::Cyp2d6,
        diplotype: format!("{allele1}/{allele2}"),
        phenotype,
        recommendation: resolve_recommendation(
            Gene::Cyp2d6,
            phenotype,
            reference.long_recommendation(Gene::Cyp2d6, phenotype),
        ),
        polymorphism_notes: notes,
        dropped_occurrences,
    }
}

/// Classifies CYP2D6 from per-marker genotypes.
pub fn classify_cyp2d6_markers(
    reference: &ReferenceData,
    genotypes: &BTreeMap<String, String>,
) -> GeneResult {
    let scan = scan_markers(reference.markers(Gene::Cyp2d6), genotypes);
    let pairing = pair_occurrences(&scan.occurrences);
    if pairing.dropped > 0 {
        warn!(
            gene = %Gene::Cyp2d6,
            dropped = pairing.dropped,
            occurrences = ?scan.occurrences,
            "more than two variant occurrences; only the first two enter the diplotype"
        );
    }
    result(
        reference,
        &pairing.allele1,
        &pairing.allele2,
        scan.notes,
        pairing.dropped,
    )
}

/// Classifies CYP2D6 from a manually chosen allele pair, kept in the given order.
pub fn classify_cyp2d6_diplotype(
    reference: &ReferenceData,
    allele1: &str,
    allele2: &str,
) -> GeneResult {
    let note = format!("CYP2D6 diplotipo manual: {allele1}/{allele2}");
    result(reference, allele1, allele2, vec![note], 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activity_values() {
        assert_eq!(allele_activity("*4"), 0.0);
        assert_eq!(allele_activity("*56B"), 0.5);
        assert_eq!(allele_activity("*1xN"), 1.0);
    }

    #[test]
    fn score_thresholds() {
        assert_eq!(phenotype_from_score(0.0), Phenotype::Poor);
        assert_eq!(phenotype_from_score(0.5), Phenotype::Intermediate);
        assert_eq!(phenotype_from_score(1.0), Phenotype::Intermediate);
        assert_eq!(phenotype_from_score(1.5), Phenotype::Normal);
        assert_eq!(phenotype_from_score(2.25), Phenotype::Normal);
        assert_eq!(phenotype_from_score(3.0), Phenotype::Ultrarapid);
    }
}
