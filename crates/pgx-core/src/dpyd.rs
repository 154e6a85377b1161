//! DPYD (dihydropyrimidine dehydrogenase) classification.
//!
//! Each variant occurrence counts as one decreased-function allele: one
//! occurrence is intermediate, two or more is poor.

use std::collections::BTreeMap;

use pgx_model::{Gene, GeneResult, Phenotype, ReferenceData, WILD_TYPE};
use tracing::{debug, warn};

use crate::genotype::{pair_occurrences, scan_markers};
use crate::recommendation::resolve_recommendation;

fn phenotype_for(non_wild_type: usize) -> Phenotype {
    match non_wild_type {
        0 => Phenotype::Normal,
        1 => Phenotype::Intermediate,
        _ => Phenotype::Poor,
    }
}

/// Classifies DPYD from per-marker genotypes.
pub fn classify_dpyd_markers(
    reference: &ReferenceData,
    genotypes: &BTreeMap<String, String>,
) -> GeneResult {
    let scan = scan_markers(reference.markers(Gene::Dpyd), genotypes);
    let pairing = pair_occurrences(&scan.occurrences);
    if pairing.dropped > 0 {
        warn!(
            gene = %Gene::Dpyd,
            dropped = pairing.dropped,
            occurrences = ?scan.occurrences,
            "more than two variant occurrences; only the first two enter the diplotype"
        );
    }
    let phenotype = phenotype_for(pairing.used);
    let diplotype = pairing.diplotype();
    debug!(
        gene = %Gene::Dpyd,
        %diplotype,
        %phenotype,
        "classified from markers"
    );

    GeneResult {
        gene: Gene::Dpyd,
        recommendation: resolve_recommendation(
            Gene::Dpyd,
            phenotype,
            reference.long_recommendation(Gene::Dpyd, phenotype),
        ),
        diplotype,
        phenotype,
        polymorphism_notes: scan.notes,
        dropped_occurrences: pairing.dropped,
    }
}

/// Classifies DPYD from a manually chosen allele pair.
pub fn classify_dpyd_diplotype(
    reference: &ReferenceData,
    allele1: &str,
    allele2: &str,
) -> GeneResult {
    let non_wild_type = [allele1, allele2]
        .iter()
        .filter(|allele| **allele != WILD_TYPE)
        .count();
    let phenotype = phenotype_for(non_wild_type);
    let diplotype = format!("{allele1}/{allele2}");
    debug!(gene = %Gene::Dpyd, %diplotype, %phenotype, "classified from diplotype");

    GeneResult {
        gene: Gene::Dpyd,
        recommendation: resolve_recommendation(
            Gene::Dpyd,
            phenotype,
            reference.long_recommendation(Gene::Dpyd, phenotype),
        ),
        polymorphism_notes: vec![format!("DPYD diplotipo manual: {diplotype}")],
        diplotype,
        phenotype,
        dropped_occurrences: 0,
    }
}
