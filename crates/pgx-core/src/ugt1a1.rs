//! UGT1A1 classification for irinotecan.
//!
//! Marker mode reads a single tag SNP for *28. Diplotype mode counts
//! decreased-function alleles.

use std::collections::BTreeMap;

use pgx_model::{Gene, GeneResult, Phenotype, ReferenceData};
use tracing::debug;

use crate::genotype::observed;
use crate::recommendation::resolve_recommendation;

/// rsID of the tag SNP in linkage with UGT1A1*28.
pub const TAG_RSID: &str = "rs887829";

/// Alleles with decreased glucuronidation activity.
pub const DECREASED_FUNCTION: [&str; 4] = ["*28", "*80", "*6", "*37"];

fn result(
    reference: &ReferenceData,
    diplotype: String,
    phenotype: Phenotype,
    notes: Vec<String>,
) -> GeneResult {
    debug!(gene = %Gene::Ugt1a1, %diplotype, %phenotype, "classified");
    GeneResult {
        gene: Gene::Ugt1a1,
        diplotype,
        phenotype,
        recommendation: resolve_recommendation(
            Gene::Ugt1a1,
            phenotype,
            reference.long_recommendation(Gene::Ugt1a1, phenotype),
        ),
        polymorphism_notes: notes,
        dropped_occurrences: 0,
    }
}

/// Classifies UGT1A1 from the tag SNP genotype.
///
/// The tag marker is the UGT1A1 marker with rsID [`TAG_RSID`], else the
/// first UGT1A1 marker. Without any UGT1A1 marker the genotype is read from
/// the `rs887829` key.
pub fn classify_ugt1a1_markers(
    reference: &ReferenceData,
    genotypes: &BTreeMap<String, String>,
) -> GeneResult {
    let tag = reference
        .marker_by_rsid(Gene::Ugt1a1, TAG_RSID)
        .or_else(|| reference.markers(Gene::Ugt1a1).first());
    let (genotype, note) = match tag {
        Some(marker) => {
            let genotype = observed(genotypes, &marker.column);
            (genotype, format!("{} ({}): {genotype}", marker.column, marker.rsid))
        }
        None => {
            let genotype = observed(genotypes, TAG_RSID);
            (genotype, format!("UGT1A1 ({TAG_RSID}): {genotype}"))
        }
    };

    let (diplotype, phenotype) = match genotype {
        "C/C" => ("*1/*1", Phenotype::Normal),
        "C/T" | "T/C" => ("*1/*28", Phenotype::Intermediate),
        "T/T" => ("*28/*28", Phenotype::Poor),
        _ => ("-/-", Phenotype::Indeterminate),
    };
    result(reference, diplotype.to_string(), phenotype, vec![note])
}

/// Classifies UGT1A1 from a manually chosen allele pair.
///
/// The diplotype is written with the alleles in lexical order, so the call
/// does not depend on which allele was entered first.
pub fn classify_ugt1a1_diplotype(
    reference: &ReferenceData,
    allele1: &str,
    allele2: &str,
) -> GeneResult {
    let decreased = [allele1, allele2]
        .iter()
        .filter(|allele| DECREASED_FUNCTION.contains(*allele))
        .count();
    let phenotype = match decreased {
        0 => Phenotype::Normal,
        1 => Phenotype::Intermediate,
        _ => Phenotype::Poor,
    };
    let mut pair = [allele1, allele2];
    pair.sort_unstable();
    let diplotype = pair.join("/");
    let note = format!("UGT1A1 diplotipo manual: {diplotype}");
    result(reference, diplotype, phenotype, vec![note])
}
