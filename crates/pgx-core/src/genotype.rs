//! Reading observed genotypes against marker definitions.

use std::collections::BTreeMap;

use pgx_model::{MarkerDefinition, NO_CALL, WILD_TYPE};
use tracing::warn;

/// How many copies of a marker's functional variant a genotype carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zygosity {
    /// No copy, no call, or a value that does not match the marker.
    None,
    Heterozygous,
    Homozygous,
}

impl Zygosity {
    /// Variant occurrences contributed to the diplotype.
    pub fn occurrences(self) -> usize {
        match self {
            Zygosity::None => 0,
            Zygosity::Heterozygous => 1,
            Zygosity::Homozygous => 2,
        }
    }
}

/// Returns the observed genotype for `column`; missing or blank values read as "-/-".
pub fn observed<'a>(genotypes: &'a BTreeMap<String, String>, column: &str) -> &'a str {
    match genotypes.get(column).map(|value| value.trim()) {
        Some(value) if !value.is_empty() => value,
        _ => NO_CALL,
    }
}

/// Compares `genotype` with the "ref/var" combinations of `marker`.
///
/// Markers without a usable variant token never match.
pub fn zygosity(marker: &MarkerDefinition, genotype: &str) -> Zygosity {
    let Some(variant) = marker.variant_token() else {
        return Zygosity::None;
    };
    let reference = marker.ref_allele.as_str();
    if genotype == format!("{reference}/{variant}") || genotype == format!("{variant}/{reference}")
    {
        Zygosity::Heterozygous
    } else if genotype == format!("{variant}/{variant}") {
        Zygosity::Homozygous
    } else {
        Zygosity::None
    }
}

/// Star alleles observed across a gene's markers, plus one note per marker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkerScan {
    /// One entry per variant occurrence, in table order.
    pub occurrences: Vec<String>,
    pub notes: Vec<String>,
}

/// Walks `markers` in table order and collects variant occurrences.
///
/// Every marker produces a note; only markers with both a star token and a
/// variant token can contribute occurrences.
pub fn scan_markers(
    markers: &[MarkerDefinition],
    genotypes: &BTreeMap<String, String>,
) -> MarkerScan {
    let mut scan = MarkerScan::default();
    for marker in markers {
        let genotype = observed(genotypes, &marker.column);
        scan.notes.push(format!("{} ({}): {genotype}", marker.column, marker.rsid));

        if !marker.options.is_empty() && !marker.accepts(genotype) {
            warn!(
                gene = %marker.gene,
                column = %marker.column,
                genotype,
                "genotype is not one of the marker options"
            );
        }

        let Some(star) = marker.star_token() else {
            continue;
        };
        let count = zygosity(marker, genotype).occurrences();
        scan.occurrences
            .extend(std::iter::repeat_n(star.to_string(), count));
    }
    scan
}

/// Allele pair built from the first two occurrences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pairing {
    pub allele1: String,
    pub allele2: String,
    /// Occurrences that entered the pair (0, 1 or 2).
    pub used: usize,
    pub dropped: usize,
}

impl Pairing {
    pub fn diplotype(&self) -> String {
        format!("{}/{}", self.allele1, self.allele2)
    }
}

/// Pairs occurrences into a diplotype, filling with the wild type.
pub fn pair_occurrences(occurrences: &[String]) -> Pairing {
    let (allele1, allele2) = match occurrences {
        [] => (WILD_TYPE.to_string(), WILD_TYPE.to_string()),
        [only] => (WILD_TYPE.to_string(), only.clone()),
        [first, second, ..] => (first.clone(), second.clone()),
    };
    let used = occurrences.len().min(2);
    Pairing {
        allele1,
        allele2,
        used,
        dropped: occurrences.len() - used,
    }
}
