#![deny(unsafe_code)]

use std::collections::BTreeMap;

use crate::manifest::{ManifestFile, Pins};
use crate::registry::{ReferenceIssue, VerifySummary};

#[derive(Debug, Clone, serde::Serialize)]
pub struct DoctorReport {
    pub schema: String,
    pub schema_version: u32,
    pub pins: Pins,
    pub files: Vec<ManifestFile>,
    pub counts: DoctorCounts,
    pub issues: Vec<ReferenceIssue>,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct DoctorCounts {
    pub files: usize,
    /// Marker rows per gene symbol.
    pub markers: BTreeMap<String, usize>,
    pub cyp2d6_stars: usize,
    pub cyp2d6_phenotypes: usize,
    pub recommendations: usize,
}

impl DoctorReport {
    pub fn from_verify_summary(
        summary: &VerifySummary,
        files: Vec<ManifestFile>,
        issues: Vec<ReferenceIssue>,
    ) -> Self {
        Self {
            schema: "pgx.reference-doctor".to_string(),
            schema_version: 1,
            pins: summary.manifest_pins.clone(),
            files,
            counts: DoctorCounts {
                files: summary.file_count,
                markers: summary
                    .markers_by_gene
                    .iter()
                    .map(|(gene, count)| (gene.as_str().to_string(), *count))
                    .collect(),
                cyp2d6_stars: summary.cyp2d6_star_count,
                cyp2d6_phenotypes: summary.cyp2d6_phenotype_count,
                recommendations: summary.recommendation_count,
            },
            issues,
        }
    }
}
