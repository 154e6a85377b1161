//! Values a report template needs, computed once per request.

use chrono::NaiveDateTime;
use serde::Serialize;

use pgx_model::{
    ClassificationOutcome, ClassificationRequest, ClinicalInfo, PatientInfo, SummaryRow,
};

/// CPIC guideline index cited in every report.
pub const CPIC_GUIDELINES_URL: &str = "https://cpicpgx.org/guidelines/";

/// DPWG fluoropyrimidine guideline.
pub const DPWG_DOI: &str = "DOI:10.1038/s41431-022-01243-2";

/// Printed when the patient has no record number.
pub const MISSING_SAMPLE_CODE: &str = "—";

pub const DEFAULT_LAST_UPDATE: &str = "septiembre 2025";

/// Report-wide labels that do not come from the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOptions {
    /// "Last update" label of the guideline tables.
    pub last_update: String,
    pub version: String,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            last_update: DEFAULT_LAST_UPDATE.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PatientSection {
    #[serde(flatten)]
    pub info: PatientInfo,
    pub full_name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Sources {
    pub cpic_url: String,
    pub dpwg_doi: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportMeta {
    pub sample_code: String,
    pub request_date: String,
    pub report_date: String,
    pub generated_at: String,
    pub last_update: String,
    pub version: String,
}

/// Everything rendered into a report.
#[derive(Debug, Clone, Serialize)]
pub struct ReportContext {
    pub patient: PatientSection,
    pub clinical: ClinicalInfo,
    pub summary: Vec<SummaryRow>,
    pub polymorphisms: String,
    pub sources: Sources,
    pub meta: ReportMeta,
}

impl ReportContext {
    /// Builds the context; `now` is the report clock.
    pub fn build(
        request: &ClassificationRequest,
        outcome: &ClassificationOutcome,
        options: &ReportOptions,
        now: NaiveDateTime,
    ) -> Self {
        let record = request.patient.record_number.trim();
        let date = now.format("%d/%m/%Y").to_string();
        Self {
            patient: PatientSection {
                info: request.patient.clone(),
                full_name: request.patient.full_name(),
            },
            clinical: request.clinical.clone(),
            summary: outcome.summary.clone(),
            polymorphisms: outcome.polymorphisms.clone(),
            sources: Sources {
                cpic_url: CPIC_GUIDELINES_URL.to_string(),
                dpwg_doi: DPWG_DOI.to_string(),
            },
            meta: ReportMeta {
                sample_code: if record.is_empty() {
                    MISSING_SAMPLE_CODE.to_string()
                } else {
                    record.to_string()
                },
                request_date: date.clone(),
                report_date: date,
                generated_at: now.format("%Y-%m-%d %H:%M").to_string(),
                last_update: options.last_update.clone(),
                version: options.version.clone(),
            },
        }
    }
}
