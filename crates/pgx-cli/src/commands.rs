use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Local;
use comfy_table::Table;
use tracing::{info, info_span, warn};

use pgx_cli::logging::redact_value;
use pgx_cli::request::load_request;
use pgx_core::PhenotypeEngine;
use pgx_model::{ClassificationOutcome, ClassificationRequest, Gene};
use pgx_report::context::DEFAULT_LAST_UPDATE;
use pgx_report::{PageGeometry, ReportArtifacts, ReportContext, ReportOptions, write_report};
use pgx_standards::{DoctorReport, ReferenceRegistry, VerifySummary, reference_root};

use crate::cli::{ClassifyArgs, GeneArgs, ReportArgs};
use crate::summary::{apply_table_style, print_reference_summary};

/// Outcome of `pgx classify`.
pub struct ClassifyResult {
    pub outcome: ClassificationOutcome,
    pub json: bool,
}

/// Outcome of `pgx report`.
pub struct ReportResult {
    pub outcome: ClassificationOutcome,
    pub artifacts: ReportArtifacts,
}

pub fn run_classify(reference_dir: Option<&Path>, args: &ClassifyArgs) -> Result<ClassifyResult> {
    let (registry, _) = load_registry(reference_dir)?;
    let request = load_request(&args.request)?;
    let _guard = request_span("classify", &request).entered();
    let outcome = classify(registry, &request);
    Ok(ClassifyResult {
        outcome,
        json: args.json,
    })
}

pub fn run_report(reference_dir: Option<&Path>, args: &ReportArgs) -> Result<ReportResult> {
    let (registry, _) = load_registry(reference_dir)?;
    let request = load_request(&args.request)?;
    let _guard = request_span("report", &request).entered();
    let last_update = args
        .last_update
        .clone()
        .or_else(|| registry.manifest.pins.last_update.clone())
        .unwrap_or_else(|| DEFAULT_LAST_UPDATE.to_string());
    let outcome = classify(registry, &request);

    let options = ReportOptions {
        last_update,
        ..ReportOptions::default()
    };
    let now = Local::now().naive_local();
    let context = ReportContext::build(&request, &outcome, &options, now);
    let artifacts = write_report(
        &args.output_dir,
        &context,
        args.format.into(),
        &PageGeometry::default(),
        now,
    )
    .with_context(|| format!("write report to {}", args.output_dir.display()))?;
    info!(
        output_dir = %args.output_dir.display(),
        json = artifacts.json.is_some(),
        xml = artifacts.xml.is_some(),
        "report written"
    );
    Ok(ReportResult { outcome, artifacts })
}

pub fn run_stars(reference_dir: Option<&Path>, args: &GeneArgs) -> Result<()> {
    let gene = Gene::from(args.gene);
    let engine = engine_from(load_registry(reference_dir)?.0);
    for star in engine.selectable_stars(gene) {
        println!("{star}");
    }
    Ok(())
}

pub fn run_markers(reference_dir: Option<&Path>, args: &GeneArgs) -> Result<()> {
    let gene = Gene::from(args.gene);
    let engine = engine_from(load_registry(reference_dir)?.0);
    let inputs = engine.marker_inputs(gene);
    if inputs.is_empty() {
        println!("No {gene} markers in the reference data.");
        return Ok(());
    }
    let mut table = Table::new();
    table.set_header(vec!["Column", "rsID", "Options"]);
    apply_table_style(&mut table);
    for input in inputs {
        table.add_row(vec![
            input.column.to_string(),
            dash_if_empty(input.rsid),
            if input.options.is_empty() {
                "-".to_string()
            } else {
                input.options.join(", ")
            },
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_reference_verify(reference_dir: Option<&Path>) -> Result<()> {
    let (registry, summary) = load_registry(reference_dir)?;
    print_reference_summary(&summary, &registry.issues);
    Ok(())
}

pub fn run_reference_doctor(reference_dir: Option<&Path>) -> Result<()> {
    let (registry, summary) = load_registry(reference_dir)?;
    let report = DoctorReport::from_verify_summary(&summary, registry.files, registry.issues);
    let json = serde_json::to_string_pretty(&report).context("serialize doctor report")?;
    println!("{json}");
    Ok(())
}

fn load_registry(reference_dir: Option<&Path>) -> Result<(ReferenceRegistry, VerifySummary)> {
    let root = reference_dir.map_or_else(reference_root, PathBuf::from);
    let _span = info_span!("reference", dir = %root.display()).entered();
    let (registry, summary) = ReferenceRegistry::verify_and_load(&root)
        .with_context(|| format!("load reference data from {}", root.display()))?;
    info!(
        panel = %summary.manifest_pins.panel,
        guidelines = %summary.manifest_pins.guidelines,
        files = summary.file_count,
        "reference verified"
    );
    for issue in &registry.issues {
        warn!(kind = %issue.kind, detail = %issue.detail, "reference data issue");
    }
    Ok((registry, summary))
}

fn engine_from(registry: ReferenceRegistry) -> PhenotypeEngine {
    PhenotypeEngine::new(Arc::new(registry.data))
}

fn classify(registry: ReferenceRegistry, request: &ClassificationRequest) -> ClassificationOutcome {
    let engine = engine_from(registry);
    let outcome = engine.classify_request(request);
    for result in &outcome.results {
        info!(
            gene = %result.gene,
            mode = request.input(result.gene).mode(),
            diplotype = %result.diplotype,
            phenotype = %result.phenotype,
            "gene classified"
        );
    }
    outcome
}

fn request_span(command: &'static str, request: &ClassificationRequest) -> tracing::Span {
    let patient = request.patient.full_name();
    info_span!(
        "request",
        command,
        patient = %redact_value(&patient),
        record = %redact_value(&request.patient.record_number),
    )
}

fn dash_if_empty(value: &str) -> String {
    if value.is_empty() {
        "-".to_string()
    } else {
        value.to_string()
    }
}
