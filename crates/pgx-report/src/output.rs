//! Writing report artifacts to disk.
//!
//! File names embed the patient name and the minute of generation. Files
//! are opened with create-new semantics and a numeric suffix is added on
//! collision, so concurrent requests never write to the same file.

use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::NaiveDateTime;
use quick_xml::Writer;
use tracing::info;

use crate::context::ReportContext;
use crate::layout::PageGeometry;
use crate::table::write_results_table;

/// Used in file names when the patient has no name.
const FALLBACK_NAME: &str = "Paciente";

const MAX_SUFFIX: u32 = 10_000;

/// Artifacts to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Json,
    Xml,
    Both,
}

impl ReportFormat {
    fn json(self) -> bool {
        matches!(self, ReportFormat::Json | ReportFormat::Both)
    }

    fn xml(self) -> bool {
        matches!(self, ReportFormat::Xml | ReportFormat::Both)
    }
}

/// Paths of the files written for one report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportArtifacts {
    pub json: Option<PathBuf>,
    pub xml: Option<PathBuf>,
}

/// Reduces a name to characters that are safe in file names.
///
/// Letters, digits and '-' are kept, whitespace runs become '_', anything
/// else is dropped.
pub fn sanitize_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for ch in name.trim().chars() {
        if ch.is_alphanumeric() || ch == '-' {
            out.push(ch);
        } else if ch.is_whitespace() && !out.ends_with('_') {
            out.push('_');
        }
    }
    let out = out.trim_matches('_');
    if out.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        out.to_string()
    }
}

/// Base file name without suffix or extension: `pgx_<name>_<YYYYmmdd_HHMM>`.
pub fn artifact_stem(full_name: &str, now: NaiveDateTime) -> String {
    format!(
        "pgx_{}_{}",
        sanitize_name(full_name),
        now.format("%Y%m%d_%H%M")
    )
}

/// Creates `<stem>.<ext>` in `dir`, or `<stem>-N.<ext>` if taken.
pub fn create_unique(dir: &Path, stem: &str, extension: &str) -> Result<(File, PathBuf)> {
    for n in 0..MAX_SUFFIX {
        let name = if n == 0 {
            format!("{stem}.{extension}")
        } else {
            format!("{stem}-{n}.{extension}")
        };
        let path = dir.join(name);
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => return Ok((file, path)),
            Err(error) if error.kind() == ErrorKind::AlreadyExists => continue,
            Err(error) => {
                return Err(error).with_context(|| format!("create {}", path.display()));
            }
        }
    }
    bail!(
        "no free file name for {stem}.{extension} in {}",
        dir.display()
    )
}

/// Writes the report artifacts selected by `format` into `dir`.
pub fn write_report(
    dir: &Path,
    context: &ReportContext,
    format: ReportFormat,
    page: &PageGeometry,
    now: NaiveDateTime,
) -> Result<ReportArtifacts> {
    fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    let stem = artifact_stem(&context.patient.full_name, now);
    let mut artifacts = ReportArtifacts::default();

    if format.json() {
        let (file, path) = create_unique(dir, &stem, "json")?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, context)
            .with_context(|| format!("write {}", path.display()))?;
        writer
            .flush()
            .with_context(|| format!("flush {}", path.display()))?;
        info!(kind = "json", rows = context.summary.len(), "report artifact written");
        artifacts.json = Some(path);
    }

    if format.xml() {
        let (file, path) = create_unique(dir, &stem, "xml")?;
        let mut xml = Writer::new_with_indent(BufWriter::new(file), b' ', 2);
        write_results_table(&mut xml, &context.summary, page)
            .with_context(|| format!("write {}", path.display()))?;
        xml.into_inner()
            .flush()
            .with_context(|| format!("flush {}", path.display()))?;
        info!(kind = "xml", rows = context.summary.len(), "report artifact written");
        artifacts.xml = Some(path);
    }

    Ok(artifacts)
}
