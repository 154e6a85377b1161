#![deny(unsafe_code)]

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Component, Path, PathBuf};

use pgx_model::{Gene, NO_CALL, Phenotype, ReferenceData};
use tracing::{debug, info};

use crate::error::ReferenceError;
use crate::hash::sha256_hex;
use crate::manifest::{Manifest, ManifestFile, Pins};
use crate::paths::reference_root;
use crate::tables::TableKind;
use crate::tables::cyp2d6::parse_cyp2d6_phenotypes;
use crate::tables::markers::{parse_markers_json, parse_star_list_json};
use crate::tables::recommendations::parse_recommendations;

pub const MANIFEST_FILE: &str = "manifest.toml";
pub const MANIFEST_SCHEMA: &str = "pgx.reference-manifest";

pub const ROLE_MARKERS: &str = "markers";
pub const ROLE_CYP2D6_STARS: &str = "cyp2d6_stars";
pub const ROLE_CYP2D6_PHENOTYPES: &str = "cyp2d6_phenotypes";
pub const ROLE_RECOMMENDATIONS: &str = "recommendations";

/// Required roles and the encodings each accepts.
const ROLE_KINDS: &[(&str, &[&str])] = &[
    (ROLE_MARKERS, &["json"]),
    (ROLE_CYP2D6_STARS, &["json"]),
    (ROLE_CYP2D6_PHENOTYPES, &["json", "csv"]),
    (ROLE_RECOMMENDATIONS, &["json", "csv"]),
];

/// Non-fatal finding about the loaded tables.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ReferenceIssue {
    pub kind: String,
    pub role: String,
    pub detail: String,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct VerifySummary {
    pub reference_dir: PathBuf,
    pub manifest_pins: Pins,
    pub file_count: usize,
    pub markers_by_gene: BTreeMap<Gene, usize>,
    pub cyp2d6_star_count: usize,
    pub cyp2d6_phenotype_count: usize,
    pub recommendation_count: usize,
    pub issue_count: usize,
}

#[derive(Debug, Clone)]
pub struct ReferenceRegistry {
    pub manifest: Manifest,
    pub files: Vec<ManifestFile>,
    pub data: ReferenceData,
    pub issues: Vec<ReferenceIssue>,
}

impl ReferenceRegistry {
    /// Verify every file of `reference_dir` against its manifest and load
    /// the tables into an immutable [`ReferenceData`].
    pub fn verify_and_load(reference_dir: &Path) -> Result<(Self, VerifySummary), ReferenceError> {
        let manifest = load_manifest(&reference_dir.join(MANIFEST_FILE))?;

        validate_manifest(&manifest, reference_dir)?;

        let mut files = manifest.files.clone();
        files.sort_by(|a, b| a.path.cmp(&b.path));

        for file in &files {
            verify_file(reference_dir, file)?;
        }

        let (markers_path, _) = resolve_role(reference_dir, &files, ROLE_MARKERS)?;
        let markers = parse_markers_json(&markers_path)?;

        let (stars_path, _) = resolve_role(reference_dir, &files, ROLE_CYP2D6_STARS)?;
        let cyp2d6_stars = parse_star_list_json(&stars_path)?;

        let (pheno_path, pheno_kind) =
            resolve_role(reference_dir, &files, ROLE_CYP2D6_PHENOTYPES)?;
        let cyp2d6_phenotypes = parse_cyp2d6_phenotypes(&pheno_path, pheno_kind)?;

        let (recs_path, recs_kind) = resolve_role(reference_dir, &files, ROLE_RECOMMENDATIONS)?;
        let recommendations = parse_recommendations(&recs_path, recs_kind)?;

        let data = ReferenceData::new(markers, cyp2d6_stars, cyp2d6_phenotypes, recommendations)?;
        let issues = detect_issues(&data);

        let markers_by_gene = [Gene::Dpyd, Gene::Ugt1a1, Gene::Cyp2d6]
            .into_iter()
            .map(|gene| (gene, data.markers(gene).len()))
            .collect();

        let summary = VerifySummary {
            reference_dir: reference_dir.to_path_buf(),
            manifest_pins: manifest.pins.clone(),
            file_count: files.len(),
            markers_by_gene,
            cyp2d6_star_count: data.cyp2d6_stars().len(),
            cyp2d6_phenotype_count: data.cyp2d6_phenotypes().len(),
            recommendation_count: data.recommendations().len(),
            issue_count: issues.len(),
        };
        info!(
            reference_dir = %reference_dir.display(),
            panel = %summary.manifest_pins.panel,
            markers = data.marker_count(),
            issues = issues.len(),
            "reference data loaded"
        );

        Ok((
            Self {
                manifest,
                files,
                data,
                issues,
            },
            summary,
        ))
    }
}

/// Load and verify the reference directory resolved by [`reference_root`].
pub fn load_default_reference() -> Result<ReferenceRegistry, ReferenceError> {
    let root = reference_root();
    ReferenceRegistry::verify_and_load(&root).map(|(registry, _)| registry)
}

fn load_manifest(path: &Path) -> Result<Manifest, ReferenceError> {
    let contents = std::fs::read_to_string(path).map_err(|e| ReferenceError::io(path, e))?;
    toml::from_str(&contents).map_err(|e| ReferenceError::Toml {
        path: path.to_path_buf(),
        source: e,
    })
}

fn validate_manifest(manifest: &Manifest, reference_dir: &Path) -> Result<(), ReferenceError> {
    if manifest.manifest.schema != MANIFEST_SCHEMA {
        return Err(ReferenceError::InvalidManifest {
            message: format!("unsupported schema: {}", manifest.manifest.schema),
        });
    }
    if manifest.manifest.schema_version != 1 {
        return Err(ReferenceError::InvalidManifest {
            message: format!(
                "unsupported schema_version: {}",
                manifest.manifest.schema_version
            ),
        });
    }

    let mut roles: BTreeSet<&str> = BTreeSet::new();
    let mut manifest_paths: BTreeSet<PathBuf> = BTreeSet::new();

    for file in &manifest.files {
        if !roles.insert(file.role.as_str()) {
            return Err(ReferenceError::DuplicateRole {
                role: file.role.clone(),
            });
        }

        let Some((_, kinds)) = ROLE_KINDS.iter().find(|(role, _)| *role == file.role) else {
            return Err(ReferenceError::InvalidManifest {
                message: format!("unknown role '{}' for {}", file.role, file.path),
            });
        };
        if !kinds.contains(&file.kind.as_str()) {
            return Err(ReferenceError::InvalidManifest {
                message: format!(
                    "unsupported kind '{}' for role {} ({})",
                    file.kind, file.role, file.path
                ),
            });
        }

        validate_sha(&file.sha256, &file.path)?;

        let path = validate_path(&file.path)?;
        manifest_paths.insert(normalize_path(&path));
    }

    for (role, _) in ROLE_KINDS {
        if !roles.contains(role) {
            return Err(ReferenceError::MissingRole {
                role: role.to_string(),
            });
        }
    }

    for path in list_files_under(reference_dir)? {
        if path == Path::new(MANIFEST_FILE) {
            continue;
        }
        if !manifest_paths.contains(&normalize_path(&path)) {
            return Err(ReferenceError::UnexpectedFile {
                path: reference_dir.join(path),
            });
        }
    }

    Ok(())
}

fn verify_file(reference_dir: &Path, file: &ManifestFile) -> Result<(), ReferenceError> {
    let full_path = reference_dir.join(&file.path);
    let bytes = std::fs::read(&full_path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ReferenceError::MissingFile {
                path: full_path.clone(),
            }
        } else {
            ReferenceError::io(full_path.clone(), e)
        }
    })?;

    let actual = sha256_hex(&bytes);
    let expected = file.sha256.to_ascii_lowercase();
    if actual != expected {
        return Err(ReferenceError::Sha256Mismatch {
            path: full_path,
            expected,
            actual,
        });
    }
    debug!(path = %file.path, role = %file.role, "reference file verified");
    Ok(())
}

fn resolve_role(
    reference_dir: &Path,
    files: &[ManifestFile],
    role: &str,
) -> Result<(PathBuf, TableKind), ReferenceError> {
    let file = files
        .iter()
        .find(|f| f.role == role)
        .ok_or_else(|| ReferenceError::MissingRole {
            role: role.to_string(),
        })?;
    let kind = TableKind::from_manifest(&file.kind).ok_or_else(|| {
        ReferenceError::InvalidManifest {
            message: format!("unsupported kind '{}' for {}", file.kind, file.path),
        }
    })?;
    Ok((reference_dir.join(&file.path), kind))
}

/// Findings that do not prevent classification but deserve a look.
fn detect_issues(data: &ReferenceData) -> Vec<ReferenceIssue> {
    let mut issues = Vec::new();

    for gene in [Gene::Dpyd, Gene::Ugt1a1, Gene::Cyp2d6] {
        for marker in data.markers(gene) {
            if marker.star_token().is_none() {
                issues.push(ReferenceIssue {
                    kind: "marker_without_star".to_string(),
                    role: ROLE_MARKERS.to_string(),
                    detail: format!("{gene} {}: no star allele, never contributes", marker.column),
                });
            }
            if !marker.options.is_empty() && !marker.accepts(NO_CALL) {
                issues.push(ReferenceIssue {
                    kind: "marker_without_no_call".to_string(),
                    role: ROLE_MARKERS.to_string(),
                    detail: format!("{gene} {}: options lack '{NO_CALL}'", marker.column),
                });
            }
        }
    }

    for row in data.cyp2d6_phenotypes() {
        if Phenotype::from_cyp_summary(&row.summary) == Phenotype::Indeterminate {
            issues.push(ReferenceIssue {
                kind: "cyp2d6_summary_unrecognized".to_string(),
                role: ROLE_CYP2D6_PHENOTYPES.to_string(),
                detail: format!("{}: '{}'", row.diplotype, row.summary),
            });
        }
    }

    for row in data.recommendations() {
        if row.category().is_none() {
            issues.push(ReferenceIssue {
                kind: "recommendation_phenotype_unrecognized".to_string(),
                role: ROLE_RECOMMENDATIONS.to_string(),
                detail: format!("{}: '{}'", row.gene, row.phenotype),
            });
        }
    }

    issues
}

fn validate_sha(sha: &str, path: &str) -> Result<(), ReferenceError> {
    if sha.len() != 64 || !sha.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ReferenceError::InvalidSha256 {
            path: PathBuf::from(path),
            message: "sha256 must be 64 hex characters".to_string(),
        });
    }
    Ok(())
}

fn validate_path(path: &str) -> Result<PathBuf, ReferenceError> {
    if path.contains('\\') {
        return Err(ReferenceError::InvalidPath {
            path: PathBuf::from(path),
            message: "manifest path must use '/' separators".to_string(),
        });
    }

    let p = PathBuf::from(path);
    if p.is_absolute() {
        return Err(ReferenceError::InvalidPath {
            path: p,
            message: "manifest path must be relative".to_string(),
        });
    }

    for c in p.components() {
        if matches!(c, Component::ParentDir) {
            return Err(ReferenceError::InvalidPath {
                path: PathBuf::from(path),
                message: "manifest path must not traverse out of reference/".to_string(),
            });
        }
    }

    Ok(p)
}

fn list_files_under(root: &Path) -> Result<BTreeSet<PathBuf>, ReferenceError> {
    let mut stack = vec![root.to_path_buf()];
    let mut files = BTreeSet::new();

    while let Some(dir) = stack.pop() {
        for entry in std::fs::read_dir(&dir).map_err(|e| ReferenceError::io(&dir, e))? {
            let entry = entry.map_err(|e| ReferenceError::io(&dir, e))?;
            let path = entry.path();
            if path.is_dir() {
                stack.push(path);
            } else if path.is_file() {
                let rel = path
                    .strip_prefix(root)
                    .map_err(|e| ReferenceError::InvalidPath {
                        path: path.clone(),
                        message: format!("failed to relativize path: {e}"),
                    })?
                    .to_path_buf();
                files.insert(rel);
            }
        }
    }

    Ok(files)
}

fn normalize_path(p: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for c in p.components() {
        match c {
            Component::CurDir => {}
            _ => out.push(c.as_os_str()),
        }
    }
    out
}
