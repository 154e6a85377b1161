//! Short therapeutic recommendations for the report.
//!
//! A curated one-line text exists for the common gene and phenotype pairs.
//! Anything else falls back to the guideline text from the reference table,
//! stripped of citation markers and links, and finally to a fixed safe
//! sentence so the report never shows an empty cell.

use std::sync::LazyLock;

use pgx_model::{Gene, Phenotype};
use regex::Regex;

/// Used when neither the curated table nor the guideline text has anything.
pub const SAFE_FALLBACK: &str = "No hay recomendación específica en las guías cargadas para este \
fenotipo/diplotipo. Seguir ficha técnica y monitorizar estrechamente.";

static CITATION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[.*?\]").expect("Invalid citation regex"));

static URL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://\S+").expect("Invalid URL regex"));

static WHITESPACE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));

/// Curated short text for a gene and phenotype.
pub fn short_recommendation(gene: Gene, phenotype: Phenotype) -> Option<&'static str> {
    let text = match (gene, phenotype) {
        (Gene::Dpyd, Phenotype::Normal) => "Dosis estándar según ficha técnica.",
        (Gene::Dpyd, Phenotype::Intermediate) => "Reducir dosis inicial; titular y monitorizar.",
        (Gene::Dpyd, Phenotype::Poor) => "Evitar fluoropirimidinas; valorar alternativas.",
        (Gene::Ugt1a1, Phenotype::Normal) => "Dosis estándar según ficha técnica.",
        (Gene::Ugt1a1, Phenotype::Intermediate) => {
            "Considerar reducción dosis; monitorizar neutropenia."
        }
        (Gene::Ugt1a1, Phenotype::Poor) => {
            "Reducir dosis inicial (30–50%); monitorización estrecha."
        }
        (Gene::Cyp2d6, Phenotype::Normal) => "Dosis estándar.",
        (Gene::Cyp2d6, Phenotype::Intermediate) => "Considerar terapia hormonal alternativa.",
        (Gene::Cyp2d6, Phenotype::Poor) => "Evitar tamoxifeno; alternativa terapéutica.",
        (Gene::Cyp2d6, Phenotype::Ultrarapid) => "Valorar alternativas según contexto.",
        _ => return None,
    };
    Some(text)
}

/// Removes "[...]" citations and URLs, then collapses whitespace.
pub fn clean_long_text(text: &str) -> String {
    let text = CITATION_REGEX.replace_all(text, "");
    let text = URL_REGEX.replace_all(&text, "");
    WHITESPACE_REGEX.replace_all(&text, " ").trim().to_string()
}

/// Resolves the recommendation shown for `gene` and `phenotype`.
///
/// Never returns an empty string.
pub fn resolve_recommendation(
    gene: Gene,
    phenotype: Phenotype,
    long_text: Option<&str>,
) -> String {
    if let Some(text) = short_recommendation(gene, phenotype) {
        return text.to_string();
    }
    let cleaned = clean_long_text(long_text.unwrap_or_default());
    if cleaned.is_empty() {
        SAFE_FALLBACK.to_string()
    } else {
        cleaned
    }
}
