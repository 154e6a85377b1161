//! Results table geometry and cell styling.
//!
//! Word lets a table overflow the page when long, unbreakable strings (DOIs,
//! compound drug names) sit in auto-sized columns. The table is therefore laid
//! out with fixed column widths derived from the usable page width, and the
//! text columns get zero-width break opportunities.

use pgx_model::Phenotype;

/// Column share of the usable width: gene, phenotype, drug, recommendation.
pub const COLUMN_FRACTIONS: [f64; 4] = [0.16, 0.22, 0.22, 0.40];

/// Fraction of the usable width the table may occupy.
pub const WIDTH_SAFETY_FACTOR: f64 = 0.98;

/// Characters after which a line may break.
pub const SOFT_BREAKERS: &str = "/-_.,;:";

pub const ZERO_WIDTH_SPACE: char = '\u{200B}';

const TWIPS_PER_CM: f64 = 1440.0 / 2.54;

/// Float noise tolerated when comparing rounded widths.
const WIDTH_EPSILON: f64 = 1e-9;

/// Page width and horizontal margins, in centimeters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width_cm: f64,
    pub left_margin_cm: f64,
    pub right_margin_cm: f64,
}

impl Default for PageGeometry {
    /// A4 portrait with 2.5 cm margins.
    fn default() -> Self {
        Self {
            width_cm: 21.0,
            left_margin_cm: 2.5,
            right_margin_cm: 2.5,
        }
    }
}

impl PageGeometry {
    /// Width available to the table.
    pub fn usable_cm(&self) -> f64 {
        (self.width_cm - self.left_margin_cm - self.right_margin_cm).max(0.0) * WIDTH_SAFETY_FACTOR
    }
}

fn round_cm(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn floor_cm(value: f64) -> f64 {
    (value * 100.0 + WIDTH_EPSILON).floor() / 100.0
}

/// Column widths in centimeters, rounded to 0.01 cm.
///
/// Rounding overflow is taken off the last column so the sum never exceeds
/// [`PageGeometry::usable_cm`].
pub fn fit_column_widths(page: &PageGeometry) -> [f64; 4] {
    let usable = page.usable_cm();
    let mut widths = COLUMN_FRACTIONS.map(|fraction| round_cm(usable * fraction));
    let overflow = widths.iter().sum::<f64>() - usable;
    if overflow > WIDTH_EPSILON {
        widths[3] = floor_cm(widths[3] - overflow).max(0.0);
    }
    widths
}

pub fn cm_to_twips(cm: f64) -> u32 {
    (cm * TWIPS_PER_CM).round().max(0.0) as u32
}

/// Inserts a zero-width space after each of `/-_.,;:`.
pub fn soft_breaks(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 4);
    for ch in text.chars() {
        out.push(ch);
        if SOFT_BREAKERS.contains(ch) {
            out.push(ZERO_WIDTH_SPACE);
        }
    }
    out
}

/// Shading class of a result row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskLevel {
    Normal,
    Actionable,
    Unknown,
}

impl RiskLevel {
    /// Cell fill as RGB hex without '#'.
    pub fn fill(self) -> &'static str {
        match self {
            RiskLevel::Normal => "E6F4E6",
            RiskLevel::Actionable => "F6DEDE",
            RiskLevel::Unknown => "FFFFFF",
        }
    }
}

impl From<Phenotype> for RiskLevel {
    fn from(phenotype: Phenotype) -> Self {
        match phenotype {
            Phenotype::Normal => RiskLevel::Normal,
            Phenotype::Intermediate | Phenotype::Poor | Phenotype::Ultrarapid => {
                RiskLevel::Actionable
            }
            Phenotype::Indeterminate => RiskLevel::Unknown,
        }
    }
}
