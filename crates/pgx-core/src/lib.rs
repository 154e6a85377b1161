//! Phenotype classification for DPYD, UGT1A1 and CYP2D6.
//!
//! Every classifier is a pure function of its input and the reference data
//! and never fails: missing genotypes read as no-call, unknown values as
//! wild type, and recommendations always resolve to some text.

pub mod cyp2d6;
pub mod dpyd;
pub mod engine;
pub mod genotype;
pub mod recommendation;
pub mod stars;
pub mod summary;
pub mod ugt1a1;

pub use cyp2d6::{classify_cyp2d6_diplotype, classify_cyp2d6_markers, resolve_phenotype};
pub use dpyd::{classify_dpyd_diplotype, classify_dpyd_markers};
pub use engine::{MarkerInput, PhenotypeEngine};
pub use recommendation::{SAFE_FALLBACK, resolve_recommendation};
pub use stars::collect_stars;
pub use summary::{join_polymorphisms, summarize};
pub use ugt1a1::{classify_ugt1a1_diplotype, classify_ugt1a1_markers};
