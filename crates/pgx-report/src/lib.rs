//! Report generation for classified requests.
//!
//! - **Context**: patient, clinical and result values plus report metadata
//! - **Layout**: fixed column widths, soft line breaks and risk shading
//! - **Table**: the results table as a WordprocessingML fragment
//! - **Output**: collision-free JSON and XML artifacts

pub mod context;
pub mod layout;
pub mod output;
pub mod table;

pub use context::{ReportContext, ReportOptions};
pub use layout::{PageGeometry, RiskLevel, fit_column_widths, soft_breaks};
pub use output::{ReportArtifacts, ReportFormat, write_report};
pub use table::{results_table_xml, write_results_table};
