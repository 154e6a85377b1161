#![deny(unsafe_code)]

pub mod doctor;
pub mod error;
pub mod hash;
pub mod manifest;
pub mod paths;
pub mod registry;
pub mod tables;

pub use crate::doctor::DoctorReport;
pub use crate::error::ReferenceError;
pub use crate::paths::{REFERENCE_ENV_VAR, reference_root};
pub use crate::registry::{
    ReferenceIssue, ReferenceRegistry, VerifySummary, load_default_reference,
};
