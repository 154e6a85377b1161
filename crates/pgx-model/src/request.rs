//! Classification requests.
//!
//! A request carries patient and clinical metadata that the engine passes
//! through untouched, plus one explicitly tagged input per gene.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{Gene, WILD_TYPE};

/// Input for a single gene.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum GeneInput {
    /// Observed genotype per marker column (e.g., `"DPYD_2A" = "C/T"`).
    Markers {
        #[serde(default)]
        genotypes: BTreeMap<String, String>,
    },
    /// Manually chosen star-allele pair.
    Diplotype {
        #[serde(default = "wild_type")]
        allele1: String,
        #[serde(default = "wild_type")]
        allele2: String,
    },
}

fn wild_type() -> String {
    WILD_TYPE.to_string()
}

impl GeneInput {
    /// Marker-mode input with no genotypes (every marker reads as "-/-").
    pub fn empty_markers() -> Self {
        GeneInput::Markers {
            genotypes: BTreeMap::new(),
        }
    }

    pub fn diplotype(allele1: impl Into<String>, allele2: impl Into<String>) -> Self {
        GeneInput::Diplotype {
            allele1: allele1.into(),
            allele2: allele2.into(),
        }
    }

    /// Default input mode for `gene` when the request omits it.
    pub fn default_for(gene: Gene) -> Self {
        match gene {
            Gene::Dpyd | Gene::Ugt1a1 => Self::empty_markers(),
            Gene::Cyp2d6 => Self::diplotype(WILD_TYPE, WILD_TYPE),
        }
    }

    /// Returns the mode name as written in request files.
    pub fn mode(&self) -> &'static str {
        match self {
            GeneInput::Markers { .. } => "markers",
            GeneInput::Diplotype { .. } => "diplotype",
        }
    }
}

/// Patient identification; not interpreted by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatientInfo {
    pub first_name: String,
    pub last_name: String,
    /// Clinical record number; also used as the sample code.
    pub record_number: String,
    pub sex: String,
    pub birth_date: String,
}

impl Default for PatientInfo {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            record_number: String::new(),
            sex: "-".to_string(),
            birth_date: String::new(),
        }
    }
}

impl PatientInfo {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// Clinical context printed in the report header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClinicalInfo {
    pub current_condition: String,
    pub comorbidities: String,
    pub treatment: String,
}

/// Full request for the three genes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationRequest {
    #[serde(default)]
    pub patient: PatientInfo,
    #[serde(default)]
    pub clinical: ClinicalInfo,
    #[serde(default = "default_dpyd")]
    pub dpyd: GeneInput,
    #[serde(default = "default_ugt1a1")]
    pub ugt1a1: GeneInput,
    #[serde(default = "default_cyp2d6")]
    pub cyp2d6: GeneInput,
}

fn default_dpyd() -> GeneInput {
    GeneInput::default_for(Gene::Dpyd)
}

fn default_ugt1a1() -> GeneInput {
    GeneInput::default_for(Gene::Ugt1a1)
}

fn default_cyp2d6() -> GeneInput {
    GeneInput::default_for(Gene::Cyp2d6)
}

impl Default for ClassificationRequest {
    fn default() -> Self {
        Self {
            patient: PatientInfo::default(),
            clinical: ClinicalInfo::default(),
            dpyd: default_dpyd(),
            ugt1a1: default_ugt1a1(),
            cyp2d6: default_cyp2d6(),
        }
    }
}

impl ClassificationRequest {
    /// Returns the input for `gene`.
    pub fn input(&self, gene: Gene) -> &GeneInput {
        match gene {
            Gene::Dpyd => &self.dpyd,
            Gene::Ugt1a1 => &self.ugt1a1,
            Gene::Cyp2d6 => &self.cyp2d6,
        }
    }
}
