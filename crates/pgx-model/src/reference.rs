//! Immutable reference data store.
//!
//! Built once per process from the four reference tables and shared
//! read-only with the engine. Lookups never fail; callers get `None` or an
//! empty slice when the tables have nothing for a key.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::error::{ModelError, Result};
use crate::{CypPhenotypeRow, Gene, MarkerDefinition, Phenotype, RecommendationRow};

#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    markers: BTreeMap<Gene, Vec<MarkerDefinition>>,
    cyp2d6_stars: Vec<String>,
    cyp2d6_phenotypes: Vec<CypPhenotypeRow>,
    cyp2d6_index: HashMap<String, usize>,
    recommendations: Vec<RecommendationRow>,
}

impl ReferenceData {
    /// Assemble the store, keeping table order within each gene.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::DuplicateColumn`] when two markers of the same
    /// gene share a column key.
    pub fn new(
        markers: Vec<MarkerDefinition>,
        cyp2d6_stars: Vec<String>,
        cyp2d6_phenotypes: Vec<CypPhenotypeRow>,
        recommendations: Vec<RecommendationRow>,
    ) -> Result<Self> {
        let mut grouped: BTreeMap<Gene, Vec<MarkerDefinition>> = BTreeMap::new();
        let mut seen: BTreeSet<(Gene, String)> = BTreeSet::new();
        for marker in markers {
            if !seen.insert((marker.gene, marker.column.clone())) {
                return Err(ModelError::DuplicateColumn {
                    gene: marker.gene,
                    column: marker.column,
                });
            }
            grouped.entry(marker.gene).or_default().push(marker);
        }

        // First row wins for repeated diplotypes.
        let mut cyp2d6_index = HashMap::new();
        for (idx, row) in cyp2d6_phenotypes.iter().enumerate() {
            cyp2d6_index.entry(row.diplotype.clone()).or_insert(idx);
        }

        Ok(Self {
            markers: grouped,
            cyp2d6_stars,
            cyp2d6_phenotypes,
            cyp2d6_index,
            recommendations,
        })
    }

    /// Marker definitions for `gene`, in table order.
    pub fn markers(&self, gene: Gene) -> &[MarkerDefinition] {
        self.markers.get(&gene).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Finds a marker of `gene` by its rsID.
    pub fn marker_by_rsid(&self, gene: Gene, rsid: &str) -> Option<&MarkerDefinition> {
        self.markers(gene)
            .iter()
            .find(|marker| marker.rsid.eq_ignore_ascii_case(rsid))
    }

    /// Selectable CYP2D6 star alleles as listed in the reference table.
    pub fn cyp2d6_stars(&self) -> &[String] {
        &self.cyp2d6_stars
    }

    pub fn cyp2d6_phenotypes(&self) -> &[CypPhenotypeRow] {
        &self.cyp2d6_phenotypes
    }

    /// Exact, order-sensitive lookup of a CYP2D6 diplotype summary.
    pub fn cyp2d6_summary(&self, diplotype: &str) -> Option<&str> {
        self.cyp2d6_index
            .get(diplotype)
            .map(|idx| self.cyp2d6_phenotypes[*idx].summary.as_str())
    }

    pub fn recommendations(&self) -> &[RecommendationRow] {
        &self.recommendations
    }

    /// Long-form guideline text of the first row matching gene and phenotype.
    pub fn long_recommendation(&self, gene: Gene, phenotype: Phenotype) -> Option<&str> {
        self.recommendations
            .iter()
            .find(|row| row.gene == gene && row.category() == Some(phenotype))
            .map(|row| row.rec_text.as_str())
    }

    /// Number of marker definitions across all genes.
    pub fn marker_count(&self) -> usize {
        self.markers.values().map(Vec::len).sum()
    }
}
