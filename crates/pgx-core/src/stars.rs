//! Selectable star alleles for diplotype mode.

use std::collections::BTreeSet;

use pgx_model::{MarkerDefinition, WILD_TYPE};

/// Collects the star labels a user can choose for a gene.
///
/// Always contains the wild type. Labels come from the first token of each
/// marker's star allele; `extra` labels are added as given.
pub fn collect_stars<'a>(
    markers: &[MarkerDefinition],
    extra: impl IntoIterator<Item = &'a str>,
) -> Vec<String> {
    let mut stars: BTreeSet<String> = BTreeSet::new();
    stars.insert(WILD_TYPE.to_string());
    stars.extend(
        markers
            .iter()
            .filter_map(MarkerDefinition::star_token)
            .map(str::to_string),
    );
    stars.extend(
        extra
            .into_iter()
            .map(str::trim)
            .filter(|star| !star.is_empty() && *star != "-")
            .map(str::to_string),
    );
    sort_stars(stars)
}

/// Orders labels so that "*1" < "*13" < "*2A" < "HapB3".
pub fn sort_stars(stars: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut stars: Vec<String> = stars.into_iter().collect();
    stars.sort_by_cached_key(|star| (star.replace('*', "0"), star.clone()));
    stars.dedup();
    stars
}
