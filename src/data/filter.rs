use std::collections::BTreeSet;

use super::model::ProductDataset;

// ---------------------------------------------------------------------------
// Filter predicate: which categories and seasons are selected
// ---------------------------------------------------------------------------

/// Global filter selections, mirroring the sidebar of the dashboard.
///
/// Semantics per column: selecting every value means "no constraint";
/// an empty selection hides everything.
#[derive(Debug, Clone, Default)]
pub struct FilterState {
    pub categories: BTreeSet<String>,
    pub seasons: BTreeSet<String>,
}

/// Initialise a [`FilterState`] with all values selected (i.e., show everything).
pub fn init_filter_state(dataset: &ProductDataset) -> FilterState {
    FilterState {
        categories: dataset.categories.clone(),
        seasons: dataset.seasons.clone(),
    }
}

/// Return indices of records that pass both active filters.
pub fn filtered_indices(dataset: &ProductDataset, filters: &FilterState) -> Vec<usize> {
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| {
            passes(&filters.categories, &dataset.categories, &rec.category)
                && passes(&filters.seasons, &dataset.seasons, &rec.season)
        })
        .map(|(i, _)| i)
        .collect()
}

fn passes(selected: &BTreeSet<String>, all_values: &BTreeSet<String>, value: &str) -> bool {
    if selected.is_empty() {
        // Nothing selected for this column → hide everything
        return false;
    }
    if selected.len() == all_values.len() {
        // Everything selected → no effective filter
        return true;
    }
    selected.contains(value)
}

/// Narrow a filtered view for the product picker: keep records matching the
/// chosen category and/or brand (None = "All").
pub fn drilldown_indices(
    dataset: &ProductDataset,
    indices: &[usize],
    category: Option<&str>,
    brand: Option<&str>,
) -> Vec<usize> {
    indices
        .iter()
        .copied()
        .filter(|&i| {
            let rec = &dataset.records[i];
            category.map_or(true, |c| rec.category == c)
                && brand.map_or(true, |b| rec.brand == b)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::test_support::sample_dataset;

    #[test]
    fn all_selected_passes_everything() {
        let ds = sample_dataset();
        let filters = init_filter_state(&ds);
        assert_eq!(filtered_indices(&ds, &filters), vec![0, 1, 2]);
    }

    #[test]
    fn empty_selection_hides_everything() {
        let ds = sample_dataset();
        let mut filters = init_filter_state(&ds);
        filters.seasons.clear();
        assert!(filtered_indices(&ds, &filters).is_empty());
    }

    #[test]
    fn partial_selection_keeps_matching_rows() {
        let ds = sample_dataset();
        let mut filters = init_filter_state(&ds);
        filters.categories.remove("Footwear");

        // Records 0 and 2 are Outerwear, record 1 is Footwear.
        assert_eq!(filtered_indices(&ds, &filters), vec![0, 2]);
    }

    #[test]
    fn drilldown_narrows_by_category_and_brand() {
        let ds = sample_dataset();
        let all: Vec<usize> = (0..ds.len()).collect();

        assert_eq!(drilldown_indices(&ds, &all, Some("Outerwear"), None), vec![0, 2]);
        assert_eq!(
            drilldown_indices(&ds, &all, Some("Outerwear"), Some("Stride")),
            vec![2]
        );
        assert_eq!(drilldown_indices(&ds, &all, None, None), all);
    }
}
