//! Stage metrics: the derived quantities behind every view of the dashboard.
//!
//! Row level:
//!   revenue      = Original_Price × (1 − Markdownᵢ) × Sales_After_Mᵢ
//!   sell-through = Sales_After_Mᵢ / Stock_Level
//!
//! Everything here is a pure function of the loaded dataset; the long-form
//! table is computed once per session and aggregated on demand.

use std::collections::BTreeMap;

use crate::data::model::{ProductDataset, ProductRecord, Stage};

// ---------------------------------------------------------------------------
// Long-form stage metrics
// ---------------------------------------------------------------------------

/// One (product, stage) cell of the long-form metrics table.
#[derive(Debug, Clone, PartialEq)]
pub struct StageMetrics {
    /// Index of the product in `ProductDataset::records`.
    pub record_idx: usize,
    pub stage: Stage,
    /// Markdown depth at this stage, fraction in [0, 1].
    pub markdown: f64,
    /// Units sold after this stage's markdown.
    pub sales: f64,
    /// Price after markdown × units sold.
    pub revenue: f64,
    /// Share of the stocked units this stage moved.
    pub sell_through: f64,
}

/// Revenue a single stage generates for a single product.
pub fn stage_revenue(record: &ProductRecord, stage: Stage) -> f64 {
    record.original_price * (1.0 - record.markdown(stage)) * record.sales_after(stage)
}

/// Derive the four stage metrics for one product.
pub fn record_metrics(record: &ProductRecord, record_idx: usize) -> [StageMetrics; 4] {
    Stage::ALL.map(|stage| {
        let sales = record.sales_after(stage);
        let sell_through = if record.stock_level > 0.0 {
            sales / record.stock_level
        } else {
            0.0
        };
        StageMetrics {
            record_idx,
            stage,
            markdown: record.markdown(stage),
            sales,
            revenue: stage_revenue(record, stage),
            sell_through,
        }
    })
}

/// The full long-form table: four rows per product, in (product, stage) order.
pub fn compute_stage_metrics(dataset: &ProductDataset) -> Vec<StageMetrics> {
    dataset
        .records
        .iter()
        .enumerate()
        .flat_map(|(i, rec)| record_metrics(rec, i))
        .collect()
}

// ---------------------------------------------------------------------------
// Aggregations over a filtered view
// ---------------------------------------------------------------------------

/// Total revenue per stage across the given record indices.
pub fn revenue_by_stage(
    metrics: &[StageMetrics],
    indices: &[usize],
) -> BTreeMap<Stage, f64> {
    let mut totals: BTreeMap<Stage, f64> =
        Stage::ALL.iter().map(|&s| (s, 0.0)).collect();
    for m in metrics {
        if indices.contains(&m.record_idx) {
            *totals.get_mut(&m.stage).unwrap() += m.revenue;
        }
    }
    totals
}

/// The markdown stage with the highest total revenue, with that revenue.
/// Ties resolve to the earlier stage.
pub fn best_stage(metrics: &[StageMetrics], indices: &[usize]) -> Option<(Stage, f64)> {
    if indices.is_empty() {
        return None;
    }
    let totals = revenue_by_stage(metrics, indices);
    let mut best: Option<(Stage, f64)> = None;
    for stage in Stage::ALL {
        let revenue = totals[&stage];
        if best.map_or(true, |(_, r)| revenue > r) {
            best = Some((stage, revenue));
        }
    }
    best
}

/// Mean of the labelled optimal discount over the given record indices.
pub fn avg_optimal_discount(dataset: &ProductDataset, indices: &[usize]) -> Option<f64> {
    if indices.is_empty() {
        return None;
    }
    let sum: f64 = indices
        .iter()
        .map(|&i| dataset.records[i].optimal_discount)
        .sum();
    Some(sum / indices.len() as f64)
}

/// Revenue totals keyed by (category, stage): the dashboard's pivot table.
pub fn revenue_by_category_stage(
    dataset: &ProductDataset,
    metrics: &[StageMetrics],
    indices: &[usize],
) -> BTreeMap<(String, Stage), f64> {
    let mut totals = BTreeMap::new();
    for m in metrics {
        if indices.contains(&m.record_idx) {
            let category = dataset.records[m.record_idx].category.clone();
            *totals.entry((category, m.stage)).or_insert(0.0) += m.revenue;
        }
    }
    totals
}

/// Revenue totals keyed by (category, season), summed over all stages.
pub fn revenue_by_category_season(
    dataset: &ProductDataset,
    metrics: &[StageMetrics],
    indices: &[usize],
) -> BTreeMap<(String, String), f64> {
    let mut totals = BTreeMap::new();
    for m in metrics {
        if indices.contains(&m.record_idx) {
            let rec = &dataset.records[m.record_idx];
            *totals
                .entry((rec.category.clone(), rec.season.clone()))
                .or_insert(0.0) += m.revenue;
        }
    }
    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::test_support::{sample_dataset, sample_record};

    #[test]
    fn revenue_formula_matches_by_hand() {
        let rec = sample_record();
        // 120 × (1 − 0.30) × 120 = 10 080
        let revenue = stage_revenue(&rec, Stage::M3);
        assert!((revenue - 10_080.0).abs() < 1e-9);
    }

    #[test]
    fn long_table_has_four_rows_per_product() {
        let ds = sample_dataset();
        let metrics = compute_stage_metrics(&ds);
        assert_eq!(metrics.len(), 4 * ds.len());
        assert_eq!(metrics[0].stage, Stage::M1);
        assert_eq!(metrics[3].stage, Stage::M4);
        assert_eq!(metrics[4].record_idx, 1);
    }

    #[test]
    fn derived_revenue_is_non_negative_for_valid_records() {
        let ds = sample_dataset();
        for m in compute_stage_metrics(&ds) {
            assert!(m.revenue >= 0.0, "negative revenue: {m:?}");
            assert!(m.sell_through >= 0.0);
        }
    }

    #[test]
    fn sell_through_handles_zero_stock() {
        let mut rec = sample_record();
        rec.stock_level = 0.0;
        for m in record_metrics(&rec, 0) {
            assert_eq!(m.sell_through, 0.0);
        }
    }

    #[test]
    fn best_stage_picks_highest_revenue() {
        let ds = sample_dataset();
        let metrics = compute_stage_metrics(&ds);
        let all: Vec<usize> = (0..ds.len()).collect();

        let (stage, revenue) = best_stage(&metrics, &all).unwrap();
        let totals = revenue_by_stage(&metrics, &all);
        assert!(totals.values().all(|&v| v <= revenue));
        assert_eq!(totals[&stage], revenue);
    }

    #[test]
    fn aggregations_respect_the_index_set() {
        let ds = sample_dataset();
        let metrics = compute_stage_metrics(&ds);

        assert!(best_stage(&metrics, &[]).is_none());
        assert!(avg_optimal_discount(&ds, &[]).is_none());

        // Record 1 alone: sneaker, optimal discount 0.20.
        let avg = avg_optimal_discount(&ds, &[1]).unwrap();
        assert!((avg - 0.20).abs() < 1e-12);

        let pivot = revenue_by_category_stage(&ds, &metrics, &[1]);
        assert_eq!(pivot.len(), 4);
        assert!(pivot.keys().all(|(cat, _)| cat == "Footwear"));
    }

    #[test]
    fn category_season_totals_sum_all_stages() {
        let ds = sample_dataset();
        let metrics = compute_stage_metrics(&ds);
        let all: Vec<usize> = (0..ds.len()).collect();

        let heat = revenue_by_category_season(&ds, &metrics, &all);
        let grand_total: f64 = heat.values().sum();
        let by_stage: f64 = revenue_by_stage(&metrics, &all).values().sum();
        assert!((grand_total - by_stage).abs() < 1e-6);
    }
}
