use markdown_advisor::data::filter::{filtered_indices, init_filter_state};
use markdown_advisor::data::loader::load_file;
use markdown_advisor::metrics::{
    avg_optimal_discount, best_stage, compute_stage_metrics, revenue_by_category_stage,
};
use markdown_advisor::{baseline, simulate, DiscountModel, ProductRecord, Stage};

// ---------------------------------------------------------------------------
// Test data fixtures
// ---------------------------------------------------------------------------

/// Builds the 64-product dataset: 4 categories × 4 products × 4 seasons,
/// each with a monotone four-stage sales response.
fn sample_records() -> Vec<ProductRecord> {
    let categories = [
        ("Outerwear", ["Parka", "Wool Coat", "Rain Shell", "Puffer"]),
        ("Footwear", ["Sneaker", "Boot", "Slip-On", "Runner"]),
        ("Accessories", ["Scarf", "Belt", "Beanie", "Tote"]),
        ("Knitwear", ["Sweater", "Cardigan", "Pullover", "Turtleneck"]),
    ];
    let seasons = ["Spring", "Summer", "Fall", "Winter"];
    let brands = ["Northline", "Stride", "Verano", "Atelier"];

    let mut records = Vec::new();
    let mut k = 0usize;
    for (cat_idx, (category, products)) in categories.iter().enumerate() {
        for (prod_idx, product) in products.iter().enumerate() {
            for season in seasons {
                // Deterministic but varied per product.
                let price = 30.0 + 9.5 * ((k * 11) % 17) as f64;
                let base_sales = 20.0 + ((k * 7) % 13) as f64 * 4.0;

                records.push(ProductRecord {
                    product_name: format!("{product} {season}"),
                    category: category.to_string(),
                    brand: brands[(cat_idx + prod_idx) % brands.len()].to_string(),
                    season: season.to_string(),
                    original_price: price,
                    competitor_price: price * 0.95,
                    stock_level: 200.0 + 25.0 * ((k * 3) % 9) as f64,
                    promotion_type: "Clearance".to_string(),
                    rating: 3.0 + 0.2 * ((k * 5) % 10) as f64,
                    return_rate: 0.02 + 0.01 * ((k * 2) % 9) as f64,
                    markdown_1: 0.10,
                    markdown_2: 0.20,
                    markdown_3: 0.30,
                    markdown_4: 0.40,
                    sales_after_m1: base_sales,
                    sales_after_m2: base_sales * 1.5,
                    sales_after_m3: base_sales * 2.1,
                    sales_after_m4: base_sales * 2.6,
                    optimal_discount: 0.15 + 0.02 * ((k * 13) % 14) as f64,
                });
                k += 1;
            }
        }
    }
    records
}

fn write_dataset(name: &str) -> std::path::PathBuf {
    let path = std::env::temp_dir().join(name);
    let mut writer = csv::Writer::from_path(&path).unwrap();
    for rec in sample_records() {
        writer.serialize(rec).unwrap();
    }
    writer.flush().unwrap();
    path
}

// ---------------------------------------------------------------------------
// End-to-end: load → derive → filter → recommend → simulate
// ---------------------------------------------------------------------------

#[test]
fn sixty_four_row_file_loads_fully_populated() {
    let path = write_dataset("advisor-it-load.csv");
    let dataset = load_file(&path).unwrap();

    assert_eq!(dataset.len(), 64);
    assert_eq!(dataset.categories.len(), 4);
    assert_eq!(dataset.seasons.len(), 4);
    for rec in &dataset.records {
        assert!(!rec.product_name.is_empty());
        assert!(rec.original_price > 0.0);
        assert!((0.0..=1.0).contains(&rec.optimal_discount));
    }
}

#[test]
fn derived_metrics_cover_every_product_and_stage() {
    let path = write_dataset("advisor-it-metrics.csv");
    let dataset = load_file(&path).unwrap();
    let metrics = compute_stage_metrics(&dataset);

    assert_eq!(metrics.len(), 64 * 4);
    assert!(metrics.iter().all(|m| m.revenue >= 0.0));

    let all: Vec<usize> = (0..dataset.len()).collect();
    let (stage, revenue) = best_stage(&metrics, &all).unwrap();
    assert!(Stage::ALL.contains(&stage));
    assert!(revenue > 0.0);

    let avg = avg_optimal_discount(&dataset, &all).unwrap();
    assert!((0.0..=1.0).contains(&avg));
}

#[test]
fn filtered_dashboard_view_narrows_the_pivot() {
    let path = write_dataset("advisor-it-filter.csv");
    let dataset = load_file(&path).unwrap();
    let metrics = compute_stage_metrics(&dataset);

    let mut filters = init_filter_state(&dataset);
    filters.categories.retain(|c| c == "Footwear");
    let visible = filtered_indices(&dataset, &filters);

    assert_eq!(visible.len(), 16);
    let pivot = revenue_by_category_stage(&dataset, &metrics, &visible);
    assert!(pivot.keys().all(|(category, _)| category == "Footwear"));
    assert_eq!(pivot.len(), 4);
}

#[test]
fn recommendations_stay_inside_the_markdown_range() {
    let path = write_dataset("advisor-it-model.csv");
    let dataset = load_file(&path).unwrap();
    let model = DiscountModel::fit(&dataset).unwrap();

    for rec in &dataset.records {
        let discount = model.recommend(rec);
        assert!((0.0..=1.0).contains(&discount));
        // The recommendation is simulatable as-is.
        let outcome = simulate(rec, discount).unwrap();
        assert!(outcome.sales >= 0.0);
        assert!(outcome.revenue >= 0.0);
    }
}

#[test]
fn simulation_reproduces_observed_stages_and_the_baseline() {
    let path = write_dataset("advisor-it-sim.csv");
    let dataset = load_file(&path).unwrap();

    for rec in &dataset.records {
        for stage in Stage::ALL {
            let point = simulate(rec, rec.markdown(stage)).unwrap();
            assert!(
                (point.sales - rec.sales_after(stage)).abs() < 1e-9,
                "{}: stage {stage} sales {} vs {}",
                rec.product_name,
                point.sales,
                rec.sales_after(stage)
            );
        }

        // Round-trip: at markdown 0 the full price applies.
        let base = baseline(rec).unwrap();
        assert!((base.revenue - rec.original_price * base.sales).abs() < 1e-9);
        assert_eq!(base.markdown, 0.0);
    }
}
