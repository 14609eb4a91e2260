//! Shared fixtures for unit tests across the crate.

use super::model::{ProductDataset, ProductRecord};

/// A well-formed product row with a clean, monotone sales response.
pub(crate) fn sample_record() -> ProductRecord {
    ProductRecord {
        product_name: "Wool Coat".into(),
        category: "Outerwear".into(),
        brand: "Northline".into(),
        season: "Winter".into(),
        original_price: 120.0,
        competitor_price: 115.0,
        stock_level: 400.0,
        promotion_type: "Clearance".into(),
        rating: 4.2,
        return_rate: 0.08,
        markdown_1: 0.10,
        markdown_2: 0.20,
        markdown_3: 0.30,
        markdown_4: 0.40,
        sales_after_m1: 50.0,
        sales_after_m2: 80.0,
        sales_after_m3: 120.0,
        sales_after_m4: 150.0,
        optimal_discount: 0.30,
    }
}

/// A small mixed dataset: two categories, two seasons, two brands.
pub(crate) fn sample_dataset() -> ProductDataset {
    let coat = sample_record();

    let mut sneaker = sample_record();
    sneaker.product_name = "Trail Sneaker".into();
    sneaker.category = "Footwear".into();
    sneaker.brand = "Stride".into();
    sneaker.season = "Summer".into();
    sneaker.original_price = 80.0;
    sneaker.competitor_price = 85.0;
    sneaker.stock_level = 250.0;
    sneaker.rating = 3.9;
    sneaker.return_rate = 0.05;
    sneaker.sales_after_m1 = 40.0;
    sneaker.sales_after_m2 = 70.0;
    sneaker.sales_after_m3 = 90.0;
    sneaker.sales_after_m4 = 95.0;
    sneaker.optimal_discount = 0.20;

    let mut scarf = sample_record();
    scarf.product_name = "Silk Scarf".into();
    scarf.brand = "Stride".into();
    scarf.original_price = 45.0;
    scarf.competitor_price = 40.0;
    scarf.stock_level = 150.0;
    scarf.rating = 4.7;
    scarf.return_rate = 0.02;
    scarf.sales_after_m1 = 20.0;
    scarf.sales_after_m2 = 35.0;
    scarf.sales_after_m3 = 45.0;
    scarf.sales_after_m4 = 60.0;
    scarf.optimal_discount = 0.40;

    ProductDataset::from_records(vec![coat, sneaker, scarf])
}
