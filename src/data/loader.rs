use std::path::Path;

use log::info;

use super::model::{ProductDataset, ProductRecord};
use crate::error::{AdvisorError, Result};

/// Every column the dataset must carry, in the order the known instance
/// writes them.
pub const REQUIRED_COLUMNS: [&str; 19] = [
    "Product_Name",
    "Category",
    "Brand",
    "Season",
    "Original_Price",
    "Competitor_Price",
    "Stock_Level",
    "Promotion_Type",
    "Rating",
    "Return_Rate",
    "Markdown_1",
    "Markdown_2",
    "Markdown_3",
    "Markdown_4",
    "Sales_After_M1",
    "Sales_After_M2",
    "Sales_After_M3",
    "Sales_After_M4",
    "Optimal Discount",
];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a markdown dataset from a file. Dispatch by extension.
///
/// Supported formats:
/// * `.csv`  – header row with the columns in [`REQUIRED_COLUMNS`]
/// * `.json` – records orientation: `[{ "Product_Name": ..., ... }, ...]`
pub fn load_file(path: &Path) -> Result<ProductDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        other => Err(AdvisorError::UnsupportedFormat {
            extension: other.to_string(),
        }),
    }?;

    info!(
        "loaded {} products ({} categories, {} seasons) from {}",
        dataset.len(),
        dataset.categories.len(),
        dataset.seasons.len(),
        path.display()
    );
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<ProductDataset> {
    let mut reader = csv::Reader::from_path(path)?;

    // Check the schema up front so a missing column fails before row parsing.
    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();
    for required in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == required) {
            return Err(AdvisorError::MissingColumn {
                column: required.to_string(),
            });
        }
    }

    let mut records = Vec::new();
    for (row_no, result) in reader.deserialize::<ProductRecord>().enumerate() {
        let record = result.map_err(|e| AdvisorError::Schema {
            row: row_no,
            reason: e.to_string(),
        })?;
        validate_record(&record, row_no)?;
        records.push(record);
    }

    Ok(ProductDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the default `df.to_json(orient='records')`:
///
/// ```json
/// [
///   { "Product_Name": "Wool Coat", "Category": "Outerwear", ... },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<ProductDataset> {
    let text = std::fs::read_to_string(path)?;
    let records: Vec<ProductRecord> = serde_json::from_str(&text)?;

    for (row_no, record) in records.iter().enumerate() {
        validate_record(record, row_no)?;
    }

    Ok(ProductDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// Row validation
// ---------------------------------------------------------------------------

/// Range checks on a parsed row. Markdowns, return rate and the optimal
/// discount are fractions in [0, 1]; sales and stock are non-negative counts.
fn validate_record(rec: &ProductRecord, row: usize) -> Result<()> {
    let schema_err = |reason: String| AdvisorError::Schema { row, reason };

    if !(rec.original_price > 0.0) {
        return Err(schema_err(format!(
            "Original_Price must be positive, got {}",
            rec.original_price
        )));
    }
    if rec.competitor_price < 0.0 {
        return Err(schema_err(format!(
            "Competitor_Price must be non-negative, got {}",
            rec.competitor_price
        )));
    }
    if rec.stock_level < 0.0 {
        return Err(schema_err(format!(
            "Stock_Level must be non-negative, got {}",
            rec.stock_level
        )));
    }
    if !(0.0..=5.0).contains(&rec.rating) {
        return Err(schema_err(format!(
            "Rating must be in [0, 5], got {}",
            rec.rating
        )));
    }
    if !(0.0..=1.0).contains(&rec.return_rate) {
        return Err(schema_err(format!(
            "Return_Rate must be in [0, 1], got {}",
            rec.return_rate
        )));
    }
    if !(0.0..=1.0).contains(&rec.optimal_discount) {
        return Err(schema_err(format!(
            "Optimal Discount must be in [0, 1], got {}",
            rec.optimal_discount
        )));
    }

    for (i, (markdown, sales)) in rec.observed_points().iter().enumerate() {
        if !(0.0..=1.0).contains(markdown) {
            return Err(schema_err(format!(
                "Markdown_{} must be in [0, 1], got {markdown}",
                i + 1
            )));
        }
        if *sales < 0.0 {
            return Err(schema_err(format!(
                "Sales_After_M{} must be non-negative, got {sales}",
                i + 1
            )));
        }
    }

    Ok(())
}
