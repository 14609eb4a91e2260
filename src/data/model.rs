use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Stage – one of the four markdown stages M1..M4
// ---------------------------------------------------------------------------

/// A markdown stage. Products in this dataset go through up to four
/// successive markdowns, each deeper than the last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    M1,
    M2,
    M3,
    M4,
}

impl Stage {
    pub const ALL: [Stage; 4] = [Stage::M1, Stage::M2, Stage::M3, Stage::M4];

    /// Zero-based stage index (M1 → 0).
    pub fn index(self) -> usize {
        match self {
            Stage::M1 => 0,
            Stage::M2 => 1,
            Stage::M3 => 2,
            Stage::M4 => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Stage::M1 => "M1",
            Stage::M2 => "M2",
            Stage::M3 => "M3",
            Stage::M4 => "M4",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// ProductRecord – one row of the dataset
// ---------------------------------------------------------------------------

/// A single product row. Field renames match the CSV headers of the synthetic
/// markdown dataset; markdown depths and rates are fractions in [0, 1].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductRecord {
    #[serde(rename = "Product_Name")]
    pub product_name: String,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Brand")]
    pub brand: String,
    #[serde(rename = "Season")]
    pub season: String,
    #[serde(rename = "Original_Price")]
    pub original_price: f64,
    #[serde(rename = "Competitor_Price")]
    pub competitor_price: f64,
    #[serde(rename = "Stock_Level")]
    pub stock_level: f64,
    #[serde(rename = "Promotion_Type")]
    pub promotion_type: String,
    #[serde(rename = "Rating")]
    pub rating: f64,
    #[serde(rename = "Return_Rate")]
    pub return_rate: f64,
    #[serde(rename = "Markdown_1")]
    pub markdown_1: f64,
    #[serde(rename = "Markdown_2")]
    pub markdown_2: f64,
    #[serde(rename = "Markdown_3")]
    pub markdown_3: f64,
    #[serde(rename = "Markdown_4")]
    pub markdown_4: f64,
    #[serde(rename = "Sales_After_M1")]
    pub sales_after_m1: f64,
    #[serde(rename = "Sales_After_M2")]
    pub sales_after_m2: f64,
    #[serde(rename = "Sales_After_M3")]
    pub sales_after_m3: f64,
    #[serde(rename = "Sales_After_M4")]
    pub sales_after_m4: f64,
    #[serde(rename = "Optimal Discount")]
    pub optimal_discount: f64,
}

impl ProductRecord {
    /// Markdown depth applied at the given stage.
    pub fn markdown(&self, stage: Stage) -> f64 {
        match stage {
            Stage::M1 => self.markdown_1,
            Stage::M2 => self.markdown_2,
            Stage::M3 => self.markdown_3,
            Stage::M4 => self.markdown_4,
        }
    }

    /// Unit sales observed after the given stage's markdown.
    pub fn sales_after(&self, stage: Stage) -> f64 {
        match stage {
            Stage::M1 => self.sales_after_m1,
            Stage::M2 => self.sales_after_m2,
            Stage::M3 => self.sales_after_m3,
            Stage::M4 => self.sales_after_m4,
        }
    }

    /// The four observed (markdown, sales) response points in stage order.
    pub fn observed_points(&self) -> [(f64, f64); 4] {
        [
            (self.markdown_1, self.sales_after_m1),
            (self.markdown_2, self.sales_after_m2),
            (self.markdown_3, self.sales_after_m3),
            (self.markdown_4, self.sales_after_m4),
        ]
    }
}

// ---------------------------------------------------------------------------
// ProductDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed unique-value indices for the
/// columns the presentation layer filters on.
#[derive(Debug, Clone)]
pub struct ProductDataset {
    /// All product rows.
    pub records: Vec<ProductRecord>,
    /// Sorted unique categories.
    pub categories: BTreeSet<String>,
    /// Sorted unique brands.
    pub brands: BTreeSet<String>,
    /// Sorted unique seasons.
    pub seasons: BTreeSet<String>,
}

impl ProductDataset {
    /// Build the unique-value indices from the loaded records.
    pub fn from_records(records: Vec<ProductRecord>) -> Self {
        let mut categories = BTreeSet::new();
        let mut brands = BTreeSet::new();
        let mut seasons = BTreeSet::new();

        for rec in &records {
            categories.insert(rec.category.clone());
            brands.insert(rec.brand.clone());
            seasons.insert(rec.season.clone());
        }

        ProductDataset {
            records,
            categories,
            brands,
            seasons,
        }
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
