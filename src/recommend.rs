//! Discount recommendation: a small ridge-regularized least-squares model
//! mapping product features to the labelled optimal discount.
//!
//! Five numeric features (original price, competitor price gap, stock level,
//! rating, return rate) are standardized and fit against the dataset's
//! `Optimal Discount` column via the normal equations. Predictions are
//! clamped to the valid markdown range [0, 1].

use log::info;

use crate::data::model::{ProductDataset, ProductRecord};
use crate::error::{AdvisorError, Result};

/// Number of numeric features the model consumes.
const N_FEATURES: usize = 5;

/// Small ridge term so the normal equations stay solvable even when
/// features are collinear. The intercept is not regularized.
const RIDGE_LAMBDA: f64 = 1e-3;

/// Raw (un-standardized) feature vector for one product.
fn features(rec: &ProductRecord) -> [f64; N_FEATURES] {
    [
        rec.original_price,
        rec.competitor_price - rec.original_price,
        rec.stock_level,
        rec.rating,
        rec.return_rate,
    ]
}

// ---------------------------------------------------------------------------
// DiscountModel
// ---------------------------------------------------------------------------

/// A fitted discount model. Read-only after [`DiscountModel::fit`].
#[derive(Debug, Clone)]
pub struct DiscountModel {
    /// Per-feature mean used for standardization.
    means: [f64; N_FEATURES],
    /// Per-feature standard deviation (1.0 where the feature is constant).
    stds: [f64; N_FEATURES],
    /// Intercept followed by one coefficient per standardized feature.
    coefficients: [f64; N_FEATURES + 1],
}

impl DiscountModel {
    /// Fit against every record's `Optimal Discount` label.
    pub fn fit(dataset: &ProductDataset) -> Result<Self> {
        if dataset.is_empty() {
            return Err(AdvisorError::Fit {
                reason: "cannot fit on an empty dataset".to_string(),
            });
        }

        let n = dataset.len();
        let raw: Vec<[f64; N_FEATURES]> =
            dataset.records.iter().map(features).collect();

        // Standardize each feature column.
        let mut means = [0.0; N_FEATURES];
        let mut stds = [0.0; N_FEATURES];
        for j in 0..N_FEATURES {
            let mean = raw.iter().map(|row| row[j]).sum::<f64>() / n as f64;
            let var = raw
                .iter()
                .map(|row| (row[j] - mean).powi(2))
                .sum::<f64>()
                / n as f64;
            means[j] = mean;
            let std = var.sqrt();
            stds[j] = if std > 1e-12 { std } else { 1.0 };
        }

        // Design matrix rows: [1, z_1, ..., z_5].
        let design: Vec<[f64; N_FEATURES + 1]> = raw
            .iter()
            .map(|row| {
                let mut x = [1.0; N_FEATURES + 1];
                for j in 0..N_FEATURES {
                    x[j + 1] = (row[j] - means[j]) / stds[j];
                }
                x
            })
            .collect();
        let targets: Vec<f64> = dataset
            .records
            .iter()
            .map(|rec| rec.optimal_discount)
            .collect();

        // Normal equations: (XᵀX + λI)β = Xᵀy.
        let dim = N_FEATURES + 1;
        let mut a = vec![vec![0.0; dim]; dim];
        let mut b = vec![0.0; dim];
        for (x, &y) in design.iter().zip(&targets) {
            for i in 0..dim {
                for j in 0..dim {
                    a[i][j] += x[i] * x[j];
                }
                b[i] += x[i] * y;
            }
        }
        for (i, row) in a.iter_mut().enumerate().skip(1) {
            row[i] += RIDGE_LAMBDA;
        }

        let solution = solve_linear_system(a, b)?;
        let mut coefficients = [0.0; N_FEATURES + 1];
        coefficients.copy_from_slice(&solution);

        let model = DiscountModel {
            means,
            stds,
            coefficients,
        };
        info!(
            "fitted discount model on {n} products (in-sample MAE {:.4})",
            model.mean_absolute_error(dataset)
        );
        Ok(model)
    }

    /// Predicted optimal discount for a product, clamped to [0, 1].
    pub fn recommend(&self, rec: &ProductRecord) -> f64 {
        let raw = features(rec);
        let mut prediction = self.coefficients[0];
        for j in 0..N_FEATURES {
            let z = (raw[j] - self.means[j]) / self.stds[j];
            prediction += self.coefficients[j + 1] * z;
        }
        prediction.clamp(0.0, 1.0)
    }

    /// In-sample mean absolute error against the labelled column.
    pub fn mean_absolute_error(&self, dataset: &ProductDataset) -> f64 {
        if dataset.is_empty() {
            return 0.0;
        }
        let total: f64 = dataset
            .records
            .iter()
            .map(|rec| (self.recommend(rec) - rec.optimal_discount).abs())
            .sum();
        total / dataset.len() as f64
    }
}

// ---------------------------------------------------------------------------
// Dense linear solve
// ---------------------------------------------------------------------------

/// Gaussian elimination with partial pivoting on a square system.
fn solve_linear_system(mut a: Vec<Vec<f64>>, mut b: Vec<f64>) -> Result<Vec<f64>> {
    let n = b.len();

    for col in 0..n {
        // Pivot: largest absolute value in this column at or below the diagonal.
        let pivot_row = (col..n)
            .max_by(|&i, &j| {
                a[i][col]
                    .abs()
                    .partial_cmp(&a[j][col].abs())
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .unwrap_or(col);
        if a[pivot_row][col].abs() < 1e-12 {
            return Err(AdvisorError::Fit {
                reason: "normal equations are singular".to_string(),
            });
        }
        a.swap(col, pivot_row);
        b.swap(col, pivot_row);

        for row in (col + 1)..n {
            let factor = a[row][col] / a[col][col];
            for k in col..n {
                a[row][k] -= factor * a[col][k];
            }
            b[row] -= factor * b[col];
        }
    }

    // Back substitution.
    let mut x = vec![0.0; n];
    for row in (0..n).rev() {
        let mut sum = b[row];
        for k in (row + 1)..n {
            sum -= a[row][k] * x[k];
        }
        x[row] = sum / a[row][row];
    }
    Ok(x)
}
