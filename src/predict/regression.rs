//! Income regression: ordinary least squares on (age, sex) predictors.
//!
//! The response is the normalized income bracket value.  A usable training
//! row has an age, a sex, and a bracket label the normalizer recognizes.

use crate::data::income::normalize_income;
use crate::data::model::Dataset;

use super::{PredictError, SexEncoder};

/// Minimum usable rows for a fit.
const MIN_ROWS: usize = 2;

/// OLS model: income ≈ intercept + b·age + sex dummies.
///
/// Fit from scratch on every request; holds no state between requests.
#[derive(Debug, Clone)]
pub struct IncomeRegression {
    encoder: SexEncoder,
    /// Coefficients in design-matrix order: intercept, age, dummy columns.
    coefficients: Vec<f64>,
}

impl IncomeRegression {
    /// Fit the model from every usable row of the dataset.
    pub fn fit(dataset: &Dataset) -> Result<Self, PredictError> {
        let usable: Vec<(f64, &str, f64)> = dataset
            .records()
            .iter()
            .filter_map(|r| {
                let age = r.age? as f64;
                let income = r.income_level.as_deref().and_then(normalize_income)?;
                Some((age, r.sex.as_str(), income))
            })
            .collect();

        if usable.len() < MIN_ROWS {
            return Err(PredictError::InsufficientData {
                required: MIN_ROWS,
                actual: usable.len(),
            });
        }

        let encoder = SexEncoder::fit(usable.iter().map(|(_, sex, _)| *sex));

        // Normal equations XᵀX b = Xᵀy over rows [1, age, dummies...].
        let n_coef = 2 + encoder.categories().len().saturating_sub(1);
        let mut xtx = vec![vec![0.0; n_coef]; n_coef];
        let mut xty = vec![0.0; n_coef];

        for (age, sex, income) in &usable {
            let mut row = Vec::with_capacity(n_coef);
            row.push(1.0);
            row.push(*age);
            row.extend(encoder.dummies(sex)?);

            for i in 0..n_coef {
                for j in 0..n_coef {
                    xtx[i][j] += row[i] * row[j];
                }
                xty[i] += row[i] * income;
            }
        }

        let coefficients = solve(xtx, xty)?;
        Ok(IncomeRegression {
            encoder,
            coefficients,
        })
    }

    /// Point estimate for a new (age, sex) pair.
    pub fn predict(&self, age: u32, sex: &str) -> Result<f64, PredictError> {
        let mut row = Vec::with_capacity(self.coefficients.len());
        row.push(1.0);
        row.push(age as f64);
        row.extend(self.encoder.dummies(sex)?);

        let estimate: f64 = row
            .iter()
            .zip(&self.coefficients)
            .map(|(x, b)| x * b)
            .sum();
        if estimate.is_finite() {
            Ok(estimate)
        } else {
            Err(PredictError::SingularFit)
        }
    }

    /// Sex categories seen at fit time.
    pub fn categories(&self) -> &[String] {
        self.encoder.categories()
    }
}

/// Gaussian elimination with partial pivoting.  The systems here are tiny
/// (2–4 unknowns), so no numerics crate is warranted.
fn solve(mut a: Vec<Vec<f64>>, mut b: Vec<f64>) -> Result<Vec<f64>, PredictError> {
    let n = b.len();
    for col in 0..n {
        let pivot = (col..n)
            .max_by(|&i, &j| a[i][col].abs().total_cmp(&a[j][col].abs()))
            .unwrap_or(col);
        if a[pivot][col].abs() < 1e-12 {
            return Err(PredictError::SingularFit);
        }
        a.swap(col, pivot);
        b.swap(col, pivot);

        for row in (col + 1)..n {
            let factor = a[row][col] / a[col][col];
            for k in col..n {
                a[row][k] -= factor * a[col][k];
            }
            b[row] -= factor * b[col];
        }
    }

    let mut x = vec![0.0; n];
    for row in (0..n).rev() {
        let mut acc = b[row];
        for k in (row + 1)..n {
            acc -= a[row][k] * x[k];
        }
        x[row] = acc / a[row][row];
    }
    Ok(x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Record;

    fn rec(age: u32, sex: &str, income: &str) -> Record {
        Record {
            year: 2020,
            age: Some(age),
            sex: sex.to_string(),
            income_level: Some(income.to_string()),
            hours_worked: None,
            employment_type: None,
            occupation_position: None,
            total_population: None,
        }
    }

    #[test]
    fn recovers_a_linear_relationship_in_age() {
        // Midpoints: 2,500.5 / 7,500.5 / 12,500.5, exactly 500.0 per year
        // of age over ages 20/30/40, same sex throughout.
        let ds = Dataset::from_records(vec![
            rec(20, "Hombre", "1-5,000"),
            rec(30, "Hombre", "5,001-10,000"),
            rec(40, "Hombre", "10,001-15,000"),
        ]);
        let model = IncomeRegression::fit(&ds).unwrap();
        let at_25 = model.predict(25, "Hombre").unwrap();
        assert!((at_25 - 5_000.5).abs() < 1e-6, "got {at_25}");
    }

    #[test]
    fn estimates_are_finite_and_deterministic() {
        let ds = Dataset::from_records(vec![
            rec(20, "Hombre", "1-5,000"),
            rec(35, "Mujer", "10,001-15,000"),
            rec(50, "Hombre", "15,001-20,000"),
            rec(28, "Mujer", "5,001-10,000"),
        ]);
        let model = IncomeRegression::fit(&ds).unwrap();
        let first = model.predict(30, "Mujer").unwrap();
        assert!(first.is_finite());
        for _ in 0..5 {
            let again = IncomeRegression::fit(&ds)
                .unwrap()
                .predict(30, "Mujer")
                .unwrap();
            assert_eq!(first, again);
        }
    }

    #[test]
    fn too_few_usable_rows_is_insufficient_data() {
        // Two rows, but only one has a recognizable bracket.
        let ds = Dataset::from_records(vec![
            rec(20, "Hombre", "1-5,000"),
            rec(30, "Hombre", "sin dato"),
        ]);
        assert_eq!(
            IncomeRegression::fit(&ds).unwrap_err(),
            PredictError::InsufficientData {
                required: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn unknown_sex_is_rejected_at_prediction() {
        let ds = Dataset::from_records(vec![
            rec(20, "Hombre", "1-5,000"),
            rec(30, "Hombre", "5,001-10,000"),
        ]);
        let model = IncomeRegression::fit(&ds).unwrap();
        assert_eq!(
            model.predict(25, "Mujer").unwrap_err(),
            PredictError::UnknownCategory("Mujer".into())
        );
    }

    #[test]
    fn constant_age_is_a_singular_fit() {
        let ds = Dataset::from_records(vec![
            rec(30, "Hombre", "1-5,000"),
            rec(30, "Hombre", "5,001-10,000"),
        ]);
        assert_eq!(
            IncomeRegression::fit(&ds).unwrap_err(),
            PredictError::SingularFit
        );
    }
}
