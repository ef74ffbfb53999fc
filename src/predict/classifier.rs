//! Employment-type classifier: nearest centroid over (age, sex) features.
//!
//! Each `Tipo_Empleo` class gets a centroid in (age, one-hot sex) space; a
//! query is assigned to the closest one.  Ties break toward the first class
//! in sorted label order, so predictions are deterministic.

use std::collections::BTreeMap;

use crate::data::model::Dataset;

use super::{PredictError, SexEncoder};

/// Minimum distinct classes for a meaningful fit.
const MIN_CLASSES: usize = 2;

/// Age is scaled down so it does not dwarf the 0/1 sex indicators in the
/// distance metric.
const AGE_SCALE: f64 = 100.0;

#[derive(Debug, Clone)]
struct Centroid {
    label: String,
    features: Vec<f64>,
}

/// Nearest-centroid classifier over employment-type labels.
///
/// Like the regression, it is refit from the full dataset on every request.
#[derive(Debug, Clone)]
pub struct EmploymentClassifier {
    encoder: SexEncoder,
    centroids: Vec<Centroid>,
}

impl EmploymentClassifier {
    /// Fit centroids from every row with age, sex, and an employment label.
    pub fn fit(dataset: &Dataset) -> Result<Self, PredictError> {
        let usable: Vec<(f64, &str, &str)> = dataset
            .records()
            .iter()
            .filter_map(|r| {
                let age = r.age? as f64;
                let label = r.employment_type.as_deref()?;
                Some((age, r.sex.as_str(), label))
            })
            .collect();

        let encoder = SexEncoder::fit(usable.iter().map(|(_, sex, _)| *sex));

        // label → per-feature sums and row count; BTreeMap keeps the class
        // order (and therefore tie-breaking) stable.
        let mut sums: BTreeMap<&str, (Vec<f64>, usize)> = BTreeMap::new();
        for (age, sex, label) in &usable {
            let features = features(*age, &encoder.one_hot(sex)?);
            let entry = sums
                .entry(*label)
                .or_insert_with(|| (vec![0.0; features.len()], 0));
            for (acc, f) in entry.0.iter_mut().zip(&features) {
                *acc += f;
            }
            entry.1 += 1;
        }

        if sums.len() < MIN_CLASSES {
            return Err(PredictError::InsufficientClasses(sums.len()));
        }

        let centroids = sums
            .into_iter()
            .map(|(label, (sum, count))| Centroid {
                label: label.to_string(),
                features: sum.iter().map(|s| s / count as f64).collect(),
            })
            .collect();

        Ok(EmploymentClassifier { encoder, centroids })
    }

    /// Predicted employment-type label for a new (age, sex) pair.
    pub fn predict(&self, age: u32, sex: &str) -> Result<&str, PredictError> {
        let query = features(age as f64, &self.encoder.one_hot(sex)?);

        let mut best: Option<(&Centroid, f64)> = None;
        for centroid in &self.centroids {
            let dist: f64 = centroid
                .features
                .iter()
                .zip(&query)
                .map(|(a, b)| (a - b) * (a - b))
                .sum();
            let better = match best {
                Some((_, best_dist)) => dist < best_dist,
                None => true,
            };
            if better {
                best = Some((centroid, dist));
            }
        }

        // `centroids` has at least MIN_CLASSES entries, so `best` is set.
        best.map(|(c, _)| c.label.as_str())
            .ok_or(PredictError::InsufficientClasses(0))
    }

    /// Class labels in sorted order.
    pub fn classes(&self) -> Vec<&str> {
        self.centroids.iter().map(|c| c.label.as_str()).collect()
    }
}

fn features(age: f64, one_hot: &[f64]) -> Vec<f64> {
    let mut out = Vec::with_capacity(1 + one_hot.len());
    out.push(age / AGE_SCALE);
    out.extend_from_slice(one_hot);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Record;

    fn rec(age: u32, sex: &str, employment: Option<&str>) -> Record {
        Record {
            year: 2020,
            age: Some(age),
            sex: sex.to_string(),
            income_level: None,
            hours_worked: None,
            employment_type: employment.map(str::to_string),
            occupation_position: None,
            total_population: None,
        }
    }

    #[test]
    fn separable_classes_are_recovered() {
        // Younger rows informal, older rows formal.
        let ds = Dataset::from_records(vec![
            rec(20, "Hombre", Some("Informal")),
            rec(22, "Mujer", Some("Informal")),
            rec(55, "Hombre", Some("Formal")),
            rec(60, "Mujer", Some("Formal")),
        ]);
        let model = EmploymentClassifier::fit(&ds).unwrap();
        assert_eq!(model.predict(21, "Hombre").unwrap(), "Informal");
        assert_eq!(model.predict(58, "Mujer").unwrap(), "Formal");
        assert_eq!(model.classes(), vec!["Formal", "Informal"]);
    }

    #[test]
    fn single_class_is_insufficient() {
        let ds = Dataset::from_records(vec![
            rec(20, "Hombre", Some("Formal")),
            rec(40, "Mujer", Some("Formal")),
        ]);
        assert_eq!(
            EmploymentClassifier::fit(&ds).unwrap_err(),
            PredictError::InsufficientClasses(1)
        );
    }

    #[test]
    fn rows_without_labels_are_skipped() {
        let ds = Dataset::from_records(vec![
            rec(20, "Hombre", None),
            rec(40, "Mujer", None),
        ]);
        assert_eq!(
            EmploymentClassifier::fit(&ds).unwrap_err(),
            PredictError::InsufficientClasses(0)
        );
    }

    #[test]
    fn prediction_is_deterministic() {
        let ds = Dataset::from_records(vec![
            rec(25, "Hombre", Some("Informal")),
            rec(45, "Hombre", Some("Formal")),
            rec(30, "Mujer", Some("Informal")),
            rec(52, "Mujer", Some("Formal")),
        ]);
        let first = EmploymentClassifier::fit(&ds)
            .unwrap()
            .predict(35, "Mujer")
            .unwrap()
            .to_string();
        for _ in 0..5 {
            let again = EmploymentClassifier::fit(&ds)
                .unwrap()
                .predict(35, "Mujer")
                .unwrap()
                .to_string();
            assert_eq!(first, again);
        }
    }
}
