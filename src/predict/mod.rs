/// Prediction layer: two small estimators refit from the full dataset on
/// every request.  No cached or persisted model state.
///
/// ```text
///   Dataset ──▶ fit ──▶ IncomeRegression      ──▶ estimate (MXN)
///   Dataset ──▶ fit ──▶ EmploymentClassifier  ──▶ Tipo_Empleo label
/// ```
pub mod classifier;
pub mod regression;

use thiserror::Error;

/// Errors surfaced by the model fits.  All of them are user-visible on the
/// prediction page; none of them abort the session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PredictError {
    /// Too few usable training rows after normalization.
    #[error("datos insuficientes para ajustar el modelo: se requieren {required} filas y hay {actual}")]
    InsufficientData { required: usize, actual: usize },

    /// The classification target has fewer than two distinct labels.
    #[error("se requieren al menos 2 categorías de empleo y hay {0}")]
    InsufficientClasses(usize),

    /// The requested sex category never appears in the training data.
    #[error("categoría de sexo no observada en los datos: {0}")]
    UnknownCategory(String),

    /// Degenerate design matrix (e.g. a constant predictor column).
    #[error("el ajuste del modelo es singular para estos datos")]
    SingularFit,
}

// ---------------------------------------------------------------------------
// Sex encoding
// ---------------------------------------------------------------------------

/// Explicit categorical encoding of the sex column, shared by both models.
///
/// Categories are the sorted unique values seen at fit time.  `one_hot`
/// yields one indicator per category (classifier features); `dummies` drops
/// the first category so a regression design matrix with an intercept stays
/// full-rank.
#[derive(Debug, Clone)]
pub struct SexEncoder {
    categories: Vec<String>,
}

impl SexEncoder {
    pub fn fit<'a, I>(observed: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut categories: Vec<String> = observed.into_iter().map(str::to_string).collect();
        categories.sort();
        categories.dedup();
        SexEncoder { categories }
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    fn index_of(&self, sex: &str) -> Result<usize, PredictError> {
        self.categories
            .iter()
            .position(|c| c == sex)
            .ok_or_else(|| PredictError::UnknownCategory(sex.to_string()))
    }

    /// One indicator column per category.
    pub fn one_hot(&self, sex: &str) -> Result<Vec<f64>, PredictError> {
        let idx = self.index_of(sex)?;
        let mut out = vec![0.0; self.categories.len()];
        out[idx] = 1.0;
        Ok(out)
    }

    /// Drop-first dummy columns (empty when only one category is observed).
    pub fn dummies(&self, sex: &str) -> Result<Vec<f64>, PredictError> {
        let idx = self.index_of(sex)?;
        let mut out = vec![0.0; self.categories.len().saturating_sub(1)];
        if idx > 0 {
            out[idx - 1] = 1.0;
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoder_sorts_and_dedups_categories() {
        let enc = SexEncoder::fit(["Mujer", "Hombre", "Mujer"]);
        assert_eq!(enc.categories(), &["Hombre".to_string(), "Mujer".to_string()]);
        assert_eq!(enc.one_hot("Hombre").unwrap(), vec![1.0, 0.0]);
        assert_eq!(enc.one_hot("Mujer").unwrap(), vec![0.0, 1.0]);
        assert_eq!(enc.dummies("Hombre").unwrap(), vec![0.0]);
        assert_eq!(enc.dummies("Mujer").unwrap(), vec![1.0]);
    }

    #[test]
    fn unknown_category_is_rejected() {
        let enc = SexEncoder::fit(["Hombre"]);
        assert_eq!(
            enc.one_hot("Otro"),
            Err(PredictError::UnknownCategory("Otro".into()))
        );
        // Single observed category encodes to zero dummy columns.
        assert_eq!(enc.dummies("Hombre").unwrap(), Vec::<f64>::new());
    }
}
