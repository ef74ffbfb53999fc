use crate::data::model::Dataset;
use crate::predict::classifier::EmploymentClassifier;
use crate::predict::regression::IncomeRegression;
use crate::predict::PredictError;
use crate::view::View;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// A status line shown on the Downloads page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Info(String),
    Error(String),
}

/// Inputs and results of the prediction page.  Ephemeral: navigating away
/// discards the results.
#[derive(Debug, Clone)]
pub struct PredictionForm {
    /// Age input, slider-constrained to [18, 100].
    pub age: u32,
    /// Selected sex category (one of the dataset's observed values).
    pub sex: String,
    pub income_result: Option<Result<f64, PredictError>>,
    pub category_result: Option<Result<String, PredictError>>,
}

impl PredictionForm {
    pub const MIN_AGE: u32 = 18;
    pub const MAX_AGE: u32 = 100;

    fn new(default_sex: String) -> Self {
        PredictionForm {
            age: 30,
            sex: default_sex,
            income_result: None,
            category_result: None,
        }
    }
}

/// The mutable UI state.  The dataset itself lives outside: the app owns it
/// and passes it read-only into every renderer.
pub struct AppState {
    pub view: View,
    pub prediction: PredictionForm,
    pub status: Option<Status>,
}

impl AppState {
    pub fn new(dataset: &Dataset) -> Self {
        let default_sex = dataset.sexes().first().cloned().unwrap_or_default();
        AppState {
            view: View::Home,
            prediction: PredictionForm::new(default_sex),
            status: None,
        }
    }

    /// Switch view.  Prediction results and download status are transient.
    pub fn navigate(&mut self, view: View) {
        if self.view != view {
            self.prediction.income_result = None;
            self.prediction.category_result = None;
            self.status = None;
        }
        self.view = view;
    }

    /// Refit the regression on the full dataset and estimate income for the
    /// current form inputs.
    pub fn predict_income(&mut self, dataset: &Dataset) {
        let result = IncomeRegression::fit(dataset)
            .and_then(|model| model.predict(self.prediction.age, &self.prediction.sex));
        if let Err(e) = &result {
            log::warn!("income prediction failed: {e}");
        }
        self.prediction.income_result = Some(result);
    }

    /// Refit the classifier on the full dataset and predict the employment
    /// category for the current form inputs.
    pub fn predict_category(&mut self, dataset: &Dataset) {
        let result = EmploymentClassifier::fit(dataset).and_then(|model| {
            model
                .predict(self.prediction.age, &self.prediction.sex)
                .map(str::to_string)
        });
        if let Err(e) = &result {
            log::warn!("category prediction failed: {e}");
        }
        self.prediction.category_result = Some(result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Record;

    fn dataset() -> Dataset {
        let rec = |age: u32, sex: &str, income: &str, employment: &str| Record {
            year: 2020,
            age: Some(age),
            sex: sex.to_string(),
            income_level: Some(income.to_string()),
            hours_worked: None,
            employment_type: Some(employment.to_string()),
            occupation_position: None,
            total_population: None,
        };
        Dataset::from_records(vec![
            rec(22, "Hombre", "1-5,000", "Informal"),
            rec(35, "Mujer", "5,001-10,000", "Formal"),
            rec(48, "Hombre", "10,001-15,000", "Formal"),
            rec(29, "Mujer", "5,001-10,000", "Informal"),
        ])
    }

    #[test]
    fn defaults_to_home_and_first_observed_sex() {
        let ds = dataset();
        let state = AppState::new(&ds);
        assert_eq!(state.view, View::Home);
        assert_eq!(state.prediction.sex, "Hombre");
        assert_eq!(state.prediction.age, 30);
    }

    #[test]
    fn navigating_away_clears_transient_results() {
        let ds = dataset();
        let mut state = AppState::new(&ds);
        state.navigate(View::Prediction);
        state.predict_income(&ds);
        state.predict_category(&ds);
        assert!(state.prediction.income_result.is_some());
        assert!(state.prediction.category_result.is_some());

        state.navigate(View::Home);
        assert!(state.prediction.income_result.is_none());
        assert!(state.prediction.category_result.is_none());
    }

    #[test]
    fn prediction_results_populate_from_the_models() {
        let ds = dataset();
        let mut state = AppState::new(&ds);
        state.navigate(View::Prediction);
        state.predict_income(&ds);
        state.predict_category(&ds);

        let income = state.prediction.income_result.clone().unwrap().unwrap();
        assert!(income.is_finite());
        let category = state.prediction.category_result.clone().unwrap().unwrap();
        assert!(["Formal", "Informal"].contains(&category.as_str()));
    }
}
