//! Aggregations over a year slice, feeding the charts and the PDF report.
//!
//! Every function here is pure: `&[&Record]` in, render-ready values out.
//! A column with no data in the slice produces an empty result, and the
//! callers skip that chart instead of failing the page.

use std::collections::BTreeMap;

use super::income::normalize_income;
use super::model::Record;

/// Count of rows per category label.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryCount {
    pub label: String,
    pub count: usize,
}

/// Numeric values grouped under a category label.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedValues {
    pub label: String,
    pub values: Vec<f64>,
}

/// Five-number summary for a box plot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxStats {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

// ---------------------------------------------------------------------------
// Chart aggregations
// ---------------------------------------------------------------------------

/// Rows per sex category, sorted by label.
pub fn count_by_sex(rows: &[&Record]) -> Vec<CategoryCount> {
    count_by(rows, |r| Some(r.sex.as_str()))
}

/// Formal/informal employment counts, sorted by label.
pub fn employment_type_counts(rows: &[&Record]) -> Vec<CategoryCount> {
    count_by(rows, |r| r.employment_type.as_deref())
}

/// Normalized incomes grouped by sex.  Rows whose bracket label does not
/// normalize are excluded here (and only here).
pub fn income_by_sex(rows: &[&Record]) -> Vec<GroupedValues> {
    grouped_values(rows, |r| {
        let income = r.income_level.as_deref().and_then(normalize_income)?;
        Some((r.sex.as_str(), income))
    })
}

/// Mean hours worked per sex category.
pub fn mean_hours_by_sex(rows: &[&Record]) -> Vec<(String, f64)> {
    grouped_values(rows, |r| Some((r.sex.as_str(), r.hours_worked?)))
        .into_iter()
        .map(|g| {
            let mean = g.values.iter().sum::<f64>() / g.values.len() as f64;
            (g.label, mean)
        })
        .collect()
}

/// Total population summed per occupation position.
pub fn population_by_occupation(rows: &[&Record]) -> Vec<(String, f64)> {
    grouped_values(rows, |r| {
        Some((r.occupation_position.as_deref()?, r.total_population?))
    })
    .into_iter()
    .map(|g| (g.label, g.values.iter().sum()))
    .collect()
}

// ---------------------------------------------------------------------------
// Generic helpers
// ---------------------------------------------------------------------------

fn count_by<'a, F>(rows: &[&'a Record], key: F) -> Vec<CategoryCount>
where
    F: Fn(&'a Record) -> Option<&'a str>,
{
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for row in rows {
        if let Some(k) = key(row) {
            *counts.entry(k).or_default() += 1;
        }
    }
    counts
        .into_iter()
        .map(|(label, count)| CategoryCount {
            label: label.to_string(),
            count,
        })
        .collect()
}

fn grouped_values<'a, F>(rows: &[&'a Record], key_value: F) -> Vec<GroupedValues>
where
    F: Fn(&'a Record) -> Option<(&'a str, f64)>,
{
    let mut groups: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for row in rows {
        if let Some((k, v)) = key_value(row) {
            groups.entry(k).or_default().push(v);
        }
    }
    groups
        .into_iter()
        .map(|(label, values)| GroupedValues {
            label: label.to_string(),
            values,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Box statistics
// ---------------------------------------------------------------------------

impl BoxStats {
    /// Five-number summary with linear-interpolation quartiles.
    /// `None` for an empty sample.
    pub fn from_values(values: &[f64]) -> Option<BoxStats> {
        if values.is_empty() {
            return None;
        }
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        Some(BoxStats {
            min: sorted[0],
            q1: percentile(&sorted, 0.25),
            median: percentile(&sorted, 0.5),
            q3: percentile(&sorted, 0.75),
            max: sorted[sorted.len() - 1],
        })
    }
}

/// Linear-interpolation percentile over an already sorted sample.
fn percentile(sorted: &[f64], p: f64) -> f64 {
    let idx = (sorted.len() - 1) as f64 * p;
    let lo = idx.floor() as usize;
    let hi = idx.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        let frac = idx - lo as f64;
        sorted[lo] * (1.0 - frac) + sorted[hi] * frac
    }
}
