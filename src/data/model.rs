use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

// ---------------------------------------------------------------------------
// Year – the five supported survey years
// ---------------------------------------------------------------------------

/// One of the survey years covered by the dashboard.  Filtering code takes a
/// `Year`, so an out-of-range year cannot be requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Year {
    Y2020,
    Y2021,
    Y2022,
    Y2023,
    Y2024,
}

impl Year {
    /// All supported years, in chronological order.
    pub const ALL: [Year; 5] = [
        Year::Y2020,
        Year::Y2021,
        Year::Y2022,
        Year::Y2023,
        Year::Y2024,
    ];

    pub fn as_u16(self) -> u16 {
        match self {
            Year::Y2020 => 2020,
            Year::Y2021 => 2021,
            Year::Y2022 => 2022,
            Year::Y2023 => 2023,
            Year::Y2024 => 2024,
        }
    }

    pub fn from_u16(year: u16) -> Option<Year> {
        Year::ALL.iter().copied().find(|y| y.as_u16() == year)
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u16())
    }
}

// ---------------------------------------------------------------------------
// Record – one row of the survey table
// ---------------------------------------------------------------------------

/// A single survey row.  Headers are the Spanish column names of the data
/// file; the English aliases let re-exported files round-trip too.  Optional
/// columns deserialize empty CSV fields to `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "Año", alias = "Year")]
    pub year: u16,

    #[serde(rename = "Edad", alias = "Age")]
    pub age: Option<u32>,

    #[serde(rename = "Sexo", alias = "Sex")]
    pub sex: String,

    #[serde(rename = "Nivel_Ingresos", alias = "Income_Level")]
    pub income_level: Option<String>,

    #[serde(rename = "Horas_Trabajo", alias = "Hours_Worked")]
    pub hours_worked: Option<f64>,

    #[serde(rename = "Tipo_Empleo", alias = "Employment_Type")]
    pub employment_type: Option<String>,

    #[serde(rename = "Posicion_Ocupacion", alias = "Occupation_Position")]
    pub occupation_position: Option<String>,

    #[serde(rename = "Total_Poblacion", alias = "Total_Population")]
    pub total_population: Option<f64>,
}

impl Record {
    /// Column headers in file order, used by the table widgets and the CSV
    /// export round-trip test.
    pub const COLUMNS: [&'static str; 8] = [
        "Año",
        "Edad",
        "Sexo",
        "Nivel_Ingresos",
        "Horas_Trabajo",
        "Tipo_Empleo",
        "Posicion_Ocupacion",
        "Total_Poblacion",
    ];
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed dataset.  Loaded once at startup and read-only afterwards:
/// every view borrows it, nobody mutates it.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<Record>,
    /// Sorted unique sex categories observed in the data.
    sexes: Vec<String>,
    /// Years present in the data (not limited to the supported five).
    years: BTreeSet<u16>,
}

impl Dataset {
    /// Build the dataset and its unique-value caches from the parsed rows.
    pub fn from_records(records: Vec<Record>) -> Self {
        let mut sexes: BTreeSet<String> = BTreeSet::new();
        let mut years: BTreeSet<u16> = BTreeSet::new();
        for rec in &records {
            sexes.insert(rec.sex.clone());
            years.insert(rec.year);
        }
        Dataset {
            records,
            sexes: sexes.into_iter().collect(),
            years,
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Sorted unique sex categories; the prediction form offers exactly these.
    pub fn sexes(&self) -> &[String] {
        &self.sexes
    }

    pub fn years(&self) -> &BTreeSet<u16> {
        &self.years
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Borrowed view of the rows for a single year.
    pub fn year_slice(&self, year: Year) -> Vec<&Record> {
        let y = year.as_u16();
        self.records.iter().filter(|r| r.year == y).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(year: u16, sex: &str) -> Record {
        Record {
            year,
            age: Some(30),
            sex: sex.to_string(),
            income_level: None,
            hours_worked: None,
            employment_type: None,
            occupation_position: None,
            total_population: None,
        }
    }

    #[test]
    fn caches_sorted_unique_sexes() {
        let ds = Dataset::from_records(vec![
            rec(2020, "Mujer"),
            rec(2021, "Hombre"),
            rec(2020, "Mujer"),
        ]);
        assert_eq!(ds.sexes(), &["Hombre".to_string(), "Mujer".to_string()]);
        assert_eq!(ds.len(), 3);
    }

    #[test]
    fn year_slices_partition_the_dataset() {
        let mut records = Vec::new();
        for (i, y) in [2020u16, 2021, 2022, 2023, 2024, 2020, 2022]
            .iter()
            .enumerate()
        {
            let mut r = rec(*y, if i % 2 == 0 { "Hombre" } else { "Mujer" });
            r.age = Some(20 + i as u32);
            records.push(r);
        }
        let ds = Dataset::from_records(records);

        let mut total = 0usize;
        for year in Year::ALL {
            let slice = ds.year_slice(year);
            assert!(slice.iter().all(|r| r.year == year.as_u16()));
            total += slice.len();
        }
        // Every record's year is one of the five, so the slices cover it all.
        assert_eq!(total, ds.len());
    }

    #[test]
    fn year_round_trips_through_u16() {
        for year in Year::ALL {
            assert_eq!(Year::from_u16(year.as_u16()), Some(year));
        }
        assert_eq!(Year::from_u16(2019), None);
        assert_eq!(Year::from_u16(2025), None);
    }
}
