use anyhow::{anyhow, Result};

use crate::data::model::Dataset;

/// Fixed download name for the CSV export.
pub const CSV_FILE_NAME: &str = "empleodesempleo.csv";

/// Serialize the full dataset as UTF-8 CSV with a header row.  Quoting is
/// the format default (bracket labels contain commas and come out quoted).
pub fn dataset_to_csv(dataset: &Dataset) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for record in dataset.records() {
        writer.serialize(record)?;
    }
    writer
        .into_inner()
        .map_err(|e| anyhow!("finishing CSV buffer: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Record;

    fn dataset() -> Dataset {
        let rec = |year: u16, sex: &str, income: Option<&str>| Record {
            year,
            age: Some(33),
            sex: sex.to_string(),
            income_level: income.map(str::to_string),
            hours_worked: Some(42.0),
            employment_type: Some("Formal".into()),
            occupation_position: None,
            total_population: Some(1_000.0),
        };
        Dataset::from_records(vec![
            rec(2020, "Hombre", Some("5,001-10,000")),
            rec(2021, "Mujer", None),
            rec(2024, "Mujer", Some("50,001 o más")),
        ])
    }

    #[test]
    fn export_round_trips_rows_and_columns() {
        let ds = dataset();
        let bytes = dataset_to_csv(&ds).unwrap();

        let mut reader = csv::Reader::from_reader(bytes.as_slice());
        let headers: Vec<String> = reader
            .headers()
            .unwrap()
            .iter()
            .map(str::to_string)
            .collect();
        assert_eq!(headers, Record::COLUMNS);

        let rows: Vec<Record> = reader
            .deserialize::<Record>()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(rows.len(), ds.len());
        assert_eq!(rows, ds.records());
    }

    #[test]
    fn export_is_utf8_with_quoted_brackets() {
        let bytes = dataset_to_csv(&dataset()).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.starts_with("Año,"));
        assert!(text.contains("\"5,001-10,000\""));
        assert!(text.contains("50,001 o más"));
    }
}
