use std::path::Path;

use anyhow::{bail, Context, Result};
use serde_json::Value as JsonValue;

use super::model::{Dataset, Record};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the survey dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`  – delimited table with a header row (the primary input format)
/// * `.json` – records-oriented array, `[{"Año": 2020, "Sexo": "Hombre", ...}]`
pub fn load_file(path: &Path) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with the column names, one survey row per record.
/// Empty cells in optional columns become `None`; no validation happens
/// beyond the column typing `Record` declares.
fn load_csv(path: &Path) -> Result<Dataset> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("opening CSV {}", path.display()))?;

    let mut records = Vec::new();
    for (row_no, result) in reader.deserialize::<Record>().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        records.push(record);
    }

    Ok(Dataset::from_records(records))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default
/// `df.to_json(orient='records')`): a top-level array of row objects keyed by
/// the same column names the CSV uses.
fn load_json(path: &Path) -> Result<Dataset> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading JSON {}", path.display()))?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let rows = root.as_array().context("Expected top-level JSON array")?;

    let mut records = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        let record: Record = serde_json::from_value(row.clone())
            .with_context(|| format!("JSON row {i}"))?;
        records.push(record);
    }

    Ok(Dataset::from_records(records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const CSV_SAMPLE: &str = "\
Año,Edad,Sexo,Nivel_Ingresos,Horas_Trabajo,Tipo_Empleo,Posicion_Ocupacion,Total_Poblacion
2020,34,Hombre,\"5,001-10,000\",45,Formal,Empleado,1200
2021,29,Mujer,,40,Informal,Comerciante,800
";

    #[test]
    fn loads_csv_with_empty_optionals() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(CSV_SAMPLE.as_bytes()).unwrap();

        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records()[0].year, 2020);
        assert_eq!(
            ds.records()[0].income_level.as_deref(),
            Some("5,001-10,000")
        );
        assert_eq!(ds.records()[1].income_level, None);
        assert_eq!(ds.sexes(), &["Hombre".to_string(), "Mujer".to_string()]);
    }

    #[test]
    fn loads_records_oriented_json() {
        let json = r#"[
            {"Año": 2022, "Edad": 40, "Sexo": "Mujer", "Nivel_Ingresos": "10,001-15,000",
             "Horas_Trabajo": 38.5, "Tipo_Empleo": "Formal",
             "Posicion_Ocupacion": "Empleada", "Total_Poblacion": 950}
        ]"#;
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.records()[0].hours_worked, Some(38.5));
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_file(Path::new("no/such/empleodesempleo.csv")).is_err());
    }

    #[test]
    fn unsupported_extension_is_an_error() {
        assert!(load_file(Path::new("datos.parquet")).is_err());
    }
}
