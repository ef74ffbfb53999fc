use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::color;
use crate::data::model::{Dataset, Record, Year};
use crate::data::summary;
use crate::export;
use crate::state::{AppState, PredictionForm, Status};
use crate::view::View;

/// Header image shown on the Home page when present.
const HOME_IMAGE: &str = "assets/empleo.jpg";

const INTRO_GENERAL: &str = "El Estado de México es uno de los motores económicos más \
relevantes del país: concentra la mayor población del territorio nacional y una intensa \
actividad industrial y comercial alrededor de la Ciudad de México. Su mercado laboral \
combina una fuerte presencia de empleo informal con una recuperación paulatina de la \
formalidad tras la pandemia de COVID-19.\n\n\
Esta plataforma ofrece un análisis de la evolución del empleo y el desempleo entre 2020 \
y 2024: niveles de ingresos, distribución por sexo, formalidad del empleo y horas \
trabajadas. Explora cada sección para revisar los indicadores por año, realizar \
predicciones basadas en modelos estadísticos y descargar los datos y reportes.";

// ---------------------------------------------------------------------------
// Navigation bar
// ---------------------------------------------------------------------------

/// Title plus the eight navigation buttons.  Clicking a button is the only
/// view transition in the app.
pub fn nav_bar(ui: &mut Ui, state: &mut AppState) {
    ui.add_space(6.0);
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(
            RichText::new("🇲🇽 Empleo y Desempleo en el Estado de México")
                .color(color::BURGUNDY)
                .strong(),
        );
    });
    ui.add_space(4.0);
    ui.horizontal_wrapped(|ui: &mut Ui| {
        for view in View::ALL {
            let selected = state.view == view;
            if ui.selectable_label(selected, view.nav_label()).clicked() {
                state.navigate(view);
            }
        }
    });
    ui.add_space(4.0);
}

// ---------------------------------------------------------------------------
// Home
// ---------------------------------------------------------------------------

pub fn home_view(ui: &mut Ui, dataset: &Dataset) {
    ui.heading("Introducción General");
    ui.add_space(6.0);
    ui.label(INTRO_GENERAL);
    ui.add_space(10.0);

    if std::path::Path::new(HOME_IMAGE).exists() {
        ui.vertical_centered(|ui: &mut Ui| {
            ui.add(
                egui::Image::new(format!("file://{HOME_IMAGE}"))
                    .max_height(320.0)
                    .rounding(4.0),
            );
        });
    } else {
        ui.label(
            RichText::new(format!(
                "No se encontró la imagen '{HOME_IMAGE}'. Colócala junto al ejecutable."
            ))
            .color(Color32::DARK_RED),
        );
    }

    ui.separator();
    ui.heading("Base de datos de empleo y desempleo (2020 - 2024)");
    ui.label("Información clave para analizar las tendencias del empleo y desempleo en el Estado de México.");
    ui.add_space(6.0);
    let rows: Vec<&Record> = dataset.records().iter().collect();
    records_table(ui, &rows);
}

// ---------------------------------------------------------------------------
// Year pages
// ---------------------------------------------------------------------------

pub fn year_view(ui: &mut Ui, dataset: &Dataset, year: Year) {
    ui.heading(format!("Empleo y Desempleo en {year}"));
    ui.add_space(6.0);
    ui.label(format!(
        "Durante {year} el mercado laboral del Estado de México mostró tendencias \
         particulares en ingresos, distribución por sexo y formalidad del empleo. \
         Las gráficas siguientes resumen la situación de ese año."
    ));
    ui.separator();

    let slice = dataset.year_slice(year);
    ui.heading(format!("Tabla de datos para {year}"));
    ui.add_space(6.0);
    records_table(ui, &slice);
    ui.separator();

    // Sex distribution.
    let sex_counts = summary::count_by_sex(&slice);
    if !sex_counts.is_empty() {
        ui.heading(format!("Distribución por Sexo en {year}"));
        let entries: Vec<(String, f64)> = sex_counts
            .iter()
            .map(|c| (c.label.clone(), c.count as f64))
            .collect();
        crate::ui::charts::category_bars(ui, "sexo", &entries, &color::BRAND_PAIR);
        ui.separator();
    }

    // Income distribution (rows with unrecognized brackets excluded here).
    let income_groups = summary::income_by_sex(&slice);
    if !income_groups.is_empty() {
        ui.heading(format!("Distribución de Ingresos por Sexo en {year}"));
        crate::ui::charts::grouped_boxes(ui, "ingresos", &income_groups, &color::BRAND_PAIR);
        ui.separator();
    }

    // Mean hours worked.
    let hours = summary::mean_hours_by_sex(&slice);
    if !hours.is_empty() {
        ui.heading(format!("Promedio de Horas Trabajadas por Sexo en {year}"));
        crate::ui::charts::category_bars(ui, "horas", &hours, &color::BRAND_PAIR);
        ui.separator();
    }

    // Formal vs informal employment.
    let employment = summary::employment_type_counts(&slice);
    if !employment.is_empty() {
        ui.heading(format!("Proporción de Empleos Formales e Informales en {year}"));
        let entries: Vec<(String, f64)> = employment
            .iter()
            .map(|c| (c.label.clone(), c.count as f64))
            .collect();
        crate::ui::charts::category_bars(ui, "tipo_empleo", &entries, &color::BRAND_PAIR);
        ui.separator();
    }

    // Population per occupation position.
    let occupation = summary::population_by_occupation(&slice);
    if !occupation.is_empty() {
        ui.heading(format!("Posición/Ocupación vs Población Total en {year}"));
        let palette = color::generate_palette(occupation.len());
        crate::ui::charts::category_bars(ui, "ocupacion", &occupation, &palette);
    }
}

// ---------------------------------------------------------------------------
// Prediction
// ---------------------------------------------------------------------------

pub fn prediction_view(ui: &mut Ui, dataset: &Dataset, state: &mut AppState) {
    ui.heading("Realizar Predicción");
    ui.add_space(6.0);

    ui.add(
        egui::Slider::new(
            &mut state.prediction.age,
            PredictionForm::MIN_AGE..=PredictionForm::MAX_AGE,
        )
        .text("Edad"),
    );

    let selected = state.prediction.sex.clone();
    egui::ComboBox::from_label("Sexo")
        .selected_text(selected)
        .show_ui(ui, |ui: &mut Ui| {
            for sex in dataset.sexes() {
                ui.selectable_value(&mut state.prediction.sex, sex.clone(), sex);
            }
        });

    ui.add_space(10.0);

    if ui.button("Predecir Ingreso (Regresión)").clicked() {
        state.predict_income(dataset);
    }
    match &state.prediction.income_result {
        Some(Ok(estimate)) => {
            ui.label(
                RichText::new(format!("Ingreso estimado: {}", format_currency(*estimate)))
                    .color(Color32::DARK_GREEN)
                    .strong(),
            );
        }
        Some(Err(e)) => {
            ui.label(RichText::new(e.to_string()).color(Color32::RED));
        }
        None => {}
    }

    ui.add_space(10.0);

    if ui.button("Predecir Categoría (Clasificación)").clicked() {
        state.predict_category(dataset);
    }
    match &state.prediction.category_result {
        Some(Ok(label)) => {
            ui.label(
                RichText::new(format!("Categoría estimada: {label}"))
                    .color(color::BURGUNDY)
                    .strong(),
            );
        }
        Some(Err(e)) => {
            ui.label(RichText::new(e.to_string()).color(Color32::RED));
        }
        None => {}
    }
}

// ---------------------------------------------------------------------------
// Downloads
// ---------------------------------------------------------------------------

pub fn downloads_view(ui: &mut Ui, dataset: &Dataset, state: &mut AppState) {
    ui.heading("Descargar Datos y Reportes");
    ui.add_space(6.0);

    if ui.button("Descargar Base de Datos CSV").clicked() {
        save_export(state, export::csv::CSV_FILE_NAME, || {
            export::csv::dataset_to_csv(dataset)
        });
    }

    ui.add_space(6.0);

    if ui.button("Generar Reporte PDF con Gráficas por Año").clicked() {
        save_export(state, export::pdf::PDF_FILE_NAME, || {
            export::pdf::generate_report(dataset)
        });
    }

    ui.add_space(10.0);
    match &state.status {
        Some(Status::Info(msg)) => {
            ui.label(RichText::new(msg.as_str()).color(Color32::DARK_GREEN));
        }
        Some(Status::Error(msg)) => {
            ui.label(RichText::new(msg.as_str()).color(Color32::RED));
        }
        None => {}
    }
}

/// Ask for a destination, then produce and write the export.  The bytes are
/// only generated after the user confirms a path.
fn save_export<F>(state: &mut AppState, default_name: &str, produce: F)
where
    F: FnOnce() -> anyhow::Result<Vec<u8>>,
{
    let Some(path) = rfd::FileDialog::new()
        .set_title("Guardar archivo")
        .set_file_name(default_name)
        .save_file()
    else {
        return;
    };

    let result = produce().and_then(|bytes| {
        std::fs::write(&path, bytes)
            .map_err(|e| anyhow::anyhow!("escribiendo {}: {e}", path.display()))
    });
    match result {
        Ok(()) => {
            log::info!("export saved to {}", path.display());
            state.status = Some(Status::Info(format!(
                "Archivo guardado en {}",
                path.display()
            )));
        }
        Err(e) => {
            log::error!("export failed: {e:#}");
            state.status = Some(Status::Error(format!("Error al exportar: {e:#}")));
        }
    }
}

// ---------------------------------------------------------------------------
// Shared widgets
// ---------------------------------------------------------------------------

/// Read-only table over the given rows, one column per dataset column.
fn records_table(ui: &mut Ui, rows: &[&Record]) {
    TableBuilder::new(ui)
        .striped(true)
        .columns(Column::auto().resizable(true), Record::COLUMNS.len())
        .header(20.0, |mut header| {
            for name in Record::COLUMNS {
                header.col(|ui: &mut Ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, rows.len(), |mut row| {
                let r = rows[row.index()];
                let cells = [
                    r.year.to_string(),
                    fmt_opt(r.age.map(|v| v.to_string())),
                    r.sex.clone(),
                    fmt_opt(r.income_level.clone()),
                    fmt_opt(r.hours_worked.map(|v| format!("{v:.1}"))),
                    fmt_opt(r.employment_type.clone()),
                    fmt_opt(r.occupation_position.clone()),
                    fmt_opt(r.total_population.map(|v| format!("{v:.0}"))),
                ];
                for cell in cells {
                    row.col(|ui: &mut Ui| {
                        ui.label(cell.clone());
                    });
                }
            });
        });
}

fn fmt_opt(value: Option<String>) -> String {
    value.unwrap_or_default()
}

/// Currency formatting for the regression estimate: `$12,345.67`.
pub fn format_currency(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let cents = (value.abs() * 100.0).round() as u64;
    let units = cents / 100;
    let frac = cents % 100;

    let digits = units.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}${grouped}.{frac:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_groups_thousands() {
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(999.999), "$1,000.00");
        assert_eq!(format_currency(7500.5), "$7,500.50");
        assert_eq!(format_currency(1_234_567.891), "$1,234,567.89");
        assert_eq!(format_currency(-42.5), "-$42.50");
    }
}
