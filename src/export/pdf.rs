//! Multi-page PDF report: for each of the five years, one page per chart
//! (sex distribution, income distribution), 10 pages in total.
//!
//! Chart rasters are written into a temporary directory that is removed when
//! this routine returns, on success and failure alike (the `TempDir` guard
//! owns the files for the whole export).

use anyhow::{Context, Result};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream, StringFormat};
use tempfile::TempDir;

use crate::data::model::{Dataset, Year};
use crate::data::summary;

use super::raster;

/// Fixed download name for the PDF report.
pub const PDF_FILE_NAME: &str = "reporte_empleo_estado_mexico.pdf";

/// Pages in the report: five years × two charts.
pub const PAGE_COUNT: usize = Year::ALL.len() * 2;

// A4 portrait, in points.
const PAGE_WIDTH: f64 = 595.0;
const PAGE_HEIGHT: f64 = 842.0;
// Embedded image geometry: full usable width, aspect ratio of the raster.
const IMG_X: f64 = 40.0;
const IMG_WIDTH: f64 = PAGE_WIDTH - 2.0 * IMG_X;
const IMG_HEIGHT: f64 = IMG_WIDTH * raster::RASTER_SIZE.1 as f64 / raster::RASTER_SIZE.0 as f64;
const IMG_Y: f64 = PAGE_HEIGHT - 100.0 - IMG_HEIGHT;
const TITLE_Y: f64 = PAGE_HEIGHT - 60.0;
const TITLE_PT: f64 = 16.0;

/// Render the full report and return the document bytes.
pub fn generate_report(dataset: &Dataset) -> Result<Vec<u8>> {
    let tmp = TempDir::new().context("creating temp dir for chart rasters")?;

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
        "Encoding" => "WinAnsiEncoding",
    });

    let mut page_ids: Vec<ObjectId> = Vec::with_capacity(PAGE_COUNT);
    for year in Year::ALL {
        let slice = dataset.year_slice(year);

        let sex_png = tmp.path().join(format!("sexo_{year}.png"));
        raster::sex_distribution_png(&summary::count_by_sex(&slice), &sex_png)?;
        page_ids.push(add_chart_page(
            &mut doc,
            pages_id,
            font_id,
            &format!("Distribución por Sexo - {year}"),
            &sex_png,
        )?);

        let income_png = tmp.path().join(format!("ingresos_{year}.png"));
        raster::income_box_png(&summary::income_by_sex(&slice), &income_png)?;
        page_ids.push(add_chart_page(
            &mut doc,
            pages_id,
            font_id,
            &format!("Distribución de Ingresos por Sexo - {year}"),
            &income_png,
        )?);
    }

    let kids: Vec<Object> = page_ids.iter().map(|&id| Object::Reference(id)).collect();
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_ids.len() as i64,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).context("serializing PDF")?;
    Ok(bytes)
}

/// One report page: centered bold title plus the full-width chart image.
fn add_chart_page(
    doc: &mut Document,
    pages_id: ObjectId,
    font_id: ObjectId,
    title: &str,
    image_path: &std::path::Path,
) -> Result<ObjectId> {
    let png = std::fs::read(image_path)
        .with_context(|| format!("reading raster {}", image_path.display()))?;
    let image_id =
        doc.add_object(lopdf::xobject::image_from(png).context("building image xobject")?);

    // Rough centering from the average Helvetica glyph width; exact metrics
    // are not worth carrying for a one-line title.
    let title_width = title.chars().count() as f64 * TITLE_PT * 0.55;
    let title_x = ((PAGE_WIDTH - title_width) / 2.0).max(IMG_X);

    let content = Content {
        operations: vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), TITLE_PT.into()]),
            Operation::new("Td", vec![title_x.into(), TITLE_Y.into()]),
            Operation::new(
                "Tj",
                vec![Object::String(latin1(title), StringFormat::Literal)],
            ),
            Operation::new("ET", vec![]),
            Operation::new("q", vec![]),
            // Scale the unit image square to the target box, then draw it.
            Operation::new(
                "cm",
                vec![
                    IMG_WIDTH.into(),
                    0.into(),
                    0.into(),
                    IMG_HEIGHT.into(),
                    IMG_X.into(),
                    IMG_Y.into(),
                ],
            ),
            Operation::new("Do", vec!["Im1".into()]),
            Operation::new("Q", vec![]),
        ],
    };
    let content_id = doc.add_object(Stream::new(
        dictionary! {},
        content.encode().context("encoding page content")?,
    ));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => dictionary! {
            "Font" => dictionary! { "F1" => font_id },
            "XObject" => dictionary! { "Im1" => image_id },
        },
        "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
    });

    Ok(page_id)
}

/// WinAnsi (Latin-1) bytes for the page titles; the accented Spanish
/// characters all fit, anything else degrades to '?'.
fn latin1(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| if (c as u32) < 256 { c as u8 } else { b'?' })
        .collect()
}
