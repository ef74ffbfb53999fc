/// Export layer: CSV serialization of the full table and the per-year PDF
/// report with embedded chart rasters.
pub mod csv;
pub mod pdf;
pub mod raster;
