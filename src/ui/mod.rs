/// UI layer: page renderers and egui_plot charts.  Render functions take the
/// dataset as an explicit read-only reference; mutable state is limited to
/// navigation, the prediction form, and status lines.
pub mod charts;
pub mod panels;
