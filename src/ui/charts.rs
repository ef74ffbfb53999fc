use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, BoxElem, BoxPlot, BoxSpread, Legend, Plot};

use crate::data::summary::{BoxStats, GroupedValues};

const CHART_HEIGHT: f32 = 260.0;

// ---------------------------------------------------------------------------
// Bar charts
// ---------------------------------------------------------------------------

/// One bar per category, one legend entry per category.  Used for the sex
/// distribution, mean hours, employment type, and occupation charts.
pub fn category_bars(ui: &mut Ui, id: &str, entries: &[(String, f64)], colors: &[Color32]) {
    let charts: Vec<BarChart> = entries
        .iter()
        .enumerate()
        .map(|(i, (label, value))| {
            let color = colors[i % colors.len()];
            let bar = Bar::new(i as f64, *value).width(0.6).fill(color);
            BarChart::new(vec![bar]).name(label).color(color)
        })
        .collect();

    Plot::new(id.to_string())
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for chart in charts {
                plot_ui.bar_chart(chart);
            }
        });
}

// ---------------------------------------------------------------------------
// Box plot
// ---------------------------------------------------------------------------

/// One box per group with five-number spread.  Used for the income
/// distribution by sex.
pub fn grouped_boxes(ui: &mut Ui, id: &str, groups: &[GroupedValues], colors: &[Color32]) {
    let plots: Vec<BoxPlot> = groups
        .iter()
        .enumerate()
        .filter_map(|(i, group)| {
            let stats = BoxStats::from_values(&group.values)?;
            let color = colors[i % colors.len()];
            let elem = BoxElem::new(
                i as f64,
                BoxSpread::new(stats.min, stats.q1, stats.median, stats.q3, stats.max),
            )
            .box_width(0.5)
            .fill(color.gamma_multiply(0.4))
            .stroke((1.5, color));
            Some(BoxPlot::new(vec![elem]).name(&group.label).color(color))
        })
        .collect();

    Plot::new(id.to_string())
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for plot in plots {
                plot_ui.box_plot(plot);
            }
        });
}
