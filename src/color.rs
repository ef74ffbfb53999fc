use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Brand colors
// ---------------------------------------------------------------------------

/// Burgundy, the dashboard's primary color.
pub const BURGUNDY: Color32 = Color32::from_rgb(0x80, 0x00, 0x20);
/// Gold, the accent color.
pub const GOLD: Color32 = Color32::from_rgb(0xFF, 0xD7, 0x00);

/// The fixed pair used by the two-sex charts, cycled when a chart has more
/// categories than colors.
pub const BRAND_PAIR: [Color32; 2] = [BURGUNDY, GOLD];

/// Color for the i-th of two brand-colored series.
pub fn brand_color(index: usize) -> Color32 {
    BRAND_PAIR[index % BRAND_PAIR.len()]
}

// ---------------------------------------------------------------------------
// Categorical palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colors using evenly spaced hues.  Used by
/// the charts whose category count is data-driven (occupation positions).
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.65, 0.45);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size_and_distinct_entries() {
        assert!(generate_palette(0).is_empty());
        let colors = generate_palette(6);
        assert_eq!(colors.len(), 6);
        for i in 0..colors.len() {
            for j in (i + 1)..colors.len() {
                assert_ne!(colors[i], colors[j]);
            }
        }
    }

    #[test]
    fn brand_colors_cycle() {
        assert_eq!(brand_color(0), BURGUNDY);
        assert_eq!(brand_color(1), GOLD);
        assert_eq!(brand_color(2), BURGUNDY);
    }
}
