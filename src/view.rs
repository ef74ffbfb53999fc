use crate::data::model::Year;

// ---------------------------------------------------------------------------
// View – the 8 navigation destinations
// ---------------------------------------------------------------------------

/// One of the dashboard's eight pages.  Navigation is the only transition:
/// clicking a nav button replaces the current view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Home,
    Year(Year),
    Prediction,
    Downloads,
}

impl View {
    /// Every destination, in nav-bar order.
    pub const ALL: [View; 8] = [
        View::Home,
        View::Year(Year::Y2020),
        View::Year(Year::Y2021),
        View::Year(Year::Y2022),
        View::Year(Year::Y2023),
        View::Year(Year::Y2024),
        View::Prediction,
        View::Downloads,
    ];

    /// The label shown on the nav button (and accepted by `from_nav_param`).
    pub fn nav_label(self) -> &'static str {
        match self {
            View::Home => "Inicio",
            View::Year(Year::Y2020) => "2020",
            View::Year(Year::Y2021) => "2021",
            View::Year(Year::Y2022) => "2022",
            View::Year(Year::Y2023) => "2023",
            View::Year(Year::Y2024) => "2024",
            View::Prediction => "Realizar Predicción",
            View::Downloads => "Descargas",
        }
    }

    /// Parse a navigation parameter.  Unrecognized values fall back to Home.
    pub fn from_nav_param(param: &str) -> View {
        View::ALL
            .iter()
            .copied()
            .find(|v| v.nav_label() == param)
            .unwrap_or(View::Home)
    }
}

impl Default for View {
    fn default() -> Self {
        View::Home
    }
}
