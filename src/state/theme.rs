use egui::{Color32, Visuals};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    pub fn toggle(&self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn visuals(&self) -> Visuals {
        match self {
            Theme::Dark => Visuals::dark(),
            Theme::Light => Visuals::light(),
        }
    }

    /// Stroke color for committed ROIs on the viewer.
    pub fn roi_stroke(&self) -> Color32 {
        match self {
            Theme::Dark => Color32::from_rgb(255, 200, 100),
            Theme::Light => Color32::from_rgb(200, 120, 0),
        }
    }

    /// Stroke color for the selection being drawn.
    pub fn selection_stroke(&self) -> Color32 {
        match self {
            Theme::Dark => Color32::from_rgb(100, 200, 255),
            Theme::Light => Color32::from_rgb(0, 110, 200),
        }
    }

}

impl Default for Theme {
    fn default() -> Self {
        Theme::Dark
    }
}
