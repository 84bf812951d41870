//! Parameter store for the designer page
//!
//! Holds the current `HabitatParameters` together with the raw text of the
//! two dimension fields, and applies discrete events coming from the form.

use super::types::{try_parse_dimension, HabitatParameters, HabitatShape, ZOOM_MAX, ZOOM_MIN, ZOOM_STEP};

/// Discrete update events emitted by the designer controls
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterEvent {
    /// Shape selected in the combo box
    SelectShape(HabitatShape),
    /// Radius field edited (raw text)
    RadiusInput(String),
    /// Height/length field edited (raw text)
    HeightLengthInput(String),
    ZoomIn,
    ZoomOut,
    /// Restore zoom and camera view
    Reset,
    /// "Generate Habitat" button
    Generate,
}

/// What the owner of the store should do after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StoreUpdate {
    /// Parameters changed, the scene must be recomposed
    pub changed: bool,
    /// Orbit camera should return to its default angles
    pub reset_view: bool,
}

/// Current parameters plus form text, owned by the designer page
#[derive(Debug, Clone)]
pub struct ParameterStore {
    params: HabitatParameters,
    radius_text: String,
    height_length_text: String,
}

impl Default for ParameterStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ParameterStore {
    /// Create a store holding default parameters
    pub fn new() -> Self {
        let params = HabitatParameters::default();
        Self {
            radius_text: format_dimension(params.radius),
            height_length_text: format_dimension(params.height_length),
            params,
        }
    }

    /// Current parameters
    pub fn params(&self) -> &HabitatParameters {
        &self.params
    }

    /// Raw radius text as typed
    pub fn radius_text(&self) -> &str {
        &self.radius_text
    }

    /// Raw height/length text as typed
    pub fn height_length_text(&self) -> &str {
        &self.height_length_text
    }

    /// Apply one event
    pub fn apply(&mut self, event: ParameterEvent) -> StoreUpdate {
        let before = self.params;
        let mut reset_view = false;

        match event {
            ParameterEvent::SelectShape(shape) => {
                self.params.shape = shape;
            }
            ParameterEvent::RadiusInput(text) => {
                self.params.radius =
                    dimension_or_default(&text, HabitatParameters::DEFAULT_RADIUS, "radius");
                self.radius_text = text;
            }
            ParameterEvent::HeightLengthInput(text) => {
                self.params.height_length = dimension_or_default(
                    &text,
                    HabitatParameters::DEFAULT_HEIGHT_LENGTH,
                    "height_length",
                );
                self.height_length_text = text;
            }
            ParameterEvent::ZoomIn => {
                self.params.zoom = (self.params.zoom + ZOOM_STEP).min(ZOOM_MAX);
            }
            ParameterEvent::ZoomOut => {
                self.params.zoom = (self.params.zoom - ZOOM_STEP).max(ZOOM_MIN);
            }
            ParameterEvent::Reset | ParameterEvent::Generate => {
                self.params.zoom = HabitatParameters::DEFAULT_ZOOM;
                reset_view = true;
            }
        }

        StoreUpdate {
            changed: self.params != before,
            reset_view,
        }
    }
}

fn dimension_or_default(text: &str, default: f32, field: &'static str) -> f32 {
    try_parse_dimension(text).unwrap_or_else(|| {
        tracing::debug!(field, input = text, default, "Dimension input rejected, using default");
        default
    })
}

/// Format a dimension for its text field ("2", "2.5")
fn format_dimension(value: f32) -> String {
    format!("{}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_radius_input_fallbacks() {
        let mut store = ParameterStore::new();

        store.apply(ParameterEvent::RadiusInput("7".into()));
        assert_eq!(store.params().radius, 7.0);

        store.apply(ParameterEvent::RadiusInput("-5".into()));
        assert_eq!(store.params().radius, 2.0);
        assert_eq!(store.radius_text(), "-5");

        store.apply(ParameterEvent::RadiusInput("7".into()));
        store.apply(ParameterEvent::RadiusInput("abc".into()));
        assert_eq!(store.params().radius, 2.0);
    }

    #[test]
    fn test_height_length_fallback() {
        let mut store = ParameterStore::new();
        store.apply(ParameterEvent::HeightLengthInput("6.5".into()));
        assert_eq!(store.params().height_length, 6.5);

        store.apply(ParameterEvent::HeightLengthInput("".into()));
        assert_eq!(store.params().height_length, 3.0);
    }

    #[test]
    fn test_zoom_in_saturates_at_max() {
        let mut store = ParameterStore::new();
        for _ in 0..7 {
            store.apply(ParameterEvent::ZoomIn);
            assert!(store.params().zoom <= ZOOM_MAX);
        }
        assert!((store.params().zoom - 2.4).abs() < 1e-5);

        for _ in 0..8 {
            store.apply(ParameterEvent::ZoomIn);
            assert!(store.params().zoom <= ZOOM_MAX);
        }
        assert_eq!(store.params().zoom, ZOOM_MAX);
    }

    #[test]
    fn test_zoom_out_saturates_at_min() {
        let mut store = ParameterStore::new();
        for _ in 0..4 {
            store.apply(ParameterEvent::ZoomOut);
        }
        assert_eq!(store.params().zoom, ZOOM_MIN);

        let update = store.apply(ParameterEvent::ZoomOut);
        assert!(!update.changed);
        assert_eq!(store.params().zoom, ZOOM_MIN);
    }

    #[test]
    fn test_reset_restores_zoom() {
        let mut store = ParameterStore::new();
        store.apply(ParameterEvent::ZoomIn);
        store.apply(ParameterEvent::ZoomIn);
        store.apply(ParameterEvent::SelectShape(HabitatShape::Torus));

        let update = store.apply(ParameterEvent::Reset);
        assert!(update.changed);
        assert!(update.reset_view);
        assert_eq!(store.params().zoom, 1.0);
        // Reset only affects the view, not the design
        assert_eq!(store.params().shape, HabitatShape::Torus);

        let update = store.apply(ParameterEvent::Reset);
        assert!(!update.changed);
        assert_eq!(store.params().zoom, 1.0);
    }

    #[test]
    fn test_generate_resets_zoom() {
        let mut store = ParameterStore::new();
        for _ in 0..3 {
            store.apply(ParameterEvent::ZoomOut);
        }
        store.apply(ParameterEvent::Generate);
        assert_eq!(store.params().zoom, 1.0);
    }

    #[test]
    fn test_select_shape_reports_change() {
        let mut store = ParameterStore::new();
        assert!(store.apply(ParameterEvent::SelectShape(HabitatShape::Cylinder)).changed);
        assert!(!store.apply(ParameterEvent::SelectShape(HabitatShape::Cylinder)).changed);
    }
}
