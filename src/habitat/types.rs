//! Habitat types and parameter bounds
//!
//! Defines the shape selection, the user-adjustable habitat parameters and
//! the colour representation shared by the scene composer and renderer.

/// Hull shape of the habitat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HabitatShape {
    /// Uniform sphere (planetary dome / orbital sphere)
    #[default]
    Dome,
    /// Capped cylinder whose length is user-adjustable
    Cylinder,
    /// Rotating ring
    Torus,
}

impl HabitatShape {
    /// Get display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            HabitatShape::Dome => "Dome",
            HabitatShape::Cylinder => "Cylinder",
            HabitatShape::Torus => "Torus",
        }
    }

    /// Get all shapes for iteration
    pub fn all() -> &'static [HabitatShape] {
        &[HabitatShape::Dome, HabitatShape::Cylinder, HabitatShape::Torus]
    }

    /// Hull tint used by the scene composer
    pub fn color(&self) -> HexColor {
        match self {
            HabitatShape::Dome => HexColor(0x4a9eff),
            HabitatShape::Torus => HexColor(0xa855f7),
            HabitatShape::Cylinder => HexColor(0x60a5fa),
        }
    }

    /// Whether the height/length parameter affects this shape
    pub fn uses_height_length(&self) -> bool {
        matches!(self, HabitatShape::Cylinder)
    }
}

impl std::fmt::Display for HabitatShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Inclusive range accepted for radius and height/length (metres)
pub const DIMENSION_MIN: f32 = 0.5;
pub const DIMENSION_MAX: f32 = 10.0;

/// Inclusive zoom range and button step
pub const ZOOM_MIN: f32 = 0.5;
pub const ZOOM_MAX: f32 = 3.0;
pub const ZOOM_STEP: f32 = 0.2;

/// User-chosen habitat parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HabitatParameters {
    /// Selected hull shape
    pub shape: HabitatShape,
    /// Primitive radius in metres
    pub radius: f32,
    /// Cylinder body length in metres (ignored by other shapes)
    pub height_length: f32,
    /// Zoom factor; the camera sits at `BASE_CAMERA_DISTANCE / zoom`
    pub zoom: f32,
}

impl HabitatParameters {
    /// Default radius, used when radius input cannot be accepted
    pub const DEFAULT_RADIUS: f32 = 2.0;
    /// Default height/length, used when that input cannot be accepted
    pub const DEFAULT_HEIGHT_LENGTH: f32 = 3.0;
    /// Zoom restored by reset
    pub const DEFAULT_ZOOM: f32 = 1.0;

    /// Parameters for the fixed showcase models on the home page
    ///
    /// These go through `compose_scene` like designer input, so the showcase
    /// cylinder's solar panels follow the general sizing (2r × 0.05 × 0.75r
    /// at z = ±(r + 1), i.e. 3 × 0.05 × 1.125 at ±2.5) rather than a fixed
    /// 4 × 0.05 × 1.5 pair at ±3.
    pub fn showcase(shape: HabitatShape) -> Self {
        let (radius, height_length) = match shape {
            HabitatShape::Dome | HabitatShape::Torus => (2.0, Self::DEFAULT_HEIGHT_LENGTH),
            HabitatShape::Cylinder => (1.5, 3.0),
        };
        Self {
            shape,
            radius,
            height_length,
            zoom: Self::DEFAULT_ZOOM,
        }
    }
}

impl Default for HabitatParameters {
    fn default() -> Self {
        Self {
            shape: HabitatShape::default(),
            radius: Self::DEFAULT_RADIUS,
            height_length: Self::DEFAULT_HEIGHT_LENGTH,
            zoom: Self::DEFAULT_ZOOM,
        }
    }
}

/// Parse a dimension field; `None` unless it is a finite number inside
/// `[DIMENSION_MIN, DIMENSION_MAX]`.
pub fn try_parse_dimension(input: &str) -> Option<f32> {
    input
        .trim()
        .parse::<f32>()
        .ok()
        .filter(|value| value.is_finite() && (DIMENSION_MIN..=DIMENSION_MAX).contains(value))
}

/// Parse a dimension field, substituting `default` for rejected input.
pub fn parse_dimension(input: &str, default: f32) -> f32 {
    try_parse_dimension(input).unwrap_or(default)
}

/// 24-bit sRGB colour written as `0xRRGGBB`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HexColor(pub u32);

impl HexColor {
    pub const WHITE: HexColor = HexColor(0xffffff);

    /// sRGB channels in 0..=255
    pub fn to_rgb8(self) -> [u8; 3] {
        [(self.0 >> 16) as u8, (self.0 >> 8) as u8, self.0 as u8]
    }

    /// sRGB channels in 0.0..=1.0
    pub fn to_srgb(self) -> [f32; 3] {
        self.to_rgb8().map(|c| c as f32 / 255.0)
    }

    /// Linear-light channels, as expected by an sRGB render target
    pub fn to_linear(self) -> [f32; 3] {
        self.to_srgb().map(srgb_to_linear)
    }

    /// Linear-light channels as a clear colour
    pub fn to_wgpu(self) -> wgpu::Color {
        let [r, g, b] = self.to_linear();
        wgpu::Color {
            r: r as f64,
            g: g as f64,
            b: b as f64,
            a: 1.0,
        }
    }

    /// Colour for egui painting
    pub fn to_egui(self) -> egui::Color32 {
        let [r, g, b] = self.to_rgb8();
        egui::Color32::from_rgb(r, g, b)
    }
}

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_parameters() {
        let params = HabitatParameters::default();
        assert_eq!(params.shape, HabitatShape::Dome);
        assert_eq!(params.radius, 2.0);
        assert_eq!(params.height_length, 3.0);
        assert_eq!(params.zoom, 1.0);
    }

    #[test]
    fn test_parse_dimension_fallbacks() {
        assert_eq!(parse_dimension("-5", 2.0), 2.0);
        assert_eq!(parse_dimension("abc", 2.0), 2.0);
        assert_eq!(parse_dimension("", 3.0), 3.0);
        assert_eq!(parse_dimension("NaN", 3.0), 3.0);
        assert_eq!(parse_dimension("inf", 3.0), 3.0);
        assert_eq!(parse_dimension("10.5", 3.0), 3.0);
    }

    #[test]
    fn test_parse_dimension_accepts_in_range() {
        assert_eq!(parse_dimension("7", 2.0), 7.0);
        assert_eq!(parse_dimension(" 0.5 ", 2.0), 0.5);
        assert_eq!(parse_dimension("10", 2.0), 10.0);
    }

    #[test]
    fn test_shape_colors() {
        assert_eq!(HabitatShape::Dome.color(), HexColor(0x4a9eff));
        assert_eq!(HabitatShape::Torus.color(), HexColor(0xa855f7));
        assert_eq!(HabitatShape::Cylinder.color(), HexColor(0x60a5fa));
    }

    #[test]
    fn test_hex_color_channels() {
        assert_eq!(HexColor(0x0a0f1e).to_rgb8(), [0x0a, 0x0f, 0x1e]);
        let [r, g, b] = HexColor::WHITE.to_linear();
        assert!((r - 1.0).abs() < 1e-6 && (g - 1.0).abs() < 1e-6 && (b - 1.0).abs() < 1e-6);
    }
}
