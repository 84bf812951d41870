//! Reusable UI widgets and texture helpers

use egui::Ui;
use egui_wgpu::Renderer as EguiRenderer;

use crate::habitat::HexColor;

/// Accent colour shared by headings and the selected card
pub const ACCENT: HexColor = HexColor(0x4a9eff);

// ============================================================================
// Texture Registration Helpers
// ============================================================================

/// Register a wgpu TextureView with egui.
///
/// Texture format (RGBA/BGRA) is determined by the TextureView.
pub fn register_egui_texture(
    egui_renderer: &mut EguiRenderer,
    device: &wgpu::Device,
    texture_view: &wgpu::TextureView,
) -> egui::TextureId {
    egui_renderer.register_native_texture(device, texture_view, wgpu::FilterMode::Linear)
}

// ============================================================================
// Texture Rendering Helpers
// ============================================================================

/// Full UV rect (0,0) to (1,1) for rendering entire texture.
pub const FULL_UV: egui::Rect = egui::Rect {
    min: egui::pos2(0.0, 0.0),
    max: egui::pos2(1.0, 1.0),
};

/// Draw a texture filling a rect with full UVs.
pub fn draw_texture(ui: &Ui, texture_id: egui::TextureId, rect: egui::Rect) {
    ui.painter().image(texture_id, rect, FULL_UV, egui::Color32::WHITE);
}

/// Draw a placeholder when texture is not available.
pub fn draw_texture_placeholder(ui: &Ui, rect: egui::Rect, message: &str) {
    ui.painter().rect_filled(rect, 4.0, egui::Color32::from_gray(30));
    ui.painter().text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        message,
        egui::FontId::default(),
        egui::Color32::GRAY,
    );
}

// ============================================================================
// Layout Helpers
// ============================================================================

/// Section heading in the sidebar
pub fn section_heading(ui: &mut Ui, text: &str) {
    ui.label(egui::RichText::new(text).heading().strong());
    ui.add_space(8.0);
}

/// Bordered card; `highlighted` uses the accent colour for the stroke
pub fn card_frame(ui: &Ui, highlighted: bool) -> egui::Frame {
    let stroke_color = if highlighted {
        ACCENT.to_egui()
    } else {
        ui.visuals().widgets.noninteractive.bg_stroke.color
    };
    egui::Frame::group(ui.style())
        .stroke(egui::Stroke::new(if highlighted { 2.0 } else { 1.0 }, stroke_color))
        .corner_radius(8.0)
        .inner_margin(egui::Margin::same(12))
}

/// "Label: value" row with the value right-aligned
pub fn info_row(ui: &mut Ui, label: &str, value: impl Into<egui::WidgetText>) {
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new(label).weak());
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(value);
        });
    });
}

/// Format a dimension for display ("2m", "2.5m")
pub fn format_metres(value: f32) -> String {
    format!("{}m", value)
}

/// Format a zoom factor with one decimal ("1.0x")
pub fn format_zoom(zoom: f32) -> String {
    format!("{:.1}x", zoom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_metres() {
        assert_eq!(format_metres(2.0), "2m");
        assert_eq!(format_metres(2.5), "2.5m");
    }

    #[test]
    fn test_format_zoom() {
        assert_eq!(format_zoom(1.0), "1.0x");
        assert_eq!(format_zoom(1.2 + 0.2), "1.4x");
        assert_eq!(format_zoom(3.0), "3.0x");
    }
}
