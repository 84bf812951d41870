//! Home page: header, showcase model cards and the showcase viewport

use crate::habitat::{compose_scene, HabitatParameters, HabitatShape, HabitatViewport, ViewportProfile};
use crate::ui::model_selector::ModelSelector;
use crate::ui::widgets::ACCENT;

use super::{PageAction, PageId};

/// Height of the showcase viewport in logical pixels
const SHOWCASE_HEIGHT: f32 = 500.0;
const CONTENT_WIDTH: f32 = 900.0;

pub struct HomePage {
    selected: HabitatShape,
    viewport: HabitatViewport,
}

impl HomePage {
    pub fn new(device: &wgpu::Device) -> Self {
        Self {
            selected: HabitatShape::Dome,
            viewport: HabitatViewport::mount(device, ViewportProfile::Showcase),
        }
    }

    pub fn show(&mut self, ctx: &egui::Context) -> Vec<PageAction> {
        let mut actions = Vec::new();

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.set_max_width(CONTENT_WIDTH);
                    ui.add_space(24.0);

                    ui.label(egui::RichText::new("Space Habitats").size(40.0).strong().color(ACCENT.to_egui()));
                    ui.label(
                        egui::RichText::new("Homes in Space: Engineering the Future of Human Exploration")
                            .size(18.0)
                            .weak(),
                    );
                    ui.add_space(12.0);
                    if ui.button("Open the Designer").clicked() {
                        actions.push(PageAction::Navigate(PageId::Designer));
                    }

                    ui.add_space(32.0);
                    ui.label(egui::RichText::new("Interactive 3D Models").size(28.0).strong());
                    ui.label(
                        egui::RichText::new(
                            "Explore different space habitat geometries in 3D. Click and drag to rotate, scroll to zoom.",
                        )
                        .weak(),
                    );
                    ui.add_space(16.0);

                    if let Some(shape) = ModelSelector::show(ui, self.selected) {
                        tracing::debug!(shape = shape.display_name(), "Showcase model selected");
                        self.selected = shape;
                    }

                    ui.add_space(16.0);
                    let scene = compose_scene(&HabitatParameters::showcase(self.selected));
                    let size = egui::vec2(ui.available_width(), SHOWCASE_HEIGHT);
                    // Pointer zoom stays local to the showcase
                    let _ = self.viewport.show(ui, &scene, size);

                    ui.add_space(12.0);
                    ui.label(
                        egui::RichText::new(
                            "These models represent simplified concepts of actual space habitat designs \
                             being developed by space agencies worldwide.",
                        )
                        .small()
                        .weak(),
                    );
                    ui.add_space(24.0);
                });
            });
        });

        actions
    }

    pub fn viewport_mut(&mut self) -> &mut HabitatViewport {
        &mut self.viewport
    }

    pub fn unmount(self, egui_renderer: &mut egui_wgpu::Renderer) {
        self.viewport.unmount(egui_renderer);
    }
}
