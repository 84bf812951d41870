//! Designer page
//!
//! Sidebar form driving the parameter store, and the designer viewport
//! showing the composed habitat.

use crate::habitat::{
    compose_scene, HabitatShape, HabitatViewport, ParameterEvent, ParameterStore, ViewportProfile,
};
use crate::ui::widgets::{card_frame, format_metres, format_zoom, info_row, section_heading};

use super::{PageAction, PageId};

const SIDEBAR_WIDTH: f32 = 256.0;

pub struct DesignerPage {
    store: ParameterStore,
    viewport: HabitatViewport,
    /// Orbit distance after the last pointer zoom, for display
    orbit_distance: Option<f32>,
}

impl DesignerPage {
    pub fn new(device: &wgpu::Device) -> Self {
        Self {
            store: ParameterStore::new(),
            viewport: HabitatViewport::mount(device, ViewportProfile::Designer),
            orbit_distance: None,
        }
    }

    pub fn show(&mut self, ctx: &egui::Context) -> Vec<PageAction> {
        let mut actions = Vec::new();
        let mut events = Vec::new();

        egui::TopBottomPanel::top("designer_header").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new("Space Habitat Layout Designer").size(22.0).strong());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Back to Home").clicked() {
                        actions.push(PageAction::Navigate(PageId::Home));
                    }
                });
            });
            ui.add_space(6.0);
        });

        egui::SidePanel::left("designer_inputs")
            .resizable(false)
            .exact_width(SIDEBAR_WIDTH)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    ui.add_space(12.0);
                    self.inputs_section(ui, &mut events);
                    ui.add_space(8.0);
                    ui.separator();
                    ui.add_space(8.0);
                    zoom_section(ui, &mut events);
                    ui.add_space(16.0);
                    self.settings_card(ui);
                });
            });

        for event in events {
            let update = self.store.apply(event);
            if update.reset_view {
                self.viewport.reset_view();
                self.orbit_distance = None;
            }
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            let scene = compose_scene(self.store.params());
            let caption_height = 28.0;
            let size = egui::vec2(
                ui.available_width(),
                (ui.available_height() - caption_height).max(150.0),
            );

            let response = self.viewport.show(ui, &scene, size);
            if let Some(distance) = response.zoom_changed {
                self.orbit_distance = Some(distance);
            }

            ui.vertical_centered(|ui| {
                ui.add_space(8.0);
                ui.label(
                    egui::RichText::new(
                        "Preview will update as you adjust the parameters. Click and drag to rotate, scroll to zoom.",
                    )
                    .small()
                    .weak(),
                );
            });
        });

        actions
    }

    fn inputs_section(&self, ui: &mut egui::Ui, events: &mut Vec<ParameterEvent>) {
        section_heading(ui, "Inputs");
        let params = self.store.params();

        ui.label("Shape");
        egui::ComboBox::from_id_salt("designer_shape")
            .selected_text(params.shape.display_name())
            .width(ui.available_width())
            .show_ui(ui, |ui| {
                for &shape in HabitatShape::all() {
                    if ui
                        .selectable_label(params.shape == shape, shape.display_name())
                        .clicked()
                    {
                        events.push(ParameterEvent::SelectShape(shape));
                    }
                }
            });
        ui.add_space(8.0);

        ui.label("Radius (m)");
        let mut radius_text = self.store.radius_text().to_owned();
        if ui.text_edit_singleline(&mut radius_text).changed() {
            events.push(ParameterEvent::RadiusInput(radius_text));
        }
        ui.add_space(8.0);

        ui.label("Height/Length (m)");
        let mut height_text = self.store.height_length_text().to_owned();
        let response = ui.text_edit_singleline(&mut height_text);
        if !params.shape.uses_height_length() {
            response.clone().on_hover_text("Only used by the cylinder");
        }
        if response.changed() {
            events.push(ParameterEvent::HeightLengthInput(height_text));
        }
        ui.add_space(12.0);

        if ui
            .add_sized([ui.available_width(), 28.0], egui::Button::new("Generate Habitat"))
            .clicked()
        {
            events.push(ParameterEvent::Generate);
        }
    }

    fn settings_card(&self, ui: &mut egui::Ui) {
        let params = self.store.params();
        card_frame(ui, false).show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(egui::RichText::new("Current Settings").strong());
            ui.add_space(4.0);
            info_row(ui, "Shape:", params.shape.display_name());
            info_row(ui, "Radius:", format_metres(params.radius));
            info_row(ui, "Height/Length:", format_metres(params.height_length));
            info_row(ui, "Zoom:", format_zoom(params.zoom));
            if let Some(distance) = self.orbit_distance {
                info_row(ui, "View distance:", format!("{:.1}m", distance));
            }
        });
    }

    pub fn viewport_mut(&mut self) -> &mut HabitatViewport {
        &mut self.viewport
    }

    pub fn unmount(self, egui_renderer: &mut egui_wgpu::Renderer) {
        self.viewport.unmount(egui_renderer);
    }
}

fn zoom_section(ui: &mut egui::Ui, events: &mut Vec<ParameterEvent>) {
    section_heading(ui, "Zoom Controls");

    ui.columns(2, |columns| {
        let width = columns[0].available_width();
        if columns[0].add_sized([width, 36.0], egui::Button::new("Zoom In")).clicked() {
            events.push(ParameterEvent::ZoomIn);
        }
        if columns[1].add_sized([width, 36.0], egui::Button::new("Zoom Out")).clicked() {
            events.push(ParameterEvent::ZoomOut);
        }
    });

    ui.add_space(4.0);
    if ui
        .add_sized([ui.available_width(), 24.0], egui::Button::new("Reset"))
        .clicked()
    {
        events.push(ParameterEvent::Reset);
    }
}
