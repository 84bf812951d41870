//! Showcase model cards on the home page

use crate::habitat::HabitatShape;

use super::widgets::card_frame;

/// Card copy for one showcase model
pub struct ModelCard {
    pub shape: HabitatShape,
    pub name: &'static str,
    pub description: &'static str,
}

/// The three showcase models in display order
pub const MODEL_CARDS: [ModelCard; 3] = [
    ModelCard {
        shape: HabitatShape::Dome,
        name: "Spherical Habitat",
        description: "Compact design for orbital stations",
    },
    ModelCard {
        shape: HabitatShape::Torus,
        name: "Rotating Ring",
        description: "Creates artificial gravity through rotation",
    },
    ModelCard {
        shape: HabitatShape::Cylinder,
        name: "Cylindrical Module",
        description: "Modular design for scalable construction",
    },
];

/// Row of selectable model cards
pub struct ModelSelector;

impl ModelSelector {
    /// Draw the cards; returns the newly selected shape on click
    pub fn show(ui: &mut egui::Ui, selected: HabitatShape) -> Option<HabitatShape> {
        let mut picked = None;

        ui.columns(MODEL_CARDS.len(), |columns| {
            for (ui, card) in columns.iter_mut().zip(MODEL_CARDS.iter()) {
                let is_selected = card.shape == selected;
                let frame = card_frame(ui, is_selected).show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.label(egui::RichText::new(card.name).size(17.0).strong());
                    ui.label(egui::RichText::new(card.description).small().weak());
                    ui.add_space(8.0);

                    let text = if is_selected { "Viewing" } else { "View Model" };
                    let button = egui::Button::new(text).selected(is_selected);
                    ui.add_sized([ui.available_width(), 24.0], button).clicked()
                });

                let card_clicked = frame
                    .response
                    .interact(egui::Sense::click())
                    .on_hover_cursor(egui::CursorIcon::PointingHand)
                    .clicked();

                if (frame.inner || card_clicked) && !is_selected {
                    picked = Some(card.shape);
                }
            }
        });

        picked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cards_cover_every_shape_once() {
        for shape in HabitatShape::all() {
            assert_eq!(MODEL_CARDS.iter().filter(|c| c.shape == *shape).count(), 1);
        }
    }
}
