//! UI module for Habitat Designer
//!
//! egui menu bar, pages and shared widgets.

pub mod menu_bar;
pub mod model_selector;
pub mod pages;
pub mod widgets;

pub use menu_bar::{MenuAction, MenuBar};
pub use model_selector::ModelSelector;
pub use pages::{Page, PageAction, PageId};
pub use widgets::{draw_texture, draw_texture_placeholder, register_egui_texture, FULL_UV};
