//! Menu bar
//!
//! Page navigation, the View menu and the FPS readout.

use crate::settings::{AppPreferences, StartPage};
use crate::telemetry::{FrameProfiler, FrameStats};

use super::pages::PageId;

/// Menu actions that need to be handled by the app
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    /// Switch to another page
    Navigate(PageId),
    /// Leave the application
    Quit,
}

/// UI state for the menu bar
#[derive(Default)]
pub struct MenuBar {
    /// Pending menu action
    pending_menu_action: Option<MenuAction>,
}

impl MenuBar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render the menu bar
    ///
    /// Returns true if preferences were modified.
    pub fn render(
        &mut self,
        ctx: &egui::Context,
        preferences: &mut AppPreferences,
        current_page: PageId,
        profiler: &FrameProfiler,
    ) -> bool {
        let mut preferences_changed = false;

        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Quit").clicked() {
                        self.pending_menu_action = Some(MenuAction::Quit);
                        ui.close_menu();
                    }
                });

                ui.menu_button("View", |ui| {
                    if ui.checkbox(&mut preferences.show_fps, "Show FPS").changed() {
                        preferences_changed = true;
                    }

                    ui.separator();
                    ui.label(egui::RichText::new("Start Page").weak().small());
                    for page in [StartPage::Home, StartPage::Designer] {
                        if ui
                            .radio_value(&mut preferences.start_page, page, page.display_name())
                            .changed()
                        {
                            preferences_changed = true;
                        }
                    }
                });

                ui.separator();

                for page in [PageId::Home, PageId::Designer] {
                    if ui
                        .selectable_label(current_page == page, page.title())
                        .clicked()
                        && current_page != page
                    {
                        self.pending_menu_action = Some(MenuAction::Navigate(page));
                    }
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if preferences.show_fps {
                        ui.label(
                            egui::RichText::new(format!(
                                "{:.1} fps | {:.2}ms",
                                profiler.fps(),
                                profiler.last_frame_time_ms()
                            ))
                            .monospace()
                            .color(egui::Color32::from_rgb(120, 200, 120)),
                        )
                        .on_hover_text(frame_stats_summary(&profiler.stats()));
                    }
                });
            });
        });

        preferences_changed
    }

    /// Take pending menu action (consumes it)
    pub fn take_menu_action(&mut self) -> Option<MenuAction> {
        self.pending_menu_action.take()
    }
}

/// Hover text for the FPS readout
fn frame_stats_summary(stats: &FrameStats) -> String {
    if stats.sample_count == 0 {
        return "No frames timed yet".to_string();
    }
    format!(
        "avg {:.2}ms | p50 {:.2}ms | p95 {:.2}ms | p99 {:.2}ms\nmin {:.2}ms | max {:.2}ms ({} frames)",
        stats.avg_ms,
        stats.p50_ms,
        stats.p95_ms,
        stats.p99_ms,
        stats.min_ms,
        stats.max_ms,
        stats.sample_count
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_stats_summary() {
        assert_eq!(frame_stats_summary(&FrameStats::default()), "No frames timed yet");

        let stats = FrameStats {
            avg_ms: 16.0,
            min_ms: 15.5,
            max_ms: 33.25,
            p50_ms: 16.0,
            p95_ms: 17.5,
            p99_ms: 33.25,
            sample_count: 120,
        };
        let summary = frame_stats_summary(&stats);
        assert!(summary.starts_with("avg 16.00ms | p50 16.00ms | p95 17.50ms"));
        assert!(summary.ends_with("max 33.25ms (120 frames)"));
    }

    #[test]
    fn test_menu_action_taken_once() {
        let mut menu_bar = MenuBar::new();
        menu_bar.pending_menu_action = Some(MenuAction::Quit);
        assert_eq!(menu_bar.take_menu_action(), Some(MenuAction::Quit));
        assert_eq!(menu_bar.take_menu_action(), None);
    }
}
