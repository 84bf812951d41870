//! Habitat Designer - Main Entry Point
//!
//! Creates the window and drives frames from the winit event loop.

use std::sync::Arc;
use std::time::Instant;

use habitat_designer::settings::AppPreferences;
use habitat_designer::telemetry::{init_logging, LogConfig};
use habitat_designer::{App, FrameOutcome};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{WindowAttributes, WindowId};

const WINDOW_TITLE: &str = "Habitat Designer";

struct HabitatDesignerApp {
    /// Taken when the window is created
    initial_preferences: Option<AppPreferences>,
    app: Option<App>,
    next_redraw_at: Instant,
}

impl HabitatDesignerApp {
    fn new(preferences: AppPreferences) -> Self {
        Self {
            initial_preferences: Some(preferences),
            app: None,
            next_redraw_at: Instant::now(),
        }
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(mut app) = self.app.take() {
            app.shutdown();
        }
        event_loop.exit();
    }
}

impl ApplicationHandler for HabitatDesignerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let Some(preferences) = self.initial_preferences.take() else {
            return;
        };

        tracing::info!("Creating window...");
        let window_attributes = WindowAttributes::default()
            .with_title(WINDOW_TITLE)
            .with_inner_size(PhysicalSize::new(
                preferences.window_width,
                preferences.window_height,
            ));

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                tracing::error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        tracing::info!(
            "Window created: {}x{}",
            window.inner_size().width,
            window.inner_size().height
        );

        match pollster::block_on(App::new(window.clone(), preferences)) {
            Ok(app) => {
                window.request_redraw();
                self.app = Some(app);
            }
            Err(e) => {
                tracing::error!("Failed to initialize graphics: {}", e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        let Some(app) = self.app.as_mut() else {
            return;
        };

        app.handle_window_event(&event);

        match event {
            WindowEvent::CloseRequested => {
                tracing::info!("Close requested, shutting down...");
                self.shutdown(event_loop);
            }

            WindowEvent::Resized(physical_size) => {
                app.resize(physical_size);
            }

            WindowEvent::RedrawRequested => match app.render() {
                Ok(FrameOutcome::Continue) => {}
                Ok(FrameOutcome::Exit) => {
                    tracing::info!("Quit requested, shutting down...");
                    self.shutdown(event_loop);
                }
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    tracing::warn!("Surface lost, reconfiguring...");
                    app.reconfigure_surface();
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    tracing::error!("Out of GPU memory!");
                    self.shutdown(event_loop);
                }
                Err(e) => {
                    tracing::warn!("Surface error: {:?}", e);
                }
            },

            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(app) = self.app.as_ref() else {
            event_loop.set_control_flow(ControlFlow::Wait);
            return;
        };

        // Fifo present mode paces frames
        if app.preferences().vsync_enabled {
            app.window().request_redraw();
            event_loop.set_control_flow(ControlFlow::Poll);
            return;
        }

        let frame_duration = app.preferences().frame_interval();
        let now = Instant::now();
        if now < self.next_redraw_at {
            event_loop.set_control_flow(ControlFlow::WaitUntil(self.next_redraw_at));
            return;
        }

        app.window().request_redraw();
        self.next_redraw_at += frame_duration;

        // Reset if more than 2 frames behind
        if now > self.next_redraw_at + frame_duration * 2 {
            self.next_redraw_at = now + frame_duration;
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.next_redraw_at));
    }
}

fn main() {
    // Keep the guard alive for the program duration
    let _log_guard = match init_logging(&LogConfig::from_env()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            None
        }
    };

    tracing::info!("Habitat Designer v{}", env!("CARGO_PKG_VERSION"));

    let preferences = AppPreferences::load();
    tracing::info!(
        "Target FPS: {} (vsync {})",
        preferences.target_fps,
        if preferences.vsync_enabled { "on" } else { "off" }
    );

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            tracing::error!("Failed to create event loop: {}", e);
            std::process::exit(1);
        }
    };
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = HabitatDesignerApp::new(preferences);
    if let Err(e) = event_loop.run_app(&mut app) {
        tracing::error!("Event loop error: {}", e);
        std::process::exit(1);
    }
}
