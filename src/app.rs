//! Application state holding the wgpu graphics context
//!
//! Owns the GPU context, egui, the mounted page and the frame profiler.
//! Each frame runs egui first, then renders the page's habitat viewport into
//! its offscreen texture, then paints egui to the window surface.
//!
//! Frame pacing is driven by the winit event loop (see `main.rs`).

use std::sync::Arc;
use winit::dpi::PhysicalSize;
use winit::window::Window;

use crate::gpu_context::{GpuContext, GpuError, WindowGpuContext};
use crate::settings::AppPreferences;
use crate::shaders::ShaderWatcher;
use crate::telemetry::FrameProfiler;
use crate::ui::{MenuAction, MenuBar, Page, PageAction, PageId};

/// What the event loop should do after a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Continue,
    Exit,
}

/// Main application state
pub struct App {
    window: Arc<Window>,
    gpu: GpuContext,
    window_gpu: WindowGpuContext,
    egui_ctx: egui::Context,
    egui_state: egui_winit::State,
    menu_bar: MenuBar,
    preferences: AppPreferences,
    /// Always `Some` outside of page transitions
    page: Option<Page>,
    profiler: FrameProfiler,
    shader_watcher: Option<ShaderWatcher>,
}

impl App {
    /// Initialize the GPU, egui and the start page
    pub async fn new(window: Arc<Window>, preferences: AppPreferences) -> Result<Self, GpuError> {
        let size = window.inner_size();
        let (gpu, surface) = GpuContext::new(window.clone()).await?;
        let window_gpu = WindowGpuContext::new(&gpu, surface, size, preferences.vsync_enabled);

        let egui_ctx = egui::Context::default();
        egui_ctx.set_visuals(egui::Visuals::dark());

        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );

        let page = Page::mount(PageId::from(preferences.start_page), &gpu.device);

        let shader_watcher = if cfg!(debug_assertions) {
            ShaderWatcher::new()
                .map_err(|e| tracing::warn!("Shader hot-reload unavailable: {}", e))
                .ok()
        } else {
            None
        };

        Ok(Self {
            window,
            gpu,
            window_gpu,
            egui_ctx,
            egui_state,
            menu_bar: MenuBar::new(),
            preferences,
            page: Some(page),
            profiler: FrameProfiler::new(),
            shader_watcher,
        })
    }

    /// Handle window resize events
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        self.window_gpu.resize(&self.gpu, new_size);
        tracing::debug!("Resized to {}x{}", new_size.width, new_size.height);
    }

    /// Forward a window event to egui, redrawing when egui asks for it
    pub fn handle_window_event(&mut self, event: &winit::event::WindowEvent) {
        let response = self.egui_state.on_window_event(&self.window, event);
        if response.repaint {
            self.window.request_redraw();
        }
    }

    /// Swap the mounted page, unmounting the previous one first
    fn navigate(&mut self, target: PageId) {
        if let Some(current) = self.page.take() {
            if current.id() == target {
                self.page = Some(current);
                return;
            }
            current.unmount(&mut self.window_gpu.egui_renderer);
        }
        self.page = Some(Page::mount(target, &self.gpu.device));
    }

    /// Rebuild pipelines when a watched shader file changed
    fn poll_shader_changes(&mut self) {
        let Some(watcher) = self.shader_watcher.as_mut() else {
            return;
        };
        let changed = watcher.poll();
        let Some(page) = &mut self.page else {
            return;
        };
        for kind in changed {
            let source = kind.load();
            if let Err(e) = page.viewport_mut().reload_shader(&self.gpu.device, kind, &source) {
                tracing::error!("Keeping previous {} pipeline: {}", kind.file_name(), e);
            }
        }
    }

    /// Run one frame: UI, habitat viewport, egui paint, present
    pub fn render(&mut self) -> Result<FrameOutcome, wgpu::SurfaceError> {
        self.profiler.begin_frame();
        self.poll_shader_changes();

        let raw_input = self.egui_state.take_egui_input(&self.window);
        self.egui_ctx.begin_pass(raw_input);

        let current_page = self.page.as_ref().map(Page::id).unwrap_or(PageId::Home);

        if self
            .menu_bar
            .render(&self.egui_ctx, &mut self.preferences, current_page, &self.profiler)
        {
            if let Err(e) = self.preferences.save() {
                tracing::warn!("Failed to save preferences: {}", e);
            }
        }

        let page_actions = match &mut self.page {
            Some(page) => page.show(&self.egui_ctx),
            None => Vec::new(),
        };

        let full_output = self.egui_ctx.end_pass();
        self.egui_state
            .handle_platform_output(&self.window, full_output.platform_output);

        let paint_jobs = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        // Habitat view first; egui samples its texture below
        if let Some(page) = &mut self.page {
            page.viewport_mut().render(
                &self.gpu.device,
                &self.gpu.queue,
                &mut encoder,
                &mut self.window_gpu.egui_renderer,
            );
        }

        for (id, image_delta) in &full_output.textures_delta.set {
            self.window_gpu
                .egui_renderer
                .update_texture(&self.gpu.device, &self.gpu.queue, *id, image_delta);
        }

        let (width, height) = self.window_gpu.size();
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [width, height],
            pixels_per_point: full_output.pixels_per_point,
        };

        self.window_gpu.egui_renderer.update_buffers(
            &self.gpu.device,
            &self.gpu.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );

        let output = match self.window_gpu.surface.get_current_texture() {
            Ok(output) => output,
            Err(e) => {
                // Nothing is painted this frame, but egui already dropped these
                for id in &full_output.textures_delta.free {
                    self.window_gpu.egui_renderer.free_texture(id);
                }
                return Err(e);
            }
        };
        let surface_view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        {
            let render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("egui Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(crate::habitat::HexColor(0x0a0f1e).to_wgpu()),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            self.window_gpu.egui_renderer.render(
                &mut render_pass.forget_lifetime(),
                &paint_jobs,
                &screen_descriptor,
            );
        }

        for id in &full_output.textures_delta.free {
            self.window_gpu.egui_renderer.free_texture(id);
        }

        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        self.window.pre_present_notify();
        output.present();

        let mut outcome = FrameOutcome::Continue;
        if let Some(action) = self.menu_bar.take_menu_action() {
            match action {
                MenuAction::Navigate(page) => self.navigate(page),
                MenuAction::Quit => outcome = FrameOutcome::Exit,
            }
        }
        for action in page_actions {
            match action {
                PageAction::Navigate(page) => self.navigate(page),
            }
        }

        Ok(outcome)
    }

    /// Recover from a lost or outdated surface
    pub fn reconfigure_surface(&mut self) {
        self.window_gpu.reconfigure(&self.gpu);
    }

    /// Unmount the page and persist preferences
    pub fn shutdown(&mut self) {
        if let Some(page) = self.page.take() {
            page.unmount(&mut self.window_gpu.egui_renderer);
        }

        let size = self.window.inner_size();
        if size.width > 0 && size.height > 0 {
            self.preferences.window_width = size.width;
            self.preferences.window_height = size.height;
        }
        match self.preferences.save() {
            Ok(()) => tracing::info!("Preferences saved"),
            Err(e) => tracing::warn!("Failed to save preferences: {}", e),
        }
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn preferences(&self) -> &AppPreferences {
        &self.preferences
    }
}
