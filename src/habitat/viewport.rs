//! Viewport shell
//!
//! A mounted habitat view: orbit camera, renderer, frame hooks and the egui
//! texture the rendered frame is shown through. Pages own their viewport
//! and must `unmount` it when they go away.

use super::animation::{FrameHook, FrameHooks, HabitatSpin};
use super::camera::OrbitCamera;
use super::renderer::HabitatRenderer;
use super::scene::SceneDescription;

/// Pointer-driven orbit settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitControlsConfig {
    pub enable_zoom: bool,
    pub enable_pan: bool,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Radians per logical pixel of drag
    pub rotate_speed: f32,
}

/// Fixed viewport variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewportProfile {
    /// Home page preview
    Showcase,
    /// Designer page main view
    Designer,
}

impl ViewportProfile {
    pub fn controls(&self) -> OrbitControlsConfig {
        let (min_distance, max_distance) = match self {
            ViewportProfile::Showcase => (5.0, 15.0),
            ViewportProfile::Designer => (3.0, 20.0),
        };
        OrbitControlsConfig {
            enable_zoom: true,
            enable_pan: false,
            min_distance,
            max_distance,
            rotate_speed: 0.01,
        }
    }

    /// Whether pointer zoom is reported to the owning page
    pub fn reports_zoom(&self) -> bool {
        matches!(self, ViewportProfile::Designer)
    }

    fn label(&self) -> &'static str {
        match self {
            ViewportProfile::Showcase => "showcase",
            ViewportProfile::Designer => "designer",
        }
    }
}

/// Outcome of one `show` call
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ViewportResponse {
    /// New orbit distance after a pointer zoom (designer only)
    pub zoom_changed: Option<f32>,
}

/// A mounted habitat viewport
pub struct HabitatViewport {
    profile: ViewportProfile,
    controls: OrbitControlsConfig,
    camera: OrbitCamera,
    renderer: HabitatRenderer,
    hooks: FrameHooks,
    /// Scene captured by the last `show`, drawn by the next `render`
    scene: Option<SceneDescription>,
    /// Composed camera distance last applied to the orbit camera
    applied_distance: Option<f32>,
    /// Target size in physical pixels
    pixel_size: (u32, u32),
    texture_id: Option<egui::TextureId>,
}

impl HabitatViewport {
    /// Create GPU resources and start the frame clock
    pub fn mount(device: &wgpu::Device, profile: ViewportProfile) -> Self {
        let controls = profile.controls();
        tracing::debug!(profile = profile.label(), "Mounting habitat viewport");

        let mut viewport = Self {
            profile,
            controls,
            camera: OrbitCamera::new(controls.min_distance, controls.max_distance),
            renderer: HabitatRenderer::new(device),
            hooks: FrameHooks::new(),
            scene: None,
            applied_distance: None,
            pixel_size: (0, 0),
            texture_id: None,
        };
        viewport.register_hook(Box::new(HabitatSpin::default()));
        viewport
    }

    /// Add a per-frame hook; hooks run in registration order
    pub fn register_hook(&mut self, hook: Box<dyn FrameHook>) {
        self.hooks.register(hook);
    }

    /// Return the camera to the front view at the composed distance
    pub fn reset_view(&mut self) {
        let distance = self
            .applied_distance
            .unwrap_or(super::scene::BASE_CAMERA_DISTANCE);
        self.camera.reset(distance);
    }

    /// Lay out the viewport, handle pointer input and draw the last frame
    pub fn show(&mut self, ui: &mut egui::Ui, scene: &SceneDescription, size: egui::Vec2) -> ViewportResponse {
        let mut response = ViewportResponse::default();

        self.apply_scene_camera(scene);

        let (rect, input) = ui.allocate_exact_size(size, egui::Sense::click_and_drag());

        // Pan is disabled, so only the primary button orbits
        if input.dragged_by(egui::PointerButton::Primary) {
            let delta = input.drag_delta();
            self.camera
                .on_mouse_drag((delta.x, delta.y), self.controls.rotate_speed);
        }

        if self.controls.enable_zoom && input.hovered() {
            let scroll = ui.input(|i| i.raw_scroll_delta.y);
            if scroll.abs() > 0.0 {
                // Keep an enclosing scroll area from scrolling too
                ui.input_mut(|i| i.smooth_scroll_delta = egui::Vec2::ZERO);
                let before = self.camera.distance();
                self.camera.on_scroll(scroll * 0.01);
                if self.profile.reports_zoom() && self.camera.distance() != before {
                    response.zoom_changed = Some(self.camera.distance());
                }
            }
        }

        if let Some(texture_id) = self.texture_id {
            crate::ui::draw_texture(ui, texture_id, rect);
        } else {
            crate::ui::draw_texture_placeholder(ui, rect, "Loading 3D view");
        }

        let ppp = ui.ctx().pixels_per_point();
        self.pixel_size = (
            (rect.width() * ppp).round() as u32,
            (rect.height() * ppp).round() as u32,
        );
        self.camera.set_aspect(rect.width() / rect.height().max(1.0));
        self.scene = Some(scene.clone());

        response
    }

    /// Re-apply the composed camera distance when it changes
    fn apply_scene_camera(&mut self, scene: &SceneDescription) {
        let distance = scene.camera.distance();
        if self.applied_distance != Some(distance) {
            self.camera.set_fov_degrees(scene.camera.fov_degrees);
            self.camera.set_target(scene.camera.target);
            self.camera.set_distance(distance);
            self.applied_distance = Some(distance);
        }
    }

    /// Tick the frame hooks and render the captured scene
    ///
    /// Must run after `show` and before egui paints the frame.
    pub fn render(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        egui_renderer: &mut egui_wgpu::Renderer,
    ) {
        let Some(scene) = &self.scene else {
            return;
        };
        let (width, height) = self.pixel_size;
        if width == 0 || height == 0 {
            return;
        }

        if self.renderer.ensure_render_target(device, width, height) {
            if let Some(view) = self.renderer.texture_view() {
                match self.texture_id {
                    Some(id) => egui_renderer.update_egui_texture_from_wgpu_texture(
                        device,
                        view,
                        wgpu::FilterMode::Linear,
                        id,
                    ),
                    None => {
                        self.texture_id = Some(crate::ui::register_egui_texture(egui_renderer, device, view));
                    }
                }
            }
        }

        let Some(clock) = self.hooks.tick() else {
            return;
        };

        self.renderer.render(
            encoder,
            device,
            queue,
            scene,
            &self.camera,
            self.hooks.transform(),
            clock.elapsed,
        );
    }

    /// Rebuild a pipeline after its shader source changed
    pub fn reload_shader(
        &mut self,
        device: &wgpu::Device,
        kind: crate::shaders::ShaderKind,
        source: &str,
    ) -> Result<(), crate::gpu_context::GpuError> {
        self.renderer.reload_shader(device, kind, source)
    }

    /// Release the egui texture and stop the frame hooks
    pub fn unmount(mut self, egui_renderer: &mut egui_wgpu::Renderer) {
        if let Some(id) = self.texture_id.take() {
            egui_renderer.free_texture(&id);
        }
        self.hooks.stop();
        tracing::debug!(
            profile = self.profile.label(),
            uptime_secs = self.hooks.uptime().as_secs_f32(),
            "Unmounted habitat viewport"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_distance_bounds() {
        let showcase = ViewportProfile::Showcase.controls();
        assert_eq!((showcase.min_distance, showcase.max_distance), (5.0, 15.0));

        let designer = ViewportProfile::Designer.controls();
        assert_eq!((designer.min_distance, designer.max_distance), (3.0, 20.0));
    }

    #[test]
    fn test_controls_zoom_without_pan() {
        for profile in [ViewportProfile::Showcase, ViewportProfile::Designer] {
            let controls = profile.controls();
            assert!(controls.enable_zoom);
            assert!(!controls.enable_pan);
        }
    }

    #[test]
    fn test_only_designer_reports_zoom() {
        assert!(ViewportProfile::Designer.reports_zoom());
        assert!(!ViewportProfile::Showcase.reports_zoom());
    }

    #[test]
    fn test_composed_distance_clamped_by_profile() {
        // Zoom 3.0 composes a distance of 8/3, below both minimums
        let controls = ViewportProfile::Designer.controls();
        let mut camera = OrbitCamera::new(controls.min_distance, controls.max_distance);
        camera.set_distance(8.0 / 3.0);
        assert_eq!(camera.distance(), 3.0);

        let controls = ViewportProfile::Showcase.controls();
        let mut camera = OrbitCamera::new(controls.min_distance, controls.max_distance);
        camera.set_distance(8.0 / 0.5);
        assert_eq!(camera.distance(), 15.0);
    }
}
