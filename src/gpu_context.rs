//! GPU context for the habitat window
//!
//! `GpuContext` holds the device-level resources, `WindowGpuContext` the
//! surface and egui renderer of the main window.

use std::sync::Arc;
use winit::window::Window;

/// Failures while bringing up or driving the GPU
#[derive(Debug, thiserror::Error)]
pub enum GpuError {
    #[error("failed to create window surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("no compatible GPU adapter found")]
    NoAdapter,

    #[error("failed to create GPU device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("surface reports no supported formats")]
    NoSurfaceFormat,

    #[error("shader compilation failed: {0}")]
    ShaderCompile(String),
}

// ═══════════════════════════════════════════════════════════════════════════════
// GPU CONTEXT
// ═══════════════════════════════════════════════════════════════════════════════

/// Device-level GPU resources
pub struct GpuContext {
    pub instance: wgpu::Instance,
    pub adapter: wgpu::Adapter,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    /// Preferred surface format (sRGB when available)
    pub surface_format: wgpu::TextureFormat,
}

impl GpuContext {
    /// Pick an adapter compatible with `window` and open a device on it.
    ///
    /// Returns the context together with the surface created for adapter
    /// selection, so the caller can configure it without recreating it.
    pub async fn new(window: Arc<Window>) -> Result<(Self, wgpu::Surface<'static>), GpuError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(GpuError::NoAdapter)?;

        tracing::info!("Using GPU: {}", adapter.get_info().name);
        tracing::info!("Backend: {:?}", adapter.get_info().backend);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Habitat Designer Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default().using_resolution(adapter.limits()),
                    memory_hints: wgpu::MemoryHints::Performance,
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or(GpuError::NoSurfaceFormat)?;

        tracing::info!("Surface format: {:?}", surface_format);

        Ok((
            Self {
                instance,
                adapter,
                device,
                queue,
                surface_format,
            },
            surface,
        ))
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// WINDOW GPU CONTEXT
// ═══════════════════════════════════════════════════════════════════════════════

/// Surface and egui renderer of the main window
pub struct WindowGpuContext {
    pub surface: wgpu::Surface<'static>,
    pub config: wgpu::SurfaceConfiguration,
    pub egui_renderer: egui_wgpu::Renderer,
}

impl WindowGpuContext {
    /// Configure `surface` for the window's current size.
    ///
    /// With `vsync` the surface presents with Fifo; otherwise the fastest
    /// mode available is used and frame pacing is left to the event loop.
    pub fn new(
        gpu: &GpuContext,
        surface: wgpu::Surface<'static>,
        size: winit::dpi::PhysicalSize<u32>,
        vsync: bool,
    ) -> Self {
        let surface_caps = surface.get_capabilities(&gpu.adapter);
        let present_mode = select_present_mode(&surface_caps.present_modes, vsync);
        tracing::debug!(?present_mode, vsync, "Configuring surface");

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: gpu.surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 1,
        };

        surface.configure(&gpu.device, &config);

        let egui_renderer = egui_wgpu::Renderer::new(&gpu.device, gpu.surface_format, None, 1, false);

        Self {
            surface,
            config,
            egui_renderer,
        }
    }

    /// Resize the window surface; zero-sized requests are ignored.
    pub fn resize(&mut self, gpu: &GpuContext, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&gpu.device, &self.config);
        }
    }

    /// Reapply the current configuration after the surface was lost.
    pub fn reconfigure(&mut self, gpu: &GpuContext) {
        self.surface.configure(&gpu.device, &self.config);
    }

    /// Current surface size
    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }
}

fn select_present_mode(available: &[wgpu::PresentMode], vsync: bool) -> wgpu::PresentMode {
    if vsync {
        return wgpu::PresentMode::Fifo;
    }
    [wgpu::PresentMode::Immediate, wgpu::PresentMode::Mailbox]
        .into_iter()
        .find(|mode| available.contains(mode))
        .unwrap_or(wgpu::PresentMode::Fifo)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_present_mode_vsync() {
        let all = [wgpu::PresentMode::Immediate, wgpu::PresentMode::Fifo];
        assert_eq!(select_present_mode(&all, true), wgpu::PresentMode::Fifo);
        assert_eq!(select_present_mode(&all, false), wgpu::PresentMode::Immediate);
    }

    #[test]
    fn test_present_mode_fallback() {
        assert_eq!(
            select_present_mode(&[wgpu::PresentMode::Mailbox, wgpu::PresentMode::Fifo], false),
            wgpu::PresentMode::Mailbox
        );
        assert_eq!(select_present_mode(&[wgpu::PresentMode::Fifo], false), wgpu::PresentMode::Fifo);
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(GpuError::NoAdapter.to_string(), "no compatible GPU adapter found");
        assert!(GpuError::ShaderCompile("bad token".into()).to_string().contains("bad token"));
    }
}
