//! Habitat renderer
//!
//! Draws a `SceneDescription` into an offscreen colour target that the
//! viewport hands to egui as a native texture.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use wgpu::util::DeviceExt;

use crate::gpu_context::GpuError;
use crate::shaders::{ShaderKind, HABITAT_SHADER, STARS_SHADER};

use super::animation::MeshTransform;
use super::camera::OrbitCamera;
use super::mesh::{generate_starfield, HabitatMesh, HabitatVertex, StarInstance};
use super::scene::{Geometry, Light, MeshDescriptor, MeshRole, SceneDescription, Starfield};

/// Point lights the lit shader evaluates
pub const MAX_POINT_LIGHTS: usize = 4;

/// Colour format of the offscreen target
pub const RENDER_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Bgra8UnormSrgb;
const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

#[repr(C)]
#[derive(Copy, Clone, Default, Pod, Zeroable)]
struct PointLightUniform {
    /// xyz = position, w = intensity
    position: [f32; 4],
    color: [f32; 4],
}

/// Per-frame uniforms shared by both pipelines
#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct FrameUniforms {
    view_proj: [[f32; 4]; 4],
    /// xyz = eye, w = seconds since mount
    camera_pos: [f32; 4],
    /// xy = target size, z = twinkle speed, w = fade flag
    viewport: [f32; 4],
    ambient: [f32; 4],
    /// rgb = sky, w = environment strength
    sky: [f32; 4],
    ground: [f32; 4],
    lights: [PointLightUniform; MAX_POINT_LIGHTS],
    light_count: [u32; 4],
}

/// Per-mesh uniforms
#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct MeshUniforms {
    model: [[f32; 4]; 4],
    color: [f32; 4],
    emissive: [f32; 4],
    /// metalness, roughness, distort, distort speed
    material: [f32; 4],
}

/// Hash key for mesh regeneration detection
fn hash_geometry(geometry: &Geometry) -> u64 {
    let mut hasher = DefaultHasher::new();
    std::mem::discriminant(geometry).hash(&mut hasher);
    match *geometry {
        Geometry::Sphere { radius } => radius.to_bits().hash(&mut hasher),
        Geometry::Torus { radius, tube_radius } => {
            radius.to_bits().hash(&mut hasher);
            tube_radius.to_bits().hash(&mut hasher);
        }
        Geometry::Cylinder {
            radius_top,
            radius_bottom,
            height,
        } => {
            radius_top.to_bits().hash(&mut hasher);
            radius_bottom.to_bits().hash(&mut hasher);
            height.to_bits().hash(&mut hasher);
        }
        Geometry::Cuboid { size } => {
            for c in size.to_array() {
                c.to_bits().hash(&mut hasher);
            }
        }
    }
    hasher.finish()
}

fn hash_starfield(starfield: &Starfield) -> u64 {
    let mut hasher = DefaultHasher::new();
    starfield.radius.to_bits().hash(&mut hasher);
    starfield.depth.to_bits().hash(&mut hasher);
    starfield.count.hash(&mut hasher);
    starfield.factor.to_bits().hash(&mut hasher);
    starfield.saturation.to_bits().hash(&mut hasher);
    hasher.finish()
}

/// Pack scene lights into shader uniforms
///
/// Ambient lights are summed; point lights beyond `MAX_POINT_LIGHTS` are
/// dropped with a warning.
fn pack_lights(lights: &[Light]) -> ([f32; 4], [PointLightUniform; MAX_POINT_LIGHTS], u32) {
    let mut ambient = [0.0_f32; 4];
    let mut points = [PointLightUniform::default(); MAX_POINT_LIGHTS];
    let mut count = 0usize;

    for light in lights {
        match *light {
            Light::Ambient { color, intensity } => {
                for (sum, c) in ambient.iter_mut().zip(color.to_linear()) {
                    *sum += c * intensity;
                }
            }
            Light::Point {
                position,
                color,
                intensity,
            } => {
                if count == MAX_POINT_LIGHTS {
                    log::warn!("Scene has more than {} point lights, extra lights ignored", MAX_POINT_LIGHTS);
                    continue;
                }
                let [r, g, b] = color.to_linear();
                points[count] = PointLightUniform {
                    position: [position.x, position.y, position.z, intensity],
                    color: [r, g, b, 1.0],
                };
                count += 1;
            }
        }
    }

    (ambient, points, count as u32)
}

fn mesh_uniforms(descriptor: &MeshDescriptor, transform: &MeshTransform) -> MeshUniforms {
    let model = match descriptor.role {
        MeshRole::Hull => transform.model_matrix(descriptor.position),
        MeshRole::SolarPanel => Mat4::from_translation(descriptor.position),
    };
    let material = &descriptor.material;
    let [r, g, b] = material.color.to_linear();
    let emissive = material.emissive.to_linear().map(|c| c * material.emissive_intensity);

    MeshUniforms {
        model: model.to_cols_array_2d(),
        color: [r, g, b, 1.0],
        emissive: [emissive[0], emissive[1], emissive[2], 0.0],
        material: [
            material.metalness,
            material.roughness,
            material.distort,
            material.distort_speed,
        ],
    }
}

/// Mesh uploaded to the GPU together with its uniform slot
struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    geometry_hash: u64,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

/// GPU renderer for the habitat scene
pub struct HabitatRenderer {
    // Render pipelines
    lit_pipeline: wgpu::RenderPipeline,
    star_pipeline: wgpu::RenderPipeline,
    frame_layout: wgpu::BindGroupLayout,
    mesh_layout: wgpu::BindGroupLayout,

    // Frame uniforms
    frame_buffer: wgpu::Buffer,
    frame_bind_group: wgpu::BindGroup,

    // Meshes in scene order (hull first)
    meshes: Vec<GpuMesh>,

    // Starfield instances
    star_buffer: Option<wgpu::Buffer>,
    star_count: u32,
    star_hash: u64,

    // Render target (viewport's own texture)
    render_texture: Option<wgpu::Texture>,
    render_view: Option<wgpu::TextureView>,
    depth_view: Option<wgpu::TextureView>,
    render_width: u32,
    render_height: u32,
}

impl HabitatRenderer {
    /// Create a new habitat renderer
    pub fn new(device: &wgpu::Device) -> Self {
        let uniform_entry = |visibility| wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        };

        let frame_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Habitat Frame Bind Group Layout"),
            entries: &[uniform_entry(wgpu::ShaderStages::VERTEX_FRAGMENT)],
        });

        let mesh_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Habitat Mesh Bind Group Layout"),
            entries: &[uniform_entry(wgpu::ShaderStages::VERTEX_FRAGMENT)],
        });

        let lit_pipeline = create_lit_pipeline(device, &frame_layout, &mesh_layout, HABITAT_SHADER);
        let star_pipeline = create_star_pipeline(device, &frame_layout, STARS_SHADER);

        let frame_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Habitat Frame Buffer"),
            size: std::mem::size_of::<FrameUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let frame_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Habitat Frame Bind Group"),
            layout: &frame_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: frame_buffer.as_entire_binding(),
            }],
        });

        Self {
            lit_pipeline,
            star_pipeline,
            frame_layout,
            mesh_layout,
            frame_buffer,
            frame_bind_group,
            meshes: Vec::new(),
            star_buffer: None,
            star_count: 0,
            star_hash: 0,
            render_texture: None,
            render_view: None,
            depth_view: None,
            render_width: 0,
            render_height: 0,
        }
    }

    /// Rebuild one pipeline from new WGSL source.
    ///
    /// Validation errors are captured in an error scope; on failure the
    /// previous pipeline stays in use.
    pub fn reload_shader(
        &mut self,
        device: &wgpu::Device,
        kind: ShaderKind,
        source: &str,
    ) -> Result<(), GpuError> {
        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let pipeline = match kind {
            ShaderKind::Habitat => {
                create_lit_pipeline(device, &self.frame_layout, &self.mesh_layout, source)
            }
            ShaderKind::Stars => create_star_pipeline(device, &self.frame_layout, source),
        };
        if let Some(error) = pollster::block_on(device.pop_error_scope()) {
            return Err(GpuError::ShaderCompile(error.to_string()));
        }

        match kind {
            ShaderKind::Habitat => self.lit_pipeline = pipeline,
            ShaderKind::Stars => self.star_pipeline = pipeline,
        }
        tracing::info!("Reloaded {}", kind.file_name());
        Ok(())
    }

    /// Upload meshes whose geometry changed and drop slots no longer used
    fn update_meshes(&mut self, device: &wgpu::Device, scene: &SceneDescription) {
        let mut count = 0;
        for (index, descriptor) in scene.meshes().enumerate() {
            count += 1;
            let geometry_hash = hash_geometry(&descriptor.geometry);

            if let Some(slot) = self.meshes.get(index) {
                if slot.geometry_hash == geometry_hash {
                    continue;
                }
            }

            let mesh = HabitatMesh::from_geometry(&descriptor.geometry);
            log::debug!(
                "Uploading {} mesh ({} vertices, {} indices)",
                descriptor.geometry.kind_name(),
                mesh.vertex_count(),
                mesh.index_count()
            );
            let gpu_mesh = self.upload_mesh(device, &mesh, geometry_hash);

            if index < self.meshes.len() {
                self.meshes[index] = gpu_mesh;
            } else {
                self.meshes.push(gpu_mesh);
            }
        }
        self.meshes.truncate(count);
    }

    fn upload_mesh(&self, device: &wgpu::Device, mesh: &HabitatMesh, geometry_hash: u64) -> GpuMesh {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Habitat Vertex Buffer"),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Habitat Index Buffer"),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Habitat Mesh Uniforms"),
            size: std::mem::size_of::<MeshUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Habitat Mesh Bind Group"),
            layout: &self.mesh_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        GpuMesh {
            vertex_buffer,
            index_buffer,
            index_count: mesh.indices.len() as u32,
            geometry_hash,
            uniform_buffer,
            bind_group,
        }
    }

    fn update_starfield(&mut self, device: &wgpu::Device, starfield: &Starfield) {
        let star_hash = hash_starfield(starfield);
        if self.star_buffer.is_some() && self.star_hash == star_hash {
            return;
        }

        let stars = generate_starfield(starfield);
        self.star_buffer = if stars.is_empty() {
            None
        } else {
            Some(device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Habitat Star Buffer"),
                contents: bytemuck::cast_slice(&stars),
                usage: wgpu::BufferUsages::VERTEX,
            }))
        };
        self.star_count = stars.len() as u32;
        self.star_hash = star_hash;
    }

    /// Ensure render target exists with correct size
    pub fn ensure_render_target(&mut self, device: &wgpu::Device, width: u32, height: u32) -> bool {
        let width = width.max(1);
        let height = height.max(1);

        if self.render_width == width && self.render_height == height {
            return false;
        }

        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };

        let render_texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Habitat Render Texture"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: RENDER_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });

        let depth_texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Habitat Depth Texture"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });

        self.render_view = Some(render_texture.create_view(&Default::default()));
        self.depth_view = Some(depth_texture.create_view(&Default::default()));
        self.render_texture = Some(render_texture);
        self.render_width = width;
        self.render_height = height;
        true
    }

    /// Render the scene to the internal texture
    #[allow(clippy::too_many_arguments)]
    pub fn render(
        &mut self,
        encoder: &mut wgpu::CommandEncoder,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        scene: &SceneDescription,
        camera: &OrbitCamera,
        transform: &MeshTransform,
        elapsed: f32,
    ) {
        self.update_meshes(device, scene);
        self.update_starfield(device, &scene.backdrop.starfield);

        // Frame uniforms
        let (ambient, lights, light_count) = pack_lights(&scene.lights);
        let (sky, ground, strength) = scene.backdrop.environment.hemisphere();
        let [sr, sg, sb] = sky.to_linear();
        let [gr, gg, gb] = ground.to_linear();
        let eye: Vec3 = camera.eye_position();
        let starfield = &scene.backdrop.starfield;

        let uniforms = FrameUniforms {
            view_proj: camera.view_projection_matrix().to_cols_array_2d(),
            camera_pos: [eye.x, eye.y, eye.z, elapsed],
            viewport: [
                self.render_width as f32,
                self.render_height as f32,
                starfield.speed,
                if starfield.fade { 1.0 } else { 0.0 },
            ],
            ambient,
            sky: [sr, sg, sb, strength],
            ground: [gr, gg, gb, 0.0],
            lights,
            light_count: [light_count, 0, 0, 0],
        };
        queue.write_buffer(&self.frame_buffer, 0, bytemuck::bytes_of(&uniforms));

        for (slot, descriptor) in self.meshes.iter().zip(scene.meshes()) {
            let mesh = mesh_uniforms(descriptor, transform);
            queue.write_buffer(&slot.uniform_buffer, 0, bytemuck::bytes_of(&mesh));
        }

        let (Some(render_view), Some(depth_view)) = (&self.render_view, &self.depth_view) else {
            return;
        };

        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Habitat Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: render_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(scene.backdrop.background.to_wgpu()),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Discard,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        render_pass.set_bind_group(0, &self.frame_bind_group, &[]);

        render_pass.set_pipeline(&self.lit_pipeline);
        for mesh in &self.meshes {
            render_pass.set_bind_group(1, &mesh.bind_group, &[]);
            render_pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
            render_pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            render_pass.draw_indexed(0..mesh.index_count, 0, 0..1);
        }

        // Stars last so the hull occludes them
        if let Some(stars) = &self.star_buffer {
            render_pass.set_pipeline(&self.star_pipeline);
            render_pass.set_vertex_buffer(0, stars.slice(..));
            render_pass.draw(0..6, 0..self.star_count);
        }
    }

    /// Get rendered texture view for egui display
    pub fn texture_view(&self) -> Option<&wgpu::TextureView> {
        self.render_view.as_ref()
    }
}

fn create_lit_pipeline(
    device: &wgpu::Device,
    frame_layout: &wgpu::BindGroupLayout,
    mesh_layout: &wgpu::BindGroupLayout,
    source: &str,
) -> wgpu::RenderPipeline {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("Habitat Shader"),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    });

    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Habitat Pipeline Layout"),
        bind_group_layouts: &[frame_layout, mesh_layout],
        push_constant_ranges: &[],
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("Habitat Pipeline"),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[HabitatVertex::buffer_layout()],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: RENDER_FORMAT,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            // Thin panels are visible from both sides
            cull_mode: None,
            unclipped_depth: false,
            polygon_mode: wgpu::PolygonMode::Fill,
            conservative: false,
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}

fn create_star_pipeline(
    device: &wgpu::Device,
    frame_layout: &wgpu::BindGroupLayout,
    source: &str,
) -> wgpu::RenderPipeline {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("Starfield Shader"),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    });

    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Starfield Pipeline Layout"),
        bind_group_layouts: &[frame_layout],
        push_constant_ranges: &[],
    });

    let additive = wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::One,
        dst_factor: wgpu::BlendFactor::One,
        operation: wgpu::BlendOperation::Add,
    };

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("Starfield Pipeline"),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[StarInstance::buffer_layout()],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: RENDER_FORMAT,
                blend: Some(wgpu::BlendState {
                    color: additive,
                    alpha: additive,
                }),
                write_mask: wgpu::ColorWrites::COLOR,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            cull_mode: None,
            ..Default::default()
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: false,
            depth_compare: wgpu::CompareFunction::LessEqual,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::habitat::scene::compose_scene;
    use crate::habitat::types::{HabitatParameters, HabitatShape, HexColor};

    #[test]
    fn test_uniform_sizes_are_16_byte_aligned() {
        assert_eq!(std::mem::size_of::<FrameUniforms>() % 16, 0);
        assert_eq!(std::mem::size_of::<MeshUniforms>() % 16, 0);
        assert_eq!(std::mem::size_of::<FrameUniforms>(), 288);
    }

    #[test]
    fn test_geometry_hash_tracks_dimensions() {
        let a = Geometry::Sphere { radius: 2.0 };
        let b = Geometry::Sphere { radius: 2.5 };
        assert_eq!(hash_geometry(&a), hash_geometry(&a));
        assert_ne!(hash_geometry(&a), hash_geometry(&b));
        assert_ne!(
            hash_geometry(&Geometry::Torus { radius: 2.0, tube_radius: 0.6 }),
            hash_geometry(&Geometry::Torus { radius: 2.0, tube_radius: 0.7 })
        );
    }

    #[test]
    fn test_pack_lights_for_composed_scene() {
        let scene = compose_scene(&HabitatParameters::showcase(HabitatShape::Torus));
        let (ambient, points, count) = pack_lights(&scene.lights);

        assert!((ambient[0] - 0.3).abs() < 1e-6);
        // Key, fill and hull glow
        assert_eq!(count, 3);
        assert_eq!(points[0].position, [10.0, 10.0, 10.0, 1.0]);
        assert_eq!(points[2].position, [0.0, 0.0, 0.0, 1.0]);
        let [r, g, b] = HabitatShape::Torus.color().to_linear();
        assert_eq!(points[2].color, [r, g, b, 1.0]);
    }

    #[test]
    fn test_pack_lights_caps_point_lights() {
        let light = Light::Point {
            position: Vec3::ONE,
            color: HexColor::WHITE,
            intensity: 1.0,
        };
        let lights = vec![light; MAX_POINT_LIGHTS + 2];
        let (_, _, count) = pack_lights(&lights);
        assert_eq!(count as usize, MAX_POINT_LIGHTS);
    }

    #[test]
    fn test_only_hull_is_animated() {
        let scene = compose_scene(&HabitatParameters::default());
        let transform = MeshTransform { yaw: 1.0, pitch: 0.1 };

        let hull = mesh_uniforms(&scene.primary, &transform);
        assert_ne!(hull.model, Mat4::IDENTITY.to_cols_array_2d());

        let panel = mesh_uniforms(&scene.panels[0], &transform);
        assert_eq!(panel.model, Mat4::from_translation(scene.panels[0].position).to_cols_array_2d());
    }

    #[test]
    fn test_emissive_scaled_by_intensity() {
        let scene = compose_scene(&HabitatParameters::showcase(HabitatShape::Cylinder));
        let uniforms = mesh_uniforms(&scene.primary, &MeshTransform::default());
        let base = HabitatShape::Cylinder.color().to_linear();
        assert!((uniforms.emissive[2] - base[2] * 0.2).abs() < 1e-6);
        assert_eq!(uniforms.material, [0.8, 0.2, 0.0, 0.0]);
    }
}
