//! Mesh generation for habitat primitives
//!
//! Tessellates the scene's `Geometry` descriptors into vertex and index data,
//! and scatters the starfield instances.

use bytemuck::{Pod, Zeroable};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::{PI, TAU};

use super::scene::{Geometry, Starfield};

/// Sphere tessellation (width and height segments)
pub const SPHERE_SEGMENTS: u32 = 64;
/// Torus tessellation around the tube
pub const TORUS_RADIAL_SEGMENTS: u32 = 32;
/// Torus tessellation around the ring
pub const TORUS_TUBULAR_SEGMENTS: u32 = 100;
/// Cylinder tessellation around the axis
pub const CYLINDER_RADIAL_SEGMENTS: u32 = 32;

/// Vertex for lit habitat meshes
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct HabitatVertex {
    /// Position in object space
    pub position: [f32; 3],
    /// Unit normal
    pub normal: [f32; 3],
}

impl HabitatVertex {
    /// Size of vertex in bytes
    pub const SIZE: u64 = std::mem::size_of::<Self>() as u64;

    /// Vertex buffer layout for wgpu
    pub fn buffer_layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: Self::SIZE,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                // position
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                // normal
                wgpu::VertexAttribute {
                    offset: 12,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
            ],
        }
    }

    fn new(position: [f32; 3], normal: [f32; 3]) -> Self {
        Self { position, normal }
    }
}

/// Generated mesh data
pub struct HabitatMesh {
    pub vertices: Vec<HabitatVertex>,
    pub indices: Vec<u32>,
}

impl HabitatMesh {
    /// Tessellate a scene geometry at the default detail levels
    pub fn from_geometry(geometry: &Geometry) -> Self {
        match *geometry {
            Geometry::Sphere { radius } => Self::sphere(radius, SPHERE_SEGMENTS, SPHERE_SEGMENTS),
            Geometry::Torus { radius, tube_radius } => Self::torus(
                radius,
                tube_radius,
                TORUS_RADIAL_SEGMENTS,
                TORUS_TUBULAR_SEGMENTS,
            ),
            Geometry::Cylinder {
                radius_top,
                radius_bottom,
                height,
            } => Self::cylinder(radius_top, radius_bottom, height, CYLINDER_RADIAL_SEGMENTS),
            Geometry::Cuboid { size } => Self::cuboid(size.into()),
        }
    }

    /// Generate a UV sphere centred at the origin
    ///
    /// The pole rows produce one triangle per quad instead of two.
    pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> Self {
        let width_segments = width_segments.max(3);
        let height_segments = height_segments.max(2);
        let mut vertices = Vec::with_capacity(((width_segments + 1) * (height_segments + 1)) as usize);
        let mut indices = Vec::new();

        for iy in 0..=height_segments {
            let v = iy as f32 / height_segments as f32;
            let theta = v * PI;

            for ix in 0..=width_segments {
                let u = ix as f32 / width_segments as f32;
                let phi = u * TAU;

                let nx = -phi.cos() * theta.sin();
                let ny = theta.cos();
                let nz = phi.sin() * theta.sin();

                vertices.push(HabitatVertex::new(
                    [nx * radius, ny * radius, nz * radius],
                    [nx, ny, nz],
                ));
            }
        }

        let row = width_segments + 1;
        for iy in 0..height_segments {
            for ix in 0..width_segments {
                let a = iy * row + ix + 1;
                let b = iy * row + ix;
                let c = (iy + 1) * row + ix;
                let d = (iy + 1) * row + ix + 1;

                if iy != 0 {
                    indices.extend_from_slice(&[a, b, d]);
                }
                if iy != height_segments - 1 {
                    indices.extend_from_slice(&[b, c, d]);
                }
            }
        }

        Self { vertices, indices }
    }

    /// Generate a torus in the XY plane
    ///
    /// `radius` is the distance from the centre to the middle of the tube.
    pub fn torus(radius: f32, tube_radius: f32, radial_segments: u32, tubular_segments: u32) -> Self {
        let radial_segments = radial_segments.max(3);
        let tubular_segments = tubular_segments.max(3);
        let mut vertices = Vec::with_capacity(((radial_segments + 1) * (tubular_segments + 1)) as usize);
        let mut indices = Vec::with_capacity((radial_segments * tubular_segments * 6) as usize);

        for j in 0..=radial_segments {
            let v = j as f32 / radial_segments as f32 * TAU;

            for i in 0..=tubular_segments {
                let u = i as f32 / tubular_segments as f32 * TAU;

                let ring = radius + tube_radius * v.cos();
                let position = [ring * u.cos(), ring * u.sin(), tube_radius * v.sin()];
                let normal = [v.cos() * u.cos(), v.cos() * u.sin(), v.sin()];

                vertices.push(HabitatVertex::new(position, normal));
            }
        }

        let row = tubular_segments + 1;
        for j in 1..=radial_segments {
            for i in 1..=tubular_segments {
                let a = row * j + i - 1;
                let b = row * (j - 1) + i - 1;
                let c = row * (j - 1) + i;
                let d = row * j + i;

                indices.extend_from_slice(&[a, b, d]);
                indices.extend_from_slice(&[b, c, d]);
            }
        }

        Self { vertices, indices }
    }

    /// Generate a capped cylinder along the Y axis, centred at the origin
    pub fn cylinder(radius_top: f32, radius_bottom: f32, height: f32, radial_segments: u32) -> Self {
        let radial_segments = radial_segments.max(3);
        let half_height = height / 2.0;
        let mut vertices = Vec::new();
        let mut indices = Vec::new();

        // Side normals tilt when the radii differ
        let slope = (radius_bottom - radius_top) / height.max(f32::EPSILON);

        // Torso: row 0 at the top, row 1 at the bottom
        for (y, r) in [(half_height, radius_top), (-half_height, radius_bottom)] {
            for x in 0..=radial_segments {
                let theta = x as f32 / radial_segments as f32 * TAU;
                let (sin, cos) = theta.sin_cos();
                let n = glam::Vec3::new(sin, slope, cos).normalize();
                vertices.push(HabitatVertex::new([r * sin, y, r * cos], n.into()));
            }
        }

        let row = radial_segments + 1;
        for x in 0..radial_segments {
            let a = x;
            let b = row + x;
            let c = row + x + 1;
            let d = x + 1;

            indices.extend_from_slice(&[a, b, d]);
            indices.extend_from_slice(&[b, c, d]);
        }

        // Caps: centre vertex followed by a ring
        for (y, r, sign) in [(half_height, radius_top, 1.0_f32), (-half_height, radius_bottom, -1.0)] {
            let center = vertices.len() as u32;
            vertices.push(HabitatVertex::new([0.0, y, 0.0], [0.0, sign, 0.0]));

            for x in 0..=radial_segments {
                let theta = x as f32 / radial_segments as f32 * TAU;
                let (sin, cos) = theta.sin_cos();
                vertices.push(HabitatVertex::new([r * sin, y, r * cos], [0.0, sign, 0.0]));
            }

            for x in 0..radial_segments {
                let i = center + 1 + x;
                if sign > 0.0 {
                    indices.extend_from_slice(&[i, i + 1, center]);
                } else {
                    indices.extend_from_slice(&[i + 1, i, center]);
                }
            }
        }

        Self { vertices, indices }
    }

    /// Generate an axis-aligned box centred at the origin
    pub fn cuboid(size: [f32; 3]) -> Self {
        let [hx, hy, hz] = size.map(|s| s / 2.0);
        let mut vertices = Vec::with_capacity(24);
        let mut indices = Vec::with_capacity(36);

        // (normal, u axis, v axis) per face; corners are normal ± u ± v
        let faces: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
            ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
            ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
            ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
            ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
            ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
            ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ];

        for (n, u, v) in faces {
            let base = vertices.len() as u32;
            for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
                let position = [
                    (n[0] + u[0] * su + v[0] * sv) * hx,
                    (n[1] + u[1] * su + v[1] * sv) * hy,
                    (n[2] + u[2] * su + v[2] * sv) * hz,
                ];
                vertices.push(HabitatVertex::new(position, n));
            }
            indices.extend_from_slice(&[base, base + 1, base + 2]);
            indices.extend_from_slice(&[base, base + 2, base + 3]);
        }

        Self { vertices, indices }
    }

    /// Get vertex count
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get index count
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }
}

/// One star, drawn as a camera-facing quad
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct StarInstance {
    pub position: [f32; 3],
    /// World-space quad size
    pub size: f32,
    /// Linear colour
    pub color: [f32; 3],
    /// Twinkle phase offset in radians
    pub phase: f32,
}

impl StarInstance {
    pub const SIZE: u64 = std::mem::size_of::<Self>() as u64;

    /// Per-instance buffer layout for wgpu
    pub fn buffer_layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: Self::SIZE,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: 16,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Seed for the starfield so every viewport shows the same sky
const STARFIELD_SEED: u64 = 0x5eed_57a2;

/// Scatter stars through a spherical shell `[radius, radius + depth]`
pub fn generate_starfield(params: &Starfield) -> Vec<StarInstance> {
    let mut rng = StdRng::seed_from_u64(STARFIELD_SEED);
    let count = params.count as usize;

    (0..count)
        .map(|i| {
            let r = params.radius + params.depth * rng.random::<f32>();
            let cos_polar = 1.0 - 2.0 * rng.random::<f32>();
            let sin_polar = (1.0 - cos_polar * cos_polar).max(0.0).sqrt();
            let azimuth = TAU * rng.random::<f32>();

            let position = [
                r * sin_polar * azimuth.sin(),
                r * cos_polar,
                r * sin_polar * azimuth.cos(),
            ];

            let hue = i as f32 / count.max(1) as f32;
            let color = hsl_to_rgb(hue, params.saturation, 0.9);
            let size = (0.5 + 0.5 * rng.random::<f32>()) * params.factor;

            StarInstance {
                position,
                size,
                color,
                phase: TAU * rng.random::<f32>(),
            }
        })
        .collect()
}

fn hsl_to_rgb(h: f32, s: f32, l: f32) -> [f32; 3] {
    if s <= 0.0 {
        return [l, l, l];
    }
    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    let channel = |t: f32| {
        let t = t.rem_euclid(1.0);
        if t < 1.0 / 6.0 {
            p + (q - p) * 6.0 * t
        } else if t < 0.5 {
            q
        } else if t < 2.0 / 3.0 {
            p + (q - p) * (2.0 / 3.0 - t) * 6.0
        } else {
            p
        }
    };
    [channel(h + 1.0 / 3.0), channel(h), channel(h - 1.0 / 3.0)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sphere_mesh() {
        let mesh = HabitatMesh::sphere(2.0, 8, 4);
        assert_eq!(mesh.vertex_count(), 45); // 9 * 5
        // Pole rows contribute one triangle per quad
        assert_eq!(mesh.index_count(), 8 * (4 - 1) * 2 * 3);
        for v in &mesh.vertices {
            let len = glam::Vec3::from(v.position).length();
            assert!((len - 2.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_torus_mesh() {
        let mesh = HabitatMesh::torus(2.0, 0.6, 4, 8);
        assert_eq!(mesh.vertex_count(), 5 * 9);
        assert_eq!(mesh.index_count(), 4 * 8 * 6);

        // Every vertex lies on the tube surface
        for v in &mesh.vertices {
            let p = glam::Vec3::from(v.position);
            let ring = glam::Vec2::new(p.x, p.y).length() - 2.0;
            let d = (ring * ring + p.z * p.z).sqrt();
            assert!((d - 0.6).abs() < 1e-4);
        }
    }

    #[test]
    fn test_cylinder_mesh() {
        let mesh = HabitatMesh::cylinder(1.5, 1.5, 3.0, 8);
        // Torso 2 * 9, caps 2 * (1 + 9)
        assert_eq!(mesh.vertex_count(), 38);
        // Torso 8 quads, caps 8 triangles each
        assert_eq!(mesh.index_count(), 8 * 6 + 2 * 8 * 3);

        let max_y = mesh.vertices.iter().map(|v| v.position[1]).fold(f32::MIN, f32::max);
        let min_y = mesh.vertices.iter().map(|v| v.position[1]).fold(f32::MAX, f32::min);
        assert_eq!(max_y, 1.5);
        assert_eq!(min_y, -1.5);
    }

    #[test]
    fn test_cuboid_mesh() {
        let mesh = HabitatMesh::cuboid([4.0, 0.05, 1.5]);
        assert_eq!(mesh.vertex_count(), 24);
        assert_eq!(mesh.index_count(), 36);
        for v in &mesh.vertices {
            assert!((v.position[0].abs() - 2.0).abs() < 1e-6);
            assert!((v.position[1].abs() - 0.025).abs() < 1e-6);
            assert!((v.position[2].abs() - 0.75).abs() < 1e-6);
        }
    }

    #[test]
    fn test_indices_in_bounds() {
        let meshes = [
            HabitatMesh::sphere(1.0, 16, 16),
            HabitatMesh::torus(1.0, 0.3, 8, 16),
            HabitatMesh::cylinder(1.0, 0.5, 2.0, 12),
            HabitatMesh::cuboid([1.0, 1.0, 1.0]),
        ];
        for mesh in &meshes {
            let n = mesh.vertex_count() as u32;
            assert!(mesh.indices.iter().all(|&i| i < n));
            assert_eq!(mesh.index_count() % 3, 0);
        }
    }

    #[test]
    fn test_starfield_shell_and_determinism() {
        let params = Starfield::default();
        let stars = generate_starfield(&params);
        assert_eq!(stars.len(), 5000);

        for star in &stars {
            let r = glam::Vec3::from(star.position).length();
            assert!(r >= params.radius - 1e-3 && r <= params.radius + params.depth + 1e-3);
            assert!(star.size >= 0.5 * params.factor && star.size <= params.factor);
            // Zero saturation gives grey stars
            assert_eq!(star.color[0], star.color[1]);
            assert_eq!(star.color[1], star.color[2]);
        }

        let again = generate_starfield(&params);
        assert_eq!(stars[0].position, again[0].position);
        assert_eq!(stars[4999].size, again[4999].size);
    }
}
