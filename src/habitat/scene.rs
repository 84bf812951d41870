//! Scene composition
//!
//! Turns `HabitatParameters` into a declarative `SceneDescription`: the hull
//! mesh, its solar panels, the lights, the starfield backdrop and the camera.
//! Composition is a pure function and is re-run on every frame.

use glam::Vec3;

use super::types::{HabitatParameters, HabitatShape, HexColor};

/// Camera distance at zoom 1.0
pub const BASE_CAMERA_DISTANCE: f32 = 8.0;
/// Vertical field of view of the habitat camera, in degrees
pub const CAMERA_FOV_DEGREES: f32 = 50.0;

/// Primitive geometry of a mesh
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Geometry {
    Sphere {
        radius: f32,
    },
    Torus {
        /// Distance from ring centre to tube centre
        radius: f32,
        tube_radius: f32,
    },
    Cylinder {
        radius_top: f32,
        radius_bottom: f32,
        height: f32,
    },
    /// Axis-aligned box with full extents
    Cuboid {
        size: Vec3,
    },
}

impl Geometry {
    /// Short name used in logs and the UI
    pub fn kind_name(&self) -> &'static str {
        match self {
            Geometry::Sphere { .. } => "sphere",
            Geometry::Torus { .. } => "torus",
            Geometry::Cylinder { .. } => "cylinder",
            Geometry::Cuboid { .. } => "box",
        }
    }
}

/// Surface description for the lit pipeline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub color: HexColor,
    pub metalness: f32,
    pub roughness: f32,
    /// Emissive colour and intensity (0 disables)
    pub emissive: HexColor,
    pub emissive_intensity: f32,
    /// Vertex distortion amount and animation speed (0 disables)
    pub distort: f32,
    pub distort_speed: f32,
}

impl Material {
    /// Plain metallic surface without emission or distortion
    pub fn standard(color: HexColor, metalness: f32, roughness: f32) -> Self {
        Self {
            color,
            metalness,
            roughness,
            emissive: color,
            emissive_intensity: 0.0,
            distort: 0.0,
            distort_speed: 0.0,
        }
    }
}

/// Role of a mesh in the scene
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshRole {
    /// The habitat hull; animated by the frame hooks
    Hull,
    /// Decorative solar panel
    SolarPanel,
}

/// One renderable mesh
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshDescriptor {
    pub role: MeshRole,
    pub geometry: Geometry,
    pub material: Material,
    pub position: Vec3,
}

/// Light sources supported by the renderer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Light {
    Ambient {
        color: HexColor,
        intensity: f32,
    },
    Point {
        position: Vec3,
        color: HexColor,
        intensity: f32,
    },
}

/// Procedural starfield surrounding the scene
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Starfield {
    /// Inner radius of the star shell
    pub radius: f32,
    /// Thickness of the star shell
    pub depth: f32,
    pub count: u32,
    /// Size multiplier
    pub factor: f32,
    /// 0 = white stars, 1 = fully coloured
    pub saturation: f32,
    /// Soften star edges
    pub fade: bool,
    /// Twinkle speed
    pub speed: f32,
}

impl Default for Starfield {
    fn default() -> Self {
        Self {
            radius: 100.0,
            depth: 50.0,
            count: 5000,
            factor: 4.0,
            saturation: 0.0,
            fade: true,
            speed: 1.0,
        }
    }
}

/// Image-based lighting approximation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnvironmentPreset {
    /// Dim blue sky over a dark ground
    #[default]
    Night,
}

impl EnvironmentPreset {
    /// Hemisphere colours (sky, ground) and strength
    pub fn hemisphere(&self) -> (HexColor, HexColor, f32) {
        match self {
            EnvironmentPreset::Night => (HexColor(0x1b2a4a), HexColor(0x05070d), 0.35),
        }
    }
}

/// Fixed elements every viewport draws behind the habitat
#[derive(Debug, Clone, PartialEq)]
pub struct Backdrop {
    pub background: HexColor,
    pub lights: Vec<Light>,
    pub starfield: Starfield,
    pub environment: EnvironmentPreset,
}

impl Backdrop {
    /// Dark space backdrop with ambient, key and fill lights
    pub fn night() -> Self {
        Self {
            background: HexColor(0x0a0f1e),
            lights: vec![
                Light::Ambient {
                    color: HexColor::WHITE,
                    intensity: 0.3,
                },
                Light::Point {
                    position: Vec3::new(10.0, 10.0, 10.0),
                    color: HexColor::WHITE,
                    intensity: 1.0,
                },
                Light::Point {
                    position: Vec3::new(-10.0, -10.0, -10.0),
                    color: HexColor(0x4a9eff),
                    intensity: 0.5,
                },
            ],
            starfield: Starfield::default(),
            environment: EnvironmentPreset::Night,
        }
    }
}

/// Perspective camera placement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraDescriptor {
    pub position: Vec3,
    pub target: Vec3,
    pub fov_degrees: f32,
}

impl CameraDescriptor {
    /// Distance from the target
    pub fn distance(&self) -> f32 {
        self.position.distance(self.target)
    }
}

/// Everything needed to draw one frame of the habitat view
#[derive(Debug, Clone, PartialEq)]
pub struct SceneDescription {
    /// The hull; always present
    pub primary: MeshDescriptor,
    /// Solar panels; empty for the torus
    pub panels: Vec<MeshDescriptor>,
    /// Backdrop lights followed by the hull glow
    pub lights: Vec<Light>,
    pub backdrop: Backdrop,
    pub camera: CameraDescriptor,
}

impl SceneDescription {
    /// All meshes, hull first
    pub fn meshes(&self) -> impl Iterator<Item = &MeshDescriptor> {
        std::iter::once(&self.primary).chain(self.panels.iter())
    }
}

const PANEL_COLOR: HexColor = HexColor(0x1e40af);

fn hull_geometry(params: &HabitatParameters) -> Geometry {
    let radius = params.radius;
    match params.shape {
        HabitatShape::Dome => Geometry::Sphere { radius },
        HabitatShape::Torus => Geometry::Torus {
            radius,
            tube_radius: radius * 0.3,
        },
        HabitatShape::Cylinder => Geometry::Cylinder {
            radius_top: radius,
            radius_bottom: radius,
            height: params.height_length,
        },
    }
}

fn hull_material(shape: HabitatShape) -> Material {
    let color = shape.color();
    match shape {
        HabitatShape::Dome => Material {
            distort: 0.3,
            distort_speed: 2.0,
            ..Material::standard(color, 0.8, 0.2)
        },
        HabitatShape::Torus | HabitatShape::Cylinder => Material {
            emissive_intensity: 0.2,
            ..Material::standard(color, 0.8, 0.2)
        },
    }
}

fn solar_panels(params: &HabitatParameters) -> Vec<MeshDescriptor> {
    if params.shape == HabitatShape::Torus {
        return Vec::new();
    }

    let r = params.radius;
    let size = Vec3::new(r * 2.0, 0.05, r * 0.75);
    let material = Material::standard(PANEL_COLOR, 0.9, 0.1);

    [r + 1.0, -(r + 1.0)]
        .into_iter()
        .map(|z| MeshDescriptor {
            role: MeshRole::SolarPanel,
            geometry: Geometry::Cuboid { size },
            material,
            position: Vec3::new(0.0, 0.0, z),
        })
        .collect()
}

/// Compose the scene for the given parameters
pub fn compose_scene(params: &HabitatParameters) -> SceneDescription {
    let primary = MeshDescriptor {
        role: MeshRole::Hull,
        geometry: hull_geometry(params),
        material: hull_material(params.shape),
        position: Vec3::ZERO,
    };

    let backdrop = Backdrop::night();
    let mut lights = backdrop.lights.clone();
    lights.push(Light::Point {
        position: primary.position,
        color: primary.material.color,
        intensity: 1.0,
    });

    SceneDescription {
        primary,
        panels: solar_panels(params),
        lights,
        backdrop,
        camera: CameraDescriptor {
            position: Vec3::new(0.0, 0.0, BASE_CAMERA_DISTANCE / params.zoom),
            target: Vec3::ZERO,
            fov_degrees: CAMERA_FOV_DEGREES,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(shape: HabitatShape, radius: f32, height_length: f32) -> HabitatParameters {
        HabitatParameters {
            shape,
            radius,
            height_length,
            zoom: 1.0,
        }
    }

    #[test]
    fn test_primary_geometry_matches_shape() {
        for &shape in HabitatShape::all() {
            for radius in [0.5, 2.0, 7.5, 10.0] {
                let scene = compose_scene(&params(shape, radius, 4.0));
                let expected = match shape {
                    HabitatShape::Dome => "sphere",
                    HabitatShape::Torus => "torus",
                    HabitatShape::Cylinder => "cylinder",
                };
                assert_eq!(scene.primary.geometry.kind_name(), expected);
                assert_eq!(scene.primary.role, MeshRole::Hull);
                assert_eq!(
                    scene.meshes().filter(|m| m.role == MeshRole::Hull).count(),
                    1
                );
            }
        }
    }

    #[test]
    fn test_panels_only_for_non_torus() {
        for &shape in HabitatShape::all() {
            let scene = compose_scene(&params(shape, 3.0, 3.0));
            if shape == HabitatShape::Torus {
                assert!(scene.panels.is_empty());
            } else {
                assert_eq!(scene.panels.len(), 2);
            }
        }
    }

    #[test]
    fn test_panel_placement_and_size() {
        let scene = compose_scene(&params(HabitatShape::Cylinder, 4.0, 6.0));
        let zs: Vec<f32> = scene.panels.iter().map(|p| p.position.z).collect();
        assert_eq!(zs, vec![5.0, -5.0]);
        for panel in &scene.panels {
            assert_eq!(panel.geometry, Geometry::Cuboid { size: Vec3::new(8.0, 0.05, 3.0) });
            assert_eq!(panel.material.color, PANEL_COLOR);
        }
    }

    #[test]
    fn test_torus_tube_ratio() {
        for radius in [0.5_f32, 1.0, 2.0, 3.3, 10.0] {
            let scene = compose_scene(&params(HabitatShape::Torus, radius, 3.0));
            match scene.primary.geometry {
                Geometry::Torus { radius: major, tube_radius } => {
                    assert_eq!(major, radius);
                    assert_eq!(tube_radius, radius * 0.3);
                }
                other => panic!("expected torus, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_cylinder_uses_height_length() {
        let scene = compose_scene(&params(HabitatShape::Cylinder, 1.5, 9.0));
        assert_eq!(
            scene.primary.geometry,
            Geometry::Cylinder { radius_top: 1.5, radius_bottom: 1.5, height: 9.0 }
        );

        // Other shapes ignore it
        let a = compose_scene(&params(HabitatShape::Dome, 2.0, 1.0));
        let b = compose_scene(&params(HabitatShape::Dome, 2.0, 9.0));
        assert_eq!(a, b);
    }

    #[test]
    fn test_hull_glow_light_matches_color() {
        for &shape in HabitatShape::all() {
            let scene = compose_scene(&params(shape, 2.0, 3.0));
            let glow = scene.lights.last().copied();
            assert_eq!(
                glow,
                Some(Light::Point { position: Vec3::ZERO, color: shape.color(), intensity: 1.0 })
            );
        }
    }

    #[test]
    fn test_camera_distance_from_zoom() {
        let mut p = params(HabitatShape::Dome, 2.0, 3.0);
        p.zoom = 2.0;
        let scene = compose_scene(&p);
        assert_eq!(scene.camera.position, Vec3::new(0.0, 0.0, 4.0));
        assert_eq!(scene.camera.distance(), 4.0);
        assert_eq!(scene.camera.fov_degrees, 50.0);
    }

    #[test]
    fn test_compose_is_pure() {
        let p = params(HabitatShape::Cylinder, 3.5, 7.0);
        assert_eq!(compose_scene(&p), compose_scene(&p));
    }

    #[test]
    fn test_showcase_cylinder_panels_follow_general_sizing() {
        let scene = compose_scene(&HabitatParameters::showcase(HabitatShape::Cylinder));
        assert_eq!(scene.panels.len(), 2);
        for (panel, z) in scene.panels.iter().zip([2.5, -2.5]) {
            assert_eq!(panel.geometry, Geometry::Cuboid { size: Vec3::new(3.0, 0.05, 1.125) });
            assert_eq!(panel.position, Vec3::new(0.0, 0.0, z));
        }
    }
}
