//! Parametric habitat model and 3D view
//!
//! Parameters flow through the store into the scene composer; the viewport
//! renders the composed scene while frame hooks animate the hull.

pub mod animation;
pub mod camera;
pub mod mesh;
pub mod params;
pub mod renderer;
pub mod scene;
pub mod types;
pub mod viewport;

pub use animation::{FrameClock, FrameHook, FrameHooks, HabitatSpin, MeshTransform};
pub use camera::OrbitCamera;
pub use mesh::{HabitatMesh, HabitatVertex};
pub use params::{ParameterEvent, ParameterStore, StoreUpdate};
pub use renderer::HabitatRenderer;
pub use scene::{compose_scene, Geometry, SceneDescription};
pub use types::{HabitatParameters, HabitatShape, HexColor};
pub use viewport::{HabitatViewport, ViewportProfile, ViewportResponse};
