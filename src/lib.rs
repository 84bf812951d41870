//! Habitat Designer Library
//!
//! Interactive 3D preview of parametric space-habitat concepts: a showcase
//! of the three habitat archetypes and a designer that turns radius, length
//! and zoom inputs into a lit, animated scene.

pub mod app;
pub mod gpu_context;
pub mod habitat;
pub mod settings;
pub mod shaders;
pub mod telemetry;
pub mod ui;

pub use app::{App, FrameOutcome};
pub use gpu_context::{GpuContext, GpuError};
pub use habitat::{compose_scene, HabitatParameters, HabitatShape, ParameterStore, SceneDescription};
pub use settings::{AppPreferences, StartPage};
