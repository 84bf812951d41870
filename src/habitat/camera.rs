//! Orbit camera for the habitat viewport
//!
//! Spherical-coordinate camera orbiting the habitat centre, with the
//! distance clamped to the bounds of the owning viewport.

use glam::{Mat4, Vec3};

use super::scene::{BASE_CAMERA_DISTANCE, CAMERA_FOV_DEGREES};

/// Polar clamp (~80 degrees) so the camera never flips over the poles
const PITCH_LIMIT: f32 = 1.4;

/// Orbit camera for habitat navigation
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    /// Horizontal angle (yaw) in radians
    yaw: f32,
    /// Vertical angle (pitch) in radians
    pitch: f32,
    /// Distance from target point
    distance: f32,
    /// Allowed distance range
    min_distance: f32,
    max_distance: f32,
    /// Point the camera orbits around
    target: Vec3,
    /// Aspect ratio (width/height) for projection
    aspect: f32,
    /// Vertical field of view in radians
    fov: f32,
    near: f32,
    far: f32,
}

impl OrbitCamera {
    /// Create a camera looking down -Z at the origin from `BASE_CAMERA_DISTANCE`
    pub fn new(min_distance: f32, max_distance: f32) -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            distance: BASE_CAMERA_DISTANCE.clamp(min_distance, max_distance),
            min_distance,
            max_distance,
            target: Vec3::ZERO,
            aspect: 16.0 / 9.0,
            fov: CAMERA_FOV_DEGREES.to_radians(),
            near: 0.1,
            // Star shell reaches radius + depth = 150
            far: 1000.0,
        }
    }

    /// Get the view matrix
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye_position(), self.target, Vec3::Y)
    }

    /// Get the projection matrix
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    /// Get combined view-projection matrix
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Calculate camera position from spherical coordinates
    pub fn eye_position(&self) -> Vec3 {
        let x = self.distance * self.pitch.cos() * self.yaw.sin();
        let y = self.distance * self.pitch.sin();
        let z = self.distance * self.pitch.cos() * self.yaw.cos();
        self.target + Vec3::new(x, y, z)
    }

    /// Handle pointer drag for orbit
    pub fn on_mouse_drag(&mut self, delta: (f32, f32), sensitivity: f32) {
        self.yaw -= delta.0 * sensitivity;
        self.pitch = (self.pitch + delta.1 * sensitivity).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Handle scroll for zoom; positive delta moves closer
    pub fn on_scroll(&mut self, delta: f32) {
        self.set_distance(self.distance * (1.0 - delta * 0.1));
    }

    /// Move to `distance`, clamped to the allowed range
    pub fn set_distance(&mut self, distance: f32) {
        self.distance = distance.clamp(self.min_distance, self.max_distance);
    }

    /// Update aspect ratio on resize
    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
        }
    }

    /// Set the vertical field of view in degrees
    pub fn set_fov_degrees(&mut self, fov: f32) {
        self.fov = fov.to_radians();
    }

    /// Set target point
    pub fn set_target(&mut self, target: Vec3) {
        self.target = target;
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Return to the front view at `distance`
    pub fn reset(&mut self, distance: f32) {
        self.yaw = 0.0;
        self.pitch = 0.0;
        self.set_distance(distance);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_eye_on_positive_z() {
        let camera = OrbitCamera::new(3.0, 20.0);
        let eye = camera.eye_position();
        assert!(eye.x.abs() < 1e-6);
        assert!(eye.y.abs() < 1e-6);
        assert!((eye.z - 8.0).abs() < 1e-6);
    }

    #[test]
    fn test_distance_clamped_to_bounds() {
        let mut camera = OrbitCamera::new(5.0, 15.0);
        camera.set_distance(2.0);
        assert_eq!(camera.distance(), 5.0);
        camera.set_distance(40.0);
        assert_eq!(camera.distance(), 15.0);

        for _ in 0..100 {
            camera.on_scroll(1.0);
        }
        assert_eq!(camera.distance(), 5.0);
        for _ in 0..100 {
            camera.on_scroll(-1.0);
        }
        assert_eq!(camera.distance(), 15.0);
    }

    #[test]
    fn test_pitch_clamped() {
        let mut camera = OrbitCamera::new(3.0, 20.0);
        camera.on_mouse_drag((0.0, 10_000.0), 0.01);
        assert_eq!(camera.pitch(), PITCH_LIMIT);
        camera.on_mouse_drag((0.0, -10_000.0), 0.01);
        assert_eq!(camera.pitch(), -PITCH_LIMIT);
    }

    #[test]
    fn test_reset_restores_angles() {
        let mut camera = OrbitCamera::new(3.0, 20.0);
        camera.on_mouse_drag((120.0, 40.0), 0.01);
        camera.reset(4.0);
        assert_eq!(camera.yaw(), 0.0);
        assert_eq!(camera.pitch(), 0.0);
        assert_eq!(camera.distance(), 4.0);
    }

    #[test]
    fn test_initial_distance_respects_bounds() {
        let camera = OrbitCamera::new(10.0, 20.0);
        assert_eq!(camera.distance(), 10.0);
    }
}
