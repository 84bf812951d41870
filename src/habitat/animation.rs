//! Per-frame animation hooks
//!
//! Hooks run once per redraw of a viewport and mutate the hull transform.
//! They never touch the parameter store.

use glam::{EulerRot, Mat4, Vec3};
use std::time::{Duration, Instant};

/// Time source handed to frame hooks
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    /// Seconds since the viewport was mounted
    pub elapsed: f32,
    /// Seconds since the previous tick
    pub delta: f32,
}

/// Monotonic clock owned by a mounted viewport
#[derive(Debug)]
pub struct AnimationClock {
    start: Instant,
    last: Instant,
}

impl AnimationClock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self { start: now, last: now }
    }

    /// Advance to `now` and return the frame timing
    fn tick_at(&mut self, now: Instant) -> FrameClock {
        let delta = now.saturating_duration_since(self.last);
        self.last = now;
        FrameClock {
            elapsed: now.saturating_duration_since(self.start).as_secs_f32(),
            delta: delta.as_secs_f32(),
        }
    }

    /// Time since mount
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Default for AnimationClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Rotation applied to the hull on top of its scene position
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MeshTransform {
    /// Accumulated yaw in radians (unbounded)
    pub yaw: f64,
    /// Wobble around X in radians
    pub pitch: f32,
}

impl MeshTransform {
    /// Model matrix for a mesh placed at `position`
    pub fn model_matrix(&self, position: Vec3) -> Mat4 {
        // Wrap only for the matrix; the stored angle keeps growing
        let yaw = self.yaw.rem_euclid(std::f64::consts::TAU) as f32;
        Mat4::from_translation(position) * Mat4::from_euler(EulerRot::XYZ, self.pitch, yaw, 0.0)
    }
}

/// Per-frame callback registered on a viewport
pub trait FrameHook {
    /// Called once per redraw
    fn tick(&mut self, clock: &FrameClock, transform: &mut MeshTransform);
}

/// Continuous spin with a slow wobble
#[derive(Debug, Clone, Copy)]
pub struct HabitatSpin {
    /// Yaw added per tick (radians), independent of frame time
    pub yaw_step: f64,
    /// Wobble frequency factor applied to elapsed seconds
    pub wobble_rate: f32,
    /// Wobble amplitude (radians)
    pub wobble_amplitude: f32,
}

impl Default for HabitatSpin {
    fn default() -> Self {
        Self {
            yaw_step: 0.003,
            wobble_rate: 0.3,
            wobble_amplitude: 0.1,
        }
    }
}

impl FrameHook for HabitatSpin {
    fn tick(&mut self, clock: &FrameClock, transform: &mut MeshTransform) {
        transform.yaw += self.yaw_step;
        transform.pitch = (clock.elapsed * self.wobble_rate).sin() * self.wobble_amplitude;
    }
}

/// Hooks registered on a mounted viewport, with their clock and the hull
/// transform they drive
pub struct FrameHooks {
    hooks: Vec<Box<dyn FrameHook>>,
    clock: AnimationClock,
    transform: MeshTransform,
    running: bool,
}

impl FrameHooks {
    pub fn new() -> Self {
        Self {
            hooks: Vec::new(),
            clock: AnimationClock::new(),
            transform: MeshTransform::default(),
            running: true,
        }
    }

    /// Add a hook; hooks run in registration order
    pub fn register(&mut self, hook: Box<dyn FrameHook>) {
        self.hooks.push(hook);
    }

    /// Run every hook once; `None` after `stop`
    pub fn tick(&mut self) -> Option<FrameClock> {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> Option<FrameClock> {
        if !self.running {
            return None;
        }
        let clock = self.clock.tick_at(now);
        for hook in &mut self.hooks {
            hook.tick(&clock, &mut self.transform);
        }
        Some(clock)
    }

    /// Drop every hook; later ticks do nothing
    pub fn stop(&mut self) {
        self.hooks.clear();
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn hook_count(&self) -> usize {
        self.hooks.len()
    }

    pub fn transform(&self) -> &MeshTransform {
        &self.transform
    }

    /// Time since mount
    pub fn uptime(&self) -> Duration {
        self.clock.elapsed()
    }
}

impl Default for FrameHooks {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clock(elapsed: f32) -> FrameClock {
        FrameClock { elapsed, delta: 0.016 }
    }

    #[test]
    fn test_yaw_strictly_increasing() {
        let mut hook = HabitatSpin::default();
        let mut transform = MeshTransform::default();
        // Elapsed values in no particular order, including repeats
        let times = [0.0, 0.016, 0.016, 5.0, 1.0, 1e6, 0.0, 123.456];

        let mut previous = transform.yaw;
        for _ in 0..1000 {
            for &t in &times {
                hook.tick(&clock(t), &mut transform);
                assert!(transform.yaw > previous);
                previous = transform.yaw;
            }
        }
    }

    #[test]
    fn test_yaw_step_per_tick() {
        let mut hook = HabitatSpin::default();
        let mut transform = MeshTransform::default();
        for _ in 0..10 {
            hook.tick(&clock(0.0), &mut transform);
        }
        assert!((transform.yaw - 0.03).abs() < 1e-12);
    }

    #[test]
    fn test_wobble() {
        let mut hook = HabitatSpin::default();
        let mut transform = MeshTransform::default();

        hook.tick(&clock(0.0), &mut transform);
        assert_eq!(transform.pitch, 0.0);

        let t = std::f32::consts::FRAC_PI_2 / 0.3;
        hook.tick(&clock(t), &mut transform);
        assert!((transform.pitch - 0.1).abs() < 1e-5);
    }

    #[test]
    fn test_model_matrix_translation() {
        let transform = MeshTransform { yaw: 100.0, pitch: 0.05 };
        let m = transform.model_matrix(Vec3::new(0.0, 0.0, 3.0));
        assert!(m.w_axis.truncate().abs_diff_eq(Vec3::new(0.0, 0.0, 3.0), 1e-6));
    }

    #[test]
    fn test_hooks_drive_transform_until_stopped() {
        let mut hooks = FrameHooks::new();
        hooks.register(Box::new(HabitatSpin::default()));
        let start = hooks.clock.start;

        for i in 1..=3u64 {
            assert!(hooks.tick_at(start + Duration::from_millis(i * 16)).is_some());
        }
        assert!((hooks.transform().yaw - 0.009).abs() < 1e-12);

        hooks.stop();
        let stopped_at = *hooks.transform();
        assert!(!hooks.is_running());
        assert_eq!(hooks.hook_count(), 0);
        assert!(hooks.tick_at(start + Duration::from_millis(64)).is_none());
        assert_eq!(*hooks.transform(), stopped_at);
    }

    #[test]
    fn test_clock_monotonic() {
        let mut clock = AnimationClock::new();
        let start = clock.start;
        let a = clock.tick_at(start + Duration::from_millis(16));
        let b = clock.tick_at(start + Duration::from_millis(48));
        assert!(b.elapsed > a.elapsed);
        assert!((b.delta - 0.032).abs() < 1e-4);
    }
}
