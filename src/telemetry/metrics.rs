//! Frame timing
//!
//! Collects recent frame durations and derives statistics plus a
//! once-per-second FPS readout for the menu bar.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Frame timing statistics
#[derive(Debug, Clone, Default)]
pub struct FrameStats {
    /// Average frame time in milliseconds
    pub avg_ms: f64,
    pub min_ms: f64,
    pub max_ms: f64,
    /// 50th percentile (median) frame time
    pub p50_ms: f64,
    pub p95_ms: f64,
    pub p99_ms: f64,
    /// Number of samples in the statistics
    pub sample_count: usize,
}

/// Frame profiler for CPU timing
pub struct FrameProfiler {
    /// Frame durations, oldest first
    frame_times: VecDeque<Duration>,
    /// Maximum samples to keep (5 seconds at 60fps)
    max_samples: usize,
    last_frame_start: Option<Instant>,
    /// FPS readout, refreshed once per second
    displayed_fps: f64,
    /// Start of the current FPS window and frames counted in it
    fps_window_start: Option<Instant>,
    fps_window_frames: u32,
}

impl Default for FrameProfiler {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameProfiler {
    pub fn new() -> Self {
        Self {
            frame_times: VecDeque::with_capacity(300),
            max_samples: 300,
            last_frame_start: None,
            displayed_fps: 0.0,
            fps_window_start: None,
            fps_window_frames: 0,
        }
    }

    /// Mark the beginning of a frame
    pub fn begin_frame(&mut self) {
        self.begin_frame_at(Instant::now());
    }

    fn begin_frame_at(&mut self, now: Instant) {
        if let Some(start) = self.last_frame_start {
            self.frame_times.push_back(now.saturating_duration_since(start));
            if self.frame_times.len() > self.max_samples {
                self.frame_times.pop_front();
            }
        }
        self.last_frame_start = Some(now);

        let window_start = *self.fps_window_start.get_or_insert(now);
        self.fps_window_frames += 1;
        let window = now.saturating_duration_since(window_start);
        if window >= Duration::from_secs(1) {
            // Frames completed inside the window
            self.displayed_fps = (self.fps_window_frames - 1) as f64 / window.as_secs_f64();
            self.fps_window_start = Some(now);
            self.fps_window_frames = 1;
        }
    }

    /// Get frame timing statistics
    pub fn stats(&self) -> FrameStats {
        if self.frame_times.is_empty() {
            return FrameStats::default();
        }

        let mut times: Vec<f64> = self
            .frame_times
            .iter()
            .map(|d| d.as_secs_f64() * 1000.0)
            .collect();
        times.sort_by(|a, b| a.total_cmp(b));

        let sum: f64 = times.iter().sum();

        FrameStats {
            avg_ms: sum / times.len() as f64,
            min_ms: times.first().copied().unwrap_or(0.0),
            max_ms: times.last().copied().unwrap_or(0.0),
            p50_ms: percentile(&times, 0.50),
            p95_ms: percentile(&times, 0.95),
            p99_ms: percentile(&times, 0.99),
            sample_count: times.len(),
        }
    }

    /// FPS averaged over the last full second
    pub fn fps(&self) -> f64 {
        self.displayed_fps
    }

    /// Get the last frame time in milliseconds
    pub fn last_frame_time_ms(&self) -> f64 {
        self.frame_times
            .back()
            .map(|d| d.as_secs_f64() * 1000.0)
            .unwrap_or(0.0)
    }
}

/// Calculate percentile from sorted array
fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let idx = ((sorted.len() - 1) as f64 * p) as usize;
    sorted[idx]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_profiler_stats() {
        let mut profiler = FrameProfiler::new();
        let start = Instant::now();

        for i in 0..=10u64 {
            profiler.begin_frame_at(start + Duration::from_millis(i * 16));
        }

        let stats = profiler.stats();
        assert_eq!(stats.sample_count, 10);
        assert!((stats.avg_ms - 16.0).abs() < 1e-6);
        assert!((profiler.last_frame_time_ms() - 16.0).abs() < 1e-6);
    }

    #[test]
    fn test_fps_updates_once_per_second() {
        let mut profiler = FrameProfiler::new();
        let start = Instant::now();

        // 20 ms frames: 50 fps
        for i in 0..50u64 {
            profiler.begin_frame_at(start + Duration::from_millis(i * 20));
        }
        assert_eq!(profiler.fps(), 0.0);

        profiler.begin_frame_at(start + Duration::from_millis(1000));
        assert!((profiler.fps() - 50.0).abs() < 1e-6);

        // No refresh until another second has passed
        profiler.begin_frame_at(start + Duration::from_millis(1500));
        assert!((profiler.fps() - 50.0).abs() < 1e-6);
    }

    #[test]
    fn test_sample_window_bounded() {
        let mut profiler = FrameProfiler::new();
        let start = Instant::now();
        for i in 0..1000u64 {
            profiler.begin_frame_at(start + Duration::from_millis(i));
        }
        assert_eq!(profiler.stats().sample_count, 300);
    }

    #[test]
    fn test_percentile() {
        let values = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
        assert_eq!(percentile(&values, 0.5), 5.0);
        assert_eq!(percentile(&values, 0.0), 1.0);
        assert_eq!(percentile(&values, 1.0), 10.0);
    }
}
