//! Shader sources and hot-reload
//!
//! The WGSL sources are embedded at compile time. In debug builds the
//! `ShaderWatcher` watches the source directory so pipelines can be rebuilt
//! while the application runs.

use std::path::{Path, PathBuf};

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::time::{Duration, Instant};

/// Lit habitat mesh shader
pub const HABITAT_SHADER: &str = include_str!("habitat.wgsl");

/// Starfield shader
pub const STARS_SHADER: &str = include_str!("stars.wgsl");

/// Shader files known to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderKind {
    Habitat,
    Stars,
}

impl ShaderKind {
    pub fn file_name(&self) -> &'static str {
        match self {
            ShaderKind::Habitat => "habitat.wgsl",
            ShaderKind::Stars => "stars.wgsl",
        }
    }

    /// Source compiled into the binary
    pub fn embedded(&self) -> &'static str {
        match self {
            ShaderKind::Habitat => HABITAT_SHADER,
            ShaderKind::Stars => STARS_SHADER,
        }
    }

    /// Identify a shader from a changed path
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.file_name()?.to_str()? {
            "habitat.wgsl" => Some(ShaderKind::Habitat),
            "stars.wgsl" => Some(ShaderKind::Stars),
            _ => None,
        }
    }

    /// Current source: the file on disk, or the embedded copy if unreadable
    pub fn load(&self) -> String {
        let path = shaders_dir().join(self.file_name());
        std::fs::read_to_string(&path).unwrap_or_else(|e| {
            log::warn!("Could not read {} ({}), using embedded shader", path.display(), e);
            self.embedded().to_string()
        })
    }
}

/// Get the path to the shaders directory
pub fn shaders_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("src").join("shaders")
}

// ============================================================================
// Shader Hot-Reload
// ============================================================================

/// Changed shaders waiting out the debounce window
#[derive(Debug, Default)]
struct PendingShaders {
    kinds: Vec<ShaderKind>,
    last_change: Option<Instant>,
}

impl PendingShaders {
    fn record(&mut self, kind: ShaderKind, now: Instant) {
        if !self.kinds.contains(&kind) {
            self.kinds.push(kind);
        }
        self.last_change = Some(now);
    }

    /// Drain every pending kind once `debounce` has passed since the last change
    fn take_ready(&mut self, now: Instant, debounce: Duration) -> Vec<ShaderKind> {
        match self.last_change {
            Some(last) if now.saturating_duration_since(last) >= debounce => {
                self.last_change = None;
                std::mem::take(&mut self.kinds)
            }
            _ => Vec::new(),
        }
    }
}

/// Watches shader files and reports debounced changes
pub struct ShaderWatcher {
    /// Kept alive to maintain the watch
    _watcher: RecommendedWatcher,
    receiver: Receiver<Result<Event, notify::Error>>,
    pending: PendingShaders,
    debounce_duration: Duration,
}

impl ShaderWatcher {
    /// Watch the shaders directory for `.wgsl` changes
    pub fn new() -> Result<Self, notify::Error> {
        let (tx, rx) = channel();

        let mut watcher = RecommendedWatcher::new(
            move |res| {
                let _ = tx.send(res);
            },
            Config::default(),
        )?;

        let shaders_path = shaders_dir();
        tracing::info!("Shader hot-reload enabled, watching: {}", shaders_path.display());
        watcher.watch(&shaders_path, RecursiveMode::NonRecursive)?;

        Ok(Self {
            _watcher: watcher,
            receiver: rx,
            pending: PendingShaders::default(),
            debounce_duration: Duration::from_millis(100),
        })
    }

    /// Poll for shader changes
    ///
    /// Returns every shader that changed once no further events arrived for
    /// the debounce duration.
    pub fn poll(&mut self) -> Vec<ShaderKind> {
        loop {
            match self.receiver.try_recv() {
                Ok(Ok(event)) => {
                    let now = Instant::now();
                    for kind in event.paths.iter().filter_map(|p| ShaderKind::from_path(p)) {
                        self.pending.record(kind, now);
                    }
                }
                Ok(Err(e)) => {
                    log::warn!("Shader watcher error: {:?}", e);
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    log::error!("Shader watcher channel disconnected");
                    break;
                }
            }
        }

        let ready = self.pending.take_ready(Instant::now(), self.debounce_duration);
        for kind in &ready {
            tracing::info!("Shader changed: {}", kind.file_name());
        }
        ready
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shaders_dir_exists() {
        let path = shaders_dir();
        assert!(path.exists(), "Shaders directory should exist at {:?}", path);
    }

    #[test]
    fn test_embedded_shaders_have_entry_points() {
        for kind in [ShaderKind::Habitat, ShaderKind::Stars] {
            let source = kind.embedded();
            assert!(source.contains("fn vs_main"));
            assert!(source.contains("fn fs_main"));
        }
    }

    #[test]
    fn test_kind_from_path() {
        assert_eq!(
            ShaderKind::from_path(&shaders_dir().join("habitat.wgsl")),
            Some(ShaderKind::Habitat)
        );
        assert_eq!(ShaderKind::from_path(Path::new("/tmp/stars.wgsl")), Some(ShaderKind::Stars));
        assert_eq!(ShaderKind::from_path(Path::new("/tmp/other.wgsl")), None);
    }

    #[test]
    fn test_pending_keeps_every_kind_within_debounce() {
        let debounce = Duration::from_millis(100);
        let start = Instant::now();
        let mut pending = PendingShaders::default();

        pending.record(ShaderKind::Habitat, start);
        pending.record(ShaderKind::Stars, start + Duration::from_millis(40));
        pending.record(ShaderKind::Habitat, start + Duration::from_millis(60));

        // Still inside the window of the last change
        assert!(pending.take_ready(start + Duration::from_millis(120), debounce).is_empty());

        let ready = pending.take_ready(start + Duration::from_millis(160), debounce);
        assert_eq!(ready, vec![ShaderKind::Habitat, ShaderKind::Stars]);
        assert!(pending.take_ready(start + Duration::from_secs(5), debounce).is_empty());
    }

    #[test]
    fn test_load_matches_disk() {
        let source = ShaderKind::Habitat.load();
        assert!(source.contains("struct FrameUniforms"));
    }
}
