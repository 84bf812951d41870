//! Application preferences
//!
//! Window and frame-pacing preferences stored as XML in the user's config
//! directory. Habitat designs are never persisted.

use quick_xml::de::from_str;
use quick_xml::se::to_string;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Page shown when the application starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum StartPage {
    #[default]
    Home,
    Designer,
}

impl StartPage {
    /// Get display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            StartPage::Home => "Home",
            StartPage::Designer => "Designer",
        }
    }
}

/// Application preferences (stored in config directory)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename = "HabitatPreferences")]
pub struct AppPreferences {
    #[serde(rename = "windowWidth", default = "default_window_width")]
    pub window_width: u32,

    #[serde(rename = "windowHeight", default = "default_window_height")]
    pub window_height: u32,

    /// Target frame rate when VSYNC is off (24-240)
    #[serde(rename = "targetFps", default = "default_target_fps")]
    pub target_fps: u32,

    /// Whether VSYNC is enabled
    /// - true:  Fifo present mode, display controls timing
    /// - false: fastest present mode, redraws paced at `target_fps`
    #[serde(rename = "vsyncEnabled", default = "default_true")]
    pub vsync_enabled: bool,

    /// Whether to show FPS in the menu bar
    #[serde(rename = "showFps", default)]
    pub show_fps: bool,

    #[serde(rename = "startPage", default)]
    pub start_page: StartPage,
}

fn default_window_width() -> u32 {
    1280
}

fn default_window_height() -> u32 {
    800
}

fn default_target_fps() -> u32 {
    60
}

fn default_true() -> bool {
    true
}

impl Default for AppPreferences {
    fn default() -> Self {
        Self {
            window_width: default_window_width(),
            window_height: default_window_height(),
            target_fps: default_target_fps(),
            vsync_enabled: true,
            show_fps: false,
            start_page: StartPage::default(),
        }
    }
}

impl AppPreferences {
    /// Clamp FPS to valid range (24-240)
    pub fn clamp_fps(&mut self) {
        self.target_fps = self.target_fps.clamp(24, 240);
    }

    /// Frame interval used for manual pacing
    pub fn frame_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs_f64(1.0 / self.target_fps.clamp(24, 240) as f64)
    }

    /// Get the preferences file path
    fn prefs_path() -> Option<PathBuf> {
        dirs::config_dir().map(|mut p| {
            p.push("HabitatDesigner");
            p.push("preferences.xml");
            p
        })
    }

    /// Load preferences from an XML file
    pub fn load_from_file(path: &Path) -> Result<Self, SettingsError> {
        let contents = fs::read_to_string(path)?;
        let mut prefs: Self = from_str(&contents)?;
        prefs.clamp_fps();
        prefs.window_width = prefs.window_width.max(1);
        prefs.window_height = prefs.window_height.max(1);
        Ok(prefs)
    }

    /// Save preferences to an XML file, creating parent directories
    pub fn save_to_file(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let xml = to_string(self)?;
        let formatted = format!("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n{}", xml);

        fs::write(path, formatted)?;
        Ok(())
    }

    /// Load preferences from the config directory, defaults on any failure
    pub fn load() -> Self {
        let Some(path) = Self::prefs_path() else {
            return Self::default();
        };

        if !path.exists() {
            return Self::default();
        }

        match Self::load_from_file(&path) {
            Ok(prefs) => {
                tracing::info!("Loaded preferences from {}", path.display());
                prefs
            }
            Err(e) => {
                tracing::warn!("Failed to load preferences, using defaults: {}", e);
                Self::default()
            }
        }
    }

    /// Save preferences to the config directory
    pub fn save(&self) -> Result<(), SettingsError> {
        let path = Self::prefs_path().ok_or(SettingsError::NoConfigDir)?;
        self.save_to_file(&path)
    }
}

/// Settings-related errors
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML parse error: {0}")]
    XmlParse(#[from] quick_xml::DeError),

    #[error("XML write error: {0}")]
    XmlWrite(#[from] quick_xml::SeError),

    #[error("Could not find config directory")]
    NoConfigDir,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("habitat-designer-test-{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn test_default_preferences() {
        let prefs = AppPreferences::default();
        assert_eq!(prefs.target_fps, 60);
        assert!(prefs.vsync_enabled);
        assert!(!prefs.show_fps);
        assert_eq!(prefs.start_page, StartPage::Home);
    }

    #[test]
    fn test_fps_clamping() {
        let mut prefs = AppPreferences::default();
        prefs.target_fps = 300;
        prefs.clamp_fps();
        assert_eq!(prefs.target_fps, 240);

        prefs.target_fps = 10;
        prefs.clamp_fps();
        assert_eq!(prefs.target_fps, 24);
    }

    #[test]
    fn test_save_and_load_file() {
        let path = temp_path("roundtrip/preferences.xml");
        let prefs = AppPreferences {
            window_width: 1600,
            window_height: 900,
            target_fps: 120,
            vsync_enabled: false,
            show_fps: true,
            start_page: StartPage::Designer,
        };

        prefs.save_to_file(&path).expect("save");
        let loaded = AppPreferences::load_from_file(&path).expect("load");
        assert_eq!(loaded, prefs);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let path = temp_path("partial/preferences.xml");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "<HabitatPreferences><targetFps>500</targetFps></HabitatPreferences>").unwrap();

        let loaded = AppPreferences::load_from_file(&path).expect("load");
        assert_eq!(loaded.target_fps, 240);
        assert_eq!(loaded.window_width, 1280);
        assert!(loaded.vsync_enabled);
        assert_eq!(loaded.start_page, StartPage::Home);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_malformed_file_is_error() {
        let path = temp_path("malformed/preferences.xml");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "<HabitatPreferences><targetFps>fast</targetFps></HabitatPreferences>").unwrap();

        assert!(matches!(
            AppPreferences::load_from_file(&path),
            Err(SettingsError::XmlParse(_))
        ));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_frame_interval() {
        let mut prefs = AppPreferences::default();
        prefs.target_fps = 50;
        assert!((prefs.frame_interval().as_secs_f64() - 0.02).abs() < 1e-9);

        prefs.target_fps = 1000;
        assert!((prefs.frame_interval().as_secs_f64() - 1.0 / 240.0).abs() < 1e-9);
    }
}
