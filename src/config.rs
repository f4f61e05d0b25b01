//! Application-wide constants and persisted viewer preferences.

use serde::{Deserialize, Serialize};

use crate::prelude::*;

pub const NAME: &str = concat!("Webtoon Viewer ", env!("CARGO_PKG_VERSION"));
/// Default window width.
pub const WIN_WIDTH: u32 = 500;
/// Default window height.
pub const WIN_HEIGHT: u32 = 800;
/// Width of the overview strip on the right edge.
pub const OVERVIEW_WIDTH: f32 = 100.0;
/// Full height of the top menu and the hover strip that reveals it.
pub const TOP_MENU_HEIGHT: f32 = 110.0;
pub const TOP_MENU_AREA: f32 = 30.0;
pub const BOTTOM_MENU_HEIGHT: f32 = 80.0;
pub const ROUND_BUTTON_RADIUS: f32 = 28.0;
/// Points per frame a menu slides while hinting and while open.
pub const MENU_AREA_STEP: f32 = 2.0;
pub const MENU_ACTIVE_STEP: f32 = 5.0;
/// egui scroll points in one wheel notch.
pub const WHEEL_POINTS_PER_NOTCH: f32 = 40.0;
pub const LOG_TIMEOUT: u64 = 2;
pub const CONFIG_FILE_NAME: &str = ".wtv_config.toml";

/// Transition between pages. Only stored for now; scrolling is the only effect drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Effect {
    Fadein,
    #[default]
    Scroll,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub directory: Option<PathBuf>,
    pub width: u32,
    pub height: u32,
    pub sort: SortType,
    pub effect: Effect,
    pub fit_mode: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            directory: None,
            width: WIN_WIDTH,
            height: WIN_HEIGHT,
            sort: SortType::default(),
            effect: Effect::default(),
            fit_mode: true,
        }
    }
}

/// Where preferences live between runs.
pub trait PreferenceStore {
    /// Missing storage yields the defaults.
    fn load(&self) -> Result<Preferences, AppError>;
    fn save(&self, prefs: &Preferences) -> Result<(), AppError>;
}

pub struct TomlPreferenceStore {
    path: PathBuf,
}

impl TomlPreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `$HOME/.wtv_config.toml`, or under `%USERPROFILE%` on Windows.
    pub fn in_home() -> Self {
        let var = if cfg!(windows) { "USERPROFILE" } else { "HOME" };
        let home = std::env::var_os(var).map(PathBuf::from).unwrap_or_default();
        Self::new(home.join(CONFIG_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PreferenceStore for TomlPreferenceStore {
    fn load(&self) -> Result<Preferences, AppError> {
        if !self.path.exists() {
            log::debug!("No preferences at {}, using defaults", self.path.display());
            return Ok(Preferences::default());
        }
        let data = std::fs::read_to_string(&self.path)?;
        Ok(toml::from_str(&data)?)
    }

    fn save(&self, prefs: &Preferences) -> Result<(), AppError> {
        let contents = toml::to_string_pretty(prefs)?;
        std::fs::write(&self.path, contents)?;
        log::debug!("Saved preferences to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = TomlPreferenceStore::new(dir.path().join(CONFIG_FILE_NAME));
        assert_eq!(store.load().unwrap(), Preferences::default());
    }

    #[test]
    fn preferences_survive_a_save() {
        let dir = tempfile::tempdir().unwrap();
        let store = TomlPreferenceStore::new(dir.path().join(CONFIG_FILE_NAME));
        let prefs = Preferences {
            directory: Some(dir.path().join("series")),
            width: 640,
            height: 960,
            sort: SortType::ModTimeDesc,
            effect: Effect::Fadein,
            fit_mode: false,
        };
        store.save(&prefs).unwrap();
        assert_eq!(store.load().unwrap(), prefs);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "width = 720\n").unwrap();
        let prefs = TomlPreferenceStore::new(path).load().unwrap();
        assert_eq!(prefs.width, 720);
        assert_eq!(prefs.height, WIN_HEIGHT);
        assert!(prefs.fit_mode);
    }

    #[test]
    fn garbage_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "width = \"wide\"").unwrap();
        assert!(matches!(
            TomlPreferenceStore::new(path).load(),
            Err(AppError::ReadPreferences(_))
        ));
    }
}
