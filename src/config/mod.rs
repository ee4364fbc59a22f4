use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::ArgbColor;

const APP_DIR: &str = "holdtick";
const APP_CONFIG_FILE: &str = "config.json";

pub const DEFAULT_CHECKED_COLOR: ArgbColor = ArgbColor::from_argb(0xFF43_A047);
pub const DEFAULT_UNCHECKED_COLOR: ArgbColor = ArgbColor::from_argb(0xFF75_7575);
pub const DEFAULT_SHADOW_COLOR: ArgbColor = ArgbColor::from_argb(0x8800_0000);
pub const DEFAULT_SHADOW_RADIUS_DP: f32 = 4.0;
pub const DEFAULT_TICK_ANIMATION_MS: u64 = 200;
pub const DEFAULT_HOLD_DURATION_MS: u64 = 1000;

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing HOME environment variable")]
    MissingHomeDirectory,
    #[error("failed to read config: {path}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse config")]
    Parse(#[from] serde_json::Error),
    #[error("shadow radius must be finite and non-negative, got {0}")]
    InvalidShadowRadius(f32),
}

/// Style and behavior of one control.
#[derive(Debug, Clone, PartialEq)]
pub struct HoldTickConfig {
    pub checked_color: ArgbColor,
    pub unchecked_color: ArgbColor,
    pub shadow_color: ArgbColor,
    shadow_radius: f32,
    /// `None` follows `checked_color`.
    pub tick_color: Option<ArgbColor>,
    pub tick_animation_ms: u64,
    pub hold_duration_ms: u64,
    pub enabled: bool,
    /// Initial checked value; a view keeps it in step with the live state.
    pub checked: bool,
}

impl Default for HoldTickConfig {
    fn default() -> Self {
        Self::with_density(1.0)
    }
}

impl HoldTickConfig {
    /// Defaults with the dp-based shadow radius scaled to pixels.
    pub fn with_density(scale: f32) -> Self {
        Self {
            checked_color: DEFAULT_CHECKED_COLOR,
            unchecked_color: DEFAULT_UNCHECKED_COLOR,
            shadow_color: DEFAULT_SHADOW_COLOR,
            shadow_radius: dp_to_px(DEFAULT_SHADOW_RADIUS_DP, scale),
            tick_color: None,
            tick_animation_ms: DEFAULT_TICK_ANIMATION_MS,
            hold_duration_ms: DEFAULT_HOLD_DURATION_MS,
            enabled: true,
            checked: false,
        }
    }

    pub fn shadow_radius(&self) -> f32 {
        self.shadow_radius
    }

    /// Negative and NaN radii clamp to zero.
    pub fn set_shadow_radius(&mut self, radius: f32) {
        self.shadow_radius = if radius.is_finite() {
            radius.max(0.0)
        } else {
            0.0
        };
    }

    pub fn tick_color(&self) -> ArgbColor {
        self.tick_color.unwrap_or(self.checked_color)
    }

    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) -> ConfigResult<()> {
        if let Some(radius) = overrides.shadow_radius {
            if !radius.is_finite() || radius < 0.0 {
                return Err(ConfigError::InvalidShadowRadius(radius));
            }
            self.shadow_radius = radius;
        }
        if let Some(color) = overrides.checked_color {
            self.checked_color = color;
        }
        if let Some(color) = overrides.unchecked_color {
            self.unchecked_color = color;
        }
        if let Some(color) = overrides.shadow_color {
            self.shadow_color = color;
        }
        if let Some(color) = overrides.tick_color {
            self.tick_color = Some(color);
        }
        if let Some(duration) = overrides.tick_animation_ms {
            self.tick_animation_ms = duration;
        }
        if let Some(duration) = overrides.hold_duration_ms {
            self.hold_duration_ms = duration;
        }
        if let Some(enabled) = overrides.enabled {
            self.enabled = enabled;
        }
        if let Some(checked) = overrides.checked {
            self.checked = checked;
        }
        Ok(())
    }
}

pub fn dp_to_px(dp: f32, scale: f32) -> f32 {
    let scale = if scale.is_finite() && scale > 0.0 {
        scale
    } else {
        1.0
    };
    dp * scale
}

/// Partial overrides from `config.json`; every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigOverrides {
    #[serde(default)]
    pub checked_color: Option<ArgbColor>,
    #[serde(default)]
    pub unchecked_color: Option<ArgbColor>,
    #[serde(default)]
    pub shadow_color: Option<ArgbColor>,
    #[serde(default)]
    pub shadow_radius: Option<f32>,
    #[serde(default)]
    pub tick_color: Option<ArgbColor>,
    #[serde(default)]
    pub tick_animation_ms: Option<u64>,
    #[serde(default)]
    pub hold_duration_ms: Option<u64>,
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub checked: Option<bool>,
    #[serde(default)]
    pub density: Option<f32>,
}

impl ConfigOverrides {
    pub fn parse(serialized: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(serialized)?)
    }

    pub fn resolve(&self) -> ConfigResult<HoldTickConfig> {
        let mut config = HoldTickConfig::with_density(self.density.unwrap_or(1.0));
        config.apply_overrides(self)?;
        Ok(config)
    }
}

/// Loads `config.json`, falling back to defaults (with a warning) on any problem.
pub fn load_config() -> HoldTickConfig {
    load_config_from(&ConfigLocation::from_env()).unwrap_or_else(|err| {
        tracing::warn!(%err, "failed to load config.json; using defaults");
        HoldTickConfig::default()
    })
}

fn load_config_from(location: &ConfigLocation) -> ConfigResult<HoldTickConfig> {
    let path = location.config_file()?;
    if !path.exists() {
        tracing::debug!(?path, "no config.json; using defaults");
        return Ok(HoldTickConfig::default());
    }
    let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
        path: path.clone(),
        source,
    })?;
    let config = ConfigOverrides::parse(&contents)?.resolve()?;
    tracing::info!(?path, "loaded config.json");
    Ok(config)
}

/// Directories consulted when locating `config.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct ConfigLocation {
    xdg_config_home: Option<PathBuf>,
    home: Option<PathBuf>,
}

impl ConfigLocation {
    fn from_env() -> Self {
        Self {
            xdg_config_home: std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
            home: std::env::var_os("HOME").map(PathBuf::from),
        }
    }

    /// `$XDG_CONFIG_HOME/holdtick/config.json`, else under `$HOME/.config`.
    /// An empty `XDG_CONFIG_HOME` counts as unset.
    fn config_file(&self) -> ConfigResult<PathBuf> {
        let base = match self.xdg_config_home.as_deref() {
            Some(xdg) if !xdg.as_os_str().is_empty() => xdg.to_path_buf(),
            _ => self
                .home
                .as_deref()
                .ok_or(ConfigError::MissingHomeDirectory)?
                .join(".config"),
        };
        Ok(base.join(APP_DIR).join(APP_CONFIG_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn write_config(root: &Path, contents: &str) {
        let dir = root.join(APP_DIR);
        std::fs::create_dir_all(&dir).expect("config dir should be created");
        std::fs::write(dir.join(APP_CONFIG_FILE), contents).expect("config should be written");
    }

    #[test]
    fn defaults_match_documented_values() {
        let config = HoldTickConfig::default();

        assert_eq!(config.checked_color, ArgbColor(0xFF43_A047));
        assert_eq!(config.unchecked_color, ArgbColor(0xFF75_7575));
        assert_eq!(config.shadow_color, ArgbColor(0x8800_0000));
        assert_eq!(config.shadow_radius(), 4.0);
        assert_eq!(config.tick_color(), config.checked_color);
        assert_eq!(config.tick_animation_ms, 200);
        assert_eq!(config.hold_duration_ms, 1000);
        assert!(config.enabled);
        assert!(!config.checked);
    }

    #[test]
    fn density_scales_default_shadow_radius() {
        assert_eq!(HoldTickConfig::with_density(2.5).shadow_radius(), 10.0);
        assert_eq!(HoldTickConfig::with_density(0.0).shadow_radius(), 4.0);
    }

    #[test]
    fn tick_color_follows_checked_color_until_set() {
        let mut config = HoldTickConfig {
            checked_color: ArgbColor(0xFF00_00FF),
            ..HoldTickConfig::default()
        };
        assert_eq!(config.tick_color(), ArgbColor(0xFF00_00FF));

        config.tick_color = Some(ArgbColor(0xFFFF_FFFF));
        assert_eq!(config.tick_color(), ArgbColor(0xFFFF_FFFF));
    }

    #[test]
    fn set_shadow_radius_clamps_invalid_values() {
        let mut config = HoldTickConfig::default();
        config.set_shadow_radius(-3.0);
        assert_eq!(config.shadow_radius(), 0.0);
        config.set_shadow_radius(f32::NAN);
        assert_eq!(config.shadow_radius(), 0.0);
        config.set_shadow_radius(6.5);
        assert_eq!(config.shadow_radius(), 6.5);
    }

    #[test]
    fn overrides_replace_only_present_fields() {
        let overrides = ConfigOverrides::parse(
            r##"{ "hold_duration_ms": 1500, "tick_color": "#FFFFFFFF", "density": 2.0 }"##,
        )
        .expect("overrides should parse");
        let config = overrides.resolve().expect("overrides should resolve");

        assert_eq!(config.hold_duration_ms, 1500);
        assert_eq!(config.tick_color(), ArgbColor(0xFFFF_FFFF));
        assert_eq!(config.shadow_radius(), 8.0);
        assert_eq!(config.checked_color, DEFAULT_CHECKED_COLOR);
        assert_eq!(config.tick_animation_ms, DEFAULT_TICK_ANIMATION_MS);
    }

    #[test]
    fn negative_shadow_radius_override_is_rejected() {
        let overrides = ConfigOverrides {
            shadow_radius: Some(-1.0),
            ..ConfigOverrides::default()
        };
        let err = overrides.resolve().expect_err("negative radius must fail");
        assert!(matches!(err, ConfigError::InvalidShadowRadius(radius) if radius == -1.0));
    }

    #[test]
    fn negative_duration_fails_to_parse() {
        let err = ConfigOverrides::parse(r#"{ "hold_duration_ms": -5 }"#)
            .expect_err("negative durations are not representable");
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    fn location(xdg_config_home: Option<&Path>, home: Option<&Path>) -> ConfigLocation {
        ConfigLocation {
            xdg_config_home: xdg_config_home.map(Path::to_path_buf),
            home: home.map(Path::to_path_buf),
        }
    }

    #[test]
    fn load_config_reads_overrides_from_xdg_root() {
        let root = tempfile::tempdir().expect("tempdir should be created");
        write_config(root.path(), r##"{ "checked_color": "#FF112233", "enabled": false }"##);

        let config = load_config_from(&location(Some(root.path()), None))
            .expect("config should load from xdg root");
        assert_eq!(config.checked_color, ArgbColor(0xFF11_2233));
        assert!(!config.enabled);
    }

    #[test]
    fn load_config_defaults_when_file_missing() {
        let root = tempfile::tempdir().expect("tempdir should be created");
        let config = load_config_from(&location(None, Some(root.path())))
            .expect("missing file is not an error");
        assert_eq!(config, HoldTickConfig::default());
    }

    #[test]
    fn load_config_reports_malformed_file() {
        let root = tempfile::tempdir().expect("tempdir should be created");
        write_config(root.path(), "{ not json");

        let err = load_config_from(&location(Some(root.path()), None))
            .expect_err("malformed file must fail");
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn config_file_prefers_xdg_config_home() {
        let path = location(Some(Path::new("/tmp/config-root")), Some(Path::new("/tmp/home")))
            .config_file()
            .expect("path should resolve");

        assert_eq!(path, PathBuf::from("/tmp/config-root/holdtick/config.json"));
    }

    #[test]
    fn config_file_treats_empty_xdg_as_unset() {
        let path = location(Some(Path::new("")), Some(Path::new("/tmp/home")))
            .config_file()
            .expect("path should resolve");

        assert_eq!(path, PathBuf::from("/tmp/home/.config/holdtick/config.json"));
    }

    #[test]
    fn config_file_requires_home_without_xdg() {
        let err = ConfigLocation::default()
            .config_file()
            .expect_err("no base directory is available");
        assert!(matches!(err, ConfigError::MissingHomeDirectory));
    }
}
