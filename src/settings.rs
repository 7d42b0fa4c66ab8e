use crate::config::{DisplayConfig, GlobeConfig};
use crate::error::SettingsError;
use crate::scene::{Palette, Rgb};
use log::warn;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub globe: GlobeConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub palette: PaletteSettings,
}

/// Optional `#rrggbb` overrides for the scene palette
#[derive(Debug, Default, Deserialize)]
pub struct PaletteSettings {
    pub base: Option<String>,
    pub highlight: Option<String>,
    pub glow: Option<String>,
    pub connections: Option<String>,
    pub points: Option<String>,
}

impl PaletteSettings {
    /// Apply the overrides on top of the default palette. Unparsable colors
    /// are logged and skipped.
    pub fn resolve(&self) -> Palette {
        let mut palette = Palette::default();
        let slots: [(&str, &Option<String>, &mut Rgb); 5] = [
            ("base", &self.base, &mut palette.base),
            ("highlight", &self.highlight, &mut palette.highlight),
            ("glow", &self.glow, &mut palette.glow),
            ("connections", &self.connections, &mut palette.connections),
            ("points", &self.points, &mut palette.points),
        ];
        for (name, value, slot) in slots {
            if let Some(hex) = value {
                match Rgb::from_hex(hex) {
                    Some(rgb) => *slot = rgb,
                    None => warn!("ignoring palette.{}: {:?} is not #rrggbb", name, hex),
                }
            }
        }
        palette
    }
}

impl Settings {
    /// Load from the default location, falling back to defaults on any
    /// problem.
    pub fn load() -> Self {
        let path = Self::config_path();
        if !path.exists() {
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                warn!("{}; using default settings", e);
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let content = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content, path)
    }

    fn parse(content: &str, path: &Path) -> Result<Self, SettingsError> {
        toml::from_str(content).map_err(|source| SettingsError::ParseToml {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("netglobe")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_file_keeps_defaults() {
        let settings = Settings::parse("[globe]\nnode_count = 12\n", Path::new("test.toml")).unwrap();
        assert_eq!(settings.globe.node_count, 12);
        assert_eq!(settings.globe.arc_count, GlobeConfig::default().arc_count);
        assert_eq!(settings.display, DisplayConfig::default());
    }

    #[test]
    fn empty_file_is_all_defaults() {
        let settings = Settings::parse("", Path::new("test.toml")).unwrap();
        assert_eq!(settings.globe, GlobeConfig::default());
    }

    #[test]
    fn bad_toml_reports_path() {
        let err = Settings::parse("[globe\n", Path::new("broken.toml")).unwrap_err();
        assert!(matches!(err, SettingsError::ParseToml { .. }));
        assert!(err.to_string().contains("broken.toml"));
    }

    #[test]
    fn load_from_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[display]\ntilt = -10.0\ncolor_scheme = 3").unwrap();
        let settings = Settings::load_from(file.path()).unwrap();
        assert_eq!(settings.display.color_scheme, 3);
        assert!((settings.display.tilt + 10.0).abs() < f32::EPSILON);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Settings::load_from(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, SettingsError::Io { .. }));
    }

    #[test]
    fn palette_overrides_skip_invalid() {
        let palette = PaletteSettings {
            connections: Some("#00ff00".into()),
            points: Some("green".into()),
            ..PaletteSettings::default()
        };
        let resolved = palette.resolve();
        assert_eq!(resolved.connections, Rgb::new(0, 255, 0));
        assert_eq!(resolved.points, Palette::default().points);
    }
}
