//! Persistent user settings.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::APP_NAME;
use crate::settings::Levels;

pub const SETTINGS_FORMAT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SettingsFile {
    pub format_version: u32,
    pub music_volume: f32,
    pub effect_volume: f32,
    pub window_scale: f32,
}

impl SettingsFile {
    pub fn from_levels(levels: Levels) -> Self {
        Self {
            format_version: SETTINGS_FORMAT_VERSION,
            music_volume: levels.music_volume,
            effect_volume: levels.effect_volume,
            window_scale: levels.window_scale,
        }
    }

    pub fn levels(&self) -> Levels {
        Levels {
            music_volume: self.music_volume,
            effect_volume: self.effect_volume,
            window_scale: self.window_scale,
        }
        .clamped()
    }

    pub fn get_default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", APP_NAME).map(|proj_dirs| {
            let mut path = proj_dirs.data_dir().to_path_buf();
            path.push("settings.json");
            path
        })
    }

    pub fn write_atomic(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(self).map_err(io::Error::other)?;
        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, path)?;
        Ok(())
    }

    pub fn load(path: &Path) -> io::Result<Self> {
        let content = fs::read_to_string(path)?;
        let settings: Self = serde_json::from_str(&content)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        if settings.format_version != SETTINGS_FORMAT_VERSION {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("unsupported settings format {}", settings.format_version),
            ));
        }
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn settings_file_atomic_write_and_load() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("settings.json");
        let settings = SettingsFile::from_levels(Levels {
            music_volume: 0.3,
            effect_volume: 0.02,
            window_scale: 2.0,
        });

        settings.write_atomic(&path).expect("write");
        let loaded = SettingsFile::load(&path).expect("load");
        assert_eq!(settings, loaded);
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn future_format_is_rejected() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("settings.json");
        fs::write(
            &path,
            r#"{"format_version":9,"music_volume":0.5,"effect_volume":0.01,"window_scale":1.0}"#,
        )
        .expect("write");
        let err = SettingsFile::load(&path).expect_err("version 9 is unknown");
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn out_of_range_levels_are_clamped_on_read() {
        let file = SettingsFile {
            format_version: SETTINGS_FORMAT_VERSION,
            music_volume: 4.0,
            effect_volume: -1.0,
            window_scale: 0.0,
        };
        let levels = file.levels();
        assert_eq!(
            (levels.music_volume, levels.effect_volume, levels.window_scale),
            (1.0, 0.0, 1.0)
        );
    }
}
