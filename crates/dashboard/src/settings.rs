// crates/dashboard/src/settings.rs
//! Persisted client-side settings.
//!
//! String-keyed, local to this client, not synchronized — with one
//! exception: the silence flag is also echoed over the wire when toggled,
//! so every dashboard agrees on mute state (last message wins).

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("reading settings {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("writing settings {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed settings {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("no user config directory available")]
    NoConfigDir,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

/// How a device tile renders its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayStyle {
    #[default]
    Digital,
    Analog,
    Bar,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub theme: Theme,
    /// Global alarm mute. Synced over the wire on change.
    pub silence: bool,
    /// One-time PIN gate passed (control page access).
    pub gate_unlocked: bool,
    /// Per-device display style choice.
    pub device_styles: HashMap<String, DisplayStyle>,
    #[serde(skip)]
    path: Option<PathBuf>,
}

impl Settings {
    /// Load settings from `path`. A missing file yields defaults bound to
    /// that path; a malformed file is an error (never silently clobbered).
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, SettingsError> {
        let path = path.into();
        match std::fs::read_to_string(&path) {
            Ok(contents) => {
                let mut settings: Settings = serde_json::from_str(&contents).map_err(|source| {
                    SettingsError::Malformed {
                        path: path.clone(),
                        source,
                    }
                })?;
                settings.path = Some(path);
                Ok(settings)
            }
            Err(source) if source.kind() == io::ErrorKind::NotFound => Ok(Self {
                path: Some(path),
                ..Self::default()
            }),
            Err(source) => Err(SettingsError::Read { path, source }),
        }
    }

    /// The conventional location: `<config dir>/helmview/settings.json`.
    pub fn default_path() -> Result<PathBuf, SettingsError> {
        dirs::config_dir()
            .map(|dir| dir.join("helmview").join("settings.json"))
            .ok_or(SettingsError::NoConfigDir)
    }

    /// Write settings back to the file they were loaded from. In-memory
    /// settings (no path, used in tests) save as a no-op.
    pub fn save(&self) -> Result<(), SettingsError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| SettingsError::Write {
                path: path.clone(),
                source,
            })?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|source| {
            SettingsError::Malformed {
                path: path.clone(),
                source,
            }
        })?;
        std::fs::write(path, json).map_err(|source| SettingsError::Write {
            path: path.clone(),
            source,
        })
    }

    pub fn style_for(&self, device: &str) -> DisplayStyle {
        self.device_styles.get(device).copied().unwrap_or_default()
    }

    pub fn set_style(&mut self, device: &str, style: DisplayStyle) {
        self.device_styles.insert(device.to_string(), style);
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}
