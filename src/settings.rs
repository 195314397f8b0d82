use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::codec::DEFAULT_QUALITY;
use crate::convolution::ConvolutionOrder;
use crate::effects::DEFAULT_SECTORS;
use crate::error::SettingsError;

/// Tunables for one load, kaleidoscope, save run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Requested wedge count, normalized by the effect
    pub sectors: u32,
    /// Output JPEG quality in percent
    pub quality: u8,
    /// Rescale applied right after decoding
    pub load_scale_percent: i32,
    pub blur_order: ConvolutionOrder,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sectors: DEFAULT_SECTORS,
            quality: DEFAULT_QUALITY,
            load_scale_percent: 100,
            blur_order: ConvolutionOrder::Snapshot,
        }
    }
}

impl Settings {
    /// Save settings to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load settings from a JSON file; missing fields take their defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&json)?)
    }
}
