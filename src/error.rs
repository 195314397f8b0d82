//! Error types for the codec boundary, settings, and the command line.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors while reading or decoding an input image.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be read.
    #[error("could not load {}: {source}", .path.display())]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The bytes are not a decodable image (bad header, truncated data).
    #[error("decompressing image failed: {0}")]
    Decode(String),
}

/// Errors while encoding or writing an output image.
#[derive(Debug, Error)]
pub enum SaveError {
    /// Encoder setup or compression failed.
    #[error("failed to compress the image: {0}")]
    Encode(String),

    /// The encoded bytes could not be written.
    #[error("could not write {}: {source}", .path.display())]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

/// Errors while reading or writing a settings file.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The file could not be read or written.
    #[error("settings file {}: {source}", .path.display())]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The file is not valid settings JSON.
    #[error("invalid settings: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Any failure of the load, process, save pipeline.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Save(#[from] SaveError),

    #[error(transparent)]
    Settings(#[from] SettingsError),
}

impl Error {
    /// Process exit status for this failure kind
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Load(_) => 2,
            Self::Save(_) => 3,
            Self::Settings(_) => 4,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
