#![allow(non_shorthand_field_patterns)]
#![doc = "Error handling primitives shared across the zoorofile crate."]
// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! The derive emitted by [`masterror::Error`] expands pattern matches that
//! trigger the `non_shorthand_field_patterns` lint. The lint is disabled for
//! the module to keep the generated implementations warning-free.

use std::path::{Path, PathBuf};

/// Unified error type returned by every stage of the README pipeline.
///
/// Remote failures are modelled as [`Error::RemoteQuery`] values so callers can
/// keep them as data and degrade the rendered output. [`Error::MissingAsset`]
/// and [`Error::UnknownMood`] are fatal for a run.
#[derive(Debug, masterror::Error)]
pub enum Error {
    /// Wraps I/O errors that occur while reading configuration files.
    #[error("failed to read configuration from {path:?}: {source}")]
    Io {
        /// Location of the configuration file.
        path:   PathBuf,
        /// Underlying I/O error.
        source: std::io::Error
    },
    /// Wraps YAML decoding errors.
    #[error("failed to parse configuration: {source}")]
    Parse {
        /// Source decoding error from serde_yaml.
        source: serde_yaml::Error
    },
    /// Wraps JSON decoding errors for configuration and remote payloads.
    #[error("failed to decode JSON: {source}")]
    Json {
        /// Source decoding error from serde_json.
        source: serde_json::Error
    },
    /// Returned when the configuration violates invariants.
    #[error("invalid configuration: {message}")]
    Validation {
        /// Human readable message describing the validation problem.
        message: String
    },
    /// The GitHub API reported an application error or the transport failed.
    #[error("remote query failed: {message}")]
    RemoteQuery {
        /// Message reported by GitHub or the HTTP layer.
        message: String
    },
    /// The pet image for the resolved animal and mood does not exist.
    #[error("pet image not found at {path:?}; check the assets directory")]
    MissingAsset {
        /// Expected location of the image.
        path: PathBuf
    },
    /// A mood name outside the supported set was supplied.
    #[error("unknown mood '{name}'")]
    UnknownMood {
        /// The rejected mood name.
        name: String
    },
    /// Wraps I/O errors that occur while reading or writing the README.
    #[error("failed to access README at {path:?}: {source}")]
    ReadmeIo {
        /// Location of the README document.
        path:   PathBuf,
        /// Underlying I/O error reported by the operating system.
        source: std::io::Error
    }
}

impl Error {
    /// Constructs a validation error from the provided displayable value.
    ///
    /// # Parameters
    ///
    /// * `message` - Human-readable description of the validation failure.
    pub fn validation<M>(message: M) -> Self
    where
        M: Into<String>
    {
        Self::Validation {
            message: message.into()
        }
    }

    /// Constructs a remote query error from the provided displayable value.
    ///
    /// # Parameters
    ///
    /// * `message` - Description reported by the remote API or transport.
    pub fn remote_query<M>(message: M) -> Self
    where
        M: Into<String>
    {
        Self::RemoteQuery {
            message: message.into()
        }
    }

    /// Formats the error for diagnostics without the variant name.
    ///
    /// The returned string matches the [`std::fmt::Display`] implementation.
    pub fn to_display_string(&self) -> String {
        format!("{self}")
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(source: serde_yaml::Error) -> Self {
        Self::Parse {
            source
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(source: serde_json::Error) -> Self {
        Self::Json {
            source
        }
    }
}

impl From<octocrab::Error> for Error {
    fn from(error: octocrab::Error) -> Self {
        Self::RemoteQuery {
            message: error.to_string()
        }
    }
}

/// Creates an [`Error::Io`] variant capturing the failing path and source.
///
/// # Parameters
///
/// * `path` - Location of the configuration file that triggered the error.
/// * `source` - I/O error reported by the operating system.
pub fn io_error(path: &Path, source: std::io::Error) -> Error {
    Error::Io {
        path: path.to_path_buf(),
        source
    }
}

/// Creates an [`Error::ReadmeIo`] variant capturing the failing path and
/// source.
pub fn readme_io_error(path: &Path, source: std::io::Error) -> Error {
    Error::ReadmeIo {
        path: path.to_path_buf(),
        source
    }
}
