// Copyright 2025 Taglog Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The YAML configuration document and the filesystem preparation it implies.
//!
//! The document has two sections: `LumberConfig` drives file placement and
//! rotation, `ZapConfig` drives record encoding. An empty `Filename` or
//! `WarnFilename` means "no file output for that sink" and is not an error.

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::error::InitError;

/// The two-section configuration document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(rename = "LumberConfig", default)]
    pub rotation: RotationConfig,
    #[serde(rename = "ZapConfig", default)]
    pub encoding: EncodingConfig,
}

/// File placement and rotation settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct RotationConfig {
    /// Base directory for both log files.
    pub file_path: String,
    /// Info-and-below log filename, joined with `FilePath`.
    pub filename: String,
    /// Warn-and-above log filename, joined with `FilePath`.
    pub warn_filename: String,
    /// Megabytes per file before rotation. `0` keeps the 100 MB default.
    pub max_size: u64,
    /// Rotated files retained. `0` retains all.
    pub max_backups: usize,
    /// Days before a rotated file is purged. `0` disables age purging.
    pub max_age: u64,
    /// Gzip rotated files.
    pub compress: bool,
}

/// Record encoding settings. An empty key omits that part of the record.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct EncodingConfig {
    pub time_key: String,
    pub level_key: String,
    pub name_key: String,
    pub caller_key: String,
    pub message_key: String,
    pub stacktrace_key: String,
    /// Attached to every record as a static `service` field.
    pub service_name: String,
}

impl Config {
    /// Loads and parses the YAML document at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Config, InitError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| InitError::ReadConfig {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&raw).map_err(|source| InitError::ParseConfig {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl RotationConfig {
    fn join(&self, filename: &str) -> Option<PathBuf> {
        if filename.is_empty() {
            return None;
        }
        if self.file_path.is_empty() {
            Some(PathBuf::from(filename))
        } else {
            Some(Path::new(&self.file_path).join(filename))
        }
    }

    /// The derived path of the info-and-below log file, if one is configured.
    pub fn normal_path(&self) -> Option<PathBuf> {
        self.join(&self.filename)
    }

    /// The derived path of the warn-and-above log file, if one is configured.
    pub fn warn_path(&self) -> Option<PathBuf> {
        self.join(&self.warn_filename)
    }
}

/// Creates the base directory and touches both log files if missing.
///
/// Idempotent: existing targets are left alone, including their permission
/// modes. A directory created here gets permissive rights.
pub fn ensure_log_targets(rotation: &RotationConfig) -> Result<(), InitError> {
    if !rotation.file_path.is_empty() {
        let dir = Path::new(&rotation.file_path);
        if !dir.exists() {
            fs::create_dir_all(dir).map_err(|source| InitError::CreateDir {
                path: dir.to_path_buf(),
                source,
            })?;
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                let _ = fs::set_permissions(dir, fs::Permissions::from_mode(0o777));
            }
        }
    }

    for path in [rotation.normal_path(), rotation.warn_path()]
        .into_iter()
        .flatten()
    {
        if !path.exists() {
            fs::OpenOptions::new()
                .append(true)
                .create(true)
                .open(&path)
                .map_err(|source| InitError::CreateFile {
                    path: path.clone(),
                    source,
                })?;
        }
    }
    Ok(())
}
