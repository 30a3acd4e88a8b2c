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

use std::fs;
use std::fs::File;
use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use anyhow::Context;
use jiff::SignedDuration;
use jiff::Timestamp;
use jiff::civil::DateTime;
use jiff::tz::TimeZone;

const DEFAULT_MAX_SIZE: u64 = 100 * 1024 * 1024;

// Backup timestamps are UTC at nanosecond precision so rapid successive
// rotations cannot collide on rename.
const BACKUP_TIME_FORMAT: &str = "%Y-%m-%dT%H-%M-%S%.9f";

/// A writer that rotates its target file once it grows past a size limit.
///
/// The file opens lazily on the first write; construction performs no I/O.
/// On rotation the current file is renamed to `<stem>-<timestamp>.<ext>`,
/// optionally gzipped, and backups beyond the retention limits are removed.
#[derive(Debug)]
pub struct RollingWriter {
    path: PathBuf,
    max_size: u64,
    max_backups: usize,
    max_age_days: u64,
    compress: bool,
    file: Option<File>,
    written: u64,
}

impl RollingWriter {
    /// Creates a new [`RollingWriterBuilder`].
    #[must_use]
    pub fn builder() -> RollingWriterBuilder {
        RollingWriterBuilder::new()
    }

    fn open_current(&mut self) -> io::Result<()> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }
        let file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)?;
        self.written = file.metadata()?.len();
        self.file = Some(file);
        Ok(())
    }

    fn rotate(&mut self) -> io::Result<()> {
        if let Some(mut file) = self.file.take() {
            if let Err(err) = file.flush() {
                eprintln!("failed to flush log file before rotation: {err}");
            }
        }

        let now = Timestamp::now();
        let backup = self.backup_path(now);
        fs::rename(&self.path, &backup)?;

        if self.compress {
            if let Err(err) = compress_backup(&backup) {
                eprintln!(
                    "failed to compress rotated log {}: {err}",
                    backup.display()
                );
            }
        }
        if let Err(err) = self.prune(now) {
            eprintln!("failed to prune rotated logs: {err:#}");
        }

        let file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)?;
        self.written = 0;
        self.file = Some(file);
        Ok(())
    }

    fn backup_path(&self, now: Timestamp) -> PathBuf {
        let ts = now
            .to_zoned(TimeZone::UTC)
            .strftime(BACKUP_TIME_FORMAT)
            .to_string();
        let (stem, ext) = split_name(&self.path);
        let name = match ext {
            Some(ext) => format!("{stem}-{ts}.{ext}"),
            None => format!("{stem}-{ts}"),
        };
        self.path.with_file_name(name)
    }

    /// Removes backups beyond `max_backups` and backups older than
    /// `max_age_days`, newest-first wins.
    fn prune(&self, now: Timestamp) -> anyhow::Result<()> {
        if self.max_backups == 0 && self.max_age_days == 0 {
            return Ok(());
        }

        let dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        let (stem, ext) = split_name(&self.path);

        let mut backups = Vec::new();
        let read_dir = fs::read_dir(dir)
            .with_context(|| format!("failed to read log dir {}", dir.display()))?;
        for entry in read_dir {
            let entry = entry?;
            let Ok(file_type) = entry.file_type() else {
                continue;
            };
            if !file_type.is_file() {
                continue;
            }
            let filename = entry.file_name();
            let Some(filename) = filename.to_str() else {
                continue;
            };
            let Some(rotated_at) = parse_backup_time(filename, &stem, ext.as_deref()) else {
                continue;
            };
            backups.push((rotated_at, entry.path()));
        }

        // Newest first; the retention limit keeps the most recent backups.
        backups.sort_by(|a, b| b.0.cmp(&a.0));

        let mut stale = Vec::new();
        if self.max_backups > 0 && backups.len() > self.max_backups {
            stale.extend(
                backups
                    .split_off(self.max_backups)
                    .into_iter()
                    .map(|(_, path)| path),
            );
        }
        if self.max_age_days > 0 {
            let cutoff = now - SignedDuration::from_hours(self.max_age_days as i64 * 24);
            while let Some((rotated_at, _)) = backups.last() {
                if *rotated_at >= cutoff {
                    break;
                }
                if let Some((_, path)) = backups.pop() {
                    stale.push(path);
                }
            }
        }

        for path in stale {
            fs::remove_file(&path)
                .with_context(|| format!("failed to remove old log file {}", path.display()))?;
        }
        Ok(())
    }
}

impl Write for RollingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let incoming = buf.len() as u64;
        if incoming > self.max_size {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "write of {incoming} bytes exceeds the {max} byte file size limit",
                    max = self.max_size
                ),
            ));
        }

        if self.file.is_none() {
            self.open_current()?;
        }
        if self.written + incoming > self.max_size {
            self.rotate()?;
        }

        let file = match self.file.as_mut() {
            Some(file) => file,
            None => return Err(io::Error::other("log file is not open")),
        };
        let n = file.write(buf)?;
        self.written += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.file.as_mut() {
            Some(file) => file.flush(),
            None => Ok(()),
        }
    }
}

/// A builder for configuring [`RollingWriter`]. All limits follow the
/// config semantics: zero means "use the default" for the size limit and
/// "unbounded" for the retention limits.
#[derive(Debug, Default)]
pub struct RollingWriterBuilder {
    max_size: u64,
    max_backups: usize,
    max_age_days: u64,
    compress: bool,
}

impl RollingWriterBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum size of the live file in bytes.
    #[must_use]
    pub fn max_file_size(mut self, n: u64) -> Self {
        self.max_size = n;
        self
    }

    /// Sets the number of rotated files retained.
    #[must_use]
    pub fn max_backups(mut self, n: usize) -> Self {
        self.max_backups = n;
        self
    }

    /// Sets the number of days before a rotated file is purged.
    #[must_use]
    pub fn max_age_days(mut self, n: u64) -> Self {
        self.max_age_days = n;
        self
    }

    /// Gzips rotated files.
    #[must_use]
    pub fn compress(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    /// Builds the [`RollingWriter`] targeting `path`. No file is opened
    /// until the first write.
    pub fn build(self, path: impl Into<PathBuf>) -> RollingWriter {
        RollingWriter {
            path: path.into(),
            max_size: if self.max_size == 0 {
                DEFAULT_MAX_SIZE
            } else {
                self.max_size
            },
            max_backups: self.max_backups,
            max_age_days: self.max_age_days,
            compress: self.compress,
            file: None,
            written: 0,
        }
    }
}

fn split_name(path: &Path) -> (String, Option<String>) {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = path.extension().map(|s| s.to_string_lossy().into_owned());
    (stem, ext)
}

fn parse_backup_time(filename: &str, stem: &str, ext: Option<&str>) -> Option<Timestamp> {
    let rest = filename.strip_prefix(stem)?.strip_prefix('-')?;
    let rest = rest.strip_suffix(".gz").unwrap_or(rest);
    let rest = match ext {
        Some(ext) => rest.strip_suffix(ext)?.strip_suffix('.')?,
        None => rest,
    };
    let rotated_at = DateTime::strptime(BACKUP_TIME_FORMAT, rest).ok()?;
    rotated_at
        .to_zoned(TimeZone::UTC)
        .ok()
        .map(|zoned| zoned.timestamp())
}

fn compress_backup(path: &Path) -> io::Result<()> {
    let mut src = File::open(path)?;
    let mut gz_path = path.as_os_str().to_owned();
    gz_path.push(".gz");
    let dst = File::create(PathBuf::from(gz_path))?;

    let mut encoder = flate2::write::GzEncoder::new(dst, flate2::Compression::default());
    io::copy(&mut src, &mut encoder)?;
    encoder.finish()?;

    drop(src);
    fs::remove_file(path)
}
