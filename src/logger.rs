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

use std::backtrace::Backtrace;
use std::io::Write;
use std::panic::Location;
use std::path::Path;
use std::process;
use std::sync::Mutex;
use std::sync::OnceLock;
use std::sync::PoisonError;

use crate::append::Append;
use crate::append::RollingFile;
use crate::append::Stdout;
use crate::append::rolling_file::RollingWriterBuilder;
use crate::bridge::LogBridge;
use crate::config::Config;
use crate::config::ensure_log_targets;
use crate::encoder::Encoder;
use crate::error::InitError;
use crate::filter::LevelBand;
use crate::kv::Field;
use crate::kv::Value;
use crate::kv::pair_fields;
use crate::level::Level;
use crate::record::Caller;
use crate::record::Record;

/// A level band plus the appenders receiving records inside the band.
#[derive(Debug)]
pub struct Dispatch {
    band: LevelBand,
    appends: Vec<Box<dyn Append>>,
}

impl Dispatch {
    pub fn new(band: LevelBand) -> Self {
        Self {
            band,
            appends: vec![],
        }
    }

    /// Add an [`Append`] to the dispatch.
    pub fn append(mut self, append: impl Append) -> Self {
        self.appends.push(Box::new(append));
        self
    }

    fn enabled(&self, level: Level) -> bool {
        self.band.accepts(level)
    }

    fn log(&self, record: &Record) -> anyhow::Result<()> {
        if !self.band.accepts(record.level) {
            return Ok(());
        }
        for append in &self.appends {
            append.append(record)?;
        }
        Ok(())
    }

    fn flush(&self) {
        for append in &self.appends {
            append.flush();
        }
    }
}

/// The facade logger. Immutable once built.
///
/// Each record is offered to every dispatch; a dispatch writes it only when
/// its level band accepts it. With the two bands built by
/// [`Logger::from_config`] the bands are complementary, so every record
/// lands in exactly one sink.
#[derive(Debug)]
pub struct Logger {
    dispatches: Vec<Dispatch>,
    base_fields: Vec<Field>,
    name: Option<String>,
}

impl Logger {
    pub fn new() -> Self {
        Self {
            dispatches: vec![],
            base_fields: vec![],
            name: None,
        }
    }

    /// Add a [`Dispatch`] to the logger.
    #[must_use]
    pub fn dispatch(mut self, dispatch: Dispatch) -> Self {
        self.dispatches.push(dispatch);
        self
    }

    /// Attach a static field carried by every record.
    #[must_use]
    pub fn base_field(mut self, field: Field) -> Self {
        self.base_fields.push(field);
        self
    }

    /// Give the logger a name, emitted under the configured name key.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Builds the two-sink logger described by `config`: an info-and-below
    /// sink and a warn-and-above sink, each writing to stdout and, when a
    /// filename is configured, to a rotating file.
    pub fn from_config(config: &Config) -> Logger {
        let encoder = Encoder::from_config(&config.encoding);
        let rotation = &config.rotation;

        let file_append = |path: &Path| -> RollingFile {
            let writer = RollingWriterBuilder::new()
                .max_file_size(rotation.max_size.saturating_mul(1024 * 1024))
                .max_backups(rotation.max_backups)
                .max_age_days(rotation.max_age)
                .compress(rotation.compress)
                .build(path);
            RollingFile::new(writer, encoder.clone())
        };

        let mut info_sink =
            Dispatch::new(LevelBand::at_most(Level::Info)).append(Stdout::new(encoder.clone()));
        if let Some(path) = rotation.normal_path() {
            info_sink = info_sink.append(file_append(&path));
        }

        let mut error_sink =
            Dispatch::new(LevelBand::at_least(Level::Warn)).append(Stdout::new(encoder.clone()));
        if let Some(path) = rotation.warn_path() {
            error_sink = error_sink.append(file_append(&path));
        }

        let mut logger = Logger::new().dispatch(info_sink).dispatch(error_sink);
        if !config.encoding.service_name.is_empty() {
            logger = logger.base_field(Field::str(
                "service",
                config.encoding.service_name.clone(),
            ));
        }
        logger
    }

    pub fn enabled(&self, level: Level) -> bool {
        self.dispatches.iter().any(|d| d.enabled(level))
    }

    /// Flushes every appender.
    pub fn flush(&self) {
        for dispatch in &self.dispatches {
            dispatch.flush();
        }
    }

    pub(crate) fn write(&self, level: Level, tag: &str, fields: &[Field], caller: Option<Caller>) {
        let mut merged = Vec::with_capacity(self.base_fields.len() + fields.len());
        merged.extend_from_slice(&self.base_fields);
        merged.extend_from_slice(fields);

        let stack = (level >= Level::Panic).then(|| Backtrace::force_capture().to_string());
        let record = Record {
            level,
            tag,
            fields: &merged,
            name: self.name.as_deref(),
            caller,
            stack,
        };

        for dispatch in &self.dispatches {
            if let Err(err) = dispatch.log(&record) {
                handle_log_error(&record, err);
            }
        }
    }

    #[track_caller]
    pub fn debug(&self, tag: &str, fields: &[Field]) {
        self.write(Level::Debug, tag, fields, current_caller());
    }

    #[track_caller]
    pub fn info(&self, tag: &str, fields: &[Field]) {
        self.write(Level::Info, tag, fields, current_caller());
    }

    #[track_caller]
    pub fn warn(&self, tag: &str, fields: &[Field]) {
        self.write(Level::Warn, tag, fields, current_caller());
    }

    /// Logs at panic severity, flushes, then unwinds with the tag as the
    /// panic message. Only call when aborting the operation is the intent.
    #[track_caller]
    pub fn panic(&self, tag: &str, fields: &[Field]) -> ! {
        self.write(Level::Panic, tag, fields, current_caller());
        self.flush();
        panic!("{tag}");
    }

    /// Logs at fatal severity, flushes, then terminates the process.
    #[track_caller]
    pub fn fatal(&self, tag: &str, fields: &[Field]) -> ! {
        self.write(Level::Fatal, tag, fields, current_caller());
        self.flush();
        process::exit(1);
    }

    #[track_caller]
    pub fn debugw(&self, tag: &str, pairs: &[Value]) {
        self.write(Level::Debug, tag, &pair_fields(pairs), current_caller());
    }

    #[track_caller]
    pub fn infow(&self, tag: &str, pairs: &[Value]) {
        self.write(Level::Info, tag, &pair_fields(pairs), current_caller());
    }

    #[track_caller]
    pub fn warnw(&self, tag: &str, pairs: &[Value]) {
        self.write(Level::Warn, tag, &pair_fields(pairs), current_caller());
    }

    #[track_caller]
    pub fn panicw(&self, tag: &str, pairs: &[Value]) -> ! {
        self.write(Level::Panic, tag, &pair_fields(pairs), current_caller());
        self.flush();
        panic!("{tag}");
    }

    #[track_caller]
    pub fn fatalw(&self, tag: &str, pairs: &[Value]) -> ! {
        self.write(Level::Fatal, tag, &pair_fields(pairs), current_caller());
        self.flush();
        process::exit(1);
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

#[track_caller]
fn current_caller() -> Option<Caller> {
    Some(Caller::from_location(Location::caller()))
}

/// Logging must never fail back into business logic; a failing appender is
/// reported on stderr and the record is dropped for that dispatch.
fn handle_log_error(record: &Record, error: anyhow::Error) {
    let _ = writeln!(
        std::io::stderr(),
        "failed to append log record (tag: {tag}): {error:#}",
        tag = record.tag,
    );
}

static GLOBAL: OnceLock<Logger> = OnceLock::new();
static INIT: Mutex<()> = Mutex::new(());

/// Initializes the process-wide logger from the YAML document at `path`.
///
/// The first successful call loads the configuration, creates the log
/// directory and files, builds the sinks, and publishes the singleton;
/// subsequent calls are no-ops returning `Ok`. Concurrent first calls are
/// serialized, so exactly one caller performs the setup.
///
/// Records emitted through the `log` macros are routed into the same sinks,
/// unless the host application has already installed another `log` logger.
pub fn init(path: impl AsRef<Path>) -> Result<(), InitError> {
    let _guard = INIT.lock().unwrap_or_else(PoisonError::into_inner);
    if GLOBAL.get().is_some() {
        return Ok(());
    }

    let config = Config::load(path)?;
    ensure_log_targets(&config.rotation)?;
    let logger = Logger::from_config(&config);

    if log::set_boxed_logger(Box::new(LogBridge)).is_ok() {
        log::set_max_level(log::LevelFilter::Trace);
    }

    let _ = GLOBAL.set(logger);
    Ok(())
}

/// The global logger, if [`init`] has completed.
pub fn global() -> Option<&'static Logger> {
    GLOBAL.get()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::Mutex;

    use super::Dispatch;
    use super::Logger;
    use crate::append::Append;
    use crate::config::Config;
    use crate::config::RotationConfig;
    use crate::filter::LevelBand;
    use crate::kv::Field;
    use crate::level::Level;
    use crate::record::Record;

    #[derive(Debug, Clone, Default)]
    struct Capture {
        lines: Arc<Mutex<Vec<String>>>,
    }

    impl Capture {
        fn tags(&self) -> Vec<String> {
            self.lines.lock().unwrap().clone()
        }
    }

    impl Append for Capture {
        fn append(&self, record: &Record) -> anyhow::Result<()> {
            self.lines
                .lock()
                .unwrap()
                .push(format!("{}:{}", record.level, record.tag));
            Ok(())
        }
    }

    fn two_sink_logger() -> (Logger, Capture, Capture) {
        let normal = Capture::default();
        let warning = Capture::default();
        let logger = Logger::new()
            .dispatch(Dispatch::new(LevelBand::at_most(Level::Info)).append(normal.clone()))
            .dispatch(Dispatch::new(LevelBand::at_least(Level::Warn)).append(warning.clone()));
        (logger, normal, warning)
    }

    #[test]
    fn test_records_route_to_exactly_one_sink() {
        let (logger, normal, warning) = two_sink_logger();

        logger.debug("d", &[]);
        logger.info("i", &[]);
        logger.warn("w", &[]);
        for level in [Level::Error, Level::Panic, Level::Fatal] {
            logger.write(level, "x", &[], None);
        }

        assert_eq!(normal.tags(), vec!["DEBUG:d", "INFO:i"]);
        assert_eq!(
            warning.tags(),
            vec!["WARN:w", "ERROR:x", "PANIC:x", "FATAL:x"]
        );
    }

    #[test]
    fn test_enabled_covers_all_levels() {
        let (logger, _, _) = two_sink_logger();
        for level in Level::ALL {
            assert!(logger.enabled(level));
        }
    }

    #[test]
    fn test_base_fields_come_first() {
        #[derive(Debug, Clone, Default)]
        struct KeyOrder {
            keys: Arc<Mutex<Vec<String>>>,
        }

        impl Append for KeyOrder {
            fn append(&self, record: &Record) -> anyhow::Result<()> {
                let mut keys = self.keys.lock().unwrap();
                keys.extend(record.fields.iter().map(|f| f.key.to_string()));
                Ok(())
            }
        }

        let capture = KeyOrder::default();
        let logger = Logger::new()
            .base_field(Field::str("service", "checkout"))
            .dispatch(Dispatch::new(LevelBand::at_most(Level::Fatal)).append(capture.clone()));

        logger.info("t", &[Field::int("code", 1)]);
        assert_eq!(*capture.keys.lock().unwrap(), vec!["service", "code"]);
    }

    #[test]
    fn test_from_config_skips_file_sink_for_empty_filename() {
        let dir = tempfile::tempdir().unwrap();
        let yaml = format!(
            r#"
LumberConfig:
  FilePath: {base}
  Filename: ""
  WarnFilename: w.log
ZapConfig:
  MessageKey: tag
"#,
            base = dir.path().display()
        );
        let config: Config = serde_yaml::from_str(&yaml).unwrap();
        let logger = Logger::from_config(&config);

        logger.info("stdout_only", &[]);
        logger.warn("to_warn_file", &[]);
        logger.flush();

        // The info sink has no file target, so only the warn file appears.
        let names: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, vec!["w.log"]);

        let warn_log = std::fs::read_to_string(dir.path().join("w.log")).unwrap();
        assert!(warn_log.contains("to_warn_file"));
        assert!(!warn_log.contains("stdout_only"));
    }

    #[test]
    fn test_from_config_tolerates_huge_max_size() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            rotation: RotationConfig {
                file_path: dir.path().to_string_lossy().into_owned(),
                filename: "n.log".to_string(),
                max_size: u64::MAX,
                ..Default::default()
            },
            ..Default::default()
        };

        let logger = Logger::from_config(&config);
        logger.info("fits", &[]);
        logger.flush();

        assert!(dir.path().join("n.log").is_file());
    }

    #[test]
    fn test_sugar_and_structured_agree() {
        #[derive(Debug, Clone, Default)]
        struct Fields {
            fields: Arc<Mutex<Vec<Field>>>,
        }

        impl Append for Fields {
            fn append(&self, record: &Record) -> anyhow::Result<()> {
                self.fields.lock().unwrap().extend_from_slice(record.fields);
                Ok(())
            }
        }

        let capture = Fields::default();
        let logger = Logger::new()
            .dispatch(Dispatch::new(LevelBand::at_most(Level::Fatal)).append(capture.clone()));

        logger.info("t", &[Field::str("msg", "hello")]);
        logger.infow("t", &["msg".into(), "hello".into()]);

        let fields = capture.fields.lock().unwrap();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0], fields[1]);
    }
}
