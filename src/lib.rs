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

//! Taglog is a tag-first, leveled logging facade configured from a YAML file.
//!
//! # Overview
//!
//! [`init`] reads a two-section YAML document, prepares the log directory and
//! files, and installs a process-wide logger with two complementary sinks:
//! records at info severity and below go to the normal log, records at warn
//! severity and above go to the warning log. Every record is also written to
//! stdout. File sinks rotate by size and retain a bounded, optionally
//! gzipped, set of backups.
//!
//! Each entry point takes a tag (a free-form string categorizing the event,
//! see [`tags`]) plus either typed fields or alternating key/value pairs:
//!
//! ```no_run
//! use taglog::Field;
//! use taglog::tags;
//!
//! taglog::init("conf/taglog.yaml").expect("logging must initialize");
//!
//! taglog::info(tags::HTTP_REQUEST_IN, &[Field::str("path", "/healthz")]);
//! taglog::infow("cache_warmup", &["keys".into(), 128.into()]);
//! ```
//!
//! Components that prefer an injected handle over ambient global state can
//! hold a [`Logger`] and call the same methods on it; the free functions are
//! the zero-argument convenience path and are no-ops before [`init`]
//! completes (except [`panic`] and [`fatal`], which always abort).

pub mod append;
pub mod config;
pub mod tags;

mod bridge;
mod encoder;
mod error;
mod filter;
mod kv;
mod level;
mod logger;
mod record;

pub use config::Config;
pub use encoder::Encoder;
pub use error::InitError;
pub use filter::LevelBand;
pub use kv::Field;
pub use kv::Value;
pub use level::Level;
pub use logger::Dispatch;
pub use logger::Logger;
pub use logger::global;
pub use logger::init;
pub use record::Caller;
pub use record::Record;

/// Logs `tag` with typed `fields` at debug severity.
#[track_caller]
pub fn debug(tag: &str, fields: &[Field]) {
    if let Some(logger) = logger::global() {
        logger.debug(tag, fields);
    }
}

/// Logs `tag` with typed `fields` at info severity.
#[track_caller]
pub fn info(tag: &str, fields: &[Field]) {
    if let Some(logger) = logger::global() {
        logger.info(tag, fields);
    }
}

/// Logs `tag` with typed `fields` at warn severity.
#[track_caller]
pub fn warn(tag: &str, fields: &[Field]) {
    if let Some(logger) = logger::global() {
        logger.warn(tag, fields);
    }
}

/// Logs `tag` at panic severity, then unwinds the calling operation.
#[track_caller]
pub fn panic(tag: &str, fields: &[Field]) -> ! {
    match logger::global() {
        Some(logger) => logger.panic(tag, fields),
        None => panic!("{tag}"),
    }
}

/// Logs `tag` at fatal severity, then terminates the process.
#[track_caller]
pub fn fatal(tag: &str, fields: &[Field]) -> ! {
    match logger::global() {
        Some(logger) => logger.fatal(tag, fields),
        None => std::process::exit(1),
    }
}

/// Logs `tag` with alternating key/value `pairs` at debug severity.
#[track_caller]
pub fn debugw(tag: &str, pairs: &[Value]) {
    if let Some(logger) = logger::global() {
        logger.debugw(tag, pairs);
    }
}

/// Logs `tag` with alternating key/value `pairs` at info severity.
#[track_caller]
pub fn infow(tag: &str, pairs: &[Value]) {
    if let Some(logger) = logger::global() {
        logger.infow(tag, pairs);
    }
}

/// Logs `tag` with alternating key/value `pairs` at warn severity.
#[track_caller]
pub fn warnw(tag: &str, pairs: &[Value]) {
    if let Some(logger) = logger::global() {
        logger.warnw(tag, pairs);
    }
}

/// Logs `tag` at panic severity, then unwinds the calling operation.
#[track_caller]
pub fn panicw(tag: &str, pairs: &[Value]) -> ! {
    match logger::global() {
        Some(logger) => logger.panicw(tag, pairs),
        None => panic!("{tag}"),
    }
}

/// Logs `tag` at fatal severity, then terminates the process.
#[track_caller]
pub fn fatalw(tag: &str, pairs: &[Value]) -> ! {
    match logger::global() {
        Some(logger) => logger.fatalw(tag, pairs),
        None => std::process::exit(1),
    }
}
