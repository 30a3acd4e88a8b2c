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

//! Appenders write encoded log records to a destination.

use std::fmt;

pub mod rolling_file;
mod stdout;

pub use rolling_file::RollingFile;
pub use stdout::Stdout;

use crate::record::Record;

/// A destination for log records.
pub trait Append: fmt::Debug + Send + Sync + 'static {
    /// Writes one record.
    fn append(&self, record: &Record) -> anyhow::Result<()>;

    /// Flushes any buffered records.
    fn flush(&self) {}
}
