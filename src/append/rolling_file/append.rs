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

use std::io::Write;
use std::sync::Mutex;
use std::sync::PoisonError;

use crate::append::Append;
use crate::append::rolling_file::RollingWriter;
use crate::encoder::Encoder;
use crate::record::Record;

/// An appender that writes records to a rotating file.
///
/// Writes from concurrent callers are serialized by the interior mutex.
#[derive(Debug)]
pub struct RollingFile {
    encoder: Encoder,
    writer: Mutex<RollingWriter>,
}

impl RollingFile {
    pub fn new(writer: RollingWriter, encoder: Encoder) -> Self {
        Self {
            encoder,
            writer: Mutex::new(writer),
        }
    }
}

impl Append for RollingFile {
    fn append(&self, record: &Record) -> anyhow::Result<()> {
        let mut bytes = self.encoder.encode(record)?;
        bytes.push(b'\n');
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        writer.write_all(&bytes)?;
        Ok(())
    }

    fn flush(&self) {
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        let _ = writer.flush();
    }
}
