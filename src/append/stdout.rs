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

use crate::append::Append;
use crate::encoder::Encoder;
use crate::record::Record;

/// An appender that prints records to stdout.
#[derive(Debug)]
pub struct Stdout {
    encoder: Encoder,
}

impl Stdout {
    pub fn new(encoder: Encoder) -> Self {
        Self { encoder }
    }
}

impl Append for Stdout {
    fn append(&self, record: &Record) -> anyhow::Result<()> {
        let mut bytes = self.encoder.encode(record)?;
        bytes.push(b'\n');
        std::io::stdout().lock().write_all(&bytes)?;
        Ok(())
    }

    fn flush(&self) {
        let _ = std::io::stdout().lock().flush();
    }
}
