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

use jiff::Zoned;
use serde_json::Map;
use serde_json::Value as JsonValue;

use crate::config::EncodingConfig;
use crate::record::Record;

const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f%:z";

/// A JSON line encoder with configurable field keys.
///
/// Output format:
///
/// ```json
/// {"ts":"2025-08-29T12:01:33.284019+00:00","level":"INFO","caller":"checkout.rs:42","tag":"_tag_http_request_in","service":"checkout","path":"/healthz"}
/// ```
///
/// An empty key omits that part of the record entirely. The logger name and
/// the stacktrace are emitted only when the record carries them.
#[derive(Debug, Clone)]
pub struct Encoder {
    time_key: String,
    level_key: String,
    name_key: String,
    caller_key: String,
    message_key: String,
    stacktrace_key: String,
}

impl Default for Encoder {
    fn default() -> Self {
        Self {
            time_key: "ts".to_string(),
            level_key: "level".to_string(),
            name_key: "logger".to_string(),
            caller_key: "caller".to_string(),
            message_key: "msg".to_string(),
            stacktrace_key: "stacktrace".to_string(),
        }
    }
}

impl Encoder {
    pub fn from_config(config: &EncodingConfig) -> Self {
        Self {
            time_key: config.time_key.clone(),
            level_key: config.level_key.clone(),
            name_key: config.name_key.clone(),
            caller_key: config.caller_key.clone(),
            message_key: config.message_key.clone(),
            stacktrace_key: config.stacktrace_key.clone(),
        }
    }

    /// Encodes one record as a single JSON line, without the trailing newline.
    pub fn encode(&self, record: &Record) -> anyhow::Result<Vec<u8>> {
        let mut line = Map::new();

        if !self.time_key.is_empty() {
            let now = Zoned::now().strftime(TIME_FORMAT).to_string();
            line.insert(self.time_key.clone(), JsonValue::String(now));
        }
        if !self.level_key.is_empty() {
            line.insert(
                self.level_key.clone(),
                JsonValue::String(record.level.as_str().to_string()),
            );
        }
        if !self.name_key.is_empty() {
            if let Some(name) = record.name.filter(|name| !name.is_empty()) {
                line.insert(self.name_key.clone(), JsonValue::String(name.to_string()));
            }
        }
        if !self.caller_key.is_empty() {
            if let Some(caller) = &record.caller {
                line.insert(self.caller_key.clone(), JsonValue::String(caller.short()));
            }
        }
        if !self.message_key.is_empty() {
            line.insert(
                self.message_key.clone(),
                JsonValue::String(record.tag.to_string()),
            );
        }
        for field in record.fields {
            line.insert(field.key.to_string(), field.value.to_json());
        }
        if !self.stacktrace_key.is_empty() {
            if let Some(stack) = &record.stack {
                line.insert(
                    self.stacktrace_key.clone(),
                    JsonValue::String(stack.clone()),
                );
            }
        }

        Ok(serde_json::to_vec(&line)?)
    }
}
