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

use std::borrow::Cow;

use crate::kv::Field;
use crate::level::Level;
use crate::logger;
use crate::record::Caller;

/// Routes records emitted through the `log` macros into the facade's sinks.
///
/// Installed best-effort by [`crate::init`]; if the host application already
/// set a `log` logger, records from the macros keep their existing route.
#[derive(Debug)]
pub(crate) struct LogBridge;

fn level_from(level: log::Level) -> Level {
    match level {
        log::Level::Error => Level::Error,
        log::Level::Warn => Level::Warn,
        log::Level::Info => Level::Info,
        log::Level::Debug | log::Level::Trace => Level::Debug,
    }
}

struct KvCollector<'a> {
    fields: &'a mut Vec<Field>,
}

impl<'kvs> log::kv::VisitSource<'kvs> for KvCollector<'_> {
    fn visit_pair(
        &mut self,
        key: log::kv::Key<'kvs>,
        value: log::kv::Value<'kvs>,
    ) -> Result<(), log::kv::Error> {
        self.fields
            .push(Field::str(key.as_str().to_owned(), value.to_string()));
        Ok(())
    }
}

impl log::Log for LogBridge {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        logger::global().is_some_and(|l| l.enabled(level_from(metadata.level())))
    }

    fn log(&self, record: &log::Record) {
        let Some(logger) = logger::global() else {
            return;
        };

        let mut fields = Vec::new();
        let mut visitor = KvCollector {
            fields: &mut fields,
        };
        let _ = record.key_values().visit(&mut visitor);

        let caller = record.file().map(|file| Caller {
            file: Cow::Owned(file.to_owned()),
            line: record.line().unwrap_or(0),
        });

        let tag = record.args().to_string();
        logger.write(level_from(record.level()), &tag, &fields, caller);
    }

    fn flush(&self) {
        if let Some(logger) = logger::global() {
            logger.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::level_from;
    use crate::level::Level;

    #[test]
    fn test_level_mapping() {
        assert_eq!(level_from(log::Level::Error), Level::Error);
        assert_eq!(level_from(log::Level::Warn), Level::Warn);
        assert_eq!(level_from(log::Level::Info), Level::Info);
        assert_eq!(level_from(log::Level::Debug), Level::Debug);
        assert_eq!(level_from(log::Level::Trace), Level::Debug);
    }
}
