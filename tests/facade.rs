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

//! End-to-end exercise of the initialized facade. The global logger is
//! process-wide, so everything lives in one test function.

use std::fs;
use std::panic::catch_unwind;
use std::path::Path;

use serde_json::Value as Json;
use taglog::Field;
use taglog::tags;

fn read_records(path: &Path) -> Vec<Json> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .filter(|line| !line.is_empty())
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

fn find<'a>(records: &'a [Json], tag: &str) -> Option<&'a Json> {
    records.iter().find(|record| record["tag"] == tag)
}

#[test]
fn facade_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("logs");
    let config_path = dir.path().join("taglog.yaml");
    let yaml = format!(
        r#"
LumberConfig:
  FilePath: {base}
  Filename: normal.log
  WarnFilename: warn.log
  MaxSize: 10
  MaxBackups: 3
  MaxAge: 7
  Compress: false
ZapConfig:
  TimeKey: ts
  LevelKey: level
  NameKey: logger
  CallerKey: caller
  MessageKey: tag
  StacktraceKey: stack
  ServiceName: checkout
"#,
        base = base.display()
    );
    fs::write(&config_path, yaml).unwrap();

    taglog::init(&config_path).unwrap();

    // Directory and both files exist even though they did not before.
    let normal_path = base.join("normal.log");
    let warn_path = base.join("warn.log");
    assert!(base.is_dir());
    assert!(normal_path.is_file());
    assert!(warn_path.is_file());

    // Re-initialization is a no-op.
    taglog::init(&config_path).unwrap();
    let logger = taglog::global().unwrap() as *const _;
    taglog::init(&config_path).unwrap();
    assert!(std::ptr::eq(logger, taglog::global().unwrap()));

    taglog::debug("debug_tag", &[Field::int("attempt", 2)]);
    taglog::info(tags::HTTP_REQUEST_IN, &[Field::str("msg", "hello")]);
    taglog::infow("sugar_tag", &["msg".into(), "hello".into()]);
    taglog::warn("warn_tag", &[Field::int("code", 500)]);
    log::info!("bridge_tag");

    let panicked = catch_unwind(|| taglog::panic("panic_tag", &[]));
    assert!(panicked.is_err());

    let normal = read_records(&normal_path);
    let warn = read_records(&warn_path);

    // Info-and-below records land in the normal log only.
    let info_record = find(&normal, tags::HTTP_REQUEST_IN).unwrap();
    assert_eq!(info_record["level"], "INFO");
    assert_eq!(info_record["msg"], "hello");
    assert_eq!(info_record["service"], "checkout");
    assert!(info_record["ts"].as_str().is_some_and(|ts| ts.contains('T')));
    assert!(
        info_record["caller"]
            .as_str()
            .is_some_and(|caller| caller.starts_with("facade.rs:"))
    );
    // The logger is unnamed, so the configured name key is absent.
    assert!(info_record.get("logger").is_none());
    assert!(find(&warn, tags::HTTP_REQUEST_IN).is_none());

    let debug_record = find(&normal, "debug_tag").unwrap();
    assert_eq!(debug_record["level"], "DEBUG");
    assert_eq!(debug_record["attempt"], 2);

    // Warn-and-above records land in the warning log only.
    let warn_record = find(&warn, "warn_tag").unwrap();
    assert_eq!(warn_record["level"], "WARN");
    assert_eq!(warn_record["code"], 500);
    assert!(find(&normal, "warn_tag").is_none());

    // Records from the `log` macros route through the bridge.
    assert!(find(&normal, "bridge_tag").is_some());

    // The panic entry point wrote its record before unwinding.
    let panic_record = find(&warn, "panic_tag").unwrap();
    assert_eq!(panic_record["level"], "PANIC");
    assert!(panic_record["stack"].as_str().is_some_and(|s| !s.is_empty()));

    // Structured and sugar calls produce the same key and value.
    let sugar_record = find(&normal, "sugar_tag").unwrap();
    assert_eq!(sugar_record["msg"], info_record["msg"]);
}
