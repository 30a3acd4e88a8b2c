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
use std::panic::Location;

use crate::kv::Field;
use crate::level::Level;

/// The call site a record originated from.
#[derive(Debug, Clone)]
pub struct Caller {
    pub file: Cow<'static, str>,
    pub line: u32,
}

impl Caller {
    pub fn from_location(location: &'static Location<'static>) -> Self {
        Self {
            file: Cow::Borrowed(location.file()),
            line: location.line(),
        }
    }

    /// Short `file.rs:line` form, keeping the last path component only.
    pub fn short(&self) -> String {
        let file = self.file.rsplit(['/', '\\']).next().unwrap_or(&self.file);
        format!("{file}:{line}", line = self.line)
    }
}

/// A single log record on its way to the appenders.
///
/// Fields are already merged: the logger's static fields come first, the
/// call-site fields after.
#[derive(Debug)]
pub struct Record<'a> {
    pub level: Level,
    pub tag: &'a str,
    pub fields: &'a [Field],
    pub name: Option<&'a str>,
    pub caller: Option<Caller>,
    pub stack: Option<String>,
}
