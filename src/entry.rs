// Copyright 2024 FastLabs Developers
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

//! Log entries sent as request bodies.

use log::kv::Key;
use log::kv::Value;
use log::kv::VisitSource;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;

use crate::level::level_tag;

/// A structured log entry.
///
/// An entry has a level tag and a message; any other fields are flattened next to them when the
/// entry is serialized. The transport posts the entry as-is.
///
/// Keys are unique in the serialized object: a field named `level` or `message` replaces the
/// entry's level or message instead of being added next to it.
///
/// # Examples
///
/// ```
/// use logforth_append_http::LogEntry;
///
/// let entry = LogEntry::new("info", "hello").with_field("request_id", 42);
/// assert_eq!(
///     serde_json::to_string(&entry).unwrap(),
///     r#"{"level":"info","message":"hello","request_id":42}"#
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Level tag, e.g. `"info"`.
    pub level: String,
    /// The log message.
    pub message: String,
    #[serde(flatten)]
    fields: Map<String, serde_json::Value>,
}

impl LogEntry {
    /// Create an entry without additional fields.
    pub fn new(level: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: level.into(),
            message: message.into(),
            fields: Map::new(),
        }
    }

    /// Attach a field to the entry.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.insert(key.into(), value.into());
        self
    }

    /// The fields besides level and message.
    pub fn fields(&self) -> &Map<String, serde_json::Value> {
        &self.fields
    }

    fn insert(&mut self, key: String, value: serde_json::Value) {
        if key != "level" && key != "message" {
            self.fields.insert(key, value);
            return;
        }

        let value = match value {
            serde_json::Value::String(value) => value,
            value => value.to_string(),
        };
        if key == "level" {
            self.level = value;
        } else {
            self.message = value;
        }
    }

    /// Convert a `log` record into an entry.
    ///
    /// The record target is kept as the `target` field; key-values become fields of their own.
    pub fn from_record(record: &log::Record) -> Self {
        let mut entry = LogEntry::new(level_tag(record.level()), record.args().to_string())
            .with_field("target", record.target());

        let mut collector = KvCollector { entry: &mut entry };
        // KvCollector never fails
        let _ = record.key_values().visit(&mut collector);
        entry
    }
}

struct KvCollector<'a> {
    entry: &'a mut LogEntry,
}

impl<'kvs> VisitSource<'kvs> for KvCollector<'_> {
    fn visit_pair(&mut self, key: Key<'kvs>, value: Value<'kvs>) -> Result<(), log::kv::Error> {
        let key = key.to_string();
        let value = match serde_json::to_value(&value) {
            Ok(value) => value,
            Err(_) => value.to_string().into(),
        };
        self.entry.insert(key, value);
        Ok(())
    }
}
