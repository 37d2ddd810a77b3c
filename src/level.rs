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

//! Level tags.

use log::Level;
use log::LevelFilter;

/// The minimum level a transport is registered with when none is given.
pub const DEFAULT_LEVEL: &str = "info";

/// Map a level tag onto the `log` crate's filter.
///
/// Besides the `log` names, the npm-style tags `http`, `verbose` and `silly` are understood. Tags
/// are matched case-insensitively; unknown tags yield `None`.
///
/// # Examples
///
/// ```
/// use log::LevelFilter;
/// use logforth_append_http::level::level_filter;
///
/// assert_eq!(level_filter("warn"), Some(LevelFilter::Warn));
/// assert_eq!(level_filter("silly"), Some(LevelFilter::Trace));
/// assert_eq!(level_filter("loud"), None);
/// ```
pub fn level_filter(tag: &str) -> Option<LevelFilter> {
    let filter = match tag.to_ascii_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" | "warning" => LevelFilter::Warn,
        "info" | "http" => LevelFilter::Info,
        "verbose" | "debug" => LevelFilter::Debug,
        "silly" | "trace" => LevelFilter::Trace,
        _ => return None,
    };
    Some(filter)
}

/// The lower-case tag an entry carries for a `log` level.
pub fn level_tag(level: Level) -> &'static str {
    match level {
        Level::Error => "error",
        Level::Warn => "warn",
        Level::Info => "info",
        Level::Debug => "debug",
        Level::Trace => "trace",
    }
}
