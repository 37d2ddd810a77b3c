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

use std::io;
use std::io::Write;

#[cfg(feature = "colored")]
use colored::Color;
#[cfg(feature = "colored")]
use colored::Colorize;
use jiff::Timestamp;
use jiff::tz::TimeZone;

use crate::trap::DeliveryFailure;
use crate::trap::Trap;

/// A trap that prints delivery failures to stderr as colored, timestamped warnings.
///
/// Output format:
///
/// ```text
/// 2024-08-11T22:44:57.172105+08:00  WARN failed to send log entry: error sending request for url (http://localhost:9000/ingest) url=http://localhost:9000/ingest source=originated from HttpTransport::log
/// ```
///
/// # Examples
///
/// ```
/// use jiff::tz::TimeZone;
/// use logforth_append_http::trap::ConsoleTrap;
///
/// let trap = ConsoleTrap::default().no_color(true).timezone(TimeZone::UTC);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConsoleTrap {
    #[cfg_attr(not(feature = "colored"), allow(dead_code))]
    no_color: bool,
    tz: Option<TimeZone>,
}

impl ConsoleTrap {
    /// Disable the level color.
    pub fn no_color(mut self, no_color: bool) -> Self {
        self.no_color = no_color;
        self
    }

    /// Set the timezone for timestamps. Otherwise, the system timezone is used.
    pub fn timezone(mut self, tz: TimeZone) -> Self {
        self.tz = Some(tz);
        self
    }

    fn format(&self, now: Timestamp, failure: &DeliveryFailure) -> String {
        let tz = self.tz.clone().unwrap_or_else(TimeZone::system);
        let time = now.to_zoned(tz).strftime("%Y-%m-%dT%H:%M:%S.%6f%:z");
        let level = self.level();
        let DeliveryFailure {
            message,
            url,
            source,
        } = failure;
        format!("{time} {level} {message} url={url} source={source}")
    }

    #[cfg(feature = "colored")]
    fn level(&self) -> String {
        if self.no_color {
            " WARN".to_owned()
        } else {
            " WARN".color(Color::Yellow).to_string()
        }
    }

    #[cfg(not(feature = "colored"))]
    fn level(&self) -> String {
        " WARN".to_owned()
    }
}

impl Trap for ConsoleTrap {
    fn trap(&self, failure: &DeliveryFailure) {
        let line = self.format(Timestamp::now(), failure);
        let _ = writeln!(io::stderr(), "{line}");
    }
}
