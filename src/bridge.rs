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

//! A bridge to forward logs from the `log` crate to a transport.

use log::LevelFilter;

use crate::LogEntry;
use crate::level::level_filter;
use crate::transport::Transport;

// Records from the transport's own HTTP stack would be sent through the transport again.
const SELF_TARGETS: &[&str] = &[
    "logforth_append_http",
    "reqwest",
    "hyper",
    "hyper_util",
    "h2",
    "rustls",
    "native_tls",
    "tokio",
    "mio",
    "want",
    "tower",
];

/// A `log` crate logger that hands every record to a transport.
///
/// Level filtering is left to the `log` facade, see [`try_setup_log_crate`].
#[derive(Debug)]
pub struct LogCrateTransport<T> {
    transport: T,
}

impl<T: Transport> LogCrateTransport<T> {
    /// Wrap `transport`.
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// The wrapped transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }
}

/// The global maximum level for a transport's level tag; unknown tags fall back to `Info`.
fn max_level(tag: &str) -> LevelFilter {
    level_filter(tag).unwrap_or(LevelFilter::Info)
}

fn is_self_target(target: &str) -> bool {
    SELF_TARGETS.iter().any(|prefix| {
        target
            .strip_prefix(prefix)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with("::"))
    })
}

impl<T: Transport> log::Log for LogCrateTransport<T> {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        !is_self_target(metadata.target())
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            self.transport.log(LogEntry::from_record(record), &mut || {});
        }
    }

    fn flush(&self) {}
}

/// Set up the log crate global logger.
///
/// This function calls [`log::set_boxed_logger`] so that all logs from the log crate are forwarded
/// to `transport`, and sets the global maximum level from the transport's level. Unknown level
/// tags fall back to `Info`.
///
/// # Errors
///
/// Return an error if the log crate global logger has already been set.
///
/// # Examples
///
/// ```
/// use logforth_append_http::HttpTransport;
///
/// let transport = HttpTransport::new("http://localhost:9000/ingest", Some("warn"));
/// if let Err(err) = logforth_append_http::bridge::try_setup_log_crate(transport) {
///     eprintln!("failed to setup log crate: {err}");
/// }
/// ```
pub fn try_setup_log_crate<T: Transport>(transport: T) -> Result<(), log::SetLoggerError> {
    let filter = max_level(transport.level());
    log::set_boxed_logger(Box::new(LogCrateTransport::new(transport)))?;
    log::set_max_level(filter);
    Ok(())
}

/// Set up the log crate global logger.
///
/// See [`try_setup_log_crate`].
///
/// # Panics
///
/// Panic if the log crate global logger has already been set.
pub fn setup_log_crate<T: Transport>(transport: T) {
    try_setup_log_crate(transport).expect(
        "logforth_append_http::bridge::setup_log_crate must be called before the log crate global logger initialized",
    )
}
