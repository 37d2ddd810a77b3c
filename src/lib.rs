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

//! An appender that forwards structured log entries to an HTTP endpoint.
//!
//! # Overview
//!
//! [`HttpTransport`] posts every [`LogEntry`] it receives as a JSON body to a fixed URL. The URL
//! is either given literally or assembled from [`HttpTransportOptions`], which is what
//! micro-service deployments with host, port and path routing need.
//!
//! Delivery is fire-and-forget: [`Transport::log`] spawns the request and returns at once.
//! Accepted entries are announced to listeners as [`TransportEvent::Logged`]; failed deliveries
//! are reported as warnings through a [`Trap`](trap::Trap), which by default prints to stderr.
//!
//! # Examples
//!
//! Send entries directly:
//!
//! ```
//! use logforth_append_http::HttpTransport;
//! use logforth_append_http::HttpTransportOptions;
//! use logforth_append_http::LogEntry;
//! use logforth_append_http::Transport;
//!
//! let options = HttpTransportOptions::new("logs.internal", 9000, "ingest").secure(true);
//! let transport = HttpTransport::new(options, None);
//! transport.on_logged(|entry| println!("delivered: {}", entry.message));
//!
//! transport.log(LogEntry::new("info", "hello"), &mut || {});
//! ```
//!
//! Forward everything logged through the `log` crate:
//!
//! ```
//! use logforth_append_http::HttpTransport;
//!
//! let transport = HttpTransport::new("http://localhost:9000/ingest", Some("warn"));
//! logforth_append_http::bridge::setup_log_crate(transport);
//!
//! log::warn!(user = 7; "quota exceeded");
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod bridge;
pub mod client;
pub mod event;
pub mod level;
pub mod trap;

mod endpoint;
mod entry;
mod error;
mod runtime;
mod transport;

pub use self::endpoint::Endpoint;
pub use self::endpoint::HttpTransportOptions;
pub use self::entry::LogEntry;
pub use self::error::Error;
pub use self::error::ErrorKind;
pub use self::event::TransportEvent;
pub use self::transport::HttpTransport;
pub use self::transport::HttpTransportBuilder;
pub use self::transport::HttpTransportConfig;
pub use self::transport::Transport;
