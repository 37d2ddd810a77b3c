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

//! The contract between a logging framework and its transports.

use std::fmt;
use std::sync::Arc;

use crate::LogEntry;
use crate::event::Listener;

mod http;

pub use self::http::HttpTransport;
pub use self::http::HttpTransportBuilder;
pub use self::http::HttpTransportConfig;

/// A sink that the logging framework forwards qualifying entries to.
///
/// The framework owns level filtering; a transport only exposes the minimum level it was
/// registered with.
pub trait Transport: fmt::Debug + Send + Sync + 'static {
    /// The minimum level this transport wants to receive.
    fn level(&self) -> &str;

    /// Handle one entry.
    ///
    /// `next` must be called exactly once to let the framework continue its dispatch. A transport
    /// never reports its own failures through this call.
    fn log(&self, entry: LogEntry, next: &mut dyn FnMut());

    /// Register a listener for this transport's events.
    fn subscribe(&self, listener: Arc<dyn Listener>);
}
