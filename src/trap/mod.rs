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

//! Traps receive the failures a transport cannot report to its caller.

use std::fmt;

use crate::Error;

mod console;

pub use self::console::ConsoleTrap;

/// Identifies failures raised while delivering an entry.
pub const DELIVERY_FAILURE_SOURCE: &str = "originated from HttpTransport::log";

/// A diagnostic record describing an entry that could not be delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryFailure {
    /// The stringified error.
    pub message: String,
    /// The endpoint the entry was sent to.
    pub url: String,
    /// Where the failure was raised.
    pub source: &'static str,
}

impl DeliveryFailure {
    /// Describe a failed delivery to `url`.
    pub fn new(err: &Error, url: &str) -> Self {
        Self {
            message: err.to_string(),
            url: url.to_owned(),
            source: DELIVERY_FAILURE_SOURCE,
        }
    }
}

/// A sink for delivery failures.
///
/// A trap must not log through the transport it serves; the default [`ConsoleTrap`] writes
/// straight to stderr.
pub trait Trap: fmt::Debug + Send + Sync + 'static {
    /// Report a failure as a warning.
    fn trap(&self, failure: &DeliveryFailure);
}
