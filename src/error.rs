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

//! Errors raised while delivering a log entry.

use std::fmt;

/// The stage at which a delivery failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The entry could not be encoded as JSON.
    Serialize,
    /// No runtime could take the delivery task.
    Spawn,
    /// The request did not complete, e.g. the connection was refused or timed out.
    Send,
    /// The endpoint answered with a non-success status.
    Rejected,
}

/// A failed delivery.
///
/// Errors never reach the caller of [`Transport::log`](crate::Transport::log); they are turned
/// into a [`DeliveryFailure`](crate::trap::DeliveryFailure) for the transport's trap.
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    message: String,
    status: Option<u16>,
    source: Option<anyhow::Error>,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }
        Ok(())
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_ref().map(|v| v.as_ref())
    }
}

impl Error {
    /// Create an error of the given kind.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
            source: None,
        }
    }

    /// Attach the underlying cause.
    pub fn with_source(mut self, src: impl Into<anyhow::Error>) -> Self {
        self.source = Some(src.into());
        self
    }

    /// Classify a failure of the HTTP client.
    ///
    /// Errors carrying a response status are [`ErrorKind::Rejected`]; everything else means the
    /// request never completed.
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => Self {
                status: Some(status.as_u16()),
                ..Error::new(ErrorKind::Rejected, "endpoint rejected log entry")
            }
            .with_source(err),
            None => Error::new(ErrorKind::Send, "failed to send log entry").with_source(err),
        }
    }

    /// The stage at which the delivery failed.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The error message, without the cause.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The response status, for rejected deliveries.
    pub fn status(&self) -> Option<u16> {
        self.status
    }
}
