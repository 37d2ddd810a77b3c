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

//! Events emitted by transports.

use std::fmt;
use std::sync::Arc;
use std::sync::PoisonError;
use std::sync::RwLock;

use crate::LogEntry;

/// An event a transport reports to its listeners.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum TransportEvent {
    /// The entry was accepted by the endpoint.
    Logged(LogEntry),
}

/// An observer of [`TransportEvent`]s.
pub trait Listener: Send + Sync + 'static {
    /// Handle an event.
    fn on_event(&self, event: &TransportEvent);
}

impl<F> Listener for F
where
    F: Fn(&TransportEvent) + Send + Sync + 'static,
{
    fn on_event(&self, event: &TransportEvent) {
        self(event)
    }
}

/// The listeners registered on one transport.
#[derive(Default)]
pub struct Listeners {
    listeners: RwLock<Vec<Arc<dyn Listener>>>,
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("len", &self.len())
            .finish()
    }
}

impl Listeners {
    /// Register a listener.
    pub fn subscribe(&self, listener: Arc<dyn Listener>) {
        let mut listeners = self
            .listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        listeners.push(listener);
    }

    /// The number of registered listeners.
    pub fn len(&self) -> usize {
        self.listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether no listener is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Deliver an event to every listener, in registration order.
    pub fn emit(&self, event: &TransportEvent) {
        // listeners may subscribe from inside a callback
        let listeners = self
            .listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        for listener in listeners {
            listener.on_event(event);
        }
    }
}
