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

use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;
use tokio::runtime::Handle;

use crate::Endpoint;
use crate::Error;
use crate::error::ErrorKind;
use crate::LogEntry;
use crate::client::HttpClient;
use crate::client::ReqwestClient;
use crate::event::Listener;
use crate::event::Listeners;
use crate::event::TransportEvent;
use crate::level::DEFAULT_LEVEL;
use crate::runtime::Spawner;
use crate::transport::Transport;
use crate::trap::ConsoleTrap;
use crate::trap::DeliveryFailure;
use crate::trap::Trap;

/// A transport that POSTs every entry to a fixed URL.
///
/// Each call to [`Transport::log`] spawns one detached request and returns immediately. A
/// successful request emits [`TransportEvent::Logged`]; a failed one is reported once to the
/// transport's [`Trap`] and then dropped.
///
/// # Examples
///
/// ```
/// use logforth_append_http::HttpTransport;
/// use logforth_append_http::HttpTransportOptions;
///
/// let options = HttpTransportOptions::new("logs.internal", 9000, "ingest").secure(true);
/// let transport = HttpTransport::new(options, None);
/// assert_eq!(transport.url(), "https://logs.internal:9000/ingest");
///
/// let transport = HttpTransport::new("http://collector/v1/logs", Some("warn"));
/// assert_eq!(transport.url(), "http://collector/v1/logs");
/// ```
#[derive(Debug)]
pub struct HttpTransport<C = ReqwestClient> {
    url: Arc<str>,
    level: String,
    client: C,
    trap: Arc<dyn Trap>,
    listeners: Arc<Listeners>,
    spawner: Spawner,
}

impl HttpTransport {
    /// Create a transport for `endpoint`, with `"info"` as the level unless one is given.
    pub fn new(endpoint: impl Into<Endpoint>, level: Option<&str>) -> Self {
        let builder = HttpTransportBuilder::new(endpoint);
        match level {
            Some(level) => builder.level(level).build(),
            None => builder.build(),
        }
    }

    /// Start building a transport for `endpoint`.
    pub fn builder(endpoint: impl Into<Endpoint>) -> HttpTransportBuilder {
        HttpTransportBuilder::new(endpoint)
    }
}

impl<C: HttpClient> HttpTransport<C> {
    /// The resolved URL entries are posted to.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Call `f` with every entry the endpoint accepted.
    pub fn on_logged<F>(&self, f: F)
    where
        F: Fn(&LogEntry) + Send + Sync + 'static,
    {
        self.subscribe(Arc::new(move |event: &TransportEvent| {
            let TransportEvent::Logged(entry) = event;
            f(entry);
        }));
    }

    fn deliver(&self, entry: LogEntry) -> Result<(), Error> {
        let body = serde_json::to_vec(&entry)
            .map_err(|err| {
                Error::new(ErrorKind::Serialize, "failed to serialize log entry").with_source(err)
            })?;
        let request = self.client.post(&self.url, body);

        let url = self.url.clone();
        let trap = self.trap.clone();
        let listeners = self.listeners.clone();
        self.spawner.spawn(async move {
            match request.await {
                Ok(()) => listeners.emit(&TransportEvent::Logged(entry)),
                Err(err) => trap.trap(&DeliveryFailure::new(&err, &url)),
            }
        })
    }
}

impl<C: HttpClient> Transport for HttpTransport<C> {
    fn level(&self) -> &str {
        &self.level
    }

    fn log(&self, entry: LogEntry, next: &mut dyn FnMut()) {
        if let Err(err) = self.deliver(entry) {
            self.trap.trap(&DeliveryFailure::new(&err, &self.url));
        }
        next();
    }

    fn subscribe(&self, listener: Arc<dyn Listener>) {
        self.listeners.subscribe(listener);
    }
}

/// A builder for configuring an [`HttpTransport`].
#[derive(Debug)]
pub struct HttpTransportBuilder<C = ReqwestClient> {
    endpoint: Endpoint,
    level: String,
    client: C,
    trap: Arc<dyn Trap>,
    runtime: Option<Handle>,
}

impl HttpTransportBuilder {
    /// Create a builder with the default client, level and trap.
    pub fn new(endpoint: impl Into<Endpoint>) -> Self {
        Self {
            endpoint: endpoint.into(),
            level: DEFAULT_LEVEL.to_owned(),
            client: ReqwestClient::default(),
            trap: Arc::new(ConsoleTrap::default()),
            runtime: None,
        }
    }
}

impl<C: HttpClient> HttpTransportBuilder<C> {
    /// Set the minimum level the transport is registered with.
    pub fn level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    /// Set the trap that receives delivery failures.
    pub fn trap(mut self, trap: impl Trap) -> Self {
        self.trap = Arc::new(trap);
        self
    }

    /// Run delivery tasks on the given runtime.
    ///
    /// Without one, tasks go to the runtime of the calling context, or to a shared background
    /// runtime when called outside of any.
    pub fn runtime(mut self, handle: Handle) -> Self {
        self.runtime = Some(handle);
        self
    }

    /// Replace the HTTP client.
    pub fn client<D: HttpClient>(self, client: D) -> HttpTransportBuilder<D> {
        let Self {
            endpoint,
            level,
            client: _,
            trap,
            runtime,
        } = self;

        HttpTransportBuilder {
            endpoint,
            level,
            client,
            trap,
            runtime,
        }
    }

    /// Build the transport.
    pub fn build(self) -> HttpTransport<C> {
        let Self {
            endpoint,
            level,
            client,
            trap,
            runtime,
        } = self;

        HttpTransport {
            url: endpoint.resolve().into(),
            level,
            client,
            trap,
            listeners: Arc::new(Listeners::default()),
            spawner: Spawner::new(runtime),
        }
    }
}

/// A serializable description of an [`HttpTransport`].
///
/// # Examples
///
/// ```
/// use logforth_append_http::HttpTransportConfig;
///
/// let config: HttpTransportConfig = serde_json::from_str(
///     r#"{"endpoint": {"host": "logs.internal", "port": 9000, "path": "ingest"}, "level": "warn"}"#,
/// )
/// .unwrap();
/// let transport = config.build();
/// assert_eq!(transport.url(), "http://logs.internal:9000/ingest");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpTransportConfig {
    /// Where entries are sent.
    pub endpoint: Endpoint,
    /// The minimum level; `"info"` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
}

impl HttpTransportConfig {
    /// A builder preset with this configuration.
    pub fn builder(self) -> HttpTransportBuilder {
        let builder = HttpTransportBuilder::new(self.endpoint);
        match self.level {
            Some(level) => builder.level(level),
            None => builder,
        }
    }

    /// Build a transport with the default client and trap.
    pub fn build(self) -> HttpTransport {
        self.builder().build()
    }
}
