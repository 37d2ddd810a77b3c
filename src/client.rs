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

//! HTTP clients that perform the actual POST.

use std::fmt;
use std::future::Future;
use std::sync::OnceLock;

use reqwest::header::CONTENT_TYPE;

use crate::Error;

/// Sends one serialized log entry to an endpoint.
///
/// The returned future owns everything it needs, so a transport can drive it from a detached task
/// after the caller has moved on. It resolves to an error for anything the client does not
/// consider a success, including non-2xx responses.
pub trait HttpClient: fmt::Debug + Send + Sync + 'static {
    /// POST the JSON document `body` to `url`.
    fn post(
        &self,
        url: &str,
        body: Vec<u8>,
    ) -> impl Future<Output = Result<(), Error>> + Send + 'static;
}

/// The default client, backed by [`reqwest`].
///
/// Timeouts, redirects, TLS and connection pooling are whatever the wrapped client is configured
/// with. A default client is built on the first request, so a TLS backend that fails to
/// initialize shows up as a delivery failure instead of a panic at construction.
#[derive(Debug, Clone, Default)]
pub struct ReqwestClient {
    client: OnceLock<reqwest::Client>,
}

impl ReqwestClient {
    /// Wrap a preconfigured [`reqwest::Client`].
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client: OnceLock::from(client),
        }
    }

    fn client(&self) -> Result<&reqwest::Client, Error> {
        if let Some(client) = self.client.get() {
            return Ok(client);
        }
        let client = reqwest::Client::builder()
            .build()
            .map_err(Error::from_reqwest)?;
        Ok(self.client.get_or_init(|| client))
    }
}

impl HttpClient for ReqwestClient {
    fn post(
        &self,
        url: &str,
        body: Vec<u8>,
    ) -> impl Future<Output = Result<(), Error>> + Send + 'static {
        let request = self.client().map(|client| {
            client
                .post(url)
                .header(CONTENT_TYPE, "application/json")
                .body(body)
        });
        async move {
            let response = request?.send().await.map_err(Error::from_reqwest)?;
            response.error_for_status().map_err(Error::from_reqwest)?;
            Ok(())
        }
    }
}
