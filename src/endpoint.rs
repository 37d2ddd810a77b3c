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

//! Endpoint configuration and URL resolution.

use serde::Deserialize;
use serde::Serialize;

/// A structured description of the endpoint log entries are posted to.
///
/// # Examples
///
/// ```
/// use logforth_append_http::HttpTransportOptions;
///
/// let options = HttpTransportOptions::new("logs.internal", 9000, "ingest").secure(true);
/// assert_eq!(options.resolve(), "https://logs.internal:9000/ingest");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpTransportOptions {
    /// Host name or address of the log collector.
    pub host: String,
    /// Port of the log collector.
    pub port: u16,
    /// Request path; a leading `/` is optional.
    pub path: String,
    /// Use `https` instead of `http`.
    #[serde(default, alias = "ssl")]
    pub secure: bool,
}

impl HttpTransportOptions {
    /// Create plain `http` options for the given host, port and path.
    pub fn new(host: impl Into<String>, port: u16, path: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port,
            path: path.into(),
            secure: false,
        }
    }

    /// Set whether requests use `https`.
    pub fn secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    /// Assemble `scheme://host:port/path` from the options.
    pub fn resolve(&self) -> String {
        let scheme = if self.secure { "https" } else { "http" };
        let path = self.path.strip_prefix('/').unwrap_or(&self.path);
        format!("{scheme}://{}:{}/{path}", self.host, self.port)
    }
}

/// Where an HTTP transport sends its log entries.
///
/// Either a literal URL, used as-is, or [`HttpTransportOptions`] that are
/// assembled into one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Endpoint {
    /// A fully formed URL.
    Url(String),
    /// Structured host, port, path and scheme.
    Options(HttpTransportOptions),
}

impl Endpoint {
    /// Compute the URL requests are sent to.
    pub fn resolve(&self) -> String {
        match self {
            Endpoint::Url(url) => url.clone(),
            Endpoint::Options(options) => options.resolve(),
        }
    }
}

impl From<&str> for Endpoint {
    fn from(url: &str) -> Self {
        Endpoint::Url(url.to_owned())
    }
}

impl From<String> for Endpoint {
    fn from(url: String) -> Self {
        Endpoint::Url(url)
    }
}

impl From<HttpTransportOptions> for Endpoint {
    fn from(options: HttpTransportOptions) -> Self {
        Endpoint::Options(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scheme_follows_secure_flag() {
        let options = HttpTransportOptions::new("localhost", 8080, "/logs");
        assert!(options.resolve().starts_with("http://"));

        let options = options.secure(true);
        assert!(options.resolve().starts_with("https://"));
    }

    #[test]
    fn path_gets_exactly_one_separator() {
        let without = HttpTransportOptions::new("logs.internal", 9000, "ingest");
        let with = HttpTransportOptions::new("logs.internal", 9000, "/ingest");
        assert_eq!(without.resolve(), "http://logs.internal:9000/ingest");
        assert_eq!(with.resolve(), "http://logs.internal:9000/ingest");
    }

    #[test]
    fn empty_path_resolves_to_root() {
        let options = HttpTransportOptions::new("collector", 80, "");
        assert_eq!(options.resolve(), "http://collector:80/");
    }

    #[test]
    fn nested_path_is_kept() {
        let options = HttpTransportOptions::new("collector", 3000, "api/v1/logs").secure(true);
        assert_eq!(options.resolve(), "https://collector:3000/api/v1/logs");
    }

    #[test]
    fn literal_url_is_unchanged() {
        let url = "https://gateway.example.com/svc/logs?tenant=a";
        assert_eq!(Endpoint::from(url).resolve(), url);
        assert_eq!(Endpoint::from(url.to_string()).resolve(), url);
    }

    #[test]
    fn deserialize_either_form() {
        let endpoint: Endpoint = serde_json::from_str(r#""http://localhost:1234/x""#).unwrap();
        assert_eq!(endpoint, Endpoint::Url("http://localhost:1234/x".to_string()));

        let endpoint: Endpoint =
            serde_json::from_str(r#"{"host":"logs.internal","port":9000,"path":"ingest","ssl":true}"#)
                .unwrap();
        assert_eq!(endpoint.resolve(), "https://logs.internal:9000/ingest");

        let endpoint: Endpoint =
            serde_json::from_str(r#"{"host":"logs.internal","port":9000,"path":"/ingest"}"#).unwrap();
        assert_eq!(endpoint.resolve(), "http://logs.internal:9000/ingest");
    }
}
