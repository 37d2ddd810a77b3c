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

use std::net::SocketAddr;
use std::time::Duration;

use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use logforth_append_http::HttpTransport;
use logforth_append_http::HttpTransportOptions;
use logforth_append_http::LogEntry;
use logforth_append_http::Transport;
use logforth_append_http::client::ReqwestClient;
use logforth_append_http::trap::DELIVERY_FAILURE_SOURCE;
use logforth_append_http::trap::DeliveryFailure;
use logforth_append_http::trap::Trap;
use serde_json::Value;
use serde_json::json;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::mpsc::UnboundedSender;

const WAIT: Duration = Duration::from_secs(10);

#[derive(Debug)]
struct ChannelTrap(UnboundedSender<DeliveryFailure>);

impl Trap for ChannelTrap {
    fn trap(&self, failure: &DeliveryFailure) {
        let _ = self.0.send(failure.clone());
    }
}

/// Start a collector answering every POST to `/ingest` with `status`.
async fn start_collector(status: StatusCode) -> (SocketAddr, UnboundedReceiver<Value>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let app = Router::new()
        .route(
            "/ingest",
            post(
                move |State(tx): State<UnboundedSender<Value>>, Json(body): Json<Value>| async move {
                    let _ = tx.send(body);
                    status
                },
            ),
        )
        .with_state(tx);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (addr, rx)
}

async fn recv<T>(rx: &mut UnboundedReceiver<T>) -> T {
    tokio::time::timeout(WAIT, rx.recv())
        .await
        .expect("timed out")
        .expect("channel closed")
}

fn build(
    url: String,
) -> (
    HttpTransport,
    UnboundedReceiver<DeliveryFailure>,
    UnboundedReceiver<LogEntry>,
) {
    // keep ambient proxy settings away from the loopback collector
    let client = reqwest::Client::builder().no_proxy().build().unwrap();

    let (trap_tx, trap_rx) = mpsc::unbounded_channel();
    let transport = HttpTransport::builder(url)
        .client(ReqwestClient::new(client))
        .trap(ChannelTrap(trap_tx))
        .build();

    let (logged_tx, logged_rx) = mpsc::unbounded_channel();
    transport.on_logged(move |entry| {
        let _ = logged_tx.send(entry.clone());
    });
    (transport, trap_rx, logged_rx)
}

#[tokio::test]
async fn entry_is_posted_as_json() {
    let (addr, mut bodies) = start_collector(StatusCode::OK).await;
    let options = HttpTransportOptions::new("127.0.0.1", addr.port(), "ingest");
    let (transport, mut failures, mut logged) = build(options.resolve());

    let entry = LogEntry::new("info", "hello").with_field("service", "checkout");
    let mut calls = 0;
    transport.log(entry.clone(), &mut || calls += 1);
    assert_eq!(calls, 1);

    let body = recv(&mut bodies).await;
    assert_eq!(
        body,
        json!({"level": "info", "message": "hello", "service": "checkout"})
    );
    assert_eq!(recv(&mut logged).await, entry);
    assert!(failures.try_recv().is_err());
}

#[tokio::test]
async fn server_error_is_trapped() {
    let (addr, mut bodies) = start_collector(StatusCode::INTERNAL_SERVER_ERROR).await;
    let url = format!("http://{addr}/ingest");
    let (transport, mut failures, mut logged) = build(url.clone());

    transport.log(LogEntry::new("error", "payment failed"), &mut || {});

    // the collector did see the request
    recv(&mut bodies).await;

    let failure = recv(&mut failures).await;
    assert_eq!(failure.url, url);
    assert_eq!(failure.source, DELIVERY_FAILURE_SOURCE);
    assert!(failure.message.starts_with("endpoint rejected log entry"));
    assert!(failure.message.contains("500"), "{}", failure.message);

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(failures.try_recv().is_err());
    assert!(logged.try_recv().is_err());
}

#[tokio::test]
async fn refused_connection_is_trapped() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let url = format!("http://{addr}/ingest");
    let (transport, mut failures, mut logged) = build(url.clone());

    let mut calls = 0;
    transport.log(LogEntry::new("warn", "nobody listens"), &mut || calls += 1);
    assert_eq!(calls, 1);

    let failure = recv(&mut failures).await;
    assert_eq!(failure.url, url);
    assert!(failure.message.starts_with("failed to send log entry"));

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(failures.try_recv().is_err());
    assert!(logged.try_recv().is_err());
}

#[tokio::test]
async fn entries_are_delivered_independently() {
    let (addr, mut bodies) = start_collector(StatusCode::ACCEPTED).await;
    let (transport, _failures, mut logged) = build(format!("http://{addr}/ingest"));

    for i in 0..8 {
        transport.log(LogEntry::new("info", format!("entry {i}")), &mut || {});
    }

    let mut messages = vec![];
    for _ in 0..8 {
        let body = recv(&mut bodies).await;
        messages.push(body["message"].as_str().unwrap().to_owned());
        recv(&mut logged).await;
    }
    messages.sort();
    let expected: Vec<_> = (0..8).map(|i| format!("entry {i}")).collect();
    assert_eq!(messages, expected);
}
