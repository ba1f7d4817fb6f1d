//! Scripted in-memory transport.
//!
//! Replies are queued per method and consumed in order. Every request is
//! recorded with its redacted log line so tests can inspect what would have
//! gone over the wire and what would have been logged.

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;

use robusto_core::{HttpVerb, PacketRequest, Priority, TransportError};

use super::{Transport, TransportResult};

#[derive(Debug, Clone)]
pub enum MockReply {
    Body(Bytes),
    /// Body delivered after a delay (network latency).
    Delayed(Bytes, Duration),
    Fail(TransportError),
}

/// What the transport received.
#[derive(Debug, Clone)]
pub struct SentRequest {
    pub method: &'static str,
    pub verb: HttpVerb,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Bytes,
    pub priority: Priority,
    pub log_line: String,
}

impl SentRequest {
    pub fn body_json(&self) -> Option<serde_json::Value> {
        serde_json::from_slice(&self.body).ok()
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Default)]
pub struct MockTransport {
    replies: Mutex<HashMap<&'static str, VecDeque<MockReply>>>,
    sent: Mutex<Vec<SentRequest>>,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(&self, method: &'static str, body: impl AsRef<[u8]>) -> &Self {
        self.push(method, MockReply::Body(Bytes::copy_from_slice(body.as_ref())))
    }

    pub fn reply_after(
        &self,
        method: &'static str,
        body: impl AsRef<[u8]>,
        delay: Duration,
    ) -> &Self {
        let body = Bytes::copy_from_slice(body.as_ref());
        self.push(method, MockReply::Delayed(body, delay))
    }

    pub fn fail(&self, method: &'static str, err: TransportError) -> &Self {
        self.push(method, MockReply::Fail(err))
    }

    pub fn push(&self, method: &'static str, reply: MockReply) -> &Self {
        lock(&self.replies).entry(method).or_default().push_back(reply);
        self
    }

    /// Requests received so far, in arrival order.
    pub fn sent(&self) -> Vec<SentRequest> {
        lock(&self.sent).clone()
    }

    fn take(&self, request: PacketRequest) -> MockReply {
        let reply = lock(&self.replies)
            .get_mut(request.method)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| {
                MockReply::Fail(TransportError::Connection(format!(
                    "no scripted reply for {}",
                    request.method
                )))
            });

        let log_line = request.log_line();
        tracing::debug!(target: "network_log", "{log_line}");
        lock(&self.sent).push(SentRequest {
            method: request.method,
            verb: request.verb,
            url: request.url,
            headers: request.headers,
            body: request.body,
            priority: request.priority,
            log_line,
        });
        reply
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: PacketRequest) -> TransportResult<Bytes> {
        match self.take(request) {
            MockReply::Body(b) => Ok(b),
            MockReply::Delayed(b, delay) => {
                tokio::time::sleep(delay).await;
                Ok(b)
            }
            MockReply::Fail(e) => Err(e),
        }
    }

    fn send_blocking(&self, request: PacketRequest) -> TransportResult<Bytes> {
        match self.take(request) {
            MockReply::Body(b) => Ok(b),
            MockReply::Delayed(b, delay) => {
                std::thread::sleep(delay);
                Ok(b)
            }
            MockReply::Fail(e) => Err(e),
        }
    }
}
