use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use bytes::Bytes;
use futures_util::future::join_all;
use tokio::runtime::Handle;
use tokio::sync::oneshot;

use robusto_core::error::{PacketError, Result, TransportError};
use robusto_core::{Execution, Packet, PacketParams, PacketRequest};

use crate::context::CoreContext;
use crate::obs::ClientMetrics;
use crate::transport::Transport;

/// A packet handed back to its owner together with its terminal outcome.
pub struct Completion<P: Packet> {
    pub packet: P,
    pub result: Result<P::Output>,
}

impl<P: Packet> Completion<P> {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    pub fn into_result(self) -> Result<P::Output> {
        self.result
    }
}

/// Runs packets against a transport and delivers every completion on the
/// core context.
///
/// Transport work happens on the tokio runtime; envelope decoding, status
/// classification and the caller's handler run on the core worker, in the
/// order replies arrive.
#[derive(Clone)]
pub struct Dispatcher {
    inner: Arc<DispatcherInner>,
}

struct DispatcherInner {
    params: Arc<PacketParams>,
    transport: Arc<dyn Transport>,
    core: CoreContext,
    runtime: Handle,
    metrics: Arc<ClientMetrics>,
    next_req_id: AtomicU64,
}

impl Dispatcher {
    /// Must be called from within a tokio runtime; its handle is kept for
    /// spawning transport work.
    pub fn new(
        params: Arc<PacketParams>,
        transport: Arc<dyn Transport>,
        core: CoreContext,
        metrics: Arc<ClientMetrics>,
    ) -> Result<Self> {
        let runtime = Handle::try_current()
            .map_err(|e| PacketError::Internal(format!("dispatcher needs a tokio runtime: {e}")))?;
        Ok(Self::with_runtime(params, transport, core, metrics, runtime))
    }

    pub fn with_runtime(
        params: Arc<PacketParams>,
        transport: Arc<dyn Transport>,
        core: CoreContext,
        metrics: Arc<ClientMetrics>,
        runtime: Handle,
    ) -> Self {
        Self {
            inner: Arc::new(DispatcherInner {
                params,
                transport,
                core,
                runtime,
                metrics,
                next_req_id: AtomicU64::new(1),
            }),
        }
    }

    pub fn params(&self) -> &PacketParams {
        &self.inner.params
    }

    pub fn core(&self) -> &CoreContext {
        &self.inner.core
    }

    pub fn metrics(&self) -> Arc<ClientMetrics> {
        Arc::clone(&self.inner.metrics)
    }

    /// Hand the packet to the transport without blocking. `handler` runs on
    /// the core worker with the packet and its outcome.
    ///
    /// Packets declaring `Execution::Blocking` are sent from tokio's blocking
    /// pool. If the core context is already shut down the completion is
    /// dropped (and counted).
    pub fn execute_async<P, F>(&self, packet: P, handler: F)
    where
        P: Packet,
        F: FnOnce(Completion<P>) + Send + 'static,
    {
        let started = Instant::now();
        let request = match self.prepare(&packet) {
            Ok(r) => r,
            Err(e) => {
                self.complete(packet, Err(e), started, handler);
                return;
            }
        };

        let method = packet.method();
        let execution = packet.execution();
        let this = self.clone();
        self.inner.metrics.in_flight.inc(&[("method", method)]);

        self.inner.runtime.spawn(async move {
            let reply = match execution {
                Execution::Async => this.inner.transport.send(request).await,
                Execution::Blocking => {
                    let transport = Arc::clone(&this.inner.transport);
                    tokio::task::spawn_blocking(move || transport.send_blocking(request))
                        .await
                        .unwrap_or_else(|e| {
                            Err(TransportError::Connection(format!("blocking send aborted: {e}")))
                        })
                }
            };
            this.inner.metrics.in_flight.dec(&[("method", method)]);
            this.complete(packet, reply.map_err(PacketError::from), started, handler);
        });
    }

    /// Future flavour of [`execute_async`](Self::execute_async). The request is
    /// dispatched immediately; the future resolves once the completion has
    /// been processed on the core worker.
    pub fn execute<P: Packet>(
        &self,
        packet: P,
    ) -> impl Future<Output = Result<Completion<P>>> + Send + 'static {
        let (tx, rx) = oneshot::channel();
        self.execute_async(packet, move |completion| {
            let _ = tx.send(completion);
        });
        async move { rx.await.map_err(|_| PacketError::Shutdown) }
    }

    /// Dispatch several packets of one type at once; results keep input order.
    pub async fn execute_all<P: Packet>(&self, packets: Vec<P>) -> Vec<Result<Completion<P>>> {
        join_all(packets.into_iter().map(|p| self.execute(p))).await
    }

    /// Run the whole cycle on the calling thread.
    pub fn execute_blocking<P: Packet>(&self, mut packet: P) -> Completion<P> {
        let started = Instant::now();
        let method = packet.method();

        let result = self
            .prepare(&packet)
            .and_then(|req| self.inner.transport.send_blocking(req).map_err(PacketError::from))
            .and_then(|bytes| finish(&mut packet, &bytes));

        record(&self.inner.metrics, method, started, &result);
        Completion { packet, result }
    }

    fn prepare<P: Packet>(&self, packet: &P) -> Result<PacketRequest> {
        let method = packet.method();
        let mut req = packet.build_request(&self.inner.params)?;

        let id = self.inner.next_req_id.fetch_add(1, Ordering::Relaxed);
        req.set_header("X-Request-Id", format!("{id}-{method}"));

        self.inner.metrics.requests.inc(&[
            ("method", method),
            ("verb", req.verb.as_str()),
            ("priority", req.priority.as_str()),
        ]);
        tracing::debug!(method, priority = req.priority.as_str(), "send {}", req.log_line());
        Ok(req)
    }

    fn complete<P, F>(&self, packet: P, reply: Result<Bytes>, started: Instant, handler: F)
    where
        P: Packet,
        F: FnOnce(Completion<P>) + Send + 'static,
    {
        let method = packet.method();
        let metrics = Arc::clone(&self.inner.metrics);

        let posted = self.inner.core.post_named(method, move || {
            let mut packet = packet;
            let result = reply.and_then(|bytes| finish(&mut packet, &bytes));
            record(&metrics, method, started, &result);
            handler(Completion { packet, result });
        });

        if let Err(e) = posted {
            self.inner.metrics.dropped_completions.inc(&[("method", method)]);
            tracing::warn!(method, error = %e, "completion dropped");
        }
    }
}

fn finish<P: Packet>(packet: &mut P, body: &[u8]) -> Result<P::Output> {
    if body.is_empty() {
        packet.on_empty_response()
    } else {
        packet.parse_response(body)
    }
}

fn record<T>(metrics: &ClientMetrics, method: &str, started: Instant, result: &Result<T>) {
    let outcome = match result {
        Ok(_) => "ok",
        Err(e) => e.kind().as_str(),
    };
    metrics.outcomes.inc(&[("method", method), ("outcome", outcome)]);
    metrics.roundtrip_duration.observe(&[("method", method)], started.elapsed());
    if let Err(e) = result {
        tracing::debug!(method, error = %e, "packet failed");
    }
}
