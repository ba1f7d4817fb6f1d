//! Client wiring.
//!
//! Builds the shared pieces in dependency order: metrics, the core context,
//! then the dispatcher bound to a transport. Startup errors are returned, not
//! panicked.

use std::sync::Arc;

use robusto_core::error::Result;
use robusto_core::PacketParams;

use crate::config::ClientConfig;
use crate::context::CoreContext;
use crate::dispatch::Dispatcher;
use crate::obs::ClientMetrics;
use crate::transport::Transport;

/// Login material for one session.
#[derive(Clone)]
pub struct Credentials {
    pub aimsid: String,
    pub session_key: Vec<u8>,
    pub dev_id: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("aimsid", &"***")
            .field("session_key", &format_args!("<{} bytes>", self.session_key.len()))
            .field("dev_id", &self.dev_id)
            .finish()
    }
}

#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    cfg: ClientConfig,
    metrics: Arc<ClientMetrics>,
    core: CoreContext,
    dispatcher: Dispatcher,
}

impl Client {
    /// Validate `cfg`, start the core worker and bind the dispatcher to the
    /// current tokio runtime.
    pub fn start(
        cfg: ClientConfig,
        creds: Credentials,
        transport: Arc<dyn Transport>,
    ) -> Result<Self> {
        cfg.validate()?;

        let metrics = Arc::new(ClientMetrics::default());
        let core = CoreContext::start(&cfg.context, Arc::clone(&metrics))?;
        let params = Arc::new(cfg.packet_params(creds.aimsid, creds.session_key, creds.dev_id));

        let dispatched = Dispatcher::new(params, transport, core.clone(), Arc::clone(&metrics));
        let dispatcher = match dispatched {
            Ok(d) => d,
            Err(e) => {
                let _ = core.shutdown();
                return Err(e);
            }
        };

        tracing::info!(
            host = %cfg.session.host,
            api_version = cfg.session.api_version,
            "robusto client started"
        );

        Ok(Self {
            inner: Arc::new(ClientInner {
                cfg,
                metrics,
                core,
                dispatcher,
            }),
        })
    }

    pub fn cfg(&self) -> &ClientConfig {
        &self.inner.cfg
    }

    pub fn params(&self) -> &PacketParams {
        self.inner.dispatcher.params()
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.inner.dispatcher
    }

    pub fn core(&self) -> &CoreContext {
        &self.inner.core
    }

    pub fn metrics(&self) -> Arc<ClientMetrics> {
        Arc::clone(&self.inner.metrics)
    }

    /// Run every queued completion, then stop the core worker. Blocks until the
    /// worker has exited.
    pub fn shutdown(&self) -> Result<()> {
        self.inner.core.shutdown()
    }
}
