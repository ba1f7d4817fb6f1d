use std::any::Any;
use std::backtrace::{Backtrace, BacktraceStatus};
use std::borrow::Cow;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle, ThreadId};
use std::time::{Duration, Instant};

use tokio::sync::mpsc;

use robusto_core::error::{PacketError, Result};

use crate::config::{BacktraceMode, ContextSection};
use crate::obs::ClientMetrics;

pub type Task = Box<dyn FnOnce() + Send + 'static>;

struct Job {
    name: Cow<'static, str>,
    task: Task,
    /// Where the task was posted from; only used for stall reports.
    backtrace: Option<Backtrace>,
}

/// Serialized FIFO task queue drained by exactly one worker thread.
///
/// Constructed once at startup and handed (cloned) to whatever posts work.
/// `shutdown` runs everything already queued, then joins the worker. Dropping
/// the last handle without `shutdown` lets the worker drain and exit detached.
///
/// A post that returned `Ok` always runs: posting and closing serialize on
/// the sender slot, and the worker only exits once the queue is empty.
#[derive(Clone)]
pub struct CoreContext {
    inner: Arc<Inner>,
}

struct Inner {
    /// `None` once shut down.
    tx: Mutex<Option<mpsc::UnboundedSender<Job>>>,
    workers: Mutex<Vec<JoinHandle<()>>>,
    thread_ids: Vec<ThreadId>,
    backtraces: BacktraceMode,
}

impl CoreContext {
    pub fn start(cfg: &ContextSection, metrics: Arc<ClientMetrics>) -> Result<Self> {
        let (tx, rx) = mpsc::unbounded_channel();
        let threshold = Duration::from_millis(cfg.stall_threshold_ms);

        let worker = thread::Builder::new()
            .name(cfg.thread_name.clone())
            .spawn(move || drain(rx, threshold, metrics))
            .map_err(|e| PacketError::Internal(format!("spawn core thread failed: {e}")))?;
        let thread_ids = vec![worker.thread().id()];

        tracing::info!(
            thread = %cfg.thread_name,
            stall_threshold_ms = cfg.stall_threshold_ms,
            "core context started"
        );

        Ok(Self {
            inner: Arc::new(Inner {
                tx: Mutex::new(Some(tx)),
                workers: Mutex::new(vec![worker]),
                thread_ids,
                backtraces: cfg.backtraces,
            }),
        })
    }

    /// Enqueue a task. Returns immediately; FIFO with every other post.
    pub fn post<F>(&self, task: F) -> Result<()>
    where
        F: FnOnce() + Send + 'static,
    {
        self.post_named("unnamed", task)
    }

    /// Enqueue a task with a name used in stall reports and metrics.
    pub fn post_named<F>(&self, name: impl Into<Cow<'static, str>>, task: F) -> Result<()>
    where
        F: FnOnce() + Send + 'static,
    {
        let backtrace = match self.inner.backtraces {
            BacktraceMode::Off => None,
            BacktraceMode::Env => Some(Backtrace::capture()),
            BacktraceMode::Always => Some(Backtrace::force_capture()),
        };

        let job = Job {
            name: name.into(),
            task: Box::new(task),
            backtrace,
        };

        let tx = lock(&self.inner.tx);
        let Some(tx) = tx.as_ref() else {
            return Err(PacketError::Shutdown);
        };
        tx.send(job).map_err(|_| PacketError::Shutdown)
    }

    /// Identity of the single worker.
    pub fn thread_id(&self) -> Option<ThreadId> {
        match self.inner.thread_ids.as_slice() {
            [id] => Some(*id),
            ids => {
                tracing::error!(workers = ids.len(), "core context must have exactly one worker");
                None
            }
        }
    }

    pub fn is_core_thread(&self) -> bool {
        self.thread_id() == Some(thread::current().id())
    }

    pub fn is_running(&self) -> bool {
        lock(&self.inner.tx).is_some()
    }

    /// Stop accepting work, drain the queue and join the worker. Idempotent.
    ///
    /// Called from the worker itself it only closes the queue; the worker
    /// exits once the remaining tasks have run.
    pub fn shutdown(&self) -> Result<()> {
        // dropping the only sender closes the queue behind the last accepted job
        if lock(&self.inner.tx).take().is_none() {
            return Ok(());
        }

        if self.is_core_thread() {
            return Ok(());
        }

        let workers: Vec<JoinHandle<()>> = lock(&self.inner.workers).drain(..).collect();
        for w in workers {
            w.join()
                .map_err(|_| PacketError::Internal("core worker panicked".into()))?;
        }

        tracing::info!("core context stopped");
        Ok(())
    }
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn drain(mut rx: mpsc::UnboundedReceiver<Job>, threshold: Duration, metrics: Arc<ClientMetrics>) {
    while let Some(Job { name, task, backtrace }) = rx.blocking_recv() {
        let started = Instant::now();
        let outcome = catch_unwind(AssertUnwindSafe(task));
        let elapsed = started.elapsed();

        metrics.core_tasks.inc(&[]);
        metrics.core_task_duration.observe(&[], elapsed);

        if let Err(payload) = outcome {
            let panic = panic_message(payload.as_ref());
            tracing::error!(task = %name, panic, "core task panicked");
        }
        if elapsed > threshold {
            report_stall(&name, elapsed, backtrace.as_ref(), &metrics);
        }
    }
}

/// Diagnostic only: the task already ran to completion.
fn report_stall(
    name: &str,
    elapsed: Duration,
    backtrace: Option<&Backtrace>,
    metrics: &ClientMetrics,
) {
    let Some(bt) = backtrace.filter(|b| b.status() == BacktraceStatus::Captured) else {
        return;
    };
    metrics.core_stalls.inc(&[("task", name)]);
    tracing::warn!(
        target: "network_log",
        task = %name,
        elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
        "ATTENTION! Core locked\n\n{bt}"
    );
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "non-string panic payload"
    }
}
