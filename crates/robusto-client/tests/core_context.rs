#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use robusto_client::config::{BacktraceMode, ContextSection};
use robusto_client::context::CoreContext;
use robusto_client::obs::ClientMetrics;
use robusto_core::ErrorKind;

fn section(stall_threshold_ms: u64, backtraces: BacktraceMode) -> ContextSection {
    ContextSection {
        thread_name: "core main".into(),
        stall_threshold_ms,
        backtraces,
    }
}

fn start(backtraces: BacktraceMode) -> (CoreContext, Arc<ClientMetrics>) {
    let metrics = Arc::new(ClientMetrics::default());
    let ctx = CoreContext::start(&section(200, backtraces), Arc::clone(&metrics)).unwrap();
    (ctx, metrics)
}

#[test]
fn tasks_run_in_post_order() {
    let (ctx, _) = start(BacktraceMode::Off);
    let seen = Arc::new(Mutex::new(Vec::new()));

    for i in 0..200 {
        let seen = Arc::clone(&seen);
        ctx.post(move || seen.lock().unwrap().push(i)).unwrap();
    }
    ctx.shutdown().unwrap();

    assert_eq!(*seen.lock().unwrap(), (0..200).collect::<Vec<_>>());
}

#[test]
fn concurrent_posters_keep_per_poster_order() {
    let (ctx, metrics) = start(BacktraceMode::Off);
    let seen = Arc::new(Mutex::new(Vec::new()));

    let posters: Vec<_> = (0..4)
        .map(|p| {
            let ctx = ctx.clone();
            let seen = Arc::clone(&seen);
            thread::spawn(move || {
                for i in 0..100 {
                    let seen = Arc::clone(&seen);
                    ctx.post(move || seen.lock().unwrap().push((p, i))).unwrap();
                }
            })
        })
        .collect();
    for p in posters {
        p.join().unwrap();
    }
    ctx.shutdown().unwrap();

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 400);
    for p in 0..4 {
        let order: Vec<_> = seen.iter().filter(|(q, _)| *q == p).map(|(_, i)| *i).collect();
        assert_eq!(order, (0..100).collect::<Vec<_>>(), "poster {p}");
    }
    assert_eq!(metrics.core_tasks.total(), 400);
}

#[test]
fn every_task_runs_on_the_core_thread() {
    let (ctx, _) = start(BacktraceMode::Off);
    let core_id = ctx.thread_id().expect("single worker");
    assert_ne!(core_id, thread::current().id());
    assert!(!ctx.is_core_thread());

    let (tx, rx) = mpsc::channel();
    for _ in 0..10 {
        let tx = tx.clone();
        let handle = ctx.clone();
        ctx.post(move || tx.send((thread::current().id(), handle.is_core_thread())).unwrap())
            .unwrap();
    }
    drop(tx);
    ctx.shutdown().unwrap();

    let runs: Vec<_> = rx.iter().collect();
    assert_eq!(runs.len(), 10);
    assert!(runs.iter().all(|(id, on_core)| *id == core_id && *on_core));
}

#[test]
fn worker_thread_is_named() {
    let (ctx, _) = start(BacktraceMode::Off);
    let (tx, rx) = mpsc::channel();
    ctx.post(move || tx.send(thread::current().name().map(str::to_string)).unwrap())
        .unwrap();
    assert_eq!(rx.recv().unwrap().as_deref(), Some("core main"));
    ctx.shutdown().unwrap();
}

#[test]
fn shutdown_drains_then_rejects() {
    let (ctx, _) = start(BacktraceMode::Off);
    let done = Arc::new(AtomicUsize::new(0));

    for _ in 0..10 {
        let done = Arc::clone(&done);
        ctx.post(move || {
            thread::sleep(Duration::from_millis(2));
            done.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();
    }
    ctx.shutdown().unwrap();
    assert_eq!(done.load(Ordering::SeqCst), 10);
    assert!(!ctx.is_running());

    let err = ctx.post(|| {}).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Shutdown);

    // second call is a no-op
    ctx.shutdown().unwrap();
}

#[test]
fn panicking_task_does_not_kill_the_worker() {
    let (ctx, metrics) = start(BacktraceMode::Off);
    let after = Arc::new(AtomicUsize::new(0));

    ctx.post_named("boom", || panic!("task failure")).unwrap();
    let flag = Arc::clone(&after);
    ctx.post(move || {
        flag.fetch_add(1, Ordering::SeqCst);
    })
    .unwrap();
    ctx.shutdown().unwrap();

    assert_eq!(after.load(Ordering::SeqCst), 1);
    assert_eq!(metrics.core_tasks.total(), 2);
}

#[test]
fn slow_task_is_reported_when_backtrace_captured() {
    let metrics = Arc::new(ClientMetrics::default());
    let cfg = section(10, BacktraceMode::Always);
    let ctx = CoreContext::start(&cfg, Arc::clone(&metrics)).unwrap();

    ctx.post_named("slow", || thread::sleep(Duration::from_millis(40))).unwrap();
    ctx.post_named("fast", || {}).unwrap();
    ctx.shutdown().unwrap();

    assert_eq!(metrics.core_stalls.get(&[("task", "slow")]), 1);
    assert_eq!(metrics.core_stalls.get(&[("task", "fast")]), 0);
    assert_eq!(metrics.core_task_duration.count(&[]), 2);
}

#[test]
fn slow_task_is_silent_without_backtrace() {
    let metrics = Arc::new(ClientMetrics::default());
    let ctx = CoreContext::start(&section(10, BacktraceMode::Off), Arc::clone(&metrics)).unwrap();

    ctx.post_named("slow", || thread::sleep(Duration::from_millis(40))).unwrap();
    ctx.shutdown().unwrap();

    assert_eq!(metrics.core_stalls.total(), 0);
}

#[test]
fn shutdown_from_a_task_does_not_deadlock() {
    let (ctx, _) = start(BacktraceMode::Off);
    let inner = ctx.clone();
    let (tx, rx) = mpsc::channel();

    ctx.post(move || tx.send(inner.shutdown().is_ok()).unwrap()).unwrap();
    assert!(rx.recv_timeout(Duration::from_secs(5)).unwrap());
    assert_eq!(ctx.post(|| {}).unwrap_err().kind(), ErrorKind::Shutdown);
}

#[test]
fn accepted_posts_always_run_when_racing_shutdown() {
    for round in 0..100 {
        let (ctx, _) = start(BacktraceMode::Off);
        let accepted = Arc::new(AtomicUsize::new(0));
        let ran = Arc::new(AtomicUsize::new(0));

        let posters: Vec<_> = (0..4)
            .map(|_| {
                let ctx = ctx.clone();
                let accepted = Arc::clone(&accepted);
                let ran = Arc::clone(&ran);
                thread::spawn(move || {
                    for _ in 0..200 {
                        let ran = Arc::clone(&ran);
                        let posted = ctx.post(move || {
                            ran.fetch_add(1, Ordering::SeqCst);
                        });
                        match posted {
                            Ok(()) => {
                                accepted.fetch_add(1, Ordering::SeqCst);
                            }
                            Err(e) => assert_eq!(e.kind(), ErrorKind::Shutdown),
                        }
                    }
                })
            })
            .collect();

        thread::yield_now();
        ctx.shutdown().unwrap();
        for p in posters {
            p.join().unwrap();
        }

        assert_eq!(
            ran.load(Ordering::SeqCst),
            accepted.load(Ordering::SeqCst),
            "round {round}"
        );
    }
}
