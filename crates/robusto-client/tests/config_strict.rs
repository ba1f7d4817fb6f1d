#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use robusto_client::config::{self, BacktraceMode};

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
session:
  hots: "https://u.icq.net" # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.kind().as_str(), "CONFIG");
}

#[test]
fn ok_minimal_config() {
    let cfg = config::load_from_str("version: 1\n").expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.session.host, "https://u.icq.net");
    assert_eq!(cfg.session.api_version, 92);
    assert!(!cfg.session.full_log);
    assert_eq!(cfg.context.thread_name, "core main");
    assert_eq!(cfg.context.stall_threshold_ms, 200);
    assert_eq!(cfg.context.backtraces, BacktraceMode::Env);
}

#[test]
fn full_config() {
    let ok = r#"
version: 1
session:
  host: "http://localhost:8080/"
  api_version: 61
  full_log: true
context:
  thread_name: "core"
  stall_threshold_ms: 50
  backtraces: always
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.context.backtraces, BacktraceMode::Always);

    let params = cfg.packet_params("sid", b"key".to_vec(), "dev");
    assert_eq!(params.host(), "http://localhost:8080");
    assert_eq!(params.api_version(), 61);
    assert!(params.full_log());
}

#[test]
fn rejects_out_of_range_values() {
    for bad in [
        "version: 2\n",
        "version: 1\nsession:\n  host: \"u.icq.net\"\n",
        "version: 1\nsession:\n  host: \"ftp://u.icq.net\"\n",
        "version: 1\nsession:\n  host: \"https://u.icq.net/?x=1\"\n",
        "version: 1\nsession:\n  api_version: 60\n",
        "version: 1\ncontext:\n  stall_threshold_ms: 0\n",
        "version: 1\ncontext:\n  stall_threshold_ms: 60001\n",
        "version: 1\ncontext:\n  thread_name: \"  \"\n",
        "version: 1\ncontext:\n  backtraces: sometimes\n",
    ] {
        let err = config::load_from_str(bad).expect_err(bad);
        assert_eq!(err.kind().as_str(), "CONFIG", "{bad}");
    }
}

#[test]
fn missing_file_is_config_error() {
    let err = config::load_from_file("/nonexistent/robusto.yaml").expect_err("must fail");
    assert_eq!(err.kind().as_str(), "CONFIG");
}
