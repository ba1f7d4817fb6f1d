#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use robusto_core::packet::redact::{LogRedactor, MASK};
use robusto_core::packet::request::{
    setup_common_and_sign, signature_for, RequestParts, Route, CONTENT_TYPE_JSON,
};
use robusto_core::{HttpVerb, PacketParams, Priority};

fn parts(route: Route, body: &str) -> RequestParts {
    RequestParts {
        method: "getChatMembers",
        route,
        verb: HttpVerb::Get,
        priority: Priority::Normal,
        content_type: CONTENT_TYPE_JSON,
        body: body.as_bytes().to_vec(),
    }
}

#[test]
fn robusto_url_and_signature() {
    let params = PacketParams::new("sid-001", b"secret".to_vec(), "dev")
        .with_host("https://api.example/")
        .with_api_version(92);
    let req =
        setup_common_and_sign(&params, parts(Route::Robusto { api_version: 92 }, "{}")).unwrap();

    let unsigned = "https://api.example/api/v92/rapi/getChatMembers?aimsid=sid-001";
    let sig = signature_for(b"secret", HttpVerb::Get, unsigned, b"{}");
    assert_eq!(req.url, format!("{unsigned}&sig_sha256={sig}"));
    assert_eq!(req.header("content-type"), Some(CONTENT_TYPE_JSON));
}

#[test]
fn no_signature_without_session_key() {
    let params = PacketParams::new("sid", Vec::new(), "dev").with_host("https://h");
    let req = setup_common_and_sign(&params, parts(Route::Wim, "")).unwrap();
    assert_eq!(req.url, "https://h/getChatMembers?aimsid=sid&f=json");
}

#[test]
fn signature_depends_on_body() {
    let a = signature_for(b"k", HttpVerb::Post, "u", b"1");
    let b = signature_for(b"k", HttpVerb::Post, "u", b"2");
    let c = signature_for(b"k", HttpVerb::Get, "u", b"1");
    assert_ne!(a, b);
    assert_ne!(a, c);
    assert_eq!(a, signature_for(b"k", HttpVerb::Post, "u", b"1"));
}

#[test]
fn redactor_registered_unless_full_log() {
    let params =
        PacketParams::new("012.3456.secret:1", b"k".to_vec(), "dev").with_host("https://h");
    let req = setup_common_and_sign(&params, parts(Route::Raw, "x")).unwrap();
    let line = req.log_line();
    assert!(!line.contains("secret"), "{line}");
    assert!(line.contains(&format!("aimsid={MASK}")), "{line}");

    let full = params.clone().with_full_log(true);
    let req = setup_common_and_sign(&full, parts(Route::Raw, "x")).unwrap();
    assert!(req.redactor.is_none());
    assert!(req.log_line().contains("aimsid=012.3456.secret%3A1"));
}

#[test]
fn query_marker_respects_parameter_boundaries() {
    let mut r = LogRedactor::new();
    r.add_query_marker("aimsid");
    assert_eq!(
        r.redact("GET /x?aimsid=abc&xaimsid=keep&f=json"),
        "GET /x?aimsid=***&xaimsid=keep&f=json"
    );
    assert_eq!(r.redact("/a?f=1&aimsid=zz"), "/a?f=1&aimsid=***");
}

#[test]
fn json_marker_masks_string_values() {
    let mut r = LogRedactor::new();
    r.add_json_marker("aimsid");
    assert_eq!(
        r.redact(r#"{"aimsid" : "a\"b", "id":"chat"}"#),
        r#"{"aimsid" : "***", "id":"chat"}"#
    );
    // non-string values are left alone
    assert_eq!(r.redact(r#"{"aimsid":5}"#), r#"{"aimsid":5}"#);
}

#[test]
fn debug_output_hides_session_material() {
    let params = PacketParams::new("sid-visible?", b"key".to_vec(), "dev");
    let dbg = format!("{params:?}");
    assert!(!dbg.contains("sid-visible"));
    assert!(dbg.contains("<3 bytes>"));
}

#[test]
fn query_values_are_percent_encoded() {
    let params = PacketParams::new("a b:c/&", Vec::new(), "dev").with_host("https://h");
    let req = setup_common_and_sign(&params, parts(Route::Wim, "")).unwrap();
    assert_eq!(req.url, "https://h/getChatMembers?aimsid=a+b%3Ac%2F%26&f=json");
}

#[test]
fn nested_methods_and_base_paths() {
    let params = PacketParams::new("sid", Vec::new(), "dev").with_host("https://h/base/");
    let mut p = parts(Route::Robusto { api_version: 61 }, "{}");
    p.method = "thread/subscribers/get";
    let req = setup_common_and_sign(&params, p).unwrap();
    assert_eq!(req.url, "https://h/base/api/v61/rapi/thread/subscribers/get?aimsid=sid");
}

#[test]
fn unusable_host_is_bad_request() {
    for host in ["u.icq.net", "mailto:ops@example.com"] {
        let params = PacketParams::new("sid", Vec::new(), "dev").with_host(host);
        let err = setup_common_and_sign(&params, parts(Route::Raw, "")).unwrap_err();
        assert_eq!(err.kind().as_str(), "BAD_REQUEST", "{host}");
    }
}
