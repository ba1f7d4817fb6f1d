//! Robusto envelope vector tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use robusto_core::{Packet, RobustoCall, RobustoPacket, RobustoReply};
use serde_json::{json, Value};

mod vector_loader;
use vector_loader::load;

/// Minimal call that hands back whatever `results` held.
struct EchoCall;

impl RobustoCall for EchoCall {
    type Params = Value;
    type Output = Option<Value>;

    fn method(&self) -> &'static str {
        "echo"
    }

    fn params(&self) -> Value {
        json!({})
    }

    fn parse_results(&mut self, reply: &RobustoReply<'_>) -> robusto_core::Result<Option<Value>> {
        reply.results()
    }
}

#[test]
fn robusto_vectors() {
    let files = [
        "robusto_ok.json",
        "robusto_reset_page.json",
        "robusto_no_results.json",
        "robusto_null_results.json",
        "robusto_extra_fields.json",
        "robusto_missing_status.json",
        "robusto_missing_code.json",
        "robusto_code_not_numeric.json",
        "robusto_not_json.json",
        "robusto_truncated.json",
        "robusto_error_code.json",
    ];

    for f in files {
        let v = load(f);
        let raw = v.frame.decode();
        let mut packet = RobustoPacket::new(EchoCall);
        let res = packet.parse_response(&raw);

        if let Some(err) = v.expect_error {
            let e = res.expect_err("expected error");
            assert_eq!(e.kind().as_str(), err.code, "vector={}", v.description);
            assert!(!packet.is_status_code_ok(), "vector={}", v.description);
            continue;
        }

        let results = res.expect("expected ok reply");
        let ex = v.expect.expect("missing expect block");

        let at = &v.description;
        let code = u64::from(packet.status_code().unwrap());
        assert_eq!(code, ex["code"].as_u64().unwrap(), "vector={at}");
        assert_eq!(packet.is_reset_pages(), ex["reset_pages"].as_bool().unwrap(), "vector={at}");
        assert_eq!(results.is_some(), ex["results_present"].as_bool().unwrap(), "vector={at}");
        assert_eq!(packet.is_status_code_ok(), ex["status_ok"].as_bool().unwrap(), "vector={at}");
    }
}

#[test]
fn error_code_is_recorded_before_mapping() {
    let mut packet = RobustoPacket::new(EchoCall);
    let err = packet.parse_response(br#"{"status":{"code":50000}}"#).unwrap_err();
    assert_eq!(packet.status_code(), Some(50000));
    assert_eq!(err, robusto_core::PacketError::from(robusto_core::ProtocolError::Unhandled(50000)));
}

#[test]
fn reset_flag_clears_on_next_reply() {
    let mut packet = RobustoPacket::new(EchoCall);
    packet.parse_response(br#"{"status":{"code":20002},"results":{}}"#).unwrap();
    assert!(packet.is_reset_pages());
    packet.parse_response(br#"{"status":{"code":20000},"results":{}}"#).unwrap();
    assert!(!packet.is_reset_pages());
}

#[test]
fn request_envelope_wraps_params() {
    let packet = RobustoPacket::new(EchoCall);
    assert_eq!(packet.request_body().unwrap(), br#"{"params":{}}"#.to_vec());
}
