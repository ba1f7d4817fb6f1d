//! WIM envelope vector tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use robusto_core::{Packet, PacketError, ProtocolError, WimCall, WimPacket};
use serde_json::value::RawValue;
use serde_json::Value;

mod vector_loader;
use vector_loader::load;

#[derive(Default)]
struct EchoCall {
    error_data: Option<String>,
}

impl WimCall for EchoCall {
    type Output = Value;

    fn method(&self) -> &'static str {
        "echo"
    }

    fn body(&self) -> robusto_core::Result<Vec<u8>> {
        Ok(Vec::new())
    }

    fn parse_data(&mut self, data: &RawValue) -> robusto_core::Result<Value> {
        robusto_core::protocol::decode_body(data)
    }

    fn parse_error_data(&mut self, data: &RawValue) {
        self.error_data = Some(data.get().to_string());
    }
}

#[test]
fn wim_vectors() {
    let files = [
        "wim_ok.json",
        "wim_no_data.json",
        "wim_auth_required.json",
        "wim_missing_response.json",
        "wim_not_json.json",
    ];

    for f in files {
        let v = load(f);
        let raw = v.frame.decode();
        let mut packet = WimPacket::new(EchoCall::default());
        let res = packet.parse_response(&raw);

        if let Some(err) = v.expect_error {
            let e = res.expect_err("expected error");
            assert_eq!(e.kind().as_str(), err.code, "vector={}", v.description);
            continue;
        }

        let data = res.expect("expected ok reply");
        let ex = v.expect.expect("missing expect block");
        let at = &v.description;
        let code = u64::from(packet.status_code().unwrap());
        assert_eq!(code, ex["code"].as_u64().unwrap(), "vector={at}");
        assert_eq!(!data.is_null(), ex["data_present"].as_bool().unwrap(), "vector={at}");
        assert!(packet.is_status_code_ok(), "vector={at}");
    }
}

#[test]
fn default_wim_error_table() {
    let cases = [
        (400, ProtocolError::InvalidRequest(400)),
        (401, ProtocolError::AuthRequired),
        (460, ProtocolError::InvalidRequest(460)),
        (462, ProtocolError::InvalidRequest(462)),
        (430, ProtocolError::RateLimited(430)),
        (607, ProtocolError::RateLimited(607)),
        (503, ProtocolError::Unhandled(503)),
    ];
    for (code, expected) in cases {
        let mut packet = WimPacket::new(EchoCall::default());
        let body = format!(r#"{{"response":{{"statusCode":{code}}}}}"#);
        let err = packet.parse_response(body.as_bytes()).unwrap_err();
        assert_eq!(err, PacketError::Protocol(expected), "code={code}");
        assert!(!packet.is_status_code_ok());
    }
}

#[test]
fn error_data_is_seen_before_mapping() {
    let mut packet = WimPacket::new(EchoCall::default());
    let body = br#"{"response":{"statusCode":400,"statusText":"Bad","data":{"reason":"x"}}}"#;
    packet.parse_response(body).unwrap_err();
    assert_eq!(packet.call().error_data.as_deref(), Some(r#"{"reason":"x"}"#));
    assert_eq!(packet.status_text(), Some("Bad"));
}
