//! Raw presence/activity stat push.
//!
//! No envelope: the body is sent as-is and any reply (including none) means
//! the stat was delivered. Runs as a blocking request.

use robusto_core::error::Result;
use robusto_core::packet::request::{setup_common_and_sign, RequestParts, Route, CONTENT_TYPE_TEXT};
use robusto_core::{Execution, HttpVerb, Packet, PacketParams, PacketRequest, Priority};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendImStat {
    data: String,
    delivered: bool,
}

impl SendImStat {
    pub fn new(data: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            delivered: false,
        }
    }

    pub fn data(&self) -> &str {
        &self.data
    }
}

impl Packet for SendImStat {
    type Output = ();

    fn method(&self) -> &'static str {
        "imstat"
    }

    fn verb(&self) -> HttpVerb {
        HttpVerb::Post
    }

    fn priority(&self) -> Priority {
        Priority::Low
    }

    fn execution(&self) -> Execution {
        Execution::Blocking
    }

    fn build_request(&self, params: &PacketParams) -> Result<PacketRequest> {
        let parts = RequestParts {
            method: self.method(),
            route: Route::Raw,
            verb: HttpVerb::Post,
            priority: Priority::Low,
            content_type: CONTENT_TYPE_TEXT,
            body: self.data.as_bytes().to_vec(),
        };
        setup_common_and_sign(params, parts)
    }

    fn parse_response(&mut self, _body: &[u8]) -> Result<()> {
        self.delivered = true;
        Ok(())
    }

    fn on_empty_response(&mut self) -> Result<()> {
        self.delivered = true;
        Ok(())
    }

    fn status_code(&self) -> Option<u32> {
        None
    }

    fn is_status_code_ok(&self) -> bool {
        self.delivered
    }
}
