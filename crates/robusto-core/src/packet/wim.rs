//! Plain WIM envelope handling.

use serde_json::value::RawValue;

use crate::error::{PacketError, Result};
use crate::protocol::status::{wim_default_error, WIM_OK};
use crate::protocol::wim::decode_response;

use super::params::PacketParams;
use super::request::{setup_common_and_sign, RequestParts, Route, CONTENT_TYPE_JSON};
use super::{HttpVerb, Packet, PacketRequest, Priority};

/// Per-call strategy plugged into [`WimPacket`].
pub trait WimCall: Send + 'static {
    type Output: Send + 'static;

    fn method(&self) -> &'static str;

    fn verb(&self) -> HttpVerb {
        HttpVerb::Get
    }

    fn priority(&self) -> Priority {
        Priority::Normal
    }

    /// Serialized request body (empty for bodiless GETs).
    fn body(&self) -> Result<Vec<u8>>;

    /// `data` of a 200 reply.
    fn parse_data(&mut self, data: &RawValue) -> Result<Self::Output>;

    /// 200 reply without `data`.
    fn on_empty_data(&mut self) -> Result<Self::Output> {
        Err(PacketError::ResultParse("response has no data".into()))
    }

    /// `data` of a non-200 reply, seen before `on_error_code`.
    fn parse_error_data(&mut self, _data: &RawValue) {}

    fn on_error_code(&self, code: u32) -> PacketError {
        wim_default_error(code).into()
    }
}

/// WIM envelope around a concrete call.
#[derive(Debug, Clone)]
pub struct WimPacket<C> {
    call: C,
    status_code: Option<u32>,
    status_text: Option<String>,
}

impl<C: WimCall> WimPacket<C> {
    pub fn new(call: C) -> Self {
        Self {
            call,
            status_code: None,
            status_text: None,
        }
    }

    pub fn call(&self) -> &C {
        &self.call
    }

    pub fn into_call(self) -> C {
        self.call
    }

    pub fn status_text(&self) -> Option<&str> {
        self.status_text.as_deref()
    }
}

impl<C: WimCall> From<C> for WimPacket<C> {
    fn from(call: C) -> Self {
        Self::new(call)
    }
}

impl<C: WimCall> Packet for WimPacket<C> {
    type Output = C::Output;

    fn method(&self) -> &'static str {
        self.call.method()
    }

    fn verb(&self) -> HttpVerb {
        self.call.verb()
    }

    fn priority(&self) -> Priority {
        self.call.priority()
    }

    fn build_request(&self, params: &PacketParams) -> Result<PacketRequest> {
        let parts = RequestParts {
            method: self.call.method(),
            route: Route::Wim,
            verb: self.call.verb(),
            priority: self.call.priority(),
            content_type: CONTENT_TYPE_JSON,
            body: self.call.body()?,
        };
        setup_common_and_sign(params, parts)
    }

    fn parse_response(&mut self, body: &[u8]) -> Result<C::Output> {
        let resp = decode_response(body)?;
        self.status_code = Some(resp.status_code);
        self.status_text = resp.status_text;

        if resp.status_code != WIM_OK {
            if let Some(data) = resp.data.as_deref() {
                self.call.parse_error_data(data);
            }
            let code = resp.status_code;
            tracing::debug!(method = self.call.method(), code, "wim status not ok");
            return Err(self.call.on_error_code(resp.status_code));
        }

        match resp.data.as_deref() {
            Some(data) => self.call.parse_data(data),
            None => self.call.on_empty_data(),
        }
    }

    fn status_code(&self) -> Option<u32> {
        self.status_code
    }

    fn is_status_code_ok(&self) -> bool {
        self.status_code == Some(WIM_OK)
    }
}
