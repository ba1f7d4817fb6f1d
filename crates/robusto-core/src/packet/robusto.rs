//! Robusto envelope handling shared by every robusto call.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::value::RawValue;

use crate::error::{PacketError, Result};
use crate::protocol::robusto::{decode_response, RequestEnvelope};
use crate::protocol::status::{
    is_robusto_success, robusto_default_error, ROBUSTO_OK, ROBUSTO_RESET_PAGE,
};
use crate::protocol::decode_body;

use super::params::PacketParams;
use super::request::{setup_common_and_sign, RequestParts, Route, CONTENT_TYPE_JSON};
use super::{HttpVerb, Packet, PacketRequest, Priority};

/// Success-family reply handed to `RobustoCall::parse_results`.
#[derive(Debug, Clone, Copy)]
pub struct RobustoReply<'a> {
    pub code: u32,
    /// Server invalidated the cursor; the caller must restart from page one.
    pub reset_pages: bool,
    pub results: Option<&'a RawValue>,
}

impl RobustoReply<'_> {
    /// Decode `results`, `None` if the server omitted it.
    pub fn results<T: DeserializeOwned>(&self) -> Result<Option<T>> {
        self.results.map(decode_body).transpose()
    }

    /// Decode `results`, falling back to `T::default()` when it is absent.
    pub fn results_or_default<T: DeserializeOwned + Default>(&self) -> Result<T> {
        Ok(self.results()?.unwrap_or_default())
    }
}

/// Per-call strategy plugged into [`RobustoPacket`].
pub trait RobustoCall: Send + 'static {
    /// Typed body placed under `params`.
    type Params: Serialize;
    type Output: Send + 'static;

    fn method(&self) -> &'static str;

    fn verb(&self) -> HttpVerb {
        HttpVerb::Get
    }

    fn priority(&self) -> Priority {
        Priority::Normal
    }

    fn api_version(&self, params: &PacketParams) -> u32 {
        params.api_version()
    }

    /// Cursor-paginated calls treat the reset-page code as ok.
    fn paginated(&self) -> bool {
        false
    }

    fn params(&self) -> Self::Params;

    fn parse_results(&mut self, reply: &RobustoReply<'_>) -> Result<Self::Output>;

    /// Map a code outside the success family.
    fn on_error_code(&self, code: u32) -> PacketError {
        robusto_default_error(code).into()
    }
}

/// Robusto envelope around a concrete call.
#[derive(Debug, Clone)]
pub struct RobustoPacket<C> {
    call: C,
    status_code: Option<u32>,
    reset_pages: bool,
}

impl<C: RobustoCall> RobustoPacket<C> {
    pub fn new(call: C) -> Self {
        Self {
            call,
            status_code: None,
            reset_pages: false,
        }
    }

    pub fn call(&self) -> &C {
        &self.call
    }

    pub fn into_call(self) -> C {
        self.call
    }

    /// Set by the last reply carrying the reset-page code.
    pub fn is_reset_pages(&self) -> bool {
        self.reset_pages
    }

    /// Serialized `{"params": ...}` body.
    pub fn request_body(&self) -> Result<Vec<u8>> {
        RequestEnvelope::new(self.call.params()).to_vec()
    }
}

impl<C: RobustoCall> From<C> for RobustoPacket<C> {
    fn from(call: C) -> Self {
        Self::new(call)
    }
}

impl<C: RobustoCall> Packet for RobustoPacket<C> {
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
            route: Route::Robusto {
                api_version: self.call.api_version(params),
            },
            verb: self.call.verb(),
            priority: self.call.priority(),
            content_type: CONTENT_TYPE_JSON,
            body: self.request_body()?,
        };
        setup_common_and_sign(params, parts)
    }

    fn parse_response(&mut self, body: &[u8]) -> Result<C::Output> {
        self.reset_pages = false;
        let env = decode_response(body)?;
        let code = env.status.code;
        self.status_code = Some(code);

        if !is_robusto_success(code) {
            let method = self.call.method();
            tracing::debug!(method, code, "robusto status outside success family");
            return Err(self.call.on_error_code(code));
        }

        self.reset_pages = code == ROBUSTO_RESET_PAGE;
        let reply = RobustoReply {
            code,
            reset_pages: self.reset_pages,
            results: env.results.as_deref(),
        };
        self.call.parse_results(&reply)
    }

    fn status_code(&self) -> Option<u32> {
        self.status_code
    }

    fn is_status_code_ok(&self) -> bool {
        match self.status_code {
            Some(ROBUSTO_OK) => true,
            Some(ROBUSTO_RESET_PAGE) => self.call.paginated(),
            _ => false,
        }
    }
}
