//! `gdpr/accept`: records the user's decision on a legal agreement.
//!
//! Plain WIM call. The backend may answer 200 without `data`, which counts as
//! success, and explains rejections in the error body's `reason`.

use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

use robusto_core::error::{PacketError, ProtocolError, Result};
use robusto_core::protocol::decode_body;
use robusto_core::protocol::status::wim_default_error;
use robusto_core::{HttpVerb, Priority, WimCall};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgreementType {
    /// Privacy policy.
    GdprPp,
}

impl AgreementType {
    pub fn as_str(self) -> &'static str {
        match self {
            AgreementType::GdprPp => "gdpr_pp",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgreementAction {
    Accept,
    Decline,
    /// Forget any earlier decision.
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcceptAgreementInfo {
    pub agreement: AgreementType,
    pub action: AgreementAction,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GdprAgreement {
    info: AcceptAgreementInfo,
    reject_reason: Option<String>,
}

impl GdprAgreement {
    pub fn new(agreement: AgreementType, action: AgreementAction) -> Self {
        Self {
            info: AcceptAgreementInfo { agreement, action },
            reject_reason: None,
        }
    }

    pub fn accept(agreement: AgreementType) -> Self {
        Self::new(agreement, AgreementAction::Accept)
    }

    pub fn info(&self) -> AcceptAgreementInfo {
        self.info
    }

    /// `reason` from the last error body, if the server gave one.
    pub fn reject_reason(&self) -> Option<&str> {
        self.reject_reason.as_deref()
    }
}

#[derive(Debug, Default, Serialize)]
struct AgreementBody {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    accept: Vec<&'static str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    decline: Vec<&'static str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    reset: Vec<&'static str>,
}

#[derive(Debug, Deserialize)]
struct ErrorData {
    #[serde(default)]
    reason: Option<String>,
}

impl WimCall for GdprAgreement {
    type Output = AcceptAgreementInfo;

    fn method(&self) -> &'static str {
        "gdpr/accept"
    }

    fn verb(&self) -> HttpVerb {
        HttpVerb::Post
    }

    fn priority(&self) -> Priority {
        Priority::High
    }

    fn body(&self) -> Result<Vec<u8>> {
        let name = self.info.agreement.as_str();
        let mut body = AgreementBody::default();
        match self.info.action {
            AgreementAction::Accept => body.accept.push(name),
            AgreementAction::Decline => body.decline.push(name),
            AgreementAction::Reset => body.reset.push(name),
        }
        serde_json::to_vec(&body).map_err(|e| PacketError::BadRequest(e.to_string()))
    }

    fn parse_data(&mut self, data: &RawValue) -> Result<AcceptAgreementInfo> {
        // content is informational only; it just has to be JSON
        decode_body::<serde::de::IgnoredAny>(data)?;
        Ok(self.info)
    }

    fn on_empty_data(&mut self) -> Result<AcceptAgreementInfo> {
        Ok(self.info)
    }

    fn parse_error_data(&mut self, data: &RawValue) {
        self.reject_reason = decode_body::<ErrorData>(data)
            .ok()
            .and_then(|d| d.reason)
            .filter(|r| !r.is_empty());
    }

    fn on_error_code(&self, code: u32) -> PacketError {
        match &self.reject_reason {
            Some(reason) => ProtocolError::Rejected {
                code,
                reason: reason.clone(),
            }
            .into(),
            None => wim_default_error(code).into(),
        }
    }
}
