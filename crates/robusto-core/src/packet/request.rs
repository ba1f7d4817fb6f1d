//! Request preparation: URL routing, common query parameters, signing and
//! redaction registration shared by every packet family.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use bytes::Bytes;
use ring::hmac;
use url::Url;

use crate::error::{PacketError, Result};

use super::params::PacketParams;
use super::redact::LogRedactor;
use super::{HttpVerb, PacketRequest, Priority};

pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const CONTENT_TYPE_TEXT: &str = "text/plain; charset=utf-8";

/// Where a method lives on the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// `{host}/api/v{api_version}/rapi/{method}`
    Robusto { api_version: u32 },
    /// `{host}/{method}` with `f=json`
    Wim,
    /// `{host}/{method}`
    Raw,
}

/// Everything a packet contributes to its request.
#[derive(Debug, Clone)]
pub struct RequestParts {
    pub method: &'static str,
    pub route: Route,
    pub verb: HttpVerb,
    pub priority: Priority,
    pub content_type: &'static str,
    pub body: Vec<u8>,
}

/// Build the final request: URL with session query, signature, headers and
/// (unless `full_log`) a redactor scrubbing the session id.
///
/// Fails with `BadRequest` when the configured host is not a base URL.
pub fn setup_common_and_sign(params: &PacketParams, parts: RequestParts) -> Result<PacketRequest> {
    let mut url = route_url(params.host(), parts.route, parts.method)?;
    {
        let mut query = url.query_pairs_mut();
        query.append_pair("aimsid", params.aimsid());
        if parts.route == Route::Wim {
            query.append_pair("f", "json");
        }
    }

    if !params.session_key().is_empty() {
        let sig = signature_for(params.session_key(), parts.verb, url.as_str(), &parts.body);
        url.query_pairs_mut().append_pair("sig_sha256", &sig);
    }

    let redactor = if params.full_log() {
        None
    } else {
        let mut r = LogRedactor::new();
        r.add_literal(params.aimsid()).add_query_marker("aimsid");
        Some(r)
    };

    Ok(PacketRequest {
        method: parts.method,
        verb: parts.verb,
        url: url.into(),
        headers: vec![("Content-Type".to_string(), parts.content_type.to_string())],
        body: Bytes::from(parts.body),
        priority: parts.priority,
        redactor,
    })
}

fn route_url(host: &str, route: Route, method: &str) -> Result<Url> {
    let mut url = Url::parse(host)
        .map_err(|e| PacketError::BadRequest(format!("invalid host {host:?}: {e}")))?;
    {
        let mut path = url
            .path_segments_mut()
            .map_err(|_| PacketError::BadRequest(format!("host {host:?} cannot be a base url")))?;
        path.pop_if_empty();
        if let Route::Robusto { api_version } = route {
            path.push("api").push(&format!("v{api_version}")).push("rapi");
        }
        // nested methods such as `thread/subscribers/get` span several segments
        path.extend(method.split('/'));
    }
    Ok(url)
}

/// HMAC-SHA256 over `"{VERB}&{url}&{body}"`, base64url without padding.
pub fn signature_for(key: &[u8], verb: HttpVerb, url: &str, body: &[u8]) -> String {
    let key = hmac::Key::new(hmac::HMAC_SHA256, key);
    let mut ctx = hmac::Context::with_key(&key);
    ctx.update(verb.as_str().as_bytes());
    ctx.update(b"&");
    ctx.update(url.as_bytes());
    ctx.update(b"&");
    ctx.update(body);
    URL_SAFE_NO_PAD.encode(ctx.sign().as_ref())
}
