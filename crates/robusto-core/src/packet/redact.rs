//! Log redaction attached to a single request.
//!
//! A `LogRedactor` travels inside the `PacketRequest` it was built for, so it
//! lives exactly as long as that request/response cycle. Transports run every
//! line they log through `redact`.

/// Replacement for scrubbed values.
pub const MASK: &str = "***";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Marker {
    /// Any occurrence of the exact substring.
    Literal(String),
    /// Value of `name=...` in a URL query.
    Query(String),
    /// String value of `"name": "..."` in a JSON document.
    Json(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogRedactor {
    markers: Vec<Marker>,
}

impl LogRedactor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_literal(&mut self, value: impl Into<String>) -> &mut Self {
        let value = value.into();
        if !value.is_empty() {
            self.markers.push(Marker::Literal(value));
        }
        self
    }

    pub fn add_query_marker(&mut self, name: impl Into<String>) -> &mut Self {
        self.markers.push(Marker::Query(name.into()));
        self
    }

    pub fn add_json_marker(&mut self, name: impl Into<String>) -> &mut Self {
        self.markers.push(Marker::Json(name.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn redact(&self, text: &str) -> String {
        let mut out = text.to_string();
        for m in &self.markers {
            out = match m {
                Marker::Literal(v) => out.replace(v.as_str(), MASK),
                Marker::Query(name) => redact_query(&out, name),
                Marker::Json(name) => redact_json(&out, name),
            };
        }
        out
    }

    /// Lossy UTF-8 view of a body, redacted.
    pub fn redact_bytes(&self, bytes: &[u8]) -> String {
        self.redact(&String::from_utf8_lossy(bytes))
    }
}

fn redact_query(text: &str, name: &str) -> String {
    let needle = format!("{name}=");
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(pos) = rest.find(&needle) {
        let (head, tail) = rest.split_at(pos);
        let prev = head.chars().last().or_else(|| out.chars().last());
        let at_boundary = matches!(prev, None | Some('?') | Some('&'));

        out.push_str(head);
        out.push_str(&needle);
        let value = tail.get(needle.len()..).unwrap_or("");

        if at_boundary {
            let end = value
                .find(|c: char| c == '&' || c == '"' || c.is_whitespace())
                .unwrap_or(value.len());
            out.push_str(MASK);
            rest = value.get(end..).unwrap_or("");
        } else {
            // e.g. `xaimsid=`; not our parameter
            rest = value;
        }
    }

    out.push_str(rest);
    out
}

fn redact_json(text: &str, name: &str) -> String {
    let needle = format!("\"{name}\"");
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(pos) = rest.find(&needle) {
        let (head, tail) = rest.split_at(pos + needle.len());
        out.push_str(head);
        rest = tail;

        let Some(after_colon) = tail.trim_start().strip_prefix(':') else { continue };
        let Some(body) = after_colon.trim_start().strip_prefix('"') else { continue };
        let Some(end) = closing_quote(body) else { continue };

        // separators up to and including the opening quote stay as they were
        out.push_str(tail.get(..tail.len() - body.len()).unwrap_or(""));
        out.push_str(MASK);
        rest = body.get(end..).unwrap_or("");
    }

    out.push_str(rest);
    out
}

fn closing_quote(s: &str) -> Option<usize> {
    let mut escaped = false;
    for (i, c) in s.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '"' => return Some(i),
            _ => {}
        }
    }
    None
}
