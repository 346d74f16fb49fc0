//! Request correlation
//!
//! Every inbound HTTP request gets a `RequestContext` so that the access log
//! line, operation events and any failure report can be tied together. A
//! caller may supply its own id in the `X-Request-Id` header; it is accepted
//! only if it parses as a UUID, otherwise a fresh UUIDv7 is minted.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Header carrying the request id in both directions
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Identifier of one request, always a hyphenated UUID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(Uuid);

impl RequestId {
    /// Time-ordered id for a request that arrived without one
    pub fn generate() -> Self {
        Self(Uuid::now_v7())
    }

    /// Accept a caller-supplied id, if well formed
    pub fn parse(raw: &str) -> Option<Self> {
        raw.trim().parse().ok()
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl FromStr for RequestId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.hyphenated(), f)
    }
}

/// Per-request data attached to the request span
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub request_id: RequestId,
    pub method: String,
    pub path: String,
}

impl RequestContext {
    /// Context for a request, reusing `supplied` when it is a valid id
    pub fn new(method: impl Into<String>, path: impl Into<String>, supplied: Option<&str>) -> Self {
        Self {
            request_id: supplied
                .and_then(RequestId::parse)
                .unwrap_or_else(RequestId::generate),
            method: method.into(),
            path: path.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_v7_and_distinct() {
        let a = RequestId::generate();
        let b = RequestId::generate();

        assert_ne!(a, b);
        assert_eq!(a.as_uuid().get_version_num(), 7);
    }

    #[test]
    fn test_supplied_id_is_reused_when_valid() {
        let supplied = "0190a5b2-7c1e-7d3a-9f00-1234567890ab";
        let ctx = RequestContext::new("GET", "/snippet/view", Some(supplied));

        assert_eq!(ctx.request_id.to_string(), supplied);
        assert_eq!(ctx.method, "GET");
        assert_eq!(ctx.path, "/snippet/view");
    }

    #[test]
    fn test_malformed_id_is_replaced() {
        for supplied in ["", "req-1", "<script>", "0190a5b2-7c1e"] {
            let ctx = RequestContext::new("POST", "/snippet/create", Some(supplied));
            assert_ne!(ctx.request_id.to_string(), supplied);
            assert_eq!(ctx.request_id.as_uuid().get_version_num(), 7);
        }
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let id = RequestId::parse("0190a5b2-7c1e-7d3a-9f00-1234567890ab").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"0190a5b2-7c1e-7d3a-9f00-1234567890ab\"");
        assert_eq!(serde_json::from_str::<RequestId>(&json).unwrap(), id);
    }
}
