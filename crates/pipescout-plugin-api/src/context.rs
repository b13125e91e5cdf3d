//! Per-request correlation data
//!
//! A `RequestContext` is built once per execute call and passed down
//! explicitly; nothing here is stored globally.

use std::collections::BTreeMap;

use uuid::Uuid;

/// Tracking key carrying the caller's request id
pub const REQUEST_ID_KEY: &str = "ch-request-id";

#[derive(Debug, Clone)]
pub struct RequestContext {
    request_id: String,
    tracking_info: BTreeMap<String, String>,
}

impl RequestContext {
    /// Builds a context from the raw tracking info sent with a request.
    ///
    /// Only string entries are kept; other values are skipped. Tracking info
    /// that is not a JSON object is logged and ignored. A missing or empty
    /// request id is replaced with a fresh UUID, which is also written back
    /// into the tracking map.
    pub fn from_tracking_info(raw: Option<&serde_json::Value>) -> Self {
        let mut tracking_info = match raw {
            Some(value) => decode_tracking_info(value),
            None => BTreeMap::new(),
        };

        let request_id = match tracking_info.get(REQUEST_ID_KEY) {
            Some(id) if !id.is_empty() => id.clone(),
            _ => {
                let id = Uuid::new_v4().to_string();
                tracking_info.insert(REQUEST_ID_KEY.to_string(), id.clone());
                id
            }
        };

        Self {
            request_id,
            tracking_info,
        }
    }

    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    pub fn tracking_info(&self) -> &BTreeMap<String, String> {
        &self.tracking_info
    }

    /// Span that scopes every event logged for this request
    pub fn span(&self) -> tracing::Span {
        tracing::info_span!(
            "execute",
            request_id = %self.request_id,
            tracking = ?self.tracking_info
        )
    }
}

fn decode_tracking_info(value: &serde_json::Value) -> BTreeMap<String, String> {
    let entries: BTreeMap<String, serde_json::Value> = match serde_json::from_value(value.clone())
    {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(error = %e, "Unable to decode tracking info");
            return BTreeMap::new();
        }
    };

    entries
        .into_iter()
        .filter_map(|(key, value)| match value {
            serde_json::Value::String(s) => Some((key, s)),
            other => {
                tracing::debug!(%key, value = %other, "Skipping non-string tracking entry");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_supplied_request_id() {
        let raw = serde_json::json!({ "ch-request-id": "req-42", "tenant": "acme" });
        let ctx = RequestContext::from_tracking_info(Some(&raw));
        assert_eq!(ctx.request_id(), "req-42");
        assert_eq!(ctx.tracking_info().get("tenant").map(String::as_str), Some("acme"));
    }

    #[test]
    fn test_generates_request_id_when_missing() {
        let ctx = RequestContext::from_tracking_info(None);
        assert!(Uuid::parse_str(ctx.request_id()).is_ok());
        assert_eq!(
            ctx.tracking_info().get(REQUEST_ID_KEY).map(String::as_str),
            Some(ctx.request_id())
        );
    }

    #[test]
    fn test_empty_request_id_is_replaced() {
        let raw = serde_json::json!({ "ch-request-id": "" });
        let ctx = RequestContext::from_tracking_info(Some(&raw));
        assert!(!ctx.request_id().is_empty());
    }

    #[test]
    fn test_non_string_tracking_entries_are_skipped() {
        let raw = serde_json::json!({
            "ch-request-id": "req-42",
            "attempt": 1,
            "tenant": "acme",
            "tags": ["a"]
        });
        let ctx = RequestContext::from_tracking_info(Some(&raw));

        assert_eq!(ctx.request_id(), "req-42");
        assert_eq!(ctx.tracking_info().len(), 2);
        assert_eq!(ctx.tracking_info().get("tenant").map(String::as_str), Some("acme"));
        assert!(!ctx.tracking_info().contains_key("attempt"));
    }

    #[test]
    fn test_non_string_request_id_is_replaced() {
        let raw = serde_json::json!({ "ch-request-id": 42 });
        let ctx = RequestContext::from_tracking_info(Some(&raw));
        assert!(Uuid::parse_str(ctx.request_id()).is_ok());
    }

    #[test]
    fn test_malformed_tracking_info_is_ignored() {
        let raw = serde_json::json!(["not", "a", "map"]);
        let ctx = RequestContext::from_tracking_info(Some(&raw));
        assert_eq!(ctx.tracking_info().len(), 1);
        assert!(Uuid::parse_str(ctx.request_id()).is_ok());
    }
}
