// Response shapes at the client boundary.
//
// List endpoints may or may not be paginated depending on backend settings,
// so the envelope is decided once here instead of at every call site.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A page of results in the backend's pagination envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    pub results: Vec<T>,
}

/// A list response: either a `{results: [...]}` envelope or a bare array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListResponse<T> {
    Paginated(Page<T>),
    Bare(Vec<T>),
}

impl<T> ListResponse<T> {
    /// Unwrap to the item list regardless of shape.
    pub fn into_items(self) -> Vec<T> {
        match self {
            Self::Paginated(page) => page.results,
            Self::Bare(items) => items,
        }
    }
}

/// An untyped success body, branched on the declared content type.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// A JSON content type, parsed.
    Json(serde_json::Value),
    /// Any other content type, as raw text (empty for bodiless responses).
    Text { content_type: String, body: String },
}

impl Payload {
    /// Deserialize a JSON payload into a typed value.
    pub fn into_json<T: DeserializeOwned>(self) -> Result<T, Error> {
        match self {
            Self::Json(value) => T::deserialize(&value).map_err(|e| {
                let body = value.to_string();
                let preview: String = body.chars().take(200).collect();
                Error::Deserialization {
                    message: format!("{e} (body preview: {preview:?})"),
                    body,
                }
            }),
            Self::Text { content_type, .. } => Err(Error::UnexpectedPayload {
                content_type: if content_type.is_empty() {
                    "no content type".into()
                } else {
                    content_type
                },
            }),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_paginated_envelope() {
        let list: ListResponse<i64> = serde_json::from_value(json!({
            "count": 10, "next": "http://h/api/v1/posts/?page=2", "previous": null,
            "results": [1, 2]
        }))
        .unwrap();
        assert!(matches!(list, ListResponse::Paginated(Page { count: Some(10), .. })));
        assert_eq!(list.into_items(), vec![1, 2]);
    }

    #[test]
    fn decodes_bare_array() {
        let list: ListResponse<i64> = serde_json::from_value(json!([3, 4, 5])).unwrap();
        assert!(matches!(list, ListResponse::Bare(_)));
        assert_eq!(list.into_items(), vec![3, 4, 5]);
    }

    #[test]
    fn text_payload_is_not_json() {
        let payload = Payload::Text {
            content_type: "text/html".into(),
            body: "<p>hi</p>".into(),
        };
        let err = payload.into_json::<serde_json::Value>().unwrap_err();
        assert!(matches!(err, Error::UnexpectedPayload { .. }));
    }
}
