//! Function handlers and the response envelope they return to the host.
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{error::Error, provider::DocumentProvider};

/// Event payload handed to a function by the host. Documentation handlers ignore it.
pub type InvocationEvent = serde_json::Value;

pub const CONTENT_TYPE: &str = "content-type";

/// Result of a handler invocation in the shape the host expects.
///
/// Serializes with the exact wire names `statusCode`, `body` and `headers`.
/// `headers` is left out when the handler sets none.
#[non_exhaustive]
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "debug", derive(Debug))]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub status_code: u16,

    pub body: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<IndexMap<String, String>>,
}

impl ResponseEnvelope {
    /// Successful response with given body and no headers.
    pub fn ok<S: Into<String>>(body: S) -> Self {
        Self {
            status_code: 200,
            body: body.into(),
            headers: None,
        }
    }

    pub fn with_header<N: Into<String>, V: Into<String>>(mut self, name: N, value: V) -> Self {
        self.headers
            .get_or_insert_with(IndexMap::new)
            .insert(name.into(), value.into());

        self
    }
}

/// Function handler invoked once per request.
///
/// Implementations are stateless apart from what they were built with, so a
/// single instance may serve any number of concurrent invocations.
pub trait Handler {
    fn handle(&self, event: &InvocationEvent) -> Result<ResponseEnvelope, Error>;
}

/// Serves the document held by a [`DocumentProvider`] as JSON.
///
/// The response carries no content type header unless
/// [`JsonDocumentHandler::with_json_content_type`] is used.
///
/// # Examples
///
/// ```rust
/// # use autoswagger::{handler::{Handler, JsonDocumentHandler}, openapi::Swagger, provider::DocumentProvider};
/// let handler = JsonDocumentHandler::new(DocumentProvider::new(Swagger::default()))
///     .with_json_content_type();
///
/// let response = handler.handle(&serde_json::Value::Null)?;
///
/// assert_eq!(response.status_code, 200);
/// # Ok::<(), autoswagger::error::Error>(())
/// ```
#[derive(Clone)]
#[cfg_attr(feature = "debug", derive(Debug))]
pub struct JsonDocumentHandler {
    provider: DocumentProvider,
    content_type: Option<&'static str>,
}

impl JsonDocumentHandler {
    pub fn new(provider: DocumentProvider) -> Self {
        Self {
            provider,
            content_type: None,
        }
    }

    /// Mark responses with `content-type: application/json`.
    pub fn with_json_content_type(mut self) -> Self {
        self.content_type = Some("application/json");

        self
    }
}

impl Handler for JsonDocumentHandler {
    fn handle(&self, _event: &InvocationEvent) -> Result<ResponseEnvelope, Error> {
        let body = serde_json::to_string(self.provider.get_document())?;
        log::debug!("Serving swagger document, {} bytes", body.len());

        let response = ResponseEnvelope::ok(body);
        Ok(match self.content_type {
            Some(content_type) => response.with_header(CONTENT_TYPE, content_type),
            None => response,
        })
    }
}
