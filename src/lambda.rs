//! Serve a [`Handler`] through the AWS Lambda runtime.
//!
//! # Examples
//!
//! ```no_run
//! # use autoswagger::{handler::JsonDocumentHandler, provider::DocumentProvider};
//! # async fn serve() -> Result<(), autoswagger::lambda::LambdaError> {
//! let provider = DocumentProvider::from_json(r#"{"swagger": "2.0", "info": {"title": "pets"}}"#)?;
//!
//! autoswagger::lambda::run(JsonDocumentHandler::new(provider)).await
//! # }
//! ```
use std::sync::Arc;

use lambda_runtime::service_fn;
pub use lambda_runtime::{Context as LambdaContext, Error as LambdaError, LambdaEvent};

use crate::handler::{Handler, InvocationEvent, ResponseEnvelope};

/// Run the lambda event loop, answering every invocation with given handler.
///
/// Handler errors are returned to the runtime as invocation errors.
pub async fn run<H>(handler: H) -> Result<(), LambdaError>
where
    H: Handler + Send + Sync + 'static,
{
    let handler = Arc::new(handler);

    lambda_runtime::run(service_fn(move |event: LambdaEvent<InvocationEvent>| {
        let handler = Arc::clone(&handler);
        async move { invoke(handler.as_ref(), event) }
    }))
    .await
}

fn invoke<H: Handler>(
    handler: &H,
    event: LambdaEvent<InvocationEvent>,
) -> Result<ResponseEnvelope, LambdaError> {
    log::debug!("Handling invocation {}", event.context.request_id);

    handler.handle(&event.payload).map_err(LambdaError::from)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{handler::JsonDocumentHandler, openapi::Swagger, provider::DocumentProvider};

    #[test]
    fn invoke_returns_handler_response() -> Result<(), LambdaError> {
        let handler = JsonDocumentHandler::new(DocumentProvider::new(Swagger::default()));
        let event = LambdaEvent::new(json!({ "rawPath": "/swagger.json" }), LambdaContext::default());

        let response = invoke(&handler, event)?;

        assert_eq!(response.status_code, 200);
        assert!(response.body.starts_with("{\"swagger\":\"2.0\""));
        Ok(())
    }
}
