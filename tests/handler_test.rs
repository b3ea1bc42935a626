use std::{ptr, sync::Arc, thread};

use assert_json_diff::assert_json_eq;
use autoswagger::{
    error::Error,
    handler::{Handler, JsonDocumentHandler, ResponseEnvelope},
    openapi::{HttpMethod, Info, Operation, Response, Swagger},
    provider::DocumentProvider,
};
use serde_json::{json, Value};

mod common;

fn pet_store() -> Swagger {
    Swagger::new(Info::new("Pet store", "1.0.0")).with_operation(
        "/pets",
        HttpMethod::Get,
        Operation::new("listPets")
            .with_summary("List pets")
            .with_response("200", Response::new("All pets")),
    )
}

#[test]
fn json_handler_serves_configured_document() -> Result<(), Error> {
    let swagger = pet_store();
    let handler = JsonDocumentHandler::new(DocumentProvider::new(swagger.clone()));

    let response = handler.handle(&json!({}))?;
    let body = swagger.to_json()?;

    assert_json_eq!(
        serde_json::to_value(&response)?,
        json!({ "statusCode": 200, "body": body })
    );
    Ok(())
}

#[test]
fn json_body_round_trips_to_document() -> Result<(), Error> {
    let swagger = pet_store();
    let handler = JsonDocumentHandler::new(DocumentProvider::new(swagger.clone()));

    let response = handler.handle(&Value::Null)?;

    assert_json_eq!(
        serde_json::from_str::<Value>(&response.body)?,
        serde_json::to_value(&swagger)?
    );
    Ok(())
}

#[test]
fn envelope_deserializes_from_wire_names() -> Result<(), serde_json::Error> {
    let envelope: ResponseEnvelope = serde_json::from_value(json!({
        "statusCode": 200,
        "body": "<!DOCTYPE html>",
        "headers": { "content-type": "text/html" }
    }))?;

    assert!(
        envelope == ResponseEnvelope::ok("<!DOCTYPE html>").with_header("content-type", "text/html"),
        "unexpected envelope"
    );
    Ok(())
}

#[test]
fn concurrent_invocations_share_document() {
    let provider = DocumentProvider::new(pet_store());
    let handler = Arc::new(JsonDocumentHandler::new(provider.clone()));
    let expected = handler.handle(&Value::Null).map(|response| response.body).ok();

    thread::scope(|scope| {
        for index in 0..16 {
            let handler = Arc::clone(&handler);
            let provider = provider.clone();
            let expected = expected.clone();
            scope.spawn(move || {
                let other = provider.clone();
                assert!(ptr::eq(provider.get_document(), other.get_document()));

                let body = handler
                    .handle(&json!({ "invocation": index }))
                    .map(|response| response.body)
                    .ok();
                assert_eq!(body, expected);
            });
        }
    });
}
