use assert_json_diff::assert_json_eq;
use autoswagger::{error::Error, handler::Handler};
use autoswagger_ui::{oauth, Config, HtmlViewerHandler, OAuthRedirectHandler};
use serde_json::json;

#[test]
fn viewer_serves_html_page() -> Result<(), Error> {
    let handler = HtmlViewerHandler::new();

    let response = handler.handle(&json!({ "method": "GET" }))?;
    let envelope = serde_json::to_value(&response)?;

    assert_json_eq!(envelope["statusCode"], json!(200));
    assert_json_eq!(envelope["headers"], json!({ "content-type": "text/html" }));
    assert!(response.body.starts_with("<!DOCTYPE html>"));
    assert!(response.body.contains("SwaggerUIBundle("));
    assert!(response.body.contains("window.location.href + '.json'"));
    Ok(())
}

#[test]
fn viewer_responses_are_identical() -> Result<(), Error> {
    let handler = HtmlViewerHandler::with_config(
        Config::new()
            .with_title("Pet store")
            .with_oauth_config(oauth::Config::new().client_id("pet-store").scopes(vec![
                "read".to_string(),
                "write".to_string(),
            ])),
    )?;

    let first = handler.handle(&json!({}))?;
    let second = handler.clone().handle(&json!({ "path": "/elsewhere" }))?;

    assert!(first == second, "expected identical responses");
    assert!(first
        .body
        .contains(r#"ui.initOAuth({"clientId":"pet-store","scopes":["read","write"]});"#));
    Ok(())
}

#[test]
fn default_handler_serves_default_config_page() -> Result<(), serde_json::Error> {
    let page = autoswagger_ui::render(&Config::default())?;

    assert_eq!(HtmlViewerHandler::default().page(), page);
    Ok(())
}

#[test]
fn redirect_page_hands_response_to_opener() -> Result<(), Error> {
    let response = OAuthRedirectHandler::default().handle(&json!({}))?;

    assert_eq!(response.status_code, 200);
    assert!(response.body.starts_with("<!doctype html>"));
    assert!(response.body.contains("oauth2.callback("));
    Ok(())
}
