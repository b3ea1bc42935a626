//! Implements Swagger UI [oauth configuration](https://github.com/swagger-api/swagger-ui/blob/master/docs/usage/oauth2.md)
//! options and the page the authorization server redirects back to.
use std::{collections::HashMap, sync::Arc};

use autoswagger::{
    error::Error,
    handler::{Handler, InvocationEvent, ResponseEnvelope, CONTENT_TYPE},
};
use serde::Serialize;

use crate::{HTML_CONTENT_TYPE, INIT_MARKER};

const OAUTH2_REDIRECT_PAGE: &str = include_str!("oauth2-redirect.html");

/// Object used to alter Swagger UI oauth settings.
///
/// # Examples
///
/// ```rust
/// # use autoswagger_ui::oauth;
/// let config = oauth::Config::new()
///     .client_id("client-id")
///     .use_pkce_with_authorization_code_grant(true);
/// ```
#[non_exhaustive]
#[derive(Default, Clone, Serialize)]
#[cfg_attr(feature = "debug", derive(Debug))]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub realm: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope_separator: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub scopes: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_query_string_params: Option<HashMap<String, String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_basic_authentication_with_access_code_grant: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_pkce_with_authorization_code_grant: Option<bool>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn client_id(mut self, client_id: &str) -> Self {
        self.client_id = Some(String::from(client_id));

        self
    }

    /// Never use this in production, the secret ends up in the served page.
    pub fn client_secret(mut self, client_secret: &str) -> Self {
        self.client_secret = Some(String::from(client_secret));

        self
    }

    pub fn realm(mut self, realm: &str) -> Self {
        self.realm = Some(String::from(realm));

        self
    }

    pub fn app_name(mut self, app_name: &str) -> Self {
        self.app_name = Some(String::from(app_name));

        self
    }

    pub fn scope_separator(mut self, scope_separator: &str) -> Self {
        self.scope_separator = Some(String::from(scope_separator));

        self
    }

    pub fn scopes(mut self, scopes: Vec<String>) -> Self {
        self.scopes = Some(scopes);

        self
    }

    pub fn additional_query_string_params(
        mut self,
        additional_query_string_params: HashMap<String, String>,
    ) -> Self {
        self.additional_query_string_params = Some(additional_query_string_params);

        self
    }

    pub fn use_basic_authentication_with_access_code_grant(
        mut self,
        use_basic_authentication_with_access_code_grant: bool,
    ) -> Self {
        self.use_basic_authentication_with_access_code_grant =
            Some(use_basic_authentication_with_access_code_grant);

        self
    }

    pub fn use_pkce_with_authorization_code_grant(
        mut self,
        use_pkce_with_authorization_code_grant: bool,
    ) -> Self {
        self.use_pkce_with_authorization_code_grant = Some(use_pkce_with_authorization_code_grant);

        self
    }
}

/// Insert `ui.initOAuth(...)` right after the viewer is created.
pub(crate) fn format_swagger_config(config: &Config, page: String) -> serde_json::Result<String> {
    let init_string = format!(
        "{}\n        ui.initOAuth({});",
        INIT_MARKER,
        serde_json::to_string(config)?
    );
    Ok(page.replacen(INIT_MARKER, &init_string, 1))
}

/// Serves `oauth2-redirect.html`, the page that hands the authorization response
/// back to the viewer window which opened the authorization flow.
#[derive(Clone)]
#[cfg_attr(feature = "debug", derive(Debug))]
pub struct OAuthRedirectHandler {
    page: Arc<str>,
}

impl OAuthRedirectHandler {
    pub fn new() -> Self {
        Self {
            page: Arc::from(OAUTH2_REDIRECT_PAGE),
        }
    }
}

impl Default for OAuthRedirectHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl Handler for OAuthRedirectHandler {
    fn handle(&self, _event: &InvocationEvent) -> Result<ResponseEnvelope, Error> {
        log::debug!("Serving oauth2 redirect page");

        Ok(ResponseEnvelope::ok(self.page.as_ref()).with_header(CONTENT_TYPE, HTML_CONTENT_TYPE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_CONTENT: &str = r###"
        const ui = SwaggerUIBundle({
          url: window.location.href + '.json',
          dom_id: '#swagger-ui',
        });
        window.ui = ui;
      };
    "###;

    #[test]
    fn format_swagger_config_oauth() -> Result<(), serde_json::Error> {
        let config = Config::new().client_id("my-special-client");

        let page = format_swagger_config(&config, TEST_CONTENT.to_string())?;

        let expected = r#"window.ui = ui;
        ui.initOAuth({"clientId":"my-special-client"});"#;
        assert!(
            page.contains(expected),
            "expected page to contain {}, was {}",
            expected,
            page
        );
        Ok(())
    }

    #[test]
    fn empty_config_initializes_with_empty_object() -> Result<(), serde_json::Error> {
        let page = format_swagger_config(&Config::new(), TEST_CONTENT.to_string())?;

        assert!(page.contains("ui.initOAuth({});"), "unexpected page {}", page);
        Ok(())
    }

    #[test]
    fn redirect_page_is_served_as_html() -> Result<(), Error> {
        let response = OAuthRedirectHandler::new().handle(&InvocationEvent::Null)?;

        assert_eq!(response.status_code, 200);
        assert!(response.body.contains("window.opener.swaggerUIRedirectOauth2"));
        assert_eq!(
            response
                .headers
                .as_ref()
                .and_then(|headers| headers.get(CONTENT_TYPE))
                .map(String::as_str),
            Some("text/html")
        );
        Ok(())
    }
}
