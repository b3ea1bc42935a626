//! This crate serves the [Swagger UI](https://swagger.io/tools/swagger-ui/) viewer page for
//! documents generated with [`autoswagger`].
//!
//! The page loads `swagger-ui-dist` from [unpkg](https://unpkg.com) and points the viewer at
//! the document URL. By default that is the sibling of the page: a page served at
//! `GET /swagger` loads the document from `GET /swagger.json`.
//!
//! # Features
//!
//! * **lambda** Forwards to `autoswagger/lambda` so the handlers can be run with
//!   `autoswagger::lambda::run`.
//! * **debug** Adds `Debug` implementations.
//!
//! # Examples
//!
//! Serve the default page.
//! ```rust
//! # use autoswagger::handler::Handler;
//! # use autoswagger_ui::HtmlViewerHandler;
//! let handler = HtmlViewerHandler::new();
//!
//! let response = handler.handle(&serde_json::Value::Null)?;
//!
//! assert_eq!(response.status_code, 200);
//! assert!(response.body.contains("SwaggerUIBundle("));
//! # Ok::<(), autoswagger::error::Error>(())
//! ```
//!
//! Serve a titled page with oauth enabled.
//! ```rust
//! # use autoswagger_ui::{oauth, Config, HtmlViewerHandler};
//! let handler = HtmlViewerHandler::with_config(
//!     Config::new()
//!         .with_title("Pet store")
//!         .with_oauth_config(oauth::Config::new().client_id("pet-store")),
//! )?;
//! # Ok::<(), autoswagger::error::Error>(())
//! ```
use std::{borrow::Cow, sync::Arc};

use autoswagger::{
    error::Error,
    handler::{Handler, InvocationEvent, ResponseEnvelope, CONTENT_TYPE},
};

pub mod oauth;

pub use oauth::OAuthRedirectHandler;

/// `swagger-ui-dist` version loaded by default.
pub const DEFAULT_VERSION: &str = "4.5.0";

const DEFAULT_TITLE: &str = "SwaggerUI";

pub(crate) const HTML_CONTENT_TYPE: &str = "text/html";

/// Statement right after the viewer is created, extra initialization goes after it.
pub(crate) const INIT_MARKER: &str = "window.ui = ui;";

const SWAGGER_UI_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="utf-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1" />
    <title>{{title}}</title>
    <link
      rel="stylesheet"
      href="https://unpkg.com/swagger-ui-dist@{{version}}/swagger-ui.css"
    />
{{react}}    <script src="https://unpkg.com/swagger-ui-dist@{{version}}/swagger-ui-bundle.js"></script>
    <script src="https://unpkg.com/swagger-ui-dist@{{version}}/swagger-ui-standalone-preset.js"></script>
    <script defer>
      window.onload = () => {
        const ui = SwaggerUIBundle({
          url: {{url}},
          dom_id: '#swagger-ui',
          presets: [{{presets}}],
          layout: 'StandaloneLayout',
        });
        window.ui = ui;
      };
    </script>
  </head>
  <body>
    <div id="swagger-ui"></div>
  </body>
</html>
"#;

const REACT_SCRIPT: &str =
    "    <script src=\"https://unpkg.com/react@15/dist/react.min.js\"></script>\n";

const DEFAULT_PRESETS: &str = "SwaggerUIBundle.presets.apis, SwaggerUIStandalonePreset";

// Shows the scopes an operation requires next to its padlock button.
const OPERATION_SCOPES_PRESET: &str = r#"
          system => {
            let currentSecurity
            return {
              wrapComponents: {
                OperationSummary: Original => props => {
                  currentSecurity = props.operationProps.get('security').toJS()
                  return React.createElement(Original, props)
                },
                authorizeOperationBtn: Original => props =>
                  React.createElement('div', {}, [
                    ...(currentSecurity || []).map(scheme => {
                      const schemeName = Object.keys(scheme)[0]
                      if (!scheme[schemeName].length) return null
                      const scopes = scheme[schemeName].flatMap(scope => [
                        React.createElement('code', null, scope),
                        ', ',
                      ])
                      scopes.pop()
                      return React.createElement('span', null, scopes)
                    }),
                    React.createElement(Original, props),
                  ]),
              },
            }
          }"#;

/// Where the viewer loads the document from.
#[derive(Clone, Default)]
#[cfg_attr(feature = "debug", derive(Debug))]
pub enum DocUrl<'a> {
    /// The page URL with `.json` appended, resolved in the browser.
    #[default]
    SiblingJson,
    /// Fixed URL, absolute or relative to the page.
    Fixed(Cow<'a, str>),
}

const SIBLING_JSON_SCRIPT: &str = "window.location.href + '.json'";

impl DocUrl<'_> {
    /// Script expression of the URL. A fixed URL is quoted as a string literal
    /// with `</` escaped so it cannot close the inline `<script>`.
    fn to_script(&self) -> serde_json::Result<Cow<'static, str>> {
        match self {
            Self::SiblingJson => Ok(Cow::Borrowed(SIBLING_JSON_SCRIPT)),
            Self::Fixed(url) => serde_json::to_string(url.as_ref())
                .map(|quoted| Cow::Owned(quoted.replace("</", "<\\/"))),
        }
    }
}

impl<'a> From<&'a str> for DocUrl<'a> {
    fn from(url: &'a str) -> Self {
        Self::Fixed(Cow::Borrowed(url))
    }
}

impl From<String> for DocUrl<'_> {
    fn from(url: String) -> Self {
        Self::Fixed(Cow::Owned(url))
    }
}

/// Options the viewer page is rendered with. [`Config::default`] renders the
/// plain page that loads the sibling `.json` document.
#[non_exhaustive]
#[derive(Clone)]
#[cfg_attr(feature = "debug", derive(Debug))]
pub struct Config<'a> {
    version: Cow<'a, str>,
    title: Cow<'a, str>,
    url: DocUrl<'a>,
    /// [`oauth::Config`] the viewer is initialized with.
    oauth: Option<oauth::Config>,
    operation_scopes: bool,
}

impl Default for Config<'_> {
    fn default() -> Self {
        Self {
            version: Cow::Borrowed(DEFAULT_VERSION),
            title: Cow::Borrowed(DEFAULT_TITLE),
            url: DocUrl::default(),
            oauth: None,
            operation_scopes: false,
        }
    }
}

impl<'a> Config<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use another `swagger-ui-dist` version, e.g. `"5.17.14"`.
    pub fn with_version<S: Into<Cow<'a, str>>>(mut self, version: S) -> Self {
        self.version = version.into();

        self
    }

    pub fn with_title<S: Into<Cow<'a, str>>>(mut self, title: S) -> Self {
        self.title = title.into();

        self
    }

    /// Load the document from given URL instead of the sibling `.json` path.
    pub fn with_url<U: Into<DocUrl<'a>>>(mut self, url: U) -> Self {
        self.url = url.into();

        self
    }

    pub fn with_oauth_config(mut self, oauth: oauth::Config) -> Self {
        self.oauth = Some(oauth);

        self
    }

    /// List the scopes each operation requires next to its authorize button.
    pub fn with_operation_scopes(mut self) -> Self {
        self.operation_scopes = true;

        self
    }
}

/// Render the viewer page for given [`Config`].
///
/// Fails only when the fixed document URL or the oauth config cannot be
/// serialized into the page script.
pub fn render(config: &Config) -> serde_json::Result<String> {
    let page = fill_template(config, &config.url.to_script()?);

    match &config.oauth {
        Some(oauth) => oauth::format_swagger_config(oauth, page),
        None => Ok(page),
    }
}

fn fill_template(config: &Config, url: &str) -> String {
    let (react, presets) = if config.operation_scopes {
        (
            REACT_SCRIPT,
            Cow::Owned(format!("{DEFAULT_PRESETS},{OPERATION_SCOPES_PRESET}")),
        )
    } else {
        ("", Cow::Borrowed(DEFAULT_PRESETS))
    };

    SWAGGER_UI_TEMPLATE
        .replace("{{title}}", &escape_html(&config.title))
        .replace("{{version}}", &config.version)
        .replace("{{react}}", react)
        .replace("{{url}}", url)
        .replace("{{presets}}", &presets)
}

fn escape_html(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"']) {
        return Cow::Borrowed(text);
    }

    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            c => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

/// Serves the Swagger UI viewer page as `text/html`.
///
/// The page is rendered once when the handler is built, every invocation
/// returns the same bytes.
#[derive(Clone)]
#[cfg_attr(feature = "debug", derive(Debug))]
pub struct HtmlViewerHandler {
    page: Arc<str>,
}

impl HtmlViewerHandler {
    /// Handler serving the page rendered with [`Config::default`].
    pub fn new() -> Self {
        // Default config has no fixed url nor oauth, nothing to serialize.
        let page = fill_template(&Config::default(), SIBLING_JSON_SCRIPT);

        Self {
            page: Arc::from(page),
        }
    }

    pub fn with_config(config: Config) -> Result<Self, Error> {
        let page = render(&config)?;

        Ok(Self {
            page: Arc::from(page),
        })
    }

    pub fn page(&self) -> &str {
        &self.page
    }
}

impl Default for HtmlViewerHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl Handler for HtmlViewerHandler {
    fn handle(&self, _event: &InvocationEvent) -> Result<ResponseEnvelope, Error> {
        log::debug!("Serving swagger ui page");

        Ok(ResponseEnvelope::ok(self.page.as_ref()).with_header(CONTENT_TYPE, HTML_CONTENT_TYPE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_page_loads_sibling_json() -> Result<(), serde_json::Error> {
        let page = render(&Config::default())?;

        assert!(page.contains("url: window.location.href + '.json',"), "{}", page);
        assert!(page.contains("presets: [SwaggerUIBundle.presets.apis, SwaggerUIStandalonePreset],"));
        assert!(page.contains("https://unpkg.com/swagger-ui-dist@4.5.0/swagger-ui-bundle.js"));
        assert!(page.contains("<title>SwaggerUI</title>"));
        assert!(!page.contains("react"));
        assert!(!page.contains("{{"));
        Ok(())
    }

    #[test]
    fn fixed_url_is_quoted() -> Result<(), serde_json::Error> {
        let page = render(&Config::new().with_url("/api/swagger.json"))?;

        assert!(page.contains(r#"url: "/api/swagger.json","#), "{}", page);
        Ok(())
    }

    #[test]
    fn fixed_url_cannot_close_script() -> Result<(), serde_json::Error> {
        let page = render(&Config::new().with_url("/docs</script><script>alert(1)//.json"))?;

        assert!(
            page.contains(r#"url: "/docs<\/script><script>alert(1)//.json","#),
            "{}",
            page
        );
        assert_eq!(page.matches("</script>").count(), 3);
        Ok(())
    }

    #[test]
    fn default_handler_page_equals_rendered_default() -> Result<(), serde_json::Error> {
        assert_eq!(HtmlViewerHandler::new().page(), render(&Config::default())?);
        Ok(())
    }

    #[test]
    fn title_and_version() -> Result<(), serde_json::Error> {
        let page = render(&Config::new().with_title("Pets & <owners>").with_version("5.17.14"))?;

        assert!(page.contains("<title>Pets &amp; &lt;owners&gt;</title>"), "{}", page);
        assert!(page.contains("swagger-ui-dist@5.17.14/swagger-ui.css"));
        assert!(!page.contains("4.5.0"));
        Ok(())
    }

    #[test]
    fn operation_scopes_load_react() -> Result<(), serde_json::Error> {
        let page = render(&Config::new().with_operation_scopes())?;

        assert!(page.contains("https://unpkg.com/react@15/dist/react.min.js"));
        assert!(page.contains("authorizeOperationBtn"));
        Ok(())
    }

    #[test]
    fn oauth_is_initialized_after_viewer() -> Result<(), serde_json::Error> {
        let page = render(&Config::new().with_oauth_config(oauth::Config::new().app_name("pets")))?;

        assert!(
            page.contains("window.ui = ui;\n        ui.initOAuth({\"appName\":\"pets\"});"),
            "{}",
            page
        );
        Ok(())
    }
}
