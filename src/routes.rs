//! Conventional endpoints that expose the documentation of a service.
//!
//! [`DocsRoutes`] only describes the functions a deployment should add, wiring
//! them into infrastructure is left to the host tooling.
use serde::Serialize;
use serde_json::Value;

use crate::{
    config::{ApiType, ServerlessConfig},
    openapi::HttpMethod,
};

const REDIRECT_PAGE: &str = "oauth2-redirect.html";

#[derive(Serialize, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "debug", derive(Debug))]
#[serde(rename_all = "camelCase")]
pub enum RouteKind {
    /// HTML viewer page.
    SwaggerUi,
    /// Raw document as JSON.
    SwaggerJson,
    /// OAuth2 redirect page of the viewer.
    RedirectUri,
}

impl RouteKind {
    /// Name of the handler serving the route.
    pub fn handler(&self) -> &'static str {
        match self {
            Self::SwaggerUi => "swagger/swagger-html.handler",
            Self::SwaggerJson => "swagger/swagger-json.handler",
            Self::RedirectUri => "swagger/oauth2-redirect-html.handler",
        }
    }

    fn name_suffix(&self) -> &'static str {
        match self {
            Self::SwaggerUi => "swagger-ui",
            Self::SwaggerJson => "swagger-json",
            Self::RedirectUri => "swagger-redirect-uri",
        }
    }
}

/// Single documentation endpoint: `GET path` served by the function of [`RouteKind`].
#[non_exhaustive]
#[derive(Clone)]
#[cfg_attr(feature = "debug", derive(Debug))]
pub struct DocsRoute {
    pub kind: RouteKind,
    /// `{service}-{stage}-{suffix}`, only known when both service and stage are.
    pub function_name: Option<String>,
    pub api_type: ApiType,
    pub method: HttpMethod,
    pub path: String,
    pub authorizer: Option<Value>,
    /// Documentation functions do not log invocations, except the redirect page.
    pub disable_logs: bool,
}

impl DocsRoute {
    /// Render the route as a serverless function definition.
    pub fn to_function(&self) -> Value {
        let mut event = serde_json::Map::new();
        event.insert("method".to_string(), Value::from(self.method.as_str()));
        event.insert("path".to_string(), Value::from(self.path.as_str()));
        if let Some(authorizer) = &self.authorizer {
            event.insert("authorizer".to_string(), authorizer.clone());
        }

        let mut function = serde_json::Map::new();
        if let Some(name) = &self.function_name {
            function.insert("name".to_string(), Value::from(name.as_str()));
        }
        function.insert("handler".to_string(), Value::from(self.kind.handler()));
        if self.disable_logs {
            function.insert("disableLogs".to_string(), Value::Bool(true));
        }
        let mut events = serde_json::Map::new();
        events.insert(self.api_type.as_str().to_string(), Value::Object(event));
        function.insert(
            "events".to_string(),
            Value::Array(vec![Value::Object(events)]),
        );

        Value::Object(function)
    }
}

/// Documentation endpoints of a service.
#[non_exhaustive]
#[derive(Clone)]
#[cfg_attr(feature = "debug", derive(Debug))]
pub struct DocsRoutes {
    pub ui: DocsRoute,
    pub json: DocsRoute,
    /// Present only when `useRedirectUI` is set.
    pub redirect: Option<DocsRoute>,
}

impl DocsRoutes {
    pub fn from_config(config: &ServerlessConfig) -> Self {
        let autoswagger = config.autoswagger();
        let service = config.service_name();
        let stage = config.stage();

        let prefix = match stage {
            Some(stage) if autoswagger.use_stage => format!("/{stage}"),
            _ => String::new(),
        };
        let route = |kind: RouteKind, path: String| {
            let function_name = match (service, stage) {
                (service, Some(stage)) if !service.is_empty() => {
                    Some(format!("{service}-{stage}-{}", kind.name_suffix()))
                }
                _ => None,
            };

            DocsRoute {
                kind,
                function_name,
                api_type: autoswagger.api_type,
                method: HttpMethod::Get,
                path,
                authorizer: None,
                disable_logs: kind != RouteKind::RedirectUri,
            }
        };

        let swagger_path = autoswagger.swagger_path.trim_start_matches('/');
        let mut ui = route(RouteKind::SwaggerUi, format!("{prefix}/{swagger_path}"));
        let mut json = route(RouteKind::SwaggerJson, format!("{prefix}/{swagger_path}.json"));
        ui.authorizer = autoswagger.lambda_authorizer.clone();
        json.authorizer = autoswagger.lambda_authorizer.clone();

        let redirect = autoswagger
            .use_redirect_ui
            .then(|| route(RouteKind::RedirectUri, format!("{prefix}/{REDIRECT_PAGE}")));

        Self { ui, json, redirect }
    }

    pub fn iter(&self) -> impl Iterator<Item = &DocsRoute> {
        [Some(&self.ui), Some(&self.json), self.redirect.as_ref()]
            .into_iter()
            .flatten()
    }
}

/// Whether documentation functions should be deployed for the configured stage.
pub fn should_deploy(config: &ServerlessConfig) -> bool {
    let excluded = config
        .stage()
        .is_some_and(|stage| {
            config
                .autoswagger()
                .exclude_stages
                .iter()
                .any(|excluded| excluded == stage)
        });

    if excluded {
        log::info!(
            "Swagger functions will not be deployed for stage {}, it is excluded",
            config.stage().unwrap_or_default()
        );
    }
    !excluded
}

/// Whether the document should be generated as part of a deployment.
pub fn generate_on_deploy(config: &ServerlessConfig) -> bool {
    config.autoswagger().generate_swagger_on_deploy
}
