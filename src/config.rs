//! Serde model of the serverless service description the document is generated from.
//!
//! Only the parts that matter for documentation are modelled: the service name,
//! the provider stage and runtime, the http events of every function and the
//! `custom.autoswagger` block. Everything else in the file is ignored.
use std::path::{Path, PathBuf};

use derivative::Derivative;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::{error::Error, openapi::Scheme};

#[derive(Serialize, Deserialize, Default, Clone)]
#[cfg_attr(feature = "debug", derive(Debug))]
#[serde(rename_all = "camelCase", default)]
pub struct ServerlessConfig {
    pub service: ServiceName,
    pub provider: Provider,
    pub functions: IndexMap<String, FunctionConfig>,
    pub custom: Custom,
}

impl ServerlessConfig {
    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    #[cfg(feature = "yaml")]
    pub fn from_yaml(yaml: &str) -> Result<Self, Error> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load `serverless.yml` (or its json equivalent) from disk.
    #[cfg(feature = "yaml")]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|error| Error::io(path, error))?;
        log::debug!("Loaded service description from {}", path.display());

        Self::from_yaml(&content)
    }

    /// Override the provider stage, as `--stage` does on the command line.
    pub fn with_stage<S: Into<String>>(mut self, stage: S) -> Self {
        self.provider.stage = Some(stage.into());

        self
    }

    pub fn service_name(&self) -> &str {
        self.service.name()
    }

    pub fn stage(&self) -> Option<&str> {
        self.provider.stage.as_deref().filter(|stage| !stage.is_empty())
    }

    pub fn autoswagger(&self) -> &AutoSwaggerConfig {
        &self.custom.autoswagger
    }
}

/// Service name, given either directly or as `service: { name: ... }`.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "debug", derive(Debug))]
#[serde(untagged)]
pub enum ServiceName {
    Name(String),
    Detailed { name: String },
}

impl ServiceName {
    pub fn name(&self) -> &str {
        match self {
            Self::Name(name) | Self::Detailed { name } => name,
        }
    }
}

impl Default for ServiceName {
    fn default() -> Self {
        Self::Name(String::new())
    }
}

#[derive(Serialize, Deserialize, Default, Clone)]
#[cfg_attr(feature = "debug", derive(Debug))]
#[serde(default)]
pub struct Provider {
    pub name: String,
    pub runtime: Option<String>,
    pub stage: Option<String>,
}

#[derive(Serialize, Deserialize, Default, Clone)]
#[cfg_attr(feature = "debug", derive(Debug))]
#[serde(default)]
pub struct Custom {
    pub autoswagger: AutoSwaggerConfig,
}

/// The `custom.autoswagger` block.
#[derive(Serialize, Deserialize, Derivative, Clone)]
#[derivative(Default)]
#[cfg_attr(feature = "debug", derive(Debug))]
#[serde(rename_all = "camelCase", default)]
pub struct AutoSwaggerConfig {
    pub api_type: ApiType,
    pub api_key_headers: Vec<String>,
    pub swagger_files: Vec<PathBuf>,
    #[derivative(Default(value = "true"))]
    pub generate_swagger_on_deploy: bool,
    pub use_stage: bool,
    #[derivative(Default(value = "\"swagger\".into()"))]
    pub swagger_path: String,
    pub base_path: Option<String>,
    pub host: Option<String>,
    pub schemes: Option<Vec<Scheme>>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub version: Option<String>,
    pub exclude_stages: Vec<String>,
    pub lambda_authorizer: Option<Value>,
    #[serde(rename = "useRedirectUI")]
    pub use_redirect_ui: bool,
}

/// Kind of api gateway event the documentation routes are attached to.
#[derive(Serialize, Deserialize, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "debug", derive(Debug))]
#[serde(rename_all = "camelCase")]
pub enum ApiType {
    Http,
    #[default]
    HttpApi,
}

impl ApiType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::HttpApi => "httpApi",
        }
    }
}

#[derive(Serialize, Deserialize, Default, Clone)]
#[cfg_attr(feature = "debug", derive(Debug))]
#[serde(default)]
pub struct FunctionConfig {
    pub handler: Option<String>,
    pub events: Vec<FunctionEvent>,
}

/// Function event; events other than `http` and `httpApi` deserialize with
/// both fields empty.
#[derive(Serialize, Deserialize, Default, Clone)]
#[cfg_attr(feature = "debug", derive(Debug))]
#[serde(rename_all = "camelCase", default)]
pub struct FunctionEvent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http: Option<HttpEventConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_api: Option<HttpEventConfig>,
}

impl FunctionEvent {
    pub fn http_event(&self) -> Option<&HttpEventConfig> {
        self.http.as_ref().or(self.http_api.as_ref())
    }
}

#[derive(Serialize, Deserialize, Clone)]
#[cfg_attr(feature = "debug", derive(Debug))]
#[serde(untagged)]
pub enum HttpEventConfig {
    /// `"GET hello/{id}"`
    Shorthand(String),
    Detailed(Box<HttpEvent>),
}

impl HttpEventConfig {
    /// Resolve the event to its detailed form. Shorthands that are not a
    /// `METHOD path` pair, such as the `*` catch all route, yield [`None`].
    pub fn to_event(&self) -> Option<HttpEvent> {
        match self {
            Self::Detailed(event) => Some(event.as_ref().clone()),
            Self::Shorthand(shorthand) => {
                let mut parts = shorthand.split_whitespace();
                match (parts.next(), parts.next(), parts.next()) {
                    (Some(method), Some(path), None) => Some(HttpEvent {
                        method: method.to_string(),
                        path: path.to_string(),
                        ..Default::default()
                    }),
                    _ => None,
                }
            }
        }
    }
}

#[derive(Serialize, Deserialize, Default, Clone)]
#[cfg_attr(feature = "debug", derive(Debug))]
#[serde(rename_all = "camelCase", default)]
pub struct HttpEvent {
    pub path: String,
    pub method: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub swagger_tags: Option<Vec<String>>,
    pub operation_id: Option<String>,
    pub consumes: Option<Vec<String>>,
    pub produces: Option<Vec<String>>,
    pub security: Option<Vec<IndexMap<String, Vec<String>>>>,
    pub exclude: bool,
    pub body_type: Option<String>,
    #[serde(default, deserialize_with = "deserialize_responses")]
    pub response_data: Option<IndexMap<String, HttpResponse>>,
    /// Same as `responseData`, which takes precedence when both are given.
    #[serde(default, deserialize_with = "deserialize_responses")]
    pub responses: Option<IndexMap<String, HttpResponse>>,
    pub header_parameters: Option<IndexMap<String, ParameterConfig>>,
    pub query_string_parameters: Option<IndexMap<String, ParameterConfig>>,
    pub request: Option<RequestConfig>,
}

impl HttpEvent {
    pub(crate) fn request_parameters(&self) -> Option<&RequestParameters> {
        self.request
            .as_ref()
            .and_then(|request| request.parameters.as_ref())
    }
}

/// Status codes are usually written unquoted in `serverless.yml`, so accept
/// numeric keys as well as strings.
fn deserialize_responses<'de, D>(
    deserializer: D,
) -> Result<Option<IndexMap<String, HttpResponse>>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize, PartialEq, Eq, Hash)]
    #[serde(untagged)]
    enum StatusCode {
        Number(u64),
        Text(String),
    }

    let responses = Option::<IndexMap<StatusCode, HttpResponse>>::deserialize(deserializer)?;

    Ok(responses.map(|responses| {
        responses
            .into_iter()
            .map(|(status_code, response)| {
                let status_code = match status_code {
                    StatusCode::Number(number) => number.to_string(),
                    StatusCode::Text(text) => text,
                };
                (status_code, response)
            })
            .collect()
    }))
}

/// Response of an http event: a bare description or a description with body type.
#[derive(Serialize, Deserialize, Clone)]
#[cfg_attr(feature = "debug", derive(Debug))]
#[serde(untagged)]
pub enum HttpResponse {
    Description(String),
    #[serde(rename_all = "camelCase")]
    Detailed {
        #[serde(default)]
        description: Option<String>,
        #[serde(default)]
        body_type: Option<String>,
    },
}

#[derive(Serialize, Deserialize, Default, Clone)]
#[cfg_attr(feature = "debug", derive(Debug))]
#[serde(rename_all = "camelCase", default)]
pub struct ParameterConfig {
    pub required: Option<bool>,
    #[serde(rename = "type")]
    pub parameter_type: Option<String>,
    pub description: Option<String>,
    pub minimum: Option<f64>,
    pub array_items_type: Option<String>,
}

#[derive(Serialize, Deserialize, Default, Clone)]
#[cfg_attr(feature = "debug", derive(Debug))]
#[serde(default)]
pub struct RequestConfig {
    pub parameters: Option<RequestParameters>,
}

/// Parameters declared through the framework's own `request.parameters` block.
#[derive(Serialize, Deserialize, Default, Clone)]
#[cfg_attr(feature = "debug", derive(Debug))]
#[serde(default)]
pub struct RequestParameters {
    pub paths: Option<IndexMap<String, PathParameterConfig>>,
    pub headers: Option<IndexMap<String, BuiltinParameter>>,
    pub querystrings: Option<IndexMap<String, BuiltinParameter>>,
}

#[derive(Serialize, Deserialize, Clone)]
#[cfg_attr(feature = "debug", derive(Debug))]
#[serde(untagged)]
pub enum PathParameterConfig {
    Required(bool),
    Detailed {
        #[serde(default)]
        required: Option<bool>,
        #[serde(default)]
        description: Option<String>,
    },
}

/// Header or query string flag, optionally with the request mapping it came with.
#[derive(Serialize, Deserialize, Clone)]
#[cfg_attr(feature = "debug", derive(Debug))]
#[serde(untagged)]
pub enum BuiltinParameter {
    Required(bool),
    #[serde(rename_all = "camelCase")]
    Mapped {
        required: bool,
        #[serde(default)]
        mapped_value: Option<String>,
    },
}

impl BuiltinParameter {
    pub fn required(&self) -> bool {
        match self {
            Self::Required(required) | Self::Mapped { required, .. } => *required,
        }
    }
}
