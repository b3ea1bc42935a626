use std::{fmt::Display, str::FromStr};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{parameter::Parameter, response::Response, security::SecurityRequirement, RefOr};

const APPLICATION_JSON: &str = "application/json";

/// Paths of the document in insertion order.
pub type Paths = IndexMap<String, PathItem>;

/// Operations available on a single path, keyed by http method.
///
/// Parameters shared by every operation of the path live in
/// [`PathItem::parameters`]. Any other key, e.g. `x-` vendor extensions, is kept
/// in [`PathItem::extensions`].
#[non_exhaustive]
#[derive(Serialize, Deserialize, Default, Clone)]
#[cfg_attr(feature = "debug", derive(Debug))]
#[serde(try_from = "IndexMap<String, Value>")]
pub struct PathItem {
    #[serde(flatten)]
    pub operations: IndexMap<HttpMethod, Operation>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Vec<RefOr<Parameter>>>,

    #[serde(flatten)]
    pub extensions: IndexMap<String, Value>,
}

impl PathItem {
    pub fn new(method: HttpMethod, operation: Operation) -> Self {
        let mut operations = IndexMap::new();
        operations.insert(method, operation);

        Self {
            operations,
            ..Default::default()
        }
    }
}

impl TryFrom<IndexMap<String, Value>> for PathItem {
    type Error = serde_json::Error;

    fn try_from(fields: IndexMap<String, Value>) -> Result<Self, Self::Error> {
        let mut item = PathItem::default();
        for (key, value) in fields {
            if key == "parameters" {
                item.parameters = Some(serde_json::from_value(value)?);
                continue;
            }
            match key.parse::<HttpMethod>() {
                Ok(method) => {
                    item.operations.insert(method, serde_json::from_value(value)?);
                }
                Err(_) => {
                    item.extensions.insert(key, value);
                }
            }
        }

        Ok(item)
    }
}

#[derive(Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord, Clone, Copy)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "debug", derive(Debug))]
pub enum HttpMethod {
    Get,
    Put,
    Post,
    Delete,
    Options,
    Head,
    Patch,
    Trace,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Put => "put",
            Self::Post => "post",
            Self::Delete => "delete",
            Self::Options => "options",
            Self::Head => "head",
            Self::Patch => "patch",
            Self::Trace => "trace",
        }
    }
}

impl Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned for method names swagger 2.0 has no operation slot for, e.g. `any`.
#[derive(Debug, PartialEq, Eq)]
pub struct UnsupportedMethod(pub String);

impl Display for UnsupportedMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unsupported http method: {}", self.0)
    }
}

impl std::error::Error for UnsupportedMethod {}

impl FromStr for HttpMethod {
    type Err = UnsupportedMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "get" => Ok(Self::Get),
            "put" => Ok(Self::Put),
            "post" => Ok(Self::Post),
            "delete" => Ok(Self::Delete),
            "options" => Ok(Self::Options),
            "head" => Ok(Self::Head),
            "patch" => Ok(Self::Patch),
            "trace" => Ok(Self::Trace),
            _ => Err(UnsupportedMethod(s.to_string())),
        }
    }
}

/// Implements swagger 2.0 operation object.
///
/// Keys without a dedicated field, such as `x-amazon-apigateway-integration`,
/// are kept in [`Operation::extensions`].
#[non_exhaustive]
#[derive(Serialize, Deserialize, Default, Clone)]
#[cfg_attr(feature = "debug", derive(Debug))]
#[serde(rename_all = "camelCase", default)]
pub struct Operation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub consumes: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub produces: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Vec<RefOr<Parameter>>>,

    pub responses: IndexMap<String, RefOr<Response>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub security: Option<Vec<SecurityRequirement>>,

    #[serde(flatten)]
    pub extensions: IndexMap<String, Value>,
}

impl Operation {
    /// Create new [`Operation`] consuming and producing `application/json`.
    pub fn new<S: AsRef<str>>(operation_id: S) -> Self {
        Self {
            operation_id: Some(operation_id.as_ref().to_string()),
            consumes: Some(vec![APPLICATION_JSON.to_string()]),
            produces: Some(vec![APPLICATION_JSON.to_string()]),
            parameters: Some(Vec::new()),
            ..Default::default()
        }
    }

    pub fn with_tags<I: IntoIterator<Item = S>, S: AsRef<str>>(mut self, tags: I) -> Self {
        self.tags = Some(tags.into_iter().map(|tag| tag.as_ref().to_string()).collect());

        self
    }

    pub fn with_summary<S: AsRef<str>>(mut self, summary: S) -> Self {
        self.summary = Some(summary.as_ref().to_string());

        self
    }

    pub fn with_description<S: AsRef<str>>(mut self, description: S) -> Self {
        self.description = Some(description.as_ref().to_string());

        self
    }

    pub fn with_consumes<I: IntoIterator<Item = String>>(mut self, consumes: I) -> Self {
        self.consumes = Some(consumes.into_iter().collect());

        self
    }

    pub fn with_produces<I: IntoIterator<Item = String>>(mut self, produces: I) -> Self {
        self.produces = Some(produces.into_iter().collect());

        self
    }

    pub fn with_parameters<I: IntoIterator<Item = P>, P: Into<RefOr<Parameter>>>(
        mut self,
        parameters: I,
    ) -> Self {
        self.parameters = Some(parameters.into_iter().map(Into::into).collect());

        self
    }

    pub fn with_response<S: AsRef<str>, R: Into<RefOr<Response>>>(
        mut self,
        code: S,
        response: R,
    ) -> Self {
        self.responses
            .insert(code.as_ref().to_string(), response.into());

        self
    }

    pub fn with_responses<I: IntoIterator<Item = (String, R)>, R: Into<RefOr<Response>>>(
        mut self,
        responses: I,
    ) -> Self {
        self.responses = responses
            .into_iter()
            .map(|(code, response)| (code, response.into()))
            .collect();

        self
    }

    pub fn with_deprecated(mut self, deprecated: bool) -> Self {
        self.deprecated = Some(deprecated);

        self
    }

    pub fn with_security<I: IntoIterator<Item = SecurityRequirement>>(mut self, security: I) -> Self {
        self.security = Some(security.into_iter().collect());

        self
    }
}

#[cfg(test)]
mod tests {
    use assert_json_diff::assert_json_eq;

    use super::*;

    #[test]
    fn http_method_from_str_ignores_case() {
        assert_eq!("POST".parse::<HttpMethod>().map(|m| m.as_str()), Ok("post"));
        assert_eq!("Get".parse::<HttpMethod>().map(|m| m.as_str()), Ok("get"));
    }

    #[test]
    fn http_method_from_str_rejects_any() {
        assert_eq!(
            "any".parse::<HttpMethod>().map(|m| m.as_str()),
            Err(UnsupportedMethod("any".to_string()))
        );
    }

    #[test]
    fn path_item_serializes_methods_as_keys() -> Result<(), serde_json::Error> {
        let item = PathItem::new(HttpMethod::Delete, Operation::new("removePet"));

        let value = serde_json::to_value(&item)?;

        assert_eq!(value["delete"]["operationId"], "removePet");
        Ok(())
    }

    #[test]
    fn path_item_keeps_shared_parameters_and_extensions() -> Result<(), serde_json::Error> {
        let raw = serde_json::json!({
            "parameters": [{ "name": "id", "in": "path", "required": true, "type": "string" }],
            "get": { "responses": { "200": { "description": "pet" } } },
            "x-internal": true
        });

        let item: PathItem = serde_json::from_value(raw.clone())?;

        assert_eq!(item.operations.len(), 1);
        assert_eq!(item.extensions.get("x-internal"), Some(&Value::Bool(true)));
        assert_json_eq!(serde_json::to_value(&item)?, raw);
        Ok(())
    }

    #[test]
    fn operation_without_id_omits_generated_defaults() -> Result<(), serde_json::Error> {
        let raw = serde_json::json!({
            "deprecated": true,
            "responses": { "default": { "$ref": "#/responses/Error" } }
        });

        let operation: Operation = serde_json::from_value(raw.clone())?;

        assert!(operation.operation_id.is_none());
        assert!(matches!(operation.responses.get("default"), Some(RefOr::Ref(_))));
        assert_json_eq!(serde_json::to_value(&operation)?, raw);
        Ok(())
    }
}
