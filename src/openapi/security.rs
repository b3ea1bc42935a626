//! Security definitions and requirements of a swagger 2.0 document.
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Security requirement of an operation: scheme name to the scopes it needs.
///
/// Api key schemes have no scopes, so their requirement lists are empty.
#[non_exhaustive]
#[derive(Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "debug", derive(Debug))]
#[serde(transparent)]
pub struct SecurityRequirement {
    value: IndexMap<String, Vec<String>>,
}

impl SecurityRequirement {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_scheme<S: AsRef<str>, I: IntoIterator<Item = String>>(
        mut self,
        name: S,
        scopes: I,
    ) -> Self {
        self.value
            .insert(name.as_ref().to_string(), scopes.into_iter().collect());

        self
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

/// Implements swagger 2.0 security scheme object.
///
/// # Examples
///
/// Api key passed in the `x-api-key` header.
/// ```rust
/// # use autoswagger::openapi::security::{ApiKeyLocation, SecurityDefinition};
/// let definition = SecurityDefinition::api_key("x-api-key", ApiKeyLocation::Header);
/// ```
#[non_exhaustive]
#[derive(Serialize, Deserialize, Clone)]
#[cfg_attr(feature = "debug", derive(Debug))]
#[serde(rename_all = "camelCase")]
pub struct SecurityDefinition {
    #[serde(rename = "type")]
    pub security_type: SecurityType,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(rename = "in", skip_serializing_if = "Option::is_none")]
    pub location: Option<ApiKeyLocation>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub flow: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorization_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub scopes: Option<IndexMap<String, String>>,
}

impl SecurityDefinition {
    pub fn new(security_type: SecurityType) -> Self {
        Self {
            security_type,
            description: None,
            name: None,
            location: None,
            flow: None,
            authorization_url: None,
            token_url: None,
            scopes: None,
        }
    }

    pub fn api_key<S: AsRef<str>>(name: S, location: ApiKeyLocation) -> Self {
        let mut definition = Self::new(SecurityType::ApiKey);
        definition.name = Some(name.as_ref().to_string());
        definition.location = Some(location);

        definition
    }

    pub fn with_description<S: AsRef<str>>(mut self, description: S) -> Self {
        self.description = Some(description.as_ref().to_string());

        self
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "debug", derive(Debug))]
#[serde(rename_all = "camelCase")]
pub enum SecurityType {
    Basic,
    ApiKey,
    Oauth2,
}

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "debug", derive(Debug))]
#[serde(rename_all = "lowercase")]
pub enum ApiKeyLocation {
    Query,
    Header,
}

#[cfg(test)]
mod tests {
    use assert_json_diff::assert_json_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn api_key_header_definition() -> Result<(), serde_json::Error> {
        assert_json_eq!(
            serde_json::to_value(SecurityDefinition::api_key(
                "x-api-key",
                ApiKeyLocation::Header
            ))?,
            json!({ "type": "apiKey", "name": "x-api-key", "in": "header" })
        );
        Ok(())
    }

    #[test]
    fn security_requirement_lists_schemes_in_order() -> Result<(), serde_json::Error> {
        let requirement = SecurityRequirement::new()
            .with_scheme("b-key", [])
            .with_scheme("a-key", []);

        assert_eq!(serde_json::to_string(&requirement)?, r#"{"b-key":[],"a-key":[]}"#);
        Ok(())
    }
}
