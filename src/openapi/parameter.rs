use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{definition::Definition, response::Ref};

/// Implements swagger 2.0 parameter object.
///
/// Body parameters carry a `schema`, every other location carries a `type`.
/// Array typed parameters describe their element type with `items`. Keywords
/// without a dedicated field (`enum`, `format`, `minimum`, ...) are kept in
/// [`Parameter::extensions`].
#[non_exhaustive]
#[derive(Serialize, Deserialize, Clone)]
#[cfg_attr(feature = "debug", derive(Debug))]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    pub name: String,

    #[serde(rename = "in")]
    pub parameter_in: ParameterIn,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub required: bool,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub parameter_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Definition>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Items>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection_format: Option<CollectionFormat>,

    #[serde(flatten)]
    pub extensions: IndexMap<String, Value>,
}

impl Parameter {
    pub fn new<S: AsRef<str>>(name: S, parameter_in: ParameterIn) -> Self {
        Self {
            name: name.as_ref().to_string(),
            parameter_in,
            description: None,
            required: false,
            parameter_type: None,
            schema: None,
            items: None,
            collection_format: None,
            extensions: IndexMap::new(),
        }
    }

    /// Required `body` parameter referencing a definition.
    pub fn body<S: AsRef<str>>(definition: S) -> Self {
        Self::new("body", ParameterIn::Body)
            .with_description("Body required in the request")
            .with_required(true)
            .with_schema(Ref::definition(definition))
    }

    pub fn with_description<S: AsRef<str>>(mut self, description: S) -> Self {
        self.description = Some(description.as_ref().to_string());

        self
    }

    pub fn with_optional_description(mut self, description: Option<String>) -> Self {
        self.description = description;

        self
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;

        self
    }

    pub fn with_type<S: AsRef<str>>(mut self, parameter_type: S) -> Self {
        self.parameter_type = Some(parameter_type.as_ref().to_string());

        self
    }

    pub fn with_schema<D: Into<Definition>>(mut self, schema: D) -> Self {
        self.schema = Some(schema.into());

        self
    }

    /// Mark parameter as multi valued array with given element type.
    pub fn with_array_items<S: AsRef<str>>(mut self, item_type: S) -> Self {
        self.parameter_type = Some("array".to_string());
        self.items = Some(Items::new(item_type));
        self.collection_format = Some(CollectionFormat::Multi);

        self
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "debug", derive(Debug))]
#[serde(rename_all = "camelCase")]
pub enum ParameterIn {
    Body,
    Path,
    Query,
    Header,
    FormData,
}

#[non_exhaustive]
#[derive(Serialize, Deserialize, Default, Clone)]
#[cfg_attr(feature = "debug", derive(Debug))]
pub struct Items {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub item_type: Option<String>,

    #[serde(flatten)]
    pub extensions: IndexMap<String, Value>,
}

impl Items {
    pub fn new<S: AsRef<str>>(item_type: S) -> Self {
        Self {
            item_type: Some(item_type.as_ref().to_string()),
            ..Default::default()
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "debug", derive(Debug))]
#[serde(rename_all = "lowercase")]
pub enum CollectionFormat {
    Csv,
    Ssv,
    Tsv,
    Pipes,
    Multi,
}

#[cfg(test)]
mod tests {
    use assert_json_diff::assert_json_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn body_parameter_references_definition() -> Result<(), serde_json::Error> {
        assert_json_eq!(
            serde_json::to_value(Parameter::body("helloPostBody"))?,
            json!({
                "name": "body",
                "in": "body",
                "description": "Body required in the request",
                "required": true,
                "schema": { "$ref": "#/definitions/helloPostBody" }
            })
        );
        Ok(())
    }

    #[test]
    fn array_query_parameter_is_multi_valued() -> Result<(), serde_json::Error> {
        let parameter = Parameter::new("ids", ParameterIn::Query).with_array_items("integer");

        assert_json_eq!(
            serde_json::to_value(parameter)?,
            json!({
                "name": "ids",
                "in": "query",
                "required": false,
                "type": "array",
                "items": { "type": "integer" },
                "collectionFormat": "multi"
            })
        );
        Ok(())
    }

    #[test]
    fn parameter_keeps_validation_keywords() -> Result<(), serde_json::Error> {
        let raw = json!({
            "name": "limit",
            "in": "query",
            "required": false,
            "type": "integer",
            "format": "int32",
            "minimum": 1,
            "enum": [10, 50]
        });

        let parameter: Parameter = serde_json::from_value(raw.clone())?;

        assert_eq!(parameter.extensions.len(), 3);
        assert_json_eq!(serde_json::to_value(parameter)?, raw);
        Ok(())
    }
}
