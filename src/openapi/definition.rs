//! Schema definitions referenced from parameters and responses with `#/definitions/{name}`.
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Subset of JSON schema used by swagger 2.0 `definitions`.
///
/// Keywords without a dedicated field (`minimum`, `pattern`, ...) are kept in
/// [`Definition::extensions`] so definitions read from swagger files are served
/// back untouched.
#[non_exhaustive]
#[derive(Serialize, Deserialize, Default, Clone, PartialEq)]
#[cfg_attr(feature = "debug", derive(Debug))]
#[serde(rename_all = "camelCase")]
pub struct Definition {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub definition_type: Option<String>,

    #[serde(rename = "$ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Definition>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<AdditionalProperties>,

    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<Value>>,

    #[serde(rename = "const", skip_serializing_if = "Option::is_none")]
    pub const_value: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<IndexMap<String, Definition>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub any_of: Option<Vec<Definition>>,

    #[serde(flatten)]
    pub extensions: IndexMap<String, Value>,
}

impl Definition {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_type<S: AsRef<str>>(mut self, definition_type: S) -> Self {
        self.definition_type = Some(definition_type.as_ref().to_string());

        self
    }

    pub fn with_property<S: AsRef<str>>(mut self, name: S, property: Definition) -> Self {
        self.properties
            .get_or_insert_with(IndexMap::new)
            .insert(name.as_ref().to_string(), property);

        self
    }

    pub fn with_required<I: IntoIterator<Item = S>, S: AsRef<str>>(mut self, required: I) -> Self {
        self.required = Some(
            required
                .into_iter()
                .map(|name| name.as_ref().to_string())
                .collect(),
        );

        self
    }

    pub fn with_items(mut self, items: Definition) -> Self {
        self.items = Some(Box::new(items));

        self
    }

    pub fn with_any_of<I: IntoIterator<Item = Definition>>(mut self, any_of: I) -> Self {
        self.any_of = Some(any_of.into_iter().collect());

        self
    }

    pub fn with_const(mut self, value: Value) -> Self {
        self.const_value = Some(value);

        self
    }

    /// Recursively replace `anyOf` lists made only of constants with an `enum`.
    ///
    /// String literal unions converted to JSON schema come out as
    /// `anyOf: [{const: "a", type: "string"}, ...]`, which swagger 2.0 viewers
    /// do not render. When every alternative has the same type, that type is
    /// kept on the collapsed definition.
    pub fn collapse_const_any_of(&mut self) {
        if let Some(any_of) = self.any_of.as_mut() {
            any_of.iter_mut().for_each(Definition::collapse_const_any_of);
        }

        let collapsible = self
            .any_of
            .as_ref()
            .filter(|any_of| !any_of.is_empty())
            .is_some_and(|any_of| any_of.iter().all(|item| item.const_value.is_some()));

        if collapsible {
            let any_of = self.any_of.take().unwrap_or_default();
            let mut types = any_of.iter().map(|item| item.definition_type.as_deref());
            let first_type = types.next().flatten();
            if self.definition_type.is_none() && types.all(|t| t == first_type) {
                self.definition_type = first_type.map(ToString::to_string);
            }

            self.enum_values = Some(
                any_of
                    .into_iter()
                    .filter_map(|item| item.const_value)
                    .collect(),
            );
        }

        if let Some(properties) = self.properties.as_mut() {
            properties
                .values_mut()
                .for_each(Definition::collapse_const_any_of);
        }
        if let Some(items) = self.items.as_mut() {
            items.collapse_const_any_of();
        }
    }
}

/// `additionalProperties` is either a flag or a schema for the extra values.
#[derive(Serialize, Deserialize, Clone, PartialEq)]
#[cfg_attr(feature = "debug", derive(Debug))]
#[serde(untagged)]
pub enum AdditionalProperties {
    Allowed(bool),
    Schema(Box<Definition>),
}
