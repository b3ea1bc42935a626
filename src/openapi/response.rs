use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::definition::Definition;

/// Implements swagger 2.0 response object. `headers`, `examples` and vendor
/// extensions are kept as is in [`Response::extensions`].
#[non_exhaustive]
#[derive(Serialize, Deserialize, Default, Clone)]
#[cfg_attr(feature = "debug", derive(Debug))]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub description: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Definition>,

    #[serde(flatten)]
    pub extensions: IndexMap<String, Value>,
}

impl Response {
    pub fn new<S: AsRef<str>>(description: S) -> Self {
        Self {
            description: description.as_ref().to_string(),
            ..Default::default()
        }
    }

    pub fn with_schema<D: Into<Definition>>(mut self, schema: D) -> Self {
        self.schema = Some(schema.into());

        self
    }
}

/// Json reference, serialized as `{"$ref": "..."}`.
#[non_exhaustive]
#[derive(Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "debug", derive(Debug))]
pub struct Ref {
    #[serde(rename = "$ref")]
    pub ref_location: String,
}

impl Ref {
    pub fn new<S: AsRef<str>>(ref_location: S) -> Self {
        Self {
            ref_location: ref_location.as_ref().to_string(),
        }
    }

    /// Reference to a named entry of the document `definitions`.
    pub fn definition<S: AsRef<str>>(name: S) -> Self {
        Self::new(format!("#/definitions/{}", name.as_ref()))
    }
}

impl From<Ref> for Definition {
    fn from(reference: Ref) -> Self {
        Self {
            reference: Some(reference.ref_location),
            ..Default::default()
        }
    }
}
