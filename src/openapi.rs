//! Rust implementation of the Swagger 2.0 document served by the handlers.
//!
//! Every type here is a plain serde model with chainable `with_*` methods. The
//! handlers never look inside a [`Swagger`] document, they only serialize it.
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub use self::{
    definition::{AdditionalProperties, Definition},
    info::{Contact, Info, License},
    path::{HttpMethod, Operation, PathItem, Paths},
    parameter::{CollectionFormat, Items, Parameter, ParameterIn},
    response::{Ref, Response},
    security::{ApiKeyLocation, SecurityDefinition, SecurityRequirement, SecurityType},
    tag::{ExternalDocs, Tag},
};

pub mod definition;
pub mod info;
pub mod parameter;
pub mod path;
pub mod response;
pub mod security;
pub mod tag;

/// Root object of a Swagger 2.0 document.
///
/// `paths`, `securityDefinitions` and `definitions` are always present in the
/// serialized output, even when empty. Top level keys this model does not know
/// about are kept in [`Swagger::extensions`] and serialized back in place.
#[non_exhaustive]
#[derive(Serialize, Deserialize, Clone)]
#[cfg_attr(feature = "debug", derive(Debug))]
#[serde(rename_all = "camelCase", default)]
pub struct Swagger {
    pub swagger: SwaggerVersion,

    pub info: Info,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_path: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Tag>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub schemes: Option<Vec<Scheme>>,

    pub paths: Paths,

    pub security_definitions: IndexMap<String, SecurityDefinition>,

    pub definitions: IndexMap<String, Definition>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_docs: Option<ExternalDocs>,

    #[serde(flatten)]
    pub extensions: IndexMap<String, Value>,
}

impl Default for Swagger {
    fn default() -> Self {
        Self::new(Info::new("", "1"))
    }
}

impl Swagger {
    pub fn new(info: Info) -> Self {
        Self {
            swagger: SwaggerVersion::default(),
            info,
            host: None,
            base_path: None,
            tags: None,
            schemes: None,
            paths: Paths::new(),
            security_definitions: IndexMap::new(),
            definitions: IndexMap::new(),
            external_docs: None,
            extensions: IndexMap::new(),
        }
    }

    pub fn with_host<S: AsRef<str>>(mut self, host: S) -> Self {
        self.host = Some(host.as_ref().to_string());

        self
    }

    pub fn with_base_path<S: AsRef<str>>(mut self, base_path: S) -> Self {
        self.base_path = Some(base_path.as_ref().to_string());

        self
    }

    pub fn with_schemes<I: IntoIterator<Item = Scheme>>(mut self, schemes: I) -> Self {
        self.schemes = Some(schemes.into_iter().collect());

        self
    }

    /// Add list of [`Tag`]s to [`Swagger`].
    pub fn with_tags<I: IntoIterator<Item = Tag>>(mut self, tags: I) -> Self {
        self.tags = Some(tags.into_iter().collect());

        self
    }

    /// Add [`Operation`] for given path and method. Operations already registered
    /// for other methods of the same path are kept.
    pub fn with_operation<S: AsRef<str>>(
        mut self,
        path: S,
        method: HttpMethod,
        operation: Operation,
    ) -> Self {
        self.add_operation(path, method, operation);

        self
    }

    pub fn with_security_definition<S: AsRef<str>>(
        mut self,
        name: S,
        definition: SecurityDefinition,
    ) -> Self {
        self.security_definitions
            .insert(name.as_ref().to_string(), definition);

        self
    }

    pub fn with_definition<S: AsRef<str>>(mut self, name: S, definition: Definition) -> Self {
        self.definitions
            .insert(name.as_ref().to_string(), definition);

        self
    }

    pub fn with_external_docs(mut self, external_docs: ExternalDocs) -> Self {
        self.external_docs = Some(external_docs);

        self
    }

    pub fn add_operation<S: AsRef<str>>(
        &mut self,
        path: S,
        method: HttpMethod,
        operation: Operation,
    ) {
        self.paths
            .entry(path.as_ref().to_string())
            .or_default()
            .operations
            .insert(method, operation);
    }

    /// Merge a partial document on top of this one.
    ///
    /// `paths` and `definitions` of the fragment are merged key by key, a key of
    /// the fragment replacing the existing entry. Any other top level key of the
    /// fragment replaces the current value as a whole.
    pub fn merge_fragment(&mut self, mut fragment: Map<String, Value>) -> serde_json::Result<()> {
        let paths = fragment
            .remove("paths")
            .map(serde_json::from_value::<Paths>)
            .transpose()?;
        let definitions = fragment
            .remove("definitions")
            .map(serde_json::from_value::<IndexMap<String, Definition>>)
            .transpose()?;

        if !fragment.is_empty() {
            let mut current = match serde_json::to_value(&*self)? {
                Value::Object(current) => current,
                _ => Map::new(),
            };
            current.extend(fragment);
            let mut merged: Swagger = serde_json::from_value(Value::Object(current))?;
            std::mem::swap(self, &mut merged);
        }

        if let Some(paths) = paths {
            self.paths.extend(paths);
        }
        if let Some(definitions) = definitions {
            self.definitions.extend(definitions);
        }

        Ok(())
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn to_pretty_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    #[cfg(feature = "yaml")]
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}

/// A [`Ref`] or an inline value of type `T`.
///
/// Swagger files may reference shared parameters and responses with
/// `{"$ref": "#/parameters/..."}` instead of declaring them inline.
#[derive(Serialize, Deserialize, Clone)]
#[cfg_attr(feature = "debug", derive(Debug))]
#[serde(untagged)]
pub enum RefOr<T> {
    Ref(Ref),
    T(T),
}

impl From<Parameter> for RefOr<Parameter> {
    fn from(parameter: Parameter) -> Self {
        Self::T(parameter)
    }
}

impl From<Response> for RefOr<Response> {
    fn from(response: Response) -> Self {
        Self::T(response)
    }
}

impl<T> From<Ref> for RefOr<T> {
    fn from(reference: Ref) -> Self {
        Self::Ref(reference)
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "debug", derive(Debug))]
pub enum SwaggerVersion {
    #[default]
    #[serde(rename = "2.0")]
    Version2,
}

/// Transfer protocol of the API. `ws` and `wss` are the WebSocket schemes.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "debug", derive(Debug))]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    Http,
    Https,
    Ws,
    Wss,
}
