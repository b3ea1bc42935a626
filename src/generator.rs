//! Build a [`Swagger`] document from a serverless service description.
//!
//! The [`Generator`] works in the same order a deployment would: document
//! overrides first, then partial swagger files, api key security and finally
//! one operation per http event of every function.
//!
//! # Examples
//!
//! ```rust
//! # use autoswagger::{config::ServerlessConfig, generator::Generator};
//! let config = ServerlessConfig::from_json(r#"{
//!     "service": "pets",
//!     "functions": {
//!         "listPets": { "events": [{ "http": "GET pets" }] }
//!     }
//! }"#)?;
//!
//! let swagger = Generator::new(&config).generate()?;
//!
//! assert_eq!(swagger.info.title, "pets");
//! assert!(swagger.paths.contains_key("/pets"));
//! # Ok::<(), autoswagger::error::Error>(())
//! ```
use std::{
    fs,
    path::{Path, PathBuf},
};

use serde_json::{Map, Value};

use crate::{
    config::{HttpEvent, ServerlessConfig},
    error::Error,
    openapi::{
        ApiKeyLocation, HttpMethod, Operation, SecurityDefinition, SecurityRequirement, Swagger,
    },
};

mod converters;

/// File name of the generated document written by [`write_swagger_file`].
pub const SWAGGER_FILE_NAME: &str = "swagger.json";

const JSON_MEDIA_TYPE: &str = "application/json";

pub struct Generator<'c> {
    config: &'c ServerlessConfig,
    swagger: Swagger,
    base_dir: Option<PathBuf>,
}

impl<'c> Generator<'c> {
    /// New generator starting from an empty document titled after the service.
    pub fn new(config: &'c ServerlessConfig) -> Self {
        let mut swagger = Swagger::default();
        swagger.info.title = config.service_name().to_string();

        Self {
            config,
            swagger,
            base_dir: None,
        }
    }

    /// Resolve relative `swaggerFiles` against given directory instead of the
    /// working directory, usually the directory of `serverless.yml`.
    pub fn with_base_dir<P: Into<PathBuf>>(mut self, base_dir: P) -> Self {
        self.base_dir = Some(base_dir.into());

        self
    }

    /// Run every generation step and return the finished document.
    pub fn generate(mut self) -> Result<Swagger, Error> {
        self.apply_overrides();
        self.merge_swagger_files()?;
        self.collapse_definitions();
        self.generate_security();
        self.generate_paths();

        Ok(self.swagger)
    }

    pub fn swagger(&self) -> &Swagger {
        &self.swagger
    }

    /// Copy document level settings of the `autoswagger` block into the document.
    pub fn apply_overrides(&mut self) {
        let autoswagger = self.config.autoswagger();

        if let Some(base_path) = &autoswagger.base_path {
            self.swagger.base_path = Some(base_path.clone());
        }
        if let Some(host) = &autoswagger.host {
            self.swagger.host = Some(host.clone());
        }
        if let Some(schemes) = &autoswagger.schemes {
            self.swagger.schemes = Some(schemes.clone());
        }
        if let Some(title) = &autoswagger.title {
            self.swagger.info.title = title.clone();
        }
        if let Some(description) = &autoswagger.description {
            self.swagger.info.description = Some(description.clone());
        }
        if let Some(version) = &autoswagger.version {
            self.swagger.info.version = version.clone();
        }
    }

    /// Merge every configured swagger file into the document, later files winning.
    pub fn merge_swagger_files(&mut self) -> Result<(), Error> {
        let config = self.config;
        for file in &config.autoswagger().swagger_files {
            let path = match &self.base_dir {
                Some(base_dir) if file.is_relative() => base_dir.join(file),
                _ => file.clone(),
            };
            let fragment = read_swagger_file(&path)?;

            log::debug!("Merging swagger file {}", path.display());
            self.swagger
                .merge_fragment(fragment)
                .map_err(|source| Error::SwaggerFile { path, source })?;
        }

        Ok(())
    }

    fn collapse_definitions(&mut self) {
        self.swagger
            .definitions
            .values_mut()
            .for_each(|definition| definition.collapse_const_any_of());
    }

    /// Replace the security definitions with one `apiKey` header definition per
    /// configured api key header. Without api key headers the definitions are
    /// left as they are.
    pub fn generate_security(&mut self) {
        let headers = &self.config.autoswagger().api_key_headers;
        if headers.is_empty() {
            return;
        }

        if !self.swagger.security_definitions.is_empty() {
            log::debug!("Replacing existing security definitions with api key headers");
        }
        self.swagger.security_definitions = headers
            .iter()
            .map(|header| {
                (
                    header.clone(),
                    SecurityDefinition::api_key(header, ApiKeyLocation::Header),
                )
            })
            .collect();
    }

    /// Add an operation for every http event of every function.
    pub fn generate_paths(&mut self) {
        let config = self.config;
        for (function_name, function) in &config.functions {
            let events = function
                .events
                .iter()
                .filter_map(|event| event.http_event())
                .filter_map(|event| event.to_event());

            for event in events {
                if event.exclude {
                    log::debug!("Excluding {} {} from swagger", event.method, event.path);
                    continue;
                }
                self.add_operation(function_name, &event);
            }
        }
    }

    fn add_operation(&mut self, function_name: &str, event: &HttpEvent) {
        let method = match event.method.parse::<HttpMethod>() {
            Ok(method) => method,
            Err(error) => {
                log::warn!(
                    "Skipping {} event of function {}: {}",
                    event.path,
                    function_name,
                    error
                );
                return;
            }
        };

        let path = if event.path.starts_with('/') {
            event.path.clone()
        } else {
            format!("/{}", event.path)
        };
        let operation_id = non_empty(event.operation_id.as_deref())
            .map(ToString::to_string)
            .unwrap_or_else(|| format!("{function_name}.{method}.{}", event.path));

        let mut operation = Operation::new(operation_id)
            .with_summary(non_empty(event.summary.as_deref()).unwrap_or(function_name))
            .with_description(event.description.as_deref().unwrap_or_default())
            .with_consumes(media_types(event.consumes.as_ref()))
            .with_produces(media_types(event.produces.as_ref()))
            .with_parameters(converters::http_event_to_parameters(event))
            .with_responses(converters::format_responses(
                event.response_data.as_ref().or(event.responses.as_ref()),
            ));

        if let Some(tags) = &event.swagger_tags {
            operation = operation.with_tags(tags);
        }
        if let Some(security) = self.operation_security(event) {
            operation = operation.with_security(security);
        }

        log::debug!("Adding swagger operation {} {}", method, path);
        self.swagger.add_operation(path, method, operation);
    }

    fn operation_security(&self, event: &HttpEvent) -> Option<Vec<SecurityRequirement>> {
        let headers = &self.config.autoswagger().api_key_headers;
        if !headers.is_empty() {
            let requirement = headers.iter().fold(SecurityRequirement::new(), |requirement, header| {
                requirement.with_scheme(header, Vec::new())
            });
            return Some(vec![requirement]);
        }

        event.security.as_ref().map(|security| {
            security
                .iter()
                .map(|schemes| {
                    schemes
                        .iter()
                        .fold(SecurityRequirement::new(), |requirement, (name, scopes)| {
                            requirement.with_scheme(name, scopes.clone())
                        })
                })
                .collect()
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}

fn media_types(configured: Option<&Vec<String>>) -> Vec<String> {
    configured
        .cloned()
        .unwrap_or_else(|| vec![JSON_MEDIA_TYPE.to_string()])
}

fn read_swagger_file(path: &Path) -> Result<Map<String, Value>, Error> {
    let content = fs::read_to_string(path).map_err(|source| Error::io(path, source))?;

    serde_json::from_str(&content).map_err(|source| Error::SwaggerFile {
        path: path.to_path_buf(),
        source,
    })
}

/// Write the document as pretty printed `swagger.json` into given directory,
/// creating the directory when missing. Returns the path of the written file.
pub fn write_swagger_file<P: AsRef<Path>>(swagger: &Swagger, dir: P) -> Result<PathBuf, Error> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).map_err(|source| Error::io(dir, source))?;

    let path = dir.join(SWAGGER_FILE_NAME);
    let json = swagger.to_pretty_json()?;
    fs::write(&path, json).map_err(|source| Error::io(&path, source))?;

    log::info!("Wrote swagger document to {}", path.display());
    Ok(path)
}
