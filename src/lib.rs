//! Swagger documentation for serverless http services.
//!
//! The crate generates a Swagger 2.0 document out of a serverless service
//! description at build time and serves it at run time from function handlers.
//! The HTML viewer lives in the companion `autoswagger-ui` crate.
//!
//! # Features
//!
//! * **yaml** Default feature. Enables loading `serverless.yml` and
//!   serializing the document to YAML via [`serde_yaml`](https://docs.rs/serde_yaml).
//! * **lambda** Enables [`lambda::run`] which serves any [`handler::Handler`]
//!   through the AWS Lambda runtime.
//! * **debug** Adds `Debug` implementations for the document and config types.
//!
//! # Install
//!
//! ```text
//! [dependencies]
//! autoswagger = "0.1"
//! ```
//!
//! # Examples
//!
//! Generate the document once and serve it from a handler.
//! ```rust
//! # use autoswagger::{
//! #     config::ServerlessConfig,
//! #     generator::Generator,
//! #     handler::{Handler, JsonDocumentHandler},
//! #     provider::DocumentProvider,
//! # };
//! let config = ServerlessConfig::from_json(r#"{
//!     "service": "pets",
//!     "functions": {
//!         "getPet": { "events": [{ "http": { "path": "pets/{id}", "method": "get" } }] }
//!     }
//! }"#)?;
//! let provider = DocumentProvider::new(Generator::new(&config).generate()?);
//!
//! let response = JsonDocumentHandler::new(provider).handle(&serde_json::Value::Null)?;
//!
//! assert_eq!(response.status_code, 200);
//! assert!(response.body.contains("\"/pets/{id}\""));
//! # Ok::<(), autoswagger::error::Error>(())
//! ```
pub mod config;
pub mod error;
pub mod generator;
pub mod handler;
#[cfg(feature = "lambda")]
pub mod lambda;
pub mod openapi;
pub mod provider;
pub mod routes;
