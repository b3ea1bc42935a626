//! Conversions from http event configuration to swagger parameters and responses.
use indexmap::IndexMap;

use crate::{
    config::{HttpEvent, HttpResponse, ParameterConfig, PathParameterConfig},
    openapi::{CollectionFormat, Items, Parameter, ParameterIn, Ref, Response},
};

const DEFAULT_PARAMETER_TYPE: &str = "string";

/// Responses of an operation. Events without responses document a bare `200`.
pub(crate) fn format_responses(
    responses: Option<&IndexMap<String, HttpResponse>>,
) -> IndexMap<String, Response> {
    let Some(responses) = responses else {
        return IndexMap::from([("200".to_string(), Response::new("200 response"))]);
    };

    responses
        .iter()
        .map(|(status_code, response)| {
            let response = match response {
                HttpResponse::Description(description) => Response::new(description),
                HttpResponse::Detailed {
                    description,
                    body_type,
                } => {
                    let description = description
                        .as_deref()
                        .filter(|description| !description.is_empty())
                        .map(ToString::to_string)
                        .unwrap_or_else(|| format!("{status_code} response"));
                    let response = Response::new(description);
                    match body_type {
                        Some(body_type) => response.with_schema(Ref::definition(body_type)),
                        None => response,
                    }
                }
            };

            (status_code.clone(), response)
        })
        .collect()
}

/// Parameters of an operation in documentation order: body, path, header and query.
pub(crate) fn http_event_to_parameters(event: &HttpEvent) -> Vec<Parameter> {
    let mut parameters = Vec::new();
    let request_parameters = event.request_parameters();

    if let Some(body_type) = &event.body_type {
        parameters.push(Parameter::body(body_type));
    }

    let mut placeholders = path_placeholders(&event.path);
    if let Some(declared) = request_parameters.and_then(|parameters| parameters.paths.as_ref()) {
        for (name, config) in declared {
            parameters.push(path_to_parameter(name, Some(config)));
            placeholders.retain(|placeholder| placeholder != name);
        }
    }
    parameters.extend(
        placeholders
            .into_iter()
            .map(|placeholder| path_to_parameter(&placeholder, None)),
    );

    if let Some(headers) = &event.header_parameters {
        parameters.extend(
            headers
                .iter()
                .map(|(name, config)| configured_parameter(name, ParameterIn::Header, config)),
        );
    } else if let Some(headers) = request_parameters.and_then(|parameters| parameters.headers.as_ref()) {
        parameters.extend(headers.iter().map(|(name, builtin)| {
            Parameter::new(name, ParameterIn::Header)
                .with_type(DEFAULT_PARAMETER_TYPE)
                .with_required(builtin.required())
        }));
    }

    if let Some(queries) = &event.query_string_parameters {
        parameters.extend(
            queries
                .iter()
                .map(|(name, config)| configured_parameter(name, ParameterIn::Query, config)),
        );
    } else if let Some(queries) =
        request_parameters.and_then(|parameters| parameters.querystrings.as_ref())
    {
        parameters.extend(queries.iter().map(|(name, builtin)| {
            Parameter::new(name, ParameterIn::Query)
                .with_type(DEFAULT_PARAMETER_TYPE)
                .with_required(builtin.required())
        }));
    }

    parameters
}

/// Path parameter, required unless declared otherwise.
pub(crate) fn path_to_parameter(name: &str, config: Option<&PathParameterConfig>) -> Parameter {
    let (required, description) = match config {
        None => (true, None),
        Some(PathParameterConfig::Required(required)) => (*required, None),
        Some(PathParameterConfig::Detailed {
            required,
            description,
        }) => (required.unwrap_or(true), description.clone()),
    };

    Parameter::new(name, ParameterIn::Path)
        .with_type(DEFAULT_PARAMETER_TYPE)
        .with_required(required)
        .with_optional_description(description)
}

fn configured_parameter(name: &str, parameter_in: ParameterIn, config: &ParameterConfig) -> Parameter {
    let parameter_type = config
        .parameter_type
        .as_deref()
        .unwrap_or(DEFAULT_PARAMETER_TYPE);
    let mut parameter = Parameter::new(name, parameter_in)
        .with_type(parameter_type)
        .with_required(config.required.unwrap_or(false))
        .with_optional_description(config.description.clone());

    if parameter_in == ParameterIn::Query && parameter_type == "array" {
        parameter.items = Some(Items {
            item_type: config.array_items_type.clone(),
            ..Default::default()
        });
        parameter.collection_format = Some(CollectionFormat::Multi);
    }

    parameter
}

/// Names between `{` and `}` in a route, e.g. `id` and `proxy+` of `/a/{id}/{proxy+}`.
fn path_placeholders(path: &str) -> Vec<String> {
    path.split('{')
        .skip(1)
        .filter_map(|segment| segment.split_once('}'))
        .map(|(name, _)| name)
        .filter(|name| !name.is_empty())
        .map(ToString::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use assert_json_diff::assert_json_eq;
    use serde_json::json;

    use super::*;

    fn event(value: serde_json::Value) -> HttpEvent {
        serde_json::from_value(value).expect("valid http event")
    }

    #[test]
    fn path_placeholders_in_order() {
        assert_eq!(
            path_placeholders("/users/{userId}/pets/{petId}"),
            vec!["userId", "petId"]
        );
        assert!(path_placeholders("/users").is_empty());
    }

    #[test]
    fn responses_default_to_200() -> Result<(), serde_json::Error> {
        assert_json_eq!(
            serde_json::to_value(format_responses(None))?,
            json!({ "200": { "description": "200 response" } })
        );
        Ok(())
    }

    #[test]
    fn responses_in_all_forms() -> Result<(), serde_json::Error> {
        let event = event(json!({
            "path": "hello",
            "method": "post",
            "responses": {
                "200": { "description": "this went well", "bodyType": "helloPostResponse" },
                "400": { "description": "failed Post" },
                "404": {},
                "502": "server error"
            }
        }));

        assert_json_eq!(
            serde_json::to_value(format_responses(event.responses.as_ref()))?,
            json!({
                "200": {
                    "description": "this went well",
                    "schema": { "$ref": "#/definitions/helloPostResponse" }
                },
                "400": { "description": "failed Post" },
                "404": { "description": "404 response" },
                "502": { "description": "server error" }
            })
        );
        Ok(())
    }

    #[test]
    fn declared_path_parameters_come_before_placeholders() -> Result<(), serde_json::Error> {
        let event = event(json!({
            "path": "test/{path}",
            "method": "get",
            "request": { "parameters": { "paths": { "pathParam2": false } } }
        }));

        assert_json_eq!(
            serde_json::to_value(http_event_to_parameters(&event))?,
            json!([
                { "name": "pathParam2", "type": "string", "in": "path", "required": false },
                { "name": "path", "type": "string", "in": "path", "required": true }
            ])
        );
        Ok(())
    }

    #[test]
    fn declared_placeholder_is_not_repeated() -> Result<(), serde_json::Error> {
        let event = event(json!({
            "path": "users/{id}",
            "method": "get",
            "request": {
                "parameters": {
                    "paths": { "id": { "required": true, "description": "user id" } }
                }
            }
        }));

        assert_json_eq!(
            serde_json::to_value(http_event_to_parameters(&event))?,
            json!([
                {
                    "name": "id",
                    "type": "string",
                    "in": "path",
                    "required": true,
                    "description": "user id"
                }
            ])
        );
        Ok(())
    }

    #[test]
    fn custom_query_parameters_hide_builtin_ones() {
        let event = event(json!({
            "path": "goodbye",
            "method": "get",
            "queryStringParameters": {},
            "request": { "parameters": { "querystrings": { "bob": true } } }
        }));

        assert!(http_event_to_parameters(&event).is_empty());
    }

    #[test]
    fn builtin_headers_are_required_strings() -> Result<(), serde_json::Error> {
        let event = event(json!({
            "path": "goodbye",
            "method": "get",
            "request": {
                "parameters": {
                    "headers": {
                        "bob": true,
                        "foo": false,
                        "trace": { "required": true, "mappedValue": "context.requestId" }
                    }
                }
            }
        }));

        assert_json_eq!(
            serde_json::to_value(http_event_to_parameters(&event))?,
            json!([
                { "name": "bob", "type": "string", "in": "header", "required": true },
                { "name": "foo", "type": "string", "in": "header", "required": false },
                { "name": "trace", "type": "string", "in": "header", "required": true }
            ])
        );
        Ok(())
    }

    #[test]
    fn body_parameter_is_first() {
        let event = event(json!({
            "path": "pets/{id}",
            "method": "put",
            "bodyType": "Pet",
            "headerParameters": { "x-trace": { "type": "string" } }
        }));

        let names = http_event_to_parameters(&event)
            .into_iter()
            .map(|parameter| parameter.name)
            .collect::<Vec<_>>();

        assert_eq!(names, vec!["body", "id", "x-trace"]);
    }
}
