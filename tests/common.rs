use autoswagger::config::ServerlessConfig;
use serde_json::{json, Value};

/// Service with a single `mocked` function carrying given events, in stage `test`.
#[allow(unused)]
pub fn serverless_from_events(events: Value, autoswagger: Value) -> ServerlessConfig {
    serde_json::from_value(json!({
        "service": "",
        "provider": { "name": "aws", "stage": "" },
        "functions": {
            "mocked": { "handler": "mocked.handler", "events": events }
        },
        "custom": { "autoswagger": autoswagger }
    }))
    .expect("valid serverless config")
}

#[allow(unused)]
pub fn value_as_string(value: Option<&'_ Value>) -> String {
    value.unwrap_or(&Value::Null).to_string()
}

#[macro_export]
macro_rules! assert_value {
    ($value:expr=> $( $pointer:literal = $expected:literal, $error:literal)* ) => {{
        $(
            let actual = crate::common::value_as_string($value.pointer($pointer));
            assert_eq!(actual, $expected, "{}: {} expected to be: {} but was: {}", $error, $pointer, $expected, actual);
         )*
    }};
}
