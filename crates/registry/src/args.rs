//! Validated argument map handed to tool bodies.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::errors::ToolError;

/// Arguments that have passed schema validation, with defaults applied.
#[derive(Debug, Clone, Default)]
pub struct Arguments(Map<String, Value>);

impl Arguments {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Deserialize the whole map into a typed argument struct.
    pub fn parse<T: DeserializeOwned>(&self) -> Result<T, ToolError> {
        serde_json::from_value(Value::Object(self.0.clone()))
            .map_err(|e| ToolError::Validation(e.to_string()))
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl From<Map<String, Value>> for Arguments {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct AddArgs {
        a: i64,
        b: i64,
    }

    fn args(value: Value) -> Arguments {
        match value {
            Value::Object(map) => Arguments::from(map),
            _ => unreachable!(),
        }
    }

    #[test]
    fn parse_into_typed_struct() {
        let parsed: AddArgs = args(json!({"a": 2, "b": 3})).parse().unwrap();
        assert_eq!(parsed.a, 2);
        assert_eq!(parsed.b, 3);
    }

    #[test]
    fn parse_failure_is_validation() {
        let err = args(json!({"a": 2})).parse::<AddArgs>().unwrap_err();
        assert!(matches!(err, ToolError::Validation(_)));
    }

    #[test]
    fn into_value_round_trip() {
        let value = json!({"path": "."});
        assert_eq!(args(value.clone()).into_value(), value);
    }
}
