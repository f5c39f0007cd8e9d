//! Tool specifications and argument validation.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::args::Arguments;
use crate::errors::ToolError;

/// The JSON type a parameter or return value is declared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    Integer,
    Number,
    String,
    Boolean,
    Array,
    Object,
}

impl ParamType {
    /// The JSON Schema type name.
    pub fn type_name(&self) -> &'static str {
        match self {
            ParamType::Integer => "integer",
            ParamType::Number => "number",
            ParamType::String => "string",
            ParamType::Boolean => "boolean",
            ParamType::Array => "array",
            ParamType::Object => "object",
        }
    }

    /// Whether a JSON value conforms to this type.
    ///
    /// Integers are numbers without a fractional part; a number-typed
    /// parameter accepts integers too.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            ParamType::Integer => value.is_i64() || value.is_u64(),
            ParamType::Number => value.is_number(),
            ParamType::String => value.is_string(),
            ParamType::Boolean => value.is_boolean(),
            ParamType::Array => value.is_array(),
            ParamType::Object => value.is_object(),
        }
    }
}

fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// A single declared parameter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParamSpec {
    pub name: String,
    pub ty: ParamType,
    pub description: String,
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

impl ParamSpec {
    pub fn required(name: impl Into<String>, ty: ParamType, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty,
            description: description.into(),
            required: true,
            default: None,
        }
    }

    pub fn optional(name: impl Into<String>, ty: ParamType, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty,
            description: description.into(),
            required: false,
            default: None,
        }
    }

    /// Attach a default value; the parameter becomes optional.
    pub fn with_default(mut self, default: Value) -> Self {
        self.required = false;
        self.default = Some(default);
        self
    }
}

/// An immutable tool specification: unique name, ordered parameters,
/// return type, and a description for discovery.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    pub params: Vec<ParamSpec>,
    pub returns: ParamType,
}

impl ToolSpec {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        returns: ParamType,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            params: Vec::new(),
            returns,
        }
    }

    /// Append a parameter declaration.
    pub fn param(mut self, param: ParamSpec) -> Self {
        self.params.push(param);
        self
    }

    /// Render the parameter list as a JSON Schema object.
    pub fn input_schema(&self) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();

        for param in &self.params {
            let mut prop = Map::new();
            prop.insert("type".to_string(), Value::String(param.ty.type_name().into()));
            if !param.description.is_empty() {
                prop.insert(
                    "description".to_string(),
                    Value::String(param.description.clone()),
                );
            }
            if let Some(default) = &param.default {
                prop.insert("default".to_string(), default.clone());
            }
            properties.insert(param.name.clone(), Value::Object(prop));
            if param.required {
                required.push(Value::String(param.name.clone()));
            }
        }

        let mut schema = Map::new();
        schema.insert("type".to_string(), Value::String("object".into()));
        schema.insert("properties".to_string(), Value::Object(properties));
        if !required.is_empty() {
            schema.insert("required".to_string(), Value::Array(required));
        }
        Value::Object(schema)
    }

    /// Validate supplied arguments against the declared parameters.
    ///
    /// Checks, in order: the payload is an object (null counts as empty),
    /// no unknown argument names, all required arguments present, every
    /// value matches its declared type. Declared defaults are filled in
    /// for absent optional parameters.
    pub fn validate(&self, args: Value) -> Result<Arguments, ToolError> {
        let mut supplied = match args {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            other => {
                return Err(ToolError::Validation(format!(
                    "expected an object of arguments, got {}",
                    value_type_name(&other)
                )));
            }
        };

        for name in supplied.keys() {
            if !self.params.iter().any(|p| &p.name == name) {
                return Err(ToolError::Validation(format!("unexpected argument: {name}")));
            }
        }

        let mut validated = Map::new();
        for param in &self.params {
            match supplied.remove(&param.name) {
                Some(value) => {
                    if !param.ty.matches(&value) {
                        return Err(ToolError::Validation(format!(
                            "argument {}: expected {}, got {}",
                            param.name,
                            param.ty.type_name(),
                            value_type_name(&value)
                        )));
                    }
                    validated.insert(param.name.clone(), value);
                }
                None if param.required => {
                    return Err(ToolError::Validation(format!(
                        "missing required argument: {}",
                        param.name
                    )));
                }
                None => {
                    if let Some(default) = &param.default {
                        validated.insert(param.name.clone(), default.clone());
                    }
                }
            }
        }

        Ok(Arguments::from(validated))
    }
}

impl From<&ToolSpec> for protocol::Tool {
    fn from(spec: &ToolSpec) -> Self {
        protocol::Tool {
            name: spec.name.clone(),
            description: Some(spec.description.clone()),
            input_schema: spec.input_schema(),
        }
    }
}
