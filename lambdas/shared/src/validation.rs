//! JSON Schema validation of request bodies
//!
//! Bodies are checked against the same models the API Gateway request
//! validators use, then deserialized into typed requests.

use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::errors::{Error, Result};
use crate::models::{CreateTodoRequest, UpdateTodoRequest};

fn create_todo_schema() -> Value {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "title": "create-todo",
        "type": "object",
        "properties": {
            "name": { "type": "string", "minLength": 1 },
            "dueDate": { "type": "string" }
        },
        "required": ["name", "dueDate"],
        "additionalProperties": false
    })
}

fn update_todo_schema() -> Value {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "title": "update-todo",
        "type": "object",
        "properties": {
            "name": { "type": "string", "minLength": 1 },
            "dueDate": { "type": "string" },
            "done": { "type": "boolean" }
        },
        "additionalProperties": false
    })
}

/// Check `instance` against `schema`, reporting every violation at once
pub fn validate(schema: &Value, instance: &Value) -> Result<()> {
    let validator = jsonschema::validator_for(schema)
        .map_err(|e| Error::Validation(format!("invalid schema: {}", e)))?;

    let violations: Vec<String> = validator
        .iter_errors(instance)
        .map(|e| {
            let path = e.instance_path.to_string();
            if path.is_empty() {
                e.to_string()
            } else {
                format!("{}: {}", path, e)
            }
        })
        .collect();

    if violations.is_empty() {
        Ok(())
    } else {
        Err(Error::Validation(violations.join("; ")))
    }
}

fn parse_with<T: DeserializeOwned>(schema: &Value, body: &[u8]) -> Result<T> {
    let value: Value = serde_json::from_slice(body)?;
    validate(schema, &value)?;
    Ok(serde_json::from_value(value)?)
}

pub fn parse_create_request(body: &[u8]) -> Result<CreateTodoRequest> {
    parse_with(&create_todo_schema(), body)
}

pub fn parse_update_request(body: &[u8]) -> Result<UpdateTodoRequest> {
    parse_with(&update_todo_schema(), body)
}
