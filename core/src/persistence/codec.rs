//! On-disk format for the task collection
//!
//! The collection is written as `{"version": 1, "tasks": [...]}`. Blobs from
//! before the version tag existed are a bare JSON array and still decode.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::task::Task;
use crate::{Error, Result};

/// Version tag written with every save
pub const FORMAT_VERSION: u32 = 1;

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    version: u32,
    tasks: &'a [Task],
}

#[derive(Deserialize)]
struct Envelope {
    version: u32,
    tasks: Vec<Task>,
}

/// Serialize the full collection
pub fn encode(tasks: &[Task]) -> Result<Vec<u8>> {
    let envelope = EnvelopeRef {
        version: FORMAT_VERSION,
        tasks,
    };
    Ok(serde_json::to_vec_pretty(&envelope)?)
}

/// Parse a saved blob back into the collection.
///
/// Later entries reusing an id already seen are dropped so ids stay unique.
pub fn decode(blob: &[u8]) -> Result<Vec<Task>> {
    let value: Value = serde_json::from_slice(blob)
        .map_err(|e| Error::Deserialization(format!("Failed to parse task list: {}", e)))?;

    let is_envelope = matches!(&value, Value::Object(fields) if fields.contains_key("version"));

    let tasks = if value.is_array() {
        serde_json::from_value::<Vec<Task>>(value)
            .map_err(|e| Error::Deserialization(format!("Invalid legacy task list: {}", e)))?
    } else if is_envelope {
        let envelope: Envelope = serde_json::from_value(value)
            .map_err(|e| Error::Deserialization(format!("Invalid task list: {}", e)))?;
        if envelope.version > FORMAT_VERSION {
            return Err(Error::Deserialization(format!(
                "Unsupported task list version {} (newest known is {})",
                envelope.version, FORMAT_VERSION
            )));
        }
        envelope.tasks
    } else {
        return Err(Error::Deserialization(format!(
            "Expected a task list, found {}",
            json_type(&value)
        )));
    };

    let mut seen = HashSet::with_capacity(tasks.len());
    let mut unique = Vec::with_capacity(tasks.len());
    for task in tasks {
        if seen.insert(task.id.clone()) {
            unique.push(task);
        } else {
            warn!("Dropping task with duplicate id {}", task.id);
        }
    }
    Ok(unique)
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object without a version",
    }
}
