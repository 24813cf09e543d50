use std::any::{type_name, TypeId};

use serde_json::Value;
use tracing::debug;

use crate::{
    error::{PlannerError, Result},
    schemas::{validation::validate_structured_payload, CompletionSchema, SchemaHandle},
};

/// Parse the model's raw reply text into `T`.
///
/// The text must be a bare JSON document: it is decoded, checked against the
/// schema of `T`, then deserialized. Nothing is stripped or repaired first.
pub fn parse_completion<T>(raw: &str) -> Result<T>
where
    T: CompletionSchema,
{
    let schema = T::schema();

    let payload: Value = serde_json::from_str(raw).map_err(|err| {
        debug!(target: "trip_planner::schema", schema = schema.schema_name(), raw = %raw);
        PlannerError::SchemaValidation(format!(
            "model reply is not valid JSON for `{}`: {}",
            schema.schema_name(),
            err
        ))
    })?;

    if let Err(err) = validate_structured_payload(schema, &payload) {
        debug!(
            target: "trip_planner::schema",
            schema = schema.schema_name(),
            error = %err,
            payload = %payload
        );
        return Err(err);
    }

    deserialize_structured_response::<T>(&payload, schema)
}

pub fn deserialize_structured_response<T>(payload: &Value, schema: &SchemaHandle) -> Result<T>
where
    T: CompletionSchema,
{
    ensure_schema_matches::<T>(schema)?;

    let raw = payload.to_string();
    let mut deserializer = serde_json::Deserializer::from_str(&raw);
    let value = serde_path_to_error::deserialize(&mut deserializer).map_err(|err| {
        let path = err.path().to_string();
        let location = if path.is_empty() || path == "." {
            "<root>".to_string()
        } else {
            path
        };
        PlannerError::SchemaValidation(format!(
            "failed to deserialize `{}` at {}: {}",
            schema.schema_name(),
            location,
            err.inner()
        ))
    })?;

    Ok(value)
}

fn ensure_schema_matches<T: 'static>(schema: &SchemaHandle) -> Result<()> {
    let expected = TypeId::of::<T>();
    if schema.type_id() != expected {
        return Err(PlannerError::SchemaValidation(format!(
            "schema `{}` does not match target type `{}`",
            schema.schema_name(),
            type_name::<T>(),
        )));
    }
    Ok(())
}
