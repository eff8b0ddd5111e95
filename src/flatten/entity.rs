use super::{is_truthy, Flattener};
use crate::error::{FlattenError, Result};
use serde_json::{Map, Value};
use tracing::debug;

impl Flattener {
    /// Flatten one entity into `{...attributes, id}`
    ///
    /// Every attribute value goes through [`Flattener::flatten_deep`], so
    /// relations nested inside the entity are collapsed too. The entity's own
    /// `id` overwrites any `id` key found in `attributes`, keeping that key's
    /// position.
    ///
    /// `attributes` must be a JSON object. A truthy non-object such as `true`,
    /// `5` or `[]` is rejected with [`FlattenError::InvalidEntity`] rather than
    /// flattened to a bare `{id}`.
    pub fn flatten_entity(&self, entity: Value) -> Result<Map<String, Value>> {
        let Value::Object(mut entity) = entity else {
            debug!("entity is not an object");
            return Err(FlattenError::InvalidEntity);
        };

        let id = match entity.remove("id") {
            Some(id) if !id.is_null() => id,
            _ => {
                debug!("entity has no id");
                return Err(FlattenError::InvalidEntity);
            }
        };

        // Anything truthy other than an object cannot carry fields
        let Some(Value::Object(attributes)) = entity.remove("attributes") else {
            debug!(%id, "entity has no attributes object");
            return Err(FlattenError::InvalidEntity);
        };

        let mut flattened = Map::new();
        for (key, value) in attributes {
            let value = self.flatten_deep(value)?;
            flattened.insert(key, value);
        }
        flattened.insert("id".to_string(), id);

        Ok(flattened)
    }

    /// Unwrap a `{data: entity}` response and flatten the entity
    ///
    /// `None` models an omitted response. It is replaced by an empty object,
    /// which has no `data` and therefore fails the same way `null` does.
    pub fn flatten_entity_response(&self, response: Option<Value>) -> Result<Map<String, Value>> {
        let response = response.unwrap_or_else(|| Value::Object(Map::new()));

        match take_data(response) {
            Some(data) if is_truthy(&data) => self.flatten_entity(data),
            _ => {
                debug!("entity response has no data");
                Err(FlattenError::InvalidEntityResponse)
            }
        }
    }

    /// Unwrap a `{data: [entity, ...]}` response and flatten each entity in order
    ///
    /// An empty `data` array is valid and yields an empty list. The first
    /// entity that fails validation aborts the whole collection.
    pub fn flatten_entity_response_collection(&self, response: Value) -> Result<Vec<Value>> {
        let Some(Value::Array(entities)) = take_data(response) else {
            debug!("entity response collection has no data array");
            return Err(FlattenError::InvalidEntityResponseCollection);
        };

        entities
            .into_iter()
            .map(|entity| self.flatten_entity(entity).map(Value::Object))
            .collect()
    }
}

/// Move `data` out of an envelope; non-objects have none
fn take_data(response: Value) -> Option<Value> {
    match response {
        Value::Object(mut envelope) => envelope.remove("data"),
        _ => None,
    }
}
