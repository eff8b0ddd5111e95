//! Response flattening - collapse `{id, attributes}` / `{data}` envelopes
//!
//! The content API wraps every record as `{id, attributes}` and every relation
//! as `{data: ...}`. This module removes those layers, producing a tree where
//! each entity's fields sit next to its `id`.
//!
//! ## Layout
//!
//! - **entity**: the three envelope-level operations (entity, single response, collection)
//! - **deep**: the recursive walk that finds relation envelopes anywhere in a tree

mod deep;
mod entity;

use crate::error::{FlattenError, Result};
use crate::types::FlattenConfig;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Flattens content API responses according to a [`FlattenConfig`]
///
/// A `Flattener` holds no state beyond its configuration; every call is an
/// independent transform of the tree it is given.
#[derive(Debug, Clone, Default)]
pub struct Flattener {
    config: FlattenConfig,
}

impl Flattener {
    pub fn new(config: FlattenConfig) -> Self {
        Flattener { config }
    }

    pub fn config(&self) -> &FlattenConfig {
        &self.config
    }

    /// Flatten a single-entity response and deserialize it into `T`
    ///
    /// # Example
    /// ```rust
    /// use strapi_flatten::Flattener;
    /// use serde::Deserialize;
    /// use serde_json::json;
    ///
    /// #[derive(Deserialize)]
    /// struct Author {
    ///     id: String,
    ///     name: String,
    /// }
    ///
    /// let response = json!({
    ///     "data": {"id": "1", "attributes": {"name": "Ada"}}
    /// });
    ///
    /// let author: Author = Flattener::default().flatten_response_as(response).unwrap();
    /// assert_eq!(author.id, "1");
    /// assert_eq!(author.name, "Ada");
    /// ```
    pub fn flatten_response_as<T: DeserializeOwned>(&self, response: Value) -> Result<T> {
        let flattened = self.flatten_entity_response(Some(response))?;
        Ok(serde_json::from_value(Value::Object(flattened))?)
    }

    /// Flatten a collection response and deserialize each entity into `T`
    pub fn flatten_collection_as<T: DeserializeOwned>(&self, response: Value) -> Result<Vec<T>> {
        self.flatten_entity_response_collection(response)?
            .into_iter()
            .map(|entity| serde_json::from_value(entity).map_err(FlattenError::from))
            .collect()
    }

    /// Deep-flatten any tree and deserialize the result into `T`
    pub fn flatten_deep_as<T: DeserializeOwned>(&self, value: Value) -> Result<T> {
        Ok(serde_json::from_value(self.flatten_deep(value)?)?)
    }
}

/// Flatten one `{id, attributes}` entity with the default configuration
pub fn flatten_entity(entity: Value) -> Result<Map<String, Value>> {
    Flattener::default().flatten_entity(entity)
}

/// Flatten a `{data: entity}` response with the default configuration
///
/// `None` stands for a missing response and fails like an explicit `null`.
pub fn flatten_entity_response(response: Option<Value>) -> Result<Map<String, Value>> {
    Flattener::default().flatten_entity_response(response)
}

/// Flatten a `{data: [entity, ...]}` response with the default configuration
pub fn flatten_entity_response_collection(response: Value) -> Result<Vec<Value>> {
    Flattener::default().flatten_entity_response_collection(response)
}

/// Flatten every relation envelope found anywhere in `value` with the default configuration
pub fn flatten_deep(value: Value) -> Result<Value> {
    Flattener::default().flatten_deep(value)
}

/// Loose truthiness used by the wire format: null, false, 0 and "" are falsy,
/// every object and array is truthy
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64() != Some(0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
