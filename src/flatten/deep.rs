use super::{is_truthy, Flattener};
use crate::error::Result;
use crate::types::WrapperKind;
use serde_json::{Map, Value};
use tracing::{debug, trace};

/// The closed set of shapes the deep walk distinguishes
enum Node {
    Scalar(Value),
    Array(Vec<Value>),
    Object(Map<String, Value>),
    Wrapper(WrapperKind, Map<String, Value>),
}

impl Flattener {
    /// Classify an object by its discriminator tag
    ///
    /// Only the tag is inspected, never the shape of `data`. A missing or
    /// non-string tag means the object is plain data.
    pub fn wrapper_kind(&self, node: &Map<String, Value>) -> Option<WrapperKind> {
        let tag = node.get(&self.config.typename_field)?.as_str()?;

        if tag.ends_with(&self.config.collection_suffix) {
            Some(WrapperKind::Collection)
        } else if tag.ends_with(&self.config.response_suffix) {
            Some(WrapperKind::Single)
        } else {
            None
        }
    }

    /// Flatten every relation envelope found anywhere in `value`
    ///
    /// Scalars come back unchanged, arrays and plain objects are rebuilt with
    /// each element flattened, and tagged envelopes are unwrapped. An envelope
    /// whose `data` is empty becomes `null`, both at the root and under a key.
    pub fn flatten_deep(&self, value: Value) -> Result<Value> {
        match self.classify(value) {
            Node::Scalar(value) => Ok(value),
            Node::Wrapper(kind, envelope) => self.unwrap_relation(kind, envelope),
            Node::Array(items) => items
                .into_iter()
                .map(|item| self.flatten_deep(item))
                .collect::<Result<Vec<_>>>()
                .map(Value::Array),
            Node::Object(fields) => {
                let mut flattened = Map::new();
                for (key, value) in fields {
                    let value = self.flatten_deep(value)?;
                    flattened.insert(key, value);
                }
                Ok(Value::Object(flattened))
            }
        }
    }

    fn classify(&self, value: Value) -> Node {
        match value {
            Value::Array(items) => Node::Array(items),
            Value::Object(fields) => match self.wrapper_kind(&fields) {
                Some(kind) => Node::Wrapper(kind, fields),
                None => Node::Object(fields),
            },
            scalar => Node::Scalar(scalar),
        }
    }

    /// Dispatch on the envelope's `data`: an array is a collection, anything
    /// else truthy is a single entity, and nothing at all is an unset relation
    fn unwrap_relation(&self, kind: WrapperKind, envelope: Map<String, Value>) -> Result<Value> {
        match envelope.get("data") {
            Some(Value::Array(entities)) => {
                trace!(?kind, entities = entities.len(), "unwrapping collection relation");
                self.flatten_entity_response_collection(Value::Object(envelope))
                    .map(Value::Array)
            }
            Some(data) if is_truthy(data) => {
                trace!(?kind, "unwrapping single relation");
                self.flatten_entity_response(Some(Value::Object(envelope)))
                    .map(Value::Object)
            }
            _ => {
                debug!(?kind, "empty relation collapsed to null");
                Ok(Value::Null)
            }
        }
    }
}
