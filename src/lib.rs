//! # strapi-flatten - Content API Response Flattening
//!
//! Content APIs in the Strapi style wrap every record as `{id, attributes}` and
//! every relation as `{data: ...}`, tagging envelopes with a `__typename` such
//! as `AuthorEntityResponse` or `ArticleRelationResponseCollection`. This crate
//! collapses those layers into a plain object graph where each entity's fields
//! sit next to its `id`.
//!
//! ## Modules
//!
//! - **flatten**: entity, response, collection and deep flattening
//! - **types**: configuration and typed views of the wire shapes
//! - **writer**: JSON Lines / pretty output for flattened values
//!
//! ## Quick Start
//!
//! ```rust
//! use strapi_flatten::flatten_entity_response;
//! use serde_json::json;
//!
//! # fn main() -> anyhow::Result<()> {
//! let response = json!({
//!     "data": {
//!         "id": "1",
//!         "attributes": {
//!             "name": "Test Entity",
//!             "author": {
//!                 "__typename": "AuthorEntityResponse",
//!                 "data": {"id": "7", "attributes": {"name": "Ada"}}
//!             }
//!         }
//!     }
//! });
//!
//! let article = flatten_entity_response(Some(response))?;
//!
//! assert_eq!(article["id"], "1");
//! assert_eq!(article["author"]["name"], "Ada");
//! # Ok(())
//! # }
//! ```

use anyhow::{Context, Result};
use serde_json::Value;
use std::io::{BufRead, Read, Write};
use tracing::debug;

pub mod error;
pub mod flatten;
pub mod types;
pub mod writer;

// Re-export commonly used types for convenience
pub use error::FlattenError;
pub use flatten::{
    flatten_deep, flatten_entity, flatten_entity_response, flatten_entity_response_collection,
    Flattener,
};
pub use types::{Entity, EntityResponse, EntityResponseCollection, FlattenConfig, WrapperKind};
pub use writer::{FlattenedWriter, OutputFormat};

/// Which operation to apply to each input document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlattenMode {
    /// Find and collapse envelopes anywhere in the document
    #[default]
    Auto,
    /// The document is a bare `{id, attributes}` entity
    Entity,
    /// The document is a `{data: entity}` response
    Response,
    /// The document is a `{data: [entity, ...]}` response
    Collection,
}

impl FlattenMode {
    /// Apply this mode's operation to one document
    pub fn apply(self, flattener: &Flattener, document: Value) -> error::Result<Value> {
        match self {
            FlattenMode::Auto => flattener.flatten_deep(document),
            FlattenMode::Entity => flattener.flatten_entity(document).map(Value::Object),
            FlattenMode::Response => flattener
                .flatten_entity_response(Some(document))
                .map(Value::Object),
            FlattenMode::Collection => flattener
                .flatten_entity_response_collection(document)
                .map(Value::Array),
        }
    }
}

/// Main entry point: flatten a stream of JSON documents
///
/// Documents may be newline-delimited or simply concatenated. The first
/// document that fails to parse or flatten aborts the stream. Returns the
/// number of documents processed.
pub fn flatten_json<R: BufRead, W: Write>(
    reader: R,
    writer: &mut FlattenedWriter<W>,
    mode: FlattenMode,
    config: FlattenConfig,
) -> Result<usize> {
    let flattener = Flattener::new(config);
    let stream = serde_json::Deserializer::from_reader(reader).into_iter::<Value>();

    let mut count = 0;
    for (index, document) in stream.enumerate() {
        let document = document.with_context(|| format!("Failed to parse JSON document {}", index))?;
        let flattened = mode
            .apply(&flattener, document)
            .with_context(|| format!("Failed to flatten document {}", index))?;

        writer.write_value(&flattened)?;
        count += 1;
    }

    debug!(count, ?mode, "flattened JSON stream");
    Ok(count)
}

/// Read one whole JSON document, using SIMD parsing when the input allows it
///
/// Inputs simd-json rejects are parsed again with serde_json, whose error is
/// the one reported.
pub fn read_document<R: Read>(mut reader: R) -> Result<Value> {
    let mut content = Vec::new();
    reader
        .read_to_end(&mut content)
        .context("Failed to read input")?;

    // simd-json parses in place, so keep the original bytes for the fallback
    let mut scratch = content.clone();
    match simd_json::serde::from_slice::<Value>(&mut scratch) {
        Ok(value) => Ok(value),
        Err(err) => {
            debug!(%err, "SIMD parse failed, retrying with serde_json");
            serde_json::from_slice(&content).context("Failed to parse JSON")
        }
    }
}
