use thiserror::Error;

/// Errors raised while flattening a response tree
#[derive(Debug, Error)]
pub enum FlattenError {
    /// An entity without `id` or `attributes`
    #[error("wrong entity")]
    InvalidEntity,

    /// A missing response, or one without `data`
    #[error("wrong entity response")]
    InvalidEntityResponse,

    /// A collection response without a `data` array
    #[error("wrong entity response collection")]
    InvalidEntityResponseCollection,

    /// The flattened tree did not match the requested type
    #[error("flattened value does not match target type: {0}")]
    Deserialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FlattenError>;
