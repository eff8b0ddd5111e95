use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A record as the content API sends it: an identifier plus a bag of attributes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity<A = Map<String, Value>> {
    /// The entity's identifier, always a string on the wire
    ///
    /// Stricter than the untyped flattener, which copies any non-null `id`
    /// verbatim: a numeric `id` flattens fine but fails to deserialize here.
    /// Normalize ids to strings before reading responses through this view.
    pub id: Option<String>,

    /// The entity's own fields, relations included
    pub attributes: Option<A>,
}

/// Envelope around a single related entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityResponse<A = Map<String, Value>> {
    #[serde(default)]
    pub data: Option<Entity<A>>,
}

/// Envelope around an ordered list of related entities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityResponseCollection<A = Map<String, Value>> {
    #[serde(default)]
    pub data: Option<Vec<Entity<A>>>,
}

impl<A> EntityResponse<A> {
    pub fn new(entity: Entity<A>) -> Self {
        EntityResponse { data: Some(entity) }
    }
}

impl<A> EntityResponseCollection<A> {
    pub fn new(entities: Vec<Entity<A>>) -> Self {
        EntityResponseCollection {
            data: Some(entities),
        }
    }
}

/// Which envelope a tagged node is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapperKind {
    /// Tag ends with the single-response suffix
    Single,
    /// Tag ends with the collection suffix
    Collection,
}

/// Configuration for the flattening process
#[derive(Debug, Clone)]
pub struct FlattenConfig {
    /// Key holding the discriminator tag on every node
    pub typename_field: String,

    /// Tag suffix marking a single-entity response, e.g. "AuthorEntityResponse"
    pub response_suffix: String,

    /// Tag suffix marking a collection response, e.g. "ArticleRelationResponseCollection"
    pub collection_suffix: String,
}

impl FlattenConfig {
    pub fn with_typename_field(mut self, field: impl Into<String>) -> Self {
        self.typename_field = field.into();
        self
    }

    pub fn with_response_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.response_suffix = suffix.into();
        self
    }

    pub fn with_collection_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.collection_suffix = suffix.into();
        self
    }
}

impl Default for FlattenConfig {
    fn default() -> Self {
        FlattenConfig {
            typename_field: String::from("__typename"),
            response_suffix: String::from("EntityResponse"),
            collection_suffix: String::from("ResponseCollection"),
        }
    }
}
