use serde_json::{json, Value};
use strapi_flatten::{
    flatten_deep, flatten_entity, flatten_entity_response, flatten_entity_response_collection,
    Entity, EntityResponse, EntityResponseCollection, FlattenError,
};

fn article_entity(id: &str) -> Value {
    json!({
        "__typename": "ArticleEntity",
        "id": id,
        "attributes": {
            "__typename": "Article",
            "name": "Test Entity",
            "description": "A simple test entity",
            "author": {
                "__typename": "AuthorEntityResponse",
                "data": {
                    "__typename": "AuthorEntity",
                    "id": "1",
                    "attributes": {
                        "__typename": "Author",
                        "name": "Lorenzo Eroticon",
                        "photo": {
                            "__typename": "UploadFileEntityResponse",
                            "data": {
                                "__typename": "UploadFileEntity",
                                "id": "1",
                                "attributes": {
                                    "__typename": "UploadFile",
                                    "url": "/uploads/21_07fabdb9c9.jpg"
                                }
                            }
                        }
                    }
                }
            },
            "articles": {
                "__typename": "ArticleRelationResponseCollection",
                "data": [
                    {
                        "__typename": "ArticleEntity",
                        "id": "1",
                        "attributes": {
                            "__typename": "Article",
                            "name": "Test Article"
                        }
                    }
                ]
            }
        }
    })
}

fn flattened_article(id: &str) -> Value {
    json!({
        "__typename": "Article",
        "id": id,
        "name": "Test Entity",
        "description": "A simple test entity",
        "articles": [
            {"__typename": "Article", "id": "1", "name": "Test Article"}
        ],
        "author": {
            "__typename": "Author",
            "name": "Lorenzo Eroticon",
            "id": "1",
            "photo": {
                "__typename": "UploadFile",
                "id": "1",
                "url": "/uploads/21_07fabdb9c9.jpg"
            }
        }
    })
}

#[test]
fn flattens_entity_with_nested_relations() {
    let flattened = flatten_entity(article_entity("1")).unwrap();

    assert_eq!(Value::Object(flattened), flattened_article("1"));
}

#[test]
fn nested_relations_are_directly_accessible() {
    let flattened = flatten_entity(article_entity("1")).unwrap();

    assert_eq!(flattened["author"]["id"], "1");
    assert_eq!(flattened["author"]["name"], "Lorenzo Eroticon");
    assert_eq!(flattened["author"]["photo"]["url"], "/uploads/21_07fabdb9c9.jpg");
    assert!(flattened["author"].get("data").is_none());
    assert!(flattened["author"].get("attributes").is_none());
}

#[test]
fn flattens_entity_response() {
    let response = json!({"data": article_entity("1")});

    let flattened = flatten_entity_response(Some(response)).unwrap();

    assert_eq!(Value::Object(flattened), flattened_article("1"));
}

#[test]
fn entity_response_rejects_missing_input() {
    for response in [None, Some(Value::Null), Some(json!({}))] {
        let err = flatten_entity_response(response).unwrap_err();
        assert!(matches!(err, FlattenError::InvalidEntityResponse));
        assert_eq!(err.to_string(), "wrong entity response");
    }
}

#[test]
fn flattens_collection_in_order() {
    let response = json!({"data": [article_entity("1"), article_entity("2")]});

    let flattened = flatten_entity_response_collection(response).unwrap();

    assert_eq!(flattened, vec![flattened_article("1"), flattened_article("2")]);
}

#[test]
fn empty_collection_is_empty() {
    let flattened = flatten_entity_response_collection(json!({"data": []})).unwrap();

    assert!(flattened.is_empty());
}

#[test]
fn collection_without_data_fails() {
    let err = flatten_entity_response_collection(json!({})).unwrap_err();

    assert!(matches!(err, FlattenError::InvalidEntityResponseCollection));
    assert_eq!(err.to_string(), "wrong entity response collection");
}

#[test]
fn deep_flattens_tagged_collection_of_articles() {
    let value = json!({
        "__typename": "ArticleEntityResponseCollection",
        "data": [article_entity("1"), article_entity("2")]
    });

    assert_eq!(
        flatten_deep(value).unwrap(),
        json!([flattened_article("1"), flattened_article("2")])
    );
}

#[test]
fn typed_views_feed_flattening() {
    let entity: Entity = serde_json::from_value(json!({
        "id": "3",
        "attributes": {"name": "Typed"}
    }))
    .unwrap();
    let response = EntityResponse::new(entity.clone());
    let collection = EntityResponseCollection::new(vec![entity]);

    let single = flatten_entity_response(Some(serde_json::to_value(response).unwrap())).unwrap();
    let many = flatten_entity_response_collection(serde_json::to_value(collection).unwrap()).unwrap();

    assert_eq!(Value::Object(single), json!({"name": "Typed", "id": "3"}));
    assert_eq!(many, vec![json!({"name": "Typed", "id": "3"})]);
}
