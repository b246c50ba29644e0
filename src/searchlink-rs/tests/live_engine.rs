//! Round trips against a running engine.
//!
//! Ignored by default. Run with:
//! `TEST_SEARCH_HOST=localhost TEST_SEARCH_PORT=9200 cargo test -p searchlink-rs -- --ignored`

use searchlink_rs::{BulkCommand, Connection, Document, Error, Payload, QueryArgs};
use serde_json::json;

fn live_connection() -> Connection {
    let host = std::env::var("TEST_SEARCH_HOST").unwrap_or_else(|_| "localhost".to_string());
    let port = std::env::var("TEST_SEARCH_PORT").unwrap_or_else(|_| "9200".to_string());
    Connection::new(host, port)
}

fn single_shard() -> Option<Payload> {
    Some(Payload::from(json!({
        "settings": {"index.number_of_shards": 1, "index.number_of_replicas": 0}
    })))
}

#[tokio::test]
#[ignore]
async fn live_missing_index_is_404() {
    let conn = live_connection();
    let err = conn.delete_index("searchlink_missing_index").await.unwrap_err();

    match err {
        Error::Engine { status, message } => {
            assert_eq!(status, 404);
            assert!(message.contains("searchlink_missing_index"));
        }
        other => panic!("expected engine error, got {:?}", other),
    }
}

#[tokio::test]
#[ignore]
async fn live_bulk_index_search_delete() {
    let conn = live_connection();
    let index = "searchlink_live_bulk";
    let _ = conn.delete_index(index).await;
    conn.create_index(index, single_shard()).await.unwrap();

    let doc = Document::new(index, "tweet")
        .with_id("123")
        .with_field("user", "foo")
        .with_field("message", "some foo message");

    let resp = conn.bulk_send(index, &[doc.clone()]).await.unwrap();
    assert_eq!(resp.items[0].command, BulkCommand::Index);
    assert_eq!(resp.items[0].outcome.id, "123");

    conn.refresh_index(index).await.unwrap();
    let found = conn
        .search(r#"{"query":{"match_all":{}}}"#, &[index], &[])
        .await
        .unwrap();
    assert_eq!(found.hits.total, 1);

    let resp = conn
        .bulk_send(index, &[doc.with_command(BulkCommand::Delete)])
        .await
        .unwrap();
    assert_eq!(resp.items[0].command, BulkCommand::Delete);

    conn.refresh_index(index).await.unwrap();
    let found = conn
        .search(json!({"query": {"match_all": {}}}), &[index], &[])
        .await
        .unwrap();
    assert_eq!(found.hits.total, 0);

    conn.delete_index(index).await.unwrap();
}

#[tokio::test]
#[ignore]
async fn live_get_with_field_projection() {
    let conn = live_connection();
    let index = "searchlink_live_get";
    let _ = conn.delete_index(index).await;
    conn.create_index(index, single_shard()).await.unwrap();

    let doc = Document::new(index, "tweet")
        .with_id("111")
        .with_field("f1", "foo")
        .with_field("f2", "foo");
    conn.index(&doc, QueryArgs::new()).await.unwrap();

    let full = conn.get(index, "tweet", "111", QueryArgs::new()).await.unwrap();
    assert!(full.source.is_some());

    let projected = conn
        .get(index, "tweet", "111", QueryArgs::new().with("fields", "f1"))
        .await
        .unwrap();
    assert!(projected.fields.is_some());

    conn.delete_index(index).await.unwrap();
}
