//! Bulk Round-Trip Example
//!
//! Indexes a few documents in one bulk request, searches them, then deletes
//! them in a second bulk request.
//!
//! Run with: cargo run --example bulk_roundtrip
//! (expects an engine on SEARCHLINK_HOST:SEARCHLINK_PORT, default localhost:9200)

use searchlink_rs::{BulkCommand, Connection, Document, Payload};
use serde_json::json;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let host = std::env::var("SEARCHLINK_HOST").unwrap_or_else(|_| "localhost".to_string());
    let port = std::env::var("SEARCHLINK_PORT").unwrap_or_else(|_| "9200".to_string());
    let conn = Connection::new(host, port);

    let index = "bulk_roundtrip";
    let _ = conn.delete_index(index).await;
    conn.create_index(
        index,
        Some(Payload::from(json!({"settings": {"index.number_of_shards": 1}}))),
    )
    .await?;
    println!("✅ Index '{}' created\n", index);

    let tweets = vec![
        Document::new(index, "tweet")
            .with_id("123")
            .with_field("user", "foo")
            .with_field("message", "some foo message"),
        Document::new(index, "tweet")
            .with_field("user", "bar")
            .with_field("message", "some bar message"),
    ];

    let resp = conn.bulk_send(index, &tweets).await?;
    for item in &resp.items {
        println!("📝 {} {} (version {})", item.command, item.outcome.id, item.outcome.version);
    }

    conn.refresh_index(index).await?;
    let results = conn
        .search(json!({"query": {"match_all": {}}}), &[index], &[])
        .await?;
    println!("\n🔍 {} hits:", results.hits.total);
    for (i, hit) in results.hits.hits.iter().enumerate() {
        println!("   {}. {} {:?} (score: {:.4})", i + 1, hit.id, hit.source.get("user"), hit.score);
    }

    // Delete by the ids the engine reported back
    let deletes: Vec<Document> = resp
        .items
        .iter()
        .map(|item| {
            Document::new(index, "tweet")
                .with_id(item.outcome.id.clone())
                .with_command(BulkCommand::Delete)
        })
        .collect();
    conn.bulk_send(index, &deletes).await?;
    conn.refresh_index(index).await?;

    let results = conn
        .search(r#"{"query":{"match_all":{}}}"#, &[index], &[])
        .await?;
    println!("\n🗑️  After delete: {} hits", results.hits.total);

    conn.delete_index(index).await?;
    Ok(())
}
