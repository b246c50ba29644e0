//! Index Administration Example
//!
//! Creates an index, prints its stats and status, then drops it.
//!
//! Run with: cargo run --example index_admin

use searchlink_rs::{Connection, Error, QueryArgs};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let conn = Connection::new("localhost", "9200");
    let index = "index_admin_example";

    match conn.delete_index(index).await {
        Ok(_) => println!("Dropped leftover index"),
        Err(Error::Engine { status: 404, .. }) => {}
        Err(e) => return Err(e.into()),
    }

    conn.create_index(index, None).await?;

    let stats = conn.stats(&[index], QueryArgs::new()).await?;
    if let Some(index_stats) = stats.index(index) {
        let docs = index_stats
            .primaries
            .get("docs")
            .and_then(|docs| docs.get("count"))
            .and_then(|count| count.as_u64());
        println!("📊 {} primary docs: {:?}", index, docs);
    }

    let status = conn.index_status(&[index]).await?;
    println!(
        "🩺 shards: {} total, {} successful, {} failed",
        status.shards.total, status.shards.successful, status.shards.failed
    );
    if let Some(index_status) = status.indices.get(index) {
        for (name, value) in &index_status.index {
            println!("   {} = {:?}", name, value);
        }
    }

    conn.delete_index(index).await?;
    println!("✅ Done");
    Ok(())
}
