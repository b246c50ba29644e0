use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use searchlink_rs::{Config, Connection, Document, Payload, QueryArgs};
use serde::Serialize;

mod telemetry;

const MATCH_ALL: &str = r#"{"query":{"match_all":{}}}"#;

#[derive(Parser)]
#[command(name = "searchlink", version, about = "Client for REST document search engines")]
struct Cli {
    /// JSON config file with host, port and timeout
    #[arg(long, global = true)]
    config: Option<String>,

    #[arg(long, env = "SEARCHLINK_HOST", global = true)]
    host: Option<String>,

    #[arg(long, env = "SEARCHLINK_PORT", global = true)]
    port: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create an index, optionally from a settings/mappings JSON file
    CreateIndex {
        name: String,
        #[arg(long)]
        mapping: Option<String>,
    },
    DeleteIndex {
        name: String,
    },
    Refresh {
        name: String,
    },
    /// Index one document given as a JSON object of fields
    Index {
        index: String,
        doc_type: String,
        fields: String,
        #[arg(long)]
        id: Option<String>,
        #[arg(long = "arg", value_parser = parse_arg)]
        args: Vec<(String, String)>,
    },
    Get {
        index: String,
        doc_type: String,
        id: String,
        #[arg(long = "arg", value_parser = parse_arg)]
        args: Vec<(String, String)>,
    },
    Delete {
        index: String,
        doc_type: String,
        id: String,
    },
    /// Search with a raw JSON query (match_all when omitted)
    Search {
        #[arg(long, value_delimiter = ',')]
        index: Vec<String>,
        #[arg(long = "type", value_delimiter = ',')]
        types: Vec<String>,
        #[arg(long)]
        query: Option<String>,
        #[arg(long = "arg", value_parser = parse_arg)]
        args: Vec<(String, String)>,
    },
    Count {
        #[arg(long, value_delimiter = ',')]
        index: Vec<String>,
        #[arg(long = "type", value_delimiter = ',')]
        types: Vec<String>,
        #[arg(long)]
        query: Option<String>,
    },
    /// Send a JSON array of documents as one bulk request
    Bulk {
        index: String,
        file: String,
    },
    Stats {
        #[arg(value_delimiter = ',')]
        indices: Vec<String>,
    },
    Status {
        #[arg(value_delimiter = ',')]
        indices: Vec<String>,
    },
}

fn parse_arg(s: &str) -> std::result::Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected key=value, got '{}'", s))
}

fn query_args(args: Vec<(String, String)>) -> QueryArgs {
    args.into_iter().collect()
}

fn as_strs(list: &[String]) -> Vec<&str> {
    list.iter().map(String::as_str).collect()
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Defaults, then the config file, then flags and environment
fn load_config(cli: &Cli) -> Result<Config> {
    let config = match &cli.config {
        Some(path) => Config::load(path).with_context(|| format!("Failed to load config {}", path))?,
        None => Config::default(),
    };
    Ok(apply_overrides(config, cli.host.as_deref(), cli.port.as_deref()))
}

fn apply_overrides(mut config: Config, host: Option<&str>, port: Option<&str>) -> Config {
    if let Some(host) = host {
        config.host = host.to_string();
    }
    if let Some(port) = port {
        config.port = port.to_string();
    }
    config
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    telemetry::init_telemetry(&config.log_filter, cli.log_json)?;
    tracing::debug!(url = %config.base_url(), timeout_secs = ?config.timeout_secs, "connecting");

    let conn = Connection::from_config(&config)?;

    match cli.command {
        Command::CreateIndex { name, mapping } => {
            let mapping = mapping
                .map(|path| {
                    std::fs::read_to_string(&path)
                        .with_context(|| format!("Failed to read mapping file {}", path))
                })
                .transpose()?
                .map(Payload::Raw);
            print_json(&conn.create_index(&name, mapping).await?)
        }
        Command::DeleteIndex { name } => print_json(&conn.delete_index(&name).await?),
        Command::Refresh { name } => print_json(&conn.refresh_index(&name).await?),
        Command::Index {
            index,
            doc_type,
            fields,
            id,
            args,
        } => {
            let fields = serde_json::from_str(&fields).context("fields must be a JSON object")?;
            let mut doc = Document::new(index, doc_type).with_fields(fields);
            doc.id = id;
            print_json(&conn.index(&doc, query_args(args)).await?)
        }
        Command::Get {
            index,
            doc_type,
            id,
            args,
        } => print_json(&conn.get(&index, &doc_type, &id, query_args(args)).await?),
        Command::Delete {
            index,
            doc_type,
            id,
        } => {
            let doc = Document::new(index, doc_type).with_id(id);
            print_json(&conn.delete(&doc, QueryArgs::new()).await?)
        }
        Command::Search {
            index,
            types,
            query,
            args,
        } => {
            let query = query.unwrap_or_else(|| MATCH_ALL.to_string());
            let resp = conn
                .search_with_args(query, &as_strs(&index), &as_strs(&types), query_args(args))
                .await?;
            print_json(&resp)
        }
        Command::Count {
            index,
            types,
            query,
        } => {
            let query = query.unwrap_or_else(|| MATCH_ALL.to_string());
            print_json(&conn.count(query, &as_strs(&index), &as_strs(&types)).await?)
        }
        Command::Bulk { index, file } => {
            let contents = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read documents file {}", file))?;
            let documents: Vec<Document> =
                serde_json::from_str(&contents).context("documents must be a JSON array")?;

            let resp = conn.bulk_send(&index, &documents).await?;
            for (position, item) in resp.failures() {
                tracing::warn!(position, command = %item.command, id = %item.outcome.id, "bulk item failed");
            }
            print_json(&resp)
        }
        Command::Stats { indices } => {
            print_json(&conn.stats(&as_strs(&indices), QueryArgs::new()).await?)
        }
        Command::Status { indices } => print_json(&conn.index_status(&as_strs(&indices)).await?),
    }
}
