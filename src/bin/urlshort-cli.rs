use std::path::PathBuf;

use clap::{Parser, Subcommand};
use reqwest::header::LOCATION;
use reqwest::redirect::Policy;
use serde_json::{json, Value};
use urlshort::config::loader::load_or_default;
use urlshort::lifecycle::startup;
use urlshort::store::Store;

#[derive(Parser)]
#[command(name = "urlshort-cli")]
#[command(about = "Management CLI for the urlshort redirect service", long_about = None)]
struct Cli {
    /// Configuration file shared with the server.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask a running server where a path redirects to
    Resolve {
        path: String,
        #[arg(short, long, default_value = "http://localhost:8080")]
        url: String,
    },
    /// Validate the configuration and build the handler chain offline
    Validate,
    /// Write one entry into the durable store
    Seed {
        namespace: String,
        path: String,
        url: String,
    },
    /// Dump one partition of the durable store
    List { namespace: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Resolve { path, url } => {
            let client = reqwest::Client::builder().redirect(Policy::none()).build()?;
            let res = client.get(format!("{}{}", url.trim_end_matches('/'), path)).send().await?;
            let location = res.headers().get(LOCATION).and_then(|v| v.to_str().ok()).map(str::to_owned);
            print_json(&json!({
                "path": path,
                "status": res.status().as_u16(),
                "location": location,
            }))?;
        }
        Commands::Validate => {
            let config = load_or_default(cli.config.as_deref())?;
            startup::build_chain(&config)?;
            print_json(&json!({
                "valid": true,
                "sources": config.sources.iter().map(|s| s.label()).collect::<Vec<_>>(),
            }))?;
        }
        Commands::Seed { namespace, path, url } => {
            let config = load_or_default(cli.config.as_deref())?;
            let store = Store::open(&config.store.path)?;
            store.put(&namespace, &path, &url)?;
            print_json(&json!({ "namespace": namespace, "path": path, "url": url }))?;
        }
        Commands::List { namespace } => {
            let config = load_or_default(cli.config.as_deref())?;
            let store = Store::open(&config.store.path)?;
            let entries: serde_json::Map<String, Value> = store
                .entries(&namespace)?
                .into_iter()
                .map(|(path, url)| (path, Value::String(url)))
                .collect();
            print_json(&Value::Object(entries))?;
        }
    }

    Ok(())
}

fn print_json(value: &Value) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
