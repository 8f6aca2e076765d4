//! Client for the hookpoint registration endpoint
//!
//! Speaks the same wire protocol an embedded agent would: POST a
//! registration document, remember the `Location` the server hands back,
//! and fetch or remove the stored hook by that location's identifier.

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use reqwest::StatusCode;
use reqwest::header::{CONTENT_TYPE, LOCATION};
use tracing::debug;

#[derive(Parser)]
#[command(name = "hookpoint-cli")]
#[command(about = "Client for the hookpoint registration endpoint", long_about = None)]
#[command(version = hookpoint::VERSION)]
struct Cli {
    /// Base URL of the hookpoint server
    #[arg(long, short, default_value = "http://localhost:9292", global = true)]
    server: String,

    /// Verbose output (debug level logging)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a callback hook, replacing any prior registration
    Register {
        /// Callback URI to register
        uri: String,

        /// Protocol version to announce
        #[arg(long, default_value_t = hookpoint::PROTOCOL_VERSION)]
        version: i64,
    },

    /// Show the stored hook, or the whole collection when no id is given
    Show {
        /// Hook identifier
        id: Option<String>,
    },

    /// Remove the stored hook
    Unregister {
        /// Hook identifier
        id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(level))
        .init();

    let client = reqwest::Client::new();
    let server = cli.server.trim_end_matches('/').to_string();

    match cli.command {
        Commands::Register { uri, version } => register(&client, &server, &uri, version).await,
        Commands::Show { id } => show(&client, &server, id.as_deref()).await,
        Commands::Unregister { id } => unregister(&client, &server, &id).await,
    }
}

/// The document an agent sends to announce itself.
fn registration_document(uri: &str, version: i64) -> String {
    format!("<hook>\n  <uri>{uri}</uri>\n  <version>{version}</version>\n</hook>\n")
}

async fn register(client: &reqwest::Client, server: &str, uri: &str, version: i64) -> Result<()> {
    let endpoint = format!("{server}/api/hooks");
    debug!(%endpoint, %uri, version, "posting registration");

    let response = client
        .post(&endpoint)
        .header(CONTENT_TYPE, "application/xml")
        .body(registration_document(uri, version))
        .send()
        .await
        .with_context(|| format!("failed to reach {endpoint}"))?;

    let status = response.status();
    let location = response
        .headers()
        .get(LOCATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let body = response.text().await?;

    if status != StatusCode::CREATED {
        bail!("registration rejected ({status}): {body}");
    }

    match location {
        Some(location) => println!("registered at {location}"),
        None => println!("registered (no Location header returned)"),
    }
    print!("{body}");
    Ok(())
}

async fn show(client: &reqwest::Client, server: &str, id: Option<&str>) -> Result<()> {
    let endpoint = match id {
        Some(id) => format!("{server}/api/hooks/{id}"),
        None => format!("{server}/api/hooks"),
    };
    debug!(%endpoint, "fetching");

    let response = client
        .get(&endpoint)
        .send()
        .await
        .with_context(|| format!("failed to reach {endpoint}"))?;

    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        bail!("fetch failed ({status}): {body}");
    }

    print!("{body}");
    Ok(())
}

async fn unregister(client: &reqwest::Client, server: &str, id: &str) -> Result<()> {
    let endpoint = format!("{server}/api/hooks/{id}");
    debug!(%endpoint, "deleting");

    let response = client
        .delete(&endpoint)
        .send()
        .await
        .with_context(|| format!("failed to reach {endpoint}"))?;

    let status = response.status();
    if status != StatusCode::NO_CONTENT {
        let body = response.text().await?;
        bail!("unregister failed ({status}): {body}");
    }

    println!("unregistered hook {id}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration_document_matches_the_wire_shape() {
        assert_eq!(
            registration_document("http://agent.example:8888/api", 1),
            "<hook>\n  <uri>http://agent.example:8888/api</uri>\n  <version>1</version>\n</hook>\n"
        );
    }
}
