use crate::app::AppState;
use crate::enrich::{self, Mode};
use crate::error::{ErrorKind, Result};
use crate::server;
use clap::{ArgAction, Parser, Subcommand};
use exn::ResultExt;
use partscout_config::Config;
use partscout_inventory::models::NewComponent;
use serde::Serialize;
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "partscout", version, about)]
pub struct Cli {
    /// Config file (.toml, .yaml or .json). Defaults to partscout.toml in
    /// the platform config directory, if present.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// More logging; repeat for more. Ignored if RUST_LOG is set.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP API.
    Serve {
        /// Overrides `server.bind`.
        #[arg(long)]
        bind: Option<SocketAddr>,
    },
    /// Find the description and datasheet of a part.
    Datasheet { query: String },
    /// List substitutes for an exact part designator.
    Substitutes { designator: String },
    /// Add one unit of a part to the stock.
    Add {
        mpn: String,
        #[arg(long, default_value = "")]
        place: String,
        #[arg(long)]
        packaging: Option<String>,
        /// Skip the datasheet lookup.
        #[arg(long)]
        no_lookup: bool,
    },
    /// Search the stock. No terms lists everything.
    Search { terms: Vec<String> },
    /// Look a stocked part up again, replacing its description and datasheet.
    Refresh { mpn: String },
}

fn print_json(value: &impl Serialize) -> Result<()> {
    let json = serde_json::to_string_pretty(value).or_raise(|| ErrorKind::Io)?;
    println!("{json}");
    Ok(())
}

pub async fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref()).or_raise(|| ErrorKind::Config)?;
    let state = AppState::from_config(&config).await?;
    match cli.command {
        Command::Serve { bind } => server::serve(state, bind.unwrap_or(config.server.bind)).await,
        Command::Datasheet { query } => {
            let result = state.datasheets.resolve(&query).await.or_raise(|| ErrorKind::Resolve)?;
            print_json(&result)
        },
        Command::Substitutes { designator } => {
            let result = state.substitutes.resolve(&designator).await.or_raise(|| ErrorKind::Resolve)?;
            print_json(&result)
        },
        Command::Add {
            mpn,
            place,
            packaging,
            no_lookup,
        } => {
            let new = NewComponent {
                place,
                packaging,
                ..NewComponent::new(mpn)
            };
            let mut component = state.inventory.add(new).await.or_raise(|| ErrorKind::Inventory)?;
            if !no_lookup {
                // A failed lookup still leaves the part stocked.
                match enrich::enrich(&state.inventory, &state.datasheets, &component.mpn, Mode::FillMissing).await {
                    Ok(enriched) => component = enriched,
                    Err(err) => tracing::warn!(mpn = component.mpn.as_str(), "datasheet lookup failed: {err:?}"),
                }
            }
            print_json(&component)
        },
        Command::Search { terms } => {
            let parts = state.inventory.search(terms.as_slice()).await.or_raise(|| ErrorKind::Inventory)?;
            print_json(&parts)
        },
        Command::Refresh { mpn } => {
            let component = enrich::enrich(&state.inventory, &state.datasheets, &mpn, Mode::Overwrite).await?;
            print_json(&component)
        },
    }
}
