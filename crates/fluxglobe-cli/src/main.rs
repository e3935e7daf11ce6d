//! Headless front end for flux globes.
//!
//! `fluxglobe bake` loads the capitals and borders, builds the flux and
//! border layers and writes them as renderer-ready JSON buffers.
//! `fluxglobe pick` resolves the country under a coordinate or a point on
//! the globe.

mod commands;
mod launch_params;
mod loader;

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;

use fluxglobe::{AssetBase, Client, MemoryCache, Sphere};
use launch_params::{Command, LaunchParams};

async fn run(params: LaunchParams) -> commands::CommandResult<()> {
    let sphere = Sphere::new(params.center, params.radius)?;
    let cache = params
        .cache_bytes
        .map_or_else(MemoryCache::new, MemoryCache::with_max_bytes);
    let client = Arc::new(Client::with_cache(
        AssetBase::from(params.assets.as_str()),
        cache,
    ));
    tracing::info!("Loading assets from {:?}", client.base());

    match params.command {
        Command::Bake(args) => {
            let scene = commands::bake(&client, sphere, &args).await?;
            let json = serde_json::to_vec_pretty(&scene)?;
            match &args.output {
                Some(path) => {
                    tokio::fs::write(path, json).await?;
                    tracing::info!("Wrote scene to {}", path.display());
                }
                None => println!("{}", String::from_utf8_lossy(&json)),
            }
        }
        Command::Pick(args) => {
            let report = commands::pick(&client, sphere, &args).await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
        tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .init();
    }

    match run(LaunchParams::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
