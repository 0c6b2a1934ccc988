use anyhow::Context;
use clap::Parser;
use seguridad_digital::{
    config::{Cli, Commands, ServeArgs},
    routes, state::AppState, store,
};
use std::sync::{Arc, Mutex};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let db = sled::open(&cli.data_dir)
        .with_context(|| format!("failed to open store at {}", cli.data_dir.display()))?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Export => export(&db),
        Commands::Reset => {
            store::clear(&db).context("failed to reset store")?;
            tracing::info!(dir = %cli.data_dir.display(), "store reset");
            Ok(())
        }
        Commands::Serve => serve(db, &cli.serve).await,
    }
}

fn export(db: &sled::Db) -> anyhow::Result<()> {
    let mut doc = serde_json::Map::new();
    for key in store::ALL_KEYS {
        let value = store::read_raw(db, key)
            .with_context(|| format!("failed to read `{key}`"))?
            .unwrap_or(serde_json::Value::Null);
        doc.insert(key.to_string(), value);
    }
    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}

async fn serve(db: sled::Db, args: &ServeArgs) -> anyhow::Result<()> {
    let state = AppState::new(db).context("invalid built-in quiz")?;
    let app = routes::router(Arc::new(Mutex::new(state)));

    let addr = args.addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!("Seguridad Digital running on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
