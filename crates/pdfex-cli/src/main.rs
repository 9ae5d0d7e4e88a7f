mod browse;
mod session;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use pdfex_store::{MemoryStore, ProductStore, SupabaseStore};

use crate::session::CatalogueArgs;

#[derive(Debug, Parser)]
#[command(name = "pdfex-cli")]
#[command(about = "Browse and export the PDFEX product catalogue")]
struct Cli {
    /// Read products from a JSON export instead of the Supabase table
    #[arg(long, global = true)]
    fixture: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print product cards to the terminal
    Browse {
        #[command(flatten)]
        catalogue: CatalogueArgs,
    },
    /// Write the catalogue as a self-contained HTML page
    Export {
        /// Destination file
        #[arg(long)]
        out: PathBuf,

        #[command(flatten)]
        catalogue: CatalogueArgs,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Some(path) = &cli.fixture {
        let json = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.display()))?;
        let store = MemoryStore::from_json_str(&json)?;
        tracing::info!(rows = store.len(), path = %path.display(), "using fixture store");
        return run(store, "products", cli.command).await;
    }

    let config = pdfex_core::load_app_config()?;
    let store = SupabaseStore::from_config(&config)?;
    run(store, &config.products_table, cli.command).await
}

async fn run<S: ProductStore>(store: S, table: &str, command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Browse { catalogue } => {
            let controller = session::open(store, table, &catalogue).await?;
            print!("{}", browse::render_text(&controller.page()));
        }
        Commands::Export { out, catalogue } => {
            let controller = session::open(store, table, &catalogue).await?;
            let page = controller.page();
            let html = pdfex_catalogue::render::render_static_page(&page)?;
            std::fs::write(&out, html)
                .map_err(|e| anyhow::anyhow!("failed to write {}: {e}", out.display()))?;
            println!("wrote {} products to {}", page.cards.len(), out.display());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests;
