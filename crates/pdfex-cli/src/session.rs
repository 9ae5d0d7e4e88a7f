//! Drives a catalogue session to completion for one-shot commands.

use clap::Args;
use pdfex_catalogue::{CatalogueController, CatalogueState, LoadOutcome};
use pdfex_store::ProductStore;

/// Options shared by every command that reads the catalogue.
#[derive(Debug, Args)]
pub struct CatalogueArgs {
    /// Only show products whose name, code, or category contains this text
    #[arg(long)]
    pub search: Option<String>,

    /// Number of pages to load before filtering
    #[arg(long, default_value = "1", value_parser = clap::value_parser!(u64).range(1..))]
    pub pages: u64,
}

/// Loads up to `args.pages` pages, then applies the search term.
///
/// Pages are fetched first because "load more" is only offered while no
/// search is active.
///
/// # Errors
///
/// Returns an error if any page fails to load.
pub(crate) async fn open<S: ProductStore>(
    store: S,
    table: &str,
    args: &CatalogueArgs,
) -> anyhow::Result<CatalogueController<S>> {
    let controller = CatalogueController::new(store, table);

    ensure_loaded(controller.reload().await?)?;
    let mut loaded_pages = 1;
    while loaded_pages < args.pages && controller.with_state(CatalogueState::can_load_more) {
        ensure_loaded(controller.load_next_page().await?)?;
        loaded_pages += 1;
    }

    if let Some(term) = &args.search {
        controller.set_search_term(term.as_str());
    }
    Ok(controller)
}

// A failed page must stop the run; the next load would skip past it.
fn ensure_loaded(outcome: LoadOutcome) -> anyhow::Result<()> {
    match outcome {
        LoadOutcome::Failed { message } => anyhow::bail!("failed to load products: {message}"),
        LoadOutcome::Loaded { .. } | LoadOutcome::Exhausted => Ok(()),
    }
}
