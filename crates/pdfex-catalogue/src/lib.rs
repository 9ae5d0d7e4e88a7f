//! Catalogue session: paged loading from a [`pdfex_store::ProductStore`],
//! client-side search, and the card view model rendered by the web server
//! and the CLI.

pub mod controller;
pub mod error;
pub mod filter;
pub mod render;
pub mod state;
pub mod view;

pub use controller::CatalogueController;
pub use error::CatalogueError;
pub use state::{CatalogueState, LoadOutcome, LoadTicket, PAGE_LIMIT};
pub use view::{CataloguePage, DimensionLine, ProductCardView};
