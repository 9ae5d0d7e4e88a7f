//! Plain-text rendering of the catalogue for the terminal.

use std::fmt::Write as _;

use pdfex_catalogue::{CataloguePage, ProductCardView};

pub(crate) fn render_text(page: &CataloguePage) -> String {
    let mut out = String::new();

    if let Some(message) = &page.error_message {
        let _ = writeln!(out, "error: {message}");
    }
    if page.show_empty_state {
        out.push_str("No products matched your search.\n");
        return out;
    }

    for card in &page.cards {
        out.push_str(&render_card(card));
        out.push('\n');
    }

    let _ = write!(
        out,
        "showing {} of {} loaded products",
        page.cards.len(),
        page.loaded_count
    );
    if page.show_load_more {
        out.push_str(" (more available, use --pages)");
    }
    out.push('\n');
    out
}

fn render_card(card: &ProductCardView) -> String {
    let mut out = format!("{}  {}\n", card.product_code, card.display_name);
    if let Some(category) = &card.category {
        let _ = writeln!(out, "  category: {category}");
    }
    if let Some(price) = &card.price {
        let _ = writeln!(out, "  price: {price}");
    }
    if let Some(pack) = &card.pack_quantity {
        let _ = writeln!(out, "  {pack}");
    }
    for feature in &card.spec_features {
        let _ = writeln!(out, "  - {feature}");
    }
    for line in &card.dimensions {
        let _ = writeln!(out, "  {line}");
    }
    match (&card.primary_image, &card.gallery) {
        (Some(url), Some(gallery)) => {
            let _ = writeln!(out, "  image: {url} (+{} more)", gallery.len());
        }
        (Some(url), None) => {
            let _ = writeln!(out, "  image: {url}");
        }
        (None, _) => out.push_str("  image: none\n"),
    }
    out
}
