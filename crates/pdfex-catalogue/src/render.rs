//! HTML rendering of a [`CataloguePage`] via askama templates.

use askama::Template;

use crate::view::CataloguePage;

#[derive(Template)]
#[template(path = "catalogue.html")]
struct CatalogueTemplate<'a> {
    page: &'a CataloguePage,
    /// Search box and "Load more" form; off for static exports.
    interactive: bool,
}

/// Renders the full catalogue document served by the web server.
///
/// # Errors
///
/// Returns [`askama::Error`] if template rendering fails.
pub fn render_page(page: &CataloguePage) -> Result<String, askama::Error> {
    CatalogueTemplate {
        page,
        interactive: true,
    }
    .render()
}

/// Renders a self-contained snapshot with no forms, for writing to disk.
///
/// # Errors
///
/// Returns [`askama::Error`] if template rendering fails.
pub fn render_static_page(page: &CataloguePage) -> Result<String, askama::Error> {
    CatalogueTemplate {
        page,
        interactive: false,
    }
    .render()
}

#[cfg(test)]
mod tests {
    use pdfex_core::{ListField, RawProductRecord};

    use super::*;
    use crate::state::CatalogueState;

    const GALLERY_MARKUP: &str = "<div class=\"thumbnail-strip\">";

    fn page_with(rows: Vec<RawProductRecord>, search: &str) -> CataloguePage {
        let mut state = CatalogueState::new();
        let ticket = state.begin_load(0, true).unwrap();
        state.finish_load(ticket, Ok(rows));
        state.set_search_term(search);
        CataloguePage::from(&state)
    }

    fn record(code: &str, name: &str) -> RawProductRecord {
        RawProductRecord {
            product_code: code.to_owned(),
            name: Some(name.to_owned()),
            ..RawProductRecord::default()
        }
    }

    #[test]
    fn renders_cards_and_escapes_text() {
        let page = page_with(vec![record("AB-1", "Cups & <Saucers>")], "");
        let html = render_page(&page).unwrap();
        assert!(html.contains("Cups &amp; &lt;Saucers&gt;"));
        assert!(html.contains("AB-1"));
        assert!(html.contains("No image"));
        assert!(!html.contains("No products matched your search."));
    }

    #[test]
    fn renders_gallery_only_for_multiple_images() {
        let mut multi = record("AB-1", "Vase");
        multi.primary_image_url = Some("https://cdn.example.com/hero.jpg".to_owned());
        multi.image_urls = ListField::Multiple(vec![
            "https://cdn.example.com/a.jpg".to_owned(),
            "https://cdn.example.com/b.jpg".to_owned(),
        ]);
        let html = render_page(&page_with(vec![multi], "")).unwrap();
        assert!(html.contains(GALLERY_MARKUP));
        assert!(html.contains("b.jpg"));

        let mut single = record("AB-2", "Bowl");
        single.image_urls = ListField::Single("https://cdn.example.com/c.jpg".to_owned());
        let html = render_page(&page_with(vec![single], "")).unwrap();
        assert!(!html.contains(GALLERY_MARKUP));
        assert!(html.contains("c.jpg"));
    }

    #[test]
    fn renders_empty_state_when_nothing_matches() {
        let page = page_with(vec![record("AB-1", "Vase")], "teapot");
        let html = render_page(&page).unwrap();
        assert!(html.contains("No products matched your search."));
        assert!(!html.contains("Load more"));
    }

    #[test]
    fn static_page_has_no_forms() {
        let rows = (0..48)
            .map(|i| record(&format!("P-{i:02}"), "Item"))
            .collect();
        let page = page_with(rows, "");
        assert!(page.show_load_more);

        assert!(render_page(&page).unwrap().contains("Load more"));
        let html = render_static_page(&page).unwrap();
        assert!(!html.contains("<form"));
        assert!(!html.contains("Load more"));
    }
}
