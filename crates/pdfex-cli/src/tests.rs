use clap::Parser;

use super::*;

#[test]
fn parses_browse_with_defaults() {
    let cli = Cli::try_parse_from(["pdfex-cli", "browse"]).expect("expected valid cli args");
    assert!(cli.fixture.is_none());
    match cli.command {
        Commands::Browse { catalogue } => {
            assert!(catalogue.search.is_none());
            assert_eq!(catalogue.pages, 1);
        }
        Commands::Export { .. } => panic!("expected browse"),
    }
}

#[test]
fn parses_browse_with_search_and_pages() {
    let cli = Cli::try_parse_from(["pdfex-cli", "browse", "--search", "mug", "--pages", "3"])
        .expect("expected valid cli args");
    match cli.command {
        Commands::Browse { catalogue } => {
            assert_eq!(catalogue.search.as_deref(), Some("mug"));
            assert_eq!(catalogue.pages, 3);
        }
        Commands::Export { .. } => panic!("expected browse"),
    }
}

#[test]
fn parses_export_with_global_fixture() {
    let cli = Cli::try_parse_from([
        "pdfex-cli",
        "export",
        "--out",
        "catalogue.html",
        "--fixture",
        "products.json",
    ])
    .expect("expected valid cli args");
    assert_eq!(cli.fixture, Some(PathBuf::from("products.json")));
    assert!(matches!(
        cli.command,
        Commands::Export { ref out, .. } if out == &PathBuf::from("catalogue.html")
    ));
}

#[test]
fn export_requires_out() {
    assert!(Cli::try_parse_from(["pdfex-cli", "export"]).is_err());
}

#[test]
fn zero_pages_is_rejected() {
    assert!(Cli::try_parse_from(["pdfex-cli", "browse", "--pages", "0"]).is_err());
}

#[test]
fn subcommand_is_required() {
    assert!(Cli::try_parse_from(["pdfex-cli"]).is_err());
}
