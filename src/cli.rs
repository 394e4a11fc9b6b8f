// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// clap is a popular Rust library for parsing command-line arguments.
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// Every argument is optional on purpose: values can also come from the
// settings file (see config.rs), and the CLI only overrides what it is given.
// =============================================================================

use clap::Parser;
use std::path::PathBuf;

// This struct represents our entire CLI application
//
// #[derive(Parser)] tells clap to automatically generate parsing code
// The #[command(...)] attributes configure how the CLI behaves
#[derive(Parser, Debug)]
#[command(
    name = "site-mirror",
    version = "0.1.0",
    about = "A CLI tool to mirror a website's pages, images, scripts and stylesheets",
    long_about = "site-mirror fetches a seed page, follows every page it links to, and copies \
                  those pages plus their stylesheets, images and local scripts into a folder, \
                  keeping the site's directory layout. Files already on disk are left alone."
)]
pub struct Cli {
    /// Base URL of the site to mirror (e.g., https://books.toscrape.com/)
    ///
    /// This is a positional argument; it overrides "BaseUrl" from the settings file
    pub base_url: Option<String>,

    /// Folder the site is mirrored into
    ///
    /// Relative paths are resolved against the current directory.
    /// Overrides "DestinationFolderName" from the settings file
    #[arg(short, long)]
    pub destination: Option<String>,

    /// JSON settings file (default: appsettings.json, if present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print the crawl report as JSON instead of a table
    #[arg(long)]
    pub json: bool,

    /// Log debug details (RUST_LOG still takes precedence)
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_arguments() {
        let cli = Cli::parse_from([
            "site-mirror",
            "https://books.toscrape.com/",
            "--destination",
            "mirror",
            "--config",
            "custom.json",
            "--json",
        ]);
        assert_eq!(cli.base_url.as_deref(), Some("https://books.toscrape.com/"));
        assert_eq!(cli.destination.as_deref(), Some("mirror"));
        assert_eq!(cli.config, Some(PathBuf::from("custom.json")));
        assert!(cli.json);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_everything_is_optional() {
        let cli = Cli::parse_from(["site-mirror"]);
        assert!(cli.base_url.is_none());
        assert!(cli.destination.is_none());
        assert!(cli.config.is_none());
    }
}
