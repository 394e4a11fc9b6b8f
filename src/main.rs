// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging
// 3. Load the settings file and merge in the CLI overrides
// 4. Run the crawl and print the report
// 5. Exit with proper code (0 = success, 1 = some files failed, 2 = error)
//
// Rust concepts used:
// - async/await: Because we make many network requests concurrently
// - Result<T, E>: For error handling (T = success type, E = error type)
// - match: Pattern matching on how the crawl ended
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli;           // src/cli.rs - command-line parsing
mod config;        // src/config.rs - settings file + CLI overrides
mod crawl;         // src/crawl/ - the crawl itself
mod error;         // src/error.rs - error types for the core
mod extract;       // src/extract/ - link extraction from HTML
mod fetch;         // src/fetch/ - HTTP access to the site
mod logging;       // src/logging.rs - tracing setup
mod mirror;        // src/mirror/ - writing resources to disk

#[cfg(test)]
mod test_support;

use clap::Parser;  // Parser trait enables the parse() method
use cli::Cli;
use crawl::{CrawlOutcome, CrawlReport, Crawler, SiteBackend};
use fetch::HttpFetcher;
use std::path::Path;
use std::sync::Arc;

// anyhow::Result is like std::result::Result but simpler for applications
// It lets us return any error type with the ? operator
use anyhow::Result;

// The #[tokio::main] attribute transforms our async main into a real main function
// It creates a tokio runtime and runs our async code inside it
#[tokio::main]
async fn main() {
    // Run our application logic and capture the exit code
    // std::process::exit() terminates the program with the given code
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // If an unexpected error occurred, print it and exit with code 2
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// This is the main application logic
// Returns:
//   Ok(0) = everything mirrored
//   Ok(1) = run completed but some pages or files could not be fetched
//   Ok(2) = run could not start (missing base URL or destination)
//   Err = unexpected error (bad settings file, seed page unreachable, ...)
async fn run() -> Result<i32> {
    // Parse command-line arguments into our Cli struct
    // This will automatically handle --help, --version, etc.
    let cli = Cli::parse();

    logging::init_logging(cli.verbose);

    // An explicit --config must exist; the default file is optional
    let settings = match &cli.config {
        Some(path) => config::load_settings(path, true)?,
        None => config::load_settings(Path::new(config::DEFAULT_SETTINGS_FILE), false)?,
    };
    let settings = settings.merge(cli.base_url, cli.destination);

    // Nothing to parse a fetcher from; report it the same way the crawler would
    if let Some(missing) = crawl::missing_input(&settings.base_url, &settings.destination) {
        tracing::error!("Mirroring cannot be started: {}", missing);
        eprintln!("Mirroring cannot be started: {}", missing);
        return Ok(2);
    }

    let fetcher = HttpFetcher::new(&settings.base_url, settings.request_timeout)?;
    let crawler = Crawler::new(SiteBackend::new(Arc::new(fetcher)));
    let outcome = crawler
        .run(&settings.base_url, &settings.destination)
        .await?;

    match outcome {
        CrawlOutcome::MissingInput(missing) => {
            eprintln!("Mirroring cannot be started: {}", missing);
            Ok(2)
        }
        CrawlOutcome::Completed(report) => {
            print_report(&report, cli.json)?;
            if report.has_failures() {
                Ok(1)
            } else {
                Ok(0)
            }
        }
    }
}

// Prints the report either as a summary or JSON
fn print_report(report: &CrawlReport, json: bool) -> Result<()> {
    if json {
        // Serialize the report to JSON and print
        let json_output = serde_json::to_string_pretty(report)?;
        println!("{}", json_output);
    } else {
        print_summary(report);
    }
    Ok(())
}

// Prints the report as a human-readable table in the terminal
fn print_summary(report: &CrawlReport) {
    println!("🌐 Mirrored {} into {}", report.base_url, report.destination);
    println!();
    println!("{:<30} {:>10}", "ITEM", "COUNT");
    println!("{}", "=".repeat(41));
    println!("{:<30} {:>10}", "Page links found", report.pages_discovered);
    println!("{:<30} {:>10}", "Pages that failed to load", report.pages_failed);
    println!("{:<30} {:>10}", "Download batches", report.batches_dispatched);
    println!();

    println!("📊 Summary:");
    println!("   ✅ Downloaded: {} ({} bytes)", report.downloaded, report.bytes_downloaded);
    println!("   📁 Already on disk: {}", report.already_present);
    println!("   🔁 Duplicates skipped: {}", report.deduplicated);
    println!("   ❌ Failed: {}", report.failed);
}
