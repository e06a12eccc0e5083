// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Set up logging
// 2. Parse command-line arguments using clap
// 3. Load the URL list
// 4. Run the harvest (worker pool + collector)
// 5. Print a summary and exit with the right code
//
// Exit codes:
//   0 = success (also when -l or -o is missing: we just print usage)
//   1 = unexpected error
//   2 = couldn't read the URL list
//   3 = couldn't create the output file
//   4 = couldn't write to the output file
//
// URLs that fail to fetch do NOT change the exit code. They're logged as
// warnings and counted in the summary.
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli;           // src/cli.rs - command-line parsing
mod error;         // src/error.rs - fatal error kinds
mod extract;       // src/extract/ - link pattern
mod harvest;       // src/harvest/ - loader, workers, collector
mod logging;       // src/logging.rs - tracing setup

use anyhow::Result;
use clap::Parser;
use cli::{Cli, USAGE};
use error::HarvestError;
use std::path::Path;

#[tokio::main]
async fn main() {
    logging::init();

    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{:#}", e);
            // Known failure kinds carry their own exit code
            e.downcast_ref::<HarvestError>()
                .map(HarvestError::exit_code)
                .unwrap_or(1)
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();

    let Some((url_list, output)) = cli.paths() else {
        println!("{}", USAGE);
        return Ok(0);
    };

    handle_harvest(url_list, output, cli.threads as usize).await
}

async fn handle_harvest(url_list: &Path, output: &Path, threads: usize) -> Result<i32> {
    println!("🔍 Reading URL list: {}", url_list.display());

    let urls = harvest::load_urls(url_list)?;

    println!("📄 Loaded {} URL(s)", urls.len());
    println!("🌐 Fetching with {} worker(s)...\n", threads);

    let summary = harvest::harvest(urls, output, threads).await?;

    print_summary(&summary);
    println!("✅ Links successfully written to {}", summary.output.display());

    Ok(0)
}

fn print_summary(summary: &harvest::HarvestSummary) {
    println!("📊 Summary:");
    println!("   📋 URLs: {}", summary.urls);
    println!("   ✅ Fetched: {}", summary.fetched);
    println!("   ❌ Failed: {}", summary.failed);
    println!("   🔗 Links written: {}", summary.links_written);
    println!();
}
