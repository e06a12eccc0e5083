// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// The tool takes three flags:
//   -l <path>   file with one URL per line
//   -o <path>   file we write the harvested links to
//   -t <int>    how many workers fetch at the same time (default: 50)
//
// -l and -o are "required", but we don't let clap enforce that: when either
// is missing we print a short usage line and exit with code 0.
//
// Rust concepts:
// - Derive macros: clap generates the parser from the struct definition
// - Option<T>: A flag that may or may not have been given
// =============================================================================

use clap::Parser;
use std::path::PathBuf;

/// Default number of concurrent workers
pub const DEFAULT_THREADS: u32 = 50;

/// Printed when -l or -o is missing
pub const USAGE: &str = "Usage: link-harvest -l urllist.txt -o outputfile.txt -t threadCount";

#[derive(Parser, Debug)]
#[command(
    name = "link-harvest",
    version = "0.1.0",
    about = "Fetch a list of URLs concurrently and harvest the https links in their bodies",
    long_about = "link-harvest reads a newline-delimited list of URLs, fetches them with a fixed \
                  pool of workers and writes every https link found in the response bodies to \
                  an output file, one link per line."
)]
pub struct Cli {
    /// File containing the list of URLs (one per line)
    #[arg(short = 'l', long = "list", value_name = "PATH")]
    pub url_list: Option<PathBuf>,

    /// Output file to write links to (created or truncated)
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Number of concurrent workers
    ///
    /// value_parser with .range(1..) makes clap reject 0 for us
    #[arg(
        short = 't',
        long = "threads",
        default_value_t = DEFAULT_THREADS,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub threads: u32,
}

impl Cli {
    /// Returns (url_list, output) when both paths were given
    pub fn paths(&self) -> Option<(&PathBuf, &PathBuf)> {
        match (&self.url_list, &self.output) {
            (Some(list), Some(output)) => Some((list, output)),
            _ => None,
        }
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why Option<PathBuf> instead of PathBuf?
//    - A plain PathBuf field would make clap fail with its own error
//    - We want to print our own usage line and exit cleanly instead
//
// 2. What is PathBuf?
//    - An owned filesystem path (like String is an owned str)
//    - Works with non-UTF-8 paths, which String can't hold
//
// 3. What does value_parser!(u32).range(1..) do?
//    - Parses the flag as a u32 and checks it's at least 1
//    - A pool of zero workers would never finish, so we refuse it up front
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_flags() {
        let cli = Cli::try_parse_from(["link-harvest", "-l", "urls.txt", "-o", "out.txt", "-t", "8"])
            .unwrap();
        assert_eq!(cli.url_list, Some(PathBuf::from("urls.txt")));
        assert_eq!(cli.output, Some(PathBuf::from("out.txt")));
        assert_eq!(cli.threads, 8);
    }

    #[test]
    fn test_default_thread_count() {
        let cli = Cli::try_parse_from(["link-harvest", "-l", "urls.txt", "-o", "out.txt"]).unwrap();
        assert_eq!(cli.threads, DEFAULT_THREADS);
    }

    #[test]
    fn test_missing_output_has_no_paths() {
        let cli = Cli::try_parse_from(["link-harvest", "-l", "urls.txt"]).unwrap();
        assert!(cli.paths().is_none());
    }

    #[test]
    fn test_zero_threads_rejected() {
        let result = Cli::try_parse_from(["link-harvest", "-l", "a", "-o", "b", "-t", "0"]);
        assert!(result.is_err());
    }
}
