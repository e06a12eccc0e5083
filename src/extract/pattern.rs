// src/extract/pattern.rs
// =============================================================================
// This module finds https links in arbitrary text using the `regex` crate.
//
// A link is "https://" followed by one or more of:
//   letters, digits, . / ? = _ -
//
// Anything else ends the link. So in
//   "Visit https://x.io/path1 and https://x.io/path2!"
// we find "https://x.io/path1" and "https://x.io/path2" (the '!' is not
// part of the allowed set).
//
// The regex is compiled once for the whole process and then shared by every
// worker. A compiled Regex is immutable, so sharing needs no locking.
//
// Rust concepts:
// - OnceLock: Lazily initialised global that is set exactly once
// - Iterators: find_iter() walks the matches left to right
// =============================================================================

use regex::Regex;
use std::sync::OnceLock;

/// The link pattern, as a regex
pub const LINK_PATTERN: &str = r"https://[a-zA-Z0-9./?=_-]+";

static GLOBAL_EXTRACTOR: OnceLock<LinkExtractor> = OnceLock::new();

/// Wraps the compiled link regex
#[derive(Debug, Clone)]
pub struct LinkExtractor {
    link_regex: Regex,
}

impl LinkExtractor {
    pub fn new() -> Self {
        LinkExtractor {
            // LINK_PATTERN is a constant we know is valid, so a failure here
            // is a programmer error, not a runtime condition
            link_regex: Regex::new(LINK_PATTERN).expect("link pattern is a valid regex"),
        }
    }

    /// The process-wide extractor, compiled on first use
    pub fn global() -> &'static LinkExtractor {
        GLOBAL_EXTRACTOR.get_or_init(LinkExtractor::new)
    }

    /// Returns every link in `body`, in the order they appear
    ///
    /// Matches never overlap and each one is as long as possible.
    /// Returns an empty Vec when there's nothing to find.
    pub fn extract(&self, body: &str) -> Vec<String> {
        self.link_regex
            .find_iter(body)
            .map(|m| m.as_str().to_string())
            .collect()
    }
}

impl Default for LinkExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Extracts links with the shared, process-wide extractor
pub fn extract_links(body: &str) -> Vec<String> {
    LinkExtractor::global().extract(body)
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why OnceLock instead of compiling the regex in every worker?
//    - Compiling a regex is much slower than running it
//    - get_or_init() compiles it the first time and hands back a &'static
//      reference afterwards, from any thread
//
// 2. What does "greedy" mean here?
//    - The `+` keeps consuming allowed characters as long as it can
//    - "https://a.io/x?y=1" is one match, not "https://a" + more pieces
//
// 3. Why does "http://" never match?
//    - The pattern starts with the literal text "https://"
//    - Plain http links are deliberately not harvested
// -----------------------------------------------------------------------------
