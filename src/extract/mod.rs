// src/extract/mod.rs
// =============================================================================
// This module pulls links out of response bodies.
//
// Submodules:
// - pattern: the https link regex and the function that applies it
//
// The pattern is plain text matching, not HTML parsing: a link inside a
// <script> block or a JSON blob is found just like one in an <a href>.
// =============================================================================

mod pattern;

// Re-export so callers can write `extract::extract_links()`
pub use pattern::extract_links;
