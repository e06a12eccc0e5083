// src/harvest/worker.rs
// =============================================================================
// One worker of the pool.
//
// Each worker loops:
// 1. Pull a URL from the shared queue (stop when it's closed and empty)
// 2. GET it
// 3. Read the whole body
// 4. Extract links from the body
// 5. Push the links onto the results queue (waits if the collector is behind)
//
// A failed GET or body read is logged and counted, then the worker moves on
// to the next URL. One bad URL never affects the others, and nothing is
// retried.
//
// REQUEST_TIMEOUT covers the whole request, body download included. A large
// or slow download that takes longer is cut off and counted as failed.
//
// Rust concepts:
// - async/await: Workers spend almost all their time waiting on the network
// - Channels: The URL queue is shared by all workers (multi-consumer)
// - Enums: To categorise why a fetch failed
// =============================================================================

use crate::extract::extract_links;
use reqwest::Client;
use std::fmt;
use std::time::Duration;
use tokio::sync::mpsc;

/// Timeout for the whole request (connect, headers and body)
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Links found in one URL's body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLinks {
    /// The URL the body came from
    pub url: String,
    /// Every match, in the order it appears in the body (may be empty)
    pub links: Vec<String>,
}

/// What a worker did before its queue ran dry
///
/// Returned from the worker's task instead of bumping shared counters
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WorkerStats {
    /// URLs whose body was read and scanned
    pub fetched: usize,
    /// URLs that failed to fetch or whose body couldn't be read
    pub failed: usize,
}

impl WorkerStats {
    pub fn merge(self, other: WorkerStats) -> WorkerStats {
        WorkerStats {
            fetched: self.fetched + other.fetched,
            failed: self.failed + other.failed,
        }
    }
}

/// Rough reason a fetch failed, for log messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchFailure {
    /// Request timed out
    Timeout,
    /// Redirect loop or too many redirects
    TooManyRedirects,
    /// Connection refused, DNS failure, TLS handshake, etc.
    Connect,
    /// The URL couldn't even be turned into a request (empty, bad scheme)
    InvalidRequest,
    /// The response started but the body couldn't be read or decoded
    Body,
    /// Anything else
    Other,
}

impl FetchFailure {
    /// Categorises a reqwest error
    pub fn from_error(error: &reqwest::Error) -> FetchFailure {
        if error.is_timeout() {
            FetchFailure::Timeout
        } else if error.is_redirect() {
            FetchFailure::TooManyRedirects
        } else if error.is_connect() {
            FetchFailure::Connect
        } else if error.is_builder() {
            FetchFailure::InvalidRequest
        } else if error.is_body() || error.is_decode() {
            FetchFailure::Body
        } else {
            FetchFailure::Other
        }
    }
}

impl fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FetchFailure::Timeout => "timeout",
            FetchFailure::TooManyRedirects => "too many redirects",
            FetchFailure::Connect => "connection failed",
            FetchFailure::InvalidRequest => "invalid request",
            FetchFailure::Body => "body error",
            FetchFailure::Other => "error",
        };
        f.write_str(label)
    }
}

/// Builds the HTTP client every worker shares
///
/// Redirects use reqwest's default policy (follow up to 10).
pub fn build_client() -> reqwest::Result<Client> {
    Client::builder().timeout(REQUEST_TIMEOUT).build()
}

/// Runs one worker until the URL queue is closed and drained
///
/// Parameters:
///   id: worker number, only used in log messages
///   client: shared HTTP client (cheap to clone, pooled connections)
///   urls: receiving end of the shared URL queue
///   results: sending end of the results queue
pub async fn run_worker(
    id: usize,
    client: Client,
    urls: async_channel::Receiver<String>,
    results: mpsc::Sender<PageLinks>,
) -> WorkerStats {
    let mut stats = WorkerStats::default();

    // recv() returns Err once the queue is closed AND empty
    while let Ok(url) = urls.recv().await {
        let response = match client.get(&url).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(
                    worker = id,
                    "Error fetching URL {} ({}): {}",
                    url,
                    FetchFailure::from_error(&e),
                    e
                );
                stats.failed += 1;
                continue;
            }
        };

        // A 404 page still has a body worth scanning
        let status = response.status();
        if !status.is_success() {
            tracing::debug!(worker = id, "{} answered HTTP {}", url, status.as_u16());
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(
                    worker = id,
                    "Error reading response body for URL {} ({}): {}",
                    url,
                    FetchFailure::from_error(&e),
                    e
                );
                stats.failed += 1;
                continue;
            }
        };

        stats.fetched += 1;
        let links = extract_links(&body);
        tracing::debug!(worker = id, "{} link(s) found on {}", links.len(), url);

        // send() waits while the results queue is full: that's our backpressure.
        // It only fails if the collector is gone, and then there's no point
        // fetching anything else.
        if results.send(PageLinks { url, links }).await.is_err() {
            tracing::debug!(worker = id, "Results queue closed, stopping");
            break;
        }
    }

    stats
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why async_channel for URLs but tokio::sync::mpsc for results?
//    - URLs: many workers RECEIVE from one queue, so we need a
//      multi-consumer channel. tokio's mpsc only allows one receiver.
//    - Results: many workers SEND to one collector, which is exactly
//      what mpsc (multi-producer, single-consumer) is for.
//
// 2. Why does the worker return WorkerStats instead of updating a counter?
//    - No shared mutable state means no Mutex or atomics
//    - The coordinator adds the stats up after joining every worker
//
// 3. What is `continue` doing in the match arms?
//    - It skips the rest of the loop body for this URL
//    - The worker goes straight back to recv() for the next one
// -----------------------------------------------------------------------------
