// src/harvest/mod.rs
// =============================================================================
// This module runs the fetch-and-collect pipeline.
//
//   loader ──> URL queue ──> worker × T ──> results queue ──> collector ──> file
//
// Submodules:
// - loader: reads the URL list
// - worker: fetches URLs and extracts links (the pool is T of these)
// - collector: writes links to the output file
//
// This file is the coordinator that wires them together. The important rule:
// the results queue is closed only after EVERY worker has finished. Close it
// earlier and late results are lost; never close it and the collector waits
// forever.
//
// Rust concepts:
// - tokio::spawn: Starts a task that runs concurrently with the current one
// - JoinHandle: Lets us wait for a spawned task and get its return value
// - Drop: Dropping the last Sender is what closes a channel
// =============================================================================

mod collector;
mod loader;
mod worker;

pub use loader::load_urls;

use collector::collect;
use worker::{build_client, run_worker, PageLinks, WorkerStats};

use crate::error::HarvestError;
use futures::future::join_all;
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::BufWriter;
use tokio::sync::mpsc;

/// What a finished run did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarvestSummary {
    /// Lines in the URL list
    pub urls: usize,
    /// URLs whose body was scanned
    pub fetched: usize,
    /// URLs that failed to fetch or read
    pub failed: usize,
    /// Lines written to the output file
    pub links_written: usize,
    /// Where the links went
    pub output: PathBuf,
}

/// Fetches every URL with `threads` workers and writes the links to `output`
///
/// Fails only for whole-run problems (output file, HTTP client, a write
/// error, a panicking worker). Per-URL failures are logged and counted.
pub async fn harvest(
    urls: Vec<String>,
    output: &Path,
    threads: usize,
) -> Result<HarvestSummary, HarvestError> {
    let total_urls = urls.len();
    let threads = worker_count(threads, total_urls);

    // Open the output first: if we can't write results there's no point fetching
    let file = File::create(output)
        .await
        .map_err(|source| HarvestError::OutputOpen {
            path: output.to_path_buf(),
            source,
        })?;
    let mut writer = BufWriter::new(file);

    let client = build_client()?;

    // The URL queue holds the whole list, so filling it never waits.
    // async_channel needs a capacity of at least 1.
    let (url_tx, url_rx) = async_channel::bounded(total_urls.max(1));
    for url in urls {
        // Can't fail: the capacity fits every URL and the receiver is alive
        let _ = url_tx.try_send(url);
    }
    // Workers drain what's left and then see the queue as closed
    url_tx.close();

    // Bounded results queue: a slow collector makes workers wait
    let (result_tx, result_rx) = mpsc::channel::<PageLinks>(threads);

    tracing::info!("Starting {} worker(s) for {} URL(s)", threads, total_urls);

    let handles: Vec<_> = (0..threads)
        .map(|id| {
            tokio::spawn(run_worker(
                id,
                client.clone(),
                url_rx.clone(),
                result_tx.clone(),
            ))
        })
        .collect();
    drop(url_rx);

    // The waiter holds the original results sender and only drops it once
    // every worker has returned. The collector stops when that happens.
    let waiter = tokio::spawn(async move {
        let mut stats = WorkerStats::default();
        for joined in join_all(handles).await {
            stats = stats.merge(joined?);
        }
        drop(result_tx);
        Ok::<_, HarvestError>(stats)
    });

    // On a write error we return right away. result_rx is dropped with the
    // collector, so the remaining workers stop at their next push.
    let links_written = collect(result_rx, &mut writer, output).await?;

    let stats = waiter.await??;

    tracing::info!(
        "Harvest finished: {} fetched, {} failed, {} link(s) written",
        stats.fetched,
        stats.failed,
        links_written
    );

    Ok(HarvestSummary {
        urls: total_urls,
        fetched: stats.fetched,
        failed: stats.failed,
        links_written,
        output: output.to_path_buf(),
    })
}

/// Workers to spawn: never more than there are URLs, never fewer than one
///
/// Extra workers would only find a closed queue and exit.
fn worker_count(threads: usize, total_urls: usize) -> usize {
    threads.min(total_urls).max(1)
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. How does a channel get "closed"?
//    - async_channel: we call close() on the sender explicitly
//    - tokio mpsc: it closes when the LAST Sender is dropped
//    - Every worker owns a clone of result_tx, and the waiter owns the
//      original, so the channel stays open until all of them are gone
//
// 2. What is `waiter.await??`?
//    - The first ? handles the JoinError (the waiter task itself panicked)
//    - The second ? handles our own HarvestError (a worker panicked)
//
// 3. Why is the collector run here and not in its own task?
//    - It needs &mut writer, and this function already owns the writer
//    - The workers and waiter are spawned, so they run while we collect
// -----------------------------------------------------------------------------
