// src/harvest/collector.rs
// =============================================================================
// The single consumer at the end of the pipeline.
//
// Takes PageLinks off the results queue until the queue is closed and writes
// each link as its own line. After every page the writer is flushed, so a
// crash mid-run loses at most the page being written.
//
// The collector is the only code that touches the output file.
// =============================================================================

use super::worker::PageLinks;
use crate::error::HarvestError;
use std::path::Path;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;

/// Drains `results` into `writer`, returns how many links were written
///
/// `path` is only used to name the file in errors. A failed write aborts
/// straight away; lines already flushed stay where they are.
pub async fn collect<W>(
    mut results: mpsc::Receiver<PageLinks>,
    writer: &mut W,
    path: &Path,
) -> Result<usize, HarvestError>
where
    W: AsyncWrite + Unpin,
{
    let to_write_error = |source| HarvestError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut written = 0;

    // recv() returns None once every sender is dropped
    while let Some(page) = results.recv().await {
        for link in &page.links {
            writer.write_all(link.as_bytes()).await.map_err(to_write_error)?;
            writer.write_all(b"\n").await.map_err(to_write_error)?;
        }
        writer.flush().await.map_err(to_write_error)?;

        tracing::debug!("Wrote {} link(s) from {}", page.links.len(), page.url);
        written += page.links.len();
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::pin::Pin;
    use std::task::{Context, Poll};

    fn page(url: &str, links: &[&str]) -> PageLinks {
        PageLinks {
            url: url.to_string(),
            links: links.iter().map(|l| l.to_string()).collect(),
        }
    }

    /// Writer that fails every write
    struct BrokenWriter;

    impl AsyncWrite for BrokenWriter {
        fn poll_write(
            self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
            _buf: &[u8],
        ) -> Poll<io::Result<usize>> {
            Poll::Ready(Err(io::Error::new(io::ErrorKind::Other, "disk full")))
        }

        fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
            Poll::Ready(Ok(()))
        }

        fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
            Poll::Ready(Ok(()))
        }
    }

    #[tokio::test]
    async fn test_writes_one_link_per_line_in_arrival_order() {
        let (tx, rx) = mpsc::channel(4);
        tx.send(page("u1", &["https://a.io/1", "https://a.io/2"])).await.unwrap();
        tx.send(page("u2", &[])).await.unwrap();
        tx.send(page("u3", &["https://b.io"])).await.unwrap();
        drop(tx);

        let mut out: Vec<u8> = Vec::new();
        let written = collect(rx, &mut out, Path::new("out.txt")).await.unwrap();

        assert_eq!(written, 3);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "https://a.io/1\nhttps://a.io/2\nhttps://b.io\n"
        );
    }

    #[tokio::test]
    async fn test_no_results_writes_nothing() {
        let (tx, rx) = mpsc::channel::<PageLinks>(1);
        drop(tx);

        let mut out: Vec<u8> = Vec::new();
        let written = collect(rx, &mut out, Path::new("out.txt")).await.unwrap();

        assert_eq!(written, 0);
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_write_failure_aborts() {
        let (tx, rx) = mpsc::channel(1);
        tx.send(page("u1", &["https://a.io"])).await.unwrap();
        drop(tx);

        let err = collect(rx, &mut BrokenWriter, Path::new("out.txt"))
            .await
            .unwrap_err();
        assert!(matches!(err, HarvestError::Write { .. }));
    }

    #[tokio::test]
    async fn test_each_batch_is_flushed_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("links.txt");
        let file = tokio::fs::File::create(&path).await.unwrap();
        let mut writer = tokio::io::BufWriter::new(file);

        let (tx, rx) = mpsc::channel(1);
        let collector = tokio::spawn({
            let path = path.clone();
            async move { collect(rx, &mut writer, &path).await }
        });

        tx.send(page("u1", &["https://a.io/first"])).await.unwrap();
        // Second send only completes once the first page has been taken off the queue
        tx.send(page("u2", &["https://a.io/second"])).await.unwrap();
        drop(tx);

        assert_eq!(collector.await.unwrap().unwrap(), 2);
        let contents = tokio::fs::read_to_string(&path).await.unwrap();
        assert_eq!(contents, "https://a.io/first\nhttps://a.io/second\n");
    }
}
