//! Single attachment downloading.

use futures::StreamExt;
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};

use crate::api::KemonoApi;
use crate::download::task::DownloadTask;
use crate::error::{Error, Result};
use crate::output::DownloadProgress;

/// Write buffer size; the body is flushed to disk in chunks of this size.
const CHUNK_SIZE: usize = 8192;

/// Download one attachment to its reserved destination.
///
/// Returns the number of bytes written. A failure can leave a partial file
/// behind.
pub async fn download_attachment(
    api: &KemonoApi,
    task: &DownloadTask,
    progress: &DownloadProgress,
) -> Result<u64> {
    let expected = api.probe_content_length(&task.source_url).await;
    if expected.is_none() {
        tracing::debug!("Size unknown for {}", task.file_name);
    }

    let bar = progress.file_bar(&task.file_name, expected);
    let result = stream_to_file(api, task, &bar).await;
    bar.finish_and_clear();

    let written = result?;
    tracing::debug!(
        "Downloaded {} ({} bytes) to {}",
        task.file_name,
        written,
        task.destination.display()
    );
    Ok(written)
}

async fn stream_to_file(
    api: &KemonoApi,
    task: &DownloadTask,
    bar: &indicatif::ProgressBar,
) -> Result<u64> {
    let response = api.download_file(&task.source_url).await?;

    // Stream to file
    let file = File::create(&task.destination).await?;
    let mut writer = BufWriter::with_capacity(CHUNK_SIZE, file);
    let mut stream = response.bytes_stream();
    let mut downloaded: u64 = 0;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| Error::Download(format!("Stream error: {}", e)))?;
        writer.write_all(&chunk).await?;
        downloaded += chunk.len() as u64;
        bar.set_position(downloaded);
    }

    writer.flush().await?;

    Ok(downloaded)
}
