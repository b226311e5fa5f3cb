use std::path::{Path, PathBuf};
use std::time::Duration;

use futures::StreamExt;
use tokio::io::AsyncWriteExt;
use tokio::sync::mpsc;

use crate::models::media::DownloadRequest;
use prenivdl_core::PipelineError;

const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

pub(crate) fn part_path_for(output: &Path) -> PathBuf {
    let mut part = output.as_os_str().to_owned();
    part.push(".part");
    PathBuf::from(part)
}

/// Declared size from a HEAD request. Any failure, including a missing or
/// unparsable header, yields `None`.
///
/// Reads the header directly: `Response::content_length` reports the size of
/// the (empty) HEAD body instead.
pub async fn probe_size(client: &reqwest::Client, url: &str) -> Option<u64> {
    match tokio::time::timeout(PROBE_TIMEOUT, client.head(url).send()).await {
        Ok(Ok(resp)) if resp.status().is_success() => resp
            .headers()
            .get(reqwest::header::CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok()),
        Ok(Ok(resp)) => {
            tracing::debug!("[direct] size probe got HTTP {}", resp.status());
            None
        }
        Ok(Err(e)) => {
            tracing::debug!("[direct] size probe failed: {}", e);
            None
        }
        Err(_) => {
            tracing::debug!("[direct] size probe timed out");
            None
        }
    }
}

/// Streams one variant to `request.dest_path()`.
///
/// Bytes go to a sibling `.part` file that is renamed into place only after
/// the body ended cleanly and matched the declared length. On any failure
/// the `.part` file is removed and the destination is never created.
pub async fn download(
    client: &reqwest::Client,
    request: &DownloadRequest,
    progress_tx: mpsc::Sender<f64>,
) -> Result<PathBuf, PipelineError> {
    let url = request.variant.url.as_str();

    if let Some(limit) = request.max_size_bytes {
        match probe_size(client, url).await {
            Some(declared) if declared > limit => {
                tracing::warn!(
                    "[direct] {} declares {} bytes, over the {} byte limit",
                    url,
                    declared,
                    limit
                );
                return Err(PipelineError::SizeLimitExceeded { declared, limit });
            }
            Some(_) => {}
            None => tracing::debug!("[direct] no declared size for {}, skipping guard", url),
        }
    }

    tokio::fs::create_dir_all(&request.dest_dir)
        .await
        .map_err(|e| {
            PipelineError::Write(format!(
                "cannot create {}: {}",
                request.dest_dir.display(),
                e
            ))
        })?;

    let output = request.dest_path();
    if tokio::fs::try_exists(&output).await.unwrap_or(false) {
        return Err(PipelineError::Write(format!(
            "{} already exists",
            output.display()
        )));
    }

    let part_path = part_path_for(&output);
    if let Err(e) = stream_to_part(client, url, &part_path, &progress_tx).await {
        let _ = tokio::fs::remove_file(&part_path).await;
        return Err(e);
    }

    if let Err(e) = commit_part(&part_path, &output).await {
        let _ = tokio::fs::remove_file(&part_path).await;
        return Err(match e.kind() {
            std::io::ErrorKind::AlreadyExists => {
                PipelineError::Write(format!("{} already exists", output.display()))
            }
            _ => PipelineError::Write(format!("cannot move file into place: {}", e)),
        });
    }

    let _ = progress_tx.try_send(100.0);
    tracing::info!("[direct] saved {}", output.display());
    Ok(output)
}

/// Moves a finished `.part` file to `output` without replacing a file that
/// appeared there during the transfer. A hard link fails with
/// `AlreadyExists` in that case; filesystems without hard links fall back
/// to a rename.
async fn commit_part(part_path: &Path, output: &Path) -> std::io::Result<()> {
    match tokio::fs::hard_link(part_path, output).await {
        Ok(()) => {
            let _ = tokio::fs::remove_file(part_path).await;
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => Err(e),
        Err(e) => {
            tracing::debug!("[direct] hard link unavailable ({}), renaming", e);
            if tokio::fs::try_exists(output).await.unwrap_or(false) {
                return Err(std::io::Error::from(std::io::ErrorKind::AlreadyExists));
            }
            tokio::fs::rename(part_path, output).await
        }
    }
}

async fn stream_to_part(
    client: &reqwest::Client,
    url: &str,
    part_path: &Path,
    progress_tx: &mpsc::Sender<f64>,
) -> Result<u64, PipelineError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| PipelineError::Transport(e.to_string()))?;

    if !response.status().is_success() {
        return Err(PipelineError::Transport(format!(
            "HTTP {} while downloading {}",
            response.status().as_u16(),
            url
        )));
    }

    if let Some(ct) = response.headers().get(reqwest::header::CONTENT_TYPE) {
        if ct.to_str().is_ok_and(|s| s.contains("text/html")) {
            return Err(PipelineError::Transport(
                "server returned HTML instead of media, the link may have expired".into(),
            ));
        }
    }

    let total_size = response.content_length().filter(|n| *n > 0);

    let file = tokio::fs::File::create(part_path)
        .await
        .map_err(|e| PipelineError::Write(format!("{}: {}", part_path.display(), e)))?;
    let mut file = tokio::io::BufWriter::with_capacity(256 * 1024, file);
    let mut downloaded = 0u64;
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| PipelineError::Transport(e.to_string()))?;
        file.write_all(&chunk)
            .await
            .map_err(|e| PipelineError::Write(format!("write failed (disk full?): {}", e)))?;
        downloaded += chunk.len() as u64;

        let percent = match total_size {
            Some(total) => (downloaded as f64 / total as f64) * 100.0,
            None => (downloaded as f64 / (downloaded as f64 + 500_000.0)) * 100.0,
        };
        let _ = progress_tx.try_send(percent.min(99.9));
    }

    file.flush().await?;

    if let Some(expected) = total_size {
        if downloaded != expected {
            return Err(PipelineError::Transport(format!(
                "incomplete transfer: expected {} bytes, received {}",
                expected, downloaded
            )));
        }
    }

    Ok(downloaded)
}
