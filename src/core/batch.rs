use std::path::PathBuf;

use tokio::sync::mpsc;

use crate::core::direct_downloader;
use crate::core::events::{EventEmitter, TransferInfo, TransferProgress, TransferStatus};
use crate::models::media::DownloadRequest;
use prenivdl_core::PipelineError;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchSummary {
    pub attempted: usize,
    pub succeeded: usize,
    pub stored: Vec<PathBuf>,
    /// `(variant label, error message)` per failed item.
    pub failures: Vec<(String, String)>,
}

/// Runs one transfer and forwards its lifecycle to `emitter`.
pub async fn transfer(
    client: &reqwest::Client,
    request: &DownloadRequest,
    index: usize,
    total: usize,
    emitter: &dyn EventEmitter,
) -> Result<PathBuf, PipelineError> {
    let info = |status: TransferStatus| TransferInfo {
        index,
        total,
        label: request.variant.label.clone(),
        kind: request.variant.kind,
        status,
    };
    emitter.emit_transfer(&info(TransferStatus::Active));

    let (tx, mut rx) = mpsc::channel::<f64>(64);
    let drain = async {
        while let Some(percent) = rx.recv().await {
            emitter.emit_progress(&TransferProgress {
                index,
                total,
                percent,
            });
        }
    };
    let (result, ()) = tokio::join!(direct_downloader::download(client, request, tx), drain);

    match &result {
        Ok(path) => emitter.emit_transfer(&info(TransferStatus::Complete { path: path.clone() })),
        Err(e) => emitter.emit_transfer(&info(TransferStatus::Error {
            message: e.to_string(),
        })),
    }
    result
}

/// Downloads every request in order, one at a time. A failed item is
/// recorded and the loop moves on.
pub async fn download_all(
    client: &reqwest::Client,
    requests: &[DownloadRequest],
    emitter: &dyn EventEmitter,
) -> BatchSummary {
    let total = requests.len();
    let mut summary = BatchSummary::default();

    for (i, request) in requests.iter().enumerate() {
        summary.attempted += 1;
        match transfer(client, request, i + 1, total, emitter).await {
            Ok(path) => {
                summary.succeeded += 1;
                summary.stored.push(path);
            }
            Err(e) => {
                tracing::warn!(
                    "[batch] item {}/{} ({}) failed: {}",
                    i + 1,
                    total,
                    request.variant.label,
                    e
                );
                summary
                    .failures
                    .push((request.variant.label.clone(), e.to_string()));
            }
        }
    }

    summary
}
