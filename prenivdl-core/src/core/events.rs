use std::path::PathBuf;

use crate::models::media::MediaKind;

#[derive(Debug, Clone, PartialEq)]
pub enum TransferStatus {
    Active,
    Complete { path: PathBuf },
    Error { message: String },
}

/// State change of one transfer. `index` is 1-based within `total`.
#[derive(Debug, Clone)]
pub struct TransferInfo {
    pub index: usize,
    pub total: usize,
    pub label: String,
    pub kind: MediaKind,
    pub status: TransferStatus,
}

#[derive(Debug, Clone)]
pub struct TransferProgress {
    pub index: usize,
    pub total: usize,
    pub percent: f64,
}

pub trait EventEmitter: Send + Sync {
    fn emit_transfer(&self, info: &TransferInfo);
    fn emit_progress(&self, progress: &TransferProgress);
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEmitter;

impl EventEmitter for NoopEmitter {
    fn emit_transfer(&self, _info: &TransferInfo) {}
    fn emit_progress(&self, _progress: &TransferProgress) {}
}
