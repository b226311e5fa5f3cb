use std::io::Write;
use std::sync::Mutex;

pub use prenivdl_core::core::events::{
    EventEmitter, NoopEmitter, TransferInfo, TransferProgress, TransferStatus,
};

/// Renders transfer events as single-line status updates on stderr.
#[derive(Default)]
pub struct TerminalEmitter {
    last_percent: Mutex<Option<(usize, u32)>>,
}

impl TerminalEmitter {
    pub fn new() -> Self {
        Self::default()
    }
}

fn prefix(index: usize, total: usize) -> String {
    if total > 1 {
        format!("[{}/{}] ", index, total)
    } else {
        String::new()
    }
}

impl EventEmitter for TerminalEmitter {
    fn emit_transfer(&self, info: &TransferInfo) {
        let prefix = prefix(info.index, info.total);
        let mut err = std::io::stderr().lock();
        match &info.status {
            TransferStatus::Active => {
                if let Ok(mut last) = self.last_percent.lock() {
                    *last = None;
                }
                let _ = writeln!(err, "  {}Downloading {} ({})...", prefix, info.label, info.kind);
            }
            TransferStatus::Complete { path } => {
                let _ = writeln!(err, "\r  {}Downloaded: {}", prefix, path.display());
            }
            TransferStatus::Error { message } => {
                let _ = writeln!(err, "\r  {}Failed {}: {}", prefix, info.label, message);
            }
        }
    }

    fn emit_progress(&self, progress: &TransferProgress) {
        let whole = progress.percent.clamp(0.0, 100.0) as u32;
        if let Ok(mut last) = self.last_percent.lock() {
            if *last == Some((progress.index, whole)) {
                return;
            }
            *last = Some((progress.index, whole));
        }
        let mut err = std::io::stderr().lock();
        let _ = write!(
            err,
            "\r  {}{:>3}%",
            prefix(progress.index, progress.total),
            whole
        );
        let _ = err.flush();
    }
}
