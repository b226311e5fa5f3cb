use crate::commands::prompt::PromptSelector;
use crate::core::events::TerminalEmitter;
use crate::core::pipeline::{Pipeline, PipelineOutcome};
use crate::models::settings::DownloadPathConfig;
use crate::platforms::Platform;
use prenivdl_core::PipelineError;

/// Resolves, prompts and downloads one URL, reporting the result on the
/// terminal. Failures are reported here and never abort the caller.
pub async fn download_url(
    pipeline: &Pipeline,
    url: &str,
    forced: Option<Platform>,
    paths: &DownloadPathConfig,
) {
    let platform = forced.or_else(|| Platform::from_url(url));
    if let Some(platform) = platform {
        println!();
        println!("  -- Fetching {} data...", platform.display_name());
    }

    let emitter = TerminalEmitter::new();
    match pipeline
        .run(url, forced, &PromptSelector, paths, &emitter)
        .await
    {
        Ok(outcome) => report_outcome(&outcome),
        Err(e) => report_error(&e),
    }
}

pub fn report_outcome(outcome: &PipelineOutcome) {
    match outcome {
        PipelineOutcome::Cancelled => println!(" Download cancelled."),
        PipelineOutcome::Stored(path) => println!(" Saved to {}", path.display()),
        PipelineOutcome::Batch(summary) => {
            println!(
                " Completed: {}/{} files downloaded successfully",
                summary.succeeded, summary.attempted
            );
            for (label, message) in &summary.failures {
                println!("   • {} failed: {}", label, message);
            }
        }
    }
}

fn supported_platforms() -> String {
    Platform::ALL
        .iter()
        .map(|p| p.display_name())
        .collect::<Vec<_>>()
        .join(", ")
}

/// One-line hint shown under an error, if the error has an obvious fix.
pub fn error_hint(err: &PipelineError) -> Option<String> {
    match err {
        PipelineError::InvalidUrl(_) => Some("Check the link; it must start with http:// or https://".into()),
        PipelineError::NotRecognized(_) => Some(format!("Supported platforms: {}", supported_platforms())),
        PipelineError::ResolutionFailed(_) | PipelineError::MalformedPayload(_) => {
            Some("The post may be private or removed, or the API is temporarily down".into())
        }
        PipelineError::SizeLimitExceeded { .. } => Some("This file is too large to download".into()),
        PipelineError::Transport(_) => Some("The media link may have expired; try again".into()),
        PipelineError::Write(_) => Some("Check the download directory and free disk space".into()),
    }
}

pub fn report_error(err: &PipelineError) {
    eprintln!();
    eprintln!(" Error: {}", err);
    if let Some(hint) = error_hint(err) {
        eprintln!("   • {}", hint);
    }
}

/// Resolves `url` and prints the descriptor as pretty JSON on stdout.
pub async fn print_info(pipeline: &Pipeline, url: &str) {
    match pipeline.resolve(url).await {
        Ok(descriptor) => match serde_json::to_string_pretty(&descriptor) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!(" Error: cannot encode descriptor: {}", e),
        },
        Err(e) => report_error(&e),
    }
}
