use crate::errors::{AppError, AppResult};
use indicatif::{ProgressBar, ProgressStyle};

/// Creates a spinner for streams whose total length is unknown up front.
///
/// A dump is consumed in a single forward pass, so the number of entities is
/// only known once the stream is exhausted; the spinner reports the running
/// count instead of a completion ratio.
pub fn create_spinner(message: &str) -> AppResult<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {pos} {msg}")
            .map_err(|e| {
                AppError::IoError(format!("Failed to create progress bar template: {e}"))
            })?,
    );
    pb.set_message(message.to_string());
    Ok(pb)
}
