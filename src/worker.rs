//! Background worker for one generation request.
//!
//! The UI thread never blocks on network I/O: each trigger spawns one
//! worker thread that runs the two remote calls and delivers exactly one
//! terminal [`Outcome`] back over a channel. No error escapes the thread,
//! and the channel disconnects once the outcome is sent.

use std::sync::mpsc;
use std::sync::Arc;
use std::thread;

use crate::ports::image_generator::{GenerationRequest, ImageGenerator};

/// Terminal result of one generation attempt.
#[derive(Debug)]
pub enum Outcome {
    /// Raw bytes of the generated image.
    Success(Vec<u8>),
    /// Human-readable description of whatever went wrong.
    Failure(String),
}

/// Spawn a worker thread for the given request.
///
/// The returned receiver yields exactly one [`Outcome`] and then
/// disconnects. The worker is never cancelled; once started it runs to
/// completion even if the caller stops listening.
#[must_use]
pub fn spawn(
    generator: Arc<dyn ImageGenerator>,
    request: GenerationRequest,
) -> mpsc::Receiver<Outcome> {
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        log::debug!("generation started");

        let outcome = match generator
            .generate(&request)
            .and_then(|locator| generator.fetch(&locator))
        {
            Ok(bytes) => {
                log::debug!("generation finished ({} bytes)", bytes.len());
                Outcome::Success(bytes)
            }
            Err(e) => {
                log::warn!("generation failed: {e}");
                Outcome::Failure(e.to_string())
            }
        };

        // The receiver may be gone if the app shut down mid-request.
        let _ = tx.send(outcome);
    });

    rx
}
