// SPDX-License-Identifier: GPL-3.0-only

//! Background generation worker
//!
//! Drives one generation attempt end to end: writes the captured photo to
//! the filesystem exchange, submits the prompt graph, polls the output
//! directory for the artifact, decodes it and cleans the exchange files up
//! again. The task always resolves to a [`GenerationResult`]; no failure
//! crosses the boundary as a panic.
//!
//! Cancellation is best-effort: the flag is honored before every poll
//! iteration and before the result emission, but an HTTP call already in
//! flight cannot be preempted. A cancelled worker therefore may complete
//! its round trip — its result is suppressed here and additionally
//! discarded by the controller's epoch check.

use super::{GenerationBackend, GenerationResult, SubmitRequest};
use crate::config::GeneratorConfig;
use crate::errors::GenerationError;
use crate::frame::Frame;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, warn};

/// A worker's result tagged with the generation epoch it belongs to
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationOutcome {
    pub epoch: u64,
    pub result: GenerationResult,
}

/// Handle to a spawned generation worker
pub struct WorkerHandle {
    cancel: Arc<AtomicBool>,
    handle: tokio::task::JoinHandle<()>,
    epoch: u64,
}

impl WorkerHandle {
    /// The epoch this worker was started under
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Request cancellation and detach, giving the task `grace` to wind
    /// down before it is abandoned with a warning.
    pub fn shutdown(self, grace: Duration) {
        self.cancel.store(true, Ordering::SeqCst);
        let epoch = self.epoch;
        let handle = self.handle;
        tokio::spawn(async move {
            match tokio::time::timeout(grace, handle).await {
                Ok(_) => debug!(epoch, "Generation worker stopped after cancellation"),
                Err(_) => warn!(
                    epoch,
                    grace_secs = grace.as_secs(),
                    "Generation worker did not stop within the grace period; abandoning it"
                ),
            }
        });
    }
}

/// Spawn a generation worker for the given photo and prompt.
///
/// The outcome is delivered through `sender` wrapped by `wrap` — unless the
/// worker was cancelled first, in which case nothing is emitted.
pub fn spawn<E, F>(
    backend: Arc<dyn GenerationBackend>,
    config: GeneratorConfig,
    prompt: String,
    input_image: Frame,
    epoch: u64,
    sender: UnboundedSender<E>,
    wrap: F,
) -> WorkerHandle
where
    E: Send + 'static,
    F: FnOnce(GenerationOutcome) -> E + Send + 'static,
{
    let cancel = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&cancel);

    let handle = tokio::spawn(async move {
        let input_path = config.input_path();
        let result = match run(backend.as_ref(), &config, prompt, input_image, &flag).await {
            Ok(frame) => {
                info!(epoch, "Generation succeeded");
                GenerationResult::success(frame)
            }
            Err(err) => {
                info!(epoch, error = %err, "Generation failed, degrading to captured photo");
                GenerationResult::failure(err)
            }
        };

        // The exchange file must not outlive the attempt on any exit path
        cleanup_file(&input_path).await;

        if flag.load(Ordering::SeqCst) {
            debug!(epoch, "Worker cancelled, suppressing result emission");
            return;
        }
        let _ = sender.send(wrap(GenerationOutcome { epoch, result }));
    });

    WorkerHandle {
        cancel,
        handle,
        epoch,
    }
}

async fn run(
    backend: &dyn GenerationBackend,
    config: &GeneratorConfig,
    prompt: String,
    input_image: Frame,
    cancel: &AtomicBool,
) -> Result<Frame, GenerationError> {
    if cancel.load(Ordering::SeqCst) {
        return Err(GenerationError::Cancelled);
    }

    let png = input_image
        .encode_png()
        .map_err(|e| GenerationError::Io(e.to_string()))?;
    tokio::fs::write(config.input_path(), png).await?;

    // Snapshot before submitting so a leftover artifact from an earlier
    // run is never mistaken for this job's output
    let existing = snapshot_artifacts(&config.output_dir, &config.output_prefix);

    let request = SubmitRequest::new(config, prompt);
    let job_id = backend.submit(&request).await?;
    debug!(job_id = %job_id, output_dir = %config.output_dir.display(), "Polling for artifact");

    let deadline = tokio::time::Instant::now() + config.timeout();
    let artifact = loop {
        if cancel.load(Ordering::SeqCst) {
            return Err(GenerationError::Cancelled);
        }
        if let Some(path) = find_new_artifact(&config.output_dir, &config.output_prefix, &existing)
        {
            break path;
        }
        if tokio::time::Instant::now() >= deadline {
            return Err(GenerationError::Timeout);
        }
        tokio::time::sleep(config.poll_interval()).await;
    };

    let frame = match Frame::open(&artifact) {
        Ok(frame) => frame,
        Err(image::ImageError::IoError(_)) => return Err(GenerationError::NoArtifact),
        Err(e) => return Err(GenerationError::Decode(e.to_string())),
    };

    cleanup_file(&artifact).await;
    Ok(frame)
}

/// Artifact paths already present before submission
fn snapshot_artifacts(output_dir: &Path, prefix: &str) -> HashSet<PathBuf> {
    let Ok(entries) = std::fs::read_dir(output_dir) else {
        return HashSet::new();
    };
    entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| matches_prefix(path, prefix))
        .collect()
}

/// A newly created, non-empty artifact matching the output prefix.
///
/// A missing or unreadable output directory is treated as "nothing yet";
/// persistent absence surfaces as a timeout rather than an I/O error.
fn find_new_artifact(
    output_dir: &Path,
    prefix: &str,
    existing: &HashSet<PathBuf>,
) -> Option<PathBuf> {
    let entries = std::fs::read_dir(output_dir).ok()?;
    entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| matches_prefix(path, prefix) && !existing.contains(path))
        .find(|path| {
            // Skip files still being written
            std::fs::metadata(path)
                .map(|meta| meta.is_file() && meta.len() > 0)
                .unwrap_or(false)
        })
}

fn matches_prefix(path: &Path, prefix: &str) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.starts_with(prefix))
        .unwrap_or(false)
}

async fn cleanup_file(path: &Path) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => warn!(path = %path.display(), error = %e, "Failed to remove exchange file"),
    }
}
