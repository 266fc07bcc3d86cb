// SPDX-License-Identifier: GPL-3.0-only

//! Session event and UI handlers
//!
//! `update()` dispatches background-task events to focused handler methods;
//! the UI entry points (`select_style`, `start_capture`, `accept`, `close`,
//! `leave`) are plain method calls from the surrounding application.

use super::SessionController;
use super::state::{SessionEvent, SessionState};
use crate::constants::{COUNTDOWN_START, WORKER_STOP_GRACE};
use crate::countdown::CountdownEvent;
use crate::errors::SessionError;
use crate::frame::Frame;
use crate::generation::{GenerationOutcome, worker};
use crate::styles::StyleId;
use std::path::PathBuf;
use tracing::{debug, error, info, warn};

impl SessionController {
    /// Apply one background-task event. Called serially on the controller
    /// thread by whoever drains the event channel.
    pub fn update(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::Countdown(CountdownEvent::Tick(value)) => {
                self.handle_countdown_tick(value)
            }
            SessionEvent::Countdown(CountdownEvent::Finished) => self.handle_countdown_finished(),
            SessionEvent::Generation(outcome) => self.handle_generation_finished(outcome),
        }
    }

    // =========================================================================
    // UI entry points
    // =========================================================================

    /// Remember the style the user picked. Valid only on the idle screen.
    pub fn select_style(&mut self, id: StyleId) {
        if self.session.state != SessionState::Idle {
            warn!(state = ?self.session.state, style = %id, "Ignoring style selection outside idle");
            return;
        }
        if !self.catalog.contains(&id) {
            warn!(style = %id, "Selected style is not in the catalog");
            return;
        }
        info!(style = %id, "Style selected");
        self.session.selected_style = Some(id);
    }

    /// Begin the capture countdown.
    ///
    /// Without a selected style this surfaces a transient hint and does
    /// nothing. Pressing the shutter while the countdown is already
    /// running is a no-op, not an error.
    pub fn start_capture(&mut self) {
        match self.session.state {
            SessionState::Idle => {}
            SessionState::Countdown => {
                debug!("Countdown already running, ignoring capture request");
                return;
            }
            state => {
                warn!(?state, "Ignoring capture request in this state");
                return;
            }
        }

        let Some(style) = &self.session.selected_style else {
            info!("Capture requested without a selected style");
            self.overlays
                .show_hint(&SessionError::NoStyleSelected.to_string());
            return;
        };

        info!(style = %style, "Starting capture countdown");
        self.session.state = SessionState::Countdown;
        self.overlays.show_countdown(COUNTDOWN_START);
        self.countdown
            .start(COUNTDOWN_START, self.events.clone(), SessionEvent::Countdown);
    }

    /// Accept the validated result and hand off to the external sharing
    /// flow. With an archive directory configured, the accepted image is
    /// also saved there under a timestamped name.
    pub fn accept(&mut self) {
        if self.session.state != SessionState::Validation {
            warn!(state = ?self.session.state, "Ignoring accept outside validation");
            return;
        }
        info!("Result accepted, handing off to sharing");
        if let Some(dir) = &self.config.archive_dir {
            let accepted = self
                .session
                .generated_image
                .clone()
                .or_else(|| self.session.original_photo.clone());
            if let Some(image) = accepted {
                archive_result(dir.clone(), image);
            }
        }
        self.session.state = SessionState::Waiting;
        self.overlays.set_style_controls_visible(false);
    }

    /// Dismiss the validated result and return straight to idle
    pub fn close(&mut self) {
        if self.session.state != SessionState::Validation {
            warn!(state = ?self.session.state, "Ignoring close outside validation");
            return;
        }
        info!("Result dismissed");
        self.reset();
    }

    /// The user left the capture view; tear the session down
    pub fn leave(&mut self) {
        debug!("Leaving capture view");
        self.reset();
    }

    /// Return to idle from any state.
    ///
    /// Cancels the countdown and any outstanding worker, force-cleans every
    /// overlay, clears the session and the captured/generated compositor
    /// slots. A worker that does not stop within its grace period is
    /// abandoned with a warning; its late result is discarded by epoch.
    pub fn reset(&mut self) {
        debug!(state = ?self.session.state, "Resetting session");
        self.countdown.stop();
        if let Some(worker) = self.worker.take() {
            worker.shutdown(WORKER_STOP_GRACE);
        }
        // Any result still in flight is stale from this point on
        self.session.generation_epoch += 1;
        self.session.generation_in_progress = false;
        self.session.selected_style = None;
        self.session.original_photo = None;
        self.session.generated_image = None;
        self.session.state = SessionState::Idle;
        self.overlays.force_cleanup();
        self.overlays.set_style_controls_visible(true);
        self.compositor.clear_captured();
        self.compositor.clear_generated();
    }

    // =========================================================================
    // Background event handlers
    // =========================================================================

    fn handle_countdown_tick(&mut self, value: u32) {
        if self.session.state != SessionState::Countdown {
            debug!(value, "Dropping countdown tick outside countdown state");
            return;
        }
        self.overlays.show_countdown(value);
    }

    /// The countdown ran out: snapshot the live frame and start generation
    fn handle_countdown_finished(&mut self) {
        if self.session.state != SessionState::Countdown {
            debug!("Dropping countdown completion outside countdown state");
            return;
        }
        self.overlays.finish_countdown();

        let Some(photo) = self.camera.latest_frame() else {
            warn!("No camera frame available at capture time, returning to idle");
            self.session.state = SessionState::Idle;
            return;
        };

        let Some(style) = self.session.selected_style.clone() else {
            warn!("Countdown finished without a selected style, returning to idle");
            self.session.state = SessionState::Idle;
            return;
        };
        let prompt = match self.catalog.prompt(&style) {
            Some(prompt) => prompt.to_string(),
            None => {
                warn!(style = %style, "Style vanished from catalog, sending empty prompt");
                String::new()
            }
        };

        self.session.original_photo = Some(photo.clone());
        self.session.state = SessionState::Generating;
        self.session.generation_epoch += 1;
        self.session.generation_in_progress = true;
        let epoch = self.session.generation_epoch;

        info!(style = %style, epoch, "Photo captured, starting generation");

        // A previous worker, if any, is now stale; let it wind down
        if let Some(old) = self.worker.take() {
            old.shutdown(WORKER_STOP_GRACE);
        }
        self.worker = Some(worker::spawn(
            self.backend.clone(),
            self.config.clone(),
            prompt,
            photo,
            epoch,
            self.events.clone(),
            SessionEvent::Generation,
        ));
        self.overlays.show_busy();
    }

    /// A generation worker resolved. Stale results are discarded; a failed
    /// generation still reaches validation, displaying the captured photo.
    fn handle_generation_finished(&mut self, outcome: GenerationOutcome) {
        if outcome.epoch != self.session.generation_epoch {
            debug!(
                epoch = outcome.epoch,
                current = self.session.generation_epoch,
                "Discarding stale generation result"
            );
            return;
        }
        if self.session.state != SessionState::Generating {
            debug!(state = ?self.session.state, "Dropping generation result outside generating state");
            return;
        }

        self.session.generation_in_progress = false;
        self.worker = None;
        if let Some(error) = &outcome.result.error {
            info!(epoch = outcome.epoch, error = %error, "Generation failed, falling back to captured photo");
        }
        self.session.generated_image = outcome.result.image;
        self.session.state = SessionState::Validation;
        self.overlays.hide_busy();

        if let Some(image) = &self.session.generated_image {
            self.compositor.set_generated(image.clone());
        } else if let Some(photo) = &self.session.original_photo {
            self.compositor.set_captured(photo.clone());
        }
    }
}

/// Save an accepted result off the controller thread. Archiving is
/// best-effort; failures are logged and never reach the session.
fn archive_result(dir: PathBuf, image: Frame) {
    tokio::spawn(async move {
        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        let path = dir.join(format!("BOOTH_{}.png", timestamp));
        let bytes = match image.encode_png() {
            Ok(bytes) => bytes,
            Err(err) => {
                error!(error = %err, "Failed to encode accepted result");
                return;
            }
        };
        match tokio::fs::write(&path, bytes).await {
            Ok(()) => info!(path = %path.display(), "Accepted result archived"),
            Err(err) => {
                error!(error = %err, path = %path.display(), "Failed to archive accepted result")
            }
        }
    });
}
