// SPDX-License-Identifier: GPL-3.0-only

//! Session state and events

use crate::countdown::CountdownEvent;
use crate::frame::Frame;
use crate::generation::GenerationOutcome;
use crate::styles::StyleId;

/// The capture state machine.
///
/// One full cycle runs `Idle → Countdown → Generating → Validation →
/// Waiting → Idle`; `Idle` is both the initial state and the terminal
/// state of every cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Idle screensaver with style selection
    #[default]
    Idle,
    /// Capture countdown running
    Countdown,
    /// Photo taken, remote generation in flight
    Generating,
    /// Result (or fallback) on screen, awaiting accept/close
    Validation,
    /// Accepted, handed off to the external sharing flow
    Waiting,
}

/// One capture session, owned exclusively by the controller.
///
/// Created on view entry, reset on view exit. Only the controller thread
/// ever reads or writes it, so it carries no lock.
#[derive(Debug, Default)]
pub struct Session {
    /// Current state machine position
    pub state: SessionState,
    /// Style picked on the idle screen
    pub selected_style: Option<StyleId>,
    /// Camera snapshot taken when the countdown finished
    pub original_photo: Option<Frame>,
    /// Decoded result of the last successful generation
    pub generated_image: Option<Frame>,
    /// Whether a generation worker is currently outstanding
    pub generation_in_progress: bool,
    /// Monotonically increasing id of the current generation attempt;
    /// results tagged with an older epoch are discarded
    pub generation_epoch: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Messages delivered back to the controller thread by background tasks.
///
/// Tasks never mutate [`Session`] directly; the surrounding application
/// drains these from the event channel and applies them serially through
/// [`SessionController::update`](super::SessionController::update).
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// A countdown tick or completion
    Countdown(CountdownEvent),
    /// A generation worker resolved, successfully or not
    Generation(GenerationOutcome),
}
