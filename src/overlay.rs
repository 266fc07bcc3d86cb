// SPDX-License-Identifier: GPL-3.0-only

//! Overlay lifecycle management
//!
//! The kiosk shows at most two overlays: a busy spinner while generation is
//! in flight and the big countdown number during capture. Each overlay is
//! driven as a small explicit phase machine instead of chained widget
//! callbacks, which makes forced cleanup on session exit a single
//! unconditional operation.

use crate::constants::countdown_opacity;
use std::sync::Arc;
use tracing::debug;

/// Phases an overlay moves through over its lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlayPhase {
    /// Never shown, or destroyed through the normal path
    #[default]
    Hidden,
    /// Creation requested, widget being built
    Showing,
    /// On screen
    Visible,
    /// Tear-down requested, widget animating out
    Hiding,
    /// Destroyed by forced cleanup
    Cleaned,
}

impl OverlayPhase {
    /// Whether a widget exists for this overlay right now
    fn is_live(self) -> bool {
        matches!(
            self,
            OverlayPhase::Showing | OverlayPhase::Visible | OverlayPhase::Hiding
        )
    }
}

/// Boundary to the external widget layer.
///
/// The session core never touches widgets directly; the surrounding
/// application implements this trait and renders whatever the calls
/// describe.
pub trait OverlayHost: Send + Sync {
    /// Show the singleton busy indicator
    fn busy_shown(&self);
    /// Remove the busy indicator
    fn busy_hidden(&self);
    /// Create or update the countdown display with a value and opacity
    fn countdown_updated(&self, value: u32, opacity: f32);
    /// Destroy the countdown display
    fn countdown_removed(&self);
    /// Flash a short-lived hint at the user (e.g. "pick a style first")
    fn hint_shown(&self, message: &str);
    /// Show or hide the style selection controls
    fn style_controls_visible(&self, visible: bool);
}

/// Guarantees at most one busy overlay and one countdown overlay are alive,
/// with forced cleanup available on every exit path.
pub struct OverlayLifecycleManager {
    host: Arc<dyn OverlayHost>,
    busy: OverlayPhase,
    countdown: OverlayPhase,
    countdown_value: Option<u32>,
}

impl OverlayLifecycleManager {
    pub fn new(host: Arc<dyn OverlayHost>) -> Self {
        Self {
            host,
            busy: OverlayPhase::default(),
            countdown: OverlayPhase::default(),
            countdown_value: None,
        }
    }

    /// Show the busy indicator. Idempotent: a second call while visible
    /// changes nothing.
    pub fn show_busy(&mut self) {
        if self.busy.is_live() {
            return;
        }
        self.busy = OverlayPhase::Showing;
        self.host.busy_shown();
        self.busy = OverlayPhase::Visible;
    }

    /// Hide the busy indicator. Idempotent and safe without a prior
    /// `show_busy`.
    pub fn hide_busy(&mut self) {
        if !self.busy.is_live() {
            return;
        }
        self.busy = OverlayPhase::Hiding;
        self.host.busy_hidden();
        self.busy = OverlayPhase::Hidden;
    }

    /// Create the countdown display if absent and update its value, with
    /// the decaying visibility ramp (full opacity at 0).
    pub fn show_countdown(&mut self, value: u32) {
        if !self.countdown.is_live() {
            self.countdown = OverlayPhase::Showing;
        }
        self.countdown_value = Some(value);
        self.host.countdown_updated(value, countdown_opacity(value));
        self.countdown = OverlayPhase::Visible;
    }

    /// Destroy the countdown display through the normal path
    pub fn finish_countdown(&mut self) {
        if !self.countdown.is_live() {
            return;
        }
        self.countdown = OverlayPhase::Hiding;
        self.host.countdown_removed();
        self.countdown = OverlayPhase::Hidden;
        self.countdown_value = None;
    }

    /// Surface a transient user-facing hint
    pub fn show_hint(&self, message: &str) {
        self.host.hint_shown(message);
    }

    /// Show or hide the style selection controls
    pub fn set_style_controls_visible(&self, visible: bool) {
        self.host.style_controls_visible(visible);
    }

    /// Destroy every live overlay unconditionally, including mid-animation.
    /// Called on every session exit so no dangling overlay survives.
    pub fn force_cleanup(&mut self) {
        if self.busy.is_live() {
            self.host.busy_hidden();
            self.busy = OverlayPhase::Cleaned;
            debug!("Busy overlay force-cleaned");
        }
        if self.countdown.is_live() {
            self.host.countdown_removed();
            self.countdown = OverlayPhase::Cleaned;
            self.countdown_value = None;
            debug!("Countdown overlay force-cleaned");
        }
    }

    /// Whether the busy indicator is currently on screen
    pub fn busy_visible(&self) -> bool {
        self.busy.is_live()
    }

    /// Whether the countdown display is currently on screen
    pub fn countdown_visible(&self) -> bool {
        self.countdown.is_live()
    }

    /// The value the countdown display currently shows
    pub fn countdown_value(&self) -> Option<u32> {
        self.countdown_value
    }
}
