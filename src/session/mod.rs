// SPDX-License-Identifier: GPL-3.0-only

//! Session orchestration
//!
//! [`SessionController`] composes the countdown timer, the generation
//! worker, the overlay lifecycle manager and the background compositor into
//! the capture state machine. It is the only component with business logic:
//! UI events enter as method calls, background-task results enter as
//! [`SessionEvent`]s through [`SessionController::update`], and both are
//! applied serially on the controller thread.

mod handlers;
mod state;

pub use state::{Session, SessionEvent, SessionState};

use crate::compositor::BackgroundCompositor;
use crate::config::GeneratorConfig;
use crate::countdown::CountdownTimer;
use crate::frame::CameraFeed;
use crate::generation::GenerationBackend;
use crate::generation::worker::WorkerHandle;
use crate::overlay::{OverlayHost, OverlayLifecycleManager};
use crate::styles::{StyleCatalog, StyleId};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;

/// Drives one capture session from style selection through countdown,
/// remote generation and validation, and back to idle.
///
/// All collaborators are constructor-injected; the controller holds no
/// process-wide singletons and its teardown is tied to its own lifetime.
pub struct SessionController {
    session: Session,
    countdown: CountdownTimer,
    worker: Option<WorkerHandle>,
    overlays: OverlayLifecycleManager,
    compositor: Arc<BackgroundCompositor>,
    camera: Arc<dyn CameraFeed>,
    backend: Arc<dyn GenerationBackend>,
    catalog: Arc<StyleCatalog>,
    config: GeneratorConfig,
    events: UnboundedSender<SessionEvent>,
}

impl SessionController {
    /// Create a controller for a fresh session.
    ///
    /// `events` is the sending half of the channel the surrounding
    /// application drains into [`update`](Self::update); background tasks
    /// spawned by the controller deliver their results through it.
    pub fn new(
        camera: Arc<dyn CameraFeed>,
        overlay_host: Arc<dyn OverlayHost>,
        backend: Arc<dyn GenerationBackend>,
        catalog: Arc<StyleCatalog>,
        compositor: Arc<BackgroundCompositor>,
        config: GeneratorConfig,
        events: UnboundedSender<SessionEvent>,
    ) -> Self {
        Self {
            session: Session::new(),
            countdown: CountdownTimer::new(),
            worker: None,
            overlays: OverlayLifecycleManager::new(overlay_host),
            compositor,
            camera,
            backend,
            catalog,
            config,
            events,
        }
    }

    /// Current state machine position
    pub fn state(&self) -> SessionState {
        self.session.state
    }

    /// The style picked on the idle screen, if any
    pub fn selected_style(&self) -> Option<&StyleId> {
        self.session.selected_style.as_ref()
    }

    /// The session owned by this controller
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The overlay lifecycle manager, for inspecting overlay visibility
    pub fn overlays(&self) -> &OverlayLifecycleManager {
        &self.overlays
    }
}

impl Drop for SessionController {
    fn drop(&mut self) {
        self.countdown.stop();
    }
}
