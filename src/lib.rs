// SPDX-License-Identifier: MPL-2.0

//! Photo booth session core
//!
//! This library provides the session orchestration for an interactive kiosk
//! photo booth: it captures a photo, sends it to a remote image-generation
//! service and displays the result, cycling between an idle screensaver and
//! the active capture flow.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`session`]: The capture state machine and its controller
//! - [`countdown`]: Cancellable capture countdown task
//! - [`generation`]: Remote generation client and background worker
//! - [`compositor`]: Prioritized background image slots
//! - [`overlay`]: Busy and countdown overlay lifecycles
//! - [`styles`]: Read-only style catalog
//! - [`config`]: Generation service configuration
//!
//! The surrounding application owns windowing, widgets and the live camera
//! pipeline; it reaches this core through [`SessionController`] method
//! calls and drains the session event channel back into
//! [`SessionController::update`].

pub mod compositor;
pub mod config;
pub mod constants;
pub mod countdown;
pub mod errors;
pub mod frame;
pub mod generation;
pub mod overlay;
pub mod session;
pub mod styles;

// Re-export commonly used types
pub use compositor::{BackgroundCompositor, BackgroundSource};
pub use config::{GeneratorConfig, SamplerSettings};
pub use countdown::{CountdownEvent, CountdownTimer};
pub use errors::{GenerationError, SessionError};
pub use frame::{CameraFeed, Frame};
pub use generation::{GenerationBackend, GenerationResult, HttpGenerationClient, SubmitRequest};
pub use overlay::{OverlayHost, OverlayLifecycleManager};
pub use session::{SessionController, SessionEvent, SessionState};
pub use styles::{StyleCatalog, StyleId};
