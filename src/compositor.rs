// SPDX-License-Identifier: GPL-3.0-only

//! Background compositor
//!
//! Holds the four candidate images that compete for the kiosk background —
//! the generated result, the captured photo, the live camera preview and the
//! idle screensaver tile — and decides which one is on screen. All slot
//! access goes through a single mutex; there is no nested locking anywhere,
//! so lock ordering cannot become a problem.

use crate::constants::BACKGROUND_GRADIENT_FRACTION;
use crate::frame::Frame;
use std::sync::Mutex;

/// Which slot currently provides the on-screen background
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackgroundSource {
    Generated,
    Captured,
    Camera,
    Idle,
}

/// The four prioritized image slots plus the derived active source
#[derive(Debug, Default)]
struct BackgroundSlots {
    generated: Option<Frame>,
    captured: Option<Frame>,
    camera: Option<Frame>,
    idle: Option<Frame>,
    active: Option<BackgroundSource>,
}

impl BackgroundSlots {
    /// Recompute the active source from the non-empty slots, highest
    /// priority first: generated > captured > camera > idle.
    fn recompute(&mut self) {
        self.active = if self.generated.is_some() {
            Some(BackgroundSource::Generated)
        } else if self.captured.is_some() {
            Some(BackgroundSource::Captured)
        } else if self.camera.is_some() {
            Some(BackgroundSource::Camera)
        } else if self.idle.is_some() {
            Some(BackgroundSource::Idle)
        } else {
            None
        };
    }

    fn active_frame(&self) -> Option<&Frame> {
        match self.active? {
            BackgroundSource::Generated => self.generated.as_ref(),
            BackgroundSource::Captured => self.captured.as_ref(),
            BackgroundSource::Camera => self.camera.as_ref(),
            BackgroundSource::Idle => self.idle.as_ref(),
        }
    }
}

/// Thread-safe holder of the prioritized background slots
#[derive(Debug, Default)]
pub struct BackgroundCompositor {
    slots: Mutex<BackgroundSlots>,
}

macro_rules! slot_accessors {
    ($set:ident, $clear:ident, $field:ident) => {
        pub fn $set(&self, frame: Frame) {
            let mut slots = self.lock();
            slots.$field = Some(frame);
            slots.recompute();
        }

        pub fn $clear(&self) {
            let mut slots = self.lock();
            slots.$field = None;
            slots.recompute();
        }
    };
}

impl BackgroundCompositor {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BackgroundSlots> {
        // Slot state stays consistent even if a panic poisoned the lock
        self.slots.lock().unwrap_or_else(|e| e.into_inner())
    }

    slot_accessors!(set_generated, clear_generated, generated);
    slot_accessors!(set_captured, clear_captured, captured);
    slot_accessors!(set_camera, clear_camera, camera);
    slot_accessors!(set_idle, clear_idle, idle);

    /// The slot currently providing the background, if any
    pub fn active_source(&self) -> Option<BackgroundSource> {
        self.lock().active
    }

    /// A freshly post-processed copy of the active background, or `None`
    /// if every slot is empty.
    ///
    /// The post-processing — a bottom-aligned darkening gradient over the
    /// lowest fifth of the image — runs on every call so the returned copy
    /// never aliases slot storage.
    pub fn get_background(&self) -> Option<Frame> {
        let mut frame = self.lock().active_frame().cloned()?;
        apply_bottom_gradient(&mut frame);
        Some(frame)
    }
}

/// Darken the bottom of the frame with a vertical gradient, alpha ramping
/// 0 at the top of the band to 255 at the last row.
fn apply_bottom_gradient(frame: &mut Frame) {
    let band = (frame.height as f32 * BACKGROUND_GRADIENT_FRACTION).round() as u32;
    if band == 0 || frame.width == 0 {
        return;
    }
    let start = frame.height - band;
    let denom = band.saturating_sub(1).max(1) as f32;
    for y in start..frame.height {
        let alpha = if band == 1 {
            255.0
        } else {
            (y - start) as f32 / denom * 255.0
        };
        let keep = 1.0 - alpha / 255.0;
        let row = (y * frame.width * 4) as usize;
        for x in 0..frame.width as usize {
            let px = row + x * 4;
            // Composite black over the pixel; alpha channel untouched
            frame.data[px] = (frame.data[px] as f32 * keep) as u8;
            frame.data[px + 1] = (frame.data[px + 1] as f32 * keep) as u8;
            frame.data[px + 2] = (frame.data[px + 2] as f32 * keep) as u8;
        }
    }
}
