// SPDX-License-Identifier: GPL-3.0-only

//! Application-wide constants

use std::time::Duration;

/// Number the capture countdown starts from
pub const COUNTDOWN_START: u32 = 3;

/// Deadline for the remote generation round trip
pub const GENERATION_TIMEOUT: Duration = Duration::from_secs(30);

/// Interval between polls of the generation output directory
pub const ARTIFACT_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// How long a cancelled generation worker is given to wind down before
/// the controller abandons it with a warning
pub const WORKER_STOP_GRACE: Duration = Duration::from_secs(2);

/// Fraction of the image height covered by the bottom darkening gradient
/// applied by the background compositor
pub const BACKGROUND_GRADIENT_FRACTION: f32 = 0.2;

/// Negative prompt sent with every generation request
pub const NEGATIVE_PROMPT: &str =
    "blurry, deformed, distorted, disfigured, low quality, worst quality, watermark, text";

/// Opacity of the countdown overlay for a given displayed value.
///
/// Full opacity when the counter reaches 0, decaying for higher values so
/// the overlay fades in toward the shutter moment.
pub fn countdown_opacity(value: u32) -> f32 {
    1.0 / (1.0 + value as f32 * 0.5)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_countdown_opacity_full_at_zero() {
        assert_eq!(countdown_opacity(0), 1.0);
    }

    #[test]
    fn test_countdown_opacity_decays() {
        let mut prev = f32::MAX;
        for value in 0..=5 {
            let opacity = countdown_opacity(value);
            assert!(opacity > 0.0 && opacity <= 1.0);
            assert!(
                opacity < prev || value == 0,
                "Opacity should decay as the displayed value grows"
            );
            prev = opacity;
        }
    }
}
