// SPDX-License-Identifier: MPL-2.0

//! Error types for the photo booth session core

use std::fmt;

/// Errors raised directly by user interaction with the session.
///
/// These are non-fatal and surfaced to the user as a transient hint
/// rather than propagated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The user pressed the shutter without picking a style first
    NoStyleSelected,
}

/// Failures of the remote generation round trip.
///
/// Every variant degrades to "no generated image" — the session still
/// reaches validation displaying the captured photo. None of these ever
/// cross a task boundary as a panic; the worker resolves them into a
/// [`GenerationResult`](crate::generation::GenerationResult).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// No artifact appeared in the output directory before the deadline
    Timeout,
    /// HTTP submission to the generation server failed
    Network(String),
    /// The server accepted the job but produced no readable artifact
    NoArtifact,
    /// The artifact exists but could not be decoded into a frame
    Decode(String),
    /// Reading or writing an exchange file failed
    Io(String),
    /// The worker was cancelled before completing
    Cancelled,
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::NoStyleSelected => write!(f, "No style selected"),
        }
    }
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationError::Timeout => write!(f, "Generation timed out"),
            GenerationError::Network(msg) => write!(f, "Network failure: {}", msg),
            GenerationError::NoArtifact => write!(f, "No output artifact produced"),
            GenerationError::Decode(msg) => write!(f, "Failed to decode artifact: {}", msg),
            GenerationError::Io(msg) => write!(f, "I/O error: {}", msg),
            GenerationError::Cancelled => write!(f, "Generation cancelled"),
        }
    }
}

impl std::error::Error for SessionError {}
impl std::error::Error for GenerationError {}

impl From<std::io::Error> for GenerationError {
    fn from(err: std::io::Error) -> Self {
        GenerationError::Io(err.to_string())
    }
}

impl From<image::ImageError> for GenerationError {
    fn from(err: image::ImageError) -> Self {
        GenerationError::Decode(err.to_string())
    }
}

impl From<reqwest::Error> for GenerationError {
    fn from(err: reqwest::Error) -> Self {
        GenerationError::Network(err.to_string())
    }
}
