// SPDX-License-Identifier: GPL-3.0-only

//! Shared test doubles for the session and worker integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use photobooth::errors::GenerationError;
use photobooth::frame::{CameraFeed, Frame};
use photobooth::generation::{GenerationBackend, SubmitRequest};
use photobooth::overlay::OverlayHost;
use photobooth::{GeneratorConfig, StyleCatalog};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Route test logs through the test harness; `RUST_LOG` controls the level
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

/// Camera feed that always returns the same frame
pub struct TestCamera {
    pub frame: Frame,
}

impl TestCamera {
    pub fn new() -> Self {
        Self {
            frame: Frame::solid(8, 8, [50, 60, 70, 255]),
        }
    }
}

impl CameraFeed for TestCamera {
    fn latest_frame(&self) -> Option<Frame> {
        Some(self.frame.clone())
    }
}

/// Camera feed with no frame available
pub struct NoFrameCamera;

impl CameraFeed for NoFrameCamera {
    fn latest_frame(&self) -> Option<Frame> {
        None
    }
}

/// Overlay host that records what the core asked the widget layer to do
#[derive(Default)]
pub struct RecordingHost {
    state: Mutex<HostState>,
}

#[derive(Default)]
pub struct HostState {
    pub busy_visible: bool,
    pub countdown_values: Vec<u32>,
    pub countdown_present: bool,
    pub hints: Vec<String>,
    pub style_controls_visible: Option<bool>,
}

impl RecordingHost {
    pub fn busy_visible(&self) -> bool {
        self.state.lock().unwrap().busy_visible
    }

    pub fn countdown_present(&self) -> bool {
        self.state.lock().unwrap().countdown_present
    }

    pub fn countdown_values(&self) -> Vec<u32> {
        self.state.lock().unwrap().countdown_values.clone()
    }

    pub fn hints(&self) -> Vec<String> {
        self.state.lock().unwrap().hints.clone()
    }

    pub fn style_controls_visible(&self) -> Option<bool> {
        self.state.lock().unwrap().style_controls_visible
    }
}

impl OverlayHost for RecordingHost {
    fn busy_shown(&self) {
        self.state.lock().unwrap().busy_visible = true;
    }

    fn busy_hidden(&self) {
        self.state.lock().unwrap().busy_visible = false;
    }

    fn countdown_updated(&self, value: u32, _opacity: f32) {
        let mut state = self.state.lock().unwrap();
        state.countdown_present = true;
        state.countdown_values.push(value);
    }

    fn countdown_removed(&self) {
        self.state.lock().unwrap().countdown_present = false;
    }

    fn hint_shown(&self, message: &str) {
        self.state.lock().unwrap().hints.push(message.to_string());
    }

    fn style_controls_visible(&self, visible: bool) {
        self.state.lock().unwrap().style_controls_visible = Some(visible);
    }
}

/// Backend double: either fails the submission, fabricates an artifact in
/// the output directory, or accepts the job and produces nothing (so the
/// worker runs into its poll timeout).
#[derive(Default)]
pub struct FakeBackend {
    pub artifact: Option<(PathBuf, Vec<u8>)>,
    pub submit_error: Option<GenerationError>,
    pub requests: Mutex<Vec<SubmitRequest>>,
}

impl FakeBackend {
    /// Accepts the job but never produces an artifact
    pub fn silent() -> Self {
        Self::default()
    }

    /// Writes `bytes` to `path` when the job is submitted
    pub fn producing(path: PathBuf, bytes: Vec<u8>) -> Self {
        Self {
            artifact: Some((path, bytes)),
            ..Self::default()
        }
    }

    /// Fails every submission with the given error
    pub fn failing(error: GenerationError) -> Self {
        Self {
            submit_error: Some(error),
            ..Self::default()
        }
    }

    pub fn requests(&self) -> Vec<SubmitRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerationBackend for FakeBackend {
    async fn submit(&self, request: &SubmitRequest) -> Result<String, GenerationError> {
        self.requests.lock().unwrap().push(request.clone());
        if let Some(error) = &self.submit_error {
            return Err(error.clone());
        }
        if let Some((path, bytes)) = &self.artifact {
            std::fs::write(path, bytes).expect("fake backend writes its artifact");
        }
        Ok("job-0001".to_string())
    }
}

/// Exchange and output directories plus a config pointing at them
pub struct ExchangeDirs {
    pub config: GeneratorConfig,
    _input: TempDir,
    _output: TempDir,
}

impl ExchangeDirs {
    pub fn new() -> Self {
        let input = TempDir::new().expect("input tempdir");
        let output = TempDir::new().expect("output tempdir");
        let config = GeneratorConfig {
            exchange_dir: input.path().to_path_buf(),
            output_dir: output.path().to_path_buf(),
            ..GeneratorConfig::default()
        };
        Self {
            config,
            _input: input,
            _output: output,
        }
    }

    /// Path a fabricated artifact should be written to
    pub fn artifact_path(&self, name: &str) -> PathBuf {
        self.config.output_dir.join(name)
    }

    /// PNG bytes for a small valid artifact
    pub fn artifact_png() -> Vec<u8> {
        Frame::solid(6, 6, [200, 40, 40, 255])
            .encode_png()
            .expect("encode artifact fixture")
    }

    pub fn catalog() -> Arc<StyleCatalog> {
        Arc::new(StyleCatalog::from_entries([
            ("anime", "anime style portrait, vibrant colors"),
            ("noir", "film noir photograph, dramatic lighting"),
        ]))
    }
}
