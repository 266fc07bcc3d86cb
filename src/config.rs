// SPDX-License-Identifier: GPL-3.0-only

use crate::constants::{ARTIFACT_POLL_INTERVAL, GENERATION_TIMEOUT, NEGATIVE_PROMPT};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Fixed sampling parameters sent with every generation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplerSettings {
    /// Number of sampling steps
    pub steps: u32,
    /// Classifier-free guidance scale
    pub cfg: f32,
    /// Sampler algorithm name
    pub sampler_name: String,
    /// Noise scheduler name
    pub scheduler: String,
    /// Denoise strength; below 1.0 keeps the captured photo recognizable
    pub denoise: f32,
}

impl Default for SamplerSettings {
    fn default() -> Self {
        Self {
            steps: 20,
            cfg: 7.0,
            sampler_name: "euler".to_string(),
            scheduler: "normal".to_string(),
            denoise: 0.75,
        }
    }
}

/// Configuration for the remote generation service boundary.
///
/// The service is a prompt-graph server reached over HTTP, with image
/// exchange through a shared filesystem: the captured photo is written to
/// `exchange_dir` and the finished artifact appears under `output_dir`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Base URL of the generation server, e.g. `http://127.0.0.1:8188`
    pub server_url: String,
    /// Directory the server reads input images from
    pub exchange_dir: PathBuf,
    /// Directory the server writes finished artifacts to
    pub output_dir: PathBuf,
    /// Fixed filename the input image is written under
    pub input_filename: String,
    /// Filename prefix the server is asked to use for artifacts
    pub output_prefix: String,
    /// Checkpoint model loaded by the prompt graph
    pub checkpoint: String,
    /// Generation deadline in seconds
    pub timeout_secs: u64,
    /// Artifact poll interval in milliseconds
    pub poll_interval_ms: u64,
    /// Fixed sampling parameters
    pub sampler: SamplerSettings,
    /// Negative prompt applied to every request
    pub negative_prompt: String,
    /// Directory accepted results are archived to; `None` disables archiving
    #[serde(default)]
    pub archive_dir: Option<PathBuf>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:8188".to_string(),
            exchange_dir: PathBuf::from("/var/lib/photobooth/input"),
            output_dir: PathBuf::from("/var/lib/photobooth/output"),
            input_filename: "booth_capture.png".to_string(),
            output_prefix: "booth_result".to_string(),
            checkpoint: "sd_xl_base_1.0.safetensors".to_string(),
            timeout_secs: GENERATION_TIMEOUT.as_secs(),
            poll_interval_ms: ARTIFACT_POLL_INTERVAL.as_millis() as u64,
            sampler: SamplerSettings::default(),
            negative_prompt: NEGATIVE_PROMPT.to_string(),
            archive_dir: None,
        }
    }
}

impl GeneratorConfig {
    /// Generation deadline as a [`Duration`]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Artifact poll interval as a [`Duration`]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Full path of the exchange file the input image is written to
    pub fn input_path(&self) -> PathBuf {
        self.exchange_dir.join(&self.input_filename)
    }
}
