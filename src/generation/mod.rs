// SPDX-License-Identifier: GPL-3.0-only

//! Remote image generation
//!
//! The remote service is a prompt-graph server reached over HTTP with image
//! exchange through a shared filesystem. [`client`] owns the HTTP contract,
//! [`worker`] owns the background task that drives one generation attempt
//! end to end.

pub mod client;
pub mod worker;

pub use client::HttpGenerationClient;
pub use worker::{GenerationOutcome, WorkerHandle};

use crate::config::GeneratorConfig;
use crate::errors::GenerationError;
use crate::frame::Frame;
use async_trait::async_trait;

/// One generation request as the backend sees it: prompt text plus the
/// fixed parameters from configuration. The input image itself travels via
/// the filesystem exchange, referenced here by its fixed filename.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitRequest {
    /// Positive prompt resolved from the selected style
    pub prompt: String,
    /// Fixed negative prompt
    pub negative_prompt: String,
    /// Freshly randomized sampler seed
    pub seed: u64,
    /// Sampler steps
    pub steps: u32,
    /// Guidance scale
    pub cfg: f32,
    /// Sampler algorithm name
    pub sampler_name: String,
    /// Noise scheduler name
    pub scheduler: String,
    /// Denoise strength
    pub denoise: f32,
    /// Checkpoint model name
    pub checkpoint: String,
    /// Filename of the input image in the exchange directory
    pub input_filename: String,
    /// Prefix the server uses for output artifacts
    pub output_prefix: String,
}

impl SubmitRequest {
    /// Build a request from configuration with a fresh random seed
    pub fn new(config: &GeneratorConfig, prompt: String) -> Self {
        Self {
            prompt,
            negative_prompt: config.negative_prompt.clone(),
            seed: rand::random(),
            steps: config.sampler.steps,
            cfg: config.sampler.cfg,
            sampler_name: config.sampler.sampler_name.clone(),
            scheduler: config.sampler.scheduler.clone(),
            denoise: config.sampler.denoise,
            checkpoint: config.checkpoint.clone(),
            input_filename: config.input_filename.clone(),
            output_prefix: config.output_prefix.clone(),
        }
    }
}

/// Value type delivered across the worker boundary. Exactly one of `image`
/// and `error` is set; the worker never panics outward.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationResult {
    /// The decoded artifact on success
    pub image: Option<Frame>,
    /// The failure kind otherwise
    pub error: Option<GenerationError>,
}

impl GenerationResult {
    pub fn success(image: Frame) -> Self {
        Self {
            image: Some(image),
            error: None,
        }
    }

    pub fn failure(error: GenerationError) -> Self {
        Self {
            image: None,
            error: Some(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.image.is_some()
    }
}

/// Submission boundary to the remote generation service.
///
/// The production implementation is [`HttpGenerationClient`]; tests inject
/// fakes that fabricate artifacts directly.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Submit a generation job, returning the server-assigned job id
    async fn submit(&self, request: &SubmitRequest) -> Result<String, GenerationError>;
}
