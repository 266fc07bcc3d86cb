// SPDX-License-Identifier: GPL-3.0-only

//! HTTP client for the prompt-graph generation server

use super::{GenerationBackend, SubmitRequest};
use crate::errors::GenerationError;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, info};

#[derive(Debug, Deserialize)]
struct PromptResponse {
    prompt_id: String,
}

/// Talks to the generation server's `/prompt` endpoint.
///
/// Each submission instantiates the fixed workflow template with the
/// request's prompt text, seed and sampler parameters, then posts it as
/// JSON. Artifact retrieval is not HTTP — the server writes results to the
/// shared output directory, which the worker polls.
#[derive(Debug, Clone)]
pub struct HttpGenerationClient {
    client: Client,
    server_url: String,
    client_id: String,
}

impl HttpGenerationClient {
    pub fn new(server_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            server_url: server_url.into(),
            client_id: uuid::Uuid::new_v4().to_string(),
        }
    }

    /// Instantiate the workflow template for one request.
    ///
    /// Node layout: checkpoint -> prompt encoders -> image load/encode ->
    /// sampler -> decode -> save. Node ids are arbitrary but stable so the
    /// server can cache partial executions across submissions.
    fn prompt_graph(&self, request: &SubmitRequest) -> Value {
        json!({
            "1": {
                "class_type": "CheckpointLoaderSimple",
                "inputs": { "ckpt_name": request.checkpoint }
            },
            "2": {
                "class_type": "CLIPTextEncode",
                "inputs": { "text": request.prompt, "clip": ["1", 1] }
            },
            "3": {
                "class_type": "CLIPTextEncode",
                "inputs": { "text": request.negative_prompt, "clip": ["1", 1] }
            },
            "4": {
                "class_type": "LoadImage",
                "inputs": { "image": request.input_filename }
            },
            "5": {
                "class_type": "VAEEncode",
                "inputs": { "pixels": ["4", 0], "vae": ["1", 2] }
            },
            "6": {
                "class_type": "KSampler",
                "inputs": {
                    "model": ["1", 0],
                    "positive": ["2", 0],
                    "negative": ["3", 0],
                    "latent_image": ["5", 0],
                    "seed": request.seed,
                    "steps": request.steps,
                    "cfg": request.cfg,
                    "sampler_name": request.sampler_name,
                    "scheduler": request.scheduler,
                    "denoise": request.denoise
                }
            },
            "7": {
                "class_type": "VAEDecode",
                "inputs": { "samples": ["6", 0], "vae": ["1", 2] }
            },
            "8": {
                "class_type": "SaveImage",
                "inputs": { "images": ["7", 0], "filename_prefix": request.output_prefix }
            }
        })
    }
}

#[async_trait]
impl GenerationBackend for HttpGenerationClient {
    async fn submit(&self, request: &SubmitRequest) -> Result<String, GenerationError> {
        let body = json!({
            "prompt": self.prompt_graph(request),
            "client_id": self.client_id,
        });

        debug!(seed = request.seed, "Submitting generation request");
        let response = self
            .client
            .post(format!("{}/prompt", self.server_url))
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(GenerationError::Network(format!(
                "server returned {}",
                response.status()
            )));
        }

        let parsed: PromptResponse = response.json().await?;
        info!(job_id = %parsed.prompt_id, "Generation job accepted");
        Ok(parsed.prompt_id)
    }
}
