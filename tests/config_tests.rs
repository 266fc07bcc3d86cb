// SPDX-License-Identifier: MPL-2.0

//! Integration tests for configuration and the style catalog

use photobooth::{GeneratorConfig, StyleCatalog, StyleId};
use std::time::Duration;

#[test]
fn test_config_default() {
    let config = GeneratorConfig::default();

    // Check sensible defaults
    assert!(
        !config.server_url.is_empty(),
        "Server URL should not be empty"
    );
    assert_eq!(config.timeout(), Duration::from_secs(30));
    assert!(
        config.poll_interval() < config.timeout(),
        "Poll interval must be shorter than the generation deadline"
    );
    assert!(!config.output_prefix.is_empty());
    assert!(
        config.input_filename.ends_with(".png"),
        "Input image is exchanged as PNG"
    );
    assert_eq!(config.archive_dir, None, "Archiving is opt-in");
}

#[test]
fn test_config_input_path_joins_exchange_dir() {
    let config = GeneratorConfig::default();
    assert_eq!(
        config.input_path(),
        config.exchange_dir.join(&config.input_filename)
    );
}

#[test]
fn test_config_json_round_trip() {
    let config = GeneratorConfig::default();
    let json = serde_json::to_string(&config).expect("serialize config");
    let parsed: GeneratorConfig = serde_json::from_str(&json).expect("parse config");
    assert_eq!(parsed, config);
}

#[test]
fn test_sampler_defaults_are_img2img_friendly() {
    let config = GeneratorConfig::default();
    assert!(
        config.sampler.denoise < 1.0,
        "Full denoise would discard the captured photo entirely"
    );
    assert!(config.sampler.steps > 0);
}

#[test]
fn test_style_catalog_from_json() {
    let json = r#"{"styles": {"anime": "anime style portrait"}}"#;
    let catalog = StyleCatalog::from_json(json).expect("valid catalog");
    assert_eq!(
        catalog.prompt(&StyleId::from("anime")),
        Some("anime style portrait")
    );
    assert!(!catalog.contains(&StyleId::from("missing")));
}

#[test]
fn test_style_catalog_rejects_malformed_json() {
    assert!(StyleCatalog::from_json("{not json").is_err());
}
