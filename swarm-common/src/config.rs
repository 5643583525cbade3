// Copyright 2025 The Swarm Authors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//  http://www.apache.org/licenses/LICENSE-2.0

//! Swarm configuration.
//!
//! Config values are a plain struct with defaults and support:
//! - Base64-encoded JSON config string from the launcher
//! - Environment variable overrides: `SWARM_<field_name>`

use std::sync::OnceLock;

/// Global Swarm configuration singleton.
static SWARM_CONFIG: OnceLock<SwarmConfig> = OnceLock::new();

/// Get the global SwarmConfig. Panics if not initialized.
pub fn swarm_config() -> &'static SwarmConfig {
    SWARM_CONFIG
        .get()
        .expect("SwarmConfig not initialized. Call initialize_config() first.")
}

/// Initialize the global SwarmConfig from a base64-encoded JSON string.
/// Returns an error if already initialized.
pub fn initialize_config(config_str: Option<&str>) -> Result<(), String> {
    let config = match config_str {
        Some(s) if !s.is_empty() => SwarmConfig::from_base64_json(s)?,
        _ => SwarmConfig::default(),
    };
    SWARM_CONFIG
        .set(config)
        .map_err(|_| "SwarmConfig already initialized".to_string())
}

/// Swarm configuration parameters.
#[derive(Debug, Clone)]
pub struct SwarmConfig {
    // ─── gRPC client ──────────────────────────────────────────
    /// Maximum retry attempts for a transient RPC failure.
    pub grpc_client_max_retries: u32,
    /// Initial retry delay in milliseconds.
    pub grpc_client_initial_retry_delay_ms: u64,
    /// Cap on the exponential retry delay in milliseconds.
    pub grpc_client_max_retry_delay_ms: u64,
    /// How long a server may stay unavailable before a call is abandoned.
    pub grpc_server_unavailable_timeout_seconds: u64,
    /// Maximum bytes of in-flight requests before new ones are rejected.
    pub grpc_client_max_pending_bytes: u64,

    // ─── GCS subscriber ───────────────────────────────────────
    /// Long-poll timeout for pubsub subscriber polls.
    pub gcs_subscriber_poll_timeout_seconds: u64,
}

impl Default for SwarmConfig {
    fn default() -> Self {
        Self {
            grpc_client_max_retries: 3,
            grpc_client_initial_retry_delay_ms: 100,
            grpc_client_max_retry_delay_ms: 5_000,
            grpc_server_unavailable_timeout_seconds: 60,
            grpc_client_max_pending_bytes: 100 * 1024 * 1024,
            gcs_subscriber_poll_timeout_seconds: 30,
        }
    }
}

impl SwarmConfig {
    /// Parse from base64-encoded JSON (as sent by the launcher).
    pub fn from_base64_json(b64: &str) -> Result<Self, String> {
        let decoded = base64::Engine::decode(&base64::engine::general_purpose::STANDARD, b64)
            .map_err(|e| format!("base64 decode error: {e}"))?;
        let json_str =
            String::from_utf8(decoded).map_err(|e| format!("UTF-8 decode error: {e}"))?;
        Self::from_json(&json_str)
    }

    /// Parse from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, String> {
        let map: serde_json::Map<String, serde_json::Value> =
            serde_json::from_str(json).map_err(|e| format!("JSON parse error: {e}"))?;

        let mut config = Self::default();

        // Apply JSON overrides
        macro_rules! set_field {
            ($field:ident, u32) => {
                if let Some(v) = map.get(stringify!($field)).and_then(|v| v.as_u64()) {
                    config.$field = v as u32;
                }
            };
            ($field:ident, u64) => {
                if let Some(v) = map.get(stringify!($field)).and_then(|v| v.as_u64()) {
                    config.$field = v;
                }
            };
        }

        set_field!(grpc_client_max_retries, u32);
        set_field!(grpc_client_initial_retry_delay_ms, u64);
        set_field!(grpc_client_max_retry_delay_ms, u64);
        set_field!(grpc_server_unavailable_timeout_seconds, u64);
        set_field!(grpc_client_max_pending_bytes, u64);
        set_field!(gcs_subscriber_poll_timeout_seconds, u64);

        // Apply environment variable overrides (SWARM_<NAME>)
        config.apply_env_overrides();

        Ok(config)
    }

    /// Apply environment variable overrides of the form `SWARM_<NAME>`.
    fn apply_env_overrides(&mut self) {
        macro_rules! env_override {
            ($field:ident, u32) => {
                let env_key = concat!("SWARM_", stringify!($field));
                if let Ok(val) = std::env::var(env_key) {
                    if let Ok(v) = val.parse::<u32>() {
                        self.$field = v;
                    }
                }
            };
            ($field:ident, u64) => {
                let env_key = concat!("SWARM_", stringify!($field));
                if let Ok(val) = std::env::var(env_key) {
                    if let Ok(v) = val.parse::<u64>() {
                        self.$field = v;
                    }
                }
            };
        }

        env_override!(grpc_client_max_retries, u32);
        env_override!(grpc_client_initial_retry_delay_ms, u64);
        env_override!(grpc_client_max_retry_delay_ms, u64);
        env_override!(grpc_server_unavailable_timeout_seconds, u64);
        env_override!(grpc_client_max_pending_bytes, u64);
        env_override!(gcs_subscriber_poll_timeout_seconds, u64);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SwarmConfig::default();
        assert_eq!(config.grpc_client_max_retries, 3);
        assert_eq!(config.grpc_server_unavailable_timeout_seconds, 60);
        assert_eq!(config.grpc_client_max_pending_bytes, 100 * 1024 * 1024);
    }

    #[test]
    fn test_json_parse() {
        let json = r#"{"grpc_client_max_retries": 7, "gcs_subscriber_poll_timeout_seconds": 5}"#;
        let config = SwarmConfig::from_json(json).unwrap();
        assert_eq!(config.grpc_client_max_retries, 7);
        assert_eq!(config.gcs_subscriber_poll_timeout_seconds, 5);
        // Untouched fields keep their defaults
        assert_eq!(config.grpc_client_initial_retry_delay_ms, 100);
    }

    #[test]
    fn test_json_parse_error() {
        assert!(SwarmConfig::from_json("not json").is_err());
    }

    #[test]
    fn test_base64_json_roundtrip() {
        let json = r#"{"grpc_client_max_retry_delay_ms": 250}"#;
        let b64 = base64::Engine::encode(&base64::engine::general_purpose::STANDARD, json);
        let config = SwarmConfig::from_base64_json(&b64).unwrap();
        assert_eq!(config.grpc_client_max_retry_delay_ms, 250);
    }

    #[test]
    fn test_invalid_base64() {
        assert!(SwarmConfig::from_base64_json("!!!not-base64!!!").is_err());
    }
}
