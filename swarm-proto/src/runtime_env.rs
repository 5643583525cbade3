// Copyright 2025 The Swarm Authors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//  http://www.apache.org/licenses/LICENSE-2.0

//! Runtime environment message types.
//!
//! These flow over pooled worker connections; the connection layer never
//! interprets them.

/// Outcome of a runtime-env operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum RuntimeEnvStatus {
    Ok = 0,
    Failed = 1,
}

/// Options controlling how a runtime env is created.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RuntimeEnvConfig {
    /// Seconds to wait for setup before failing; -1 means no timeout.
    #[prost(int32, tag = "1")]
    pub setup_timeout_seconds: i32,
    #[prost(bool, tag = "2")]
    pub eager_install: bool,
    #[prost(string, repeated, tag = "3")]
    pub log_files: Vec<String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetOrCreateRuntimeEnvRequest {
    #[prost(string, tag = "1")]
    pub serialized_runtime_env: String,
    #[prost(message, optional, tag = "2")]
    pub runtime_env_config: Option<RuntimeEnvConfig>,
    #[prost(bytes = "vec", tag = "3")]
    pub job_id: Vec<u8>,
    #[prost(string, tag = "4")]
    pub source_process: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetOrCreateRuntimeEnvReply {
    #[prost(enumeration = "RuntimeEnvStatus", tag = "1")]
    pub status: i32,
    #[prost(string, tag = "2")]
    pub error_message: String,
    #[prost(string, tag = "3")]
    pub serialized_runtime_env_context: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DeleteRuntimeEnvIfPossibleRequest {
    #[prost(string, tag = "1")]
    pub serialized_runtime_env: String,
    #[prost(string, tag = "2")]
    pub source_process: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DeleteRuntimeEnvIfPossibleReply {
    #[prost(enumeration = "RuntimeEnvStatus", tag = "1")]
    pub status: i32,
    #[prost(string, tag = "2")]
    pub error_message: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetRuntimeEnvsInfoRequest {
    /// Maximum number of states to return; 0 means no limit.
    #[prost(int64, tag = "1")]
    pub limit: i64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RuntimeEnvState {
    #[prost(string, tag = "1")]
    pub runtime_env: String,
    #[prost(int64, tag = "2")]
    pub ref_cnt: i64,
    #[prost(bool, tag = "3")]
    pub success: bool,
    #[prost(string, tag = "4")]
    pub error: String,
    #[prost(int64, tag = "5")]
    pub creation_time_ms: i64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetRuntimeEnvsInfoReply {
    #[prost(message, repeated, tag = "1")]
    pub states: Vec<RuntimeEnvState>,
    #[prost(int64, tag = "2")]
    pub total: i64,
}
