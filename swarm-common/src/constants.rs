// Copyright 2025 The Swarm Authors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//  http://www.apache.org/licenses/LICENSE-2.0

//! Shared constants.

/// Length of Swarm full-length UniqueIDs in bytes.
pub const UNIQUE_ID_SIZE: usize = 28;

/// Swarm version string.
pub const SWARM_VERSION: &str = "0.1.0";

/// gRPC metadata key carrying the cluster identity on every outgoing call.
pub const CLUSTER_ID_METADATA_KEY: &str = "x-swarm-cluster-id";

/// gRPC metadata key carrying the per-call request id.
pub const REQUEST_ID_METADATA_KEY: &str = "x-swarm-request-id";
