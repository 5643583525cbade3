// Copyright 2025 The Swarm Authors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//  http://www.apache.org/licenses/LICENSE-2.0

//! Shared test helpers for Swarm crates.

use swarm_common::id::*;

pub mod mock_clients;
pub mod proto_builders;
pub mod wait;

/// Initialize tracing for tests.
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("debug")
        .try_init();
}

/// Create a random JobID for testing.
pub fn random_job_id() -> JobID {
    JobID::from_int(rand::random::<u16>() as u32 + 1)
}

/// Create a random WorkerID for testing.
pub fn random_worker_id() -> WorkerID {
    WorkerID::from_random()
}

/// Create a random NodeID for testing.
pub fn random_node_id() -> NodeID {
    NodeID::from_random()
}
