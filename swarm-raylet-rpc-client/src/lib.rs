// Copyright 2025 The Swarm Authors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//  http://www.apache.org/licenses/LICENSE-2.0

//! Raylet (node manager) RPC client.
//!
//! The raylet is the per-node supervisor owning all workers on its host and
//! the authoritative source for local-worker liveness. This layer issues a
//! single RPC against it: the `IsLocalWorkerDead` probe.

pub mod client;
pub mod traits;

pub use client::RayletRpcClient;
pub use traits::{RayletClient, RayletClientFactory};
