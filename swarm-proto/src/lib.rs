// Copyright 2025 The Swarm Authors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//  http://www.apache.org/licenses/LICENSE-2.0

//! Protobuf and gRPC types for Swarm.
//!
//! This crate contains the `swarm.rpc` message types and tonic client stubs
//! for the services the worker-side RPC layer talks to. The structs are
//! hand-maintained prost derives; the field attributes pin the wire tags, so
//! the encoding is identical to compiler output for the equivalent schema.
//! No server stubs live here — this layer only ever acts as a client.

pub mod common;
pub mod gcs;
pub mod node_manager;
pub mod pubsub;
pub mod runtime_env;
pub mod worker;

/// All Swarm protobuf types organized by package.
pub mod swarm {
    /// Main RPC types (package `swarm.rpc`).
    pub mod rpc {
        pub use crate::common::*;
        pub use crate::gcs::*;
        pub use crate::node_manager::*;
        pub use crate::pubsub::*;
        pub use crate::runtime_env::*;
        pub use crate::worker::*;
    }
}

// Re-export the main namespace for convenience
pub use swarm::rpc;
