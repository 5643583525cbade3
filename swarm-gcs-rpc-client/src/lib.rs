// Copyright 2025 The Swarm Authors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//  http://www.apache.org/licenses/LICENSE-2.0

//! GCS client for Swarm workers.
//!
//! The GCS (global control store) is the authoritative, eventually-consistent
//! view of cluster membership. This crate provides the RPC trait and real
//! client, the local node-info cache fed by the node-change subscription, and
//! the long-poll pubsub subscriber that delivers change notifications.

pub mod client;
pub mod node_accessor;
pub mod subscriber;
pub mod traits;

pub use client::GcsRpcClient;
pub use node_accessor::{GcsClient, NodeInfoAccessor};
pub use subscriber::GcsSubscriberClient;
pub use traits::GcsRpc;
