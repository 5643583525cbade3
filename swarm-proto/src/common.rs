// Copyright 2025 The Swarm Authors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//  http://www.apache.org/licenses/LICENSE-2.0

//! Core message types shared across services.

/// The network address of a worker process.
///
/// Two addresses with the same `worker_id` refer to the same peer; the
/// remaining fields are only consulted when the first client for that worker
/// is constructed.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Address {
    /// ID of the node (raylet) hosting the worker.
    #[prost(bytes = "vec", tag = "1")]
    pub node_id: Vec<u8>,
    #[prost(string, tag = "2")]
    pub ip_address: String,
    #[prost(int32, tag = "3")]
    pub port: i32,
    /// Globally unique ID of the worker process.
    #[prost(bytes = "vec", tag = "4")]
    pub worker_id: Vec<u8>,
}
