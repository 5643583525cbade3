// Copyright 2025 The Swarm Authors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//  http://www.apache.org/licenses/LICENSE-2.0

//! Proto message builders generating realistic messages for tests.

use swarm_common::id::{NodeID, WorkerID};
use swarm_proto::swarm::rpc;

/// Generate an alive GcsNodeInfo for the given node.
pub fn gen_node_info(node_id: &NodeID, address: &str, port: u32) -> rpc::GcsNodeInfo {
    rpc::GcsNodeInfo {
        node_id: node_id.binary(),
        state: rpc::GcsNodeState::Alive as i32,
        node_manager_address: address.to_string(),
        node_manager_port: port as i32,
        node_name: format!("node-{}", &node_id.hex()[..8]),
    }
}

/// Generate a worker address record.
pub fn gen_worker_address(
    worker_id: &WorkerID,
    node_id: &NodeID,
    ip: &str,
    port: i32,
) -> rpc::Address {
    rpc::Address {
        node_id: node_id.binary(),
        ip_address: ip.to_string(),
        port,
        worker_id: worker_id.binary(),
    }
}

/// Generate an address for a random worker on a random node.
pub fn gen_random_worker_address() -> rpc::Address {
    gen_worker_address(
        &WorkerID::from_random(),
        &NodeID::from_random(),
        "127.0.0.1",
        7199,
    )
}
