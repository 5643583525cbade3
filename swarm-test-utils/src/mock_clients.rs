// Copyright 2025 The Swarm Authors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//  http://www.apache.org/licenses/LICENSE-2.0

//! Fake RPC clients for unit testing.
//!
//! These implement the client traits over scripted in-memory state so tests
//! can drive membership lookups and liveness probes without a network.

use std::collections::VecDeque;

use parking_lot::Mutex;
use tonic::Status;

use swarm_gcs_rpc_client::GcsRpc;
use swarm_proto::swarm::rpc;
use swarm_raylet_rpc_client::RayletClient;

/// A fake GCS whose node table is scripted by the test.
pub struct FakeGcsRpc {
    nodes: Mutex<Vec<rpc::GcsNodeInfo>>,
    num_get_all_calls: Mutex<usize>,
}

impl FakeGcsRpc {
    pub fn new() -> Self {
        Self {
            nodes: Mutex::new(Vec::new()),
            num_get_all_calls: Mutex::new(0),
        }
    }

    /// Add (or replace) a node record.
    pub fn add_node(&self, info: rpc::GcsNodeInfo) {
        let mut nodes = self.nodes.lock();
        nodes.retain(|n| n.node_id != info.node_id);
        nodes.push(info);
    }

    pub fn num_get_all_calls(&self) -> usize {
        *self.num_get_all_calls.lock()
    }
}

impl Default for FakeGcsRpc {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl GcsRpc for FakeGcsRpc {
    async fn get_all_node_info(
        &self,
        _req: rpc::GetAllNodeInfoRequest,
    ) -> Result<rpc::GetAllNodeInfoReply, Status> {
        *self.num_get_all_calls.lock() += 1;
        Ok(rpc::GetAllNodeInfoReply {
            node_info_list: self.nodes.lock().clone(),
        })
    }

    async fn check_alive(
        &self,
        req: rpc::CheckAliveRequest,
    ) -> Result<rpc::CheckAliveReply, Status> {
        let nodes = self.nodes.lock();
        let node_alive = req
            .node_ids
            .iter()
            .map(|id| {
                nodes
                    .iter()
                    .any(|n| &n.node_id == id && n.state() == rpc::GcsNodeState::Alive)
            })
            .collect();
        Ok(rpc::CheckAliveReply { node_alive })
    }
}

/// A fake raylet client with scripted liveness replies.
///
/// Without a queued reply, probes report the worker alive.
pub struct FakeRayletClient {
    requests: Mutex<VecDeque<rpc::IsLocalWorkerDeadRequest>>,
    replies: Mutex<VecDeque<Result<bool, Status>>>,
}

impl FakeRayletClient {
    pub fn new() -> Self {
        Self {
            requests: Mutex::new(VecDeque::new()),
            replies: Mutex::new(VecDeque::new()),
        }
    }

    /// Queue the outcome of the next probe.
    pub fn push_reply(&self, reply: Result<bool, Status>) {
        self.replies.lock().push_back(reply);
    }

    pub fn pop_request(&self) -> Option<rpc::IsLocalWorkerDeadRequest> {
        self.requests.lock().pop_front()
    }

    pub fn num_requests(&self) -> usize {
        self.requests.lock().len()
    }
}

impl Default for FakeRayletClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl RayletClient for FakeRayletClient {
    async fn is_local_worker_dead(
        &self,
        req: rpc::IsLocalWorkerDeadRequest,
    ) -> Result<rpc::IsLocalWorkerDeadReply, Status> {
        self.requests.lock().push_back(req);
        match self.replies.lock().pop_front() {
            Some(Ok(is_dead)) => Ok(rpc::IsLocalWorkerDeadReply { is_dead }),
            Some(Err(status)) => Err(status),
            None => Ok(rpc::IsLocalWorkerDeadReply { is_dead: false }),
        }
    }
}
