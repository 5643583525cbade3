// Copyright 2025 The Swarm Authors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//  http://www.apache.org/licenses/LICENSE-2.0

//! Async trait for raylet (NodeManager) client.

use std::sync::Arc;

use swarm_proto::swarm::rpc;
use tonic::Status;

/// Async trait for Raylet (NodeManager) RPC operations.
#[async_trait::async_trait]
pub trait RayletClient: Send + Sync {
    /// Ask the raylet whether one of its local workers has died.
    async fn is_local_worker_dead(
        &self,
        req: rpc::IsLocalWorkerDeadRequest,
    ) -> Result<rpc::IsLocalWorkerDeadReply, Status>;
}

/// Builds a raylet client for a node manager endpoint.
///
/// Factories must not block: implementations build a lazily-connecting stub.
pub type RayletClientFactory = Arc<dyn Fn(&str, u16) -> Arc<dyn RayletClient> + Send + Sync>;
