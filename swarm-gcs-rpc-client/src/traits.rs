// Copyright 2025 The Swarm Authors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//  http://www.apache.org/licenses/LICENSE-2.0

//! Async trait for GCS client, enabling both real and mock implementations.

use swarm_proto::swarm::rpc;
use tonic::Status;

/// Async trait for the GCS RPC operations this layer consumes.
///
/// Implement this trait for real gRPC clients (`GcsRpcClient`) and
/// test fakes. All methods return `Result<Reply, Status>`.
#[async_trait::async_trait]
pub trait GcsRpc: Send + Sync {
    async fn get_all_node_info(
        &self,
        req: rpc::GetAllNodeInfoRequest,
    ) -> Result<rpc::GetAllNodeInfoReply, Status>;
    async fn check_alive(
        &self,
        req: rpc::CheckAliveRequest,
    ) -> Result<rpc::CheckAliveReply, Status>;
}
