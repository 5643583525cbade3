// Copyright 2025 The Swarm Authors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//  http://www.apache.org/licenses/LICENSE-2.0

//! Async trait for worker-to-worker RPC clients.

use std::sync::Arc;

use swarm_common::status::SwarmResult;
use swarm_proto::swarm::rpc;
use tonic::Status;

/// Async trait for the RPC operations issued against a remote worker.
///
/// Implemented by the real gRPC client (`WorkerRpcClient`) and test mocks.
/// The pool holds clients through this trait and only ever consults
/// [`is_idle_after_rpcs`](Self::is_idle_after_rpcs) itself; every other
/// method is opaque traffic on behalf of callers.
#[async_trait::async_trait]
pub trait WorkerClient: Send + Sync {
    async fn push_task(&self, req: rpc::PushTaskRequest) -> Result<rpc::PushTaskReply, Status>;

    async fn num_pending_tasks(
        &self,
        req: rpc::NumPendingTasksRequest,
    ) -> Result<rpc::NumPendingTasksReply, Status>;

    async fn get_or_create_runtime_env(
        &self,
        req: rpc::GetOrCreateRuntimeEnvRequest,
    ) -> Result<rpc::GetOrCreateRuntimeEnvReply, Status>;

    async fn delete_runtime_env_if_possible(
        &self,
        req: rpc::DeleteRuntimeEnvIfPossibleRequest,
    ) -> Result<rpc::DeleteRuntimeEnvIfPossibleReply, Status>;

    async fn get_runtime_envs_info(
        &self,
        req: rpc::GetRuntimeEnvsInfoRequest,
    ) -> Result<rpc::GetRuntimeEnvsInfoReply, Status>;

    /// True iff no RPC has been dispatched through this handle since the
    /// previous poll and none is in flight. The pool polls this once per
    /// `get_or_connect` to garbage-collect quiet peers.
    fn is_idle_after_rpcs(&self) -> bool;
}

/// Builds a client for a peer address.
///
/// Invoked under the pool lock, so implementations must not block; the
/// expectation is a lazily-connecting stub. Errors propagate unchanged to
/// the `get_or_connect` caller and leave no state in the pool.
pub type WorkerClientFactory =
    Arc<dyn Fn(&rpc::Address) -> SwarmResult<Arc<dyn WorkerClient>> + Send + Sync>;
