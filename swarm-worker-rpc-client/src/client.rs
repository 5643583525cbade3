// Copyright 2025 The Swarm Authors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//  http://www.apache.org/licenses/LICENSE-2.0

//! Real worker RPC client backed by tonic stubs.

use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use tonic::Status;

use swarm_common::status::{SwarmError, SwarmResult};
use swarm_proto::swarm::rpc;
use swarm_rpc::call_manager::ClientCallManager;
use swarm_rpc::client::{RetryConfig, RetryableGrpcClient};

use crate::traits::WorkerClient;

type WsClient = rpc::worker_service_client::WorkerServiceClient;

/// Real worker RPC client wrapping WorkerServiceClient with retry logic.
///
/// Tracks how many logical calls have been dispatched and completed so the
/// pool can tell whether the handle has gone quiet. Retries within one call
/// count once.
pub struct WorkerRpcClient {
    retry_client: RetryableGrpcClient,
    stub: Mutex<WsClient>,
    call_manager: ClientCallManager,
    dispatched_calls: AtomicU64,
    completed_calls: AtomicU64,
    /// Dispatched-count observed by the previous idle poll.
    idle_checkpoint: AtomicU64,
}

/// Bumps the completed-call counter when a call finishes, error paths included.
struct InFlightGuard<'a> {
    completed: &'a AtomicU64,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.completed.fetch_add(1, Ordering::AcqRel);
    }
}

impl WorkerRpcClient {
    /// Build a client for `addr` over a lazily-connecting channel.
    ///
    /// Does not touch the network; the channel connects on first use.
    pub fn connect_lazy(
        addr: &rpc::Address,
        call_manager: ClientCallManager,
        retry_config: RetryConfig,
    ) -> SwarmResult<Self> {
        let endpoint = format!("http://{}:{}", addr.ip_address, addr.port);
        let channel = tonic::transport::Channel::from_shared(endpoint)
            .map_err(|e| SwarmError::invalid_argument(format!("invalid worker address: {e}")))?
            .connect_lazy();
        Ok(Self {
            retry_client: RetryableGrpcClient::new(channel.clone(), retry_config),
            stub: Mutex::new(WsClient::new(channel)),
            call_manager,
            dispatched_calls: AtomicU64::new(0),
            completed_calls: AtomicU64::new(0),
            idle_checkpoint: AtomicU64::new(0),
        })
    }

    /// Access the underlying retry client, e.g. to install the
    /// unavailable-timeout callback.
    pub fn retry_client(&self) -> &RetryableGrpcClient {
        &self.retry_client
    }

    /// The call manager stamping metadata onto this client's requests.
    pub fn call_manager(&self) -> &ClientCallManager {
        &self.call_manager
    }

    fn track_call(&self) -> InFlightGuard<'_> {
        self.dispatched_calls.fetch_add(1, Ordering::AcqRel);
        InFlightGuard {
            completed: &self.completed_calls,
        }
    }
}

/// Macro to implement a worker RPC method with retry, metadata injection,
/// and call tracking.
macro_rules! impl_worker_rpc {
    ($self:ident, $method:ident, $req:expr) => {{
        let _guard = $self.track_call();
        let retry = &$self.retry_client;
        let stub_mutex = &$self.stub;
        let call_manager = &$self.call_manager;
        let result = retry
            .call_with_retry(0, None, || {
                let mut stub = stub_mutex.lock().clone();
                let req = call_manager.prepare_request(tonic::Request::new($req.clone()));
                async move { stub.$method(req).await.map(|resp| resp.into_inner()) }
            })
            .await;
        match &result {
            Ok(_) => call_manager.record_success(),
            Err(_) => call_manager.record_failure(),
        }
        result
    }};
}

#[async_trait::async_trait]
impl WorkerClient for WorkerRpcClient {
    async fn push_task(&self, req: rpc::PushTaskRequest) -> Result<rpc::PushTaskReply, Status> {
        impl_worker_rpc!(self, push_task, req)
    }

    async fn num_pending_tasks(
        &self,
        req: rpc::NumPendingTasksRequest,
    ) -> Result<rpc::NumPendingTasksReply, Status> {
        impl_worker_rpc!(self, num_pending_tasks, req)
    }

    async fn get_or_create_runtime_env(
        &self,
        req: rpc::GetOrCreateRuntimeEnvRequest,
    ) -> Result<rpc::GetOrCreateRuntimeEnvReply, Status> {
        impl_worker_rpc!(self, get_or_create_runtime_env, req)
    }

    async fn delete_runtime_env_if_possible(
        &self,
        req: rpc::DeleteRuntimeEnvIfPossibleRequest,
    ) -> Result<rpc::DeleteRuntimeEnvIfPossibleReply, Status> {
        impl_worker_rpc!(self, delete_runtime_env_if_possible, req)
    }

    async fn get_runtime_envs_info(
        &self,
        req: rpc::GetRuntimeEnvsInfoRequest,
    ) -> Result<rpc::GetRuntimeEnvsInfoReply, Status> {
        impl_worker_rpc!(self, get_runtime_envs_info, req)
    }

    fn is_idle_after_rpcs(&self) -> bool {
        let dispatched = self.dispatched_calls.load(Ordering::Acquire);
        let in_flight = dispatched != self.completed_calls.load(Ordering::Acquire);
        let seen = self.idle_checkpoint.swap(dispatched, Ordering::AcqRel);
        !in_flight && seen == dispatched
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicU32;
    use std::sync::Arc;
    use std::time::Duration;

    use swarm_common::id::{ClusterID, NodeID, WorkerID};

    fn fast_retry_config() -> RetryConfig {
        RetryConfig {
            max_retries: 2,
            initial_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(5),
            multiplier: 2.0,
            server_unavailable_timeout: Duration::from_secs(5),
            max_pending_bytes: 1024,
        }
    }

    fn unreachable_address() -> rpc::Address {
        rpc::Address {
            node_id: NodeID::from_random().binary(),
            ip_address: "127.0.0.1".to_string(),
            port: 1,
            worker_id: WorkerID::from_random().binary(),
        }
    }

    fn make_client() -> WorkerRpcClient {
        let call_manager =
            ClientCallManager::new(ClusterID::from_random(), Duration::from_secs(30));
        WorkerRpcClient::connect_lazy(&unreachable_address(), call_manager, fast_retry_config())
            .unwrap()
    }

    #[test]
    fn test_connect_lazy_rejects_bad_address() {
        let call_manager =
            ClientCallManager::new(ClusterID::from_random(), Duration::from_secs(30));
        let addr = rpc::Address {
            ip_address: "not a host".to_string(),
            port: 80,
            ..unreachable_address()
        };
        let err = WorkerRpcClient::connect_lazy(&addr, call_manager, fast_retry_config())
            .err()
            .unwrap();
        assert!(err.is_invalid_argument());
    }

    #[tokio::test]
    async fn test_fresh_client_is_idle() {
        let client = make_client();
        assert!(client.is_idle_after_rpcs());
        // Stays idle while no traffic flows
        assert!(client.is_idle_after_rpcs());
    }

    #[tokio::test]
    async fn test_failed_call_counts_and_resets_idleness() {
        let client = make_client();
        let err = client
            .push_task(rpc::PushTaskRequest::default())
            .await
            .unwrap_err();
        assert_eq!(err.code(), tonic::Code::Unavailable);

        // First poll after traffic sees the new dispatch
        assert!(!client.is_idle_after_rpcs());
        // Second poll with no further traffic: quiet again
        assert!(client.is_idle_after_rpcs());
    }

    #[tokio::test]
    async fn test_call_manager_records_outcomes() {
        let client = make_client();
        let _ = client.num_pending_tasks(rpc::NumPendingTasksRequest {}).await;
        assert!(client.call_manager().total_calls() >= 1);
        assert_eq!(client.call_manager().failed_calls(), 1);
        assert_eq!(client.call_manager().successful_calls(), 0);
    }

    #[tokio::test]
    async fn test_unavailable_callback_fires_for_unreachable_worker() {
        let client = make_client();
        let fired = Arc::new(AtomicU32::new(0));
        let fired_clone = Arc::clone(&fired);
        client
            .retry_client()
            .set_unavailable_timeout_callback(Arc::new(move || {
                fired_clone.fetch_add(1, Ordering::Relaxed);
            }));

        let _ = client
            .get_or_create_runtime_env(rpc::GetOrCreateRuntimeEnvRequest {
                serialized_runtime_env: "{}".to_string(),
                ..Default::default()
            })
            .await;
        assert_eq!(fired.load(Ordering::Relaxed), 1);
    }

    #[tokio::test]
    async fn test_retry_client_reports_disconnected_after_failures() {
        let client = make_client();
        assert!(client.retry_client().is_connected());
        let _ = client
            .delete_runtime_env_if_possible(rpc::DeleteRuntimeEnvIfPossibleRequest::default())
            .await;
        assert!(!client.retry_client().is_connected());
    }
}
