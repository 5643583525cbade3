// Copyright 2025 The Swarm Authors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//  http://www.apache.org/licenses/LICENSE-2.0

//! Real Raylet RPC client backed by tonic stubs.

use std::sync::Arc;

use parking_lot::Mutex;
use tonic::transport::Channel;
use tonic::Status;

use swarm_proto::swarm::rpc;
use swarm_rpc::client::{RetryConfig, RetryableGrpcClient};

use crate::traits::{RayletClient, RayletClientFactory};

type NmClient = rpc::node_manager_service_client::NodeManagerServiceClient;

/// Real Raylet RPC client wrapping NodeManagerServiceClient with retry logic.
pub struct RayletRpcClient {
    retry_client: RetryableGrpcClient,
    stub: Mutex<NmClient>,
}

impl RayletRpcClient {
    /// Connect to a raylet gRPC server.
    pub async fn connect(
        address: &str,
        retry_config: RetryConfig,
    ) -> Result<Self, tonic::transport::Error> {
        let channel = RetryableGrpcClient::connect(address).await?;
        Ok(Self::from_channel(channel, retry_config))
    }

    /// Create from an existing channel (useful for testing).
    pub fn from_channel(channel: Channel, retry_config: RetryConfig) -> Self {
        let retry_client = RetryableGrpcClient::new(channel.clone(), retry_config);
        Self {
            retry_client,
            stub: Mutex::new(NmClient::new(channel)),
        }
    }

    /// Access the underlying retry client for connection state inspection.
    pub fn retry_client(&self) -> &RetryableGrpcClient {
        &self.retry_client
    }

    /// A factory building lazily-connecting clients for node-manager
    /// endpoints, suitable for the client pool's liveness probe.
    pub fn lazy_factory(retry_config: RetryConfig) -> RayletClientFactory {
        Arc::new(move |address: &str, port: u16| {
            let channel = RetryableGrpcClient::connect_lazy(&format!("http://{address}:{port}"));
            Arc::new(RayletRpcClient::from_channel(channel, retry_config.clone()))
                as Arc<dyn RayletClient>
        })
    }
}

/// Macro to implement a raylet RPC method with retry.
macro_rules! impl_raylet_rpc {
    ($self:ident, $method:ident, $req:expr) => {{
        let retry = &$self.retry_client;
        let stub_mutex = &$self.stub;
        retry
            .call_with_retry(0, None, || {
                let mut stub = stub_mutex.lock().clone();
                let req = $req.clone();
                async move {
                    stub.$method(tonic::Request::new(req))
                        .await
                        .map(|resp| resp.into_inner())
                }
            })
            .await
    }};
}

#[async_trait::async_trait]
impl RayletClient for RayletRpcClient {
    async fn is_local_worker_dead(
        &self,
        req: rpc::IsLocalWorkerDeadRequest,
    ) -> Result<rpc::IsLocalWorkerDeadReply, Status> {
        impl_raylet_rpc!(self, is_local_worker_dead, req)
    }
}
