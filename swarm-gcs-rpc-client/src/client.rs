// Copyright 2025 The Swarm Authors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//  http://www.apache.org/licenses/LICENSE-2.0

//! Real GCS RPC client backed by tonic stubs.

use parking_lot::Mutex;
use tonic::transport::Channel;
use tonic::Status;

use swarm_proto::swarm::rpc;
use swarm_rpc::client::{RetryConfig, RetryableGrpcClient};

use crate::traits::GcsRpc;

type NodeClient = rpc::node_info_gcs_service_client::NodeInfoGcsServiceClient;

/// Real GCS RPC client wrapping the node-info stub with retry logic.
pub struct GcsRpcClient {
    retry_client: RetryableGrpcClient,
    node: Mutex<NodeClient>,
}

impl GcsRpcClient {
    /// Connect to a GCS server.
    pub async fn connect(
        gcs_address: &str,
        retry_config: RetryConfig,
    ) -> Result<Self, tonic::transport::Error> {
        let channel = RetryableGrpcClient::connect(gcs_address).await?;
        Ok(Self::from_channel(channel, retry_config))
    }

    /// Create from an existing channel (useful for testing).
    pub fn from_channel(channel: Channel, retry_config: RetryConfig) -> Self {
        let retry_client = RetryableGrpcClient::new(channel.clone(), retry_config);
        Self {
            retry_client,
            node: Mutex::new(NodeClient::new(channel)),
        }
    }

    /// Access the underlying retry client for connection state inspection.
    pub fn retry_client(&self) -> &RetryableGrpcClient {
        &self.retry_client
    }
}

/// Macro to implement a GCS RPC method with retry.
///
/// Each stub method takes `&mut self`, so we lock the Mutex,
/// clone it, and call within the retry loop.
macro_rules! impl_gcs_rpc {
    ($self:ident, $method:ident, $req:expr) => {{
        let retry = &$self.retry_client;
        let stub_mutex = &$self.node;
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
impl GcsRpc for GcsRpcClient {
    async fn get_all_node_info(
        &self,
        req: rpc::GetAllNodeInfoRequest,
    ) -> Result<rpc::GetAllNodeInfoReply, Status> {
        impl_gcs_rpc!(self, get_all_node_info, req)
    }

    async fn check_alive(
        &self,
        req: rpc::CheckAliveRequest,
    ) -> Result<rpc::CheckAliveReply, Status> {
        impl_gcs_rpc!(self, check_alive, req)
    }
}
