// Copyright 2025 The Swarm Authors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//  http://www.apache.org/licenses/LICENSE-2.0

//! GCS (control plane) message types and the node-info service stub.

/// Liveness state of a node as recorded by the GCS.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum GcsNodeState {
    Alive = 0,
    Dead = 1,
}

/// Cluster-membership record for one node.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GcsNodeInfo {
    #[prost(bytes = "vec", tag = "1")]
    pub node_id: Vec<u8>,
    #[prost(enumeration = "GcsNodeState", tag = "2")]
    pub state: i32,
    /// Address of the node manager (raylet) on this node.
    #[prost(string, tag = "3")]
    pub node_manager_address: String,
    #[prost(int32, tag = "4")]
    pub node_manager_port: i32,
    #[prost(string, tag = "5")]
    pub node_name: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetAllNodeInfoRequest {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetAllNodeInfoReply {
    #[prost(message, repeated, tag = "1")]
    pub node_info_list: Vec<GcsNodeInfo>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CheckAliveRequest {
    #[prost(bytes = "vec", repeated, tag = "1")]
    pub node_ids: Vec<Vec<u8>>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CheckAliveReply {
    /// One entry per requested node, in request order.
    #[prost(bool, repeated, tag = "1")]
    pub node_alive: Vec<bool>,
}

/// Client stub for `swarm.rpc.NodeInfoGcsService`.
pub mod node_info_gcs_service_client {
    use tonic::codec::ProstCodec;
    use tonic::codegen::http::uri::PathAndQuery;
    use tonic::transport::Channel;
    use tonic::{Request, Response, Status};

    use super::{CheckAliveReply, CheckAliveRequest, GetAllNodeInfoReply, GetAllNodeInfoRequest};

    #[derive(Debug, Clone)]
    pub struct NodeInfoGcsServiceClient {
        inner: tonic::client::Grpc<Channel>,
    }

    impl NodeInfoGcsServiceClient {
        pub fn new(channel: Channel) -> Self {
            Self {
                inner: tonic::client::Grpc::new(channel),
            }
        }

        pub async fn get_all_node_info(
            &mut self,
            request: Request<GetAllNodeInfoRequest>,
        ) -> Result<Response<GetAllNodeInfoReply>, Status> {
            self.inner
                .ready()
                .await
                .map_err(|e| Status::unavailable(format!("service not ready: {e}")))?;
            let codec: ProstCodec<GetAllNodeInfoRequest, GetAllNodeInfoReply> =
                ProstCodec::default();
            let path =
                PathAndQuery::from_static("/swarm.rpc.NodeInfoGcsService/GetAllNodeInfo");
            self.inner.unary(request, path, codec).await
        }

        pub async fn check_alive(
            &mut self,
            request: Request<CheckAliveRequest>,
        ) -> Result<Response<CheckAliveReply>, Status> {
            self.inner
                .ready()
                .await
                .map_err(|e| Status::unavailable(format!("service not ready: {e}")))?;
            let codec: ProstCodec<CheckAliveRequest, CheckAliveReply> = ProstCodec::default();
            let path = PathAndQuery::from_static("/swarm.rpc.NodeInfoGcsService/CheckAlive");
            self.inner.unary(request, path, codec).await
        }
    }
}
