// Copyright 2025 The Swarm Authors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//  http://www.apache.org/licenses/LICENSE-2.0

//! Node manager (raylet) message types and service stub.

/// Ask a raylet whether one of its local workers has died.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct IsLocalWorkerDeadRequest {
    #[prost(bytes = "vec", tag = "1")]
    pub worker_id: Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct IsLocalWorkerDeadReply {
    #[prost(bool, tag = "1")]
    pub is_dead: bool,
}

/// Client stub for `swarm.rpc.NodeManagerService`.
pub mod node_manager_service_client {
    use tonic::codec::ProstCodec;
    use tonic::codegen::http::uri::PathAndQuery;
    use tonic::transport::Channel;
    use tonic::{Request, Response, Status};

    use super::{IsLocalWorkerDeadReply, IsLocalWorkerDeadRequest};

    #[derive(Debug, Clone)]
    pub struct NodeManagerServiceClient {
        inner: tonic::client::Grpc<Channel>,
    }

    impl NodeManagerServiceClient {
        pub fn new(channel: Channel) -> Self {
            Self {
                inner: tonic::client::Grpc::new(channel),
            }
        }

        pub async fn is_local_worker_dead(
            &mut self,
            request: Request<IsLocalWorkerDeadRequest>,
        ) -> Result<Response<IsLocalWorkerDeadReply>, Status> {
            self.inner
                .ready()
                .await
                .map_err(|e| Status::unavailable(format!("service not ready: {e}")))?;
            let codec: ProstCodec<IsLocalWorkerDeadRequest, IsLocalWorkerDeadReply> =
                ProstCodec::default();
            let path =
                PathAndQuery::from_static("/swarm.rpc.NodeManagerService/IsLocalWorkerDead");
            self.inner.unary(request, path, codec).await
        }
    }
}
