// Copyright 2025 The Swarm Authors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//  http://www.apache.org/licenses/LICENSE-2.0

//! Worker service message types and stub.

use crate::common::Address;

/// Push a task to a remote worker for execution.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PushTaskRequest {
    #[prost(bytes = "vec", tag = "1")]
    pub task_id: Vec<u8>,
    #[prost(bytes = "vec", tag = "2")]
    pub job_id: Vec<u8>,
    /// Serialized task payload; opaque to the transport.
    #[prost(bytes = "vec", tag = "3")]
    pub serialized_task: Vec<u8>,
    #[prost(message, optional, tag = "4")]
    pub caller_address: Option<Address>,
    /// Sequence number for in-order execution on the receiver, -1 if unordered.
    #[prost(int64, tag = "5")]
    pub sequence_number: i64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PushTaskReply {
    #[prost(bool, tag = "1")]
    pub was_cancelled_before_execution: bool,
    #[prost(bytes = "vec", repeated, tag = "2")]
    pub return_object_ids: Vec<Vec<u8>>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct NumPendingTasksRequest {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct NumPendingTasksReply {
    #[prost(int64, tag = "1")]
    pub num_pending_tasks: i64,
}

/// Client stub for `swarm.rpc.WorkerService`.
pub mod worker_service_client {
    use tonic::codec::ProstCodec;
    use tonic::codegen::http::uri::PathAndQuery;
    use tonic::transport::Channel;
    use tonic::{Request, Response, Status};

    use super::{
        NumPendingTasksReply, NumPendingTasksRequest, PushTaskReply, PushTaskRequest,
    };
    use crate::runtime_env::{
        DeleteRuntimeEnvIfPossibleReply, DeleteRuntimeEnvIfPossibleRequest,
        GetOrCreateRuntimeEnvReply, GetOrCreateRuntimeEnvRequest, GetRuntimeEnvsInfoReply,
        GetRuntimeEnvsInfoRequest,
    };

    #[derive(Debug, Clone)]
    pub struct WorkerServiceClient {
        inner: tonic::client::Grpc<Channel>,
    }

    macro_rules! unary_rpc {
        ($fn_name:ident, $req:ty, $reply:ty, $path:expr) => {
            pub async fn $fn_name(
                &mut self,
                request: Request<$req>,
            ) -> Result<Response<$reply>, Status> {
                self.inner
                    .ready()
                    .await
                    .map_err(|e| Status::unavailable(format!("service not ready: {e}")))?;
                let codec: ProstCodec<$req, $reply> = ProstCodec::default();
                let path = PathAndQuery::from_static($path);
                self.inner.unary(request, path, codec).await
            }
        };
    }

    impl WorkerServiceClient {
        pub fn new(channel: Channel) -> Self {
            Self {
                inner: tonic::client::Grpc::new(channel),
            }
        }

        unary_rpc!(
            push_task,
            PushTaskRequest,
            PushTaskReply,
            "/swarm.rpc.WorkerService/PushTask"
        );
        unary_rpc!(
            num_pending_tasks,
            NumPendingTasksRequest,
            NumPendingTasksReply,
            "/swarm.rpc.WorkerService/NumPendingTasks"
        );
        unary_rpc!(
            get_or_create_runtime_env,
            GetOrCreateRuntimeEnvRequest,
            GetOrCreateRuntimeEnvReply,
            "/swarm.rpc.WorkerService/GetOrCreateRuntimeEnv"
        );
        unary_rpc!(
            delete_runtime_env_if_possible,
            DeleteRuntimeEnvIfPossibleRequest,
            DeleteRuntimeEnvIfPossibleReply,
            "/swarm.rpc.WorkerService/DeleteRuntimeEnvIfPossible"
        );
        unary_rpc!(
            get_runtime_envs_info,
            GetRuntimeEnvsInfoRequest,
            GetRuntimeEnvsInfoReply,
            "/swarm.rpc.WorkerService/GetRuntimeEnvsInfo"
        );
    }
}
