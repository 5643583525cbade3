// Copyright 2025 The Swarm Authors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//  http://www.apache.org/licenses/LICENSE-2.0

//! GCS pubsub message types and subscriber-side service stub.

use crate::gcs::GcsNodeInfo;

/// Pubsub channels published by the GCS.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum ChannelType {
    GcsNodeInfoChannel = 0,
}

/// One published message.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PubMessage {
    #[prost(enumeration = "ChannelType", tag = "1")]
    pub channel_type: i32,
    /// Key within the channel (e.g. a node id); empty for channel-wide.
    #[prost(bytes = "vec", tag = "2")]
    pub key_id: Vec<u8>,
    #[prost(int64, tag = "3")]
    pub sequence_id: i64,
    #[prost(oneof = "pub_message::InnerMessage", tags = "4")]
    pub inner_message: Option<pub_message::InnerMessage>,
}

pub mod pub_message {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum InnerMessage {
        #[prost(message, tag = "4")]
        NodeInfoMessage(super::GcsNodeInfo),
    }
}

/// A single subscribe/unsubscribe command.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Command {
    #[prost(enumeration = "ChannelType", tag = "1")]
    pub channel_type: i32,
    #[prost(bytes = "vec", tag = "2")]
    pub key_id: Vec<u8>,
    /// True to subscribe, false to unsubscribe.
    #[prost(bool, tag = "3")]
    pub subscribe: bool,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SubscriberCommandBatchRequest {
    #[prost(bytes = "vec", tag = "1")]
    pub subscriber_id: Vec<u8>,
    #[prost(message, repeated, tag = "2")]
    pub commands: Vec<Command>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SubscriberCommandBatchReply {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SubscriberPollRequest {
    #[prost(bytes = "vec", tag = "1")]
    pub subscriber_id: Vec<u8>,
    /// Highest sequence id this subscriber has already processed.
    #[prost(int64, tag = "2")]
    pub max_processed_sequence_id: i64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SubscriberPollReply {
    #[prost(message, repeated, tag = "1")]
    pub pub_messages: Vec<PubMessage>,
}

/// Client stub for `swarm.rpc.InternalPubSubGcsService`.
pub mod internal_pub_sub_gcs_service_client {
    use tonic::codec::ProstCodec;
    use tonic::codegen::http::uri::PathAndQuery;
    use tonic::transport::Channel;
    use tonic::{Request, Response, Status};

    use super::{
        SubscriberCommandBatchReply, SubscriberCommandBatchRequest, SubscriberPollReply,
        SubscriberPollRequest,
    };

    #[derive(Debug, Clone)]
    pub struct InternalPubSubGcsServiceClient {
        inner: tonic::client::Grpc<Channel>,
    }

    impl InternalPubSubGcsServiceClient {
        pub fn new(channel: Channel) -> Self {
            Self {
                inner: tonic::client::Grpc::new(channel),
            }
        }

        pub async fn subscriber_command_batch(
            &mut self,
            request: Request<SubscriberCommandBatchRequest>,
        ) -> Result<Response<SubscriberCommandBatchReply>, Status> {
            self.inner
                .ready()
                .await
                .map_err(|e| Status::unavailable(format!("service not ready: {e}")))?;
            let codec: ProstCodec<SubscriberCommandBatchRequest, SubscriberCommandBatchReply> =
                ProstCodec::default();
            let path = PathAndQuery::from_static(
                "/swarm.rpc.InternalPubSubGcsService/SubscriberCommandBatch",
            );
            self.inner.unary(request, path, codec).await
        }

        pub async fn subscriber_poll(
            &mut self,
            request: Request<SubscriberPollRequest>,
        ) -> Result<Response<SubscriberPollReply>, Status> {
            self.inner
                .ready()
                .await
                .map_err(|e| Status::unavailable(format!("service not ready: {e}")))?;
            let codec: ProstCodec<SubscriberPollRequest, SubscriberPollReply> =
                ProstCodec::default();
            let path =
                PathAndQuery::from_static("/swarm.rpc.InternalPubSubGcsService/SubscriberPoll");
            self.inner.unary(request, path, codec).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gcs::GcsNodeState;
    use prost::Message;

    #[test]
    fn test_pub_message_oneof_roundtrip() {
        let msg = PubMessage {
            channel_type: ChannelType::GcsNodeInfoChannel as i32,
            key_id: vec![1; 28],
            sequence_id: 12,
            inner_message: Some(pub_message::InnerMessage::NodeInfoMessage(GcsNodeInfo {
                node_id: vec![1; 28],
                state: GcsNodeState::Dead as i32,
                node_manager_address: "10.1.2.3".to_string(),
                node_manager_port: 9000,
                node_name: "n1".to_string(),
            })),
        };
        let decoded = PubMessage::decode(msg.encode_to_vec().as_slice()).unwrap();
        assert_eq!(decoded, msg);
    }
}
