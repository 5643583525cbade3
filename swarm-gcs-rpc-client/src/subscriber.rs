// Copyright 2025 The Swarm Authors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//  http://www.apache.org/licenses/LICENSE-2.0

//! GCS subscriber client — long-poll-based subscriber to GCS pubsub.
//!
//! Subscribes to GCS channels and invokes callbacks when messages arrive.
//! Uses the `InternalPubSubGcsService` long-poll RPCs:
//! - `SubscriberCommandBatch` to register subscriptions
//! - `SubscriberPoll` to receive published messages

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::Notify;
use tonic::Status;

use swarm_proto::swarm::rpc;

type PubSubClient = rpc::internal_pub_sub_gcs_service_client::InternalPubSubGcsServiceClient;

/// Callback invoked when a PubMessage is received from GCS.
pub type SubscriberCallback = Box<dyn Fn(rpc::PubMessage) + Send + Sync>;

/// Per-channel callback list: Vec of (key_filter, callback).
type ChannelCallbackList = Vec<(Vec<u8>, Arc<SubscriberCallback>)>;

/// A subscription entry: channel + optional key filter.
struct Subscription {
    channel_type: i32,
    key_id: Vec<u8>,
}

/// Client-side GCS subscriber that long-polls for published messages.
pub struct GcsSubscriberClient {
    /// Unique subscriber ID (typically the worker ID).
    subscriber_id: Vec<u8>,
    /// Registered subscriptions.
    subscriptions: Mutex<Vec<Subscription>>,
    /// Callbacks indexed by channel_type for fast dispatch.
    channel_callbacks: Mutex<HashMap<i32, ChannelCallbackList>>,
    /// The max sequence ID we have processed.
    max_processed_sequence_id: Mutex<i64>,
    /// Notification to stop the polling loop.
    shutdown: Notify,
    /// Whether the polling loop is running.
    is_running: Mutex<bool>,
    /// Poll timeout for long-poll requests.
    poll_timeout: Duration,
}

impl GcsSubscriberClient {
    /// Create a new subscriber client with the given subscriber ID.
    pub fn new(subscriber_id: Vec<u8>) -> Self {
        Self {
            subscriber_id,
            subscriptions: Mutex::new(Vec::new()),
            channel_callbacks: Mutex::new(HashMap::new()),
            max_processed_sequence_id: Mutex::new(0),
            shutdown: Notify::new(),
            is_running: Mutex::new(false),
            poll_timeout: Duration::from_secs(30),
        }
    }

    /// Create with a custom poll timeout.
    pub fn with_poll_timeout(mut self, timeout: Duration) -> Self {
        self.poll_timeout = timeout;
        self
    }

    /// Subscribe to a channel. The callback will be invoked for each matching message.
    ///
    /// - `channel_type`: The pubsub channel (e.g. the node-info channel)
    /// - `key_id`: Specific key to filter on, or empty for all keys
    /// - `callback`: Invoked for each received PubMessage
    pub fn subscribe(&self, channel_type: i32, key_id: Vec<u8>, callback: SubscriberCallback) {
        let cb = Arc::new(callback);
        self.subscriptions.lock().push(Subscription {
            channel_type,
            key_id: key_id.clone(),
        });
        self.channel_callbacks
            .lock()
            .entry(channel_type)
            .or_default()
            .push((key_id, cb));
    }

    /// Build the command batch request to register all subscriptions with GCS.
    fn build_command_batch(&self) -> rpc::SubscriberCommandBatchRequest {
        let subs = self.subscriptions.lock();
        let commands: Vec<rpc::Command> = subs
            .iter()
            .map(|s| rpc::Command {
                channel_type: s.channel_type,
                key_id: s.key_id.clone(),
                subscribe: true,
            })
            .collect();

        rpc::SubscriberCommandBatchRequest {
            subscriber_id: self.subscriber_id.clone(),
            commands,
        }
    }

    /// Dispatch received messages to registered callbacks.
    pub(crate) fn dispatch_messages(&self, messages: Vec<rpc::PubMessage>) {
        let callbacks = self.channel_callbacks.lock();
        let mut max_seq = *self.max_processed_sequence_id.lock();

        for msg in messages {
            if msg.sequence_id > max_seq {
                max_seq = msg.sequence_id;
            }
            if let Some(cbs) = callbacks.get(&msg.channel_type) {
                for (key_filter, cb) in cbs {
                    // Empty key_filter means all keys; otherwise match specific key
                    if key_filter.is_empty() || *key_filter == msg.key_id {
                        cb(msg.clone());
                    }
                }
            }
        }

        *self.max_processed_sequence_id.lock() = max_seq;
    }

    /// Start the background polling loop. Registers subscriptions then
    /// continuously long-polls for messages.
    ///
    /// Returns a JoinHandle for the background task.
    pub fn start(
        self: &Arc<Self>,
        mut stub: PubSubClient,
    ) -> tokio::task::JoinHandle<Result<(), Status>> {
        let this = Arc::clone(self);
        *this.is_running.lock() = true;

        tokio::spawn(async move {
            // Step 1: Register subscriptions
            let cmd_batch = this.build_command_batch();
            stub.subscriber_command_batch(tonic::Request::new(cmd_batch))
                .await
                .map_err(|e| {
                    tracing::error!("Failed to register subscriptions: {}", e);
                    e
                })?;

            // Step 2: Long-poll loop
            loop {
                let max_seq = *this.max_processed_sequence_id.lock();
                let poll_req = rpc::SubscriberPollRequest {
                    subscriber_id: this.subscriber_id.clone(),
                    max_processed_sequence_id: max_seq,
                };

                let poll_result = tokio::select! {
                    result = stub.subscriber_poll(tonic::Request::new(poll_req)) => result,
                    _ = this.shutdown.notified() => {
                        tracing::info!("GCS subscriber shutting down");
                        *this.is_running.lock() = false;
                        return Ok(());
                    }
                };

                match poll_result {
                    Ok(response) => {
                        let reply = response.into_inner();
                        if !reply.pub_messages.is_empty() {
                            this.dispatch_messages(reply.pub_messages);
                        }
                    }
                    Err(e) => {
                        tracing::warn!("GCS subscriber poll failed: {}, retrying...", e);
                        tokio::time::sleep(Duration::from_millis(100)).await;
                    }
                }
            }
        })
    }

    /// Stop the polling loop.
    pub fn shutdown(&self) {
        self.shutdown.notify_one();
    }

    /// Whether the polling loop is running.
    pub fn is_running(&self) -> bool {
        *self.is_running.lock()
    }

    /// Get the subscriber ID.
    pub fn subscriber_id(&self) -> &[u8] {
        &self.subscriber_id
    }

    /// Get the max processed sequence ID.
    pub fn max_processed_sequence_id(&self) -> i64 {
        *self.max_processed_sequence_id.lock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_subscriber_new() {
        let sub = GcsSubscriberClient::new(b"sub1".to_vec());
        assert_eq!(sub.subscriber_id(), b"sub1");
        assert_eq!(sub.max_processed_sequence_id(), 0);
        assert!(!sub.is_running());
    }

    #[test]
    fn test_subscribe_registers_callback() {
        let sub = GcsSubscriberClient::new(b"sub1".to_vec());
        sub.subscribe(0, vec![], Box::new(|_| {}));
        sub.subscribe(0, b"key1".to_vec(), Box::new(|_| {}));

        assert_eq!(sub.subscriptions.lock().len(), 2);
        assert_eq!(sub.channel_callbacks.lock().len(), 1);
        assert_eq!(sub.channel_callbacks.lock().get(&0).unwrap().len(), 2);
    }

    #[test]
    fn test_build_command_batch() {
        let sub = GcsSubscriberClient::new(b"sub1".to_vec());
        sub.subscribe(0, vec![], Box::new(|_| {}));
        sub.subscribe(0, b"node1".to_vec(), Box::new(|_| {}));

        let batch = sub.build_command_batch();
        assert_eq!(batch.subscriber_id, b"sub1");
        assert_eq!(batch.commands.len(), 2);
        assert!(batch.commands[0].subscribe);
        assert_eq!(batch.commands[1].key_id, b"node1");
    }

    #[test]
    fn test_dispatch_messages_invokes_callbacks() {
        let counter = Arc::new(AtomicUsize::new(0));
        let counter_clone = counter.clone();

        let sub = GcsSubscriberClient::new(b"sub1".to_vec());
        sub.subscribe(
            0,
            vec![],
            Box::new(move |_msg| {
                counter_clone.fetch_add(1, Ordering::Relaxed);
            }),
        );

        let messages = vec![
            rpc::PubMessage {
                channel_type: 0,
                key_id: b"a".to_vec(),
                sequence_id: 1,
                inner_message: None,
            },
            rpc::PubMessage {
                channel_type: 0,
                key_id: b"b".to_vec(),
                sequence_id: 2,
                inner_message: None,
            },
        ];

        sub.dispatch_messages(messages);
        assert_eq!(counter.load(Ordering::Relaxed), 2);
        assert_eq!(sub.max_processed_sequence_id(), 2);
    }

    #[test]
    fn test_dispatch_filters_by_key() {
        let counter = Arc::new(AtomicUsize::new(0));
        let counter_clone = counter.clone();

        let sub = GcsSubscriberClient::new(b"sub1".to_vec());
        sub.subscribe(
            0,
            b"target".to_vec(),
            Box::new(move |_msg| {
                counter_clone.fetch_add(1, Ordering::Relaxed);
            }),
        );

        let messages = vec![
            rpc::PubMessage {
                channel_type: 0,
                key_id: b"target".to_vec(),
                sequence_id: 1,
                inner_message: None,
            },
            rpc::PubMessage {
                channel_type: 0,
                key_id: b"other".to_vec(),
                sequence_id: 2,
                inner_message: None,
            },
        ];

        sub.dispatch_messages(messages);
        // Only the "target" key should trigger the callback
        assert_eq!(counter.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_dispatch_channel_isolation() {
        let counter = Arc::new(AtomicUsize::new(0));
        let counter_clone = counter.clone();

        let sub = GcsSubscriberClient::new(b"sub1".to_vec());
        sub.subscribe(
            0,
            vec![],
            Box::new(move |_msg| {
                counter_clone.fetch_add(1, Ordering::Relaxed);
            }),
        );

        // Publish to an unrelated channel — should not trigger
        let messages = vec![rpc::PubMessage {
            channel_type: 99,
            key_id: b"node1".to_vec(),
            sequence_id: 1,
            inner_message: None,
        }];

        sub.dispatch_messages(messages);
        assert_eq!(counter.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn test_dispatch_tracks_max_sequence() {
        let sub = GcsSubscriberClient::new(b"sub1".to_vec());
        sub.subscribe(0, vec![], Box::new(|_| {}));

        sub.dispatch_messages(vec![rpc::PubMessage {
            channel_type: 0,
            key_id: vec![],
            sequence_id: 7,
            inner_message: None,
        }]);
        assert_eq!(sub.max_processed_sequence_id(), 7);

        // An older message does not move the watermark backwards
        sub.dispatch_messages(vec![rpc::PubMessage {
            channel_type: 0,
            key_id: vec![],
            sequence_id: 3,
            inner_message: None,
        }]);
        assert_eq!(sub.max_processed_sequence_id(), 7);
    }

    #[test]
    fn test_with_poll_timeout() {
        let sub = GcsSubscriberClient::new(b"sub1".to_vec())
            .with_poll_timeout(Duration::from_secs(5));
        assert_eq!(sub.poll_timeout, Duration::from_secs(5));
    }
}
