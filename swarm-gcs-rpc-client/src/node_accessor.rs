// Copyright 2025 The Swarm Authors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//  http://www.apache.org/licenses/LICENSE-2.0

//! Cluster-membership view: local cache of node records.
//!
//! The accessor answers "is this node alive and where is its node manager"
//! from an in-process cache. The cache is populated by one full fetch when
//! the node-change subscription is established and kept current by the
//! notifications that subscription delivers; lookups never issue an RPC.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tonic::Status;

use swarm_common::id::NodeID;
use swarm_proto::swarm::rpc;

use crate::subscriber::GcsSubscriberClient;
use crate::traits::GcsRpc;

/// Local cache over the GCS node table.
pub struct NodeInfoAccessor {
    /// All nodes ever observed, dead ones included.
    node_cache: Mutex<HashMap<NodeID, rpc::GcsNodeInfo>>,
    /// Set once the node-change subscription is registered.
    subscribed: AtomicBool,
}

impl NodeInfoAccessor {
    pub fn new() -> Self {
        Self {
            node_cache: Mutex::new(HashMap::new()),
            subscribed: AtomicBool::new(false),
        }
    }

    /// Whether the node-change subscription has been established.
    ///
    /// Callers that react to node death must assert this before trusting
    /// a cache miss to mean "node never existed or is gone".
    pub fn is_subscribed_to_node_change(&self) -> bool {
        self.subscribed.load(Ordering::Acquire)
    }

    /// Look up a node record.
    ///
    /// With `filter_dead_nodes`, a node recorded as dead reads as absent.
    pub fn get(&self, node_id: &NodeID, filter_dead_nodes: bool) -> Option<rpc::GcsNodeInfo> {
        let cache = self.node_cache.lock();
        let info = cache.get(node_id)?;
        if filter_dead_nodes && info.state() == rpc::GcsNodeState::Dead {
            return None;
        }
        Some(info.clone())
    }

    /// Apply a node record from the initial fetch or a change notification.
    /// The newest record for a node wins; dead records are kept so that
    /// filtered and unfiltered lookups can disagree.
    pub fn handle_notification(&self, node_info: rpc::GcsNodeInfo) {
        let node_id = NodeID::from_binary(&node_info.node_id);
        tracing::debug!(
            node_id = %node_id,
            state = ?node_info.state(),
            "node change notification"
        );
        self.node_cache.lock().insert(node_id, node_info);
    }

    /// Number of cached node records (dead ones included).
    pub fn num_cached_nodes(&self) -> usize {
        self.node_cache.lock().len()
    }

    pub(crate) fn mark_subscribed(&self) {
        self.subscribed.store(true, Ordering::Release);
    }
}

impl Default for NodeInfoAccessor {
    fn default() -> Self {
        Self::new()
    }
}

/// GCS client handle: RPC access plus the membership accessor.
pub struct GcsClient {
    rpc: Arc<dyn GcsRpc>,
    nodes: Arc<NodeInfoAccessor>,
}

impl GcsClient {
    pub fn new(rpc: Arc<dyn GcsRpc>) -> Self {
        Self {
            rpc,
            nodes: Arc::new(NodeInfoAccessor::new()),
        }
    }

    /// The cluster-membership accessor.
    pub fn nodes(&self) -> &NodeInfoAccessor {
        &self.nodes
    }

    /// The raw RPC client.
    pub fn rpc(&self) -> &Arc<dyn GcsRpc> {
        &self.rpc
    }

    /// Register the node channel on `subscriber`, mark the accessor
    /// subscribed, and seed the cache with a full node-table fetch.
    ///
    /// The subscriber's poll loop is started separately by the bootstrap
    /// layer; registration here only wires the local dispatch.
    pub async fn subscribe_to_node_change(
        &self,
        subscriber: &GcsSubscriberClient,
    ) -> Result<(), Status> {
        let accessor = Arc::clone(&self.nodes);
        subscriber.subscribe(
            rpc::ChannelType::GcsNodeInfoChannel as i32,
            vec![],
            Box::new(move |msg: rpc::PubMessage| {
                if let Some(rpc::pub_message::InnerMessage::NodeInfoMessage(info)) =
                    msg.inner_message
                {
                    accessor.handle_notification(info);
                }
            }),
        );
        self.nodes.mark_subscribed();

        let reply = self
            .rpc
            .get_all_node_info(rpc::GetAllNodeInfoRequest {})
            .await?;
        for info in reply.node_info_list {
            self.nodes.handle_notification(info);
        }
        tracing::info!(
            num_nodes = self.nodes.num_cached_nodes(),
            "subscribed to node change"
        );
        Ok(())
    }
}
