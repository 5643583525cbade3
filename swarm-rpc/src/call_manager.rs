// Copyright 2025 The Swarm Authors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//  http://www.apache.org/licenses/LICENSE-2.0

//! Client call manager — tracks RPC lifecycle metadata.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tonic::metadata::MetadataMap;
use tonic::Request;

use swarm_common::constants::{CLUSTER_ID_METADATA_KEY, REQUEST_ID_METADATA_KEY};
use swarm_common::id::ClusterID;

/// Manages metadata injection and call tracking for outgoing RPCs.
///
/// Each `ClientCallManager` is associated with a cluster and injects
/// request IDs and cluster identity into outgoing gRPC metadata.
#[derive(Clone)]
pub struct ClientCallManager {
    cluster_id: Arc<String>,
    next_request_id: Arc<AtomicU64>,
    default_timeout: Duration,
    total_calls: Arc<AtomicU64>,
    successful_calls: Arc<AtomicU64>,
    failed_calls: Arc<AtomicU64>,
}

impl ClientCallManager {
    pub fn new(cluster_id: ClusterID, default_timeout: Duration) -> Self {
        Self {
            cluster_id: Arc::new(cluster_id.hex()),
            next_request_id: Arc::new(AtomicU64::new(1)),
            default_timeout,
            total_calls: Arc::new(AtomicU64::new(0)),
            successful_calls: Arc::new(AtomicU64::new(0)),
            failed_calls: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Generate a unique request ID.
    pub fn next_request_id(&self) -> u64 {
        self.next_request_id.fetch_add(1, Ordering::Relaxed)
    }

    /// Get the cluster ID as lowercase hex.
    pub fn cluster_id(&self) -> &str {
        &self.cluster_id
    }

    /// Get the default timeout for RPC calls.
    pub fn default_timeout(&self) -> Duration {
        self.default_timeout
    }

    /// Prepare a tonic Request by injecting cluster metadata and deadline.
    pub fn prepare_request<T>(&self, request: Request<T>) -> Request<T> {
        self.prepare_request_with_timeout(request, self.default_timeout)
    }

    /// Prepare a request with a custom timeout override.
    pub fn prepare_request_with_timeout<T>(
        &self,
        mut request: Request<T>,
        timeout: Duration,
    ) -> Request<T> {
        let request_id = self.next_request_id();
        let metadata = request.metadata_mut();
        inject_metadata(metadata, &self.cluster_id, request_id);
        request.set_timeout(timeout);
        self.total_calls.fetch_add(1, Ordering::Relaxed);
        request
    }

    /// Record a successful call.
    pub fn record_success(&self) {
        self.successful_calls.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a failed call.
    pub fn record_failure(&self) {
        self.failed_calls.fetch_add(1, Ordering::Relaxed);
    }

    /// Total number of calls prepared.
    pub fn total_calls(&self) -> u64 {
        self.total_calls.load(Ordering::Relaxed)
    }

    /// Number of successful calls recorded.
    pub fn successful_calls(&self) -> u64 {
        self.successful_calls.load(Ordering::Relaxed)
    }

    /// Number of failed calls recorded.
    pub fn failed_calls(&self) -> u64 {
        self.failed_calls.load(Ordering::Relaxed)
    }
}

/// Inject standard Swarm metadata into a gRPC metadata map.
fn inject_metadata(metadata: &mut MetadataMap, cluster_id: &str, request_id: u64) {
    if let Ok(val) = cluster_id.parse() {
        metadata.insert(CLUSTER_ID_METADATA_KEY, val);
    }
    if let Ok(val) = request_id.to_string().parse() {
        metadata.insert(REQUEST_ID_METADATA_KEY, val);
    }
}

/// Extract the cluster ID from incoming request metadata.
pub fn extract_cluster_id<T>(request: &Request<T>) -> Option<&str> {
    request
        .metadata()
        .get(CLUSTER_ID_METADATA_KEY)
        .and_then(|v| v.to_str().ok())
}

/// Extract the request ID from incoming request metadata.
pub fn extract_request_id<T>(request: &Request<T>) -> Option<u64> {
    request
        .metadata()
        .get(REQUEST_ID_METADATA_KEY)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse().ok())
}
