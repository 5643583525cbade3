// Copyright 2025 The Swarm Authors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//  http://www.apache.org/licenses/LICENSE-2.0

//! gRPC client framework wrapping tonic channels.

use std::future::Future;
use std::sync::atomic::{AtomicU8, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tonic::transport::Channel;
use tonic::{Code, Status};

use swarm_common::config::SwarmConfig;

/// Connection state of the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ConnectionState {
    Connected = 0,
    Disconnected = 1,
    Reconnecting = 2,
}

impl ConnectionState {
    fn from_u8(v: u8) -> Self {
        match v {
            0 => Self::Connected,
            1 => Self::Disconnected,
            2 => Self::Reconnecting,
            _ => Self::Disconnected,
        }
    }
}

/// Callback invoked when the client abandons a call because the server stayed
/// unavailable past the retry budget or the unavailable deadline.
///
/// Worker clients use this hook to trigger the pool's liveness probe.
pub type UnavailableTimeoutCallback = Arc<dyn Fn() + Send + Sync>;

/// Configuration for retry behavior on gRPC calls.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retry attempts.
    pub max_retries: u32,
    /// Initial retry delay.
    pub initial_delay: Duration,
    /// Maximum retry delay.
    pub max_delay: Duration,
    /// Backoff multiplier.
    pub multiplier: f64,
    /// How long to wait before declaring the server unavailable.
    pub server_unavailable_timeout: Duration,
    /// Maximum bytes of pending (in-flight) requests before rejecting new ones.
    pub max_pending_bytes: usize,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(5),
            multiplier: 2.0,
            server_unavailable_timeout: Duration::from_secs(60),
            max_pending_bytes: 100 * 1024 * 1024, // 100MB
        }
    }
}

impl RetryConfig {
    /// Build a retry config from the process-wide SwarmConfig knobs.
    pub fn from_swarm_config(config: &SwarmConfig) -> Self {
        Self {
            max_retries: config.grpc_client_max_retries,
            initial_delay: Duration::from_millis(config.grpc_client_initial_retry_delay_ms),
            max_delay: Duration::from_millis(config.grpc_client_max_retry_delay_ms),
            multiplier: 2.0,
            server_unavailable_timeout: Duration::from_secs(
                config.grpc_server_unavailable_timeout_seconds,
            ),
            max_pending_bytes: config.grpc_client_max_pending_bytes as usize,
        }
    }
}

/// A gRPC client wrapper with retry support.
///
/// Wraps a tonic `Channel` with retry logic. Use
/// [`call_with_retry`](Self::call_with_retry) to execute an RPC with automatic
/// retries on transient failures. An optional unavailable-timeout callback
/// fires when a call is abandoned because the server stayed unreachable.
#[derive(Clone)]
pub struct RetryableGrpcClient {
    channel: Channel,
    retry_config: RetryConfig,
    connection_state: Arc<AtomicU8>,
    pending_bytes: Arc<AtomicUsize>,
    unavailable_timeout_callback: Arc<Mutex<Option<UnavailableTimeoutCallback>>>,
}

impl RetryableGrpcClient {
    pub fn new(channel: Channel, retry_config: RetryConfig) -> Self {
        Self {
            channel,
            retry_config,
            connection_state: Arc::new(AtomicU8::new(ConnectionState::Connected as u8)),
            pending_bytes: Arc::new(AtomicUsize::new(0)),
            unavailable_timeout_callback: Arc::new(Mutex::new(None)),
        }
    }

    /// Get the underlying channel for making RPC calls.
    pub fn channel(&self) -> &Channel {
        &self.channel
    }

    /// Get a cloned channel suitable for creating service stubs.
    pub fn channel_cloned(&self) -> Channel {
        self.channel.clone()
    }

    /// Get the retry configuration.
    pub fn retry_config(&self) -> &RetryConfig {
        &self.retry_config
    }

    /// Current connection state.
    pub fn connection_state(&self) -> ConnectionState {
        ConnectionState::from_u8(self.connection_state.load(Ordering::Relaxed))
    }

    /// Current pending request bytes.
    pub fn pending_bytes(&self) -> usize {
        self.pending_bytes.load(Ordering::Relaxed)
    }

    /// Whether the client believes the server is reachable.
    pub fn is_connected(&self) -> bool {
        self.connection_state() == ConnectionState::Connected
    }

    /// Install the callback invoked when the server is declared unavailable.
    ///
    /// May be called at most once per client, before the first RPC.
    pub fn set_unavailable_timeout_callback(&self, callback: UnavailableTimeoutCallback) {
        *self.unavailable_timeout_callback.lock() = Some(callback);
    }

    fn notify_server_unavailable(&self) {
        let callback = self.unavailable_timeout_callback.lock().clone();
        if let Some(callback) = callback {
            callback();
        }
    }

    /// Connect to a gRPC endpoint and create a channel.
    pub async fn connect(addr: &str) -> Result<Channel, tonic::transport::Error> {
        Channel::from_shared(addr.to_string())
            .expect("invalid URI")
            .connect()
            .await
    }

    /// Create a lazily-connecting channel (does not connect until first RPC).
    pub fn connect_lazy(addr: &str) -> Channel {
        Channel::from_shared(addr.to_string())
            .expect("invalid URI")
            .connect_lazy()
    }

    /// Execute an RPC call with automatic retry on transient failures.
    ///
    /// `request_size` is used for pending-bytes throttling. Pass 0 if throttling
    /// is not needed. `timeout` overrides the default server_unavailable_timeout.
    /// `rpc_fn` is a closure that performs the actual RPC call — it will be called
    /// multiple times on transient failure.
    pub async fn call_with_retry<F, Fut, T>(
        &self,
        request_size: usize,
        timeout: Option<Duration>,
        rpc_fn: F,
    ) -> Result<T, Status>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, Status>>,
    {
        // Check pending bytes limit
        let prev = self.pending_bytes.fetch_add(request_size, Ordering::Relaxed);
        if request_size > 0 && prev + request_size > self.retry_config.max_pending_bytes {
            self.pending_bytes
                .fetch_sub(request_size, Ordering::Relaxed);
            return Err(Status::resource_exhausted(
                "max pending request bytes exceeded",
            ));
        }

        let result = self.retry_loop(timeout, &rpc_fn).await;

        self.pending_bytes
            .fetch_sub(request_size, Ordering::Relaxed);
        result
    }

    async fn retry_loop<F, Fut, T>(
        &self,
        timeout: Option<Duration>,
        rpc_fn: &F,
    ) -> Result<T, Status>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, Status>>,
    {
        let timeout_duration = timeout.unwrap_or(self.retry_config.server_unavailable_timeout);
        let deadline = tokio::time::Instant::now() + timeout_duration;
        let mut delay = self.retry_config.initial_delay;
        let mut attempts = 0u32;

        loop {
            let result = rpc_fn().await;

            match &result {
                Ok(_) => {
                    self.connection_state
                        .store(ConnectionState::Connected as u8, Ordering::Relaxed);
                    return result;
                }
                Err(status) => {
                    if !is_transient(status.code()) {
                        return result;
                    }

                    attempts += 1;
                    if attempts > self.retry_config.max_retries {
                        self.connection_state
                            .store(ConnectionState::Disconnected as u8, Ordering::Relaxed);
                        if status.code() == Code::Unavailable {
                            self.notify_server_unavailable();
                        }
                        return result;
                    }

                    if tokio::time::Instant::now() + delay > deadline {
                        self.connection_state
                            .store(ConnectionState::Disconnected as u8, Ordering::Relaxed);
                        if status.code() == Code::Unavailable {
                            self.notify_server_unavailable();
                        }
                        return Err(Status::deadline_exceeded(format!(
                            "server unavailable after {timeout_duration:?}"
                        )));
                    }

                    self.connection_state
                        .store(ConnectionState::Reconnecting as u8, Ordering::Relaxed);

                    tracing::debug!(
                        attempts,
                        code = ?status.code(),
                        delay_ms = delay.as_millis() as u64,
                        "retrying RPC"
                    );

                    tokio::time::sleep(delay).await;

                    // Exponential backoff capped at max_delay
                    delay = std::cmp::min(
                        Duration::from_secs_f64(
                            delay.as_secs_f64() * self.retry_config.multiplier,
                        ),
                        self.retry_config.max_delay,
                    );
                }
            }
        }
    }
}

/// Whether a gRPC status code represents a transient error worth retrying.
pub fn is_transient(code: Code) -> bool {
    matches!(
        code,
        Code::Unavailable | Code::DeadlineExceeded | Code::ResourceExhausted | Code::Aborted
    )
}
