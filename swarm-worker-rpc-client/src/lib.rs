// Copyright 2025 The Swarm Authors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//  http://www.apache.org/licenses/LICENSE-2.0

//! Worker-to-worker RPC clients and the per-process client pool.
//!
//! Every worker keeps one pooled RPC client per peer it talks to. The pool
//! caches clients keyed by worker identity, garbage-collects idle peers in
//! LRU order, and invalidates a cached client once the remote worker (or its
//! hosting node) is confirmed dead by the liveness probe.

pub mod client;
pub mod client_pool;
pub mod traits;

pub use client::WorkerRpcClient;
pub use client_pool::WorkerClientPool;
pub use traits::{WorkerClient, WorkerClientFactory};
