// Copyright 2025 The Swarm Authors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//  http://www.apache.org/licenses/LICENSE-2.0

//! gRPC client framework for Swarm.
//!
//! Provides the tonic-based retryable client wrapper and outgoing-call
//! metadata management used by every peer-specific RPC client crate.

pub mod call_manager;
pub mod client;
