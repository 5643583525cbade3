// Copyright 2025 The Swarm Authors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//  http://www.apache.org/licenses/LICENSE-2.0

//! Worker-side task execution primitives.

pub mod bounded_executor;

pub use bounded_executor::{BoundedExecutor, ExecutorState};
