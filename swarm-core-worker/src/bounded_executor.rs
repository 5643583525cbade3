// Copyright 2025 The Swarm Authors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//  http://www.apache.org/licenses/LICENSE-2.0

//! Fixed-width work dispatch with submit-side backpressure.
//!
//! Wraps the blocking thread pool behind a counting semaphore so that posts
//! suspend once all slots are taken. The scheduling queue relies on this to
//! keep its dispatch backlog bounded.

use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use tokio::sync::Semaphore;

/// Lifecycle of a [`BoundedExecutor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExecutorState {
    Accepting = 0,
    Stopping = 1,
    Stopped = 2,
}

impl ExecutorState {
    fn from_u8(v: u8) -> Self {
        match v {
            0 => Self::Accepting,
            1 => Self::Stopping,
            _ => Self::Stopped,
        }
    }
}

/// Runs submitted closures with at most `max_concurrency` executing at once.
///
/// [`post`](Self::post) suspends the submitter while the executor is
/// saturated. Permits are granted in FIFO order, so accepted submissions
/// dispatch first-come-first-served and none is ever dropped.
pub struct BoundedExecutor {
    max_concurrency: usize,
    slots: Arc<Semaphore>,
    state: AtomicU8,
}

impl BoundedExecutor {
    /// Whether the scheduling queue needs a dedicated executor for the
    /// default concurrency group. A singleton default group with no other
    /// groups runs inline instead.
    pub fn need_default_executor(
        max_concurrency_in_default_group: i32,
        has_other_concurrency_groups: bool,
    ) -> bool {
        if max_concurrency_in_default_group == 0 {
            return false;
        }
        max_concurrency_in_default_group > 1 || has_other_concurrency_groups
    }

    pub fn new(max_concurrency: usize) -> Self {
        assert!(max_concurrency >= 1, "max_concurrency must be at least 1");
        Self {
            max_concurrency,
            slots: Arc::new(Semaphore::new(max_concurrency)),
            state: AtomicU8::new(ExecutorState::Accepting as u8),
        }
    }

    pub fn max_concurrency(&self) -> usize {
        self.max_concurrency
    }

    pub fn state(&self) -> ExecutorState {
        ExecutorState::from_u8(self.state.load(Ordering::Acquire))
    }

    pub fn is_accepting(&self) -> bool {
        self.state() == ExecutorState::Accepting
    }

    /// Submit a closure, suspending until a slot is free.
    ///
    /// Posting after [`stop`](Self::stop) is a caller bug. A closure that
    /// panics is logged and its slot freed; the executor keeps running.
    pub async fn post<F>(&self, fn_: F)
    where
        F: FnOnce() + Send + 'static,
    {
        assert!(self.is_accepting(), "post called after stop");
        let permit = Arc::clone(&self.slots)
            .acquire_owned()
            .await
            .expect("executor semaphore closed");
        tokio::task::spawn_blocking(move || {
            let _permit = permit;
            if let Err(panic) = std::panic::catch_unwind(AssertUnwindSafe(fn_)) {
                let msg = panic
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| panic.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "non-string panic payload".to_string());
                tracing::error!(panic = %msg, "posted closure panicked; slot freed");
            }
        });
    }

    /// Stop accepting new posts. Already-accepted closures still run.
    pub fn stop(&self) {
        self.state
            .store(ExecutorState::Stopping as u8, Ordering::Release);
    }

    /// Wait until every accepted closure has completed. Call after
    /// [`stop`](Self::stop).
    pub async fn join(&self) {
        let all_slots = self
            .slots
            .acquire_many(self.max_concurrency as u32)
            .await
            .expect("executor semaphore closed");
        drop(all_slots);
        self.state
            .store(ExecutorState::Stopped as u8, Ordering::Release);
    }
}
