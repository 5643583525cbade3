// Copyright 2025 The Swarm Authors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//  http://www.apache.org/licenses/LICENSE-2.0

//! Per-process pool of worker RPC clients.
//!
//! Clients are cached by worker identity in LRU order. The pool carries no
//! size cap; the only garbage collection is the opportunistic idle sweep at
//! the start of every `get_or_connect`. A cached client is additionally
//! invalidated when the liveness probe confirms its worker dead.

use std::sync::{Arc, Weak};

use lru::LruCache;
use parking_lot::Mutex;

use swarm_common::id::{NodeID, WorkerID};
use swarm_common::status::SwarmResult;
use swarm_gcs_rpc_client::GcsClient;
use swarm_proto::swarm::rpc;
use swarm_raylet_rpc_client::RayletClientFactory;
use swarm_rpc::call_manager::ClientCallManager;
use swarm_rpc::client::{RetryConfig, UnavailableTimeoutCallback};

use crate::client::WorkerRpcClient;
use crate::traits::{WorkerClient, WorkerClientFactory};

/// Cache of RPC clients keyed by worker identity.
///
/// All state sits behind one lock; the critical sections are map and list
/// operations only, since the factory builds lazily-connecting stubs.
/// Handles returned by `get_or_connect` stay valid after the pool drops its
/// own reference — eviction only forgets, it never closes.
pub struct WorkerClientPool {
    client_factory: WorkerClientFactory,
    /// Most-recently-used entry at the front. Unbounded: eviction is
    /// idle-gated, never size-gated.
    clients: Mutex<LruCache<WorkerID, Arc<dyn WorkerClient>>>,
}

impl WorkerClientPool {
    pub fn new(client_factory: WorkerClientFactory) -> Self {
        Self {
            client_factory,
            clients: Mutex::new(LruCache::unbounded()),
        }
    }

    /// A pool whose factory builds real `WorkerRpcClient`s wired to the
    /// default liveness probe. The probe holds the pool weakly, so the pool
    /// owns its clients and never the other way around.
    pub fn with_default_factory(
        gcs_client: Arc<GcsClient>,
        raylet_client_factory: RayletClientFactory,
        call_manager: ClientCallManager,
        retry_config: RetryConfig,
    ) -> Arc<Self> {
        Arc::new_cyclic(|weak_pool: &Weak<WorkerClientPool>| {
            let weak_pool = weak_pool.clone();
            let factory: WorkerClientFactory = Arc::new(move |addr: &rpc::Address| {
                let client = WorkerRpcClient::connect_lazy(
                    addr,
                    call_manager.clone(),
                    retry_config.clone(),
                )?;
                let callback = WorkerClientPool::default_unavailable_timeout_callback(
                    &gcs_client,
                    &weak_pool,
                    Arc::clone(&raylet_client_factory),
                    addr,
                );
                client.retry_client().set_unavailable_timeout_callback(callback);
                Ok(Arc::new(client) as Arc<dyn WorkerClient>)
            });
            WorkerClientPool::new(factory)
        })
    }

    /// Return the cached client for `addr`'s worker, constructing one on a
    /// miss. Either way the entry becomes most-recently-used. Runs the idle
    /// sweep first.
    ///
    /// `addr.worker_id` must be non-empty; violations are a caller bug.
    pub fn get_or_connect(&self, addr: &rpc::Address) -> SwarmResult<Arc<dyn WorkerClient>> {
        assert!(
            !addr.worker_id.is_empty(),
            "get_or_connect called with an empty worker id"
        );
        let worker_id = WorkerID::from_binary(&addr.worker_id);

        let mut clients = self.clients.lock();
        Self::remove_idle_clients(&mut clients);

        if let Some(client) = clients.get(&worker_id) {
            return Ok(Arc::clone(client));
        }

        let client = (self.client_factory)(addr)?;
        clients.put(worker_id, Arc::clone(&client));
        tracing::debug!(
            worker_id = %worker_id,
            ip = %addr.ip_address,
            port = addr.port,
            "connected to worker"
        );
        Ok(client)
    }

    /// Sweep from the least-recently-used end: idle entries are dropped; the
    /// first busy entry is promoted to the front and ends the sweep, so a
    /// busy straggler cannot shield older idle entries on the next pass.
    fn remove_idle_clients(clients: &mut LruCache<WorkerID, Arc<dyn WorkerClient>>) {
        loop {
            let (worker_id, idle) = match clients.peek_lru() {
                Some((worker_id, client)) => (*worker_id, client.is_idle_after_rpcs()),
                None => return,
            };
            if idle {
                clients.pop(&worker_id);
                tracing::debug!(
                    worker_id = %worker_id,
                    num_clients = clients.len(),
                    "removed idle worker client"
                );
            } else {
                clients.promote(&worker_id);
                return;
            }
        }
    }

    /// Drop the entry for `worker_id`, if any. Idempotent. Outstanding
    /// caller-held handles stay usable; the pool just stops serving them.
    pub fn disconnect(&self, worker_id: &WorkerID) {
        let mut clients = self.clients.lock();
        if clients.pop(worker_id).is_some() {
            tracing::info!(
                worker_id = %worker_id,
                num_clients = clients.len(),
                "disconnected worker client"
            );
        }
    }

    /// Current number of cached clients. Advisory only.
    pub fn size(&self) -> usize {
        self.clients.lock().len()
    }

    /// Build the callback a worker client invokes when its RPCs keep timing
    /// out with "unavailable".
    ///
    /// The callback consults cluster membership for the worker's node; a
    /// missing (or dead-filtered) record is authoritative and disconnects
    /// the worker immediately. A live record triggers an asynchronous
    /// `IsLocalWorkerDead` probe against that node's raylet, and only a
    /// confirmed-dead reply disconnects — probe transport errors leave the
    /// client pooled so a transient raylet partition cannot orphan a live
    /// peer.
    ///
    /// Requires an active node-change subscription; invoking the callback
    /// without one is a configuration bug and crashes.
    pub fn default_unavailable_timeout_callback(
        gcs_client: &Arc<GcsClient>,
        worker_client_pool: &Weak<WorkerClientPool>,
        raylet_client_factory: RayletClientFactory,
        addr: &rpc::Address,
    ) -> UnavailableTimeoutCallback {
        let node_id = NodeID::from_binary(&addr.node_id);
        let worker_id = WorkerID::from_binary(&addr.worker_id);
        let gcs_client = Arc::clone(gcs_client);
        let worker_client_pool = Weak::clone(worker_client_pool);

        Arc::new(move || {
            assert!(
                gcs_client.nodes().is_subscribed_to_node_change(),
                "the liveness probe requires an active node-change subscription"
            );
            let Some(pool) = worker_client_pool.upgrade() else {
                return;
            };

            let node_info = gcs_client.nodes().get(&node_id, /*filter_dead_nodes=*/ true);
            let Some(node_info) = node_info else {
                tracing::info!(
                    worker_id = %worker_id,
                    node_id = %node_id,
                    "disconnecting worker client since its node is dead"
                );
                pool.disconnect(&worker_id);
                return;
            };

            let raylet_client = raylet_client_factory(
                &node_info.node_manager_address,
                node_info.node_manager_port as u16,
            );
            tokio::spawn(async move {
                let req = rpc::IsLocalWorkerDeadRequest {
                    worker_id: worker_id.binary(),
                };
                match raylet_client.is_local_worker_dead(req).await {
                    Err(status) => {
                        tracing::info!(
                            worker_id = %worker_id,
                            node_id = %node_id,
                            error = %status,
                            "failed to check whether worker is dead on request to raylet"
                        );
                    }
                    Ok(reply) if reply.is_dead => {
                        tracing::info!(
                            worker_id = %worker_id,
                            "disconnecting worker client since it is dead"
                        );
                        pool.disconnect(&worker_id);
                    }
                    Ok(_) => {}
                }
            });
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::time::Duration;

    use tonic::Status;

    use swarm_common::id::ClusterID;
    use swarm_common::status::SwarmError;
    use swarm_gcs_rpc_client::GcsSubscriberClient;
    use swarm_raylet_rpc_client::RayletClient;
    use swarm_test_utils::mock_clients::{FakeGcsRpc, FakeRayletClient};
    use swarm_test_utils::proto_builders::{gen_node_info, gen_worker_address};
    use swarm_test_utils::wait::wait_for_condition;

    /// A worker client whose idleness is scripted by the test.
    struct MockWorkerClient {
        idle: AtomicBool,
    }

    impl MockWorkerClient {
        fn new(idle: bool) -> Self {
            Self {
                idle: AtomicBool::new(idle),
            }
        }

        fn set_idle(&self, idle: bool) {
            self.idle.store(idle, Ordering::Release);
        }
    }

    #[async_trait::async_trait]
    impl WorkerClient for MockWorkerClient {
        async fn push_task(
            &self,
            _req: rpc::PushTaskRequest,
        ) -> Result<rpc::PushTaskReply, Status> {
            Err(Status::unimplemented("mock"))
        }
        async fn num_pending_tasks(
            &self,
            _req: rpc::NumPendingTasksRequest,
        ) -> Result<rpc::NumPendingTasksReply, Status> {
            Err(Status::unimplemented("mock"))
        }
        async fn get_or_create_runtime_env(
            &self,
            _req: rpc::GetOrCreateRuntimeEnvRequest,
        ) -> Result<rpc::GetOrCreateRuntimeEnvReply, Status> {
            Err(Status::unimplemented("mock"))
        }
        async fn delete_runtime_env_if_possible(
            &self,
            _req: rpc::DeleteRuntimeEnvIfPossibleRequest,
        ) -> Result<rpc::DeleteRuntimeEnvIfPossibleReply, Status> {
            Err(Status::unimplemented("mock"))
        }
        async fn get_runtime_envs_info(
            &self,
            _req: rpc::GetRuntimeEnvsInfoRequest,
        ) -> Result<rpc::GetRuntimeEnvsInfoReply, Status> {
            Err(Status::unimplemented("mock"))
        }
        fn is_idle_after_rpcs(&self) -> bool {
            self.idle.load(Ordering::Acquire)
        }
    }

    /// Pool over mock clients, with handles and a factory-call counter the
    /// test can inspect.
    struct MockPoolHarness {
        pool: Arc<WorkerClientPool>,
        created: Arc<Mutex<HashMap<WorkerID, Arc<MockWorkerClient>>>>,
        factory_calls: Arc<AtomicUsize>,
    }

    /// Mocks start busy unless listed in `idle_from_start`.
    fn mock_pool(idle_from_start: Vec<WorkerID>) -> MockPoolHarness {
        let created: Arc<Mutex<HashMap<WorkerID, Arc<MockWorkerClient>>>> =
            Arc::new(Mutex::new(HashMap::new()));
        let factory_calls = Arc::new(AtomicUsize::new(0));

        let created_clone = Arc::clone(&created);
        let factory_calls_clone = Arc::clone(&factory_calls);
        let pool = Arc::new(WorkerClientPool::new(Arc::new(move |addr: &rpc::Address| {
            factory_calls_clone.fetch_add(1, Ordering::Relaxed);
            let worker_id = WorkerID::from_binary(&addr.worker_id);
            let client = Arc::new(MockWorkerClient::new(idle_from_start.contains(&worker_id)));
            created_clone.lock().insert(worker_id, Arc::clone(&client));
            Ok(client as Arc<dyn WorkerClient>)
        })));

        MockPoolHarness {
            pool,
            created,
            factory_calls,
        }
    }

    impl WorkerClientPool {
        /// Worker ids front (most recent) to back.
        fn lru_order(&self) -> Vec<WorkerID> {
            self.clients.lock().iter().map(|(id, _)| *id).collect()
        }
    }

    fn address_for(worker_id: &WorkerID) -> rpc::Address {
        gen_worker_address(worker_id, &NodeID::from_random(), "127.0.0.1", 7199)
    }

    #[test]
    fn test_get_or_connect_caches_client() {
        let harness = mock_pool(vec![]);
        let addr = address_for(&WorkerID::from_random());

        let c1 = harness.pool.get_or_connect(&addr).unwrap();
        let c2 = harness.pool.get_or_connect(&addr).unwrap();
        assert!(Arc::ptr_eq(&c1, &c2));
        assert_eq!(harness.factory_calls.load(Ordering::Relaxed), 1);
        assert_eq!(harness.pool.size(), 1);
    }

    #[test]
    #[should_panic(expected = "empty worker id")]
    fn test_get_or_connect_empty_worker_id_panics() {
        let harness = mock_pool(vec![]);
        let addr = rpc::Address {
            worker_id: vec![],
            ..address_for(&WorkerID::from_random())
        };
        let _ = harness.pool.get_or_connect(&addr);
    }

    #[test]
    fn test_factory_error_leaves_no_state() {
        let pool = WorkerClientPool::new(Arc::new(|_addr: &rpc::Address| {
            Err(SwarmError::io_error("stub construction failed"))
        }));
        let addr = address_for(&WorkerID::from_random());
        let err = pool.get_or_connect(&addr).err().unwrap();
        assert_eq!(err.to_string(), "IOError: stub construction failed");
        assert_eq!(pool.size(), 0);
    }

    #[test]
    fn test_disconnect_removes_entry_and_is_idempotent() {
        let harness = mock_pool(vec![]);
        let worker_id = WorkerID::from_random();
        let addr = address_for(&worker_id);

        harness.pool.get_or_connect(&addr).unwrap();
        assert_eq!(harness.pool.size(), 1);

        harness.pool.disconnect(&worker_id);
        assert_eq!(harness.pool.size(), 0);
        harness.pool.disconnect(&worker_id);
        assert_eq!(harness.pool.size(), 0);

        // Reconnecting invokes the factory again
        harness.pool.get_or_connect(&addr).unwrap();
        assert_eq!(harness.factory_calls.load(Ordering::Relaxed), 2);
        assert_eq!(harness.pool.size(), 1);
    }

    #[test]
    fn test_disconnect_unknown_worker_is_noop() {
        let harness = mock_pool(vec![]);
        harness.pool.disconnect(&WorkerID::from_random());
        assert_eq!(harness.pool.size(), 0);
    }

    #[test]
    fn test_caller_held_handle_survives_eviction() {
        let harness = mock_pool(vec![]);
        let worker_id = WorkerID::from_random();
        let addr = address_for(&worker_id);

        let client = harness.pool.get_or_connect(&addr).unwrap();
        harness.pool.disconnect(&worker_id);
        // The handle is still usable; only the pool forgot it
        assert!(!client.is_idle_after_rpcs());
    }

    #[test]
    fn test_idle_eviction_walks_past_busy_entry() {
        let w1 = WorkerID::from_random();
        let w2 = WorkerID::from_random();
        let w3 = WorkerID::from_random();
        let w4 = WorkerID::from_random();
        // w1 and w3 report idle whenever the sweep polls them; w2 stays busy
        let harness = mock_pool(vec![w1, w3]);

        harness.pool.get_or_connect(&address_for(&w1)).unwrap();
        harness.pool.get_or_connect(&address_for(&w2)).unwrap();
        harness.pool.get_or_connect(&address_for(&w3)).unwrap();
        harness.pool.get_or_connect(&address_for(&w4)).unwrap();

        // w1 was evicted once it reached the LRU end; w2 was promoted when
        // the sweep found it busy; w3 had not reached the end yet.
        assert_eq!(harness.pool.size(), 3);
        assert_eq!(harness.pool.lru_order(), vec![w4, w2, w3]);
        assert_eq!(harness.factory_calls.load(Ordering::Relaxed), 4);
    }

    #[test]
    fn test_sweep_evicts_consecutive_idle_entries() {
        let w1 = WorkerID::from_random();
        let w2 = WorkerID::from_random();
        let w3 = WorkerID::from_random();
        let harness = mock_pool(vec![]);

        harness.pool.get_or_connect(&address_for(&w1)).unwrap();
        harness.pool.get_or_connect(&address_for(&w2)).unwrap();
        harness.pool.get_or_connect(&address_for(&w3)).unwrap();
        assert_eq!(harness.pool.size(), 3);

        for client in harness.created.lock().values() {
            client.set_idle(true);
        }

        // The next access sweeps all three, then inserts the newcomer
        let w5 = WorkerID::from_random();
        harness.pool.get_or_connect(&address_for(&w5)).unwrap();
        assert_eq!(harness.pool.size(), 1);
        assert_eq!(harness.pool.lru_order(), vec![w5]);
    }

    #[test]
    fn test_busy_entry_delays_but_does_not_block_older_idle_eviction() {
        let wa = WorkerID::from_random();
        let wb = WorkerID::from_random();
        let harness = mock_pool(vec![]);

        harness.pool.get_or_connect(&address_for(&wb)).unwrap();
        harness.pool.get_or_connect(&address_for(&wa)).unwrap();
        assert_eq!(harness.pool.lru_order(), vec![wa, wb]);

        // The LRU-end entry is busy, the fresher one idle
        harness.created.lock().get(&wa).unwrap().set_idle(true);

        // This sweep finds busy wb at the end, promotes it, and stops:
        // idle wa is shielded for this pass only
        let wc = WorkerID::from_random();
        harness.pool.get_or_connect(&address_for(&wc)).unwrap();
        assert_eq!(harness.pool.lru_order(), vec![wc, wb, wa]);

        // The promotion exposed wa at the LRU end, so the next sweep drops it
        let wd = WorkerID::from_random();
        harness.pool.get_or_connect(&address_for(&wd)).unwrap();
        assert_eq!(harness.pool.lru_order(), vec![wd, wb, wc]);
    }

    #[test]
    fn test_promotion_on_access() {
        let w1 = WorkerID::from_random();
        let w2 = WorkerID::from_random();
        let harness = mock_pool(vec![]);

        harness.pool.get_or_connect(&address_for(&w1)).unwrap();
        harness.pool.get_or_connect(&address_for(&w2)).unwrap();
        harness.pool.get_or_connect(&address_for(&w1)).unwrap();

        assert_eq!(harness.pool.lru_order(), vec![w1, w2]);
    }

    #[test]
    fn test_size_matches_lru_order_length() {
        let harness = mock_pool(vec![]);
        for _ in 0..5 {
            harness
                .pool
                .get_or_connect(&address_for(&WorkerID::from_random()))
                .unwrap();
        }
        assert_eq!(harness.pool.size(), harness.pool.lru_order().len());
        assert_eq!(harness.pool.size(), 5);
    }

    // ─── Liveness callback ──────────────────────────────────────────────

    struct CallbackHarness {
        pool: Arc<WorkerClientPool>,
        raylet: Arc<FakeRayletClient>,
        callback: UnavailableTimeoutCallback,
        worker_id: WorkerID,
    }

    /// Pool with one pooled mock client plus the liveness callback for it.
    /// `node_info` is what membership knows about the worker's node.
    async fn callback_harness(node_info: Option<rpc::GcsNodeInfo>) -> CallbackHarness {
        let worker_id = WorkerID::from_random();
        let node_id = NodeID::from_random();
        let addr = gen_worker_address(&worker_id, &node_id, "127.0.0.1", 7199);

        let gcs_rpc = FakeGcsRpc::new();
        if let Some(mut info) = node_info {
            info.node_id = node_id.binary();
            gcs_rpc.add_node(info);
        }
        let gcs = Arc::new(GcsClient::new(Arc::new(gcs_rpc)));
        let subscriber = GcsSubscriberClient::new(worker_id.binary());
        gcs.subscribe_to_node_change(&subscriber).await.unwrap();

        let raylet = Arc::new(FakeRayletClient::new());
        let raylet_for_factory = Arc::clone(&raylet);
        let raylet_factory: RayletClientFactory = Arc::new(move |_address, _port| {
            Arc::clone(&raylet_for_factory) as Arc<dyn RayletClient>
        });

        let pool = Arc::new(WorkerClientPool::new(Arc::new(|_addr: &rpc::Address| {
            Ok(Arc::new(MockWorkerClient::new(false)) as Arc<dyn WorkerClient>)
        })));
        pool.get_or_connect(&addr).unwrap();

        let callback = WorkerClientPool::default_unavailable_timeout_callback(
            &gcs,
            &Arc::downgrade(&pool),
            raylet_factory,
            &addr,
        );

        CallbackHarness {
            pool,
            raylet,
            callback,
            worker_id,
        }
    }

    #[tokio::test]
    async fn test_callback_disconnects_when_node_unknown() {
        let harness = callback_harness(None).await;
        assert_eq!(harness.pool.size(), 1);

        (harness.callback)();

        // Membership is authoritative: disconnected synchronously, no probe
        assert_eq!(harness.pool.size(), 0);
        assert_eq!(harness.raylet.num_requests(), 0);
    }

    #[tokio::test]
    async fn test_callback_disconnects_when_node_dead() {
        let mut info = gen_node_info(&NodeID::from_random(), "127.0.0.1", 7100);
        info.state = rpc::GcsNodeState::Dead as i32;
        let harness = callback_harness(Some(info)).await;

        (harness.callback)();

        assert_eq!(harness.pool.size(), 0);
        assert_eq!(harness.raylet.num_requests(), 0);
    }

    #[tokio::test]
    async fn test_callback_disconnects_when_raylet_reports_dead() {
        let info = gen_node_info(&NodeID::from_random(), "127.0.0.1", 7100);
        let harness = callback_harness(Some(info)).await;
        harness.raylet.push_reply(Ok(true));

        (harness.callback)();

        let pool = Arc::clone(&harness.pool);
        assert!(wait_for_condition(move || pool.size() == 0, 1000).await);
        let probe = harness.raylet.pop_request().unwrap();
        assert_eq!(probe.worker_id, harness.worker_id.binary());
    }

    #[tokio::test]
    async fn test_callback_keeps_client_when_worker_alive() {
        let info = gen_node_info(&NodeID::from_random(), "127.0.0.1", 7100);
        let harness = callback_harness(Some(info)).await;
        harness.raylet.push_reply(Ok(false));

        (harness.callback)();

        let raylet = Arc::clone(&harness.raylet);
        assert!(wait_for_condition(move || raylet.num_requests() == 1, 1000).await);
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(harness.pool.size(), 1);
    }

    #[tokio::test]
    async fn test_callback_keeps_client_on_probe_transport_error() {
        let info = gen_node_info(&NodeID::from_random(), "127.0.0.1", 7100);
        let harness = callback_harness(Some(info)).await;
        harness
            .raylet
            .push_reply(Err(Status::unavailable("raylet unreachable")));

        (harness.callback)();

        let raylet = Arc::clone(&harness.raylet);
        assert!(wait_for_condition(move || raylet.num_requests() == 1, 1000).await);
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(harness.pool.size(), 1);
    }

    #[tokio::test]
    async fn test_callback_noop_after_pool_dropped() {
        let harness = callback_harness(None).await;
        let callback = harness.callback;
        let raylet = harness.raylet;
        drop(harness.pool);

        // Must not panic or probe once the pool is gone
        callback();
        assert_eq!(raylet.num_requests(), 0);
    }

    #[tokio::test]
    #[should_panic(expected = "node-change subscription")]
    async fn test_callback_without_subscription_is_a_config_bug() {
        let worker_id = WorkerID::from_random();
        let addr = gen_worker_address(&worker_id, &NodeID::from_random(), "127.0.0.1", 7199);

        // No subscribe_to_node_change call
        let gcs = Arc::new(GcsClient::new(Arc::new(FakeGcsRpc::new())));
        let raylet_factory: RayletClientFactory = Arc::new(move |_address, _port| {
            Arc::new(FakeRayletClient::new()) as Arc<dyn RayletClient>
        });
        let pool = Arc::new(WorkerClientPool::new(Arc::new(|_addr: &rpc::Address| {
            Ok(Arc::new(MockWorkerClient::new(false)) as Arc<dyn WorkerClient>)
        })));

        let callback = WorkerClientPool::default_unavailable_timeout_callback(
            &gcs,
            &Arc::downgrade(&pool),
            raylet_factory,
            &addr,
        );
        callback();
    }

    #[tokio::test]
    async fn test_with_default_factory_builds_real_clients() {
        let gcs = Arc::new(GcsClient::new(Arc::new(FakeGcsRpc::new())));
        let subscriber = GcsSubscriberClient::new(b"pool-test".to_vec());
        gcs.subscribe_to_node_change(&subscriber).await.unwrap();

        let raylet_factory: RayletClientFactory = Arc::new(move |_address, _port| {
            Arc::new(FakeRayletClient::new()) as Arc<dyn RayletClient>
        });
        let call_manager =
            ClientCallManager::new(ClusterID::from_random(), Duration::from_secs(30));
        let pool = WorkerClientPool::with_default_factory(
            gcs,
            raylet_factory,
            call_manager,
            RetryConfig::default(),
        );

        let addr = gen_worker_address(
            &WorkerID::from_random(),
            &NodeID::from_random(),
            "127.0.0.1",
            7199,
        );
        let client = pool.get_or_connect(&addr).unwrap();
        assert_eq!(pool.size(), 1);
        // Fresh real client with no traffic reads as idle
        assert!(client.is_idle_after_rpcs());
    }
}
