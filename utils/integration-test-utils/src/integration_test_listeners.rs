/********************************************************************************
 * Copyright (c) 2026 Contributors to the Eclipse Foundation
 *
 * See the NOTICE file(s) distributed with this work for additional
 * information regarding copyright ownership.
 *
 * This program and the accompanying materials are made available under the
 * terms of the Apache License Version 2.0 which is available at
 * https://www.apache.org/licenses/LICENSE-2.0
 *
 * SPDX-License-Identifier: Apache-2.0
 ********************************************************************************/

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, Semaphore};
use tokio::time::{sleep, Instant};
use topic_fanout::TopicListener;
use tracing::debug;

const POLL_INTERVAL: Duration = Duration::from_millis(2);

/// Listener that keeps every payload it receives, in arrival order.
#[derive(Clone)]
pub struct RecordingListener<P> {
    payload_store: Arc<Mutex<Vec<P>>>,
}

impl<P> RecordingListener<P> {
    pub fn new() -> Self {
        Self {
            payload_store: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Snapshot of the payloads received so far.
    pub async fn received(&self) -> Vec<P>
    where
        P: Clone,
    {
        self.payload_store.lock().await.clone()
    }

    /// Polls until at least `expected` payloads arrived or `deadline` elapses.
    pub async fn wait_for_payloads(&self, expected: usize, deadline: Duration) -> bool {
        let give_up = Instant::now() + deadline;
        loop {
            if self.payload_store.lock().await.len() >= expected {
                return true;
            }
            if Instant::now() >= give_up {
                return false;
            }
            sleep(POLL_INTERVAL).await;
        }
    }
}

#[async_trait]
impl<P> TopicListener<P> for RecordingListener<P>
where
    P: Send + 'static,
{
    async fn on_payload(&self, payload: P) {
        let mut payload_store = self.payload_store.lock().await;
        payload_store.push(payload);
        debug!(stored = payload_store.len(), "recording listener stored a payload");
    }
}

impl<P> Default for RecordingListener<P> {
    fn default() -> Self {
        Self::new()
    }
}

/// Listener that only counts deliveries, for payload types that are not
/// worth retaining.
#[derive(Clone)]
pub struct CountingListener {
    received: Arc<AtomicUsize>,
}

impl CountingListener {
    pub fn new() -> Self {
        Self {
            received: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn count(&self) -> usize {
        self.received.load(Ordering::SeqCst)
    }

    /// Polls until the count reaches `expected` or `deadline` elapses.
    pub async fn wait_for_count(&self, expected: usize, deadline: Duration) -> bool {
        let give_up = Instant::now() + deadline;
        loop {
            if self.count() >= expected {
                return true;
            }
            if Instant::now() >= give_up {
                return false;
            }
            sleep(POLL_INTERVAL).await;
        }
    }
}

#[async_trait]
impl<P> TopicListener<P> for CountingListener
where
    P: Send + 'static,
{
    async fn on_payload(&self, _payload: P) {
        let received = self.received.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(received, "counting listener saw a payload");
    }
}

impl Default for CountingListener {
    fn default() -> Self {
        Self::new()
    }
}

/// Listener whose deliveries park until the test releases them.
///
/// Each delivery consumes one `release_one` permit, so a test can hold a
/// listener mid-delivery and assert that nothing else stalls with it.
/// Unconsumed permits accumulate, so releases granted before a delivery
/// parks still admit it later.
#[derive(Clone)]
pub struct GateListener {
    gate: Arc<Semaphore>,
    passed: Arc<AtomicUsize>,
}

impl GateListener {
    pub fn new() -> Self {
        Self {
            gate: Arc::new(Semaphore::new(0)),
            passed: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Lets one parked (or future) delivery through.
    pub fn release_one(&self) {
        self.gate.add_permits(1);
    }

    pub fn passed_count(&self) -> usize {
        self.passed.load(Ordering::SeqCst)
    }

    /// Polls until `expected` deliveries passed the gate or `deadline` elapses.
    pub async fn wait_for_passed(&self, expected: usize, deadline: Duration) -> bool {
        let give_up = Instant::now() + deadline;
        loop {
            if self.passed_count() >= expected {
                return true;
            }
            if Instant::now() >= give_up {
                return false;
            }
            sleep(POLL_INTERVAL).await;
        }
    }
}

#[async_trait]
impl<P> TopicListener<P> for GateListener
where
    P: Send + 'static,
{
    async fn on_payload(&self, _payload: P) {
        // The gate semaphore is never closed.
        if let Ok(permit) = self.gate.acquire().await {
            permit.forget();
            let passed = self.passed.fetch_add(1, Ordering::SeqCst) + 1;
            debug!(passed, "gate listener let a payload through");
        }
    }
}

impl Default for GateListener {
    fn default() -> Self {
        Self::new()
    }
}
