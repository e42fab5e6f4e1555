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

//! Listener seam for callback-style subscribers.

use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;

/// Receives each payload published to a topic the listener is registered on.
///
/// Every invocation runs in its own spawned delivery task, so a slow or
/// suspended implementation delays only its own deliveries, never other
/// subscribers and never the publisher.
#[async_trait]
pub trait TopicListener<P>: Send + Sync {
    /// Called once per admitted publish with the listener's own clone of the
    /// payload.
    async fn on_payload(&self, payload: P);
}

/// Adapter turning an async closure into a [`TopicListener`].
///
/// # Examples
///
/// ```
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
/// use topic_fanout::{FnListener, TopicListener};
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let seen = Arc::new(AtomicUsize::new(0));
/// let seen_by_listener = seen.clone();
///
/// let listener: Arc<dyn TopicListener<usize>> = FnListener::arc(move |payload: usize| {
///     let seen = seen_by_listener.clone();
///     async move {
///         seen.fetch_add(payload, Ordering::SeqCst);
///     }
/// });
///
/// listener.on_payload(7).await;
/// assert_eq!(seen.load(Ordering::SeqCst), 7);
/// # });
/// ```
pub struct FnListener<F> {
    f: F,
}

impl<F> FnListener<F> {
    /// Wraps `f` without allocating a shared handle.
    pub fn new(f: F) -> Self {
        Self { f }
    }

    /// Wraps `f` and returns it as a shared handle ready for registration.
    pub fn arc(f: F) -> Arc<Self> {
        Arc::new(Self::new(f))
    }
}

#[async_trait]
impl<P, F, Fut> TopicListener<P> for FnListener<F>
where
    P: Send + 'static,
    F: Fn(P) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send,
{
    async fn on_payload(&self, payload: P) {
        (self.f)(payload).await;
    }
}
