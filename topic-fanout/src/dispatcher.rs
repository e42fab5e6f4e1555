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

//! Topic-name routing facade: the [`Dispatch`] contract and its single
//! concrete implementation, [`Dispatcher`].

use crate::filter::DeliveryFilter;
use crate::identity::SubscriberId;
use crate::listener::TopicListener;
use crate::observability::{events, fields};
use crate::topic::TopicRegistry;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::mpsc::Sender;
use tokio::sync::RwLock;
use tracing::debug;

const COMPONENT: &str = "dispatcher";

/// Topic-keyed publish/subscribe operations.
///
/// Every operation is total: unknown topics and unknown identities are valid
/// inputs that resolve to silent no-ops, and nothing here returns an error.
/// Publishing never waits on delivery; a slow subscriber delays only its own
/// delivery task.
#[async_trait]
pub trait Dispatch<P>: Send + Sync {
    /// Registers `listener` under `id` on `topic`, creating the topic on its
    /// first registration and overwriting any listener already held by `id`.
    async fn register_listener(
        &self,
        id: SubscriberId,
        topic: &str,
        listener: Arc<dyn TopicListener<P>>,
    );

    /// Registers the sending half of a delivery channel under `id` on
    /// `topic`, creating the topic on its first registration and overwriting
    /// any channel already held by `id`. The caller keeps the receiving half
    /// and picks the capacity; the dispatcher never closes the channel.
    async fn register_channel(&self, id: SubscriberId, topic: &str, sender: Sender<P>);

    /// Removes the listener held by `id` on `topic`; no-op when either is
    /// unknown.
    async fn unregister_listener(&self, id: SubscriberId, topic: &str);

    /// Removes the delivery channel held by `id` on `topic`; no-op when
    /// either is unknown.
    async fn unregister_channel(&self, id: SubscriberId, topic: &str);

    /// Delivers `payload` to every subscriber of `topic`; dropped silently
    /// when the topic has never seen a registration.
    async fn send(&self, topic: &str, payload: P);

    /// Delivers `payload` only to subscribers of `topic` whose identity is in
    /// `include`; identities without a registration are ignored.
    async fn send_to(&self, topic: &str, payload: P, include: HashSet<SubscriberId>);

    /// Delivers `payload` to every subscriber of `topic` except those whose
    /// identity is in `exclude`.
    async fn send_except(&self, topic: &str, payload: P, exclude: HashSet<SubscriberId>);
}

/// Owner of all topics and entry point for registration and publishing.
///
/// Topics are created lazily on first registration and persist for the
/// dispatcher's lifetime even when their last subscriber unregisters. The
/// payload type is opaque; only `Clone + Send + 'static` is required.
///
/// # Examples
///
/// ```
/// use std::collections::HashSet;
/// use tokio::sync::mpsc;
/// use topic_fanout::{Dispatch, Dispatcher, FnListener, SubscriberId};
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let dispatcher = Dispatcher::new();
///
/// let id = SubscriberId::generate();
/// let (tx, mut rx) = mpsc::channel(4);
/// dispatcher.register_channel(id, "telemetry", tx).await;
///
/// let printer = FnListener::arc(|payload: String| async move {
///     println!("observed {payload}");
/// });
/// dispatcher
///     .register_listener(SubscriberId::generate(), "telemetry", printer)
///     .await;
///
/// dispatcher.send("telemetry", "reading-1".to_string()).await;
/// assert_eq!(rx.recv().await.as_deref(), Some("reading-1"));
///
/// // Restrict one publish to a single identity.
/// dispatcher
///     .send_to("telemetry", "reading-2".to_string(), HashSet::from([id]))
///     .await;
/// assert_eq!(rx.recv().await.as_deref(), Some("reading-2"));
///
/// // Unknown topics are valid no-op targets.
/// dispatcher.send("nobody-listens-here", "dropped".to_string()).await;
/// # });
/// ```
pub struct Dispatcher<P> {
    topics: RwLock<HashMap<String, Arc<TopicRegistry<P>>>>,
}

impl<P> Dispatcher<P>
where
    P: Clone + Send + 'static,
{
    /// Creates a dispatcher with no topics.
    pub fn new() -> Self {
        Self {
            topics: RwLock::new(HashMap::new()),
        }
    }

    /// Create-if-absent lookup. The caller's write guard spans both the
    /// creation and the registration delegated afterwards, serializing topic
    /// creation across names.
    fn registry_under_lock(
        topics: &mut HashMap<String, Arc<TopicRegistry<P>>>,
        topic: &str,
    ) -> Arc<TopicRegistry<P>> {
        match topics.get(topic) {
            Some(registry) => Arc::clone(registry),
            None => {
                let registry = Arc::new(TopicRegistry::new(topic));
                topics.insert(topic.to_string(), Arc::clone(&registry));
                debug!(
                    event = events::TOPIC_CREATED,
                    component = COMPONENT,
                    topic,
                    "topic created"
                );
                registry
            }
        }
    }

    /// Read-locked lookup, then fan-out outside the dispatcher's lock.
    async fn publish(&self, topic: &str, payload: P, filter: DeliveryFilter) {
        let registry = {
            let topics = self.topics.read().await;
            topics.get(topic).map(Arc::clone)
        };

        match registry {
            Some(registry) => registry.fan_out(payload, filter),
            None => debug!(
                event = events::PUBLISH_NO_TOPIC,
                component = COMPONENT,
                topic,
                delivery_mode = fields::format_delivery_mode(&filter),
                "unknown topic; publish dropped"
            ),
        }
    }

    #[cfg(test)]
    pub(crate) async fn topic_count(&self) -> usize {
        self.topics.read().await.len()
    }
}

impl<P> Default for Dispatcher<P>
where
    P: Clone + Send + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<P> Dispatch<P> for Dispatcher<P>
where
    P: Clone + Send + 'static,
{
    async fn register_listener(
        &self,
        id: SubscriberId,
        topic: &str,
        listener: Arc<dyn TopicListener<P>>,
    ) {
        let mut topics = self.topics.write().await;
        let registry = Self::registry_under_lock(&mut topics, topic);
        registry.register_listener(id, listener).await;
    }

    async fn register_channel(&self, id: SubscriberId, topic: &str, sender: Sender<P>) {
        let mut topics = self.topics.write().await;
        let registry = Self::registry_under_lock(&mut topics, topic);
        registry.register_channel(id, sender).await;
    }

    async fn unregister_listener(&self, id: SubscriberId, topic: &str) {
        let topics = self.topics.write().await;
        match topics.get(topic) {
            Some(registry) => registry.unregister_listener(id).await,
            None => debug!(
                event = events::UNREGISTER_NO_TOPIC,
                component = COMPONENT,
                topic,
                subscriber = fields::format_subscriber(&id).as_str(),
                "no such topic; nothing unregistered"
            ),
        }
    }

    async fn unregister_channel(&self, id: SubscriberId, topic: &str) {
        let topics = self.topics.write().await;
        match topics.get(topic) {
            Some(registry) => registry.unregister_channel(id).await,
            None => debug!(
                event = events::UNREGISTER_NO_TOPIC,
                component = COMPONENT,
                topic,
                subscriber = fields::format_subscriber(&id).as_str(),
                "no such topic; nothing unregistered"
            ),
        }
    }

    async fn send(&self, topic: &str, payload: P) {
        self.publish(topic, payload, DeliveryFilter::All).await;
    }

    async fn send_to(&self, topic: &str, payload: P, include: HashSet<SubscriberId>) {
        self.publish(topic, payload, DeliveryFilter::Include(include))
            .await;
    }

    async fn send_except(&self, topic: &str, payload: P, exclude: HashSet<SubscriberId>) {
        self.publish(topic, payload, DeliveryFilter::Exclude(exclude))
            .await;
    }
}
