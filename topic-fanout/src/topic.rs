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

//! Per-topic subscriber registry and two-phase fan-out delivery.

use crate::filter::DeliveryFilter;
use crate::identity::SubscriberId;
use crate::listener::TopicListener;
use crate::observability::{events, fields};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc::Sender;
use tokio::sync::RwLock;
use tracing::{debug, trace, Level};

const COMPONENT: &str = "topic_registry";

/// Subscriber bookkeeping for one topic.
///
/// The listener map and the channel map are guarded independently, so
/// listener-path and channel-path operations never contend with each other,
/// and fan-out reads on one map never block writes on the other.
pub(crate) struct TopicRegistry<P> {
    name: String,
    listeners: RwLock<HashMap<SubscriberId, Arc<dyn TopicListener<P>>>>,
    channels: RwLock<HashMap<SubscriberId, Sender<P>>>,
}

impl<P> TopicRegistry<P>
where
    P: Clone + Send + 'static,
{
    pub(crate) fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            listeners: RwLock::new(HashMap::new()),
            channels: RwLock::new(HashMap::new()),
        }
    }

    /// Inserts or overwrites the listener registered under `id`.
    pub(crate) async fn register_listener(
        &self,
        id: SubscriberId,
        listener: Arc<dyn TopicListener<P>>,
    ) {
        let replaced = self.listeners.write().await.insert(id, listener).is_some();

        let subscriber = fields::format_subscriber(&id);
        debug!(
            event = events::LISTENER_REGISTERED,
            component = COMPONENT,
            topic = self.name.as_str(),
            subscriber = subscriber.as_str(),
            replaced,
            "listener registered"
        );
    }

    /// Inserts or overwrites the delivery channel registered under `id`.
    ///
    /// The registry only ever sends into the channel; the caller keeps the
    /// receiving half and the channel is never closed from this side.
    pub(crate) async fn register_channel(&self, id: SubscriberId, sender: Sender<P>) {
        let capacity = sender.max_capacity();
        let replaced = self.channels.write().await.insert(id, sender).is_some();

        let subscriber = fields::format_subscriber(&id);
        debug!(
            event = events::CHANNEL_REGISTERED,
            component = COMPONENT,
            topic = self.name.as_str(),
            subscriber = subscriber.as_str(),
            capacity,
            replaced,
            "channel registered"
        );
    }

    /// Removes the listener registered under `id`, if any.
    pub(crate) async fn unregister_listener(&self, id: SubscriberId) {
        let removed = self.listeners.write().await.remove(&id).is_some();

        let subscriber = fields::format_subscriber(&id);
        if removed {
            debug!(
                event = events::LISTENER_UNREGISTERED,
                component = COMPONENT,
                topic = self.name.as_str(),
                subscriber = subscriber.as_str(),
                "listener unregistered"
            );
        } else {
            debug!(
                event = events::LISTENER_UNREGISTER_UNKNOWN,
                component = COMPONENT,
                topic = self.name.as_str(),
                subscriber = subscriber.as_str(),
                "no listener under this identity; nothing removed"
            );
        }
    }

    /// Removes the delivery channel registered under `id`, if any.
    pub(crate) async fn unregister_channel(&self, id: SubscriberId) {
        let removed = self.channels.write().await.remove(&id).is_some();

        let subscriber = fields::format_subscriber(&id);
        if removed {
            debug!(
                event = events::CHANNEL_UNREGISTERED,
                component = COMPONENT,
                topic = self.name.as_str(),
                subscriber = subscriber.as_str(),
                "channel unregistered"
            );
        } else {
            debug!(
                event = events::CHANNEL_UNREGISTER_UNKNOWN,
                component = COMPONENT,
                topic = self.name.as_str(),
                subscriber = subscriber.as_str(),
                "no channel under this identity; nothing removed"
            );
        }
    }

    /// Spawns the two delivery phases for one publish and returns without
    /// waiting on any delivery.
    ///
    /// Each phase snapshots its map under a read lock only long enough to
    /// spawn one task per admitted subscriber; a subscriber unregistered
    /// after its delivery task is spawned is still delivered to.
    pub(crate) fn fan_out(self: &Arc<Self>, payload: P, filter: DeliveryFilter) {
        let registry = Arc::clone(self);
        let listener_payload = payload.clone();
        let listener_filter = filter.clone();
        tokio::spawn(async move {
            registry
                .dispatch_listeners(listener_payload, listener_filter)
                .await;
        });

        let registry = Arc::clone(self);
        tokio::spawn(async move {
            registry.dispatch_channels(payload, filter).await;
        });
    }

    async fn dispatch_listeners(&self, payload: P, filter: DeliveryFilter) {
        let trace_enabled = tracing::enabled!(Level::TRACE);
        let mut dispatched = 0usize;

        let listeners = self.listeners.read().await;
        for (id, listener) in listeners.iter() {
            if !filter.admits(id) {
                continue;
            }

            if trace_enabled {
                trace!(
                    event = events::LISTENER_DELIVERY_SPAWNED,
                    component = COMPONENT,
                    topic = self.name.as_str(),
                    subscriber = fields::format_subscriber(id).as_str(),
                    "spawning listener delivery"
                );
            }

            let listener = Arc::clone(listener);
            let payload = payload.clone();
            tokio::spawn(async move {
                listener.on_payload(payload).await;
            });
            dispatched += 1;
        }
        drop(listeners);

        debug!(
            event = events::FANOUT_LISTENERS_DISPATCHED,
            component = COMPONENT,
            topic = self.name.as_str(),
            delivery_mode = fields::format_delivery_mode(&filter),
            dispatched,
            "listener fan-out dispatched"
        );
    }

    async fn dispatch_channels(&self, payload: P, filter: DeliveryFilter) {
        let trace_enabled = tracing::enabled!(Level::TRACE);
        let mut dispatched = 0usize;

        let channels = self.channels.read().await;
        for (id, sender) in channels.iter() {
            if !filter.admits(id) {
                continue;
            }

            if trace_enabled {
                trace!(
                    event = events::CHANNEL_DELIVERY_SPAWNED,
                    component = COMPONENT,
                    topic = self.name.as_str(),
                    subscriber = fields::format_subscriber(id).as_str(),
                    "spawning channel delivery"
                );
            }

            let sender = sender.clone();
            let payload = payload.clone();
            let topic = self.name.clone();
            let subscriber = *id;
            tokio::spawn(async move {
                // A full channel suspends only this delivery task.
                if sender.send(payload).await.is_err() {
                    debug!(
                        event = events::CHANNEL_SEND_CLOSED,
                        component = COMPONENT,
                        topic = topic.as_str(),
                        subscriber = fields::format_subscriber(&subscriber).as_str(),
                        "receiver dropped; payload discarded"
                    );
                }
            });
            dispatched += 1;
        }
        drop(channels);

        debug!(
            event = events::FANOUT_CHANNELS_DISPATCHED,
            component = COMPONENT,
            topic = self.name.as_str(),
            delivery_mode = fields::format_delivery_mode(&filter),
            dispatched,
            "channel fan-out dispatched"
        );
    }
}
