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

mod support;

use integration_test_utils::GateListener;
use std::collections::HashSet;
use std::sync::Arc;
use topic_fanout::{Dispatch, Dispatcher, SubscriberId};

const FEED_TOPIC: &str = "feed/metrics";
const HEARTBEAT_TOPIC: &str = "feed/heartbeat";

#[tokio::test(flavor = "multi_thread")]
async fn full_channel_parks_only_its_own_deliveries() {
    integration_test_utils::init_logging();

    let dispatcher = Dispatcher::new();
    let (_parked_id, mut parked_receiver) =
        support::register_channel_subscriber(&dispatcher, FEED_TOPIC, 1).await;
    let (_drained_id, mut drained_receiver) =
        support::register_channel_subscriber(&dispatcher, FEED_TOPIC, 1).await;

    dispatcher.send(FEED_TOPIC, 1u32).await;
    dispatcher.send(FEED_TOPIC, 2).await;
    dispatcher.send(FEED_TOPIC, 3).await;

    // One subscriber is never drained, so two of its delivery tasks stay
    // parked on the full capacity-1 channel. The drained subscriber still
    // sees every payload.
    let mut drained_seen = HashSet::new();
    for _ in 0..3 {
        let payload = support::recv_within(&mut drained_receiver, support::RECEIVE_DEADLINE)
            .await
            .expect("drained subscriber missed a delivery");
        drained_seen.insert(payload);
    }
    assert_eq!(drained_seen, HashSet::from([1, 2, 3]));

    // Draining the parked subscriber lets its remaining deliveries finish.
    let mut parked_seen = HashSet::new();
    for _ in 0..3 {
        let payload = support::recv_within(&mut parked_receiver, support::RECEIVE_DEADLINE)
            .await
            .expect("parked subscriber missed a delivery after draining");
        parked_seen.insert(payload);
    }
    assert_eq!(parked_seen, HashSet::from([1, 2, 3]));
}

#[tokio::test(flavor = "multi_thread")]
async fn full_channel_on_one_topic_never_stalls_another_topic() {
    integration_test_utils::init_logging();

    let dispatcher = Dispatcher::new();
    let (_backlogged_id, _backlogged_receiver) =
        support::register_channel_subscriber(&dispatcher, FEED_TOPIC, 1).await;
    let (_heartbeat_id, mut heartbeat_receiver) =
        support::register_channel_subscriber(&dispatcher, HEARTBEAT_TOPIC, 1).await;

    // Fill the backlogged subscriber's channel and leave two more delivery
    // tasks parked behind it; nothing ever drains that channel.
    for n in 1..=3u32 {
        dispatcher.send(FEED_TOPIC, n).await;
    }

    dispatcher.send(HEARTBEAT_TOPIC, 99).await;

    assert_eq!(
        support::recv_within(&mut heartbeat_receiver, support::RECEIVE_DEADLINE).await,
        Some(99)
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn parked_listener_does_not_stall_channel_delivery() {
    integration_test_utils::init_logging();

    let dispatcher = Dispatcher::new();
    let gate = Arc::new(GateListener::new());
    dispatcher
        .register_listener(SubscriberId::generate(), FEED_TOPIC, gate.clone())
        .await;
    let (_channel_id, mut receiver) =
        support::register_channel_subscriber(&dispatcher, FEED_TOPIC, 1).await;

    dispatcher.send(FEED_TOPIC, 7u32).await;

    // The channel is served while the listener delivery sits at the gate.
    assert_eq!(
        support::recv_within(&mut receiver, support::RECEIVE_DEADLINE).await,
        Some(7)
    );
    assert_eq!(gate.passed_count(), 0);

    gate.release_one();
    assert!(gate.wait_for_passed(1, support::RECEIVE_DEADLINE).await);
}

#[tokio::test(flavor = "multi_thread")]
async fn publisher_outruns_a_parked_listener() {
    integration_test_utils::init_logging();

    let dispatcher = Dispatcher::new();
    let gate = Arc::new(GateListener::new());
    dispatcher
        .register_listener(SubscriberId::generate(), FEED_TOPIC, gate.clone())
        .await;

    // Every publish returns even though no delivery has passed the gate yet.
    for n in 0..4u32 {
        dispatcher.send(FEED_TOPIC, n).await;
    }
    assert_eq!(gate.passed_count(), 0);

    for released in 1..=4 {
        gate.release_one();
        assert!(gate.wait_for_passed(released, support::RECEIVE_DEADLINE).await);
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn releases_granted_in_advance_admit_later_deliveries() {
    integration_test_utils::init_logging();

    let dispatcher = Dispatcher::new();
    let gate = Arc::new(GateListener::new());
    dispatcher
        .register_listener(SubscriberId::generate(), FEED_TOPIC, gate.clone())
        .await;

    // Both permits are banked before any delivery reaches the gate.
    gate.release_one();
    gate.release_one();

    dispatcher.send(FEED_TOPIC, 1u32).await;
    dispatcher.send(FEED_TOPIC, 2).await;

    assert!(gate.wait_for_passed(2, support::RECEIVE_DEADLINE).await);
}
