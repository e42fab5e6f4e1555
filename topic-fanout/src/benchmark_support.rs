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

//! Deterministic benchmark fixtures for the Criterion harness.

use crate::{Dispatch, Dispatcher, FnListener, SubscriberId};
use futures::future::join_all;
use tokio::sync::mpsc;

const REGISTRATION_TOPIC: &str = "benchmark-registration";
const FANOUT_TOPIC: &str = "benchmark-fanout";

/// Registers `rows` fresh listener subscriptions on a new dispatcher and
/// returns how many registrations were performed.
pub async fn register_listener_rows(rows: usize) -> usize {
    let total_rows = rows.max(1);
    let dispatcher = Dispatcher::new();

    for _ in 0..total_rows {
        let listener = FnListener::arc(|_payload: u64| async {});
        dispatcher
            .register_listener(SubscriberId::generate(), REGISTRATION_TOPIC, listener)
            .await;
    }

    total_rows
}

/// Generates `rows` identities and returns how many sort strictly after
/// their predecessor.
pub fn generate_identity_rows(rows: usize) -> usize {
    let total_rows = rows.max(1);
    let mut previous: Option<SubscriberId> = None;
    let mut ordered = 0usize;

    for _ in 0..total_rows {
        let id = SubscriberId::generate();
        if previous.map_or(true, |earlier| earlier < id) {
            ordered += 1;
        }
        previous = Some(id);
    }

    ordered
}

/// Fixed fixture for `fanout/*` benchmark IDs.
///
/// Reusable across iterations: each publish fills every capacity-1 channel
/// exactly once and the drain empties them again.
pub struct FanOutFixture {
    dispatcher: Dispatcher<u64>,
    receivers: Vec<mpsc::Receiver<u64>>,
}

impl FanOutFixture {
    /// Builds a dispatcher with `subscriber_rows` channel subscribers of
    /// capacity 1 on a single topic.
    pub async fn channel_subscribers(subscriber_rows: usize) -> Self {
        let total_rows = subscriber_rows.max(1);
        let dispatcher = Dispatcher::new();
        let mut receivers = Vec::with_capacity(total_rows);

        for _ in 0..total_rows {
            let (sender, receiver) = mpsc::channel(1);
            dispatcher
                .register_channel(SubscriberId::generate(), FANOUT_TOPIC, sender)
                .await;
            receivers.push(receiver);
        }

        Self {
            dispatcher,
            receivers,
        }
    }

    /// Publishes once, drains every subscriber, and returns the number of
    /// deliveries observed.
    pub async fn publish_and_drain(&mut self) -> usize {
        self.dispatcher.send(FANOUT_TOPIC, 1).await;

        let receipts = join_all(self.receivers.iter_mut().map(|receiver| receiver.recv())).await;
        receipts.into_iter().filter(Option::is_some).count()
    }
}
