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

//! # topic-fanout
//!
//! `topic-fanout` implements in-process topic-based publish/subscribe with
//! non-blocking fan-out to listener and channel subscribers.
//!
//! Typical usage is API-first and remains centered on [`Dispatcher`] and
//! [`TopicListener`]. Internal modules are organized by delivery stage to keep
//! behavior ownership explicit.
//!
//! ## Quick start
//!
//! ```
//! use tokio::sync::mpsc;
//! use topic_fanout::{Dispatch, Dispatcher, FnListener, SubscriberId};
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let dispatcher = Dispatcher::new();
//!
//! let (sender, mut receiver) = mpsc::channel(4);
//! dispatcher
//!     .register_channel(SubscriberId::generate(), "alerts", sender)
//!     .await;
//!
//! let listener = FnListener::arc(|payload: String| async move {
//!     println!("listener saw {payload}");
//! });
//! dispatcher
//!     .register_listener(SubscriberId::generate(), "alerts", listener)
//!     .await;
//!
//! dispatcher.send("alerts", "disk full".to_string()).await;
//! assert_eq!(receiver.recv().await.as_deref(), Some("disk full"));
//! # });
//! ```
//!
//! ## Filtered delivery
//!
//! `send_to` restricts a publish to an include set and `send_except` skips an
//! exclude set. Both leave every other subscriber's delivery untouched.
//!
//! ```
//! use std::collections::HashSet;
//! use tokio::sync::mpsc;
//! use topic_fanout::{Dispatch, Dispatcher, SubscriberId};
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let dispatcher = Dispatcher::new();
//!
//! let first = SubscriberId::generate();
//! let second = SubscriberId::generate();
//! let (first_sender, mut first_receiver) = mpsc::channel(4);
//! let (second_sender, mut second_receiver) = mpsc::channel(4);
//! dispatcher.register_channel(first, "alerts", first_sender).await;
//! dispatcher.register_channel(second, "alerts", second_sender).await;
//!
//! dispatcher
//!     .send_except("alerts", "maintenance window", HashSet::from([second]))
//!     .await;
//! assert_eq!(first_receiver.recv().await, Some("maintenance window"));
//!
//! dispatcher
//!     .send_to("alerts", "for the second subscriber", HashSet::from([second]))
//!     .await;
//! assert_eq!(second_receiver.recv().await, Some("for the second subscriber"));
//! # });
//! ```
//!
//! ## Internal architecture map
//!
//! - API facade: outward `Dispatch`/`Dispatcher` surface
//! - Identity: ULID-backed `SubscriberId` generation and ordering
//! - Listener seam: the `TopicListener` trait and its `FnListener` closure adapter
//! - Topic registry: per-topic subscriber maps and spawn-per-delivery fan-out
//!
//! ## Observability model
//!
//! The workspace uses `tracing` for logs/events.
//! Library code emits events/spans and does not unconditionally initialize a global
//! subscriber. Binaries and tests are responsible for one-time
//! `tracing_subscriber` initialization at process boundaries.

pub mod benchmark_support;

mod dispatcher;
pub use dispatcher::{Dispatch, Dispatcher};

mod filter;

mod identity;
pub use identity::SubscriberId;

mod listener;
pub use listener::{FnListener, TopicListener};

#[doc(hidden)]
pub mod observability;
mod topic;
