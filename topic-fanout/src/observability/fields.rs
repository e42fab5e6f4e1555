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

//! Canonical structured field keys and value-format helpers.

use crate::filter::DeliveryFilter;
use crate::identity::SubscriberId;

pub const EVENT: &str = "event";
pub const COMPONENT: &str = "component";
pub const TOPIC: &str = "topic";
pub const SUBSCRIBER: &str = "subscriber";
pub const DELIVERY_MODE: &str = "delivery_mode";
pub const DISPATCHED: &str = "dispatched";
pub const CAPACITY: &str = "capacity";
pub const REPLACED: &str = "replaced";

pub const MODE_ALL: &str = "all";
pub const MODE_INCLUDE: &str = "include";
pub const MODE_EXCLUDE: &str = "exclude";

pub fn format_subscriber(id: &SubscriberId) -> String {
    id.to_string()
}

pub(crate) fn format_delivery_mode(filter: &DeliveryFilter) -> &'static str {
    match filter {
        DeliveryFilter::All => MODE_ALL,
        DeliveryFilter::Include(_) => MODE_INCLUDE,
        DeliveryFilter::Exclude(_) => MODE_EXCLUDE,
    }
}
