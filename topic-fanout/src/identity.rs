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

//! Time-ordered subscriber identity and its process-wide generator.

use std::fmt;
use std::str::FromStr;
use std::sync::{Mutex, OnceLock, PoisonError};
use ulid::{DecodeError, Generator, Ulid};

static GENERATOR: OnceLock<Mutex<Generator>> = OnceLock::new();

/// Key under which one subscription (listener or channel) is tracked within a
/// topic.
///
/// A `SubscriberId` is a ULID: 48 bits of millisecond wall-clock time followed
/// by 80 bits of randomness, so identities sort by creation time. The string
/// form is the 26-character Crockford base32 encoding, which sorts the same
/// way as the binary value.
///
/// # Examples
///
/// ```
/// use topic_fanout::SubscriberId;
///
/// let first = SubscriberId::generate();
/// let second = SubscriberId::generate();
/// assert!(first < second);
///
/// let encoded = first.to_string();
/// assert_eq!(encoded.len(), 26);
/// assert_eq!(encoded.parse::<SubscriberId>().unwrap(), first);
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct SubscriberId(Ulid);

impl SubscriberId {
    /// Returns a fresh identity ordered after every identity this process has
    /// generated so far.
    ///
    /// Identities drawn within the same millisecond share that millisecond's
    /// timestamp and differ in a monotonically increasing random component.
    /// Uniqueness is practical, not validated: registering two subscriptions
    /// under one identity overwrites the first.
    pub fn generate() -> Self {
        let generator = GENERATOR.get_or_init(|| Mutex::new(Generator::new()));
        let mut generator = generator.lock().unwrap_or_else(PoisonError::into_inner);

        match generator.generate() {
            Ok(ulid) => Self(ulid),
            // Random component exhausted within a single millisecond; take a
            // fresh random ULID for this one call.
            Err(_) => Self(Ulid::new()),
        }
    }

    /// Milliseconds since the Unix epoch at which this identity was created.
    pub fn timestamp_ms(&self) -> u64 {
        self.0.timestamp_ms()
    }
}

impl fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for SubscriberId {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ulid::from_str(s).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::SubscriberId;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn now_ms() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after the Unix epoch")
            .as_millis() as u64
    }

    #[test]
    fn generated_ids_are_distinct_and_strictly_increasing() {
        let ids: Vec<SubscriberId> = (0..64).map(|_| SubscriberId::generate()).collect();

        for pair in ids.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn string_form_sorts_like_the_binary_form_and_round_trips() {
        let ids: Vec<SubscriberId> = (0..16).map(|_| SubscriberId::generate()).collect();
        let encoded: Vec<String> = ids.iter().map(|id| id.to_string()).collect();

        let mut sorted = encoded.clone();
        sorted.sort();
        assert_eq!(encoded, sorted);

        for (id, text) in ids.iter().zip(&encoded) {
            assert_eq!(text.len(), 26);
            assert_eq!(
                text.parse::<SubscriberId>().expect("encoding should parse"),
                *id
            );
        }
    }

    #[test]
    fn embedded_timestamp_tracks_the_wall_clock() {
        let before = now_ms();
        let id = SubscriberId::generate();
        let after = now_ms();

        assert!(id.timestamp_ms() >= before);
        assert!(id.timestamp_ms() <= after);
    }

    #[test]
    fn parse_rejects_invalid_encodings() {
        assert!("not-a-subscriber-id".parse::<SubscriberId>().is_err());
        assert!("".parse::<SubscriberId>().is_err());
    }
}
