// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! entity_id {
    ($name:ident) => {
        #[derive(
            Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

entity_id!(RoomId);
entity_id!(ProjectId);
entity_id!(UserId);
entity_id!(ShoppingItemId);

/// Token for one image read started from the intake dialog. A completion is
/// only applied while its token is still the pending one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ImageRequestId(u64);

impl ImageRequestId {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Hands out millisecond-timestamp room ids, bumping forward when two rooms
/// are created within the same millisecond.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomIdGenerator {
    last_millis: i128,
}

impl RoomIdGenerator {
    pub fn next_at(&mut self, now: time::OffsetDateTime) -> RoomId {
        let millis = now.unix_timestamp_nanos() / 1_000_000;
        let next = if millis > self.last_millis {
            millis
        } else {
            self.last_millis + 1
        };
        self.last_millis = next;
        RoomId::new(next.to_string())
    }
}
