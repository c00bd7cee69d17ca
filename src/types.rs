//! Newtypes for the domain primitives used throughout the engine.

use derive_more::{Add, AddAssign, From, Rem, Sub};

/// The total number of probes to issue for an instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, From)]
pub struct Count(pub usize);

/// The base spacing, in seconds, between probes.
#[derive(Debug, Clone, Copy, PartialEq, From)]
pub struct Interval(pub f64);

impl Interval {
    #[must_use]
    pub fn seconds(self) -> f64 {
        self.0
    }
}

/// The time-to-live stamped into outgoing probes.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, From, Add, Sub, AddAssign,
)]
pub struct TimeToLive(pub u8);

/// A count of replies, losses or in-flight probes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, From, Add, AddAssign, Rem)]
pub struct Counter(pub usize);

impl Counter {
    #[must_use]
    pub fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

/// The IP version of a probe or reply, as extracted from its header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IpVersion {
    V4,
    V6,
}

impl TryFrom<u8> for IpVersion {
    type Error = crate::error::Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            4 => Ok(Self::V4),
            6 => Ok(Self::V6),
            other => Err(crate::error::Error::ClassificationDegradation(format!(
                "unrecognized IP version: {other}"
            ))),
        }
    }
}
