//! Probe and reply contracts.
//!
//! The framework owns the concrete probe representation; the engine only
//! needs the capabilities described here. This replaces the source's
//! stringly-typed field extraction (`extract("version")`, ...) with typed
//! accessors, per the "dynamic-typed probe fields" design note: callers
//! implement these traits once for their concrete probe/reply types and the
//! classifier becomes an exhaustive match rather than three untyped lookups.

use std::net::IpAddr;
use std::time::{Duration, SystemTime};

/// Named fields extractable from a probe or reply, with typed output.
///
/// Any extraction may fail (return `None`) if the underlying record does
/// not carry that field; the classifier treats a failed extraction as
/// grounds to degrade to `GenError` rather than failing hard (§4.5).
pub trait ProbeFields {
    /// The IP version byte the reply arrived on, as stamped in the packet
    /// header (4 or 6). The classifier converts this via
    /// `IpVersion::try_from`, degrading to `GenError` on an unrecognized
    /// value, same as any other missing/malformed field.
    fn version(&self) -> Option<u8>;
    /// The ICMP/ICMPv6 type.
    fn icmp_type(&self) -> Option<u8>;
    /// The ICMP/ICMPv6 code.
    fn icmp_code(&self) -> Option<u8>;
    /// The reply's source address.
    fn src_ip(&self) -> Option<IpAddr>;
    /// The packet size in bytes.
    fn size(&self) -> Option<usize>;
    /// The TTL stamped into the probe (for reporting).
    fn ttl(&self) -> Option<u8>;
}

/// An outbound probe: the skeleton template and every clone dispatched from
/// it implement this.
///
/// `Clone` stands in for the source's deep-copy requirement (§4.3): the
/// skeleton is never mutated, only cloned and the clone's delay adjusted.
pub trait Probe: Clone {
    /// The probe's configured send delay, used to stagger departures.
    ///
    /// `None` corresponds to the source's `BEST_EFFORT` sentinel: the
    /// dispatcher leaves such a probe's delay untouched rather than
    /// staggering it.
    fn delay(&self) -> Option<Duration>;
    /// Return a clone of this probe with `delay` overridden.
    #[must_use]
    fn with_delay(&self, delay: Duration) -> Self;
    /// The wall-clock time this probe was handed to the framework for
    /// transmission, if it has been sent.
    fn send_time(&self) -> Option<SystemTime>;
}

/// An inbound reply, paired by the framework to the probe that elicited it.
pub trait Reply: ProbeFields {
    /// The wall-clock time this reply was received.
    fn receive_time(&self) -> SystemTime;
}
