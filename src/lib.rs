//! An event-driven ping algorithm engine.
//!
//! This crate implements the core decision logic of a network
//! reachability-measurement tool: dispatching probes toward a destination,
//! correlating asynchronous replies (including ICMP/ICMPv6 error
//! indications) to the probes that elicited them, and reporting per-probe
//! outcomes plus aggregate round-trip-time statistics.
//!
//! It does not perform packet I/O, address resolution, or CLI parsing —
//! those are supplied by an ambient probing framework through the
//! [`Framework`], [`Probe`] and [`Reply`] traits in this crate.

pub mod classify;
pub mod destination;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod event;
pub mod framework;
pub mod options;
pub mod probe;
pub mod registration;
pub mod state;
pub mod stats;
pub mod types;

pub use classify::{classify, ReplyClass};
pub use engine::{transition, Engine, Transition};
pub use error::{Error, Result};
pub use event::{Event, OutcomeEvent};
pub use framework::Framework;
pub use options::PingOptions;
pub use probe::{Probe, ProbeFields, Reply};
pub use state::PingState;
pub use stats::RttStats;
pub use types::{Count, Interval, IpVersion, TimeToLive};
