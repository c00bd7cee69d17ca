//! The per-instance mutable state, created at `AlgorithmInit` and freed at
//! `AlgorithmTerminated`.

use crate::error::{Error, Result};
use crate::probe::Probe;
use crate::stats::{self, RttStats};
use crate::types::Counter;

/// Mutable state for one ping algorithm instance.
///
/// Invariants hold at every event boundary (spec §3, tested in
/// `tests/scenarios.rs`):
///
/// - `num_replies <= count`
/// - `num_losses <= num_replies`
/// - `num_probes_in_flight >= 0` (structural: `Counter` wraps `usize`) and
///   `num_replies + num_probes_in_flight <= count`
#[derive(Debug, Clone)]
pub struct PingState<P> {
    num_replies: Counter,
    num_losses: Counter,
    num_probes_in_flight: Counter,
    /// Every probe transmitted, in send order. Owns each clone for the
    /// lifetime of the instance; released on teardown (`Drop`).
    probes: Vec<P>,
    /// RTTs, in seconds, for successful replies only.
    rtt_samples: Vec<f64>,
}

impl<P: Probe> PingState<P> {
    /// Allocate state sized for `capacity` probes (the instance's
    /// configured `count`): both the probe log and the RTT-sample buffer
    /// are pre-reserved up front rather than grown incrementally.
    ///
    /// # Errors
    ///
    /// Returns `Error::Allocation` if reserving either buffer fails
    /// (spec §7: "cannot allocate state or clone a probe").
    pub fn new(capacity: usize) -> Result<Self> {
        let mut probes = Vec::new();
        probes
            .try_reserve_exact(capacity)
            .map_err(|e| Error::Allocation(format!("probe log: {e}")))?;
        let mut rtt_samples = Vec::new();
        rtt_samples
            .try_reserve_exact(capacity)
            .map_err(|e| Error::Allocation(format!("rtt samples: {e}")))?;
        Ok(Self {
            num_replies: Counter::default(),
            num_losses: Counter::default(),
            num_probes_in_flight: Counter::default(),
            probes,
            rtt_samples,
        })
    }

    #[must_use]
    pub const fn num_replies(&self) -> usize {
        self.num_replies.0
    }

    #[must_use]
    pub const fn num_losses(&self) -> usize {
        self.num_losses.0
    }

    #[must_use]
    pub const fn num_probes_in_flight(&self) -> usize {
        self.num_probes_in_flight.0
    }

    #[must_use]
    pub fn probes(&self) -> &[P] {
        &self.probes
    }

    #[must_use]
    pub fn rtt_samples(&self) -> &[f64] {
        &self.rtt_samples
    }

    #[must_use]
    pub fn rtt_stats(&self) -> Option<RttStats> {
        stats::compute(&self.rtt_samples, self.num_losses.0, self.num_replies.0)
    }

    /// Record a probe clone handed to the framework for transmission and
    /// bump the in-flight counter. Called once per probe by the dispatcher.
    pub(crate) fn track_dispatched(&mut self, probe: P) {
        self.probes.push(probe);
        self.num_probes_in_flight += Counter(1);
    }

    /// Record a successful reply: increments `num_replies`, decrements
    /// `num_probes_in_flight`, and appends the measured RTT.
    pub(crate) fn record_reply(&mut self, rtt_seconds: f64) {
        self.num_replies += Counter(1);
        self.num_probes_in_flight = self.num_probes_in_flight.saturating_sub(Counter(1));
        self.rtt_samples.push(rtt_seconds);
    }

    /// Record a reply that was classified as an ICMP/ICMPv6 error rather
    /// than destination-reached: increments `num_replies`, decrements
    /// `num_probes_in_flight`, but does not append an RTT sample (§4.4: RTT
    /// is only recorded when the destination matcher reports the
    /// destination reached).
    pub(crate) fn record_reply_without_rtt(&mut self) {
        self.num_replies += Counter(1);
        self.num_probes_in_flight = self.num_probes_in_flight.saturating_sub(Counter(1));
    }

    /// Record a timeout: increments `num_replies` and `num_losses`,
    /// decrements `num_probes_in_flight`.
    pub(crate) fn record_timeout(&mut self) {
        self.num_replies += Counter(1);
        self.num_losses += Counter(1);
        self.num_probes_in_flight = self.num_probes_in_flight.saturating_sub(Counter(1));
    }
}
