//! The ambient probing framework's contract (spec §6), expressed as a
//! trait so the engine can be driven and tested without a real event loop
//! or raw sockets.

use crate::error::Error;
use crate::event::OutcomeEvent;
use crate::probe::Probe;
use std::time::Duration;

/// Outbound calls the engine makes into the framework that hosts it.
///
/// A production adapter implements this over the real packet I/O loop; unit
/// and scenario tests implement it over an in-memory fake (see
/// `tests/scenarios.rs`).
pub trait Framework<P: Probe> {
    /// Best-effort transmission request. Returns `true` on success.
    fn send_probe(&mut self, probe: &P) -> bool;

    /// Enqueue an outcome event for the caller.
    fn raise_event(&mut self, event: OutcomeEvent<P>);

    /// Signal that this instance has finished and may be torn down.
    fn raise_terminated(&mut self);

    /// Signal a fatal instance-level error.
    fn raise_error(&mut self, error: Error);

    /// The ambient overall deadline for the run, in seconds.
    fn framework_timeout(&self) -> Duration;
}
