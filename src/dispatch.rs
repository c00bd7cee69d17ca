//! The probe dispatcher: clones the skeleton, staggers departures, and
//! hands each clone to the framework for transmission (spec §4.3).

use crate::error::Error;
use crate::framework::Framework;
use crate::probe::Probe;
use crate::state::PingState;
use std::time::Duration;

/// Dispatch up to `count` probes cloned from `skeleton`, 1-indexed within
/// this batch.
///
/// Returns the number of probes actually dispatched. On the first send
/// failure the batch aborts immediately (without rolling back probes
/// already dispatched in this call) and a [`crate::error::Error::
/// DispatchFailure`] is reported via `tracing::warn!` — the caller bumps
/// `num_probes_in_flight` by exactly the returned count, since
/// [`PingState::track_dispatched`] already did so incrementally for each
/// success.
pub fn dispatch_batch<P: Probe>(
    skeleton: &P,
    count: usize,
    state: &mut PingState<P>,
    framework: &mut impl Framework<P>,
) -> usize {
    let mut dispatched = 0;
    for i in 1..=count {
        let clone = stagger(skeleton, i);
        if !framework.send_probe(&clone) {
            let error = Error::DispatchFailure(format!("send failed for probe {i} of {count}"));
            tracing::warn!(probe_index = i, %error, "aborting batch");
            break;
        }
        state.track_dispatched(clone);
        dispatched += 1;
    }
    dispatched
}

/// Clone `skeleton`, overriding the clone's delay to `index * skeleton.
/// delay()` when the skeleton carries a real (non-`BEST_EFFORT`) delay.
fn stagger<P: Probe>(skeleton: &P, index: usize) -> P {
    match skeleton.delay() {
        Some(delay) => {
            let staggered = delay.saturating_mul(u32::try_from(index).unwrap_or(u32::MAX));
            skeleton.with_delay(staggered)
        }
        None => skeleton.clone(),
    }
}
