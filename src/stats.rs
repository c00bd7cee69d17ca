//! RTT statistics over successful-reply round-trip times.

/// A snapshot of round-trip-time statistics, computed on demand from a
/// [`PingState`](crate::state::PingState)'s `rtt_samples`.
///
/// All fields are seconds; callers report to the user in milliseconds
/// (§4.4's "RTT computation").
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RttStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub mean_deviation: f64,
    /// Loss rate as a percentage, `num_losses / num_replies * 100`,
    /// truncated to an integer per the source (§4.2, §9 open question 4).
    pub loss_rate_pct: u32,
}

/// Compute [`RttStats`] from the recorded RTT samples and loss/reply
/// counters. Returns `None` if no samples have been recorded (nothing to
/// summarize yet, e.g. before any reply has arrived, or when every probe
/// timed out there is still a well-defined loss rate but no min/max/mean).
#[must_use]
pub fn compute(samples: &[f64], num_losses: usize, num_replies: usize) -> Option<RttStats> {
    let loss_rate_pct = if num_replies == 0 {
        0
    } else {
        // Integer truncation, matching the source (§4.2).
        ((num_losses as f64 / num_replies as f64) * 100.0) as u32
    };

    if samples.is_empty() {
        return if num_replies == 0 {
            None
        } else {
            Some(RttStats {
                min: 0.0,
                max: 0.0,
                mean: 0.0,
                mean_deviation: 0.0,
                loss_rate_pct,
            })
        };
    }

    let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
    let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mean = samples.iter().sum::<f64>() / samples.len() as f64;
    // Floating-point absolute value, not the source's integer-truncating
    // `abs` on doubles (§4.2 note, §9 open question 2) — treated as a bug
    // fix, flagged in DESIGN.md rather than silently carried forward.
    let mean_deviation =
        samples.iter().map(|x| (x - mean).abs()).sum::<f64>() / samples.len() as f64;

    Some(RttStats {
        min,
        max,
        mean,
        mean_deviation,
        loss_rate_pct,
    })
}
