//! Inbound framework events and outbound outcome events.

use crate::probe::Probe;

/// Events the framework delivers to the engine (spec §6, inbound).
///
/// `AlgorithmInit` is handled separately by `Engine::init` and is not part
/// of this enum: it carries the options that construct the engine rather
/// than being dispatched through the steady-state transition function.
#[derive(Debug, Clone)]
pub enum Event<P, R> {
    /// A reply paired by the framework with the probe that elicited it.
    ProbeReply { probe: P, reply: R },
    /// No reply arrived within the framework's per-probe deadline.
    ProbeTimeout { probe: P },
    /// The framework is tearing this instance down.
    AlgorithmTerminated,
    /// The framework encountered a fatal error for this instance.
    AlgorithmError,
}

/// Outcome events emitted upstream, one per consumed input event (spec §3,
/// §8 invariant 5), plus the two control events `AllProbesSent` and `Wait`.
#[derive(Debug, Clone)]
pub enum OutcomeEvent<P>
where
    P: Probe,
{
    /// The destination was reached.
    ProbeReply {
        probe: P,
        /// Measured round-trip time, in seconds.
        rtt_seconds: f64,
    },
    DstNetUnreachable { probe: P },
    DstHostUnreachable { probe: P },
    DstProtUnreachable { probe: P },
    DstPortUnreachable { probe: P },
    TtlExceededTransit { probe: P },
    TimeExceededReassembly { probe: P },
    Redirect { probe: P },
    ParameterProblem { probe: P },
    /// The reply did not match any known classification.
    GenError { probe: P },
    /// No reply arrived within the framework's deadline.
    Timeout { probe: P },
    /// Issued once, after the final probe's outcome is recorded.
    AllProbesSent,
    /// Probing is complete but some replies are still pending.
    Wait,
}

impl<P: Probe> OutcomeEvent<P> {
    /// The outcome's kind as a stable, loggable name, independent of
    /// whether `P` itself implements `Debug`.
    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Self::ProbeReply { .. } => "ProbeReply",
            Self::DstNetUnreachable { .. } => "DstNetUnreachable",
            Self::DstHostUnreachable { .. } => "DstHostUnreachable",
            Self::DstProtUnreachable { .. } => "DstProtUnreachable",
            Self::DstPortUnreachable { .. } => "DstPortUnreachable",
            Self::TtlExceededTransit { .. } => "TtlExceededTransit",
            Self::TimeExceededReassembly { .. } => "TimeExceededReassembly",
            Self::Redirect { .. } => "Redirect",
            Self::ParameterProblem { .. } => "ParameterProblem",
            Self::GenError { .. } => "GenError",
            Self::Timeout { .. } => "Timeout",
            Self::AllProbesSent => "AllProbesSent",
            Self::Wait => "Wait",
        }
    }
}

/// Bind a reply-bearing outcome kind to the `probe` that elicited it, used
/// internally by the event handler to avoid repeating the match over
/// [`crate::classify::ReplyClass`] at both the classification and the
/// event-construction sites.
pub(crate) fn outcome_for_class<P: Probe>(
    probe: P,
    class: crate::classify::ReplyClass,
) -> OutcomeEvent<P> {
    use crate::classify::ReplyClass;
    match class {
        ReplyClass::DstNetUnreachable => OutcomeEvent::DstNetUnreachable { probe },
        ReplyClass::DstHostUnreachable => OutcomeEvent::DstHostUnreachable { probe },
        ReplyClass::DstProtUnreachable => OutcomeEvent::DstProtUnreachable { probe },
        ReplyClass::DstPortUnreachable => OutcomeEvent::DstPortUnreachable { probe },
        ReplyClass::TtlExceededTransit => OutcomeEvent::TtlExceededTransit { probe },
        ReplyClass::TimeExceededReassembly => OutcomeEvent::TimeExceededReassembly { probe },
        ReplyClass::Redirect => OutcomeEvent::Redirect { probe },
        ReplyClass::ParameterProblem => OutcomeEvent::ParameterProblem { probe },
        ReplyClass::GenError => OutcomeEvent::GenError { probe },
    }
}
