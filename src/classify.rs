//! The ICMP/ICMPv6 reply classifier.
//!
//! A pure function over three extracted fields: IP version, ICMP type and
//! ICMP code. The decision table is the complete contract (spec §4.1) and
//! is realized here as match-arm order, since Rust's `match` tries arms in
//! source order — the "first match wins" rule in the table is therefore
//! self-enforcing rather than something a reviewer has to verify by hand.

use crate::probe::ProbeFields;
use crate::types::IpVersion;

/// The semantic classification of a reply, independent of destination
/// match. Destination precedence (a reply whose source equals the
/// destination is always `ProbeReply`, §4.1) is applied by the caller, not
/// here: this function only classifies by (version, type, code).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyClass {
    DstNetUnreachable,
    DstHostUnreachable,
    DstPortUnreachable,
    DstProtUnreachable,
    TtlExceededTransit,
    TimeExceededReassembly,
    Redirect,
    ParameterProblem,
    /// The reply did not match any known classification, or a required
    /// field could not be extracted.
    GenError,
}

// IPv4 ICMP type/code constants, named per the historical BSD headers the
// source table is expressed in terms of.
mod icmpv4 {
    pub const UNREACH: u8 = 3;
    pub const UNREACH_NET: u8 = 0;
    pub const UNREACH_HOST: u8 = 1;
    pub const UNREACH_PROTOCOL: u8 = 2;
    pub const UNREACH_PORT: u8 = 3;
    pub const TIMXCEED: u8 = 11;
    pub const TIMXCEED_INTRANS: u8 = 0;
    pub const TIMXCEED_REASS: u8 = 1;
    pub const REDIRECT: u8 = 5;
    pub const REDIRECT_NET: u8 = 0;
    pub const PARAMPROB: u8 = 12;
}

// ICMPv6 type/code constants.
mod icmpv6 {
    pub const DST_UNREACH: u8 = 1;
    pub const DST_UNREACH_NOROUTE: u8 = 0;
    pub const DST_UNREACH_ADDR: u8 = 3;
    pub const DST_UNREACH_NOPORT: u8 = 4;
    pub const PARAM_PROB: u8 = 4;
    pub const PARAMPROB_HEADER: u8 = 0;
    pub const PARAMPROB_NEXTHEADER: u8 = 1;
    pub const PARAMPROB_OPTION: u8 = 2;
    pub const TIME_EXCEEDED: u8 = 3;
    pub const TIME_EXCEED_TRANSIT: u8 = 0;
    pub const TIME_EXCEED_REASSEMBLY: u8 = 1;
    pub const ND_REDIRECT: u8 = 137;
}

/// Classify a reply's (version, type, code) into a [`ReplyClass`].
///
/// Field extraction failures (any of `version`, `icmp_type`, `icmp_code`
/// returning `None`) degrade to `GenError` rather than failing hard, per
/// §4.5. An unrecognized `version` byte (anything but 4 or 6) degrades the
/// same way: `IpVersion::try_from` rejects it before classification ever
/// sees a family to dispatch on.
///
/// # Open question (preserved, not guessed — see DESIGN.md)
///
/// The IPv4 arm intentionally preserves the source's naming swap:
/// `UNREACH_HOST` (code 1) maps to `DstNetUnreachable` and `UNREACH_NET`
/// (code 0) maps to `DstHostUnreachable`. This reads backwards relative to
/// RFC 792 but matches the historical source behavior (spec §4.1 note (a),
/// §9 open question 1).
pub fn classify<R: ProbeFields>(reply: &R) -> ReplyClass {
    let (Some(version_byte), Some(icmp_type), Some(icmp_code)) =
        (reply.version(), reply.icmp_type(), reply.icmp_code())
    else {
        return ReplyClass::GenError;
    };
    let Ok(version) = IpVersion::try_from(version_byte) else {
        return ReplyClass::GenError;
    };

    match version {
        IpVersion::V4 => classify_v4(icmp_type, icmp_code),
        IpVersion::V6 => classify_v6(icmp_type, icmp_code),
    }
}

fn classify_v4(icmp_type: u8, icmp_code: u8) -> ReplyClass {
    use icmpv4::{
        PARAMPROB, REDIRECT, REDIRECT_NET, TIMXCEED, TIMXCEED_INTRANS, TIMXCEED_REASS, UNREACH,
        UNREACH_HOST, UNREACH_NET, UNREACH_PORT, UNREACH_PROTOCOL,
    };
    match (icmp_type, icmp_code) {
        (UNREACH, UNREACH_HOST) => ReplyClass::DstNetUnreachable,
        (UNREACH, UNREACH_NET) => ReplyClass::DstHostUnreachable,
        (UNREACH, UNREACH_PORT) => ReplyClass::DstPortUnreachable,
        (UNREACH, UNREACH_PROTOCOL) => ReplyClass::DstProtUnreachable,
        (TIMXCEED, TIMXCEED_INTRANS) => ReplyClass::TtlExceededTransit,
        (TIMXCEED, TIMXCEED_REASS) => ReplyClass::TimeExceededReassembly,
        (REDIRECT, REDIRECT_NET) => ReplyClass::Redirect,
        (PARAMPROB, _) => ReplyClass::ParameterProblem,
        _ => ReplyClass::GenError,
    }
}

fn classify_v6(icmp_type: u8, icmp_code: u8) -> ReplyClass {
    use icmpv6::{
        DST_UNREACH, DST_UNREACH_ADDR, DST_UNREACH_NOPORT, DST_UNREACH_NOROUTE, ND_REDIRECT,
        PARAMPROB_HEADER, PARAMPROB_NEXTHEADER, PARAMPROB_OPTION, PARAM_PROB, TIME_EXCEED_REASSEMBLY,
        TIME_EXCEED_TRANSIT, TIME_EXCEEDED,
    };
    match (icmp_type, icmp_code) {
        (DST_UNREACH, DST_UNREACH_ADDR) => ReplyClass::DstNetUnreachable,
        (DST_UNREACH, DST_UNREACH_NOROUTE) => ReplyClass::DstHostUnreachable,
        (DST_UNREACH, DST_UNREACH_NOPORT) => ReplyClass::DstPortUnreachable,
        // Must be tested before the generic PARAM_PROB arm below (§4.1 note (b)).
        (PARAM_PROB, PARAMPROB_NEXTHEADER) => ReplyClass::DstProtUnreachable,
        (TIME_EXCEEDED, TIME_EXCEED_TRANSIT) => ReplyClass::TtlExceededTransit,
        (TIME_EXCEEDED, TIME_EXCEED_REASSEMBLY) => ReplyClass::TimeExceededReassembly,
        (ND_REDIRECT, _) => ReplyClass::Redirect,
        (PARAM_PROB, PARAMPROB_HEADER | PARAMPROB_OPTION) => ReplyClass::ParameterProblem,
        _ => ReplyClass::GenError,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{IpAddr, Ipv4Addr};
    use test_case::test_case;

    struct FakeReply {
        version: Option<u8>,
        icmp_type: Option<u8>,
        icmp_code: Option<u8>,
    }

    impl ProbeFields for FakeReply {
        fn version(&self) -> Option<u8> {
            self.version
        }
        fn icmp_type(&self) -> Option<u8> {
            self.icmp_type
        }
        fn icmp_code(&self) -> Option<u8> {
            self.icmp_code
        }
        fn src_ip(&self) -> Option<IpAddr> {
            Some(IpAddr::V4(Ipv4Addr::UNSPECIFIED))
        }
        fn size(&self) -> Option<usize> {
            None
        }
        fn ttl(&self) -> Option<u8> {
            None
        }
    }

    fn reply(version: u8, icmp_type: u8, icmp_code: u8) -> FakeReply {
        FakeReply {
            version: Some(version),
            icmp_type: Some(icmp_type),
            icmp_code: Some(icmp_code),
        }
    }

    #[test_case(4, 3, 1, ReplyClass::DstNetUnreachable; "v4 unreach host code -> net unreachable (preserved swap)")]
    #[test_case(4, 3, 0, ReplyClass::DstHostUnreachable; "v4 unreach net code -> host unreachable (preserved swap)")]
    #[test_case(4, 3, 3, ReplyClass::DstPortUnreachable; "v4 port unreachable")]
    #[test_case(4, 3, 2, ReplyClass::DstProtUnreachable; "v4 protocol unreachable")]
    #[test_case(4, 11, 0, ReplyClass::TtlExceededTransit; "v4 ttl exceeded in transit")]
    #[test_case(4, 11, 1, ReplyClass::TimeExceededReassembly; "v4 time exceeded reassembly")]
    #[test_case(4, 5, 0, ReplyClass::Redirect; "v4 redirect net")]
    #[test_case(4, 12, 0, ReplyClass::ParameterProblem; "v4 param problem code 0")]
    #[test_case(4, 12, 7, ReplyClass::ParameterProblem; "v4 param problem any code")]
    #[test_case(6, 1, 3, ReplyClass::DstNetUnreachable; "v6 addr unreachable -> net unreachable")]
    #[test_case(6, 1, 0, ReplyClass::DstHostUnreachable; "v6 no route -> host unreachable")]
    #[test_case(6, 1, 4, ReplyClass::DstPortUnreachable; "v6 no port -> port unreachable")]
    #[test_case(6, 4, 1, ReplyClass::DstProtUnreachable; "v6 param prob next header -> protocol unreachable")]
    #[test_case(6, 3, 0, ReplyClass::TtlExceededTransit; "v6 time exceeded transit")]
    #[test_case(6, 3, 1, ReplyClass::TimeExceededReassembly; "v6 time exceeded reassembly")]
    #[test_case(6, 137, 0, ReplyClass::Redirect; "v6 nd redirect code ignored")]
    #[test_case(6, 4, 0, ReplyClass::ParameterProblem; "v6 param prob header")]
    #[test_case(6, 4, 2, ReplyClass::ParameterProblem; "v6 param prob option")]
    #[test_case(4, 99, 99, ReplyClass::GenError; "v4 unknown type/code")]
    #[test_case(6, 99, 99, ReplyClass::GenError; "v6 unknown type/code")]
    fn classifier_table(version: u8, icmp_type: u8, icmp_code: u8, expected: ReplyClass) {
        assert_eq!(classify(&reply(version, icmp_type, icmp_code)), expected);
    }

    #[test]
    fn missing_field_degrades_to_gen_error() {
        let r = FakeReply {
            version: Some(4),
            icmp_type: None,
            icmp_code: Some(0),
        };
        assert_eq!(classify(&r), ReplyClass::GenError);
    }

    #[test]
    fn unrecognized_version_byte_degrades_to_gen_error() {
        let r = reply(5, 0, 0);
        assert_eq!(classify(&r), ReplyClass::GenError);
    }

    #[test]
    fn v6_prot_unreachable_precedes_parameter_problem() {
        // Regression for the ordering requirement in §4.1 note (b): the
        // DstProtUnreachable arm for (PARAM_PROB, PARAMPROB_NEXTHEADER) must
        // win over the generic ParameterProblem arm.
        let r = reply(6, 4, 1);
        assert_eq!(classify(&r), ReplyClass::DstProtUnreachable);
    }
}
