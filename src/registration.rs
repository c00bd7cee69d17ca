//! Algorithm registration metadata (spec §6).
//!
//! This crate does not parse CLI options — that remains an external
//! collaborator's responsibility (spec §1 Non-goals) — but it does publish
//! the descriptors an external parser needs to recognize this algorithm's
//! flags, the same way the source registers `"ping"` with its handler and
//! option table.

/// The name this algorithm registers itself under with the framework.
pub const ALGORITHM_NAME: &str = "ping";

/// What a recognized CLI option does, for an external parser to act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionEffect {
    /// Set `count` from the option's argument.
    SetCount,
    /// Enable `show_timestamp`.
    EnableShowTimestamp,
    /// Disable `do_resolv`.
    DisableResolve,
    /// Enable `is_quiet`.
    EnableQuiet,
    /// Print help and exit.
    Help,
}

/// One recognized CLI option descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionSpec {
    pub short: char,
    pub takes_value: bool,
    pub effect: OptionEffect,
}

/// The recognized CLI options for the `ping` algorithm (spec §6 table).
pub const CLI_OPTIONS: &[OptionSpec] = &[
    OptionSpec {
        short: 'c',
        takes_value: true,
        effect: OptionEffect::SetCount,
    },
    OptionSpec {
        short: 'D',
        takes_value: false,
        effect: OptionEffect::EnableShowTimestamp,
    },
    OptionSpec {
        short: 'n',
        takes_value: false,
        effect: OptionEffect::DisableResolve,
    },
    OptionSpec {
        short: 'q',
        takes_value: false,
        effect: OptionEffect::EnableQuiet,
    },
    OptionSpec {
        short: 'v',
        takes_value: false,
        effect: OptionEffect::Help,
    },
];
