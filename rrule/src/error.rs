// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

/// Errors produced while building, formatting or parsing a recurrence rule.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RRuleError {
    /// The rule text could not be parsed
    #[error("Malformed recurrence rule '{input}': {reason}")]
    Malformed {
        /// The offending input, as given by the caller
        input: String,
        /// Parser diagnostics
        reason: String,
    },

    /// `INTERVAL` must be a positive integer
    #[error("Recurrence interval must be at least 1")]
    InvalidInterval,

    /// `COUNT` must be a positive integer
    #[error("Recurrence count must be at least 1")]
    InvalidCount,

    /// A `BY*` list contains a value outside of its allowed range
    #[error("Invalid {part} value: {value}")]
    InvalidValue {
        /// The rule part holding the value
        part: &'static str,
        /// The rejected value
        value: i32,
    },
}
