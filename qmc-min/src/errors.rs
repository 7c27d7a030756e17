// Copyright (c) The qmc-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::normalize::{MAX_INPUTS, MIN_INPUTS};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, MinimizeError>;

/// Errors that abort a minimization. No partial result is produced for any of them.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum MinimizeError {
    #[error("number of inputs must be between {} and {}, got {count}", MIN_INPUTS, MAX_INPUTS)]
    InputCountOutOfRange { count: usize },

    #[error("minterm {minterm} does not fit in {input_count} inputs")]
    MintermOutOfRange { minterm: u32, input_count: usize },

    /// A required minterm is not covered by any prime implicant. This points at a bug in
    /// prime generation rather than at bad input.
    #[error("internal error: minterm {minterm} is not covered by any prime implicant")]
    UncoveredMinterm { minterm: u32 },

    /// Petrick's method was handed a clause with no candidates, so no cover exists. Like
    /// `UncoveredMinterm`, this is an internal invariant violation.
    #[error("internal error: cover clause has no candidate implicants")]
    EmptyClause,

    #[error("cover search exceeded the limit of {limit} candidate combinations")]
    CombinationLimitExceeded { limit: usize },
}

/// A bit pattern string contained something other than `0`, `1` and `-`, or had the wrong
/// width.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("invalid bit pattern {pattern:?}")]
pub struct InvalidBitPattern {
    pub pattern: String,
}

/// The selected cover disagrees with the function it was computed for.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[error("cover evaluates to {actual} on input {minterm}, expected {expected}")]
pub struct EquivalenceError {
    pub minterm: u32,
    pub expected: bool,
    pub actual: bool,
}
