// Copyright (c) The qmc-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::errors::{MinimizeError, Result};
use std::collections::BTreeSet;

/// Smallest supported number of inputs.
pub const MIN_INPUTS: usize = 2;

/// Largest supported number of inputs.
pub const MAX_INPUTS: usize = 6;

/// Variable names used when the caller does not supply enough of them.
pub const DEFAULT_VARS: [&str; MAX_INPUTS] = ["A", "B", "C", "D", "E", "F"];

/// What to do with minterms or don't-cares that do not fit in the number of inputs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutOfRangePolicy {
    /// Drop them with a warning. They are never covered by any implicant.
    Ignore,
    /// Fail with [`MinimizeError::MintermOutOfRange`].
    Reject,
}

impl Default for OutOfRangePolicy {
    fn default() -> Self {
        Self::Ignore
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MinimizeOptions {
    pub out_of_range: OutOfRangePolicy,
    /// Upper bound on the number of candidate covers Petrick's method may produce in one
    /// fold, counted before pruning.
    pub combination_limit: Option<usize>,
}

impl MinimizeOptions {
    pub fn with_out_of_range(mut self, policy: OutOfRangePolicy) -> Self {
        self.out_of_range = policy;
        self
    }

    pub fn with_combination_limit(mut self, limit: usize) -> Self {
        self.combination_limit = Some(limit);
        self
    }
}

/// A single-output Boolean function to minimize, as given by the caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Problem {
    pub input_count: usize,
    pub minterms: Vec<u32>,
    pub dont_cares: Vec<u32>,
    pub vars: Option<Vec<String>>,
    pub options: MinimizeOptions,
}

impl Problem {
    pub fn new(input_count: usize, minterms: impl IntoIterator<Item = u32>) -> Self {
        Self {
            input_count,
            minterms: minterms.into_iter().collect(),
            dont_cares: Vec::new(),
            vars: None,
            options: MinimizeOptions::default(),
        }
    }

    pub fn with_dont_cares(mut self, dont_cares: impl IntoIterator<Item = u32>) -> Self {
        self.dont_cares = dont_cares.into_iter().collect();
        self
    }

    pub fn with_vars<S: Into<String>>(mut self, vars: impl IntoIterator<Item = S>) -> Self {
        self.vars = Some(vars.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_options(mut self, options: MinimizeOptions) -> Self {
        self.options = options;
        self
    }

    /// Validates the input count and produces the sorted, deduplicated working sets.
    pub fn normalize(&self) -> Result<NormalizedProblem> {
        let input_count = self.input_count;
        if !(MIN_INPUTS..=MAX_INPUTS).contains(&input_count) {
            return Err(MinimizeError::InputCountOutOfRange { count: input_count });
        }

        let minterms = self.in_range(&self.minterms)?;
        let mut dont_cares = self.in_range(&self.dont_cares)?;
        // A value that is both required and a don't-care is required.
        dont_cares.retain(|m| !minterms.contains(m));

        let universe = minterms.union(&dont_cares).copied().collect();

        Ok(NormalizedProblem {
            input_count,
            minterms: minterms.into_iter().collect(),
            dont_cares: dont_cares.into_iter().collect(),
            universe,
            vars: self.effective_vars(),
        })
    }

    fn in_range(&self, values: &[u32]) -> Result<BTreeSet<u32>> {
        let limit = 1_u32 << self.input_count;
        let mut kept = BTreeSet::new();
        for &value in values {
            if value < limit {
                kept.insert(value);
                continue;
            }
            match self.options.out_of_range {
                OutOfRangePolicy::Ignore => {
                    log::warn!(
                        "ignoring minterm {} which does not fit in {} inputs",
                        value,
                        self.input_count
                    );
                }
                OutOfRangePolicy::Reject => {
                    return Err(MinimizeError::MintermOutOfRange {
                        minterm: value,
                        input_count: self.input_count,
                    });
                }
            }
        }
        Ok(kept)
    }

    fn effective_vars(&self) -> Vec<String> {
        match &self.vars {
            Some(vars) if vars.len() >= self.input_count => {
                vars[..self.input_count].to_vec()
            }
            _ => DEFAULT_VARS[..self.input_count]
                .iter()
                .map(|&name| name.to_owned())
                .collect(),
        }
    }
}

/// The validated form of a [`Problem`].
///
/// `minterms` and `dont_cares` are disjoint, ascending, and contain only values below
/// `2^input_count`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NormalizedProblem {
    pub input_count: usize,
    pub minterms: Vec<u32>,
    pub dont_cares: Vec<u32>,
    pub universe: Vec<u32>,
    pub vars: Vec<String>,
}
