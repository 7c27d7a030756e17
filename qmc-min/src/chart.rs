// Copyright (c) The qmc-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    errors::{MinimizeError, Result},
    implicant::Implicant,
};
use std::collections::{BTreeMap, BTreeSet};

/// Maps each required minterm to the indexes of the prime implicants covering it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoverageChart {
    rows: BTreeMap<u32, Vec<usize>>,
}

impl CoverageChart {
    /// Builds the chart for `required` (ascending) against `primes`.
    ///
    /// Fails with [`MinimizeError::UncoveredMinterm`] if some required minterm has no
    /// covering prime.
    pub fn new(primes: &[Implicant], required: &[u32]) -> Result<Self> {
        let mut rows = BTreeMap::new();
        for &minterm in required {
            let covering: Vec<usize> = primes
                .iter()
                .enumerate()
                .filter_map(|(ix, prime)| prime.covers(minterm).then(|| ix))
                .collect();
            if covering.is_empty() {
                return Err(MinimizeError::UncoveredMinterm { minterm });
            }
            rows.insert(minterm, covering);
        }
        Ok(Self { rows })
    }

    #[inline]
    pub fn minterm_count(&self) -> usize {
        self.rows.len()
    }

    /// Indexes of the primes covering `minterm`, or an empty slice if it is not required.
    pub fn covering(&self, minterm: u32) -> &[usize] {
        self.rows.get(&minterm).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Picks out the essential primes: those that are the only cover for some minterm.
    pub fn select_essentials(&self, primes: &[Implicant]) -> EssentialSelection {
        let essential: BTreeSet<usize> = self
            .rows
            .values()
            .filter(|row| row.len() == 1)
            .map(|row| row[0])
            .collect();

        let remaining = self
            .rows
            .keys()
            .copied()
            .filter(|&m| !essential.iter().any(|&ix| primes[ix].covers(m)))
            .collect();

        EssentialSelection {
            essential,
            remaining,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EssentialSelection {
    /// Indexes of essential primes, ascending.
    pub essential: BTreeSet<usize>,
    /// Required minterms not covered by any essential prime, ascending.
    pub remaining: Vec<u32>,
}
