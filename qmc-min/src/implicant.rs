// Copyright (c) The qmc-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::cube::Cube;
use serde::Serialize;
use std::{
    cmp::Ordering,
    hash::{Hash, Hasher},
};

/// A cube together with the required minterms it covers.
///
/// Identity is the cube alone: two implicants with the same cube are equal regardless of
/// their coverage lists.
#[derive(Clone, Debug, Serialize)]
pub struct Implicant {
    #[serde(rename = "bits")]
    cube: Cube,
    covered: Vec<u32>,
}

impl Implicant {
    /// Creates an implicant for `cube`, scoring it against `required` (which must be
    /// ascending).
    pub fn new(cube: Cube, required: &[u32]) -> Self {
        let covered = required
            .iter()
            .copied()
            .filter(|&m| cube.covers_minterm(m))
            .collect();
        Self { cube, covered }
    }

    #[inline]
    pub fn cube(&self) -> &Cube {
        &self.cube
    }

    /// Required minterms covered by this implicant, ascending.
    #[inline]
    pub fn covered(&self) -> &[u32] {
        &self.covered
    }

    #[inline]
    pub fn covers(&self, minterm: u32) -> bool {
        self.covered.binary_search(&minterm).is_ok()
    }
}

impl PartialEq for Implicant {
    fn eq(&self, other: &Self) -> bool {
        self.cube == other.cube
    }
}

impl Eq for Implicant {}

impl Hash for Implicant {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.cube.hash(state);
    }
}

impl PartialOrd for Implicant {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Implicant {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cube.cmp(&other.cube)
    }
}
