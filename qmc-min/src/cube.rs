// Copyright (c) The qmc-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{errors::InvalidBitPattern, normalize::MAX_INPUTS};
use arrayvec::ArrayVec;
use serde::{Serialize, Serializer};
use std::{fmt, str::FromStr};

/// A product term over up to [`MAX_INPUTS`] variables.
///
/// Each position is either fixed to a value (`Some(bool)`) or free (`None`, written `-`).
/// Position 0 is the most significant bit of a minterm index.
///
/// The derived ordering compares positions left to right with `-` < `0` < `1`, which is the
/// same order as comparing the displayed strings.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub struct Cube {
    input: ArrayVec<Option<bool>, MAX_INPUTS>,
}

impl Cube {
    /// Returns the cube with no fixed positions, covering every input combination.
    pub fn universe(width: usize) -> Self {
        assert!(
            width <= MAX_INPUTS,
            "width {} must be at most {}",
            width,
            MAX_INPUTS
        );
        Self {
            input: std::iter::repeat(None).take(width).collect(),
        }
    }

    /// Returns the fully-specified cube for `minterm`.
    ///
    /// Only the low `width` bits of `minterm` are looked at.
    pub fn from_minterm(minterm: u32, width: usize) -> Self {
        assert!(
            width <= MAX_INPUTS,
            "width {} must be at most {}",
            width,
            MAX_INPUTS
        );
        let input = (0..width)
            .map(|ix| Some(minterm_bit(minterm, width, ix)))
            .collect();
        Self { input }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.input.len()
    }

    #[inline]
    pub fn input(&self) -> &[Option<bool>] {
        &self.input
    }

    /// Number of positions fixed to `1`.
    pub fn ones(&self) -> usize {
        self.input.iter().filter(|&&c| c == Some(true)).count()
    }

    /// Number of fixed positions, i.e. literals in the product term.
    pub fn literal_count(&self) -> usize {
        self.input.iter().filter(|c| c.is_some()).count()
    }

    #[inline]
    pub fn is_universe(&self) -> bool {
        self.input.iter().all(|c| c.is_none())
    }

    /// Iterates over the fixed positions as `(position, value)` pairs.
    pub fn literals(&self) -> impl Iterator<Item = (usize, bool)> + '_ {
        self.input
            .iter()
            .enumerate()
            .filter_map(|(ix, c)| c.map(|value| (ix, value)))
    }

    /// Combines two cubes that differ in exactly one fixed position.
    ///
    /// Free positions must line up exactly: a `-` opposite a fixed bit blocks the merge.
    pub fn merge(&self, other: &Cube) -> Option<Cube> {
        if self.width() != other.width() {
            return None;
        }

        let mut differing = None;
        for (ix, (&c, &d)) in self.input.iter().zip(&other.input).enumerate() {
            match (c, d) {
                (None, None) => {}
                (Some(c), Some(d)) if c == d => {}
                (Some(_), Some(_)) => {
                    if differing.is_some() {
                        return None;
                    }
                    differing = Some(ix);
                }
                (None, Some(_)) | (Some(_), None) => return None,
            }
        }

        let ix = differing?;
        let mut input = self.input.clone();
        input[ix] = None;
        Some(Cube { input })
    }

    /// Returns true if `minterm` lies inside this cube.
    ///
    /// Minterms that do not fit in `self.width()` bits are never covered.
    pub fn covers_minterm(&self, minterm: u32) -> bool {
        let width = self.width();
        if u64::from(minterm) >> width != 0 {
            return false;
        }
        self.literals()
            .all(|(ix, value)| minterm_bit(minterm, width, ix) == value)
    }

    /// Returns true if every combination covered by `other` is also covered by `self`.
    pub fn contains(&self, other: &Cube) -> bool {
        self.width() == other.width()
            && self
                .input
                .iter()
                .zip(&other.input)
                .all(|(&c, &d)| c.is_none() || c == d)
    }

    /// Iterates over every minterm covered by this cube, in ascending order.
    pub fn minterms(&self) -> impl Iterator<Item = u32> + '_ {
        (0..(1_u32 << self.width())).filter(move |&m| self.covers_minterm(m))
    }
}

#[inline]
fn minterm_bit(minterm: u32, width: usize, ix: usize) -> bool {
    (minterm >> (width - 1 - ix)) & 1 == 1
}

impl FromStr for Cube {
    type Err = InvalidBitPattern;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || InvalidBitPattern {
            pattern: s.to_owned(),
        };

        let mut input = ArrayVec::new();
        for ch in s.chars() {
            let value = match ch {
                '0' => Some(false),
                '1' => Some(true),
                '-' => None,
                _ => return Err(err()),
            };
            input.try_push(value).map_err(|_| err())?;
        }
        if input.is_empty() {
            return Err(err());
        }
        Ok(Self { input })
    }
}

impl fmt::Display for Cube {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for &c in &self.input {
            let ch = match c {
                Some(true) => '1',
                Some(false) => '0',
                None => '-',
            };
            write!(f, "{}", ch)?;
        }
        Ok(())
    }
}

impl Serialize for Cube {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cube(s: &str) -> Cube {
        s.parse().unwrap()
    }

    #[test]
    fn test_from_minterm() {
        assert_eq!(Cube::from_minterm(5, 4), cube("0101"));
        assert_eq!(Cube::from_minterm(0, 2), cube("00"));
        assert_eq!(Cube::from_minterm(63, 6), cube("111111"));
        assert_eq!(Cube::from_minterm(5, 4).ones(), 2);
    }

    #[test]
    fn test_parse_errors() {
        assert!("01x".parse::<Cube>().is_err());
        assert!("".parse::<Cube>().is_err());
        assert!("0101010".parse::<Cube>().is_err());
        assert_eq!(cube("1-0").to_string(), "1-0");
    }

    #[test]
    fn test_merge() {
        assert_eq!(cube("0101").merge(&cube("0111")), Some(cube("01-1")));
        assert_eq!(cube("01-1").merge(&cube("11-1")), Some(cube("-1-1")));
        // Two differing positions.
        assert_eq!(cube("0101").merge(&cube("0110")), None);
        // Dashes must line up.
        assert_eq!(cube("01-1").merge(&cube("0-11")), None);
        assert_eq!(cube("01-1").merge(&cube("0111")), None);
        // Identical cubes do not merge.
        assert_eq!(cube("01-1").merge(&cube("01-1")), None);
    }

    #[test]
    fn test_covers_minterm() {
        let c = cube("-1-1");
        let covered: Vec<_> = c.minterms().collect();
        assert_eq!(covered, vec![5, 7, 13, 15]);
        assert!(!c.covers_minterm(4));
        // Out of range minterms are never covered, even by the universe.
        assert!(!Cube::universe(3).covers_minterm(8));
        assert!(Cube::universe(3).covers_minterm(7));
    }

    #[test]
    fn test_contains_and_order() {
        assert!(cube("-1-").contains(&cube("01-")));
        assert!(!cube("01-").contains(&cube("-1-")));
        assert!(cube("--") < cube("-0"));
        assert!(cube("0-") < cube("1-"));
        assert_eq!(cube("1-0").literal_count(), 2);
        assert!(Cube::universe(4).is_universe());
    }
}
