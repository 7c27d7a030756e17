// Copyright (c) The qmc-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{cube::Cube, implicant::Implicant, normalize::NormalizedProblem};
use itertools::Itertools;
use std::collections::{BTreeMap, BTreeSet};

impl NormalizedProblem {
    /// Generates every prime implicant of the function, scored against the required
    /// minterms. Don't-cares take part in merging but never appear in coverage lists.
    ///
    /// The result is sorted by cube.
    pub fn prime_implicants(&self) -> Vec<Implicant> {
        let cubes = self
            .universe
            .iter()
            .map(|&m| Cube::from_minterm(m, self.input_count));
        prime_cubes(cubes)
            .into_iter()
            .map(|cube| Implicant::new(cube, &self.minterms))
            .collect()
    }
}

/// Runs Quine-McCluskey merging rounds over `cubes` until nothing merges.
///
/// All cubes must have the same width.
pub fn prime_cubes(cubes: impl IntoIterator<Item = Cube>) -> BTreeSet<Cube> {
    let mut primes = BTreeSet::new();
    let mut current: BTreeSet<Cube> = cubes.into_iter().collect();
    let mut round = 0;

    while !current.is_empty() {
        round += 1;
        let MergeRound { merged, unmerged } = merge_round(&current);

        let before = primes.len();
        primes.extend(unmerged);
        log::debug!(
            "round {}: {} cubes merged into {}, {} new primes",
            round,
            current.len(),
            merged.len(),
            primes.len() - before,
        );

        current = merged;
    }

    primes
}

struct MergeRound {
    /// Cubes produced by merging, input to the next round.
    merged: BTreeSet<Cube>,
    /// Cubes that took part in no merge. These are prime.
    unmerged: Vec<Cube>,
}

fn merge_round(current: &BTreeSet<Cube>) -> MergeRound {
    let groups = group_by_ones(current);

    let mut merged_away = BTreeSet::new();
    let mut merged = BTreeSet::new();
    for (ones, lower) in &groups {
        let higher = match groups.get(&(ones + 1)) {
            Some(higher) => higher,
            None => continue,
        };
        for (&c, &d) in lower.iter().cartesian_product(higher) {
            if let Some(cube) = c.merge(d) {
                merged_away.insert(c);
                merged_away.insert(d);
                merged.insert(cube);
            }
        }
    }

    let unmerged = current
        .iter()
        .filter(|&cube| !merged_away.contains(cube))
        .cloned()
        .collect();
    MergeRound { merged, unmerged }
}

fn group_by_ones(cubes: &BTreeSet<Cube>) -> BTreeMap<usize, Vec<&Cube>> {
    let mut groups: BTreeMap<usize, Vec<&Cube>> = BTreeMap::new();
    for cube in cubes {
        groups.entry(cube.ones()).or_default().push(cube);
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::Problem;
    use test_log::test;

    fn bits(implicants: &[Implicant]) -> Vec<String> {
        implicants.iter().map(|i| i.cube().to_string()).collect()
    }

    #[test]
    fn test_basic() {
        let primes = Problem::new(4, [0, 2, 5, 7, 8, 10, 13, 15])
            .normalize()
            .unwrap()
            .prime_implicants();
        assert_eq!(bits(&primes), vec!["-0-0", "-1-1"]);
        assert_eq!(primes[0].covered(), &[0, 2, 8, 10]);
        assert_eq!(primes[1].covered(), &[5, 7, 13, 15]);
    }

    #[test]
    fn test_dont_cares_merge_but_are_not_covered() {
        // f = m(1, 3) + d(5, 7) over 3 inputs: the single prime is --1.
        let primes = Problem::new(3, [1, 3])
            .with_dont_cares([5, 7])
            .normalize()
            .unwrap()
            .prime_implicants();
        assert_eq!(bits(&primes), vec!["--1"]);
        assert_eq!(primes[0].covered(), &[1, 3]);
    }

    #[test]
    fn test_cyclic() {
        // The classic cyclic function m(0, 1, 2, 5, 6, 7) has six primes, none essential.
        let primes = Problem::new(3, [0, 1, 2, 5, 6, 7])
            .normalize()
            .unwrap()
            .prime_implicants();
        assert_eq!(
            bits(&primes),
            vec!["-01", "-10", "0-0", "00-", "1-1", "11-"]
        );
    }

    #[test]
    fn test_unmergeable_minterm_is_prime() {
        let primes = Problem::new(3, [0, 7]).normalize().unwrap().prime_implicants();
        assert_eq!(bits(&primes), vec!["000", "111"]);
    }

    #[test]
    fn test_empty_and_full() {
        let empty = Problem::new(3, []).normalize().unwrap().prime_implicants();
        assert!(empty.is_empty());

        let full = Problem::new(2, 0..4).normalize().unwrap().prime_implicants();
        assert_eq!(bits(&full), vec!["--"]);
        assert_eq!(full[0].covered(), &[0, 1, 2, 3]);
    }

    #[test]
    fn test_primes_are_maximal() {
        let cubes = [1, 4, 6, 9, 10, 11, 13, 14, 15, 21, 30, 31, 40, 42, 63]
            .iter()
            .map(|&m| Cube::from_minterm(m, 6));
        let primes = prime_cubes(cubes);
        for (c, d) in primes.iter().tuple_combinations() {
            assert!(!c.contains(d), "{} contains {}", c, d);
            assert!(!d.contains(c), "{} contains {}", d, c);
            assert_eq!(c.merge(d), None);
        }
    }
}
