// Copyright (c) The qmc-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Petrick's method: exact minimum-cardinality covering over a set of clauses.
//!
//! Each clause lists the candidate indexes able to cover one minterm, and a selection
//! satisfies the clause if it contains at least one of them. Rather than expanding the
//! product of sums symbolically, the solver folds in one clause at a time and keeps only
//! the minimal selections seen so far.
//!
//! [`minimal_cover`] first simplifies the product: duplicate clauses and clauses implied
//! by a smaller one are dropped, and the rest are folded shortest first. It then searches
//! with a size bound, starting from the number of pairwise disjoint clauses and stopping at
//! the size of a greedy cover. A partial selection is dropped once its size, plus the
//! number of pairwise disjoint clauses it leaves unsatisfied, exceeds the bound. Every
//! subset of a cover no larger than the bound passes that test, so the first bound that
//! yields any cover keeps all minimum covers, and the choice made by
//! [`PetrickSolver::best`] is unchanged.

use crate::errors::{MinimizeError, Result};
use bitvec::prelude::*;
use std::{cmp::Ordering, mem};

/// A set of candidate indexes, one bit per candidate.
pub type Combination = BitVec<u64, Lsb0>;

#[derive(Clone, Debug)]
pub struct PetrickSolver {
    candidate_count: usize,
    combination_limit: Option<usize>,
    size_bound: Option<usize>,
    combinations: Vec<Combination>,
}

impl PetrickSolver {
    /// Creates a solver over candidates `0..candidate_count`, starting from the single empty
    /// combination.
    pub fn new(candidate_count: usize) -> Self {
        Self {
            candidate_count,
            combination_limit: None,
            size_bound: None,
            combinations: vec![empty_combination(candidate_count)],
        }
    }

    /// Fails a fold that produces more than `limit` combinations, before they are pruned.
    pub fn with_combination_limit(mut self, limit: Option<usize>) -> Self {
        self.combination_limit = limit;
        self
    }

    /// Drops combinations that cannot be part of a cover of at most `bound` candidates.
    ///
    /// Covers larger than `bound` are lost, so `bound` must be at least the size of some
    /// cover.
    pub fn with_size_bound(mut self, bound: Option<usize>) -> Self {
        self.size_bound = bound;
        self
    }

    /// The minimal combinations satisfying every clause folded in so far, sorted by size.
    pub fn combinations(&self) -> &[Combination] {
        &self.combinations
    }

    /// Folds in one clause.
    ///
    /// Every retained combination is crossed with every candidate of the clause, then the
    /// result is pruned down to its minimal elements under set inclusion. An empty clause
    /// cannot be satisfied and fails with [`MinimizeError::EmptyClause`].
    pub fn add_clause(&mut self, clause: &[usize]) -> Result<()> {
        let clause = clause_set(self.candidate_count, clause)?;
        self.fold(&clause, &[])
    }

    /// Returns the best combination found, as ascending indexes.
    ///
    /// Combinations are ranked by number of candidates, then by total `cost`, then
    /// lexicographically by their index sequence. Returns `None` if no combination is left,
    /// which only happens once an empty clause has been folded.
    pub fn best(&self, cost: impl Fn(usize) -> usize) -> Option<Vec<usize>> {
        self.combinations
            .iter()
            .map(|combination| combination.iter_ones().collect::<Vec<_>>())
            .min_by_key(|indexes| {
                let total_cost: usize = indexes.iter().map(|&ix| cost(ix)).sum();
                (indexes.len(), total_cost, indexes.clone())
            })
    }

    /// Folds in `clause`, with `pending` holding the clauses still to come. `pending` only
    /// feeds the size bound.
    fn fold(&mut self, clause: &Combination, pending: &[Combination]) -> Result<()> {
        let mut satisfied = Vec::new();
        let mut extended = Vec::new();
        for combination in mem::take(&mut self.combinations) {
            // Already satisfied: extending it can only produce supersets of itself.
            if intersects(&combination, clause) {
                satisfied.push(combination);
                continue;
            }
            if matches!(self.size_bound, Some(bound) if combination.count_ones() >= bound) {
                continue;
            }
            for ix in clause.iter_ones() {
                let mut next = combination.clone();
                next.set(ix, true);
                extended.push(next);
            }
        }

        let produced = satisfied.len() + extended.len();
        if let Some(limit) = self.combination_limit {
            if produced > limit {
                return Err(MinimizeError::CombinationLimitExceeded { limit });
            }
        }

        if let Some(bound) = self.size_bound {
            let within = |c: &Combination| c.count_ones() + disjoint_clauses(c, pending) <= bound;
            satisfied.retain(|c| within(c));
            extended.retain(|c| within(c));
        }
        self.combinations = absorb(satisfied, extended);
        log::trace!(
            "clause {:?}: {} combinations produced, {} minimal",
            clause.iter_ones().collect::<Vec<_>>(),
            produced,
            self.combinations.len()
        );
        Ok(())
    }
}

/// Solves a whole covering problem in one call.
///
/// Fails with [`MinimizeError::EmptyClause`] if some clause has no candidates.
pub fn minimal_cover<'a>(
    candidate_count: usize,
    clauses: impl IntoIterator<Item = &'a [usize]>,
    combination_limit: Option<usize>,
    cost: impl Fn(usize) -> usize,
) -> Result<Vec<usize>> {
    let clauses = clauses
        .into_iter()
        .map(|clause| clause_set(candidate_count, clause))
        .collect::<Result<Vec<_>>>()?;
    let clauses = reduce_clauses(clauses);
    let lower = disjoint_clauses(&empty_combination(candidate_count), &clauses);
    let upper = greedy_cover_size(candidate_count, &clauses);
    log::trace!(
        "{} clauses after reduction, minimum cover uses {} to {} candidates",
        clauses.len(),
        lower,
        upper
    );

    for bound in lower..=upper {
        let mut solver = PetrickSolver::new(candidate_count)
            .with_combination_limit(combination_limit)
            .with_size_bound(Some(bound));
        for (ix, clause) in clauses.iter().enumerate() {
            solver.fold(clause, &clauses[ix + 1..])?;
        }
        if let Some(best) = solver.best(&cost) {
            return Ok(best);
        }
        log::trace!("no cover of {} candidates", bound);
    }
    // The greedy cover has `upper` candidates, so the last bound always finds one.
    Err(MinimizeError::EmptyClause)
}

fn clause_set(candidate_count: usize, clause: &[usize]) -> Result<Combination> {
    debug_assert!(
        clause.iter().all(|&ix| ix < candidate_count),
        "clause {:?} must only contain indexes below {}",
        clause,
        candidate_count
    );
    if clause.is_empty() {
        return Err(MinimizeError::EmptyClause);
    }
    let mut set = empty_combination(candidate_count);
    for &ix in clause {
        set.set(ix, true);
    }
    Ok(set)
}

fn empty_combination(candidate_count: usize) -> Combination {
    bitvec![u64, Lsb0; 0; candidate_count]
}

/// Orders by number of candidates, then by the underlying words.
fn by_size(a: &Combination, b: &Combination) -> Ordering {
    a.count_ones()
        .cmp(&b.count_ones())
        .then_with(|| a.as_raw_slice().cmp(b.as_raw_slice()))
}

/// Drops duplicate clauses and clauses containing another one, since satisfying the smaller
/// clause satisfies the larger. The rest are returned shortest first.
fn reduce_clauses(mut clauses: Vec<Combination>) -> Vec<Combination> {
    clauses.sort_unstable_by(by_size);
    clauses.dedup();

    let mut kept: Vec<Combination> = Vec::with_capacity(clauses.len());
    for clause in clauses {
        if !kept.iter().any(|k| is_subset(k, &clause)) {
            kept.push(clause);
        }
    }
    kept
}

/// Size of the cover built by repeatedly taking the candidate that satisfies the most open
/// clauses, lowest index first on ties. Every clause must be non-empty.
fn greedy_cover_size(candidate_count: usize, clauses: &[Combination]) -> usize {
    let mut open: Vec<&Combination> = clauses.iter().collect();
    let mut size = 0;
    while !open.is_empty() {
        let mut best = (0, 0);
        for ix in 0..candidate_count {
            let hits = open.iter().filter(|clause| clause[ix]).count();
            if hits > best.1 {
                best = (ix, hits);
            }
        }
        if best.1 == 0 {
            break;
        }
        open.retain(|clause| !clause[best.0]);
        size += 1;
    }
    size
}

/// Lower bound on the candidates still needed by `combination`: the number of clauses in
/// `pending` it leaves unsatisfied that are pairwise disjoint, picked greedily in order.
fn disjoint_clauses(combination: &Combination, pending: &[Combination]) -> usize {
    let mut used = empty_combination(combination.len());
    let mut count = 0;
    for clause in pending {
        if intersects(clause, combination) || intersects(clause, &used) {
            continue;
        }
        for (u, &c) in used.as_raw_mut_slice().iter_mut().zip(clause.as_raw_slice()) {
            *u |= c;
        }
        count += 1;
    }
    count
}

/// Merges the combinations that already satisfied a clause with the ones extended to
/// satisfy it, keeping only minimal elements. The result is sorted by size.
///
/// `satisfied` must be an antichain. None of its members can contain an extension, so only
/// the extensions need checking.
fn absorb(satisfied: Vec<Combination>, mut extended: Vec<Combination>) -> Vec<Combination> {
    extended.sort_unstable_by(by_size);
    extended.dedup();

    let mut kept = satisfied;
    for combination in extended {
        // Anything contained in `combination` is no larger, so it sorts (and is kept) first.
        if !kept.iter().any(|k| is_subset(k, &combination)) {
            kept.push(combination);
        }
    }
    kept.sort_unstable_by(by_size);
    kept
}

/// Word-wise subset test. Both combinations must have the same length; bits past the end
/// stay zero since combinations are only ever built from all-zero vectors and `set`.
#[inline]
fn is_subset(a: &Combination, b: &Combination) -> bool {
    a.as_raw_slice()
        .iter()
        .zip(b.as_raw_slice())
        .all(|(&x, &y)| x & !y == 0)
}

#[inline]
fn intersects(a: &Combination, b: &Combination) -> bool {
    a.as_raw_slice()
        .iter()
        .zip(b.as_raw_slice())
        .any(|(&x, &y)| x & y != 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    fn ones(combination: &Combination) -> Vec<usize> {
        combination.iter_ones().collect()
    }

    fn set(len: usize, ixs: &[usize]) -> Combination {
        let mut c = empty_combination(len);
        for &ix in ixs {
            c.set(ix, true);
        }
        c
    }

    #[test]
    fn test_no_clauses() {
        let cover = minimal_cover(3, std::iter::empty(), None, |_| 1).unwrap();
        assert!(cover.is_empty());
    }

    #[test]
    fn test_empty_clause() {
        let clauses: [&[usize]; 2] = [&[0, 1], &[]];
        assert_eq!(
            minimal_cover(2, clauses, None, |_| 1),
            Err(MinimizeError::EmptyClause)
        );

        let mut solver = PetrickSolver::new(2);
        assert_eq!(solver.add_clause(&[]), Err(MinimizeError::EmptyClause));
    }

    #[test]
    fn test_absorption() {
        // (0 + 1)(0 + 2) = 0 + 12
        let mut solver = PetrickSolver::new(3);
        solver.add_clause(&[0, 1]).unwrap();
        solver.add_clause(&[0, 2]).unwrap();
        let combos: Vec<_> = solver.combinations().iter().map(ones).collect();
        assert_eq!(combos, vec![vec![0], vec![1, 2]]);
        assert_eq!(solver.best(|_| 1), Some(vec![0]));
    }

    #[test]
    fn test_cyclic_chart() {
        // Prime chart of the cyclic function m(0, 1, 2, 5, 6, 7), with primes in the order
        // -01, -10, 0-0, 00-, 1-1, 11-.
        let clauses: [&[usize]; 6] = [&[2, 3], &[0, 3], &[1, 2], &[0, 4], &[1, 5], &[4, 5]];
        let mut solver = PetrickSolver::new(6);
        for clause in clauses {
            solver.add_clause(clause).unwrap();
        }
        let combos: Vec<_> = solver.combinations().iter().map(ones).collect();
        // Two minimum covers of three primes each, plus the larger irredundant ones.
        assert!(combos.contains(&vec![0, 2, 5]));
        assert!(combos.contains(&vec![1, 3, 4]));
        assert!(combos.iter().all(|c| c.len() >= 3));

        // Every prime has two literals, so the tie is broken by index order.
        assert_eq!(solver.best(|_| 2), Some(vec![0, 2, 5]));
        assert_eq!(minimal_cover(6, clauses, None, |_| 2), Ok(vec![0, 2, 5]));
    }

    #[test]
    fn test_size_bound_keeps_minimum_covers() {
        let clauses: [&[usize]; 6] = [&[2, 3], &[0, 3], &[1, 2], &[0, 4], &[1, 5], &[4, 5]];
        let mut solver = PetrickSolver::new(6).with_size_bound(Some(3));
        for clause in clauses {
            solver.add_clause(clause).unwrap();
        }
        let combos: Vec<_> = solver.combinations().iter().map(ones).collect();
        assert_eq!(combos, vec![vec![1, 3, 4], vec![0, 2, 5]]);
    }

    #[test]
    fn test_cost_tie_break() {
        // (0 + 1): both single picks are minimal, the cheaper one wins.
        let cover = minimal_cover(2, [&[0, 1][..]], None, |ix| if ix == 0 { 3 } else { 1 })
            .unwrap();
        assert_eq!(cover, vec![1]);
    }

    #[test]
    fn test_combination_limit() {
        let clauses: [&[usize]; 2] = [&[0, 1], &[2, 3]];
        assert_eq!(
            minimal_cover(4, clauses, Some(3), |_| 1),
            Err(MinimizeError::CombinationLimitExceeded { limit: 3 })
        );
        assert_eq!(minimal_cover(4, clauses, Some(4), |_| 1), Ok(vec![0, 2]));
    }

    #[test]
    fn test_combination_limit_counts_before_pruning() {
        // The second fold produces 0, 01, 12 before 01 is absorbed by 0.
        let mut solver = PetrickSolver::new(3).with_combination_limit(Some(2));
        solver.add_clause(&[0, 1]).unwrap();
        assert_eq!(
            solver.add_clause(&[0, 2]),
            Err(MinimizeError::CombinationLimitExceeded { limit: 2 })
        );
    }

    #[test]
    fn test_many_candidates() {
        // More candidates than fit in one word.
        let mut solver = PetrickSolver::new(130);
        solver.add_clause(&[3, 129]).unwrap();
        solver.add_clause(&[64, 129]).unwrap();
        assert_eq!(solver.best(|_| 1), Some(vec![129]));
        let combos: Vec<_> = solver.combinations().iter().map(ones).collect();
        assert_eq!(combos, vec![vec![129], vec![3, 64]]);
    }

    #[test]
    fn test_reduce_clauses() {
        let reduced = reduce_clauses(vec![
            set(4, &[0, 1, 2]),
            set(4, &[1, 2]),
            set(4, &[3]),
            set(4, &[1, 2]),
            set(4, &[2, 3]),
        ]);
        let reduced: Vec<_> = reduced.iter().map(ones).collect();
        assert_eq!(reduced, vec![vec![3], vec![1, 2]]);
    }

    #[test]
    fn test_absorb() {
        let kept = absorb(
            vec![set(4, &[1])],
            vec![set(4, &[0, 1]), set(4, &[2, 3]), set(4, &[2, 3]), set(4, &[1, 3])],
        );
        let kept: Vec<_> = kept.iter().map(ones).collect();
        assert_eq!(kept, vec![vec![1], vec![2, 3]]);
    }

    #[test]
    fn test_bounds() {
        let clauses = [set(5, &[0, 1]), set(5, &[1, 2]), set(5, &[3]), set(5, &[3, 4])];
        // 1 then 3.
        assert_eq!(greedy_cover_size(5, &clauses), 2);
        // From nothing: 01 and 3 are disjoint, 12 meets 01 and 34 meets 3.
        assert_eq!(disjoint_clauses(&set(5, &[]), &clauses), 2);
        // Picking 1 leaves only 3 and 34 unsatisfied.
        assert_eq!(disjoint_clauses(&set(5, &[1]), &clauses), 1);
    }
}
