// Copyright (c) The qmc-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    chart::CoverageChart,
    errors::Result,
    implicant::Implicant,
    normalize::Problem,
    petrick,
    render::{SopDisplay, SopFormat},
};
use serde::Serialize;
use std::collections::BTreeSet;

/// The result of minimizing a [`Problem`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Minimization {
    #[serde(rename = "numInputs")]
    pub input_count: usize,
    /// Required minterms after normalization.
    pub minterms: Vec<u32>,
    pub dont_cares: Vec<u32>,
    pub vars: Vec<String>,
    /// Every prime implicant, sorted by cube.
    pub prime_implicants: Vec<Implicant>,
    pub essential_prime_implicants: Vec<Implicant>,
    /// The chosen cover, sorted by cube. `expression` and `latex` list terms in this order.
    pub selected_implicants: Vec<Implicant>,
    pub expression: String,
    pub latex: String,
}

/// Minimizes `problem` into a sum of products.
///
/// Runs the whole pipeline: normalization, prime generation, essential selection, then
/// Petrick's method over whatever the essential primes leave uncovered.
pub fn minimize(problem: &Problem) -> Result<Minimization> {
    let normalized = problem.normalize()?;
    let primes = normalized.prime_implicants();
    log::debug!(
        "{} inputs, {} minterms, {} don't-cares: {} prime implicants",
        normalized.input_count,
        normalized.minterms.len(),
        normalized.dont_cares.len(),
        primes.len()
    );

    let chart = CoverageChart::new(&primes, &normalized.minterms)?;
    let selection = chart.select_essentials(&primes);
    log::debug!(
        "{} essential prime implicants, {} minterms left to cover",
        selection.essential.len(),
        selection.remaining.len()
    );

    let chosen = petrick::minimal_cover(
        primes.len(),
        selection.remaining.iter().map(|&m| chart.covering(m)),
        problem.options.combination_limit,
        |ix| primes[ix].cube().literal_count(),
    )?;
    log::debug!("Petrick's method chose {} more", chosen.len());

    let selected_ixs: BTreeSet<usize> = selection
        .essential
        .iter()
        .copied()
        .chain(chosen)
        .collect();
    let essential_prime_implicants = selection
        .essential
        .iter()
        .map(|&ix| primes[ix].clone())
        .collect();
    let selected_implicants: Vec<Implicant> =
        selected_ixs.iter().map(|&ix| primes[ix].clone()).collect();

    let expression = SopDisplay::new(&selected_implicants, &normalized.vars).to_string();
    let latex = SopDisplay::new(&selected_implicants, &normalized.vars)
        .with_format(SopFormat::Latex)
        .to_string();

    Ok(Minimization {
        input_count: normalized.input_count,
        minterms: normalized.minterms,
        dont_cares: normalized.dont_cares,
        vars: normalized.vars,
        prime_implicants: primes,
        essential_prime_implicants,
        selected_implicants,
        expression,
        latex,
    })
}

impl Minimization {
    /// Evaluates the selected cover on `input`.
    pub fn evaluate(&self, input: u32) -> bool {
        self.selected_implicants
            .iter()
            .any(|implicant| implicant.cube().covers_minterm(input))
    }

    /// Union of the minterms covered by the selected implicants, ascending.
    pub fn covered_minterms(&self) -> Vec<u32> {
        self.selected_implicants
            .iter()
            .flat_map(|implicant| implicant.covered().iter().copied())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}
