// Copyright (c) The qmc-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use clap::{Args, Parser, Subcommand};
use color_eyre::{
    eyre::{eyre, WrapErr},
    Result,
};
use qmc_min::{
    minimize, render::TermDisplay, Minimization, MinimizeOptions, OutOfRangePolicy, Problem,
};
use simplelog::LevelFilter;

/// Minimize a Boolean function of 2 to 6 inputs into a sum of products.
#[derive(Debug, Parser)]
#[clap(name = "qmc")]
pub struct QmcApp {
    /// Log more detail to stderr (-v, -vv, -vvv)
    #[clap(long, short, parse(from_occurrences), global = true)]
    verbose: usize,

    #[clap(subcommand)]
    command: QmcCommand,
}

#[derive(Debug, Subcommand)]
pub enum QmcCommand {
    /// Print the minimal sum of products
    Solve {
        #[clap(flatten)]
        function: FunctionArgs,

        /// Print the full result as JSON
        #[clap(long)]
        json: bool,
    },
    /// Minimize, then check the result against the function on every input
    Verify {
        #[clap(flatten)]
        function: FunctionArgs,
    },
}

#[derive(Debug, Args)]
pub struct FunctionArgs {
    /// Number of inputs (2 to 6)
    #[clap(long, short = 'n')]
    inputs: usize,

    /// Comma-separated minterms, e.g. 0,2,5,7
    #[clap(long, short, default_value = "")]
    minterms: String,

    /// Comma-separated don't-care combinations
    #[clap(long, short, default_value = "")]
    dont_cares: String,

    /// Comma-separated variable names, most significant first
    #[clap(long)]
    vars: Option<String>,

    /// Reject minterms that do not fit in the number of inputs instead of ignoring them
    #[clap(long)]
    strict: bool,

    /// Give up if Petrick's method has to track more than this many candidate covers
    #[clap(long)]
    combination_limit: Option<usize>,
}

impl QmcApp {
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    pub fn exec(self) -> Result<()> {
        self.command.exec()
    }
}

impl QmcCommand {
    pub fn exec(self) -> Result<()> {
        match self {
            Self::Solve { function, json } => {
                let result = function.solve()?;
                if json {
                    println!("{}", serde_json::to_string_pretty(&result)?);
                } else {
                    print_result(&result);
                }
                Ok(())
            }
            Self::Verify { function } => {
                let result = function.solve()?;
                result
                    .check_equivalent()
                    .wrap_err_with(|| format!("verifying {}", result.expression))?;
                println!("ok: {}", result.expression);
                Ok(())
            }
        }
    }
}

impl FunctionArgs {
    /// Turns the raw arguments into a [`Problem`], rejecting malformed lists.
    pub fn to_problem(&self) -> Result<Problem> {
        let minterms = parse_list(&self.minterms).wrap_err("invalid --minterms")?;
        let dont_cares = parse_list(&self.dont_cares).wrap_err("invalid --dont-cares")?;

        let mut options = MinimizeOptions::default();
        if self.strict {
            options = options.with_out_of_range(OutOfRangePolicy::Reject);
        }
        if let Some(limit) = self.combination_limit {
            options = options.with_combination_limit(limit);
        }

        let mut problem = Problem::new(self.inputs, minterms)
            .with_dont_cares(dont_cares)
            .with_options(options);
        if let Some(vars) = &self.vars {
            problem = problem.with_vars(split_list(vars));
        }
        Ok(problem)
    }

    fn solve(&self) -> Result<Minimization> {
        let problem = self.to_problem()?;
        log::info!(
            "minimizing {} minterms over {} inputs",
            problem.minterms.len(),
            problem.input_count
        );
        Ok(minimize(&problem)?)
    }
}

fn print_result(result: &Minimization) {
    println!("expression: {}", result.expression);
    println!("latex:      {}", result.latex);
    println!("selected implicants:");
    for implicant in &result.selected_implicants {
        let covered: Vec<String> = implicant.covered().iter().map(u32::to_string).collect();
        println!(
            "  {}  {}  covers {}",
            implicant.cube(),
            TermDisplay::new(implicant.cube(), &result.vars),
            covered.join(", ")
        );
    }
}

fn split_list(s: &str) -> impl Iterator<Item = &str> {
    s.split(',').map(str::trim).filter(|item| !item.is_empty())
}

/// Parses a comma-separated list of non-negative integers. Blank entries are skipped.
pub fn parse_list(s: &str) -> Result<Vec<u32>> {
    split_list(s)
        .map(|item| {
            item.parse::<u32>()
                .map_err(|err| eyre!("{:?} is not a valid minterm: {}", item, err))
        })
        .collect()
}
