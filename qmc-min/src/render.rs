// Copyright (c) The qmc-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{cube::Cube, implicant::Implicant};
use itertools::{Itertools, Position};
use std::{borrow::Cow, fmt};

/// Output notation for a sum of products.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SopFormat {
    /// `AB' + C`: literals concatenated, complements marked with an apostrophe.
    Infix,

    /// `$F = A \overline{B} + C$`: literals separated by spaces, complements overlined,
    /// wrapped in an inline math block.
    Latex,
}

impl SopFormat {
    fn write_literal(self, f: &mut fmt::Formatter, var: &str, value: bool) -> fmt::Result {
        match (self, value) {
            (_, true) => write!(f, "{}", var),
            (Self::Infix, false) => write!(f, "{}'", var),
            (Self::Latex, false) => write!(f, "\\overline{{{}}}", var),
        }
    }

    fn literal_separator(self) -> &'static str {
        match self {
            Self::Infix => "",
            Self::Latex => " ",
        }
    }
}

impl Default for SopFormat {
    fn default() -> Self {
        Self::Infix
    }
}

/// Displays a single cube as a product term.
pub struct TermDisplay<'a> {
    cube: &'a Cube,
    vars: &'a [String],
    format: SopFormat,
}

impl<'a> TermDisplay<'a> {
    /// `vars` must have at least `cube.width()` names.
    pub fn new(cube: &'a Cube, vars: &'a [String]) -> Self {
        assert!(
            vars.len() >= cube.width(),
            "{} variable names given for a cube of width {}",
            vars.len(),
            cube.width()
        );
        Self {
            cube,
            vars,
            format: SopFormat::default(),
        }
    }

    pub fn with_format(mut self, format: SopFormat) -> Self {
        self.format = format;
        self
    }
}

impl<'a> fmt::Display for TermDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.cube.is_universe() {
            return write!(f, "1");
        }
        for (ix, (input_ix, value)) in self.cube.literals().enumerate() {
            if ix > 0 {
                write!(f, "{}", self.format.literal_separator())?;
            }
            self.format
                .write_literal(f, &self.vars[input_ix], value)?;
        }
        Ok(())
    }
}

/// Displays a list of implicants as a sum of products, in the order given.
pub struct SopDisplay<'a> {
    implicants: &'a [Implicant],
    vars: &'a [String],
    format: SopFormat,
    term_separator: Cow<'a, str>,
}

impl<'a> SopDisplay<'a> {
    pub fn new(implicants: &'a [Implicant], vars: &'a [String]) -> Self {
        Self {
            implicants,
            vars,
            format: SopFormat::default(),
            term_separator: Cow::Borrowed(" + "),
        }
    }

    pub fn with_format(mut self, format: SopFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_term_separator(mut self, separator: impl Into<Cow<'a, str>>) -> Self {
        self.term_separator = separator.into();
        self
    }

    fn fmt_terms(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.implicants.is_empty() {
            return write!(f, "0");
        }
        for elem in self.implicants.iter().with_position() {
            match elem {
                Position::First(implicant) | Position::Middle(implicant) => {
                    write!(f, "{}{}", self.term(implicant), self.term_separator)?;
                }
                Position::Last(implicant) | Position::Only(implicant) => {
                    write!(f, "{}", self.term(implicant))?;
                }
            }
        }
        Ok(())
    }

    fn term(&self, implicant: &'a Implicant) -> TermDisplay<'a> {
        TermDisplay::new(implicant.cube(), self.vars).with_format(self.format)
    }
}

impl<'a> fmt::Display for SopDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.format {
            SopFormat::Infix => self.fmt_terms(f),
            SopFormat::Latex => {
                write!(f, "$F = ")?;
                self.fmt_terms(f)?;
                write!(f, "$")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn implicants(patterns: &[&str]) -> Vec<Implicant> {
        patterns
            .iter()
            .map(|p| Implicant::new(p.parse().unwrap(), &[]))
            .collect()
    }

    fn vars(names: &[&str]) -> Vec<String> {
        names.iter().map(|&n| n.to_owned()).collect()
    }

    #[test]
    fn test_infix() {
        let vars = vars(&["A", "B", "C", "D"]);
        let selected = implicants(&["-0-0", "-1-1"]);
        assert_eq!(SopDisplay::new(&selected, &vars).to_string(), "B'D' + BD");

        let selected = implicants(&["10-1"]);
        assert_eq!(SopDisplay::new(&selected, &vars).to_string(), "AB'D");
    }

    #[test]
    fn test_latex() {
        let vars = vars(&["A", "B", "C", "D"]);
        let selected = implicants(&["-0-0", "-1-1"]);
        assert_eq!(
            SopDisplay::new(&selected, &vars)
                .with_format(SopFormat::Latex)
                .to_string(),
            "$F = \\overline{B} \\overline{D} + B D$"
        );
    }

    #[test]
    fn test_constants() {
        let vars = vars(&["X", "Y", "Z"]);
        let none = implicants(&[]);
        let all = implicants(&["---"]);

        assert_eq!(SopDisplay::new(&none, &vars).to_string(), "0");
        assert_eq!(SopDisplay::new(&all, &vars).to_string(), "1");
        assert_eq!(
            SopDisplay::new(&none, &vars)
                .with_format(SopFormat::Latex)
                .to_string(),
            "$F = 0$"
        );
        assert_eq!(
            SopDisplay::new(&all, &vars)
                .with_format(SopFormat::Latex)
                .to_string(),
            "$F = 1$"
        );
    }

    #[test]
    fn test_multi_char_vars_and_separator() {
        let vars = vars(&["x1", "x2"]);
        let selected = implicants(&["0-", "-1"]);
        assert_eq!(
            SopDisplay::new(&selected, &vars)
                .with_term_separator(" | ")
                .to_string(),
            "x1' | x2"
        );
    }
}
