// Copyright (c) The qmc-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Two-level minimization of single-output Boolean functions of 2 to 6 inputs.
//!
//! Prime implicants are generated with Quine-McCluskey merging, essential primes are
//! picked out of the coverage chart, and whatever they leave uncovered is solved exactly
//! with Petrick's method. The result is rendered as an infix and a LaTeX sum of products.
//!
//! ```
//! use qmc_min::{minimize, Problem};
//!
//! let result = minimize(&Problem::new(4, [0, 2, 5, 7, 8, 10, 13, 15])).unwrap();
//! assert_eq!(result.expression, "B'D' + BD");
//! ```

pub mod chart;
pub mod cube;
pub mod errors;
pub mod implicant;
pub mod minimize;
pub mod normalize;
pub mod petrick;
pub mod primes;
pub mod render;
mod verify;

#[cfg(any(test, feature = "proptest1"))]
mod proptest_helpers;

pub use errors::{EquivalenceError, MinimizeError};
pub use implicant::Implicant;
pub use minimize::{minimize, Minimization};
pub use normalize::{MinimizeOptions, OutOfRangePolicy, Problem};
