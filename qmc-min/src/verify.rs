// Copyright (c) The qmc-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{errors::EquivalenceError, minimize::Minimization};

impl Minimization {
    /// Checks the selected cover against the function it was computed for, over every
    /// input combination.
    ///
    /// Required minterms must evaluate to true, don't-cares may evaluate to anything, and
    /// everything else must evaluate to false. Returns the first input that disagrees.
    pub fn check_equivalent(&self) -> Result<(), EquivalenceError> {
        for input in 0..(1_u32 << self.input_count) {
            let expected = match (
                self.minterms.binary_search(&input),
                self.dont_cares.binary_search(&input),
            ) {
                (Ok(_), _) => true,
                (Err(_), Ok(_)) => continue,
                (Err(_), Err(_)) => false,
            };
            let actual = self.evaluate(input);
            if actual != expected {
                return Err(EquivalenceError {
                    minterm: input,
                    expected,
                    actual,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{errors::EquivalenceError, implicant::Implicant, minimize, normalize::Problem};

    #[test]
    fn test_equivalent() {
        let result = minimize(&Problem::new(4, [1, 3, 7, 11, 15]).with_dont_cares([0, 2, 5]))
            .unwrap();
        assert_eq!(result.check_equivalent(), Ok(()));
        assert!(result.evaluate(1));
        assert!(!result.evaluate(4));
    }

    #[test]
    fn test_detects_missing_term() {
        let mut result = minimize(&Problem::new(3, [0, 1, 2, 5, 6, 7])).unwrap();
        result.selected_implicants.pop();
        assert_eq!(
            result.check_equivalent(),
            Err(EquivalenceError {
                minterm: 6,
                expected: true,
                actual: false,
            })
        );
    }

    #[test]
    fn test_detects_extra_coverage() {
        let mut result = minimize(&Problem::new(2, [0])).unwrap();
        result.selected_implicants = vec![Implicant::new("0-".parse().unwrap(), &[0])];
        assert_eq!(
            result.check_equivalent(),
            Err(EquivalenceError {
                minterm: 1,
                expected: false,
                actual: true,
            })
        );
    }
}
