// Copyright (c) The qmc-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::normalize::{Problem, MAX_INPUTS, MIN_INPUTS};
use proptest::prelude::*;

#[derive(Clone, Copy, Debug)]
enum Output {
    Off,
    On,
    DontCare,
}

impl Arbitrary for Problem {
    /// Inclusive range of input counts to generate. Defaults to every supported count.
    type Parameters = Option<(usize, usize)>;
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(params: Self::Parameters) -> Self::Strategy {
        let (min_inputs, max_inputs) = params.unwrap_or((MIN_INPUTS, MAX_INPUTS));
        // Assign an output to every input combination.
        (min_inputs..=max_inputs)
            .prop_flat_map(|input_count| {
                let outputs = prop::collection::vec(
                    prop_oneof![
                        3 => Just(Output::Off),
                        3 => Just(Output::On),
                        1 => Just(Output::DontCare),
                    ],
                    1 << input_count,
                );
                (Just(input_count), outputs)
            })
            .prop_map(|(input_count, outputs)| {
                let pick = |wanted: fn(Output) -> bool| {
                    outputs
                        .iter()
                        .enumerate()
                        .filter(move |&(_, &output)| wanted(output))
                        .map(|(m, _)| m as u32)
                        .collect::<Vec<_>>()
                };
                let minterms = pick(|o| matches!(o, Output::On));
                let dont_cares = pick(|o| matches!(o, Output::DontCare));
                Problem::new(input_count, minterms).with_dont_cares(dont_cares)
            })
            .boxed()
    }
}
