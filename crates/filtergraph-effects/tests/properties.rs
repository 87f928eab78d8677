//! Property-based tests for filtergraph effects.
//!
//! Compares the graph-built comb filters against their direct-form difference
//! equations for random delays, decays and input signals.

use filtergraph_core::Filter;
use filtergraph_effects::{Comb, Echo, LowPass};
use proptest::prelude::*;

fn run(filter: &mut dyn Filter, input: &[f64]) -> Vec<f64> {
    input
        .iter()
        .map(|&x| filter.compute_one_step(&[x]).unwrap()[0])
        .collect()
}

/// `y[n] = a * x[n] + b * x[n - d] + c * y[n - d]`.
fn direct_form(input: &[f64], d: usize, a: f64, b: f64, c: f64) -> Vec<f64> {
    let mut out: Vec<f64> = Vec::with_capacity(input.len());
    for (n, &x) in input.iter().enumerate() {
        let (xd, yd) = if n >= d {
            (input[n - d], out[n - d])
        } else {
            (0.0, 0.0)
        };
        out.push(a * x + b * xd + c * yd);
    }
    out
}

fn assert_close(actual: &[f64], expected: &[f64]) -> Result<(), TestCaseError> {
    for (n, (&a, &e)) in actual.iter().zip(expected).enumerate() {
        prop_assert!((a - e).abs() < 1e-9, "sample {}: {} != {}", n, a, e);
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn echo_matches_difference_equation(
        d in 1usize..24,
        decay in 0.01f64..0.99,
        input in prop::collection::vec(-1.0f64..1.0, 1..128),
    ) {
        let out = run(&mut Echo::new(d, decay).unwrap(), &input);
        assert_close(&out, &direct_form(&input, d, 1.0, 0.0, 1.0 - decay))?;
    }

    #[test]
    fn comb_matches_difference_equation(
        d in 1usize..24,
        decay in 0.01f64..0.99,
        input in prop::collection::vec(-1.0f64..1.0, 1..128),
    ) {
        let out = run(&mut Comb::new(d, decay).unwrap(), &input);
        assert_close(&out, &direct_form(&input, d, 1.0, 1.0 - decay, 0.0))?;
    }

    #[test]
    fn low_pass_matches_difference_equation(
        d in 1usize..24,
        g in 0.01f64..0.99,
        input in prop::collection::vec(-1.0f64..1.0, 1..128),
    ) {
        let out = run(&mut LowPass::new(d, g).unwrap(), &input);
        assert_close(&out, &direct_form(&input, d, 1.0 - g, 0.0, g))?;
    }
}
