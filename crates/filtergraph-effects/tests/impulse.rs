//! Impulse-response tests for the preconfigured topologies.
//!
//! Each effect is compared against the closed form of its difference equation,
//! or, for the reverberators, checked for validity, stability and reset
//! behavior.

use filtergraph_core::{CompositeFilter, Filter, FilterError, FilterKind, GainFilter};
use filtergraph_effects::{AllPass, Comb, Echo, JcRev, LowPass, Reverb, series};

const TOLERANCE: f64 = 1e-12;

fn impulse_response(filter: &mut dyn Filter, len: usize) -> Vec<f64> {
    (0..len)
        .map(|n| {
            let x = if n == 0 { 1.0 } else { 0.0 };
            filter.compute_one_step(&[x]).unwrap()[0]
        })
        .collect()
}

fn assert_close(actual: &[f64], expected: &[f64]) {
    assert_eq!(actual.len(), expected.len());
    for (n, (&a, &e)) in actual.iter().zip(expected).enumerate() {
        assert!((a - e).abs() < TOLERANCE, "sample {n}: got {a}, expected {e}");
    }
}

// ============================================================================
// 1. Difference equations
// ============================================================================

#[test]
fn echo_repeats_with_decay() {
    let (d, decay) = (3, 0.4);
    let h = impulse_response(&mut Echo::new(d, decay).unwrap(), 4 * d + 1);
    let mut expected = vec![0.0; 4 * d + 1];
    for k in 0..=4 {
        expected[k * d] = (1.0 - decay).powi(k as i32);
    }
    assert_close(&h, &expected);
}

#[test]
fn comb_adds_one_echo() {
    let (d, decay) = (5, 0.2);
    let h = impulse_response(&mut Comb::new(d, decay).unwrap(), 3 * d);
    let mut expected = vec![0.0; 3 * d];
    expected[0] = 1.0;
    expected[d] = 1.0 - decay;
    assert_close(&h, &expected);
}

#[test]
fn low_pass_has_unity_dc_gain() {
    let mut lp = LowPass::new(4, 0.7).unwrap();
    let mut y = 0.0;
    for _ in 0..2000 {
        y = lp.compute_one_step(&[1.0]).unwrap()[0];
    }
    assert!((y - 1.0).abs() < 1e-9, "settled at {y}");
}

#[test]
fn low_pass_impulse_response() {
    let (d, g) = (2, 0.5);
    let h = impulse_response(&mut LowPass::new(d, g).unwrap(), 4 * d + 1);
    let mut expected = vec![0.0; 4 * d + 1];
    for k in 0..=4 {
        expected[k * d] = (1.0 - g) * g.powi(k as i32);
    }
    assert_close(&h, &expected);
}

#[test]
fn all_pass_impulse_response() {
    let (d, g) = (4, 0.3);
    let h = impulse_response(&mut AllPass::new(d, g).unwrap(), 5 * d + 1);
    let mut expected = vec![0.0; 5 * d + 1];
    expected[0] = -g;
    for k in 1..=5 {
        expected[k * d] = (1.0 - g * g) * g.powi(k as i32 - 1);
    }
    assert_close(&h, &expected);
}

#[test]
fn all_pass_is_lossless() {
    for (d, g) in [(1, 0.5), (7, 0.7), (31, 0.25)] {
        let h = impulse_response(&mut AllPass::new(d, g).unwrap(), 400 * d);
        let energy: f64 = h.iter().map(|y| y * y).sum();
        assert!((energy - 1.0).abs() < 1e-6, "d={d}, g={g}: energy {energy}");
    }
}

#[test]
fn nested_all_pass_is_lossless() {
    let inner = AllPass::new(5, 0.4).unwrap();
    let mut outer = AllPass::nested(11, 0.6, inner).unwrap();
    let h = impulse_response(&mut outer, 20_000);
    let energy: f64 = h.iter().map(|y| y * y).sum();
    assert!((energy - 1.0).abs() < 1e-6, "energy {energy}");
}

// ============================================================================
// 2. Composition
// ============================================================================

#[test]
fn effects_nest_inside_user_graphs() {
    let mut chain = series([
        Box::new(Comb::new(2, 0.5).unwrap()) as Box<dyn Filter>,
        Box::new(GainFilter::new(2.0)),
    ])
    .unwrap();
    let h = impulse_response(&mut chain, 4);
    assert_close(&h, &[2.0, 0.0, 1.0, 0.0]);
}

#[test]
fn effects_convert_into_graphs() {
    let graph: CompositeFilter = Echo::new(8, 0.5).unwrap().into();
    assert_eq!(graph.kind(), FilterKind::Composite);
    assert_eq!(graph.block_count(), 3);
}

#[test]
fn parameters_validated_everywhere() {
    assert!(matches!(
        Echo::new(0, 0.5),
        Err(FilterError::InvalidParameter { filter: "echo", .. })
    ));
    assert!(matches!(
        Comb::new(10, 1.0),
        Err(FilterError::InvalidParameter { filter: "comb", .. })
    ));
    assert!(matches!(
        AllPass::new(10, f64::NAN),
        Err(FilterError::InvalidParameter {
            filter: "all-pass",
            ..
        })
    ));
    assert!(matches!(
        LowPass::new(10, 0.0),
        Err(FilterError::InvalidParameter {
            filter: "low-pass",
            ..
        })
    ));
}

// ============================================================================
// 3. Reverberators
// ============================================================================

#[test]
fn reverb_tail_is_bounded_and_replays() {
    let mut reverb = Reverb::new().unwrap();
    reverb.check().unwrap();
    let first = impulse_response(&mut reverb, 6000);
    assert!(first.iter().all(|y| y.is_finite() && y.abs() < 2.0));
    assert!(first.iter().any(|&y| y != 0.0), "reverb produced silence");

    reverb.reset();
    assert_eq!(impulse_response(&mut reverb, 6000), first);
}

#[test]
fn jcrev_direct_path_is_diffused() {
    let mut jcrev = JcRev::new().unwrap();
    let h = impulse_response(&mut jcrev, 9000);
    assert!(h.iter().all(|y| y.is_finite()));
    // Each all-pass answers an impulse with -g; the combs pass it unchanged.
    assert!((h[0] - (-0.7f64).powi(3)).abs() < TOLERANCE, "h[0] = {}", h[0]);
}
