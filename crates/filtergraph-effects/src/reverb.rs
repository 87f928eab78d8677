//! Reverberators assembled from all-pass, comb and low-pass sections.
//!
//! Delay lengths are fixed sample counts tuned for 44.1 kHz material.

use filtergraph_core::{
    AdditionFilter, CompositeFilter, DelayFilter, Filter, FilterError, GainFilter, MeanFilter,
};

use crate::{AllPass, Comb, LowPass, impl_composite_filter, series};

/// Output taps of the three [`Reverb`] sections, then the loop gain.
const GARDNER_GAINS: [f64; 4] = [0.34, 0.14, 0.14, 0.1];

/// Feedback delay of the [`Reverb`] loop, in samples.
const GARDNER_LOOP_DELAY: usize = 1367;

/// [`JcRev`] series all-pass delays, in samples.
const JCREV_ALLPASS_DELAYS: [usize; 3] = [1861, 593, 199];

/// [`JcRev`] series all-pass gain.
const JCREV_ALLPASS_GAIN: f64 = 0.7;

/// [`JcRev`] parallel comb delays, in samples. Mutually prime.
const JCREV_COMB_DELAYS: [usize; 4] = [8467, 8819, 9521, 10233];

/// [`JcRev`] parallel comb decays.
const JCREV_COMB_DECAYS: [f64; 4] = [0.742, 0.733, 0.715, 0.697];

fn boxed<F: Filter + 'static>(filter: F) -> Box<dyn Filter> {
    Box::new(filter)
}

/// Gardner's large-room reverberator.
///
/// Three sections run in series inside a feedback loop:
///
/// 1. all-pass 353 and 529 (g = 0.3), then a 176-sample delay;
/// 2. a 750-sample delay, then all-pass 3837 (g = 0.5) nesting all-pass 2734;
/// 3. a 132-sample delay, then all-pass 5292 (g = 0.5) nesting all-pass 3352
///    and 1323 in series.
///
/// The output sums the first section (0.34), the signal entering the third
/// section after a 1367-sample delay (0.14) and the third section (0.14). The
/// third section is also low-passed, scaled by 0.1 and added back to the input.
#[derive(Debug)]
pub struct Reverb {
    graph: CompositeFilter,
}

impl Reverb {
    /// Builds the reverberator.
    pub fn new() -> Result<Self, FilterError> {
        let first = series([
            boxed(AllPass::new(353, 0.3)?),
            boxed(AllPass::new(529, 0.3)?),
            boxed(DelayFilter::new(176)?),
        ])?;
        let second = series([
            boxed(DelayFilter::new(750)?),
            boxed(AllPass::nested(3837, 0.5, AllPass::new(2734, 0.25)?)?),
        ])?;
        let inner = series([
            boxed(AllPass::new(3352, 0.25)?),
            boxed(AllPass::new(1323, 0.25)?),
        ])?;
        let third = series([
            boxed(DelayFilter::new(132)?),
            boxed(AllPass::nested(5292, 0.5, inner)?),
        ])?;

        let mut graph = CompositeFilter::new(1, 1);
        let seq1 = graph.add_block(first);
        let seq2 = graph.add_block(second);
        let seq3 = graph.add_block(third);
        let add1 = graph.add_block(AdditionFilter::new(2));
        let add2 = graph.add_block(AdditionFilter::new(3));
        let wait = graph.add_block(DelayFilter::new(GARDNER_LOOP_DELAY)?);
        let low = graph.add_block(LowPass::new(88, 0.7133)?);
        let gains = GARDNER_GAINS.map(|g| graph.add_block(GainFilter::new(g)));

        graph.connect_input_to_block(0, add1, 0)?;
        graph.connect_block_to_block(add1, 0, seq1, 0)?;
        graph.connect_block_to_block(seq1, 0, seq2, 0)?;
        graph.connect_block_to_block(seq1, 0, gains[0], 0)?;
        graph.connect_block_to_block(gains[0], 0, add2, 0)?;
        graph.connect_block_to_block(seq2, 0, wait, 0)?;
        graph.connect_block_to_block(wait, 0, seq3, 0)?;
        graph.connect_block_to_block(wait, 0, gains[1], 0)?;
        graph.connect_block_to_block(gains[1], 0, add2, 1)?;
        graph.connect_block_to_block(seq3, 0, gains[2], 0)?;
        graph.connect_block_to_block(seq3, 0, low, 0)?;
        graph.connect_block_to_block(gains[2], 0, add2, 2)?;
        graph.connect_block_to_block(low, 0, gains[3], 0)?;
        graph.connect_block_to_block(gains[3], 0, add1, 1)?;
        graph.connect_block_to_output(add2, 0, 0)?;

        Ok(Self { graph })
    }
}

/// Chowning's JCRev reverberator.
///
/// Three all-pass diffusers in series, then four feedforward combs in parallel
/// averaged into the output. The delays are lengthened from Chowning's
/// 25 kHz design.
#[derive(Debug)]
pub struct JcRev {
    graph: CompositeFilter,
}

impl JcRev {
    /// Builds the reverberator.
    pub fn new() -> Result<Self, FilterError> {
        let diffusers = series(
            JCREV_ALLPASS_DELAYS
                .iter()
                .map(|&d| AllPass::new(d, JCREV_ALLPASS_GAIN).map(boxed))
                .collect::<Result<Vec<_>, _>>()?,
        )?;

        let mut combs = CompositeFilter::new(1, 1);
        let mean = combs.add_block(MeanFilter::new(JCREV_COMB_DELAYS.len()));
        for (port, (&delay, &decay)) in JCREV_COMB_DELAYS
            .iter()
            .zip(&JCREV_COMB_DECAYS)
            .enumerate()
        {
            let comb = combs.add_block(Comb::new(delay, decay)?);
            combs.connect_input_to_block(0, comb, 0)?;
            combs.connect_block_to_block(comb, 0, mean, port)?;
        }
        combs.connect_block_to_output(mean, 0, 0)?;

        let mut graph = CompositeFilter::new(1, 1);
        let seq = graph.add_block(diffusers);
        let par = graph.add_block(combs);
        graph.connect_input_to_block(0, seq, 0)?;
        graph.connect_block_to_block(seq, 0, par, 0)?;
        graph.connect_block_to_output(par, 0, 0)?;

        Ok(Self { graph })
    }
}

impl_composite_filter!(Reverb, JcRev);
