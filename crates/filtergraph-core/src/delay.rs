//! Fixed integer delay line.
//!
//! [`DelayFilter`] is the only leaf of [`FilterKind::Delay`]: besides the usual
//! push-then-pop step it can pop buffered history without being given a new
//! sample, which is what lets the graph engine evaluate feedback loops.
//!
//! # Buffer layout
//!
//! The circular buffer holds `delay + 1` slots. A freshly reset delay has
//! `delay` unread zeros between the read and the write positions; the extra
//! slot lets a step write its input before reading its output without
//! overwriting an unread value. `read == write` means nothing is unread.

use crate::error::{FilterError, check_arity};
use crate::filter::{Filter, FilterKind};

/// Delays its single input by a fixed number of steps.
///
/// # Example
///
/// ```rust
/// use filtergraph_core::{DelayFilter, Filter};
///
/// let mut delay = DelayFilter::new(2).unwrap();
/// let out: Vec<f64> = [1.0, 2.0, 3.0, 4.0]
///     .iter()
///     .map(|&x| delay.compute_one_step(&[x]).unwrap()[0])
///     .collect();
/// assert_eq!(out, vec![0.0, 0.0, 1.0, 2.0]);
/// ```
#[derive(Debug, Clone)]
pub struct DelayFilter {
    /// Circular buffer storage, `delay + 1` slots.
    buffer: Vec<f64>,
    /// First readable index.
    read_pos: usize,
    /// First writable index.
    write_pos: usize,
}

impl DelayFilter {
    /// Creates a delay of `delay` steps.
    ///
    /// Fails with [`FilterError::InvalidParameter`] when `delay` is zero or
    /// too large to buffer.
    pub fn new(delay: usize) -> Result<Self, FilterError> {
        if delay == 0 {
            return Err(FilterError::invalid_parameter(
                "delay",
                "delay must be positive",
            ));
        }

        let too_large =
            || FilterError::invalid_parameter("delay", format!("cannot buffer {delay} samples"));
        let slots = delay.checked_add(1).ok_or_else(too_large)?;
        let mut buffer = Vec::new();
        buffer.try_reserve_exact(slots).map_err(|_| too_large())?;
        buffer.resize(slots, 0.0);

        let mut filter = Self {
            buffer,
            read_pos: 0,
            write_pos: 0,
        };
        filter.reset();
        Ok(filter)
    }

    /// Returns the delay in steps.
    pub fn delay(&self) -> usize {
        self.buffer.len() - 1
    }

    /// Returns the number of buffered samples not yet read.
    pub fn pending(&self) -> usize {
        let len = self.buffer.len();
        (self.write_pos + len - self.read_pos) % len
    }

    #[inline]
    fn pop(&mut self) -> f64 {
        let value = self.buffer[self.read_pos];
        self.read_pos = (self.read_pos + 1) % self.buffer.len();
        value
    }
}

impl Filter for DelayFilter {
    fn nb_inputs(&self) -> usize {
        1
    }

    fn nb_outputs(&self) -> usize {
        1
    }

    /// Refills the buffer with `delay` zeros.
    fn reset(&mut self) {
        self.buffer.fill(0.0);
        self.read_pos = 0;
        self.write_pos = self.delay();
    }

    fn compute_one_step(&mut self, input: &[f64]) -> Result<Vec<f64>, FilterError> {
        check_arity("delay", 1, input.len())?;

        self.buffer[self.write_pos] = input[0];
        self.write_pos = (self.write_pos + 1) % self.buffer.len();
        Ok(vec![self.pop()])
    }

    fn kind(&self) -> FilterKind {
        FilterKind::Delay
    }

    /// Pops the oldest buffered sample without pushing a new one.
    ///
    /// Fails with [`FilterError::EmptyHistory`] when nothing is left unread.
    fn compute_from_history(&mut self) -> Result<Vec<f64>, FilterError> {
        if self.read_pos == self.write_pos {
            return Err(FilterError::EmptyHistory);
        }
        Ok(vec![self.pop()])
    }
}
