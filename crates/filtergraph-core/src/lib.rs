//! Filtergraph Core - composable sample-by-sample filter graphs
//!
//! This crate provides the engine for building digital filters out of small
//! processing units wired into a directed graph, and for running that graph
//! one sample at a time, feedback loops included.
//!
//! # Core Abstractions
//!
//! ## Filter Contract
//!
//! - [`Filter`] - Object-safe trait every processing unit implements
//! - [`FilterKind`] - How the engine treats a filter (leaf, delay, composite)
//! - [`FilterError`] - Construction, wiring, validation and runtime errors
//!
//! ## Leaf Filters
//!
//! - [`AdditionFilter`] - Sums `n` inputs
//! - [`MeanFilter`] - Averages `n` inputs
//! - [`GainFilter`] - Fixed multiplication
//! - [`DelayFilter`] - Integer delay line, the only filter that may close a loop
//!
//! ## Graphs
//!
//! - [`CompositeFilter`] - A graph of blocks that is itself a [`Filter`]
//! - [`BlockId`] - Handle to a block inside one graph
//! - [`SampleQueue`] - FIFO behind every input port
//!
//! # Example
//!
//! ```rust
//! use filtergraph_core::{AdditionFilter, CompositeFilter, DelayFilter, Filter, GainFilter};
//!
//! // Feedforward comb: y[n] = x[n] + 0.5 * x[n - 2]
//! let mut comb = CompositeFilter::new(1, 1);
//! let add = comb.add_block(AdditionFilter::new(2));
//! let wait = comb.add_block(DelayFilter::new(2)?);
//! let gain = comb.add_block(GainFilter::new(0.5));
//! comb.connect_input_to_block(0, add, 0)?;
//! comb.connect_input_to_block(0, wait, 0)?;
//! comb.connect_block_to_block(wait, 0, gain, 0)?;
//! comb.connect_block_to_block(gain, 0, add, 1)?;
//! comb.connect_block_to_output(add, 0, 0)?;
//!
//! let mut out = Vec::new();
//! for x in [1.0, 0.0, 0.0, 0.0] {
//!     out.extend(comb.compute_one_step(&[x])?);
//! }
//! assert_eq!(out, vec![1.0, 0.0, 0.5, 0.0]);
//! # Ok::<(), filtergraph_core::FilterError>(())
//! ```
//!
//! # Features
//!
//! - `tracing` (default): debug events for graph construction, a warning for
//!   every block a successful check cannot reach.

pub mod addition;
pub mod delay;
pub mod error;
pub mod filter;
pub mod gain;
pub mod graph;

pub use addition::{AdditionFilter, MeanFilter};
pub use delay::DelayFilter;
pub use error::{FilterError, PortSide, check_arity};
pub use filter::{Filter, FilterKind};
pub use gain::GainFilter;
pub use graph::{BlockId, CompositeFilter, InputRef, OutputRef, SampleQueue};
