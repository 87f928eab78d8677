//! Composite filter graphs.
//!
//! A [`CompositeFilter`] owns a set of blocks, each wrapping one [`Filter`](crate::Filter),
//! and the connections between their ports. It is itself a filter, so a
//! finished graph can be added as a block of a larger one.
//!
//! # Architecture
//!
//! The graph is an arena. Blocks live in a `Vec` and are addressed by
//! [`BlockId`]; ports address each other through [`InputRef`] / [`OutputRef`]
//! handles instead of references, so the producer and consumer links can point
//! both ways without shared ownership.
//!
//! - **Input port**: a [`SampleQueue`] plus at most one producer.
//! - **Output port**: the list of inputs it broadcasts to.
//! - **External ports**: the composite's own inputs are modelled as outputs with
//!   no owning block, its outputs as inputs read by the caller.
//!
//! # Example
//!
//! ```rust
//! use filtergraph_core::{CompositeFilter, Filter, GainFilter};
//!
//! // Two gains in series cancel out.
//! let mut graph = CompositeFilter::new(1, 1);
//! let half = graph.add_block(GainFilter::new(0.5));
//! let double = graph.add_block(GainFilter::new(2.0));
//! graph.connect_input_to_block(0, half, 0)?;
//! graph.connect_block_to_block(half, 0, double, 0)?;
//! graph.connect_block_to_output(double, 0, 0)?;
//! graph.check()?;
//!
//! assert_eq!(graph.compute_one_step(&[0.25])?, vec![0.25]);
//! # Ok::<(), filtergraph_core::FilterError>(())
//! ```

mod block;
mod composite;
mod port;
mod queue;

pub use block::BlockId;
pub use composite::CompositeFilter;
pub use port::{InputRef, OutputRef};
pub use queue::SampleQueue;
