//! # Sluice
//!
//! Composable map/filter/take pipelines with fused single-pass evaluation.
//!
//! A caller builds an ordered sequence of stages over a borrowed slice,
//! then triggers one evaluation pass that drives every surviving element
//! through every stage and materializes an owned output — no intermediate
//! per-stage buffers, no re-scanning, and correct short-circuiting on
//! filters and take limits.
//!
//! ## Quick Start
//!
//! ```rust
//! use sluice::memory::HeapResource;
//! use sluice::ops::{add, mul, odd};
//! use sluice::pipeline;
//!
//! let data: Vec<i64> = (1..=10).collect();
//! let output = pipeline(HeapResource::new(), &data)
//!     .filter(odd())
//!     .map(add(1))
//!     .take(3)
//!     .map(mul(10))
//!     .collect()?;
//! assert_eq!(output, vec![20, 40, 60]);
//! # Ok::<(), sluice::Error>(())
//! ```
//!
//! ## Design
//!
//! - **Stages are descriptions**: building a pipeline records intent and
//!   never touches the source. Appending yields a new pipeline value and
//!   leaves the receiver usable; the unchanged prefix is shared.
//! - **Evaluation is fused**: [`Pipeline::collect`] runs all stages in
//!   exactly one traversal. A filter rejection abandons the element; an
//!   exhausted take ends the whole traversal.
//! - **Output is governed**: a [`memory::MemoryResource`] approves output
//!   growth, and the buffer itself goes through the allocator's fallible
//!   reserve, so the only failure mode is an allocation error.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod element;
pub mod error;
pub mod memory;
pub mod observability;
pub mod ops;
pub mod pipeline;
pub mod stage;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::element::{Predicate, Transform};
    pub use crate::error::{Error, Result};
    pub use crate::memory::{BoundedResource, HeapResource, MemoryResource};
    pub use crate::pipeline::{Pipeline, pipeline};
    pub use crate::stage::{Stage, StageKind};
}

pub use error::{Error, Result};
pub use pipeline::{Pipeline, pipeline};
