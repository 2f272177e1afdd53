//! Pipeline construction and fused single-pass evaluation.
//!
//! A [`Pipeline`] is an ordered, immutable sequence of [`Stage`]s over a
//! borrowed source slice. Builder methods only record intent; nothing
//! touches the source until [`collect`](Pipeline::collect) runs every stage
//! over every surviving element in exactly one traversal, materializing an
//! owned output without per-stage intermediate buffers.
//!
//! # Example
//!
//! ```rust
//! use sluice::memory::HeapResource;
//! use sluice::ops::{add, odd};
//! use sluice::pipeline;
//!
//! let data: Vec<i64> = (1..=6).collect();
//! let output = pipeline(HeapResource::new(), &data)
//!     .filter(odd())
//!     .map(add(10))
//!     .collect()?;
//! assert_eq!(output, vec![11, 13, 15]);
//! # Ok::<(), sluice::Error>(())
//! ```

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, trace};

use crate::element::{Predicate, Transform};
use crate::error::{Error, Result};
use crate::memory::MemoryResource;
use crate::observability;
use crate::stage::{Stage, TransformList};

/// Initial output capacity, capped by the source length.
///
/// Amortizes reallocation for small or truncated results without
/// over-allocating for large inputs cut short by a take stage.
const INITIAL_CAPACITY_HINT: usize = 16;

/// An ordered, immutable sequence of stages over a borrowed source.
///
/// Appending a stage yields a new `Pipeline` value and leaves the receiver
/// independently usable; the unchanged stage prefix is shared through the
/// stages' `Arc` payloads. The element type is fixed at construction time
/// and is identical for input, every intermediate map result, and output.
pub struct Pipeline<'src, T> {
    stages: Vec<Stage<T>>,
    source: &'src [T],
    resource: Arc<dyn MemoryResource>,
}

impl<'src, T> Pipeline<'src, T> {
    /// Create a zero-stage pipeline over `source`.
    ///
    /// The source is borrowed for the pipeline's lifetime and is never
    /// mutated; `resource` governs output materialization in
    /// [`collect`](Pipeline::collect).
    pub fn from_source(resource: Arc<dyn MemoryResource>, source: &'src [T]) -> Self {
        Self {
            stages: Vec::new(),
            source,
            resource,
        }
    }

    /// Append a map stage applying a single transform.
    pub fn map(&self, transform: impl Transform<T> + 'static) -> Self {
        let mut transforms = TransformList::new();
        transforms.push(Arc::new(transform));
        self.with_stage(Stage::Map(transforms))
    }

    /// Append a map stage applying `transforms` left-to-right to each
    /// element (function composition).
    pub fn map_all(&self, transforms: Vec<Arc<dyn Transform<T>>>) -> Self {
        self.with_stage(Stage::Map(transforms.into_iter().collect()))
    }

    /// Append a filter stage. Elements rejected by the predicate are
    /// dropped and never reach later stages.
    pub fn filter(&self, predicate: impl Predicate<T> + 'static) -> Self {
        self.with_stage(Stage::Filter(Arc::new(predicate)))
    }

    /// Append a take stage admitting at most `limit` elements.
    ///
    /// Once the limit is reached, the next element to arrive at this stage
    /// ends the entire traversal; `take(0)` ends it on the very first one.
    pub fn take(&self, limit: usize) -> Self {
        self.with_stage(Stage::Take(limit))
    }

    /// Get the stages in execution order.
    pub fn stages(&self) -> &[Stage<T>] {
        &self.stages
    }

    /// Get the number of stages.
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// Get the borrowed source slice.
    pub fn source(&self) -> &'src [T] {
        self.source
    }

    fn with_stage(&self, stage: Stage<T>) -> Self {
        let mut stages = Vec::with_capacity(self.stages.len() + 1);
        stages.extend(self.stages.iter().cloned());
        stages.push(stage);
        Self {
            stages,
            source: self.source,
            resource: self.resource.clone(),
        }
    }
}

impl<T: Clone> Pipeline<'_, T> {
    /// Execute every stage in one traversal of the source and return the
    /// materialized output.
    ///
    /// Relative order of admitted elements is preserved. Take counters are
    /// reset for every call, so repeated evaluations of the same pipeline
    /// are independent and deterministic.
    ///
    /// # Errors
    ///
    /// Fails only when the memory resource denies output growth or the
    /// allocator cannot satisfy a reserve. The partially built output is
    /// dropped before the error is returned.
    pub fn collect(&self) -> Result<Vec<T>> {
        let started = Instant::now();
        let span = observability::span_collect(self.stages.len(), self.source.len());
        let _guard = span.enter();

        // Fast path: no stages means a verbatim copy of the source.
        if self.stages.is_empty() {
            let mut output = Vec::new();
            self.reserve(&mut output, self.source.len())?;
            output.extend_from_slice(self.source);
            observability::record_collect(output.len(), 0, started.elapsed());
            return Ok(output);
        }

        // Per-evaluation take counters, indexed by stage position.
        let mut counters = vec![0usize; self.stages.len()];
        let mut dropped = 0usize;
        let mut output = Vec::new();
        self.reserve(&mut output, self.source.len().min(INITIAL_CAPACITY_HINT))?;

        'source: for element in self.source {
            let mut value = element.clone();
            for (position, stage) in self.stages.iter().enumerate() {
                match stage {
                    Stage::Map(transforms) => {
                        for transform in transforms {
                            value = transform.apply(value);
                        }
                    }
                    Stage::Filter(predicate) => {
                        if !predicate.test(&value) {
                            trace!(position, "element rejected by filter");
                            dropped += 1;
                            continue 'source;
                        }
                    }
                    Stage::Take(limit) => {
                        // Exhaustion ends the whole traversal, not just
                        // this element: no later input can contribute to
                        // the output through this stage position.
                        if counters[position] == *limit {
                            debug!(position, limit, "take stage exhausted, ending traversal");
                            break 'source;
                        }
                        counters[position] += 1;
                    }
                }
            }

            if output.len() == output.capacity() {
                let target = output
                    .capacity()
                    .checked_mul(2)
                    .ok_or_else(|| Error::AllocationFailed("output capacity overflow".into()))?;
                self.reserve(&mut output, target)?;
            }
            output.push(value);
        }

        debug!(emitted = output.len(), dropped, "collect finished");
        observability::record_collect(output.len(), dropped, started.elapsed());
        Ok(output)
    }

    /// Grow `output` to hold at least `target` elements, through the
    /// resource's admission check and the allocator's fallible reserve.
    fn reserve(&self, output: &mut Vec<T>, target: usize) -> Result<()> {
        if target <= output.capacity() {
            return Ok(());
        }
        let bytes = target
            .checked_mul(std::mem::size_of::<T>())
            .ok_or_else(|| Error::AllocationFailed("output size overflows usize".into()))?;
        self.resource.request(bytes)?;
        output
            .try_reserve_exact(target - output.len())
            .map_err(|e| Error::AllocationFailed(e.to_string()))?;
        Ok(())
    }
}

// Manual impl: stage payloads clone via `Arc`, so `T: Clone` is not needed.
impl<T> Clone for Pipeline<'_, T> {
    fn clone(&self) -> Self {
        Self {
            stages: self.stages.clone(),
            source: self.source,
            resource: self.resource.clone(),
        }
    }
}

impl<T> fmt::Debug for Pipeline<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("stages", &self.stages)
            .field("source_len", &self.source.len())
            .field("resource", &self.resource.name())
            .finish()
    }
}

/// Create a zero-stage pipeline over a source slice.
///
/// Convenience wrapper around [`Pipeline::from_source`].
pub fn pipeline<T>(resource: Arc<dyn MemoryResource>, source: &[T]) -> Pipeline<'_, T> {
    Pipeline::from_source(resource, source)
}
