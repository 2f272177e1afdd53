//! Stage descriptors for pipeline operations.
//!
//! A [`Stage`] is a closed, self-describing unit of work with exactly one
//! of three shapes: Map, Filter, or Take. Stages are created once, at
//! builder-call time, and are immutable thereafter; per-evaluation state
//! (the take counters) lives inside [`collect`](crate::pipeline::Pipeline::collect),
//! never inside the stage itself.

use std::fmt;
use std::sync::Arc;

use smallvec::SmallVec;

use crate::element::{Predicate, Transform};

/// An ordered list of shared transforms, applied left-to-right.
///
/// Most Map stages hold one or two transforms, so the list stores that many
/// inline before spilling to the heap.
pub type TransformList<T> = SmallVec<[Arc<dyn Transform<T>>; 2]>;

/// The discriminant of a [`Stage`], for introspection and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageKind {
    /// Applies one or more transforms to each element.
    Map,
    /// Drops elements rejected by a predicate.
    Filter,
    /// Admits a bounded number of elements, then ends the traversal.
    Take,
}

/// One configured operation in a pipeline.
///
/// The payload type is fully determined by the variant. Cloning a stage
/// shares its transform/predicate handles (`Arc`), which is how appending
/// to a pipeline shares the unchanged stage prefix without copying the
/// capabilities themselves.
pub enum Stage<T> {
    /// Apply the transforms, in order, to the current element.
    Map(TransformList<T>),
    /// Drop the current element if the predicate rejects it.
    Filter(Arc<dyn Predicate<T>>),
    /// Admit at most this many elements through this stage position per
    /// evaluation; once exhausted, the whole traversal ends.
    Take(usize),
}

impl<T> Stage<T> {
    /// Get this stage's kind.
    pub fn kind(&self) -> StageKind {
        match self {
            Stage::Map(_) => StageKind::Map,
            Stage::Filter(_) => StageKind::Filter,
            Stage::Take(_) => StageKind::Take,
        }
    }
}

// Manual impl: `Arc` handles clone regardless of whether `T` does.
impl<T> Clone for Stage<T> {
    fn clone(&self) -> Self {
        match self {
            Stage::Map(transforms) => Stage::Map(transforms.clone()),
            Stage::Filter(predicate) => Stage::Filter(predicate.clone()),
            Stage::Take(limit) => Stage::Take(*limit),
        }
    }
}

impl<T> fmt::Debug for Stage<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Map(transforms) => {
                write!(f, "Map({} transform", transforms.len())?;
                if transforms.len() != 1 {
                    write!(f, "s")?;
                }
                write!(f, ")")
            }
            Stage::Filter(predicate) => write!(f, "Filter({})", predicate.name()),
            Stage::Take(limit) => write!(f, "Take({limit})"),
        }
    }
}
