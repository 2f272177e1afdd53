//! Heap-backed memory resource.

use std::sync::Arc;

use crate::error::Result;

use super::MemoryResource;

/// A memory resource backed by the global allocator.
///
/// This is the simplest resource: every request is approved, and actual
/// allocation failure (if any) surfaces from the output buffer's fallible
/// reserve instead.
///
/// # Example
///
/// ```rust
/// use sluice::memory::{HeapResource, MemoryResource};
///
/// let resource = HeapResource::new();
/// assert!(resource.request(usize::MAX).is_ok());
/// ```
#[derive(Debug, Default)]
pub struct HeapResource;

impl HeapResource {
    /// Create a new shared heap resource.
    pub fn new() -> Arc<Self> {
        Arc::new(Self)
    }
}

impl MemoryResource for HeapResource {
    fn request(&self, _bytes: usize) -> Result<()> {
        Ok(())
    }
}
