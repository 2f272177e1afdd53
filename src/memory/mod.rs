//! Memory resources for output materialization.
//!
//! A [`MemoryResource`] decides whether an output buffer may occupy a given
//! amount of backing storage. It is an admission policy, not an allocator:
//! the buffer itself still goes through the global allocator's fallible
//! reserve path, so a plain [`HeapResource`] surfaces real allocation
//! failure while a [`BoundedResource`] makes the failure path deterministic
//! for quotas and tests.
//!
//! Resources are shared (`Arc`) and safe to use from unrelated pipelines
//! concurrently; each `collect` call is a single-owner, single-writer
//! allocation against them.
//!
//! # Example
//!
//! ```rust
//! use sluice::memory::{BoundedResource, MemoryResource};
//!
//! // Allow outputs up to 1 KiB of backing storage.
//! let resource = BoundedResource::new(1024);
//! assert!(resource.request(512).is_ok());
//! assert!(resource.request(4096).is_err());
//! ```

mod bounded;
mod heap;

pub use bounded::BoundedResource;
pub use heap::HeapResource;

use crate::error::Result;

/// Admission policy for output-buffer backing storage.
pub trait MemoryResource: Send + Sync {
    /// Approve an output buffer growing to `bytes` bytes of backing
    /// storage in total.
    ///
    /// # Errors
    ///
    /// Returns an allocation error to deny the request; the requesting
    /// `collect` call fails without retaining any partial output.
    fn request(&self, bytes: usize) -> Result<()>;

    /// Get the name of this resource.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}
