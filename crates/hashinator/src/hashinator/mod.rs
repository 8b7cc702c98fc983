//! Key to partition mapping.
//!
//! [`XxHashinator`] is the production implementation used for routing.
//! [`ReferenceHashinator`] is a second, dependency-free implementation of
//! the same contract, kept alongside it so other implementations can be
//! validated against something other than themselves.

pub mod reference;
pub mod traits;
pub mod xxhash;

pub use reference::ReferenceHashinator;
pub use traits::Hashinator;
pub use xxhash::XxHashinator;
