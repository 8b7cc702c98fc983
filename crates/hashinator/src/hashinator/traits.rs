//! Core hashinator trait definitions.

use crate::key::PartitionKey;
use crate::partition::{PartitionCount, PartitionIndex};

/// A hashinator maps partitioning keys to partitions.
///
/// Hashinators are stateless and thread-safe, allowing concurrent routing
/// decisions without synchronization overhead. Every implementation must
/// return the same index as every other for the same key and count; the
/// conformance harness checks that.
pub trait Hashinator: Send + Sync + 'static {
    /// Signed 64-bit hash of a key, or `None` for a typed null.
    fn hash_key(&self, key: &PartitionKey) -> Option<i64>;

    /// Partition owning `key` out of `count` partitions.
    ///
    /// Typed nulls of every type go to partition 0; any other key goes to
    /// `|hash_key(key)| mod count`.
    fn hashinate(&self, key: &PartitionKey, count: PartitionCount) -> PartitionIndex;

    /// Returns the name of this hashinator.
    fn name(&self) -> &'static str;
}
