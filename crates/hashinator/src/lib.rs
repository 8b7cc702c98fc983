//! Partition hashinator.
//!
//! Maps a row's partitioning key to the partition that owns it. Every
//! component that routes rows (storage, client routing, rebalancing) must
//! reach the same answer for the same key and partition count, so the
//! mapping is a fixed, fully specified function:
//!
//! - typed nulls of every key type go to partition 0
//! - integer keys are sign-extended to 64 bits and mixed with `fmix64`
//! - string keys are hashed as UTF-8 with XXH64 (seed 0)
//! - the partition is `|hash| mod partition_count`, with `|i64::MIN|`
//!   taken as `2^63`
//!
//! This crate provides:
//! - Key types and the typed-null convenience surface ([`key`])
//! - The production and reference implementations ([`hashinator`])
//! - A conformance harness and frozen reference vectors ([`conformance`])
//!
//! # Example
//!
//! ```rust
//! use hashinator::{hashinate, hashinate_value, PartitionKey, TypedNull};
//!
//! let index = hashinate(&PartitionKey::BigInt(Some(42)), 7).unwrap();
//! assert_eq!(index.get(), 6);
//!
//! assert_eq!(hashinate_value("42", 7).unwrap().get(), 3);
//! assert_eq!(hashinate_value(TypedNull::Integer, 7).unwrap().get(), 0);
//! assert!(hashinate_value(1i32, 0).is_err());
//! ```

pub mod conformance;
pub mod error;
pub mod hash;
pub mod hashinator;
pub mod key;
pub mod partition;

pub use conformance::{ConformanceConfig, ConformanceHarness, ConformanceReport};
pub use error::{Error, Result};
pub use hashinator::{Hashinator, ReferenceHashinator, XxHashinator};
pub use key::{IntoPartitionKey, KeyType, PartitionKey, TypedNull};
pub use partition::{PartitionCount, PartitionIndex};

/// Partition owning `key` out of `partition_count` partitions.
///
/// Fails with [`Error::InvalidPartitionCount`] when `partition_count` is
/// not in `1..=u32::MAX`.
pub fn hashinate(key: &PartitionKey, partition_count: i64) -> Result<PartitionIndex> {
    let count = PartitionCount::new(partition_count)?;
    Ok(XxHashinator.hashinate(key, count))
}

/// Like [`hashinate`], for a raw column value.
///
/// Integer values equal to their width's `NULL_*` sentinel are treated as
/// typed nulls; see [`key::nullable`].
pub fn hashinate_value<V: IntoPartitionKey>(value: V, partition_count: i64) -> Result<PartitionIndex> {
    hashinate(&value.into_partition_key(), partition_count)
}
