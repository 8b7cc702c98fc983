//! Partition count and partition index newtypes.

use std::fmt;
use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Number of partitions currently active in the cluster.
///
/// Always at least 1; zero and negative counts are rejected at construction,
/// so reduction never divides by zero.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u32")]
pub struct PartitionCount(NonZeroU32);

impl PartitionCount {
    /// A cluster with a single partition.
    pub const ONE: PartitionCount = PartitionCount(NonZeroU32::MIN);

    /// Validates a raw count coming from the caller.
    pub fn new(count: i64) -> Result<Self> {
        u32::try_from(count)
            .ok()
            .and_then(NonZeroU32::new)
            .map(PartitionCount)
            .ok_or(Error::InvalidPartitionCount(count))
    }

    #[inline]
    pub fn get(self) -> u32 {
        self.0.get()
    }

    /// Whether `index` is a valid partition for this count.
    #[inline]
    pub fn contains(self, index: PartitionIndex) -> bool {
        index.get() < self.get()
    }
}

impl TryFrom<i64> for PartitionCount {
    type Error = Error;

    fn try_from(count: i64) -> Result<Self> {
        PartitionCount::new(count)
    }
}

impl TryFrom<i32> for PartitionCount {
    type Error = Error;

    fn try_from(count: i32) -> Result<Self> {
        PartitionCount::new(i64::from(count))
    }
}

impl TryFrom<u32> for PartitionCount {
    type Error = Error;

    fn try_from(count: u32) -> Result<Self> {
        PartitionCount::new(i64::from(count))
    }
}

impl TryFrom<usize> for PartitionCount {
    type Error = Error;

    fn try_from(count: usize) -> Result<Self> {
        let count = i64::try_from(count).unwrap_or(i64::MAX);
        PartitionCount::new(count)
    }
}

impl From<NonZeroU32> for PartitionCount {
    fn from(count: NonZeroU32) -> Self {
        PartitionCount(count)
    }
}

impl From<PartitionCount> for u32 {
    fn from(count: PartitionCount) -> Self {
        count.get()
    }
}

impl fmt::Display for PartitionCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A partition number in `[0, PartitionCount)`.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartitionIndex(u32);

impl PartitionIndex {
    /// Partition every null key is routed to.
    pub const NULL: PartitionIndex = PartitionIndex(0);

    /// Reduces an absolute hash into `[0, count)`.
    #[inline]
    pub fn reduce(hash_abs: u64, count: PartitionCount) -> Self {
        // The remainder is below a u32 count, so the cast cannot truncate.
        PartitionIndex((hash_abs % u64::from(count.get())) as u32)
    }

    /// Wraps an index reported by an external implementation.
    ///
    /// Not range-checked; use [`PartitionCount::contains`] to validate it.
    pub fn from_raw(index: u32) -> Self {
        PartitionIndex(index)
    }

    #[inline]
    pub fn get(self) -> u32 {
        self.0
    }
}

impl From<PartitionIndex> for u32 {
    fn from(index: PartitionIndex) -> Self {
        index.0
    }
}

impl From<PartitionIndex> for usize {
    fn from(index: PartitionIndex) -> Self {
        index.0 as usize
    }
}

impl fmt::Display for PartitionIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
