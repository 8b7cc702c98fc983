//! Reference hashinator.
//!
//! Built only on the in-crate algorithm ports in [`crate::hash`], with the
//! absolute value and reduction spelled out step by step. It shares no hash
//! code with [`XxHashinator`](super::XxHashinator), which makes it a useful
//! second opinion in the conformance harness.

use crate::hash::{fmix64, xxh64};
use crate::hashinator::traits::Hashinator;
use crate::key::PartitionKey;
use crate::partition::{PartitionCount, PartitionIndex};

/// Magnitude of `i64::MIN`, which has no positive `i64` counterpart.
const MIN_MAGNITUDE: u64 = 1 << 63;

#[derive(Clone, Copy, Debug, Default)]
pub struct ReferenceHashinator;

impl ReferenceHashinator {
    fn magnitude(hash: i64) -> u64 {
        if hash >= 0 {
            hash as u64
        } else if hash == i64::MIN {
            MIN_MAGNITUDE
        } else {
            (-hash) as u64
        }
    }
}

impl Hashinator for ReferenceHashinator {
    fn hash_key(&self, key: &PartitionKey) -> Option<i64> {
        let hash = match key {
            PartitionKey::TinyInt(Some(v)) => fmix64(i64::from(*v) as u64),
            PartitionKey::SmallInt(Some(v)) => fmix64(i64::from(*v) as u64),
            PartitionKey::Integer(Some(v)) => fmix64(i64::from(*v) as u64),
            PartitionKey::BigInt(Some(v)) => fmix64(*v as u64),
            PartitionKey::Varchar(Some(s)) => xxh64(s.as_bytes(), 0),
            PartitionKey::TinyInt(None)
            | PartitionKey::SmallInt(None)
            | PartitionKey::Integer(None)
            | PartitionKey::BigInt(None)
            | PartitionKey::Varchar(None) => return None,
        };
        Some(hash as i64)
    }

    fn hashinate(&self, key: &PartitionKey, count: PartitionCount) -> PartitionIndex {
        let Some(hash) = self.hash_key(key) else {
            return PartitionIndex::NULL;
        };
        let count = u64::from(count.get());
        let index = Self::magnitude(hash) % count;
        PartitionIndex::from_raw(index as u32)
    }

    fn name(&self) -> &'static str {
        "ReferenceHashinator"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_magnitude() {
        assert_eq!(ReferenceHashinator::magnitude(0), 0);
        assert_eq!(ReferenceHashinator::magnitude(-1), 1);
        assert_eq!(ReferenceHashinator::magnitude(i64::MAX), i64::MAX as u64);
        assert_eq!(ReferenceHashinator::magnitude(i64::MIN), 1u64 << 63);
        assert_eq!(ReferenceHashinator::magnitude(i64::MIN + 1), (1u64 << 63) - 1);
    }

    #[test]
    fn test_baseline_indices() {
        let h = ReferenceHashinator;
        let seven = PartitionCount::new(7).unwrap();
        assert_eq!(h.hashinate(&PartitionKey::BigInt(Some(42)), seven).get(), 6);
        assert_eq!(h.hashinate(&PartitionKey::varchar("42"), seven).get(), 3);
    }

    #[test]
    fn test_single_partition_collapse() {
        let h = ReferenceHashinator;
        for key in [
            PartitionKey::BigInt(Some(i64::MIN)),
            PartitionKey::Integer(Some(-1)),
            PartitionKey::varchar("hashinator"),
            PartitionKey::Varchar(None),
        ] {
            assert_eq!(h.hashinate(&key, PartitionCount::ONE).get(), 0);
        }
    }
}
