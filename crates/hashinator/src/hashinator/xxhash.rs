//! Production hashinator.

use xxhash_rust::xxh64::xxh64;

use crate::hashinator::traits::Hashinator;
use crate::key::{KeyValue, PartitionKey};
use crate::partition::{PartitionCount, PartitionIndex};

/// Multiplier steps of the integer avalanche (MurmurHash3 `fmix64`).
const AVALANCHE_STEPS: [u64; 2] = [0xff51_afd7_ed55_8ccd, 0xc4ce_b9fe_1a85_ec53];

/// Seed for string keys. Part of the partitioning contract; never change it.
const STRING_SEED: u64 = 0;

/// Hashinator used on the routing path.
///
/// Integers are mixed with `fmix64`, strings hashed with `xxhash-rust`'s
/// XXH64.
#[derive(Clone, Copy, Debug, Default)]
pub struct XxHashinator;

impl XxHashinator {
    #[inline]
    fn avalanche(value: i64) -> i64 {
        let mut k = value as u64;
        for step in AVALANCHE_STEPS {
            k ^= k >> 33;
            k = k.wrapping_mul(step);
        }
        (k ^ (k >> 33)) as i64
    }
}

impl Hashinator for XxHashinator {
    #[inline]
    fn hash_key(&self, key: &PartitionKey) -> Option<i64> {
        key.value().map(|value| match value {
            KeyValue::Int(v) => Self::avalanche(v),
            KeyValue::Bytes(bytes) => xxh64(bytes, STRING_SEED) as i64,
        })
    }

    #[inline]
    fn hashinate(&self, key: &PartitionKey, count: PartitionCount) -> PartitionIndex {
        match self.hash_key(key) {
            // unsigned_abs maps i64::MIN to 2^63 instead of overflowing
            Some(hash) => PartitionIndex::reduce(hash.unsigned_abs(), count),
            None => PartitionIndex::NULL,
        }
    }

    fn name(&self) -> &'static str {
        "XxHashinator"
    }
}
