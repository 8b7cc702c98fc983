//! Frozen reference vectors.
//!
//! Each vector pins the 64-bit hash of a key and its partition for a few
//! partition counts. They were captured once from the hash definitions and
//! must never change: a new implementation in any language can check itself
//! against this table without running the Rust harness.

use serde::Serialize;

use crate::hashinator::Hashinator;
use crate::key::{KeyType, PartitionKey};
use crate::partition::{PartitionCount, PartitionIndex};

/// Partition counts every vector is pinned for.
pub const VECTOR_PARTITION_COUNTS: [u32; 3] = [2, 7, 1000];

#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
pub struct ReferenceVector {
    pub key: PartitionKey,
    /// Signed 64-bit hash, `None` for typed nulls.
    pub hash: Option<i64>,
    /// Expected index for each entry of [`VECTOR_PARTITION_COUNTS`].
    pub indices: [u32; 3],
}

impl ReferenceVector {
    /// `(count, expected index)` pairs of this vector.
    pub fn expectations(&self) -> impl Iterator<Item = (PartitionCount, PartitionIndex)> + '_ {
        VECTOR_PARTITION_COUNTS
            .into_iter()
            .zip(self.indices)
            .filter_map(|(count, index)| {
                PartitionCount::try_from(count)
                    .ok()
                    .map(|count| (count, PartitionIndex::from_raw(index)))
            })
    }
}

/// A vector an implementation did not reproduce.
#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
pub struct VectorFailure {
    pub hashinator: &'static str,
    pub key: PartitionKey,
    pub partition_count: PartitionCount,
    pub expected_hash: Option<i64>,
    pub actual_hash: Option<i64>,
    pub expected: PartitionIndex,
    pub actual: PartitionIndex,
}

impl std::fmt::Display for VectorFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: key {} with {} partitions: expected {} (hash {:?}), got {} (hash {:?})",
            self.hashinator,
            self.key,
            self.partition_count,
            self.expected,
            self.expected_hash,
            self.actual,
            self.actual_hash
        )
    }
}

fn vector(key: PartitionKey, hash: Option<i64>, indices: [u32; 3]) -> ReferenceVector {
    ReferenceVector { key, hash, indices }
}

fn string(s: &str, hash: i64, indices: [u32; 3]) -> ReferenceVector {
    vector(PartitionKey::varchar(s), Some(hash), indices)
}

/// The frozen vector table.
pub fn reference_vectors() -> Vec<ReferenceVector> {
    use PartitionKey::*;

    let mut vectors = vec![
        vector(BigInt(Some(0)), Some(0), [0, 0, 0]),
        vector(BigInt(Some(1)), Some(-5451962507482445012), [0, 2, 12]),
        vector(BigInt(Some(-1)), Some(7256831767414464289), [1, 5, 289]),
        vector(BigInt(Some(42)), Some(-9148929187392628276), [0, 6, 276]),
        vector(BigInt(Some(i64::MAX)), Some(-6072754518692401686), [0, 6, 686]),
        vector(BigInt(Some(i64::MIN)), Some(-8108722261328812909), [1, 2, 909]),
        vector(BigInt(Some(i64::MIN + 1)), Some(7913832204677143650), [0, 3, 650]),
        vector(TinyInt(Some(i8::MAX)), Some(-8449682335707084637), [1, 4, 637]),
        vector(TinyInt(Some(i8::MIN)), Some(-4469253550838279628), [0, 5, 628]),
        vector(SmallInt(Some(i16::MAX)), Some(-845346639406310924), [0, 1, 924]),
        vector(SmallInt(Some(i16::MIN)), Some(5244114062634404965), [1, 0, 965]),
        vector(Integer(Some(i32::MAX)), Some(-8474037156193342575), [1, 2, 575]),
        vector(Integer(Some(i32::MIN)), Some(-4266554728331439569), [1, 4, 569]),
        string("", -1205034819632174695, [1, 3, 695]),
        string("a", -3292477735350538661, [1, 3, 661]),
        string("abc", 4952883123889572249, [1, 0, 249]),
        string("42", 7919287270473417401, [1, 3, 401]),
        string("-9223372036854775808", -7034505301505659888, [0, 1, 888]),
        string("hashinator", 5502486176507896076, [0, 4, 76]),
        string(
            "partition-key-0123456789abcdef0123456789",
            -6734695968180689495,
            [1, 0, 495],
        ),
        string("héllo", 4310053764713069540, [0, 6, 540]),
        string("分区", 7870809015148737863, [1, 2, 863]),
    ];
    vectors.extend(
        KeyType::ALL
            .into_iter()
            .map(|t| vector(PartitionKey::null(t), None, [0, 0, 0])),
    );
    vectors
}

/// Checks `hashinator` against every reference vector.
///
/// Returns one failure per `(vector, count)` pair it gets wrong; an empty
/// list means it reproduces the table exactly.
pub fn verify_vectors<H: Hashinator + ?Sized>(hashinator: &H) -> Vec<VectorFailure> {
    let mut failures = Vec::new();
    for v in reference_vectors() {
        let actual_hash = hashinator.hash_key(&v.key);
        for (count, expected) in v.expectations() {
            let actual = hashinator.hashinate(&v.key, count);
            if actual != expected || actual_hash != v.hash {
                failures.push(VectorFailure {
                    hashinator: hashinator.name(),
                    key: v.key.clone(),
                    partition_count: count,
                    expected_hash: v.hash,
                    actual_hash,
                    expected,
                    actual,
                });
            }
        }
    }
    failures
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hashinator::{ReferenceHashinator, XxHashinator};

    #[test]
    fn test_both_implementations_reproduce_vectors() {
        let reference = verify_vectors(&ReferenceHashinator);
        assert!(reference.is_empty(), "{:?}", reference);
        let production = verify_vectors(&XxHashinator);
        assert!(production.is_empty(), "{:?}", production);
    }

    #[test]
    fn test_table_covers_every_null() {
        let nulls = reference_vectors()
            .into_iter()
            .filter(|v| v.key.is_null())
            .count();
        assert_eq!(nulls, KeyType::ALL.len());
    }

    #[test]
    fn test_wrong_implementation_is_caught() {
        struct AlwaysZero;
        impl Hashinator for AlwaysZero {
            fn hash_key(&self, key: &PartitionKey) -> Option<i64> {
                (!key.is_null()).then_some(0)
            }
            fn hashinate(&self, _: &PartitionKey, _: PartitionCount) -> PartitionIndex {
                PartitionIndex::NULL
            }
            fn name(&self) -> &'static str {
                "AlwaysZero"
            }
        }

        let failures = verify_vectors(&AlwaysZero);
        assert!(!failures.is_empty());
        assert!(failures.iter().all(|f| f.hashinator == "AlwaysZero"));
        // BigInt(0) hashes to 0 and is the one key AlwaysZero gets right
        assert!(failures
            .iter()
            .all(|f| f.key != PartitionKey::BigInt(Some(0))));
    }
}
