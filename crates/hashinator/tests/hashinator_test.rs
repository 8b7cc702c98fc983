//! Tests for the key to partition mapping.
//!
//! # Test Strategy
//!
//! 1. **Entry points**: `hashinate`, `hashinate_value`, contract violations
//! 2. **Invariants**: range, determinism, null convergence, single partition
//! 3. **Edge cases**: `i64::MIN`, empty and long strings, sentinels
//! 4. **Properties**: proptest over arbitrary keys and partition counts

use hashinator::key::{NULL_BIGINT, NULL_INTEGER, NULL_SMALLINT, NULL_TINYINT};
use hashinator::{
    hashinate, hashinate_value, Error, Hashinator, KeyType, PartitionCount, PartitionKey,
    ReferenceHashinator, TypedNull, XxHashinator,
};
use proptest::prelude::*;

// ============================================================================
// Entry Points
// ============================================================================

#[test]
fn test_scenario_baselines() {
    // Captured from the first run; must never change
    assert_eq!(hashinate(&PartitionKey::BigInt(Some(42)), 7).unwrap().get(), 6);
    assert_eq!(hashinate(&PartitionKey::varchar("42"), 7).unwrap().get(), 3);
}

#[test]
fn test_invalid_partition_counts() {
    let key = PartitionKey::BigInt(Some(42));
    assert_eq!(hashinate(&key, 0), Err(Error::InvalidPartitionCount(0)));
    assert_eq!(hashinate(&key, -7), Err(Error::InvalidPartitionCount(-7)));
    assert!(hashinate(&key, i64::from(u32::MAX) + 1).is_err());
    assert!(hashinate_value("42", 0).is_err());
}

#[test]
fn test_typed_nulls_go_to_partition_zero() {
    for null in TypedNull::ALL {
        for count in [1, 2, 3, 1000] {
            assert_eq!(hashinate_value(null, count).unwrap().get(), 0);
        }
    }
    assert_eq!(hashinate_value(NULL_TINYINT, 2).unwrap().get(), 0);
    assert_eq!(hashinate_value(NULL_SMALLINT, 2).unwrap().get(), 0);
    assert_eq!(hashinate_value(NULL_INTEGER, 2).unwrap().get(), 0);
    assert_eq!(hashinate_value(NULL_BIGINT, 2).unwrap().get(), 0);
    assert_eq!(hashinate_value(None::<&str>, 2).unwrap().get(), 0);
    assert_eq!(hashinate_value(None::<i64>, 2).unwrap().get(), 0);
}

#[test]
fn test_convenience_surface_matches_keys() {
    assert_eq!(
        hashinate_value(42i64, 1000).unwrap(),
        hashinate(&PartitionKey::BigInt(Some(42)), 1000).unwrap()
    );
    assert_eq!(
        hashinate_value(String::from("hashinator"), 1000).unwrap(),
        hashinate(&PartitionKey::varchar("hashinator"), 1000).unwrap()
    );
}

// ============================================================================
// Edge Cases
// ============================================================================

#[test]
fn test_min_value_key_is_hashed_not_nulled() {
    // As a PartitionKey value, i64::MIN is an ordinary key
    let key = PartitionKey::BigInt(Some(i64::MIN));
    assert_eq!(hashinate(&key, 1000).unwrap().get(), 909);
    for count in [1, 2, 3, 7, 64, 1000, i64::from(u32::MAX)] {
        let index = hashinate(&key, count).unwrap();
        assert!(i64::from(index.get()) < count);
    }
}

#[test]
fn test_long_strings_use_every_byte() {
    let base = "k".repeat(4096);
    let mut changed = base.clone();
    changed.push('x');
    let h = XxHashinator;
    assert_ne!(
        h.hash_key(&PartitionKey::varchar(base)),
        h.hash_key(&PartitionKey::varchar(changed))
    );
}

#[test]
fn test_string_and_integer_paths_are_independent() {
    let h = XxHashinator;
    assert_ne!(
        h.hash_key(&PartitionKey::BigInt(Some(42))),
        h.hash_key(&PartitionKey::varchar("42"))
    );
}

#[test]
fn test_dynamic_dispatch() {
    let impls: Vec<Box<dyn Hashinator>> = vec![Box::new(XxHashinator), Box::new(ReferenceHashinator)];
    let key = PartitionKey::parse(KeyType::Integer, "-17").unwrap();
    let count = PartitionCount::new(64).unwrap();
    let results: Vec<_> = impls.iter().map(|h| h.hashinate(&key, count)).collect();
    assert_eq!(results[0], results[1]);
}

#[test]
fn test_concurrent_callers_agree() {
    let expected = hashinate(&PartitionKey::varchar("shared"), 97).unwrap();
    let handles: Vec<_> = (0..8)
        .map(|_| {
            std::thread::spawn(|| {
                (0..1000)
                    .map(|_| hashinate(&PartitionKey::varchar("shared"), 97).unwrap())
                    .collect::<Vec<_>>()
            })
        })
        .collect();
    for handle in handles {
        assert!(handle.join().unwrap().into_iter().all(|i| i == expected));
    }
}

// ============================================================================
// Properties
// ============================================================================

fn any_key() -> impl Strategy<Value = PartitionKey> {
    prop_oneof![
        any::<Option<i8>>().prop_map(PartitionKey::TinyInt),
        any::<Option<i16>>().prop_map(PartitionKey::SmallInt),
        any::<Option<i32>>().prop_map(PartitionKey::Integer),
        any::<Option<i64>>().prop_map(PartitionKey::BigInt),
        any::<Option<String>>().prop_map(PartitionKey::Varchar),
        Just(PartitionKey::BigInt(Some(i64::MIN))),
    ]
}

proptest! {
    #[test]
    fn prop_index_in_range(key in any_key(), count in 1u32..=u32::MAX) {
        let count = PartitionCount::try_from(count).unwrap();
        prop_assert!(count.contains(XxHashinator.hashinate(&key, count)));
    }

    #[test]
    fn prop_implementations_agree(key in any_key(), count in 1u32..=1000) {
        let count = PartitionCount::try_from(count).unwrap();
        prop_assert_eq!(XxHashinator.hash_key(&key), ReferenceHashinator.hash_key(&key));
        prop_assert_eq!(
            XxHashinator.hashinate(&key, count),
            ReferenceHashinator.hashinate(&key, count)
        );
    }

    #[test]
    fn prop_deterministic(key in any_key(), count in 1i64..=1000) {
        prop_assert_eq!(hashinate(&key, count).unwrap(), hashinate(&key.clone(), count).unwrap());
    }

    #[test]
    fn prop_single_partition_collapse(key in any_key()) {
        prop_assert_eq!(hashinate(&key, 1).unwrap().get(), 0);
    }

    #[test]
    fn prop_nulls_converge(t in 0usize..5, count in 1i64..=100_000) {
        let key = PartitionKey::null(KeyType::ALL[t]);
        prop_assert_eq!(hashinate(&key, count).unwrap().get(), 0);
    }
}
