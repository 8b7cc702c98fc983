//! Trial generation for the conformance suites.
//!
//! Randomized suites are cut into fixed-size chunks. Each chunk owns an RNG
//! seeded from `(seed, suite, chunk)`, so the trial with a given number is
//! the same no matter which worker generates it or how many workers run.

use std::fmt;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::hash::fmix64;
use crate::key::{PartitionKey, TypedNull};
use crate::partition::PartitionCount;

/// Partition counts every boundary key is checked against.
pub const BOUNDARY_PARTITION_COUNTS: [u32; 6] = [1, 2, 3, 7, 64, 1000];

/// Group of trials run and reported together.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Suite {
    /// Random `i64` keys over the full signed range.
    Integer,
    /// Random `i64` values rendered as decimal strings.
    String,
    /// One typed null per key type.
    Null,
    /// Fixed extreme keys against a fixed set of partition counts.
    Boundary,
}

impl Suite {
    pub const ALL: [Suite; 4] = [Suite::Integer, Suite::String, Suite::Null, Suite::Boundary];

    pub fn name(self) -> &'static str {
        match self {
            Suite::Integer => "integer",
            Suite::String => "string",
            Suite::Null => "null",
            Suite::Boundary => "boundary",
        }
    }

    /// Randomized suites draw from the seeded RNG; the rest are fixed lists.
    pub fn is_randomized(self) -> bool {
        matches!(self, Suite::Integer | Suite::String)
    }

    fn tag(self) -> u64 {
        match self {
            Suite::Integer => 1,
            Suite::String => 2,
            Suite::Null => 3,
            Suite::Boundary => 4,
        }
    }
}

impl fmt::Display for Suite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One input checked against both hashinators.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Trial {
    /// Position of the trial within its suite.
    pub number: u64,
    pub key: PartitionKey,
    pub count: PartitionCount,
}

/// Produces the trials of each suite.
#[derive(Clone, Debug)]
pub struct TrialGenerator {
    seed: u64,
    max_partition_count: u32,
    null_partition_count: PartitionCount,
    chunk_size: usize,
}

impl TrialGenerator {
    /// Callers validate the arguments first; `ConformanceConfig::validate`
    /// guarantees a positive `max_partition_count` and `chunk_size`.
    pub fn new(
        seed: u64,
        max_partition_count: u32,
        null_partition_count: PartitionCount,
        chunk_size: usize,
    ) -> Self {
        Self {
            seed,
            max_partition_count: max_partition_count.max(1),
            null_partition_count,
            chunk_size: chunk_size.max(1),
        }
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Number of chunks needed to cover `trials` randomized trials.
    pub fn chunk_count(&self, trials: usize) -> usize {
        trials.div_ceil(self.chunk_size)
    }

    /// Trials of chunk `chunk` of a randomized suite holding `trials` trials.
    ///
    /// The integer suite always opens with `i64::MIN` and `0` as trials 0
    /// and 1. Returns an empty list for fixed suites.
    pub fn randomized_chunk(&self, suite: Suite, chunk: usize, trials: usize) -> Vec<Trial> {
        if !suite.is_randomized() {
            return Vec::new();
        }

        let start = chunk.saturating_mul(self.chunk_size);
        let end = start.saturating_add(self.chunk_size).min(trials);
        let mut rng = self.chunk_rng(suite, chunk);

        (start..end)
            .map(|number| {
                let drawn: i64 = rng.gen();
                let count = self.random_count(&mut rng);
                let key = match suite {
                    Suite::Integer => PartitionKey::BigInt(Some(match number {
                        0 => i64::MIN,
                        1 => 0,
                        _ => drawn,
                    })),
                    _ => PartitionKey::varchar(drawn.to_string()),
                };
                Trial {
                    number: number as u64,
                    key,
                    count,
                }
            })
            .collect()
    }

    /// Trials of a fixed suite. Returns an empty list for randomized suites.
    pub fn fixed_trials(&self, suite: Suite) -> Vec<Trial> {
        let inputs: Vec<(PartitionKey, PartitionCount)> = match suite {
            Suite::Null => TypedNull::ALL
                .into_iter()
                .map(|null| (PartitionKey::null(null.key_type()), self.null_partition_count))
                .collect(),
            Suite::Boundary => boundary_keys()
                .into_iter()
                .flat_map(|key| {
                    BOUNDARY_PARTITION_COUNTS
                        .into_iter()
                        .filter_map(|n| PartitionCount::try_from(n).ok())
                        .map(move |count| (key.clone(), count))
                })
                .collect(),
            Suite::Integer | Suite::String => Vec::new(),
        };

        inputs
            .into_iter()
            .enumerate()
            .map(|(number, (key, count))| Trial {
                number: number as u64,
                key,
                count,
            })
            .collect()
    }

    fn chunk_rng(&self, suite: Suite, chunk: usize) -> SmallRng {
        let stream = fmix64((suite.tag() << 48) ^ chunk as u64);
        SmallRng::seed_from_u64(fmix64(self.seed ^ stream))
    }

    fn random_count(&self, rng: &mut SmallRng) -> PartitionCount {
        let n = rng.gen_range(1..=self.max_partition_count);
        PartitionCount::try_from(n).unwrap_or(PartitionCount::ONE)
    }
}

/// Keys at the edges of every supported type.
///
/// Covers the extremes of each integer width, values next to zero, and
/// strings around the XXH64 block boundaries (4, 8 and 32 bytes) including
/// multi-byte UTF-8.
pub fn boundary_keys() -> Vec<PartitionKey> {
    let mut keys = vec![
        PartitionKey::BigInt(Some(i64::MIN)),
        PartitionKey::BigInt(Some(i64::MIN + 1)),
        PartitionKey::BigInt(Some(-1)),
        PartitionKey::BigInt(Some(0)),
        PartitionKey::BigInt(Some(1)),
        PartitionKey::BigInt(Some(i64::MAX)),
        PartitionKey::Integer(Some(i32::MIN)),
        PartitionKey::Integer(Some(i32::MAX)),
        PartitionKey::SmallInt(Some(i16::MIN)),
        PartitionKey::SmallInt(Some(i16::MAX)),
        PartitionKey::TinyInt(Some(i8::MIN)),
        PartitionKey::TinyInt(Some(i8::MAX)),
        PartitionKey::varchar(""),
        PartitionKey::varchar(i64::MIN.to_string()),
        PartitionKey::varchar(i64::MAX.to_string()),
        PartitionKey::varchar("héllo"),
        PartitionKey::varchar("分区"),
        PartitionKey::varchar("\u{0}"),
    ];
    for len in [3, 4, 7, 8, 31, 32, 33, 64, 1024] {
        keys.push(PartitionKey::varchar("k".repeat(len)));
    }
    keys
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generator(chunk_size: usize) -> TrialGenerator {
        TrialGenerator::new(7, 1000, PartitionCount::new(2).unwrap(), chunk_size)
    }

    #[test]
    fn test_integer_suite_opens_with_boundaries() {
        let trials = generator(16).randomized_chunk(Suite::Integer, 0, 100);
        assert_eq!(trials.len(), 16);
        assert_eq!(trials[0].key, PartitionKey::BigInt(Some(i64::MIN)));
        assert_eq!(trials[1].key, PartitionKey::BigInt(Some(0)));
    }

    #[test]
    fn test_chunks_are_reproducible() {
        let g = generator(64);
        assert_eq!(
            g.randomized_chunk(Suite::String, 3, 1000),
            g.randomized_chunk(Suite::String, 3, 1000)
        );
        assert_ne!(
            g.randomized_chunk(Suite::String, 3, 1000),
            g.randomized_chunk(Suite::String, 4, 1000)
        );
    }

    #[test]
    fn test_last_chunk_is_truncated() {
        let g = generator(64);
        assert_eq!(g.chunk_count(100), 2);
        let last = g.randomized_chunk(Suite::Integer, 1, 100);
        assert_eq!(last.len(), 36);
        assert_eq!(last.first().map(|t| t.number), Some(64));
        assert_eq!(last.last().map(|t| t.number), Some(99));
    }

    #[test]
    fn test_counts_within_range() {
        let g = generator(4096);
        for trial in g.randomized_chunk(Suite::Integer, 0, 4096) {
            assert!((1..=1000).contains(&trial.count.get()));
        }
    }

    #[test]
    fn test_string_keys_are_decimal() {
        for trial in generator(128).randomized_chunk(Suite::String, 0, 128) {
            match trial.key {
                PartitionKey::Varchar(Some(s)) => assert!(s.parse::<i64>().is_ok(), "{}", s),
                other => panic!("unexpected key {}", other),
            }
        }
    }

    #[test]
    fn test_fixed_suites() {
        let g = generator(64);
        let nulls = g.fixed_trials(Suite::Null);
        assert_eq!(nulls.len(), TypedNull::ALL.len());
        assert!(nulls.iter().all(|t| t.key.is_null() && t.count.get() == 2));

        let boundary = g.fixed_trials(Suite::Boundary);
        assert_eq!(
            boundary.len(),
            boundary_keys().len() * BOUNDARY_PARTITION_COUNTS.len()
        );
        assert!(g.fixed_trials(Suite::Integer).is_empty());
        assert!(g.randomized_chunk(Suite::Null, 0, 10).is_empty());
    }
}
