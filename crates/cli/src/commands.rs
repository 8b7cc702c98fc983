//! CLI subcommands.

use std::fmt::{self, Write as _};

use clap::{Args, Subcommand};
use hashinator::conformance::config::{DEFAULT_CHUNK_SIZE, DEFAULT_MAX_PARTITION_COUNT, DEFAULT_TRIALS};
use hashinator::conformance::vectors::VectorFailure;
use hashinator::conformance::{reference_vectors, run_conformance, verify_vectors, ReferenceVector};
use hashinator::{
    ConformanceConfig, ConformanceReport, Hashinator, KeyType, PartitionCount, PartitionIndex,
    PartitionKey, ReferenceHashinator, XxHashinator,
};
use serde::Serialize;
use tracing::info;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compute the partition of a single key with both implementations.
    Hash(HashArgs),
    /// Run the conformance harness (production vs reference).
    Verify(VerifyArgs),
    /// Check both implementations against the frozen reference vectors.
    Vectors,
}

#[derive(Args, Debug)]
pub struct HashArgs {
    /// Key type: tinyint, smallint, integer, bigint or varchar.
    #[arg(long = "type", short = 't', default_value = "bigint", value_parser = parse_key_type)]
    pub key_type: KeyType,

    /// Key value; integers must fit the type's width.
    #[arg(
        long,
        short = 'v',
        allow_hyphen_values = true,
        required_unless_present = "null",
        conflicts_with = "null"
    )]
    pub value: Option<String>,

    /// Hash the typed null of the key type instead of a value.
    #[arg(long)]
    pub null: bool,

    /// Number of partitions.
    #[arg(long, short = 'p', allow_hyphen_values = true)]
    pub partitions: i64,
}

#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Trials per randomized suite.
    #[arg(long, default_value_t = DEFAULT_TRIALS)]
    pub trials: usize,

    /// Random partition counts are drawn from 1..=MAX_PARTITIONS.
    #[arg(long, default_value_t = DEFAULT_MAX_PARTITION_COUNT)]
    pub max_partitions: u32,

    /// RNG seed; a fresh one is drawn and logged when omitted.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Worker threads; defaults to the available parallelism.
    #[arg(long)]
    pub workers: Option<usize>,

    /// Trials generated from one RNG stream.
    #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
    pub chunk_size: usize,
}

impl VerifyArgs {
    pub fn to_config(&self) -> ConformanceConfig {
        let seed = self.seed.unwrap_or_else(|| {
            let seed: u64 = rand::random();
            info!(seed, "Using random conformance seed");
            seed
        });
        let mut config = ConformanceConfig::default()
            .with_trials(self.trials)
            .with_max_partition_count(self.max_partitions)
            .with_chunk_size(self.chunk_size)
            .with_seed(seed);
        if let Some(workers) = self.workers {
            config = config.with_workers(workers);
        }
        config
    }
}

fn parse_key_type(s: &str) -> Result<KeyType, String> {
    s.parse::<KeyType>().map_err(|e| e.to_string())
}

/// Outcome of a command, printable as text or JSON.
#[derive(Debug, Serialize)]
#[serde(tag = "command", rename_all = "lowercase")]
pub enum CommandResult {
    Hash {
        key: PartitionKey,
        partition_count: PartitionCount,
        hash: Option<i64>,
        xxhashinator: PartitionIndex,
        reference: PartitionIndex,
    },
    Verify(ConformanceReport),
    Vectors {
        vectors: Vec<ReferenceVector>,
        failures: Vec<VectorFailure>,
    },
}

impl Command {
    pub fn execute(&self) -> anyhow::Result<CommandResult> {
        match self {
            Command::Hash(args) => {
                let key = match &args.value {
                    Some(value) if !args.null => PartitionKey::parse(args.key_type, value)?,
                    _ => PartitionKey::null(args.key_type),
                };
                let count = PartitionCount::new(args.partitions)?;
                Ok(CommandResult::Hash {
                    hash: XxHashinator.hash_key(&key),
                    xxhashinator: XxHashinator.hashinate(&key, count),
                    reference: ReferenceHashinator.hashinate(&key, count),
                    key,
                    partition_count: count,
                })
            }
            Command::Verify(args) => {
                let report = run_conformance(ReferenceHashinator, XxHashinator, args.to_config())?;
                Ok(CommandResult::Verify(report))
            }
            Command::Vectors => {
                let mut failures = verify_vectors(&ReferenceHashinator);
                failures.extend(verify_vectors(&XxHashinator));
                Ok(CommandResult::Vectors {
                    vectors: reference_vectors(),
                    failures,
                })
            }
        }
    }
}

impl CommandResult {
    pub fn success(&self) -> bool {
        match self {
            CommandResult::Hash {
                xxhashinator,
                reference,
                ..
            } => xxhashinator == reference,
            CommandResult::Verify(report) => report.passed(),
            CommandResult::Vectors { failures, .. } => failures.is_empty(),
        }
    }

    /// One-line reason for a failed result.
    pub fn failure_summary(&self) -> String {
        match self {
            CommandResult::Hash {
                key,
                partition_count,
                xxhashinator,
                reference,
                ..
            } => format!(
                "implementations disagree on {} with {} partitions: {} vs {}",
                key, partition_count, xxhashinator, reference
            ),
            CommandResult::Verify(report) => match report.first_failure() {
                Some(m) => format!("{} conformance failures, first: {}", report.total_failures(), m),
                None => "conformance passed".to_string(),
            },
            CommandResult::Vectors { failures, .. } => {
                format!("{} reference vector failures", failures.len())
            }
        }
    }

    pub fn render(&self, json: bool) -> anyhow::Result<String> {
        if json {
            Ok(serde_json::to_string_pretty(self)?)
        } else {
            Ok(self.to_string())
        }
    }
}

impl fmt::Display for CommandResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandResult::Hash {
                key,
                partition_count,
                hash,
                xxhashinator,
                reference,
            } => {
                let hash = hash.map_or_else(|| "null".to_string(), |h| format!("{:#018x}", h));
                write!(
                    f,
                    "{} over {} partitions -> {} (hash {}, reference {})",
                    key, partition_count, xxhashinator, hash, reference
                )
            }
            CommandResult::Verify(report) => write!(f, "{}", report),
            CommandResult::Vectors { vectors, failures } => {
                let mut out = String::new();
                for v in vectors {
                    let hash = v.hash.map_or_else(|| "null".to_string(), |h| h.to_string());
                    let _ = writeln!(out, "{:<52} hash {:>21}  indices {:?}", v.key.to_string(), hash, v.indices);
                }
                for failure in failures {
                    let _ = writeln!(out, "FAILED {}", failure);
                }
                let _ = write!(
                    out,
                    "{} vectors, {} failures",
                    vectors.len(),
                    failures.len()
                );
                f.write_str(&out)
            }
        }
    }
}
