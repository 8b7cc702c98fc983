//! Conformance results.

use std::fmt;

use serde::Serialize;

use crate::conformance::generator::Suite;
use crate::key::PartitionKey;
use crate::partition::{PartitionCount, PartitionIndex};

/// Why a trial failed.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MismatchKind {
    /// The two implementations returned different indices.
    Disagreement,
    /// The reference returned an index outside `[0, count)`.
    ReferenceOutOfRange,
    /// The candidate returned an index outside `[0, count)`.
    CandidateOutOfRange,
    /// Both agreed, but a typed null did not land on partition 0.
    NullNotZero,
}

impl fmt::Display for MismatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MismatchKind::Disagreement => "implementations disagree",
            MismatchKind::ReferenceOutOfRange => "reference index out of range",
            MismatchKind::CandidateOutOfRange => "candidate index out of range",
            MismatchKind::NullNotZero => "null key not routed to partition 0",
        })
    }
}

/// A failed trial, with everything needed to reproduce it.
#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
pub struct Mismatch {
    pub suite: Suite,
    pub trial: u64,
    pub key: PartitionKey,
    pub partition_count: PartitionCount,
    pub reference: PartitionIndex,
    pub candidate: PartitionIndex,
    pub kind: MismatchKind,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} suite trial {}: key {} with {} partitions: reference={} candidate={} ({})",
            self.suite,
            self.trial,
            self.key,
            self.partition_count,
            self.reference,
            self.candidate,
            self.kind
        )
    }
}

/// Outcome of one suite.
#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
pub struct SuiteReport {
    pub suite: Suite,
    pub trials: usize,
    pub failures: usize,
    /// Failure with the lowest trial number.
    pub first_failure: Option<Mismatch>,
}

impl SuiteReport {
    pub fn passed(&self) -> bool {
        self.failures == 0
    }
}

/// Outcome of a full conformance run.
#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
pub struct ConformanceReport {
    pub reference: &'static str,
    pub candidate: &'static str,
    pub seed: u64,
    pub suites: Vec<SuiteReport>,
}

impl ConformanceReport {
    pub fn passed(&self) -> bool {
        self.suites.iter().all(SuiteReport::passed)
    }

    pub fn total_trials(&self) -> usize {
        self.suites.iter().map(|s| s.trials).sum()
    }

    pub fn total_failures(&self) -> usize {
        self.suites.iter().map(|s| s.failures).sum()
    }

    /// First failure of the first failing suite, in run order.
    pub fn first_failure(&self) -> Option<&Mismatch> {
        self.suites.iter().find_map(|s| s.first_failure.as_ref())
    }

    pub fn suite(&self, suite: Suite) -> Option<&SuiteReport> {
        self.suites.iter().find(|s| s.suite == suite)
    }
}

impl fmt::Display for ConformanceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} vs {} (seed {:#018x})",
            self.reference, self.candidate, self.seed
        )?;
        for s in &self.suites {
            let status = if s.passed() { "ok" } else { "FAILED" };
            writeln!(
                f,
                "  {:<9} {:>8} trials {:>6} failures  {}",
                s.suite.name(),
                s.trials,
                s.failures,
                status
            )?;
        }
        match self.first_failure() {
            Some(m) => write!(f, "first failure: {}", m),
            None => write!(f, "{} trials, all conforming", self.total_trials()),
        }
    }
}
