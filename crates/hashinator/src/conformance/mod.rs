//! Conformance harness.
//!
//! Drives two [`Hashinator`]s over the same inputs and reports every trial
//! where they disagree or step outside `[0, count)`. A divergence here means
//! two components would route the same row to different partitions, so a
//! report names the exact key and partition count of the first failure.
//!
//! # Suites
//!
//! - **integer**: random `i64` keys, opening with `i64::MIN` and `0`
//! - **string**: random `i64` values rendered as decimal strings
//! - **null**: one typed null per key type, each expected on partition 0
//! - **boundary**: fixed extreme keys against several partition counts
//!
//! Randomized suites are split into chunks shared by a pool of scoped
//! worker threads; see [`generator`] for how chunks stay reproducible.

pub mod config;
pub mod generator;
pub mod report;
pub mod vectors;

use std::sync::atomic::{AtomicUsize, Ordering};

use tracing::{debug, error, info};

use crate::error::Result;
use crate::hashinator::Hashinator;

pub use config::ConformanceConfig;
pub use generator::{Suite, Trial, TrialGenerator};
pub use report::{ConformanceReport, Mismatch, MismatchKind, SuiteReport};
pub use vectors::{reference_vectors, verify_vectors, ReferenceVector};

/// Failures seen in one chunk of trials.
#[derive(Debug, Default)]
struct ChunkOutcome {
    trials: usize,
    failures: usize,
    first_failure: Option<Mismatch>,
}

impl ChunkOutcome {
    fn record(&mut self, mismatch: Option<Mismatch>) {
        self.trials += 1;
        if let Some(m) = mismatch {
            self.failures += 1;
            if self.first_failure.is_none() {
                self.first_failure = Some(m);
            }
        }
    }

    /// Folds `other` in, keeping the lowest-numbered failure.
    fn merge(&mut self, other: ChunkOutcome) {
        self.trials += other.trials;
        self.failures += other.failures;
        self.first_failure = match (self.first_failure.take(), other.first_failure) {
            (Some(a), Some(b)) => Some(if b.trial < a.trial { b } else { a }),
            (a, b) => a.or(b),
        };
    }
}

/// Compares a candidate hashinator against a reference.
pub struct ConformanceHarness<R, C> {
    reference: R,
    candidate: C,
    config: ConformanceConfig,
    generator: TrialGenerator,
}

impl<R: Hashinator, C: Hashinator> ConformanceHarness<R, C> {
    /// Builds a harness, rejecting an invalid `config`.
    pub fn new(reference: R, candidate: C, config: ConformanceConfig) -> Result<Self> {
        config.validate()?;
        let generator = TrialGenerator::new(
            config.seed,
            config.max_partition_count,
            config.null_count()?,
            config.chunk_size,
        );
        Ok(Self {
            reference,
            candidate,
            config,
            generator,
        })
    }

    pub fn config(&self) -> &ConformanceConfig {
        &self.config
    }

    /// Runs every suite.
    pub fn run(&self) -> ConformanceReport {
        let suites = Suite::ALL.into_iter().map(|s| self.run_suite(s)).collect();
        ConformanceReport {
            reference: self.reference.name(),
            candidate: self.candidate.name(),
            seed: self.config.seed,
            suites,
        }
    }

    /// Runs a single suite.
    pub fn run_suite(&self, suite: Suite) -> SuiteReport {
        info!(
            %suite,
            reference = self.reference.name(),
            candidate = self.candidate.name(),
            "Running conformance suite"
        );

        let outcome = if suite.is_randomized() {
            self.run_randomized(suite)
        } else {
            let mut outcome = ChunkOutcome::default();
            for trial in self.generator.fixed_trials(suite) {
                outcome.record(self.check(suite, &trial));
            }
            outcome
        };

        let report = SuiteReport {
            suite,
            trials: outcome.trials,
            failures: outcome.failures,
            first_failure: outcome.first_failure,
        };

        match &report.first_failure {
            Some(m) => error!(
                %suite,
                failures = report.failures,
                trial = m.trial,
                key = %m.key,
                partition_count = m.partition_count.get(),
                reference = m.reference.get(),
                candidate = m.candidate.get(),
                kind = %m.kind,
                "Conformance suite failed"
            ),
            None => info!(%suite, trials = report.trials, "Conformance suite passed"),
        }
        report
    }

    /// Checks one trial against both implementations.
    ///
    /// Range is checked before agreement, so an out-of-range answer is
    /// reported as such even when the other side is also wrong.
    pub fn check(&self, suite: Suite, trial: &Trial) -> Option<Mismatch> {
        let reference = self.reference.hashinate(&trial.key, trial.count);
        let candidate = self.candidate.hashinate(&trial.key, trial.count);

        let kind = if !trial.count.contains(reference) {
            MismatchKind::ReferenceOutOfRange
        } else if !trial.count.contains(candidate) {
            MismatchKind::CandidateOutOfRange
        } else if reference != candidate {
            MismatchKind::Disagreement
        } else if trial.key.is_null() && reference.get() != 0 {
            MismatchKind::NullNotZero
        } else {
            return None;
        };

        Some(Mismatch {
            suite,
            trial: trial.number,
            key: trial.key.clone(),
            partition_count: trial.count,
            reference,
            candidate,
            kind,
        })
    }

    fn run_chunk(&self, suite: Suite, chunk: usize) -> ChunkOutcome {
        let mut outcome = ChunkOutcome::default();
        for trial in self
            .generator
            .randomized_chunk(suite, chunk, self.config.trials)
        {
            outcome.record(self.check(suite, &trial));
        }
        debug!(%suite, chunk, trials = outcome.trials, failures = outcome.failures, "Chunk checked");
        outcome
    }

    fn run_randomized(&self, suite: Suite) -> ChunkOutcome {
        let chunks = self.generator.chunk_count(self.config.trials);
        let workers = self.config.workers.min(chunks).max(1);
        let next_chunk = AtomicUsize::new(0);

        let worker = || {
            let mut outcome = ChunkOutcome::default();
            loop {
                let chunk = next_chunk.fetch_add(1, Ordering::Relaxed);
                if chunk >= chunks {
                    break;
                }
                outcome.merge(self.run_chunk(suite, chunk));
            }
            outcome
        };

        if workers == 1 {
            return worker();
        }

        let worker = &worker;
        crossbeam::thread::scope(|scope| {
            let handles: Vec<_> = (0..workers)
                .map(|_| scope.spawn(move |_| worker()))
                .collect();
            let mut total = ChunkOutcome::default();
            for handle in handles {
                match handle.join() {
                    Ok(outcome) => total.merge(outcome),
                    Err(panic) => std::panic::resume_unwind(panic),
                }
            }
            total
        })
        .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
    }
}

/// Runs the full harness with `config`.
pub fn run_conformance<R: Hashinator, C: Hashinator>(
    reference: R,
    candidate: C,
    config: ConformanceConfig,
) -> Result<ConformanceReport> {
    Ok(ConformanceHarness::new(reference, candidate, config)?.run())
}
