//! Treehunt core library.
//!
//! Simulates a hunter chasing a target that jumps between neighbouring trees
//! of a random forest, and benchmarks hunting strategies against it.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod benchmark;
mod error;
mod forest;
mod hunter;
mod random;
mod statistics;

#[cfg(test)]
mod test_utils;

pub use crate::{
    benchmark::{
        Benchmark, BenchmarkBuilder, BenchmarkReport, DEFAULT_MAX_TURNS, HuntInstance,
        HunterReport,
    },
    error::{HuntError, HuntErrorCode, Result},
    forest::{DegreeSequence, Forest, GenerationPolicy, MAX_MASK_TREES, is_graphic},
    hunter::{
        ExactPlanner, Hunter, MAX_PLANNER_TREES, PlanStatus, ProbabilisticTracker,
        RESCALE_THRESHOLD, Shot,
    },
    random::{RandomSource, entropy_rng, seeded_rng},
    statistics::{GIVE_UP_SENTINEL, ResultStatistics, ShotTimer, ShotTiming, TrialOutcome},
};
