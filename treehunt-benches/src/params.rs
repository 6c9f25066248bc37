//! Benchmark parameter types.
//!
//! Each type doubles as the Criterion parameter label through `Display`.

use std::fmt;

/// Parameters for a benchmark over a single forest size.
#[derive(Clone, Copy, Debug)]
pub struct ForestBenchParams {
    /// Trees per forest.
    pub trees: usize,
    /// Seed for the generator.
    pub seed: u64,
}

impl fmt::Display for ForestBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={}", self.trees)
    }
}

/// Parameters for a full benchmark schedule.
#[derive(Clone, Copy, Debug)]
pub struct ScheduleBenchParams {
    /// Trees per forest.
    pub trees: usize,
    /// Forests generated per run.
    pub instances: usize,
    /// Trials played on every forest.
    pub trials: usize,
}

impl fmt::Display for ScheduleBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "n={},instances={},trials={}",
            self.trees, self.instances, self.trials
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_name_the_parameters() {
        let forest = ForestBenchParams { trees: 9, seed: 1 };
        assert_eq!(forest.to_string(), "n=9");
        let schedule = ScheduleBenchParams {
            trees: 6,
            instances: 4,
            trials: 2,
        };
        assert_eq!(schedule.to_string(), "n=6,instances=4,trials=2");
    }
}
