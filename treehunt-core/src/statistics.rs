//! Trial outcomes and their summary statistics.

use std::time::Duration;

/// Raw value recorded for a trial in which the hunter gave up.
pub const GIVE_UP_SENTINEL: i64 = -1;

/// Result of one trial for one hunter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TrialOutcome {
    /// The target was hit on the `shots`-th shot.
    Captured {
        /// Shots fired, including the hit.
        shots: u32,
    },
    /// The hunter stopped without hitting the target.
    GaveUp,
}

impl TrialOutcome {
    /// Integer form: the shot count for a capture, [`GIVE_UP_SENTINEL`]
    /// otherwise.
    ///
    /// # Examples
    /// ```
    /// use treehunt_core::{GIVE_UP_SENTINEL, TrialOutcome};
    ///
    /// assert_eq!(TrialOutcome::Captured { shots: 4 }.as_raw(), 4);
    /// assert_eq!(TrialOutcome::GaveUp.as_raw(), GIVE_UP_SENTINEL);
    /// ```
    #[must_use]
    pub fn as_raw(self) -> i64 {
        match self {
            Self::Captured { shots } => i64::from(shots),
            Self::GaveUp => GIVE_UP_SENTINEL,
        }
    }

    /// Shot count for a capture.
    #[must_use]
    pub const fn shots(self) -> Option<u32> {
        match self {
            Self::Captured { shots } => Some(shots),
            Self::GaveUp => None,
        }
    }
}

/// Running per-shot timing for one hunter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ShotTimer {
    count: u64,
    total: Duration,
    min: Option<Duration>,
    max: Duration,
}

impl ShotTimer {
    /// Records the time one shot took.
    pub fn record(&mut self, elapsed: Duration) {
        self.count += 1;
        self.total += elapsed;
        self.min = Some(self.min.map_or(elapsed, |min| min.min(elapsed)));
        self.max = self.max.max(elapsed);
    }

    /// Number of recorded shots.
    #[must_use]
    #[rustfmt::skip]
    pub const fn count(&self) -> u64 { self.count }

    /// Mean, min and max shot time; `None` before any shot.
    ///
    /// The mean is taken over nanoseconds with the full `u64` count.
    #[must_use]
    pub fn summary(&self) -> Option<ShotTiming> {
        let min = self.min?;
        let mean_nanos = self.total.as_nanos().checked_div(u128::from(self.count))?;
        let mean = u64::try_from(mean_nanos).map_or(self.max, Duration::from_nanos);
        Some(ShotTiming {
            mean,
            min,
            max: self.max,
        })
    }
}

/// Elapsed time per shot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShotTiming {
    /// Mean time per shot.
    pub mean: Duration,
    /// Fastest shot.
    pub min: Duration,
    /// Slowest shot.
    pub max: Duration,
}

/// Summary of a hunter's outcomes over a benchmark.
///
/// Shot-count figures cover captures only; give-ups count towards
/// `samples` and lower the success ratio.
///
/// # Examples
/// ```
/// use treehunt_core::{ResultStatistics, TrialOutcome};
///
/// let stats = ResultStatistics::from_outcomes(&[
///     TrialOutcome::Captured { shots: 2 },
///     TrialOutcome::Captured { shots: 4 },
///     TrialOutcome::GaveUp,
///     TrialOutcome::Captured { shots: 6 },
/// ]);
/// assert_eq!(stats.samples, 4);
/// assert_eq!(stats.min, Some(2));
/// assert_eq!(stats.max, Some(6));
/// assert_eq!(stats.mean, Some(4.0));
/// assert_eq!(stats.std_dev, 2.0);
/// assert_eq!(stats.success_ratio, 0.75);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ResultStatistics {
    /// Number of trials, captures and give-ups alike.
    pub samples: usize,
    /// Number of captures.
    pub captures: usize,
    /// Fewest shots to a capture.
    pub min: Option<u32>,
    /// Most shots to a capture.
    pub max: Option<u32>,
    /// Mean shots to a capture.
    pub mean: Option<f64>,
    /// Sample standard deviation of shots to a capture; zero with fewer than
    /// two captures.
    pub std_dev: f64,
    /// `captures / samples`, zero without samples.
    pub success_ratio: f64,
    /// Elapsed time per shot, when recorded.
    pub timing: Option<ShotTiming>,
}

impl ResultStatistics {
    /// Summarises a slice of outcomes.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "mean and deviation are floating-point summaries"
    )]
    #[expect(
        clippy::cast_precision_loss,
        reason = "trial counts stay far below 2^52"
    )]
    pub fn from_outcomes(outcomes: &[TrialOutcome]) -> Self {
        let shots: Vec<u32> = outcomes.iter().filter_map(|outcome| outcome.shots()).collect();
        let samples = outcomes.len();
        let captures = shots.len();

        let mean = (captures > 0)
            .then(|| shots.iter().map(|&count| f64::from(count)).sum::<f64>() / captures as f64);
        let std_dev = match mean {
            Some(centre) if captures > 1 => {
                let squares: f64 = shots
                    .iter()
                    .map(|&count| (f64::from(count) - centre).powi(2))
                    .sum();
                (squares / (captures - 1) as f64).sqrt()
            }
            _ => 0.0,
        };
        let success_ratio = if samples == 0 {
            0.0
        } else {
            captures as f64 / samples as f64
        };

        Self {
            samples,
            captures,
            min: shots.iter().copied().min(),
            max: shots.iter().copied().max(),
            mean,
            std_dev,
            success_ratio,
            timing: None,
        }
    }

    /// Attaches per-shot timing.
    #[must_use]
    pub const fn with_timing(mut self, timing: Option<ShotTiming>) -> Self {
        self.timing = timing;
        self
    }
}
