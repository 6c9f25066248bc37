//! Helpers shared by the integration tests.

use treehunt_core::RandomSource;

/// Deterministic [`RandomSource`] that replays scripted draws in a loop.
///
/// Integer draws are reduced into the requested range, so a script written
/// for one forest size stays valid for another.
pub struct ScriptedSource {
    draws: Vec<usize>,
    cursor: usize,
}

impl ScriptedSource {
    pub fn new(script: impl Into<Vec<usize>>) -> Self {
        let draws = script.into();
        assert!(!draws.is_empty(), "script needs at least one draw");
        Self { draws, cursor: 0 }
    }

    fn next(&mut self) -> usize {
        let slot = self.cursor.rem_euclid(self.draws.len());
        self.cursor += 1;
        self.draws.get(slot).copied().unwrap_or_default()
    }
}

impl RandomSource for ScriptedSource {
    fn uniform_index(&mut self, upper: usize) -> usize {
        self.next().rem_euclid(upper)
    }

    fn uniform_inclusive(&mut self, low: usize, high: usize) -> usize {
        low + self.next().rem_euclid(high - low + 1)
    }

    #[expect(clippy::float_arithmetic, reason = "scripted draws map to thousandths")]
    fn uniform_unit(&mut self) -> f64 {
        let thousandths = u32::try_from(self.next().rem_euclid(1000)).unwrap_or_default();
        f64::from(thousandths) / 1000.0
    }
}
