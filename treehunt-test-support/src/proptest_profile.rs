//! Environment overrides for property-test suites.
//!
//! `TREEHUNT_PBT_CASES` sets the case count and `TREEHUNT_PBT_FORK` runs
//! cases in forked subprocesses. Invalid values are logged and ignored.

use std::env;

/// Environment variable overriding the number of cases per property.
pub const CASES_ENV_KEY: &str = "TREEHUNT_PBT_CASES";
/// Environment variable toggling forked execution.
pub const FORK_ENV_KEY: &str = "TREEHUNT_PBT_FORK";

/// Case count and fork mode for one property suite.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProptestRunProfile {
    cases: u32,
    fork: bool,
}

impl ProptestRunProfile {
    /// Reads overrides from the environment, falling back to the defaults.
    ///
    /// # Examples
    ///
    /// ```
    /// use treehunt_test_support::proptest_profile::ProptestRunProfile;
    ///
    /// let profile = ProptestRunProfile::load(32, false);
    /// assert!(profile.cases() > 0);
    /// ```
    #[must_use]
    pub fn load(default_cases: u32, default_fork: bool) -> Self {
        Self {
            cases: override_or(CASES_ENV_KEY, default_cases, parse_cases),
            fork: override_or(FORK_ENV_KEY, default_fork, parse_flag),
        }
    }

    /// Number of cases per property.
    #[must_use]
    pub fn cases(&self) -> u32 {
        self.cases
    }

    /// Whether cases run in forked subprocesses.
    #[must_use]
    pub fn fork(&self) -> bool {
        self.fork
    }
}

fn override_or<T>(key: &'static str, default: T, parse: fn(&str) -> Result<T, String>) -> T {
    let Ok(raw) = env::var(key) else {
        return default;
    };
    parse(&raw).unwrap_or_else(|reason| {
        tracing::warn!(env = key, raw = %raw, reason = %reason, "ignoring property-test override");
        default
    })
}

fn parse_cases(raw: &str) -> Result<u32, String> {
    match raw.trim().parse::<u32>() {
        Ok(0) => Err("cases must be positive".to_owned()),
        Ok(cases) => Ok(cases),
        Err(error) => Err(error.to_string()),
    }
}

fn parse_flag(raw: &str) -> Result<bool, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(format!("`{other}` is not a boolean")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case("1", Ok(1))]
    #[case(" 512 ", Ok(512))]
    #[case("0", Err(()))]
    #[case("-3", Err(()))]
    #[case("many", Err(()))]
    fn case_counts_are_parsed(#[case] raw: &str, #[case] expected: Result<u32, ()>) {
        assert_eq!(parse_cases(raw).map_err(|_| ()), expected);
    }

    #[rstest]
    #[case("TRUE", Ok(true))]
    #[case("on", Ok(true))]
    #[case("1", Ok(true))]
    #[case("no", Ok(false))]
    #[case("0", Ok(false))]
    #[case("", Err(()))]
    #[case("2", Err(()))]
    fn fork_flags_are_parsed(#[case] raw: &str, #[case] expected: Result<bool, ()>) {
        assert_eq!(parse_flag(raw).map_err(|_| ()), expected);
    }
}
