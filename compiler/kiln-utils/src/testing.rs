//! Options that steer the VM test suites. These are read once from the
//! environment, so a run can be narrowed or made more thorough without
//! touching the tests themselves:
//!
//! - `KILN_TEST_FILTER`: only run cases whose name contains this string.
//! - `KILN_TEST_SAMPLES`: number of sampled operand pairs per width in the
//!   sampled arithmetic checks.

use std::env;

use derive_more::Constructor;
use once_cell::sync::Lazy;

/// The default number of sampled operand pairs per width.
pub const DEFAULT_SAMPLES: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq, Constructor)]
pub struct TestOptions {
    /// An optional substring that case names must contain to be run.
    pub filter: Option<String>,

    /// How many samples sampled checks should draw per width.
    pub samples: usize,
}

impl TestOptions {
    /// Read the options from the process environment.
    pub fn from_env() -> Self {
        Self::from_vars(env::var("KILN_TEST_FILTER").ok(), env::var("KILN_TEST_SAMPLES").ok())
    }

    /// Build the options from the raw variable values. An unparsable or
    /// zero sample count falls back to [DEFAULT_SAMPLES].
    pub fn from_vars(filter: Option<String>, samples: Option<String>) -> Self {
        let filter = filter.filter(|filter| !filter.is_empty());
        let samples = samples
            .and_then(|samples| samples.trim().parse::<usize>().ok())
            .filter(|samples| *samples > 0)
            .unwrap_or(DEFAULT_SAMPLES);

        Self { filter, samples }
    }

    /// Whether a case with the given name should be run.
    pub fn should_run(&self, name: &str) -> bool {
        self.filter.as_deref().is_none_or(|filter| name.contains(filter))
    }
}

impl Default for TestOptions {
    fn default() -> Self {
        Self { filter: None, samples: DEFAULT_SAMPLES }
    }
}

/// The options for the current process, read on first use.
pub static TEST_OPTIONS: Lazy<TestOptions> = Lazy::new(TestOptions::from_env);
