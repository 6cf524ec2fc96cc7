// crates/odscript/tests/common/mod.rs
//! Shared helpers for the integration tests.

#![allow(dead_code)]

use odscript::{CommitOutcome, ConfigError, ConfigTransport, RegisterWrite};

/// The sample controller configuration shipped with the tests.
pub const SAMPLE_SCRIPT: &str = include_str!("../data/c5e_config.txt");

/// Installs a test logger once; repeated calls are ignored.
pub fn init_logger() {
    let _ = env_logger::Builder::from_default_env()
        .is_test(true)
        .filter_level(log::LevelFilter::Trace)
        .try_init();
}

/// A transport that records every commit instead of talking to hardware.
pub struct RecordingTransport {
    pub commits: Vec<Vec<RegisterWrite>>,
    pub outcome: CommitOutcome,
    pub fail_with: Option<&'static str>,
}

impl RecordingTransport {
    pub fn new(outcome: CommitOutcome) -> Self {
        Self {
            commits: Vec::new(),
            outcome,
            fail_with: None,
        }
    }

    pub fn failing(reason: &'static str) -> Self {
        Self {
            commits: Vec::new(),
            outcome: CommitOutcome::Applied,
            fail_with: Some(reason),
        }
    }
}

impl ConfigTransport for RecordingTransport {
    fn commit(&mut self, entries: &[RegisterWrite]) -> Result<CommitOutcome, ConfigError> {
        if let Some(reason) = self.fail_with {
            return Err(ConfigError::Transport(reason));
        }
        self.commits.push(entries.to_vec());
        Ok(self.outcome)
    }
}
