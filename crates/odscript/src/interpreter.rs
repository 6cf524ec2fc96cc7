// crates/odscript/src/interpreter.rs
//! Composition of size guard, parser, switch filter and register store.

use crate::error::ConfigError;
use crate::hal::{BaselineSupplier, CommitOutcome, ConfigTransport, RegisterWrite};
use crate::script::{self, Directive};
use crate::store::RegisterStore;
use crate::switch::SwitchContext;
use crate::types::{MAX_SCRIPT_LEN, Switch};
use alloc::vec::Vec;
use log::{debug, error, info};

/// Per-run settings supplied by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterpreterConfig {
    /// Switch whose guarded directives apply. `None` makes them all inert.
    pub active_switch: Option<Switch>,
    /// Maximum script length in bytes. Never above [`MAX_SCRIPT_LEN`].
    pub size_limit: usize,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self {
            active_switch: None,
            size_limit: MAX_SCRIPT_LEN,
        }
    }
}

impl InterpreterConfig {
    /// Selects the active switch, rejecting values above 15.
    pub fn with_switch(mut self, switch: u8) -> Result<Self, ConfigError> {
        self.active_switch = Some(Switch::try_from(switch)?);
        Ok(self)
    }

    /// Tightens the size limit. Values above [`MAX_SCRIPT_LEN`] are clamped.
    pub fn with_size_limit(mut self, limit: usize) -> Self {
        self.size_limit = limit.min(MAX_SCRIPT_LEN);
        self
    }
}

/// Counters describing one successful run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Directives in the script (non-blank, non-comment lines).
    pub parsed: usize,
    /// Directives that passed the switch filter and were applied.
    pub applied: usize,
    /// Directives skipped because their switch guard did not match.
    pub skipped: usize,
    /// Registers whose final value differs from the baseline.
    pub changed: usize,
}

/// Result of a successful run: the final registers and the counters.
#[derive(Debug)]
pub struct Interpretation<'a> {
    pub store: RegisterStore<'a>,
    pub summary: RunSummary,
}

impl<'a> Interpretation<'a> {
    pub fn changes(&self) -> Vec<RegisterWrite> {
        self.store.changes()
    }
}

/// Result of [`Interpreter::load_and_commit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitReport {
    pub summary: RunSummary,
    /// The writes handed to the transport.
    pub changes: Vec<RegisterWrite>,
    /// `None` when there was nothing to commit.
    pub outcome: Option<CommitOutcome>,
}

/// Runs configuration scripts against a register store.
///
/// Each run owns its store, so one interpreter can be shared by any number
/// of independent runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct Interpreter {
    config: InterpreterConfig,
}

impl Interpreter {
    pub fn new(config: InterpreterConfig) -> Self {
        Self {
            config: InterpreterConfig {
                size_limit: config.size_limit.min(MAX_SCRIPT_LEN),
                ..config
            },
        }
    }

    pub fn config(&self) -> &InterpreterConfig {
        &self.config
    }

    /// Interprets `script` on top of the values supplied by `baseline`.
    pub fn run<'a>(
        &self,
        script: &str,
        baseline: &'a dyn BaselineSupplier,
    ) -> Result<Interpretation<'a>, ConfigError> {
        self.run_with_store(script, RegisterStore::new(baseline))
    }

    /// Interprets `script` on top of an already seeded store.
    ///
    /// Either the whole script is applied or an error is returned; the store
    /// is consumed so a failed run cannot be mistaken for a usable result.
    pub fn run_with_store<'a>(
        &self,
        script: &str,
        store: RegisterStore<'a>,
    ) -> Result<Interpretation<'a>, ConfigError> {
        script::check_size(script, self.config.size_limit)?;
        let directives = script::parse_script(script)?;
        self.apply_all(&directives, store)
    }

    /// Applies already parsed directives, in order, through the switch filter.
    pub fn apply_all<'a>(
        &self,
        directives: &[Directive],
        mut store: RegisterStore<'a>,
    ) -> Result<Interpretation<'a>, ConfigError> {
        let switches = SwitchContext::new(self.config.active_switch);
        let mut summary = RunSummary {
            parsed: directives.len(),
            ..RunSummary::default()
        };

        for directive in directives {
            if !switches.admits(directive) {
                debug!(
                    "Line {}: skipped, guarded by switch {:?} (active: {:?})",
                    directive.line,
                    directive.guard.map(u8::from),
                    switches.active().map(u8::from)
                );
                summary.skipped += 1;
                continue;
            }
            if let Err(e) = store.apply(directive) {
                error!("Line {}: run aborted: {}", directive.line, e);
                return Err(e.into());
            }
            summary.applied += 1;
        }

        summary.changed = store.changes().len();
        info!(
            "Script applied: {} directives ({} applied, {} skipped), {} registers changed.",
            summary.parsed, summary.applied, summary.skipped, summary.changed
        );
        Ok(Interpretation { store, summary })
    }

    /// Runs the script and, only if the whole run succeeds, hands the change
    /// set to `transport`.
    pub fn load_and_commit(
        &self,
        script: &str,
        baseline: &dyn BaselineSupplier,
        transport: &mut dyn ConfigTransport,
    ) -> Result<CommitReport, ConfigError> {
        let interpretation = self.run(script, baseline)?;
        let changes = interpretation.changes();

        if changes.is_empty() {
            info!("No register differs from the baseline, nothing to commit.");
            return Ok(CommitReport {
                summary: interpretation.summary,
                changes,
                outcome: None,
            });
        }

        let outcome = transport.commit(&changes).inspect_err(|e| {
            error!("Commit of {} registers failed: {}", changes.len(), e);
        })?;
        if outcome == CommitOutcome::PowerCycleRequired {
            info!("{} registers committed, power cycle required.", changes.len());
        } else {
            info!("{} registers committed.", changes.len());
        }
        Ok(CommitReport {
            summary: interpretation.summary,
            changes,
            outcome: Some(outcome),
        })
    }
}

/// Interprets `script` from a zero baseline with the given active switch.
pub fn interpret(script: &str, active_switch: Option<Switch>) -> Result<Interpretation<'static>, ConfigError> {
    let config = InterpreterConfig {
        active_switch,
        ..InterpreterConfig::default()
    };
    Interpreter::new(config).run_with_store(script, RegisterStore::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{EvalError, ParseError, ParseErrorKind};
    use crate::hal::ZeroBaseline;
    use crate::script::Operation;
    use crate::types::OdAddress;
    use alloc::collections::BTreeMap;
    use alloc::string::String;

    #[test]
    fn test_decimal_set() {
        let result = interpret("2030:00=50", None).unwrap();
        assert_eq!(result.store.get(0x2030, 0x00), 50);
    }

    #[test]
    fn test_or_assign_scenario() {
        let result = interpret("3202:00|=0x02", None).unwrap();
        assert_eq!(result.store.get(0x3202, 0x00), 0x02);
    }

    #[test]
    fn test_two_sets_last_wins() {
        let result = interpret("3202:00=0x0000008\n3202:00=0x0000000D\n", None).unwrap();
        assert_eq!(result.store.get(0x3202, 0x00), 0x0D);
        assert_eq!(result.summary.applied, 2);
    }

    #[test]
    fn test_switch_filter() {
        let script = "2031:00=1000\n#1:2031:00=2000\n#2:2031:00=3000\n";
        let none = interpret(script, None).unwrap();
        assert_eq!(none.store.get(0x2031, 0), 1000);
        assert_eq!(none.summary.skipped, 2);

        let two = interpret(script, Some(Switch::try_from(2).unwrap())).unwrap();
        assert_eq!(two.store.get(0x2031, 0), 3000);
        assert_eq!(two.summary.skipped, 1);
        assert_eq!(two.summary.applied, 2);
    }

    #[test]
    fn test_size_exceeded_before_parse() {
        // Content is garbage; the size guard must fire first.
        let script: String = core::iter::repeat('x').take(MAX_SCRIPT_LEN + 1).collect();
        let err = interpret(&script, None).unwrap_err();
        assert_eq!(
            err,
            ConfigError::SizeExceeded {
                len: MAX_SCRIPT_LEN + 1,
                limit: MAX_SCRIPT_LEN
            }
        );
    }

    #[test]
    fn test_configured_size_limit() {
        let interpreter = Interpreter::new(InterpreterConfig::default().with_size_limit(8));
        let err = interpreter.run("2030:00=50", &ZeroBaseline).unwrap_err();
        assert!(matches!(err, ConfigError::SizeExceeded { len: 10, limit: 8 }));
    }

    #[test]
    fn test_parse_error_reports_line() {
        let err = interpret("2030:00=50\n\n3202:0G=1\n", None).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Parse(ParseError::new(3, ParseErrorKind::InvalidSubIndex))
        );
    }

    #[test]
    fn test_eval_error_aborts() {
        let directives = [
            Directive::new(1, None, OdAddress::new(0x6040, 0), Operation::Set(6)),
            Directive::new(2, None, OdAddress::new(0x6040, 0), Operation::BitSet(40)),
        ];
        let err = Interpreter::default()
            .apply_all(&directives, RegisterStore::default())
            .unwrap_err();
        assert!(matches!(err, ConfigError::Eval(EvalError::Overflow { bit: 40, .. })));
    }

    #[test]
    fn test_with_switch_validates() {
        assert_eq!(
            InterpreterConfig::default().with_switch(16),
            Err(ConfigError::InvalidSwitch(16))
        );
        let config = InterpreterConfig::default().with_switch(15).unwrap();
        assert_eq!(config.active_switch.map(u8::from), Some(15));
    }

    #[test]
    fn test_baseline_composition() {
        let mut snapshot = BTreeMap::new();
        snapshot.insert((0x3202, 0u8), 0x41u32);
        let result = Interpreter::default()
            .run("3202:00|=0x02\n3202:00.00=0\n", &snapshot)
            .unwrap();
        assert_eq!(result.store.get(0x3202, 0), 0x42);
        assert_eq!(result.summary.changed, 1);
    }
}
