// crates/odscript/src/switch.rs

use crate::script::Directive;
use crate::types::Switch;

/// The configuration switch selected for one interpretation run.
///
/// Immutable for the duration of the run. With no switch selected, every
/// switch-guarded directive is inert.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SwitchContext {
    active: Option<Switch>,
}

impl SwitchContext {
    pub const fn new(active: Option<Switch>) -> Self {
        Self { active }
    }

    pub fn active(&self) -> Option<Switch> {
        self.active
    }

    /// Returns `true` if the directive applies under this context.
    pub fn admits(&self, directive: &Directive) -> bool {
        match directive.guard {
            None => true,
            Some(guard) => self.active == Some(guard),
        }
    }
}
