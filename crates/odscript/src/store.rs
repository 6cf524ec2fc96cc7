// crates/odscript/src/store.rs

use crate::error::EvalError;
use crate::eval::evaluate;
use crate::hal::{BaselineSupplier, RegisterWrite, ZeroBaseline};
use crate::script::{Directive, Operation};
use crate::types::OdAddress;
use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use core::fmt;
use log::{trace, warn};

static ZERO_BASELINE: ZeroBaseline = ZeroBaseline;

/// State of one register the store has seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterEntry {
    /// Value the register had before this run.
    pub baseline: u32,
    /// Current value.
    pub value: u32,
    /// Number of directives applied to this register.
    pub writes: u32,
}

impl RegisterEntry {
    fn from_baseline(baseline: u32) -> Self {
        Self {
            baseline,
            value: baseline,
            writes: 0,
        }
    }

    /// Written at least once and no longer equal to the baseline.
    pub fn is_changed(&self) -> bool {
        self.writes > 0 && self.value != self.baseline
    }
}

/// Snapshot of object dictionary registers built up by one run.
///
/// Registers not yet seen read through to the baseline supplier, so only
/// the addresses a script touches are ever materialised.
pub struct RegisterStore<'a> {
    entries: BTreeMap<OdAddress, RegisterEntry>,
    baseline: &'a dyn BaselineSupplier,
}

impl<'a> fmt::Debug for RegisterStore<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterStore")
            .field("entries", &self.entries)
            .field("baseline", &"<Baseline Supplier>")
            .finish()
    }
}

impl Default for RegisterStore<'static> {
    fn default() -> Self {
        Self::new(&ZERO_BASELINE)
    }
}

impl<'a> RegisterStore<'a> {
    /// Creates an empty store reading prior values from `baseline`.
    pub fn new(baseline: &'a dyn BaselineSupplier) -> Self {
        Self {
            entries: BTreeMap::new(),
            baseline,
        }
    }

    /// Explicitly seeds a register's baseline, taking precedence over the
    /// supplier. Any value written by this run is discarded.
    pub fn seed(&mut self, index: u16, sub_index: u8, value: u32) {
        trace!("Seeding {:#06X}:{:#04X} = {:#010X}", index, sub_index, value);
        self.entries
            .insert(OdAddress::new(index, sub_index), RegisterEntry::from_baseline(value));
    }

    /// Returns the current value of a register: the last written value, or
    /// its baseline (0 if neither seeded nor supplied).
    pub fn get(&self, index: u16, sub_index: u8) -> u32 {
        self.entries
            .get(&OdAddress::new(index, sub_index))
            .map_or_else(|| self.baseline.baseline(index, sub_index), |e| e.value)
    }

    /// Returns the full entry of a register this run has seen.
    pub fn entry(&self, index: u16, sub_index: u8) -> Option<&RegisterEntry> {
        self.entries.get(&OdAddress::new(index, sub_index))
    }

    /// Applies one directive to its target register.
    ///
    /// Only the addressed register is read or written. The new value is
    /// computed before anything is stored, so a failing directive leaves the
    /// entry untouched.
    pub fn apply(&mut self, directive: &Directive) -> Result<(), EvalError> {
        let address = directive.address;
        let baseline = self.baseline;
        let entry = self.entries.entry(address).or_insert_with(|| {
            RegisterEntry::from_baseline(baseline.baseline(address.index, address.sub_index))
        });

        let new_value = evaluate(directive.operation, entry.value, address)?;

        if entry.writes > 0 && matches!(directive.operation, Operation::Set(_)) && entry.value != new_value {
            warn!(
                "Line {}: {:#06X}:{:#04X} overwritten ({:#010X} -> {:#010X}), last write wins",
                directive.line, address.index, address.sub_index, entry.value, new_value
            );
        }
        trace!(
            "Line {}: {:#06X}:{:#04X} {:?}: {:#010X} -> {:#010X}",
            directive.line,
            address.index,
            address.sub_index,
            directive.operator(),
            entry.value,
            new_value
        );

        entry.value = new_value;
        entry.writes += 1;
        Ok(())
    }

    /// Registers written by this run whose value differs from the baseline,
    /// in ascending address order.
    pub fn changes(&self) -> Vec<RegisterWrite> {
        self.entries
            .iter()
            .filter(|(_, e)| e.is_changed())
            .map(|(addr, e)| RegisterWrite {
                index: addr.index,
                sub_index: addr.sub_index,
                value: e.value,
            })
            .collect()
    }

    /// All addresses written at least once, changed or not.
    pub fn touched(&self) -> Vec<OdAddress> {
        self.entries
            .iter()
            .filter(|(_, e)| e.writes > 0)
            .map(|(addr, _)| *addr)
            .collect()
    }

    /// Iterates over every register the store has materialised.
    pub fn iter(&self) -> impl Iterator<Item = (&OdAddress, &RegisterEntry)> {
        self.entries.iter()
    }
}
