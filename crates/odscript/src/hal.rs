use crate::ConfigError;
use crate::types::OdAddress;
use alloc::collections::BTreeMap;

/// One resolved register write, as handed to a [`ConfigTransport`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RegisterWrite {
    pub index: u16,
    pub sub_index: u8,
    pub value: u32,
}

impl RegisterWrite {
    pub fn address(&self) -> OdAddress {
        OdAddress::new(self.index, self.sub_index)
    }
}

/// What the transport reports back after persisting a change set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The values are live on the device.
    Applied,
    /// The values were stored but the device must be power cycled to load them.
    PowerCycleRequired,
}

/// Source of the values a register store starts from.
///
/// Typically a snapshot of the device's current object dictionary, or all
/// zeros. The supplier is only consulted for addresses the script touches.
pub trait BaselineSupplier {
    /// Returns the prior value of the register at (`index`, `sub_index`).
    fn baseline(&self, index: u16, sub_index: u8) -> u32;
}

/// Baseline where every register reads as zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroBaseline;

impl BaselineSupplier for ZeroBaseline {
    fn baseline(&self, _index: u16, _sub_index: u8) -> u32 {
        0
    }
}

/// A snapshot map. Addresses missing from the map read as zero.
impl BaselineSupplier for BTreeMap<(u16, u8), u32> {
    fn baseline(&self, index: u16, sub_index: u8) -> u32 {
        self.get(&(index, sub_index)).copied().unwrap_or(0)
    }
}

impl<T: BaselineSupplier + ?Sized> BaselineSupplier for &T {
    fn baseline(&self, index: u16, sub_index: u8) -> u32 {
        (**self).baseline(index, sub_index)
    }
}

/// Abstraction of the link that writes a finished configuration to hardware.
///
/// Implementations own the bus (CANopen, Modbus, USB mass storage, ...)
/// and know whether the device needs a power cycle to pick the values up.
pub trait ConfigTransport {
    /// Persists the given writes, in order, to the device.
    ///
    /// Only called with the complete change set of a successful run.
    fn commit(&mut self, entries: &[RegisterWrite]) -> Result<CommitOutcome, ConfigError>;
}
