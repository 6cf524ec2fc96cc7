use core::convert::TryFrom;
use core::fmt;

// --- Primitive Types (object dictionary UNSIGNEDn) ---

/// Alias for UNSIGNED8 (8-bit unsigned integer)
pub type UNSIGNED8 = u8;
/// Alias for UNSIGNED16 (16-bit unsigned integer)
pub type UNSIGNED16 = u16;
/// Alias for UNSIGNED32 (32-bit unsigned integer)
pub type UNSIGNED32 = u32;

// --- Script Constants ---

/// Upper bound on the byte length of a configuration script (4 KiB).
pub const MAX_SCRIPT_LEN: usize = 4096;

/// Highest configuration switch that can be selected or referenced.
pub const MAX_SWITCH: u8 = 15;

/// Lines starting with this character (after trimming) are comments.
pub const COMMENT_PREFIX: char = ';';

/// Number of hex digits of an object index.
pub const INDEX_DIGITS: usize = 4;

/// Number of hex digits of an object sub-index.
pub const SUB_INDEX_DIGITS: usize = 2;

/// Number of characters of the bit position in a `.NN=` operator.
pub const BIT_POSITION_DIGITS: usize = 2;

/// Address of a single register in the object dictionary.
///
/// Addresses order by index first, then sub-index, which is also the order
/// in which change sets are handed to a transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OdAddress {
    pub index: UNSIGNED16,
    pub sub_index: UNSIGNED8,
}

impl OdAddress {
    pub const fn new(index: u16, sub_index: u8) -> Self {
        Self { index, sub_index }
    }
}

impl fmt::Display for OdAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04X}:{:02X}", self.index, self.sub_index)
    }
}

impl From<(u16, u8)> for OdAddress {
    fn from((index, sub_index): (u16, u8)) -> Self {
        Self { index, sub_index }
    }
}

/// A configuration switch, wrapping a `u8` in the range 0-15.
///
/// Directives prefixed with `#n:` only apply when switch `n` is the active
/// switch of the run. This newtype keeps out-of-range nibbles from ever
/// reaching the interpreter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Switch(u8);

impl Switch {
    /// Returns the raw nibble value.
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Switch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error type for invalid Switch creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchError {
    /// Switch value is outside the valid range (0-15).
    InvalidRange(u8),
}

impl fmt::Display for SwitchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SwitchError::InvalidRange(value) => write!(
                f,
                "Invalid Switch value: {}. Valid range is 0-{}.",
                value, MAX_SWITCH
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SwitchError {}

impl TryFrom<u8> for Switch {
    type Error = SwitchError;

    /// Creates a `Switch` from a `u8`, returning an error if the value does
    /// not fit in a nibble.
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0..=MAX_SWITCH => Ok(Switch(value)),
            _ => Err(SwitchError::InvalidRange(value)),
        }
    }
}

impl From<Switch> for u8 {
    fn from(switch: Switch) -> Self {
        switch.0
    }
}
