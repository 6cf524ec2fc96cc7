// crates/odscript/src/script/directive.rs

use crate::types::{OdAddress, Switch};
use core::fmt;

/// The five assignment forms of the script grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// `=VALUE`
    Set,
    /// `|=VALUE`
    OrAssign,
    /// `&=VALUE`
    AndAssign,
    /// `.NN=1`
    BitSet,
    /// `.NN=0`
    BitClear,
}

/// An operator together with its already-normalised operand.
///
/// Bit operations carry the bit position; their value (1 or 0) is implied
/// by the variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Set(u32),
    OrAssign(u32),
    AndAssign(u32),
    BitSet(u8),
    BitClear(u8),
}

impl Operation {
    pub fn operator(&self) -> Operator {
        match self {
            Operation::Set(_) => Operator::Set,
            Operation::OrAssign(_) => Operator::OrAssign,
            Operation::AndAssign(_) => Operator::AndAssign,
            Operation::BitSet(_) => Operator::BitSet,
            Operation::BitClear(_) => Operator::BitClear,
        }
    }

    /// Returns the bit position for bit operations, `None` otherwise.
    pub fn bit(&self) -> Option<u8> {
        match self {
            Operation::BitSet(bit) | Operation::BitClear(bit) => Some(*bit),
            _ => None,
        }
    }
}

/// One parsed script instruction targeting a single register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Directive {
    /// 1-based line of the script this directive came from.
    pub line: usize,
    /// When set, the directive only applies while this switch is active.
    pub guard: Option<Switch>,
    pub address: OdAddress,
    pub operation: Operation,
}

impl Directive {
    pub fn new(line: usize, guard: Option<Switch>, address: OdAddress, operation: Operation) -> Self {
        Self {
            line,
            guard,
            address,
            operation,
        }
    }

    pub fn operator(&self) -> Operator {
        self.operation.operator()
    }
}

/// Renders the directive as a canonical script line, e.g. `#2:3202:00|=0x00000002`.
impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(switch) = self.guard {
            write!(f, "#{}:", switch)?;
        }
        write!(f, "{}", self.address)?;
        match self.operation {
            Operation::Set(v) => write!(f, "={:#010X}", v),
            Operation::OrAssign(v) => write!(f, "|={:#010X}", v),
            Operation::AndAssign(v) => write!(f, "&={:#010X}", v),
            Operation::BitSet(bit) => write!(f, ".{:02}=1", bit),
            Operation::BitClear(bit) => write!(f, ".{:02}=0", bit),
        }
    }
}
