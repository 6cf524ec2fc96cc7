// crates/odscript/src/eval.rs
//! Register arithmetic for the five script operators.

use crate::error::EvalError;
use crate::script::Operation;
use crate::types::OdAddress;

/// Computes the new value of a register from its current value.
///
/// All arithmetic is unsigned 32-bit. Nothing wraps: a bit position that
/// cannot be shifted into a `u32` is an [`EvalError::Overflow`].
pub fn evaluate(operation: Operation, current: u32, address: OdAddress) -> Result<u32, EvalError> {
    match operation {
        Operation::Set(operand) => Ok(operand),
        Operation::OrAssign(operand) => Ok(current | operand),
        Operation::AndAssign(operand) => Ok(current & operand),
        Operation::BitSet(bit) => Ok(current | bit_mask(bit, address)?),
        Operation::BitClear(bit) => Ok(current & !bit_mask(bit, address)?),
    }
}

fn bit_mask(bit: u8, address: OdAddress) -> Result<u32, EvalError> {
    1u32.checked_shl(u32::from(bit)).ok_or(EvalError::Overflow {
        address,
        bit: u32::from(bit),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADDR: OdAddress = OdAddress::new(0x3202, 0x00);

    fn eval(op: Operation, current: u32) -> u32 {
        evaluate(op, current, ADDR).unwrap()
    }

    #[test]
    fn test_set_is_idempotent() {
        let once = eval(Operation::Set(0x0D), 0x1234);
        assert_eq!(once, 0x0D);
        assert_eq!(eval(Operation::Set(0x0D), once), 0x0D);
    }

    #[test]
    fn test_or_is_monotonic() {
        for current in [0, 0x02, 0xFFFF_0000, u32::MAX] {
            let result = eval(Operation::OrAssign(0x0000_00F2), current);
            assert_eq!(result & 0xF2, 0xF2);
            assert_eq!(result & current, current);
            assert_eq!(eval(Operation::OrAssign(0), current), current);
        }
    }

    #[test]
    fn test_and_is_idempotent() {
        for current in [0, 0x0F0F, u32::MAX] {
            let once = eval(Operation::AndAssign(0x00FF), current);
            assert_eq!(eval(Operation::AndAssign(0x00FF), once), once);
        }
    }

    #[test]
    fn test_bit_set_then_clear() {
        for current in [0, u32::MAX, 0x8000_0001] {
            for bit in [0u8, 7, 31] {
                let cleared = eval(Operation::BitClear(bit), eval(Operation::BitSet(bit), current));
                assert_eq!(cleared & (1 << bit), 0);
                let set = eval(Operation::BitSet(bit), eval(Operation::BitClear(bit), current));
                assert_eq!(set & (1 << bit), 1 << bit);
                // Other bits are untouched.
                assert_eq!(set & !(1 << bit), current & !(1 << bit));
            }
        }
    }

    #[test]
    fn test_bit_out_of_range_overflows() {
        assert_eq!(
            evaluate(Operation::BitSet(32), 0, ADDR),
            Err(EvalError::Overflow { address: ADDR, bit: 32 })
        );
        assert!(evaluate(Operation::BitClear(200), u32::MAX, ADDR).is_err());
    }
}
