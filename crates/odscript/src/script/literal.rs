// crates/odscript/src/script/literal.rs
//! Numeric token grammar shared by values, bit positions and switch guards.

use crate::error::ParseErrorKind;
use crate::types::{BIT_POSITION_DIGITS, MAX_SWITCH};
use core::num::IntErrorKind;

/// Parses a 32-bit value literal.
///
/// Accepted spellings, all normalised to the same `u32`:
/// - decimal: `50`
/// - `0x`/`0X`-prefixed hex: `0x32`
/// - `h`/`H`-suffixed hex without prefix: `32h`
pub fn parse_literal(s: &str) -> Result<u32, ParseErrorKind> {
    let (digits, radix) = if let Some(rest) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        (rest, 16)
    } else if let Some(rest) = s.strip_suffix('h').or_else(|| s.strip_suffix('H')) {
        (rest, 16)
    } else {
        (s, 10)
    };

    // from_str_radix tolerates a leading '+', the script grammar does not.
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Err(ParseErrorKind::InvalidLiteral);
    }

    u32::from_str_radix(digits, radix).map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow => ParseErrorKind::LiteralOutOfRange,
        _ => ParseErrorKind::InvalidLiteral,
    })
}

/// Parses exactly `len` hex digits, as used for index and sub-index fields.
pub(crate) fn parse_fixed_hex(s: &str, len: usize) -> Option<u32> {
    if s.len() != len || !s.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(s, 16).ok()
}

/// Parses the two-character bit position of a `.NN=` operator.
///
/// Two decimal digits are read as decimal (`.10` is bit 10); anything else
/// must be two hex digits (`.1F` is bit 31).
pub(crate) fn parse_bit_position(s: &str) -> Result<u8, ParseErrorKind> {
    if s.len() != BIT_POSITION_DIGITS {
        return Err(ParseErrorKind::InvalidBitPosition);
    }
    let radix = if s.chars().all(|c| c.is_ascii_digit()) { 10 } else { 16 };
    match u8::from_str_radix(s, radix) {
        Ok(bit) if bit < 32 && s.chars().all(|c| c.is_digit(radix)) => Ok(bit),
        _ => Err(ParseErrorKind::InvalidBitPosition),
    }
}

/// Parses a switch guard nibble: one or two decimal digits, or one hex digit.
pub(crate) fn parse_switch_nibble(s: &str) -> Result<u8, ParseErrorKind> {
    let value = match s.len() {
        1 => s.chars().next().and_then(|c| c.to_digit(16)),
        2 if s.chars().all(|c| c.is_ascii_digit()) => s.parse::<u32>().ok(),
        _ => None,
    };
    match value {
        Some(v) if v <= MAX_SWITCH as u32 => Ok(v as u8),
        _ => Err(ParseErrorKind::InvalidSwitch),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_spellings_agree() {
        assert_eq!(parse_literal("13"), Ok(13));
        assert_eq!(parse_literal("0x0D"), Ok(13));
        assert_eq!(parse_literal("0X0d"), Ok(13));
        assert_eq!(parse_literal("0Dh"), Ok(13));
        assert_eq!(parse_literal("0dH"), Ok(13));
    }

    #[test]
    fn test_leading_zeros_are_not_overflow() {
        assert_eq!(parse_literal("0x0000000000000008"), Ok(8));
        assert_eq!(parse_literal("000050"), Ok(50));
    }

    #[test]
    fn test_literal_bounds() {
        assert_eq!(parse_literal("4294967295"), Ok(u32::MAX));
        assert_eq!(parse_literal("0xFFFFFFFF"), Ok(u32::MAX));
        assert_eq!(parse_literal("4294967296"), Err(ParseErrorKind::LiteralOutOfRange));
        assert_eq!(parse_literal("100000000h"), Err(ParseErrorKind::LiteralOutOfRange));
    }

    #[test]
    fn test_malformed_literals() {
        for bad in ["", "0x", "h", "+5", "-1", "12a", "0x1G", "0x10h", "1 2", "ABh0"] {
            assert_eq!(parse_literal(bad), Err(ParseErrorKind::InvalidLiteral), "{bad:?}");
        }
    }

    #[test]
    fn test_bit_position() {
        assert_eq!(parse_bit_position("00"), Ok(0));
        assert_eq!(parse_bit_position("10"), Ok(10));
        assert_eq!(parse_bit_position("31"), Ok(31));
        assert_eq!(parse_bit_position("1F"), Ok(31));
        assert_eq!(parse_bit_position("0a"), Ok(10));
        assert_eq!(parse_bit_position("32"), Err(ParseErrorKind::InvalidBitPosition));
        assert_eq!(parse_bit_position("20h"), Err(ParseErrorKind::InvalidBitPosition));
        assert_eq!(parse_bit_position("5"), Err(ParseErrorKind::InvalidBitPosition));
        assert_eq!(parse_bit_position("+5"), Err(ParseErrorKind::InvalidBitPosition));
    }

    #[test]
    fn test_switch_nibble() {
        assert_eq!(parse_switch_nibble("0"), Ok(0));
        assert_eq!(parse_switch_nibble("15"), Ok(15));
        assert_eq!(parse_switch_nibble("F"), Ok(15));
        assert_eq!(parse_switch_nibble("a"), Ok(10));
        assert_eq!(parse_switch_nibble("16"), Err(ParseErrorKind::InvalidSwitch));
        assert_eq!(parse_switch_nibble("1F"), Err(ParseErrorKind::InvalidSwitch));
        assert_eq!(parse_switch_nibble(""), Err(ParseErrorKind::InvalidSwitch));
    }
}
