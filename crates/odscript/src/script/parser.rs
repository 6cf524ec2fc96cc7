// crates/odscript/src/script/parser.rs

use super::directive::{Directive, Operation};
use super::literal::{parse_bit_position, parse_fixed_hex, parse_literal, parse_switch_nibble};
use crate::error::{ParseError, ParseErrorKind};
use crate::types::{INDEX_DIGITS, OdAddress, SUB_INDEX_DIGITS, Switch};

/// Splits `s` after its leading run of ASCII alphanumerics.
fn take_alnum(s: &str) -> (&str, &str) {
    let end = s
        .find(|c: char| !c.is_ascii_alphanumeric())
        .unwrap_or(s.len());
    s.split_at(end)
}

/// Parses one trimmed, non-blank, non-comment line into a directive.
///
/// Grammar: `[#<switch>:]<index4hex>[:<sub2hex>]<op><value>` where `<op>`
/// is one of `=`, `|=`, `&=`, `.NN=`.
pub(super) fn parse_line(line: usize, text: &str) -> Result<Directive, ParseError> {
    parse_line_inner(line, text).map_err(|kind| ParseError::new(line, kind))
}

fn parse_line_inner(line: usize, text: &str) -> Result<Directive, ParseErrorKind> {
    // --- 1. Optional switch guard ---
    let (guard, rest) = match text.strip_prefix('#') {
        Some(after_hash) => {
            let (token, rest) = after_hash
                .split_once(':')
                .ok_or(ParseErrorKind::InvalidSwitch)?;
            let nibble = parse_switch_nibble(token)?;
            let switch = Switch::try_from(nibble).map_err(|_| ParseErrorKind::InvalidSwitch)?;
            (Some(switch), rest)
        }
        None => (None, text),
    };

    // --- 2. Index and optional sub-index ---
    let (index_token, rest) = take_alnum(rest);
    let index = parse_fixed_hex(index_token, INDEX_DIGITS).ok_or(ParseErrorKind::InvalidIndex)? as u16;

    let (sub_index, rest) = match rest.strip_prefix(':') {
        Some(after_colon) => {
            let (sub_token, rest) = take_alnum(after_colon);
            let sub_index = parse_fixed_hex(sub_token, SUB_INDEX_DIGITS)
                .ok_or(ParseErrorKind::InvalidSubIndex)? as u8;
            (sub_index, rest)
        }
        None => (0, rest),
    };
    let address = OdAddress::new(index, sub_index);

    // --- 3. Operator and value ---
    let operation = if let Some(value) = rest.strip_prefix('=') {
        Operation::Set(parse_value(value)?)
    } else if let Some(value) = rest.strip_prefix("|=") {
        Operation::OrAssign(parse_value(value)?)
    } else if let Some(value) = rest.strip_prefix("&=") {
        Operation::AndAssign(parse_value(value)?)
    } else if let Some(after_dot) = rest.strip_prefix('.') {
        let (bit_token, value) = after_dot
            .split_once('=')
            .ok_or(ParseErrorKind::UnknownOperator)?;
        let bit = parse_bit_position(bit_token)?;
        match parse_value(value)? {
            0 => Operation::BitClear(bit),
            1 => Operation::BitSet(bit),
            _ => return Err(ParseErrorKind::InvalidBitValue),
        }
    } else {
        return Err(ParseErrorKind::UnknownOperator);
    };

    Ok(Directive::new(line, guard, address, operation))
}

fn parse_value(value: &str) -> Result<u32, ParseErrorKind> {
    if value.is_empty() {
        return Err(ParseErrorKind::MissingValue);
    }
    parse_literal(value)
}
