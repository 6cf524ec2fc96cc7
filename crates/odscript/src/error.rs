// crates/odscript/src/error.rs

use crate::types::{OdAddress, SwitchError};
use core::fmt;

/// The reason a script line was rejected by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// The `#n:` prefix is not a nibble (0-15) or lacks its colon.
    InvalidSwitch,
    /// The index is not exactly 4 hex digits.
    InvalidIndex,
    /// The sub-index is not exactly 2 hex digits.
    InvalidSubIndex,
    /// The token between the address and the value is not `=`, `|=`, `&=` or `.NN=`.
    UnknownOperator,
    /// Nothing follows the operator.
    MissingValue,
    /// The value is not a decimal, `0x`-prefixed or `h`-suffixed hex literal.
    InvalidLiteral,
    /// The value does not fit in 32 bits.
    LiteralOutOfRange,
    /// The bit position of a `.NN=` operator is malformed or above 31.
    InvalidBitPosition,
    /// A `.NN=` operator was given a value other than 0 or 1.
    InvalidBitValue,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSwitch => write!(f, "switch guard must be '#<0-15>:'"),
            Self::InvalidIndex => write!(f, "index must be exactly 4 hex digits"),
            Self::InvalidSubIndex => write!(f, "sub-index must be exactly 2 hex digits"),
            Self::UnknownOperator => {
                write!(f, "unknown operator, expected '=', '|=', '&=' or '.NN='")
            }
            Self::MissingValue => write!(f, "missing value after operator"),
            Self::InvalidLiteral => write!(f, "value is not a valid numeric literal"),
            Self::LiteralOutOfRange => write!(f, "value does not fit in 32 bits"),
            Self::InvalidBitPosition => write!(f, "bit position must be two digits in 0-31"),
            Self::InvalidBitValue => write!(f, "bit value must be 0 or 1"),
        }
    }
}

/// A malformed script line, with its 1-based line number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseError {
    pub line: usize,
    pub kind: ParseErrorKind,
}

impl ParseError {
    pub const fn new(line: usize, kind: ParseErrorKind) -> Self {
        Self { line, kind }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Parse error on line {}: {}", self.line, self.kind)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseError {}

/// Errors raised while applying a directive to the register store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvalError {
    /// The operand or the shifted bit cannot be represented in 32 bits.
    Overflow { address: OdAddress, bit: u32 },
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Overflow { address, bit } => write!(
                f,
                "Evaluation overflow at {}: bit {} exceeds the 32-bit register",
                address, bit
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for EvalError {}

/// Top-level error of an interpretation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The script is longer than the configured size limit.
    SizeExceeded { len: usize, limit: usize },
    /// A line of the script is malformed. Nothing was applied.
    Parse(ParseError),
    /// A directive could not be applied. The whole run is void.
    Eval(EvalError),
    /// The caller supplied an active switch outside 0-15.
    InvalidSwitch(u8),
    /// The transport refused the change set.
    Transport(&'static str),
    /// The script file could not be read.
    #[cfg(feature = "std")]
    Io(std::io::ErrorKind),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SizeExceeded { len, limit } => write!(
                f,
                "Script size of {} bytes exceeds the limit of {} bytes",
                len, limit
            ),
            Self::Parse(e) => write!(f, "{}", e),
            Self::Eval(e) => write!(f, "{}", e),
            Self::InvalidSwitch(v) => write!(f, "Invalid active switch: {}", v),
            Self::Transport(s) => write!(f, "Transport error: {}", s),
            #[cfg(feature = "std")]
            Self::Io(kind) => write!(f, "I/O error while reading script: {}", kind),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
            Self::Eval(e) => Some(e),
            _ => None,
        }
    }
}

// --- From Implementations for Error Conversion ---

impl From<ParseError> for ConfigError {
    fn from(e: ParseError) -> Self {
        ConfigError::Parse(e)
    }
}

impl From<EvalError> for ConfigError {
    fn from(e: EvalError) -> Self {
        ConfigError::Eval(e)
    }
}

impl From<SwitchError> for ConfigError {
    fn from(err: SwitchError) -> Self {
        match err {
            SwitchError::InvalidRange(val) => ConfigError::InvalidSwitch(val),
        }
    }
}

#[cfg(feature = "std")]
impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e.kind())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_parse_error_display_cites_line() {
        let err = ParseError::new(7, ParseErrorKind::InvalidSubIndex);
        assert_eq!(
            err.to_string(),
            "Parse error on line 7: sub-index must be exactly 2 hex digits"
        );
    }

    #[test]
    fn test_from_switch_error() {
        let err: ConfigError = SwitchError::InvalidRange(16).into();
        assert_eq!(err, ConfigError::InvalidSwitch(16));
    }

    #[test]
    fn test_from_eval_error() {
        let eval = EvalError::Overflow {
            address: OdAddress::new(0x3202, 0),
            bit: 32,
        };
        let err: ConfigError = eval.into();
        assert!(matches!(err, ConfigError::Eval(EvalError::Overflow { bit: 32, .. })));
        assert!(err.to_string().contains("3202:00"));
    }
}
