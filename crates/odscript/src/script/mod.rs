// crates/odscript/src/script/mod.rs
//! Lexing and parsing of configuration scripts.
//!
//! A script is plain text of at most [`MAX_SCRIPT_LEN`] bytes. Every line
//! that is neither blank nor a `;` comment becomes exactly one
//! [`Directive`]; a single malformed line rejects the whole script.

mod directive;
mod literal;
mod parser;

pub use directive::{Directive, Operation, Operator};
pub use literal::parse_literal;

use crate::error::{ConfigError, ParseError};
use crate::types::{COMMENT_PREFIX, MAX_SCRIPT_LEN};
use alloc::vec::Vec;
use log::{error, trace};

/// Rejects scripts longer than `limit` bytes (never more than [`MAX_SCRIPT_LEN`]).
pub fn check_size(script: &str, limit: usize) -> Result<(), ConfigError> {
    let limit = limit.min(MAX_SCRIPT_LEN);
    if script.len() > limit {
        error!(
            "Script rejected: {} bytes exceeds the limit of {} bytes.",
            script.len(),
            limit
        );
        return Err(ConfigError::SizeExceeded {
            len: script.len(),
            limit,
        });
    }
    Ok(())
}

/// Parses a whole script into directives, in file order.
///
/// This is pure: no register is touched, so a parse failure can never leave
/// a partially applied configuration behind.
pub fn parse_script(script: &str) -> Result<Vec<Directive>, ParseError> {
    let script = script.strip_prefix('\u{feff}').unwrap_or(script);
    let mut directives = Vec::new();

    for (i, raw) in script.lines().enumerate() {
        let line = i + 1;
        let text = raw.trim();
        if text.is_empty() || text.starts_with(COMMENT_PREFIX) {
            continue;
        }
        match parser::parse_line(line, text) {
            Ok(directive) => {
                trace!("Line {}: parsed {:?}", line, directive);
                directives.push(directive);
            }
            Err(e) => {
                error!("Line {}: '{}' rejected: {}", line, text, e.kind);
                return Err(e);
            }
        }
    }
    Ok(directives)
}

/// Reads a script file, refusing anything over `limit` bytes before the
/// contents are read into memory.
#[cfg(feature = "std")]
pub fn load_script_file<P: AsRef<std::path::Path>>(
    path: P,
    limit: usize,
) -> Result<alloc::string::String, ConfigError> {
    use std::io::Read;

    let limit = limit.min(MAX_SCRIPT_LEN);
    let file = std::fs::File::open(path.as_ref())?;
    let len = file.metadata()?.len();
    if len > limit as u64 {
        error!(
            "Script file {} rejected: {} bytes exceeds the limit of {} bytes.",
            path.as_ref().display(),
            len,
            limit
        );
        return Err(ConfigError::SizeExceeded {
            len: usize::try_from(len).unwrap_or(usize::MAX),
            limit,
        });
    }

    // The file may have grown since the metadata call.
    let mut contents = alloc::string::String::with_capacity(len as usize);
    file.take(limit as u64 + 1).read_to_string(&mut contents)?;
    check_size(&contents, limit)?;
    Ok(contents)
}
