#![cfg_attr(not(feature = "std"), no_std)]
#![doc = "Loader for object dictionary configuration scripts."]
#![doc = ""]
#![doc = "Parses the line-oriented `INDEX:SUB<op>VALUE` script format used to"]
#![doc = "configure motor controllers and applies it, in file order, to a snapshot"]
#![doc = "of 32-bit registers. The resulting change set is handed to a"]
#![doc = "`ConfigTransport` that writes it to the device."]

// 'alloc' is used for the directive list and the register map
extern crate alloc;

// --- Foundation Modules ---
pub mod error;
pub mod hal;
pub mod types;

// --- Interpreter ---
pub mod eval;
pub mod interpreter;
pub mod script;
pub mod store;
pub mod switch;

// --- Device Profiles ---
pub mod cia402;

// --- Top-level Exports ---
pub use error::{ConfigError, EvalError, ParseError, ParseErrorKind};
pub use hal::{BaselineSupplier, CommitOutcome, ConfigTransport, RegisterWrite, ZeroBaseline};
pub use interpreter::{CommitReport, Interpretation, Interpreter, InterpreterConfig, RunSummary, interpret};
pub use script::{Directive, Operation, Operator, parse_script};
pub use store::{RegisterEntry, RegisterStore};
pub use switch::SwitchContext;
pub use types::{MAX_SCRIPT_LEN, OdAddress, Switch, SwitchError};
