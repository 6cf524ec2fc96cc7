// crates/odscript/src/cia402.rs
//! CiA 402 drive profile helpers for motor controllers.
//!
//! Well-known object indices use the `IDX_` naming convention. The decoders
//! turn raw register values read back from a drive into typed states, and
//! the commands can be emitted as script directives.

use crate::script::{Directive, Operation};
use crate::types::OdAddress;
use core::fmt;

// --- 0x6000 - 0x67FF: Drive Profile Area ---

pub const IDX_CONTROLWORD_U16: u16 = 0x6040;
pub const IDX_STATUSWORD_U16: u16 = 0x6041;
pub const IDX_MODES_OF_OPERATION_I8: u16 = 0x6060;
pub const IDX_MODES_OF_OPERATION_DISPLAY_I8: u16 = 0x6061;
pub const IDX_POSITION_ACTUAL_VALUE_I32: u16 = 0x6064;
pub const IDX_FOLLOWING_ERROR_WINDOW_U32: u16 = 0x6065;
pub const IDX_FOLLOWING_ERROR_TIMEOUT_U16: u16 = 0x6066;
pub const IDX_POSITION_WINDOW_U32: u16 = 0x6067;
pub const IDX_POSITION_WINDOW_TIME_U16: u16 = 0x6068;
pub const IDX_TARGET_POSITION_I32: u16 = 0x607A;
pub const IDX_POSITION_RANGE_LIMIT_AI32: u16 = 0x607B;
pub const IDX_HOME_OFFSET_I32: u16 = 0x607C;
pub const IDX_SOFTWARE_POSITION_LIMIT_AI32: u16 = 0x607D;
pub const SUBIDX_LIMIT_MIN: u8 = 1;
pub const SUBIDX_LIMIT_MAX: u8 = 2;
pub const IDX_POLARITY_U8: u16 = 0x607E;
pub const IDX_PROFILE_VELOCITY_U32: u16 = 0x6081;
pub const IDX_END_VELOCITY_U32: u16 = 0x6082;
pub const IDX_PROFILE_ACCELERATION_U32: u16 = 0x6083;
pub const IDX_PROFILE_DECELERATION_U32: u16 = 0x6084;
pub const IDX_QUICK_STOP_DECELERATION_U32: u16 = 0x6085;
pub const IDX_MOTION_PROFILE_TYPE_I16: u16 = 0x6086;
pub const IDX_MAX_ACCELERATION_U32: u16 = 0x60C5;
pub const IDX_MAX_DECELERATION_U32: u16 = 0x60C6;

// Statusword bits outside the state machine.
pub const STATUSWORD_TARGET_REACHED: u16 = 1 << 10;
pub const STATUSWORD_SET_POINT_ACK: u16 = 1 << 12;
pub const STATUSWORD_FOLLOWING_ERROR: u16 = 1 << 13;

/// State of the CiA 402 power state machine, decoded from the statusword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriveState {
    NotReadyToSwitchOn,
    SwitchOnDisabled,
    ReadyToSwitchOn,
    SwitchedOn,
    OperationEnabled,
    QuickStopActive,
    FaultReactionActive,
    Fault,
    /// The low byte matches no state pattern.
    Unknown,
}

impl DriveState {
    /// Decodes the state from a statusword (0x6041). Only the low byte is
    /// considered.
    pub fn from_statusword(statusword: u16) -> Self {
        let low = statusword & 0x00FF;
        // Bits 0-3 and 6 identify every state; bit 5 additionally separates
        // the states that share a 0x4F pattern.
        match (low & 0x4F, low & 0x6F) {
            (0x00, _) => DriveState::NotReadyToSwitchOn,
            (0x40, _) => DriveState::SwitchOnDisabled,
            (_, 0x21) => DriveState::ReadyToSwitchOn,
            (_, 0x23) => DriveState::SwitchedOn,
            (_, 0x27) => DriveState::OperationEnabled,
            (_, 0x07) => DriveState::QuickStopActive,
            (0x0F, _) => DriveState::FaultReactionActive,
            (0x08, _) => DriveState::Fault,
            _ => DriveState::Unknown,
        }
    }
}

impl fmt::Display for DriveState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DriveState::NotReadyToSwitchOn => "Not ready to switch on",
            DriveState::SwitchOnDisabled => "Switch on disabled",
            DriveState::ReadyToSwitchOn => "Ready to switch on",
            DriveState::SwitchedOn => "Switched on",
            DriveState::OperationEnabled => "Operation enabled",
            DriveState::QuickStopActive => "Quick stop active",
            DriveState::FaultReactionActive => "Fault reaction active",
            DriveState::Fault => "Fault",
            DriveState::Unknown => "Cannot determine controller state",
        };
        f.write_str(s)
    }
}

/// Modes of operation (0x6060 / 0x6061), including the Nanotec
/// manufacturer-specific negative modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationMode {
    AutoSetup,
    ClockDirection,
    NoMode,
    ProfilePosition,
    Velocity,
    ProfileVelocity,
    ProfileTorque,
    Reserved,
    Homing,
    Unknown(i8),
}

impl OperationMode {
    pub fn from_raw(raw: i8) -> Self {
        match raw {
            -2 => OperationMode::AutoSetup,
            -1 => OperationMode::ClockDirection,
            0 => OperationMode::NoMode,
            1 => OperationMode::ProfilePosition,
            2 => OperationMode::Velocity,
            3 => OperationMode::ProfileVelocity,
            4 => OperationMode::ProfileTorque,
            5 => OperationMode::Reserved,
            6 => OperationMode::Homing,
            other => OperationMode::Unknown(other),
        }
    }

    pub fn raw(self) -> i8 {
        match self {
            OperationMode::AutoSetup => -2,
            OperationMode::ClockDirection => -1,
            OperationMode::NoMode => 0,
            OperationMode::ProfilePosition => 1,
            OperationMode::Velocity => 2,
            OperationMode::ProfileVelocity => 3,
            OperationMode::ProfileTorque => 4,
            OperationMode::Reserved => 5,
            OperationMode::Homing => 6,
            OperationMode::Unknown(raw) => raw,
        }
    }

    /// A SET directive selecting this mode in 0x6060:00.
    ///
    /// The register holds an INTEGER8, so negative modes are written as
    /// their two's complement byte.
    pub fn to_directive(self, line: usize) -> Directive {
        Directive::new(
            line,
            None,
            OdAddress::new(IDX_MODES_OF_OPERATION_I8, 0),
            Operation::Set(u32::from(self.raw() as u8)),
        )
    }
}

/// Controlword (0x6040) commands driving the power state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlCommand {
    /// Transition to Ready to switch on.
    Shutdown,
    /// Transition to Switched on.
    SwitchOn,
    /// Transition to Operation enabled.
    EnableOperation,
    /// Operation enabled with bit 4 set, triggering a new set-point in
    /// profile position mode.
    NewSetPoint,
}

impl ControlCommand {
    pub fn controlword(self) -> u16 {
        match self {
            ControlCommand::Shutdown => 0x0006,
            ControlCommand::SwitchOn => 0x0007,
            ControlCommand::EnableOperation => 0x000F,
            ControlCommand::NewSetPoint => 0x001F,
        }
    }

    pub fn to_directive(self, line: usize) -> Directive {
        Directive::new(
            line,
            None,
            OdAddress::new(IDX_CONTROLWORD_U16, 0),
            Operation::Set(u32::from(self.controlword())),
        )
    }
}
