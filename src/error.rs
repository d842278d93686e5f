use thiserror::Error;

use crate::pin::PinKind;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum Error {
    #[error("invalid pin {0} specified (must be 0..53)")]
    InvalidIdentifier(u8),

    #[error("pin {identifier} is already in use as a {existing:?} pin")]
    KindConflict { identifier: u8, existing: PinKind },

    #[error("cannot set state of pin GPIO{0} while it is configured for input")]
    InputWrite(u8),

    #[error("state {value} is out of range for pin GPIO{identifier}")]
    InvalidState { identifier: u8, value: f32 },

    #[error("PWM is not supported on pin GPIO{0}")]
    PwmUnsupported(u8),

    #[error("pin GPIO{0} must be configured for output to take a frequency")]
    FrequencyRequiresOutput(u8),

    #[error("pull is only valid while pin GPIO{0} is configured for input")]
    PullRequiresInput(u8),

    #[error("pin GPIO{0} must be configured for input to be driven externally")]
    DriveRequiresInput(u8),

    #[error("the device has been closed")]
    DeviceClosed,
}
