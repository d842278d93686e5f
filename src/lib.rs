/**
 * @file lib.rs
 * @author Nguyen Le Duy
 * @date 18/05/2025
 * @brief Simulated GPIO pin library
 */
pub mod devices;
pub mod error;
pub mod pin;
pub mod registry;

mod utils;

pub use error::Error;
pub use pin::{Edges, Function, PIN_COUNT, PinKind, PinState, Pull, SimulatedPin};
pub use registry::{PinRegistry, SharedPin};
pub use utils::is_close;

pub type Result<T> = core::result::Result<T, Error>;
