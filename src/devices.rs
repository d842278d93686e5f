/**
 * @file devices.rs
 * @author Nguyen Le Duy
 * @date 24/05/2025
 * @brief Composite devices driving simulated pins
 */
pub mod motor;
pub mod output;
pub mod rgb_led;

pub use motor::Motor;
pub use output::{DEFAULT_FREQUENCY, OutputDevice, PwmOutputDevice};
pub use rgb_led::RgbLed;
