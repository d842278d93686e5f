/**
 * @file devices/rgb_led.rs
 * @author Nguyen Le Duy
 * @date 24/05/2025
 * @brief Full-color LED built from three PWM output devices
 */
use crate::Result;
use crate::devices::output::{DEFAULT_FREQUENCY, PwmOutputDevice};
use crate::registry::SharedPin;

/// One PWM channel per color component.
#[derive(Debug)]
pub struct RgbLed {
    red: PwmOutputDevice,
    green: PwmOutputDevice,
    blue: PwmOutputDevice,
}

impl RgbLed {
    pub fn new(red_pin: SharedPin, green_pin: SharedPin, blue_pin: SharedPin) -> Result<Self> {
        Ok(Self {
            red: PwmOutputDevice::new(red_pin, true, 0.0, DEFAULT_FREQUENCY)?,
            green: PwmOutputDevice::new(green_pin, true, 0.0, DEFAULT_FREQUENCY)?,
            blue: PwmOutputDevice::new(blue_pin, true, 0.0, DEFAULT_FREQUENCY)?,
        })
    }

    pub fn set_color(&self, red: f32, green: f32, blue: f32) -> Result<()> {
        self.red.set_value(red)?;
        self.green.set_value(green)?;
        self.blue.set_value(blue)
    }

    pub fn color(&self) -> (f32, f32, f32) {
        (self.red.value(), self.green.value(), self.blue.value())
    }

    pub fn on(&self) -> Result<()> {
        self.set_color(1.0, 1.0, 1.0)
    }

    pub fn off(&self) -> Result<()> {
        self.set_color(0.0, 0.0, 0.0)
    }

    pub fn is_lit(&self) -> bool {
        self.red.is_lit() || self.green.is_lit() || self.blue.is_lit()
    }

    pub fn close(&mut self) {
        self.red.close();
        self.green.close();
        self.blue.close();
    }
}
