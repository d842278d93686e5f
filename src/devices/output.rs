/**
 * @file devices/output.rs
 * @author Nguyen Le Duy
 * @date 24/05/2025
 * @brief Digital and proportional output devices
 */
use std::thread;
use std::time::Duration;

use crate::Result;
use crate::error::Error;
use crate::pin::Function;
use crate::registry::SharedPin;

/// PWM frequency used when a device does not specify one.
pub const DEFAULT_FREQUENCY: f64 = 100.0;

/// Digital output collaborator.
///
/// Owns the polarity contract: with `active_high` false the device logic is
/// inverted before it ever reaches the pin, so the pin stores exactly what
/// it is told.
#[derive(Debug)]
pub struct OutputDevice {
    pin: SharedPin,
    active_high: bool,
    closed: bool,
}

impl OutputDevice {
    /// Configure `pin` for output. `initial_value` of `None` leaves the pin
    /// state untouched.
    pub fn new(pin: SharedPin, active_high: bool, initial_value: Option<bool>) -> Result<Self> {
        pin.borrow_mut().set_function(Function::Output);

        let device = Self {
            pin,
            active_high,
            closed: false,
        };
        if let Some(value) = initial_value {
            device.set_value(value)?;
        }
        Ok(device)
    }

    /// The device-level logic value, polarity applied.
    pub fn value(&self) -> bool {
        self.pin.borrow().is_high() == self.active_high
    }

    pub fn set_value(&self, value: bool) -> Result<()> {
        self.check_open()?;
        let level = if value == self.active_high { 1.0 } else { 0.0 };
        self.pin.borrow_mut().set_state(level)
    }

    pub fn on(&self) -> Result<()> {
        self.set_value(true)
    }

    pub fn off(&self) -> Result<()> {
        self.set_value(false)
    }

    pub fn toggle(&self) -> Result<()> {
        self.set_value(!self.value())
    }

    /// Drive `cycles` on/off periods in the calling thread.
    pub fn blink(&self, on_time: Duration, off_time: Duration, cycles: usize) -> Result<()> {
        for _ in 0..cycles {
            self.on()?;
            thread::sleep(on_time);
            self.off()?;
            thread::sleep(off_time);
        }
        Ok(())
    }

    /// Close the underlying pin. Further writes fail with
    /// [`Error::DeviceClosed`].
    pub fn close(&mut self) {
        if !self.closed {
            self.pin.borrow_mut().close();
            self.closed = true;
        }
    }

    fn check_open(&self) -> Result<()> {
        if self.closed {
            Err(Error::DeviceClosed)
        } else {
            Ok(())
        }
    }
}

/// Proportional (duty-cycle) output collaborator over a PWM-capable pin.
#[derive(Debug)]
pub struct PwmOutputDevice {
    pin: SharedPin,
    active_high: bool,
    closed: bool,
}

impl PwmOutputDevice {
    /// Configure `pin` for PWM output at `frequency` and write the initial
    /// device value.
    ///
    /// # Errors
    ///
    /// [`Error::PwmUnsupported`] when the pin is not PWM-capable,
    /// [`Error::InvalidState`] when `initial_value` is outside `[0, 1]`.
    pub fn new(
        pin: SharedPin,
        active_high: bool,
        initial_value: f32,
        frequency: f64,
    ) -> Result<Self> {
        {
            let mut pin = pin.borrow_mut();
            pin.set_function(Function::Output);
            pin.set_frequency(Some(frequency))?;
        }

        let device = Self {
            pin,
            active_high,
            closed: false,
        };
        device.set_value(initial_value)?;
        Ok(device)
    }

    /// The device-level duty cycle, polarity applied.
    pub fn value(&self) -> f32 {
        let state = self.pin.borrow().state();
        if self.active_high { state } else { 1.0 - state }
    }

    pub fn set_value(&self, value: f32) -> Result<()> {
        self.check_open()?;
        if !(value.is_finite() && (0.0..=1.0).contains(&value)) {
            return Err(Error::InvalidState {
                identifier: self.pin.borrow().identifier(),
                value,
            });
        }

        let level = if self.active_high { value } else { 1.0 - value };
        self.pin.borrow_mut().set_state(level)
    }

    pub fn is_lit(&self) -> bool {
        self.value() > 0.0
    }

    pub fn on(&self) -> Result<()> {
        self.set_value(1.0)
    }

    pub fn off(&self) -> Result<()> {
        self.set_value(0.0)
    }

    pub fn toggle(&self) -> Result<()> {
        let value = self.value();
        self.set_value(1.0 - value)
    }

    pub fn frequency(&self) -> Option<f64> {
        self.pin.borrow().frequency()
    }

    pub fn set_frequency(&self, frequency: f64) -> Result<()> {
        self.check_open()?;
        self.pin.borrow_mut().set_frequency(Some(frequency))
    }

    /// Close the underlying pin, stopping the PWM signal. Further writes
    /// fail with [`Error::DeviceClosed`].
    pub fn close(&mut self) {
        if !self.closed {
            self.pin.borrow_mut().close();
            self.closed = true;
        }
    }

    fn check_open(&self) -> Result<()> {
        if self.closed {
            Err(Error::DeviceClosed)
        } else {
            Ok(())
        }
    }
}
