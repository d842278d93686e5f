/**
 * @file devices/motor.rs
 * @author Nguyen Le Duy
 * @date 24/05/2025
 * @brief Bidirectional motor built from two PWM output devices
 */
use crate::Result;
use crate::devices::output::{DEFAULT_FREQUENCY, PwmOutputDevice};
use crate::registry::SharedPin;

/// Two PWM-driven half bridges, one per direction. At most one side is
/// energized at a time.
#[derive(Debug)]
pub struct Motor {
    forward: PwmOutputDevice,
    backward: PwmOutputDevice,
}

impl Motor {
    pub fn new(forward_pin: SharedPin, backward_pin: SharedPin) -> Result<Self> {
        Ok(Self {
            forward: PwmOutputDevice::new(forward_pin, true, 0.0, DEFAULT_FREQUENCY)?,
            backward: PwmOutputDevice::new(backward_pin, true, 0.0, DEFAULT_FREQUENCY)?,
        })
    }

    pub fn forward(&self, speed: f32) -> Result<()> {
        self.backward.off()?;
        self.forward.set_value(speed)
    }

    pub fn backward(&self, speed: f32) -> Result<()> {
        self.forward.off()?;
        self.backward.set_value(speed)
    }

    pub fn stop(&self) -> Result<()> {
        self.forward.off()?;
        self.backward.off()
    }

    /// Signed speed in [-1, 1]: positive forward, negative backward.
    pub fn value(&self) -> f32 {
        self.forward.value() - self.backward.value()
    }

    pub fn is_active(&self) -> bool {
        self.value() != 0.0
    }

    pub fn close(&mut self) {
        self.forward.close();
        self.backward.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pin::PinKind;
    use crate::registry::PinRegistry;
    use std::rc::Rc;

    fn motor_with_pins() -> (Motor, SharedPin, SharedPin) {
        let mut registry = PinRegistry::new();
        let forward = registry.acquire(4, PinKind::Pwm).unwrap();
        let backward = registry.acquire(5, PinKind::Pwm).unwrap();
        let motor = Motor::new(Rc::clone(&forward), Rc::clone(&backward)).unwrap();
        (motor, forward, backward)
    }

    #[test]
    fn test_motor_forward_and_backward() {
        let (motor, forward, backward) = motor_with_pins();

        motor.forward(1.0).unwrap();
        assert_eq!(forward.borrow().state(), 1.0);
        assert_eq!(backward.borrow().state(), 0.0);
        assert_eq!(motor.value(), 1.0);

        motor.backward(0.5).unwrap();
        assert_eq!(forward.borrow().state(), 0.0);
        assert_eq!(backward.borrow().state(), 0.5);
        assert_eq!(motor.value(), -0.5);
    }

    #[test]
    fn test_motor_stop() {
        let (motor, forward, backward) = motor_with_pins();

        motor.forward(0.8).unwrap();
        motor.stop().unwrap();
        assert!(!motor.is_active());
        assert_eq!(forward.borrow().state(), 0.0);
        assert_eq!(backward.borrow().state(), 0.0);
    }

    #[test]
    fn test_motor_rejects_silly_speeds() {
        let (motor, _, _) = motor_with_pins();
        assert!(motor.forward(2.0).is_err());
        assert!(motor.backward(-1.0).is_err());
        assert_eq!(motor.value(), 0.0);
    }

    #[test]
    fn test_motor_close_releases_both_pins() {
        let (mut motor, forward, backward) = motor_with_pins();

        motor.forward(1.0).unwrap();
        motor.close();

        assert_eq!(forward.borrow().state(), 0.0);
        assert_eq!(backward.borrow().frequency(), None);
        assert!(motor.stop().is_err());
    }
}
