/**
 * @file pin.rs
 * @author Nguyen Le Duy
 * @date 18/05/2025
 * @brief Simulated GPIO pin state machine
 */
use std::fmt;

use crate::Result;
use crate::error::Error;

pub mod history;
pub mod state;

pub use history::{History, PinState};
pub use state::{Edges, Function, PinKind, Pull};

/// Number of addressable pin identifiers.
pub const PIN_COUNT: u8 = 54;

/// Invoked synchronously, in-line from the mutating call, whenever a
/// qualifying transition happens.
pub type ChangeCallback = Box<dyn FnMut()>;

/// A simulated GPIO pin.
///
/// The pin is a small state machine over its function. While configured for
/// output its state is written explicitly through [`set_state`]; while
/// configured for input it is driven externally through [`drive_high`] /
/// [`drive_low`], honoring the pull setting. Every change of the stored
/// value is appended to a relative-timestamped history log, which tests use
/// for temporal assertions.
///
/// Whether the pin is digital or PWM-capable is decided by its [`PinKind`]:
/// the kind only alters the write-path validation and the frequency
/// behavior, never the state machine itself.
///
/// [`set_state`]: SimulatedPin::set_state
/// [`drive_high`]: SimulatedPin::drive_high
/// [`drive_low`]: SimulatedPin::drive_low
pub struct SimulatedPin {
    identifier: u8,
    kind: PinKind,
    function: Function,
    state: f32,
    pull: Pull,
    bounce: Option<f64>,
    edges: Edges,
    frequency: Option<f64>,
    change_callback: Option<ChangeCallback>,
    history: History,
}

impl SimulatedPin {
    /// Create a pin in its idle configuration: input function, low state,
    /// floating pull, notifying on both edges.
    pub fn new(identifier: u8, kind: PinKind) -> Result<Self> {
        if identifier >= PIN_COUNT {
            return Err(Error::InvalidIdentifier(identifier));
        }

        Ok(Self {
            identifier,
            kind,
            function: Function::default(),
            state: 0.0,
            pull: Pull::default(),
            bounce: None,
            edges: Edges::default(),
            frequency: None,
            change_callback: None,
            history: History::new(0.0),
        })
    }

    pub fn identifier(&self) -> u8 {
        self.identifier
    }

    pub fn kind(&self) -> PinKind {
        self.kind
    }

    pub fn function(&self) -> Function {
        self.function
    }

    /// Switch the pin function. Switching to input re-applies the current
    /// pull, which may itself drive a transition and notify.
    pub fn set_function(&mut self, function: Function) {
        self.function = function;
        if function == Function::Input {
            self.apply_pull();
        }
    }

    /// The stored level. Exactly 0.0 or 1.0 on a digital pin.
    pub fn state(&self) -> f32 {
        self.state
    }

    pub fn is_high(&self) -> bool {
        self.state > 0.0
    }

    /// Write the level of an output pin.
    ///
    /// # Errors
    ///
    /// [`Error::InputWrite`] while the pin is configured for input, and
    /// [`Error::InvalidState`] when the value is outside the range the pin
    /// kind can represent. A rejected write never mutates state nor appends
    /// history.
    pub fn set_state(&mut self, value: f32) -> Result<()> {
        if self.function == Function::Input {
            return Err(Error::InputWrite(self.identifier));
        }
        if !self.kind.accepts(value) {
            return Err(Error::InvalidState {
                identifier: self.identifier,
                value,
            });
        }

        self.transition(value);
        Ok(())
    }

    pub fn frequency(&self) -> Option<f64> {
        self.frequency
    }

    /// Set or clear the PWM frequency.
    ///
    /// Clearing the frequency stops the PWM signal and forces the state to
    /// 0.0 (recorded as a transition if the value changes).
    ///
    /// # Errors
    ///
    /// [`Error::PwmUnsupported`] for any `Some` frequency on a digital pin,
    /// [`Error::FrequencyRequiresOutput`] for a `Some` frequency while the
    /// pin is not configured for output.
    pub fn set_frequency(&mut self, frequency: Option<f64>) -> Result<()> {
        match self.kind {
            PinKind::Digital => match frequency {
                Some(_) => Err(Error::PwmUnsupported(self.identifier)),
                None => Ok(()),
            },
            PinKind::Pwm => {
                if frequency.is_some() && self.function != Function::Output {
                    return Err(Error::FrequencyRequiresOutput(self.identifier));
                }

                self.frequency = frequency;
                if frequency.is_none() {
                    self.transition(0.0);
                }
                Ok(())
            }
        }
    }

    pub fn pull(&self) -> Pull {
        self.pull
    }

    /// Change the pull of an input pin. `Up` drives the pin high, `Down`
    /// drives it low, `Floating` leaves the state unchanged.
    ///
    /// # Errors
    ///
    /// [`Error::PullRequiresInput`] while the pin is configured for output.
    pub fn set_pull(&mut self, pull: Pull) -> Result<()> {
        if self.function != Function::Input {
            return Err(Error::PullRequiresInput(self.identifier));
        }

        self.pull = pull;
        self.apply_pull();
        Ok(())
    }

    pub fn bounce(&self) -> Option<f64> {
        self.bounce
    }

    /// Store the debounce interval. Not enforced on transitions.
    pub fn set_bounce(&mut self, bounce: Option<f64>) {
        self.bounce = bounce;
    }

    pub fn edges(&self) -> Edges {
        self.edges
    }

    pub fn set_edges(&mut self, edges: Edges) {
        self.edges = edges;
    }

    /// Replace the change callback. Last writer wins; there is no queue.
    pub fn set_change_callback<F: FnMut() + 'static>(&mut self, callback: F) {
        self.change_callback = Some(Box::new(callback));
    }

    pub fn clear_change_callback(&mut self) {
        self.change_callback = None;
    }

    pub fn has_change_callback(&self) -> bool {
        self.change_callback.is_some()
    }

    /// Externally force an input pin high.
    ///
    /// # Errors
    ///
    /// [`Error::DriveRequiresInput`] while the pin is configured for output.
    pub fn drive_high(&mut self) -> Result<()> {
        self.drive(1.0)
    }

    /// Externally force an input pin low.
    ///
    /// # Errors
    ///
    /// [`Error::DriveRequiresInput`] while the pin is configured for output.
    pub fn drive_low(&mut self) -> Result<()> {
        self.drive(0.0)
    }

    fn drive(&mut self, level: f32) -> Result<()> {
        if self.function != Function::Input {
            return Err(Error::DriveRequiresInput(self.identifier));
        }

        self.transition(level);
        Ok(())
    }

    /// Return the pin to its idle configuration. A PWM pin stops its signal
    /// first (forcing a final zero-state transition), then the callback is
    /// dropped and the pin goes back to input, re-applying its pull.
    pub fn close(&mut self) {
        if self.kind == PinKind::Pwm {
            self.frequency = None;
            self.transition(0.0);
        }
        self.change_callback = None;
        self.set_function(Function::Input);
    }

    /// The transitions recorded since construction or the last
    /// [`reset_history`](SimulatedPin::reset_history).
    pub fn history(&self) -> &[PinState] {
        self.history.entries()
    }

    /// Discard all history, re-anchoring the time origin to now with a
    /// single `(0.0, current_state)` entry.
    pub fn reset_history(&mut self) {
        self.history.reset(self.state);
    }

    /// See [`History::assert_states`].
    pub fn assert_states(&self, expected: &[f32]) {
        self.history.assert_states(expected);
    }

    /// See [`History::assert_states_and_times`].
    pub fn assert_states_and_times(&self, expected: &[(f64, f32)]) {
        self.history.assert_states_and_times(expected);
    }

    // An input pin floats to whatever its pull dictates.
    fn apply_pull(&mut self) {
        match self.pull {
            Pull::Up => {
                self.transition(1.0);
            }
            Pull::Down => {
                self.transition(0.0);
            }
            Pull::Floating => {}
        }
    }

    /// Apply a validated level change. Records a history entry and notifies
    /// per the edge policy when the stored value actually changes; a write
    /// of the current value is a no-op.
    fn transition(&mut self, value: f32) -> bool {
        if self.state == value {
            return false;
        }

        let rising = value > self.state;
        self.state = value;
        self.history.record(value);
        log::debug!("GPIO{}: state changed to {value}", self.identifier);

        if self.edges.includes(rising) {
            if let Some(callback) = self.change_callback.as_mut() {
                callback();
            }
        }

        true
    }
}

impl fmt::Debug for SimulatedPin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimulatedPin")
            .field("identifier", &self.identifier)
            .field("kind", &self.kind)
            .field("function", &self.function)
            .field("state", &self.state)
            .field("pull", &self.pull)
            .field("edges", &self.edges)
            .field("frequency", &self.frequency)
            .finish_non_exhaustive()
    }
}
