/**
 * @file registry.rs
 * @author Nguyen Le Duy
 * @date 18/05/2025
 * @brief Table of live simulated pins, keyed by identifier
 */
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::Result;
use crate::error::Error;
use crate::pin::{PinKind, SimulatedPin};

/// Shared handle to a pin. Simulated components are single-threaded by
/// contract, so plain reference counting with interior mutability is enough.
pub type SharedPin = Rc<RefCell<SimulatedPin>>;

/// Owner of every live pin.
///
/// One instance exists per identifier at a time: repeated `acquire` calls
/// hand out handles to the same pin, and a kind mismatch against an existing
/// pin is refused. The registry itself is plain data; whoever drives the
/// simulation (typically a test harness or the application root) owns it and
/// decides when [`release_all`](PinRegistry::release_all) retires the
/// current generation of pins.
#[derive(Debug, Default)]
pub struct PinRegistry {
    pins: HashMap<u8, SharedPin>,
}

impl PinRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the pin for `identifier`, constructing it on first use.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidIdentifier`] when the identifier is outside the
    /// addressable range, [`Error::KindConflict`] when the identifier is
    /// already bound to a pin of a different kind.
    pub fn acquire(&mut self, identifier: u8, kind: PinKind) -> Result<SharedPin> {
        if let Some(existing) = self.pins.get(&identifier) {
            let existing_kind = existing.borrow().kind();
            if existing_kind != kind {
                return Err(Error::KindConflict {
                    identifier,
                    existing: existing_kind,
                });
            }
            return Ok(Rc::clone(existing));
        }

        let pin = Rc::new(RefCell::new(SimulatedPin::new(identifier, kind)?));
        log::info!("registered {kind:?} pin GPIO{identifier}");
        self.pins.insert(identifier, Rc::clone(&pin));
        Ok(pin)
    }

    /// Discard every pin, releasing all identifiers for reuse. The pins
    /// themselves are not closed or otherwise mutated; outstanding handles
    /// keep working until dropped.
    pub fn release_all(&mut self) {
        if !self.pins.is_empty() {
            log::info!("releasing {} pin(s)", self.pins.len());
        }
        self.pins.clear();
    }

    pub fn len(&self) -> usize {
        self.pins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acquire_returns_the_same_instance() {
        let mut registry = PinRegistry::new();

        let first = registry.acquire(2, PinKind::Digital).unwrap();
        let second = registry.acquire(2, PinKind::Digital).unwrap();
        assert!(Rc::ptr_eq(&first, &second));
        assert_eq!(registry.len(), 1);

        // state survives re-acquisition
        first.borrow_mut().set_function(crate::pin::Function::Output);
        first.borrow_mut().set_state(1.0).unwrap();
        assert!(second.borrow().is_high());
    }

    #[test]
    fn test_acquire_refuses_a_kind_conflict() {
        let mut registry = PinRegistry::new();
        registry.acquire(2, PinKind::Digital).unwrap();

        assert_eq!(
            registry.acquire(2, PinKind::Pwm).unwrap_err(),
            Error::KindConflict {
                identifier: 2,
                existing: PinKind::Digital,
            }
        );

        // the other direction conflicts too
        registry.acquire(3, PinKind::Pwm).unwrap();
        assert!(registry.acquire(3, PinKind::Digital).is_err());
    }

    #[test]
    fn test_acquire_validates_the_identifier_range() {
        let mut registry = PinRegistry::new();
        assert_eq!(
            registry.acquire(54, PinKind::Digital).unwrap_err(),
            Error::InvalidIdentifier(54)
        );
        assert!(registry.acquire(53, PinKind::Digital).is_ok());
        assert!(registry.acquire(0, PinKind::Digital).is_ok());
    }

    #[test]
    fn test_release_all_retires_identifiers() {
        let mut registry = PinRegistry::new();
        let old = registry.acquire(2, PinKind::Digital).unwrap();

        registry.release_all();
        assert!(registry.is_empty());

        // a fresh acquisition may change the pin kind
        let new = registry.acquire(2, PinKind::Pwm).unwrap();
        assert!(!Rc::ptr_eq(&old, &new));
    }
}
