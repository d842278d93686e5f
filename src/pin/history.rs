/**
 * @file pin/history.rs
 * @author Nguyen Le Duy
 * @date 18/05/2025
 * @brief Timestamped log of pin state transitions
 */
use std::time::Instant;

use crate::utils::is_close;

// Tolerances for comparing recorded timestamps against expected ones. About
// all that can reasonably be expected of a non-realtime host.
const TIME_REL_TOL: f64 = 0.01;
const TIME_ABS_TOL: f64 = 0.01;

/// One recorded transition. The timestamp is in seconds, relative to the
/// previous recorded change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinState {
    pub timestamp: f64,
    pub state: f32,
}

/// Append-only transition log. The first entry is always `(0.0, initial)`,
/// anchored at construction or at the last [`reset`](History::reset).
#[derive(Debug, Clone)]
pub struct History {
    states: Vec<PinState>,
    last_change: Instant,
}

impl History {
    pub fn new(initial: f32) -> Self {
        Self {
            states: vec![PinState {
                timestamp: 0.0,
                state: initial,
            }],
            last_change: Instant::now(),
        }
    }

    /// Append an entry stamped relative to the previous change.
    pub fn record(&mut self, state: f32) {
        let now = Instant::now();
        self.states.push(PinState {
            timestamp: now.duration_since(self.last_change).as_secs_f64(),
            state,
        });
        self.last_change = now;
    }

    /// Drop everything recorded so far and re-anchor the time origin to now.
    pub fn reset(&mut self, current: f32) {
        self.states.clear();
        self.states.push(PinState {
            timestamp: 0.0,
            state: current,
        });
        self.last_change = Instant::now();
    }

    pub fn entries(&self) -> &[PinState] {
        &self.states
    }

    /// Check the recorded states against `expected`, pairwise and in order.
    /// Excess entries on either side are ignored.
    ///
    /// # Panics
    ///
    /// Panics on the first recorded state that does not match.
    pub fn assert_states(&self, expected: &[f32]) {
        for (i, (actual, expected)) in self.states.iter().zip(expected).enumerate() {
            assert!(
                actual.state == *expected,
                "state {i} is {}, expected {expected}",
                actual.state,
            );
        }
    }

    /// As [`assert_states`](History::assert_states), but also checks that
    /// every relative timestamp is within tolerance of the expected one.
    ///
    /// # Panics
    ///
    /// Panics on the first entry whose timestamp or state is out of
    /// tolerance.
    pub fn assert_states_and_times(&self, expected: &[(f64, f32)]) {
        for (i, (actual, (time, state))) in self.states.iter().zip(expected).enumerate() {
            assert!(
                is_close(actual.timestamp, *time, TIME_REL_TOL, TIME_ABS_TOL),
                "timestamp {i} is {}, expected about {time}",
                actual.timestamp,
            );
            assert!(
                is_close(actual.state as f64, *state as f64, 1e-9, 1e-9),
                "state {i} is {}, expected {state}",
                actual.state,
            );
        }
    }
}
