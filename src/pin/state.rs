/**
 * @file pin/state.rs
 * @author Nguyen Le Duy
 * @date 18/05/2025
 * @brief Function, pull, edge and capability descriptors of a simulated pin
 */

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    /// Externally driven, honoring the pull setting.
    #[default]
    Input,
    /// Explicitly written by the owning device.
    Output,
}

/// Passive bias applied to an input pin absent external drive.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Pull {
    #[default]
    Floating,
    Up,
    Down,
}

/// Which transitions invoke the change callback.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Edges {
    None,
    Rising,
    Falling,
    #[default]
    Both,
}

impl Edges {
    /// Whether a transition in the given direction should notify.
    pub fn includes(self, rising: bool) -> bool {
        match self {
            Edges::None => false,
            Edges::Rising => rising,
            Edges::Falling => !rising,
            Edges::Both => true,
        }
    }
}

/// Capability descriptor governing the write-path validation of a pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinKind {
    /// Only the two logic levels are representable.
    Digital,
    /// Any duty-cycle value in [0, 1] is representable.
    Pwm,
}

impl PinKind {
    /// Range check for a state write.
    pub fn accepts(self, value: f32) -> bool {
        match self {
            PinKind::Digital => value == 0.0 || value == 1.0,
            PinKind::Pwm => value.is_finite() && (0.0..=1.0).contains(&value),
        }
    }
}
