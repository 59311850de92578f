//! Placeholder effect with no features.
//!
//! Occupies a slot in the pedal lineup and shows how little an effect has
//! to implement: a name and its control state. Processing is identity and
//! every feature operation is inert; only the bypass toggle does anything.

use chipstomp_core::{Effect, EffectState, FeatureInfo};

/// Inert placeholder.
///
/// # Example
///
/// ```rust
/// use chipstomp_effects::Dummy;
/// use chipstomp_core::Effect;
///
/// let mut dummy = Dummy::new();
/// assert!(dummy.toggle());
/// assert_eq!(dummy.process(-123), -123);
/// ```
#[derive(Debug, Clone)]
pub struct Dummy {
    state: EffectState,
}

impl Dummy {
    /// Create a disabled placeholder.
    pub const fn new() -> Self {
        Self {
            state: EffectState::new(),
        }
    }
}

impl Default for Dummy {
    fn default() -> Self {
        Self::new()
    }
}

impl FeatureInfo for Dummy {}

impl Effect for Dummy {
    fn name(&self) -> &'static str {
        "Dummy"
    }

    fn state(&self) -> &EffectState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut EffectState {
        &mut self.state
    }
}
