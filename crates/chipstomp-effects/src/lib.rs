//! ChipStomp Effects - the pedal's effect implementations
//!
//! This crate provides the effects built on chipstomp-core:
//!
//! - [`Bitcrush`] - Bit depth and sample rate reduction
//! - [`Echo`] - Decimated tape echo with interpolated playback
//! - [`Flanger`] - Sine-swept short delay (wet only)
//! - [`PitchShift`] - Granular pitch shifter with cross-faded wrap
//! - [`Tremolo`] - Sine amplitude modulation
//! - [`Dummy`] - Inert placeholder
//!
//! Every effect embeds its buffers, so constructing one never allocates and
//! all of them can be built in `const` context.
//!
//! ## Example
//!
//! ```rust
//! use chipstomp_core::Effect;
//! use chipstomp_effects::Echo;
//!
//! let mut echo = Echo::new();
//! echo.set_delay(40);
//! echo.toggle();
//!
//! let output = echo.process(1200);
//! assert_eq!(output, 1200);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

pub mod bitcrush;
pub mod dummy;
pub mod echo;
pub mod flanger;
pub mod pitch_shift;
pub mod tremolo;

// Re-export main types at crate root
pub use bitcrush::Bitcrush;
pub use dummy::Dummy;
pub use echo::Echo;
pub use flanger::Flanger;
pub use pitch_shift::PitchShift;
pub use tremolo::Tremolo;
