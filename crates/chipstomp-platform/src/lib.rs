//! ChipStomp Platform - runtime glue between the pedal hardware and its effects
//!
//! This crate turns a lineup of [`Effect`]s into something a timer interrupt
//! can call once per sample and a control task can steer without locks.
//!
//! # Core Abstractions
//!
//! ## Effect Selection
//!
//! - [`EffectManager`] - Owns the lineup, routes samples and controls to the active effect
//! - [`standard_pedal`] - Manager over the full standard lineup
//!
//! ## Control Path
//!
//! - [`ControlEvent`] - Encoder, button and footswitch gestures
//! - [`ControlReceiver`] / [`StatusSender`] - Wait-free queue endpoints
//! - [`EffectStatus`] - Integer answer to a report request, rendered on the control side
//! - [`Meters`] - Clip LED flag and [`PeakMeter`] shared with the callback
//!
//! ## Sample Path
//!
//! - [`SampleClock`] / [`SampleCallback`] - Periodic tick contract
//! - [`AudioEngine`] - The callback: drain controls, process, saturate
//! - [`OfflineClock`] - Buffer-driven clock for hosts and tests
//!
//! # Features
//!
//! - `std` (default): queue impls for `VecDeque` and `Vec`
//! - `rtrb` (default, implies `std`): lock-free SPSC queues via [`control_channel`]
//! - `tracing`: `debug!` events on selection and toggle (control path only)
//!
//! # no_std Support
//!
//! Disable the default `std` feature for embedded targets:
//!
//! ```toml
//! [dependencies]
//! chipstomp-platform = { version = "0.1", default-features = false }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

pub mod control;
pub mod engine;
pub mod manager;

// Re-export chipstomp-core types for convenience
pub use chipstomp_core::{Effect, EffectStatus, Report, ReportLine, ReportSink, Sample};

pub use control::{
    ClipMeter, ControlEvent, ControlReceiver, Meters, PeakLevels, PeakMeter, StatusSender,
};
#[cfg(feature = "rtrb")]
pub use control::{CallbackQueues, ControlHandle, control_channel};
pub use engine::{AudioEngine, MAX_EVENTS_PER_TICK, OfflineClock, SampleCallback, SampleClock};
pub use manager::EffectManager;

use chipstomp_registry::{LINEUP_LEN, PedalEffect, standard_lineup};

/// Manager over every effect in the standard lineup.
pub type StandardPedal = EffectManager<PedalEffect, LINEUP_LEN>;

/// A pedal with the standard lineup, all effects disabled, first one active.
pub const fn standard_pedal() -> StandardPedal {
    EffectManager::new(standard_lineup())
}
