//! ChipStomp Core - fixed-point primitives for pedal effects
//!
//! This crate provides the building blocks every ChipStomp effect is made
//! of, designed to run inside a per-sample interrupt with no allocation and
//! no floating point on the sample path.
//!
//! # Core Abstractions
//!
//! ## Effect System
//!
//! - [`Effect`] - Capability trait (process, next feature, adjust, toggle, report)
//! - [`EffectState`] - Enabled flag and feature cursor shared by all effects
//! - [`FeatureInfo`] / [`FeatureDescriptor`] - Tunable feature introspection
//!
//! ## Reporting
//!
//! - [`ReportLine`] - One `label value unit` display line
//! - [`Report`] - Fixed-capacity, `Copy` collection of lines
//! - [`ReportSink`] - Anything that accepts report lines
//! - [`EffectStatus`] - Integer snapshot the sample callback hands to the display
//!
//! ## Signal Primitives
//!
//! - [`SampleRing`] - Fixed-capacity circular sample buffer
//! - [`TableLfo`] - 24.8 phase-accumulator LFO over [`SINE_TABLE`]
//! - Fixed-point helpers: [`scale_u16`], [`lerp_frac8`], [`lerp_shift`], [`saturate`]
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible. Disable the default `std` feature in
//! your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! chipstomp-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Design Principles
//!
//! - **Real-time safe**: No allocations, no blocking, O(1) per sample
//! - **Integer only**: 16-bit audio in `i32`, `i64` for wide products
//! - **Clamp, never fail**: out-of-range input pins to a bound, indices wrap

#![cfg_attr(not(feature = "std"), no_std)]

pub mod delay;
pub mod effect;
pub mod feature;
pub mod fixed;
pub mod lfo;
pub mod report;
pub mod status;
pub mod waveform;

/// Audio sample rate of the pedal in Hz.
pub const SAMPLE_RATE: u32 = 44_100;

// Re-export main types at crate root
pub use delay::SampleRing;
pub use effect::{Effect, EffectState, report_features};
pub use feature::{FeatureDescriptor, FeatureInfo, FeatureUnit};
pub use fixed::{
    CLIP_HARD, CLIP_LEVEL, Sample, clamp_adjust, is_clipping, lerp_frac8, lerp_shift, percentage,
    saturate, scale_u16, to_i16,
};
pub use lfo::{TableLfo, step_to_hz};
pub use report::{MAX_REPORT_LINES, Report, ReportLine, ReportSink};
pub use status::{EffectStatus, MAX_STATUS_FEATURES};
pub use waveform::{SINE_TABLE, TABLE_LEN, TABLE_MASK, sine_at};
